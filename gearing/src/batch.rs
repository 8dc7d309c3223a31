/*
 * Copyright (c):
 * 2026 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of gearcalc.
 *
 * gearcalc is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * gearcalc is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with gearcalc. If not, see <https://www.gnu.org/licenses/>.
 */

use serde::Serialize;
use utils::units::percent_to_ratio;
use crate::error::Result;
use crate::hub::HubRatioExpander;
use crate::metrics::DrivetrainInput;
use crate::overlap::{OverlapAnalyzer, ScoredConfiguration};
use crate::table::GearRow;
use crate::wheel::WheelSpec;

/// Identity of a hand picked drivetrain: one chainring and any number of cogs
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DrivetrainKey {
    front_teeth: u32,
    #[serde(rename = "rear_teeths")]
    rear_teeth: Vec<u32>
}

impl DrivetrainKey {
    pub fn new(front_teeth: u32, rear_teeth: Vec<u32>) -> DrivetrainKey {
        DrivetrainKey { front_teeth, rear_teeth }
    }

    pub fn front_teeth(&self) -> u32 {
        self.front_teeth
    }

    pub fn rear_teeth(&self) -> &[u32] {
        &self.rear_teeth
    }
}

/// Direct drive rows for each rear cog
pub fn drivetrain_rows(wheel: WheelSpec,
                       front_teeth: u32,
                       rear_teeth_list: &[u32],
                       crank_length_mm: f64) -> Result<Vec<GearRow>>
{
    rear_teeth_list.iter().map(|rear_teeth| {
        let input = DrivetrainInput::new(wheel, crank_length_mm, front_teeth, *rear_teeth)?;
        Ok(GearRow::new(front_teeth, input.compute()))
    }).collect()
}

/// Compute every rear cog at every hub state. Rows are ordered by cog and
/// then by hub state, each evaluated directly at its own hub ratio.
pub fn batch_gear_calculations(wheel: WheelSpec,
                               front_teeth: u32,
                               rear_teeth_list: &[u32],
                               hub_ratio_percentages: &[u32],
                               crank_length_mm: f64) -> Result<Vec<GearRow>>
{
    let mut results = Vec::with_capacity(rear_teeth_list.len() * hub_ratio_percentages.len());
    for rear_teeth in rear_teeth_list {
        let input = DrivetrainInput::new(wheel, crank_length_mm, front_teeth, *rear_teeth)?;
        for hub_percent in hub_ratio_percentages {
            let input = input.with_hub_ratio(percent_to_ratio(*hub_percent as f64))?;
            results.push(GearRow::new(front_teeth, input.compute()));
        }
    }
    Ok(results)
}

/// Overlap score of a single hand picked drivetrain across the hub states
pub fn analyze_drivetrain(wheel: WheelSpec,
                          front_teeth: u32,
                          rear_teeth_list: &[u32],
                          hub_ratio_percentages: &[u32],
                          crank_length_mm: f64) -> Result<Option<ScoredConfiguration<DrivetrainKey>>>
{
    let expander = HubRatioExpander::new(hub_ratio_percentages.to_vec())?;
    let base = drivetrain_rows(wheel, front_teeth, rear_teeth_list, crank_length_mm)?;
    let key = DrivetrainKey::new(front_teeth, rear_teeth_list.to_vec());
    Ok(OverlapAnalyzer::score(key, expander.expand(base)))
}
