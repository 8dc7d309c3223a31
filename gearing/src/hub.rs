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

use utils::units::percent_to_ratio;
use crate::error::{GearingError, Result};
use crate::table::GearRow;

/// Cross joins gearing rows with the states of an internal gear hub.
///
/// Input rows are expected to have been computed for direct drive. Every
/// output row is the input row rescaled by one of the hub ratios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubRatioExpander {
    percentages: Vec<u32>
}

impl HubRatioExpander {
    /// `percentages` are the hub states where 100 means direct drive
    pub fn new(percentages: Vec<u32>) -> Result<HubRatioExpander> {
        if let Some(bad) = percentages.iter().find(|p| **p == 0) {
            return Err(GearingError::InvalidHubRatio(*bad as f64));
        }
        Ok(HubRatioExpander { percentages })
    }

    pub fn percentages(&self) -> &[u32] {
        &self.percentages
    }

    pub fn hub_ratios(&self) -> impl Iterator<Item=f64> + '_ {
        self.percentages.iter().map(|p| percent_to_ratio(*p as f64))
    }

    pub fn expand_row<'a>(&'a self, row: &'a GearRow) -> impl Iterator<Item=GearRow> + 'a {
        self.hub_ratios().map(move |hub_ratio| row.rescaled(hub_ratio))
    }

    /// Expand a whole table. Output is grouped by input row, hub states in the
    /// order they were supplied.
    pub fn expand<'a, I>(&'a self, rows: I) -> impl Iterator<Item=GearRow> + 'a
        where I: IntoIterator<Item=GearRow>,
              I::IntoIter: 'a
    {
        rows.into_iter().flat_map(move |row| {
            self.hub_ratios().map(move |hub_ratio| row.rescaled(hub_ratio))
        })
    }
}
