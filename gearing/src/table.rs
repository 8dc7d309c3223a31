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

use std::fmt::{Display, Formatter};
use itertools::{Itertools, MinMaxResult};
use serde::Serialize;
use crate::metrics::ComputedMetrics;

/// Stable names of the columns the engine produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    WheelDiameter,
    HubRatio,
    GearInches,
    MetreDevelopment,
    GainRatio,
    RearTeeth,
    FrontTeeth,
    RearTeethCombination,
    Overlap,
    Range,
    Max,
    Min
}

impl Column {
    pub const WHEEL_DIAMETER: &'static str = "Wheel Diameter (mm)";
    pub const HUB_RATIO: &'static str = "Hub Ratio (%)";
    pub const GEAR_INCHES: &'static str = "Gear Inches";
    pub const METRE_DEVELOPMENT: &'static str = "Metre Development";
    pub const GAIN_RATIO: &'static str = "Gain Ratio";
    pub const REAR_TEETH: &'static str = "Rear Teeth";
    pub const FRONT_TEETH: &'static str = "front_teeth";
    pub const REAR_TEETH_COMBINATION: &'static str = "rear_teeths";
    pub const OVERLAP: &'static str = "overlap";
    pub const RANGE: &'static str = "range";
    pub const MAX: &'static str = "max";
    pub const MIN: &'static str = "min";

    /// Columns of a computed gearing row, in display order
    pub const GEAR_ROW_COLUMNS: [Column; 7] = [
        Column::FrontTeeth,
        Column::RearTeeth,
        Column::HubRatio,
        Column::WheelDiameter,
        Column::GearInches,
        Column::MetreDevelopment,
        Column::GainRatio
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::WheelDiameter => Column::WHEEL_DIAMETER,
            Column::HubRatio => Column::HUB_RATIO,
            Column::GearInches => Column::GEAR_INCHES,
            Column::MetreDevelopment => Column::METRE_DEVELOPMENT,
            Column::GainRatio => Column::GAIN_RATIO,
            Column::RearTeeth => Column::REAR_TEETH,
            Column::FrontTeeth => Column::FRONT_TEETH,
            Column::RearTeethCombination => Column::REAR_TEETH_COMBINATION,
            Column::Overlap => Column::OVERLAP,
            Column::Range => Column::RANGE,
            Column::Max => Column::MAX,
            Column::Min => Column::MIN
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single row of the gearing table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GearRow {
    front_teeth: u32,
    #[serde(flatten)]
    metrics: ComputedMetrics
}

impl GearRow {
    pub fn new(front_teeth: u32, metrics: ComputedMetrics) -> GearRow {
        GearRow { front_teeth, metrics }
    }

    pub fn front_teeth(&self) -> u32 {
        self.front_teeth
    }

    pub fn rear_teeth(&self) -> u32 {
        self.metrics.rear_teeth()
    }

    pub fn metrics(&self) -> &ComputedMetrics {
        &self.metrics
    }

    /// Same row with its metrics rescaled by `hub_ratio`
    pub fn rescaled(&self, hub_ratio: f64) -> GearRow {
        GearRow { front_teeth: self.front_teeth, metrics: self.metrics.rescaled(hub_ratio) }
    }

    /// Numeric value held in `column`. Columns that only exist on scored
    /// configurations give `None`.
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::WheelDiameter => Some(self.metrics.wheel_diameter_mm()),
            Column::HubRatio => Some(self.metrics.hub_ratio_percent()),
            Column::GearInches => Some(self.metrics.gear_inches()),
            Column::MetreDevelopment => Some(self.metrics.metre_development()),
            Column::GainRatio => Some(self.metrics.gain_ratio()),
            Column::RearTeeth => Some(self.metrics.rear_teeth() as f64),
            Column::FrontTeeth => Some(self.front_teeth as f64),
            _ => None
        }
    }
}

/// Ratio of the largest to the smallest value of `column` across `rows`
pub fn column_range<'a, I>(rows: I, column: Column) -> Option<f64>
    where I: IntoIterator<Item=&'a GearRow>
{
    let values = rows.into_iter().filter_map(|row| row.value(column));
    match values.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(_) => Some(1.0),
        MinMaxResult::MinMax(min, max) => Some(max / min)
    }
}
