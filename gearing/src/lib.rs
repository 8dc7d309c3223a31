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

//! Bicycle gearing metrics and a search for cassette, chainring and internal
//! gear hub combinations that cover a wide range without overlapping hub states.

pub mod error;
pub mod wheel;
pub mod metrics;
pub mod cassette;
pub mod table;
pub mod hub;
pub mod overlap;
pub mod ranking;
pub mod batch;
pub mod analysis;

pub use error::{GearingError, Result};
pub use wheel::WheelSpec;
pub use metrics::{compute, ComputedMetrics, DrivetrainInput};
pub use cassette::{chainring_cross_product, CassetteCombination, CassetteCombinationGenerator, CogSet};
pub use table::{column_range, Column, GearRow};
pub use hub::HubRatioExpander;
pub use overlap::{HubStepSummary, OverlapAnalyzer, ScoredConfiguration};
pub use ranking::{rank, RankingFilter, RankingFilterBuilder};
pub use batch::{analyze_drivetrain, batch_gear_calculations, drivetrain_rows, DrivetrainKey};
pub use analysis::CassetteAnalysis;
