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

use std::result;
use thiserror::Error;

pub type Result<T> = result::Result<T, GearingError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GearingError {
    #[error("invalid geometry. `{field}` must be positive, got `{value}`")]
    InvalidGeometry {
        field: &'static str,
        value: f64
    },
    #[error("invalid hub ratio `{0}`. Hub ratios must be positive")]
    InvalidHubRatio(f64)
}

impl GearingError {
    pub(crate) fn invalid_geometry(field: &'static str, value: impl Into<f64>) -> GearingError {
        GearingError::InvalidGeometry { field, value: value.into() }
    }
}

/// Ensure a geometric input is strictly positive and finite
pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<f64> {
    if utils::numeric::is_positive_finite(value) {
        Ok(value)
    } else {
        Err(GearingError::invalid_geometry(field, value))
    }
}

pub(crate) fn check_teeth(field: &'static str, teeth: u32) -> Result<u32> {
    if teeth == 0 {
        return Err(GearingError::invalid_geometry(field, teeth));
    }
    Ok(teeth)
}
