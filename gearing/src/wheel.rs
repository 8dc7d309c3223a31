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

use crate::error::{check_positive, Result};

/// Allowance in mm for the tyre walls on top of the bead seat and tyre height
pub const TYRE_WALL_ALLOWANCE_MM: f64 = 2.7;

/// Wheel geometry described by its ETRTO bead seat diameter and tyre width.
/// The tyre height is assumed to be roughly equal to its width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelSpec {
    bead_seat_diameter_mm: f64,
    tire_width_mm: f64
}

impl WheelSpec {
    pub fn new(bead_seat_diameter_mm: f64, tire_width_mm: f64) -> Result<WheelSpec> {
        Ok(WheelSpec {
            bead_seat_diameter_mm: check_positive("bead_seat_diameter_mm", bead_seat_diameter_mm)?,
            tire_width_mm: check_positive("tire_width_mm", tire_width_mm)?
        })
    }

    pub fn bead_seat_diameter_mm(&self) -> f64 {
        self.bead_seat_diameter_mm
    }

    pub fn tire_width_mm(&self) -> f64 {
        self.tire_width_mm
    }

    pub fn wheel_diameter_mm(&self) -> f64 {
        self.bead_seat_diameter_mm + 2.0 * self.tire_width_mm + TYRE_WALL_ALLOWANCE_MM
    }
}
