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

pub const MM_PER_INCH: f64 = 25.4;
pub const MM_TO_M: f64 = 0.001;

pub fn mm_to_inches(length_mm: f64) -> f64 {
    length_mm / MM_PER_INCH
}

/// Circumference in metres of a circle with the given diameter in millimetres
pub fn circumference_m(diameter_mm: f64) -> f64 {
    std::f64::consts::PI * diameter_mm * MM_TO_M
}

pub fn ratio_to_percent(ratio: f64) -> f64 {
    ratio * 100.0
}

pub fn percent_to_ratio(percent: f64) -> f64 {
    percent / 100.0
}
