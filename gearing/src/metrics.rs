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
use utils::units::{circumference_m, mm_to_inches, ratio_to_percent};
use crate::error::{check_positive, check_teeth, GearingError, Result};
use crate::wheel::WheelSpec;

/// Hub ratio of a drivetrain without an internal gear hub
pub const DIRECT_DRIVE: f64 = 1.0;

/// One concrete gearing state of a bicycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivetrainInput {
    wheel: WheelSpec,
    crank_length_mm: f64,
    front_teeth: u32,
    rear_teeth: u32,
    hub_ratio: f64
}

impl DrivetrainInput {
    pub fn new(wheel: WheelSpec,
               crank_length_mm: f64,
               front_teeth: u32,
               rear_teeth: u32) -> Result<DrivetrainInput>
    {
        Ok(DrivetrainInput {
            wheel,
            crank_length_mm: check_positive("crank_length_mm", crank_length_mm)?,
            front_teeth: check_teeth("front_teeth", front_teeth)?,
            rear_teeth: check_teeth("rear_teeth", rear_teeth)?,
            hub_ratio: DIRECT_DRIVE
        })
    }

    pub fn with_hub_ratio(mut self, hub_ratio: f64) -> Result<DrivetrainInput> {
        if !utils::numeric::is_positive_finite(hub_ratio) {
            return Err(GearingError::InvalidHubRatio(hub_ratio));
        }
        self.hub_ratio = hub_ratio;
        Ok(self)
    }

    pub fn wheel(&self) -> &WheelSpec {
        &self.wheel
    }

    pub fn crank_length_mm(&self) -> f64 {
        self.crank_length_mm
    }

    pub fn front_teeth(&self) -> u32 {
        self.front_teeth
    }

    pub fn rear_teeth(&self) -> u32 {
        self.rear_teeth
    }

    pub fn hub_ratio(&self) -> f64 {
        self.hub_ratio
    }

    pub fn compute(&self) -> ComputedMetrics {
        compute(&self.wheel, self.front_teeth, self.rear_teeth, self.crank_length_mm, self.hub_ratio)
    }
}

/// Metrics derived from a [DrivetrainInput]. Everything apart from the wheel diameter
/// (and the rear teeth carried along for grouping) is linear in the hub ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComputedMetrics {
    #[serde(rename = "Wheel Diameter (mm)")]
    wheel_diameter_mm: f64,
    #[serde(rename = "Hub Ratio (%)")]
    hub_ratio_percent: f64,
    #[serde(rename = "Gear Inches")]
    gear_inches: f64,
    #[serde(rename = "Metre Development")]
    metre_development: f64,
    #[serde(rename = "Gain Ratio")]
    gain_ratio: f64,
    #[serde(rename = "Rear Teeth")]
    rear_teeth: u32
}

impl ComputedMetrics {
    pub fn wheel_diameter_mm(&self) -> f64 {
        self.wheel_diameter_mm
    }

    pub fn hub_ratio_percent(&self) -> f64 {
        self.hub_ratio_percent
    }

    pub fn gear_inches(&self) -> f64 {
        self.gear_inches
    }

    pub fn metre_development(&self) -> f64 {
        self.metre_development
    }

    pub fn gain_ratio(&self) -> f64 {
        self.gain_ratio
    }

    pub fn rear_teeth(&self) -> u32 {
        self.rear_teeth
    }

    /// Scale the hub ratio sensitive metrics by `hub_ratio`.
    ///
    /// Applied to metrics computed with a direct drive hub this gives the same
    /// result (within rounding) as computing them with `hub_ratio` from the start.
    /// The wheel diameter and rear teeth are left untouched.
    pub fn rescaled(&self, hub_ratio: f64) -> ComputedMetrics {
        ComputedMetrics {
            wheel_diameter_mm: self.wheel_diameter_mm,
            hub_ratio_percent: self.hub_ratio_percent * hub_ratio,
            gear_inches: self.gear_inches * hub_ratio,
            metre_development: self.metre_development * hub_ratio,
            gain_ratio: self.gain_ratio * hub_ratio,
            rear_teeth: self.rear_teeth
        }
    }
}

/// Evaluate the gearing formulas for a single configuration.
///
/// No validation is done here. Callers must make sure `rear_teeth` and
/// `crank_length_mm` are non-zero; [DrivetrainInput::new] does that.
pub fn compute(wheel: &WheelSpec,
               front_teeth: u32,
               rear_teeth: u32,
               crank_length_mm: f64,
               hub_ratio: f64) -> ComputedMetrics
{
    let wheel_diameter_mm = wheel.wheel_diameter_mm();
    let wheel_diameter_in = mm_to_inches(wheel_diameter_mm);
    let wheel_circumference_m = circumference_m(wheel_diameter_mm);

    let gear_ratio = (front_teeth as f64 / rear_teeth as f64) * hub_ratio;
    ComputedMetrics {
        wheel_diameter_mm,
        hub_ratio_percent: ratio_to_percent(hub_ratio),
        gear_inches: gear_ratio * wheel_diameter_in,
        metre_development: gear_ratio * wheel_circumference_m,
        gain_ratio: (wheel_diameter_mm * gear_ratio) / (2.0 * crank_length_mm),
        rear_teeth
    }
}

#[cfg(test)]
mod tests {
    use utils::numeric::{approx_eq, round_float_to};
    use crate::error::GearingError;
    use crate::metrics::{compute, DrivetrainInput};
    use crate::wheel::WheelSpec;

    fn brompton_wheel() -> WheelSpec {
        WheelSpec::new(349.0, 35.0).unwrap()
    }

    #[test]
    fn reference_drivetrain() {
        let input = DrivetrainInput::new(brompton_wheel(), 170.0, 50, 11).unwrap();
        let metrics = input.compute();
        assert!(approx_eq(metrics.wheel_diameter_mm(), 421.7, 1e-12));
        assert_eq!(metrics.hub_ratio_percent(), 100.0);
        assert_eq!(round_float_to(metrics.gear_inches(), 2), 75.47);
        assert_eq!(round_float_to(metrics.metre_development(), 3), 6.022);
        assert_eq!(round_float_to(metrics.gain_ratio(), 3), 5.638);
        assert_eq!(metrics.rear_teeth(), 11);
    }

    #[test]
    fn formulas_match_reference_arithmetic() {
        let wheel = brompton_wheel();
        let metrics = compute(&wheel, 44, 17, 165.0, 1.57);
        let diameter = 349.0 + 2.0 * 35.0 + 2.7;
        let ratio = (44.0 / 17.0) * 1.57;
        assert_eq!(metrics.gear_inches(), ratio * (diameter / 25.4));
        assert_eq!(metrics.metre_development(), ratio * (std::f64::consts::PI * diameter * 0.001));
        assert_eq!(metrics.gain_ratio(), (diameter * ratio) / (2.0 * 165.0));
    }

    #[test]
    fn metrics_are_linear_in_hub_ratio() {
        let wheel = brompton_wheel();
        for (front, rear, crank) in [(50, 11, 170.0), (44, 24, 165.0), (54, 13, 175.0)] {
            let base = compute(&wheel, front, rear, crank, 0.64);
            let doubled = compute(&wheel, front, rear, crank, 1.28);
            assert!(base.gear_inches() > 0.0);
            assert!(base.metre_development() > 0.0);
            assert!(base.gain_ratio() > 0.0);
            assert!(approx_eq(doubled.gear_inches(), 2.0 * base.gear_inches(), 1e-12));
            assert!(approx_eq(doubled.metre_development(), 2.0 * base.metre_development(), 1e-12));
            assert!(approx_eq(doubled.gain_ratio(), 2.0 * base.gain_ratio(), 1e-12));
        }
    }

    #[test]
    fn wheel_diameter_is_independent_of_drivetrain() {
        let wheel = brompton_wheel();
        let reference = compute(&wheel, 50, 11, 170.0, 1.0).wheel_diameter_mm();
        assert_eq!(compute(&wheel, 50, 11, 170.0, 1.57).wheel_diameter_mm(), reference);
        assert_eq!(compute(&wheel, 36, 11, 170.0, 1.0).wheel_diameter_mm(), reference);
        assert_eq!(compute(&wheel, 50, 28, 170.0, 1.0).wheel_diameter_mm(), reference);
        assert_eq!(compute(&wheel, 50, 11, 152.5, 1.0).wheel_diameter_mm(), reference);
    }

    #[test]
    fn rescale_matches_recompute() {
        let wheel = brompton_wheel();
        let base = compute(&wheel, 50, 15, 170.0, 1.0);
        for hub_ratio in [0.64, 1.0, 1.57] {
            let scaled = base.rescaled(hub_ratio);
            let direct = compute(&wheel, 50, 15, 170.0, hub_ratio);
            assert_eq!(scaled.wheel_diameter_mm(), direct.wheel_diameter_mm());
            assert_eq!(scaled.rear_teeth(), direct.rear_teeth());
            assert!(approx_eq(scaled.hub_ratio_percent(), direct.hub_ratio_percent(), 1e-9));
            assert!(approx_eq(scaled.gear_inches(), direct.gear_inches(), 1e-9));
            assert!(approx_eq(scaled.metre_development(), direct.metre_development(), 1e-9));
            assert!(approx_eq(scaled.gain_ratio(), direct.gain_ratio(), 1e-9));
        }
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let wheel = brompton_wheel();
        assert_eq!(DrivetrainInput::new(wheel, 0.0, 50, 11).unwrap_err(),
                   GearingError::InvalidGeometry { field: "crank_length_mm", value: 0.0 });
        assert_eq!(DrivetrainInput::new(wheel, 170.0, 0, 11).unwrap_err(),
                   GearingError::InvalidGeometry { field: "front_teeth", value: 0.0 });
        assert_eq!(DrivetrainInput::new(wheel, 170.0, 50, 0).unwrap_err(),
                   GearingError::InvalidGeometry { field: "rear_teeth", value: 0.0 });
        let input = DrivetrainInput::new(wheel, 170.0, 50, 11).unwrap();
        assert_eq!(input.hub_ratio(), 1.0);
        assert_eq!(input.with_hub_ratio(0.0).unwrap_err(), GearingError::InvalidHubRatio(0.0));
        assert_eq!(input.with_hub_ratio(1.57).unwrap().hub_ratio(), 1.57);
    }
}
