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

mod report;
mod settings;

use std::env;
use serde::Serialize;
use tracing_subscriber;
use tracing_appender;
use tracing::{error, info};

use gearing::{batch_gear_calculations, column_range, Column, GearRow, ScoredConfiguration, CassetteCombination};
use crate::settings::{AnalysisSettings, OutputFormat};


#[derive(Serialize)]
struct JsonReport<'a> {
    drivetrain: &'a [GearRow],
    gear_range: Option<f64>,
    cassettes: &'a [ScoredConfiguration<CassetteCombination>]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match env::current_dir() {
        Ok(current_dir) => {
            let file_appender = tracing_appender::rolling::never(current_dir, "gearcalc.log");
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_appender)
                .with_ansi(false)
                .compact()
                .finish();
            match tracing::subscriber::set_global_default(subscriber) {
                Ok(_) => {
                    info!("Logging initialised");
                }
                Err(e) => {
                    eprintln!("Failed to init logging. {}", e.to_string());
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to init logging. Couldn't determine current dir {}", e.to_string());
        }
    }

    let settings = AnalysisSettings::load().map_err(|e| {
        error!("Couldn't load settings. {}", e.to_string());
        e
    })?;
    info!("Loaded settings {:?}", settings);

    let wheel = settings.wheel()?;
    info!("Wheel {}mm bead seat, {}mm tyre, {}mm diameter",
          wheel.bead_seat_diameter_mm(), wheel.tire_width_mm(), wheel.wheel_diameter_mm());
    let drivetrain = batch_gear_calculations(wheel,
                                             settings.front_teeth(),
                                             settings.rear_teeth(),
                                             settings.hub_ratio_percentages(),
                                             settings.crank_length_mm())?;
    let gear_range = column_range(&drivetrain, Column::GainRatio);

    info!("Searching cassette combinations");
    let analysis = settings.cassette_analysis()?;
    let ranked = analysis.run(&settings.ranking_filter());

    match settings.output_format() {
        OutputFormat::Text => {
            print!("{}", report::drivetrain_table(&drivetrain));
            println!("{}", report::gear_range_line(gear_range));
            println!();
            print!("{}", report::ranked_table(&ranked));
        }
        OutputFormat::Json => {
            let json = report::to_json(&JsonReport {
                drivetrain: &drivetrain,
                gear_range,
                cassettes: &ranked
            })?;
            println!("{}", json);
        }
    }
    Ok(())
}
