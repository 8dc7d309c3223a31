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

use std::fmt::Write;
use itertools::Itertools;
use serde::Serialize;
use gearing::{CassetteCombination, Column, GearRow, ScoredConfiguration};

pub fn drivetrain_table(rows: &[GearRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let metrics = row.metrics();
        let _ = writeln!(out, "Rear: {}T | Hub: {:.0}% | Gear Inches: {:.2} | Metre Dev: {:.2} m | Gain Ratio: {:.2}",
                         metrics.rear_teeth(),
                         metrics.hub_ratio_percent(),
                         metrics.gear_inches(),
                         metrics.metre_development(),
                         metrics.gain_ratio());
    }
    out
}

pub fn gear_range_line(range: Option<f64>) -> String {
    match range {
        Some(range) => format!("Gear range {:.02}%", range * 100.0),
        None => String::from("Gear range unavailable")
    }
}

pub fn ranked_table(ranked: &[ScoredConfiguration<CassetteCombination>]) -> String {
    let header = [Column::FrontTeeth, Column::RearTeethCombination, Column::Overlap,
                  Column::Range, Column::Max, Column::Min];
    let mut out = format!("{:>11} | {:<20} | {:>8} | {:>6} | {:>6} | {:>6}\n",
                          header[0].as_str(), header[1].as_str(), header[2].as_str(),
                          header[3].as_str(), header[4].as_str(), header[5].as_str());
    for scored in ranked {
        let combination = scored.key();
        let _ = writeln!(out, "{:>11} | {:<20} | {:>8.3} | {:>6.3} | {:>6.3} | {:>6.3}{}",
                         combination.front_teeth(),
                         combination.cogs().teeth().iter().join(", "),
                         scored.total_overlap(),
                         scored.range(),
                         scored.max(),
                         scored.min(),
                         if scored.has_gap() { "  gap" } else { "" });
    }
    out
}

pub fn to_json<T: Serialize + ?Sized>(data: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}

#[cfg(test)]
mod tests {
    use gearing::{batch_gear_calculations, CassetteAnalysis, CassetteCombinationGenerator, RankingFilterBuilder, WheelSpec};
    use crate::report::{drivetrain_table, gear_range_line, ranked_table, to_json};

    #[test]
    fn drivetrain_lines() {
        let wheel = WheelSpec::new(349.0, 35.0).unwrap();
        let rows = batch_gear_calculations(wheel, 50, &[11], &[100], 170.0).unwrap();
        assert_eq!(drivetrain_table(&rows),
                   "Rear: 11T | Hub: 100% | Gear Inches: 75.47 | Metre Dev: 6.02 m | Gain Ratio: 5.64\n");
        assert_eq!(gear_range_line(Some(4.4188)), "Gear range 441.88%");
        assert_eq!(gear_range_line(None), "Gear range unavailable");
    }

    #[test]
    fn ranked_output() {
        let wheel = WheelSpec::new(349.0, 35.0).unwrap();
        let analysis = CassetteAnalysis::new(wheel, 170.0, CassetteCombinationGenerator::new(11, 15, 3),
                                             vec![50], vec![64, 100, 157]).unwrap();
        let ranked = analysis.run(&RankingFilterBuilder::new(0.0).limit(2).build());
        let table = ranked_table(&ranked);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("front_teeth"));
        assert!(lines[0].contains("rear_teeths"));

        let json: serde_json::Value = serde_json::from_str(&to_json(&ranked).unwrap()).unwrap();
        let first = &json.as_array().unwrap()[0];
        assert_eq!(first["front_teeth"], 50);
        assert_eq!(first["rear_teeths"].as_array().unwrap().len(), 4);
        for key in ["overlap", "range", "max", "min"] {
            assert!(first[key].is_f64(), "missing {}", key);
        }
    }
}
