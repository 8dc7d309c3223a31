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

use std::fmt;
use std::fs;
use std::path::Path;
use config::{Config, ConfigBuilder, ConfigError, Map};
use config::builder::DefaultState;
use serde::{Deserialize, Deserializer, Serialize};
use serde::de::{self, SeqAccess, Visitor};
use tracing::{error, info, warn};
use gearing::{CassetteAnalysis, CassetteCombinationGenerator, RankingFilter, RankingFilterBuilder, WheelSpec};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalysisSettings {
    bead_seat_diameter_mm: f64,
    tire_width_mm: f64,
    crank_length_mm: f64,
    front_teeth: u32,
    #[serde(deserialize_with = "one_or_many")]
    rear_teeth: Vec<u32>,
    #[serde(deserialize_with = "one_or_many")]
    hub_ratio_percentages: Vec<u32>,
    cog_min: u32,
    cog_max: u32,
    max_jump: u32,
    #[serde(deserialize_with = "one_or_many")]
    chainrings: Vec<u32>,
    min_range: f64,
    gaps_only: bool,
    limit: usize,
    output_format: OutputFormat
}

impl AnalysisSettings {
    const BEAD_SEAT_DIAMETER_MM: &'static str = "bead_seat_diameter_mm";
    const TIRE_WIDTH_MM: &'static str = "tire_width_mm";
    const CRANK_LENGTH_MM: &'static str = "crank_length_mm";
    const FRONT_TEETH: &'static str = "front_teeth";
    const REAR_TEETH: &'static str = "rear_teeth";
    const HUB_RATIO_PERCENTAGES: &'static str = "hub_ratio_percentages";
    const COG_MIN: &'static str = "cog_min";
    const COG_MAX: &'static str = "cog_max";
    const MAX_JUMP: &'static str = "max_jump";
    const CHAINRINGS: &'static str = "chainrings";
    const MIN_RANGE: &'static str = "min_range";
    const GAPS_ONLY: &'static str = "gaps_only";
    const LIMIT: &'static str = "limit";
    const OUTPUT_FORMAT: &'static str = "output_format";
    const CONFIG_FILENAME: &'static str = "gearcalc-conf";
    const ENV_PREFIX: &'static str = "GEARCALC";

    pub fn load() -> Result<Self, ConfigError> {
        let settings = AnalysisSettings::build_from(AnalysisSettings::CONFIG_FILENAME, None)
            .map_err(|e| {
                warn!("Failed to load settings. {}", e.to_string());
                e
            })?;
        if !Path::new(&AnalysisSettings::config_file_path()).is_file() {
            info!("No {} found. Writing defaults", AnalysisSettings::config_file_path());
            let defaults: AnalysisSettings = AnalysisSettings::with_defaults()?.build()?.try_deserialize()?;
            defaults.write().unwrap_or_else(|e| { error!("Failed to write settings. {}", e.to_string())});
        }
        Ok(settings)
    }

    /// Layer defaults, the optional settings file `config_name` and the environment.
    /// `env_source` replaces the process environment when set.
    fn build_from(config_name: &str, env_source: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        AnalysisSettings::with_defaults()?
            .add_source(config::File::with_name(config_name).required(false))
            .add_source(config::Environment::with_prefix(AnalysisSettings::ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key(AnalysisSettings::REAR_TEETH)
                .with_list_parse_key(AnalysisSettings::HUB_RATIO_PERCENTAGES)
                .with_list_parse_key(AnalysisSettings::CHAINRINGS)
                .source(env_source))
            .build()?
            .try_deserialize()
    }

    fn config_file_path() -> String {
        format!("{}.toml", AnalysisSettings::CONFIG_FILENAME)
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default(AnalysisSettings::BEAD_SEAT_DIAMETER_MM, 349.0)?
            .set_default(AnalysisSettings::TIRE_WIDTH_MM, 35.0)?
            .set_default(AnalysisSettings::CRANK_LENGTH_MM, 170.0)?
            .set_default(AnalysisSettings::FRONT_TEETH, 50i64)?
            .set_default(AnalysisSettings::REAR_TEETH, vec![11i64, 13, 15, 18])?
            .set_default(AnalysisSettings::HUB_RATIO_PERCENTAGES, vec![64i64, 100, 157])?
            .set_default(AnalysisSettings::COG_MIN, 11i64)?
            .set_default(AnalysisSettings::COG_MAX, 24i64)?
            .set_default(AnalysisSettings::MAX_JUMP, 5i64)?
            .set_default(AnalysisSettings::CHAINRINGS, vec![44i64, 46, 48, 50, 52, 54])?
            .set_default(AnalysisSettings::MIN_RANGE, 3.6)?
            .set_default(AnalysisSettings::GAPS_ONLY, false)?
            .set_default(AnalysisSettings::LIMIT, 50i64)?
            .set_default(AnalysisSettings::OUTPUT_FORMAT, "text")
    }

    pub fn wheel(&self) -> gearing::Result<WheelSpec> {
        WheelSpec::new(self.bead_seat_diameter_mm, self.tire_width_mm)
    }

    pub fn crank_length_mm(&self) -> f64 {
        self.crank_length_mm
    }

    pub fn front_teeth(&self) -> u32 {
        self.front_teeth
    }

    pub fn rear_teeth(&self) -> &[u32] {
        &self.rear_teeth
    }

    pub fn hub_ratio_percentages(&self) -> &[u32] {
        &self.hub_ratio_percentages
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn cassette_analysis(&self) -> gearing::Result<CassetteAnalysis> {
        CassetteAnalysis::new(self.wheel()?,
                              self.crank_length_mm,
                              CassetteCombinationGenerator::new(self.cog_min, self.cog_max, self.max_jump),
                              self.chainrings.clone(),
                              self.hub_ratio_percentages.clone())
    }

    pub fn ranking_filter(&self) -> RankingFilter {
        let mut builder = RankingFilterBuilder::new(self.min_range);
        if self.gaps_only {
            builder = builder.gaps_only();
        }
        if self.limit > 0 {
            builder = builder.limit(self.limit);
        }
        builder.build()
    }

    pub fn write(&self) -> std::io::Result<()> {
        fs::write(AnalysisSettings::config_file_path(), toml::to_string(&self).map_err(|_e|{
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to encode settings to toml")
        })?)
    }
}

// Tooth count lists arrive from the environment as a bare number when only one
// value is given, and as a list of strings when split on the separator
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
    where D: Deserializer<'de>
{
    deserializer.deserialize_any(CountsVisitor)
}

struct Count(u32);

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de>
    {
        deserializer.deserialize_any(CountsVisitor).and_then(|counts| match counts.as_slice() {
            [count] => Ok(Count(*count)),
            _ => Err(de::Error::custom("expected a single count"))
        })
    }
}

struct CountsVisitor;

impl<'de> Visitor<'de> for CountsVisitor {
    type Value = Vec<u32>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative integer or a list of them")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        u32::try_from(v).map(|c| vec![c]).map_err(|_| E::custom(format!("{} is out of range", v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u32::try_from(v).map(|c| vec![c]).map_err(|_| E::custom(format!("{} is out of range", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.trim().parse::<u32>().map(|c| vec![c]).map_err(|e| E::custom(format!("'{}'. {}", v, e)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut counts = Vec::new();
        while let Some(Count(count)) = seq.next_element()? {
            counts.push(count);
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use config::Map;
    use crate::settings::{AnalysisSettings, OutputFormat};

    fn defaults() -> AnalysisSettings {
        AnalysisSettings::with_defaults().unwrap().build().unwrap().try_deserialize().unwrap()
    }

    #[test]
    fn default_settings() {
        let settings = defaults();
        assert_eq!(settings.front_teeth(), 50);
        assert_eq!(settings.rear_teeth(), &[11, 13, 15, 18]);
        assert_eq!(settings.hub_ratio_percentages(), &[64, 100, 157]);
        assert_eq!(settings.output_format(), OutputFormat::Text);
        assert_eq!(settings.wheel().unwrap().wheel_diameter_mm(), 349.0 + 70.0 + 2.7);

        let filter = settings.ranking_filter();
        assert_eq!(filter.min_range(), 3.6);
        assert!(settings.cassette_analysis().is_ok());
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let settings = defaults();
        let encoded = toml::to_string(&settings).unwrap();
        assert!(encoded.contains("output_format = \"text\""));
        let decoded: AnalysisSettings = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, settings);
    }

    #[test]
    fn invalid_geometry_surfaces() {
        let mut settings = defaults();
        settings.tire_width_mm = 0.0;
        assert!(settings.wheel().is_err());
        assert!(settings.cassette_analysis().is_err());
    }

    fn from_env(vars: &[(&str, &str)]) -> AnalysisSettings {
        let env: Map<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AnalysisSettings::build_from("gearcalc-conf-missing", Some(env)).unwrap()
    }

    #[test]
    fn environment_overrides_apply_without_settings_file() {
        let settings = from_env(&[
            ("GEARCALC_MIN_RANGE", "9.9"),
            ("GEARCALC_OUTPUT_FORMAT", "json"),
            ("GEARCALC_CHAINRINGS", "44,46"),
        ]);
        assert_eq!(settings.min_range, 9.9);
        assert_eq!(settings.output_format(), OutputFormat::Json);
        assert_eq!(settings.chainrings, vec![44, 46]);
        assert_eq!(settings.front_teeth(), 50);
    }

    #[test]
    fn missing_settings_file_gives_defaults() {
        assert_eq!(from_env(&[]), defaults());
    }

    #[test]
    fn single_value_lists_from_environment() {
        let settings = from_env(&[
            ("GEARCALC_CHAINRINGS", "50"),
            ("GEARCALC_REAR_TEETH", "16"),
            ("GEARCALC_HUB_RATIO_PERCENTAGES", "100"),
        ]);
        assert_eq!(settings.chainrings, vec![50]);
        assert_eq!(settings.rear_teeth(), &[16]);
        assert_eq!(settings.hub_ratio_percentages(), &[100]);
    }

    #[test]
    fn bad_tooth_count_from_environment_is_an_error() {
        let env: Map<String, String> = [("GEARCALC_CHAINRINGS".to_string(), "44,x".to_string())]
            .into_iter()
            .collect();
        assert!(AnalysisSettings::build_from("gearcalc-conf-missing", Some(env)).is_err());
    }
}
