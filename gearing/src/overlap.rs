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

use std::cmp::Ordering;
use std::collections::BTreeMap;
use serde::Serialize;
use tracing::debug;
use crate::table::GearRow;

/// Hub ratio percentage of a row used as an ordered grouping key
#[derive(Debug, Clone, Copy)]
struct HubStep(f64);

impl Eq for HubStep {}

impl PartialEq<Self> for HubStep {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd<Self> for HubStep {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HubStep {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Spread of metre development reachable at one hub state, and how it lines
/// up with the hub state below it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HubStepSummary {
    hub_ratio_percent: f64,
    min: f64,
    max: f64,
    prev_max: Option<f64>,
    overlap: Option<f64>
}

impl HubStepSummary {
    pub fn hub_ratio_percent(&self) -> f64 {
        self.hub_ratio_percent
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Fastest development of the next lower hub state. `None` for the lowest state.
    pub fn prev_max(&self) -> Option<f64> {
        self.prev_max
    }

    /// Positive when this step redundantly covers speeds the lower step
    /// already reaches, negative when there is a gap between them.
    /// `None` for the lowest hub state, which has nothing to overlap with.
    pub fn overlap(&self) -> Option<f64> {
        self.overlap
    }

    pub fn is_gap(&self) -> bool {
        matches!(self.overlap, Some(o) if o < 0.0)
    }
}

/// Overlap and range score of one configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredConfiguration<K> {
    #[serde(flatten)]
    key: K,
    #[serde(rename = "overlap")]
    total_overlap: f64,
    range: f64,
    max: f64,
    min: f64,
    #[serde(skip)]
    steps: Vec<HubStepSummary>
}

impl<K> ScoredConfiguration<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Sum of the overlaps of every hub step that has a lower neighbour
    pub fn total_overlap(&self) -> f64 {
        self.total_overlap
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    /// Hub steps ordered by ascending hub ratio
    pub fn steps(&self) -> &[HubStepSummary] {
        &self.steps
    }

    pub fn has_gap(&self) -> bool {
        self.steps.iter().any(HubStepSummary::is_gap)
    }
}

/// Measures how much neighbouring hub states of a configuration overlap.
///
/// Rows are grouped by hub ratio; within each group the slowest and fastest
/// metre development across all cogs is taken. Each group is then compared
/// with the group at the next lower hub ratio: `overlap = prev_max - min`.
pub struct OverlapAnalyzer;

impl OverlapAnalyzer {
    /// Score every configuration in a table. `K` identifies the configuration
    /// a row belongs to. Results are ordered by key.
    pub fn analyze<K, I>(rows: I) -> Vec<ScoredConfiguration<K>>
        where K: Ord,
              I: IntoIterator<Item=(K, GearRow)>
    {
        let mut grouped: BTreeMap<K, Vec<GearRow>> = BTreeMap::new();
        for (key, row) in rows {
            grouped.entry(key).or_default().push(row);
        }
        grouped.into_iter()
            .filter_map(|(key, rows)| OverlapAnalyzer::score(key, rows))
            .collect()
    }

    /// Score the rows of a single configuration. `None` if there are no rows.
    pub fn score<K, I>(key: K, rows: I) -> Option<ScoredConfiguration<K>>
        where I: IntoIterator<Item=GearRow>
    {
        OverlapAnalyzer::score_points(key, rows.into_iter().map(|row| {
            (row.metrics().hub_ratio_percent(), row.metrics().metre_development())
        }))
    }

    /// Score a configuration from `(hub ratio %, metre development)` points
    pub fn score_points<K, I>(key: K, points: I) -> Option<ScoredConfiguration<K>>
        where I: IntoIterator<Item=(f64, f64)>
    {
        let steps = OverlapAnalyzer::summarise_points(points);
        if steps.is_empty() {
            return None;
        }
        let total_overlap = steps.iter().filter_map(|s| s.overlap).fold(0.0, |total, overlap| total + overlap);
        let max = steps.iter().map(|s| s.max).fold(f64::MIN, f64::max);
        let min = steps.iter().map(|s| s.min).fold(f64::MAX, f64::min);
        debug!("Scored {} hub steps. overlap {}, range {}", steps.len(), total_overlap, max / min);
        Some(ScoredConfiguration {
            key,
            total_overlap,
            range: max / min,
            max,
            min,
            steps
        })
    }

    /// Per hub state min/max metre development, ordered by hub ratio
    pub fn summarise_steps<I>(rows: I) -> Vec<HubStepSummary>
        where I: IntoIterator<Item=GearRow>
    {
        OverlapAnalyzer::summarise_points(rows.into_iter().map(|row| {
            (row.metrics().hub_ratio_percent(), row.metrics().metre_development())
        }))
    }

    fn summarise_points<I>(points: I) -> Vec<HubStepSummary>
        where I: IntoIterator<Item=(f64, f64)>
    {
        let mut spreads: BTreeMap<HubStep, (f64, f64)> = BTreeMap::new();
        for (hub_ratio_percent, development) in points {
            spreads.entry(HubStep(hub_ratio_percent))
                .and_modify(|(min, max)| {
                    *min = min.min(development);
                    *max = max.max(development);
                })
                .or_insert((development, development));
        }

        let mut prev_max = None;
        spreads.into_iter().map(|(step, (min, max))| {
            let summary = HubStepSummary {
                hub_ratio_percent: step.0,
                min,
                max,
                prev_max,
                overlap: prev_max.map(|prev| prev - min)
            };
            prev_max = Some(max);
            summary
        }).collect()
    }
}
