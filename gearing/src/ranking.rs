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

use tracing::info;
use crate::overlap::ScoredConfiguration;

/// Selects and orders scored configurations.
///
/// Configurations with a range below `min_range` are dropped and the rest are
/// sorted by total overlap, largest first. Ties keep their incoming order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingFilter {
    min_range: f64,
    gaps_only: bool,
    limit: Option<usize>
}

impl RankingFilter {
    pub fn new(min_range: f64, gaps_only: bool, limit: Option<usize>) -> Self {
        Self {
            min_range,
            gaps_only,
            limit
        }
    }

    pub fn min_range(&self) -> f64 {
        self.min_range
    }

    pub fn set_min_range(&mut self, min_range: f64) {
        self.min_range = min_range;
    }

    pub fn set_gaps_only(&mut self, gaps_only: bool) {
        self.gaps_only = gaps_only;
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    pub fn matches<K>(&self, scored: &ScoredConfiguration<K>) -> bool {
        if scored.range() < self.min_range {
            return false;
        }
        if self.gaps_only && !scored.has_gap() {
            return false;
        }
        true
    }

    pub fn rank<K, I>(&self, scored: I) -> Vec<ScoredConfiguration<K>>
        where I: IntoIterator<Item=ScoredConfiguration<K>>
    {
        let mut considered = 0;
        let mut ranked: Vec<_> = scored.into_iter()
            .inspect(|_| considered += 1)
            .filter(|s| self.matches(s))
            .collect();
        ranked.sort_by(|a, b| b.total_overlap().total_cmp(&a.total_overlap()));
        if let Some(limit) = self.limit {
            ranked.truncate(limit);
        }
        info!("Ranked {} of {} configurations with range >= {}", ranked.len(), considered, self.min_range);
        ranked
    }
}

pub struct RankingFilterBuilder {
    min_range: f64,
    gaps_only: bool,
    limit: Option<usize>
}

impl RankingFilterBuilder {
    pub fn new(min_range: f64) -> Self {
        Self {
            min_range,
            gaps_only: false,
            limit: None
        }
    }

    /// Only keep configurations with a gap between two hub states
    pub fn gaps_only(mut self) -> Self {
        self.gaps_only = true;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn build(self) -> RankingFilter {
        RankingFilter::new(self.min_range, self.gaps_only, self.limit)
    }
}

/// Keep configurations with a range of at least `min_range`, worst overlap first
pub fn rank<K, I>(scored: I, min_range: f64) -> Vec<ScoredConfiguration<K>>
    where I: IntoIterator<Item=ScoredConfiguration<K>>
{
    RankingFilterBuilder::new(min_range).build().rank(scored)
}
