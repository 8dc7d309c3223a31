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

use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;
use itertools::Itertools;
use serde::Serialize;

/// Number of cogs mounted on the rear wheel
pub const COGS_PER_CASSETTE: usize = 4;

/// Rear cog tooth counts ordered smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CogSet([u32; COGS_PER_CASSETTE]);

impl CogSet {
    /// Returns `None` unless the tooth counts are strictly increasing
    pub fn new(teeth: [u32; COGS_PER_CASSETTE]) -> Option<CogSet> {
        match teeth.iter().tuple_windows().all(|(a, b)| b > a) {
            true => Some(CogSet(teeth)),
            false => None
        }
    }

    pub fn teeth(&self) -> &[u32; COGS_PER_CASSETTE] {
        &self.0
    }

    pub fn largest_jump(&self) -> u32 {
        self.0.iter().tuple_windows().map(|(a, b)| b - a).max().unwrap_or(0)
    }
}

impl Display for CogSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

/// A cassette paired with the chainring it is driven by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CassetteCombination {
    front_teeth: u32,
    #[serde(rename = "rear_teeths")]
    cogs: CogSet
}

impl CassetteCombination {
    pub fn new(front_teeth: u32, cogs: CogSet) -> CassetteCombination {
        CassetteCombination { front_teeth, cogs }
    }

    pub fn front_teeth(&self) -> u32 {
        self.front_teeth
    }

    pub fn cogs(&self) -> &CogSet {
        &self.cogs
    }
}

impl Display for CassetteCombination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}T x {}", self.front_teeth, self.cogs)
    }
}

/// Enumerates every cassette whose cogs come from `[lo, hi]`, strictly increase
/// and never jump by `max_jump` teeth or more between neighbouring cogs.
///
/// Cassettes are produced in ascending lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CassetteCombinationGenerator {
    lo: u32,
    hi: u32,
    max_jump: u32
}

impl CassetteCombinationGenerator {
    pub fn new(lo: u32, hi: u32, max_jump: u32) -> CassetteCombinationGenerator {
        CassetteCombinationGenerator { lo, hi, max_jump }
    }

    pub fn candidates(&self) -> RangeInclusive<u32> {
        self.lo..=self.hi
    }

    pub fn max_jump(&self) -> u32 {
        self.max_jump
    }

    /// Lazily walk the valid cassettes
    pub fn iter(&self) -> impl Iterator<Item=CogSet> + '_ {
        self.candidates().flat_map(move |t1| {
            self.successors(t1).flat_map(move |t2| {
                self.successors(t2).flat_map(move |t3| {
                    self.successors(t3).map(move |t4| CogSet([t1, t2, t3, t4]))
                })
            })
        })
    }

    pub fn generate(&self) -> Vec<CogSet> {
        self.iter().collect()
    }

    // Cogs that can follow `current`: larger, within the candidate range
    // and less than `max_jump` teeth away
    fn successors(&self, current: u32) -> RangeInclusive<u32> {
        let max_step = self.max_jump.saturating_sub(1);
        match current.checked_add(1) {
            Some(next) if max_step > 0 => {
                next.max(self.lo)..=self.hi.min(current.saturating_add(max_step))
            }
            _ => RangeInclusive::new(1, 0)
        }
    }
}

/// Pair every cassette with every chainring
pub fn chainring_cross_product<'a, I>(cassettes: I, chainrings: &'a [u32])
    -> impl Iterator<Item=CassetteCombination> + 'a
    where I: IntoIterator<Item=CogSet>,
          I::IntoIter: 'a
{
    cassettes.into_iter().flat_map(move |cogs| {
        chainrings.iter().map(move |front_teeth| CassetteCombination::new(*front_teeth, cogs))
    })
}
