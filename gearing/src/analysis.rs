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

use itertools::Itertools;
use tracing::{info, warn};
use crate::cassette::{chainring_cross_product, CassetteCombination, CassetteCombinationGenerator};
use crate::error::{check_positive, check_teeth, Result};
use crate::hub::HubRatioExpander;
use crate::metrics::compute;
use crate::overlap::{OverlapAnalyzer, ScoredConfiguration};
use crate::ranking::RankingFilter;
use crate::table::GearRow;
use crate::wheel::WheelSpec;

/// Search over cassette and chainring combinations for a hub geared bike
#[derive(Debug, Clone)]
pub struct CassetteAnalysis {
    wheel: WheelSpec,
    crank_length_mm: f64,
    generator: CassetteCombinationGenerator,
    chainrings: Vec<u32>,
    expander: HubRatioExpander
}

impl CassetteAnalysis {
    pub fn new(wheel: WheelSpec,
               crank_length_mm: f64,
               generator: CassetteCombinationGenerator,
               chainrings: Vec<u32>,
               hub_ratio_percentages: Vec<u32>) -> Result<CassetteAnalysis>
    {
        check_positive("crank_length_mm", crank_length_mm)?;
        for front_teeth in &chainrings {
            check_teeth("front_teeth", *front_teeth)?;
        }
        // A cog of zero teeth can only come from the bottom of the candidate range
        if !generator.candidates().is_empty() {
            check_teeth("rear_teeth", *generator.candidates().start())?;
        }
        // A repeated chainring would score the same configuration twice
        let chainrings: Vec<u32> = chainrings.into_iter().unique().collect();
        Ok(CassetteAnalysis {
            wheel,
            crank_length_mm,
            generator,
            chainrings,
            expander: HubRatioExpander::new(hub_ratio_percentages)?
        })
    }

    /// Lazily enumerate every cassette/chainring pairing
    pub fn combinations(&self) -> impl Iterator<Item=CassetteCombination> + '_ {
        chainring_cross_product(self.generator.iter(), &self.chainrings)
    }

    /// Direct drive rows of one combination
    pub fn base_rows(&self, combination: &CassetteCombination) -> Vec<GearRow> {
        let front_teeth = combination.front_teeth();
        combination.cogs().teeth().iter().map(|rear_teeth| {
            GearRow::new(front_teeth,
                         compute(&self.wheel, front_teeth, *rear_teeth, self.crank_length_mm, 1.0))
        }).collect()
    }

    pub fn score(&self, combination: CassetteCombination) -> Option<ScoredConfiguration<CassetteCombination>> {
        let rows = self.base_rows(&combination);
        OverlapAnalyzer::score(combination, self.expander.expand(rows))
    }

    /// Score every combination, one at a time, in combination order
    pub fn score_all(&self) -> Vec<ScoredConfiguration<CassetteCombination>> {
        let scored: Vec<_> = self.combinations()
            .filter_map(|combination| self.score(combination))
            .collect();
        if scored.is_empty() {
            warn!("No cassette combinations for cogs {:?} with jumps below {}",
                  self.generator.candidates(), self.generator.max_jump());
        } else {
            info!("Scored {} cassette combinations", scored.len());
        }
        scored
    }

    pub fn run(&self, filter: &RankingFilter) -> Vec<ScoredConfiguration<CassetteCombination>> {
        filter.rank(self.score_all())
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use utils::numeric::approx_eq;
    use crate::analysis::CassetteAnalysis;
    use crate::cassette::{CassetteCombination, CassetteCombinationGenerator, CogSet};
    use crate::error::GearingError;
    use crate::hub::HubRatioExpander;
    use crate::metrics::compute;
    use crate::overlap::OverlapAnalyzer;
    use crate::ranking::RankingFilterBuilder;
    use crate::table::GearRow;
    use crate::wheel::WheelSpec;

    fn wheel() -> WheelSpec {
        WheelSpec::new(349.0, 35.0).unwrap()
    }

    fn analysis(lo: u32, hi: u32, max_jump: u32) -> CassetteAnalysis {
        CassetteAnalysis::new(wheel(), 170.0,
                              CassetteCombinationGenerator::new(lo, hi, max_jump),
                              vec![44, 50],
                              vec![64, 100, 157]).unwrap()
    }

    #[test]
    fn scores_every_combination() {
        let analysis = analysis(11, 16, 3);
        let cassettes = CassetteCombinationGenerator::new(11, 16, 3).generate();
        let scored = analysis.score_all();
        assert_eq!(scored.len(), cassettes.len() * 2);
        assert!(scored.iter().all(|s| s.steps().len() == 3));
        assert!(scored.iter().tuple_windows().all(|(a, b)| a.key() != b.key()));
    }

    #[test]
    fn streaming_matches_table_analysis() {
        let analysis = analysis(11, 18, 4);
        let expander = HubRatioExpander::new(vec![64, 100, 157]).unwrap();
        let rows: Vec<(CassetteCombination, GearRow)> = analysis.combinations()
            .flat_map(|combination| {
                let rows = analysis.base_rows(&combination);
                expander.expand(rows).map(move |row| (combination, row)).collect::<Vec<_>>()
            })
            .collect();
        let mut table = OverlapAnalyzer::analyze(rows);
        let mut streamed = analysis.score_all();
        table.sort_by(|a, b| a.key().cmp(b.key()));
        streamed.sort_by(|a, b| a.key().cmp(b.key()));
        assert_eq!(table, streamed);
    }

    #[test]
    fn score_all_follows_generator_then_chainring_order() {
        let generator = CassetteCombinationGenerator::new(11, 18, 4);
        let analysis = CassetteAnalysis::new(wheel(), 170.0, generator.clone(),
                                             vec![50, 44], vec![64, 100, 157]).unwrap();
        let keys: Vec<CassetteCombination> = analysis.score_all().iter().map(|s| *s.key()).collect();
        let expected: Vec<CassetteCombination> = generator.generate().into_iter()
            .flat_map(|cogs| [50, 44].map(|front| CassetteCombination::new(front, cogs)))
            .collect();
        assert_eq!(keys, expected);
        assert_eq!(keys[0].front_teeth(), 50);
        assert_eq!(keys[1].front_teeth(), 44);
        assert_eq!(keys[0].cogs(), keys[1].cogs());
    }

    #[test]
    fn repeated_chainrings_are_scored_once() {
        let generator = CassetteCombinationGenerator::new(11, 16, 3);
        let cassettes = generator.generate();
        let analysis = CassetteAnalysis::new(wheel(), 170.0, generator,
                                             vec![50, 50, 44], vec![64, 100, 157]).unwrap();
        let scored = analysis.score_all();
        assert_eq!(scored.len(), cassettes.len() * 2);
        assert!(scored.iter().map(|s| *s.key()).all_unique());
        assert_eq!(scored[0].key().front_teeth(), 50);
        assert_eq!(scored[1].key().front_teeth(), 44);
    }

    #[test]
    fn score_single_combination() {
        let analysis = analysis(11, 24, 5);
        let combination = CassetteCombination::new(50, CogSet::new([11, 13, 15, 18]).unwrap());
        let scored = analysis.score(combination).unwrap();
        let development = |rear: u32, hub: f64| compute(&wheel(), 50, rear, 170.0, hub).metre_development();
        assert!(approx_eq(scored.max(), development(11, 1.57), 1e-9));
        assert!(approx_eq(scored.min(), development(18, 0.64), 1e-9));
    }

    #[test]
    fn ranked_run() {
        let analysis = analysis(11, 24, 5);
        let filter = RankingFilterBuilder::new(3.6).build();
        let ranked = analysis.run(&filter);
        assert!(!ranked.is_empty());
        assert!(ranked.iter().all(|s| s.range() >= 3.6));
        assert!(ranked.iter().tuple_windows().all(|(a, b)| a.total_overlap() >= b.total_overlap()));
    }

    #[test]
    fn empty_search_space() {
        let analysis = analysis(11, 24, 1);
        assert_eq!(analysis.combinations().count(), 0);
        assert!(analysis.score_all().is_empty());
        assert!(analysis.run(&RankingFilterBuilder::new(0.0).build()).is_empty());
    }

    #[test]
    fn invalid_configuration() {
        let generator = CassetteCombinationGenerator::new(11, 24, 5);
        assert_eq!(CassetteAnalysis::new(wheel(), 0.0, generator.clone(), vec![50], vec![100]).unwrap_err(),
                   GearingError::InvalidGeometry { field: "crank_length_mm", value: 0.0 });
        assert_eq!(CassetteAnalysis::new(wheel(), 170.0, generator.clone(), vec![50, 0], vec![100]).unwrap_err(),
                   GearingError::InvalidGeometry { field: "front_teeth", value: 0.0 });
        assert_eq!(CassetteAnalysis::new(wheel(), 170.0, generator, vec![50], vec![0]).unwrap_err(),
                   GearingError::InvalidHubRatio(0.0));
        assert!(CassetteAnalysis::new(wheel(), 170.0, CassetteCombinationGenerator::new(0, 10, 5),
                                      vec![50], vec![100]).is_err());
    }
}
