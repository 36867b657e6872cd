//! TOPSIS Engine - Similarity-to-ideal scoring and dense ranking.

use super::{
    dense_rank, DecisionTable, Degeneracy, ImpactVector, ScoredAlternative, ScoredTable,
    WeightVector,
};
use crate::domain::foundation::ComputationError;

/// Score given to a row whose distances to both ideal points are zero.
///
/// That only happens when every criterion column is constant (a single row,
/// for instance): the row is as close to the best as to the worst.
pub const ZERO_SEPARATION_SCORE: f64 = 0.5;

/// Euclidean norm of one column, split into its largest magnitude and the
/// length of the column divided by it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnNorm {
    scale: f64,
    length: f64,
}

impl ColumnNorm {
    const ZERO: Self = Self {
        scale: 0.0,
        length: 0.0,
    };

    /// `x / norm`, or 0 for an all-zero column.
    fn normalize(&self, x: f64) -> f64 {
        if self.scale == 0.0 {
            0.0
        } else {
            (x / self.scale) / self.length
        }
    }
}

/// TOPSIS computation functions.
pub struct TopsisEngine;

impl TopsisEngine {
    /// Scores and ranks every alternative of a validated table.
    ///
    /// # Algorithm
    /// 1. `v[i][j] = x[i][j] / sqrt(Σ_i x[i][j]²)`
    /// 2. `w[i][j] = v[i][j] * weight[j]`
    /// 3. best/worst per column: max/min for benefit, min/max for cost
    /// 4. `S+[i]`, `S-[i]`: Euclidean distance to best and to worst
    /// 5. `score[i] = S-[i] / (S+[i] + S-[i])`, dense-ranked descending
    ///
    /// # Edge Cases
    /// - All-zero column: normalized to 0 instead of 0/0, noted as `ZeroNormColumn`
    /// - Non-finite column value: `NumericOverflow`
    /// - `S+ + S- == 0`: score is [`ZERO_SEPARATION_SCORE`], noted as `ZeroSeparation`
    /// - Rows are returned in input order; ranking only labels them
    pub fn compute(
        table: &DecisionTable,
        weights: &WeightVector,
        impacts: &ImpactVector,
    ) -> Result<ScoredTable, ComputationError> {
        let criteria = table.criterion_count();
        if weights.len() != criteria || impacts.len() != criteria {
            return Err(ComputationError::CriteriaCountMismatch {
                criteria,
                weights: weights.len(),
                impacts: impacts.len(),
            });
        }
        if table.is_empty() {
            return Err(ComputationError::NoAlternatives);
        }

        let mut degeneracies = Vec::new();
        let norms = Self::column_norms(table, &mut degeneracies)?;
        let weighted = Self::weighted_matrix(table, &norms, weights);
        let (ideal_best, ideal_worst) = Self::ideal_points(&weighted, impacts);

        let scores: Vec<f64> = weighted
            .iter()
            .enumerate()
            .map(|(row, values)| {
                let to_best = Self::distance(values, &ideal_best);
                let to_worst = Self::distance(values, &ideal_worst);
                let total = to_best + to_worst;
                if total == 0.0 {
                    degeneracies.push(Degeneracy::ZeroSeparation { row });
                    ZERO_SEPARATION_SCORE
                } else {
                    to_worst / total
                }
            })
            .collect();

        let ranks = dense_rank(&scores);

        let rows = table
            .alternatives()
            .iter()
            .zip(scores)
            .zip(ranks)
            .map(|((alt, score), rank)| ScoredAlternative {
                identifier: alt.identifier.clone(),
                values: alt.values.clone(),
                score,
                rank,
            })
            .collect();

        Ok(ScoredTable {
            identifier_header: table.identifier_header().to_string(),
            criteria: table.criteria().to_vec(),
            rows,
            degeneracies,
        })
    }

    /// Euclidean norm of every criterion column, kept as `scale * length`.
    ///
    /// Values are divided by the column's largest magnitude before squaring,
    /// so columns near the edges of the f64 range neither overflow nor
    /// underflow to zero.
    fn column_norms(
        table: &DecisionTable,
        degeneracies: &mut Vec<Degeneracy>,
    ) -> Result<Vec<ColumnNorm>, ComputationError> {
        table
            .criteria()
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let scale = table.column(index).fold(0.0_f64, |m, x| m.max(x.abs()));
                if !scale.is_finite() {
                    return Err(ComputationError::NumericOverflow {
                        column: name.clone(),
                    });
                }
                if scale == 0.0 {
                    degeneracies.push(Degeneracy::ZeroNormColumn {
                        column: name.clone(),
                        index,
                    });
                    return Ok(ColumnNorm::ZERO);
                }
                let length = table
                    .column(index)
                    .map(|x| (x / scale).powi(2))
                    .sum::<f64>()
                    .sqrt();
                Ok(ColumnNorm { scale, length })
            })
            .collect()
    }

    /// Normalized values multiplied by their criterion weight.
    fn weighted_matrix(
        table: &DecisionTable,
        norms: &[ColumnNorm],
        weights: &WeightVector,
    ) -> Vec<Vec<f64>> {
        table
            .alternatives()
            .iter()
            .map(|alt| {
                alt.values
                    .iter()
                    .zip(norms)
                    .zip(weights.as_slice())
                    .map(|((&x, norm), &weight)| norm.normalize(x) * weight)
                    .collect()
            })
            .collect()
    }

    /// Per-column (best, worst) points, honoring each criterion's polarity.
    fn ideal_points(weighted: &[Vec<f64>], impacts: &ImpactVector) -> (Vec<f64>, Vec<f64>) {
        impacts
            .as_slice()
            .iter()
            .enumerate()
            .map(|(column, impact)| {
                let values = weighted.iter().filter_map(|row| row.get(column).copied());
                let (max, min) = values.fold((f64::NEG_INFINITY, f64::INFINITY), |(max, min), v| {
                    (max.max(v), min.min(v))
                });
                impact.ideal_pair(max, min)
            })
            .unzip()
    }

    fn distance(values: &[f64], point: &[f64]) -> f64 {
        values
            .iter()
            .zip(point)
            .map(|(v, p)| (v - p).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::RawCell;
    use crate::domain::foundation::Impact;

    fn weights(values: &[f64]) -> WeightVector {
        WeightVector::try_new(values.to_vec()).unwrap()
    }

    fn impacts(symbols: &str) -> ImpactVector {
        ImpactVector::new(symbols.chars().map(|c| c.to_string().parse::<Impact>().unwrap()).collect())
    }

    fn laptops() -> DecisionTable {
        DecisionTable::builder()
            .identifier("Model")
            .criteria(vec!["CPU", "RAM", "Battery", "Price"])
            .alternative("A", vec![7.0, 9.0, 9500.0, 60.0])
            .alternative("B", vec![8.0, 7.0, 10000.0, 65.0])
            .alternative("C", vec![9.0, 9.0, 9700.0, 60.0])
            .build()
            .unwrap()
    }

    #[test]
    fn end_to_end_example_ranks_c_first() {
        let result = TopsisEngine::compute(&laptops(), &weights(&[1.0; 4]), &impacts("+++-")).unwrap();

        let scores = result.scores();
        assert!(scores.iter().all(|&s| s > 0.0 && s < 1.0));
        assert_ne!(scores[0], scores[1]);
        assert_ne!(scores[1], scores[2]);
        assert_ne!(scores[0], scores[2]);

        let mut ranks = result.ranks();
        assert_eq!(result.rows[2].rank, 1);
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert!(result.degeneracies.is_empty());
    }

    #[test]
    fn matches_hand_computed_scores() {
        // Column norms: 5 and 5. Weighted: A=(0.6,0.8), B=(0.8,0.6).
        // Benefit/benefit: best=(0.8,0.8), worst=(0.6,0.6) -> both rows tie at 0.5.
        let table = DecisionTable::builder()
            .criteria(vec!["X", "Y"])
            .alternative("A", vec![3.0, 4.0])
            .alternative("B", vec![4.0, 3.0])
            .build()
            .unwrap();

        let result = TopsisEngine::compute(&table, &weights(&[1.0, 1.0]), &impacts("++")).unwrap();
        assert!((result.rows[0].score - 0.5).abs() < 1e-12);
        assert!((result.rows[1].score - 0.5).abs() < 1e-12);
        assert_eq!(result.ranks(), vec![1, 1]);
    }

    #[test]
    fn cost_criterion_prefers_lower_values() {
        let table = DecisionTable::builder()
            .criteria(vec!["Quality", "Price"])
            .alternative("Cheap", vec![5.0, 10.0])
            .alternative("Pricey", vec![5.0, 20.0])
            .build()
            .unwrap();

        let result = TopsisEngine::compute(&table, &weights(&[1.0, 1.0]), &impacts("+-")).unwrap();
        assert_eq!(result.rows[0].rank, 1);
        assert!((result.rows[0].score - 1.0).abs() < 1e-12);
        assert!(result.rows[1].score.abs() < 1e-12);
    }

    #[test]
    fn weights_shift_the_ranking() {
        let table = DecisionTable::builder()
            .criteria(vec!["X", "Y"])
            .alternative("A", vec![10.0, 1.0])
            .alternative("B", vec![1.0, 10.0])
            .build()
            .unwrap();

        let favor_x = TopsisEngine::compute(&table, &weights(&[5.0, 1.0]), &impacts("++")).unwrap();
        let favor_y = TopsisEngine::compute(&table, &weights(&[1.0, 5.0]), &impacts("++")).unwrap();

        assert_eq!(favor_x.ranks(), vec![1, 2]);
        assert_eq!(favor_y.ranks(), vec![2, 1]);
    }

    #[test]
    fn preserves_row_order_and_identifiers() {
        let result = TopsisEngine::compute(&laptops(), &weights(&[1.0; 4]), &impacts("+++-")).unwrap();
        let ids: Vec<RawCell> = result.rows.iter().map(|r| r.identifier.clone()).collect();
        assert_eq!(ids, vec![RawCell::from("A"), RawCell::from("B"), RawCell::from("C")]);
        assert_eq!(result.rows[1].values, vec![8.0, 7.0, 10000.0, 65.0]);
    }

    #[test]
    fn is_deterministic() {
        let table = laptops();
        let first = TopsisEngine::compute(&table, &weights(&[1.0, 2.0, 0.5, 1.0]), &impacts("+-+-")).unwrap();
        let second = TopsisEngine::compute(&table, &weights(&[1.0, 2.0, 0.5, 1.0]), &impacts("+-+-")).unwrap();

        let bits = |t: &ScoredTable| t.scores().iter().map(|s| s.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first), bits(&second));
        assert_eq!(first, second);
    }

    #[test]
    fn single_row_gets_fallback_score() {
        let table = DecisionTable::builder()
            .criteria(vec!["X", "Y"])
            .alternative("Only", vec![3.0, 7.0])
            .build()
            .unwrap();

        let result = TopsisEngine::compute(&table, &weights(&[1.0, 1.0]), &impacts("+-")).unwrap();
        assert_eq!(result.rows[0].score, ZERO_SEPARATION_SCORE);
        assert_eq!(result.rows[0].rank, 1);
        assert_eq!(result.degeneracies, vec![Degeneracy::ZeroSeparation { row: 0 }]);
    }

    #[test]
    fn zero_column_is_neutral() {
        let table = DecisionTable::builder()
            .criteria(vec!["Zero", "Y"])
            .alternative("A", vec![0.0, 1.0])
            .alternative("B", vec![0.0, 2.0])
            .build()
            .unwrap();

        let result = TopsisEngine::compute(&table, &weights(&[1.0, 1.0]), &impacts("++")).unwrap();
        assert!(result.scores().iter().all(|s| s.is_finite()));
        assert_eq!(result.ranks(), vec![2, 1]);
        assert_eq!(
            result.degeneracies,
            vec![Degeneracy::ZeroNormColumn {
                column: "Zero".to_string(),
                index: 0
            }]
        );
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let result = TopsisEngine::compute(&laptops(), &weights(&[1.0; 3]), &impacts("+++-"));
        assert_eq!(
            result,
            Err(ComputationError::CriteriaCountMismatch {
                criteria: 4,
                weights: 3,
                impacts: 4
            })
        );
    }

    #[test]
    fn rejects_empty_table() {
        let table = DecisionTable::builder().criteria(vec!["X", "Y"]).build().unwrap();
        let result = TopsisEngine::compute(&table, &weights(&[1.0, 1.0]), &impacts("++"));
        assert_eq!(result, Err(ComputationError::NoAlternatives));
    }

    #[test]
    fn rejects_non_finite_column() {
        let table = DecisionTable::builder()
            .criteria(vec!["Huge", "Y"])
            .alternative("A", vec![f64::INFINITY, 1.0])
            .alternative("B", vec![1e200, 2.0])
            .build()
            .unwrap();

        let result = TopsisEngine::compute(&table, &weights(&[1.0, 1.0]), &impacts("++"));
        assert_eq!(
            result,
            Err(ComputationError::NumericOverflow {
                column: "Huge".to_string()
            })
        );
    }

    fn scaled_first_column(factor: f64) -> DecisionTable {
        DecisionTable::builder()
            .criteria(vec!["X", "Y"])
            .alternative("A", vec![1.0 * factor, 3.0])
            .alternative("B", vec![2.0 * factor, 1.0])
            .alternative("C", vec![3.0 * factor, 2.0])
            .build()
            .unwrap()
    }

    #[test]
    fn extreme_magnitudes_keep_scores() {
        let w = weights(&[1.0, 1.0]);
        let i = impacts("++");
        let baseline = TopsisEngine::compute(&scaled_first_column(1.0), &w, &i).unwrap();

        for factor in [1e160, 1e-170, 1e300, 1e-300] {
            let scaled = TopsisEngine::compute(&scaled_first_column(factor), &w, &i).unwrap();
            assert!(scaled.degeneracies.is_empty(), "factor {factor}: {:?}", scaled.degeneracies);
            for (a, b) in baseline.scores().iter().zip(scaled.scores()) {
                assert!((a - b).abs() < 1e-9, "factor {factor}: {a} vs {b}");
            }
            assert_eq!(scaled.ranks(), baseline.ranks());
        }
    }

    #[test]
    fn tiny_nonzero_column_is_not_zero_norm() {
        let table = DecisionTable::builder()
            .criteria(vec!["Tiny", "Y"])
            .alternative("A", vec![1e-320, 1.0])
            .alternative("B", vec![2e-320, 1.0])
            .build()
            .unwrap();

        let result = TopsisEngine::compute(&table, &weights(&[1.0, 1.0]), &impacts("++")).unwrap();
        assert!(result.degeneracies.is_empty());
        assert_eq!(result.ranks(), vec![2, 1]);
    }
}
