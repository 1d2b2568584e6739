//! TOPSIS Engine - Similarity-to-ideal-solution scoring and ranking.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Impact;

use super::{dense_rank, Alternative, DecisionMatrix, ImpactVector, TopsisError, WeightVector};

/// An alternative with its closeness score and rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAlternative {
    #[serde(flatten)]
    pub alternative: Alternative,
    /// Closeness to the ideal solution, in `[0, 1]`; higher is better.
    pub score: f64,
    /// Dense rank, 1 = best.
    pub rank: u32,
}

impl ScoredAlternative {
    /// Returns the alternative's identifier.
    pub fn id(&self) -> &str {
        &self.alternative.id
    }
}

/// Per-criterion ideal points in weighted-normalized space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealSolution {
    pub best: Vec<f64>,
    pub worst: Vec<f64>,
}

/// Full result of a TOPSIS run, including intermediate vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopsisEvaluation {
    /// Weights rescaled to sum to one.
    pub normalized_weights: Vec<f64>,
    pub ideal: IdealSolution,
    /// Euclidean distance of each alternative to the ideal best.
    pub distances_best: Vec<f64>,
    /// Euclidean distance of each alternative to the ideal worst.
    pub distances_worst: Vec<f64>,
    /// Scored alternatives in input row order.
    pub ranking: Vec<ScoredAlternative>,
}

impl TopsisEvaluation {
    /// Returns the first alternative holding rank 1.
    pub fn best(&self) -> Option<&ScoredAlternative> {
        self.ranking.iter().find(|s| s.rank == 1)
    }
}

/// Stateless TOPSIS scoring functions.
pub struct TopsisEngine;

impl TopsisEngine {
    /// Scores and ranks every alternative of the matrix.
    ///
    /// Output order equals input row order.
    ///
    /// # Errors
    ///
    /// - `ShapeMismatch` when weights or impacts disagree with the criterion count
    /// - `DegenerateWeights` when the weights sum to zero
    /// - `NonFiniteValue` / `EmptyMatrix` when the matrix is invalid
    pub fn compute(
        matrix: &DecisionMatrix,
        weights: &WeightVector,
        impacts: &ImpactVector,
    ) -> Result<Vec<ScoredAlternative>, TopsisError> {
        Ok(Self::evaluate(matrix, weights, impacts)?.ranking)
    }

    /// Same as [`TopsisEngine::compute`], keeping the intermediate results.
    ///
    /// # Algorithm
    /// 1. Vector-normalize each column: `x / sqrt(Σx²)`; only an all-zero column stays zero
    /// 2. Rescale weights to sum to one and multiply them into the columns
    /// 3. Ideal best/worst per column: max/min for `Maximize`, min/max for `Minimize`
    /// 4. Euclidean distance of each row to both ideal points
    /// 5. Score = `d_worst / (d_best + d_worst)`, or 0 when both distances are 0
    /// 6. Dense ranking by descending score
    pub fn evaluate(
        matrix: &DecisionMatrix,
        weights: &WeightVector,
        impacts: &ImpactVector,
    ) -> Result<TopsisEvaluation, TopsisError> {
        let criteria = matrix.criterion_count();
        if weights.len() != criteria {
            return Err(TopsisError::shape_mismatch("weights", criteria, weights.len()));
        }
        if impacts.len() != criteria {
            return Err(TopsisError::shape_mismatch("impacts", criteria, impacts.len()));
        }

        let normalized_weights = weights.normalized()?;
        matrix.validate()?;

        let weighted = Self::weighted_matrix(matrix, &normalized_weights);
        let ideal = Self::ideal_solution(&weighted, impacts.as_slice());

        let distances_best: Vec<f64> = weighted
            .iter()
            .map(|row| Self::euclidean_distance(row, &ideal.best))
            .collect();
        let distances_worst: Vec<f64> = weighted
            .iter()
            .map(|row| Self::euclidean_distance(row, &ideal.worst))
            .collect();

        let scores: Vec<f64> = distances_best
            .iter()
            .zip(&distances_worst)
            .map(|(best, worst)| Self::closeness(*best, *worst))
            .collect();
        let ranks = dense_rank(&scores);

        let ranking = matrix
            .alternatives()
            .iter()
            .zip(scores.iter().zip(ranks))
            .map(|(alternative, (score, rank))| ScoredAlternative {
                alternative: alternative.clone(),
                score: *score,
                rank,
            })
            .collect();

        Ok(TopsisEvaluation {
            normalized_weights,
            ideal,
            distances_best,
            distances_worst,
            ranking,
        })
    }

    /// Euclidean norm of every criterion column.
    fn column_norms(matrix: &DecisionMatrix) -> Vec<f64> {
        (0..matrix.criterion_count())
            .map(|c| Self::euclidean_norm(matrix.column(c)))
            .collect()
    }

    /// `sqrt(Σv²)` computed relative to the largest magnitude, so finite
    /// inputs never overflow to infinity or underflow to zero. Zero only when
    /// every value is zero.
    fn euclidean_norm<I>(values: I) -> f64
    where
        I: Iterator<Item = f64> + Clone,
    {
        let scale = values.clone().fold(0.0_f64, |m, v| m.max(v.abs()));
        if scale == 0.0 {
            return 0.0;
        }
        scale * values.map(|v| (v / scale).powi(2)).sum::<f64>().sqrt()
    }

    /// Vector-normalized values multiplied by the normalized weights, row-major.
    fn weighted_matrix(matrix: &DecisionMatrix, weights: &[f64]) -> Vec<Vec<f64>> {
        let norms = Self::column_norms(matrix);

        matrix
            .alternatives()
            .iter()
            .map(|alternative| {
                alternative
                    .values
                    .iter()
                    .zip(norms.iter().zip(weights))
                    .map(|(value, (norm, weight))| {
                        if *norm == 0.0 {
                            0.0
                        } else {
                            value / norm * weight
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Derives the ideal best and worst points column by column.
    fn ideal_solution(weighted: &[Vec<f64>], impacts: &[Impact]) -> IdealSolution {
        let (best, worst) = impacts
            .iter()
            .enumerate()
            .map(|(c, impact)| {
                let column = weighted.iter().map(|row| row[c]);
                let max = column.clone().fold(f64::NEG_INFINITY, f64::max);
                let min = column.fold(f64::INFINITY, f64::min);
                match impact {
                    Impact::Maximize => (max, min),
                    Impact::Minimize => (min, max),
                }
            })
            .unzip();

        IdealSolution { best, worst }
    }

    fn euclidean_distance(row: &[f64], point: &[f64]) -> f64 {
        Self::euclidean_norm(row.iter().zip(point).map(|(a, b)| a - b))
    }

    /// Relative closeness to the ideal solution.
    ///
    /// When both distances are zero the alternative coincides with both ideal
    /// points, which only happens when no criterion differentiates the
    /// alternatives. That degenerate tie scores 0 instead of NaN.
    fn closeness(distance_best: f64, distance_worst: f64) -> f64 {
        let denominator = distance_best + distance_worst;
        if denominator == 0.0 {
            0.0
        } else {
            distance_worst / denominator
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-4;

    fn phones() -> DecisionMatrix {
        DecisionMatrix::builder()
            .id_header("Model")
            .criteria(vec!["Price", "Storage", "Camera", "Looks"])
            .alternative("A", vec![250.0, 16.0, 12.0, 5.0])
            .alternative("B", vec![200.0, 16.0, 8.0, 3.0])
            .alternative("C", vec![300.0, 32.0, 16.0, 4.0])
            .alternative("D", vec![275.0, 32.0, 8.0, 4.0])
            .build()
            .unwrap()
    }

    fn equal_weights() -> WeightVector {
        WeightVector::new(vec![1.0, 1.0, 1.0, 1.0]).unwrap()
    }

    fn scores(ranking: &[ScoredAlternative]) -> Vec<f64> {
        ranking.iter().map(|s| s.score).collect()
    }

    fn ranks(ranking: &[ScoredAlternative]) -> Vec<u32> {
        ranking.iter().map(|s| s.rank).collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < TOLERANCE, "expected {:?}, got {:?}", expected, actual);
        }
    }

    // Worked examples

    #[test]
    fn phones_with_looks_minimized() {
        let impacts: ImpactVector = "+,+,+,-".parse().unwrap();
        let ranking = TopsisEngine::compute(&phones(), &equal_weights(), &impacts).unwrap();

        assert_close(&scores(&ranking), &[0.3079, 0.3262, 0.8095, 0.4977]);
        assert_eq!(ranks(&ranking), vec![4, 3, 1, 2]);
    }

    #[test]
    fn phones_with_price_minimized_matches_textbook() {
        let impacts: ImpactVector = "-,+,+,+".parse().unwrap();
        let ranking = TopsisEngine::compute(&phones(), &equal_weights(), &impacts).unwrap();

        assert_close(&scores(&ranking), &[0.4587, 0.2667, 0.6798, 0.4635]);
        assert_eq!(ranks(&ranking), vec![3, 4, 1, 2]);
        assert_eq!(ranking[2].id(), "C");
    }

    #[test]
    fn output_preserves_input_order_and_values() {
        let impacts: ImpactVector = "+,+,+,-".parse().unwrap();
        let ranking = TopsisEngine::compute(&phones(), &equal_weights(), &impacts).unwrap();

        let ids: Vec<&str> = ranking.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
        assert_eq!(ranking[0].alternative.values, vec![250.0, 16.0, 12.0, 5.0]);
    }

    #[test]
    fn evaluation_exposes_intermediate_results() {
        let impacts: ImpactVector = "+,+,+,-".parse().unwrap();
        let evaluation = TopsisEngine::evaluate(&phones(), &equal_weights(), &impacts).unwrap();

        assert_eq!(evaluation.normalized_weights, vec![0.25; 4]);
        assert_eq!(evaluation.ideal.best.len(), 4);
        assert!(evaluation.ideal.best[0] > evaluation.ideal.worst[0]);
        assert!(evaluation.ideal.best[3] < evaluation.ideal.worst[3]);
        assert_close(
            &evaluation.distances_best,
            &[0.1119, 0.1271, 0.0308, 0.0931],
        );
        assert_eq!(evaluation.best().map(|s| s.id()), Some("C"));
    }

    // Weight handling

    #[test]
    fn weight_scale_does_not_change_result() {
        let impacts: ImpactVector = "+,+,+,-".parse().unwrap();
        let large = WeightVector::new(vec![25.0, 25.0, 25.0, 25.0]).unwrap();

        let base = TopsisEngine::compute(&phones(), &equal_weights(), &impacts).unwrap();
        let scaled = TopsisEngine::compute(&phones(), &large, &impacts).unwrap();

        assert_eq!(base, scaled);
    }

    #[test]
    fn zero_weight_criterion_is_ignored() {
        let impacts: ImpactVector = "+,+".parse().unwrap();
        let matrix = DecisionMatrix::builder()
            .criteria(vec!["Useful", "Ignored"])
            .alternative("A", vec![1.0, 100.0])
            .alternative("B", vec![2.0, 1.0])
            .build()
            .unwrap();
        let weights = WeightVector::new(vec![1.0, 0.0]).unwrap();

        let ranking = TopsisEngine::compute(&matrix, &weights, &impacts).unwrap();
        assert_eq!(ranks(&ranking), vec![2, 1]);
        assert_close(&scores(&ranking), &[0.0, 1.0]);
    }

    // Degenerate inputs

    #[test]
    fn all_zero_column_contributes_nothing() {
        let impacts: ImpactVector = "+,+".parse().unwrap();
        let weights = WeightVector::new(vec![1.0, 1.0]).unwrap();
        let matrix = DecisionMatrix::builder()
            .criteria(vec!["Signal", "Zeros"])
            .alternative("A", vec![3.0, 0.0])
            .alternative("B", vec![1.0, 0.0])
            .build()
            .unwrap();

        let ranking = TopsisEngine::compute(&matrix, &weights, &impacts).unwrap();
        assert_close(&scores(&ranking), &[1.0, 0.0]);
        assert_eq!(ranks(&ranking), vec![1, 2]);
    }

    #[test]
    fn identical_alternatives_score_zero_and_tie() {
        let impacts: ImpactVector = "+,-".parse().unwrap();
        let weights = WeightVector::new(vec![1.0, 1.0]).unwrap();
        let matrix = DecisionMatrix::builder()
            .criteria(vec!["C1", "C2"])
            .alternative("A", vec![5.0, 5.0])
            .alternative("B", vec![5.0, 5.0])
            .alternative("C", vec![5.0, 5.0])
            .build()
            .unwrap();

        let ranking = TopsisEngine::compute(&matrix, &weights, &impacts).unwrap();
        assert_eq!(scores(&ranking), vec![0.0, 0.0, 0.0]);
        assert_eq!(ranks(&ranking), vec![1, 1, 1]);
    }

    #[test]
    fn single_alternative_scores_zero_and_ranks_first() {
        let impacts: ImpactVector = "+".parse().unwrap();
        let weights = WeightVector::new(vec![1.0]).unwrap();
        let matrix = DecisionMatrix::builder()
            .criteria(vec!["Only"])
            .alternative("Solo", vec![42.0])
            .build()
            .unwrap();

        let ranking = TopsisEngine::compute(&matrix, &weights, &impacts).unwrap();
        assert_eq!(ranking[0].score, 0.0);
        assert_eq!(ranking[0].rank, 1);
    }

    #[test]
    fn duplicate_rows_share_rank() {
        let impacts: ImpactVector = "+,+".parse().unwrap();
        let weights = WeightVector::new(vec![1.0, 1.0]).unwrap();
        let matrix = DecisionMatrix::builder()
            .criteria(vec!["C1", "C2"])
            .alternative("A", vec![4.0, 4.0])
            .alternative("B", vec![4.0, 4.0])
            .alternative("C", vec![1.0, 2.0])
            .build()
            .unwrap();

        let ranking = TopsisEngine::compute(&matrix, &weights, &impacts).unwrap();
        assert_eq!(ranks(&ranking), vec![1, 1, 2]);
    }

    #[test]
    fn negative_values_are_supported() {
        let impacts: ImpactVector = "+".parse().unwrap();
        let weights = WeightVector::new(vec![1.0]).unwrap();
        let matrix = DecisionMatrix::builder()
            .criteria(vec!["Profit"])
            .alternative("Loss", vec![-10.0])
            .alternative("Gain", vec![10.0])
            .build()
            .unwrap();

        let ranking = TopsisEngine::compute(&matrix, &weights, &impacts).unwrap();
        assert_eq!(ranks(&ranking), vec![2, 1]);
        assert_close(&scores(&ranking), &[0.0, 1.0]);
    }

    // Extreme magnitudes

    fn two_by_two(first: [f64; 2]) -> Vec<ScoredAlternative> {
        let impacts: ImpactVector = "+,+".parse().unwrap();
        let weights = WeightVector::new(vec![1.0, 1.0]).unwrap();
        let matrix = DecisionMatrix::builder()
            .criteria(vec!["Scaled", "Plain"])
            .alternative("A", vec![first[0], 2.0])
            .alternative("B", vec![first[1], 1.0])
            .build()
            .unwrap();

        TopsisEngine::compute(&matrix, &weights, &impacts).unwrap()
    }

    #[test]
    fn huge_column_is_not_treated_as_zero() {
        let unit = two_by_two([1.0, 10.0]);
        let huge = two_by_two([1e200, 1e201]);

        assert_eq!(ranks(&huge), vec![2, 1]);
        assert_close(&scores(&huge), &scores(&unit));
    }

    #[test]
    fn tiny_column_is_not_treated_as_zero() {
        let unit = two_by_two([1.0, 10.0]);
        let tiny = two_by_two([1e-200, 1e-199]);

        assert_eq!(ranks(&tiny), vec![2, 1]);
        assert_close(&scores(&tiny), &scores(&unit));
    }

    #[test]
    fn column_norm_stays_finite_for_extreme_values() {
        let norm = TopsisEngine::euclidean_norm([3e300, 4e300].into_iter());
        assert!((norm / 5e300 - 1.0).abs() < 1e-12);

        let norm = TopsisEngine::euclidean_norm([3e-300, 4e-300].into_iter());
        assert!((norm / 5e-300 - 1.0).abs() < 1e-12);

        assert_eq!(TopsisEngine::euclidean_norm([0.0, -0.0].into_iter()), 0.0);
    }

    // Error cases

    #[test]
    fn too_few_weights_is_shape_mismatch() {
        let impacts: ImpactVector = "+,+,+,-".parse().unwrap();
        let weights = WeightVector::new(vec![1.0, 1.0]).unwrap();

        let err = TopsisEngine::compute(&phones(), &weights, &impacts).unwrap_err();
        assert_eq!(err, TopsisError::shape_mismatch("weights", 4, 2));
    }

    #[test]
    fn too_many_impacts_is_shape_mismatch() {
        let impacts: ImpactVector = "+,+,+,-,+".parse().unwrap();

        let err = TopsisEngine::compute(&phones(), &equal_weights(), &impacts).unwrap_err();
        assert_eq!(err, TopsisError::shape_mismatch("impacts", 4, 5));
    }

    #[test]
    fn zero_weights_are_degenerate() {
        let impacts: ImpactVector = "+,+,+,-".parse().unwrap();
        let weights = WeightVector::new(vec![0.0; 4]).unwrap();

        let err = TopsisEngine::compute(&phones(), &weights, &impacts).unwrap_err();
        assert_eq!(err, TopsisError::DegenerateWeights);
    }

    #[test]
    fn engine_does_not_mutate_inputs() {
        let matrix = phones();
        let weights = equal_weights();
        let impacts: ImpactVector = "+,+,+,-".parse().unwrap();
        let before = (matrix.clone(), weights.clone(), impacts.clone());

        TopsisEngine::compute(&matrix, &weights, &impacts).unwrap();

        assert_eq!((matrix, weights, impacts), before);
    }
}
