//! Depth normalization of a strand-aligned table.

use serde::Serialize;

use crate::aggregate::AlignedTable;
use crate::config::EmptyAggregatePolicy;
use crate::consts::WINDOW_BINS;
use crate::errors::{ProfileError, ProfileResult};

/// Normalized, strand-aggregated read-density curve of one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedDistribution {
    pub label: String,
    pub distances: Vec<i64>,
    pub values: Vec<f64>,
    /// Sum of every value in the aligned table.
    pub total_reads: f64,
    /// `total_reads / WINDOW_BINS`.
    pub normalization_factor: f64,
}

///
/// Normalize an aligned table into one distribution.
///
/// Each distance's row sum is divided by `total_reads / WINDOW_BINS`, so a
/// flat profile normalizes to 1.0 everywhere and the result does not depend
/// on sequencing depth.
///
/// A zero total (no sites aggregated, or only empty bins) has no defined
/// normalization: `policy` decides between an
/// [ProfileError::EmptyAggregate] error and an all-zero series. A total that
/// is not finite is always [ProfileError::NonFiniteAggregate].
///
pub fn normalize(
    label: &str,
    table: &AlignedTable,
    policy: EmptyAggregatePolicy,
) -> ProfileResult<NormalizedDistribution> {
    let row_sums = table.row_sums();
    let total_reads: f64 = row_sums.iter().sum();
    let normalization_factor = total_reads / WINDOW_BINS as f64;

    if !total_reads.is_finite() {
        return Err(ProfileError::NonFiniteAggregate {
            file: label.to_string(),
            total: total_reads,
        });
    }

    let values = if total_reads == 0.0 {
        match policy {
            EmptyAggregatePolicy::Error => {
                return Err(ProfileError::EmptyAggregate(label.to_string()));
            }
            EmptyAggregatePolicy::Zeros => vec![0.0; row_sums.len()],
        }
    } else {
        row_sums
            .iter()
            .map(|sum| sum / normalization_factor)
            .collect()
    };

    Ok(NormalizedDistribution {
        label: label.to_string(),
        distances: table.distances.clone(),
        values,
        total_reads,
        normalization_factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use sitecfd_core::models::Strand;

    use crate::aggregate::{SiteColumn, distance_axis};
    use crate::consts::HALF_WIDTH;

    fn table_of(columns: Vec<Vec<f64>>) -> AlignedTable {
        AlignedTable {
            distances: distance_axis(),
            columns: columns
                .into_iter()
                .enumerate()
                .map(|(i, values)| SiteColumn {
                    name: format!("site{}", i),
                    strand: Strand::Forward,
                    values,
                })
                .collect(),
        }
    }

    #[rstest]
    fn test_flat_profile_normalizes_to_one() {
        let table = table_of(vec![vec![1.0; WINDOW_BINS], vec![1.0; WINDOW_BINS]]);
        let dist = normalize("a.sgr", &table, EmptyAggregatePolicy::Error).unwrap();

        assert_eq!(dist.total_reads, 482.0);
        assert_eq!(dist.normalization_factor, 2.0);
        assert!(dist.values.iter().all(|v| (v - 1.0).abs() < 1e-12));
        assert_eq!(dist.distances, distance_axis());
    }

    #[rstest]
    #[case(0.5)]
    #[case(3.0)]
    #[case(1000.0)]
    fn test_normalization_is_scale_invariant(#[case] k: f64) {
        let base: Vec<f64> = (0..WINDOW_BINS).map(|i| (i % 7) as f64 + 1.0).collect();
        let other: Vec<f64> = (0..WINDOW_BINS).map(|i| (i % 3) as f64).collect();
        let scale = |v: &[f64]| v.iter().map(|x| x * k).collect::<Vec<f64>>();

        let plain = normalize(
            "a",
            &table_of(vec![base.clone(), other.clone()]),
            EmptyAggregatePolicy::Error,
        )
        .unwrap();
        let scaled = normalize(
            "a",
            &table_of(vec![scale(&base), scale(&other)]),
            EmptyAggregatePolicy::Error,
        )
        .unwrap();

        for (a, b) in plain.values.iter().zip(&scaled.values) {
            assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
    }

    #[rstest]
    fn test_normalized_values_average_to_one() {
        let values: Vec<f64> = (0..WINDOW_BINS).map(|i| i as f64).collect();
        let dist = normalize("a", &table_of(vec![values]), EmptyAggregatePolicy::Error).unwrap();
        let mean = dist.values.iter().sum::<f64>() / WINDOW_BINS as f64;
        assert!((mean - 1.0).abs() < 1e-9);
    }

    #[rstest]
    fn test_zero_total_is_an_error_by_default() {
        let table = table_of(vec![vec![0.0; WINDOW_BINS]]);
        let result = normalize("zero.sgr", &table, EmptyAggregatePolicy::Error);
        assert!(matches!(result, Err(ProfileError::EmptyAggregate(label)) if label == "zero.sgr"));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn test_non_finite_total_is_an_error(#[case] bad: f64) {
        let mut values = vec![1.0; WINDOW_BINS];
        values[HALF_WIDTH] = bad;
        let result = normalize("bad.sgr", &table_of(vec![values]), EmptyAggregatePolicy::Zeros);
        assert!(matches!(
            result,
            Err(ProfileError::NonFiniteAggregate { file, .. }) if file == "bad.sgr"
        ));
    }

    #[rstest]
    fn test_finite_values_overflowing_the_total() {
        let values = vec![f64::MAX; WINDOW_BINS];
        let result = normalize("big.sgr", &table_of(vec![values]), EmptyAggregatePolicy::Error);
        assert!(matches!(result, Err(ProfileError::NonFiniteAggregate { .. })));
    }

    #[rstest]
    fn test_no_columns_with_zero_policy() {
        let table = table_of(Vec::new());
        let dist = normalize("none.sgr", &table, EmptyAggregatePolicy::Zeros).unwrap();
        assert_eq!(dist.values, vec![0.0; WINDOW_BINS]);
        assert_eq!(dist.total_reads, 0.0);
        assert!(dist.values.iter().all(|v| !v.is_nan()));
    }
}
