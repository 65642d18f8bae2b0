//! Column-wise assembly of per-file distributions into one output table.

use serde::Serialize;

use crate::aggregate::distance_axis;
use crate::errors::{ProfileError, ProfileResult};
use crate::normalize::NormalizedDistribution;

/// One normalized value column per input file, on the shared distance axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedOutput {
    pub distances: Vec<i64>,
    /// `(file label, values)` in input order.
    pub columns: Vec<(String, Vec<f64>)>,
}

impl CombinedOutput {
    pub fn n_rows(&self) -> usize {
        self.distances.len()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn column(&self, label: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, values)| values.as_slice())
    }
}

///
/// Assemble per-file distributions column by column. Every distribution is
/// built on the same axis, so this is not a general join: a series on any
/// other axis is rejected with [ProfileError::AxisMismatch].
///
pub fn combine<I>(per_file: I) -> ProfileResult<CombinedOutput>
where
    I: IntoIterator<Item = NormalizedDistribution>,
{
    let distances = distance_axis();

    let mut columns = Vec::new();
    for dist in per_file {
        if dist.distances != distances || dist.values.len() != distances.len() {
            return Err(ProfileError::AxisMismatch(dist.label));
        }
        columns.push((dist.label, dist.values));
    }

    Ok(CombinedOutput { distances, columns })
}
