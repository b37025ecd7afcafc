use crate::classifiers::ensemble::EnsembleError;
use std::fmt::Debug;

/// Assigns every ensemble member a non-negative trust weight.
pub trait WeightingScheme: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// `train_estimates[i]` is member `i`'s estimate, if it produced one.
    fn member_weights(&self, train_estimates: &[Option<f64>]) -> Result<Vec<f64>, EnsembleError>;
}

pub(crate) fn require_estimate(
    scheme: &'static str,
    member: usize,
    estimate: Option<f64>,
) -> Result<f64, EnsembleError> {
    estimate.ok_or(EnsembleError::MissingPerformanceEstimate { member, scheme })
}
