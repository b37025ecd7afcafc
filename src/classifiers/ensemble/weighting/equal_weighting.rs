use crate::classifiers::ensemble::EnsembleError;
use crate::classifiers::ensemble::weighting::WeightingScheme;

/// Weight 1 for every member; train estimates are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct EqualWeighting;

impl WeightingScheme for EqualWeighting {
    fn name(&self) -> &'static str {
        "equal"
    }

    fn member_weights(&self, train_estimates: &[Option<f64>]) -> Result<Vec<f64>, EnsembleError> {
        Ok(vec![1.0; train_estimates.len()])
    }
}
