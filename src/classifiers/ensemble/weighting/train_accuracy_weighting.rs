use crate::classifiers::ensemble::EnsembleError;
use crate::classifiers::ensemble::weighting::{WeightingScheme, require_estimate};

/// Weight = train estimate raised to `power`. A power of 1 weights members by
/// their estimate directly.
#[derive(Debug, Clone, Copy)]
pub struct TrainAccuracyWeighting {
    power: f64,
}

impl TrainAccuracyWeighting {
    pub fn new() -> Self {
        Self { power: 1.0 }
    }

    pub fn with_power(power: f64) -> Self {
        Self { power }
    }

    pub fn power(&self) -> f64 {
        self.power
    }
}

impl Default for TrainAccuracyWeighting {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightingScheme for TrainAccuracyWeighting {
    fn name(&self) -> &'static str {
        if self.power == 1.0 {
            "train-accuracy"
        } else {
            "exponential-train-accuracy"
        }
    }

    fn member_weights(&self, train_estimates: &[Option<f64>]) -> Result<Vec<f64>, EnsembleError> {
        train_estimates
            .iter()
            .enumerate()
            .map(|(member, &estimate)| {
                let acc = require_estimate(self.name(), member, estimate)?;
                Ok(acc.powf(self.power))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn weights_follow_estimates() {
        let w = TrainAccuracyWeighting::new()
            .member_weights(&[Some(0.5), Some(0.75)])
            .unwrap();
        assert_eq!(w, vec![0.5, 0.75]);
    }

    #[test]
    fn exponent_sharpens_weights() {
        let w = TrainAccuracyWeighting::with_power(2.0)
            .member_weights(&[Some(0.5), Some(0.9)])
            .unwrap();
        assert!((w[0] - 0.25).abs() < EPS);
        assert!((w[1] - 0.81).abs() < EPS);
    }

    #[test]
    fn missing_estimate_names_the_member() {
        let err = TrainAccuracyWeighting::new()
            .member_weights(&[Some(0.5), None])
            .unwrap_err();
        assert_eq!(
            err,
            EnsembleError::MissingPerformanceEstimate {
                member: 1,
                scheme: "train-accuracy"
            }
        );
    }
}
