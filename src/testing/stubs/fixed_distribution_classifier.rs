use crate::classifiers::{Classifier, ClassifierError};
use crate::core::instances::{TimeSeriesInstance, TimeSeriesInstances};

/// Answers the same distribution for every instance.
#[derive(Debug, Clone, Default)]
pub struct FixedDistributionClassifier {
    distribution: Vec<f64>,
    train_estimate: Option<f64>,
    fail_training: bool,
}

impl FixedDistributionClassifier {
    pub fn new(distribution: Vec<f64>) -> Self {
        Self {
            distribution,
            train_estimate: None,
            fail_training: false,
        }
    }

    /// Refuses every training set.
    pub fn failing() -> Self {
        Self {
            fail_training: true,
            ..Self::default()
        }
    }

    pub fn with_train_estimate(mut self, estimate: f64) -> Self {
        self.train_estimate = Some(estimate);
        self
    }
}

impl Classifier for FixedDistributionClassifier {
    fn build_classifier(&mut self, _data: &TimeSeriesInstances) -> Result<(), ClassifierError> {
        if self.fail_training {
            return Err(ClassifierError::EmptyTrainingData);
        }
        Ok(())
    }

    fn distribution_for_instance(
        &self,
        _instance: &TimeSeriesInstance,
    ) -> Result<Vec<f64>, ClassifierError> {
        Ok(self.distribution.clone())
    }

    fn train_estimate(&self) -> Option<f64> {
        self.train_estimate
    }
}
