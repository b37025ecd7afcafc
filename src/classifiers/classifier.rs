use crate::classifiers::ClassifierError;
use crate::core::instances::{TimeSeriesInstance, TimeSeriesInstances};

pub trait Classifier: Send + Sync {
    fn build_classifier(&mut self, data: &TimeSeriesInstances) -> Result<(), ClassifierError>;

    /// One entry per class of the training data, in class-index order.
    fn distribution_for_instance(
        &self,
        instance: &TimeSeriesInstance,
    ) -> Result<Vec<f64>, ClassifierError>;

    /// Estimated accuracy on the training data, if the classifier keeps one.
    fn train_estimate(&self) -> Option<f64> {
        None
    }
}
