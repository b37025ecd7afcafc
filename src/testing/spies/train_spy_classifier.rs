use crate::classifiers::{Classifier, ClassifierError};
use crate::core::instances::{TimeSeriesInstance, TimeSeriesInstances};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

pub struct TrainSpyHandle(Arc<AtomicU64>);
impl TrainSpyHandle {
    pub fn count(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counts `build_classifier` calls and predicts the uniform distribution over
/// the classes it was trained on.
pub struct TrainSpyClassifier {
    count: Arc<AtomicU64>,
    num_classes: usize,
}

impl TrainSpyClassifier {
    pub fn new() -> (Self, TrainSpyHandle) {
        let counter = Arc::new(AtomicU64::new(0));
        (
            Self {
                count: counter.clone(),
                num_classes: 0,
            },
            TrainSpyHandle(counter),
        )
    }
}

impl Classifier for TrainSpyClassifier {
    fn build_classifier(&mut self, data: &TimeSeriesInstances) -> Result<(), ClassifierError> {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.num_classes = data.number_of_classes();
        Ok(())
    }

    fn distribution_for_instance(
        &self,
        _instance: &TimeSeriesInstance,
    ) -> Result<Vec<f64>, ClassifierError> {
        if self.num_classes == 0 {
            return Err(ClassifierError::NotTrained);
        }
        Ok(vec![1.0 / self.num_classes as f64; self.num_classes])
    }
}
