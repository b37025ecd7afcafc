use crate::classifiers::{Classifier, ClassifierError};
use crate::core::instances::{TimeSeriesInstance, TimeSeriesInstances};

#[derive(Default)]
pub struct ClassifierNoneVotes;

impl Classifier for ClassifierNoneVotes {
    fn build_classifier(&mut self, _data: &TimeSeriesInstances) -> Result<(), ClassifierError> {
        Ok(())
    }

    fn distribution_for_instance(
        &self,
        _instance: &TimeSeriesInstance,
    ) -> Result<Vec<f64>, ClassifierError> {
        Ok(Vec::new())
    }
}
