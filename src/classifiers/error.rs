use crate::core::labels::LabelError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("training data has no labeled instances")]
    EmptyTrainingData,

    #[error("classifier has not been trained")]
    NotTrained,

    #[error("series has {found} values, expected {expected}")]
    SeriesLengthMismatch { expected: usize, found: usize },

    #[error(transparent)]
    Label(#[from] LabelError),
}
