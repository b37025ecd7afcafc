mod equal_weighting;
mod train_accuracy_weighting;
mod weighting_scheme;

pub use equal_weighting::EqualWeighting;
pub use train_accuracy_weighting::TrainAccuracyWeighting;
pub use weighting_scheme::WeightingScheme;
pub(crate) use weighting_scheme::require_estimate;
