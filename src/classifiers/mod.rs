pub mod centroid;
pub mod classifier;
pub mod ensemble;
mod error;
pub mod split_criteria;

pub use classifier::Classifier;
pub use error::ClassifierError;
