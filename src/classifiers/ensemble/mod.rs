mod ensemble;
mod error;
mod factory;
mod prediction;
pub mod voting;
pub mod weighting;

pub use ensemble::{DEFAULT_ENSEMBLE_SIZE, DEFAULT_SEED, Ensemble, EnsembleState};
pub use error::EnsembleError;
pub use factory::ClassifierFactory;
pub use prediction::{MemberOutput, MemberReport, Prediction, TrainReport, combine_member_outputs};
