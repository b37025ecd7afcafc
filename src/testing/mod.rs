mod dummies;
mod spies;
mod stubs;

pub use dummies::classifier_none_votes::ClassifierNoneVotes;
pub use spies::train_spy_classifier::{TrainSpyClassifier, TrainSpyHandle};
pub use stubs::fixed_distribution_classifier::FixedDistributionClassifier;
