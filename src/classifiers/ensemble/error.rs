use crate::classifiers::ClassifierError;
use crate::classifiers::ensemble::EnsembleState;
use crate::core::labels::LabelError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnsembleError {
    #[error("ensemble size must be at least 1, got {0}")]
    InvalidEnsembleSize(usize),

    #[error("cannot {operation} while the ensemble is {state}")]
    InvalidState {
        operation: &'static str,
        state: EnsembleState,
    },

    #[error("training data declares no classes")]
    EmptyLabelUniverse,

    #[error("member {member} returned {found} class probabilities, expected {expected}")]
    DimensionMismatch {
        member: usize,
        expected: usize,
        found: usize,
    },

    #[error("expected {expected} member weights, found {found}")]
    MemberCountMismatch { expected: usize, found: usize },

    #[error("every ensemble member has zero weight")]
    AllWeightsZero,

    #[error("member {member} has no train estimate, required by {scheme} weighting")]
    MissingPerformanceEstimate { member: usize, scheme: &'static str },

    #[error("member {member} was given weight {weight}; weights must be finite and non-negative")]
    InvalidMemberWeight { member: usize, weight: f64 },

    #[error("member {member} failed to train")]
    MemberTraining {
        member: usize,
        #[source]
        source: ClassifierError,
    },

    #[error("member {member} failed to predict")]
    MemberPrediction {
        member: usize,
        #[source]
        source: ClassifierError,
    },

    #[error(transparent)]
    Label(#[from] LabelError),
}
