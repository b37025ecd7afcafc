use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelError {
    #[error("label {label} not in label set {label_set}")]
    LabelNotInUniverse { label: String, label_set: String },

    #[error("{context}: expected {expected} entries, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("label {label} appears more than once in the label set")]
    DuplicateLabel { label: String },

    #[error("weight {weight} at index {index} must be finite and non-negative")]
    InvalidWeight { index: usize, weight: f64 },
}

impl LabelError {
    pub(crate) fn not_in_universe<L: Debug>(label: &L, label_set: &[L]) -> Self {
        LabelError::LabelNotInUniverse {
            label: format!("{label:?}"),
            label_set: format!("{label_set:?}"),
        }
    }

    pub(crate) fn duplicate<L: Debug>(label: &L) -> Self {
        LabelError::DuplicateLabel {
            label: format!("{label:?}"),
        }
    }
}

pub(crate) fn check_weight(index: usize, weight: f64) -> Result<(), LabelError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(LabelError::InvalidWeight { index, weight })
    }
}
