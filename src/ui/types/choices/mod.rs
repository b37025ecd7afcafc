mod ensemble_config;
mod learner_choice;
pub mod schema;
mod voting_choice;
mod weighting_choice;

pub use ensemble_config::{DEFAULT_ENSEMBLE_NAME, EnsembleConfig};
pub use learner_choice::{LearnerChoice, LearnerKind, RandomCentroidParams};
pub use voting_choice::{VotingChoice, VotingKind};
pub use weighting_choice::{ExponentParams, WeightingChoice, WeightingKind};

use anyhow::{Context, Result};
use schemars::{JsonSchema, Schema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::{EnumMessage, IntoEnumIterator};

/// Parameters of a variant that takes none. Serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NoParams {}

/// A tagged `{"type": kind, "params": {...}}` configuration choice.
pub trait Choice: Sized + DeserializeOwned {
    type Kind: Copy + Into<&'static str> + IntoEnumIterator + EnumMessage;

    fn schema() -> Schema;

    fn default_params(kind: Self::Kind) -> Value;

    fn from_parts(kind: Self::Kind, params: Value) -> Result<Self> {
        let tag: &'static str = kind.into();
        serde_json::from_value(json!({ "type": tag, "params": params }))
            .with_context(|| format!("invalid params for '{tag}'"))
    }

    /// Every kind with its one-line description, in declaration order.
    fn catalogue() -> Vec<(&'static str, &'static str)> {
        Self::Kind::iter()
            .map(|k| (k.into(), k.get_message().unwrap_or("")))
            .collect()
    }
}
