use crate::ui::types::choices::{Choice, NoParams};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(VotingKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum VotingChoice {
    #[strum_discriminants(strum(
        message = "Weighted sum of member distributions",
        detailed_message = "Adds each member's class probabilities scaled by its weight."
    ))]
    MajorityConfidence(NoParams),

    #[strum_discriminants(strum(
        message = "Weighted count of member predictions",
        detailed_message = "Each member casts its whole weight for its most likely class."
    ))]
    MajorityVote(NoParams),
}

impl Default for VotingChoice {
    fn default() -> Self {
        VotingChoice::MajorityConfidence(NoParams {})
    }
}

impl Choice for VotingChoice {
    type Kind = VotingKind;

    fn schema() -> Schema {
        schema_for!(VotingChoice)
    }

    fn default_params(_kind: Self::Kind) -> Value {
        json!({})
    }
}
