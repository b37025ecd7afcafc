use crate::ui::types::choices::{Choice, NoParams};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

pub const DEFAULT_POWER: f64 = 4.0;

fn default_power() -> f64 {
    DEFAULT_POWER
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExponentParams {
    #[serde(default = "default_power")]
    #[schemars(
        title = "Power",
        description = "Exponent applied to each member's train accuracy",
        range(min = 0.0),
        default = "default_power"
    )]
    pub power: f64,
}

impl Default for ExponentParams {
    fn default() -> Self {
        Self {
            power: DEFAULT_POWER,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(WeightingKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum WeightingChoice {
    #[strum_discriminants(strum(
        message = "Every member weighs one",
        detailed_message = "Each member's vote counts the same."
    ))]
    Equal(NoParams),

    #[strum_discriminants(strum(
        message = "Weight by train accuracy",
        detailed_message = "Each member weighs its own train-set accuracy estimate."
    ))]
    TrainAccuracy(NoParams),

    #[strum_discriminants(strum(
        message = "Weight by train accuracy raised to a power",
        detailed_message = "Sharpens the gap between strong and weak members."
    ))]
    ExponentialTrainAccuracy(ExponentParams),
}

impl Default for WeightingChoice {
    fn default() -> Self {
        WeightingChoice::Equal(NoParams {})
    }
}

impl Choice for WeightingChoice {
    type Kind = WeightingKind;

    fn schema() -> Schema {
        schema_for!(WeightingChoice)
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            WeightingKind::Equal | WeightingKind::TrainAccuracy => json!({}),
            WeightingKind::ExponentialTrainAccuracy => json!({ "power": DEFAULT_POWER }),
        }
    }
}
