use crate::classifiers::centroid::DEFAULT_SAMPLE_FRACTION;
use crate::ui::types::choices::Choice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_sample_fraction() -> f64 {
    DEFAULT_SAMPLE_FRACTION
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RandomCentroidParams {
    #[serde(default = "default_sample_fraction")]
    #[schemars(
        title = "Sample Fraction",
        description = "Share of time points each member looks at (0.0-1.0]",
        range(min = 0.0, max = 1.0),
        default = "default_sample_fraction"
    )]
    pub sample_fraction: f64,
}

impl Default for RandomCentroidParams {
    fn default() -> Self {
        Self {
            sample_fraction: DEFAULT_SAMPLE_FRACTION,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(LearnerKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum LearnerChoice {
    #[strum_discriminants(strum(
        message = "Random-subspace nearest centroid",
        detailed_message = "Nearest class centroid over a seeded random subset of time points."
    ))]
    RandomCentroid(RandomCentroidParams),
}

impl Default for LearnerChoice {
    fn default() -> Self {
        LearnerChoice::RandomCentroid(RandomCentroidParams::default())
    }
}

impl Choice for LearnerChoice {
    type Kind = LearnerKind;

    fn schema() -> Schema {
        schema_for!(LearnerChoice)
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            LearnerKind::RandomCentroid => serde_json::json!({
                "sample_fraction": DEFAULT_SAMPLE_FRACTION
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_params_deserialize_to_default_choice() {
        let c = LearnerChoice::from_parts(
            LearnerKind::RandomCentroid,
            LearnerChoice::default_params(LearnerKind::RandomCentroid),
        )
        .unwrap();
        assert_eq!(c, LearnerChoice::default());
    }

    #[test]
    fn schema_carries_fraction_range() {
        let v = serde_json::to_value(schema_for!(RandomCentroidParams)).unwrap();
        let field = &v["properties"]["sample_fraction"];
        assert_eq!(field["minimum"], json!(0.0));
        assert_eq!(field["maximum"], json!(1.0));
    }
}
