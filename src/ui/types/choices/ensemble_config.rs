use crate::classifiers::ensemble::{DEFAULT_ENSEMBLE_SIZE, DEFAULT_SEED};
use crate::ui::types::choices::{LearnerChoice, VotingChoice, WeightingChoice};
use anyhow::{Context, Result, bail};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ENSEMBLE_NAME: &str = "ens-mstc";

fn default_name() -> String {
    DEFAULT_ENSEMBLE_NAME.to_string()
}

fn default_ensemble_size() -> usize {
    DEFAULT_ENSEMBLE_SIZE
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Everything needed to build an ensemble, loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EnsembleConfig {
    #[serde(default = "default_name")]
    #[schemars(title = "Name", default = "default_name")]
    pub name: String,

    #[serde(default = "default_ensemble_size")]
    #[schemars(
        title = "Ensemble Size",
        description = "Number of members to build",
        range(min = 1),
        default = "default_ensemble_size"
    )]
    pub ensemble_size: usize,

    #[serde(default)]
    #[schemars(title = "Weighting", description = "How member weights are derived")]
    pub weighting: WeightingChoice,

    #[serde(default)]
    #[schemars(title = "Voting", description = "How member distributions are combined")]
    pub voting: VotingChoice,

    #[serde(default)]
    #[schemars(title = "Learner", description = "Base classifier for every member")]
    pub learner: LearnerChoice,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed", default = "default_seed")]
    pub seed: u64,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            ensemble_size: DEFAULT_ENSEMBLE_SIZE,
            weighting: WeightingChoice::default(),
            voting: VotingChoice::default(),
            learner: LearnerChoice::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl EnsembleConfig {
    pub fn schema() -> Schema {
        schema_for!(EnsembleConfig)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("malformed ensemble config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.ensemble_size == 0 {
            bail!("ensemble_size must be at least 1");
        }
        if let WeightingChoice::ExponentialTrainAccuracy(p) = &self.weighting
            && (!p.power.is_finite() || p.power < 0.0)
        {
            bail!("weighting power must be finite and non-negative, got {}", p.power);
        }
        let LearnerChoice::RandomCentroid(p) = &self.learner;
        if !(p.sample_fraction > 0.0 && p.sample_fraction <= 1.0) {
            bail!(
                "sample_fraction must be in (0, 1], got {}",
                p.sample_fraction
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{ExponentParams, NoParams};
    use serde_json::{Value, json};
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let c = EnsembleConfig::from_json_str("{}").unwrap();
        assert_eq!(c, EnsembleConfig::default());
        assert_eq!(c.ensemble_size, 100);
        assert_eq!(c.seed, 42);
        assert_eq!(c.name, "ens-mstc");
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = EnsembleConfig::from_json_str(r#"{"ensemble_size": 0}"#).unwrap_err();
        assert!(err.to_string().contains("ensemble_size"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(EnsembleConfig::from_json_str(r#"{"members": 3}"#).is_err());
    }

    #[test]
    fn negative_power_is_rejected() {
        let mut c = EnsembleConfig::default();
        c.weighting = WeightingChoice::ExponentialTrainAccuracy(ExponentParams { power: -1.0 });
        assert!(c.validate().is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!({
                "name": "small",
                "ensemble_size": 3,
                "weighting": { "type": "train-accuracy", "params": {} },
                "voting": { "type": "majority-vote", "params": {} },
                "seed": 7
            })
        )
        .unwrap();

        let c = EnsembleConfig::from_path(file.path()).unwrap();
        assert_eq!(c.name, "small");
        assert_eq!(c.ensemble_size, 3);
        assert_eq!(c.weighting, WeightingChoice::TrainAccuracy(NoParams {}));
        assert_eq!(c.voting, VotingChoice::MajorityVote(NoParams {}));
        assert_eq!(c.learner, LearnerChoice::default());
        assert_eq!(c.seed, 7);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = EnsembleConfig::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }

    #[test]
    fn schema_declares_size_minimum() {
        let v = serde_json::to_value(EnsembleConfig::schema()).unwrap();
        let size = &v["properties"]["ensemble_size"];
        assert_eq!(size.get("minimum").and_then(Value::as_u64), Some(1));
        assert_eq!(size.get("default").and_then(Value::as_u64), Some(100));
    }
}
