use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueHint};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::ui::types::choices::{Choice, EnsembleConfig, VotingChoice, WeightingChoice};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Weighted label distributions and ensemble voting for time-series classifiers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarise weighted labels: counts, distribution, weight sum and impurity
    Distribution(DistributionArgs),
    /// Combine member distributions from a JSON file into one prediction
    Combine(CombineArgs),
    /// Train an ensemble on one dataset and score it on another
    Evaluate(EvaluateArgs),
    /// Print the config schema, the params of one choice, or every choice
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
pub struct DistributionArgs {
    /// Observed labels, in order
    #[arg(required = true, value_name = "LABEL")]
    pub labels: Vec<String>,

    /// One weight per label, comma separated
    #[arg(long, value_delimiter = ',', value_name = "W", conflicts_with = "weight")]
    pub weights: Vec<f64>,

    /// A single weight applied to every label
    #[arg(long, value_name = "W")]
    pub weight: Option<f64>,

    /// Full label universe, comma separated (defaults to the observed labels)
    #[arg(long, value_delimiter = ',', value_name = "LABEL")]
    pub label_set: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CombineArgs {
    /// JSON file: {"class_labels": [...], "members": [{"distribution": [...], "train_estimate": 0.9}]}
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Weighting scheme (e.g. equal, train-accuracy, ExponentialTrainAccuracy)
    #[arg(long, default_value = "equal", value_name = "WEIGHTING")]
    pub weighting: String,

    /// Override weighting parameters (key=value, nested keys with dots)
    #[arg(long = "weighting-param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub weighting_params: Vec<KeyValue>,

    /// Voting scheme (e.g. majority-confidence, majority-vote)
    #[arg(long, default_value = "majority-confidence", value_name = "VOTING")]
    pub voting: String,
}

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Ensemble config JSON (defaults apply to anything omitted)
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Training dataset JSON
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub train: PathBuf,

    /// Test dataset JSON
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub test: PathBuf,

    /// Number of members
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub ensemble_size: Option<u64>,

    /// PRNG seed for member seeds
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    #[arg(long, value_name = "WEIGHTING")]
    pub weighting: Option<String>,

    #[arg(long = "weighting-param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub weighting_params: Vec<KeyValue>,

    #[arg(long, value_name = "VOTING")]
    pub voting: Option<String>,

    #[arg(long, value_name = "LEARNER")]
    pub learner: Option<String>,

    #[arg(long = "learner-param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub learner_params: Vec<KeyValue>,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// List every weighting, voting and learner kind
    #[arg(long, conflicts_with_all = ["weighting", "voting", "learner"])]
    pub list: bool,

    /// Show the params of one weighting kind
    #[arg(long, value_name = "WEIGHTING", conflicts_with_all = ["voting", "learner"])]
    pub weighting: Option<String>,

    /// Show the params of one voting kind
    #[arg(long, value_name = "VOTING", conflicts_with = "learner")]
    pub voting: Option<String>,

    /// Show the params of one learner kind
    #[arg(long, value_name = "LEARNER")]
    pub learner: Option<String>,
}

#[derive(Clone, Debug)]
pub struct KeyValue {
    key: String,
    value: Value,
}

impl CombineArgs {
    pub fn schemes(&self) -> Result<(WeightingChoice, VotingChoice)> {
        let weighting = build_choice::<WeightingChoice>(&self.weighting, &self.weighting_params)
            .with_context(|| format!("invalid weighting '{}'", self.weighting))?;
        let voting = build_choice::<VotingChoice>(&self.voting, &[])
            .with_context(|| format!("invalid voting '{}'", self.voting))?;
        Ok((weighting, voting))
    }
}

impl EvaluateArgs {
    /// Loads `--config` (or defaults) and applies every command-line override.
    pub fn to_config(&self) -> Result<EnsembleConfig> {
        let mut config = match &self.config {
            Some(path) => EnsembleConfig::from_path(path)?,
            None => EnsembleConfig::default(),
        };

        if let Some(size) = self.ensemble_size {
            config.ensemble_size = usize::try_from(size).context("ensemble size too large")?;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.weighting = override_choice(
            config.weighting,
            self.weighting.as_deref(),
            &self.weighting_params,
        )
        .context("invalid weighting")?;
        config.voting = override_choice(config.voting, self.voting.as_deref(), &[])
            .context("invalid voting")?;
        config.learner =
            override_choice(config.learner, self.learner.as_deref(), &self.learner_params)
                .context("invalid learner")?;

        config.validate()?;
        Ok(config)
    }
}

/// Either rebuilds the choice from `kind` or patches the params of `current`.
fn override_choice<C>(current: C, kind: Option<&str>, overrides: &[KeyValue]) -> Result<C>
where
    C: Choice + Serialize,
    C::Kind: FromStr,
    <C::Kind as FromStr>::Err: std::fmt::Display,
{
    if let Some(kind) = kind {
        return build_choice::<C>(kind, overrides)
            .with_context(|| format!("could not build '{kind}'"));
    }
    if overrides.is_empty() {
        return Ok(current);
    }
    let mut value = serde_json::to_value(&current)?;
    let params = value
        .as_object_mut()
        .context("tagged choice is not an object")?
        .entry("params")
        .or_insert(Value::Null);
    apply_overrides(params, overrides)?;
    Ok(serde_json::from_value(value)?)
}

pub fn build_choice<C>(kind_input: &str, overrides: &[KeyValue]) -> Result<C>
where
    C: Choice,
    C::Kind: FromStr,
    <C::Kind as FromStr>::Err: std::fmt::Display,
{
    let kind = parse_kind::<C::Kind>(kind_input)?;
    let mut params = C::default_params(kind);
    apply_overrides(&mut params, overrides)?;
    C::from_parts(kind, params)
}

/// Accepts `train-accuracy`, `TrainAccuracy`, `train_accuracy` and friends.
pub fn parse_kind<T>(raw: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    candidate_spellings(raw)
        .iter()
        .find_map(|cand| cand.parse::<T>().ok())
        .ok_or_else(|| anyhow!("could not parse value '{raw}'"))
}

fn candidate_spellings(input: &str) -> Vec<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut out = vec![
        trimmed.to_string(),
        trimmed.to_lowercase(),
        kebab_from_token(trimmed),
        trimmed.replace('_', "-").to_lowercase(),
    ];
    out.sort();
    out.dedup();
    out
}

fn kebab_from_token(token: &str) -> String {
    let mut buf = String::new();
    let mut prev_lower = false;
    for ch in token.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                buf.push('-');
            }
            buf.extend(ch.to_lowercase());
            prev_lower = false;
        } else if ch == '_' || ch == ' ' {
            buf.push('-');
            prev_lower = false;
        } else {
            buf.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    buf
}

fn apply_overrides(target: &mut Value, overrides: &[KeyValue]) -> Result<()> {
    for kv in overrides {
        set_path(target, &kv.key, kv.value.clone())
            .with_context(|| format!("failed to set '{}'", kv.key))?;
    }
    Ok(())
}

fn set_path(target: &mut Value, path: &str, new_value: Value) -> Result<()> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        bail!("empty key is not allowed");
    };

    let mut current = target;
    for seg in parents {
        current = object_mut(current)?
            .entry((*seg).to_string())
            .or_insert(Value::Null);
    }
    object_mut(current)?.insert((*last).to_string(), new_value);
    Ok(())
}

fn object_mut(value: &mut Value) -> Result<&mut Map<String, Value>> {
    if value.is_null() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("cannot set nested field on non-object value: {other:?}"),
    }
}

fn parse_key_value(raw: &str) -> Result<KeyValue, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| "expected KEY=VALUE".to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("key cannot be empty".to_string());
    }

    Ok(KeyValue {
        key: key.to_string(),
        value: parse_literal(value.trim()),
    })
}

/// JSON if it parses, otherwise the raw text as a string.
fn parse_literal(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{ExponentParams, LearnerChoice, NoParams, WeightingKind};
    use serde_json::json;

    fn kv(raw: &str) -> KeyValue {
        parse_key_value(raw).unwrap()
    }

    #[test]
    fn kind_accepts_several_spellings() {
        for raw in [
            "exponential-train-accuracy",
            "ExponentialTrainAccuracy",
            "exponential_train_accuracy",
            "  Exponential-Train-Accuracy ",
        ] {
            assert_eq!(
                parse_kind::<WeightingKind>(raw).unwrap(),
                WeightingKind::ExponentialTrainAccuracy,
                "{raw}"
            );
        }
        assert!(parse_kind::<WeightingKind>("").is_err());
        assert!(parse_kind::<WeightingKind>("best").is_err());
    }

    #[test]
    fn key_value_parses_json_or_falls_back_to_string() {
        assert_eq!(kv("power=2.5").value, json!(2.5));
        assert_eq!(kv("name = fast").value, json!("fast"));
        assert_eq!(kv("flag=").value, json!(""));
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=3").is_err());
    }

    #[test]
    fn set_path_creates_nested_objects() {
        let mut v = json!({});
        set_path(&mut v, "a.b.c", json!(1)).unwrap();
        assert_eq!(v, json!({ "a": { "b": { "c": 1 } } }));

        let mut scalar = json!({ "a": 3 });
        assert!(set_path(&mut scalar, "a.b", json!(1)).is_err());
        assert!(set_path(&mut scalar, "..", json!(1)).is_err());
    }

    #[test]
    fn build_choice_applies_overrides() {
        let c = build_choice::<WeightingChoice>("ExponentialTrainAccuracy", &[kv("power=3")])
            .unwrap();
        assert_eq!(
            c,
            WeightingChoice::ExponentialTrainAccuracy(ExponentParams { power: 3.0 })
        );
    }

    #[test]
    fn override_choice_patches_current_params() {
        let current = WeightingChoice::ExponentialTrainAccuracy(ExponentParams::default());
        let c = override_choice(current, None, &[kv("power=1.5")]).unwrap();
        assert_eq!(
            c,
            WeightingChoice::ExponentialTrainAccuracy(ExponentParams { power: 1.5 })
        );

        let kept = override_choice(VotingChoice::default(), None, &[]).unwrap();
        assert_eq!(kept, VotingChoice::default());

        let replaced = override_choice(LearnerChoice::default(), Some("random_centroid"), &[
            kv("sample_fraction=0.25"),
        ])
        .unwrap();
        let LearnerChoice::RandomCentroid(p) = replaced;
        assert_eq!(p.sample_fraction, 0.25);
    }

    #[test]
    fn cli_parses_distribution_command() {
        let cli = Cli::try_parse_from([
            "tsens",
            "distribution",
            "a",
            "b",
            "a",
            "--weights",
            "1,2,3",
            "--label-set",
            "a,b,c",
        ])
        .unwrap();
        let Command::Distribution(args) = cli.command else {
            panic!("expected distribution command");
        };
        assert_eq!(args.labels, vec!["a", "b", "a"]);
        assert_eq!(args.weights, vec![1.0, 2.0, 3.0]);
        assert_eq!(args.label_set, vec!["a", "b", "c"]);
    }

    #[test]
    fn cli_rejects_both_weight_forms() {
        let err = Cli::try_parse_from([
            "tsens",
            "distribution",
            "a",
            "--weights",
            "1",
            "--weight",
            "2",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn combine_defaults_to_equal_confidence() {
        let cli = Cli::try_parse_from(["tsens", "combine", "--input", "m.json"]).unwrap();
        let Command::Combine(args) = cli.command else {
            panic!("expected combine command");
        };
        let (w, v) = args.schemes().unwrap();
        assert_eq!(w, WeightingChoice::Equal(NoParams {}));
        assert_eq!(v, VotingChoice::MajorityConfidence(NoParams {}));
    }

    #[test]
    fn evaluate_overrides_land_in_config() {
        let cli = Cli::try_parse_from([
            "tsens",
            "evaluate",
            "--train",
            "train.json",
            "--test",
            "test.json",
            "--ensemble-size",
            "5",
            "--weighting",
            "train-accuracy",
            "--voting",
            "MajorityVote",
        ])
        .unwrap();
        let Command::Evaluate(args) = cli.command else {
            panic!("expected evaluate command");
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.ensemble_size, 5);
        assert_eq!(config.seed, 42);
        assert_eq!(config.weighting, WeightingChoice::TrainAccuracy(NoParams {}));
        assert_eq!(config.voting, VotingChoice::MajorityVote(NoParams {}));
    }

    #[test]
    fn evaluate_rejects_zero_members() {
        assert!(
            Cli::try_parse_from([
                "tsens",
                "evaluate",
                "--train",
                "a",
                "--test",
                "b",
                "--ensemble-size",
                "0",
            ])
            .is_err()
        );
    }
}
