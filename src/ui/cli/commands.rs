use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::str::FromStr;
use tracing::{debug, info};

use crate::classifiers::ensemble::{MemberOutput, Prediction, TrainReport, combine_member_outputs};
use crate::classifiers::split_criteria::GiniSplitCriterion;
use crate::core::labels::{WeightedLabelDistribution, Weights};
use crate::ui::cli::args::{CombineArgs, DistributionArgs, EvaluateArgs, SchemaArgs, parse_kind};
use crate::ui::types::build::{build_ensemble, build_voting_scheme, build_weighting_scheme};
use crate::ui::types::choices::schema::param_specs;
use crate::ui::types::choices::{
    Choice, EnsembleConfig, LearnerChoice, VotingChoice, WeightingChoice,
};
use crate::ui::types::dataset::DatasetFile;
use crate::utils::math::{argmax, entropy};

#[derive(Debug, Clone, Serialize)]
pub struct DistributionSummary {
    pub label_set: Vec<String>,
    pub counts: Vec<f64>,
    pub distribution: Vec<f64>,
    pub weight_sum: f64,
    pub gini: f64,
    pub entropy_bits: f64,
    pub most_likely: Option<String>,
}

pub fn summarise_distribution(args: &DistributionArgs) -> Result<DistributionSummary> {
    let weights = match (args.weight, args.weights.is_empty()) {
        (Some(w), _) => Weights::Repeat(w),
        (None, true) => Weights::default(),
        (None, false) => Weights::Explicit(args.weights.clone()),
    };

    let mut dist = WeightedLabelDistribution::new();
    if !args.label_set.is_empty() {
        dist.set_label_set(args.label_set.clone())?;
    }
    dist.set_observations(args.labels.clone(), weights)?;

    let counts = dist.counts()?.to_vec();
    let weight_sum = dist.weight_sum();
    let distribution = dist.distribution()?.to_vec();
    let most_likely = argmax(&distribution)
        .filter(|_| weight_sum > 0.0)
        .map(|i| dist.label_set()[i].clone());

    Ok(DistributionSummary {
        label_set: dist.label_set().to_vec(),
        gini: GiniSplitCriterion::new().compute_gini(&counts, weight_sum),
        entropy_bits: entropy(&counts, weight_sum),
        counts,
        distribution,
        weight_sum,
        most_likely,
    })
}

/// Input of `combine`: member outputs for a single query.
#[derive(Debug, Clone, Deserialize)]
pub struct CombineInput {
    #[serde(default)]
    pub class_labels: Vec<String>,
    pub members: Vec<MemberOutput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CombineOutput {
    pub weighting: &'static str,
    pub voting: &'static str,
    #[serde(flatten)]
    pub prediction: Prediction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_name: Option<String>,
}

pub fn combine_from_file(args: &CombineArgs) -> Result<CombineOutput> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let input: CombineInput = serde_json::from_str(&raw)
        .with_context(|| format!("malformed member outputs in {}", args.input.display()))?;
    combine(args, input)
}

pub fn combine(args: &CombineArgs, input: CombineInput) -> Result<CombineOutput> {
    let (weighting, voting) = args.schemes()?;
    let weighting = build_weighting_scheme(weighting)?;
    let voting = build_voting_scheme(voting);
    debug!(members = input.members.len(), "combining member outputs");

    let prediction = combine_member_outputs(weighting.as_ref(), voting.as_ref(), &input.members)?;
    if !input.class_labels.is_empty() && input.class_labels.len() != prediction.distribution.len()
    {
        bail!(
            "{} class labels given but members report {} classes",
            input.class_labels.len(),
            prediction.distribution.len()
        );
    }
    let label_name = input.class_labels.get(prediction.label).cloned();

    Ok(CombineOutput {
        weighting: weighting.name(),
        voting: voting.name(),
        prediction,
        label_name,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub config: EnsembleConfig,
    pub train: TrainReport,
    pub total_cpu_seconds: f64,
    pub test_instances: usize,
    /// Weighted accuracy over the labeled test instances.
    pub accuracy: Option<f64>,
    pub predictions: Vec<String>,
}

pub fn evaluate(args: &EvaluateArgs) -> Result<EvaluationReport> {
    let config = args.to_config()?;
    let train = DatasetFile::from_path(&args.train)?.into_instances()?;
    let test = DatasetFile::from_path(&args.test)?.into_instances()?;
    if train.class_labels() != test.class_labels() {
        bail!("train and test datasets declare different class labels");
    }

    let mut ensemble = build_ensemble(config.clone())?;
    let report = ensemble.train(&train).context("training failed")?.clone();

    let mut correct = 0.0;
    let mut labeled_weight = 0.0;
    let mut predictions = Vec::with_capacity(test.len());
    for (i, instance) in test.iter().enumerate() {
        let prediction = ensemble
            .predict(instance)
            .with_context(|| format!("prediction failed for test instance {i}"))?;
        if let Some(truth) = instance.class_value() {
            labeled_weight += instance.weight();
            if truth == prediction.label {
                correct += instance.weight();
            }
        }
        predictions.push(
            ensemble
                .class_label(prediction.label)
                .unwrap_or_default()
                .to_string(),
        );
    }
    let accuracy = (labeled_weight > 0.0).then(|| correct / labeled_weight);
    info!(
        ensemble = %config.name,
        test_instances = test.len(),
        accuracy = ?accuracy,
        "evaluation finished"
    );

    Ok(EvaluationReport {
        total_cpu_seconds: report.total_cpu_seconds(),
        config,
        train: report,
        test_instances: test.len(),
        accuracy,
        predictions,
    })
}

pub fn schema(args: &SchemaArgs) -> Result<Value> {
    if args.list {
        return Ok(json!({
            "weighting": catalogue::<WeightingChoice>(),
            "voting": catalogue::<VotingChoice>(),
            "learner": catalogue::<LearnerChoice>(),
        }));
    }
    if let Some(raw) = &args.weighting {
        return params_of::<WeightingChoice>(raw);
    }
    if let Some(raw) = &args.voting {
        return params_of::<VotingChoice>(raw);
    }
    if let Some(raw) = &args.learner {
        return params_of::<LearnerChoice>(raw);
    }
    Ok(serde_json::to_value(EnsembleConfig::schema())?)
}

fn catalogue<C: Choice>() -> Value {
    C::catalogue()
        .into_iter()
        .map(|(name, about)| (name.to_string(), Value::String(about.to_string())))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn params_of<C>(raw: &str) -> Result<Value>
where
    C: Choice,
    C::Kind: FromStr,
    <C::Kind as FromStr>::Err: std::fmt::Display,
{
    let kind: &'static str = parse_kind::<C::Kind>(raw)?.into();
    let specs = param_specs(&C::schema(), kind)?;
    Ok(json!({ "type": kind, "params": specs }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::cli::args::{Cli, Command};
    use clap::Parser;
    use std::io::Write;

    const EPS: f64 = 1e-12;

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("tsens").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn distribution_summary_over_declared_universe() {
        let Command::Distribution(args) =
            parse(&["distribution", "a", "b", "a", "--weights", "1,2,1", "--label-set", "a,b,c"])
        else {
            panic!("expected distribution");
        };
        let s = summarise_distribution(&args).unwrap();
        assert_eq!(s.label_set, vec!["a", "b", "c"]);
        assert_eq!(s.counts, vec![2.0, 2.0, 0.0]);
        assert_eq!(s.distribution, vec![0.5, 0.5, 0.0]);
        assert_eq!(s.weight_sum, 4.0);
        assert!(approx(s.gini, 0.5, EPS));
        assert!(approx(s.entropy_bits, 1.0, EPS));
        assert_eq!(s.most_likely.as_deref(), Some("a"));
    }

    #[test]
    fn zero_weights_have_no_most_likely_label() {
        let Command::Distribution(args) = parse(&["distribution", "x", "y", "--weight", "0"])
        else {
            panic!("expected distribution");
        };
        let s = summarise_distribution(&args).unwrap();
        assert_eq!(s.distribution, vec![0.0, 0.0]);
        assert_eq!(s.most_likely, None);
    }

    #[test]
    fn label_outside_universe_is_reported() {
        let Command::Distribution(args) = parse(&["distribution", "z", "--label-set", "a,b"])
        else {
            panic!("expected distribution");
        };
        let err = summarise_distribution(&args).unwrap_err();
        assert!(err.to_string().contains("\"z\""), "{err}");
    }

    #[test]
    fn combine_reads_members_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!({
                "class_labels": ["cat", "dog"],
                "members": [
                    { "distribution": [0.8, 0.2], "train_estimate": 0.5 },
                    { "distribution": [0.2, 0.8], "train_estimate": 1.0 }
                ]
            })
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let Command::Combine(args) = parse(&[
            "combine",
            "--input",
            path.as_str(),
            "--weighting",
            "train-accuracy",
        ]) else {
            panic!("expected combine");
        };
        let out = combine_from_file(&args).unwrap();
        assert_eq!(out.weighting, "train-accuracy");
        assert_eq!(out.voting, "majority-confidence");
        assert_eq!(out.prediction.label, 1);
        assert!(approx(out.prediction.distribution[0], 0.6 / 1.5, EPS));
        assert_eq!(out.label_name.as_deref(), Some("dog"));
    }

    #[test]
    fn combine_rejects_label_count_mismatch() {
        let Command::Combine(args) = parse(&["combine", "--input", "unused.json"]) else {
            panic!("expected combine");
        };
        let input = CombineInput {
            class_labels: vec!["only".into()],
            members: vec![MemberOutput {
                distribution: vec![0.5, 0.5],
                train_estimate: None,
            }],
        };
        assert!(combine(&args, input).is_err());
    }

    #[test]
    fn schema_lists_and_describes_choices() {
        let Command::Schema(args) = parse(&["schema", "--list"]) else {
            panic!("expected schema");
        };
        let v = schema(&args).unwrap();
        assert!(v["weighting"]["exponential-train-accuracy"].is_string());
        assert!(v["voting"]["majority-vote"].is_string());

        let Command::Schema(args) = parse(&["schema", "--weighting", "ExponentialTrainAccuracy"])
        else {
            panic!("expected schema");
        };
        let v = schema(&args).unwrap();
        assert_eq!(v["type"], json!("exponential-train-accuracy"));
        assert_eq!(v["params"][0]["name"], json!("power"));

        let Command::Schema(args) = parse(&["schema"]) else {
            panic!("expected schema");
        };
        let v = schema(&args).unwrap();
        assert!(v["properties"]["ensemble_size"].is_object());
    }
}
