use crate::classifiers::ensemble::EnsembleError;
use crate::classifiers::ensemble::voting::VotingScheme;
use crate::classifiers::ensemble::weighting::WeightingScheme;
use crate::utils::math::argmax;
use serde::{Deserialize, Serialize};

/// Final ensemble output. `label` is the index of the largest entry of
/// `distribution`; equal entries resolve to the lowest index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub distribution: Vec<f64>,
    pub label: usize,
}

impl Prediction {
    pub fn from_distribution(distribution: Vec<f64>) -> Result<Self, EnsembleError> {
        let label = argmax(&distribution).ok_or(EnsembleError::EmptyLabelUniverse)?;
        Ok(Self {
            distribution,
            label,
        })
    }
}

/// What one member reported for a query, plus its train estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberOutput {
    pub distribution: Vec<f64>,
    #[serde(default)]
    pub train_estimate: Option<f64>,
}

/// Weighs and votes already-collected member outputs.
pub fn combine_member_outputs(
    weighting: &dyn WeightingScheme,
    voting: &dyn VotingScheme,
    outputs: &[MemberOutput],
) -> Result<Prediction, EnsembleError> {
    let estimates: Vec<Option<f64>> = outputs.iter().map(|o| o.train_estimate).collect();
    let weights = weighting.member_weights(&estimates)?;
    let distributions: Vec<Vec<f64>> = outputs.iter().map(|o| o.distribution.clone()).collect();
    Prediction::from_distribution(voting.combine(&weights, &distributions)?)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberReport {
    pub member: usize,
    pub seed: u64,
    pub cpu_seconds: f64,
    pub train_estimate: Option<f64>,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainReport {
    pub num_classes: usize,
    pub members: Vec<MemberReport>,
}

impl TrainReport {
    pub fn total_cpu_seconds(&self) -> f64 {
        self.members.iter().map(|m| m.cpu_seconds).sum()
    }
}
