use crate::classifiers::Classifier;
use crate::classifiers::ensemble::voting::{MajorityConfidence, VotingScheme};
use crate::classifiers::ensemble::weighting::{EqualWeighting, WeightingScheme};
use crate::classifiers::ensemble::{
    ClassifierFactory, EnsembleError, MemberReport, Prediction, TrainReport,
};
use crate::core::instances::{TimeSeriesInstance, TimeSeriesInstances};
use cpu_time::ThreadTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use strum_macros::Display;
use tracing::{debug, info, warn};

#[cfg(feature = "use-rayon")]
use rayon::prelude::*;

pub const DEFAULT_ENSEMBLE_SIZE: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EnsembleState {
    Unconfigured,
    Configured,
    Trained,
}

/// A fixed-size pool of classifiers built by one factory whose outputs are
/// combined by a weighting scheme and a voting scheme.
///
/// Lifecycle: `new` leaves the ensemble unconfigured, `configure` instantiates
/// the members, `train` fits them. `train` configures first when needed.
/// Predictions are only available once trained.
pub struct Ensemble {
    name: String,
    ensemble_size: usize,
    seed: u64,
    factory: Box<dyn ClassifierFactory>,
    weighting_scheme: Box<dyn WeightingScheme>,
    voting_scheme: Box<dyn VotingScheme>,
    members: Vec<Box<dyn Classifier>>,
    member_seeds: Vec<u64>,
    member_weights: Vec<f64>,
    class_labels: Vec<String>,
    train_report: Option<TrainReport>,
    state: EnsembleState,
}

impl Ensemble {
    pub fn new(ensemble_size: usize, factory: Box<dyn ClassifierFactory>) -> Self {
        Self {
            name: "ensemble".to_string(),
            ensemble_size,
            seed: DEFAULT_SEED,
            factory,
            weighting_scheme: Box::new(EqualWeighting),
            voting_scheme: Box::new(MajorityConfidence),
            members: Vec::new(),
            member_seeds: Vec::new(),
            member_weights: Vec::new(),
            class_labels: Vec::new(),
            train_report: None,
            state: EnsembleState::Unconfigured,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Only read by `configure`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_weighting_scheme(mut self, scheme: Box<dyn WeightingScheme>) -> Self {
        self.weighting_scheme = scheme;
        self
    }

    pub fn with_voting_scheme(mut self, scheme: Box<dyn VotingScheme>) -> Self {
        self.voting_scheme = scheme;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ensemble_size(&self) -> usize {
        self.ensemble_size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> EnsembleState {
        self.state
    }

    pub fn members(&self) -> &[Box<dyn Classifier>] {
        &self.members
    }

    pub fn member_seeds(&self) -> &[u64] {
        &self.member_seeds
    }

    /// Empty until trained.
    pub fn member_weights(&self) -> &[f64] {
        &self.member_weights
    }

    pub fn weighting_scheme(&self) -> &dyn WeightingScheme {
        self.weighting_scheme.as_ref()
    }

    pub fn voting_scheme(&self) -> &dyn VotingScheme {
        self.voting_scheme.as_ref()
    }

    pub fn class_labels(&self) -> &[String] {
        &self.class_labels
    }

    pub fn class_label(&self, label: usize) -> Option<&str> {
        self.class_labels.get(label).map(String::as_str)
    }

    pub fn num_classes(&self) -> usize {
        self.class_labels.len()
    }

    pub fn train_report(&self) -> Option<&TrainReport> {
        self.train_report.as_ref()
    }

    /// Instantiates `ensemble_size` fresh members. Calling it again discards
    /// the current members and any training.
    pub fn configure(&mut self) -> Result<(), EnsembleError> {
        if self.ensemble_size == 0 {
            warn!(ensemble = %self.name, "refusing to configure an empty ensemble");
            return Err(EnsembleError::InvalidEnsembleSize(self.ensemble_size));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        self.member_seeds = (0..self.ensemble_size).map(|_| rng.random()).collect();
        self.members = self
            .member_seeds
            .iter()
            .enumerate()
            .map(|(member, &seed)| self.factory.create(member, seed))
            .collect();

        self.member_weights.clear();
        self.class_labels.clear();
        self.train_report = None;
        self.state = EnsembleState::Configured;

        info!(
            ensemble = %self.name,
            size = self.ensemble_size,
            factory = self.factory.name(),
            weighting = self.weighting_scheme.name(),
            voting = self.voting_scheme.name(),
            "ensemble configured"
        );
        Ok(())
    }

    /// Trains every member on `data`, in parallel when the `use-rayon`
    /// feature is on, then weighs the members.
    pub fn train(&mut self, data: &TimeSeriesInstances) -> Result<&TrainReport, EnsembleError> {
        if self.state == EnsembleState::Unconfigured {
            self.configure()?;
        }
        if data.number_of_classes() == 0 {
            return Err(EnsembleError::EmptyLabelUniverse);
        }
        self.state = EnsembleState::Configured;
        self.member_weights.clear();
        self.class_labels.clear();
        self.train_report = None;

        let train_one = |(member, classifier): (usize, &mut Box<dyn Classifier>)| {
            train_member(member, classifier.as_mut(), data)
        };

        #[cfg(feature = "use-rayon")]
        let outcomes: Vec<_> = self.members.par_iter_mut().enumerate().map(train_one).collect();
        #[cfg(not(feature = "use-rayon"))]
        let outcomes: Vec<_> = self.members.iter_mut().enumerate().map(train_one).collect();

        let outcomes = outcomes.into_iter().collect::<Result<Vec<_>, _>>()?;

        let estimates: Vec<Option<f64>> = outcomes.iter().map(|&(_, estimate)| estimate).collect();
        let weights = self.compute_member_weights(self.weighting_scheme.as_ref(), &estimates)?;

        let members = outcomes
            .iter()
            .zip(&self.member_seeds)
            .zip(&weights)
            .enumerate()
            .map(|(member, ((&(cpu_seconds, train_estimate), &seed), &weight))| {
                MemberReport {
                    member,
                    seed,
                    cpu_seconds,
                    train_estimate,
                    weight,
                }
            })
            .collect();
        let report = TrainReport {
            num_classes: data.number_of_classes(),
            members,
        };

        info!(
            ensemble = %self.name,
            members = self.members.len(),
            classes = report.num_classes,
            cpu_seconds = report.total_cpu_seconds(),
            "ensemble trained"
        );

        self.member_weights = weights;
        self.class_labels = data.class_labels().to_vec();
        self.state = EnsembleState::Trained;
        Ok(self.train_report.insert(report))
    }

    /// Swaps the weighting scheme. A trained ensemble reweighs its members
    /// immediately; on error the previous scheme stays in place.
    pub fn set_weighting_scheme(
        &mut self,
        scheme: Box<dyn WeightingScheme>,
    ) -> Result<(), EnsembleError> {
        if let Some(report) = &self.train_report {
            let estimates: Vec<Option<f64>> =
                report.members.iter().map(|m| m.train_estimate).collect();
            let weights = self.compute_member_weights(scheme.as_ref(), &estimates)?;
            if let Some(report) = self.train_report.as_mut() {
                for (m, &w) in report.members.iter_mut().zip(&weights) {
                    m.weight = w;
                }
            }
            self.member_weights = weights;
        }
        self.weighting_scheme = scheme;
        Ok(())
    }

    pub fn set_voting_scheme(&mut self, scheme: Box<dyn VotingScheme>) {
        self.voting_scheme = scheme;
    }

    /// Combined distribution over the training classes and the winning label.
    pub fn predict(&self, instance: &TimeSeriesInstance) -> Result<Prediction, EnsembleError> {
        if self.state != EnsembleState::Trained {
            return Err(EnsembleError::InvalidState {
                operation: "predict",
                state: self.state,
            });
        }

        let num_classes = self.num_classes();
        let query = |(member, classifier): (usize, &Box<dyn Classifier>)| {
            let dist = classifier
                .distribution_for_instance(instance)
                .map_err(|source| EnsembleError::MemberPrediction { member, source })?;
            if dist.len() != num_classes {
                return Err(EnsembleError::DimensionMismatch {
                    member,
                    expected: num_classes,
                    found: dist.len(),
                });
            }
            Ok(dist)
        };

        #[cfg(feature = "use-rayon")]
        let distributions: Vec<_> = self.members.par_iter().enumerate().map(query).collect();
        #[cfg(not(feature = "use-rayon"))]
        let distributions: Vec<_> = self.members.iter().enumerate().map(query).collect();

        let distributions = distributions.into_iter().collect::<Result<Vec<_>, _>>()?;
        let combined = self
            .voting_scheme
            .combine(&self.member_weights, &distributions)?;
        Prediction::from_distribution(combined)
    }

    pub fn distribution_for_instance(
        &self,
        instance: &TimeSeriesInstance,
    ) -> Result<Vec<f64>, EnsembleError> {
        self.predict(instance).map(|p| p.distribution)
    }

    pub fn classify_instance(&self, instance: &TimeSeriesInstance) -> Result<usize, EnsembleError> {
        self.predict(instance).map(|p| p.label)
    }

    fn compute_member_weights(
        &self,
        scheme: &dyn WeightingScheme,
        estimates: &[Option<f64>],
    ) -> Result<Vec<f64>, EnsembleError> {
        let weights = scheme.member_weights(estimates)?;
        if weights.len() != estimates.len() {
            return Err(EnsembleError::MemberCountMismatch {
                expected: estimates.len(),
                found: weights.len(),
            });
        }
        if let Some((member, &weight)) = weights
            .iter()
            .enumerate()
            .find(|&(_, w)| !(w.is_finite() && *w >= 0.0))
        {
            return Err(EnsembleError::InvalidMemberWeight { member, weight });
        }
        if weights.iter().all(|&w| w == 0.0) {
            warn!(
                ensemble = %self.name,
                weighting = scheme.name(),
                "every member weight is zero; predictions will fail"
            );
        }
        Ok(weights)
    }
}

fn train_member(
    member: usize,
    classifier: &mut dyn Classifier,
    data: &TimeSeriesInstances,
) -> Result<(f64, Option<f64>), EnsembleError> {
    let start = ThreadTime::now();
    classifier
        .build_classifier(data)
        .map_err(|source| EnsembleError::MemberTraining { member, source })?;
    let cpu_seconds = start.elapsed().as_secs_f64();
    let estimate = classifier.train_estimate();
    debug!(member, cpu_seconds, ?estimate, "member trained");
    Ok((cpu_seconds, estimate))
}

impl fmt::Debug for Ensemble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ensemble")
            .field("name", &self.name)
            .field("ensemble_size", &self.ensemble_size)
            .field("state", &self.state)
            .field("weighting", &self.weighting_scheme.name())
            .field("voting", &self.voting_scheme.name())
            .field("n_classes", &self.class_labels.len())
            .finish()
    }
}
