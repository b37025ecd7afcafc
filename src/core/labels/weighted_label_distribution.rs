//! Weighted label counts with a declared label universe.
//!
//! Derived statistics (label set, counts, distribution, weight sum) are computed
//! on first access and memoized. Every setter funnels through
//! [`WeightedLabelDistribution::invalidate_derived`], which drops exactly the
//! memoized values that depend on what changed.
//!
//! When the total weight is zero the distribution is an all-zero vector with one
//! entry per label in the label set.
//!
//! The memo cells are `OnceCell`s, so the type is `Send` but not `Sync`: a
//! distribution can be handed to another thread but not read from two threads
//! at once.

use crate::core::labels::counts_map::CountsMap;
use crate::core::labels::error::{LabelError, check_weight};
use crate::utils::math::normalise;
use std::cell::OnceCell;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Per-observation weights.
#[derive(Debug, Clone, PartialEq)]
pub enum Weights {
    /// The same weight for every observation, however many there are.
    Repeat(f64),
    Explicit(Vec<f64>),
}

impl Weights {
    #[inline]
    fn at(&self, index: usize) -> f64 {
        match self {
            Weights::Repeat(w) => *w,
            Weights::Explicit(ws) => ws[index],
        }
    }

    fn sum(&self, len: usize) -> f64 {
        match self {
            Weights::Repeat(w) => *w * len as f64,
            Weights::Explicit(ws) => ws.iter().sum(),
        }
    }

    pub fn to_vec(&self, len: usize) -> Vec<f64> {
        match self {
            Weights::Repeat(w) => vec![*w; len],
            Weights::Explicit(ws) => ws.clone(),
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Weights::Repeat(1.0)
    }
}

#[derive(Debug, Clone, Copy)]
enum Change {
    Observations,
    Weights,
    LabelSet,
    WeightSum,
    Distribution,
}

#[derive(Debug, Clone)]
struct Derived<L> {
    label_set: OnceCell<Vec<L>>,
    counts: OnceCell<CountsMap<L>>,
    distribution: OnceCell<Vec<f64>>,
    weight_sum: OnceCell<f64>,
}

impl<L> Derived<L> {
    fn new() -> Self {
        Self {
            label_set: OnceCell::new(),
            counts: OnceCell::new(),
            distribution: OnceCell::new(),
            weight_sum: OnceCell::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeightedLabelDistribution<L> {
    labels: Vec<L>,
    weights: Weights,
    declared_label_set: Option<Vec<L>>,
    counts_override: Option<CountsMap<L>>,
    weight_sum_override: Option<f64>,
    /// The weight-sum override is the total of `counts_override` and goes
    /// with it.
    weight_sum_from_counts: bool,
    distribution_override: Option<Vec<f64>>,
    derived: Derived<L>,
}

impl<L> WeightedLabelDistribution<L>
where
    L: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::from_labels(Vec::new())
    }

    /// Every observation weighs 1.0.
    pub fn from_labels(labels: Vec<L>) -> Self {
        Self {
            labels,
            weights: Weights::default(),
            declared_label_set: None,
            counts_override: None,
            weight_sum_override: None,
            weight_sum_from_counts: false,
            distribution_override: None,
            derived: Derived::new(),
        }
    }

    pub fn with_weights(labels: Vec<L>, weights: Vec<f64>) -> Result<Self, LabelError> {
        let mut dist = Self::new();
        dist.set_observations(labels, Weights::Explicit(weights))?;
        Ok(dist)
    }

    pub fn with_label_set(mut self, label_set: Vec<L>) -> Result<Self, LabelError> {
        self.set_label_set(label_set)?;
        Ok(self)
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn weight_at(&self, index: usize) -> Option<f64> {
        (index < self.labels.len()).then(|| self.weights.at(index))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `true` when the label set was declared rather than derived from the
    /// observations.
    pub fn has_declared_label_set(&self) -> bool {
        self.declared_label_set.is_some()
    }

    pub fn set_labels(&mut self, labels: Vec<L>) -> Result<&mut Self, LabelError> {
        if let Weights::Explicit(ws) = &self.weights
            && ws.len() != labels.len()
        {
            return Err(LabelError::DimensionMismatch {
                context: "labels must match the number of weights",
                expected: ws.len(),
                found: labels.len(),
            });
        }
        self.labels = labels;
        self.invalidate_derived(Change::Observations);
        Ok(self)
    }

    pub fn set_weights(&mut self, weights: Vec<f64>) -> Result<&mut Self, LabelError> {
        let weights = Weights::Explicit(weights);
        Self::check_weights(self.labels.len(), &weights)?;
        self.weights = weights;
        self.invalidate_derived(Change::Weights);
        Ok(self)
    }

    /// Gives every observation the same weight without materializing one
    /// entry per observation.
    pub fn set_repeated_weight(&mut self, weight: f64) -> Result<&mut Self, LabelError> {
        let weights = Weights::Repeat(weight);
        Self::check_weights(self.labels.len(), &weights)?;
        self.weights = weights;
        self.invalidate_derived(Change::Weights);
        Ok(self)
    }

    /// Replaces labels and weights together.
    pub fn set_observations(
        &mut self,
        labels: Vec<L>,
        weights: Weights,
    ) -> Result<&mut Self, LabelError> {
        Self::check_weights(labels.len(), &weights)?;
        self.labels = labels;
        self.weights = weights;
        self.invalidate_derived(Change::Observations);
        Ok(self)
    }

    /// Declares the full set of possible labels, observed or not. The declared
    /// set survives later `set_labels` calls.
    pub fn set_label_set(&mut self, label_set: Vec<L>) -> Result<&mut Self, LabelError> {
        let mut seen = HashSet::with_capacity(label_set.len());
        for label in &label_set {
            if !seen.insert(label) {
                return Err(LabelError::duplicate(label));
            }
        }
        self.declared_label_set = Some(label_set);
        self.invalidate_derived(Change::LabelSet);
        Ok(self)
    }

    /// Goes back to deriving the label set from the observations.
    pub fn clear_label_set(&mut self) -> &mut Self {
        self.declared_label_set = None;
        self.invalidate_derived(Change::LabelSet);
        self
    }

    /// Installs pre-aggregated counts. The label set becomes the keys of
    /// `counts` and the weight sum becomes their total, until either is set
    /// again or the observations change.
    pub fn set_counts_map(&mut self, counts: CountsMap<L>) -> &mut Self {
        self.invalidate_derived(Change::LabelSet);
        self.declared_label_set = Some(counts.labels().to_vec());
        self.weight_sum_override = Some(counts.total());
        self.weight_sum_from_counts = true;
        self.counts_override = Some(counts);
        self
    }

    pub fn set_weight_sum(&mut self, weight_sum: f64) -> &mut Self {
        self.invalidate_derived(Change::WeightSum);
        self.weight_sum_override = Some(weight_sum);
        self.weight_sum_from_counts = false;
        self
    }

    pub fn set_distribution(&mut self, distribution: Vec<f64>) -> Result<&mut Self, LabelError> {
        let expected = self.label_set().len();
        if distribution.len() != expected {
            return Err(LabelError::DimensionMismatch {
                context: "distribution must have one entry per label",
                expected,
                found: distribution.len(),
            });
        }
        self.invalidate_derived(Change::Distribution);
        self.distribution_override = Some(distribution);
        Ok(self)
    }

    /// The declared label set, or the distinct observed labels in
    /// first-occurrence order.
    pub fn label_set(&self) -> &[L] {
        if let Some(declared) = &self.declared_label_set {
            return declared;
        }
        self.derived.label_set.get_or_init(|| {
            let mut seen = HashSet::with_capacity(self.labels.len());
            self.labels
                .iter()
                .filter(|label| seen.insert(*label))
                .cloned()
                .collect()
        })
    }

    pub fn counts_map(&self) -> Result<&CountsMap<L>, LabelError> {
        if let Some(counts) = &self.counts_override {
            return Ok(counts);
        }
        if let Some(counts) = self.derived.counts.get() {
            return Ok(counts);
        }
        let counts = self.count_observations()?;
        Ok(self.derived.counts.get_or_init(|| counts))
    }

    /// Counts in label-set order.
    pub fn counts(&self) -> Result<&[f64], LabelError> {
        Ok(self.counts_map()?.values())
    }

    pub fn weight_sum(&self) -> f64 {
        if let Some(sum) = self.weight_sum_override {
            return sum;
        }
        *self
            .derived
            .weight_sum
            .get_or_init(|| self.weights.sum(self.labels.len()))
    }

    /// Counts divided by the weight sum, in label-set order. All zeros when the
    /// weight sum is zero.
    pub fn distribution(&self) -> Result<&[f64], LabelError> {
        if let Some(distribution) = &self.distribution_override {
            return Ok(distribution);
        }
        if let Some(distribution) = self.derived.distribution.get() {
            return Ok(distribution);
        }
        let distribution = normalise(self.counts()?, self.weight_sum());
        Ok(self.derived.distribution.get_or_init(|| distribution))
    }

    fn count_observations(&self) -> Result<CountsMap<L>, LabelError> {
        let label_set = self.label_set();
        let mut counts = CountsMap::zeroed(label_set)?;
        for (i, label) in self.labels.iter().enumerate() {
            if !counts.add(label, self.weights.at(i)) {
                return Err(LabelError::not_in_universe(label, label_set));
            }
        }
        Ok(counts)
    }

    fn check_weights(num_labels: usize, weights: &Weights) -> Result<(), LabelError> {
        match weights {
            Weights::Repeat(w) => check_weight(0, *w),
            Weights::Explicit(ws) => {
                if ws.len() != num_labels {
                    return Err(LabelError::DimensionMismatch {
                        context: "weights must match the number of labels",
                        expected: num_labels,
                        found: ws.len(),
                    });
                }
                ws.iter()
                    .enumerate()
                    .try_for_each(|(i, &w)| check_weight(i, w))
            }
        }
    }

    fn invalidate_derived(&mut self, change: Change) {
        let derived = &mut self.derived;
        derived.distribution.take();
        self.distribution_override = None;

        match change {
            Change::Observations => {
                derived.label_set.take();
                derived.counts.take();
                derived.weight_sum.take();
                self.counts_override = None;
                self.weight_sum_override = None;
                self.weight_sum_from_counts = false;
            }
            Change::Weights => {
                derived.counts.take();
                derived.weight_sum.take();
                self.counts_override = None;
                self.weight_sum_override = None;
                self.weight_sum_from_counts = false;
            }
            Change::LabelSet => {
                derived.label_set.take();
                derived.counts.take();
                self.counts_override = None;
                if self.weight_sum_from_counts {
                    self.weight_sum_override = None;
                    self.weight_sum_from_counts = false;
                }
            }
            Change::WeightSum | Change::Distribution => {}
        }
    }
}

impl WeightedLabelDistribution<usize> {
    /// Builds a distribution over labels `0..counts.len()` straight from
    /// aggregated counts. The weight sum is the total of `counts`.
    pub fn from_counts(counts: &[f64]) -> Result<Self, LabelError> {
        let map = CountsMap::from_pairs(counts.iter().copied().enumerate())?;
        let mut dist = Self::new();
        dist.set_counts_map(map);
        Ok(dist)
    }
}

impl<L> Default for WeightedLabelDistribution<L>
where
    L: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
