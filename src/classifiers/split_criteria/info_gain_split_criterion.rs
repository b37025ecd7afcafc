use crate::classifiers::split_criteria::SplitCriterion;
use crate::utils::math::entropy;

/// Entropy reduction in bits.
#[derive(Debug, Default, Clone, Copy)]
pub struct InfoGainSplitCriterion;

impl InfoGainSplitCriterion {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_entropy(&self, distribution: &[f64]) -> f64 {
        entropy(distribution, distribution.iter().sum())
    }
}

impl SplitCriterion for InfoGainSplitCriterion {
    fn range_of_merit(&self, pre_split_distribution: &[f64]) -> f64 {
        let num_classes = pre_split_distribution.len().max(2);
        (num_classes as f64).log2()
    }

    fn merit_of_split(&self, pre_split_distribution: &[f64], post_split_dists: &[Vec<f64>]) -> f64 {
        let dist_weights: Vec<f64> = post_split_dists.iter().map(|d| d.iter().sum()).collect();
        let total_weight: f64 = dist_weights.iter().sum();
        if total_weight <= 0.0 {
            return 0.0;
        }

        let post_entropy: f64 = post_split_dists
            .iter()
            .zip(&dist_weights)
            .map(|(dist, &w)| (w / total_weight) * entropy(dist, w))
            .sum();

        self.compute_entropy(pre_split_distribution) - post_entropy
    }
}
