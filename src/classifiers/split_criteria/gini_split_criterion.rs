use crate::classifiers::split_criteria::SplitCriterion;

#[derive(Debug, Default, Clone, Copy)]
pub struct GiniSplitCriterion;

impl GiniSplitCriterion {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_gini(&self, distribution: &[f64], distribution_sum_of_weights: f64) -> f64 {
        if distribution_sum_of_weights <= 0.0 {
            return 0.0;
        }
        let mut gini = 1.0;
        for count in distribution {
            let rel_freq = count / distribution_sum_of_weights;
            gini -= rel_freq * rel_freq;
        }
        gini
    }
}

impl SplitCriterion for GiniSplitCriterion {
    fn range_of_merit(&self, pre_split_distribution: &[f64]) -> f64 {
        let num_classes = pre_split_distribution.len().max(1);
        1.0 - 1.0 / num_classes as f64
    }

    fn merit_of_split(&self, _pre_split_distribution: &[f64], post_split_dists: &[Vec<f64>]) -> f64 {
        let dist_weights: Vec<f64> = post_split_dists.iter().map(|d| d.iter().sum()).collect();
        let total_weight: f64 = dist_weights.iter().sum();
        if total_weight <= 0.0 {
            return 0.0;
        }

        let gini: f64 = post_split_dists
            .iter()
            .zip(&dist_weights)
            .map(|(dist, &w)| (w / total_weight) * self.compute_gini(dist, w))
            .sum();

        1.0 - gini
    }
}
