use crate::core::labels::{LabelError, WeightedLabelDistribution};
use std::fmt::Debug;
use std::hash::Hash;

/// Scores how well a partition separates the classes. Distributions are class
/// counts aligned to one label set.
pub trait SplitCriterion: Send + Sync {
    /// Spread between the worst and the best merit this criterion can return
    /// for a label set of `pre_split_distribution.len()` classes.
    fn range_of_merit(&self, pre_split_distribution: &[f64]) -> f64;

    fn merit_of_split(&self, pre_split_distribution: &[f64], post_split_dists: &[Vec<f64>])
    -> f64;
}

/// Scores the split of `parent` into `children`. A child's labels must be a
/// subset of the parent's label set; child counts are realigned to the
/// parent's order and missing labels count as zero.
pub fn merit_of_partition<L, C>(
    criterion: &C,
    parent: &WeightedLabelDistribution<L>,
    children: &[WeightedLabelDistribution<L>],
) -> Result<f64, LabelError>
where
    L: Eq + Hash + Clone + Debug,
    C: SplitCriterion + ?Sized,
{
    let parent_counts = parent.counts_map()?;
    let label_set = parent.label_set();

    let mut post_split_dists = Vec::with_capacity(children.len());
    for child in children {
        let child_counts = child.counts_map()?;
        if let Some(stray) = child_counts
            .labels()
            .iter()
            .find(|label| !parent_counts.contains(label))
        {
            return Err(LabelError::not_in_universe(stray, label_set));
        }
        post_split_dists.push(
            label_set
                .iter()
                .map(|label| child_counts.get(label).unwrap_or(0.0))
                .collect(),
        );
    }

    Ok(criterion.merit_of_split(parent_counts.values(), &post_split_dists))
}
