mod gini_split_criterion;
mod info_gain_split_criterion;
mod split_criterion;

pub use gini_split_criterion::GiniSplitCriterion;
pub use info_gain_split_criterion::InfoGainSplitCriterion;
pub use split_criterion::{SplitCriterion, merit_of_partition};
