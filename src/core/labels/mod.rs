mod counts_map;
mod error;
mod weighted_label_distribution;

pub use counts_map::CountsMap;
pub use error::LabelError;
pub use weighted_label_distribution::{WeightedLabelDistribution, Weights};
