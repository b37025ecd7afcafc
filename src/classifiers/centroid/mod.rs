mod random_centroid_classifier;

pub use random_centroid_classifier::{
    DEFAULT_SAMPLE_FRACTION, RandomCentroidClassifier, RandomCentroidFactory,
};
