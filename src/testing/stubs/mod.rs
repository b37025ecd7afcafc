pub mod fixed_distribution_classifier;
