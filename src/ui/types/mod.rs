pub mod build;
pub mod choices;
pub mod dataset;
