pub mod instances;
pub mod labels;
