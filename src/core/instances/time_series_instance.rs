/// One series of observations with an optional class index.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesInstance {
    values: Vec<f64>,
    class_value: Option<usize>,
    weight: f64,
}

impl TimeSeriesInstance {
    pub fn new(values: Vec<f64>, class_value: usize) -> Self {
        Self {
            values,
            class_value: Some(class_value),
            weight: 1.0,
        }
    }

    pub fn unlabeled(values: Vec<f64>) -> Self {
        Self {
            values,
            class_value: None,
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn class_value(&self) -> Option<usize> {
        self.class_value
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}
