use crate::core::instances::TimeSeriesInstance;
use crate::core::labels::{LabelError, WeightedLabelDistribution, Weights};

/// A labeled collection of series sharing one class universe.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesInstances {
    class_labels: Vec<String>,
    instances: Vec<TimeSeriesInstance>,
}

impl TimeSeriesInstances {
    pub fn new(class_labels: Vec<String>) -> Self {
        Self {
            class_labels,
            instances: Vec::new(),
        }
    }

    pub fn from_parts(
        class_labels: Vec<String>,
        instances: Vec<TimeSeriesInstance>,
    ) -> Result<Self, LabelError> {
        let mut data = Self::new(class_labels);
        for instance in instances {
            data.push(instance)?;
        }
        Ok(data)
    }

    /// Rejects instances whose class index is outside the class labels.
    pub fn push(&mut self, instance: TimeSeriesInstance) -> Result<(), LabelError> {
        if let Some(class) = instance.class_value() {
            if class >= self.class_labels.len() {
                let universe: Vec<usize> = (0..self.class_labels.len()).collect();
                return Err(LabelError::not_in_universe(&class, &universe));
            }
        }
        self.instances.push(instance);
        Ok(())
    }

    pub fn class_labels(&self) -> &[String] {
        &self.class_labels
    }

    pub fn class_label(&self, class_value: usize) -> Option<&str> {
        self.class_labels.get(class_value).map(String::as_str)
    }

    pub fn number_of_classes(&self) -> usize {
        self.class_labels.len()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimeSeriesInstance> {
        self.instances.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSeriesInstance> {
        self.instances.iter()
    }

    /// Weighted class counts of the labeled instances over every class index,
    /// including classes with no instances.
    pub fn class_distribution(&self) -> Result<WeightedLabelDistribution<usize>, LabelError> {
        let (labels, weights): (Vec<usize>, Vec<f64>) = self
            .instances
            .iter()
            .filter_map(|inst| inst.class_value().map(|c| (c, inst.weight())))
            .unzip();

        let mut dist = WeightedLabelDistribution::new();
        dist.set_label_set((0..self.number_of_classes()).collect())?;
        dist.set_observations(labels, Weights::Explicit(weights))?;
        Ok(dist)
    }
}
