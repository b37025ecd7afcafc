use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::instances::{TimeSeriesInstance, TimeSeriesInstances};

fn default_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstanceRecord {
    pub values: Vec<f64>,
    #[serde(default)]
    pub class: Option<usize>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// On-disk form of a labeled series collection:
/// `{"class_labels": [...], "instances": [{"values": [...], "class": 0}]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetFile {
    pub class_labels: Vec<String>,
    pub instances: Vec<InstanceRecord>,
}

impl DatasetFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("malformed dataset {}", path.display()))
    }

    pub fn into_instances(self) -> Result<TimeSeriesInstances> {
        let instances = self
            .instances
            .into_iter()
            .map(|r| {
                let inst = match r.class {
                    Some(c) => TimeSeriesInstance::new(r.values, c),
                    None => TimeSeriesInstance::unlabeled(r.values),
                };
                inst.with_weight(r.weight)
            })
            .collect();
        Ok(TimeSeriesInstances::from_parts(self.class_labels, instances)?)
    }
}
