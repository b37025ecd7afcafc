use crate::core::labels::error::{LabelError, check_weight};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Per-label weighted counts that iterate in label-set order.
///
/// Every member of the label set has an entry, including labels that were
/// never observed (their count stays at zero).
#[derive(Debug, Clone)]
pub struct CountsMap<L> {
    labels: Vec<L>,
    counts: Vec<f64>,
    index: HashMap<L, usize>,
}

impl<L> CountsMap<L>
where
    L: Eq + Hash + Clone + Debug,
{
    /// Zero entry for every label. `label_set` must not contain duplicates.
    pub fn zeroed(label_set: &[L]) -> Result<Self, LabelError> {
        let mut index = HashMap::with_capacity(label_set.len());
        for (i, label) in label_set.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(LabelError::duplicate(label));
            }
        }
        Ok(Self {
            labels: label_set.to_vec(),
            counts: vec![0.0; label_set.len()],
            index,
        })
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self, LabelError>
    where
        I: IntoIterator<Item = (L, f64)>,
    {
        let mut map = Self {
            labels: Vec::new(),
            counts: Vec::new(),
            index: HashMap::new(),
        };
        for (i, (label, count)) in pairs.into_iter().enumerate() {
            check_weight(i, count)?;
            if map.index.contains_key(&label) {
                return Err(LabelError::duplicate(&label));
            }
            map.index.insert(label.clone(), i);
            map.labels.push(label);
            map.counts.push(count);
        }
        Ok(map)
    }

    /// Adds `weight` to the entry for `label`. Returns `false` when the label
    /// has no entry; the map is left untouched in that case.
    pub fn add(&mut self, label: &L, weight: f64) -> bool {
        match self.index.get(label) {
            Some(&i) => {
                self.counts[i] += weight;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, label: &L) -> Option<f64> {
        self.index.get(label).map(|&i| self.counts[i])
    }

    pub fn contains(&self, label: &L) -> bool {
        self.index.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Counts in label-set order.
    pub fn values(&self) -> &[f64] {
        &self.counts
    }

    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&L, f64)> {
        self.labels.iter().zip(self.counts.iter().copied())
    }
}

impl<L: PartialEq> PartialEq for CountsMap<L> {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels && self.counts == other.counts
    }
}
