use crate::classifiers::ensemble::ClassifierFactory;
use crate::classifiers::{Classifier, ClassifierError};
use crate::core::instances::{TimeSeriesInstance, TimeSeriesInstances};
use crate::utils::math::{argmax, normalise};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

pub const DEFAULT_SAMPLE_FRACTION: f64 = 0.5;

/// Nearest-centroid classifier over a random subset of time points.
///
/// The subset is drawn once per `build_classifier` from the classifier's seed,
/// so members built with different seeds look at different parts of the
/// series. Class scores are `prior * exp(-(d - d_min))` over squared distances
/// to each class centroid, normalised to sum to one.
#[derive(Debug, Clone)]
pub struct RandomCentroidClassifier {
    sample_fraction: f64,
    seed: u64,
    series_length: Option<usize>,
    selected_points: Vec<usize>,
    centroids: Vec<Option<Vec<f64>>>,
    class_priors: Vec<f64>,
    train_accuracy: Option<f64>,
}

impl RandomCentroidClassifier {
    /// `sample_fraction` is clamped to `(0, 1]`; at least one point is kept.
    pub fn new(sample_fraction: f64, seed: u64) -> Self {
        Self {
            sample_fraction,
            seed,
            series_length: None,
            selected_points: Vec::new(),
            centroids: Vec::new(),
            class_priors: Vec::new(),
            train_accuracy: None,
        }
    }

    pub fn selected_points(&self) -> &[usize] {
        &self.selected_points
    }

    fn number_of_points(&self, series_length: usize) -> usize {
        let fraction = if self.sample_fraction.is_finite() {
            self.sample_fraction.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let wanted = (fraction * series_length as f64).ceil() as usize;
        wanted.clamp(series_length.min(1), series_length)
    }

    fn squared_distance(&self, values: &[f64], centroid: &[f64]) -> f64 {
        self.selected_points
            .iter()
            .zip(centroid)
            .map(|(&p, c)| {
                let diff = values[p] - c;
                diff * diff
            })
            .sum()
    }

    fn resubstitution_accuracy(&self, labeled: &[&TimeSeriesInstance]) -> Option<f64> {
        let mut correct = 0.0;
        let mut total = 0.0;
        for inst in labeled {
            let (Some(class), Ok(dist)) = (inst.class_value(), self.distribution_for_instance(inst))
            else {
                continue;
            };
            total += inst.weight();
            if argmax(&dist) == Some(class) {
                correct += inst.weight();
            }
        }
        (total > 0.0).then(|| correct / total)
    }
}

impl Classifier for RandomCentroidClassifier {
    fn build_classifier(&mut self, data: &TimeSeriesInstances) -> Result<(), ClassifierError> {
        let labeled: Vec<&TimeSeriesInstance> =
            data.iter().filter(|i| i.class_value().is_some()).collect();
        let series_length = labeled
            .first()
            .map(|i| i.len())
            .ok_or(ClassifierError::EmptyTrainingData)?;
        if let Some(bad) = labeled.iter().find(|i| i.len() != series_length) {
            return Err(ClassifierError::SeriesLengthMismatch {
                expected: series_length,
                found: bad.len(),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let amount = self.number_of_points(series_length);
        let mut points = index::sample(&mut rng, series_length, amount).into_vec();
        points.sort_unstable();

        let num_classes = data.number_of_classes();
        let mut sums = vec![vec![0.0; points.len()]; num_classes];
        let mut class_weights = vec![0.0; num_classes];
        for inst in &labeled {
            let Some(class) = inst.class_value() else {
                continue;
            };
            let w = inst.weight();
            class_weights[class] += w;
            for (sum, &p) in sums[class].iter_mut().zip(&points) {
                *sum += w * inst.values()[p];
            }
        }

        self.class_priors = data.class_distribution()?.distribution()?.to_vec();
        self.centroids = sums
            .into_iter()
            .zip(&class_weights)
            .map(|(sum, &w)| (w > 0.0).then(|| normalise(&sum, w)))
            .collect();
        self.selected_points = points;
        self.series_length = Some(series_length);
        self.train_accuracy = self.resubstitution_accuracy(&labeled);
        Ok(())
    }

    fn distribution_for_instance(
        &self,
        instance: &TimeSeriesInstance,
    ) -> Result<Vec<f64>, ClassifierError> {
        let series_length = self.series_length.ok_or(ClassifierError::NotTrained)?;
        if instance.len() != series_length {
            return Err(ClassifierError::SeriesLengthMismatch {
                expected: series_length,
                found: instance.len(),
            });
        }

        let distances: Vec<Option<f64>> = self
            .centroids
            .iter()
            .map(|c| {
                c.as_ref()
                    .map(|c| self.squared_distance(instance.values(), c))
            })
            .collect();
        let Some(closest) = distances.iter().flatten().copied().reduce(f64::min) else {
            return Ok(self.class_priors.clone());
        };

        let scores: Vec<f64> = distances
            .iter()
            .zip(&self.class_priors)
            .map(|(d, prior)| d.map_or(0.0, |d| prior * (closest - d).exp()))
            .collect();
        let total: f64 = scores.iter().sum();
        if total > 0.0 {
            Ok(normalise(&scores, total))
        } else {
            Ok(self.class_priors.clone())
        }
    }

    fn train_estimate(&self) -> Option<f64> {
        self.train_accuracy
    }
}

/// Builds `RandomCentroidClassifier` members sharing one sample fraction.
#[derive(Debug, Clone, Copy)]
pub struct RandomCentroidFactory {
    sample_fraction: f64,
}

impl RandomCentroidFactory {
    pub fn new(sample_fraction: f64) -> Self {
        Self { sample_fraction }
    }
}

impl Default for RandomCentroidFactory {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_FRACTION)
    }
}

impl ClassifierFactory for RandomCentroidFactory {
    fn create(&self, _member: usize, seed: u64) -> Box<dyn Classifier> {
        Box::new(RandomCentroidClassifier::new(self.sample_fraction, seed))
    }

    fn name(&self) -> &str {
        "random-centroid"
    }
}
