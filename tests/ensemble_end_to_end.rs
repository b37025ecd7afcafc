use tsens::classifiers::centroid::RandomCentroidFactory;
use tsens::classifiers::ensemble::voting::{MajorityConfidence, MajorityVote};
use tsens::classifiers::ensemble::weighting::{EqualWeighting, TrainAccuracyWeighting};
use tsens::classifiers::ensemble::{Ensemble, EnsembleError, EnsembleState};
use tsens::classifiers::{Classifier, ClassifierError};
use tsens::core::instances::{TimeSeriesInstance, TimeSeriesInstances};
use tsens::core::labels::WeightedLabelDistribution;
use tsens::ui::types::build::build_ensemble;
use tsens::ui::types::choices::EnsembleConfig;

const EPS: f64 = 1e-9;

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Always answers with the distribution it was built with.
struct Constant {
    distribution: Vec<f64>,
    estimate: Option<f64>,
}

impl Classifier for Constant {
    fn build_classifier(&mut self, _data: &TimeSeriesInstances) -> Result<(), ClassifierError> {
        Ok(())
    }

    fn distribution_for_instance(
        &self,
        _instance: &TimeSeriesInstance,
    ) -> Result<Vec<f64>, ClassifierError> {
        Ok(self.distribution.clone())
    }

    fn train_estimate(&self) -> Option<f64> {
        self.estimate
    }
}

fn sine_vs_ramp(n_per_class: usize, length: usize) -> TimeSeriesInstances {
    let mut instances = Vec::new();
    for i in 0..n_per_class {
        let phase = i as f64 * 0.05;
        let sine = (0..length).map(|t| (t as f64 * 0.4 + phase).sin()).collect();
        let ramp = (0..length)
            .map(|t| t as f64 / length as f64 * 2.0 - 1.0 + phase)
            .collect();
        instances.push(TimeSeriesInstance::new(sine, 0));
        instances.push(TimeSeriesInstance::new(ramp, 1));
    }
    TimeSeriesInstances::from_parts(vec!["sine".into(), "ramp".into()], instances).unwrap()
}

#[test]
fn random_centroid_ensemble_learns_two_shapes() {
    let train = sine_vs_ramp(10, 24);
    let config = EnsembleConfig {
        ensemble_size: 7,
        ..EnsembleConfig::default()
    };
    let mut ensemble = build_ensemble(config).unwrap();
    let report = ensemble.train(&train).unwrap().clone();

    assert_eq!(ensemble.state(), EnsembleState::Trained);
    assert_eq!(report.members.len(), 7);
    assert_eq!(report.num_classes, 2);
    assert!(report.members.iter().all(|m| m.weight == 1.0));

    let test = sine_vs_ramp(3, 24);
    for instance in test.iter() {
        let prediction = ensemble.predict(instance).unwrap();
        assert!(approx(prediction.distribution.iter().sum(), 1.0, EPS));
        assert_eq!(Some(prediction.label), instance.class_value());
    }
}

#[test]
fn same_seed_gives_same_members_and_predictions() {
    let train = sine_vs_ramp(6, 16);
    let query = TimeSeriesInstance::unlabeled((0..16).map(|t| (t as f64 * 0.3).cos()).collect());

    let run = || {
        let mut e = Ensemble::new(5, Box::new(RandomCentroidFactory::new(0.3))).with_seed(1234);
        e.train(&train).unwrap();
        (e.member_seeds().to_vec(), e.predict(&query).unwrap())
    };
    let (seeds_a, pred_a) = run();
    let (seeds_b, pred_b) = run();
    assert_eq!(seeds_a, seeds_b);
    assert_eq!(pred_a, pred_b);

    let mut distinct = seeds_a.clone();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(distinct.len(), seeds_a.len());
}

#[test]
fn closure_factory_and_scheme_swaps() {
    let data = sine_vs_ramp(2, 4);
    let factory = |member: usize, _seed: u64| -> Box<dyn Classifier> {
        let (distribution, estimate) = match member {
            0 => (vec![0.9, 0.1], 0.2),
            _ => (vec![0.3, 0.7], 0.8),
        };
        Box::new(Constant {
            distribution,
            estimate: Some(estimate),
        })
    };
    let mut ensemble = Ensemble::new(2, Box::new(factory))
        .with_weighting_scheme(Box::new(EqualWeighting))
        .with_voting_scheme(Box::new(MajorityConfidence));
    ensemble.train(&data).unwrap();

    let query = TimeSeriesInstance::unlabeled(vec![0.0; 4]);
    let equal = ensemble.predict(&query).unwrap();
    assert!(approx(equal.distribution[0], 0.6, EPS));
    assert_eq!(equal.label, 0);

    ensemble
        .set_weighting_scheme(Box::new(TrainAccuracyWeighting::new()))
        .unwrap();
    assert_eq!(ensemble.member_weights(), &[0.2, 0.8]);
    let by_accuracy = ensemble.predict(&query).unwrap();
    assert!(approx(by_accuracy.distribution[0], 0.18 + 0.24, EPS));
    assert_eq!(by_accuracy.label, 1);

    ensemble.set_voting_scheme(Box::new(MajorityVote));
    let votes = ensemble.predict(&query).unwrap();
    assert_eq!(votes.distribution, vec![0.2, 0.8]);
    assert_eq!(ensemble.classify_instance(&query).unwrap(), 1);
}

#[test]
fn predicting_before_training_is_an_invalid_state() {
    let ensemble = Ensemble::new(3, Box::new(RandomCentroidFactory::default()));
    let err = ensemble
        .predict(&TimeSeriesInstance::unlabeled(vec![0.0]))
        .unwrap_err();
    assert!(matches!(err, EnsembleError::InvalidState { .. }));
}

#[test]
fn class_distribution_feeds_the_label_engine() {
    let data = sine_vs_ramp(4, 8);
    let dist = data.class_distribution().unwrap();
    assert_eq!(dist.counts().unwrap(), &[4.0, 4.0]);
    assert_eq!(dist.distribution().unwrap(), &[0.5, 0.5]);

    let mut words = WeightedLabelDistribution::with_weights(
        vec!["x", "y", "x"],
        vec![1.0, 1.0, 2.0],
    )
    .unwrap();
    assert_eq!(words.distribution().unwrap(), &[0.75, 0.25]);
    words.set_label_set(vec!["y", "x", "w"]).unwrap();
    assert_eq!(words.counts().unwrap(), &[1.0, 3.0, 0.0]);
    assert_eq!(words.distribution().unwrap(), &[0.25, 0.75, 0.0]);
}
