use anyhow::{Result, bail};

use crate::classifiers::centroid::RandomCentroidFactory;
use crate::classifiers::ensemble::voting::{MajorityConfidence, MajorityVote, VotingScheme};
use crate::classifiers::ensemble::weighting::{
    EqualWeighting, TrainAccuracyWeighting, WeightingScheme,
};
use crate::classifiers::ensemble::{ClassifierFactory, Ensemble};
use crate::ui::types::choices::{EnsembleConfig, LearnerChoice, VotingChoice, WeightingChoice};

pub fn build_weighting_scheme(choice: WeightingChoice) -> Result<Box<dyn WeightingScheme>> {
    match choice {
        WeightingChoice::Equal(_) => Ok(Box::new(EqualWeighting)),
        WeightingChoice::TrainAccuracy(_) => Ok(Box::new(TrainAccuracyWeighting::new())),
        WeightingChoice::ExponentialTrainAccuracy(p) => {
            if !p.power.is_finite() || p.power < 0.0 {
                bail!("weighting power must be finite and non-negative, got {}", p.power);
            }
            Ok(Box::new(TrainAccuracyWeighting::with_power(p.power)))
        }
    }
}

pub fn build_voting_scheme(choice: VotingChoice) -> Box<dyn VotingScheme> {
    match choice {
        VotingChoice::MajorityConfidence(_) => Box::new(MajorityConfidence),
        VotingChoice::MajorityVote(_) => Box::new(MajorityVote),
    }
}

pub fn build_factory(choice: LearnerChoice) -> Box<dyn ClassifierFactory> {
    match choice {
        LearnerChoice::RandomCentroid(p) => Box::new(RandomCentroidFactory::new(p.sample_fraction)),
    }
}

/// Validates `config` and returns an unconfigured ensemble ready to train.
pub fn build_ensemble(config: EnsembleConfig) -> Result<Ensemble> {
    config.validate()?;
    let weighting = build_weighting_scheme(config.weighting)?;
    Ok(
        Ensemble::new(config.ensemble_size, build_factory(config.learner))
            .with_name(config.name)
            .with_seed(config.seed)
            .with_weighting_scheme(weighting)
            .with_voting_scheme(build_voting_scheme(config.voting)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::ensemble::EnsembleState;
    use crate::ui::types::choices::{ExponentParams, NoParams};

    #[test]
    fn exponent_choice_builds_named_scheme() {
        let s = build_weighting_scheme(WeightingChoice::ExponentialTrainAccuracy(
            ExponentParams { power: 2.0 },
        ))
        .unwrap();
        assert_eq!(s.name(), "exponential-train-accuracy");
        assert_eq!(s.member_weights(&[Some(0.5)]).unwrap(), vec![0.25]);
    }

    #[test]
    fn nan_power_is_rejected() {
        let choice = WeightingChoice::ExponentialTrainAccuracy(ExponentParams { power: f64::NAN });
        assert!(build_weighting_scheme(choice).is_err());
    }

    #[test]
    fn voting_choice_maps_to_scheme() {
        assert_eq!(
            build_voting_scheme(VotingChoice::MajorityVote(NoParams {})).name(),
            "majority-vote"
        );
        assert_eq!(
            build_voting_scheme(VotingChoice::default()).name(),
            "majority-confidence"
        );
    }

    #[test]
    fn config_carries_into_ensemble() {
        let config = EnsembleConfig {
            name: "tiny".into(),
            ensemble_size: 4,
            seed: 9,
            ..EnsembleConfig::default()
        };
        let e = build_ensemble(config).unwrap();
        assert_eq!(e.name(), "tiny");
        assert_eq!(e.ensemble_size(), 4);
        assert_eq!(e.seed(), 9);
        assert_eq!(e.state(), EnsembleState::Unconfigured);
        assert_eq!(e.weighting_scheme().name(), "equal");
    }

    #[test]
    fn invalid_config_does_not_build() {
        let config = EnsembleConfig {
            ensemble_size: 0,
            ..EnsembleConfig::default()
        };
        assert!(build_ensemble(config).is_err());
    }
}
