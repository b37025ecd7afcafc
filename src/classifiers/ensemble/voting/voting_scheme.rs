use crate::classifiers::ensemble::EnsembleError;
use crate::core::labels::WeightedLabelDistribution;
use std::fmt::Debug;

/// Combines weighted member distributions into one distribution over the shared
/// label universe.
pub trait VotingScheme: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn combine(
        &self,
        member_weights: &[f64],
        distributions: &[Vec<f64>],
    ) -> Result<Vec<f64>, EnsembleError>;
}

/// Checks that weights and distributions line up and returns the number of
/// classes.
pub(crate) fn check_votes(
    member_weights: &[f64],
    distributions: &[Vec<f64>],
) -> Result<usize, EnsembleError> {
    if member_weights.len() != distributions.len() {
        return Err(EnsembleError::MemberCountMismatch {
            expected: distributions.len(),
            found: member_weights.len(),
        });
    }
    for (member, &weight) in member_weights.iter().enumerate() {
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(EnsembleError::InvalidMemberWeight { member, weight });
        }
    }

    let num_classes = distributions.first().map_or(0, Vec::len);
    for (member, dist) in distributions.iter().enumerate() {
        if dist.len() != num_classes {
            return Err(EnsembleError::DimensionMismatch {
                member,
                expected: num_classes,
                found: dist.len(),
            });
        }
    }

    if member_weights.iter().sum::<f64>() <= 0.0 {
        return Err(EnsembleError::AllWeightsZero);
    }
    Ok(num_classes)
}

/// Divides per-class vote sums by the total member weight.
pub(crate) fn normalise_votes(
    vote_sums: &[f64],
    total_weight: f64,
) -> Result<Vec<f64>, EnsembleError> {
    let mut votes = WeightedLabelDistribution::from_counts(vote_sums)?;
    votes.set_weight_sum(total_weight);
    Ok(votes.distribution()?.to_vec())
}
