use crate::classifiers::ensemble::EnsembleError;
use crate::classifiers::ensemble::voting::{VotingScheme, check_votes, normalise_votes};
use crate::utils::math::argmax;

/// Each member casts its whole weight for its most probable class. Member ties
/// go to the lowest class index.
#[derive(Debug, Default, Clone, Copy)]
pub struct MajorityVote;

impl VotingScheme for MajorityVote {
    fn name(&self) -> &'static str {
        "majority-vote"
    }

    fn combine(
        &self,
        member_weights: &[f64],
        distributions: &[Vec<f64>],
    ) -> Result<Vec<f64>, EnsembleError> {
        let num_classes = check_votes(member_weights, distributions)?;

        let mut sums = vec![0.0; num_classes];
        for (&w, dist) in member_weights.iter().zip(distributions) {
            if let Some(class) = argmax(dist) {
                sums[class] += w;
            }
        }

        normalise_votes(&sums, member_weights.iter().sum())
    }
}
