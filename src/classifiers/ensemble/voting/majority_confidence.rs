use crate::classifiers::ensemble::EnsembleError;
use crate::classifiers::ensemble::voting::{VotingScheme, check_votes, normalise_votes};

/// Weighted average of the member distributions.
#[derive(Debug, Default, Clone, Copy)]
pub struct MajorityConfidence;

impl VotingScheme for MajorityConfidence {
    fn name(&self) -> &'static str {
        "majority-confidence"
    }

    fn combine(
        &self,
        member_weights: &[f64],
        distributions: &[Vec<f64>],
    ) -> Result<Vec<f64>, EnsembleError> {
        let num_classes = check_votes(member_weights, distributions)?;

        let mut sums = vec![0.0; num_classes];
        for (&w, dist) in member_weights.iter().zip(distributions) {
            for (sum, p) in sums.iter_mut().zip(dist) {
                *sum += w * p;
            }
        }

        normalise_votes(&sums, member_weights.iter().sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_all(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn equal_weights_average_distributions() {
        let combined = MajorityConfidence
            .combine(
                &[1.0, 1.0, 1.0],
                &[vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]],
            )
            .unwrap();
        approx_all(&combined, &[2.0 / 3.0, 1.0 / 3.0]);
    }

    #[test]
    fn weights_shift_the_average() {
        let combined = MajorityConfidence
            .combine(&[3.0, 1.0], &[vec![0.2, 0.8], vec![1.0, 0.0]])
            .unwrap();
        approx_all(&combined, &[0.4, 0.6]);
    }

    #[test]
    fn zero_weight_members_are_ignored() {
        let combined = MajorityConfidence
            .combine(&[0.0, 2.0], &[vec![1.0, 0.0], vec![0.25, 0.75]])
            .unwrap();
        approx_all(&combined, &[0.25, 0.75]);
    }

    #[test]
    fn all_zero_weights_fail() {
        let err = MajorityConfidence
            .combine(&[0.0, 0.0], &[vec![1.0, 0.0], vec![0.0, 1.0]])
            .unwrap_err();
        assert_eq!(err, EnsembleError::AllWeightsZero);
    }

    #[test]
    fn ragged_distributions_fail() {
        let err = MajorityConfidence
            .combine(&[1.0, 1.0], &[vec![1.0, 0.0], vec![0.2, 0.3, 0.5]])
            .unwrap_err();
        assert_eq!(
            err,
            EnsembleError::DimensionMismatch {
                member: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn weight_count_must_match_members() {
        let err = MajorityConfidence
            .combine(&[1.0], &[vec![1.0], vec![1.0]])
            .unwrap_err();
        assert_eq!(
            err,
            EnsembleError::MemberCountMismatch {
                expected: 2,
                found: 1
            }
        );
    }
}
