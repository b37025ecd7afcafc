mod majority_confidence;
mod majority_vote;
mod voting_scheme;

pub use majority_confidence::MajorityConfidence;
pub use majority_vote::MajorityVote;
pub use voting_scheme::VotingScheme;
pub(crate) use voting_scheme::{check_votes, normalise_votes};
