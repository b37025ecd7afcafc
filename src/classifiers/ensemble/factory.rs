use crate::classifiers::Classifier;

/// Builds the members of an ensemble. Every call must return an independently
/// owned classifier; members never share mutable state.
pub trait ClassifierFactory: Send + Sync {
    /// `seed` is drawn per member from the ensemble seed.
    fn create(&self, member: usize, seed: u64) -> Box<dyn Classifier>;

    fn name(&self) -> &str {
        "classifier"
    }
}

impl<F> ClassifierFactory for F
where
    F: Fn(usize, u64) -> Box<dyn Classifier> + Send + Sync,
{
    fn create(&self, member: usize, seed: u64) -> Box<dyn Classifier> {
        self(member, seed)
    }
}
