use crate::{filter::TestFilter, tree::TestNode};

/// A [`TestFilter`] that does not filter out any tests.
///
/// Every candidate child passes, so the built tree mirrors the declared
/// tree (up to synthesis).
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct NoFilter;

impl NoFilter {
    pub fn new() -> Self {
        Self
    }
}

impl TestFilter for NoFilter {
    fn pass(&self, _: &TestNode) -> bool {
        true
    }
}
