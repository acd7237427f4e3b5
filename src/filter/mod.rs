//! Test filtering for trellis.
//!
//! A filter decides which declared tests make it into the built work item
//! tree. The builder consults the filter once per candidate child while it
//! walks a suite; a child that does not pass is dropped together with its
//! whole subtree, and nothing can pull it back in later.
//!
//! The root of a build is the one exception: [`crate::build`] never checks
//! the node it was called with against the filter, only the children of
//! every visited suite. Callers that need the root filtered have to check
//! it themselves before building.
//!
//! Implement [`TestFilter`] to define a filter strategy for trellis.

use crate::tree::TestNode;

mod no;
pub use no::*;

mod default;
pub use default::*;

/// A strategy for selecting which declared tests are built.
///
/// A filter is a pure predicate: it must not keep state between calls, and
/// it must be safe to call repeatedly for the same node. The builder treats
/// it as completely opaque.
pub trait TestFilter {
    /// Decide whether `test` is included in the built tree.
    fn pass(&self, test: &TestNode) -> bool;
}

impl<F> TestFilter for F
where
    F: Fn(&TestNode) -> bool,
{
    fn pass(&self, test: &TestNode) -> bool {
        self(test)
    }
}
