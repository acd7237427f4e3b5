//! Child ordering for composite work items.
//!
//! Tests may declare an integer `"Order"` property. The builder places such
//! children before their unordered siblings and sorts exactly that prefix
//! ascending by key. The comparator promises nothing for ties; the
//! builder's stable prefix sort is what keeps them deterministic.

use std::cmp::Ordering;

use crate::{property::keys, tree::TestNode, work::WorkItem};

/// Whether `test` takes part in explicit ordering.
pub(crate) fn is_ordered(test: &TestNode) -> bool {
    test.properties().contains(keys::ORDER)
}

/// The priority key of `test`.
///
/// The first integer `"Order"` value; anything else sorts last.
pub(crate) fn key(test: &TestNode) -> i64 {
    test.properties().first_int(keys::ORDER).unwrap_or(i64::MAX)
}

/// Compare two work items ascending by order key.
pub(crate) fn compare(a: &WorkItem, b: &WorkItem) -> Ordering {
    key(a.test()).cmp(&key(b.test()))
}
