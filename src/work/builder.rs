//! Work item construction.
//!
//! The central recursive walk over the declared tree. For every suite it
//! decides which children survive the filter, builds them, merges declared
//! priority into structural order, and propagates thread affinity
//! downwards. For every bare method it decides whether setup/teardown
//! synthesis applies.
//!
//! Ordered children are inserted at the front of the child list as they are
//! encountered and the prefix is sorted afterwards. That avoids a full
//! stable sort in the common case where most children are unordered, at the
//! price of reversing the encounter order of the ordered ones first: ties
//! between equal keys come out in reverse declaration order. The prefix
//! sort is stable, so that outcome is at least deterministic.

use std::rc::Rc;

use tracing::trace;

use crate::{
    filter::TestFilter,
    tree::{TestKind, TestNode},
    work::{ThreadAffinity, WorkItem, WorkItemKind, order, synth},
};

/// Build the executable work item tree for `test`.
///
/// A suite becomes a composite holding one work item per child that passes
/// `filter`, in declared order with explicitly ordered children moved to
/// the front (ascending by their `"Order"` key). A method becomes either a
/// simple leaf or, when its fixture declares setup/teardown methods, a
/// composite bracketing it with them.
///
/// `test` itself is accepted unconditionally: the filter is consulted for
/// the children of every visited suite, never for the root. Callers that
/// need the root filtered must check it before building.
///
/// With `recursive` set to `false` a suite yields a composite with no
/// children, a cheap probe of the tree shape. The composite keeps the
/// filter, so children can still be materialized later.
pub fn build(test: &Rc<TestNode>, filter: Rc<dyn TestFilter>, recursive: bool) -> WorkItem {
    let suite = match test.kind() {
        TestKind::Method { .. } => match synth::wrap(test) {
            Some(synthetic) => synthetic,
            None => return WorkItem::simple(test),
        },
        TestKind::Suite { .. } => Rc::clone(test),
    };

    let affinity = ThreadAffinity::of(&suite);

    if !recursive {
        return WorkItem {
            test: suite,
            affinity,
            kind: WorkItemKind::Composite {
                children: Vec::new(),
                filter,
            },
        };
    }

    let mut children: Vec<WorkItem> = Vec::new();
    let mut ordered = 0;
    for child in suite.children() {
        if !filter.pass(child) {
            trace!(test = %child.full_name(), "filtered out");
            continue;
        }

        let mut item = build(child, Rc::clone(&filter), true);
        if item.affinity.is_none() {
            item.affinity = affinity;
        }

        match order::is_ordered(child) {
            true => {
                children.insert(0, item);
                ordered += 1;
            }
            false => children.push(item),
        }
    }

    if ordered > 0 {
        children[..ordered].sort_by(order::compare);
    }

    WorkItem {
        test: suite,
        affinity,
        kind: WorkItemKind::Composite { children, filter },
    }
}
