//! Executable work items.
//!
//! The builder turns a declared test tree into a tree of work items, the
//! units an execution engine walks top-down to actually run things. A
//! [`WorkItem`] is either simple (runs exactly one test method, no
//! children) or composite (owns an ordered child list plus the filter that
//! built it).
//!
//! Child order inside a composite is significant: explicitly ordered
//! children come first, ascending by their order key, followed by the
//! unordered children in declaration order. Setup/teardown bracketing shows
//! up as synthetic composites whose target test was fabricated during the
//! build; those are marked exclusive so an engine never interleaves them.

use std::{fmt, rc::Rc};

use tracing::warn;

use crate::{filter::TestFilter, property::keys, tree::TestNode};

mod builder;
pub use builder::*;

mod order;
mod synth;

/// A declared constraint on the execution context of a work item.
///
/// Stored as a `"ThreadAffinity"` property on the test. An item without an
/// affinity of its own inherits its parent's while the tree is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadAffinity {
    /// Must execute on the engine's main thread.
    Main,

    /// Must execute on a thread dedicated to this item.
    Dedicated,
}

impl ThreadAffinity {
    /// The affinity `test` declares through its properties, if any.
    ///
    /// Unknown values are ignored, the test then behaves as if it had
    /// declared nothing.
    fn of(test: &TestNode) -> Option<Self> {
        match test.properties().first_str(keys::THREAD_AFFINITY)? {
            "main" => Some(Self::Main),
            "dedicated" => Some(Self::Dedicated),
            other => {
                warn!(
                    test = %test.full_name(),
                    value = other,
                    "ignoring unknown thread affinity"
                );
                None
            }
        }
    }
}

impl fmt::Display for ThreadAffinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Dedicated => write!(f, "dedicated"),
        }
    }
}

/// A node of the executable tree.
#[derive(Debug)]
pub struct WorkItem {
    test: Rc<TestNode>,
    affinity: Option<ThreadAffinity>,
    kind: WorkItemKind,
}

/// What a [`WorkItem`] is.
pub enum WorkItemKind {
    /// Runs exactly one test method.
    Simple,

    /// Owns an ordered list of child work items and the filter they were
    /// built with.
    Composite {
        children: Vec<WorkItem>,
        filter: Rc<dyn TestFilter>,
    },
}

impl fmt::Debug for WorkItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "Simple"),
            Self::Composite { children, .. } => f
                .debug_struct("Composite")
                .field("children", children)
                .finish_non_exhaustive(),
        }
    }
}

impl WorkItem {
    pub(crate) fn simple(test: &Rc<TestNode>) -> Self {
        Self {
            affinity: ThreadAffinity::of(test),
            test: Rc::clone(test),
            kind: WorkItemKind::Simple,
        }
    }

    /// The test this item executes.
    pub fn test(&self) -> &Rc<TestNode> {
        &self.test
    }

    /// The affinity requirement, own or inherited.
    pub fn affinity(&self) -> Option<ThreadAffinity> {
        self.affinity
    }

    pub fn kind(&self) -> &WorkItemKind {
        &self.kind
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.kind, WorkItemKind::Composite { .. })
    }

    /// The ordered children of a composite; empty for simple items.
    pub fn children(&self) -> &[WorkItem] {
        match &self.kind {
            WorkItemKind::Composite { children, .. } => children,
            WorkItemKind::Simple => &[],
        }
    }

    /// The filter a composite was built with.
    pub fn filter(&self) -> Option<&Rc<dyn TestFilter>> {
        match &self.kind {
            WorkItemKind::Composite { filter, .. } => Some(filter),
            WorkItemKind::Simple => None,
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, branch: &str, prefix: &str) -> fmt::Result {
        write!(f, "{branch}{}", self.test.name())?;
        if self.test.exclusive() {
            write!(f, " [exclusive]")?;
        }
        if let Some(affinity) = self.affinity {
            write!(f, " [affinity={affinity}]")?;
        }
        writeln!(f)?;

        let children = self.children();
        for (index, child) in children.iter().enumerate() {
            match index + 1 == children.len() {
                true => child.fmt_node(f, &format!("{prefix}└─ "), &format!("{prefix}   "))?,
                false => child.fmt_node(f, &format!("{prefix}├─ "), &format!("{prefix}│  "))?,
            }
        }
        Ok(())
    }
}

/// Renders the tree with branch glyphs, one item per line.
impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, "", "")
    }
}
