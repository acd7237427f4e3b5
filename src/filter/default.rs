use crate::{filter::TestFilter, tree::TestNode};

/// A name-based [`TestFilter`] with include and skip lists.
///
/// Names are matched against the scope-qualified full name, by substring or,
/// with [`Self::with_exact`], by equality. A node passes when
///
/// - its full name does not match any skip pattern, and
/// - the include list is empty, or the node, one of its ancestors, or one
///   of its descendants matches an include pattern.
///
/// Matching ancestors keeps the children of an included suite runnable, and
/// matching descendants keeps the suites above an included test on the path
/// the builder has to walk to reach it.
#[derive(Debug, Default)]
pub struct DefaultFilter {
    exact: bool,
    filter: Vec<String>,
    skip: Vec<String>,
}

impl DefaultFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exact(self, exact: bool) -> Self {
        Self { exact, ..self }
    }

    pub fn extend_filter(mut self, filter: impl IntoIterator<Item = String>) -> Self {
        self.filter.extend(filter);
        self
    }

    pub fn extend_skip(mut self, skip: impl IntoIterator<Item = String>) -> Self {
        self.skip.extend(skip);
        self
    }

    fn matches(&self, patterns: &[String], name: &str) -> bool {
        match self.exact {
            true => patterns.iter().any(|pattern| name == pattern),
            false => patterns.iter().any(|pattern| name.contains(pattern)),
        }
    }

    fn included_here_or_above(&self, test: &TestNode) -> bool {
        if self.matches(&self.filter, &test.full_name()) {
            return true;
        }
        let mut node = test.parent();
        while let Some(current) = node {
            if self.matches(&self.filter, &current.full_name()) {
                return true;
            }
            node = current.parent();
        }
        false
    }

    fn included_below(&self, test: &TestNode) -> bool {
        test.children().iter().any(|child| {
            self.matches(&self.filter, &child.full_name()) || self.included_below(child)
        })
    }
}

impl TestFilter for DefaultFilter {
    fn pass(&self, test: &TestNode) -> bool {
        if self.filter.is_empty() && self.skip.is_empty() {
            return true;
        }

        if self.matches(&self.skip, &test.full_name()) {
            return false;
        }

        self.filter.is_empty() || self.included_here_or_above(test) || self.included_below(test)
    }
}
