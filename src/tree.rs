//! The declared test tree.
//!
//! Callers describe their tests as a tree of [`TestNode`]s before anything
//! is built or run: suites own an ordered list of children, methods are the
//! leaves that actually execute. Fixtures are suites that additionally
//! declare setup and teardown methods for the tests beneath them.
//!
//! Ownership flows strictly downward. Every node also keeps a weak back
//! reference to its parent, which is set in place when a suite adopts its
//! children during assembly and only used for upward navigation afterwards.
//!
//! Nodes fabricated by the builder (see the work item module) are marked
//! `exclusive` at construction. The flag is immutable; declared nodes are
//! never retro-marked, the builder fabricates fresh nodes instead.

use std::{
    borrow::Cow,
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{method::MethodDescriptor, property::Properties};

/// A node of the declared test tree.
#[derive(Debug)]
pub struct TestNode {
    name: Cow<'static, str>,
    kind: TestKind,
    properties: Properties,
    parent: RefCell<Weak<TestNode>>,
    exclusive: bool,
}

/// What a [`TestNode`] is.
#[derive(Debug)]
pub enum TestKind {
    /// A container with an ordered child list.
    Suite {
        kind: SuiteKind,
        children: Vec<Rc<TestNode>>,
    },

    /// A leaf representing one runnable unit.
    Method {
        descriptor: Rc<MethodDescriptor>,
        role: MethodRole,
    },
}

/// What a suite represents.
#[derive(Debug)]
pub enum SuiteKind {
    /// A plain grouping suite, for example a namespace.
    Plain,

    /// A fixture owning setup and teardown declarations.
    Fixture(FixtureHooks),

    /// A suite fabricated by the builder to bracket a bare test with its
    /// fixture's setup and teardown methods.
    Synthetic,
}

/// How a method leaf participates in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodRole {
    Test,
    SetUp,
    TearDown,
}

/// The setup and teardown methods a fixture declares.
///
/// Both lists keep their declaration order; the synthesizer replays them in
/// exactly that order around a bracketed test.
#[derive(Debug, Default)]
pub struct FixtureHooks {
    setups: Vec<Rc<MethodDescriptor>>,
    teardowns: Vec<Rc<MethodDescriptor>>,
}

impl FixtureHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_setup(mut self, descriptor: MethodDescriptor) -> Self {
        self.setups.push(Rc::new(descriptor));
        self
    }

    pub fn with_teardown(mut self, descriptor: MethodDescriptor) -> Self {
        self.teardowns.push(Rc::new(descriptor));
        self
    }

    pub fn setups(&self) -> &[Rc<MethodDescriptor>] {
        &self.setups
    }

    pub fn teardowns(&self) -> &[Rc<MethodDescriptor>] {
        &self.teardowns
    }

    pub fn is_empty(&self) -> bool {
        self.setups.is_empty() && self.teardowns.is_empty()
    }
}

impl TestNode {
    /// Create a plain grouping suite and adopt `children`.
    pub fn suite(
        name: impl Into<Cow<'static, str>>,
        properties: Properties,
        children: Vec<Rc<TestNode>>,
    ) -> Rc<Self> {
        Self::container(name.into(), SuiteKind::Plain, properties, children)
    }

    /// Create a fixture suite and adopt `children`.
    pub fn fixture(
        name: impl Into<Cow<'static, str>>,
        properties: Properties,
        hooks: FixtureHooks,
        children: Vec<Rc<TestNode>>,
    ) -> Rc<Self> {
        Self::container(name.into(), SuiteKind::Fixture(hooks), properties, children)
    }

    /// Create a method leaf.
    pub fn method(
        name: impl Into<Cow<'static, str>>,
        properties: Properties,
        descriptor: MethodDescriptor,
    ) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            kind: TestKind::Method {
                descriptor: Rc::new(descriptor),
                role: MethodRole::Test,
            },
            properties,
            parent: RefCell::new(Weak::new()),
            exclusive: false,
        })
    }

    fn container(
        name: Cow<'static, str>,
        kind: SuiteKind,
        properties: Properties,
        children: Vec<Rc<TestNode>>,
    ) -> Rc<Self> {
        let suite = Rc::new(Self {
            name,
            kind: TestKind::Suite { kind, children },
            properties,
            parent: RefCell::new(Weak::new()),
            exclusive: false,
        });
        Self::adopt(&suite);
        suite
    }

    fn adopt(suite: &Rc<Self>) {
        for child in suite.children() {
            *child.parent.borrow_mut() = Rc::downgrade(suite);
        }
    }

    /// An exclusive leaf for a fixture hook method.
    pub(crate) fn hook_leaf(descriptor: &Rc<MethodDescriptor>, role: MethodRole) -> Rc<Self> {
        Rc::new(Self {
            name: descriptor.name.clone(),
            kind: TestKind::Method {
                descriptor: Rc::clone(descriptor),
                role,
            },
            properties: Properties::new(),
            parent: RefCell::new(Weak::new()),
            exclusive: true,
        })
    }

    /// An exclusive stand-in for a declared method leaf.
    ///
    /// Shares the descriptor and clones the properties; the declared node
    /// itself stays untouched.
    pub(crate) fn exclusive_copy(test: &TestNode) -> Rc<Self> {
        let TestKind::Method { descriptor, role } = &test.kind else {
            unreachable!("only method leaves are bracketed");
        };
        Rc::new(Self {
            name: test.name.clone(),
            kind: TestKind::Method {
                descriptor: Rc::clone(descriptor),
                role: *role,
            },
            properties: test.properties.clone(),
            parent: RefCell::new(Weak::new()),
            exclusive: true,
        })
    }

    /// An exclusive synthetic suite bracketing `test`.
    ///
    /// Takes over the method's short name and structural parent, so upward
    /// navigation and computed full names behave as if the suite had been
    /// declared around the method all along.
    pub(crate) fn synthetic(test: &TestNode, children: Vec<Rc<TestNode>>) -> Rc<Self> {
        let suite = Rc::new(Self {
            name: test.name.clone(),
            kind: TestKind::Suite {
                kind: SuiteKind::Synthetic,
                children,
            },
            properties: Properties::new(),
            parent: RefCell::new(test.parent.borrow().clone()),
            exclusive: true,
        });
        Self::adopt(&suite);
        suite
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scope-qualified name, parent chain joined with `::`.
    pub fn full_name(&self) -> String {
        match self.parent() {
            Some(parent) => format!("{}::{}", parent.full_name(), self.name),
            None => self.name.to_string(),
        }
    }

    pub fn kind(&self) -> &TestKind {
        &self.kind
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The enclosing node, if this node has been adopted by one.
    pub fn parent(&self) -> Option<Rc<TestNode>> {
        self.parent.borrow().upgrade()
    }

    /// Whether this node must not run in parallel with its siblings.
    pub fn exclusive(&self) -> bool {
        self.exclusive
    }

    pub fn is_suite(&self) -> bool {
        matches!(self.kind, TestKind::Suite { .. })
    }

    /// The ordered children of a suite; empty for method leaves.
    pub fn children(&self) -> &[Rc<TestNode>] {
        match &self.kind {
            TestKind::Suite { children, .. } => children,
            TestKind::Method { .. } => &[],
        }
    }

    /// The setup/teardown declarations, if this node is a fixture.
    pub fn hooks(&self) -> Option<&FixtureHooks> {
        match &self.kind {
            TestKind::Suite {
                kind: SuiteKind::Fixture(hooks),
                ..
            } => Some(hooks),
            _ => None,
        }
    }

    /// The descriptor of a method leaf.
    pub fn descriptor(&self) -> Option<&Rc<MethodDescriptor>> {
        match &self.kind {
            TestKind::Method { descriptor, .. } => Some(descriptor),
            TestKind::Suite { .. } => None,
        }
    }

    /// The role of a method leaf.
    pub fn role(&self) -> Option<MethodRole> {
        match &self.kind {
            TestKind::Method { role, .. } => Some(*role),
            TestKind::Suite { .. } => None,
        }
    }

    /// The logical fixture of this node.
    ///
    /// A fixture is reachable within at most two parent links: either the
    /// node sits directly under its fixture, or one intermediate grouping
    /// suite (for example a parameterized method group) sits in between.
    pub fn fixture(&self) -> Option<Rc<TestNode>> {
        let parent = self.parent()?;
        if parent.hooks().is_some() {
            return Some(parent);
        }
        let grandparent = parent.parent()?;
        grandparent.hooks().is_some().then_some(grandparent)
    }
}
