//! Setup and teardown synthesis.
//!
//! A test method can end up being built without a conventional container
//! around it, for example when a filter picked a single test out of a
//! fixture. If the fixture declares setup or teardown methods, running the
//! bare method alone would skip them. The synthesizer closes that gap: it
//! fabricates a suite around the method whose children replay the declared
//! setups, the test itself, and the declared teardowns in exactly that
//! order.
//!
//! The whole fabricated group is exclusive. Every node in it is constructed
//! fresh with the flag already set, so a parallel scheduling decision made
//! before synthesis cannot survive it.

use std::rc::Rc;

use tracing::debug;

use crate::tree::{MethodRole, TestNode};

/// Bracket `test` with its fixture's setup and teardown methods.
///
/// Returns `None` when no fixture is reachable within two parent links or
/// when the fixture declares neither setups nor teardowns; the caller
/// treats the test as a plain leaf then.
pub(crate) fn wrap(test: &Rc<TestNode>) -> Option<Rc<TestNode>> {
    let fixture = test.fixture()?;
    let hooks = fixture.hooks()?;
    if hooks.is_empty() {
        return None;
    }

    debug!(
        test = %test.full_name(),
        setups = hooks.setups().len(),
        teardowns = hooks.teardowns().len(),
        "bracketing bare test with fixture hooks"
    );

    let children = hooks
        .setups()
        .iter()
        .map(|descriptor| TestNode::hook_leaf(descriptor, MethodRole::SetUp))
        .chain([TestNode::exclusive_copy(test)])
        .chain(
            hooks
                .teardowns()
                .iter()
                .map(|descriptor| TestNode::hook_leaf(descriptor, MethodRole::TearDown)),
        )
        .collect();

    Some(TestNode::synthetic(test, children))
}
