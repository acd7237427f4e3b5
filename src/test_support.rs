use std::rc::Rc;

use crate::{
    method::MethodDescriptor,
    property::{Properties, keys},
    tree::{FixtureHooks, TestNode},
    work::WorkItem,
};

macro_rules! props {
    ($($name:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut props = $crate::property::Properties::new();
        $(props.insert($name, $value);)*
        props
    }};
}

pub(crate) use props;

pub(crate) fn descriptor(name: &'static str) -> MethodDescriptor {
    MethodDescriptor::new(name, Default::default())
}

pub(crate) fn method(name: &'static str) -> Rc<TestNode> {
    method_with(name, Properties::new())
}

pub(crate) fn method_with(name: &'static str, properties: Properties) -> Rc<TestNode> {
    TestNode::method(name, properties, descriptor(name))
}

pub(crate) fn ordered(name: &'static str, key: i64) -> Rc<TestNode> {
    method_with(name, props! { keys::ORDER => key })
}

pub(crate) fn plain_fixture(name: &'static str, children: Vec<Rc<TestNode>>) -> Rc<TestNode> {
    TestNode::fixture(name, Properties::new(), FixtureHooks::new(), children)
}

pub(crate) fn hooked_fixture(
    name: &'static str,
    setups: &[&'static str],
    teardowns: &[&'static str],
    children: Vec<Rc<TestNode>>,
) -> Rc<TestNode> {
    let mut hooks = FixtureHooks::new();
    for setup in setups {
        hooks = hooks.with_setup(descriptor(setup));
    }
    for teardown in teardowns {
        hooks = hooks.with_teardown(descriptor(teardown));
    }
    TestNode::fixture(name, Properties::new(), hooks, children)
}

pub(crate) fn child_names(item: &WorkItem) -> Vec<&str> {
    item.children()
        .iter()
        .map(|child| child.test().name())
        .collect()
}
