use std::{
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use trellis::{
    DefaultFilter, NoFilter, ThreadAffinity, build,
    method::{MethodDescriptor, MethodHandle},
    property::{Properties, keys},
    tree::{FixtureHooks, TestNode},
};

fn method(name: &'static str) -> Rc<TestNode> {
    method_with(name, Properties::new())
}

fn method_with(name: &'static str, properties: Properties) -> Rc<TestNode> {
    TestNode::method(
        name,
        properties,
        MethodDescriptor::new(name, MethodHandle::default()),
    )
}

fn ordered(name: &'static str, key: i64) -> Rc<TestNode> {
    method_with(name, Properties::new().with(keys::ORDER, key))
}

fn names(item: &trellis::WorkItem) -> Vec<String> {
    item.children()
        .iter()
        .map(|child| child.test().name().to_string())
        .collect()
}

#[test]
fn fixture_hooks_bracket_a_selected_test() {
    let test = method("m");
    let hooks = FixtureHooks::new()
        .with_setup(MethodDescriptor::new("s1", MethodHandle::default()))
        .with_teardown(MethodDescriptor::new("t1", MethodHandle::default()));
    let _fixture = TestNode::fixture("F", Properties::new(), hooks, vec![Rc::clone(&test)]);

    let item = build(&test, Rc::new(NoFilter), true);

    assert!(item.is_composite());
    assert_eq!(names(&item), ["s1", "m", "t1"]);
    assert!(item.test().exclusive());
    assert!(item.children().iter().all(|child| child.test().exclusive()));
}

#[test]
fn declared_order_merges_with_priorities() {
    let suite = TestNode::suite(
        "suite",
        Properties::new(),
        vec![method("a"), ordered("b", 5), ordered("c", 1), method("d")],
    );

    let item = build(&suite, Rc::new(NoFilter), true);

    assert_eq!(names(&item), ["c", "b", "a", "d"]);
}

#[test]
fn shallow_builds_probe_the_shape_only() {
    let suite = TestNode::suite(
        "suite",
        Properties::new(),
        vec![method("a"), method("b"), method("c")],
    );

    let item = build(&suite, Rc::new(NoFilter), false);

    assert!(item.is_composite());
    assert!(item.children().is_empty());
}

#[test]
fn name_filters_select_subtrees() {
    let math = TestNode::fixture(
        "Math",
        Properties::new(),
        FixtureHooks::new(),
        vec![method("adds"), method("subtracts")],
    );
    let text = TestNode::fixture(
        "Text",
        Properties::new(),
        FixtureHooks::new(),
        vec![method("trims")],
    );
    let root = TestNode::suite("suite", Properties::new(), vec![math, text]);

    let filter = DefaultFilter::new().extend_filter(["adds".to_string()]);
    let item = build(&root, Rc::new(filter), true);

    assert_eq!(names(&item), ["Math"]);
    assert_eq!(names(&item.children()[0]), ["adds"]);
}

#[test]
fn affinity_inherits_but_never_overwrites() {
    let suite = TestNode::suite(
        "suite",
        Properties::new().with(keys::THREAD_AFFINITY, "main"),
        vec![
            method("free"),
            method_with(
                "pinned",
                Properties::new().with(keys::THREAD_AFFINITY, "dedicated"),
            ),
        ],
    );

    let item = build(&suite, Rc::new(NoFilter), true);

    assert_eq!(item.children()[0].affinity(), Some(ThreadAffinity::Main));
    assert_eq!(
        item.children()[1].affinity(),
        Some(ThreadAffinity::Dedicated)
    );
}

#[test]
fn leaf_work_items_expose_runnable_handles() {
    let hit = Arc::new(AtomicBool::new(false));
    let handle = {
        let hit = Arc::clone(&hit);
        MethodHandle::from_boxed(move || hit.store(true, Ordering::Relaxed))
    };
    let test = TestNode::method("probe", Properties::new(), MethodDescriptor::new("probe", handle));

    let item = build(&test, Rc::new(NoFilter), true);
    let result = item.test().descriptor().expect("leaf has a descriptor").handle.call();

    assert!(result.0.is_ok());
    assert!(hit.load(Ordering::Relaxed));
}

proptest! {
    #[test]
    fn ordered_prefix_partitions_the_children(
        declared in prop::collection::vec(prop::option::of(-5i64..5), 0..12),
    ) {
        let children = declared
            .iter()
            .enumerate()
            .map(|(index, key)| {
                let mut properties = Properties::new();
                if let Some(key) = key {
                    properties.insert(keys::ORDER, *key);
                }
                TestNode::method(
                    format!("test_{index}"),
                    properties,
                    MethodDescriptor::default(),
                )
            })
            .collect();
        let suite = TestNode::suite("suite", Properties::new(), children);

        let item = build(&suite, Rc::new(NoFilter), true);
        prop_assert_eq!(item.children().len(), declared.len());

        // the prefix holds exactly the ordered children, ascending by key
        let ordered_count = declared.iter().filter(|key| key.is_some()).count();
        let prefix_keys = item.children()[..ordered_count]
            .iter()
            .map(|child| child.test().properties().first_int(keys::ORDER))
            .collect::<Option<Vec<_>>>();
        let prefix_keys = prefix_keys.expect("prefix children must carry an order key");
        prop_assert!(prefix_keys.windows(2).all(|pair| pair[0] <= pair[1]));

        // the suffix holds the unordered children in declaration order
        let suffix: Vec<_> = item.children()[ordered_count..]
            .iter()
            .map(|child| child.test().name().to_string())
            .collect();
        let expected: Vec<_> = declared
            .iter()
            .enumerate()
            .filter(|(_, key)| key.is_none())
            .map(|(index, _)| format!("test_{index}"))
            .collect();
        prop_assert_eq!(suffix, expected);
    }
}
