//! Integration coverage for the factory binder and the deep binder.

use scopekit::{
    bind_deep, bind_factories, bind_producers, Action, BindNode, Dispatch, FactoryTree,
    ProducerTree, ScopeId, ScopedActionFactory,
};
use serde_json::json;
use smallvec::smallvec;
use std::sync::{Arc, Mutex};

fn counter_tree() -> ProducerTree {
    ProducerTree::branch([
        ("inc", ProducerTree::leaf(|_| Action::new("INC"))),
        ("dec", ProducerTree::leaf(|_| Action::new("DEC"))),
    ])
}

fn recording_dispatch() -> (Dispatch, Arc<Mutex<Vec<Action>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let dispatch = Dispatch::new(move |action: Action| {
        sink.lock().unwrap().push(action.clone());
        action
    });
    (dispatch, seen)
}

/// Calling a bound producer dispatches the produced action.
#[test]
fn default_binding_dispatches_the_produced_action() {
    let (dispatch, seen) = recording_dispatch();
    let bound = bind_producers(&counter_tree(), &dispatch);

    let returned = bound
        .child("inc")
        .and_then(ProducerTree::as_leaf)
        .unwrap()
        .call(&smallvec![]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], returned);
    assert_eq!(returned.kind, "INC");
}

/// The bound producer hands back whatever the dispatch target returns.
#[test]
fn bound_producers_return_the_dispatch_result() {
    let dispatch = Dispatch::new(|action: Action| action.with_field("seen", json!(true)));
    let bound = bind_producers(&ProducerTree::leaf(|_| Action::new("INC")), &dispatch);

    let returned = bound.as_leaf().unwrap().call(&smallvec![]);
    assert_eq!(returned.field("seen"), Some(&json!(true)));
}

/// A single factory in yields that factory's bound tree out, unscoped.
#[test]
fn bind_factories_binds_the_unscoped_tree() {
    let (dispatch, seen) = recording_dispatch();
    let tree = FactoryTree::leaf(ScopedActionFactory::new(counter_tree()));

    let bound = bind_factories(&tree, &dispatch, None);
    bound
        .child("inc")
        .and_then(ProducerTree::as_leaf)
        .unwrap()
        .call(&smallvec![]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].scope_id, None, "factory binder applies no scope");
}

/// A branch of factories keeps its key structure in the bound result.
#[test]
fn bind_factories_preserves_branch_shape() {
    let (dispatch, _seen) = recording_dispatch();
    let tree = FactoryTree::branch([
        ("widget", FactoryTree::leaf(ScopedActionFactory::new(counter_tree()))),
        (
            "nested",
            FactoryTree::branch([(
                "other",
                FactoryTree::leaf(ScopedActionFactory::new(ProducerTree::leaf(|_| {
                    Action::new("PING")
                }))),
            )]),
        ),
    ]);

    let bound = bind_factories(&tree, &dispatch, None);

    assert!(bound
        .child("widget")
        .and_then(|widget| widget.child("dec"))
        .and_then(ProducerTree::as_leaf)
        .is_some());
    assert!(bound
        .child("nested")
        .and_then(|nested| nested.child("other"))
        .and_then(ProducerTree::as_leaf)
        .is_some());
}

/// A caller-supplied strategy replaces the default binding for every factory.
#[test]
fn bind_factories_accepts_a_custom_strategy() {
    let (dispatch, seen) = recording_dispatch();
    let tree = FactoryTree::leaf(ScopedActionFactory::new(counter_tree()));

    let tagging = |producers: &ProducerTree, _dispatch: &Dispatch| {
        producers.map_leaves(&|producer| {
            let producer = producer.clone();
            scopekit::ActionProducer::new(move |args| {
                producer.call(args).with_field("custom", json!(true))
            })
        })
    };

    let bound = bind_factories(&tree, &dispatch, Some(&tagging));
    let action = bound
        .child("inc")
        .and_then(ProducerTree::as_leaf)
        .unwrap()
        .call(&smallvec![]);

    assert_eq!(action.field("custom"), Some(&json!(true)));
    assert!(seen.lock().unwrap().is_empty(), "custom strategy never dispatched");
}

/// Mixed trees bind plain producers directly and factories without a scope.
#[test]
fn deep_binding_mixes_plain_and_factory_leaves() {
    let (dispatch, seen) = recording_dispatch();
    let tree = BindNode::branch([
        ("plain", BindNode::producer(|_| Action::new("PLAIN"))),
        (
            "widget",
            BindNode::factory(ScopedActionFactory::new(counter_tree())),
        ),
    ]);

    let bound = bind_deep(&tree, &dispatch);

    bound
        .child("plain")
        .and_then(ProducerTree::as_leaf)
        .unwrap()
        .call(&smallvec![]);
    bound
        .child("widget")
        .and_then(|widget| widget.child("inc"))
        .and_then(ProducerTree::as_leaf)
        .unwrap()
        .call(&smallvec![]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].kind, "PLAIN");
    assert_eq!(seen[0].scope_id, None);
    assert_eq!(seen[1].kind, "INC");
    assert_eq!(
        seen[1].scope_id, None,
        "embedded factories bind with no scope applied"
    );
}

/// The common pattern: scope a factory first, then deep-bind the plain tree.
#[test]
fn deep_binding_a_scoped_tree_keeps_the_tag() {
    let (dispatch, seen) = recording_dispatch();
    let factory = ScopedActionFactory::new(counter_tree());

    let bound = bind_deep(&BindNode::from(factory.scope("a")), &dispatch);
    bound
        .child("inc")
        .and_then(ProducerTree::as_leaf)
        .unwrap()
        .call(&smallvec![]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].scope_id, Some(ScopeId::from("a")));
}
