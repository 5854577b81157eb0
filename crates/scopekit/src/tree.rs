//! Producer and dispatch callables plus the tagged producer tree.
//!
//! A [`ProducerTree`] is either a single producer or a named tree of them, to
//! arbitrary depth. Walkers match on the tag instead of probing shapes at
//! runtime, and both cases travel through every operation with the same
//! interface.

use crate::action::Action;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Argument list handed to an action producer.
pub type Args = SmallVec<[Value; 4]>;

/// A callable that builds an [`Action`] from caller-supplied arguments.
///
/// Producers are cheap to clone; wrapped producers created by scoping and
/// binding share the original through the same handle.
#[derive(Clone)]
pub struct ActionProducer {
    produce: Arc<dyn Fn(&Args) -> Action + Send + Sync>,
}

impl ActionProducer {
    /// Wraps a closure as a producer.
    pub fn new(produce: impl Fn(&Args) -> Action + Send + Sync + 'static) -> Self {
        Self {
            produce: Arc::new(produce),
        }
    }

    /// Invokes the producer.
    pub fn call(&self, args: &Args) -> Action {
        (self.produce)(args)
    }
}

impl fmt::Debug for ActionProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActionProducer")
    }
}

/// The callable that accepts a finished action and applies it to the overall
/// state container. Conventionally returns the action it was given.
#[derive(Clone)]
pub struct Dispatch {
    send: Arc<dyn Fn(Action) -> Action + Send + Sync>,
}

impl Dispatch {
    /// Wraps a closure as a dispatch target.
    pub fn new(send: impl Fn(Action) -> Action + Send + Sync + 'static) -> Self {
        Self {
            send: Arc::new(send),
        }
    }

    /// Sends an action to the target and returns its return value.
    pub fn call(&self, action: Action) -> Action {
        (self.send)(action)
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Dispatch")
    }
}

/// A single action producer or a named tree of producers.
///
/// Branches own their children, so cycles cannot be constructed and every
/// walk terminates.
#[derive(Clone, Debug)]
pub enum ProducerTree {
    /// A single producer.
    Leaf(ActionProducer),
    /// Named children, each a producer or a further tree.
    Branch(BTreeMap<String, ProducerTree>),
}

impl ProducerTree {
    /// Wraps a closure as a leaf node.
    pub fn leaf(produce: impl Fn(&Args) -> Action + Send + Sync + 'static) -> Self {
        ProducerTree::Leaf(ActionProducer::new(produce))
    }

    /// Builds a branch node from named children.
    pub fn branch<K: Into<String>>(children: impl IntoIterator<Item = (K, ProducerTree)>) -> Self {
        ProducerTree::Branch(
            children
                .into_iter()
                .map(|(key, child)| (key.into(), child))
                .collect(),
        )
    }

    /// Returns the producer when this node is a leaf.
    pub fn as_leaf(&self) -> Option<&ActionProducer> {
        match self {
            ProducerTree::Leaf(producer) => Some(producer),
            ProducerTree::Branch(_) => None,
        }
    }

    /// Returns the child at `key` when this node is a branch.
    pub fn child(&self, key: &str) -> Option<&ProducerTree> {
        match self {
            ProducerTree::Leaf(_) => None,
            ProducerTree::Branch(children) => children.get(key),
        }
    }

    /// Replaces every leaf producer, preserving the key structure at every
    /// depth. The input tree is left untouched.
    pub fn map_leaves(&self, map: &dyn Fn(&ActionProducer) -> ActionProducer) -> ProducerTree {
        match self {
            ProducerTree::Leaf(producer) => ProducerTree::Leaf(map(producer)),
            ProducerTree::Branch(children) => ProducerTree::Branch(
                children
                    .iter()
                    .map(|(key, child)| (key.clone(), child.map_leaves(map)))
                    .collect(),
            ),
        }
    }
}
