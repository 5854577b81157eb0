//! Dispatch-binding walkers for producer, factory, and mixed trees.

use crate::action::Action;
use crate::scope::ScopedActionFactory;
use crate::tree::{ActionProducer, Args, Dispatch, ProducerTree};
use log::{debug, trace};
use std::collections::BTreeMap;

/// Alternative leaf-binding strategy for [`bind_factories`].
pub type BindFn = dyn Fn(&ProducerTree, &Dispatch) -> ProducerTree;

/// Binds every producer in `tree` to `dispatch` (the default strategy).
///
/// Each bound producer builds its action, hands it to `dispatch`, and returns
/// dispatch's return value. Shape and key structure are preserved.
pub fn bind_producers(tree: &ProducerTree, dispatch: &Dispatch) -> ProducerTree {
    tree.map_leaves(&|producer| {
        let producer = producer.clone();
        let dispatch = dispatch.clone();
        ActionProducer::new(move |args| dispatch.call(producer.call(args)))
    })
}

/// A tree whose terminal values are scopeable factories.
#[derive(Clone, Debug)]
pub enum FactoryTree {
    /// A single factory.
    Leaf(ScopedActionFactory),
    /// Named children, each a factory or a further tree.
    Branch(BTreeMap<String, FactoryTree>),
}

impl FactoryTree {
    /// Wraps a factory as a leaf node.
    pub fn leaf(factory: ScopedActionFactory) -> Self {
        FactoryTree::Leaf(factory)
    }

    /// Builds a branch node from named children.
    pub fn branch<K: Into<String>>(children: impl IntoIterator<Item = (K, FactoryTree)>) -> Self {
        FactoryTree::Branch(
            children
                .into_iter()
                .map(|(key, child)| (key.into(), child))
                .collect(),
        )
    }
}

/// Replaces every factory in `tree` with the binding of its unscoped
/// producer tree.
///
/// Uses [`bind_producers`] unless `bind` supplies another strategy, in which
/// case that strategy is applied to every factory's tree instead. A single
/// factory in yields that factory's bound tree out; a branch keeps its key
/// structure.
pub fn bind_factories(
    tree: &FactoryTree,
    dispatch: &Dispatch,
    bind: Option<&BindFn>,
) -> ProducerTree {
    match tree {
        FactoryTree::Leaf(factory) => match bind {
            Some(bind) => {
                trace!("binding factory tree with a caller-supplied strategy");
                bind(factory.producers(), dispatch)
            }
            None => bind_producers(factory.producers(), dispatch),
        },
        FactoryTree::Branch(children) => ProducerTree::Branch(
            children
                .iter()
                .map(|(key, child)| (key.clone(), bind_factories(child, dispatch, bind)))
                .collect(),
        ),
    }
}

/// A node in a mixed bindable tree: a plain producer, a scopeable factory,
/// or further named children.
#[derive(Clone, Debug)]
pub enum BindNode {
    /// A plain action producer.
    Producer(ActionProducer),
    /// A scopeable factory embedded directly in the tree.
    Factory(ScopedActionFactory),
    /// Named children, each itself a bindable node.
    Branch(BTreeMap<String, BindNode>),
}

impl BindNode {
    /// Wraps a closure as a plain producer node.
    pub fn producer(produce: impl Fn(&Args) -> Action + Send + Sync + 'static) -> Self {
        BindNode::Producer(ActionProducer::new(produce))
    }

    /// Wraps a factory as a node.
    pub fn factory(factory: ScopedActionFactory) -> Self {
        BindNode::Factory(factory)
    }

    /// Builds a branch node from named children.
    pub fn branch<K: Into<String>>(children: impl IntoIterator<Item = (K, BindNode)>) -> Self {
        BindNode::Branch(
            children
                .into_iter()
                .map(|(key, child)| (key.into(), child))
                .collect(),
        )
    }

    /// Returns the child at `key` when this node is a branch.
    pub fn child(&self, key: &str) -> Option<&BindNode> {
        match self {
            BindNode::Branch(children) => children.get(key),
            _ => None,
        }
    }

    /// Whether this node is a scopeable factory rather than a plain producer
    /// or subtree.
    pub fn is_factory(&self) -> bool {
        matches!(self, BindNode::Factory(_))
    }
}

impl From<ProducerTree> for BindNode {
    fn from(tree: ProducerTree) -> Self {
        match tree {
            ProducerTree::Leaf(producer) => BindNode::Producer(producer),
            ProducerTree::Branch(children) => BindNode::Branch(
                children
                    .into_iter()
                    .map(|(key, child)| (key, BindNode::from(child)))
                    .collect(),
            ),
        }
    }
}

/// Binds every leaf of a mixed tree to `dispatch`.
///
/// Plain producers are bound directly. A factory is bound through its stored
/// tree without acquiring a scope: in the common pattern a caller scopes the
/// factory first and deep-binds the resulting plain tree, so the factory
/// branch only fires when one is embedded unscoped. Recursion is unbounded
/// in depth; branches own their children, so cyclic inputs cannot be
/// constructed.
pub fn bind_deep(node: &BindNode, dispatch: &Dispatch) -> ProducerTree {
    match node {
        BindNode::Producer(producer) => {
            bind_producers(&ProducerTree::Leaf(producer.clone()), dispatch)
        }
        BindNode::Factory(factory) => {
            debug!("deep-binding a scopeable factory without a scope tag");
            bind_producers(factory.producers(), dispatch)
        }
        BindNode::Branch(children) => ProducerTree::Branch(
            children
                .iter()
                .map(|(key, child)| (key.clone(), bind_deep(child, dispatch)))
                .collect(),
        ),
    }
}
