//! Action-tree scoping and the scopeable factory wrapper.

use crate::action::ScopeId;
use crate::tree::{ActionProducer, ProducerTree};

/// Tags every producer in `tree` with `scope`.
///
/// The result has the same shape as the input: a leaf stays a leaf, a branch
/// keeps its key structure at every depth. Each wrapped producer invokes the
/// original with the same arguments and returns a copy of its action with the
/// scope tag set, overwriting any tag already present. The input tree is left
/// untouched and its producers keep their original behavior.
pub fn scope_producers(tree: &ProducerTree, scope: &ScopeId) -> ProducerTree {
    tree.map_leaves(&|producer| {
        let producer = producer.clone();
        let scope = scope.clone();
        ActionProducer::new(move |args| producer.call(args).scoped(&scope))
    })
}

/// Marks a producer tree as scopeable so tree walkers can tell it apart from
/// plain nested producers.
///
/// The wrapper owns the tree it was given and is immutable after
/// construction; [`scope`](ScopedActionFactory::scope) materializes a tagged
/// copy per scope without consuming the original.
#[derive(Clone, Debug)]
pub struct ScopedActionFactory {
    producers: ProducerTree,
}

impl ScopedActionFactory {
    /// Wraps a producer tree.
    pub fn new(producers: ProducerTree) -> Self {
        Self { producers }
    }

    /// Returns a copy of the wrapped tree with every producer tagged by
    /// `scope`.
    pub fn scope(&self, scope: impl Into<ScopeId>) -> ProducerTree {
        scope_producers(&self.producers, &scope.into())
    }

    /// The wrapped, unscoped producer tree.
    pub fn producers(&self) -> &ProducerTree {
        &self.producers
    }
}
