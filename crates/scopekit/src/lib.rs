//! Helpers for tagging and routing state-update actions and their reducers
//! by an instance identifier ("scope"), so multiple instances of the same
//! reusable state logic can coexist in one shared state tree without
//! interfering with each other.
//!
//! The crate intentionally stays small. Every operation is a synchronous,
//! pure transformation over caller-supplied producers, reducers, and state
//! mappings; nothing here schedules, persists, or manages scope lifecycle.

/// Action message, scope identifier, and wire-shape types.
pub mod action;
/// Dispatch-binding walkers for producer, factory, and mixed trees.
pub mod bind;
/// Scoped reducer combinator routing actions by scope identifier.
pub mod reduce_scoped;
/// Action-tree scoping and the scopeable factory wrapper.
pub mod scope;
/// Producer and dispatch callables plus the tagged producer tree.
pub mod tree;

pub use crate::action::{Action, ActionShapeError, ScopeId};
pub use crate::bind::{bind_deep, bind_factories, bind_producers, BindFn, BindNode, FactoryTree};
pub use crate::reduce_scoped::{ScopeState, ScopeStateMap, ScopedReducer, SliceReducer};
pub use crate::scope::{scope_producers, ScopedActionFactory};
pub use crate::tree::{ActionProducer, Args, Dispatch, ProducerTree};
