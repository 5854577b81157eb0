//! Scoped reducer combinator routing actions by scope identifier.

use crate::action::{Action, ScopeId};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Per-scope state object, keyed by slice name.
pub type ScopeState = Map<String, Value>;

/// Mapping from scope identifier to that scope's state.
///
/// Entries are shared pointers so scopes untouched by a reduction keep their
/// identity in the result, observable through [`Arc::ptr_eq`].
pub type ScopeStateMap = BTreeMap<ScopeId, Arc<ScopeState>>;

/// A pure reducer for one named state slice.
///
/// Receives `None` when the slice has no previous state and must supply its
/// initial value. For unrecognized action types it must hand back the
/// previous state unchanged.
#[derive(Clone)]
pub struct SliceReducer {
    reduce: Arc<dyn Fn(Option<&Value>, &Action) -> Value + Send + Sync>,
}

impl SliceReducer {
    /// Wraps a closure as a slice reducer.
    pub fn new(reduce: impl Fn(Option<&Value>, &Action) -> Value + Send + Sync + 'static) -> Self {
        Self {
            reduce: Arc::new(reduce),
        }
    }

    /// Invokes the reducer.
    pub fn call(&self, state: Option<&Value>, action: &Action) -> Value {
        (self.reduce)(state, action)
    }
}

impl fmt::Debug for SliceReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SliceReducer")
    }
}

/// Combines named slice reducers into one reducer over a [`ScopeStateMap`],
/// applying them only to the scope named by the incoming action's tag.
#[derive(Clone, Debug)]
pub struct ScopedReducer {
    slices: BTreeMap<String, SliceReducer>,
}

impl ScopedReducer {
    /// Builds the combinator from a mapping of slice name to reducer.
    pub fn new<K: Into<String>>(slices: impl IntoIterator<Item = (K, SliceReducer)>) -> Self {
        Self {
            slices: slices
                .into_iter()
                .map(|(name, reducer)| (name.into(), reducer))
                .collect(),
        }
    }

    /// Routes `action` to the matching scope and returns the next state
    /// mapping.
    ///
    /// The result has exactly the input's key set. The matched scope's state
    /// is rebuilt slice by slice from the reducer mapping; every other entry
    /// is carried over untouched. An action without a scope tag, or tagged
    /// with a scope absent from the mapping, updates nothing. Scopes are
    /// never created here; adding or removing a scope's state is the
    /// caller's responsibility.
    pub fn reduce(&self, state: &ScopeStateMap, action: &Action) -> ScopeStateMap {
        state
            .iter()
            .map(|(scope, prev)| {
                if action.scope_id.as_ref() == Some(scope) {
                    let mut next = ScopeState::new();
                    for (name, reducer) in &self.slices {
                        next.insert(name.clone(), reducer.call(prev.get(name), action));
                    }
                    (scope.clone(), Arc::new(next))
                } else {
                    (scope.clone(), Arc::clone(prev))
                }
            })
            .collect()
    }
}
