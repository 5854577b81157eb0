//! Core action message and scope identifier types.
//!
//! An [`Action`] is the wire shape downstream consumers compile against: a
//! required `type` tag, an optional `scopeID` tag added by scoping, and any
//! number of caller-defined payload fields that pass through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Opaque identifier distinguishing one logical instance of a reusable
/// component's state from another. Callers pick the value; uniqueness is
/// their responsibility.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeId {
    /// Numeric identifier.
    Num(i64),
    /// Textual identifier.
    Text(String),
}

impl From<i64> for ScopeId {
    fn from(value: i64) -> Self {
        ScopeId::Num(value)
    }
}

impl From<&str> for ScopeId {
    fn from(value: &str) -> Self {
        ScopeId::Text(value.to_owned())
    }
}

impl From<String> for ScopeId {
    fn from(value: String) -> Self {
        ScopeId::Text(value)
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeId::Num(value) => write!(f, "{value}"),
            ScopeId::Text(value) => f.write_str(value),
        }
    }
}

impl ScopeId {
    /// Converts the identifier into its JSON representation.
    pub fn into_value(self) -> Value {
        match self {
            ScopeId::Num(value) => Value::from(value),
            ScopeId::Text(value) => Value::String(value),
        }
    }
}

/// An immutable state-change message.
///
/// Serializes as `{"type": ..., "scopeID": ..., <payload fields>}` with
/// `scopeID` omitted while the action is unscoped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// The action's type tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Scope tag set by scoping; `None` until then.
    #[serde(rename = "scopeID", skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<ScopeId>,
    /// Caller-defined fields, carried through untouched.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Action {
    /// Creates an unscoped action with an empty payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            scope_id: None,
            payload: Map::new(),
        }
    }

    /// Adds one payload field, builder style.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    /// Looks up a payload field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Returns a copy of this action tagged with `scope`.
    ///
    /// An existing scope tag is overwritten; every other field is preserved.
    pub fn scoped(&self, scope: &ScopeId) -> Action {
        Action {
            scope_id: Some(scope.clone()),
            ..self.clone()
        }
    }

    /// Validates a foreign JSON value into an action.
    ///
    /// Fails fast on anything that is not an object with a textual `type`
    /// field and, when present, a string-or-integer `scopeID`.
    pub fn from_value(value: Value) -> Result<Self, ActionShapeError> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => return Err(ActionShapeError::NotAnObject(json_kind(&other))),
        };
        let kind = match fields.remove("type") {
            Some(Value::String(kind)) => kind,
            Some(other) => return Err(ActionShapeError::KindNotText(json_kind(&other))),
            None => return Err(ActionShapeError::MissingKind),
        };
        let scope_id = match fields.remove("scopeID") {
            None => None,
            Some(Value::String(text)) => Some(ScopeId::Text(text)),
            Some(Value::Number(num)) => match num.as_i64() {
                Some(num) => Some(ScopeId::Num(num)),
                None => return Err(ActionShapeError::InvalidScopeId),
            },
            Some(_) => return Err(ActionShapeError::InvalidScopeId),
        };
        Ok(Self {
            kind,
            scope_id,
            payload: fields,
        })
    }

    /// Converts the action into its JSON wire shape.
    pub fn into_value(self) -> Value {
        let mut fields = self.payload;
        fields.insert("type".to_owned(), Value::String(self.kind));
        if let Some(scope) = self.scope_id {
            fields.insert("scopeID".to_owned(), scope.into_value());
        }
        Value::Object(fields)
    }
}

/// Structural errors raised when validating a foreign value into an [`Action`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionShapeError {
    /// The value was not a JSON object.
    #[error("action must be an object, got {0}")]
    NotAnObject(&'static str),

    /// The object had no `type` field.
    #[error("action is missing the required `type` field")]
    MissingKind,

    /// The `type` field was not a string.
    #[error("action `type` must be a string, got {0}")]
    KindNotText(&'static str),

    /// The `scopeID` field was neither a string nor an integer.
    #[error("action `scopeID` must be a string or an integer")]
    InvalidScopeId,
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
