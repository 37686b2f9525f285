//! Domain types for the Todo example.
//!
//! A todo list is an ordered collection of items plus a visibility filter.
//! Items are created and toggled through actions; there is no delete.

use reflow_macros::Action;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a todo item
///
/// Assigned by the environment's id generator when an `ADD_TODO` action is
/// built. Uniqueness is a caller contract: the reducers do not check it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from a raw integer
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw integer
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Text of the todo
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new, not yet completed, todo item
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Returns a copy of this item with `completed` negated
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Which todos the view displays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityFilter {
    /// Every todo
    #[default]
    ShowAll,
    /// Todos not yet completed
    ShowActive,
    /// Completed todos
    ShowCompleted,
}

impl VisibilityFilter {
    /// All filters, in footer order
    pub const ALL: [Self; 3] = [Self::ShowAll, Self::ShowActive, Self::ShowCompleted];

    /// Wire name (`SHOW_ALL`, `SHOW_ACTIVE`, `SHOW_COMPLETED`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShowAll => "SHOW_ALL",
            Self::ShowActive => "SHOW_ACTIVE",
            Self::ShowCompleted => "SHOW_COMPLETED",
        }
    }

    /// Footer label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ShowAll => "All",
            Self::ShowActive => "Active",
            Self::ShowCompleted => "Completed",
        }
    }
}

impl std::fmt::Display for VisibilityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A textual filter that is not one of the three known values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown visibility filter '{0}' (expected SHOW_ALL, SHOW_ACTIVE or SHOW_COMPLETED)")]
pub struct ParseFilterError(pub String);

impl FromStr for VisibilityFilter {
    type Err = ParseFilterError;

    /// Accepts wire names and footer labels, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHOW_ALL" | "ALL" => Ok(Self::ShowAll),
            "SHOW_ACTIVE" | "ACTIVE" => Ok(Self::ShowActive),
            "SHOW_COMPLETED" | "COMPLETED" => Ok(Self::ShowCompleted),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

/// Composite state held by the store
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoAppState {
    /// All todos, in insertion order
    pub todos: Vec<TodoItem>,
    /// Current visibility filter
    pub visibility_filter: VisibilityFilter,
}

/// Actions accepted by the todo store
///
/// Serialized with a `type` discriminant, e.g.
/// `{"type":"ADD_TODO","id":0,"text":"a"}`.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    /// Store initialization; no reducer handles it
    #[init]
    Init,

    /// Append a new todo
    AddTodo {
        /// Identifier for the new todo
        id: TodoId,
        /// Text of the new todo
        text: String,
    },

    /// Flip the `completed` flag of the todo with this id
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Change which todos are displayed
    SetVisibilityFilter {
        /// New filter
        filter: VisibilityFilter,
    },
}
