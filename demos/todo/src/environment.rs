//! Action creators for the Todo application.

use crate::types::{TodoAction, TodoId, VisibilityFilter};
use reflow_core::environment::{IdGenerator, IdsExhausted, SequentialIds};
use std::sync::Arc;

/// Environment dependencies for building todo actions
///
/// Reducers stay pure: the id of a new todo is assigned here, when the
/// `ADD_TODO` action is built, never inside a reducer.
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of ids for new todos
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Environment whose first todo gets id `first_id`
    #[must_use]
    pub fn starting_at(first_id: u64) -> Self {
        Self::new(Arc::new(SequentialIds::starting_at(first_id)))
    }

    /// Builds an `ADD_TODO` action, consuming one id
    ///
    /// # Errors
    ///
    /// Returns [`IdsExhausted`] if the id generator has run out of ids.
    pub fn add_todo(&self, text: impl Into<String>) -> Result<TodoAction, IdsExhausted> {
        Ok(TodoAction::AddTodo {
            id: TodoId::new(self.ids.next_id()?),
            text: text.into(),
        })
    }

    /// Builds a `TOGGLE_TODO` action
    #[must_use]
    pub const fn toggle_todo(id: TodoId) -> TodoAction {
        TodoAction::ToggleTodo { id }
    }

    /// Builds a `SET_VISIBILITY_FILTER` action
    #[must_use]
    pub const fn set_visibility_filter(filter: VisibilityFilter) -> TodoAction {
        TodoAction::SetVisibilityFilter { filter }
    }
}

impl Default for TodoEnvironment {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}
