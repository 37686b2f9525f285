//! Reducer logic for the Todo application.
//!
//! Three pure reducers, leaf first:
//!
//! - [`todo`] computes one item from an optional prior item
//! - [`TodosReducer`] computes the item collection, delegating to [`todo`]
//! - [`VisibilityFilterReducer`] computes the current filter
//!
//! [`todo_app`] combines the two slice reducers into the root reducer over
//! [`TodoAppState`].

use crate::types::{TodoAction, TodoAppState, TodoItem, VisibilityFilter};
use reflow_core::composition::{combine_reducers, scope_reducer, CombinedReducer, CompositionError};
use reflow_core::reducer::Reducer;

/// The root reducer type for the todo application
pub type TodoApp = CombinedReducer<TodoAppState, TodoAction>;

/// Item reducer
///
/// - `ADD_TODO` ignores `prior` and returns a fresh, not completed item.
/// - `TOGGLE_TODO` returns `prior` unchanged unless its id matches, in which
///   case it returns a copy with `completed` negated.
/// - Anything else returns `prior` unchanged.
///
/// A present prior item always yields a present item.
#[must_use]
pub fn todo(prior: Option<&TodoItem>, action: &TodoAction) -> Option<TodoItem> {
    match action {
        TodoAction::AddTodo { id, text } => Some(TodoItem::new(*id, text.clone())),
        TodoAction::ToggleTodo { id } => prior.map(|item| {
            if item.id == *id {
                item.toggled()
            } else {
                item.clone()
            }
        }),
        TodoAction::Init | TodoAction::SetVisibilityFilter { .. } => prior.cloned(),
    }
}

/// Collection reducer for the `todos` slice
#[derive(Clone, Copy, Debug, Default)]
pub struct TodosReducer;

impl Reducer for TodosReducer {
    type State = Vec<TodoItem>;
    type Action = TodoAction;

    fn initial_state(&self) -> Vec<TodoItem> {
        Vec::new()
    }

    fn reduce(&self, state: &Vec<TodoItem>, action: &TodoAction) -> Vec<TodoItem> {
        match action {
            TodoAction::AddTodo { .. } => {
                let mut next = Vec::with_capacity(state.len() + 1);
                next.extend(state.iter().cloned());
                next.extend(todo(None, action));
                next
            }
            TodoAction::ToggleTodo { .. } => state
                .iter()
                .filter_map(|item| todo(Some(item), action))
                .collect(),
            TodoAction::Init | TodoAction::SetVisibilityFilter { .. } => state.clone(),
        }
    }
}

/// Filter reducer for the `visibility_filter` slice
#[derive(Clone, Copy, Debug, Default)]
pub struct VisibilityFilterReducer;

impl Reducer for VisibilityFilterReducer {
    type State = VisibilityFilter;
    type Action = TodoAction;

    fn initial_state(&self) -> VisibilityFilter {
        VisibilityFilter::ShowAll
    }

    fn reduce(&self, state: &VisibilityFilter, action: &TodoAction) -> VisibilityFilter {
        match action {
            TodoAction::SetVisibilityFilter { filter } => *filter,
            TodoAction::Init | TodoAction::AddTodo { .. } | TodoAction::ToggleTodo { .. } => *state,
        }
    }
}

/// Builds the root reducer: `todos` and `visibility_filter` slices
///
/// # Errors
///
/// Returns [`CompositionError`] if the slice registrations conflict.
pub fn todo_app() -> Result<TodoApp, CompositionError> {
    combine_reducers(vec![
        Box::new(scope_reducer(
            "todos",
            TodosReducer,
            |state: &TodoAppState| &state.todos,
            |state, todos| state.todos = todos,
        )),
        Box::new(scope_reducer(
            "visibility_filter",
            VisibilityFilterReducer,
            |state: &TodoAppState| &state.visibility_filter,
            |state, filter| state.visibility_filter = filter,
        )),
    ])
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::TodoId;
    use reflow_testing::ReducerTest;

    fn add(id: u64, text: &str) -> TodoAction {
        TodoAction::AddTodo {
            id: TodoId::new(id),
            text: text.to_string(),
        }
    }

    fn toggle(id: u64) -> TodoAction {
        TodoAction::ToggleTodo { id: TodoId::new(id) }
    }

    fn item(id: u64, text: &str, completed: bool) -> TodoItem {
        TodoItem {
            id: TodoId::new(id),
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn test_todo_add_ignores_prior() {
        let prior = item(9, "old", true);

        assert_eq!(todo(None, &add(1, "new")), Some(item(1, "new", false)));
        assert_eq!(todo(Some(&prior), &add(1, "new")), Some(item(1, "new", false)));
    }

    #[test]
    fn test_todo_toggle_matching_id() {
        let prior = item(1, "a", false);

        assert_eq!(todo(Some(&prior), &toggle(1)), Some(item(1, "a", true)));
        assert!(!prior.completed);
    }

    #[test]
    fn test_todo_toggle_other_id_passes_through() {
        let prior = item(1, "a", false);

        assert_eq!(todo(Some(&prior), &toggle(2)), Some(prior));
    }

    #[test]
    fn test_todo_unrelated_action_passes_through() {
        let prior = item(1, "a", true);
        let filter = TodoAction::SetVisibilityFilter {
            filter: VisibilityFilter::ShowActive,
        };

        assert_eq!(todo(Some(&prior), &filter), Some(prior.clone()));
        assert_eq!(todo(Some(&prior), &TodoAction::Init), Some(prior));
        assert_eq!(todo(None, &TodoAction::Init), None);
    }

    #[test]
    fn test_todo_toggle_without_prior_stays_absent() {
        assert_eq!(todo(None, &toggle(1)), None);
    }

    #[test]
    fn test_todos_default_is_empty() {
        ReducerTest::new(TodosReducer)
            .when_action(TodoAction::Init)
            .then_state(|todos| assert!(todos.is_empty()))
            .run();
    }

    #[test]
    fn test_todos_add_appends() {
        ReducerTest::new(TodosReducer)
            .given_state(vec![item(0, "a", true)])
            .when_action(add(1, "b"))
            .then_state(|todos| {
                assert_eq!(*todos, vec![item(0, "a", true), item(1, "b", false)]);
            })
            .run();
    }

    #[test]
    fn test_todos_add_from_absent_state() {
        ReducerTest::new(TodosReducer)
            .when_action(add(0, "first"))
            .then_state(|todos| assert_eq!(*todos, vec![item(0, "first", false)]))
            .run();
    }

    #[test]
    fn test_todos_toggle_changes_only_matching_item() {
        ReducerTest::new(TodosReducer)
            .given_state(vec![item(0, "a", false), item(1, "b", false), item(2, "c", true)])
            .when_action(toggle(2))
            .then_state(|todos| {
                assert_eq!(
                    *todos,
                    vec![item(0, "a", false), item(1, "b", false), item(2, "c", false)]
                );
            })
            .run();
    }

    #[test]
    fn test_todos_toggle_absent_id_is_noop() {
        ReducerTest::new(TodosReducer)
            .given_state(vec![item(0, "a", false)])
            .when_action(toggle(5))
            .then_unchanged()
            .run();
    }

    #[test]
    fn test_todos_duplicate_ids_toggle_together() {
        // Id uniqueness is the caller's contract; collisions are not rejected
        let todos = TodosReducer.reduce(&vec![item(3, "a", false)], &add(3, "b"));
        assert_eq!(todos.len(), 2);

        let todos = TodosReducer.reduce(&todos, &toggle(3));
        assert!(todos.iter().all(|t| t.completed));
    }

    #[test]
    fn test_todos_ignore_filter_changes() {
        ReducerTest::new(TodosReducer)
            .given_state(vec![item(0, "a", false)])
            .when_action(TodoAction::SetVisibilityFilter {
                filter: VisibilityFilter::ShowCompleted,
            })
            .then_unchanged()
            .run();
    }

    #[test]
    fn test_filter_default_is_show_all() {
        ReducerTest::new(VisibilityFilterReducer)
            .when_action(TodoAction::Init)
            .then_state(|filter| assert_eq!(*filter, VisibilityFilter::ShowAll))
            .run();
    }

    #[test]
    fn test_filter_set() {
        for filter in VisibilityFilter::ALL {
            ReducerTest::new(VisibilityFilterReducer)
                .given_state(VisibilityFilter::ShowCompleted)
                .when_action(TodoAction::SetVisibilityFilter { filter })
                .then_state(move |next| assert_eq!(*next, filter))
                .run();
        }
    }

    #[test]
    fn test_filter_ignores_todo_actions() {
        ReducerTest::new(VisibilityFilterReducer)
            .given_state(VisibilityFilter::ShowActive)
            .when_action(add(0, "a"))
            .then_unchanged()
            .run();
    }

    #[test]
    fn test_todo_app_slices() {
        let app = todo_app().unwrap();
        assert_eq!(app.slice_names(), vec!["todos", "visibility_filter"]);
    }

    #[test]
    fn test_todo_app_initial_state() {
        let app = todo_app().unwrap();

        ReducerTest::new(app)
            .when_action(TodoAction::Init)
            .then_state(|state| {
                assert_eq!(*state, TodoAppState {
                    todos: vec![],
                    visibility_filter: VisibilityFilter::ShowAll,
                });
            })
            .run();
    }

    #[test]
    fn test_todo_app_routes_actions_to_slices() {
        let app = todo_app().unwrap();
        let state = app.initial_state();

        let state = app.reduce(&state, &add(0, "a"));
        let state = app.reduce(
            &state,
            &TodoAction::SetVisibilityFilter {
                filter: VisibilityFilter::ShowActive,
            },
        );

        assert_eq!(state.todos, vec![item(0, "a", false)]);
        assert_eq!(state.visibility_filter, VisibilityFilter::ShowActive);
    }
}
