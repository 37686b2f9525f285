//! Read-side queries over [`TodoAppState`].

use crate::types::{TodoAppState, TodoItem, VisibilityFilter};

/// Todos shown under `filter`, in insertion order
///
/// The match is exhaustive: every filter value has a defined result.
#[must_use]
pub fn visible_todos(todos: &[TodoItem], filter: VisibilityFilter) -> Vec<&TodoItem> {
    match filter {
        VisibilityFilter::ShowAll => todos.iter().collect(),
        VisibilityFilter::ShowActive => todos.iter().filter(|t| !t.completed).collect(),
        VisibilityFilter::ShowCompleted => todos.iter().filter(|t| t.completed).collect(),
    }
}

/// Todos shown under the state's current filter
#[must_use]
pub fn visible(state: &TodoAppState) -> Vec<&TodoItem> {
    visible_todos(&state.todos, state.visibility_filter)
}

/// Number of todos not yet completed
#[must_use]
pub fn active_count(todos: &[TodoItem]) -> usize {
    todos.iter().filter(|t| !t.completed).count()
}

/// Number of completed todos
#[must_use]
pub fn completed_count(todos: &[TodoItem]) -> usize {
    todos.iter().filter(|t| t.completed).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoId;

    fn sample() -> Vec<TodoItem> {
        vec![
            TodoItem {
                id: TodoId::new(1),
                text: "one".to_string(),
                completed: false,
            },
            TodoItem {
                id: TodoId::new(2),
                text: "two".to_string(),
                completed: true,
            },
        ]
    }

    fn ids(items: &[&TodoItem]) -> Vec<u64> {
        items.iter().map(|t| t.id.value()).collect()
    }

    #[test]
    fn show_all_returns_everything_in_order() {
        let todos = sample();
        assert_eq!(ids(&visible_todos(&todos, VisibilityFilter::ShowAll)), vec![1, 2]);
    }

    #[test]
    fn show_active_returns_incomplete_only() {
        let todos = sample();
        assert_eq!(ids(&visible_todos(&todos, VisibilityFilter::ShowActive)), vec![1]);
    }

    #[test]
    fn show_completed_returns_completed_only() {
        let todos = sample();
        assert_eq!(ids(&visible_todos(&todos, VisibilityFilter::ShowCompleted)), vec![2]);
    }

    #[test]
    fn visible_uses_state_filter() {
        let state = TodoAppState {
            todos: sample(),
            visibility_filter: VisibilityFilter::ShowCompleted,
        };
        assert_eq!(ids(&visible(&state)), vec![2]);
    }

    #[test]
    fn counts() {
        let todos = sample();
        assert_eq!(active_count(&todos), 1);
        assert_eq!(completed_count(&todos), 1);
        assert_eq!(active_count(&[]), 0);
    }
}
