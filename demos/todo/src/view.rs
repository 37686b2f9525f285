//! Terminal rendering of the todo list.
//!
//! ```text
//! Add a todo: add <text>
//!
//!   0 [ ] Buy milk
//!   1 [x] ~~Write docs~~
//!
//! Show: All [Active] [Completed]
//! ```

use crate::selectors::visible;
use crate::types::{TodoAppState, TodoItem, VisibilityFilter};
use std::fmt::Write;

/// Hint shown above the list
pub const ADD_HINT: &str = "Add a todo: add <text>";

/// Renders the whole view: hint, visible todos and filter footer
#[must_use]
pub fn render(state: &TodoAppState) -> String {
    let mut out = String::new();
    out.push_str(ADD_HINT);
    out.push_str("\n\n");

    let todos = visible(state);
    if todos.is_empty() {
        out.push_str("  (nothing to show)\n");
    }
    for todo in todos {
        out.push_str(&render_item(todo));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&render_footer(state.visibility_filter));
    out
}

/// One list line: id, completion marker and text
#[must_use]
pub fn render_item(todo: &TodoItem) -> String {
    if todo.completed {
        format!("{:>3} [x] ~~{}~~", todo.id, todo.text)
    } else {
        format!("{:>3} [ ] {}", todo.id, todo.text)
    }
}

/// Filter footer; the active filter is plain, the others are `[links]`
#[must_use]
pub fn render_footer(current: VisibilityFilter) -> String {
    let mut footer = String::from("Show:");
    for filter in VisibilityFilter::ALL {
        let _ = if filter == current {
            write!(footer, " {}", filter.label())
        } else {
            write!(footer, " [{}]", filter.label())
        };
    }
    footer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TodoId;

    fn state(filter: VisibilityFilter) -> TodoAppState {
        TodoAppState {
            todos: vec![
                TodoItem::new(TodoId::new(0), "Buy milk"),
                TodoItem::new(TodoId::new(1), "Write docs").toggled(),
            ],
            visibility_filter: filter,
        }
    }

    #[test]
    fn renders_markers_and_strikethrough() {
        let out = render(&state(VisibilityFilter::ShowAll));

        assert!(out.starts_with(ADD_HINT));
        assert!(out.contains("  0 [ ] Buy milk\n"));
        assert!(out.contains("  1 [x] ~~Write docs~~\n"));
        assert!(out.ends_with("Show: All [Active] [Completed]"));
    }

    #[test]
    fn renders_only_visible_todos() {
        let out = render(&state(VisibilityFilter::ShowActive));

        assert!(out.contains("Buy milk"));
        assert!(!out.contains("Write docs"));
        assert!(out.ends_with("Show: [All] Active [Completed]"));
    }

    #[test]
    fn renders_placeholder_for_empty_list() {
        let out = render(&TodoAppState::default());
        assert!(out.contains("(nothing to show)"));
    }

    #[test]
    fn footer_marks_current_filter() {
        assert_eq!(
            render_footer(VisibilityFilter::ShowCompleted),
            "Show: [All] [Active] Completed"
        );
    }
}
