//! Tests for #[derive(Action)] macro

use reflow_core::action::Action;
use reflow_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum TodoAction {
    #[init]
    Init,

    AddTodo {
        id: u64,
        text: String,
    },

    ToggleTodo {
        id: u64,
    },

    #[action_type = "SET_VISIBILITY_FILTER"]
    SetFilter(String),

    ClearCompleted,
}

#[derive(Action, Clone, Debug, PartialEq)]
enum GenericAction<T: Clone + std::fmt::Debug> {
    #[init]
    Boot,

    Payload(T),
}

#[test]
fn test_init_returns_marked_variant() {
    assert_eq!(TodoAction::init(), TodoAction::Init);
    assert_eq!(TodoAction::init().action_type(), "INIT");
}

#[test]
fn test_named_variant_action_type() {
    let action = TodoAction::AddTodo {
        id: 0,
        text: "a".to_string(),
    };
    assert_eq!(action.action_type(), "ADD_TODO");

    let action = TodoAction::ToggleTodo { id: 0 };
    assert_eq!(action.action_type(), "TOGGLE_TODO");
}

#[test]
fn test_unit_variant_action_type() {
    assert_eq!(TodoAction::ClearCompleted.action_type(), "CLEAR_COMPLETED");
}

#[test]
fn test_action_type_override() {
    let action = TodoAction::SetFilter("SHOW_ALL".to_string());
    assert_eq!(action.action_type(), "SET_VISIBILITY_FILTER");
}

#[test]
fn test_action_types_unique() {
    let actions = vec![
        TodoAction::Init,
        TodoAction::AddTodo {
            id: 1,
            text: "b".to_string(),
        },
        TodoAction::ToggleTodo { id: 1 },
        TodoAction::SetFilter("SHOW_ACTIVE".to_string()),
        TodoAction::ClearCompleted,
    ];

    let mut types: Vec<&str> = actions.iter().map(Action::action_type).collect();
    types.sort_unstable();
    types.dedup();
    assert_eq!(types.len(), actions.len());
}

#[test]
fn test_generic_enum() {
    assert_eq!(GenericAction::<u8>::init(), GenericAction::Boot);
    assert_eq!(GenericAction::Payload(3_u8).action_type(), "PAYLOAD");
}
