//! Todo list built on the Reflow architecture.
//!
//! This example shows a complete unidirectional loop:
//!
//! - An item reducer, a collection reducer and a filter reducer
//! - A root reducer combining the `todos` and `visibility_filter` slices
//! - Action creators that assign ids outside the reducers
//! - A terminal view re-rendered by a store subscription
//! - `#[derive(Action)]` for typed action names
//!
//! # Quick Start
//!
//! ```no_run
//! use todo::{todo_app, TodoEnvironment, TodoId};
//! use reflow_runtime::Store;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::default();
//! let store = Store::new(todo_app()?);
//!
//! let _subscription = store.subscribe(|| println!("state changed"));
//!
//! store.dispatch(env.add_todo("Buy milk")?)?;
//! store.dispatch(TodoEnvironment::toggle_todo(TodoId::new(0)))?;
//!
//! let state = store.get_state();
//! println!("{}", todo::view::render(&state));
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod command;
pub mod config;
pub mod environment;
pub mod reducer;
pub mod selectors;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use app::{AppError, Outcome, TodoApplication, TodoStore};
pub use command::{Command, CommandError};
pub use config::Config;
pub use environment::TodoEnvironment;
pub use reducer::{todo, todo_app, TodoApp, TodosReducer, VisibilityFilterReducer};
pub use types::{
    ParseFilterError, TodoAction, TodoAppState, TodoId, TodoItem, VisibilityFilter,
};
