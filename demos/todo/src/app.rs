//! Wiring of store, environment and commands.

use crate::command::{Command, HELP};
use crate::config::Config;
use crate::environment::TodoEnvironment;
use crate::reducer::{todo_app, TodoApp};
use crate::types::VisibilityFilter;
use reflow_core::composition::CompositionError;
use reflow_core::environment::IdsExhausted;
use reflow_runtime::{Store, StoreError};
use thiserror::Error;

/// The todo store
pub type TodoStore = Store<TodoApp>;

/// Errors from running the application
#[derive(Error, Debug)]
pub enum AppError {
    /// The root reducer could not be assembled
    #[error(transparent)]
    Composition(#[from] CompositionError),

    /// The store rejected a dispatch
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No id is left for a new todo
    #[error(transparent)]
    Ids(#[from] IdsExhausted),

    /// The state snapshot could not be serialized
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// What the frontend should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An action was dispatched; observers already re-rendered
    Dispatched,
    /// Print this text
    Print(String),
    /// Print the metrics exposition
    Metrics,
    /// Stop reading input
    Quit,
}

/// A store plus the environment used to build its actions
#[derive(Clone, Debug)]
pub struct TodoApplication {
    store: TodoStore,
    env: TodoEnvironment,
}

impl TodoApplication {
    /// Builds the store and applies the configured initial filter
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Composition`] if the root reducer cannot be built.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let app = Self {
            store: Store::new(todo_app()?),
            env: TodoEnvironment::starting_at(config.first_id),
        };

        if config.initial_filter != VisibilityFilter::ShowAll {
            app.store
                .dispatch(TodoEnvironment::set_visibility_filter(config.initial_filter))?;
        }

        tracing::info!(
            first_id = config.first_id,
            filter = %config.initial_filter,
            "Todo application ready"
        );
        Ok(app)
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Runs one command
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if a dispatch is rejected,
    /// [`AppError::Ids`] if `add` finds no id left, or
    /// [`AppError::Serialize`] if `state` cannot be rendered as JSON.
    pub fn execute(&self, command: Command) -> Result<Outcome, AppError> {
        match command {
            Command::Add(text) => {
                self.store.dispatch(self.env.add_todo(text)?)?;
                Ok(Outcome::Dispatched)
            }
            Command::Toggle(id) => {
                self.store.dispatch(TodoEnvironment::toggle_todo(id))?;
                Ok(Outcome::Dispatched)
            }
            Command::Filter(filter) => {
                self.store
                    .dispatch(TodoEnvironment::set_visibility_filter(filter))?;
                Ok(Outcome::Dispatched)
            }
            Command::State => {
                let json = serde_json::to_string_pretty(&*self.store.get_state())?;
                Ok(Outcome::Print(json))
            }
            Command::Metrics => Ok(Outcome::Metrics),
            Command::Help => Ok(Outcome::Print(HELP.to_string())),
            Command::Quit => Ok(Outcome::Quit),
        }
    }
}
