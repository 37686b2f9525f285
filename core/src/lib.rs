//! # Reflow Core
//!
//! Core traits and types for the Reflow architecture.
//!
//! This crate provides the fundamental abstractions for building small,
//! unidirectional state containers: typed actions flow into pure reducers, and
//! the resulting state is published to observers by the runtime `Store`.
//!
//! ## Core Concepts
//!
//! - **State**: Owned, cloneable domain data for a feature
//! - **Action**: A typed description of a requested state transition
//! - **Reducer**: Pure function `(Option<State>, Action) → State`
//! - **Composition**: Named slice reducers combined into one root reducer
//! - **Environment**: Injected dependencies used when *building* actions
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Every transition produces a new value, prior snapshots stay intact
//! - Unknown actions leave state unchanged
//!
//! ## Example
//!
//! ```ignore
//! use reflow_core::reducer::Reducer;
//!
//! struct FilterReducer;
//!
//! impl Reducer for FilterReducer {
//!     type State = Filter;
//!     type Action = AppAction;
//!
//!     fn initial_state(&self) -> Filter {
//!         Filter::ShowAll
//!     }
//!
//!     fn reduce(&self, state: &Filter, action: &AppAction) -> Filter {
//!         match action {
//!             AppAction::SetFilter { filter } => *filter,
//!             _ => *state,
//!         }
//!     }
//! }
//! ```

/// Reducer composition (`combine_reducers`, `scope_reducer`)
pub mod composition;

/// Action module - Typed inputs to reducers
///
/// Actions are transient values: created, dispatched, and discarded. Every
/// action type carries one reserved no-op variant used by the runtime to
/// compute the initial state; no reducer should recognize it.
pub mod action {
    use std::fmt::Debug;

    /// Marker trait for actions that can be dispatched to a store
    ///
    /// Use `#[derive(Action)]` from `reflow-macros` to implement this trait:
    /// the variant marked `#[init]` becomes [`Action::init`] and every
    /// variant's name is exposed in `SCREAMING_SNAKE_CASE` by
    /// [`Action::action_type`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// #[derive(Action, Clone, Debug)]
    /// enum CounterAction {
    ///     #[init]
    ///     Init,
    ///     Increment,
    /// }
    ///
    /// assert_eq!(CounterAction::Increment.action_type(), "INCREMENT");
    /// ```
    pub trait Action: Clone + Debug {
        /// The no-op action used to initialize a store
        fn init() -> Self;

        /// Stable, human-readable discriminant (e.g. `ADD_TODO`)
        ///
        /// Used for logging and metric labels.
        fn action_type(&self) -> &'static str;
    }
}

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action) → State`.
///
/// They contain all business logic, never perform I/O, and never mutate the
/// prior state: each transition returns a new value.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state (or state slice) this reducer computes
    /// - `Action`: The action type this reducer processes
    ///
    /// # Defaults
    ///
    /// A reducer owns its default. When no prior state exists (the first call),
    /// [`Reducer::reduce_from`] starts from [`Reducer::initial_state`]. Combinators
    /// never invent defaults on behalf of a slice.
    ///
    /// # Example
    ///
    /// ```
    /// use reflow_core::reducer::Reducer;
    ///
    /// #[derive(Clone, Debug)]
    /// enum CounterAction {
    ///     Increment,
    ///     Unrelated,
    /// }
    ///
    /// struct CounterReducer;
    ///
    /// impl Reducer for CounterReducer {
    ///     type State = i64;
    ///     type Action = CounterAction;
    ///
    ///     fn initial_state(&self) -> i64 {
    ///         0
    ///     }
    ///
    ///     fn reduce(&self, state: &i64, action: &CounterAction) -> i64 {
    ///         match action {
    ///             CounterAction::Increment => state + 1,
    ///             CounterAction::Unrelated => *state,
    ///         }
    ///     }
    /// }
    ///
    /// assert_eq!(CounterReducer.reduce_from(None, &CounterAction::Increment), 1);
    /// assert_eq!(CounterReducer.reduce(&5, &CounterAction::Unrelated), 5);
    /// ```
    pub trait Reducer {
        /// The state type this reducer computes
        type State;

        /// The action type this reducer processes
        type Action;

        /// State used when no prior state exists
        fn initial_state(&self) -> Self::State;

        /// Compute the next state from a prior state and an action
        ///
        /// Must be total: actions the reducer does not recognize return a value
        /// equal to `state`.
        fn reduce(&self, state: &Self::State, action: &Self::Action) -> Self::State;

        /// Compute the next state from an optional prior state
        ///
        /// An absent prior state is replaced by [`Reducer::initial_state`].
        fn reduce_from(&self, state: Option<&Self::State>, action: &Self::Action) -> Self::State {
            match state {
                Some(state) => self.reduce(state, action),
                None => self.reduce(&self.initial_state(), action),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// Reducers are pure and take no environment. Dependencies such as id
/// generation are used by the imperative shell when it builds actions.
pub mod environment {
    use std::sync::atomic::{AtomicU64, Ordering};
    use thiserror::Error;

    /// The generator has no ids left to hand out
    #[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
    #[error("Id space exhausted: no id available at or after {next}")]
    pub struct IdsExhausted {
        /// Value the generator stopped at
        pub next: u64,
    }

    /// Id generator trait - abstracts id assignment for testability
    ///
    /// Implementations must hand out monotonically increasing ids for the
    /// lifetime of the generator, and fail instead of wrapping around.
    /// Reset semantics are up to the owner.
    pub trait IdGenerator: Send + Sync {
        /// Return the next id
        ///
        /// # Errors
        ///
        /// Returns [`IdsExhausted`] once no further id can be issued.
        fn next_id(&self) -> Result<u64, IdsExhausted>;
    }

    /// Monotonic counter, the production id generator
    ///
    /// Issues ids up to `u64::MAX - 1`; `u64::MAX` marks exhaustion and is
    /// never handed out.
    ///
    /// # Example
    ///
    /// ```
    /// use reflow_core::environment::{IdGenerator, SequentialIds};
    ///
    /// let ids = SequentialIds::starting_at(10);
    /// assert_eq!(ids.next_id(), Ok(10));
    /// assert_eq!(ids.next_id(), Ok(11));
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Create a generator starting at 0
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(0)
        }

        /// Create a generator whose first id is `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: AtomicU64::new(first),
            }
        }

        /// The id the next call to [`IdGenerator::next_id`] will try to issue
        #[must_use]
        pub fn peek(&self) -> u64 {
            self.next.load(Ordering::Relaxed)
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> Result<u64, IdsExhausted> {
            self.next
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
                .map_err(|next| IdsExhausted { next })
        }
    }
}

// Re-export commonly used types
pub use action::Action;
pub use composition::{combine_reducers, scope_reducer, CombinedReducer, CompositionError};
pub use environment::{IdGenerator, IdsExhausted, SequentialIds};
pub use reducer::Reducer;
