//! Reducer composition utilities
//!
//! This module provides utilities for building one root reducer out of
//! independent slice reducers:
//! - **`scope_reducer`**: Focus a reducer on one named field of a larger state
//! - **`combine_reducers`**: Run every scoped slice against the same action
//!
//! Each slice owns exactly one field of the composite state and supplies its
//! own default. The combinator only routes: it never writes a field itself.
//!
//! # Examples
//!
//! ```
//! use reflow_core::composition::{combine_reducers, scope_reducer};
//! use reflow_core::Reducer;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct AppState {
//!     count: i32,
//!     name: String,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Increment,
//!     SetName(String),
//! }
//!
//! struct CountReducer;
//! struct NameReducer;
//!
//! impl Reducer for CountReducer {
//!     type State = i32;
//!     type Action = AppAction;
//!
//!     fn initial_state(&self) -> i32 {
//!         10
//!     }
//!
//!     fn reduce(&self, state: &i32, action: &AppAction) -> i32 {
//!         match action {
//!             AppAction::Increment => state + 1,
//!             AppAction::SetName(_) => *state,
//!         }
//!     }
//! }
//!
//! impl Reducer for NameReducer {
//!     type State = String;
//!     type Action = AppAction;
//!
//!     fn initial_state(&self) -> String {
//!         "anonymous".to_string()
//!     }
//!
//!     fn reduce(&self, state: &String, action: &AppAction) -> String {
//!         match action {
//!             AppAction::SetName(name) => name.clone(),
//!             AppAction::Increment => state.clone(),
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), reflow_core::CompositionError> {
//! let root = combine_reducers(vec![
//!     Box::new(scope_reducer("count", CountReducer, |s: &AppState| &s.count, |s, v| s.count = v)),
//!     Box::new(scope_reducer("name", NameReducer, |s: &AppState| &s.name, |s, v| s.name = v)),
//! ])?;
//!
//! let state = root.reduce_from(None, &AppAction::Increment);
//! assert_eq!(state, AppState { count: 11, name: "anonymous".to_string() });
//! # Ok(())
//! # }
//! ```

use crate::reducer::Reducer;
use thiserror::Error;

/// Errors raised while assembling a combined reducer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    /// Two slices were registered under the same name
    ///
    /// Only names are compared: two differently named slices whose setters
    /// write the same field are not detected.
    #[error("Slice '{0}' is registered more than once")]
    DuplicateSlice(&'static str),
}

/// A reducer focused on one named field of a composite state `S`.
///
/// Implemented by [`ScopedReducer`]; boxed and handed to [`combine_reducers`].
pub trait SliceReducer<S, A> {
    /// Name of the field this slice owns
    fn name(&self) -> &'static str;

    /// Write the slice's own default into `state`
    fn initialize(&self, state: &mut S);

    /// Reduce the slice read from `prior` and write the result into `next`
    fn reduce_into(&self, prior: &S, next: &mut S, action: &A);
}

/// Boxed slice reducer as stored by [`CombinedReducer`]
pub type BoxedSlice<S, A> = Box<dyn SliceReducer<S, A> + Send + Sync>;

/// Scopes a reducer to operate on one field of a larger state.
///
/// `get_state` and `set_state` address the field the slice owns; `name` is used
/// to reject duplicate registrations and for diagnostics.
///
/// # Type Parameters
///
/// - `S`: The composite state type
/// - `R`: The slice reducer (its `State` is the field type)
pub fn scope_reducer<S, R>(
    name: &'static str,
    reducer: R,
    get_state: fn(&S) -> &R::State,
    set_state: fn(&mut S, R::State),
) -> ScopedReducer<S, R>
where
    R: Reducer,
{
    ScopedReducer {
        name,
        reducer,
        get_state,
        set_state,
    }
}

/// A reducer scoped to one field of a composite state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, R>
where
    R: Reducer,
{
    name: &'static str,
    reducer: R,
    get_state: fn(&S) -> &R::State,
    set_state: fn(&mut S, R::State),
}

impl<S, R> std::fmt::Debug for ScopedReducer<S, R>
where
    R: Reducer,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedReducer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<S, R> SliceReducer<S, R::Action> for ScopedReducer<S, R>
where
    R: Reducer,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn initialize(&self, state: &mut S) {
        (self.set_state)(state, self.reducer.initial_state());
    }

    fn reduce_into(&self, prior: &S, next: &mut S, action: &R::Action) {
        let slice = self.reducer.reduce((self.get_state)(prior), action);
        (self.set_state)(next, slice);
    }
}

/// Combines slice reducers into one reducer over the composite state.
///
/// Every slice sees the same action and the *prior* composite state, so slices
/// cannot observe each other's updates within one transition.
///
/// # Errors
///
/// Returns [`CompositionError::DuplicateSlice`] if two slices share a name.
pub fn combine_reducers<S, A>(
    slices: Vec<BoxedSlice<S, A>>,
) -> Result<CombinedReducer<S, A>, CompositionError> {
    let mut seen: Vec<&'static str> = Vec::with_capacity(slices.len());
    for slice in &slices {
        let name = slice.name();
        if seen.contains(&name) {
            return Err(CompositionError::DuplicateSlice(name));
        }
        seen.push(name);
    }

    Ok(CombinedReducer { slices })
}

/// A root reducer built from named slices.
///
/// Created by [`combine_reducers`]. `S::default()` only provides the shell of
/// the composite value: every registered field is overwritten by its slice,
/// both on initialization and on each transition.
pub struct CombinedReducer<S, A> {
    slices: Vec<BoxedSlice<S, A>>,
}

impl<S, A> CombinedReducer<S, A> {
    /// Names of the registered slices, in registration order
    #[must_use]
    pub fn slice_names(&self) -> Vec<&'static str> {
        self.slices.iter().map(|slice| slice.name()).collect()
    }
}

impl<S, A> std::fmt::Debug for CombinedReducer<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("slices", &self.slice_names())
            .finish()
    }
}

impl<S, A> Reducer for CombinedReducer<S, A>
where
    S: Clone + Default,
{
    type State = S;
    type Action = A;

    fn initial_state(&self) -> S {
        let mut state = S::default();
        for slice in &self.slices {
            slice.initialize(&mut state);
        }
        state
    }

    fn reduce(&self, state: &S, action: &A) -> S {
        let mut next = state.clone();
        for slice in &self.slices {
            slice.reduce_into(state, &mut next, action);
        }
        next
    }
}
