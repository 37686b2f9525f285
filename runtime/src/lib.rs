//! # Reflow Runtime
//!
//! Runtime implementation for the Reflow architecture.
//!
//! This crate provides the Store runtime that owns the current state, applies
//! the root reducer to dispatched actions, and notifies observers.
//!
//! ## Core Components
//!
//! - **Store**: Holds the current state snapshot and serializes dispatches
//! - **Subscription**: Handle that removes one observer registration
//! - **Metrics**: Counters and histograms recorded on every dispatch
//!
//! ## Example
//!
//! ```ignore
//! use reflow_runtime::Store;
//!
//! let store = Store::new(todo_app()?);
//!
//! let view = store.downgrade();
//! let subscription = store.subscribe(move || {
//!     if let Some(store) = view.upgrade() {
//!         render(&store.get_state());
//!     }
//! });
//! store.dispatch(TodoAction::AddTodo { id: 0.into(), text: "a".into() })?;
//!
//! let count = store.state(|s| s.todos.len());
//! subscription.unsubscribe();
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Prometheus metrics for observability
pub mod metrics;

/// Observer registration and unsubscribe handles
pub mod subscription;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// An observer dispatched while the Store was notifying observers
        ///
        /// Dispatch is not re-entrant: the state is left untouched and the
        /// action is dropped.
        #[error("Re-entrant dispatch of {action_type} from an observer is not supported")]
        ReentrantDispatch {
            /// Type of the rejected action
            action_type: &'static str,
        },
    }
}

// A panicking observer poisons nothing the Store cannot keep using: every
// guarded value is replaced wholesale, never left half-written.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Store module - The runtime for reducers
pub mod store {
    use super::error::StoreError;
    use super::metrics::{
        ACTIONS_DISPATCHED, OBSERVERS_NOTIFIED, REDUCER_DURATION, REENTRANT_DISPATCH_REJECTED,
    };
    use super::subscription::{Observers, Subscription};
    use super::{lock, read, write};
    use reflow_core::{action::Action, reducer::Reducer};
    use std::sync::{Arc, Mutex, Weak};
    use std::thread::{self, ThreadId};
    use std::time::Instant;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (an immutable `Arc` snapshot, replaced on every dispatch)
    /// 2. Reducer (business logic)
    /// 3. Observers (notified after every state replacement)
    ///
    /// Cloning a Store yields another handle to the same state and observers,
    /// which is how the view layer receives it.
    ///
    /// # Concurrency
    ///
    /// Dispatch is synchronous. Reduce, state replacement and notification run
    /// as one critical section, so observers always see the state their
    /// dispatch produced. Dispatching from inside an observer is rejected with
    /// [`StoreError::ReentrantDispatch`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(todo_app()?);
    ///
    /// store.dispatch(TodoAction::ToggleTodo { id: TodoId::new(1) })?;
    /// let items = store.get_state().todos.clone();
    /// ```
    pub struct Store<R>
    where
        R: Reducer,
    {
        shared: Arc<Shared<R>>,
        observers: Arc<Observers>,
    }

    struct Shared<R>
    where
        R: Reducer,
    {
        reducer: R,
        state: std::sync::RwLock<Arc<R::State>>,
        dispatch_lock: Mutex<()>,
        /// Thread currently inside `dispatch`, used to detect re-entrancy
        dispatching: Mutex<Option<ThreadId>>,
    }

    /// Clears the dispatching-thread marker when dispatch ends, panics included
    struct DispatchOwner<'a> {
        slot: &'a Mutex<Option<ThreadId>>,
    }

    impl<'a> DispatchOwner<'a> {
        fn claim(slot: &'a Mutex<Option<ThreadId>>, thread: ThreadId) -> Self {
            *lock(slot) = Some(thread);
            Self { slot }
        }
    }

    impl Drop for DispatchOwner<'_> {
        fn drop(&mut self) {
            *lock(self.slot) = None;
        }
    }

    impl<R> Store<R>
    where
        R: Reducer,
        R::Action: Action,
    {
        /// Create a new store from a root reducer
        ///
        /// The initial state is the reducer applied to an absent prior state
        /// and the action type's `init()` action, so [`Store::get_state`] never
        /// observes an uninitialized value.
        #[must_use]
        pub fn new(reducer: R) -> Self {
            let init = <R::Action as Action>::init();
            let initial_state = reducer.reduce_from(None, &init);
            tracing::debug!(action_type = init.action_type(), "Store initialized");
            Self::from_parts(reducer, initial_state)
        }

        /// Create a new store starting from a preloaded state
        ///
        /// The `init()` action is still applied to `preloaded`, so every slice
        /// gets a chance to normalize it.
        #[must_use]
        pub fn with_preloaded_state(reducer: R, preloaded: R::State) -> Self {
            let init = <R::Action as Action>::init();
            let initial_state = reducer.reduce(&preloaded, &init);
            tracing::debug!(
                action_type = init.action_type(),
                "Store initialized from preloaded state"
            );
            Self::from_parts(reducer, initial_state)
        }

        fn from_parts(reducer: R, initial_state: R::State) -> Self {
            Self {
                shared: Arc::new(Shared {
                    reducer,
                    state: std::sync::RwLock::new(Arc::new(initial_state)),
                    dispatch_lock: Mutex::new(()),
                    dispatching: Mutex::new(None),
                }),
                observers: Arc::new(Observers::default()),
            }
        }

        /// Current state snapshot
        ///
        /// The returned snapshot is never mutated; later dispatches replace the
        /// Store's snapshot instead.
        #[must_use]
        pub fn get_state(&self) -> Arc<R::State> {
            Arc::clone(&read(&self.shared.state))
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&R::State) -> T,
        {
            f(&self.get_state())
        }

        /// Apply an action and notify observers
        ///
        /// 1. Computes the next state with the root reducer
        /// 2. Replaces the current snapshot
        /// 3. Invokes every observer registered when notification starts, in
        ///    registration order, each exactly once
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ReentrantDispatch`] if called from an observer
        /// while this Store is notifying. The state is left untouched.
        ///
        /// # Panics
        ///
        /// If the reducer or an observer panics, the panic propagates to the
        /// caller. The Store stays usable afterwards.
        #[tracing::instrument(
            skip(self, action),
            fields(action_type = action.action_type()),
            name = "store_dispatch"
        )]
        pub fn dispatch(&self, action: R::Action) -> Result<(), StoreError> {
            let action_type = action.action_type();
            let current = thread::current().id();

            let reentrant = *lock(&self.shared.dispatching) == Some(current);
            if reentrant {
                tracing::warn!("Rejected re-entrant dispatch from an observer");
                metrics::counter!(REENTRANT_DISPATCH_REJECTED, "action_type" => action_type)
                    .increment(1);
                return Err(StoreError::ReentrantDispatch { action_type });
            }

            let _critical = lock(&self.shared.dispatch_lock);
            let _owner = DispatchOwner::claim(&self.shared.dispatching, current);

            metrics::counter!(ACTIONS_DISPATCHED, "action_type" => action_type).increment(1);

            let prior = self.get_state();
            let next = {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = Instant::now();
                let next = self.shared.reducer.reduce(&prior, &action);
                metrics::histogram!(REDUCER_DURATION).record(start.elapsed().as_secs_f64());
                next
            };

            *write(&self.shared.state) = Arc::new(next);
            tracing::debug!("State replaced");

            let observers = self.observers.snapshot();
            tracing::trace!(observers = observers.len(), "Notifying observers");
            for observer in &observers {
                observer();
            }
            metrics::counter!(OBSERVERS_NOTIFIED).increment(observers.len() as u64);

            Ok(())
        }

        /// Register an observer called after every future dispatch
        ///
        /// Registering the same callback twice creates two independent
        /// registrations, each removed by its own [`Subscription`].
        ///
        /// The Store owns its observers, so an observer that reads the Store
        /// should capture [`Store::downgrade`] rather than a `Store` clone.
        pub fn subscribe<F>(&self, observer: F) -> Subscription
        where
            F: Fn() + Send + Sync + 'static,
        {
            self.observers.register(Arc::new(observer))
        }

        /// Number of registered observers
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.observers.len()
        }

        /// Non-owning handle for observers that need to read the store
        ///
        /// An observer holding a `Store` clone keeps the store alive through
        /// its own registry and is never freed. Capture a [`WeakStore`] instead.
        #[must_use]
        pub fn downgrade(&self) -> WeakStore<R> {
            WeakStore {
                shared: Arc::downgrade(&self.shared),
                observers: Arc::downgrade(&self.observers),
            }
        }
    }

    impl<R> Clone for Store<R>
    where
        R: Reducer,
    {
        fn clone(&self) -> Self {
            Self {
                shared: Arc::clone(&self.shared),
                observers: Arc::clone(&self.observers),
            }
        }
    }

    /// Non-owning handle to a [`Store`], obtained with [`Store::downgrade`]
    ///
    /// # Example
    ///
    /// ```ignore
    /// let view = store.downgrade();
    /// let _render = store.subscribe(move || {
    ///     if let Some(store) = view.upgrade() {
    ///         println!("{}", render(&store.get_state()));
    ///     }
    /// });
    /// ```
    pub struct WeakStore<R>
    where
        R: Reducer,
    {
        shared: Weak<Shared<R>>,
        observers: Weak<Observers>,
    }

    impl<R> WeakStore<R>
    where
        R: Reducer,
    {
        /// The store, if any `Store` handle is still alive
        #[must_use]
        pub fn upgrade(&self) -> Option<Store<R>> {
            Some(Store {
                shared: self.shared.upgrade()?,
                observers: self.observers.upgrade()?,
            })
        }
    }

    impl<R> Clone for WeakStore<R>
    where
        R: Reducer,
    {
        fn clone(&self) -> Self {
            Self {
                shared: Weak::clone(&self.shared),
                observers: Weak::clone(&self.observers),
            }
        }
    }

    impl<R> std::fmt::Debug for WeakStore<R>
    where
        R: Reducer,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("WeakStore")
                .field("alive", &(self.shared.strong_count() > 0))
                .finish_non_exhaustive()
        }
    }

    impl<R> std::fmt::Debug for Store<R>
    where
        R: Reducer,
        R::State: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("state", &*read(&self.shared.state))
                .field("observers", &self.observers)
                .finish_non_exhaustive()
        }
    }
}

// Re-export for convenience
pub use error::StoreError;
pub use store::{Store, WeakStore};
pub use subscription::{Subscription, SubscriptionId};
