//! # Reflow Testing
//!
//! Testing utilities and helpers for the Reflow architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - An observer that records notification order
//! - A Given-When-Then harness for reducers
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use reflow_testing::CallLog;
//! use reflow_runtime::Store;
//!
//! #[test]
//! fn observers_run_in_order() {
//!     let store = Store::new(todo_app()?);
//!     let log = CallLog::new();
//!     let _a = store.subscribe(log.observer("a"));
//!     let _b = store.subscribe(log.observer("b"));
//!
//!     store.dispatch(TodoAction::ToggleTodo { id: TodoId::new(0) })?;
//!     assert_eq!(log.entries(), vec!["a", "b"]);
//! }
//! ```

use reflow_core::environment::{IdGenerator, IdsExhausted, SequentialIds};


/// Mock implementations for testing.
pub mod mocks {
    use super::{IdGenerator, IdsExhausted, SequentialIds};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Id generator that always returns the same id
    ///
    /// Useful to exercise id collisions, which the reducers do not validate.
    ///
    /// # Example
    ///
    /// ```
    /// use reflow_testing::mocks::FixedIds;
    /// use reflow_core::environment::IdGenerator;
    ///
    /// let ids = FixedIds::new(7);
    /// assert_eq!(ids.next_id(), Ok(7));
    /// assert_eq!(ids.next_id(), Ok(7)); // Always the same!
    /// ```
    #[derive(Debug, Clone, Copy)]
    pub struct FixedIds {
        id: u64,
    }

    impl FixedIds {
        /// Create a generator that always returns `id`
        #[must_use]
        pub const fn new(id: u64) -> Self {
            Self { id }
        }
    }

    impl IdGenerator for FixedIds {
        fn next_id(&self) -> Result<u64, IdsExhausted> {
            Ok(self.id)
        }
    }

    /// Create a default id generator for tests (starts at 0)
    #[must_use]
    pub const fn test_ids() -> SequentialIds {
        SequentialIds::new()
    }

    /// Shared, ordered record of observer invocations
    ///
    /// Clones share the same log.
    ///
    /// # Example
    ///
    /// ```
    /// use reflow_testing::CallLog;
    ///
    /// let log = CallLog::new();
    /// let first = log.observer("first");
    /// let second = log.observer("second");
    ///
    /// second();
    /// first();
    /// assert_eq!(log.entries(), vec!["second", "first"]);
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct CallLog {
        entries: Arc<Mutex<Vec<&'static str>>>,
    }

    impl CallLog {
        /// Create an empty log
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Observer callback that appends `label` each time it is called
        pub fn observer(&self, label: &'static str) -> impl Fn() + Send + Sync + 'static {
            let log = self.clone();
            move || log.record(label)
        }

        /// Append `label` to the log
        pub fn record(&self, label: &'static str) {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(label);
        }

        /// Labels recorded so far, in call order
        #[must_use]
        pub fn entries(&self) -> Vec<&'static str> {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Number of calls recorded for `label`
        #[must_use]
        pub fn count(&self, label: &str) -> usize {
            self.entries().iter().filter(|entry| **entry == label).count()
        }

        /// Forget all recorded calls
        pub fn clear(&self) {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
        }
    }
}

/// Test helpers and utilities.
pub mod helpers {
    use tracing_subscriber::EnvFilter;

    /// Install a test-friendly tracing subscriber
    ///
    /// Output goes through the test harness writer, so it is only shown for
    /// failing tests. Safe to call from every test: only the first call installs.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{test_ids, CallLog, FixedIds};
pub use reducer_test::ReducerTest;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_ids() {
        let ids = FixedIds::new(3);
        assert_eq!(ids.next_id(), Ok(3));
        assert_eq!(ids.next_id(), Ok(3));
    }

    #[test]
    fn test_ids_start_at_zero() {
        let ids = test_ids();
        assert_eq!(ids.next_id(), Ok(0));
        assert_eq!(ids.next_id(), Ok(1));
    }

    #[test]
    fn test_call_log_is_shared_between_clones() {
        let log = CallLog::new();
        let observer = log.clone().observer("a");

        observer();
        observer();
        log.record("b");

        assert_eq!(log.entries(), vec!["a", "a", "b"]);
        assert_eq!(log.count("a"), 2);

        log.clear();
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_init_test_tracing_is_idempotent() {
        init_test_tracing();
        init_test_tracing();
    }
}
