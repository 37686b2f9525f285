//! Configuration for the todo binary, loaded from environment variables.
//!
//! Call `dotenvy::dotenv()` first if a `.env` file should be honoured.

use crate::types::VisibilityFilter;

/// Default `RUST_LOG` directive when none is set
pub const DEFAULT_LOG_FILTER: &str = "todo=info,reflow_runtime=info";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// First id handed out to new todos (`TODO_FIRST_ID`)
    pub first_id: u64,
    /// Filter dispatched at startup (`TODO_INITIAL_FILTER`)
    pub initial_filter: VisibilityFilter,
    /// Install the Prometheus recorder (`TODO_METRICS`)
    pub metrics_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_id: 0,
            initial_filter: VisibilityFilter::ShowAll,
            metrics_enabled: false,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Missing or unparsable values fall back to their defaults; an invalid
    /// filter is logged.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let first_id = lookup("TODO_FIRST_ID")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.first_id);

        let initial_filter = lookup("TODO_INITIAL_FILTER")
            .and_then(|v| match v.parse::<VisibilityFilter>() {
                Ok(filter) => Some(filter),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring TODO_INITIAL_FILTER");
                    None
                }
            })
            .unwrap_or(defaults.initial_filter);

        let metrics_enabled = lookup("TODO_METRICS")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.metrics_enabled);

        Self {
            first_id,
            initial_filter,
            metrics_enabled,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]), Config::default());
    }

    #[test]
    fn reads_all_values() {
        let cfg = config(&[
            ("TODO_FIRST_ID", "10"),
            ("TODO_INITIAL_FILTER", "active"),
            ("TODO_METRICS", "true"),
        ]);

        assert_eq!(cfg, Config {
            first_id: 10,
            initial_filter: VisibilityFilter::ShowActive,
            metrics_enabled: true,
        });
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config(&[
            ("TODO_FIRST_ID", "-1"),
            ("TODO_INITIAL_FILTER", "SHOW_SOME"),
            ("TODO_METRICS", "maybe"),
        ]);

        assert_eq!(cfg, Config::default());
    }
}
