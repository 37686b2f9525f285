//! Line-oriented commands read by the terminal frontend.

use crate::types::{ParseFilterError, TodoId, VisibilityFilter};
use std::str::FromStr;
use thiserror::Error;

/// Usage text printed by `help`
pub const HELP: &str = "\
Commands:
  add <text>                        add a todo
  toggle <id>                       toggle a todo's completed flag
  filter <all|active|completed>     change which todos are shown
  state                             print the state as JSON
  metrics                           print Prometheus metrics (TODO_METRICS=true)
  help                              show this message
  quit                              exit";

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add a todo with this text
    Add(String),
    /// Toggle the todo with this id
    Toggle(TodoId),
    /// Change the visibility filter
    Filter(VisibilityFilter),
    /// Print the state snapshot as JSON
    State,
    /// Print the metrics exposition
    Metrics,
    /// Print usage
    Help,
    /// Exit the program
    Quit,
}

/// Errors from parsing an input line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line was blank
    #[error("Empty command (type 'help' for usage)")]
    Empty,

    /// The first word is not a known command
    #[error("Unknown command '{0}' (type 'help' for usage)")]
    Unknown(String),

    /// The command needs an argument that was not given
    #[error("'{command}' needs an argument: {usage}")]
    MissingArgument {
        /// Command name
        command: &'static str,
        /// Expected form
        usage: &'static str,
    },

    /// `toggle` was given something other than a todo id
    #[error("Invalid todo id '{0}'")]
    InvalidId(String),

    /// `filter` was given an unknown filter
    #[error(transparent)]
    InvalidFilter(#[from] ParseFilterError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "add" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "add",
                        usage: "add <text>",
                    });
                }
                Ok(Self::Add(rest.to_string()))
            }
            "toggle" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "toggle",
                        usage: "toggle <id>",
                    });
                }
                rest.parse::<u64>()
                    .map(|id| Self::Toggle(TodoId::new(id)))
                    .map_err(|_| CommandError::InvalidId(rest.to_string()))
            }
            "filter" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "filter",
                        usage: "filter <all|active|completed>",
                    });
                }
                Ok(Self::Filter(rest.parse()?))
            }
            "state" => Ok(Self::State),
            "metrics" => Ok(Self::Metrics),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn parses_add_with_spaces_in_text() {
        assert_eq!(
            "add  Buy oat milk ".parse::<Command>(),
            Ok(Command::Add("Buy oat milk".to_string()))
        );
    }

    #[test]
    fn rejects_add_without_text() {
        assert_eq!(
            "add   ".parse::<Command>(),
            Err(CommandError::MissingArgument {
                command: "add",
                usage: "add <text>",
            })
        );
    }

    #[test]
    fn parses_toggle() {
        assert_eq!("toggle 3".parse::<Command>(), Ok(Command::Toggle(TodoId::new(3))));
        assert_eq!(
            "toggle three".parse::<Command>(),
            Err(CommandError::InvalidId("three".to_string()))
        );
    }

    #[test]
    fn parses_filter() {
        assert_eq!(
            "filter completed".parse::<Command>(),
            Ok(Command::Filter(VisibilityFilter::ShowCompleted))
        );
        assert_eq!(
            "FILTER show_active".parse::<Command>(),
            Ok(Command::Filter(VisibilityFilter::ShowActive))
        );
    }

    #[test]
    fn rejects_unknown_filter_before_building_an_action() {
        let err = "filter some".parse::<Command>().unwrap_err();
        assert_eq!(err, CommandError::InvalidFilter(ParseFilterError("some".to_string())));
        assert!(err.to_string().contains("SHOW_ALL"));
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!("state".parse::<Command>(), Ok(Command::State));
        assert_eq!("metrics".parse::<Command>(), Ok(Command::Metrics));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_blank_and_unknown() {
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "delete 1".parse::<Command>(),
            Err(CommandError::Unknown("delete".to_string()))
        );
    }
}
