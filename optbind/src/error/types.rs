//! The error enum shared by every stage of an invocation.

use thiserror::Error;

/// Failure reported by a command action.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Convenience alias for results carrying an [`OptbindError`].
pub type OptbindResult<T> = Result<T, OptbindError>;

/// Errors that can occur while dispatching a command.
///
/// Every variant describes invalid input or an invalid command tree. None of
/// them is transient, so callers should not retry the same invocation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptbindError {
    /// A router command ran out of arguments before a subcommand was named.
    #[error("{command}: not enough arguments")]
    NotEnoughArguments {
        /// Router that needed another argument.
        command: String,
    },

    /// The next argument does not name a child of the current command.
    #[error("'{token}' is not a {command} command")]
    UnknownSubcommand {
        /// Argument that failed to match.
        token: String,
        /// Router whose children were searched.
        command: String,
    },

    /// A `required` tag could not be read as a boolean.
    #[error("field '{field}' has a malformed required tag '{value}'")]
    MalformedRequired {
        /// Field identifier carrying the tag.
        field: String,
        /// Raw tag text.
        value: String,
    },

    /// Two fields of one options record derive the same option name.
    #[error("option '{name}' is declared by both '{first}' and '{second}'")]
    DuplicateOption {
        /// Derived option name both fields map to.
        name: String,
        /// Identifier of the field discovered first.
        first: String,
        /// Identifier of the field discovered second.
        second: String,
    },

    /// A field identifier derives an empty option name.
    #[error("field '{field}' does not produce a usable option name")]
    InvalidOptionName {
        /// Offending field identifier.
        field: String,
    },

    /// The flag parser rejected the arguments.
    #[error("failed to parse flags: {0}")]
    Flags(#[from] clap::Error),

    /// A required option was supplied neither as a flag nor in the environment.
    #[error("opt '{name}' is required but not passed")]
    MissingRequired {
        /// Derived name of the first missing option.
        name: String,
    },

    /// The command selected by the arguments has no action to run.
    #[error("command '{command}' has no action")]
    MissingAction {
        /// Name of the selected command.
        command: String,
    },

    /// The action of the selected command failed.
    #[error("command '{command}' failed: {source}")]
    Action {
        /// Name of the command whose action failed.
        command: String,
        /// Error returned by the action.
        #[source]
        source: ActionError,
    },

    /// A process argument is not valid Unicode.
    #[error("argument '{argument}' is not valid unicode")]
    InvalidUnicode {
        /// Lossy rendering of the argument.
        argument: String,
    },
}
