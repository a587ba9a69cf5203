//! Error types for grammar construction and parse failure classification.
//!
//! Uses `thiserror` for the construction-time error enum. Parse failures
//! themselves are ordinary values (see [`crate::outcome`]): they carry a
//! user-facing message and the session simply shows it and lets the
//! player retry.

use thiserror::Error;

/// Default message when a sequence leaves unconsumed text or no branch
/// of a group fits the input.
pub const MSG_INVALID: &str = "Invalid syntax.";

/// Default message when the input is empty but something was required.
pub const MSG_MANDATORY: &str = "You have to specify something.";

/// Message when a command name is not known to the command set.
pub const MSG_UNKNOWN_COMMAND: &str = "Unknown command.";

/// Classification of a parse failure.
///
/// Ambiguity between branches is deliberately absent: several branches
/// matching the same input resolves deterministically by longest match
/// and is never surfaced to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// An expected token shape was absent at its resolved position.
    Syntax,
    /// A required argument had no data and no default.
    MissingArgument,
    /// Every argument resolved but trailing text remained unconsumed.
    ExtraInput,
}

/// Errors raised while building a grammar or registering handlers.
///
/// These are author mistakes. They are rejected when the command is
/// defined, never at parse time.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    /// Two specs along one grammar path bind the same destination.
    #[error("duplicate destination name: {dest}")]
    DuplicateDestination {
        /// The colliding destination name.
        dest: String,
    },

    /// A group was declared with no branches.
    #[error("group declares no branches")]
    EmptyGroup,

    /// A sequence contains more than one group node, which would make
    /// the selected dispatch identifier ambiguous.
    #[error("sequence contains more than one group")]
    MultipleGroups,

    /// A handler was registered under an identifier the grammar never
    /// dispatches to.
    #[error("unknown dispatch identifier: {id}")]
    UnknownDispatch {
        /// The rejected identifier.
        id: String,
    },

    /// The grammar can select an identifier that has no handler.
    #[error("no handler registered for dispatch identifier: {id}")]
    MissingHandler {
        /// The unregistered identifier.
        id: String,
    },
}
