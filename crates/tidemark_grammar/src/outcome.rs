//! Parse outcomes and bound values.
//!
//! A successful parse produces the dispatch identifier of the matched
//! branch plus a [`Bindings`] mapping of destination names to values.
//! A failed parse produces a single user-facing message.

use std::fmt;

use crate::dispatch::DispatchId;
use crate::error::FailureKind;

/// A value bound by a successful parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// An integer argument.
    Number(i64),
    /// A textual argument (word, quoted string, or remainder).
    Text(String),
}

impl Value {
    /// The numeric value, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// The textual value, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Name-to-value mapping produced by a successful parse.
///
/// Entries follow the declaration order of the matched grammar path,
/// not the order in which the specs were resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: Vec<(String, Value)>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_entries(entries: Vec<(String, Value)>) -> Self {
        Self { entries }
    }

    /// Gets the value bound under a destination name.
    #[must_use]
    pub fn get(&self, dest: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == dest)
            .map(|(_, value)| value)
    }

    /// Gets the number bound under a destination name.
    #[must_use]
    pub fn number(&self, dest: &str) -> Option<i64> {
        self.get(dest).and_then(Value::as_number)
    }

    /// Gets the text bound under a destination name.
    #[must_use]
    pub fn text(&self, dest: &str) -> Option<&str> {
        self.get(dest).and_then(Value::as_text)
    }

    /// Number of bound values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// A successful parse.
#[derive(Clone, Debug)]
pub struct Match {
    /// Identifier of the handler to dispatch to.
    pub dispatch: DispatchId,
    /// Bound argument values.
    pub bindings: Bindings,
    /// Bytes of input covered by resolved arguments.
    pub consumed: usize,
}

/// A failed parse: one user-facing message, already resolved from the
/// most specific applicable source.
#[derive(Clone, Debug)]
pub struct Failure {
    /// What went wrong.
    pub kind: FailureKind,
    /// Message to show the player.
    pub message: String,
    /// Bytes covered before the failure, for diagnostics only.
    pub consumed: usize,
}

/// Result of parsing one command line.
#[derive(Clone, Debug)]
pub enum ParseOutcome {
    /// A branch matched; dispatch externally using the identifier.
    Matched(Match),
    /// No branch matched; show the message and let the player retry.
    Failed(Failure),
}

impl ParseOutcome {
    /// Whether the parse succeeded.
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// The failure message, if the parse failed.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Matched(_) => None,
            Self::Failed(failure) => Some(&failure.message),
        }
    }
}
