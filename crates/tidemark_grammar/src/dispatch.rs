//! Dispatch identifiers and the handler registry.
//!
//! The engine never calls a handler itself: a matched branch yields a
//! [`DispatchId`], and the command dispatcher resolves it through a
//! [`HandlerRegistry`] built against the grammar. Invalid identifiers
//! are rejected at registration time, not at parse time.

use std::collections::HashMap;
use std::fmt;

use crate::error::GrammarError;
use crate::schema::Grammar;

/// Opaque identifier naming the handler a branch dispatches to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DispatchId(String);

impl DispatchId {
    /// Creates an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DispatchId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DispatchId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Handler table for one grammar.
///
/// `H` is whatever the dispatcher uses as a handler reference: a
/// function pointer, a boxed closure, an enum of actions.
#[derive(Clone, Debug)]
pub struct HandlerRegistry<H> {
    expected: Vec<DispatchId>,
    handlers: HashMap<DispatchId, H>,
}

impl<H> HandlerRegistry<H> {
    /// Creates a registry expecting exactly the identifiers the grammar
    /// can select.
    #[must_use]
    pub fn for_grammar(grammar: &Grammar) -> Self {
        Self {
            expected: grammar.dispatch_ids(),
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler under an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::UnknownDispatch`] if the grammar never
    /// dispatches to `id`.
    pub fn register(
        &mut self,
        id: impl Into<DispatchId>,
        handler: H,
    ) -> Result<(), GrammarError> {
        let id = id.into();
        if !self.expected.contains(&id) {
            return Err(GrammarError::UnknownDispatch { id: id.to_string() });
        }
        self.handlers.insert(id, handler);
        Ok(())
    }

    /// Checks that every identifier the grammar can select has a handler.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::MissingHandler`] naming the first
    /// uncovered identifier, in declaration order.
    pub fn verify(&self) -> Result<(), GrammarError> {
        for id in &self.expected {
            if !self.handlers.contains_key(id) {
                return Err(GrammarError::MissingHandler { id: id.to_string() });
            }
        }
        Ok(())
    }

    /// Looks up the handler for an identifier.
    #[must_use]
    pub fn get(&self, id: &DispatchId) -> Option<&H> {
        self.handlers.get(id)
    }
}
