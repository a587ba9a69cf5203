//! Root parser objects.
//!
//! A [`CommandParser`] owns the compiled grammar of one command
//! definition and turns raw argument text into a [`ParseOutcome`]. It
//! never invokes a handler; the selected dispatch identifier is
//! resolved externally through a [`crate::dispatch::HandlerRegistry`].

use std::collections::HashMap;

use crate::error::{FailureKind, MSG_UNKNOWN_COMMAND};
use crate::outcome::{Bindings, Failure, Match, ParseOutcome};
use crate::resolve::resolve_sequence;
use crate::schema::Grammar;

/// Parser for one command definition.
///
/// Built once when the command is registered, then shared read-only:
/// `parse` takes `&self`, performs no I/O and allocates its own working
/// state, so concurrent sessions never need locking.
#[derive(Clone, Debug)]
pub struct CommandParser {
    name: String,
    grammar: Grammar,
}

impl CommandParser {
    /// Creates a parser for the named command.
    #[must_use]
    pub fn new(name: impl Into<String>, grammar: Grammar) -> Self {
        Self {
            name: name.into(),
            grammar,
        }
    }

    /// The command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compiled grammar.
    #[must_use]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Parses raw argument text. The command name itself has already
    /// been stripped by the caller.
    #[must_use]
    pub fn parse(&self, raw: &str) -> ParseOutcome {
        match resolve_sequence(&self.grammar, &self.grammar.root, raw, 0, raw.len()) {
            Ok(matched) => ParseOutcome::Matched(Match {
                dispatch: matched
                    .dispatch
                    .unwrap_or_else(|| self.grammar.default_dispatch.clone()),
                bindings: Bindings::from_entries(matched.bindings),
                consumed: matched.consumed,
            }),
            Err(failure) => ParseOutcome::Failed(Failure {
                kind: failure.kind,
                message: failure.message,
                consumed: failure.consumed,
            }),
        }
    }

    /// Renders the usage line for this command.
    #[must_use]
    pub fn usage(&self) -> String {
        let grammar = self.grammar.usage();
        if grammar.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, grammar)
        }
    }
}

/// The set of command parsers known to a dispatcher.
#[derive(Clone, Debug, Default)]
pub struct CommandSet {
    parsers: HashMap<String, CommandParser>,
}

impl CommandSet {
    /// Creates an empty command set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parser under its command name.
    pub fn insert(&mut self, parser: CommandParser) {
        self.parsers.insert(parser.name().to_string(), parser);
    }

    /// Looks up a parser by command name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandParser> {
        self.parsers.get(name)
    }

    /// Entry point for the command dispatcher: parses the argument text
    /// of the named command.
    #[must_use]
    pub fn parse(&self, command_name: &str, raw: &str) -> ParseOutcome {
        match self.parsers.get(command_name) {
            Some(parser) => parser.parse(raw),
            None => ParseOutcome::Failed(Failure {
                kind: FailureKind::Syntax,
                message: MSG_UNKNOWN_COMMAND.to_string(),
                consumed: 0,
            }),
        }
    }
}
