//! Argument grammar engine for text game commands.
//!
//! This crate turns the argument text of a player command like
//! `roll 3d6` or `give 2 apples to bob` into a chosen handler plus a
//! mapping of named values, driven by a small grammar built once per
//! command definition.
//!
//! # Architecture
//!
//! ```text
//! "3d6"
//!    │
//!    ▼
//! ┌─────────────────┐
//! │ ANCHOR PASS     │  → locate self-delimiting tokens: the literal `d`
//! └─────────────────┘
//!    │
//!    ▼
//! ┌─────────────────┐
//! │ FILL PASS       │  → numbers/words/remainder consume the gaps:
//! └─────────────────┘    times ← "3", size ← "6"
//!    │
//!    ▼
//! ┌─────────────────┐
//! │ BRANCH          │  → every branch of a group is tried; the full
//! │ SELECTION       │    match covering the most input wins
//! └─────────────────┘
//!    │
//!    ▼
//! ┌─────────────────┐
//! │ OUTCOME         │  → Matched { dispatch: "roll-multi",
//! └─────────────────┘              times: 3, size: 6 }
//! ```
//!
//! Grammars are immutable after [`schema::Grammar::compile`]; a single
//! grammar is shared read-only across any number of concurrent parses.
//! The engine never calls a handler: a match carries a dispatch
//! identifier that the command dispatcher resolves through a
//! [`dispatch::HandlerRegistry`].
//!
//! # Modules
//!
//! - [`cursor`] - Forward-only scanning window over raw input
//! - [`spec`] - Typed argument token descriptors
//! - [`schema`] - Immutable grammar arena and builders
//! - [`outcome`] - Parse outcomes and bound values
//! - [`parser`] - Per-command parser and command set
//! - [`dispatch`] - Dispatch identifiers and handler registry
//! - [`error`] - Construction errors and failure classification

pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod outcome;
pub mod parser;
mod resolve;
pub mod schema;
pub mod spec;

// Re-export main types for convenience
pub use dispatch::{DispatchId, HandlerRegistry};
pub use error::{FailureKind, GrammarError};
pub use outcome::{Bindings, Failure, Match, ParseOutcome, Value};
pub use parser::{CommandParser, CommandSet};
pub use schema::{Grammar, GroupBuilder, SequenceBuilder};
pub use spec::{ArgKind, ArgumentSpec, Phase};
