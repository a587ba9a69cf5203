//! Tidemark - command grammar engine for multiplayer text-based games.
//!
//! This crate re-exports the grammar engine for convenient access.
//! For detailed documentation, see the member crate.

pub use tidemark_grammar as grammar;
