//! querymap - deterministic predicate-map to parameterized statement compiler
//!
//! [`builder`] holds the compiler; [`cli`] is the JSON-over-stdin front end.

pub mod builder;
pub mod cli;
