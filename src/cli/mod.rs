//! CLI module for querymap
//!
//! Provides a JSON-over-stdin front end for:
//! - select: compile a predicate map into a select
//! - insert: compile rows into an insert
//! - named: expand a named template

mod args;
mod commands;
mod errors;
mod io;
mod logging;

pub use args::{Cli, Command};
pub use commands::{handle_request, load_config, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{
    read_request, read_request_from, write_error, write_error_to, write_response,
    write_response_to,
};
pub use logging::init_logging;
