//! CLI command implementations
//!
//! Each command reads one JSON request from stdin, compiles it and writes
//! one JSON response line. A failed compilation is written as an error line
//! and also returned, so the process exits non-zero.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value as Json;
use tracing::{debug, info};

use crate::builder::{
    named_query, params_from_json, rows_from_json, where_from_json, BuilderError, Compiler,
    CompilerConfig, Statement, Value, WhereMap,
};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};
use super::logging::init_logging;

/// `select` request body
#[derive(Debug, Deserialize)]
struct SelectRequest {
    table: String,
    #[serde(default, rename = "where")]
    where_map: Option<Json>,
    #[serde(default)]
    fields: Vec<String>,
}

/// `insert` request body
#[derive(Debug, Deserialize)]
struct InsertRequest {
    table: String,
    #[serde(default)]
    supertable: Option<String>,
    #[serde(default)]
    tags: Vec<Json>,
    rows: Json,
}

/// `named` request body
#[derive(Debug, Deserialize)]
struct NamedRequest {
    template: String,
    #[serde(default)]
    params: Option<Json>,
}

/// Load compiler configuration from `path`, or defaults when absent
pub fn load_config(path: Option<&Path>) -> CliResult<CompilerConfig> {
    let Some(path) = path else {
        return Ok(CompilerConfig::default());
    };

    let content = fs::read_to_string(path)
        .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

    let config = CompilerConfig::from_json_str(&content)
        .map_err(|e| CliError::config_error(e.to_string()))?;

    info!(path = %path.display(), "loaded compiler config");
    Ok(config)
}

/// Main CLI entry point
///
/// Parses arguments, installs logging and dispatches the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(&cli.log_level)?;

    let result = load_config(cli.config.as_deref())
        .map(Compiler::new)
        .and_then(|compiler| run_command(cli.command, &compiler));

    if let Err(e) = &result {
        write_error(e.code_str(), e.message())?;
    }
    result
}

/// Run one command against a request read from stdin
pub fn run_command(cmd: Command, compiler: &Compiler) -> CliResult<()> {
    let request = read_request()?;
    let stmt = handle_request(cmd, compiler, request)?;
    write_response(serde_json::to_value(&stmt)?)
}

/// Compile one request
pub fn handle_request(cmd: Command, compiler: &Compiler, request: Json) -> CliResult<Statement> {
    debug!(command = ?cmd, "handling request");
    let stmt = match cmd {
        Command::Select => select(compiler, parse_request(request)?)?,
        Command::Insert => insert(compiler, parse_request(request)?)?,
        Command::Named => named(parse_request(request)?)?,
    };
    Ok(stmt)
}

fn parse_request<T: for<'de> Deserialize<'de>>(request: Json) -> CliResult<T> {
    serde_json::from_value(request)
        .map_err(|e| CliError::from(BuilderError::InvalidRequest(e.to_string())))
}

fn select(compiler: &Compiler, request: SelectRequest) -> CliResult<Statement> {
    let where_map = match &request.where_map {
        Some(json) if !json.is_null() => where_from_json(json)?,
        _ => WhereMap::new(),
    };
    Ok(compiler.select(&request.table, &where_map, request.fields.as_slice())?)
}

fn insert(compiler: &Compiler, request: InsertRequest) -> CliResult<Statement> {
    let rows = rows_from_json(&request.rows)?;
    let stmt = match request.supertable.as_deref() {
        Some(supertable) => {
            let tags = tag_values(request.tags)?;
            compiler.insert_with_tags(&request.table, supertable, &tags, &rows)?
        }
        None => compiler.insert(&request.table, &rows)?,
    };
    Ok(stmt)
}

fn named(request: NamedRequest) -> CliResult<Statement> {
    let params = match &request.params {
        Some(json) if !json.is_null() => params_from_json(json)?,
        _ => Default::default(),
    };
    Ok(named_query(&request.template, &params)?)
}

/// Tag values for an insert, converted like a single row
fn tag_values(tags: Vec<Json>) -> CliResult<Vec<Value>> {
    Ok(rows_from_json(&Json::Array(vec![Json::Array(tags)]))?
        .pop()
        .unwrap_or_default())
}
