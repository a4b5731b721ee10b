//! JSON I/O handling for CLI
//!
//! - Input: single JSON object, one line
//! - Output: single JSON object, one line
//! - UTF-8 only

use std::io::{self, BufRead, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a JSON request from stdin
pub fn read_request() -> CliResult<Value> {
    let stdin = io::stdin();
    read_request_from(stdin.lock())
}

/// Read a JSON request line from `reader`
pub fn read_request_from<R: BufRead>(mut reader: R) -> CliResult<Value> {
    let mut line = String::new();
    reader.read_line(&mut line)?;

    if line.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(&line)?;
    Ok(value)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_response_to(&mut io::stdout(), data)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_error_to(&mut io::stdout(), code, message)
}

pub fn write_response_to<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_line(out, &response)
}

pub fn write_error_to<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(out, &response)
}

fn write_line<W: Write>(out: &mut W, response: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, response)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_single_line() {
        let input = b"{\"table\":\"t\"}\n{\"ignored\":true}\n";
        let value = read_request_from(&input[..]).unwrap();
        assert_eq!(value, json!({"table": "t"}));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = read_request_from(&b"  \n"[..]).unwrap_err();
        assert_eq!(err.code_str(), "QM_CLI_IO_ERROR");
    }

    #[test]
    fn test_response_lines() {
        let mut out = Vec::new();
        write_response_to(&mut out, json!({"query": "q", "values": []})).unwrap();
        write_error_to(&mut out, "QM_X", "bad").unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            serde_json::from_str::<Value>(lines[0]).unwrap(),
            json!({"status": "ok", "data": {"query": "q", "values": []}})
        );
        assert_eq!(
            serde_json::from_str::<Value>(lines[1]).unwrap(),
            json!({"status": "error", "code": "QM_X", "message": "bad"})
        );
    }
}
