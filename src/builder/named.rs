//! Named-template expansion
//!
//! Replaces `{{name}}` markers in an arbitrary template with placeholders,
//! collecting the bound values in scan order.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::condition::placeholders;
use super::errors::{BuilderError, BuilderResult};
use super::statement::Statement;
use super::value::Param;

static MARKER: OnceLock<Regex> = OnceLock::new();

fn marker() -> &'static Regex {
    MARKER.get_or_init(|| Regex::new(r"\{\{(\S+?)\}\}").expect("marker pattern is valid"))
}

/// Expands every `{{name}}` marker in `template`
///
/// A scalar becomes `?`; a list of n values becomes `(?,...)` with n
/// placeholders (`()` when empty). A name used twice binds its values twice.
/// The first name missing from `params` fails the whole expansion.
pub fn named_query(template: &str, params: &HashMap<String, Param>) -> BuilderResult<Statement> {
    let mut text = String::with_capacity(template.len());
    let mut values = Vec::with_capacity(params.len());
    let mut last = 0;

    for caps in marker().captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let param = params
            .get(name.as_str())
            .ok_or_else(|| BuilderError::NameNotFound {
                name: name.as_str().to_string(),
            })?;

        text.push_str(&template[last..whole.start()]);
        match param {
            Param::One(value) => {
                text.push('?');
                values.push(value.clone());
            }
            Param::Many(items) => {
                text.push_str(&placeholders(items.len()));
                values.extend(items.iter().cloned());
            }
        }
        last = whole.end();
    }
    text.push_str(&template[last..]);

    debug!(placeholders = values.len(), "expanded named template");
    Ok(Statement { text, values })
}
