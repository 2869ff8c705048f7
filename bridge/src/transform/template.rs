//! `{{name}}` placeholder templates.
//!
//! A template is scanned once for names, then every occurrence of each
//! resolvable `{{name}}` is replaced in a single left-to-right pass.
//! Placeholders whose name has no value are left in the output verbatim,
//! and substituted values are never scanned again.
//!
//! ```rust,ignore
//! use serde_json::json;
//! use dtbridge::transform::template::resolve;
//!
//! let row = json!({"id": 7, "name": "Ada"}).as_object().cloned().unwrap();
//! let html = resolve("<a href=\"/user/{{id}}\">{{name}}</a> {{missing}}", &row);
//! assert_eq!(html, "<a href=\"/user/7\">Ada</a> {{missing}}");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::ops::Range;

use crate::models::Row;

/// Name of the placeholder bound to the current column's own value.
pub const COLUMN_DATA: &str = "column_data";

/// `{{column_data}}` as it appears in a template.
pub const COLUMN_DATA_TOKEN: &str = "{{column_data}}";

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

// Non-greedy, and `.` crosses newlines.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").expect("Invalid placeholder pattern"));

/// One `{{...}}` match in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Matched text with every `{{` and `}}` removed
    pub name: Cow<'a, str>,
    /// Byte range of the whole match
    pub range: Range<usize>,
}

/// Scan a template for placeholders, left to right, non-overlapping.
///
/// A match such as `{{{{id}}` names `id`: braces nested inside the match
/// are stripped along with the outer delimiters.
pub fn placeholders(template: &str) -> Vec<Placeholder<'_>> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?.as_str();
            let name = if inner.contains(OPEN) {
                Cow::Owned(inner.replace(OPEN, ""))
            } else {
                Cow::Borrowed(inner)
            };
            Some(Placeholder {
                name,
                range: whole.range(),
            })
        })
        .collect()
}

/// Substitute placeholders using `lookup`; names it returns `None` for stay literal.
pub fn resolve_with<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    // (`{{name}}`, value); no token is a prefix of another
    let mut tokens: Vec<(String, String)> = Vec::new();
    for placeholder in placeholders(template) {
        let token = format!("{}{}{}", OPEN, placeholder.name, CLOSE);
        if tokens.iter().any(|(t, _)| *t == token) {
            continue;
        }
        if let Some(value) = lookup(&placeholder.name) {
            tokens.push((token, value));
        }
    }
    if tokens.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tokens.iter().find(|(t, _)| tail.starts_with(t.as_str())) {
            Some((token, value)) => {
                out.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                // Step over one brace only: a token may start right after it
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Substitute placeholders with the row's values.
pub fn resolve(template: &str, row: &Row) -> String {
    resolve_with(template, |name| row_value(row, name))
}

/// Stringified value of `row[name]`; null counts as absent.
pub fn row_value(row: &Row, name: &str) -> Option<String> {
    row.get(name)
        .filter(|v| !v.is_null())
        .map(value_to_string)
}

/// Render a cell value as template text.
///
/// Integral floats drop their fraction, booleans render as `"1"`/`""`,
/// null as `""`, nested values as compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        other => other.to_string(),
    }
}
