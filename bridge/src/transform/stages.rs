//! Per-row pipeline stages.
//!
//! Stages run in a fixed order (see [`super::pipeline::transform_row`]) and
//! each one sees the mutations of the stages before it.
//!
//! | Stage | Option            | Effect                                        |
//! |-------|-------------------|-----------------------------------------------|
//! | 1     | `DT_RowId`        | set `DT_RowId` from a fixed prefix or a column |
//! | 2     | `DT_RowData`      | templated entries under `DT_RowData`          |
//! | 3     | `dynamic_columns` | computed columns                              |
//! | 4     | `wrap_columns`    | per-column wrappers using `{{column_data}}`   |
//! | 5     | `wrap_all`        | one wrapper over every plain column           |
//! | 6     | `hide_columns`    | drop keys                                     |

use serde_json::{Map, Value};

use super::options::{ColumnTemplate, RowIdMode, RowIdSpec};
use super::template::{
    resolve, resolve_with, row_value, value_to_string, COLUMN_DATA, COLUMN_DATA_TOKEN,
};
use crate::error::{BridgeError, BridgeResult};
use crate::logs::log_warning_indent;
use crate::models::{Row, ROW_DATA_KEY, ROW_ID_KEY};

/// Collects skipped option problems for one pipeline run.
///
/// Non-strict runs record each distinct problem once; strict runs turn the
/// first one into an error.
#[derive(Debug, Default)]
pub struct SkipLog {
    strict: bool,
    notes: Vec<String>,
}

impl SkipLog {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            notes: Vec::new(),
        }
    }

    /// A malformed option: fatal in strict mode, noted otherwise.
    pub fn skip(&mut self, err: BridgeError) -> BridgeResult<()> {
        if self.strict {
            return Err(err);
        }
        self.note(err.to_string());
        Ok(())
    }

    /// A skipped step that is never fatal.
    pub fn note(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.notes.contains(&message) {
            self.notes.push(message);
        }
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Emit one warning per distinct note.
    pub fn flush(&self) {
        for note in &self.notes {
            log_warning_indent(format!("skipped: {}", note), 1);
        }
    }
}

/// Stage 1: `DT_RowId`.
///
/// Fixed mode uses the row's position in this call's input, so the same
/// record gets a different id when a differently filtered result is shaped.
pub fn assign_row_id(
    row: &mut Row,
    spec: &RowIdSpec,
    index: usize,
    skips: &mut SkipLog,
) -> BridgeResult<()> {
    let Some(mode) = spec.parsed_mode() else {
        // Intentional: without a usable type the whole stage is a no-op
        return match spec.mode {
            None => skips.skip(BridgeError::missing("DT_RowId", "type")),
            Some(ref other) => skips.skip(BridgeError::invalid(
                "DT_RowId",
                format!("unknown type '{}', expected 'fixed' or 'dynamic'", other),
            )),
        };
    };

    let Some(ref key) = spec.key else {
        return skips.skip(BridgeError::missing("DT_RowId", "key"));
    };

    let id = match mode {
        RowIdMode::Fixed => Value::String(format!("{}{}", key, index)),
        RowIdMode::Dynamic => match row.get(key).filter(|v| !v.is_null()) {
            Some(value) => value.clone(),
            None => {
                skips.note(format!("DT_RowId: column '{}' missing from some rows", key));
                return Ok(());
            }
        },
    };

    let id = match spec.prepend {
        Some(ref prepend) if !is_empty_id(&id) => {
            Value::String(format!("{}{}", prepend, value_to_string(&id)))
        }
        _ => id,
    };

    row.insert(ROW_ID_KEY.to_string(), id);
    Ok(())
}

// "", "0", 0, null and false never get a prefix
fn is_empty_id(id: &Value) -> bool {
    match id {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty() || s == "0",
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Stage 2: `DT_RowData`. Non-string entries are copied as they are.
pub fn apply_row_data(row: &mut Row, templates: &Map<String, Value>) {
    for (data_key, template) in templates {
        let resolved = match template {
            Value::String(t) => Value::String(resolve(t, row)),
            other => other.clone(),
        };

        match row.get_mut(ROW_DATA_KEY) {
            Some(Value::Object(data)) => {
                data.insert(data_key.clone(), resolved);
            }
            _ => {
                let mut data = Map::new();
                data.insert(data_key.clone(), resolved);
                row.insert(ROW_DATA_KEY.to_string(), Value::Object(data));
            }
        }
    }
}

/// Stage 3: computed columns. Later entries can reference earlier ones.
pub fn inject_dynamic_columns(
    row: &mut Row,
    columns: &[ColumnTemplate],
    skips: &mut SkipLog,
) -> BridgeResult<()> {
    for (i, col) in columns.iter().enumerate() {
        let Some((key, template)) = col.parts() else {
            skips.skip(incomplete("dynamic_columns", i, col))?;
            continue;
        };
        let value = resolve(template, row);
        row.insert(key.to_string(), Value::String(value));
    }
    Ok(())
}

/// Stage 4: per-column wrappers.
///
/// A row column literally named `column_data` takes precedence over the
/// wrapped column's own value.
pub fn wrap_columns(
    row: &mut Row,
    columns: &[ColumnTemplate],
    skips: &mut SkipLog,
) -> BridgeResult<()> {
    for (i, col) in columns.iter().enumerate() {
        let Some((key, template)) = col.parts() else {
            skips.skip(incomplete("wrap_columns", i, col))?;
            continue;
        };
        let value = resolve_with(template, |name| {
            row_value(row, name).or_else(|| {
                (name == COLUMN_DATA)
                    .then(|| row.get(key).map(value_to_string).unwrap_or_default())
            })
        });
        row.insert(key.to_string(), Value::String(value));
    }
    Ok(())
}

/// Stage 5: wrap every column except `DT_RowId` and `DT_RowData`.
///
/// Only the literal `{{column_data}}` is substituted here, wherever it
/// appears in the template.
pub fn wrap_all(row: &mut Row, template: &str) {
    for (key, value) in row.iter_mut() {
        if key == ROW_ID_KEY || key == ROW_DATA_KEY {
            continue;
        }
        let wrapped = template.replace(COLUMN_DATA_TOKEN, &value_to_string(value));
        *value = Value::String(wrapped);
    }
}

/// Stage 6: drop keys, keeping the order of the rest.
pub fn hide_columns(row: &mut Row, keys: &[String]) {
    for key in keys {
        row.shift_remove(key.as_str());
    }
}

fn incomplete(option: &str, index: usize, col: &ColumnTemplate) -> BridgeError {
    BridgeError::missing(
        format!("{}[{}]", option, index),
        col.missing_field().unwrap_or("key"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    fn keys(r: &Row) -> Vec<&str> {
        r.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_dynamic_row_id_keeps_type() {
        let mut r = row(json!({"id": 1, "name": "A"}));
        assign_row_id(&mut r, &RowIdSpec::dynamic("id"), 0, &mut SkipLog::new(false)).unwrap();
        assert_eq!(r[ROW_ID_KEY], json!(1));
    }

    #[test]
    fn test_fixed_row_id_with_prepend() {
        let mut r = row(json!({"id": 1, "name": "A"}));
        let spec = RowIdSpec::fixed("row_").with_prepend("r_");
        assign_row_id(&mut r, &spec, 0, &mut SkipLog::new(false)).unwrap();
        assert_eq!(r[ROW_ID_KEY], "r_row_0");
    }

    #[test]
    fn test_fixed_row_id_uses_position() {
        let mut r = row(json!({"id": 99}));
        assign_row_id(&mut r, &RowIdSpec::fixed("row_"), 4, &mut SkipLog::new(false)).unwrap();
        assert_eq!(r[ROW_ID_KEY], "row_4");
    }

    #[test]
    fn test_dynamic_prepend_stringifies() {
        let mut r = row(json!({"id": 12}));
        let spec = RowIdSpec::dynamic("id").with_prepend("user_");
        assign_row_id(&mut r, &spec, 0, &mut SkipLog::new(false)).unwrap();
        assert_eq!(r[ROW_ID_KEY], "user_12");
    }

    #[test]
    fn test_prepend_skipped_for_empty_id() {
        let mut r = row(json!({"id": 0}));
        let spec = RowIdSpec::dynamic("id").with_prepend("user_");
        assign_row_id(&mut r, &spec, 0, &mut SkipLog::new(false)).unwrap();
        assert_eq!(r[ROW_ID_KEY], json!(0));

        let mut r = row(json!({}));
        let spec = RowIdSpec::fixed("").with_prepend("p_");
        assign_row_id(&mut r, &spec, 0, &mut SkipLog::new(false)).unwrap();
        assert_eq!(r[ROW_ID_KEY], "0");
    }

    #[test]
    fn test_dynamic_missing_or_null_column_skips() {
        let spec = RowIdSpec::dynamic("id").with_prepend("x_");
        let mut skips = SkipLog::new(true);

        let mut r = row(json!({"name": "A"}));
        assign_row_id(&mut r, &spec, 0, &mut skips).unwrap();
        assert!(!r.contains_key(ROW_ID_KEY));

        let mut r = row(json!({"id": null}));
        assign_row_id(&mut r, &spec, 0, &mut skips).unwrap();
        assert!(!r.contains_key(ROW_ID_KEY));
        assert_eq!(skips.notes().len(), 1);
    }

    #[test]
    fn test_row_id_without_type_or_key() {
        let mut r = row(json!({"id": 1}));
        let mut skips = SkipLog::new(false);
        let no_type = RowIdSpec { key: Some("id".into()), ..Default::default() };
        assign_row_id(&mut r, &no_type, 0, &mut skips).unwrap();
        let no_key = RowIdSpec { mode: Some("fixed".into()), ..Default::default() };
        assign_row_id(&mut r, &no_key, 0, &mut skips).unwrap();

        assert!(!r.contains_key(ROW_ID_KEY));
        assert_eq!(skips.notes().len(), 2);

        let err = assign_row_id(&mut r, &no_key, 0, &mut SkipLog::new(true)).unwrap_err();
        assert!(matches!(err, BridgeError::MissingOptionField { ref field, .. } if field == "key"));
    }

    #[test]
    fn test_unknown_row_id_type_strict() {
        let mut r = row(json!({"id": 1}));
        let spec = RowIdSpec { mode: Some("serial".into()), key: Some("id".into()), prepend: None };
        let err = assign_row_id(&mut r, &spec, 0, &mut SkipLog::new(true)).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidOption { .. }));
    }

    #[test]
    fn test_row_data_is_nested() {
        let mut r = row(json!({"id": 5, "slug": "five"}));
        let templates = json!({"pkey": "{{id}}", "url": "/p/{{slug}}/{{nope}}", "flag": true});
        apply_row_data(&mut r, templates.as_object().unwrap());

        assert_eq!(r[ROW_DATA_KEY]["pkey"], "5");
        assert_eq!(r[ROW_DATA_KEY]["url"], "/p/five/{{nope}}");
        assert_eq!(r[ROW_DATA_KEY]["flag"], true);
        assert!(!r.contains_key("pkey"));
    }

    #[test]
    fn test_row_data_merges_existing_object() {
        let mut r = row(json!({"id": 5, "DT_RowData": {"keep": 1}}));
        apply_row_data(&mut r, json!({"pkey": "{{id}}"}).as_object().unwrap());
        assert_eq!(r[ROW_DATA_KEY], json!({"keep": 1, "pkey": "5"}));
    }

    #[test]
    fn test_dynamic_columns_chain() {
        let mut r = row(json!({"first": "Ada", "last": "Lovelace"}));
        let cols = vec![
            ColumnTemplate::new("full", "{{first}} {{last}}"),
            ColumnTemplate::new("card", "<b>{{full}}</b>"),
        ];
        inject_dynamic_columns(&mut r, &cols, &mut SkipLog::new(false)).unwrap();

        assert_eq!(r["full"], "Ada Lovelace");
        assert_eq!(r["card"], "<b>Ada Lovelace</b>");
        assert_eq!(keys(&r), vec!["first", "last", "full", "card"]);
    }

    #[test]
    fn test_incomplete_dynamic_column_skipped() {
        let mut r = row(json!({"id": 1}));
        let cols = vec![
            ColumnTemplate { key: Some("broken".into()), column_template: None },
            ColumnTemplate::new("ok", "{{id}}"),
        ];
        let mut skips = SkipLog::new(false);
        inject_dynamic_columns(&mut r, &cols, &mut skips).unwrap();

        assert!(!r.contains_key("broken"));
        assert_eq!(r["ok"], "1");
        assert!(skips.notes()[0].contains("dynamic_columns[0]"));

        let err = inject_dynamic_columns(&mut r, &cols, &mut SkipLog::new(true)).unwrap_err();
        assert!(err.to_string().contains("column_template"));
    }

    #[test]
    fn test_wrap_column_data() {
        let mut r = row(json!({"price": 10}));
        let cols = vec![ColumnTemplate::new("price", "${{column_data}}")];
        wrap_columns(&mut r, &cols, &mut SkipLog::new(false)).unwrap();
        assert_eq!(r["price"], "$10");
    }

    #[test]
    fn test_wrap_mixes_row_values() {
        let mut r = row(json!({"id": 3, "name": "Ada", "email": "ada@example.org"}));
        let cols = vec![ColumnTemplate::new(
            "name",
            r#"<a href="/u/{{id}}" title="{{email}}">{{column_data}}</a>"#,
        )];
        wrap_columns(&mut r, &cols, &mut SkipLog::new(false)).unwrap();
        assert_eq!(r["name"], r#"<a href="/u/3" title="ada@example.org">Ada</a>"#);
        assert_eq!(keys(&r), vec!["id", "name", "email"]);
    }

    #[test]
    fn test_wrap_prefers_real_column_data_column() {
        let mut r = row(json!({"column_data": "real", "x": "own"}));
        let cols = vec![ColumnTemplate::new("x", "[{{column_data}}]")];
        wrap_columns(&mut r, &cols, &mut SkipLog::new(false)).unwrap();
        assert_eq!(r["x"], "[real]");
    }

    #[test]
    fn test_wrap_missing_column_appends_empty() {
        let mut r = row(json!({"a": 1}));
        let cols = vec![ColumnTemplate::new("ghost", "<{{column_data}}>")];
        wrap_columns(&mut r, &cols, &mut SkipLog::new(false)).unwrap();
        assert_eq!(r["ghost"], "<>");
        assert_eq!(keys(&r), vec!["a", "ghost"]);
    }

    #[test]
    fn test_wrap_all_skips_reserved_keys() {
        let mut r = row(json!({"DT_RowId": "r1", "a": 1, "b": null, "DT_RowData": {"k": "v"}}));
        wrap_all(&mut r, "<td>{{column_data}}|{{a}}</td>");

        assert_eq!(r[ROW_ID_KEY], "r1");
        assert_eq!(r[ROW_DATA_KEY], json!({"k": "v"}));
        assert_eq!(r["a"], "<td>1|{{a}}</td>");
        assert_eq!(r["b"], "<td>|{{a}}</td>");
    }

    #[test]
    fn test_wrap_all_replaces_token_inside_extra_braces() {
        let mut r = row(json!({"id": 1, "name": "Ada"}));
        wrap_all(&mut r, "{{{{column_data}}}}");
        assert_eq!(r["id"], "{{1}}");
        assert_eq!(r["name"], "{{Ada}}");

        let mut r = row(json!({"id": 2}));
        wrap_all(&mut r, "<i title=\"{{column_data}}\">{{column_data}}</i>");
        assert_eq!(r["id"], "<i title=\"2\">2</i>");
    }

    #[test]
    fn test_dynamic_column_resolves_nested_occurrences() {
        let mut r = row(json!({"id": 1}));
        let cols = vec![ColumnTemplate::new("label", "{{id}} {{a {{id}}")];
        inject_dynamic_columns(&mut r, &cols, &mut SkipLog::new(false)).unwrap();
        assert_eq!(r["label"], "1 {{a 1");
    }

    #[test]
    fn test_hide_preserves_order() {
        let mut r = row(json!({"a": 1, "id": 2, "b": 3, "c": null}));
        hide_columns(&mut r, &["id".to_string(), "c".to_string(), "zzz".to_string()]);
        assert_eq!(keys(&r), vec!["a", "b"]);
    }
}
