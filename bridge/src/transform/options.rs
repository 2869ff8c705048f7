//! Option bag driving the row pipeline.
//!
//! Every sub-option is optional and toggled by presence. Keys follow the
//! DataTables/bridge spelling (`DT_RowId`, `dynamic_columns`, ...) and the
//! camelCase spelling (`rowIdSpec`, `dynamicColumns`, ...) is accepted too.
//! When a bag carries both spellings of one option the bridge spelling wins.
//!
//! Parsing is lenient: a sub-option of the wrong JSON type is dropped and
//! recorded in [`Options::skipped`], so the pipeline runs without it (or
//! fails, in strict mode). Null counts as absent.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use super::template::{placeholders, COLUMN_DATA};
use crate::error::{ConfigError, ConfigResult};
use crate::models::{ROW_DATA_KEY, ROW_ID_KEY};

// Accepted spellings per option, preferred first
const ROW_ID_KEYS: &[&str] = &[ROW_ID_KEY, "rowIdSpec"];
const ROW_DATA_KEYS: &[&str] = &[ROW_DATA_KEY, "rowDataTemplates"];
const DYNAMIC_COLUMNS_KEYS: &[&str] = &["dynamic_columns", "dynamicColumns"];
const WRAP_COLUMNS_KEYS: &[&str] = &["wrap_columns", "wrapColumns"];
const WRAP_ALL_KEYS: &[&str] = &["wrap_all", "wrapAllTemplate"];
const HIDE_COLUMNS_KEYS: &[&str] = &["hide_columns", "hideColumns"];
const INCLUDE_COLUMNS_KEYS: &[&str] = &["include_columns", "includeColumns"];
const STRICT_KEYS: &[&str] = &["strict"];
const ROW_ID_MODE_KEYS: &[&str] = &["type", "mode"];
const TEMPLATE_KEYS: &[&str] = &["column_template", "template"];

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Options {
    /// How to build `DT_RowId`
    #[serde(rename = "DT_RowId", skip_serializing_if = "Option::is_none")]
    pub row_id: Option<RowIdSpec>,

    /// `DT_RowData` entries: data key → template
    #[serde(rename = "DT_RowData", skip_serializing_if = "Option::is_none")]
    pub row_data: Option<Map<String, Value>>,

    /// Computed columns, applied in order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_columns: Option<Vec<ColumnTemplate>>,

    /// Per-column wrappers, applied in order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_columns: Option<Vec<ColumnTemplate>>,

    /// One wrapper applied to every plain column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_all: Option<WrapAll>,

    /// Keys removed from every row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_columns: Option<Vec<String>>,

    /// Wrap the output with a column manifest taken from the first row
    pub include_columns: bool,

    /// Fail on malformed sub-options instead of skipping them
    pub strict: bool,

    /// Sub-options dropped while parsing
    #[serde(skip)]
    pub skipped: Vec<SkippedOption>,
}

/// A sub-option that had the wrong JSON type and was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOption {
    /// Path of the offending option, e.g. `DT_RowId.key`
    pub option: String,
    pub message: String,
}

/// `DT_RowId` configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowIdSpec {
    /// `"fixed"` or `"dynamic"`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Fixed: id prefix. Dynamic: source column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Prefix added to any non-empty id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepend: Option<String>,
}

/// Recognized row id modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIdMode {
    /// `key` followed by the row's position in the input
    Fixed,
    /// Value of the row's `key` column
    Dynamic,
}

impl RowIdMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RowIdMode::Fixed => "fixed",
            RowIdMode::Dynamic => "dynamic",
        }
    }
}

impl RowIdSpec {
    pub fn fixed(key: impl Into<String>) -> Self {
        Self {
            mode: Some(RowIdMode::Fixed.as_str().to_string()),
            key: Some(key.into()),
            prepend: None,
        }
    }

    pub fn dynamic(key: impl Into<String>) -> Self {
        Self {
            mode: Some(RowIdMode::Dynamic.as_str().to_string()),
            key: Some(key.into()),
            prepend: None,
        }
    }

    pub fn with_prepend(mut self, prepend: impl Into<String>) -> Self {
        self.prepend = Some(prepend.into());
        self
    }

    /// Parsed mode; `None` when missing or unrecognized.
    pub fn parsed_mode(&self) -> Option<RowIdMode> {
        match self.mode.as_deref() {
            Some("fixed") => Some(RowIdMode::Fixed),
            Some("dynamic") => Some(RowIdMode::Dynamic),
            _ => None,
        }
    }
}

/// A `{key, column_template}` entry of `dynamic_columns` / `wrap_columns`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_template: Option<String>,
}

impl ColumnTemplate {
    pub fn new(key: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            column_template: Some(template.into()),
        }
    }

    /// Both fields, or `None` if either is missing.
    pub fn parts(&self) -> Option<(&str, &str)> {
        Some((self.key.as_deref()?, self.column_template.as_deref()?))
    }

    /// Name of the first missing field.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.key.is_none() {
            Some("key")
        } else if self.column_template.is_none() {
            Some("column_template")
        } else {
            None
        }
    }
}

/// Wrap-all template, either `{"columns": "<tpl>"}` or a bare string
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WrapAll {
    Template(String),
    Columns {
        #[serde(skip_serializing_if = "Option::is_none")]
        columns: Option<String>,
    },
}

impl WrapAll {
    pub fn template(&self) -> Option<&str> {
        match self {
            WrapAll::Template(t) => Some(t),
            WrapAll::Columns { columns } => columns.as_deref(),
        }
    }
}

// =============================================================================
// Lenient parsing
// =============================================================================

/// Walks one option bag, collecting what had to be dropped.
#[derive(Default)]
struct BagReader {
    skipped: Vec<SkippedOption>,
}

impl BagReader {
    /// First non-null value among `keys`, with the spelling that matched.
    fn pick<'v>(obj: &'v Map<String, Value>, keys: &[&'static str]) -> Option<(&'static str, &'v Value)> {
        keys.iter()
            .find_map(|k| obj.get(*k).filter(|v| !v.is_null()).map(|v| (*k, v)))
    }

    fn wrong_type(&mut self, option: impl Into<String>, expected: &str, found: &Value) {
        self.skipped.push(SkippedOption {
            option: option.into(),
            message: format!("expected {}, found {}", expected, json_type(found)),
        });
    }

    fn string(&mut self, path: String, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.wrong_type(path, "a string", other);
                None
            }
        }
    }

    fn string_field(&mut self, owner: &str, obj: &Map<String, Value>, keys: &[&'static str]) -> Option<String> {
        let (name, value) = Self::pick(obj, keys)?;
        self.string(format!("{}.{}", owner, name), value)
    }

    fn object<'v>(&mut self, name: &str, value: &'v Value) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(obj) => Some(obj),
            other => {
                self.wrong_type(name, "an object", other);
                None
            }
        }
    }

    fn array<'v>(&mut self, name: &str, value: &'v Value) -> Option<&'v Vec<Value>> {
        match value {
            Value::Array(items) => Some(items),
            other => {
                self.wrong_type(name, "an array", other);
                None
            }
        }
    }

    fn row_id(&mut self, name: &str, value: &Value) -> Option<RowIdSpec> {
        let obj = self.object(name, value)?;
        Some(RowIdSpec {
            mode: self.string_field(name, obj, ROW_ID_MODE_KEYS),
            key: self.string_field(name, obj, &["key"]),
            prepend: self.string_field(name, obj, &["prepend"]),
        })
    }

    fn column_templates(&mut self, name: &str, value: &Value) -> Option<Vec<ColumnTemplate>> {
        let items = self.array(name, value)?;
        let mut columns = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let path = format!("{}[{}]", name, i);
            let Some(obj) = self.object(&path, item) else {
                continue;
            };
            columns.push(ColumnTemplate {
                key: self.string_field(&path, obj, &["key"]),
                column_template: self.string_field(&path, obj, TEMPLATE_KEYS),
            });
        }
        Some(columns)
    }

    fn wrap_all(&mut self, name: &str, value: &Value) -> Option<WrapAll> {
        match value {
            Value::String(t) => Some(WrapAll::Template(t.clone())),
            Value::Object(obj) => {
                let columns = match Self::pick(obj, &["columns"]) {
                    Some((_, v)) => Some(self.string(format!("{}.columns", name), v)?),
                    None => None,
                };
                Some(WrapAll::Columns { columns })
            }
            other => {
                self.wrong_type(name, "a string or an object", other);
                None
            }
        }
    }

    fn key_list(&mut self, name: &str, value: &Value) -> Option<Vec<String>> {
        let items = self.array(name, value)?;
        Some(
            items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| self.string(format!("{}[{}]", name, i), item))
                .collect(),
        )
    }

    fn flag(&mut self, name: &str, value: &Value) -> bool {
        match value {
            Value::Bool(b) => *b,
            other => {
                self.wrong_type(name, "a boolean", other);
                false
            }
        }
    }

    fn read(mut self, obj: &Map<String, Value>) -> Options {
        let mut options = Options::new();

        if let Some((name, v)) = Self::pick(obj, ROW_ID_KEYS) {
            options.row_id = self.row_id(name, v);
        }
        if let Some((name, v)) = Self::pick(obj, ROW_DATA_KEYS) {
            options.row_data = self.object(name, v).cloned();
        }
        if let Some((name, v)) = Self::pick(obj, DYNAMIC_COLUMNS_KEYS) {
            options.dynamic_columns = self.column_templates(name, v);
        }
        if let Some((name, v)) = Self::pick(obj, WRAP_COLUMNS_KEYS) {
            options.wrap_columns = self.column_templates(name, v);
        }
        if let Some((name, v)) = Self::pick(obj, WRAP_ALL_KEYS) {
            options.wrap_all = self.wrap_all(name, v);
        }
        if let Some((name, v)) = Self::pick(obj, HIDE_COLUMNS_KEYS) {
            options.hide_columns = self.key_list(name, v);
        }
        // Presence switches it on; only an explicit `false` keeps it off
        options.include_columns = Self::pick(obj, INCLUDE_COLUMNS_KEYS)
            .map(|(_, v)| v.as_bool().unwrap_or(true))
            .unwrap_or(false);
        if let Some((name, v)) = Self::pick(obj, STRICT_KEYS) {
            options.strict = self.flag(name, v);
        }

        options.skipped = self.skipped;
        options
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl<'de> Deserialize<'de> for Options {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Options::from_value(&value).map_err(D::Error::custom)
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Parse options from a JSON value, dropping sub-options of the wrong type.
    ///
    /// `null` is an empty bag; anything else that is not an object is an error.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(obj) => Ok(BagReader::default().read(obj)),
            other => Err(serde_json::Error::custom(format!(
                "expected an option object, found {}",
                json_type(other)
            ))),
        }
    }

    /// Schema-check, then parse
    pub fn from_value_strict(value: &Value) -> ConfigResult<Self> {
        crate::validation::validate_options(value)
            .map_err(|errors| ConfigError::Schema { errors })?;
        let options = Self::from_value(value)?;
        if !options.skipped.is_empty() {
            let errors = options
                .skipped
                .iter()
                .map(|s| format!("{}: {}", s.option, s.message))
                .collect();
            return Err(ConfigError::Schema { errors });
        }
        Ok(options)
    }

    /// Read a JSON option file
    pub fn from_file(path: impl AsRef<Path>, validate: bool) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;
        if validate {
            Self::from_value_strict(&value)
        } else {
            Ok(Self::from_value(&value)?)
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn with_row_id(mut self, spec: RowIdSpec) -> Self {
        self.row_id = Some(spec);
        self
    }

    pub fn with_row_data(mut self, data_key: impl Into<String>, template: impl Into<String>) -> Self {
        self.row_data
            .get_or_insert_with(Map::new)
            .insert(data_key.into(), Value::String(template.into()));
        self
    }

    pub fn with_dynamic_column(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.dynamic_columns
            .get_or_insert_with(Vec::new)
            .push(ColumnTemplate::new(key, template));
        self
    }

    pub fn with_wrap_column(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.wrap_columns
            .get_or_insert_with(Vec::new)
            .push(ColumnTemplate::new(key, template));
        self
    }

    pub fn with_wrap_all(mut self, template: impl Into<String>) -> Self {
        self.wrap_all = Some(WrapAll::Columns {
            columns: Some(template.into()),
        });
        self
    }

    pub fn hide(mut self, key: impl Into<String>) -> Self {
        self.hide_columns.get_or_insert_with(Vec::new).push(key.into());
        self
    }

    pub fn include_columns(mut self) -> Self {
        self.include_columns = true;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Row columns referenced by any template (excluding `column_data`)
    pub fn referenced_columns(&self) -> Vec<String> {
        let mut templates: Vec<&str> = Vec::new();

        if let Some(ref data) = self.row_data {
            templates.extend(data.values().filter_map(Value::as_str));
        }
        for col in self.dynamic_columns.iter().chain(self.wrap_columns.iter()).flatten() {
            if let Some(ref t) = col.column_template {
                templates.push(t);
            }
        }

        let mut columns: Vec<String> = templates
            .into_iter()
            .flat_map(placeholders)
            .map(|p| p.name.to_string())
            .filter(|name| name != COLUMN_DATA)
            .collect();

        if let Some(RowIdSpec { mode: Some(ref mode), key: Some(ref key), .. }) = self.row_id {
            if mode == RowIdMode::Dynamic.as_str() {
                columns.push(key.clone());
            }
        }

        // Dynamic columns can feed later templates
        let computed: Vec<&str> = self
            .dynamic_columns
            .iter()
            .flatten()
            .filter_map(|c| c.key.as_deref())
            .collect();
        columns.retain(|c| !computed.contains(&c.as_str()));
        if self.row_id.is_some() {
            columns.retain(|c| c != ROW_ID_KEY);
        }
        if self.row_data.is_some() {
            columns.retain(|c| c != ROW_DATA_KEY);
        }

        columns.sort();
        columns.dedup();
        columns
    }

    /// Check that every referenced column exists in `headers`
    pub fn validate_headers(&self, headers: &[String]) -> Result<(), Vec<String>> {
        let missing: Vec<String> = self
            .referenced_columns()
            .into_iter()
            .filter(|col| !headers.iter().any(|h| h == col))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}

/// Example option bag for documentation and the CLI
pub fn example_options() -> Options {
    Options::new()
        .with_row_id(RowIdSpec::dynamic("id").with_prepend("row_"))
        .with_row_data("pkey", "{{id}}")
        .with_dynamic_column(
            "actions",
            r#"<a href="/users/{{id}}/edit">Edit</a> <a href="/users/{{id}}/delete">Delete</a>"#,
        )
        .with_wrap_column("email", r#"<a href="mailto:{{column_data}}">{{column_data}}</a>"#)
        .hide("password")
        .include_columns()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bridge_keys() {
        let options = Options::from_value(&json!({
            "DT_RowId": {"type": "fixed", "key": "row_", "prepend": "r_"},
            "DT_RowData": {"pkey": "{{id}}"},
            "dynamic_columns": [{"key": "actions", "column_template": "<b>{{id}}</b>"}],
            "wrap_columns": [{"key": "price", "column_template": "${{column_data}}"}],
            "wrap_all": {"columns": "<td>{{column_data}}</td>"},
            "hide_columns": ["id"],
            "include_columns": true
        }))
        .unwrap();

        let row_id = options.row_id.as_ref().unwrap();
        assert_eq!(row_id.parsed_mode(), Some(RowIdMode::Fixed));
        assert_eq!(row_id.prepend.as_deref(), Some("r_"));
        assert_eq!(options.dynamic_columns.as_ref().unwrap()[0].parts(), Some(("actions", "<b>{{id}}</b>")));
        assert_eq!(options.wrap_all.as_ref().and_then(WrapAll::template), Some("<td>{{column_data}}</td>"));
        assert_eq!(options.hide_columns, Some(vec!["id".to_string()]));
        assert!(options.include_columns);
        assert!(!options.strict);
    }

    #[test]
    fn test_parse_camel_case_aliases() {
        let options = Options::from_value(&json!({
            "rowIdSpec": {"mode": "dynamic", "key": "id"},
            "rowDataTemplates": {"pkey": "{{id}}"},
            "dynamicColumns": [{"key": "a", "template": "x"}],
            "wrapColumns": [],
            "wrapAllTemplate": "<i>{{column_data}}</i>",
            "hideColumns": ["secret"],
            "includeColumns": true
        }))
        .unwrap();

        assert_eq!(options.row_id.unwrap().parsed_mode(), Some(RowIdMode::Dynamic));
        assert_eq!(options.dynamic_columns.unwrap()[0].parts(), Some(("a", "x")));
        assert_eq!(options.wrap_all.unwrap().template(), Some("<i>{{column_data}}</i>"));
        assert!(options.include_columns);
    }

    #[test]
    fn test_row_data_keeps_order() {
        let options = Options::from_json(r#"{"DT_RowData": {"z": "1", "a": "2", "m": "3"}}"#).unwrap();
        let keys: Vec<&String> = options.row_data.as_ref().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_incomplete_entries_parse() {
        let options = Options::from_value(&json!({
            "dynamic_columns": [{"key": "only_key"}, {"column_template": "only tpl"}],
            "wrap_all": {}
        }))
        .unwrap();

        let cols = options.dynamic_columns.unwrap();
        assert_eq!(cols[0].missing_field(), Some("column_template"));
        assert_eq!(cols[1].missing_field(), Some("key"));
        assert_eq!(options.wrap_all.unwrap().template(), None);
    }

    #[test]
    fn test_unknown_mode_is_unparsed() {
        let spec = RowIdSpec {
            mode: Some("sequential".into()),
            key: Some("id".into()),
            prepend: None,
        };
        assert_eq!(spec.parsed_mode(), None);
    }

    #[test]
    fn test_example_round_trips() {
        let options = example_options();
        let parsed = Options::from_json(&options.to_json().unwrap()).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_referenced_columns() {
        let options = example_options().with_dynamic_column("label", "{{actions}} {{name}}");
        assert_eq!(options.referenced_columns(), vec!["id".to_string(), "name".to_string()]);

        let headers = vec!["id".to_string()];
        assert_eq!(options.validate_headers(&headers), Err(vec!["name".to_string()]));
    }

    #[test]
    fn test_wrong_types_are_dropped_not_fatal() {
        let options = Options::from_value(&json!({
            "hide_columns": "id",
            "include_columns": true
        }))
        .unwrap();
        assert_eq!(options.hide_columns, None);
        assert!(options.include_columns);
        assert_eq!(
            options.skipped,
            vec![SkippedOption {
                option: "hide_columns".into(),
                message: "expected an array, found a string".into(),
            }]
        );

        let options = Options::from_value(&json!({"DT_RowId": {"type": "fixed", "key": 5}})).unwrap();
        let row_id = options.row_id.unwrap();
        assert_eq!(row_id.parsed_mode(), Some(RowIdMode::Fixed));
        assert_eq!(row_id.key, None);
        assert_eq!(options.skipped[0].option, "DT_RowId.key");

        let options = Options::from_value(&json!({"wrap_all": {"columns": 5}})).unwrap();
        assert_eq!(options.wrap_all, None);
        assert_eq!(options.skipped[0].option, "wrap_all.columns");
    }

    #[test]
    fn test_bad_list_entries_dropped_individually() {
        let options = Options::from_value(&json!({
            "dynamic_columns": [7, {"key": "a", "column_template": "x"}],
            "hide_columns": ["secret", 3, "token"]
        }))
        .unwrap();

        let cols = options.dynamic_columns.unwrap();
        assert_eq!(cols.len(), 1);
        assert_eq!(cols[0].parts(), Some(("a", "x")));
        assert_eq!(options.hide_columns, Some(vec!["secret".to_string(), "token".to_string()]));
        let paths: Vec<&str> = options.skipped.iter().map(|s| s.option.as_str()).collect();
        assert_eq!(paths, vec!["dynamic_columns[0]", "hide_columns[1]"]);
    }

    #[test]
    fn test_include_columns_set_by_presence() {
        for on in [json!(true), json!(1), json!("yes"), json!([])] {
            let options = Options::from_value(&json!({"include_columns": on})).unwrap();
            assert!(options.include_columns);
            assert!(options.skipped.is_empty());
        }
        for off in [json!(false), Value::Null] {
            let options = Options::from_value(&json!({"include_columns": off})).unwrap();
            assert!(!options.include_columns);
        }
    }

    #[test]
    fn test_bridge_spelling_wins_over_camel_case() {
        let options = Options::from_value(&json!({
            "DT_RowId": {"type": "dynamic", "key": "id"},
            "rowIdSpec": {"mode": "fixed", "key": "row_"},
            "hide_columns": ["a"],
            "hideColumns": ["b"],
            "wrap_columns": [{"key": "c", "column_template": "1", "template": "2"}]
        }))
        .unwrap();

        assert_eq!(options.row_id, Some(RowIdSpec::dynamic("id")));
        assert_eq!(options.hide_columns, Some(vec!["a".to_string()]));
        assert_eq!(options.wrap_columns.unwrap()[0].parts(), Some(("c", "1")));
        assert!(options.skipped.is_empty());
    }

    #[test]
    fn test_null_means_absent() {
        let options = Options::from_value(&json!({
            "DT_RowId": null,
            "rowIdSpec": {"mode": "dynamic", "key": "id"},
            "hide_columns": null
        }))
        .unwrap();
        assert_eq!(options.row_id, Some(RowIdSpec::dynamic("id")));
        assert_eq!(options.hide_columns, None);

        assert_eq!(Options::from_value(&Value::Null).unwrap(), Options::default());
        assert!(Options::from_value(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_serde_deserialize_is_lenient() {
        let options: Options = serde_json::from_str(r#"{"hide_columns": "id", "strict": true}"#).unwrap();
        assert!(options.strict);
        assert_eq!(options.skipped.len(), 1);
    }
}
