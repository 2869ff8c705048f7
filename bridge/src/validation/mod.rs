//! JSON Schema validation for option bags.
//!
//! The pipeline itself skips malformed sub-options. Callers that want
//! them rejected up front validate the raw JSON against the embedded
//! draft-7 schema (`schemas/datatable-options.json`) before parsing.
//!
//! ```rust,ignore
//! use serde_json::json;
//! use dtbridge::validation::validate_options;
//!
//! let ok = json!({"DT_RowId": {"type": "dynamic", "key": "id"}});
//! assert!(validate_options(&ok).is_ok());
//!
//! let bad = json!({"dynamic_columns": [{"key": "actions"}]});
//! assert!(validate_options(&bad).is_err());
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

static OPTIONS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/datatable-options.json"))
        .expect("Invalid embedded schema")
});

/// Validate `data` against `schema`, collecting every error message.
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick yes/no check.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate an option bag.
pub fn validate_options(data: &Value) -> Result<(), Vec<String>> {
    validate(&OPTIONS_SCHEMA, data)
}

/// Quick check of an option bag.
pub fn is_valid_options(data: &Value) -> bool {
    is_valid(&OPTIONS_SCHEMA, data)
}
