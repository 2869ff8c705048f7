//! # dtbridge - DataTables JSON from query rows
//!
//! dtbridge takes rows already fetched by a query layer and shapes them
//! into the JSON a DataTables server-side table expects, adding row ids,
//! row data, computed and HTML-wrapped columns along the way.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ Query rows  │────▶│ Row stages  │────▶│   Envelope   │────▶│  JSON text  │
//! │ (or NoData) │     │ (6, ordered)│     │ (+ columns?) │     │             │
//! └─────────────┘     └─────────────┘     └──────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dtbridge::{create_json, Options, RowIdSpec};
//!
//! let options = Options::new()
//!     .with_row_id(RowIdSpec::dynamic("id").with_prepend("row_"))
//!     .with_dynamic_column("actions", r#"<a href="/edit/{{id}}">Edit</a>"#)
//!     .hide("password");
//!
//! let json = create_json(rows, &options)?.to_json()?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Rows, envelope, output
//! - [`transform`] - Templates, options, stages, pipeline
//! - [`parser`] - JSON/CSV row loading
//! - [`validation`] - Option bag schema checks
//! - [`logs`] - Log entries and broadcaster

// Core modules
pub mod error;
pub mod models;

// Transformation
pub mod transform;

// Input
pub mod parser;

// Validation
pub mod validation;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    BridgeError,
    BridgeResult,
    ConfigError,
    ConfigResult,
    SourceError,
    SourceResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ColumnDef,
    DatatableJson,
    Envelope,
    QueryRows,
    Row,
    ROW_DATA_KEY,
    ROW_ID_KEY,
};

// =============================================================================
// Re-exports - Options
// =============================================================================

pub use transform::options::{
    example_options,
    ColumnTemplate,
    Options,
    RowIdMode,
    RowIdSpec,
    SkippedOption,
    WrapAll,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    create_json,
    get_datatable,
    render_datatable,
    transform,
    RowSource,
};

pub use transform::template::{placeholders, resolve, Placeholder};

// =============================================================================
// Re-exports - Input
// =============================================================================

pub use parser::{
    detect_delimiter,
    detect_encoding,
    load_rows,
    parse_bytes_auto,
    parse_json_rows,
    FileSource,
    ParseResult,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid_options, validate_options};
