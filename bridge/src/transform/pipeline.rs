//! High-level API: rows in, DataTables JSON out.
//!
//! # Example
//!
//! ```rust,ignore
//! use dtbridge::{create_json, Options, RowIdSpec};
//! use serde_json::json;
//!
//! let rows = vec![json!({"id": 1, "name": "A"}).as_object().cloned().unwrap()];
//! let options = Options::new()
//!     .with_row_id(RowIdSpec::dynamic("id"))
//!     .include_columns();
//!
//! let out = create_json(rows, &options)?;
//! println!("{}", out.to_json()?);
//! ```

use crate::error::{BridgeError, BridgeResult, SourceResult};
use crate::logs::{log_error, log_info, log_success};
use crate::models::{ColumnDef, DatatableJson, Envelope, QueryRows, Row};

use super::options::Options;
use super::stages::{
    apply_row_data, assign_row_id, hide_columns, inject_dynamic_columns, wrap_all, wrap_columns,
    SkipLog,
};

/// The query layer this bridge sits behind.
pub trait RowSource {
    /// Run the query and hand over its rows, or the no-data marker.
    fn fetch_rows(&self) -> SourceResult<QueryRows>;
}

impl RowSource for QueryRows {
    fn fetch_rows(&self) -> SourceResult<QueryRows> {
        Ok(self.clone())
    }
}

impl RowSource for Vec<Row> {
    fn fetch_rows(&self) -> SourceResult<QueryRows> {
        Ok(QueryRows::Rows(self.clone()))
    }
}

/// Fetch from `source` and shape the result.
pub fn get_datatable<S: RowSource + ?Sized>(source: &S, options: &Options) -> BridgeResult<DatatableJson> {
    let rows = source.fetch_rows()?;
    create_json(rows, options)
}

/// Same as [`get_datatable`], serialized to a JSON string.
pub fn render_datatable<S: RowSource + ?Sized>(source: &S, options: &Options) -> BridgeResult<String> {
    Ok(get_datatable(source, options)?.to_json()?)
}

/// Shape query rows, failing with [`BridgeError::NoData`] on the no-data marker.
pub fn create_json(rows: impl Into<QueryRows>, options: &Options) -> BridgeResult<DatatableJson> {
    match rows.into() {
        QueryRows::NoData => {
            log_error("Query returned no data");
            Err(BridgeError::NoData)
        }
        QueryRows::Rows(rows) => transform(&rows, options),
    }
}

/// Run every row through the stages and build the output.
///
/// Input rows are cloned, never modified. In strict mode the first
/// malformed option aborts the call and no envelope is returned.
pub fn transform(rows: &[Row], options: &Options) -> BridgeResult<DatatableJson> {
    log_info(format!("Shaping {} rows", rows.len()));

    let mut skips = SkipLog::new(options.strict);
    for dropped in &options.skipped {
        skips.skip(BridgeError::invalid(dropped.option.clone(), dropped.message.clone()))?;
    }
    let mut data = Vec::with_capacity(rows.len());

    for (index, source) in rows.iter().enumerate() {
        let mut row = source.clone();
        transform_row(&mut row, index, options, &mut skips)?;
        data.push(row);
    }

    skips.flush();

    let envelope = Envelope::new(data);
    let output = if options.include_columns {
        with_columns(envelope)
    } else {
        DatatableJson::Plain(envelope)
    };

    log_success(format!("Built envelope with {} rows", output.envelope().records_total));
    Ok(output)
}

/// Apply the six stages to one row, in order.
pub fn transform_row(
    row: &mut Row,
    index: usize,
    options: &Options,
    skips: &mut SkipLog,
) -> BridgeResult<()> {
    if let Some(ref spec) = options.row_id {
        assign_row_id(row, spec, index, skips)?;
    }
    if let Some(ref templates) = options.row_data {
        apply_row_data(row, templates);
    }
    if let Some(ref columns) = options.dynamic_columns {
        inject_dynamic_columns(row, columns, skips)?;
    }
    if let Some(ref columns) = options.wrap_columns {
        wrap_columns(row, columns, skips)?;
    }
    if let Some(template) = options.wrap_all.as_ref().and_then(|w| w.template()) {
        wrap_all(row, template);
    }
    if let Some(ref keys) = options.hide_columns {
        hide_columns(row, keys);
    }
    Ok(())
}

/// Column manifest from the first row's keys.
///
/// Later rows with other keys are not reconciled. Without a first row (or
/// with an empty one) the plain envelope is kept.
fn with_columns(envelope: Envelope) -> DatatableJson {
    let columns: Vec<ColumnDef> = envelope
        .data
        .first()
        .map(|first| {
            first
                .keys()
                .map(|k| ColumnDef { data: k.clone() })
                .collect()
        })
        .unwrap_or_default();

    if columns.is_empty() {
        DatatableJson::Plain(envelope)
    } else {
        DatatableJson::WithColumns {
            records: envelope,
            columns,
        }
    }
}
