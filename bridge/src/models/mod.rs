//! Data structures flowing through the bridge.
//!
//! - [`Row`] - One record, an insertion-ordered column → value map
//! - [`QueryRows`] - What the upstream query layer hands over
//! - [`Envelope`] - The DataTables response body
//! - [`DatatableJson`] - Envelope, optionally wrapped with a column manifest

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved row key holding the row identifier.
pub const ROW_ID_KEY: &str = "DT_RowId";

/// Reserved row key holding the auxiliary data object.
pub const ROW_DATA_KEY: &str = "DT_RowData";

/// One record: column name → scalar value, in first-insertion order.
pub type Row = Map<String, Value>;

// =============================================================================
// Query Result
// =============================================================================

/// Rows as received from the query layer.
///
/// `NoData` is the upstream "no result" marker and differs from an empty
/// but successful result.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryRows {
    Rows(Vec<Row>),
    NoData,
}

impl QueryRows {
    pub fn is_no_data(&self) -> bool {
        matches!(self, QueryRows::NoData)
    }

    pub fn into_rows(self) -> Option<Vec<Row>> {
        match self {
            QueryRows::Rows(rows) => Some(rows),
            QueryRows::NoData => None,
        }
    }
}

impl From<Vec<Row>> for QueryRows {
    fn from(rows: Vec<Row>) -> Self {
        QueryRows::Rows(rows)
    }
}

impl From<Option<Vec<Row>>> for QueryRows {
    fn from(rows: Option<Vec<Row>>) -> Self {
        rows.map_or(QueryRows::NoData, QueryRows::Rows)
    }
}

// =============================================================================
// Output
// =============================================================================

/// DataTables server-side response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub records_total: usize,
    pub records_filtered: usize,
    pub data: Vec<Row>,
}

impl Envelope {
    /// Both counts mirror the number of rows handed in.
    pub fn new(data: Vec<Row>) -> Self {
        Self {
            records_total: data.len(),
            records_filtered: data.len(),
            data,
        }
    }
}

/// Column manifest entry (`{"data": "<column>"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub data: String,
}

/// Final pipeline output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatatableJson {
    /// `{records, columns}` wrapper, produced when column inclusion is on
    WithColumns {
        records: Envelope,
        columns: Vec<ColumnDef>,
    },
    Plain(Envelope),
}

impl DatatableJson {
    /// The envelope, wrapped or not.
    pub fn envelope(&self) -> &Envelope {
        match self {
            DatatableJson::WithColumns { records, .. } => records,
            DatatableJson::Plain(envelope) => envelope,
        }
    }

    /// The column manifest, if one was built.
    pub fn columns(&self) -> Option<&[ColumnDef]> {
        match self {
            DatatableJson::WithColumns { columns, .. } => Some(columns),
            DatatableJson::Plain(_) => None,
        }
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
