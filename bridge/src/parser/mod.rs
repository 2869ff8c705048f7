//! Row loading from JSON or CSV.
//!
//! Stands in for the query layer when the bridge runs from the command
//! line. JSON input is an array of row objects, or `false`/`null` for a
//! query that produced no result. CSV input gets encoding and delimiter
//! auto-detection; every value is loaded as a string.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{SourceError, SourceResult};
use crate::models::{QueryRows, Row};
use crate::transform::pipeline::RowSource;

/// Parsed CSV with detection metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub rows: Vec<Row>,
    pub headers: Vec<String>,
    pub encoding: String,
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string; unknown encodings fall back to lossy UTF-8
pub fn decode_content(bytes: &[u8], encoding: &str) -> SourceResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    };
    Ok(decoded)
}

/// Pick the delimiter that occurs most often in the header line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    [';', ',', '\t', '|']
        .into_iter()
        .map(|sep| (sep, first_line.matches(sep).count()))
        .filter(|&(_, count)| count > 0)
        .fold((',', 0), |best, cur| if cur.1 > best.1 { cur } else { best })
        .0
}

/// Parse CSV text with an explicit delimiter.
///
/// The header line names the keys. Blank lines are skipped, short lines
/// are padded with `""` and surplus fields are dropped.
pub fn parse_csv(content: &str, delimiter: char) -> SourceResult<(Vec<String>, Vec<Row>)> {
    let delim = u8::try_from(delimiter).map_err(|_| SourceError::Parse {
        line: 1,
        message: format!("delimiter '{}' is not a single byte", delimiter),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delim)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(SourceError::EmptyInput);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), Value::String(record.get(i).unwrap_or("").to_string())))
            .collect();
        rows.push(row);
    }

    Ok((headers, rows))
}

fn csv_error(err: csv::Error) -> SourceError {
    SourceError::Parse {
        line: err.position().map(|p| p.line()).unwrap_or(0),
        message: err.to_string(),
    }
}

/// Parse CSV bytes with encoding and delimiter auto-detection
pub fn parse_bytes_auto(bytes: &[u8]) -> SourceResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);
    let (headers, rows) = parse_csv(&content, delimiter)?;

    Ok(ParseResult {
        rows,
        headers,
        encoding,
        delimiter,
    })
}

/// Parse a JSON row list; `false` and `null` mean "no data"
pub fn parse_json_rows(content: &str) -> SourceResult<QueryRows> {
    let value: Value = serde_json::from_str(content)?;

    match value {
        Value::Bool(false) | Value::Null => Ok(QueryRows::NoData),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(map),
                _ => Err(SourceError::InvalidRow { index }),
            })
            .collect::<SourceResult<Vec<Map<String, Value>>>>()
            .map(QueryRows::Rows),
        _ => Err(SourceError::Json(<serde_json::Error as serde::de::Error>::custom(
            "expected an array of row objects, false or null",
        ))),
    }
}

/// Parse input whose format is unknown: JSON if it looks like it, CSV otherwise
pub fn parse_rows_auto(bytes: &[u8]) -> SourceResult<QueryRows> {
    if looks_like_json(bytes) {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| SourceError::Encoding(e.to_string()))?;
        parse_json_rows(content)
    } else {
        Ok(QueryRows::Rows(parse_bytes_auto(bytes)?.rows))
    }
}

fn looks_like_json(bytes: &[u8]) -> bool {
    let text = String::from_utf8_lossy(bytes);
    let trimmed = text.trim_start_matches('\u{feff}').trim();
    trimmed.starts_with('[') || trimmed == "false" || trimmed == "null"
}

/// Load rows from a file, by extension (`.json`, `.csv`) or by content
pub fn load_rows(path: impl AsRef<Path>) -> SourceResult<QueryRows> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    match path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref() {
        Some("json") => {
            let content = std::str::from_utf8(&bytes)
                .map_err(|e| SourceError::Encoding(e.to_string()))?;
            parse_json_rows(content)
        }
        Some("csv") | Some("tsv") => Ok(QueryRows::Rows(parse_bytes_auto(&bytes)?.rows)),
        _ => parse_rows_auto(&bytes),
    }
}

/// A JSON/CSV file acting as the query layer
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RowSource for FileSource {
    fn fetch_rows(&self) -> SourceResult<QueryRows> {
        load_rows(&self.path)
    }
}
