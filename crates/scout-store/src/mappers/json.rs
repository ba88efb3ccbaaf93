//! Helpers for loosely typed JSON columns

use chrono::NaiveDate;
use scout_core::error::DomainError;
use scout_core::value_objects::{RowId, UnitId};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Row id from a number or numeric string
pub fn row_id_from_json(value: &Value) -> Option<RowId> {
    UnitId::from_json(value).map(|id| RowId::new(id.into_inner()))
}

/// Trimmed text, blank reads as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Date from `YYYY-MM-DD`, also accepting a full timestamp
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Elements of a JSON array column
///
/// The column may hold the array itself or its JSON text. Anything else
/// reads as empty; elements that do not fit `T` are skipped.
pub fn json_elements<T: DeserializeOwned>(value: Option<&Value>, column: &str) -> Vec<T> {
    let parsed;
    let array = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(Value::String(text)) if text.trim().is_empty() => return Vec::new(),
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => {
                parsed = items;
                &parsed
            }
            _ => {
                warn!(column, "Ignoring non-array JSON text");
                return Vec::new();
            }
        },
        Some(other) => {
            warn!(column, kind = %json_kind(other), "Ignoring non-array column value");
            return Vec::new();
        }
    };

    array
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(element) => Some(element),
            Err(e) => {
                warn!(column, error = %e, "Skipping malformed element");
                None
            }
        })
        .collect()
}

/// Map rows, dropping (and logging) the ones that cannot be mapped
pub fn collect_rows<R, E>(rows: Vec<R>, table: &str) -> Vec<E>
where
    E: TryFrom<R, Error = DomainError>,
{
    rows.into_iter()
        .filter_map(|row| match E::try_from(row) {
            Ok(entity) => Some(entity),
            Err(e) => {
                warn!(table, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
