//! Decoding of the open-data JSON envelope `{"records": [...]}`.

use indexmap::IndexSet;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::table::RawTable;
use crate::error::{AgriError, Result};

#[derive(Debug, Deserialize)]
struct RecordsEnvelope {
    #[serde(default)]
    records: Vec<Map<String, Value>>,
}

/// Decode a JSON payload into a [`RawTable`].
///
/// Headers are the union of record keys in first-seen order. A missing or
/// empty `records` list is an error, since the endpoint answers that way
/// for unknown resources and exhausted offsets.
pub fn parse_records(bytes: &[u8]) -> Result<RawTable> {
    let envelope: RecordsEnvelope = serde_json::from_slice(bytes)?;
    if envelope.records.is_empty() {
        return Err(AgriError::EmptyData(
            "response contained no records".to_string(),
        ));
    }

    let mut headers: IndexSet<String> = IndexSet::new();
    for record in &envelope.records {
        for key in record.keys() {
            if !headers.contains(key) {
                headers.insert(key.clone());
            }
        }
    }

    let rows = envelope
        .records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|h| record.get(h).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(RawTable::new(headers.into_iter().collect(), rows))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_union_of_keys() {
        let body = br#"{"records": [
            {"state": "Kerala", "year": "2019", "rainfall": 3000.5},
            {"state": "Punjab", "year": 2020, "district": "Ludhiana", "rainfall": null}
        ]}"#;
        let table = parse_records(body).unwrap();

        assert_eq!(table.headers, vec!["state", "year", "rainfall", "district"]);
        assert_eq!(table.rows[0], vec!["Kerala", "2019", "3000.5", ""]);
        assert_eq!(table.rows[1], vec!["Punjab", "2020", "", "Ludhiana"]);
    }

    #[test]
    fn test_parse_records_empty_is_error() {
        assert!(matches!(
            parse_records(br#"{"records": []}"#),
            Err(AgriError::EmptyData(_))
        ));
        assert!(matches!(
            parse_records(br#"{"status": "error"}"#),
            Err(AgriError::EmptyData(_))
        ));
    }

    #[test]
    fn test_parse_records_invalid_json() {
        assert!(matches!(parse_records(b"not json"), Err(AgriError::Json(_))));
    }
}
