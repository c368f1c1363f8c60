//! Record codec
//!
//! Single-record text form is `serde_json` pretty output (two-space
//! indent, keys in field order). The append engine splices this text
//! directly into the array file, so the two must stay in sync.

use crate::store::{StoreError, StoreResult};

use super::types::Record;

/// Encode one record as pretty-printed JSON.
pub fn encode(record: &Record) -> StoreResult<String> {
    serde_json::to_string_pretty(record)
        .map_err(|e| StoreError::Internal(format!("Failed to encode record {}: {}", record.id, e)))
}

/// Decode one record. Fails with `Parse` on malformed JSON or missing fields.
pub fn decode(text: &str) -> StoreResult<Record> {
    Ok(serde_json::from_str(text)?)
}

/// Encode a whole collection as a pretty-printed JSON array.
pub fn encode_all(records: &[Record]) -> StoreResult<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| StoreError::Internal(format!("Failed to encode records: {}", e)))
}

/// Decode a whole collection. The root must be an array.
pub fn decode_all(text: &str) -> StoreResult<Vec<Record>> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NewRecord;
    use serde_json::json;

    fn sample() -> Record {
        NewRecord::new("Ana", 30, "a@x.com")
            .with_address("Rua A, 10")
            .with_extra("observacao", json!("Vírgula, ponto."))
            .into_record_with("id-ana".into(), "2025-01-01T00:00:00.000Z".into())
    }

    #[test]
    fn test_decode_encode_roundtrip() {
        let record = sample();
        assert_eq!(decode(&encode(&record).unwrap()).unwrap(), record);
    }

    #[test]
    fn test_encode_key_order_is_stable() {
        let text = encode(&sample()).unwrap();
        let positions: Vec<usize> = ["\"id\"", "\"nome\"", "\"idade\"", "\"endereco\"", "\"email\"", "\"observacao\"", "\"criadoEm\""]
            .iter()
            .map(|k| text.find(k).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", text);
    }

    #[test]
    fn test_encode_is_pretty_printed() {
        let text = encode(&sample()).unwrap();
        assert!(text.starts_with("{\n  \"id\": \"id-ana\""));
        assert!(text.ends_with("\n}"));
    }

    #[test]
    fn test_address_omitted_when_absent() {
        let record = NewRecord::new("Bia", 22, "b@x.com").into_record();
        assert!(!encode(&record).unwrap().contains("endereco"));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(decode("{\"id\": "), Err(StoreError::Parse(_))));
        assert!(matches!(decode("{\"nome\": \"sem id\"}"), Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_decode_all_rejects_object_root() {
        let text = encode(&sample()).unwrap();
        assert!(matches!(decode_all(&text), Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_encode_all_empty_is_empty_array() {
        assert_eq!(encode_all(&[]).unwrap(), "[]");
    }
}
