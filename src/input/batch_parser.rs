//! Lenient parsing of serialized answer batches

use crate::processing::evaluator::RawQaItem;
use log::warn;
use serde_json::Value;

/// Parse a JSON batch of question/answer records.
///
/// Accepts an array of records, the same array serialized once more as a
/// JSON string, or an object carrying it under `answers`. Anything else is an
/// empty batch.
pub fn parse_batch(text: &str) -> Vec<RawQaItem> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => items_from_value(value, true),
        Err(e) => {
            warn!("Could not parse answer batch, treating it as empty: {}", e);
            Vec::new()
        }
    }
}

fn items_from_value(value: Value, unwrap_string: bool) -> Vec<RawQaItem> {
    match value {
        Value::Array(items) => items.into_iter().map(RawQaItem::from).collect(),
        Value::String(inner) if unwrap_string => match serde_json::from_str::<Value>(&inner) {
            Ok(value) => items_from_value(value, false),
            Err(e) => {
                warn!("Answer batch string does not hold JSON, treating it as empty: {}", e);
                Vec::new()
            }
        },
        Value::Object(mut map) => match map.remove("answers") {
            Some(Value::Array(items)) => items.into_iter().map(RawQaItem::from).collect(),
            _ => {
                warn!("Answer batch object has no `answers` array, treating it as empty");
                Vec::new()
            }
        },
        _ => {
            warn!("Answer batch is not a list of records, treating it as empty");
            Vec::new()
        }
    }
}

/// Parse one record per line; blank lines are skipped and unparsable lines
/// become bare answers so they are still graded
pub fn parse_json_lines(text: &str) -> Vec<RawQaItem> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match serde_json::from_str::<Value>(line) {
            Ok(value) => RawQaItem::from(value),
            Err(e) => {
                warn!("Unparsable answer record, grading it as raw text: {}", e);
                RawQaItem::from(Value::String(line.to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_of_records() {
        let items = parse_batch(r#"[{"question": "What is Rust?", "answer": "A language"}, {"q": "Q2", "a": "A2"}]"#);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].question, json!("What is Rust?"));
        assert_eq!(items[1].answer, json!("A2"));
    }

    #[test]
    fn test_double_encoded_batch() {
        let inner = r#"[{"question": "What is Rust?", "answer": "A language"}]"#;
        let encoded = serde_json::to_string(inner).unwrap();

        let items = parse_batch(&encoded);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].answer, json!("A language"));
    }

    #[test]
    fn test_answers_object() {
        let items = parse_batch(r#"{"answers": [{"q": "Q", "a": "A"}], "candidate": "x"}"#);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_garbage_is_empty_batch() {
        assert!(parse_batch("not json at all").is_empty());
        assert!(parse_batch(r#""still not a batch""#).is_empty());
        assert!(parse_batch("42").is_empty());
        assert!(parse_batch(r#"{"question": "Q"}"#).is_empty());
    }

    #[test]
    fn test_non_object_elements_become_answers() {
        let items = parse_batch(r#"["just text", 7, null]"#);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].question, Value::Null);
        assert_eq!(items[0].answer, json!("just text"));
        assert_eq!(items[1].answer, json!("7"));
        assert_eq!(items[2].answer, Value::Null);
    }

    #[test]
    fn test_json_lines() {
        let text = "{\"q\": \"Q1\", \"a\": \"A1\"}\n\n{broken\n{\"q\": \"Q3\", \"a\": \"A3\"}\n";
        let items = parse_json_lines(text);

        assert_eq!(items.len(), 3);
        assert_eq!(items[1].answer, json!("{broken"));
        assert_eq!(items[2].question, json!("Q3"));
    }
}
