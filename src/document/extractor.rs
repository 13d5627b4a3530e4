//! Extraction of indexable strings from field values.

use crate::document::field_value::FieldValue;

/// Append every string reachable through `value` to `out`, in order.
///
/// Text contributes itself, arrays contribute their elements in order, and
/// objects contribute their values in insertion order. Scalar non-text
/// values contribute nothing, and empty strings are skipped. The walk is
/// total and deterministic.
pub fn collect_strings<'a>(value: &'a FieldValue, out: &mut Vec<&'a str>) {
    match value {
        FieldValue::Text(s) => {
            if !s.is_empty() {
                out.push(s);
            }
        }
        FieldValue::Array(items) => {
            for item in items {
                collect_strings(item, out);
            }
        }
        FieldValue::Object(entries) => {
            for (_, nested) in entries {
                collect_strings(nested, out);
            }
        }
        FieldValue::Integer(_) | FieldValue::Float(_) | FieldValue::Boolean(_) | FieldValue::Null => {}
    }
}

/// Convenience wrapper returning the extracted strings as a vector.
pub fn extract_strings(value: &FieldValue) -> Vec<&str> {
    let mut out = Vec::new();
    collect_strings(value, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_extracts_itself() {
        let value = FieldValue::Text("hello".to_string());
        assert_eq!(extract_strings(&value), vec!["hello"]);
    }

    #[test]
    fn test_scalars_extract_nothing() {
        assert!(extract_strings(&FieldValue::Integer(17)).is_empty());
        assert!(extract_strings(&FieldValue::Float(1.5)).is_empty());
        assert!(extract_strings(&FieldValue::Boolean(true)).is_empty());
        assert!(extract_strings(&FieldValue::Null).is_empty());
    }

    #[test]
    fn test_empty_strings_skipped() {
        let value = FieldValue::Array(vec![
            FieldValue::Text(String::new()),
            FieldValue::Text("kept".to_string()),
        ]);

        assert_eq!(extract_strings(&value), vec!["kept"]);
    }

    #[test]
    fn test_nested_values_in_order() {
        let value = FieldValue::Array(vec![
            FieldValue::Text("first".to_string()),
            FieldValue::Object(vec![
                ("b".to_string(), FieldValue::Text("second".to_string())),
                ("a".to_string(), FieldValue::Integer(3)),
                (
                    "c".to_string(),
                    FieldValue::Array(vec![FieldValue::Text("third".to_string())]),
                ),
            ]),
            FieldValue::Text("fourth".to_string()),
        ]);

        assert_eq!(
            extract_strings(&value),
            vec!["first", "second", "third", "fourth"]
        );
    }
}
