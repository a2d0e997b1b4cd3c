//! Classification of resolved values
//!
//! A bound future that resolves successfully may still represent a failure
//! (a non-ok response) or carry content of its own. The caller decides which
//! by supplying a classifier; without one every resolved value is plain.
//!
//! [`sniff_json`] is the legacy fallback for untyped JSON results that
//! guesses from the value's shape. Prefer an explicit classifier.

use std::sync::Arc;

use serde_json::Value;

use crate::toast::Content;

/// What a resolved value means for the bound toast
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Ordinary result; the success branch applies
    Plain,
    /// Renderable on its own; shown as a default toast
    Content(Content),
    /// Response-like failure carrying a status code
    Failure { status: u16 },
    /// Error-like value
    Error { message: String },
}

/// Caller-supplied classifier
pub type Classifier<T> = Arc<dyn Fn(&T) -> Classification + Send + Sync>;

/// Classify a JSON value by shape (legacy)
///
/// - `{"ok": false, "status": <n>}` is a failure with that status
/// - `{"type": .., "props": ..}` is an element, shown as content
/// - `{"name": "...Error", "message": <s>}` is an error
/// - anything else is plain
pub fn sniff_json(value: &Value) -> Classification {
    let Some(obj) = value.as_object() else {
        return Classification::Plain;
    };

    let ok = obj.get("ok").and_then(Value::as_bool);
    let status = obj.get("status").and_then(Value::as_u64);
    if let (Some(false), Some(status)) = (ok, status) {
        return Classification::Failure {
            status: u16::try_from(status).unwrap_or(u16::MAX),
        };
    }

    if obj.contains_key("type") && obj.contains_key("props") {
        return Classification::Content(Content::Element(value.clone()));
    }

    let name = obj.get("name").and_then(Value::as_str);
    let message = obj.get("message").and_then(Value::as_str);
    if let (Some(name), Some(message)) = (name, message) {
        if name.ends_with("Error") {
            return Classification::Error {
                message: message.to_string(),
            };
        }
    }

    Classification::Plain
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_sniff_failed_response() {
        assert_eq!(
            sniff_json(&json!({"ok": false, "status": 404})),
            Classification::Failure { status: 404 }
        );
    }

    #[test]
    fn test_sniff_ok_response_is_plain() {
        assert_eq!(
            sniff_json(&json!({"ok": true, "status": 200})),
            Classification::Plain
        );
    }

    #[test]
    fn test_sniff_requires_typed_fields() {
        // "ok" must be a bool and "status" a number
        assert_eq!(
            sniff_json(&json!({"ok": "false", "status": 500})),
            Classification::Plain
        );
        assert_eq!(
            sniff_json(&json!({"ok": false, "status": "500"})),
            Classification::Plain
        );
    }

    #[test]
    fn test_sniff_element() {
        let el = json!({"type": "b", "props": {"children": "Done"}});
        assert_eq!(sniff_json(&el), Classification::Content(Content::Element(el)));
    }

    #[test]
    fn test_sniff_error() {
        assert_eq!(
            sniff_json(&json!({"name": "TypeError", "message": "x is undefined"})),
            Classification::Error {
                message: "x is undefined".to_string()
            }
        );
        assert_eq!(
            sniff_json(&json!({"name": "Alice", "message": "hi"})),
            Classification::Plain
        );
    }

    #[test]
    fn test_sniff_scalars_are_plain() {
        assert_eq!(sniff_json(&json!(42)), Classification::Plain);
        assert_eq!(sniff_json(&json!("done")), Classification::Plain);
    }
}
