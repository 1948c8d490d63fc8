use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A host-outcome field whose JSON type depends on the module that produced it.
///
/// `msg`, `cmd`, `stdout`, `stdout_lines`, `stderr` and `stderr_lines` arrive as a
/// string, a list of strings or (network modules such as `ios_command`) a list of
/// lists of strings. Variants are tried top to bottom, so the stored tag is always
/// the narrowest shape that matched and the value re-serializes to the same JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Lines(Vec<String>),
    Nested(Vec<Vec<String>>),
    /// Anything else (numbers, objects, mixed arrays). Kept as received.
    Other(Value),
}

impl FieldValue {
    /// Plain-text form used by the renderer.
    ///
    /// Flat lists are newline-joined. Nested lists keep their grouping: each inner
    /// list becomes one JSON array line, so `[["a","b"]]` never reads as `a\nb`.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Lines(lines) => lines.join("\n"),
            FieldValue::Nested(groups) => groups
                .iter()
                .map(|g| serde_json::to_string(g).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("\n"),
            FieldValue::Other(v) => v.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(lines: Vec<String>) -> Self {
        FieldValue::Lines(lines)
    }
}

impl From<Vec<Vec<String>>> for FieldValue {
    fn from(groups: Vec<Vec<String>>) -> Self {
        FieldValue::Nested(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(v: Value) -> FieldValue {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn picks_narrowest_shape() {
        assert_eq!(decode(json!("hi")), FieldValue::Text("hi".into()));
        assert_eq!(
            decode(json!(["a", "b"])),
            FieldValue::Lines(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            decode(json!([["a", "b"], ["c"]])),
            FieldValue::Nested(vec![vec!["a".into(), "b".into()], vec!["c".into()]])
        );
    }

    #[test]
    fn empty_list_is_flat() {
        assert_eq!(decode(json!([])), FieldValue::Lines(vec![]));
    }

    #[test]
    fn unexpected_shapes_fall_back_to_other() {
        assert_eq!(decode(json!(255)), FieldValue::Other(json!(255)));
        assert_eq!(
            decode(json!(["a", ["b"]])),
            FieldValue::Other(json!(["a", ["b"]]))
        );
        assert_eq!(
            decode(json!({"k": "v"})),
            FieldValue::Other(json!({"k": "v"}))
        );
    }

    #[test]
    fn serializes_back_to_the_same_json() {
        for raw in [
            json!("x"),
            json!(["x", "y"]),
            json!([["x"], ["y", "z"]]),
            json!(3.5),
        ] {
            let v = decode(raw.clone());
            assert_eq!(serde_json::to_value(&v).unwrap(), raw);
        }
    }

    #[test]
    fn text_rendering_keeps_nested_groups_apart() {
        assert_eq!(FieldValue::from("hello\n").to_text(), "hello\n");
        assert_eq!(FieldValue::from(vec!["a".to_string()]).to_text(), "a");
        assert_eq!(
            FieldValue::from(vec![vec!["a".to_string(), "b".to_string()]]).to_text(),
            r#"["a","b"]"#
        );
        assert_eq!(FieldValue::Other(json!(true)).to_text(), "true");
    }
}
