use serde::Serialize;

/// A value supplied for a cell write: either a plain scalar or a nested
/// sequence of values.
///
/// Scalars are already in their plain string form. Sequences serialize as
/// JSON arrays, scalars as JSON strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Scalar(String),
    Sequence(Vec<CellValue>),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Scalar(String::new())
    }
}

impl CellValue {
    /// Check if the value is a sequence
    pub fn is_sequence(&self) -> bool {
        matches!(self, CellValue::Sequence(_))
    }

    /// The scalar text, if this is a scalar
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            CellValue::Scalar(s) => Some(s),
            CellValue::Sequence(_) => None,
        }
    }

    /// Compact JSON encoding. Non-ASCII characters and slashes are kept as-is.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Scalar(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Scalar(s.to_string())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Scalar(if b { "TRUE" } else { "FALSE" }.to_string())
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellValue {
                fn from(n: $t) -> Self {
                    CellValue::Scalar(n.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u32, u64, usize, f64);

impl<T: Into<CellValue>> From<Vec<T>> for CellValue {
    fn from(items: Vec<T>) -> Self {
        CellValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Convert arbitrary JSON into a cell value.
///
/// Arrays become sequences, `null` becomes an empty scalar and objects are
/// kept as their compact JSON text.
impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => CellValue::default(),
            Value::Bool(b) => b.into(),
            Value::Number(n) => CellValue::Scalar(n.to_string()),
            Value::String(s) => CellValue::Scalar(s),
            Value::Array(items) => items.into(),
            object @ Value::Object(_) => CellValue::Scalar(object.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(CellValue::from(1), CellValue::Scalar("1".into()));
        assert_eq!(CellValue::from(1.5), CellValue::Scalar("1.5".into()));
        assert_eq!(CellValue::from(2.0), CellValue::Scalar("2".into()));
        assert_eq!(CellValue::from(true), CellValue::Scalar("TRUE".into()));
        assert_eq!(CellValue::from(None::<i32>), CellValue::default());
    }

    #[test]
    fn test_from_json() {
        let value = CellValue::from(json!([1, "a/b", null, [true], {"k": "é"}]));
        assert_eq!(
            value,
            CellValue::Sequence(vec![
                "1".into(),
                "a/b".into(),
                "".into(),
                CellValue::Sequence(vec!["TRUE".into()]),
                r#"{"k":"é"}"#.into(),
            ])
        );
    }

    #[test]
    fn test_to_json_is_compact_and_unescaped() {
        let value = CellValue::from(vec!["a/b", "ü", "x\"y"]);
        assert_eq!(value.to_json(), r#"["a/b","ü","x\"y"]"#);
    }
}
