use serde::{Deserialize, Serialize};

/// Field name and value of the sentinel pair sent by an empty create.
pub const NULL_FIELD: &str = "NULL";

/// One `(name, value)` pair of a wire payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldValue {
    pub field: String,
    pub value: String,
}

impl FieldValue {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// The `("NULL", "NULL")` pair that marks a payload with no attributes.
    pub fn null_sentinel() -> Self {
        Self::new(NULL_FIELD, NULL_FIELD)
    }

    pub fn is_null_sentinel(&self) -> bool {
        self.field == NULL_FIELD && self.value == NULL_FIELD
    }
}

impl<F: Into<String>, V: Into<String>> From<(F, V)> for FieldValue {
    fn from((field, value): (F, V)) -> Self {
        Self::new(field, value)
    }
}

/// Look up the value of `field` in a payload.
pub fn find_field<'a>(fields: &'a [FieldValue], field: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|fv| fv.field == field)
        .map(|fv| fv.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel() {
        assert!(FieldValue::null_sentinel().is_null_sentinel());
        assert!(!FieldValue::new("NULL", "").is_null_sentinel());
    }

    #[test]
    fn find_returns_first_match() {
        let fields: Vec<FieldValue> = vec![("A", "1").into(), ("B", "2").into(), ("A", "3").into()];
        assert_eq!(find_field(&fields, "A"), Some("1"));
        assert_eq!(find_field(&fields, "B"), Some("2"));
        assert_eq!(find_field(&fields, "C"), None);
    }
}
