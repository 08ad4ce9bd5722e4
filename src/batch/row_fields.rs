// src/batch/row_fields.rs
//! Ordered row payloads.
//!
//! Rows arrive as JSON objects and are rendered cell-by-cell in document order,
//! so they are decoded into an ordered list of pairs instead of a hash map.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field holding the zero-based data-row index of a changed row.
pub const ROW_ID_FIELD: &str = "id";

/// A single cell value as accepted on the wire: text, integer or float.
///
/// Integers above `i64::MAX` land in `Unsigned` so they keep their exact value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn is_number(&self) -> bool {
        !matches!(self, CellValue::Text(_))
    }

    /// Row index named by a numeric id. Integral floats count; fractional
    /// floats and integers beyond `i64` name no row and give `None`, as does text.
    pub fn as_row_index(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Unsigned(u) => i64::try_from(*u).ok(),
            CellValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Unsigned(u) => write!(f, "{}", u),
            CellValue::Float(v) => f.write_str(&format_float(*v)),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// Shortest round-trip float text; integral values keep a trailing `.0`,
/// very large or very small magnitudes switch to `1e+16` style exponents.
pub fn format_float(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let magnitude = v.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{:e}", v);
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => sci,
        };
    }
    if v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

/// Ordered `(field, value)` pairs of one row.
///
/// A repeated key keeps the position of its first occurrence and the value of its last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFields(Vec<(String, CellValue)>);

impl RowFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: CellValue) {
        let field = field.into();
        match self.0.iter_mut().find(|(k, _)| *k == field) {
            Some(slot) => slot.1 = value,
            None => self.0.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.0.iter().find(|(k, _)| k == field).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Values that become table cells: every field except the row id, in order.
    pub fn cells(&self) -> impl Iterator<Item = &CellValue> {
        self.0
            .iter()
            .filter(|(k, _)| k != ROW_ID_FIELD)
            .map(|(_, v)| v)
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for RowFields {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut fields = RowFields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl Serialize for RowFields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RowFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowFieldsVisitor;

        impl<'de> Visitor<'de> for RowFieldsVisitor {
            type Value = RowFields;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping field names to strings or numbers")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = RowFields::new();
                while let Some((key, value)) = access.next_entry::<String, CellValue>()? {
                    fields.insert(key, value);
                }
                Ok(fields)
            }
        }

        deserializer
            .deserialize_map(RowFieldsVisitor)
            .map_err(|e: D::Error| de::Error::custom(format!("invalid row: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_document_order() {
        let row: RowFields =
            serde_json::from_str(r#"{"zeta": "z", "id": 3, "alpha": 1.5, "mid": 7}"#).unwrap();
        let keys: Vec<&str> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "id", "alpha", "mid"]);
        let cells: Vec<String> = row.cells().map(|c| c.to_string()).collect();
        assert_eq!(cells, vec!["z", "1.5", "7"]);
    }

    #[test]
    fn repeated_key_keeps_first_position_last_value() {
        let row: RowFields = serde_json::from_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        let pairs: Vec<(String, String)> = row
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(
            pairs,
            vec![("a".into(), "3".into()), ("b".into(), "2".into())]
        );
    }

    #[test]
    fn serializes_back_in_order() {
        let row: RowFields = serde_json::from_str(r#"{"y": "b", "x": 2.0}"#).unwrap();
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"y":"b","x":2.0}"#);
    }

    #[test]
    fn rejects_nested_values() {
        assert!(serde_json::from_str::<RowFields>(r#"{"a": [1]}"#).is_err());
        assert!(serde_json::from_str::<RowFields>(r#"{"a": true}"#).is_err());
        assert!(serde_json::from_str::<RowFields>(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn float_rendering() {
        assert_eq!(CellValue::Float(5.0).to_string(), "5.0");
        assert_eq!(CellValue::Float(0.1).to_string(), "0.1");
        assert_eq!(CellValue::Float(-2.0).to_string(), "-2.0");
        assert_eq!(CellValue::Float(1e16).to_string(), "1e+16");
        assert_eq!(CellValue::Float(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(CellValue::Integer(42).to_string(), "42");
    }

    #[test]
    fn row_index_view() {
        assert_eq!(CellValue::Integer(2).as_row_index(), Some(2));
        assert_eq!(CellValue::Float(3.0).as_row_index(), Some(3));
        assert_eq!(CellValue::Float(3.5).as_row_index(), None);
        assert_eq!(CellValue::Text("1".into()).as_row_index(), None);
        assert!(!CellValue::Text("1".into()).is_number());
        assert!(CellValue::Float(0.5).is_number());
        assert_eq!(CellValue::Unsigned(u64::MAX).as_row_index(), None);
    }

    #[test]
    fn integers_beyond_i64_stay_exact() {
        let row: RowFields =
            serde_json::from_str(r#"{"Params": 18446744073709551615, "Small": -3}"#).unwrap();
        assert_eq!(row.get("Params"), Some(&CellValue::Unsigned(u64::MAX)));
        assert_eq!(row.get("Small"), Some(&CellValue::Integer(-3)));
        let cells: Vec<String> = row.cells().map(|c| c.to_string()).collect();
        assert_eq!(cells, vec!["18446744073709551615", "-3"]);
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"Params":18446744073709551615,"Small":-3}"#
        );
    }
}
