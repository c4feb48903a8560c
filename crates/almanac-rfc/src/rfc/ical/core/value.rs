//! Property values (RFC 5545 §3.3) and their parameter sets.

use super::{Instant, LOCAL_TIME_MARKER, Parameter, Parameters, parameter::names};
use crate::error::{RfcError, RfcResult};

/// The value held by one property occurrence.
///
/// `Absent` and `Empty` are distinct: an empty property still renders as a
/// bare `NAME:` line when empty output is allowed, an absent one never does.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Absent,
    Empty,
    Text(String),
    Integer(i64),
    /// Two floats, e.g. GEO latitude and longitude.
    FloatPair(f64, f64),
    Binary(Vec<u8>),
    Instant(Instant),
    /// Multi-occurrence values such as a list of EXDATEs.
    List(Vec<Value>),
}

impl Value {
    /// Returns a short name for the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Empty => "empty",
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::FloatPair(..) => "float pair",
            Self::Binary(_) => "binary",
            Self::Instant(_) => "instant",
            Self::List(_) => "list",
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_instant(&self) -> Option<&Instant> {
        match self {
            Self::Instant(i) => Some(i),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_float_pair(&self) -> Option<(f64, f64)> {
        match self {
            Self::FloatPair(a, b) => Some((*a, *b)),
            _ => None,
        }
    }

    /// Rejects list values where a single scalar is required.
    ///
    /// ## Errors
    /// Returns `TypeMismatch` for `List`.
    pub fn expect_scalar(&self, property: &str) -> RfcResult<&Self> {
        match self {
            Self::List(items) => Err(RfcError::type_mismatch(
                property,
                "a single value",
                format!("list of {}", items.len()),
            )),
            other => Ok(other),
        }
    }

    /// Reads an INTEGER from an integer or integral text value.
    ///
    /// ## Errors
    /// Returns `TypeMismatch` when the value is neither.
    pub fn to_integer(&self, property: &str) -> RfcResult<i64> {
        match self.expect_scalar(property)? {
            Self::Integer(n) => Ok(*n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_e| RfcError::type_mismatch(property, "integer", s.as_str())),
            other => Err(RfcError::type_mismatch(property, "integer", other.type_name())),
        }
    }

    /// Reads a text value.
    ///
    /// ## Errors
    /// Returns `TypeMismatch` for non-text values.
    pub fn to_text(&self, property: &str) -> RfcResult<&str> {
        match self.expect_scalar(property)? {
            Self::Text(s) => Ok(s),
            other => Err(RfcError::type_mismatch(property, "text", other.type_name())),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<Instant> for Value {
    fn from(instant: Instant) -> Self {
        Self::Instant(instant)
    }
}

impl From<(f64, f64)> for Value {
    fn from((first, second): (f64, f64)) -> Self {
        Self::FloatPair(first, second)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

/// Checks that `n` lies within `min..=max`.
///
/// ## Errors
/// Returns `RangeViolation` otherwise, including for values that do not
/// order against the bounds (NaN).
pub fn assert_in_range<T>(property: &str, n: T, min: T, max: T) -> RfcResult<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if !(min..=max).contains(&n) {
        return Err(RfcError::RangeViolation {
            property: property.to_string(),
            raw: n.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(n)
}

/// One property occurrence: a value plus its parameters.
///
/// Accessors clone caller-supplied values before changing them, so a
/// `PropertyValue` is never shared between two property slots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyValue {
    pub value: Value,
    pub params: Parameters,
}

impl PropertyValue {
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            params: Parameters::new(),
        }
    }

    #[must_use]
    pub fn with_params(value: impl Into<Value>, params: impl Into<Parameters>) -> Self {
        Self {
            value: value.into(),
            params: params.into(),
        }
    }

    /// Creates an empty-valued property.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Value::Empty)
    }

    /// Builder-style parameter addition.
    #[must_use]
    pub fn param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.add(name, value, true);
        self
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    /// Marks the value as present-but-empty.
    ///
    /// Callers check that empty output is allowed before calling this.
    pub fn set_empty(&mut self) {
        self.value = Value::Empty;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.value, Value::Empty)
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self.value, Value::Absent)
    }

    /// Returns whether the value is missing, empty, or blank text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match &self.value {
            Value::Absent | Value::Empty => true,
            Value::Text(s) => s.trim().is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn add_param(&mut self, name: &str, value: impl Into<String>, replace: bool) {
        self.params.add(name, value, replace);
    }

    pub fn remove_param(&mut self, name: &str, values: &[&str]) {
        self.params.remove(name, values);
    }

    #[must_use]
    pub fn has_param_key(&self, name: &str) -> bool {
        self.params.has_key(name)
    }

    /// Returns whether parameter `key` carries `value`.
    #[must_use]
    pub fn has_param_value(&self, key: &str, value: &str) -> bool {
        self.params.has_value(key, value)
    }

    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get_value(name)
    }

    /// Returns whether VALUE=DATE is set.
    #[must_use]
    pub fn is_date_kind(&self) -> bool {
        self.params.is_value_kind(names::DATE)
    }

    /// Returns whether the floating-time marker is set.
    #[must_use]
    pub fn is_local_time(&self) -> bool {
        self.params.has_key(LOCAL_TIME_MARKER)
    }

    #[must_use]
    pub fn instant(&self) -> Option<&Instant> {
        self.value.as_instant()
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Instant> for PropertyValue {
    fn from(instant: Instant) -> Self {
        Self::new(instant)
    }
}

impl From<&PropertyValue> for PropertyValue {
    fn from(pv: &PropertyValue) -> Self {
        pv.clone()
    }
}

impl From<(Value, Vec<Parameter>)> for PropertyValue {
    fn from((value, params): (Value, Vec<Parameter>)) -> Self {
        Self::with_params(value, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_absent_are_distinct() {
        let mut pv = PropertyValue::default();
        assert!(pv.is_absent());
        assert!(!pv.is_empty());

        pv.set_empty();
        assert!(pv.is_empty());
        assert!(!pv.is_absent());
    }

    #[test]
    fn clone_is_deep() {
        let original = PropertyValue::new("Meeting").param("LANGUAGE", "en");
        let mut copy = original.clone();
        copy.add_param("LANGUAGE", "sv", true);
        copy.set_value("Möte");

        assert_eq!(original.get_param("LANGUAGE"), Some("en"));
        assert_eq!(original.value.as_text(), Some("Meeting"));
    }

    #[test]
    fn to_integer_accepts_integral_text() {
        assert_eq!(Value::from("42").to_integer("SEQUENCE").unwrap(), 42);
        assert_eq!(Value::Integer(7).to_integer("SEQUENCE").unwrap(), 7);
    }

    #[test]
    fn to_integer_rejects_garbage() {
        let err = Value::from("forty-two").to_integer("SEQUENCE").unwrap_err();
        assert!(matches!(
            err,
            RfcError::TypeMismatch { ref property, ref raw, .. }
                if property == "SEQUENCE" && raw == "forty-two"
        ));
        assert!(Value::FloatPair(1.0, 2.0).to_integer("SEQUENCE").is_err());
    }

    #[test]
    fn lists_are_not_scalars() {
        let list = Value::List(vec![Value::Integer(1), Value::Integer(2)]);
        assert!(list.expect_scalar("PRIORITY").is_err());
        assert!(list.to_integer("PRIORITY").is_err());
    }

    #[test]
    fn range_check() {
        assert_eq!(assert_in_range("PRIORITY", 5, 0, 9).unwrap(), 5);
        let err = assert_in_range("PRIORITY", 10, 0, 9).unwrap_err();
        assert!(matches!(err, RfcError::RangeViolation { ref raw, .. } if raw == "10"));
    }

    #[test]
    fn range_check_rejects_unordered_floats() {
        assert!(assert_in_range("GEO", 90.0, -90.0, 90.0).is_ok());
        let err = assert_in_range("GEO", f64::NAN, -90.0, 90.0).unwrap_err();
        assert!(matches!(err, RfcError::RangeViolation { ref raw, .. } if raw == "NaN"));
        assert!(assert_in_range("GEO", f64::INFINITY, -180.0, 180.0).is_err());
    }

    #[test]
    fn param_queries() {
        let mut pv = PropertyValue::new("20220403").param("VALUE", "DATE");
        assert!(pv.is_date_kind());
        assert!(pv.has_param_value("value", "date"));

        pv.remove_param("VALUE", &[]);
        assert!(!pv.has_param_key("VALUE"));
    }
}
