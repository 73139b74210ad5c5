//! Shared value validation for timeline fields.
//!
//! Name, duration, id and pathurl validation used to live on a class
//! hierarchy in the legacy pipeline tools; here each rule is a standalone
//! function composed by field. Entities call these from their constructors
//! and setters, so a bad value is rejected at the point of assignment and
//! never stored.

use super::types::{XmemlError, XmemlResult};

/// A loosely typed scalar accepted by validated setters.
///
/// Timeline data arrives from scripting hosts and parsed documents where
/// field types are not known statically. `FieldValue` carries that input to
/// the validation functions, which either coerce it or reject it with
/// [`XmemlError::TypeMismatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// No value supplied.
    Absent,
    /// A string value.
    Text(String),
    /// A numeric value.
    Number(f64),
    /// A boolean value.
    Flag(bool),
}

impl FieldValue {
    /// Human-readable type name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Absent => "nothing",
            FieldValue::Text(_) => "a string",
            FieldValue::Number(_) => "a number",
            FieldValue::Flag(_) => "a boolean",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => FieldValue::Absent,
        }
    }
}

/// Validate a `name` field: must be a string, no coercion.
pub fn validate_name(entity: &'static str, value: impl Into<FieldValue>) -> XmemlResult<String> {
    match value.into() {
        FieldValue::Text(name) => Ok(name),
        other => Err(XmemlError::TypeMismatch {
            entity,
            field: "name",
            expected: "a string",
            actual: other.kind(),
        }),
    }
}

/// Validate a `duration` field: absent coerces to `0.0`, negative values
/// are rejected, non-numbers are rejected.
pub fn validate_duration(entity: &'static str, value: impl Into<FieldValue>) -> XmemlResult<f64> {
    match value.into() {
        FieldValue::Absent => Ok(0.0),
        FieldValue::Number(duration) => {
            if duration < 0.0 {
                Err(XmemlError::ValueOutOfRange {
                    entity,
                    field: "duration",
                    value: duration,
                })
            } else {
                Ok(duration)
            }
        }
        other => Err(XmemlError::TypeMismatch {
            entity,
            field: "duration",
            expected: "a non-negative float",
            actual: other.kind(),
        }),
    }
}

/// Validate an `id` field: absent coerces to the empty string.
pub fn validate_id(entity: &'static str, value: impl Into<FieldValue>) -> XmemlResult<String> {
    match value.into() {
        FieldValue::Absent => Ok(String::new()),
        FieldValue::Text(id) => Ok(id),
        other => Err(XmemlError::TypeMismatch {
            entity,
            field: "id",
            expected: "a string",
            actual: other.kind(),
        }),
    }
}

/// Validate a `pathurl` field: must be a string.
///
/// Unlike `id`, an absent pathurl is rejected rather than coerced. The
/// asymmetry comes from the legacy pipeline and is kept on purpose.
pub fn validate_pathurl(entity: &'static str, value: impl Into<FieldValue>) -> XmemlResult<String> {
    match value.into() {
        FieldValue::Text(pathurl) => Ok(pathurl),
        other => Err(XmemlError::TypeMismatch {
            entity,
            field: "pathurl",
            expected: "a string",
            actual: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_accepts_non_negative_numbers() {
        assert_eq!(validate_duration("Clip", 48.0).unwrap(), 48.0);
        assert_eq!(validate_duration("Clip", 0.0).unwrap(), 0.0);
        assert_eq!(validate_duration("Clip", 10).unwrap(), 10.0);
    }

    #[test]
    fn duration_absent_coerces_to_zero() {
        assert_eq!(validate_duration("Clip", FieldValue::Absent).unwrap(), 0.0);
        assert_eq!(validate_duration("Clip", Option::<f64>::None).unwrap(), 0.0);
    }

    #[test]
    fn duration_rejects_negative() {
        let err = validate_duration("Clip", -1.0).unwrap_err();
        assert!(matches!(err, XmemlError::ValueOutOfRange { .. }));
        assert!(err.to_string().contains("Clip.duration"));
    }

    #[test]
    fn duration_rejects_non_numeric() {
        let err = validate_duration("File", "fast").unwrap_err();
        assert!(matches!(err, XmemlError::TypeMismatch { .. }));
        assert!(err.to_string().contains("File.duration"));
    }

    #[test]
    fn name_requires_string() {
        assert_eq!(validate_name("File", "plateA").unwrap(), "plateA");
        let err = validate_name("File", 7).unwrap_err();
        assert!(matches!(err, XmemlError::TypeMismatch { .. }));
        // No None coercion for names.
        let err = validate_name("File", FieldValue::Absent).unwrap_err();
        assert!(matches!(err, XmemlError::TypeMismatch { .. }));
    }

    #[test]
    fn id_coerces_absent_to_empty() {
        assert_eq!(validate_id("Clip", FieldValue::Absent).unwrap(), "");
        assert_eq!(validate_id("Clip", "10").unwrap(), "10");
        assert!(validate_id("Clip", 10).is_err());
    }

    #[test]
    fn pathurl_rejects_non_string() {
        assert_eq!(
            validate_pathurl("File", "file:///plates/plateA.mov").unwrap(),
            "file:///plates/plateA.mov"
        );
        let err = validate_pathurl("File", 42).unwrap_err();
        assert!(matches!(err, XmemlError::TypeMismatch { .. }));
        // Absent is rejected here, unlike id.
        assert!(validate_pathurl("File", FieldValue::Absent).is_err());
    }
}
