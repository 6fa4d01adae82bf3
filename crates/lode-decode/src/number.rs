use std::fmt;

use crate::error::{DecodeError, DecodeResult};

/// Width-tagged numeric value.
///
/// The wire format tags every number with an explicit bit-width
/// (`{"int8": 42}`), and the width survives decoding so a value can be
/// re-encoded without widening. Equality is width-sensitive:
/// `Int8(1) != Int16(1)`. Floats compare bit-exactly, which makes the
/// type usable for value-equality deduplication in sets and maps.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
}

impl Number {
    /// The wire key for this number's width.
    pub fn tag(&self) -> &'static str {
        match self {
            Number::Int8(_) => "int8",
            Number::Int16(_) => "int16",
            Number::Int32(_) => "int32",
            Number::Int64(_) => "int64",
            Number::Uint8(_) => "uint8",
            Number::Uint16(_) => "uint16",
            Number::Uint32(_) => "uint32",
            Number::Uint64(_) => "uint64",
            Number::Float32(_) => "float32",
            Number::Float64(_) => "float64",
        }
    }

    /// The value as an `i64`, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Int8(v) => Some(v.into()),
            Number::Int16(v) => Some(v.into()),
            Number::Int32(v) => Some(v.into()),
            Number::Int64(v) => Some(v),
            Number::Uint8(v) => Some(v.into()),
            Number::Uint16(v) => Some(v.into()),
            Number::Uint32(v) => Some(v.into()),
            Number::Uint64(v) => i64::try_from(v).ok(),
            Number::Float32(_) | Number::Float64(_) => None,
        }
    }

    /// The value as a `u64`, if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Number::Uint8(v) => Some(v.into()),
            Number::Uint16(v) => Some(v.into()),
            Number::Uint32(v) => Some(v.into()),
            Number::Uint64(v) => Some(v),
            _ => self.as_i64().and_then(|v| u64::try_from(v).ok()),
        }
    }

    /// The value widened to `f64`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int8(v) => v.into(),
            Number::Int16(v) => v.into(),
            Number::Int32(v) => v.into(),
            Number::Int64(v) => v as f64,
            Number::Uint8(v) => v.into(),
            Number::Uint16(v) => v.into(),
            Number::Uint32(v) => v.into(),
            Number::Uint64(v) => v as f64,
            Number::Float32(v) => v.into(),
            Number::Float64(v) => v,
        }
    }

    /// Decode a width-tagged wire number.
    ///
    /// Returns `None` if `tag` is not one of the numeric-width keys, so
    /// the tree decoder can fall through to the other single-key shapes.
    /// A value that does not fit the tagged width is a
    /// [`DecodeError::NumberOutOfRange`].
    pub(crate) fn from_wire(
        tag: &str,
        node: &serde_json::Value,
    ) -> Option<DecodeResult<Number>> {
        let result = match tag {
            "int8" => signed("int8", node).map(Number::Int8),
            "int16" => signed("int16", node).map(Number::Int16),
            "int32" => signed("int32", node).map(Number::Int32),
            "int64" => signed("int64", node).map(Number::Int64),
            "uint8" => unsigned("uint8", node).map(Number::Uint8),
            "uint16" => unsigned("uint16", node).map(Number::Uint16),
            "uint32" => unsigned("uint32", node).map(Number::Uint32),
            "uint64" => unsigned("uint64", node).map(Number::Uint64),
            "float32" => float("float32", node).and_then(|v| {
                let narrowed = v as f32;
                if v.is_finite() && !narrowed.is_finite() {
                    return Err(DecodeError::NumberOutOfRange {
                        tag: "float32",
                        value: v.to_string(),
                    });
                }
                Ok(Number::Float32(narrowed))
            }),
            "float64" => float("float64", node).map(Number::Float64),
            _ => return None,
        };
        Some(result)
    }
}

fn wire_number<'a>(
    tag: &'static str,
    node: &'a serde_json::Value,
) -> DecodeResult<&'a serde_json::Number> {
    match node {
        serde_json::Value::Number(n) => Ok(n),
        other => Err(DecodeError::UnknownShape(format!(
            "`{tag}` payload must be a number, got {other}"
        ))),
    }
}

fn signed<T: TryFrom<i64>>(tag: &'static str, node: &serde_json::Value) -> DecodeResult<T> {
    let n = wire_number(tag, node)?;
    n.as_i64()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| DecodeError::NumberOutOfRange {
            tag,
            value: n.to_string(),
        })
}

fn unsigned<T: TryFrom<u64>>(tag: &'static str, node: &serde_json::Value) -> DecodeResult<T> {
    let n = wire_number(tag, node)?;
    n.as_u64()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| DecodeError::NumberOutOfRange {
            tag,
            value: n.to_string(),
        })
}

fn float(tag: &'static str, node: &serde_json::Value) -> DecodeResult<f64> {
    let n = wire_number(tag, node)?;
    n.as_f64().ok_or_else(|| DecodeError::NumberOutOfRange {
        tag,
        value: n.to_string(),
    })
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        use Number::*;
        match (self, other) {
            (Int8(a), Int8(b)) => a == b,
            (Int16(a), Int16(b)) => a == b,
            (Int32(a), Int32(b)) => a == b,
            (Int64(a), Int64(b)) => a == b,
            (Uint8(a), Uint8(b)) => a == b,
            (Uint16(a), Uint16(b)) => a == b,
            (Uint32(a), Uint32(b)) => a == b,
            (Uint64(a), Uint64(b)) => a == b,
            (Float32(a), Float32(b)) => a.to_bits() == b.to_bits(),
            (Float64(a), Float64(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Number {}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int8(v) => write!(f, "{v}"),
            Number::Int16(v) => write!(f, "{v}"),
            Number::Int32(v) => write!(f, "{v}"),
            Number::Int64(v) => write!(f, "{v}"),
            Number::Uint8(v) => write!(f, "{v}"),
            Number::Uint16(v) => write!(f, "{v}"),
            Number::Uint32(v) => write!(f, "{v}"),
            Number::Uint64(v) => write!(f, "{v}"),
            Number::Float32(v) => write!(f, "{v}"),
            Number::Float64(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(tag: &str, node: serde_json::Value) -> DecodeResult<Number> {
        Number::from_wire(tag, &node).expect("numeric tag")
    }

    #[test]
    fn every_width_decodes() {
        assert_eq!(wire("int8", json!(1)).unwrap(), Number::Int8(1));
        assert_eq!(wire("int16", json!(2)).unwrap(), Number::Int16(2));
        assert_eq!(wire("int32", json!(3)).unwrap(), Number::Int32(3));
        assert_eq!(wire("int64", json!(4)).unwrap(), Number::Int64(4));
        assert_eq!(wire("uint8", json!(5)).unwrap(), Number::Uint8(5));
        assert_eq!(wire("uint16", json!(6)).unwrap(), Number::Uint16(6));
        assert_eq!(wire("uint32", json!(7)).unwrap(), Number::Uint32(7));
        assert_eq!(wire("uint64", json!(8)).unwrap(), Number::Uint64(8));
        assert_eq!(wire("float32", json!(9)).unwrap(), Number::Float32(9.0));
        assert_eq!(wire("float64", json!(10)).unwrap(), Number::Float64(10.0));
    }

    #[test]
    fn wire_tag_may_be_borrowed_at_runtime() {
        // Tags arrive as borrowed object keys, not literals.
        let tag = String::from("int8");
        let result = Number::from_wire(tag.as_str(), &json!(1)).expect("numeric tag");
        assert_eq!(result.unwrap(), Number::Int8(1));
    }

    #[test]
    fn non_numeric_tag_is_none() {
        assert!(Number::from_wire("list", &json!(1)).is_none());
        assert!(Number::from_wire("int128", &json!(1)).is_none());
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(matches!(
            wire("int8", json!(300)),
            Err(DecodeError::NumberOutOfRange { tag: "int8", .. })
        ));
        assert!(matches!(
            wire("uint8", json!(-1)),
            Err(DecodeError::NumberOutOfRange { tag: "uint8", .. })
        ));
        assert!(matches!(
            wire("uint64", json!(-5)),
            Err(DecodeError::NumberOutOfRange { .. })
        ));
    }

    #[test]
    fn float32_rejects_values_beyond_its_range() {
        assert!(matches!(
            wire("float32", json!(1e300)),
            Err(DecodeError::NumberOutOfRange { tag: "float32", .. })
        ));
        assert!(matches!(
            wire("float32", json!(-1e300)),
            Err(DecodeError::NumberOutOfRange { tag: "float32", .. })
        ));
        // Precision loss alone is fine; only lost finiteness is an error.
        assert_eq!(
            wire("float32", json!(1.1)).unwrap(),
            Number::Float32(1.1f64 as f32)
        );
    }

    #[test]
    fn fractional_value_does_not_fit_integer_width() {
        assert!(matches!(
            wire("int32", json!(1.5)),
            Err(DecodeError::NumberOutOfRange { .. })
        ));
    }

    #[test]
    fn non_number_payload_is_shape_error() {
        assert!(matches!(
            wire("int8", json!("1")),
            Err(DecodeError::UnknownShape(_))
        ));
    }

    #[test]
    fn boundary_values_fit() {
        assert_eq!(wire("int8", json!(-128)).unwrap(), Number::Int8(i8::MIN));
        assert_eq!(wire("int8", json!(127)).unwrap(), Number::Int8(i8::MAX));
        assert_eq!(wire("uint8", json!(255)).unwrap(), Number::Uint8(u8::MAX));
        assert_eq!(
            wire("uint64", json!(u64::MAX)).unwrap(),
            Number::Uint64(u64::MAX)
        );
    }

    #[test]
    fn equality_is_width_sensitive() {
        assert_ne!(Number::Int8(1), Number::Int16(1));
        assert_eq!(Number::Uint32(7), Number::Uint32(7));
    }

    #[test]
    fn float_equality_is_bit_exact() {
        assert_eq!(Number::Float64(1.5), Number::Float64(1.5));
        assert_eq!(Number::Float64(f64::NAN), Number::Float64(f64::NAN));
        assert_ne!(Number::Float64(0.0), Number::Float64(-0.0));
    }

    #[test]
    fn accessors() {
        assert_eq!(Number::Int16(-3).as_i64(), Some(-3));
        assert_eq!(Number::Uint64(u64::MAX).as_i64(), None);
        assert_eq!(Number::Int8(-1).as_u64(), None);
        assert_eq!(Number::Uint8(14).as_u64(), Some(14));
        assert_eq!(Number::Float32(1.5).as_f64(), 1.5);
        assert_eq!(Number::Float64(2.0).as_i64(), None);
    }

    #[test]
    fn tag_round_trips_wire_key() {
        assert_eq!(Number::Int8(0).tag(), "int8");
        assert_eq!(Number::Float64(0.0).tag(), "float64");
    }
}
