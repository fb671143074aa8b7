//! Scalar coercion.
//!
//! Converts option text into the value of a destination field. Empty text
//! always yields the kind's zero value, except for booleans where it means
//! `true` (the option was given with no value).

use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::error::{ConversionError, NumericReason};
use crate::field::Slot;

/// Parse `text` according to the slot's kind and store the result.
///
/// Unsupported slots never reach this point: the schema builder rejects
/// them before binding starts, so they are left untouched.
pub fn assign(slot: &mut Slot<'_>, text: &str) -> Result<(), ConversionError> {
    match slot {
        Slot::Bool(field) => **field = parse_bool(text)?,
        Slot::I8(field) => **field = parse_signed(text)?,
        Slot::I16(field) => **field = parse_signed(text)?,
        Slot::I32(field) => **field = parse_signed(text)?,
        Slot::I64(field) => **field = parse_signed(text)?,
        Slot::Isize(field) => **field = parse_signed(text)?,
        Slot::U8(field) => **field = parse_unsigned(text)?,
        Slot::U16(field) => **field = parse_unsigned(text)?,
        Slot::U32(field) => **field = parse_unsigned(text)?,
        Slot::U64(field) => **field = parse_unsigned(text)?,
        Slot::Usize(field) => **field = parse_unsigned(text)?,
        Slot::F32(field) => **field = parse_float(text)?,
        Slot::F64(field) => **field = parse_float(text)?,
        Slot::String(field) => **field = text.to_string(),
        Slot::Unsupported { .. } => {}
    }
    Ok(())
}

/// Parse a boolean literal.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`.
pub fn parse_bool(text: &str) -> Result<bool, ConversionError> {
    match text {
        "" | "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ConversionError::Bool {
            value: text.to_string(),
        }),
    }
}

/// Parse a base-10 signed integer that fits in `T`.
pub fn parse_signed<T>(text: &str) -> Result<T, ConversionError>
where
    T: FromStr<Err = ParseIntError> + Default,
{
    if text.is_empty() {
        return Ok(T::default());
    }

    text.parse().map_err(|e: ParseIntError| ConversionError::Int {
        value: text.to_string(),
        reason: int_reason(&e),
    })
}

/// Parse a base-10 unsigned integer that fits in `T`. No sign is allowed.
pub fn parse_unsigned<T>(text: &str) -> Result<T, ConversionError>
where
    T: FromStr<Err = ParseIntError> + Default,
{
    if text.is_empty() {
        return Ok(T::default());
    }

    // std accepts a leading '+' for unsigned types
    if text.starts_with('+') {
        return Err(ConversionError::Uint {
            value: text.to_string(),
            reason: NumericReason::Malformed,
        });
    }

    text.parse().map_err(|e: ParseIntError| ConversionError::Uint {
        value: text.to_string(),
        reason: int_reason(&e),
    })
}

/// Floating point widths supported by [`parse_float`].
pub trait Float: FromStr + Default + Copy {
    fn is_infinite(self) -> bool;
}

impl Float for f32 {
    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }
}

impl Float for f64 {
    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }
}

/// Parse a decimal or scientific-notation float that fits in `T`.
///
/// Infinity and NaN literals are accepted; a finite literal that rounds to
/// infinity is out of range.
pub fn parse_float<T: Float>(text: &str) -> Result<T, ConversionError> {
    if text.is_empty() {
        return Ok(T::default());
    }

    let value: T = text.parse().map_err(|_| ConversionError::Float {
        value: text.to_string(),
        reason: NumericReason::Malformed,
    })?;

    if value.is_infinite() && !is_infinity_literal(text) {
        return Err(ConversionError::Float {
            value: text.to_string(),
            reason: NumericReason::OutOfRange,
        });
    }

    Ok(value)
}

fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn int_reason(err: &ParseIntError) -> NumericReason {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => NumericReason::OutOfRange,
        _ => NumericReason::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_literals() {
        for text in ["", "1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(text), Ok(true), "{:?}", text);
        }
        for text in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(text), Ok(false), "{:?}", text);
        }
    }

    #[test]
    fn bool_rejects_other_words() {
        assert_eq!(
            parse_bool("yes"),
            Err(ConversionError::Bool { value: "yes".into() })
        );
        assert!(parse_bool("tRUE").is_err());
    }

    #[test]
    fn signed_respects_width() {
        assert_eq!(parse_signed::<i8>("-128"), Ok(-128));
        assert_eq!(parse_signed::<i8>("+127"), Ok(127));
        assert_eq!(
            parse_signed::<i8>("128"),
            Err(ConversionError::Int {
                value: "128".into(),
                reason: NumericReason::OutOfRange,
            })
        );
        assert_eq!(parse_signed::<i64>(""), Ok(0));
    }

    #[test]
    fn signed_rejects_malformed() {
        for text in ["1.5", "abc", "0x10", " 1", "1_000", "-"] {
            assert_eq!(
                parse_signed::<i32>(text),
                Err(ConversionError::Int {
                    value: text.into(),
                    reason: NumericReason::Malformed,
                }),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn unsigned_rejects_signs() {
        assert_eq!(parse_unsigned::<u16>("65535"), Ok(65535));
        assert!(matches!(
            parse_unsigned::<u16>("65536"),
            Err(ConversionError::Uint { reason: NumericReason::OutOfRange, .. })
        ));
        for text in ["-1", "+1", "-0"] {
            assert!(matches!(
                parse_unsigned::<u32>(text),
                Err(ConversionError::Uint { reason: NumericReason::Malformed, .. })
            ));
        }
        assert_eq!(parse_unsigned::<usize>(""), Ok(0));
    }

    #[test]
    fn floats() {
        assert_eq!(parse_float::<f64>("1.5"), Ok(1.5));
        assert_eq!(parse_float::<f64>("-2.5e3"), Ok(-2500.0));
        assert_eq!(parse_float::<f64>(".5"), Ok(0.5));
        assert_eq!(parse_float::<f32>(""), Ok(0.0));
        assert_eq!(parse_float::<f64>("Inf"), Ok(f64::INFINITY));
        assert!(parse_float::<f64>("NaN").map(f64::is_nan).unwrap_or(false));
    }

    #[test]
    fn float_width_overflow() {
        assert!(parse_float::<f64>("1e39").is_ok());
        assert_eq!(
            parse_float::<f32>("1e39"),
            Err(ConversionError::Float {
                value: "1e39".into(),
                reason: NumericReason::OutOfRange,
            })
        );
    }

    #[test]
    fn float_uses_dot_only() {
        assert!(matches!(
            parse_float::<f64>("1,5"),
            Err(ConversionError::Float { reason: NumericReason::Malformed, .. })
        ));
    }

    #[test]
    fn assign_writes_through_slot() {
        let mut text = String::from("old");
        let mut slot = Slot::String(&mut text);
        assign(&mut slot, "  new value ").unwrap();
        assert_eq!(text, "  new value ");

        let mut count = 7u8;
        let mut slot = Slot::U8(&mut count);
        assign(&mut slot, "").unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn assign_leaves_field_on_error() {
        let mut count = 7i32;
        let mut slot = Slot::I32(&mut count);
        assert!(assign(&mut slot, "seven").is_err());
        assert_eq!(count, 7);
    }
}
