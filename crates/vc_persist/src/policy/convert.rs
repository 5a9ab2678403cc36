use alloc::string::{String, ToString};

use rust_decimal::prelude::{FromPrimitive as _, ToPrimitive as _};
use vc_tree::{Bytes, Decimal, Primitive, PrimitiveKind};

// -----------------------------------------------------------------------------
// ConvertError

/// A primitive that cannot be read as the target type.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("cannot read a `{from}` primitive as `{to}`")]
    Incompatible {
        from: PrimitiveKind,
        to: &'static str,
    },
    #[error("`{from}` value does not fit in `{to}`")]
    OutOfRange {
        from: PrimitiveKind,
        to: &'static str,
    },
    #[error("cannot parse `{to}`: {reason}")]
    Parse { to: &'static str, reason: String },
    #[error("`{type_path}` has no variant with value {value}")]
    UnknownDiscriminant { type_path: &'static str, value: i128 },
    #[error("`{type_path}` value does not fit in a `{to}` primitive")]
    Unrepresentable {
        type_path: &'static str,
        to: PrimitiveKind,
    },
}

impl ConvertError {
    #[inline]
    fn incompatible(value: &Primitive, to: &'static str) -> Self {
        Self::Incompatible {
            from: value.kind(),
            to,
        }
    }

    #[inline]
    fn out_of_range(value: &Primitive, to: &'static str) -> Self {
        Self::OutOfRange {
            from: value.kind(),
            to,
        }
    }

    fn parse(to: &'static str, reason: impl ToString) -> Self {
        Self::Parse {
            to,
            reason: reason.to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// FromPrimitive

/// Reads a value of this type from any primitive kind it converts from.
///
/// Numbers convert across kinds with range checking, strings are parsed.
/// A `bool` reads as the integer `0` or `1`, and any integer reads as
/// `bool` through `!= 0`. Floats read as [`Decimal`] rounded to its 28
/// digit scale.
///
/// `U8` reads as `i8` by reinterpreting the bits, for data written by
/// older encoders which had a single unsigned byte kind.
///
/// # Examples
///
/// ```
/// use vc_persist::policy::FromPrimitive;
/// use vc_persist::tree::Primitive;
///
/// assert_eq!(bool::from_primitive(&Primitive::U8(2)), Ok(true));
/// assert_eq!(bool::from_primitive(&Primitive::I32(-1)), Ok(true));
/// assert_eq!(i8::from_primitive(&Primitive::U8(0xFF)), Ok(-1));
/// assert_eq!(u16::from_primitive(&Primitive::I64(300)), Ok(300));
/// assert!(u8::from_primitive(&Primitive::I64(300)).is_err());
/// ```
pub trait FromPrimitive: Sized {
    fn from_primitive(value: &Primitive) -> Result<Self, ConvertError>;
}

fn float_to_integer(value: f64, source: &Primitive, to: &'static str) -> Result<i128, ConvertError> {
    // `i128::MAX as f64` rounds up to 2^127, which is out of range.
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    if value.is_finite() && value.fract() == 0.0 && value >= -LIMIT && value < LIMIT {
        Ok(value as i128)
    } else {
        Err(ConvertError::out_of_range(source, to))
    }
}

/// The value of a primitive as an integer, before narrowing.
fn integer_of(value: &Primitive, to: &'static str) -> Result<i128, ConvertError> {
    match value {
        Primitive::Bool(flag) => Ok(i128::from(*flag)),
        Primitive::F32(float) => float_to_integer(f64::from(*float), value, to),
        Primitive::F64(float) => float_to_integer(*float, value, to),
        Primitive::Decimal(decimal) if decimal.fract().is_zero() => decimal
            .to_i128()
            .ok_or_else(|| ConvertError::out_of_range(value, to)),
        Primitive::Decimal(_) => Err(ConvertError::out_of_range(value, to)),
        Primitive::String(text) => text
            .trim()
            .parse::<i128>()
            .map_err(|err| ConvertError::parse(to, err)),
        Primitive::Bytes(_) => Err(ConvertError::incompatible(value, to)),
        _ => value
            .as_integer()
            .ok_or_else(|| ConvertError::incompatible(value, to)),
    }
}

macro_rules! impl_from_primitive_for_integer {
    ($($ty:ident),* $(,)?) => {
        $(
            impl FromPrimitive for $ty {
                fn from_primitive(value: &Primitive) -> Result<Self, ConvertError> {
                    let wide = integer_of(value, stringify!($ty))?;
                    $ty::try_from(wide)
                        .map_err(|_| ConvertError::out_of_range(value, stringify!($ty)))
                }
            }
        )*
    };
}

impl_from_primitive_for_integer!(i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromPrimitive for i8 {
    fn from_primitive(value: &Primitive) -> Result<Self, ConvertError> {
        if let Primitive::U8(byte) = value {
            return Ok(byte.cast_signed());
        }
        let wide = integer_of(value, "i8")?;
        i8::try_from(wide).map_err(|_| ConvertError::out_of_range(value, "i8"))
    }
}

impl FromPrimitive for bool {
    fn from_primitive(value: &Primitive) -> Result<Self, ConvertError> {
        match value {
            Primitive::Bool(flag) => Ok(*flag),
            Primitive::String(text) => text
                .trim()
                .parse::<bool>()
                .map_err(|err| ConvertError::parse("bool", err)),
            Primitive::Bytes(_) | Primitive::F32(_) | Primitive::F64(_) => {
                Err(ConvertError::incompatible(value, "bool"))
            }
            _ => Ok(integer_of(value, "bool")? != 0),
        }
    }
}

impl FromPrimitive for f64 {
    fn from_primitive(value: &Primitive) -> Result<Self, ConvertError> {
        match value {
            Primitive::F64(float) => Ok(*float),
            Primitive::F32(float) => Ok(f64::from(*float)),
            Primitive::Decimal(decimal) => decimal
                .to_f64()
                .ok_or_else(|| ConvertError::out_of_range(value, "f64")),
            Primitive::Bool(flag) => Ok(f64::from(u8::from(*flag))),
            Primitive::String(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|err| ConvertError::parse("f64", err)),
            Primitive::Bytes(_) => Err(ConvertError::incompatible(value, "f64")),
            _ => value
                .as_integer()
                .map(|int| int as f64)
                .ok_or_else(|| ConvertError::incompatible(value, "f64")),
        }
    }
}

impl FromPrimitive for f32 {
    fn from_primitive(value: &Primitive) -> Result<Self, ConvertError> {
        if let Primitive::F32(float) = value {
            return Ok(*float);
        }
        let wide = f64::from_primitive(value).map_err(|err| match err {
            ConvertError::Parse { reason, .. } => ConvertError::Parse { to: "f32", reason },
            ConvertError::Incompatible { from, .. } => ConvertError::Incompatible { from, to: "f32" },
            other => other,
        })?;
        let narrow = wide as f32;
        if wide.is_finite() && !narrow.is_finite() {
            return Err(ConvertError::out_of_range(value, "f32"));
        }
        Ok(narrow)
    }
}

impl FromPrimitive for Decimal {
    fn from_primitive(value: &Primitive) -> Result<Self, ConvertError> {
        match value {
            Primitive::Decimal(decimal) => Ok(*decimal),
            Primitive::F32(float) => {
                Decimal::from_f32(*float).ok_or_else(|| ConvertError::out_of_range(value, "Decimal"))
            }
            Primitive::F64(float) => {
                Decimal::from_f64(*float).ok_or_else(|| ConvertError::out_of_range(value, "Decimal"))
            }
            Primitive::String(text) => text
                .trim()
                .parse::<Decimal>()
                .map_err(|err| ConvertError::parse("Decimal", err)),
            Primitive::Bytes(_) => Err(ConvertError::incompatible(value, "Decimal")),
            _ => {
                let wide = integer_of(value, "Decimal")?;
                Decimal::from_i128(wide).ok_or_else(|| ConvertError::out_of_range(value, "Decimal"))
            }
        }
    }
}

impl FromPrimitive for String {
    fn from_primitive(value: &Primitive) -> Result<Self, ConvertError> {
        Ok(match value {
            Primitive::String(text) => text.clone(),
            Primitive::Bool(flag) => flag.to_string(),
            Primitive::F32(float) => float.to_string(),
            Primitive::F64(float) => float.to_string(),
            Primitive::Decimal(decimal) => decimal.to_string(),
            Primitive::Bytes(_) => return Err(ConvertError::incompatible(value, "String")),
            _ => match value.as_integer() {
                Some(int) => int.to_string(),
                None => return Err(ConvertError::incompatible(value, "String")),
            },
        })
    }
}

impl FromPrimitive for Bytes {
    fn from_primitive(value: &Primitive) -> Result<Self, ConvertError> {
        match value {
            Primitive::Bytes(bytes) => Ok(bytes.clone()),
            _ => Err(ConvertError::incompatible(value, "Bytes")),
        }
    }
}

#[cfg(test)]
mod tests {
    use vc_tree::{Decimal, Primitive, PrimitiveKind};

    use super::{ConvertError, FromPrimitive};

    #[test]
    fn byte_compatibility() {
        assert_eq!(bool::from_primitive(&Primitive::U8(0)), Ok(false));
        assert_eq!(bool::from_primitive(&Primitive::U8(7)), Ok(true));
        assert_eq!(i8::from_primitive(&Primitive::U8(0x80)), Ok(-128));
        assert_eq!(i8::from_primitive(&Primitive::I8(-3)), Ok(-3));
        // Only the unsigned byte is reinterpreted.
        assert!(i8::from_primitive(&Primitive::U16(0xFF)).is_err());
    }

    #[test]
    fn integers_read_as_bool_by_non_zero() {
        assert_eq!(bool::from_primitive(&Primitive::I32(2)), Ok(true));
        assert_eq!(bool::from_primitive(&Primitive::I64(-7)), Ok(true));
        assert_eq!(bool::from_primitive(&Primitive::U64(0)), Ok(false));
        assert_eq!(bool::from_primitive(&Primitive::from("true")), Ok(true));
        assert!(bool::from_primitive(&Primitive::F64(1.0)).is_err());
    }

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(u32::from_primitive(&Primitive::I8(5)), Ok(5));
        assert_eq!(
            u8::from_primitive(&Primitive::I32(-1)),
            Err(ConvertError::OutOfRange {
                from: PrimitiveKind::I32,
                to: "u8"
            })
        );
        assert_eq!(i64::from_primitive(&Primitive::F64(3.0)), Ok(3));
        assert!(i64::from_primitive(&Primitive::F64(3.5)).is_err());
        assert_eq!(u64::from_primitive(&Primitive::from("42")), Ok(42));
        assert!(matches!(
            u64::from_primitive(&Primitive::from("four")),
            Err(ConvertError::Parse { to: "u64", .. })
        ));
    }

    #[test]
    fn cross_kind_reads() {
        let half = Decimal::new(5, 1);
        assert_eq!(f64::from_primitive(&Primitive::Decimal(half)), Ok(0.5));
        assert_eq!(Decimal::from_primitive(&Primitive::F64(0.5)), Ok(half));
        assert_eq!(f32::from_primitive(&Primitive::I16(-2)), Ok(-2.0));
        assert!(f32::from_primitive(&Primitive::F64(1e300)).is_err());
        assert_eq!(String::from_primitive(&Primitive::U32(9)).unwrap(), "9");
        assert!(String::from_primitive(&Primitive::from(vec![1_u8])).is_err());
    }

    #[test]
    fn floats_round_into_decimal_scale() {
        let tiny = Decimal::from_primitive(&Primitive::F64(1e-30)).unwrap();
        assert!(tiny.abs() < Decimal::new(1, 27));

        let third = Decimal::from_primitive(&Primitive::F64(1.0 / 3.0)).unwrap();
        assert!(third.scale() <= 28);
        assert_eq!(third.round_dp(6), Decimal::new(333_333, 6));

        assert!(Decimal::from_primitive(&Primitive::F64(f64::NAN)).is_err());
        assert!(Decimal::from_primitive(&Primitive::F64(1e30)).is_err());
        assert_eq!(
            i64::from_primitive(&Primitive::Decimal(Decimal::new(300, 2))),
            Ok(3)
        );
        assert!(i64::from_primitive(&Primitive::Decimal(Decimal::new(35, 1))).is_err());
    }
}
