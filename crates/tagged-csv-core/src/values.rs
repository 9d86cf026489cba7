//! Field values and the Rust scalar types that carry them.
//!
//! `FieldValue` is the intermediate shape every cell passes through: the
//! decoder produces one per bound field, a [`Record`](crate::Record) accepts
//! it into a struct field, and the encoder renders it back to text.

use crate::types::{FloatWidth, IntWidth, ScalarKind};

/// A typed cell value.
///
/// Integers are widened to `i64` and floats to `f64`; the declared
/// [`ScalarKind`] of the field keeps the width.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Boolean value
    Bool(bool),

    /// Signed integer, widened to 64 bits
    Int(i64),

    /// Floating point, widened to double precision
    Float(f64),

    /// Text value
    Text(String),
}

impl FieldValue {
    /// Whether this value can be stored in a field of the given kind.
    ///
    /// Integers must also fit the declared width.
    pub fn matches(&self, kind: ScalarKind) -> bool {
        match (self, kind) {
            (FieldValue::Bool(_), ScalarKind::Bool) => true,
            (FieldValue::Int(i), ScalarKind::Int(width)) => (width.min()..=width.max()).contains(i),
            (FieldValue::Float(_), ScalarKind::Float(_)) => true,
            (FieldValue::Text(_), ScalarKind::Text) => true,
            _ => false,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
        }
    }
}

/// A Rust type that can back an annotated field.
///
/// `#[derive(CsvRecord)]` calls these methods for every `#[col = ".."]`
/// field, so annotating a field of any other type fails to compile.
pub trait CsvScalar: Sized {
    /// Kind recorded in the field descriptor.
    const KIND: ScalarKind;

    /// Read the field.
    fn to_field_value(&self) -> FieldValue;

    /// Store a decoded value; a value of the wrong shape or out of range is
    /// handed back unchanged.
    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue>;
}

impl CsvScalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

macro_rules! impl_int_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CsvScalar for $ty {
                const KIND: ScalarKind = ScalarKind::Int(IntWidth::from_bits(<$ty>::BITS));

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Int(*self as i64)
                }

                fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
                    match value {
                        FieldValue::Int(i) => <$ty>::try_from(i).map_err(|_| FieldValue::Int(i)),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_int_scalar!(i8, i16, i32, i64, isize);

impl CsvScalar for f32 {
    const KIND: ScalarKind = ScalarKind::Float(FloatWidth::F32);

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Float(f) => Ok(f as f32),
            other => Err(other),
        }
    }
}

impl CsvScalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float(FloatWidth::F64);

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Float(f) => Ok(f),
            other => Err(other),
        }
    }
}

impl CsvScalar for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }

    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
        match value {
            FieldValue::Text(s) => Ok(s),
            other => Err(other),
        }
    }
}
