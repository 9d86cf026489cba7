//! Scalar kinds understood by the value coder.
//!
//! `ScalarKind` is closed. Every coercion routine matches on it exhaustively,
//! so a new kind has to be handled on both the decode and the encode path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bit width of a signed integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
}

impl IntWidth {
    /// Width for an integer type with the given number of bits.
    ///
    /// Anything wider than 32 bits maps to [`IntWidth::I64`].
    pub const fn from_bits(bits: u32) -> Self {
        match bits {
            0..=8 => IntWidth::I8,
            9..=16 => IntWidth::I16,
            17..=32 => IntWidth::I32,
            _ => IntWidth::I64,
        }
    }

    /// Smallest value representable at this width.
    pub const fn min(self) -> i64 {
        match self {
            IntWidth::I8 => i8::MIN as i64,
            IntWidth::I16 => i16::MIN as i64,
            IntWidth::I32 => i32::MIN as i64,
            IntWidth::I64 => i64::MIN,
        }
    }

    /// Largest value representable at this width.
    pub const fn max(self) -> i64 {
        match self {
            IntWidth::I8 => i8::MAX as i64,
            IntWidth::I16 => i16::MAX as i64,
            IntWidth::I32 => i32::MAX as i64,
            IntWidth::I64 => i64::MAX,
        }
    }
}

/// Precision of a floating point field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    /// `f32`
    F32,
    /// `f64`
    F64,
}

/// Declared kind of a participating field.
///
/// # YAML Format
///
/// Kinds are written as plain strings:
/// ```yaml
/// kind: bool
/// kind: i32
/// kind: f64
/// kind: text
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScalarKind {
    /// Boolean value
    Bool,

    /// Signed integer of the given width
    Int(IntWidth),

    /// Floating point of the given precision
    Float(FloatWidth),

    /// Text cell, copied verbatim
    Text,
}

impl ScalarKind {
    /// Canonical name, as used in error messages and descriptor files.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int(IntWidth::I8) => "i8",
            ScalarKind::Int(IntWidth::I16) => "i16",
            ScalarKind::Int(IntWidth::I32) => "i32",
            ScalarKind::Int(IntWidth::I64) => "i64",
            ScalarKind::Float(FloatWidth::F32) => "f32",
            ScalarKind::Float(FloatWidth::F64) => "f64",
            ScalarKind::Text => "text",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a kind name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scalar kind '{0}' (expected one of bool, i8, i16, i32, i64, f32, f64, text)")]
pub struct ParseKindError(pub String);

impl FromStr for ScalarKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "bool" | "boolean" => ScalarKind::Bool,
            "i8" => ScalarKind::Int(IntWidth::I8),
            "i16" => ScalarKind::Int(IntWidth::I16),
            "i32" => ScalarKind::Int(IntWidth::I32),
            "i64" | "int" => ScalarKind::Int(IntWidth::I64),
            "f32" => ScalarKind::Float(FloatWidth::F32),
            "f64" | "float" => ScalarKind::Float(FloatWidth::F64),
            "text" | "string" | "str" => ScalarKind::Text,
            _ => return Err(ParseKindError(s.to_string())),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for ScalarKind {
    type Error = ParseKindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScalarKind> for String {
    fn from(kind: ScalarKind) -> Self {
        kind.name().to_string()
    }
}
