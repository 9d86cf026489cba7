//! Reverse conversion: CSV string → FieldValue.
//!
//! This module parses cell text according to a field's declared
//! [`ScalarKind`] and decodes whole data rows through a [`Binding`].

use tagged_csv_core::{
    Binding, BoundField, FieldValue, FloatWidth, IntWidth, MappingError, Record, ScalarKind,
};
use tracing::trace;

/// A CSV string with the kind it should be parsed as.
#[derive(Debug, Clone, Copy)]
pub struct CsvStringWithSchema<'a> {
    /// The CSV string value
    pub value: &'a str,
    /// The declared kind
    pub kind: ScalarKind,
}

impl<'a> CsvStringWithSchema<'a> {
    /// Create a new CSV string with kind.
    pub fn new(value: &'a str, kind: ScalarKind) -> Self {
        Self { value, kind }
    }

    /// Convert to FieldValue based on the kind.
    pub fn to_field_value(&self) -> Result<FieldValue, CsvParseError> {
        csv_string_to_field_value(self.value, self.kind)
    }
}

/// Error type for CSV parsing failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Failed to parse '{value}' as {kind}: {message}")]
pub struct CsvParseError {
    pub kind: ScalarKind,
    pub value: String,
    pub message: String,
}

impl CsvParseError {
    fn new(kind: ScalarKind, value: &str, message: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            message: message.to_string(),
        }
    }

    /// Attach the field name, producing the matching [`MappingError`].
    pub fn into_mapping_error(self, field: &str) -> MappingError {
        let field = field.to_string();
        match self.kind {
            ScalarKind::Bool => MappingError::InvalidBool {
                field,
                value: self.value,
            },
            ScalarKind::Int(_) => MappingError::InvalidInt {
                field,
                kind: self.kind.to_string(),
                value: self.value,
            },
            ScalarKind::Float(_) => MappingError::InvalidFloat {
                field,
                kind: self.kind.to_string(),
                value: self.value,
            },
            // Text never fails to parse; report it like any other kind mismatch.
            ScalarKind::Text => MappingError::UnsupportedFieldKind {
                field,
                kind: self.kind.to_string(),
            },
        }
    }
}

/// Parse a CSV string value according to the declared kind.
///
/// This is the reverse of `CsvValue::from(FieldValue)`.
pub fn csv_string_to_field_value(
    value: &str,
    kind: ScalarKind,
) -> Result<FieldValue, CsvParseError> {
    match kind {
        // Boolean - fixed token set, no trimming
        ScalarKind::Bool => match value {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(FieldValue::Bool(true)),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(FieldValue::Bool(false)),
            _ => Err(CsvParseError::new(kind, value, "Invalid boolean value")),
        },

        // Integer types - base 10 at the declared width
        ScalarKind::Int(width) => {
            let parsed = match width {
                IntWidth::I8 => value.parse::<i8>().map(i64::from),
                IntWidth::I16 => value.parse::<i16>().map(i64::from),
                IntWidth::I32 => value.parse::<i32>().map(i64::from),
                IntWidth::I64 => value.parse::<i64>(),
            };
            parsed
                .map(FieldValue::Int)
                .map_err(|e| CsvParseError::new(kind, value, &e.to_string()))
        }

        // Float types - decimal or exponential at the declared precision
        ScalarKind::Float(width) => {
            let parsed = match width {
                FloatWidth::F32 => value.parse::<f32>().map(f64::from),
                FloatWidth::F64 => value.parse::<f64>(),
            }
            .map_err(|e| CsvParseError::new(kind, value, &e.to_string()))?;

            if parsed.is_infinite() && !is_infinity_literal(value) {
                return Err(CsvParseError::new(kind, value, "value out of range"));
            }
            Ok(FieldValue::Float(parsed))
        }

        // Text - verbatim
        ScalarKind::Text => Ok(FieldValue::Text(value.to_string())),
    }
}

/// Whether the text spells an infinity rather than overflowing to one.
fn is_infinity_literal(value: &str) -> bool {
    let unsigned = value
        .strip_prefix('+')
        .or_else(|| value.strip_prefix('-'))
        .unwrap_or(value);
    unsigned
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("inf"))
}

fn decode_cell<S: AsRef<str>>(bound: &BoundField<'_>, row: &[S]) -> Result<FieldValue, MappingError> {
    let entry = bound.entry;
    let cell = row
        .get(bound.column_index)
        .ok_or_else(|| MappingError::RowTooShort {
            field: entry.field.clone(),
            column_index: bound.column_index,
            row_len: row.len(),
        })?;

    CsvStringWithSchema::new(cell.as_ref(), entry.kind)
        .to_field_value()
        .map_err(|e| e.into_mapping_error(&entry.field))
}

/// Decode the bound cells of one data row, in declaration order.
///
/// Cells the binding does not reference are ignored.
pub fn decode_values<S: AsRef<str>>(
    binding: &Binding<'_>,
    row: &[S],
) -> Result<Vec<FieldValue>, MappingError> {
    binding
        .fields()
        .iter()
        .map(|bound| decode_cell(bound, row))
        .collect()
}

/// Decode one data row into a new record.
///
/// Fields are assigned in declaration order; the first failure discards the
/// partially built record.
pub fn decode_record<T: Record, S: AsRef<str>>(
    binding: &Binding<'_>,
    row: &[S],
) -> Result<T, MappingError> {
    let mut record = T::default();

    for bound in binding.fields() {
        let value = decode_cell(bound, row)?;
        let entry = bound.entry;
        record
            .set_field_value(&entry.field, value)
            .map_err(|rejected| MappingError::UnsupportedFieldKind {
                field: entry.field.clone(),
                kind: rejected.kind_name().to_string(),
            })?;
    }

    trace!("Decoded {} fields of {}", binding.len(), std::any::type_name::<T>());
    Ok(record)
}
