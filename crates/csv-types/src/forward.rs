//! Forward conversion: FieldValue → CSV string.
//!
//! This module renders field values as cell text and encodes records in
//! schema order. The header is always the schema's column list, never the
//! header of a file that was read earlier.

use tagged_csv_core::{FieldValue, MappingError, Record, Schema};
use tracing::debug;

/// Wrapper for CSV string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvValue(pub String);

impl CsvValue {
    /// Get the inner CSV string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get a reference to the inner CSV string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<FieldValue> for CsvValue {
    fn from(value: FieldValue) -> Self {
        match value {
            // Boolean
            FieldValue::Bool(b) => CsvValue(if b {
                "true".to_string()
            } else {
                "false".to_string()
            }),

            // Integer types - full precision
            FieldValue::Int(i) => CsvValue(i.to_string()),

            // Floating point - zero fractional digits
            FieldValue::Float(f) => CsvValue(format_float(f)),

            // Text
            FieldValue::Text(s) => CsvValue(s),
        }
    }
}

/// Render a float as fixed-point text with no fractional digits.
///
/// Fractions are rounded away (`3.7` → `"4"`, ties go to even: `2.5` →
/// `"2"`), so a float field only survives a write/read cycle when it holds
/// a whole number. Non-finite values render as `+Inf`, `-Inf` and `NaN`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else {
        format!("{value:.0}")
    }
}

/// Encode one record as cells in schema order.
///
/// Cell `i` always belongs to schema entry `i`. A field the record cannot
/// produce, or produces with a value of another kind, fails with
/// [`MappingError::UnsupportedFieldKind`].
pub fn encode_record<T: Record>(schema: &Schema, record: &T) -> Result<Vec<String>, MappingError> {
    schema
        .iter()
        .map(|entry| {
            let value = record.field_value(&entry.field).ok_or_else(|| {
                MappingError::UnsupportedFieldKind {
                    field: entry.field.clone(),
                    kind: entry.kind.to_string(),
                }
            })?;

            if !value.matches(entry.kind) {
                return Err(MappingError::UnsupportedFieldKind {
                    field: entry.field.clone(),
                    kind: value.kind_name().to_string(),
                });
            }

            Ok(CsvValue::from(value).into_inner())
        })
        .collect()
}

/// Encode a record set into a header row and data rows.
///
/// Every record is encoded before anything is returned, so a failure on the
/// last record still yields no output at all.
pub fn encode_records<T: Record>(
    schema: &Schema,
    records: &[T],
) -> Result<(Vec<String>, Vec<Vec<String>>), MappingError> {
    let header = schema.header();
    let rows = records
        .iter()
        .map(|record| encode_record(schema, record))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Encoded {} records of {} into {} columns",
        rows.len(),
        schema.type_name(),
        header.len()
    );

    Ok((header, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;
    use tagged_csv_core::{
        resolve_schema, FloatWidth, IntWidth, RecordDescriptor, ScalarKind, TypeDescriptor,
    };

    #[test]
    fn test_bool_conversion() {
        let csv_val: CsvValue = FieldValue::Bool(true).into();
        assert_eq!(csv_val.0, "true");

        let csv_val: CsvValue = FieldValue::Bool(false).into();
        assert_eq!(csv_val.0, "false");
    }

    #[test]
    fn test_int_conversion() {
        let csv_val: CsvValue = FieldValue::Int(12345).into();
        assert_eq!(csv_val.0, "12345");
    }

    #[test]
    fn test_bigint_conversion() {
        let csv_val: CsvValue = FieldValue::Int(i64::MIN).into();
        assert_eq!(csv_val.0, "-9223372036854775808");
    }

    #[test]
    fn test_float_conversion_drops_fraction() {
        assert_eq!(CsvValue::from(FieldValue::Float(3.7)).0, "4");
        assert_eq!(CsvValue::from(FieldValue::Float(3.2)).0, "3");
        assert_eq!(CsvValue::from(FieldValue::Float(-1.6)).0, "-2");
        assert_eq!(CsvValue::from(FieldValue::Float(1234.0)).0, "1234");
    }

    #[test]
    fn test_float_ties_to_even() {
        assert_eq!(format_float(2.5), "2");
        assert_eq!(format_float(3.5), "4");
        assert_eq!(format_float(0.5), "0");
    }

    #[test]
    fn test_float_non_finite() {
        assert_eq!(format_float(f64::INFINITY), "+Inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_float(f64::NAN), "NaN");
    }

    #[test]
    fn test_text_conversion() {
        let csv_val: CsvValue = FieldValue::Text("hello, world".to_string()).into();
        assert_eq!(csv_val.as_str(), "hello, world");
    }

    #[derive(Debug, Default)]
    struct Reading {
        sensor: String,
        celsius: f32,
        count: i16,
        ok: bool,
        #[allow(dead_code)]
        raw: Vec<u8>,
    }

    impl Record for Reading {
        fn descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                RecordDescriptor::builder("Reading")
                    .column("sensor", "sensor", ScalarKind::Text)
                    .skip("raw", "Vec<u8>")
                    .column("celsius", "temp", ScalarKind::Float(FloatWidth::F32))
                    .column("count", "n", ScalarKind::Int(IntWidth::I16))
                    .column("ok", "ok", ScalarKind::Bool)
                    .build()
                    .into()
            })
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "sensor" => Some(FieldValue::Text(self.sensor.clone())),
                "celsius" => Some(FieldValue::Float(f64::from(self.celsius))),
                "count" => Some(FieldValue::Int(i64::from(self.count))),
                "ok" => Some(FieldValue::Bool(self.ok)),
                _ => None,
            }
        }

        fn set_field_value(&mut self, _field: &str, value: FieldValue) -> Result<(), FieldValue> {
            Err(value)
        }
    }

    #[test]
    fn test_encode_records_in_schema_order() {
        let schema = resolve_schema(Reading::descriptor()).unwrap();
        let records = vec![
            Reading {
                sensor: "a1".to_string(),
                celsius: 21.7,
                count: 3,
                ok: true,
                raw: vec![1, 2, 3],
            },
            Reading {
                sensor: "b2".to_string(),
                celsius: -4.0,
                count: -1,
                ok: false,
                raw: Vec::new(),
            },
        ];

        let (header, rows) = encode_records(&schema, &records).unwrap();
        assert_eq!(header, vec!["sensor", "temp", "n", "ok"]);
        assert_eq!(
            rows,
            vec![
                vec!["a1", "22", "3", "true"],
                vec!["b2", "-4", "-1", "false"],
            ]
        );
    }

    #[test]
    fn test_encode_empty_record_set() {
        let schema = resolve_schema(Reading::descriptor()).unwrap();
        let (header, rows) = encode_records::<Reading>(&schema, &[]).unwrap();
        assert_eq!(header.len(), 4);
        assert!(rows.is_empty());
    }

    /// Declares a bool column but hands back text for it.
    #[derive(Debug, Default)]
    struct Mislabelled;

    impl Record for Mislabelled {
        fn descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: OnceLock<TypeDescriptor> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                RecordDescriptor::builder("Mislabelled")
                    .column("flag", "flag", ScalarKind::Bool)
                    .column("missing", "missing", ScalarKind::Text)
                    .build()
                    .into()
            })
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            (field == "flag").then(|| FieldValue::Text("yes".to_string()))
        }

        fn set_field_value(&mut self, _field: &str, value: FieldValue) -> Result<(), FieldValue> {
            Err(value)
        }
    }

    #[test]
    fn test_encode_kind_mismatch() {
        let schema = resolve_schema(Mislabelled::descriptor()).unwrap();
        let err = encode_records(&schema, &[Mislabelled]).unwrap_err();
        match err {
            MappingError::UnsupportedFieldKind { field, kind } => {
                assert_eq!(field, "flag");
                assert_eq!(kind, "text");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
