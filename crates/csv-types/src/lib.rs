//! CSV cell conversions for tagged-csv field values.
//!
//! This crate is the value coder: it turns cell text into typed
//! [`FieldValue`](tagged_csv_core::FieldValue)s and back, and applies those
//! conversions to whole records through a [`Binding`](tagged_csv_core::Binding)
//! or a [`Schema`](tagged_csv_core::Schema).
//!
//! # Modules
//!
//! - [`forward`] - FieldValue → CSV string conversion, record encoding
//! - [`reverse`] - CSV string → FieldValue conversion, record decoding
//!
//! # Example
//!
//! ```
//! use csv_types::{CsvStringWithSchema, CsvValue};
//! use tagged_csv_core::{FieldValue, IntWidth, ScalarKind};
//!
//! // Forward: FieldValue → CSV string
//! let csv_val: CsvValue = FieldValue::Float(3.7).into();
//! assert_eq!(csv_val.as_str(), "4");
//!
//! // Reverse: CSV string → FieldValue
//! let kind = ScalarKind::Int(IntWidth::I32);
//! let value = CsvStringWithSchema::new("42", kind).to_field_value().unwrap();
//! assert_eq!(value, FieldValue::Int(42));
//! ```

pub mod forward;
pub mod reverse;

pub use forward::CsvValue;
pub use forward::{encode_record, encode_records, format_float};
pub use reverse::CsvStringWithSchema;
pub use reverse::{csv_string_to_field_value, decode_record, decode_values, CsvParseError};
