//! Core types for the tagged-csv framework.
//!
//! This crate provides the foundational pieces shared by the value coder,
//! the derive macro and the consumer-facing crate:
//!
//! - [`ScalarKind`] - The closed set of cell kinds a field can declare
//! - [`FieldValue`] / [`CsvScalar`] - Typed cell values and the Rust types that carry them
//! - [`TypeDescriptor`] / [`RecordDescriptor`] - Static field tables, one per record type
//! - [`Record`] - Accessors generated by `#[derive(CsvRecord)]`
//! - [`resolve_schema`] - Field → column name mapping (the tag resolver)
//! - [`bind_header`] - Field → column index mapping for one header row
//!
//! # Architecture
//!
//! ```text
//! tagged-csv-core (this crate)
//!    │
//!    ├─── tagged-csv-derive   (generates Record impls against this crate)
//!    ├─── csv-types           (cell text ⇄ FieldValue, record encode/decode)
//!    ├─── tagged-csv-file     (reads/writes row grids)
//!    └─── tagged-csv          (read_records / write_records)
//! ```
//!
//! # Example
//!
//! ```rust
//! use tagged_csv_core::{bind_header, resolve_schema, RecordDescriptor, ScalarKind, TypeDescriptor};
//!
//! let descriptor: TypeDescriptor = RecordDescriptor::builder("Person")
//!     .column("name", "name", ScalarKind::Text)
//!     .skip("notes", "Vec<String>")
//!     .build()
//!     .into();
//!
//! let schema = resolve_schema(&descriptor).unwrap();
//! let binding = bind_header(&schema, &["id", "name"]).unwrap();
//! assert_eq!(binding.column_of("name"), Some(1));
//! ```

pub mod binding;
pub mod descriptor;
pub mod error;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use binding::{bind_header, BoundField, Binding};
pub use descriptor::{
    DescriptorError, FieldDescriptor, Record, RecordDescriptor, RecordDescriptorBuilder,
    TypeDescriptor,
};
pub use error::MappingError;
pub use schema::{resolve_schema, Schema, SchemaEntry};
pub use types::{FloatWidth, IntWidth, ParseKindError, ScalarKind};
pub use values::{CsvScalar, FieldValue};
