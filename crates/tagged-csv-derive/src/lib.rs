//! Procedural macros for tagged-csv
//!
//! This crate provides `#[derive(CsvRecord)]`, which generates the
//! `tagged_csv_core::Record` implementation for a struct: its field table and
//! the accessors the value coder uses to read and assign annotated fields.

use proc_macro::TokenStream;

mod csv_record;

/// Derive `Record` for a struct with named fields.
///
/// Mark each participating field with `#[col = "column name"]`. The field
/// type must implement `CsvScalar` (`bool`, `i8`..`i64`, `isize`, `f32`,
/// `f64`, `String`). Fields without the attribute are left out of both
/// reading and writing and keep their `Default` value when decoding.
///
/// **Important:** generated code refers to `::tagged_csv_core`, so that crate
/// must be a direct dependency of the crate using the derive. The struct must
/// also implement `Default`.
///
/// # Example
///
/// ```
/// use tagged_csv_core::{FieldValue, Record};
/// use tagged_csv_derive::CsvRecord;
///
/// #[derive(Debug, Default, CsvRecord)]
/// pub struct Person {
///     #[col = "name"]
///     pub name: String,
///     #[col = "active"]
///     pub active: bool,
///     pub cache: Vec<String>,
/// }
///
/// let person = Person {
///     name: "Ann".to_string(),
///     active: true,
///     cache: Vec::new(),
/// };
/// assert_eq!(person.field_value("active"), Some(FieldValue::Bool(true)));
/// assert_eq!(person.field_value("cache"), None);
/// ```
///
/// Annotating a field whose type is not a `CsvScalar` does not compile:
///
/// ```compile_fail
/// use tagged_csv_derive::CsvRecord;
///
/// #[derive(Default, CsvRecord)]
/// struct Blob {
///     #[col = "bytes"]
///     bytes: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(CsvRecord, attributes(col))]
pub fn derive_csv_record(input: TokenStream) -> TokenStream {
    csv_record::derive_csv_record_impl(input)
}
