//! tagged-csv
//!
//! Map CSV files to and from plain Rust structs. A struct opts its fields in
//! with a column annotation; everything else about the mapping (header
//! lookup, cell parsing, rendering, file framing) is derived from that.
//!
//! ```text
//! Record::descriptor()  ──resolve_schema──▶  Schema  ──bind_header──▶  Binding
//!                                              │                         │
//!                         encode_records ◀─────┘        decode_record ◀──┘
//!                               │                             ▲
//!                               ▼                             │
//!                        RowSink (LocalFile)          RowSource (LocalFile)
//! ```
//!
//! # Crates
//!
//! - `tagged_csv_core` - descriptors, schema resolution, header binding, errors
//! - `csv_types` - cell text ⇄ field value conversions
//! - `tagged_csv_derive` - `#[derive(CsvRecord)]`
//! - `tagged_csv_file` - whole-file CSV read and atomic write
//!
//! # Example
//!
//! ```ignore
//! use tagged_csv::{read_records, write_records, CsvRecord};
//!
//! #[derive(Debug, Default, CsvRecord)]
//! struct Person {
//!     #[col = "name"]
//!     name: String,
//!     #[col = "active"]
//!     active: bool,
//! }
//!
//! let people: Vec<Person> = read_records("people.csv")?;
//! write_records("people-copy.csv", &people)?;
//! ```
//!
//! The derive expands to paths under `::tagged_csv_core`, so crates using it
//! depend on `tagged-csv-core` directly as well.

pub mod config;
pub mod validate;

use rayon::prelude::*;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

pub use config::Config;
pub use csv_types::{format_float, CsvParseError, CsvValue};
pub use tagged_csv_core::{
    bind_header, resolve_schema, Binding, CsvScalar, FieldDescriptor, FieldValue, FloatWidth,
    IntWidth, MappingError, Record, RecordDescriptor, ScalarKind, Schema, TypeDescriptor,
};
pub use tagged_csv_derive::CsvRecord;
pub use tagged_csv_file::{LocalFile, RowSink, RowSource, Rows};

/// Decode a row set whose first row is the header.
///
/// An empty row set counts as an empty header: it fails with
/// [`MappingError::ColumnNotFound`] unless `T` maps no columns at all.
pub fn decode_records<T, S>(rows: &[Vec<S>]) -> Result<Vec<T>, MappingError>
where
    T: Record,
    S: AsRef<str>,
{
    let schema = resolve_schema(T::descriptor())?;
    let (header, data) = split_header(rows);
    let binding = bind_header(&schema, header)?;

    let records = data
        .iter()
        .map(|row| csv_types::decode_record(&binding, row))
        .collect::<Result<Vec<T>, _>>()?;

    info!("Decoded {} {} records", records.len(), schema.type_name());
    Ok(records)
}

/// [`decode_records`] with execution settings.
///
/// When `config` asks for it, data rows are decoded on the rayon pool. The
/// output keeps input order and a failure reports the earliest failing row.
pub fn decode_records_with<T, S>(rows: &[Vec<S>], config: &Config) -> Result<Vec<T>, MappingError>
where
    T: Record + Send,
    S: AsRef<str> + Sync,
{
    let (header, data) = split_header(rows);
    if !config.decode_in_parallel(data.len()) {
        return decode_records(rows);
    }

    let schema = resolve_schema(T::descriptor())?;
    let binding = bind_header(&schema, header)?;

    // Every row is attempted; the sequential scan afterwards picks the first
    // error in row order.
    let results: Vec<Result<T, MappingError>> = data
        .par_iter()
        .map(|row| csv_types::decode_record(&binding, row))
        .collect();
    let records = results.into_iter().collect::<Result<Vec<T>, _>>()?;

    info!(
        "Decoded {} {} records in parallel",
        records.len(),
        schema.type_name()
    );
    Ok(records)
}

/// Encode records as a header row followed by one row per record.
pub fn encode_rows<T: Record>(records: &[T]) -> Result<Rows, MappingError> {
    let schema = resolve_schema(T::descriptor())?;
    let (header, data) = csv_types::encode_records(&schema, records)?;

    let mut rows = Vec::with_capacity(data.len() + 1);
    rows.push(header);
    rows.extend(data);

    info!("Encoded {} {} records", records.len(), schema.type_name());
    Ok(rows)
}

/// Read every record from a CSV file.
pub fn read_records<T: Record>(path: impl AsRef<Path>) -> Result<Vec<T>, MappingError> {
    let rows = LocalFile::new(path.as_ref()).read_all()?;
    decode_records(&rows)
}

/// Read every record from a CSV file with explicit settings.
pub fn read_records_with<T: Record + Send>(
    path: impl AsRef<Path>,
    config: &Config,
) -> Result<Vec<T>, MappingError> {
    let file = LocalFile::new(path.as_ref()).with_buffer_size(config.buffer_size);
    read_records_from_source(&file, config)
}

/// Read every record from any CSV byte stream.
pub fn read_records_from<T: Record, R: Read>(reader: R) -> Result<Vec<T>, MappingError> {
    let rows = tagged_csv_file::read_rows(reader)?;
    decode_records(&rows)
}

/// Read every record from a [`RowSource`].
pub fn read_records_from_source<T, Src>(source: &Src, config: &Config) -> Result<Vec<T>, MappingError>
where
    T: Record + Send,
    Src: RowSource + ?Sized,
{
    let rows = source.read_rows()?;
    decode_records_with(&rows, config)
}

/// Write records to a CSV file, replacing it atomically.
///
/// All records are encoded before the file is touched; on any failure the
/// destination is left as it was.
pub fn write_records<T: Record>(path: impl AsRef<Path>, records: &[T]) -> Result<(), MappingError> {
    write_records_to_sink(&LocalFile::new(path.as_ref()), records)
}

/// Write records as CSV to any byte stream.
pub fn write_records_to<T: Record, W: Write>(writer: W, records: &[T]) -> Result<(), MappingError> {
    let schema = resolve_schema(T::descriptor())?;
    let (header, rows) = csv_types::encode_records(&schema, records)?;
    tagged_csv_file::write_rows(writer, &header, &rows)?;

    info!("Wrote {} {} records", rows.len(), schema.type_name());
    Ok(())
}

/// Write records to a [`RowSink`].
pub fn write_records_to_sink<T, Snk>(sink: &Snk, records: &[T]) -> Result<(), MappingError>
where
    T: Record,
    Snk: RowSink + ?Sized,
{
    let schema = resolve_schema(T::descriptor())?;
    let (header, rows) = csv_types::encode_records(&schema, records)?;
    sink.write_rows(&header, &rows)?;

    info!("Wrote {} {} records", rows.len(), schema.type_name());
    Ok(())
}

fn split_header<S>(rows: &[Vec<S>]) -> (&[S], &[Vec<S>]) {
    match rows.split_first() {
        Some((header, data)) => (header.as_slice(), data),
        None => (Default::default(), Default::default()),
    }
}
