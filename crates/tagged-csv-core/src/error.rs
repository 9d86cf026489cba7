//! Error taxonomy for reading and writing tagged records.

use thiserror::Error;

/// Boxed error produced by a row source or sink.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a read or write.
///
/// Every variant is terminal for the operation that produced it: nothing is
/// retried and no partial result is returned alongside it.
#[derive(Error, Debug)]
pub enum MappingError {
    /// The descriptor does not describe a struct with named fields.
    #[error("{type_name} is not a record type")]
    NotARecordType { type_name: String },

    /// Two fields of the same record are annotated with one column name.
    #[error("column '{column}' is mapped by both field '{first}' and field '{second}'")]
    DuplicateColumnMapping {
        column: String,
        first: String,
        second: String,
    },

    /// A descriptor lists the same field more than once.
    #[error("field '{field}' is declared more than once in {type_name}")]
    DuplicateField { type_name: String, field: String },

    /// An annotated column is missing from the header row.
    #[error("column {column} does not exist")]
    ColumnNotFound { column: String },

    /// A data row ends before the column bound to `field`.
    #[error("row has {row_len} cells, field '{field}' reads column {column_index}")]
    RowTooShort {
        field: String,
        column_index: usize,
        row_len: usize,
    },

    /// The cell is not one of the accepted boolean tokens.
    #[error("field bool {field} invalid: '{value}'")]
    InvalidBool { field: String, value: String },

    /// The cell is not a base-10 integer that fits the declared width.
    #[error("field {kind} {field} invalid: '{value}'")]
    InvalidInt {
        field: String,
        kind: String,
        value: String,
    },

    /// The cell is not a decimal or exponential float of the declared precision.
    #[error("field {kind} {field} invalid: '{value}'")]
    InvalidFloat {
        field: String,
        kind: String,
        value: String,
    },

    /// The field's type is outside the supported scalar kinds, or the record
    /// returned a value that disagrees with the declared kind.
    #[error("field {field} has unsupported type {kind}")]
    UnsupportedFieldKind { field: String, kind: String },

    /// The row source failed (I/O or malformed CSV).
    #[error("read file error: {0}")]
    SourceRead(#[source] BoxError),

    /// The row sink failed.
    #[error("write file error: {0}")]
    SinkWrite(#[source] BoxError),
}

impl MappingError {
    /// Wrap a source failure.
    pub fn source_read(err: impl Into<BoxError>) -> Self {
        MappingError::SourceRead(err.into())
    }

    /// Wrap a sink failure.
    pub fn sink_write(err: impl Into<BoxError>) -> Self {
        MappingError::SinkWrite(err.into())
    }

    /// Name of the field involved, when the error concerns a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            MappingError::DuplicateField { field, .. }
            | MappingError::RowTooShort { field, .. }
            | MappingError::InvalidBool { field, .. }
            | MappingError::InvalidInt { field, .. }
            | MappingError::InvalidFloat { field, .. }
            | MappingError::UnsupportedFieldKind { field, .. } => Some(field),
            _ => None,
        }
    }
}
