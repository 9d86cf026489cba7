//! Value-level validation against a runtime descriptor.
//!
//! The `tagged-csv` binary has no compiled record type to decode into, so it
//! checks a file against a [`RecordDescriptor`] built from the command line
//! or loaded from YAML: resolve, bind, then convert every bound cell.

use crate::Config;
use rayon::prelude::*;
use std::str::FromStr;
use tagged_csv_core::{
    bind_header, resolve_schema, MappingError, ParseKindError, RecordDescriptor, ScalarKind,
    TypeDescriptor,
};
use thiserror::Error;
use tracing::info;

/// One `FIELD=KIND[:COLUMN]` mapping from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub field: String,
    pub kind: ScalarKind,
    /// Header name; defaults to the field name.
    pub column: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColumnSpecError {
    #[error("expected FIELD=KIND[:COLUMN], got '{0}'")]
    Malformed(String),

    #[error("empty column name in '{0}'")]
    EmptyColumn(String),

    #[error(transparent)]
    Kind(#[from] ParseKindError),
}

impl FromStr for ColumnSpec {
    type Err = ColumnSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, rest) = s
            .split_once('=')
            .filter(|(field, _)| !field.trim().is_empty())
            .ok_or_else(|| ColumnSpecError::Malformed(s.to_string()))?;
        let field = field.trim().to_string();

        let (kind, column) = match rest.split_once(':') {
            Some((kind, column)) => {
                if column.is_empty() {
                    return Err(ColumnSpecError::EmptyColumn(s.to_string()));
                }
                (kind, column.to_string())
            }
            None => (rest, field.clone()),
        };

        Ok(Self {
            field,
            kind: kind.parse()?,
            column,
        })
    }
}

/// Build a record descriptor from command-line column mappings.
pub fn descriptor_from_columns(columns: &[ColumnSpec]) -> RecordDescriptor {
    columns
        .iter()
        .fold(RecordDescriptor::builder("columns"), |builder, spec| {
            builder.column(&spec.field, &spec.column, spec.kind)
        })
        .build()
}

/// Check every data row of `rows` against `descriptor`.
///
/// Returns the number of data rows that decoded cleanly, which on success is
/// all of them. The first failing row (in file order) is reported.
pub fn validate_rows<S>(
    descriptor: &TypeDescriptor,
    rows: &[Vec<S>],
    config: &Config,
) -> Result<usize, MappingError>
where
    S: AsRef<str> + Sync,
{
    let schema = resolve_schema(descriptor)?;
    let (header, data) = match rows.split_first() {
        Some((header, data)) => (header.as_slice(), data),
        None => (Default::default(), Default::default()),
    };
    let binding = bind_header(&schema, header)?;

    if config.decode_in_parallel(data.len()) {
        let results: Vec<Result<(), MappingError>> = data
            .par_iter()
            .map(|row| csv_types::decode_values(&binding, row).map(drop))
            .collect();
        results.into_iter().collect::<Result<(), _>>()?;
    } else {
        for row in data {
            csv_types::decode_values(&binding, row)?;
        }
    }

    info!(
        "Validated {} rows against {} columns of {}",
        data.len(),
        schema.len(),
        schema.type_name()
    );
    Ok(data.len())
}
