//! Header binding: field → column index for one concrete header row.

use crate::error::MappingError;
use crate::schema::{Schema, SchemaEntry};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A schema entry resolved to a column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundField<'s> {
    /// The schema entry
    pub entry: &'s SchemaEntry,

    /// Zero-based index of the column in the header row
    pub column_index: usize,
}

/// Column positions for every field of a schema.
///
/// Only valid for the header row it was bound against. Fields keep the
/// schema's declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding<'s> {
    fields: Vec<BoundField<'s>>,
}

impl<'s> Binding<'s> {
    /// Bound fields in declaration order.
    pub fn fields(&self) -> &[BoundField<'s>] {
        &self.fields
    }

    /// Column index bound to a field.
    pub fn column_of(&self, field: &str) -> Option<usize> {
        self.fields
            .iter()
            .find(|b| b.entry.field == field)
            .map(|b| b.column_index)
    }

    /// Number of bound fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the binding has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Bind a schema to a header row.
///
/// Header order does not matter and unrelated columns are ignored. When a
/// header name repeats, its last position wins. Fails with
/// [`MappingError::ColumnNotFound`] on the first schema column that the
/// header lacks.
pub fn bind_header<'s, S: AsRef<str>>(
    schema: &'s Schema,
    header: &[S],
) -> Result<Binding<'s>, MappingError> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(header.len());
    for (index, name) in header.iter().enumerate() {
        if let Some(previous) = positions.insert(name.as_ref(), index) {
            warn!(
                "Header column '{}' repeats at {previous} and {index}; using {index}",
                name.as_ref()
            );
        }
    }

    let fields = schema
        .iter()
        .map(|entry| {
            positions
                .get(entry.column.as_str())
                .map(|&column_index| BoundField {
                    entry,
                    column_index,
                })
                .ok_or_else(|| MappingError::ColumnNotFound {
                    column: entry.column.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Bound {} fields of {} against {} header columns",
        fields.len(),
        schema.type_name(),
        header.len()
    );

    Ok(Binding { fields })
}
