//! Tag resolution: field → column name.
//!
//! The schema depends only on the record type, never on a file. Its entry
//! order is the declaration order of the annotated fields, which is also the
//! header order used when writing.

use crate::descriptor::TypeDescriptor;
use crate::error::MappingError;
use crate::types::ScalarKind;
use std::collections::{HashMap, HashSet};

/// One participating field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    /// Field identifier
    pub field: String,

    /// Column name from the annotation
    pub column: String,

    /// Declared kind of the field
    pub kind: ScalarKind,
}

/// The annotated fields of one record type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    type_name: String,
    entries: Vec<SchemaEntry>,
}

impl Schema {
    /// Name of the record type this schema was resolved from.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    /// Iterate over the entries in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, SchemaEntry> {
        self.entries.iter()
    }

    /// Number of participating fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no field carries a column annotation.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Column name mapped by a field.
    pub fn column_of(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.column.as_str())
    }

    /// Output header: the column names in declaration order.
    pub fn header(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.column.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a SchemaEntry;
    type IntoIter = std::slice::Iter<'a, SchemaEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Resolve the column annotations of a record type.
///
/// Fields without an annotation are skipped. Fails when the descriptor is not
/// a record, when it lists a field twice, when an annotated field has no
/// scalar kind, or when two fields claim the same column.
pub fn resolve_schema(descriptor: &TypeDescriptor) -> Result<Schema, MappingError> {
    let record = descriptor
        .as_record()
        .ok_or_else(|| MappingError::NotARecordType {
            type_name: descriptor.type_name().to_string(),
        })?;

    let mut entries = Vec::new();
    let mut claimed: HashMap<&str, &str> = HashMap::new();
    let mut declared: HashSet<&str> = HashSet::new();

    for field in &record.fields {
        if !declared.insert(field.ident.as_str()) {
            return Err(MappingError::DuplicateField {
                type_name: record.name.clone(),
                field: field.ident.clone(),
            });
        }

        let Some(column) = field.column() else {
            continue;
        };

        let kind = field
            .kind
            .ok_or_else(|| MappingError::UnsupportedFieldKind {
                field: field.ident.clone(),
                kind: field.type_name.clone(),
            })?;

        if let Some(first) = claimed.insert(column, field.ident.as_str()) {
            return Err(MappingError::DuplicateColumnMapping {
                column: column.to_string(),
                first: first.to_string(),
                second: field.ident.clone(),
            });
        }

        entries.push(SchemaEntry {
            field: field.ident.clone(),
            column: column.to_string(),
            kind,
        });
    }

    Ok(Schema {
        type_name: record.name.clone(),
        entries,
    })
}
