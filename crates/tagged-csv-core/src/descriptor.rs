//! Record type descriptors.
//!
//! A descriptor is the static field table of one record type: every field in
//! declaration order, its Rust type, its scalar kind when it has one, and its
//! column annotation. `#[derive(CsvRecord)]` builds one per struct on first
//! use; hand-written [`Record`] impls use [`RecordDescriptor::builder`]; tools
//! that work without a Rust type load one from YAML.
//!
//! ## YAML Format
//!
//! ```yaml
//! name: Person
//! fields:
//!   - field: name
//!     kind: text
//!     column: name
//!   - field: active
//!     kind: bool
//!     column: active
//!   - field: notes        # no column: never read or written
//! ```

use crate::types::ScalarKind;
use crate::values::FieldValue;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for loading descriptor files.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// Error reading descriptor file
    #[error("Failed to read descriptor file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One field of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field identifier
    #[serde(rename = "field")]
    pub ident: String,

    /// Rust type as written in the struct
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub type_name: String,

    /// Scalar kind, if the field's type is one of the supported scalars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ScalarKind>,

    /// Column annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl FieldDescriptor {
    /// An annotated scalar field.
    pub fn annotated(
        ident: impl Into<String>,
        type_name: impl Into<String>,
        kind: ScalarKind,
        column: impl Into<String>,
    ) -> Self {
        Self {
            ident: ident.into(),
            type_name: type_name.into(),
            kind: Some(kind),
            column: Some(column.into()),
        }
    }

    /// A field without a column annotation.
    pub fn unannotated(ident: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            type_name: type_name.into(),
            kind: None,
            column: None,
        }
    }

    /// The column annotation, treating an empty annotation as absent.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref().filter(|c| !c.is_empty())
    }
}

/// Field table of a struct with named fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    /// Type name
    pub name: String,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    /// Start building a descriptor for the named type.
    pub fn builder(name: impl Into<String>) -> RecordDescriptorBuilder {
        RecordDescriptorBuilder {
            descriptor: RecordDescriptor {
                name: name.into(),
                fields: Vec::new(),
            },
        }
    }

    /// Load a descriptor from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DescriptorError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a descriptor from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Get a field by identifier.
    pub fn get_field(&self, ident: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.ident == ident)
    }
}

/// Builder returned by [`RecordDescriptor::builder`].
#[derive(Debug, Clone)]
pub struct RecordDescriptorBuilder {
    descriptor: RecordDescriptor,
}

impl RecordDescriptorBuilder {
    /// Append an annotated field whose Rust type is named after its kind.
    pub fn column(self, ident: impl Into<String>, column: impl Into<String>, kind: ScalarKind) -> Self {
        self.field(FieldDescriptor::annotated(ident, kind.name(), kind, column))
    }

    /// Append an unannotated field.
    pub fn skip(self, ident: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.field(FieldDescriptor::unannotated(ident, type_name))
    }

    /// Append a field descriptor as is.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.descriptor.fields.push(field);
        self
    }

    /// Finish the descriptor.
    pub fn build(self) -> RecordDescriptor {
        self.descriptor
    }
}

/// Description of a type handed to the tag resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// A struct with named fields
    Record(RecordDescriptor),

    /// A bare scalar; cannot be mapped to columns
    Scalar { type_name: String, kind: ScalarKind },
}

impl TypeDescriptor {
    /// Name of the described type.
    pub fn type_name(&self) -> &str {
        match self {
            TypeDescriptor::Record(record) => &record.name,
            TypeDescriptor::Scalar { type_name, .. } => type_name,
        }
    }

    /// The record field table, if this is a record type.
    pub fn as_record(&self) -> Option<&RecordDescriptor> {
        match self {
            TypeDescriptor::Record(record) => Some(record),
            TypeDescriptor::Scalar { .. } => None,
        }
    }
}

impl From<RecordDescriptor> for TypeDescriptor {
    fn from(record: RecordDescriptor) -> Self {
        TypeDescriptor::Record(record)
    }
}

/// A struct whose annotated fields map to CSV columns.
///
/// Usually implemented with `#[derive(CsvRecord)]`. Decoding starts from
/// `Default::default()` and assigns every bound field, so fields without a
/// column keep their default value.
pub trait Record: Default {
    /// The field table for this type, built once and cached.
    fn descriptor() -> &'static TypeDescriptor;

    /// Current value of an annotated field, `None` for anything else.
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Assign an annotated field; the value is handed back if the field is
    /// unknown or cannot hold it.
    fn set_field_value(&mut self, field: &str, value: FieldValue) -> Result<(), FieldValue>;
}
