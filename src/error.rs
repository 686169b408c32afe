//! Error taxonomy for form operations.

use thiserror::Error;

/// Errors surfaced by schema construction and controller transitions.
///
/// All variants are recoverable; the controller maps them onto its
/// status line rather than propagating them to the UI shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Selected form type has no entry in the schema table.
    #[error("no schema named '{name}'")]
    SchemaNotFound { name: String },

    /// One or more required fields were empty at submit time.
    #[error("required fields missing: {}", missing.join(", "))]
    ValidationFailed { missing: Vec<String> },

    /// Edit/delete index outside the submitted-records list.
    #[error("record index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A schema was declared with two fields of the same name.
    #[error("schema '{schema}' declares field '{field}' more than once")]
    DuplicateField { schema: String, field: String },
}
