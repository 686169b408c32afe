//! Dynamic form controller: the state machine behind the UI.
//!
//! All mutable state lives here so the browser front end, the CLI
//! runner, and tests drive the exact same transitions. Every transition
//! is synchronous and runs to completion; recoverable failures are
//! reported on the status line rather than propagated to the shell.

use std::collections::BTreeMap;

use crate::error::FormError;
use crate::schema::{Schema, SchemaTable};

/// Status line after a successful submit.
pub const MSG_SUBMITTED: &str = "Form submitted successfully!";
/// Status line when a required field is empty at submit time.
pub const MSG_REQUIRED: &str = "Please fill in all required fields.";
/// Status line after deleting a submitted record.
pub const MSG_DELETED: &str = "Entry deleted successfully.";
/// Status line when the selected form type has no schema.
pub const MSG_LOAD_ERROR: &str = "Error loading form fields. Please try again.";

/// Single status slot: success and error are mutually exclusive by
/// construction, so the UI can never show both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusMessage {
    #[default]
    None,
    Success(&'static str),
    Error(&'static str),
}

impl StatusMessage {
    pub fn text(&self) -> Option<&'static str> {
        match *self {
            StatusMessage::None => None,
            StatusMessage::Success(msg) | StatusMessage::Error(msg) => Some(msg),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StatusMessage::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error(_))
    }
}

/// Finalized form values, tagged with the schema they were submitted
/// under so editing can restore the exact field set.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedRecord {
    schema: Schema,
    values: BTreeMap<String, String>,
}

impl SubmittedRecord {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Value for a field name; empty string when the field was left blank.
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// Owns the whole UI state and exposes one method per user event.
#[derive(Debug, Clone, PartialEq)]
pub struct FormController {
    table: SchemaTable,
    active_schema: Option<Schema>,
    draft: BTreeMap<String, String>,
    submitted: Vec<SubmittedRecord>,
    progress: f64,
    status: StatusMessage,
}

impl FormController {
    pub fn new(table: SchemaTable) -> Self {
        Self {
            table,
            active_schema: None,
            draft: BTreeMap::new(),
            submitted: Vec::new(),
            progress: 0.0,
            status: StatusMessage::None,
        }
    }

    /// Controller over the built-in schema table.
    pub fn builtin() -> Self {
        Self::new(SchemaTable::builtin())
    }

    pub fn table(&self) -> &SchemaTable {
        &self.table
    }

    pub fn active_schema(&self) -> Option<&Schema> {
        self.active_schema.as_ref()
    }

    /// Current draft value for a field; empty string when unset.
    pub fn draft_value(&self, name: &str) -> &str {
        self.draft.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn submitted(&self) -> &[SubmittedRecord] {
        &self.submitted
    }

    /// Draft completeness in [0, 100].
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn status(&self) -> StatusMessage {
        self.status
    }

    /// Clear the status line (for timed dismissal of messages).
    pub fn clear_status(&mut self) {
        self.status = StatusMessage::None;
    }

    /// Form-type dropdown change.
    ///
    /// An empty name resets to the initial state. A known name loads its
    /// schema with a fresh draft; a prior error is cleared but a prior
    /// success message stays visible. An unknown name sets the load
    /// error and leaves everything else untouched.
    pub fn select_form_type(&mut self, name: &str) -> Result<(), FormError> {
        if name.is_empty() {
            self.active_schema = None;
            self.draft.clear();
            self.progress = 0.0;
            self.status = StatusMessage::None;
            return Ok(());
        }

        match self.table.lookup(name) {
            Some(schema) => {
                self.active_schema = Some(schema.clone());
                self.draft.clear();
                self.progress = 0.0;
                if self.status.is_error() {
                    self.status = StatusMessage::None;
                }
                Ok(())
            }
            None => {
                self.status = StatusMessage::Error(MSG_LOAD_ERROR);
                Err(FormError::SchemaNotFound {
                    name: name.to_string(),
                })
            }
        }
    }

    /// Field edit: store the value and recompute progress.
    pub fn update_field(&mut self, name: &str, value: &str) {
        self.draft.insert(name.to_string(), value.to_string());
        self.recompute_progress();
    }

    /// Validate and finalize the draft.
    ///
    /// On success the draft becomes a `SubmittedRecord` tagged with the
    /// active schema, and the form resets for the next entry. On failure
    /// only the status line changes; the draft is preserved so the user
    /// can correct and resubmit.
    pub fn submit(&mut self) -> Result<(), FormError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            self.status = StatusMessage::Error(MSG_REQUIRED);
            return Err(FormError::ValidationFailed { missing });
        }

        let schema = self.active_schema.take().unwrap_or_else(Schema::empty);
        let values = std::mem::take(&mut self.draft);
        self.submitted.push(SubmittedRecord { schema, values });
        self.progress = 0.0;
        self.status = StatusMessage::Success(MSG_SUBMITTED);
        Ok(())
    }

    /// Move a submitted record back into the draft for editing.
    ///
    /// Restores the schema the record was submitted under, so a record
    /// edited after the selector moved on still shows its own fields.
    pub fn edit_recall(&mut self, index: usize) -> Result<(), FormError> {
        if index >= self.submitted.len() {
            return Err(FormError::IndexOutOfRange {
                index,
                len: self.submitted.len(),
            });
        }

        let record = self.submitted.remove(index);
        self.active_schema = Some(record.schema);
        self.draft = record.values;
        self.recompute_progress();
        Ok(())
    }

    /// Remove a submitted record; later records shift down by one.
    pub fn delete_record(&mut self, index: usize) -> Result<(), FormError> {
        if index >= self.submitted.len() {
            return Err(FormError::IndexOutOfRange {
                index,
                len: self.submitted.len(),
            });
        }

        self.submitted.remove(index);
        self.status = StatusMessage::Success(MSG_DELETED);
        Ok(())
    }

    /// Required fields of the active schema with no non-empty draft value.
    fn missing_required(&self) -> Vec<String> {
        let Some(schema) = &self.active_schema else {
            return Vec::new();
        };
        schema
            .fields()
            .iter()
            .filter(|f| f.required && self.draft_value(&f.name).is_empty())
            .map(|f| f.name.clone())
            .collect()
    }

    // Progress is filled-field count over schema field count. Only the
    // active schema's own fields count, so stray draft keys cannot push
    // it past 100. An absent or empty schema reports 0% (the
    // denominator would be zero).
    fn recompute_progress(&mut self) {
        let (filled, total) = match &self.active_schema {
            Some(schema) => {
                let filled = schema
                    .fields()
                    .iter()
                    .filter(|f| !self.draft_value(&f.name).is_empty())
                    .count();
                (filled, schema.len())
            }
            None => (0, 0),
        };
        self.progress = if total == 0 {
            0.0
        } else {
            filled as f64 / total as f64 * 100.0
        };
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::builtin()
    }
}
