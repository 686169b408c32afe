//! # dynaform-rs
//!
//! A schema-driven dynamic form state machine.
//!
//! A form "type" is selected from a table of schemas, a draft is filled
//! in field by field, and submitted entries are kept as an ordered list
//! of records that can be recalled for editing or deleted. All state
//! lives in a single [`FormController`]; every transition is synchronous
//! and runs to completion.
//!
//! The controller is UI-agnostic: the `wasm-ui` workspace member renders
//! it in the browser, and the `form-run` binary replays scripted event
//! sequences against it headlessly.
//!
//! ## Example
//!
//! ```
//! use dynaform_rs::FormController;
//!
//! let mut form = FormController::builtin();
//! form.select_form_type("User Information").unwrap();
//! form.update_field("firstName", "Ada");
//! form.update_field("lastName", "Lovelace");
//! form.submit().unwrap();
//!
//! assert_eq!(form.submitted().len(), 1);
//! assert_eq!(form.submitted()[0].value("firstName"), "Ada");
//! ```

pub mod controller;
pub mod error;
pub mod schema;
pub mod script;

pub use controller::{
    FormController, MSG_DELETED, MSG_LOAD_ERROR, MSG_REQUIRED, MSG_SUBMITTED, StatusMessage,
    SubmittedRecord,
};
pub use error::FormError;
pub use schema::{FieldDescriptor, FieldKind, Schema, SchemaTable};
pub use script::{Command, parse_commands, run_script};
