//! Script parser and runner for form events.
//!
//! Script format (one event per line):
//! ```text
//! # fill in and submit a user record
//! SELECT "User Information"
//! SET firstName "Ada"
//! SET lastName "Lovelace"
//! SUBMIT
//! SHOW
//! ```
//!
//! Supported commands:
//! - `SELECT "name"` - Pick a form type (`SELECT ""` clears the form)
//! - `SET field "value"` - Edit one field of the draft
//! - `SUBMIT` - Validate and finalize the draft
//! - `EDIT n` - Recall submitted record n into the draft
//! - `DELETE n` - Remove submitted record n
//! - `SHOW` - Append a dump of the current state to the transcript
//! - Lines starting with `#` are comments
//!
//! Recoverable conditions (unknown form type, failed validation) are
//! logged in the transcript the way the UI shows them on its status
//! line. Out-of-range `EDIT`/`DELETE` indices are script bugs and abort
//! the run.

use crate::controller::FormController;
use crate::schema::{Schema, SchemaTable};

/// Parsed script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// SELECT "name" - form-type dropdown change
    Select { name: String },
    /// SET field "value" - field edit
    Set { field: String, value: String },
    /// SUBMIT - validate and finalize
    Submit,
    /// EDIT n - recall record n for editing
    Edit { index: usize },
    /// DELETE n - remove record n
    Delete { index: usize },
    /// SHOW - dump current state
    Show,
}

impl Command {
    /// Command name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Select { .. } => "SELECT",
            Command::Set { .. } => "SET",
            Command::Submit => "SUBMIT",
            Command::Edit { .. } => "EDIT",
            Command::Delete { .. } => "DELETE",
            Command::Show => "SHOW",
        }
    }
}

/// Run a script against a fresh controller over the given table.
///
/// Returns (transcript, submitted_record_count) on success.
pub fn run_script(script_text: &str, table: &SchemaTable) -> Result<(String, usize), String> {
    let commands = parse_commands(script_text)?;
    let mut controller = FormController::new(table.clone());
    let mut transcript = Vec::new();

    for cmd in &commands {
        match cmd {
            Command::Select { name } => {
                let result = controller.select_form_type(name);
                let line = if name.is_empty() {
                    "SELECT: form cleared".to_string()
                } else if result.is_ok() {
                    format!(
                        "SELECT: loaded '{}' ({} fields)",
                        name,
                        controller.active_schema().map_or(0, Schema::len)
                    )
                } else {
                    format!("SELECT: {}", controller.status().text().unwrap_or(""))
                };
                transcript.push(line);
            }
            Command::Set { field, value } => {
                controller.update_field(field, value);
                transcript.push(format!(
                    "SET {} = \"{}\" (progress {:.1}%)",
                    field,
                    value,
                    controller.progress()
                ));
            }
            Command::Submit => {
                // Success and validation failure both land on the status
                // line; neither ends the script.
                let _ = controller.submit();
                transcript.push(format!(
                    "SUBMIT: {}",
                    controller.status().text().unwrap_or("")
                ));
            }
            Command::Edit { index } => {
                controller.edit_recall(*index).map_err(|e| e.to_string())?;
                transcript.push(format!(
                    "EDIT {}: recalled '{}'",
                    index,
                    controller.active_schema().map_or("", Schema::name)
                ));
            }
            Command::Delete { index } => {
                controller.delete_record(*index).map_err(|e| e.to_string())?;
                transcript.push(format!(
                    "DELETE {}: {}",
                    index,
                    controller.status().text().unwrap_or("")
                ));
            }
            Command::Show => transcript.push(render_state(&controller)),
        }
    }

    let count = controller.submitted().len();
    Ok((transcript.join("\n"), count))
}

/// Dump the controller state: active form with draft values, submitted
/// records in their own schemas' field order, and the status line.
fn render_state(c: &FormController) -> String {
    let mut out = String::from("--- state ---\n");

    match c.active_schema() {
        Some(schema) => {
            out.push_str(&format!(
                "form: {} (progress {:.1}%)\n",
                schema.name(),
                c.progress()
            ));
            for field in schema.fields() {
                out.push_str(&format!(
                    "  {} = \"{}\"\n",
                    field.name,
                    c.draft_value(&field.name)
                ));
            }
        }
        None => out.push_str("form: (none)\n"),
    }

    out.push_str(&format!("records: {}\n", c.submitted().len()));
    for (i, record) in c.submitted().iter().enumerate() {
        let fields = record
            .schema()
            .fields()
            .iter()
            .map(|f| format!("{}=\"{}\"", f.name, record.value(&f.name)))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("  [{}] {}: {}\n", i, record.schema().name(), fields));
    }

    match c.status().text() {
        Some(msg) => out.push_str(&format!("status: {}", msg)),
        None => out.push_str("status: (none)"),
    }
    out
}

/// Parse script text into commands.
pub fn parse_commands(text: &str) -> Result<Vec<Command>, String> {
    let mut commands = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let cmd = parse_command(line).map_err(|e| format!("Line {}: {}", line_num + 1, e))?;
        commands.push(cmd);
    }

    Ok(commands)
}

/// Parse a single command line.
fn parse_command(line: &str) -> Result<Command, String> {
    let upper = line.to_uppercase();

    if upper.starts_with("SELECT") {
        parse_select(line)
    } else if upper.starts_with("SET") {
        parse_set(line)
    } else if upper == "SUBMIT" {
        Ok(Command::Submit)
    } else if upper.starts_with("EDIT") {
        let index = parse_index(line[4..].trim(), "EDIT")?;
        Ok(Command::Edit { index })
    } else if upper.starts_with("DELETE") {
        let index = parse_index(line[6..].trim(), "DELETE")?;
        Ok(Command::Delete { index })
    } else if upper == "SHOW" {
        Ok(Command::Show)
    } else {
        Err(format!(
            "Unknown command: {}",
            line.split_whitespace().next().unwrap_or(line)
        ))
    }
}

/// Parse SELECT command: the form-type name is a quoted string.
fn parse_select(line: &str) -> Result<Command, String> {
    let rest = line[6..].trim(); // Skip "SELECT"
    if rest.is_empty() {
        return Err("SELECT requires a quoted form-type name".to_string());
    }
    let (name, _) = parse_delimited_string(rest)?;
    Ok(Command::Select { name })
}

/// Parse SET command: bare field name followed by a quoted value.
fn parse_set(line: &str) -> Result<Command, String> {
    let rest = line[3..].trim(); // Skip "SET"

    let Some((field, value_part)) = rest.split_once(char::is_whitespace) else {
        return Err("SET requires a field name and a quoted value".to_string());
    };

    let (value, _) = parse_delimited_string(value_part)?;
    Ok(Command::Set {
        field: field.to_string(),
        value,
    })
}

fn parse_index(rest: &str, cmd: &str) -> Result<usize, String> {
    rest.parse()
        .map_err(|_| format!("{} requires a record index", cmd))
}

/// Parse a delimited string: the first non-blank character is the
/// delimiter and the string runs to its next occurrence.
/// Returns (extracted_string, rest_of_input).
fn parse_delimited_string(s: &str) -> Result<(String, &str), String> {
    let s = s.trim_start();
    if s.is_empty() {
        return Err("Expected delimited string".to_string());
    }

    let delim = s.chars().next().unwrap();
    let after_delim = &s[delim.len_utf8()..];

    if let Some(end) = after_delim.find(delim) {
        let extracted = after_delim[..end].to_string();
        let rest = &after_delim[end + delim.len_utf8()..];
        Ok((extracted, rest))
    } else {
        Err(format!("Unclosed delimiter '{}'", delim))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select() {
        let cmd = parse_command(r#"SELECT "User Information""#).unwrap();
        match cmd {
            Command::Select { name } => assert_eq!(name, "User Information"),
            _ => panic!("Expected Select"),
        }
    }

    #[test]
    fn test_parse_select_empty() {
        let cmd = parse_command(r#"SELECT """#).unwrap();
        assert_eq!(
            cmd,
            Command::Select {
                name: String::new()
            }
        );
    }

    #[test]
    fn test_parse_set() {
        let cmd = parse_command(r#"SET firstName "Ada""#).unwrap();
        match cmd {
            Command::Set { field, value } => {
                assert_eq!(field, "firstName");
                assert_eq!(value, "Ada");
            }
            _ => panic!("Expected Set"),
        }
    }

    #[test]
    fn test_parse_set_value_with_spaces() {
        let cmd = parse_command(r#"SET street "12 Grimmauld Place""#).unwrap();
        match cmd {
            Command::Set { value, .. } => assert_eq!(value, "12 Grimmauld Place"),
            _ => panic!("Expected Set"),
        }
    }

    #[test]
    fn test_parse_edit_and_delete() {
        assert_eq!(parse_command("EDIT 0").unwrap(), Command::Edit { index: 0 });
        assert_eq!(
            parse_command("DELETE 2").unwrap(),
            Command::Delete { index: 2 }
        );
        assert!(parse_command("EDIT x").is_err());
    }

    #[test]
    fn test_parse_unknown_command_reports_line() {
        let err = parse_commands("SUBMIT\nFROBNICATE 1\n").unwrap_err();
        assert!(err.contains("Line 2"));
        assert!(err.contains("FROBNICATE"));
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let commands = parse_commands("# a comment\n\nSUBMIT\n").unwrap();
        assert_eq!(commands, vec![Command::Submit]);
    }

    #[test]
    fn test_run_submit_scenario() {
        let script = r#"
# submit a complete user record
SELECT "User Information"
SET firstName "Ada"
SET lastName "Lovelace"
SUBMIT
"#;
        let (transcript, count) = run_script(script, &SchemaTable::builtin()).unwrap();
        assert_eq!(count, 1);
        assert!(transcript.contains("SELECT: loaded 'User Information' (3 fields)"));
        assert!(transcript.contains("progress 33.3%"));
        assert!(transcript.contains("progress 66.7%"));
        assert!(transcript.contains("SUBMIT: Form submitted successfully!"));
    }

    #[test]
    fn test_run_validation_failure_is_logged_not_fatal() {
        let script = r#"
SELECT "User Information"
SET firstName "Ada"
SUBMIT
SET lastName "Lovelace"
SUBMIT
"#;
        let (transcript, count) = run_script(script, &SchemaTable::builtin()).unwrap();
        assert_eq!(count, 1);
        assert!(transcript.contains("SUBMIT: Please fill in all required fields."));
        assert!(transcript.contains("SUBMIT: Form submitted successfully!"));
    }

    #[test]
    fn test_run_edit_and_delete() {
        let script = r#"
SELECT "User Information"
SET firstName "Ada"
SET lastName "Lovelace"
SUBMIT
SELECT "User Information"
SET firstName "Grace"
SET lastName "Hopper"
SUBMIT
EDIT 0
DELETE 0
SHOW
"#;
        let (transcript, count) = run_script(script, &SchemaTable::builtin()).unwrap();
        // One record recalled into the draft, the other deleted.
        assert_eq!(count, 0);
        assert!(transcript.contains("EDIT 0: recalled 'User Information'"));
        assert!(transcript.contains("DELETE 0: Entry deleted successfully."));
        assert!(transcript.contains("form: User Information"));
        assert!(transcript.contains("firstName = \"Ada\""));
    }

    #[test]
    fn test_run_unknown_form_type_logged() {
        let script = r#"SELECT "Tax Information""#;
        let (transcript, count) = run_script(script, &SchemaTable::builtin()).unwrap();
        assert_eq!(count, 0);
        assert!(transcript.contains("Error loading form fields. Please try again."));
    }

    #[test]
    fn test_run_out_of_range_index_aborts() {
        let err = run_script("DELETE 5\n", &SchemaTable::builtin()).unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn test_run_script_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "SELECT \"User Information\"\nSET firstName \"Ada\"\nSET lastName \"Lovelace\"\nSUBMIT\n"
        )
        .unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        let (_, count) = run_script(&text, &SchemaTable::builtin()).unwrap();
        assert_eq!(count, 1);
    }
}
