//! UI components for the dynamic form demo.

use dynaform_rs::{FieldDescriptor, FieldKind, Schema, StatusMessage, SubmittedRecord};
use yew::prelude::*;

/// Static page header.
#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="header">
            <div class="header-left">
                <h1>{ "Dynamic Form" }</h1>
                <p class="subtitle">{ "Schema-Driven Form Renderer" }</p>
            </div>
        </header>
    }
}

/// Static page footer with the build stamp.
#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="footer">
            <div class="footer-row">
                <span>{ "In-memory demo | No backend, no persistence" }</span>
            </div>
            <div class="footer-row">
                <span class="footer-left">{ "MIT License" }</span>
                <span class="footer-build">
                    { format!("Build: {}@{} {}", env!("BUILD_HOST"), env!("BUILD_COMMIT"), env!("BUILD_TIMESTAMP")) }
                </span>
            </div>
        </footer>
    }
}

/// Form-type selector.
#[derive(Properties, PartialEq)]
pub struct SchemaSelectProps {
    /// Form-type names from the schema table, in table order.
    pub names: Vec<String>,
    /// Currently active form type; empty when none is selected.
    pub selected: String,
    pub on_select: Callback<String>,
}

#[function_component(SchemaSelect)]
pub fn schema_select(props: &SchemaSelectProps) -> Html {
    let on_change = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let target: web_sys::HtmlSelectElement = e.target_unchecked_into();
            on_select.emit(target.value());
        })
    };

    html! {
        <select class="schema-select" onchange={on_change}>
            <option value="" selected={props.selected.is_empty()}>{ "Select Form Type" }</option>
            { for props.names.iter().map(|name| {
                html! {
                    <option value={name.clone()} selected={*name == props.selected}>
                        { name }
                    </option>
                }
            })}
        </select>
    }
}

/// One labeled input, type-mapped from the field descriptor.
#[derive(Properties, PartialEq)]
pub struct FieldInputProps {
    pub field: FieldDescriptor,
    pub value: String,
    /// Emits (field name, new value).
    pub on_change: Callback<(String, String)>,
}

#[function_component(FieldInput)]
pub fn field_input(props: &FieldInputProps) -> Html {
    let name = props.field.name.clone();

    let on_input = {
        let on_change = props.on_change.clone();
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let target: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_change.emit((name.clone(), target.value()));
        })
    };

    let on_select = {
        let on_change = props.on_change.clone();
        let name = name.clone();
        Callback::from(move |e: Event| {
            let target: web_sys::HtmlSelectElement = e.target_unchecked_into();
            on_change.emit((name.clone(), target.value()));
        })
    };

    html! {
        <div class="form-group">
            <label>{ &props.field.label }</label>
            if props.field.kind == FieldKind::Dropdown {
                <select
                    name={name.clone()}
                    required={props.field.required}
                    onchange={on_select}
                >
                    <option value="" selected={props.value.is_empty()}>{ "Select" }</option>
                    { for props.field.options.iter().map(|option| {
                        html! {
                            <option value={option.clone()} selected={*option == props.value}>
                                { option }
                            </option>
                        }
                    })}
                </select>
            } else {
                <input
                    type={props.field.kind.input_type().unwrap_or("text")}
                    name={name}
                    required={props.field.required}
                    value={props.value.clone()}
                    oninput={on_input}
                />
            }
        </div>
    }
}

/// The generated form: one input per field of the active schema.
#[derive(Properties, PartialEq)]
pub struct FormPanelProps {
    pub schema: Schema,
    /// Draft values, parallel to the schema's fields.
    pub values: Vec<String>,
    pub on_field_change: Callback<(String, String)>,
    pub on_submit: Callback<()>,
}

#[function_component(FormPanel)]
pub fn form_panel(props: &FormPanelProps) -> Html {
    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
        <form class="form-panel" onsubmit={on_submit}>
            { for props.schema.fields().iter().zip(props.values.iter()).map(|(field, value)| {
                html! {
                    <FieldInput
                        key={field.name.clone()}
                        field={field.clone()}
                        value={value.clone()}
                        on_change={props.on_field_change.clone()}
                    />
                }
            })}
            <button type="submit" class="submit-button">{ "Submit" }</button>
        </form>
    }
}

/// Proportional fill from draft completeness.
#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    /// Percentage in [0, 100].
    pub percent: f64,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    html! {
        <div class="progress-track">
            <div class="progress-bar" style={format!("width: {}%", props.percent)}></div>
        </div>
    }
}

/// Single status slot: success or error, never both.
#[derive(Properties, PartialEq)]
pub struct StatusLineProps {
    pub status: StatusMessage,
}

#[function_component(StatusLine)]
pub fn status_line(props: &StatusLineProps) -> Html {
    match props.status {
        StatusMessage::Success(msg) => html! { <p class="success-message">{ msg }</p> },
        StatusMessage::Error(msg) => html! { <p class="error-message">{ msg }</p> },
        StatusMessage::None => html! {},
    }
}

/// Submitted-records table with per-row actions.
///
/// Columns come from the schema active at render time, so a record
/// submitted under a different form type shows blank cells for columns
/// its schema does not have.
#[derive(Properties, PartialEq)]
pub struct RecordsTableProps {
    /// Active schema, if any; drives the column set.
    pub schema: Option<Schema>,
    pub records: Vec<SubmittedRecord>,
    pub on_edit: Callback<usize>,
    pub on_delete: Callback<usize>,
    pub on_export: Callback<()>,
}

#[function_component(RecordsTable)]
pub fn records_table(props: &RecordsTableProps) -> Html {
    let columns: Vec<&FieldDescriptor> = props
        .schema
        .as_ref()
        .map(|s| s.fields().iter().collect())
        .unwrap_or_default();

    let on_export_click = {
        let on_export = props.on_export.clone();
        Callback::from(move |_: MouseEvent| {
            on_export.emit(());
        })
    };

    html! {
        <div class="records-panel">
            <div class="panel-header">
                <h2>{ "Submitted Entries" }</h2>
                if !props.records.is_empty() {
                    <button class="export-button" onclick={on_export_click}>
                        { "Export CSV" }
                    </button>
                }
            </div>
            <table class="records-table">
                <thead>
                    <tr>
                        { for columns.iter().map(|field| {
                            html! { <th key={field.name.clone()}>{ &field.label }</th> }
                        })}
                        <th>{ "Actions" }</th>
                    </tr>
                </thead>
                <tbody>
                    { for props.records.iter().enumerate().map(|(index, record)| {
                        let on_edit = {
                            let on_edit = props.on_edit.clone();
                            Callback::from(move |_: MouseEvent| on_edit.emit(index))
                        };
                        let on_delete = {
                            let on_delete = props.on_delete.clone();
                            Callback::from(move |_: MouseEvent| on_delete.emit(index))
                        };
                        html! {
                            <tr key={index.to_string()}>
                                { for columns.iter().map(|field| {
                                    html! { <td key={field.name.clone()}>{ record.value(&field.name) }</td> }
                                })}
                                <td>
                                    <button class="edit-button" onclick={on_edit}>{ "Edit" }</button>
                                    <button class="delete-button" onclick={on_delete}>{ "Delete" }</button>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}
