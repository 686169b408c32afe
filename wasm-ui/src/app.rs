//! Main application component.

use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, HtmlAnchorElement, Url};
use yew::prelude::*;

use dynaform_rs::{FormController, SubmittedRecord};

use crate::components::{
    Footer, FormPanel, Header, ProgressBar, RecordsTable, SchemaSelect, StatusLine,
};

/// How long a success confirmation stays on screen.
const SUCCESS_DISMISS_MS: u32 = 4000;

/// Flatten submitted records into long-format CSV (form, field, value),
/// one row per field in the record's own schema order.
fn records_to_csv(records: &[SubmittedRecord]) -> String {
    let mut out = String::from("form,field,value\n");
    for record in records {
        for field in record.schema().fields() {
            out.push_str(&format!(
                "{},{},{}\n",
                csv_escape(record.schema().name()),
                csv_escape(&field.name),
                csv_escape(record.value(&field.name))
            ));
        }
    }
    out
}

fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Main application component: Header, form controller, Footer.
#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(FormController::builtin);

    let on_select = {
        let state = state.clone();
        Callback::from(move |name: String| {
            let mut form = (*state).clone();
            // An unknown name surfaces on the controller's status line.
            let _ = form.select_form_type(&name);
            state.set(form);
        })
    };

    let on_field_change = {
        let state = state.clone();
        Callback::from(move |(name, value): (String, String)| {
            let mut form = (*state).clone();
            form.update_field(&name, &value);
            state.set(form);
        })
    };

    let on_submit = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            let mut form = (*state).clone();
            // Validation failure lands on the status line; the draft stays.
            let _ = form.submit();
            state.set(form);
        })
    };

    let on_edit = {
        let state = state.clone();
        Callback::from(move |index: usize| {
            let mut form = (*state).clone();
            // Indices come from the current render, so they are in range.
            let _ = form.edit_recall(index);
            state.set(form);
        })
    };

    let on_delete = {
        let state = state.clone();
        Callback::from(move |index: usize| {
            let mut form = (*state).clone();
            let _ = form.delete_record(index);
            state.set(form);
        })
    };

    let on_export = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            let csv = records_to_csv(state.submitted());
            let array = js_sys::Array::new();
            array.push(&JsValue::from_str(&csv));

            let blob = Blob::new_with_str_sequence(&array).unwrap();
            let url = Url::create_object_url_with_blob(&blob).unwrap();

            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let anchor: HtmlAnchorElement =
                document.create_element("a").unwrap().dyn_into().unwrap();

            anchor.set_href(&url);
            anchor.set_download("records.csv");
            anchor.click();

            let _ = Url::revoke_object_url(&url);
        })
    };

    // Auto-dismiss the success confirmation after a few seconds. A new
    // status (or unmount) cancels the pending timeout.
    {
        let state = state.clone();
        let status = state.status();
        use_effect_with(status, move |status| {
            let timeout_handle: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

            if status.is_success() {
                let state = state.clone();
                let handle = Timeout::new(SUCCESS_DISMISS_MS, move || {
                    let mut form = (*state).clone();
                    form.clear_status();
                    state.set(form);
                });
                *timeout_handle.borrow_mut() = Some(handle);
            }

            let cleanup_handle = timeout_handle.clone();
            move || {
                if let Some(handle) = cleanup_handle.borrow_mut().take() {
                    handle.cancel();
                }
            }
        });
    }

    let names: Vec<String> = state.table().names().map(str::to_string).collect();
    let selected = state
        .active_schema()
        .map(|s| s.name().to_string())
        .unwrap_or_default();

    let form_panel = state.active_schema().map(|schema| {
        let values: Vec<String> = schema
            .fields()
            .iter()
            .map(|f| state.draft_value(&f.name).to_string())
            .collect();
        html! {
            <FormPanel
                schema={schema.clone()}
                values={values}
                on_field_change={on_field_change.clone()}
                on_submit={on_submit.clone()}
            />
        }
    });

    html! {
        <div class="app">
            <Header />

            <main class="main">
                <div class="dynamic-form">
                    <SchemaSelect
                        names={names}
                        selected={selected}
                        on_select={on_select}
                    />

                    { form_panel.unwrap_or_default() }

                    <ProgressBar percent={state.progress()} />

                    <StatusLine status={state.status()} />

                    <RecordsTable
                        schema={state.active_schema().cloned()}
                        records={state.submitted().to_vec()}
                        on_edit={on_edit}
                        on_delete={on_delete}
                        on_export={on_export}
                    />
                </div>
            </main>

            <Footer />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::{csv_escape, records_to_csv};
    use dynaform_rs::FormController;

    #[test]
    fn test_records_to_csv_long_format() {
        let mut form = FormController::builtin();
        form.select_form_type("User Information").unwrap();
        form.update_field("firstName", "Ada");
        form.update_field("lastName", "Lovelace");
        form.submit().unwrap();

        let csv = records_to_csv(form.submitted());
        assert!(csv.starts_with("form,field,value\n"));
        assert!(csv.contains("User Information,firstName,Ada\n"));
        // Optional field left blank still gets a row.
        assert!(csv.contains("User Information,age,\n"));
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
