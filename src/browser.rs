//! Browser Access
//!
//! Reads the page inputs `update` needs and performs the few imperative
//! DOM touches the view cannot express (focus, clearing the input).

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::config::Config;
use crate::env::{EditField, Env};

pub const NEW_TODO_ID: &str = "new-todo";
const EDIT_SELECTOR: &str = ".edit";
const CONFIG_SELECTOR: &str = "meta[name=\"todo-config\"]";

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("JS error: {0}")]
    Js(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<wasm_bindgen::JsValue> for BrowserError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        BrowserError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub fn window() -> Result<web_sys::Window, BrowserError> {
    web_sys::window().ok_or(BrowserError::NoWindow)
}

pub fn document() -> Result<Document, BrowserError> {
    window()?.document().ok_or(BrowserError::NoDocument)
}

/// Snapshot the page for one dispatch
pub fn read_env(double_click_ms: f64) -> Result<Env, BrowserError> {
    let window = window()?;
    let document = window.document().ok_or(BrowserError::NoDocument)?;

    Ok(Env {
        input: new_todo_input(&document).map(|i| i.value()).unwrap_or_default(),
        edit: open_edit_field(&document)?,
        hash: window.location().hash()?,
        now: js_sys::Date::now(),
        double_click_ms,
    })
}

pub fn new_todo_input(document: &Document) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(NEW_TODO_ID)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

/// The `.edit` field, if an item is being edited. Its element id is the
/// item id.
fn open_edit_field(document: &Document) -> Result<Option<EditField>, BrowserError> {
    let Some(input) = document
        .query_selector(EDIT_SELECTOR)?
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return Ok(None);
    };
    match input.id().parse::<u32>() {
        Ok(id) => Ok(Some(EditField { id, value: input.value() })),
        Err(_) => {
            log::warn!("edit field has non-numeric id {:?}", input.id());
            Ok(None)
        }
    }
}

/// Whether an item row is currently in edit mode
pub fn is_editing(document: &Document) -> bool {
    document.get_elements_by_class_name("editing").length() > 0
}

pub fn reset_new_todo(document: &Document) {
    if let Some(input) = new_todo_input(document) {
        input.set_value("");
        focus_logged("new todo input", input.focus());
    }
}

/// Focus failures are not fatal; report them at debug level
fn focus_logged<E: std::fmt::Debug>(what: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            log::debug!("could not focus {}: {:?}", what, err);
            false
        }
    }
}

/// Focus the edit field once the pending render has been applied
pub fn focus_edit_field_soon() {
    gloo_timers::callback::Timeout::new(0, || {
        let field = document()
            .ok()
            .and_then(|doc| doc.query_selector(EDIT_SELECTOR).ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(field) = field {
            focus_logged("edit field", field.focus());
        }
    })
    .forget();
}

/// Config from the `todo-config` meta tag; defaults when absent
pub fn read_config() -> Result<Config, BrowserError> {
    let raw = document()?
        .query_selector(CONFIG_SELECTOR)?
        .and_then(|meta| meta.get_attribute("content"));
    match raw {
        Some(raw) => Ok(Config::from_json(&raw)?),
        None => Ok(Config::default()),
    }
}
