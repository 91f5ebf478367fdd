use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no DOM node at path {0:?}")]
    MissingNode(Vec<usize>),
    #[error("node at path {0:?} is not an element")]
    NotAnElement(Vec<usize>),
    #[error("JS error: {0}")]
    Js(String),
    #[error("failed to encode event message: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
