//! Error types for the browser binding.

use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, BindError>;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("No global window")]
    NoWindow,

    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Element {selector} is not a {expected}")]
    WrongElement {
        selector: String,
        expected: &'static str,
    },

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] folio_catalog::Error),

    #[error("Logging error: {0}")]
    Logging(#[from] folio_logging::Error),
}

impl From<JsValue> for BindError {
    fn from(value: JsValue) -> Self {
        BindError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<BindError> for JsValue {
    fn from(err: BindError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
