//! Folio browser binding.
//!
//! Wires the page to the pure models: DOM events go in, recorded effects
//! come out and are applied to the document. Timers are browser timeouts
//! armed for the models' next deadline.
//!
//! Exports `openModal(id)` and `closeModal()` for inline handlers, plus
//! `searchProjects(term)` and `sortProjects()`.

mod catalog;
mod chrome;
mod config;
mod dom;
mod error;
mod form;

use tracing::{info, warn};
use wasm_bindgen::prelude::*;

pub use catalog::{close_modal, open_modal, search_projects, sort_projects, CatalogConfig};
pub use config::{SiteConfig, CONFIG_ELEMENT_ID};
pub use error::{BindError, Result};

/// Entry point run when the module is instantiated.
///
/// Fails only when the page has no document at all. Each feature that
/// cannot be bound is logged and skipped.
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    let document = dom::document()?;
    let (config, problem) = SiteConfig::load(&document);

    if let Err(e) = folio_logging::init(&config.log) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }
    config::report(problem);

    if let Err(e) = form::install(&document, config.form) {
        warn!(error = %e, "Contact form not bound");
    }
    if let Err(e) = catalog::install(&document, &config.catalog) {
        warn!(error = %e, "Project catalog not bound");
    }
    if let Err(e) = chrome::install(&document, config.chrome) {
        warn!(error = %e, "Navigation chrome not bound");
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Folio started");
    Ok(())
}
