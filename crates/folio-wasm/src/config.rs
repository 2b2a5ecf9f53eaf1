//! Page-level configuration embedded as JSON in the document.

use folio_chrome::ChromeConfig;
use folio_form::GatekeeperConfig;
use folio_logging::LogConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;
use web_sys::Document;

use crate::catalog::CatalogConfig;
use crate::error::Result;

/// Id of the `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Everything the page can tune. Missing keys keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub log: LogConfig,
    pub form: GatekeeperConfig,
    pub catalog: CatalogConfig,
    pub chrome: ChromeConfig,
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read the config element, falling back to defaults.
    ///
    /// Runs before logging is installed, so a parse failure is handed back
    /// as text for [`report`] to log later.
    pub fn load(document: &Document) -> (Self, Option<String>) {
        let Some(text) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return (Self::default(), None);
        };
        if text.trim().is_empty() {
            return (Self::default(), None);
        }
        match Self::from_json(&text) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e.to_string())),
        }
    }
}

/// Log a deferred config problem.
pub(crate) fn report(problem: Option<String>) {
    if let Some(problem) = problem {
        warn!(error = %problem, "Ignoring malformed site config, using defaults");
    }
}
