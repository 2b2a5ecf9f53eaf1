//! Project detail modal.

use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::project::{Catalog, Project, ProjectId};

/// Keyboard key that dismisses the modal.
pub const CLOSE_KEY: &str = "Escape";

/// Open/closed state of the detail modal.
///
/// While open the page behind it must not scroll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modal {
    open: Option<ProjectId>,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the modal on project `id`.
    ///
    /// An unknown id logs a diagnostic and leaves the modal untouched.
    pub fn open<'c>(&mut self, catalog: &'c Catalog, id: ProjectId) -> Result<&'c Project> {
        let Some(project) = catalog.get(id) else {
            error!(%id, "Project not found");
            return Err(Error::UnknownProject(id));
        };
        debug!(%id, title = %project.title, "Opening project modal");
        self.open = Some(id);
        Ok(project)
    }

    /// Close the modal. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    /// Escape closes an open modal.
    pub fn on_key(&mut self, key: &str) -> bool {
        key == CLOSE_KEY && self.close()
    }

    /// A click directly on the backdrop (not on the dialog) closes it.
    pub fn on_click(&mut self, on_backdrop: bool) -> bool {
        on_backdrop && self.close()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Project currently shown.
    pub fn current(&self) -> Option<ProjectId> {
        self.open
    }

    /// Page scrolling is locked while the modal is open.
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }
}
