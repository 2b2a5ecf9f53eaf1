//! Folio Project Catalog
//!
//! Read-only project records plus the two pieces of UI state built on them.
//!
//! - **Catalog**: id → [`Project`] mapping, embedded as JSON
//! - **Modal**: which project's detail view is open
//! - **Gallery**: card visibility under a category filter or text search
//!
//! # Example
//!
//! ```
//! use folio_catalog::{Catalog, Modal, ProjectId};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let mut modal = Modal::new();
//!
//! let project = modal.open(&catalog, ProjectId(1)).unwrap();
//! assert_eq!(project.title, "E-Commerce Platform");
//!
//! // Unknown ids are diagnosed and ignored
//! assert!(modal.open(&catalog, ProjectId(99)).is_err());
//! assert_eq!(modal.current(), Some(ProjectId(1)));
//! ```

mod error;
mod gallery;
mod modal;
mod project;

pub use error::{Error, Result};
pub use gallery::{filter_label, Card, Filter, Gallery, FILTER_ALL};
pub use modal::{Modal, CLOSE_KEY};
pub use project::{Catalog, Project, ProjectId};
