//! Project gallery and detail modal wiring.

use std::cell::RefCell;

use folio_catalog::{filter_label, Card, Catalog, Filter, Gallery, Modal, Project, ProjectId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, KeyboardEvent};

use crate::dom;
use crate::error::Result;

const MODAL_ID: &str = "projectModal";
const GRID_ID: &str = "projectsGrid";
const CARD_SELECTOR: &str = ".project-card";
const FILTER_SELECTOR: &str = ".filter-btn";
const EMPTY_STATE_CLASS: &str = "empty-state";

thread_local! {
    static CATALOG: RefCell<Option<CatalogBinding>> = const { RefCell::new(None) };
}

/// Catalog options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Append "(n)" card counts to the filter buttons
    pub show_filter_counts: bool,
}

/// CSS `display` value for a card.
pub(crate) fn card_display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

/// `overflow` on `<body>` while the modal is open or closed.
pub(crate) fn body_overflow(locked: bool) -> &'static str {
    if locked {
        "hidden"
    } else {
        ""
    }
}

struct ModalView {
    root: HtmlElement,
    header: Element,
    title: Element,
    tags: Element,
    description: Element,
    features: Element,
    tech: Element,
}

impl ModalView {
    fn find(document: &Document) -> Result<Self> {
        Ok(Self {
            root: dom::by_id(document, MODAL_ID)?,
            header: dom::by_id(document, "modalHeader")?,
            title: dom::by_id(document, "modalTitle")?,
            tags: dom::by_id(document, "modalTags")?,
            description: dom::by_id(document, "modalDescription")?,
            features: dom::by_id(document, "modalFeatures")?,
            tech: dom::by_id(document, "modalTech")?,
        })
    }

    fn render(&self, document: &Document, project: &Project) -> Result<()> {
        self.header.set_text_content(None);
        let icon = document.create_element("i")?;
        icon.set_class_name(&project.icon);
        self.header.append_child(&icon)?;

        self.title.set_text_content(Some(project.title.as_str()));
        dom::fill_list(document, &self.tags, "span", Some("project-tag"), &project.tags)?;
        self.description.set_text_content(Some(project.description.as_str()));
        dom::fill_list(document, &self.features, "li", None, &project.features)?;
        dom::fill_list(document, &self.tech, "div", Some("tech-item"), &project.technologies)?;
        Ok(())
    }

    fn show(&self, document: &Document, open: bool) {
        dom::set_class(&self.root, "active", open);
        if let Some(body) = document.body() {
            dom::set_style(&body, "overflow", body_overflow(open));
        }
    }
}

struct GalleryView {
    grid: Option<Element>,
    cards: Vec<HtmlElement>,
    buttons: Vec<Element>,
}

impl GalleryView {
    fn find(document: &Document) -> Result<(Self, Gallery)> {
        let elements = dom::query_all(document, CARD_SELECTOR)?;
        let mut cards = Vec::with_capacity(elements.len());
        let mut models = Vec::with_capacity(elements.len());
        for element in elements {
            models.push(read_card(&element)?);
            if let Ok(card) = element.dyn_into::<HtmlElement>() {
                cards.push(card);
            }
        }
        let view = Self {
            grid: document.get_element_by_id(GRID_ID),
            cards,
            buttons: dom::query_all(document, FILTER_SELECTOR)?,
        };
        Ok((view, Gallery::new(models)))
    }

    fn show(&self, document: &Document, gallery: &Gallery) -> Result<()> {
        for (card, visible) in self.cards.iter().zip(gallery.visible()) {
            dom::set_style(card, "display", card_display(*visible));
        }
        self.empty_state(document, gallery.shows_empty_state())
    }

    fn empty_state(&self, document: &Document, show: bool) -> Result<()> {
        let Some(grid) = &self.grid else {
            return Ok(());
        };
        let existing = grid.query_selector(&format!(".{EMPTY_STATE_CLASS}"))?;
        match (existing, show) {
            (None, true) => {
                let empty = document.create_element("div")?;
                empty.set_class_name(EMPTY_STATE_CLASS);
                let icon = document.create_element("i")?;
                icon.set_class_name("fas fa-folder-open");
                let heading = document.create_element("h3")?;
                heading.set_text_content(Some("No Projects Found"));
                let text = document.create_element("p")?;
                text.set_text_content(Some("No projects match the selected filter."));
                empty.append_child(&icon)?;
                empty.append_child(&heading)?;
                empty.append_child(&text)?;
                grid.append_child(&empty)?;
            }
            (Some(existing), false) => existing.remove(),
            _ => {}
        }
        Ok(())
    }

    fn mark_active(&self, clicked: &Element) {
        for button in &self.buttons {
            dom::set_class(button, "active", button == clicked);
        }
    }
}

/// Card model from a `.project-card` element.
fn read_card(element: &Element) -> Result<Card> {
    let text_of = |selector: &str| -> Result<String> {
        Ok(element
            .query_selector(selector)?
            .and_then(|e| e.text_content())
            .unwrap_or_default())
    };
    let tags = dom::query_all_in(element, ".project-tag")?
        .into_iter()
        .filter_map(|tag| tag.text_content())
        .collect::<Vec<_>>();
    Ok(Card::new(
        text_of("h3")?,
        element.get_attribute("data-category").unwrap_or_default(),
    )
    .with_tags(tags)
    .with_description(text_of("p")?))
}

struct CatalogBinding {
    document: Document,
    catalog: Catalog,
    modal: Modal,
    modal_view: Option<ModalView>,
    gallery: Gallery,
    gallery_view: GalleryView,
}

impl CatalogBinding {
    fn open(&mut self, id: ProjectId) -> Result<()> {
        let Some(view) = &self.modal_view else {
            warn!(%id, "No project modal on this page");
            return Ok(());
        };
        // Unknown ids are logged by the model and leave the page untouched
        let Ok(project) = self.modal.open(&self.catalog, id) else {
            return Ok(());
        };
        view.render(&self.document, project)?;
        view.show(&self.document, true);
        Ok(())
    }

    fn close(&mut self) {
        self.modal.close();
        if let Some(view) = &self.modal_view {
            view.show(&self.document, false);
        }
    }

    fn filter(&mut self, button: &Element) -> Result<()> {
        let value = button.get_attribute("data-filter").unwrap_or_default();
        self.gallery_view.mark_active(button);
        self.gallery.apply_filter(Filter::parse(&value));
        self.gallery_view.show(&self.document, &self.gallery)
    }

    fn label_filters(&self) {
        for button in &self.gallery_view.buttons {
            let filter = Filter::parse(&button.get_attribute("data-filter").unwrap_or_default());
            let label = button.text_content().unwrap_or_default();
            let labelled = filter_label(&label, self.gallery.count(&filter));
            button.set_text_content(Some(labelled.as_str()));
        }
    }
}

fn with_catalog<R>(f: impl FnOnce(&mut CatalogBinding) -> R) -> Option<R> {
    CATALOG.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.as_mut().map(f),
        Err(_) => {
            warn!("Catalog handler re-entered, event dropped");
            None
        }
    })
}

/// Show the detail modal for project `id`.
#[wasm_bindgen(js_name = openModal)]
pub fn open_modal(id: u32) {
    let handled = with_catalog(|b| dom::log_failure("open modal", b.open(ProjectId(id))));
    if handled.is_none() {
        warn!(id, "openModal called before the catalog was bound");
    }
}

/// Hide the detail modal and restore page scroll.
#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal() {
    with_catalog(CatalogBinding::close);
}

/// Show only the cards whose title, tags or description contain `term`.
#[wasm_bindgen(js_name = searchProjects)]
pub fn search_projects(term: &str) {
    with_catalog(|b| {
        b.gallery.search(term);
        dom::log_failure("search", b.gallery_view.show(&b.document, &b.gallery));
    });
}

/// Reorder the cards in the grid by title.
#[wasm_bindgen(js_name = sortProjects)]
pub fn sort_projects() {
    with_catalog(|b| {
        let Some(grid) = &b.gallery_view.grid else {
            return;
        };
        for index in b.gallery.sorted_by_title() {
            if let Some(card) = b.gallery_view.cards.get(index) {
                if let Err(e) = grid.append_child(card) {
                    warn!(index, error = ?e, "Failed to move card");
                }
            }
        }
    });
}

/// Bind the gallery and modal.
pub fn install(document: &Document, config: &CatalogConfig) -> Result<()> {
    let catalog = Catalog::builtin()?;
    let modal_view = match ModalView::find(document) {
        Ok(view) => Some(view),
        Err(e) => {
            debug!(reason = %e, "Project modal not bound");
            None
        }
    };
    let (gallery_view, gallery) = GalleryView::find(document)?;

    for button in &gallery_view.buttons {
        let clicked = button.clone();
        dom::listen(button, "click", move |_| {
            with_catalog(|b| dom::log_failure("filter", b.filter(&clicked)));
        })?;
    }

    if let Some(view) = &modal_view {
        let root: EventTarget = view.root.clone().into();
        dom::listen(&view.root, "click", move |event| {
            let on_backdrop = event.target().is_some_and(|target| target == root);
            with_catalog(|b| {
                if b.modal.on_click(on_backdrop) {
                    b.close();
                }
            });
        })?;
        dom::listen(document, "keydown", |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            with_catalog(|b| {
                if b.modal.on_key(&key) {
                    b.close();
                }
            });
        })?;
    }

    let binding = CatalogBinding {
        document: document.clone(),
        catalog,
        modal: Modal::new(),
        modal_view,
        gallery,
        gallery_view,
    };
    if config.show_filter_counts {
        binding.label_filters();
    }
    debug!(
        projects = binding.catalog.len(),
        cards = binding.gallery.cards().len(),
        "Catalog bound"
    );
    CATALOG.with(|cell| *cell.borrow_mut() = Some(binding));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_values() {
        assert_eq!(card_display(true), "block");
        assert_eq!(card_display(false), "none");
        assert_eq!(body_overflow(true), "hidden");
        assert_eq!(body_overflow(false), "");
    }

    #[test]
    fn filter_counts_off_by_default() {
        assert!(!CatalogConfig::default().show_filter_counts);
        let config: CatalogConfig = serde_json::from_str(r#"{"show_filter_counts": true}"#).unwrap();
        assert!(config.show_filter_counts);
    }
}
