//! Navigation chrome wiring: menu, scroll effects, typewriter, counters,
//! scroll reveal.

use std::cell::RefCell;

use folio_chrome::{
    anchor_id, anchor_scroll_y, ChromeConfig, Counter, NavClick, NavMenu, Reveal, ScrollChrome,
    ScrollSpy, Section, Typewriter, TypewriterConfig,
};
use js_sys::Array;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Node, ScrollBehavior, ScrollToOptions,
};

use crate::dom;
use crate::error::{BindError, Result};

const HEADER_SHADOW: &str = "0 4px 6px rgba(0, 0, 0, 0.1)";
const HEADER_SHADOW_FLAT: &str = "0 1px 2px rgba(0, 0, 0, 0.05)";

const BACK_TO_TOP_CSS: &str = "\
.back-to-top { position: fixed; bottom: 30px; right: 30px; width: 50px; height: 50px; \
background: linear-gradient(135deg, var(--primary-color), var(--secondary-color)); \
color: white; border: none; border-radius: 50%; cursor: pointer; opacity: 0; \
visibility: hidden; transition: all 0.3s ease; z-index: 999; \
box-shadow: 0 4px 10px rgba(0, 0, 0, 0.2); }\n\
.back-to-top.visible { opacity: 1; visibility: visible; }\n\
.back-to-top:hover { transform: translateY(-5px); box-shadow: 0 6px 15px rgba(0, 0, 0, 0.3); }";

thread_local! {
    static CHROME: RefCell<Option<ChromeBinding>> = const { RefCell::new(None) };
}

pub(crate) fn header_shadow(elevated: bool) -> &'static str {
    if elevated {
        HEADER_SHADOW
    } else {
        HEADER_SHADOW_FLAT
    }
}

/// Whether a nav link's `href` points at section `id`.
pub(crate) fn link_targets(href: &str, id: &str) -> bool {
    href.contains(id)
}

/// Index of the one nav link highlighted for section `id`: the first match.
pub(crate) fn active_link<'a>(hrefs: impl IntoIterator<Item = &'a str>, id: &str) -> Option<usize> {
    hrefs.into_iter().position(|href| link_targets(href, id))
}

/// Typewriter for the configured phrases. A config it cannot run only
/// turns the effect off.
pub(crate) fn build_typewriter(config: &TypewriterConfig) -> Option<Typewriter> {
    match Typewriter::new(config.clone()) {
        Ok(typewriter) => Some(typewriter),
        Err(e) => {
            warn!(error = %e, "Typewriter disabled");
            None
        }
    }
}

struct NavLink {
    element: Element,
    href: String,
}

struct ChromeBinding {
    document: Document,
    config: ChromeConfig,
    header: Option<HtmlElement>,
    back_to_top: Option<Element>,
    hamburger: Option<Element>,
    menu_element: Option<Element>,
    menu: NavMenu,
    links: Vec<NavLink>,
    /// Sections that have a nav link, in document order
    sections: Vec<HtmlElement>,
    spy: ScrollSpy,
    typewriter: Option<(Typewriter, Element)>,
    counters: Vec<(Counter, Element)>,
}

impl ChromeBinding {
    fn on_scroll(&mut self, scroll_y: f64) {
        let state = ScrollChrome::at(scroll_y, &self.config);
        if let Some(header) = &self.header {
            dom::set_style(header, "box-shadow", header_shadow(state.header_elevated));
        }
        if let Some(button) = &self.back_to_top {
            dom::set_class(button, "visible", state.back_to_top_visible);
        }

        self.spy.relayout(measure(&self.sections));
        if let Some(active) = self.spy.update(scroll_y) {
            let lit = active_link(self.links.iter().map(|l| l.href.as_str()), active);
            for (index, link) in self.links.iter().enumerate() {
                dom::set_class(&link.element, "active", lit == Some(index));
            }
        }
    }

    fn on_nav_click(&mut self, click: NavClick) {
        let open = self.menu.on_click(click);
        for element in [&self.hamburger, &self.menu_element].into_iter().flatten() {
            dom::set_class(element, "active", open);
        }
    }

    /// Classify a document click relative to the menu.
    fn classify(&self, target: Option<&Node>) -> Option<NavClick> {
        let inside = |element: &Option<Element>| {
            element.as_ref().is_some_and(|e| e.contains(target))
        };
        if inside(&self.hamburger) {
            // Handled by the hamburger's own listener
            None
        } else if inside(&self.menu_element) {
            Some(NavClick::Menu)
        } else {
            Some(NavClick::Outside)
        }
    }
}

fn measure(sections: &[HtmlElement]) -> Vec<Section> {
    sections
        .iter()
        .map(|s| Section::new(s.id(), s.offset_top() as f64, s.offset_height() as f64))
        .collect()
}

fn with_chrome<R>(f: impl FnOnce(&mut ChromeBinding) -> R) -> Option<R> {
    CHROME.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.as_mut().map(f),
        Err(_) => {
            warn!("Chrome handler re-entered, event dropped");
            None
        }
    })
}

fn scroll_y() -> f64 {
    dom::window()
        .and_then(|w| w.scroll_y().map_err(BindError::from))
        .unwrap_or_default()
}

fn smooth_scroll_to(top: f64) -> Result<()> {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    dom::window()?.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

fn type_next() {
    let next = with_chrome(|b| {
        let (typewriter, element) = b.typewriter.as_mut()?;
        let frame = typewriter.step();
        element.set_text_content(Some(frame.text.as_str()));
        Some(frame.next_in.as_millis() as u64)
    })
    .flatten();
    if let Some(delay) = next {
        dom::log_failure("typewriter", dom::set_timeout(delay, type_next).map(drop));
    }
}

fn count_frame() {
    let running = with_chrome(|b| {
        for (counter, element) in &mut b.counters {
            if !counter.is_done() {
                element.set_text_content(Some(counter.step().to_string().as_str()));
            }
        }
        b.counters.retain(|(counter, _)| !counter.is_done());
        !b.counters.is_empty()
    })
    .unwrap_or(false);
    if running {
        dom::log_failure("counter", dom::request_frame(count_frame));
    }
}

fn start_counters(document: &Document) -> Result<()> {
    let stats = dom::query_all(document, ".stat-number")?;
    let started = with_chrome(|b| {
        for element in stats {
            let shown = element.text_content().unwrap_or_default();
            if !Counter::should_start(&shown) {
                continue;
            }
            let attr = element.get_attribute("data-target").unwrap_or_default();
            match Counter::parse_target(&attr) {
                Ok(target) => b.counters.push((Counter::new(target, &b.config.counter), element)),
                Err(e) => warn!(error = %e, "Skipping stat counter"),
            }
        }
        !b.counters.is_empty()
    })
    .unwrap_or(false);
    if started {
        dom::request_frame(count_frame)?;
    }
    Ok(())
}

/// Observe `elements` and call `on_reveal` the first time each becomes
/// visible.
fn observe_once<F>(
    elements: Vec<Element>,
    threshold: f64,
    root_margin: &str,
    mut on_reveal: F,
) -> Result<()>
where
    F: FnMut(&Element) + 'static,
{
    if elements.is_empty() {
        return Ok(());
    }
    let observed = elements.clone();
    let mut reveal = Reveal::new();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(index) = observed.iter().position(|e| *e == target) else {
                    continue;
                };
                if reveal.on_intersect(index, entry.is_intersecting()) {
                    on_reveal(&target);
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    options.set_root_margin(root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    for element in &elements {
        observer.observe(element);
    }
    Ok(())
}

fn install_back_to_top(document: &Document) -> Result<Element> {
    let style = document.create_element("style")?;
    style.set_text_content(Some(BACK_TO_TOP_CSS));
    if let Some(head) = document.head() {
        head.append_child(&style)?;
    }

    let button = document.create_element("button")?;
    button.set_class_name("back-to-top");
    button.set_attribute("aria-label", "Back to top")?;
    let icon = document.create_element("i")?;
    icon.set_class_name("fas fa-arrow-up");
    button.append_child(&icon)?;
    if let Some(body) = document.body() {
        body.append_child(&button)?;
    }
    dom::listen(&button, "click", |_| {
        dom::log_failure("back to top", smooth_scroll_to(0.0));
    })?;
    Ok(button)
}

fn install_menu(binding: &ChromeBinding) -> Result<()> {
    if let Some(hamburger) = &binding.hamburger {
        dom::listen(hamburger, "click", |_| {
            with_chrome(|b| b.on_nav_click(NavClick::Hamburger));
        })?;
    }
    for link in &binding.links {
        dom::listen(&link.element, "click", |_| {
            with_chrome(|b| b.on_nav_click(NavClick::Link));
        })?;
    }
    dom::listen(&binding.document, "click", |event| {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        with_chrome(|b| {
            if let Some(click) = b.classify(target.as_ref()) {
                b.on_nav_click(click);
            }
        });
    })?;
    Ok(())
}

fn install_anchors(document: &Document, offset: f64) -> Result<()> {
    for link in dom::query_all(document, "a[href^=\"#\"]")? {
        let href = link.get_attribute("href").unwrap_or_default();
        let document = document.clone();
        dom::listen(&link, "click", move |event| {
            let Some(id) = anchor_id(&href) else {
                event.prevent_default();
                return;
            };
            let Some(target) = document.get_element_by_id(id) else {
                return;
            };
            event.prevent_default();
            let top = target.get_bounding_client_rect().top();
            let y = anchor_scroll_y(top, scroll_y(), offset);
            dom::log_failure("anchor scroll", smooth_scroll_to(y));
        })?;
    }
    Ok(())
}

/// Wire up every chrome feature present on the page.
pub fn install(document: &Document, config: ChromeConfig) -> Result<()> {
    let links: Vec<NavLink> = dom::query_all(document, ".nav-link")?
        .into_iter()
        .map(|element| NavLink {
            href: element.get_attribute("href").unwrap_or_default(),
            element,
        })
        .collect();
    let sections: Vec<HtmlElement> = dom::query_all(document, "section[id]")?
        .into_iter()
        .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
        .filter(|s| links.iter().any(|l| link_targets(&l.href, &s.id())))
        .collect();

    let typewriter = document
        .get_element_by_id("typewriter")
        .and_then(|element| build_typewriter(&config.typewriter).map(|t| (t, element)));
    let start_delay = typewriter.as_ref().map(|(t, _)| t.start_delay());

    let binding = ChromeBinding {
        document: document.clone(),
        header: document
            .query_selector(".header")?
            .and_then(|e| e.dyn_into::<HtmlElement>().ok()),
        back_to_top: Some(install_back_to_top(document)?),
        hamburger: document.get_element_by_id("hamburger"),
        menu_element: document.get_element_by_id("navMenu"),
        menu: NavMenu::new(),
        spy: ScrollSpy::new(measure(&sections), config.spy_offset),
        links,
        sections,
        typewriter,
        counters: Vec::new(),
        config,
    };

    install_menu(&binding)?;
    install_anchors(document, binding.config.anchor_offset)?;

    let reveal = binding.config.reveal.clone();
    let counter = binding.config.counter;
    let section_count = binding.sections.len();
    CHROME.with(|cell| *cell.borrow_mut() = Some(binding));

    dom::listen(&dom::window()?.into(), "scroll", |_| {
        let y = scroll_y();
        with_chrome(|b| b.on_scroll(y));
    })?;

    if let Some(delay) = start_delay {
        dom::set_timeout(delay.as_millis() as u64, type_next)?;
    }

    if let Some(stats) = document.query_selector(".stats")? {
        let document = document.clone();
        observe_once(vec![stats], counter.threshold, "0px", move |_| {
            dom::log_failure("stat counters", start_counters(&document));
        })?;
    }

    let class = reveal.class.clone();
    observe_once(
        dom::query_all(document, &format!("[{}]", reveal.attribute))?,
        reveal.threshold,
        &reveal.root_margin,
        move |element| dom::set_class(element, &class, true),
    )?;

    let cards = dom::query_all(document, ".project-card")?;
    for card in &cards {
        if let Some(card) = card.dyn_ref::<HtmlElement>() {
            dom::set_style(card, "opacity", "0");
            dom::set_style(card, "transform", "translateY(20px)");
            dom::set_style(card, "transition", "opacity 0.6s ease, transform 0.6s ease");
        }
    }
    observe_once(cards, reveal.threshold, &reveal.root_margin, |card| {
        if let Some(card) = card.dyn_ref::<HtmlElement>() {
            dom::set_style(card, "opacity", "1");
            dom::set_style(card, "transform", "translateY(0)");
        }
    })?;

    debug!(sections = section_count, "Chrome bound");
    Ok(())
}
