//! Thin helpers over `web-sys`.

use folio_form::Timestamp;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, NodeList, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::error::{BindError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(BindError::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| BindError::MissingElement("document".to_string()))
}

/// Milliseconds on the page's monotonic clock.
pub fn now() -> Timestamp {
    let millis = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_default();
    Timestamp::from_millis(millis.max(0.0) as u64)
}

/// Element by id, cast to `T`.
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| BindError::MissingElement(format!("#{id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| BindError::WrongElement {
            selector: format!("#{id}"),
            expected: std::any::type_name::<T>(),
        })
}

/// First match for `selector` under `root`, cast to `T`.
pub fn query<T: JsCast>(root: &Element, selector: &str) -> Result<T> {
    let element = root
        .query_selector(selector)?
        .ok_or_else(|| BindError::MissingElement(selector.to_string()))?;
    element
        .dyn_into::<T>()
        .map_err(|_| BindError::WrongElement {
            selector: selector.to_string(),
            expected: std::any::type_name::<T>(),
        })
}

/// All elements matching `selector` in document order.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    Ok(elements(document.query_selector_all(selector)?))
}

/// All elements under `root` matching `selector`.
pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>> {
    Ok(elements(root.query_selector_all(selector)?))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attach a listener for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // The page owns the listener from here on
    closure.forget();
    Ok(())
}

/// Run `f` once after `delay_ms`. Returns the timeout id.
pub fn set_timeout<F>(delay_ms: u64, f: F) -> Result<i32>
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(f);
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    Ok(window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)?)
}

/// Run `f` before the next repaint.
pub fn request_frame<F>(f: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(f);
    window()?.request_animation_frame(callback.unchecked_ref())?;
    Ok(())
}

pub fn clear_timeout(id: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_timeout_with_handle(id);
    }
}

/// Smooth-scroll `element` to the middle of the viewport.
pub fn scroll_into_center(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        warn!(class, error = ?e, "Failed to toggle class");
    }
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let style = element.style();
    let result = if value.is_empty() {
        style.remove_property(property).map(drop)
    } else {
        style.set_property(property, value)
    };
    if let Err(e) = result {
        warn!(property, error = ?e, "Failed to set style");
    }
}

/// Replace the children of `parent` with a Font Awesome icon followed by
/// `text`, without going through `innerHTML`.
pub fn set_icon_text(document: &Document, parent: &Element, icon: &str, text: &str) -> Result<()> {
    parent.set_text_content(None);
    let i = document.create_element("i")?;
    i.set_class_name(icon);
    parent.append_child(&i)?;
    parent.append_child(&document.create_text_node(&format!(" {text}")))?;
    Ok(())
}

/// Append one `<tag class=...>text</tag>` child per item.
pub fn fill_list<'a>(
    document: &Document,
    parent: &Element,
    tag: &str,
    class: Option<&str>,
    items: impl IntoIterator<Item = &'a String>,
) -> Result<()> {
    parent.set_text_content(None);
    for item in items {
        let child = document.create_element(tag)?;
        if let Some(class) = class {
            child.set_class_name(class);
        }
        child.set_text_content(Some(item.as_str()));
        parent.append_child(&child)?;
    }
    Ok(())
}

/// Log a handler failure instead of throwing into the page.
pub fn log_failure(context: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!(context, error = %e, "Handler failed");
    }
}
