//! Mobile menu, scroll-driven header state, scroll-spy and anchor offsets.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::ChromeConfig;

/// What a click landed on, relative to the mobile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavClick {
    Hamburger,
    /// A link inside the menu
    Link,
    /// Inside the menu but not on a link
    Menu,
    Outside,
}

/// Mobile navigation menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click and return whether the menu is now open.
    pub fn on_click(&mut self, target: NavClick) -> bool {
        self.open = match target {
            NavClick::Hamburger => !self.open,
            NavClick::Link | NavClick::Outside => false,
            NavClick::Menu => self.open,
        };
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// Header and back-to-top state for a scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollChrome {
    pub header_elevated: bool,
    pub back_to_top_visible: bool,
}

impl ScrollChrome {
    pub fn at(scroll_y: f64, config: &ChromeConfig) -> Self {
        Self {
            header_elevated: scroll_y > config.header_elevate_y,
            back_to_top_visible: scroll_y > config.back_to_top_y,
        }
    }
}

/// A page section tracked by the scroll-spy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// Highlights the nav link of the section under the scroll position.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<Section>,
    offset: f64,
    active: Option<usize>,
}

impl ScrollSpy {
    pub fn new(sections: Vec<Section>, offset: f64) -> Self {
        Self {
            sections,
            offset,
            active: None,
        }
    }

    /// Recompute the active section for `scroll_y`.
    ///
    /// When several sections match, the last one in document order wins.
    /// When none match, the previous active section is kept.
    pub fn update(&mut self, scroll_y: f64) -> Option<&str> {
        let hit = self.sections.iter().rposition(|s| {
            let top = s.top - self.offset;
            scroll_y > top && scroll_y <= top + s.height
        });
        if let Some(index) = hit {
            if self.active != Some(index) {
                trace!(section = %self.sections[index].id, scroll_y, "Active section changed");
            }
            self.active = Some(index);
        }
        self.active()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.sections[i].id.as_str())
    }

    /// Replace the measured sections after a layout change, keeping the
    /// active section if it is still present.
    pub fn relayout(&mut self, sections: Vec<Section>) {
        let active = self.active().map(str::to_owned);
        self.sections = sections;
        self.active = active.and_then(|id| self.sections.iter().position(|s| s.id == id));
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

/// Fragment id an in-page link points at. Bare `#` and `#!` links are
/// placeholders and yield nothing.
pub fn anchor_id(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        None | Some("") | Some("!") => None,
        Some(id) => Some(id),
    }
}

/// Document scroll position that brings an element just below the fixed
/// header. `element_top` is viewport-relative.
pub fn anchor_scroll_y(element_top: f64, page_y: f64, offset: f64) -> f64 {
    element_top + page_y - offset
}

/// Scroll position for an in-page anchor link, if it should scroll at all.
pub fn anchor_target(href: &str, element_top: f64, page_y: f64, offset: f64) -> Option<f64> {
    anchor_id(href).map(|_| anchor_scroll_y(element_top, page_y, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hamburger_toggles() {
        let mut menu = NavMenu::new();
        assert!(menu.on_click(NavClick::Hamburger));
        assert!(!menu.on_click(NavClick::Hamburger));
    }

    #[test]
    fn link_or_outside_closes() {
        let mut menu = NavMenu::new();
        menu.on_click(NavClick::Hamburger);
        assert!(menu.on_click(NavClick::Menu));
        assert!(!menu.on_click(NavClick::Link));

        menu.on_click(NavClick::Hamburger);
        assert!(!menu.on_click(NavClick::Outside));
        assert!(!menu.on_click(NavClick::Menu));
    }

    #[test]
    fn scroll_thresholds_are_exclusive() {
        let config = ChromeConfig::default();
        assert_eq!(
            ScrollChrome::at(100.0, &config),
            ScrollChrome {
                header_elevated: false,
                back_to_top_visible: false
            }
        );
        assert!(ScrollChrome::at(100.5, &config).header_elevated);
        assert!(!ScrollChrome::at(300.0, &config).back_to_top_visible);
        assert!(ScrollChrome::at(301.0, &config).back_to_top_visible);
    }

    fn spy() -> ScrollSpy {
        ScrollSpy::new(
            vec![
                Section::new("home", 0.0, 800.0),
                Section::new("about", 800.0, 600.0),
                Section::new("projects", 1400.0, 1000.0),
            ],
            150.0,
        )
    }

    #[test]
    fn spy_uses_offset_window() {
        let mut spy = spy();
        assert_eq!(spy.update(10.0), Some("home"));
        // about's window is (650, 1250]
        assert_eq!(spy.update(651.0), Some("about"));
        assert_eq!(spy.update(1250.0), Some("about"));
        assert_eq!(spy.update(1251.0), Some("projects"));
    }

    #[test]
    fn spy_keeps_previous_when_nothing_matches() {
        let mut spy = spy();
        assert_eq!(spy.update(-500.0), None);
        spy.update(700.0);
        assert_eq!(spy.update(10_000.0), Some("about"));
    }

    #[test]
    fn overlapping_sections_last_wins() {
        let mut spy = ScrollSpy::new(
            vec![Section::new("a", 0.0, 1000.0), Section::new("b", 200.0, 100.0)],
            150.0,
        );
        assert_eq!(spy.update(100.0), Some("b"));
    }

    #[test]
    fn relayout_keeps_active_by_id() {
        let mut spy = spy();
        spy.update(700.0);
        spy.relayout(vec![
            Section::new("intro", 0.0, 300.0),
            Section::new("about", 300.0, 600.0),
        ]);
        assert_eq!(spy.active(), Some("about"));

        spy.relayout(vec![Section::new("home", 0.0, 800.0)]);
        assert_eq!(spy.active(), None);
    }

    #[test]
    fn anchor_ids() {
        assert_eq!(anchor_id("#contact"), Some("contact"));
        assert_eq!(anchor_id("#"), None);
        assert_eq!(anchor_id("#!"), None);
        assert_eq!(anchor_id("about.html"), None);
    }

    #[test]
    fn anchors() {
        assert_eq!(anchor_target("#about", 420.0, 1000.0, 80.0), Some(1340.0));
        assert_eq!(anchor_target("#", 0.0, 0.0, 80.0), None);
        assert_eq!(anchor_target("#!", 0.0, 0.0, 80.0), None);
        assert_eq!(anchor_target("/blog", 0.0, 0.0, 80.0), None);
    }
}
