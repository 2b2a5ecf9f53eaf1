//! Folio Navigation Chrome
//!
//! State for the page furniture around the content: the mobile menu, the
//! sticky header and back-to-top button, scroll-spy nav highlighting, anchor
//! scroll offsets, the hero typewriter, stat counters and scroll reveal.
//!
//! Everything here is pure. A host feeds in scroll positions, clicks and
//! timer ticks, then applies the returned state to the page.
//!
//! ```
//! use folio_chrome::{ChromeConfig, ScrollChrome};
//!
//! let config = ChromeConfig::default();
//! let chrome = ScrollChrome::at(420.0, &config);
//! assert!(chrome.header_elevated);
//! assert!(chrome.back_to_top_visible);
//! ```

mod anim;
mod config;
mod error;
mod nav;

pub use anim::{Counter, Frame, Reveal, Typewriter};
pub use config::{
    ChromeConfig, CounterConfig, RevealConfig, TypewriterConfig, DEFAULT_ANCHOR_OFFSET,
    DEFAULT_BACK_TO_TOP_Y, DEFAULT_HEADER_ELEVATE_Y, DEFAULT_SPY_OFFSET,
};
pub use error::{Error, Result};
pub use nav::{
    anchor_id, anchor_scroll_y, anchor_target, NavClick, NavMenu, ScrollChrome, ScrollSpy, Section,
};
