//! Chrome thresholds, offsets and animation timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Scroll depth past which the header gains its elevated shadow.
pub const DEFAULT_HEADER_ELEVATE_Y: f64 = 100.0;

/// Scroll depth past which the back-to-top button appears.
pub const DEFAULT_BACK_TO_TOP_Y: f64 = 300.0;

/// Lead applied to section tops when picking the active nav link.
pub const DEFAULT_SPY_OFFSET: f64 = 150.0;

/// Height of the fixed header, subtracted from anchor scroll targets.
pub const DEFAULT_ANCHOR_OFFSET: f64 = 80.0;

/// Configuration for the navigation chrome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    pub header_elevate_y: f64,
    pub back_to_top_y: f64,
    pub spy_offset: f64,
    pub anchor_offset: f64,
    pub typewriter: TypewriterConfig,
    pub counter: CounterConfig,
    pub reveal: RevealConfig,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            header_elevate_y: DEFAULT_HEADER_ELEVATE_Y,
            back_to_top_y: DEFAULT_BACK_TO_TOP_Y,
            spy_offset: DEFAULT_SPY_OFFSET,
            anchor_offset: DEFAULT_ANCHOR_OFFSET,
            typewriter: TypewriterConfig::default(),
            counter: CounterConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}

/// Hero typewriter phrases and step timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub phrases: Vec<String>,
    /// Delay before the first character
    pub start_ms: u64,
    pub type_ms: u64,
    pub delete_ms: u64,
    /// Hold once a phrase is fully typed
    pub pause_ms: u64,
    /// Hold once a phrase is fully deleted
    pub next_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            phrases: ["Web Developer", "UI/UX Designer", "Problem Solver", "Creative Thinker"]
                .into_iter()
                .map(String::from)
                .collect(),
            start_ms: 1_000,
            type_ms: 150,
            delete_ms: 50,
            pause_ms: 2_000,
            next_ms: 500,
        }
    }
}

impl TypewriterConfig {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_ms)
    }
}

/// Stat counter animation timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: u64,
    pub frame_ms: u64,
    /// Visible fraction of the stats section that starts the counters
    pub threshold: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2_000,
            frame_ms: 16,
            threshold: 0.5,
        }
    }
}

impl CounterConfig {
    /// Number of frames the animation is spread over (at least one).
    pub fn frames(&self) -> u64 {
        (self.duration_ms / self.frame_ms.max(1)).max(1)
    }
}

/// Scroll reveal observer options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Elements carrying this attribute are revealed
    pub attribute: String,
    /// Class added on reveal
    pub class: String,
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            attribute: "data-aos".to_string(),
            class: "aos-animate".to_string(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}
