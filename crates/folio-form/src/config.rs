//! Gatekeeper timing and label configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Minimum interval between accepted submissions.
pub const DEFAULT_COOLDOWN_MS: u64 = 5_000;

/// Latency before the submitter is invoked.
pub const DEFAULT_LATENCY_MS: u64 = 2_000;

/// Length of the shake affordance on an invalid field.
pub const DEFAULT_SHAKE_MS: u64 = 500;

/// How long a success banner stays fully visible.
pub const DEFAULT_BANNER_HOLD_MS: u64 = 5_000;

/// Fade-out duration of the success banner.
pub const DEFAULT_BANNER_FADE_MS: u64 = 500;

/// Configuration for a [`Gatekeeper`](crate::Gatekeeper).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatekeeperConfig {
    pub cooldown_ms: u64,
    pub latency_ms: u64,
    pub shake_ms: u64,
    pub banner_hold_ms: u64,
    pub banner_fade_ms: u64,
    /// Submit control label while idle
    pub idle_label: String,
    /// Submit control label while a submission is in flight
    pub busy_label: String,
    /// Cancel pending fade/hide timers when a new banner replaces the old one.
    ///
    /// Off by default: a late hide timer from an earlier success banner can
    /// hide a newer banner.
    pub cancel_superseded_fades: bool,
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            latency_ms: DEFAULT_LATENCY_MS,
            shake_ms: DEFAULT_SHAKE_MS,
            banner_hold_ms: DEFAULT_BANNER_HOLD_MS,
            banner_fade_ms: DEFAULT_BANNER_FADE_MS,
            idle_label: "Send Message".to_string(),
            busy_label: "Sending...".to_string(),
            cancel_superseded_fades: false,
        }
    }
}

impl GatekeeperConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn shake(&self) -> Duration {
        Duration::from_millis(self.shake_ms)
    }

    pub fn banner_hold(&self) -> Duration {
        Duration::from_millis(self.banner_hold_ms)
    }

    pub fn banner_fade(&self) -> Duration {
        Duration::from_millis(self.banner_fade_ms)
    }
}
