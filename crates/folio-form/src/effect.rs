//! UI effects emitted by the gatekeeper.
//!
//! The gatekeeper never touches a rendering surface. Each state change is
//! recorded as an [`Effect`] in an outbox that the host drains and applies in
//! order.

use serde::{Deserialize, Serialize};

use crate::field::{FieldKind, FieldState};

/// Visual tone of the status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Error,
    Warning,
}

impl BannerKind {
    /// CSS modifier class on the banner container.
    pub const fn class(self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Error | BannerKind::Warning => "error",
        }
    }
}

/// Content of the global status banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    /// Success banner addressed to the sender, name as typed.
    pub fn thanks(name: &str) -> Self {
        Self {
            kind: BannerKind::Success,
            text: format!(
                "Thank you, {name}! Your message has been sent successfully. I'll get back to you soon."
            ),
        }
    }

    /// Banner for a failed submission.
    pub fn failure() -> Self {
        Self {
            kind: BannerKind::Error,
            text: "Oops! Something went wrong. Please try again later.".to_string(),
        }
    }

    /// Banner for an attempt rejected by the cooldown.
    pub fn cooldown() -> Self {
        Self {
            kind: BannerKind::Warning,
            text: "Please wait a few seconds before submitting again.".to_string(),
        }
    }
}

/// Visibility phase of the status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerPhase {
    #[default]
    Hidden,
    Shown,
    Fading,
}

/// Element to scroll into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollTarget {
    Field(FieldKind),
    Banner,
}

/// A single UI mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Effect {
    /// Field container switches between untouched/valid/invalid styling
    FieldState { field: FieldKind, state: FieldState },

    /// Field message slot text; `None` clears it
    FieldText { field: FieldKind, text: Option<String> },

    /// Shake affordance on an input starts or stops
    Shake { field: FieldKind, active: bool },

    /// Smoothly scroll an element to the middle of the viewport
    ScrollIntoView { target: ScrollTarget },

    /// Submit control enabled state and label
    SubmitControl { busy: bool, label: String },

    /// Banner made visible at full opacity
    BannerShown { banner: Banner },

    /// Banner begins fading out
    BannerFading { duration_ms: u64 },

    /// Banner hidden and its opacity restored for reuse
    BannerHidden,

    /// All input values cleared
    FormReset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_serialization() {
        let effect = Effect::FieldState {
            field: FieldKind::Email,
            state: FieldState::Invalid,
        };

        let json = serde_json::to_string(&effect).unwrap();
        assert!(json.contains(r#""type":"FieldState""#));
        assert!(json.contains(r#""field":"email""#));
        assert!(json.contains(r#""state":"invalid""#));

        let parsed: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, effect);
    }

    #[test]
    fn thanks_banner_addresses_sender() {
        let banner = Banner::thanks("Ada");
        assert_eq!(banner.kind, BannerKind::Success);
        assert!(banner.text.starts_with("Thank you, Ada!"));

        // Whatever passed validation is echoed unchanged
        assert!(Banner::thanks(" Ada Lovelace").text.starts_with("Thank you,  Ada Lovelace!"));
    }

    #[test]
    fn warning_uses_error_styling() {
        assert_eq!(BannerKind::Warning.class(), "error");
        assert_eq!(BannerKind::Success.class(), "success");
    }
}
