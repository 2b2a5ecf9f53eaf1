//! Folio Contact Form
//!
//! Validation and controlled submission for the portfolio contact form.
//!
//! # Architecture
//!
//! - **Validate**: pure per-field rules (name, email, subject, message)
//! - **Feedback**: per-field valid/invalid/untouched state, message slot,
//!   shake affordance, live length hint
//! - **Gatekeeper**: cooldown guard, validation guard, Sending →
//!   Succeeded/Failed lifecycle, status banner with auto-dismissal
//! - **Schedule**: deterministic timer queue with cancellation handles
//! - **Submit**: the delivery capability (`Submitter`)
//!
//! Nothing here touches a rendering surface. Every handler records
//! [`Effect`]s that the host drains with [`Gatekeeper::take_effects`] and
//! applies, and the host drives timers by calling [`Gatekeeper::advance`]
//! with its clock.
//!
//! # Example
//!
//! ```
//! use folio_form::{FormValues, Gatekeeper, GatekeeperConfig, SubmissionState, Timestamp};
//!
//! let mut gk = Gatekeeper::simulated(GatekeeperConfig::default());
//! let values = FormValues::new("Al", "al@x.com", "Hi!", "This is ten+");
//!
//! gk.submit(&values, Timestamp::from_millis(0)).unwrap();
//! assert_eq!(gk.state(), SubmissionState::Sending);
//!
//! gk.advance(Timestamp::from_millis(2_000));
//! assert_eq!(gk.state(), SubmissionState::Succeeded);
//! ```

mod config;
mod effect;
mod error;
mod feedback;
mod field;
mod gatekeeper;
mod schedule;
mod submit;
pub mod validate;

pub use config::{
    GatekeeperConfig, DEFAULT_BANNER_FADE_MS, DEFAULT_BANNER_HOLD_MS, DEFAULT_COOLDOWN_MS,
    DEFAULT_LATENCY_MS, DEFAULT_SHAKE_MS,
};
pub use effect::{Banner, BannerKind, BannerPhase, Effect, ScrollTarget};
pub use error::{Error, Result};
pub use feedback::{FieldFeedback, FieldText};
pub use field::{FieldKind, FieldState, FormValues, PerField};
pub use gatekeeper::{Gatekeeper, SubmissionState};
pub use schedule::{Due, Scheduler, TaskHandle, Timestamp};
pub use submit::{Ack, SimulatedSubmitter, SubmissionError, Submitter};
pub use validate::validate;
