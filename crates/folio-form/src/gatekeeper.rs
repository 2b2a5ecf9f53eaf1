//! Submission gatekeeper state machine.
//!
//! ```text
//! Idle ──submit──▶ Sending ──Ok(Ack)──▶ Succeeded
//!                     │
//!                     └────Err(..)────▶ Failed
//! ```
//!
//! Succeeded and Failed fall back to Sending on the next accepted attempt.
//! An attempt is accepted only if it passes two guards, in order:
//!
//! 1. Cooldown: less than `cooldown_ms` since the last accepted attempt
//!    rejects with a transient warning banner. Exactly `cooldown_ms` passes.
//! 2. Validation: every field must pass its rule. Failing fields are marked
//!    invalid with their submit message and the first one is scrolled into
//!    view.
//!
//! Only accepted attempts start a new cooldown window.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::GatekeeperConfig;
use crate::effect::{Banner, BannerPhase, Effect, ScrollTarget};
use crate::error::{Error, Result};
use crate::feedback::FieldFeedback;
use crate::field::{FieldKind, FieldState, FormValues, PerField};
use crate::schedule::{Scheduler, TaskHandle, Timestamp};
use crate::submit::{SimulatedSubmitter, Submitter};
use crate::validate::validate;

/// Where the gatekeeper is in the submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

/// Timer-driven follow-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Task {
    EndShake(FieldKind),
    Deliver,
    BeginFade,
    HideBanner,
}

/// Owns all form state: per-field feedback, the submission lifecycle, the
/// status banner and the pending timers.
pub struct Gatekeeper<S = SimulatedSubmitter> {
    pub(crate) config: GatekeeperConfig,
    pub(crate) fields: PerField<FieldFeedback>,
    pub(crate) scheduler: Scheduler<Task>,
    pub(crate) effects: Vec<Effect>,
    state: SubmissionState,
    last_submit: Option<Timestamp>,
    in_flight: Option<FormValues>,
    banner: Option<Banner>,
    banner_phase: BannerPhase,
    fade_tasks: Vec<TaskHandle>,
    submitter: S,
}

impl Gatekeeper<SimulatedSubmitter> {
    /// Gatekeeper whose submissions always succeed.
    pub fn simulated(config: GatekeeperConfig) -> Self {
        Self::new(config, SimulatedSubmitter)
    }
}

impl<S: Submitter> Gatekeeper<S> {
    /// Create a gatekeeper delivering through `submitter`.
    pub fn new(config: GatekeeperConfig, submitter: S) -> Self {
        Self {
            config,
            fields: PerField::default(),
            scheduler: Scheduler::new(),
            effects: Vec::new(),
            state: SubmissionState::Idle,
            last_submit: None,
            in_flight: None,
            banner: None,
            banner_phase: BannerPhase::Hidden,
            fade_tasks: Vec::new(),
            submitter,
        }
    }

    /// Attempt to submit the form.
    ///
    /// On `Ok` the gatekeeper is Sending and delivery is scheduled after the
    /// configured latency. On `Err` the rejection has already been rendered.
    pub fn submit(&mut self, values: &FormValues, now: Timestamp) -> Result<()> {
        if let Some(remaining) = self.cooldown_remaining(now) {
            debug!(remaining_ms = remaining.as_millis() as u64, "Submit rejected by cooldown");
            self.show_banner(Banner::cooldown());
            return Err(Error::Cooldown { remaining });
        }

        if self.state == SubmissionState::Sending {
            debug!("Submit rejected, delivery still pending");
            return Err(Error::InFlight);
        }

        self.hide_banner();

        let mut invalid = Vec::new();
        for field in FieldKind::ALL {
            if validate(field, values.get(field)) {
                self.mark_valid(field);
            } else {
                self.mark_invalid(field, field.submit_message(), now);
                invalid.push(field);
            }
        }

        if let Some(&first) = invalid.first() {
            debug!(?invalid, "Submit rejected by validation");
            self.effects.push(Effect::ScrollIntoView {
                target: ScrollTarget::Field(first),
            });
            return Err(Error::Invalid { fields: invalid });
        }

        self.last_submit = Some(now);
        self.state = SubmissionState::Sending;
        self.in_flight = Some(values.clone());
        self.effects.push(Effect::SubmitControl {
            busy: true,
            label: self.config.busy_label.clone(),
        });
        self.scheduler.schedule(now + self.config.latency(), Task::Deliver);

        info!(at = now.as_millis(), "Submission accepted");
        Ok(())
    }

    /// Fire every task due at or before `now`. Returns how many fired.
    pub fn advance(&mut self, now: Timestamp) -> usize {
        let mut fired = 0;
        while let Some(due) = self.scheduler.pop_due(now) {
            fired += 1;
            self.run(due.task, due.at);
        }
        if fired > 0 {
            let scheduler = &self.scheduler;
            self.fade_tasks.retain(|h| scheduler.is_pending(*h));
        }
        fired
    }

    /// Begin the banner's auto-dismissal: hold, then fade, then hide.
    pub fn schedule_auto_hide(&mut self, shown_at: Timestamp) {
        let handle = self
            .scheduler
            .schedule(shown_at + self.config.banner_hold(), Task::BeginFade);
        self.fade_tasks.push(handle);
    }

    /// Time left before another submission can be accepted.
    pub fn cooldown_remaining(&self, now: Timestamp) -> Option<Duration> {
        let last = self.last_submit?;
        let elapsed = now.saturating_since(last);
        let cooldown = self.config.cooldown();
        (elapsed < cooldown).then(|| cooldown - elapsed)
    }

    /// Drain the effect outbox.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Peek at undrained effects.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Earliest pending timer deadline, for arming a host timer.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.scheduler.next_deadline()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn config(&self) -> &GatekeeperConfig {
        &self.config
    }

    pub fn field(&self, field: FieldKind) -> &FieldFeedback {
        &self.fields[field]
    }

    pub fn field_state(&self, field: FieldKind) -> FieldState {
        self.fields[field].state
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn last_submit(&self) -> Option<Timestamp> {
        self.last_submit
    }

    /// Submit control is disabled while a delivery is pending.
    pub fn is_busy(&self) -> bool {
        self.state == SubmissionState::Sending
    }

    /// Current submit control label.
    pub fn submit_label(&self) -> &str {
        if self.is_busy() {
            &self.config.busy_label
        } else {
            &self.config.idle_label
        }
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn banner_phase(&self) -> BannerPhase {
        self.banner_phase
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    fn run(&mut self, task: Task, at: Timestamp) {
        match task {
            Task::EndShake(field) => self.end_shake(field),
            Task::Deliver => self.deliver(at),
            Task::BeginFade => self.begin_fade(at),
            Task::HideBanner => self.hide_banner(),
        }
    }

    fn deliver(&mut self, at: Timestamp) {
        let Some(payload) = self.in_flight.take() else {
            return;
        };

        match self.submitter.submit(&payload) {
            Ok(ack) => {
                info!(reference = ?ack.reference, "Submission delivered");
                self.state = SubmissionState::Succeeded;
                self.show_banner(Banner::thanks(&payload.name));
                self.effects.push(Effect::FormReset);
                for field in FieldKind::ALL {
                    self.clear(field);
                }
                self.effects.push(Effect::ScrollIntoView {
                    target: ScrollTarget::Banner,
                });
                self.release_submit_control();
                self.schedule_auto_hide(at);
            }
            Err(err) => {
                warn!(%err, "Submission failed");
                self.state = SubmissionState::Failed;
                self.show_banner(Banner::failure());
                self.release_submit_control();
            }
        }
    }

    fn release_submit_control(&mut self) {
        self.effects.push(Effect::SubmitControl {
            busy: false,
            label: self.config.idle_label.clone(),
        });
    }

    fn show_banner(&mut self, banner: Banner) {
        if self.config.cancel_superseded_fades {
            for handle in self.fade_tasks.drain(..) {
                self.scheduler.cancel(handle);
            }
        }
        self.banner = Some(banner.clone());
        self.banner_phase = BannerPhase::Shown;
        self.effects.push(Effect::BannerShown { banner });
    }

    fn begin_fade(&mut self, at: Timestamp) {
        if self.banner_phase == BannerPhase::Hidden {
            return;
        }
        self.banner_phase = BannerPhase::Fading;
        self.effects.push(Effect::BannerFading {
            duration_ms: self.config.banner_fade_ms,
        });
        let handle = self
            .scheduler
            .schedule(at + self.config.banner_fade(), Task::HideBanner);
        self.fade_tasks.push(handle);
    }

    fn hide_banner(&mut self) {
        if self.banner_phase != BannerPhase::Hidden {
            self.banner = None;
            self.banner_phase = BannerPhase::Hidden;
            self.effects.push(Effect::BannerHidden);
        }
    }
}
