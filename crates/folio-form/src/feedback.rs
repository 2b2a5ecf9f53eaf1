//! Per-field feedback: validation state, message slot, shake affordance.
//!
//! Wiring per field:
//! - blur: empty → clear, otherwise validate → valid/invalid
//! - input: only re-validates while the field is invalid, and only ever
//!   promotes it to valid, so a field being typed for the first time does
//!   not flip back and forth
//! - the message field also shows a live "N more characters required" hint
//!   while its raw value is non-empty and under the minimum

use tracing::debug;

use crate::effect::Effect;
use crate::field::{FieldKind, FieldState};
use crate::gatekeeper::{Gatekeeper, Task};
use crate::schedule::{TaskHandle, Timestamp};
use crate::submit::Submitter;
use crate::validate::{message_chars_remaining, validate};

/// Text currently occupying a field's message slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldText {
    /// Validation failure message
    Error(String),
    /// Live length hint on the message field
    Hint(String),
}

impl FieldText {
    pub fn as_str(&self) -> &str {
        match self {
            FieldText::Error(text) | FieldText::Hint(text) => text,
        }
    }
}

/// Feedback state of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFeedback {
    pub(crate) state: FieldState,
    pub(crate) text: Option<FieldText>,
    pub(crate) shake: Option<TaskHandle>,
}

impl FieldFeedback {
    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn text(&self) -> Option<&FieldText> {
        self.text.as_ref()
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }
}

impl<S: Submitter> Gatekeeper<S> {
    /// Mark a field invalid, show `message`, and shake it.
    ///
    /// A field that is already shaking restarts its shake timer.
    pub fn mark_invalid(&mut self, field: FieldKind, message: impl Into<String>, now: Timestamp) {
        self.set_state(field, FieldState::Invalid);
        self.set_text(field, Some(FieldText::Error(message.into())));

        match self.fields[field].shake.take() {
            Some(previous) => {
                self.scheduler.cancel(previous);
            }
            None => self.effects.push(Effect::Shake { field, active: true }),
        }
        let handle = self
            .scheduler
            .schedule(now + self.config.shake(), Task::EndShake(field));
        self.fields[field].shake = Some(handle);
    }

    /// Mark a field valid and clear its message slot.
    pub fn mark_valid(&mut self, field: FieldKind) {
        self.set_state(field, FieldState::Valid);
        self.set_text(field, None);
    }

    /// Return a field to the untouched state.
    pub fn clear(&mut self, field: FieldKind) {
        self.set_state(field, FieldState::Untouched);
        self.set_text(field, None);
    }

    /// Handle focus leaving a field.
    pub fn on_blur(&mut self, field: FieldKind, value: &str, now: Timestamp) {
        if value.is_empty() {
            self.clear(field);
        } else if validate(field, value) {
            self.mark_valid(field);
        } else {
            self.mark_invalid(field, field.blur_message(), now);
        }
    }

    /// Handle a keystroke in a field.
    pub fn on_input(&mut self, field: FieldKind, value: &str, _now: Timestamp) {
        if self.fields[field].state == FieldState::Invalid && validate(field, value) {
            self.mark_valid(field);
        }

        if field == FieldKind::Message {
            match message_chars_remaining(value) {
                Some(remaining) => {
                    let hint = format!("{remaining} more characters required");
                    self.set_text(field, Some(FieldText::Hint(hint)));
                }
                None => {
                    if matches!(self.fields[field].text, Some(FieldText::Hint(_))) {
                        // Long enough raw text can still be too short trimmed
                        let text = (self.fields[field].state == FieldState::Invalid)
                            .then(|| FieldText::Error(field.blur_message().to_string()));
                        self.set_text(field, text);
                    }
                }
            }
        }
    }

    pub(crate) fn end_shake(&mut self, field: FieldKind) {
        if self.fields[field].shake.take().is_some() {
            self.effects.push(Effect::Shake { field, active: false });
        }
    }

    fn set_state(&mut self, field: FieldKind, state: FieldState) {
        let slot = &mut self.fields[field];
        if slot.state != state {
            debug!(%field, from = ?slot.state, to = ?state, "Field state changed");
            slot.state = state;
            self.effects.push(Effect::FieldState { field, state });
        }
    }

    fn set_text(&mut self, field: FieldKind, text: Option<FieldText>) {
        let slot = &mut self.fields[field];
        if slot.text != text {
            let shown = text.as_ref().map(|t| t.as_str().to_string());
            slot.text = text;
            self.effects.push(Effect::FieldText { field, text: shown });
        }
    }
}
