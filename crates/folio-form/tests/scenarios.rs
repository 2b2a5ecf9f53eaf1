//! End-to-end submission scenarios driven through the public API.

use folio_form::{
    Ack, BannerKind, BannerPhase, Effect, Error, FieldKind, FieldState, FieldText, FormValues,
    Gatekeeper, GatekeeperConfig, ScrollTarget, SubmissionError, SubmissionState, Submitter,
    Timestamp,
};

fn ms(v: u64) -> Timestamp {
    Timestamp::from_millis(v)
}

fn valid_values() -> FormValues {
    FormValues::new("Al", "al@x.com", "Hi!", "This is ten+")
}

fn gatekeeper() -> Gatekeeper {
    Gatekeeper::simulated(GatekeeperConfig::default())
}

/// Keeps every payload it is handed.
#[derive(Default)]
struct Outbox {
    delivered: Vec<FormValues>,
}

impl Submitter for Outbox {
    fn submit(&mut self, payload: &FormValues) -> Result<Ack, SubmissionError> {
        self.delivered.push(payload.clone());
        Ok(Ack {
            reference: Some(format!("msg-{}", self.delivered.len())),
        })
    }
}

#[test]
fn valid_submit_enters_sending() {
    let mut gk = gatekeeper();

    gk.submit(&valid_values(), ms(1_000)).unwrap();

    assert_eq!(gk.state(), SubmissionState::Sending);
    assert!(gk.is_busy());
    assert_eq!(gk.submit_label(), "Sending...");
    assert_eq!(gk.last_submit(), Some(ms(1_000)));
    for field in FieldKind::ALL {
        assert_eq!(gk.field_state(field), FieldState::Valid);
    }
    assert!(gk.effects().contains(&Effect::SubmitControl {
        busy: true,
        label: "Sending...".into(),
    }));
}

#[test]
fn invalid_submit_marks_every_failing_field() {
    let mut gk = gatekeeper();
    let values = FormValues::new("", "bad", "", "short");

    let err = gk.submit(&values, ms(0)).unwrap_err();

    assert_eq!(
        err,
        Error::Invalid {
            fields: FieldKind::ALL.to_vec()
        }
    );
    let expected = [
        (FieldKind::Name, "Please enter your name"),
        (FieldKind::Email, "Please enter a valid email address"),
        (FieldKind::Subject, "Please enter a subject"),
        (FieldKind::Message, "Please enter your message (minimum 10 characters)"),
    ];
    for (field, message) in expected {
        assert_eq!(gk.field_state(field), FieldState::Invalid);
        assert_eq!(
            gk.field(field).text(),
            Some(&FieldText::Error(message.to_string()))
        );
        assert!(gk.field(field).is_shaking());
    }

    let effects = gk.take_effects();
    assert_eq!(
        effects.last(),
        Some(&Effect::ScrollIntoView {
            target: ScrollTarget::Field(FieldKind::Name)
        })
    );
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::SubmitControl { .. })));
    assert_eq!(gk.state(), SubmissionState::Idle);
    assert!(!gk.is_busy());
    assert_eq!(gk.submit_label(), "Send Message");
}

#[test]
fn first_invalid_field_in_form_order_is_scrolled_to() {
    let mut gk = gatekeeper();
    let values = FormValues::new("Al", "al@x.com", "Hi", "short");

    gk.submit(&values, ms(0)).unwrap_err();

    assert_eq!(gk.field_state(FieldKind::Name), FieldState::Valid);
    assert_eq!(gk.field_state(FieldKind::Email), FieldState::Valid);
    assert!(gk.effects().contains(&Effect::ScrollIntoView {
        target: ScrollTarget::Field(FieldKind::Subject)
    }));
}

#[test]
fn second_submit_within_cooldown_is_rejected() {
    let mut gk = gatekeeper();

    gk.submit(&valid_values(), ms(0)).unwrap();
    assert_eq!(gk.state(), SubmissionState::Sending);
    gk.take_effects();

    let err = gk.submit(&valid_values(), ms(1_000)).unwrap_err();
    assert!(matches!(err, Error::Cooldown { .. }));

    // State and timestamp untouched, warning shown
    assert_eq!(gk.state(), SubmissionState::Sending);
    assert_eq!(gk.last_submit(), Some(ms(0)));
    let banner = gk.banner().unwrap();
    assert_eq!(banner.kind, BannerKind::Warning);
    assert_eq!(
        banner.text,
        "Please wait a few seconds before submitting again."
    );
    assert_eq!(gk.take_effects().len(), 1);
}

#[test]
fn cooldown_boundaries() {
    let t = 50_000;

    let mut early = gatekeeper();
    early.submit(&valid_values(), ms(t)).unwrap();
    early.advance(ms(t + 2_000));
    assert!(matches!(
        early.submit(&valid_values(), ms(t + 4_999)),
        Err(Error::Cooldown { .. })
    ));

    let mut exact = gatekeeper();
    exact.submit(&valid_values(), ms(t)).unwrap();
    exact.advance(ms(t + 2_000));
    assert!(exact.submit(&valid_values(), ms(t + 5_000)).is_ok());

    let mut late = gatekeeper();
    late.submit(&valid_values(), ms(t)).unwrap();
    late.advance(ms(t + 2_000));
    assert!(late.submit(&valid_values(), ms(t + 5_001)).is_ok());
}

#[test]
fn rejected_attempt_does_not_extend_cooldown() {
    let mut gk = gatekeeper();
    gk.submit(&valid_values(), ms(0)).unwrap();
    gk.advance(ms(2_000));

    gk.submit(&valid_values(), ms(4_000)).unwrap_err();
    assert!(gk.submit(&valid_values(), ms(5_000)).is_ok());
}

#[test]
fn success_resets_form_and_shows_banner() {
    let mut gk = gatekeeper();
    gk.submit(&valid_values(), ms(0)).unwrap();
    gk.take_effects();

    assert_eq!(gk.advance(ms(2_000)), 1);

    assert_eq!(gk.state(), SubmissionState::Succeeded);
    for field in FieldKind::ALL {
        assert_eq!(gk.field_state(field), FieldState::Untouched);
    }
    let banner = gk.banner().unwrap();
    assert_eq!(banner.kind, BannerKind::Success);
    assert!(banner.text.starts_with("Thank you, Al!"));

    let effects = gk.take_effects();
    let position = |wanted: &Effect| effects.iter().position(|e| e == wanted).unwrap();
    let reset = position(&Effect::FormReset);
    let scroll = position(&Effect::ScrollIntoView {
        target: ScrollTarget::Banner,
    });
    let ready = position(&Effect::SubmitControl {
        busy: false,
        label: "Send Message".into(),
    });
    assert!(matches!(effects[0], Effect::BannerShown { .. }));
    assert!(reset < scroll && scroll < ready);
}

#[test]
fn success_banner_fades_then_hides() {
    let mut gk = gatekeeper();
    gk.submit(&valid_values(), ms(0)).unwrap();
    gk.advance(ms(2_000));
    assert_eq!(gk.banner_phase(), BannerPhase::Shown);
    gk.take_effects();

    gk.advance(ms(6_999));
    assert_eq!(gk.banner_phase(), BannerPhase::Shown);

    gk.advance(ms(7_000));
    assert_eq!(gk.banner_phase(), BannerPhase::Fading);
    assert_eq!(
        gk.take_effects(),
        vec![Effect::BannerFading { duration_ms: 500 }]
    );

    gk.advance(ms(7_499));
    assert_eq!(gk.banner_phase(), BannerPhase::Fading);

    gk.advance(ms(7_500));
    assert_eq!(gk.banner_phase(), BannerPhase::Hidden);
    assert!(gk.banner().is_none());
    assert_eq!(gk.take_effects(), vec![Effect::BannerHidden]);
    assert_eq!(gk.pending_tasks(), 0);
}

#[test]
fn coarse_advance_runs_the_whole_dismissal() {
    let mut gk = gatekeeper();
    gk.submit(&valid_values(), ms(0)).unwrap();

    // Delivery, fade start and hide all fire in one call
    assert_eq!(gk.advance(ms(60_000)), 3);
    assert_eq!(gk.banner_phase(), BannerPhase::Hidden);
    assert_eq!(gk.state(), SubmissionState::Succeeded);
}

#[test]
fn failing_submitter_reports_failure() {
    let submitter =
        |_: &FormValues| -> Result<Ack, SubmissionError> { Err(SubmissionError::Transport("offline".into())) };
    let mut gk = Gatekeeper::new(GatekeeperConfig::default(), submitter);

    gk.submit(&valid_values(), ms(0)).unwrap();
    gk.take_effects();
    gk.advance(ms(2_000));

    assert_eq!(gk.state(), SubmissionState::Failed);
    assert!(!gk.is_busy());
    let banner = gk.banner().unwrap();
    assert_eq!(banner.kind, BannerKind::Error);
    assert_eq!(
        banner.text,
        "Oops! Something went wrong. Please try again later."
    );

    // Values are kept; no reset, no auto-hide
    let effects = gk.take_effects();
    assert!(!effects.contains(&Effect::FormReset));
    for field in FieldKind::ALL {
        assert_eq!(gk.field_state(field), FieldState::Valid);
    }
    assert_eq!(gk.pending_tasks(), 0);
}

#[test]
fn failed_state_recovers_on_next_accepted_attempt() {
    let mut calls = 0;
    let submitter = move |_: &FormValues| -> Result<Ack, SubmissionError> {
        calls += 1;
        if calls == 1 {
            Err(SubmissionError::Rejected("busy".into()))
        } else {
            Ok(Ack::default())
        }
    };
    let mut gk = Gatekeeper::new(GatekeeperConfig::default(), submitter);

    gk.submit(&valid_values(), ms(0)).unwrap();
    gk.advance(ms(2_000));
    assert_eq!(gk.state(), SubmissionState::Failed);

    gk.submit(&valid_values(), ms(5_000)).unwrap();
    assert_eq!(gk.state(), SubmissionState::Sending);
    gk.advance(ms(7_000));
    assert_eq!(gk.state(), SubmissionState::Succeeded);
}

#[test]
fn late_hide_timer_can_hide_a_newer_banner() {
    // Default behaviour: timers from an earlier banner are not cancelled.
    let config = GatekeeperConfig {
        cooldown_ms: 500,
        latency_ms: 100,
        ..GatekeeperConfig::default()
    };
    let mut gk = Gatekeeper::simulated(config);

    gk.submit(&valid_values(), ms(0)).unwrap();
    gk.advance(ms(100)); // banner #1, fade at 5100, hide at 5600
    gk.advance(ms(5_100));
    assert_eq!(gk.banner_phase(), BannerPhase::Fading);

    gk.submit(&valid_values(), ms(5_300)).unwrap();
    gk.advance(ms(5_400)); // banner #2 shown
    assert_eq!(gk.banner_phase(), BannerPhase::Shown);

    gk.advance(ms(5_600)); // banner #1's hide timer
    assert_eq!(gk.banner_phase(), BannerPhase::Hidden);
}

#[test]
fn superseded_fades_can_be_cancelled() {
    let config = GatekeeperConfig {
        cooldown_ms: 500,
        latency_ms: 100,
        cancel_superseded_fades: true,
        ..GatekeeperConfig::default()
    };
    let mut gk = Gatekeeper::simulated(config);

    gk.submit(&valid_values(), ms(0)).unwrap();
    gk.advance(ms(100));
    gk.advance(ms(5_100));
    assert_eq!(gk.banner_phase(), BannerPhase::Fading);

    gk.submit(&valid_values(), ms(5_300)).unwrap();
    gk.advance(ms(5_400));
    assert_eq!(gk.banner_phase(), BannerPhase::Shown);

    gk.advance(ms(5_600));
    assert_eq!(gk.banner_phase(), BannerPhase::Shown);
    assert_eq!(gk.next_deadline(), Some(ms(10_400)));
}

#[test]
fn correction_after_failed_submit_is_not_stale() {
    let mut gk = gatekeeper();
    gk.submit(&FormValues::new("Al", "bad", "Hi!", "This is ten+"), ms(0))
        .unwrap_err();
    assert_eq!(gk.field_state(FieldKind::Email), FieldState::Invalid);

    gk.on_input(FieldKind::Email, "al@x.com", ms(100));
    assert_eq!(gk.field_state(FieldKind::Email), FieldState::Valid);
    assert!(gk.field(FieldKind::Email).text().is_none());

    gk.on_blur(FieldKind::Email, "al@x.com", ms(200));
    assert_eq!(gk.field_state(FieldKind::Email), FieldState::Valid);
}

#[test]
fn submitter_receives_values_captured_at_acceptance() {
    let mut gk = Gatekeeper::new(GatekeeperConfig::default(), Outbox::default());
    gk.submit(&valid_values(), ms(0)).unwrap();

    // Edits during the latency do not reach the payload
    gk.on_input(FieldKind::Name, "Someone else", ms(500));
    assert!(gk.submitter().delivered.is_empty());

    gk.advance(ms(2_000));
    assert_eq!(gk.submitter().delivered, vec![valid_values()]);

    gk.submit(&valid_values(), ms(5_000)).unwrap();
    gk.advance(ms(7_000));
    assert_eq!(gk.submitter().delivered.len(), 2);
    assert_eq!(gk.state(), SubmissionState::Succeeded);
}
