//! Contact form wiring: DOM events in, gatekeeper effects out.

use std::cell::RefCell;

use folio_form::{
    BannerKind, Effect, FieldKind, FieldState, FormValues, Gatekeeper, GatekeeperConfig, PerField,
    ScrollTarget, Timestamp,
};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement,
};

use crate::dom;
use crate::error::{BindError, Result};

const FORM_ID: &str = "contactForm";
const BANNER_ID: &str = "formMessage";
const SUBMIT_SELECTOR: &str = ".form-submit";

thread_local! {
    static FORM: RefCell<Option<FormBinding>> = const { RefCell::new(None) };
}

/// Classes on a `.form-group` for each field state.
pub(crate) fn group_classes(state: FieldState) -> [(&'static str, bool); 2] {
    [
        ("error", state == FieldState::Invalid),
        ("success", state == FieldState::Valid),
    ]
}

pub(crate) fn banner_icon(kind: BannerKind) -> &'static str {
    match kind {
        BannerKind::Success => "fas fa-check-circle",
        BannerKind::Error => "fas fa-exclamation-circle",
        BannerKind::Warning => "fas fa-exclamation-triangle",
    }
}

pub(crate) fn submit_icon(busy: bool) -> &'static str {
    if busy {
        "fas fa-spinner fa-spin"
    } else {
        "fas fa-paper-plane"
    }
}

/// Milliseconds until `deadline`, zero if it has passed.
pub(crate) fn timer_delay(now: Timestamp, deadline: Timestamp) -> u64 {
    deadline.as_millis().saturating_sub(now.as_millis())
}

struct FieldNodes {
    input: HtmlElement,
    group: Element,
    error: Option<HtmlElement>,
}

impl FieldNodes {
    fn find(document: &Document, kind: FieldKind) -> Result<Self> {
        let input: HtmlElement = dom::by_id(document, kind.element_id())?;
        let group = input
            .closest(".form-group")?
            .ok_or_else(|| BindError::MissingElement(format!("#{kind} .form-group")))?;
        let error = dom::query(&group, ".form-error").ok();
        Ok(Self {
            input,
            group,
            error,
        })
    }

    fn value(&self) -> String {
        if let Some(input) = self.input.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.input.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }
}

/// DOM nodes the gatekeeper's effects are applied to.
struct FormView {
    document: Document,
    form: HtmlFormElement,
    fields: PerField<FieldNodes>,
    submit: HtmlButtonElement,
    banner: HtmlElement,
}

impl FormView {
    fn find(document: Document) -> Result<Self> {
        let form: HtmlFormElement = dom::by_id(&document, FORM_ID)?;
        let fields = PerField::try_from_fn(|kind| FieldNodes::find(&document, kind))?;
        let submit = dom::query(&form, SUBMIT_SELECTOR)?;
        let banner = dom::by_id(&document, BANNER_ID)?;
        Ok(Self {
            document,
            form,
            fields,
            submit,
            banner,
        })
    }

    fn values(&self) -> FormValues {
        FormValues::new(
            self.fields[FieldKind::Name].value(),
            self.fields[FieldKind::Email].value(),
            self.fields[FieldKind::Subject].value(),
            self.fields[FieldKind::Message].value(),
        )
    }

    fn apply(&self, effect: Effect) -> Result<()> {
        match effect {
            Effect::FieldState { field, state } => {
                for (class, on) in group_classes(state) {
                    dom::set_class(&self.fields[field].group, class, on);
                }
            }
            Effect::FieldText { field, text } => {
                if let Some(slot) = &self.fields[field].error {
                    slot.set_text_content(text.as_deref());
                    dom::set_style(slot, "display", if text.is_some() { "block" } else { "" });
                }
            }
            Effect::Shake { field, active } => {
                dom::set_class(&self.fields[field].input, "shake", active);
            }
            Effect::ScrollIntoView { target } => match target {
                ScrollTarget::Field(field) => dom::scroll_into_center(&self.fields[field].group),
                ScrollTarget::Banner => dom::scroll_into_center(&self.banner),
            },
            Effect::SubmitControl { busy, label } => {
                self.submit.set_disabled(busy);
                dom::set_icon_text(&self.document, &self.submit, submit_icon(busy), &label)?;
            }
            Effect::BannerShown { banner } => {
                self.banner
                    .set_class_name(&format!("form-message {}", banner.kind.class()));
                dom::set_icon_text(
                    &self.document,
                    &self.banner,
                    banner_icon(banner.kind),
                    &banner.text,
                )?;
                dom::set_style(&self.banner, "transition", "");
                dom::set_style(&self.banner, "opacity", "1");
                dom::set_style(&self.banner, "display", "block");
            }
            Effect::BannerFading { duration_ms } => {
                let seconds = duration_ms as f64 / 1000.0;
                dom::set_style(&self.banner, "transition", &format!("opacity {seconds}s ease"));
                dom::set_style(&self.banner, "opacity", "0");
            }
            Effect::BannerHidden => {
                self.banner.set_class_name("form-message");
                dom::set_style(&self.banner, "display", "none");
                dom::set_style(&self.banner, "opacity", "1");
            }
            Effect::FormReset => self.form.reset(),
        }
        Ok(())
    }
}

struct FormBinding {
    gatekeeper: Gatekeeper,
    view: FormView,
    timer: Option<i32>,
}

impl FormBinding {
    /// Apply pending effects and re-arm the timer for the next deadline.
    fn flush(&mut self, now: Timestamp) {
        for effect in self.gatekeeper.take_effects() {
            dom::log_failure("apply form effect", self.view.apply(effect));
        }
        if let Some(id) = self.timer.take() {
            dom::clear_timeout(id);
        }
        if let Some(deadline) = self.gatekeeper.next_deadline() {
            match dom::set_timeout(timer_delay(now, deadline), tick) {
                Ok(id) => self.timer = Some(id),
                Err(e) => warn!(error = %e, "Failed to arm form timer"),
            }
        }
    }
}

/// Run `f` against the installed binding, then flush its effects.
fn with_binding(f: impl FnOnce(&mut FormBinding, Timestamp)) {
    FORM.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            warn!("Form handler re-entered, event dropped");
            return;
        };
        if let Some(binding) = slot.as_mut() {
            let now = dom::now();
            f(binding, now);
            binding.flush(now);
        }
    });
}

fn tick() {
    with_binding(|binding, now| {
        binding.timer = None;
        let fired = binding.gatekeeper.advance(now);
        debug!(fired, at = now.as_millis(), "Form timers fired");
    });
}

/// Find the contact form and attach its handlers. Pages without the form
/// are left alone.
pub fn install(document: &Document, config: GatekeeperConfig) -> Result<()> {
    if document.get_element_by_id(FORM_ID).is_none() {
        debug!("No contact form on this page");
        return Ok(());
    }
    let view = FormView::find(document.clone())?;

    for kind in FieldKind::ALL {
        let input = &view.fields[kind].input;
        dom::listen(input, "blur", move |_| {
            with_binding(|b, now| {
                let value = b.view.fields[kind].value();
                b.gatekeeper.on_blur(kind, &value, now);
            })
        })?;
        dom::listen(input, "input", move |_| {
            with_binding(|b, now| {
                let value = b.view.fields[kind].value();
                b.gatekeeper.on_input(kind, &value, now);
            })
        })?;
    }

    dom::listen(&view.form, "submit", |event| {
        event.prevent_default();
        with_binding(|b, now| {
            let values = b.view.values();
            if let Err(e) = b.gatekeeper.submit(&values, now) {
                debug!(reason = %e, "Submission not accepted");
            }
        })
    })?;

    FORM.with(|cell| {
        *cell.borrow_mut() = Some(FormBinding {
            gatekeeper: Gatekeeper::simulated(config),
            view,
            timer: None,
        });
    });
    debug!("Contact form bound");
    Ok(())
}
