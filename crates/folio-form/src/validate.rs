//! Field validation rules.
//!
//! Each rule is a pure predicate over the raw input value:
//! - name: at least 2 characters after trimming
//! - email: `local@domain.tld` shape, no whitespace, exactly one `@`
//! - subject: at least 3 characters after trimming
//! - message: at least 10 characters after trimming
//!
//! Lengths count Unicode scalar values. The email rule is a shape check,
//! not RFC 5322.

use std::sync::LazyLock;

use regex::Regex;

use crate::field::FieldKind;

/// Minimum trimmed length of the name field.
pub const NAME_MIN_CHARS: usize = 2;

/// Minimum trimmed length of the subject field.
pub const SUBJECT_MIN_CHARS: usize = 3;

/// Minimum trimmed length of the message field.
pub const MESSAGE_MIN_CHARS: usize = 10;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

/// Validate a value against the rule for `kind`.
pub fn validate(kind: FieldKind, value: &str) -> bool {
    match kind {
        FieldKind::Name => validate_name(value),
        FieldKind::Email => validate_email(value),
        FieldKind::Subject => validate_subject(value),
        FieldKind::Message => validate_message(value),
    }
}

pub fn validate_name(value: &str) -> bool {
    trimmed_len(value) >= NAME_MIN_CHARS
}

pub fn validate_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

pub fn validate_subject(value: &str) -> bool {
    trimmed_len(value) >= SUBJECT_MIN_CHARS
}

pub fn validate_message(value: &str) -> bool {
    trimmed_len(value) >= MESSAGE_MIN_CHARS
}

/// Characters still missing before a raw message reaches the minimum.
///
/// Returns `None` for an empty value or one already long enough; the live
/// hint is only shown in between.
pub fn message_chars_remaining(value: &str) -> Option<usize> {
    let count = value.chars().count();
    if count == 0 || count >= MESSAGE_MIN_CHARS {
        None
    } else {
        Some(MESSAGE_MIN_CHARS - count)
    }
}

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}
