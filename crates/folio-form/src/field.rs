//! The four contact-form fields and their per-field state.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the four contact-form inputs, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Name,
    Email,
    Subject,
    Message,
}

impl FieldKind {
    /// All fields in the order they appear in the form.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Name,
        FieldKind::Email,
        FieldKind::Subject,
        FieldKind::Message,
    ];

    /// Position in form order.
    pub const fn index(self) -> usize {
        match self {
            FieldKind::Name => 0,
            FieldKind::Email => 1,
            FieldKind::Subject => 2,
            FieldKind::Message => 3,
        }
    }

    /// DOM id of the input element.
    pub const fn element_id(self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Email => "email",
            FieldKind::Subject => "subject",
            FieldKind::Message => "message",
        }
    }

    /// Parse a DOM id back into a field.
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.element_id() == id)
    }

    /// Message shown when the field fails validation on blur.
    pub const fn blur_message(self) -> &'static str {
        match self {
            FieldKind::Name => "Name must be at least 2 characters",
            FieldKind::Email => "Please enter a valid email address",
            FieldKind::Subject => "Subject must be at least 3 characters",
            FieldKind::Message => "Message must be at least 10 characters",
        }
    }

    /// Message shown when the field fails validation on submit.
    pub const fn submit_message(self) -> &'static str {
        match self {
            FieldKind::Name => "Please enter your name",
            FieldKind::Email => "Please enter a valid email address",
            FieldKind::Subject => "Please enter a subject",
            FieldKind::Message => "Please enter your message (minimum 10 characters)",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Displayed validation state of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    /// Never judged, or emptied after being judged.
    #[default]
    Untouched,
    Valid,
    Invalid,
}

/// Current values of the four inputs. Doubles as the submission payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormValues {
    /// Build from the four values in form order.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Value of one field.
    pub fn get(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::Name => &self.name,
            FieldKind::Email => &self.email,
            FieldKind::Subject => &self.subject,
            FieldKind::Message => &self.message,
        }
    }
}

/// One value per field, indexable by [`FieldKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerField<T>([T; 4]);

impl<T> PerField<T> {
    pub fn from_fn(f: impl FnMut(FieldKind) -> T) -> Self {
        Self(FieldKind::ALL.map(f))
    }

    /// Build from a fallible constructor, stopping at the first error.
    pub fn try_from_fn<E>(mut f: impl FnMut(FieldKind) -> Result<T, E>) -> Result<Self, E> {
        let [name, email, subject, message] = FieldKind::ALL;
        Ok(Self([f(name)?, f(email)?, f(subject)?, f(message)?]))
    }

    /// Iterate `(kind, value)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &T)> {
        FieldKind::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<FieldKind> for PerField<T> {
    type Output = T;

    fn index(&self, kind: FieldKind) -> &T {
        &self.0[kind.index()]
    }
}

impl<T> IndexMut<FieldKind> for PerField<T> {
    fn index_mut(&mut self, kind: FieldKind) -> &mut T {
        &mut self.0[kind.index()]
    }
}
