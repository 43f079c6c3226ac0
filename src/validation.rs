//! Field validation rules of the contact forms.
//!
//! Rules are checked in a fixed order and the first failing one wins:
//! required, e-mail format, phone format, minimum message length, accepted checkbox.

use fancy_regex::Regex;

use crate::config::ValidationMessages;
use crate::dom::{Dom, NodeId};
use crate::{Error, Result};

/// Whitespace as browsers read `\s`: it includes U+FEFF and leaves out U+0085.
macro_rules! space_class {
    () => {
        r"\t\n\x0B\x0C\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}"
    };
}

const EMAIL_PATTERN: &str = concat!(
    "^[^", space_class!(), "@]+@[^", space_class!(), r"@]+\.[^", space_class!(), "@]+$"
);
// Digits are ASCII only.
const PHONE_PATTERN: &str = concat!("^[+()0-9", space_class!(), "-]{10,20}$");
const MIN_MESSAGE_CHARS: usize = 10;

/// Snapshot of a form control, as the validator sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    /// Lower-case tag name (`input`, `textarea`, `select`).
    pub tag: String,
    /// Lower-case `type`, following browser defaults (`text`, `textarea`, `select-one`).
    pub input_type: String,
    pub value: String,
    pub checked: bool,
    pub required: bool,
}

impl FieldState {
    pub fn input(input_type: &str, value: &str) -> Self {
        Self {
            tag: "input".into(),
            input_type: input_type.to_ascii_lowercase(),
            value: value.to_string(),
            checked: false,
            required: false,
        }
    }

    pub fn textarea(value: &str) -> Self {
        Self {
            tag: "textarea".into(),
            input_type: "textarea".into(),
            value: value.to_string(),
            checked: false,
            required: false,
        }
    }

    pub fn checkbox(checked: bool) -> Self {
        Self {
            checked,
            ..Self::input("checkbox", "on")
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub(crate) fn from_node(dom: &Dom, node: NodeId) -> Self {
        let tag = dom.tag_name(node).unwrap_or_default().to_ascii_lowercase();
        let input_type = match tag.as_str() {
            "textarea" => "textarea".to_string(),
            "select" => "select-one".to_string(),
            _ => dom
                .attr(node, "type")
                .map(|kind| kind.trim().to_ascii_lowercase())
                .filter(|kind| !kind.is_empty())
                .unwrap_or_else(|| "text".into()),
        };
        let mut value = dom.value(node).unwrap_or_default();
        if matches!(input_type.as_str(), "checkbox" | "radio") && !dom.has_attr(node, "value") {
            value = "on".into();
        }
        Self {
            tag,
            input_type,
            value,
            checked: dom.checked(node),
            required: dom.required(node),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("field required")]
    Required,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid phone")]
    InvalidPhone,
    #[error("minimum length")]
    TooShort,
    #[error("must accept")]
    MustAccept,
}

impl FieldError {
    /// The user-facing text for this error.
    pub fn message<'a>(&self, messages: &'a ValidationMessages) -> &'a str {
        match self {
            Self::Required => &messages.required,
            Self::InvalidEmail => &messages.invalid_email,
            Self::InvalidPhone => &messages.invalid_phone,
            Self::TooShort => &messages.too_short,
            Self::MustAccept => &messages.must_accept,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldRules {
    email: Regex,
    phone: Regex,
}

impl FieldRules {
    pub fn new() -> Result<Self> {
        Ok(Self {
            email: compile(EMAIL_PATTERN)?,
            phone: compile(PHONE_PATTERN)?,
        })
    }

    /// Returns the first rule `field` violates, if any.
    pub fn check(&self, field: &FieldState) -> Result<Option<FieldError>> {
        if field.required && trim_space(&field.value).is_empty() {
            return Ok(Some(FieldError::Required));
        }

        if field.input_type == "email"
            && !field.value.is_empty()
            && !is_match(&self.email, &field.value)?
        {
            return Ok(Some(FieldError::InvalidEmail));
        }

        if field.input_type == "tel"
            && !field.value.is_empty()
            && !is_match(&self.phone, &field.value)?
        {
            return Ok(Some(FieldError::InvalidPhone));
        }

        if field.tag == "textarea"
            && field.required
            && trim_space(&field.value).chars().count() < MIN_MESSAGE_CHARS
        {
            return Ok(Some(FieldError::TooShort));
        }

        if field.input_type == "checkbox" && field.required && !field.checked {
            return Ok(Some(FieldError::MustAccept));
        }

        Ok(None)
    }
}

/// Whitespace as browsers trim it; unlike `char::is_whitespace` this includes U+FEFF.
pub(crate) fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' ' | '\u{A0}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}

fn trim_space(value: &str) -> &str {
    value.trim_matches(is_space)
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| Error::Pattern(format!("{pattern}: {err}")))
}

fn is_match(regex: &Regex, value: &str) -> Result<bool> {
    regex
        .is_match(value)
        .map_err(|err| Error::Pattern(err.to_string()))
}
