//! Contact form fields and the rules that decide whether a value is acceptable.
//!
//! Validation only looks at the value it is given. Showing or hiding the error
//! indicator is left to the controller, which keeps one [`FieldState`] per
//! validated field so the indicator and the message can never disagree.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s]{2,50}$").expect("name pattern compiles"));

// Deliberately loose: something@something.something
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub const MESSAGE_MIN_LENGTH: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const SERVICES: &[SelectOption] = &[
    SelectOption { value: "website", label: "Business Website" },
    SelectOption { value: "web-app", label: "Web Application" },
    SelectOption { value: "landing-page", label: "Landing Page" },
    SelectOption { value: "ui-ux", label: "UI/UX Design" },
    SelectOption { value: "ecommerce", label: "E-commerce Store" },
    SelectOption { value: "maintenance", label: "Maintenance & Support" },
];

pub const BUDGETS: &[SelectOption] = &[
    SelectOption { value: "under-500", label: "Under $500" },
    SelectOption { value: "500-1000", label: "$500 - $1,000" },
    SelectOption { value: "1000-2500", label: "$1,000 - $2,500" },
    SelectOption { value: "2500-5000", label: "$2,500 - $5,000" },
    SelectOption { value: "5000-plus", label: "$5,000+" },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Service,
    Budget,
    Message,
}

impl Field {
    /// Form order. The first invalid field in this order receives focus.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Service,
        Field::Budget,
        Field::Message,
    ];

    /// Element id, also the key used in the draft record and the payload.
    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Service => "service",
            Field::Budget => "budget",
            Field::Message => "message",
        }
    }

    pub fn error_slot_id(self) -> String {
        format!("{}Error", self.id())
    }

    pub fn rule(self) -> Rule {
        match self {
            Field::Name => Rule::Pattern(&NAME_PATTERN),
            Field::Email => Rule::Pattern(&EMAIL_PATTERN),
            Field::Service => Rule::OneOf(SERVICES),
            Field::Budget => Rule::OneOf(BUDGETS),
            Field::Message => Rule::MinLength(MESSAGE_MIN_LENGTH),
        }
    }

    pub fn invalid_message(self) -> &'static str {
        match self {
            Field::Name => "Please enter a valid name (2-50 characters)",
            Field::Email => "Please enter a valid email address",
            Field::Service => "Please select a service",
            Field::Budget => "Please select a budget range",
            Field::Message => "Please enter your message (minimum 10 characters)",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Rule {
    Pattern(&'static Lazy<Regex>),
    /// Measured in UTF-16 code units, the unit of `maxlength`/`minlength` in the browser.
    MinLength(usize),
    OneOf(&'static [SelectOption]),
}

impl Rule {
    /// `value` is expected to be trimmed and non-empty.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Rule::Pattern(pattern) => pattern.is_match(value),
            Rule::MinLength(min) => value.encode_utf16().count() >= *min,
            Rule::OneOf(options) => options.iter().any(|option| option.value == value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
    #[error("{}", .0.invalid_message())]
    Invalid(Field),
}

/// Outcome of validating one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldState {
    value: String,
    error: Option<ValidationError>,
}

impl FieldState {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.map(|error| error.to_string())
    }
}

pub fn validate(field: Field, raw: &str) -> FieldState {
    let value = raw.trim();
    let error = if value.is_empty() {
        Some(ValidationError::Required)
    } else if !field.rule().accepts(value) {
        Some(ValidationError::Invalid(field))
    } else {
        None
    };

    FieldState {
        value: value.to_string(),
        error,
    }
}

/// Raw field values exactly as typed. Doubles as the draft record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub service: String,
    pub budget: String,
    pub message: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Service => &self.service,
            Field::Budget => &self.budget,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Service => &mut self.service,
            Field::Budget => &mut self.budget,
            Field::Message => &mut self.message,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejects(field: Field, raw: &str) -> bool {
        !validate(field, raw).is_valid()
    }

    #[test]
    fn test_name_boundaries() {
        assert!(validate(Field::Name, "Al").is_valid());
        assert!(validate(Field::Name, &"a".repeat(50)).is_valid());
        let spaced = format!("{} {}", "a".repeat(24), "b".repeat(25));
        assert!(validate(Field::Name, &spaced).is_valid());
        assert!(rejects(Field::Name, "A"));
        assert!(rejects(Field::Name, &"a".repeat(51)));
    }

    #[test]
    fn test_name_rejects_digits_and_symbols() {
        for name in ["R2D2", "Jane!", "O'Brien", "anna_k", "José"] {
            let state = validate(Field::Name, name);
            assert_eq!(state.error(), Some(&ValidationError::Invalid(Field::Name)), "{name}");
        }
    }

    #[test]
    fn test_name_is_trimmed_before_matching() {
        let state = validate(Field::Name, "   Mary Jane  ");
        assert!(state.is_valid());
        assert_eq!(state.value(), "Mary Jane");
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate(Field::Email, "a@b.co").is_valid());
        assert!(validate(Field::Email, "first.last@mail.example.org").is_valid());
        assert!(rejects(Field::Email, "ab.co"));
        assert!(rejects(Field::Email, "a@bco"));
        assert!(rejects(Field::Email, "a b@c.de"));
        assert!(rejects(Field::Email, "a@@b.co"));
    }

    #[test]
    fn test_message_minimum_length() {
        assert!(validate(Field::Message, "0123456789").is_valid());
        assert!(validate(Field::Message, "  0123456789  ").is_valid());
        assert!(rejects(Field::Message, "012345678"));
        assert!(rejects(Field::Message, " 012345678        "));
    }

    #[test]
    fn test_message_length_in_utf16_units() {
        assert!(rejects(Field::Message, "ééééééééé"));
        assert!(validate(Field::Message, "éééééééééé").is_valid());
        // Astral characters take two units each.
        assert!(validate(Field::Message, "😀😀😀😀😀").is_valid());
        assert!(rejects(Field::Message, "😀😀😀😀a"));
    }

    #[test]
    fn test_selects_require_known_option() {
        assert!(validate(Field::Service, "ui-ux").is_valid());
        assert!(validate(Field::Budget, "5000-plus").is_valid());
        assert_eq!(
            validate(Field::Service, "astrology").error(),
            Some(&ValidationError::Invalid(Field::Service))
        );
        assert_eq!(
            validate(Field::Budget, "a lot").error_message().as_deref(),
            Some("Please select a budget range")
        );
    }

    #[test]
    fn test_empty_is_required_before_pattern() {
        for field in Field::ALL {
            let state = validate(field, "   ");
            assert_eq!(state.error(), Some(&ValidationError::Required), "{field}");
            assert_eq!(state.error_message().as_deref(), Some("This field is required"));
        }
    }

    #[test]
    fn test_invalid_state_always_has_message() {
        let cases = [
            (Field::Name, "1"),
            (Field::Email, "nope"),
            (Field::Message, "short"),
        ];
        for (field, raw) in cases {
            let state = validate(field, raw);
            assert!(!state.is_valid());
            assert!(state.error_message().is_some_and(|message| !message.is_empty()));
        }
        assert_eq!(validate(Field::Name, "Ada").error_message(), None);
    }

    #[test]
    fn test_form_values_partial_json() {
        let raw = r#"{"name":"Ada","email":"ada@example.com","extra":"ignored"}"#;
        let values: FormValues = serde_json::from_str(raw).unwrap();
        assert_eq!(values.get(Field::Name), "Ada");
        assert_eq!(values.get(Field::Email), "ada@example.com");
        assert_eq!(values.get(Field::Message), "");
        assert!(!values.is_empty());
        assert!(FormValues::default().is_empty());
    }

    #[test]
    fn test_error_slot_ids() {
        assert_eq!(Field::Name.error_slot_id(), "nameError");
        assert_eq!(Field::Budget.error_slot_id(), "budgetError");
    }
}
