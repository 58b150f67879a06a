//! Field-keyed validation errors and the rules that produce them.
//!
//! [`FieldErrors`] is a multi-map from field name to every violation
//! recorded against it. Checks append to it independently, so a caller
//! always sees the complete set of problems at once. Errors that are not
//! tied to a single field are recorded under [`BASE`].

use crate::{FieldError, RosterError, RosterResult};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use validator::{ValidationError, ValidationErrors};

/// Key for errors that do not belong to a particular field.
pub const BASE: &str = "base";

/// Human-readable messages attached to each rule.
pub mod messages {
    pub const BLANK: &str = "can't be blank";
    pub const INVALID: &str = "is invalid";
    pub const REQUIRED: &str = "is required";
    pub const TOO_SMALL: &str = "must be greater than or equal to 1";
    pub const TOO_LARGE: &str = "must be less than or equal to 90";
    pub const INCLUSION: &str = "is not included in the list";
    pub const TAKEN: &str = "already taken";
}

/// Machine-readable codes attached to each rule.
pub mod codes {
    pub const BLANK: &str = "blank";
    pub const INVALID: &str = "invalid";
    pub const REQUIRED: &str = "required";
    pub const GREATER_THAN_OR_EQUAL_TO: &str = "greater_than_or_equal_to";
    pub const LESS_THAN_OR_EQUAL_TO: &str = "less_than_or_equal_to";
    pub const INCLUSION: &str = "inclusion";
    pub const TAKEN: &str = "taken";
    pub const STORAGE: &str = "storage";
}

/// A single rule violation recorded against a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&ValidationError> for Violation {
    fn from(error: &ValidationError) -> Self {
        Self {
            code: error.code.to_string(),
            message: error
                .message
                .as_ref()
                .map_or_else(|| error.code.to_string(), ToString::to_string),
        }
    }
}

/// Accumulated validation failures, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<Violation>>,
}

impl FieldErrors {
    /// Creates an empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection holding one violation.
    #[must_use]
    pub fn single(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut errors = Self::new();
        errors.add(field, code, message);
        errors
    }

    /// Records a violation against `field`.
    pub fn add(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.add_violation(field, Violation::new(code, message));
    }

    /// Records an already-built violation against `field`.
    pub fn add_violation(&mut self, field: impl Into<String>, violation: Violation) {
        self.fields.entry(field.into()).or_default().push(violation);
    }

    /// Records an error that is not tied to a specific field.
    pub fn add_base(&mut self, message: impl Into<String>) {
        self.add(BASE, codes::INVALID, message);
    }

    /// Records the outcome of a rule against `field` if the rule failed.
    pub fn check(&mut self, field: &str, outcome: Result<(), ValidationError>) {
        if let Err(error) = outcome {
            self.add_violation(field, Violation::from(&error));
        }
    }

    /// Moves every violation of `other` into this collection.
    pub fn merge(&mut self, other: Self) {
        for (field, violations) in other.fields {
            self.fields.entry(field).or_default().extend(violations);
        }
    }

    /// Absorbs the field errors produced by a `validator::Validate` run.
    ///
    /// Struct-level errors (registered under `__all__`) go to [`BASE`].
    pub fn merge_validator_errors(&mut self, errors: &ValidationErrors) {
        for (field, field_errors) in errors.field_errors() {
            let key = if field == "__all__" {
                BASE.to_string()
            } else {
                field.to_string()
            };
            for error in field_errors {
                self.add_violation(key.clone(), Violation::from(error));
            }
        }
    }

    /// Returns the messages recorded against `field`.
    #[must_use]
    pub fn messages(&self, field: &str) -> Vec<&str> {
        self.violations(field)
            .iter()
            .map(|v| v.message.as_str())
            .collect()
    }

    /// Returns the violations recorded against `field`.
    #[must_use]
    pub fn violations(&self, field: &str) -> &[Violation] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// Returns true if `field` has at least one violation.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(|v| !v.is_empty())
    }

    /// Iterates over the fields that have violations, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }

    /// Returns the total number of violations across all fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Returns `Ok(())` when empty, otherwise [`RosterError::Invalid`].
    pub fn into_result(self) -> RosterResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(RosterError::Invalid(self))
        }
    }

    /// Flattens the collection into API field errors.
    #[must_use]
    pub fn to_field_errors(&self) -> Vec<FieldError> {
        self.fields
            .iter()
            .flat_map(|(field, violations)| {
                violations.iter().map(move |v| FieldError {
                    field: field.clone(),
                    message: v.message.clone(),
                    code: v.code.clone(),
                })
            })
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .fields
            .iter()
            .map(|(field, violations)| {
                let messages = violations
                    .iter()
                    .map(|v| v.message.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{field} {messages}")
            })
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&rendered)
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, violations) in &self.fields {
            let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
            map.serialize_entry(field, &messages)?;
        }
        map.end()
    }
}

/// Registration rules.
///
/// Each rule returns a `validator::ValidationError` carrying both a code and
/// a message so it can be recorded with [`FieldErrors::check`].
pub mod rules {
    use super::{codes, messages};
    use once_cell::sync::Lazy;
    use regex::Regex;
    use std::borrow::Cow;
    use validator::ValidationError;

    /// `local@host`, where the host is one or more dot-separated ASCII labels.
    /// IP literals and internationalized domains do not match.
    static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .unwrap()
    });

    /// Youngest accepted age.
    pub const MIN_AGE: i32 = 1;
    /// Oldest accepted age.
    pub const MAX_AGE: i32 = 90;

    fn violation(code: &'static str, message: &'static str) -> ValidationError {
        let mut error = ValidationError::new(code);
        error.message = Some(Cow::Borrowed(message));
        error
    }

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(violation(codes::BLANK, messages::BLANK));
        }
        Ok(())
    }

    /// Validates that an optional string is supplied and not blank.
    pub fn present(value: Option<&str>) -> Result<(), ValidationError> {
        not_blank(value.unwrap_or_default())
    }

    /// Validates email address syntax.
    pub fn email_format(value: &str) -> Result<(), ValidationError> {
        if !EMAIL_PATTERN.is_match(value) {
            return Err(violation(codes::INVALID, messages::INVALID));
        }
        Ok(())
    }

    /// Validates that an age lies within `MIN_AGE..=MAX_AGE`.
    pub fn age_in_range(age: i32) -> Result<(), ValidationError> {
        if age < MIN_AGE {
            return Err(violation(codes::GREATER_THAN_OR_EQUAL_TO, messages::TOO_SMALL));
        }
        if age > MAX_AGE {
            return Err(violation(codes::LESS_THAN_OR_EQUAL_TO, messages::TOO_LARGE));
        }
        Ok(())
    }

    /// Validates that an optional age is supplied and in range.
    pub fn age(value: Option<i32>) -> Result<(), ValidationError> {
        match value {
            Some(age) => age_in_range(age),
            None => Err(violation(codes::REQUIRED, messages::REQUIRED)),
        }
    }

    /// Validates that `value` is one of `allowed`, compared exactly.
    pub fn inclusion(value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
        if !allowed.contains(&value) {
            return Err(violation(codes::INCLUSION, messages::INCLUSION));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use super::*;
    use validator::Validate;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("hello").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_present() {
        assert!(present(Some("Ivan")).is_ok());
        assert!(present(Some(" ")).is_err());
        assert!(present(None).is_err());
    }

    #[test]
    fn test_email_format() {
        assert!(email_format("ivan@example.com").is_ok());
        assert!(email_format("invalid-email").is_err());
        assert!(email_format("").is_err());
    }

    #[test]
    fn test_email_format_accepts_ascii_hosts_only() {
        assert!(email_format("o'neil+tag@mail.example.co.uk").is_ok());
        assert!(email_format("ivan@localhost").is_ok());

        assert!(email_format("ivan@[127.0.0.1]").is_err());
        assert!(email_format("ivan@пример.рф").is_err());
        assert!(email_format("иван@example.com").is_err());
        assert!(email_format("ivan@-example.com").is_err());
        assert!(email_format("ivan@example..com").is_err());
        assert!(email_format("ivan @example.com").is_err());
        assert!(email_format("ivan@example.com\n").is_err());
    }

    #[test]
    fn test_age_boundaries() {
        assert!(age_in_range(1).is_ok());
        assert!(age_in_range(90).is_ok());

        let low = age_in_range(0).unwrap_err();
        assert_eq!(low.code, codes::GREATER_THAN_OR_EQUAL_TO);

        let high = age_in_range(91).unwrap_err();
        assert_eq!(high.code, codes::LESS_THAN_OR_EQUAL_TO);
    }

    #[test]
    fn test_missing_age_is_required() {
        let error = age(None).unwrap_err();
        assert_eq!(error.code, codes::REQUIRED);
    }

    #[test]
    fn test_inclusion_is_exact() {
        let allowed = ["male", "female"];
        assert!(inclusion("male", &allowed).is_ok());
        assert!(inclusion("Male", &allowed).is_err());
        assert!(inclusion("other", &allowed).is_err());
    }

    #[test]
    fn test_check_collects_every_failure() {
        let mut errors = FieldErrors::new();
        errors.check("email", present(None));
        errors.check("email", email_format(""));
        errors.check("age", age_in_range(0));
        errors.check("name", present(Some("Ivan")));

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.messages("email"), vec![messages::BLANK, messages::INVALID]);
        assert!(errors.contains("age"));
        assert!(!errors.contains("name"));
    }

    #[test]
    fn test_merge_and_base() {
        let mut errors = FieldErrors::single("email", codes::TAKEN, messages::TAKEN);
        let mut storage = FieldErrors::new();
        storage.add_base("row rejected");
        storage.add("email", codes::INVALID, messages::INVALID);

        errors.merge(storage);

        assert_eq!(errors.messages(BASE), vec!["row rejected"]);
        assert_eq!(errors.messages("email"), vec![messages::TAKEN, messages::INVALID]);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["base", "email"]);
    }

    #[test]
    fn test_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());

        let err = FieldErrors::single("gender", codes::INCLUSION, messages::INCLUSION)
            .into_result()
            .unwrap_err();
        match err {
            RosterError::Invalid(errors) => assert!(errors.contains("gender")),
            other => panic!("Expected Invalid error, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_validator_errors() {
        #[derive(Validate)]
        struct Row {
            #[validate(length(max = 3, message = "is too long"))]
            name: String,
        }

        let row = Row {
            name: "toolong".to_string(),
        };
        let mut errors = FieldErrors::new();
        errors.merge_validator_errors(&row.validate().unwrap_err());

        assert_eq!(errors.messages("name"), vec!["is too long"]);
    }

    #[test]
    fn test_serialize_as_field_map() {
        let mut errors = FieldErrors::new();
        errors.add("name", codes::BLANK, messages::BLANK);
        errors.add_base("oops");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["name"][0], messages::BLANK);
        assert_eq!(json["base"][0], "oops");
    }

    #[test]
    fn test_to_field_errors_flattens() {
        let mut errors = FieldErrors::new();
        errors.add("email", codes::BLANK, messages::BLANK);
        errors.add("email", codes::INVALID, messages::INVALID);

        let flat = errors.to_field_errors();
        assert_eq!(flat.len(), 2);
        assert!(flat.iter().all(|e| e.field == "email"));
        assert_eq!(flat[1].code, codes::INVALID);
    }
}
