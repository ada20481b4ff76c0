//! Declarative field validation for account writes.
//!
//! Each field carries a list of [`Rule`]s. [`Validator::validate`] evaluates every field, keeps
//! the first failing rule per field, and reports all failing fields together. A successful
//! validation yields a [`ValidatedAccount`] whose `student_id` is already a whole number, so
//! nothing downstream has to re-parse the raw input.

use std::fmt;

use serde::Serialize;

use crate::api::models::accounts::{AccountRequest, StudentIdInput};
use crate::config::ValidationConfig;
use crate::types::StudentId;

/// A single field constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Text must be non-empty; a number must be present and non-zero
    Required,
    /// Text must be at least this many characters long
    Min(usize),
    /// Value must parse as a whole number
    Numeric,
}

impl Rule {
    pub fn tag(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Min(_) => "min",
            Rule::Numeric => "numeric",
        }
    }

    fn param(&self) -> Option<String> {
        match self {
            Rule::Min(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn check(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (Rule::Required, FieldValue::Text(s)) => !s.is_empty(),
            (Rule::Min(n), FieldValue::Text(s)) => s.chars().count() >= *n,
            (Rule::Numeric, FieldValue::Text(s)) => s.parse::<StudentId>().is_ok(),
            (Rule::Required, FieldValue::Number(n)) => match n {
                None => false,
                Some(StudentIdInput::Number(n)) => *n != 0,
                Some(StudentIdInput::Text(s)) => !s.is_empty() && s.parse::<StudentId>().map_or(true, |n| n != 0),
            },
            (Rule::Numeric, FieldValue::Number(n)) => match n {
                // Absent values are the business of `Required`
                None | Some(StudentIdInput::Number(_)) => true,
                Some(StudentIdInput::Text(s)) => s.parse::<StudentId>().is_ok(),
            },
            (Rule::Min(_), FieldValue::Number(_)) => true,
        }
    }

    fn message(&self, field: &str) -> String {
        match self {
            Rule::Required => format!("{field} is required"),
            Rule::Min(n) => format!("{field} must be at least {n} characters"),
            Rule::Numeric => format!("{field} must be a whole number"),
        }
    }
}

enum FieldValue<'a> {
    Text(&'a str),
    Number(Option<&'a StudentIdInput>),
}

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub tag: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub message: String,
}

/// Every field that failed validation, in field order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// An account write that satisfied every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAccount {
    pub username: String,
    pub password: String,
    pub student_id: StudentId,
}

/// Evaluates the account field rules.
#[derive(Debug, Clone)]
pub struct Validator {
    username: Vec<Rule>,
    password: Vec<Rule>,
    student_id: Vec<Rule>,
}

impl Validator {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            username: vec![Rule::Required, Rule::Min(config.username_min_length)],
            password: vec![Rule::Required, Rule::Min(config.password_min_length)],
            student_id: vec![Rule::Required, Rule::Numeric],
        }
    }

    pub fn validate(&self, request: &AccountRequest) -> Result<ValidatedAccount, ValidationErrors> {
        let fields = [
            ("username", &self.username, FieldValue::Text(&request.username)),
            ("password", &self.password, FieldValue::Text(&request.password)),
            ("student_id", &self.student_id, FieldValue::Number(request.student_id.as_ref())),
        ];

        let errors: Vec<FieldError> = fields
            .iter()
            .filter_map(|(field, rules, value)| {
                rules.iter().find(|rule| !rule.check(value)).map(|rule| FieldError {
                    field: *field,
                    tag: rule.tag(),
                    param: rule.param(),
                    message: rule.message(field),
                })
            })
            .collect();

        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        // Required + Numeric both passed, so this is present and parses
        let student_id = match &request.student_id {
            Some(StudentIdInput::Number(n)) => *n,
            Some(StudentIdInput::Text(s)) => s.parse().unwrap_or_default(),
            None => 0,
        };

        Ok(ValidatedAccount {
            username: request.username.clone(),
            password: request.password.clone(),
            student_id,
        })
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&ValidationConfig::default())
    }
}
