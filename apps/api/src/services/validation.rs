//! Field-level input validation
//!
//! Rules are declared per field and every rule of every field is evaluated;
//! nothing short-circuits. Failures accumulate into an ordered
//! [`ValidationErrors`] list, one entry per failing field.

use serde::Serialize;

/// Maximum total length of an email address
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of the local part of an email address
const MAX_EMAIL_LOCAL_LENGTH: usize = 64;

/// Minimum password length (in characters)
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Minimum display name length (in characters)
pub const MIN_NAME_LENGTH: usize = 3;

/// A single failed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Input field name as the caller sent it
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Ordered list of field failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether `field` has an entry
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// The first entry's message, used as the top-level failure message
    pub fn summary(&self) -> &str {
        self.0
            .first()
            .map(|e| e.message.as_str())
            .unwrap_or("Invalid input.")
    }

    /// `[{field, message}, ...]` as a GraphQL value for error extensions
    pub fn to_graphql_value(&self) -> async_graphql::Value {
        async_graphql::to_value(&self.0).unwrap_or(async_graphql::Value::Null)
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

/// A single check applied to a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty once surrounding whitespace is removed
    Required,
    /// Well-formed email address
    Email,
    /// At least this many characters
    MinLength(usize),
}

impl Rule {
    /// Check `value` against this rule
    pub fn check(&self, value: &str) -> bool {
        match self {
            Self::Required => !value.trim().is_empty(),
            Self::Email => is_valid_email(value),
            Self::MinLength(min) => value.chars().count() >= *min,
        }
    }
}

pub const EMAIL_RULES: &[Rule] = &[Rule::Required, Rule::Email];
pub const PASSWORD_RULES: &[Rule] = &[Rule::Required, Rule::MinLength(MIN_PASSWORD_LENGTH)];
pub const NAME_RULES: &[Rule] = &[Rule::Required, Rule::MinLength(MIN_NAME_LENGTH)];
pub const REQUIRED: &[Rule] = &[Rule::Required];

/// Accumulating validator
///
/// ```
/// use quillpost_api::services::validation::{Validator, EMAIL_RULES, REQUIRED};
///
/// let result = Validator::new()
///     .field("email", "not-an-email", EMAIL_RULES, "E-Mail is invalid.")
///     .field("title", "", REQUIRED, "Title is invalid.")
///     .finish();
///
/// assert_eq!(result.unwrap_err().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every rule for one field; records `message` if any fails
    pub fn field(mut self, name: &str, value: &str, rules: &[Rule], message: &str) -> Self {
        let failures = rules.iter().filter(|rule| !rule.check(value)).count();
        if failures > 0 {
            self.errors.push(FieldError::new(name, message));
        }
        self
    }

    /// `Ok(())` when nothing failed, otherwise the ordered error list
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Registration input: email, password, name
pub fn validate_user_input(email: &str, password: &str, name: &str) -> Result<(), ValidationErrors> {
    Validator::new()
        .field("email", email, EMAIL_RULES, "E-Mail is invalid.")
        .field("password", password, PASSWORD_RULES, "Password too short!")
        .field("name", name, NAME_RULES, "Name too short!")
        .finish()
}

/// Post input: title, content
pub fn validate_post_input(title: &str, content: &str) -> Result<(), ValidationErrors> {
    Validator::new()
        .field("title", title, REQUIRED, "Title is invalid.")
        .field("content", content, REQUIRED, "Content is invalid.")
        .finish()
}

/// Simple email grammar check
fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    // Exactly one @
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > MAX_EMAIL_LOCAL_LENGTH {
        return false;
    }

    if local.chars().any(char::is_whitespace) || domain.chars().any(char::is_whitespace) {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|part| !part.is_empty())
}
