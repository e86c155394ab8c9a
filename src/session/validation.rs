//! Client-side form validation for the sign-in and sign-up forms.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::errors::{CacheError, Result};

/// Minimum password length accepted by the sign-in form.
pub const LOGIN_MIN_PASSWORD_LEN: usize = 6;

/// Minimum password length accepted by the sign-up form.
pub const REGISTER_MIN_PASSWORD_LEN: usize = 8;

/// A single rejected field, carrying the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("First Name and Last Name are required.")]
    NamesRequired,

    #[error("Email is required")]
    EmailRequired,

    #[error("Enter a valid email")]
    EmailInvalid,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Password must be {min} or more characters")]
    NewPasswordTooShort { min: usize },

    #[error("Please select your Birth of Date.")]
    BirthDateRequired,

    #[error("Birth date cannot be in the future.")]
    BirthDateInFuture,

    #[error("Please provide your phone number.")]
    PhoneRequired,
}

/// Every problem found in one submission, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, error: &FieldError) -> bool {
        self.0.contains(error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was rejected, `IncompleteForm` otherwise.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CacheError::IncompleteForm(self))
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex"))
}

/// Check an email address after trimming surrounding whitespace.
pub fn validate_email(email: &str) -> Option<FieldError> {
    let email = email.trim();
    if email.is_empty() {
        Some(FieldError::EmailRequired)
    } else if !email_pattern().is_match(email) {
        Some(FieldError::EmailInvalid)
    } else {
        None
    }
}

/// Check a password against a minimum length (counted in characters).
///
/// Passwords are not trimmed; whitespace counts.
pub fn validate_password(password: &str, min_len: usize) -> Option<FieldError> {
    if password.is_empty() {
        Some(FieldError::PasswordRequired)
    } else if password.chars().count() < min_len {
        Some(FieldError::PasswordTooShort { min: min_len })
    } else {
        None
    }
}

/// Check the password chosen on the sign-up form.
pub fn validate_new_password(password: &str) -> Option<FieldError> {
    match validate_password(password, REGISTER_MIN_PASSWORD_LEN) {
        Some(FieldError::PasswordTooShort { min }) => Some(FieldError::NewPasswordTooShort { min }),
        other => other,
    }
}
