//! Sign-up form: fields, country dialling codes, staged validation.

use std::fmt;

use chrono::NaiveDate;

use crate::errors::{CacheError, Result};

use super::validation::{validate_email, validate_new_password, FieldError, FormErrors};

/// Display format for birth dates (`DD/MM/YYYY`).
pub const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub dial_code: &'static str,
    pub name: &'static str,
}

/// Countries offered by the phone-number picker. The first is the default.
pub const COUNTRIES: &[Country] = &[
    Country {
        code: "PH",
        dial_code: "+63",
        name: "Philippines",
    },
    Country {
        code: "US",
        dial_code: "+1",
        name: "United States",
    },
    Country {
        code: "GB",
        dial_code: "+44",
        name: "United Kingdom",
    },
    Country {
        code: "CA",
        dial_code: "+1",
        name: "Canada",
    },
    Country {
        code: "AU",
        dial_code: "+61",
        name: "Australia",
    },
];

impl Country {
    /// Look up a country by ISO code, case-insensitively.
    pub fn from_code(code: &str) -> Option<&'static Country> {
        COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code.trim()))
    }
}

impl Default for Country {
    fn default() -> Self {
        COUNTRIES[0]
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.dial_code)
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub birth_date: Option<NaiveDate>,
    pub phone_number: String,
    pub country: Country,
    pub remember_me: bool,
}

impl RegistrationForm {
    /// Validate in stages, reporting only the first stage that fails:
    /// names, then email and password together, then birth date, then
    /// phone number.
    pub fn validate(&self, today: NaiveDate) -> FormErrors {
        let mut errors = FormErrors::new();

        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            errors.push(FieldError::NamesRequired);
            return errors;
        }

        if let Some(e) = validate_email(&self.email) {
            errors.push(e);
        }
        if let Some(e) = validate_new_password(&self.password) {
            errors.push(e);
        }
        if !errors.is_empty() {
            return errors;
        }

        match self.birth_date {
            None => {
                errors.push(FieldError::BirthDateRequired);
                return errors;
            }
            Some(date) if date > today => {
                errors.push(FieldError::BirthDateInFuture);
                return errors;
            }
            Some(_) => {}
        }

        if self.phone_number.trim().is_empty() {
            errors.push(FieldError::PhoneRequired);
        }

        errors
    }

    /// Phone number with the selected country's dialling code, digits only.
    pub fn international_phone(&self) -> String {
        let digits: String = self
            .phone_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        format!("{}{digits}", self.country.dial_code)
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("birth_date", &self.birth_date)
            .field("phone_number", &self.phone_number)
            .field("country", &self.country.code)
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Parse a `DD/MM/YYYY` birth date.
pub fn parse_birth_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), BIRTH_DATE_FORMAT).map_err(|e| {
        CacheError::CommandFailed(format!(
            "invalid birth date '{input}' — expected DD/MM/YYYY ({e})"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn complete() -> RegistrationForm {
        RegistrationForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "analytical".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 12, 10),
            phone_number: "917 123 4567".into(),
            country: Country::default(),
            remember_me: false,
        }
    }

    #[test]
    fn complete_form_passes() {
        assert!(complete().validate(today()).is_empty());
    }

    #[test]
    fn names_are_checked_first() {
        let form = RegistrationForm {
            last_name: " ".into(),
            email: String::new(),
            ..complete()
        };
        let errors = form.validate(today());
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(&FieldError::NamesRequired));
    }

    #[test]
    fn email_and_password_are_reported_together() {
        let form = RegistrationForm {
            email: "nope".into(),
            password: "short".into(),
            birth_date: None,
            ..complete()
        };
        let errors = form.validate(today());
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&FieldError::EmailInvalid));
        assert!(errors.contains(&FieldError::NewPasswordTooShort { min: 8 }));
        assert!(errors
            .iter()
            .any(|e| e.to_string() == "Password must be 8 or more characters"));
    }

    #[test]
    fn birth_date_required_and_not_in_future() {
        let missing = RegistrationForm {
            birth_date: None,
            ..complete()
        };
        assert!(missing.validate(today()).contains(&FieldError::BirthDateRequired));

        let future = RegistrationForm {
            birth_date: NaiveDate::from_ymd_opt(2030, 1, 1),
            ..complete()
        };
        assert!(future.validate(today()).contains(&FieldError::BirthDateInFuture));
    }

    #[test]
    fn phone_checked_last() {
        let form = RegistrationForm {
            phone_number: "  ".into(),
            ..complete()
        };
        assert!(form.validate(today()).contains(&FieldError::PhoneRequired));
    }

    #[test]
    fn international_phone_uses_dial_code() {
        let form = RegistrationForm {
            country: *Country::from_code("gb").unwrap(),
            phone_number: "(020) 7946-0018".into(),
            ..complete()
        };
        assert_eq!(form.international_phone(), "+4402079460018");
    }

    #[test]
    fn unknown_country_code() {
        assert!(Country::from_code("FR").is_none());
        assert_eq!(Country::default().code, "PH");
    }

    #[test]
    fn birth_date_parsing() {
        assert_eq!(
            parse_birth_date("10/12/1990").unwrap(),
            NaiveDate::from_ymd_opt(1990, 12, 10).unwrap()
        );
        assert!(parse_birth_date("1990-12-10").is_err());
        assert!(parse_birth_date("31/02/2000").is_err());
    }
}
