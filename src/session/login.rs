//! Sign-in, sign-up and sign-out lifecycle around the credential cache.
//!
//! `LoginFlow` is the cache's only caller:
//! - `prefill` at startup pre-populates the sign-in form from the cache
//! - `submit` validates, then remembers or forgets the credentials
//! - `register` applies the same remember-me rule to a sign-up
//! - `sign_out` forgets the credentials; failures never block it
//! - `sign_in_with` delegates to an identity provider; no cache access

use std::fmt;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::credentials::CredentialCache;
use crate::errors::Result;

use super::identity::{self, IdentityProvider, Provider, ProviderFailure, UserInfo};
use super::registration::RegistrationForm;
use super::validation::{validate_email, validate_password, FormErrors, LOGIN_MIN_PASSWORD_LEN};

/// Sign-in form state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if let Some(e) = validate_email(&self.email) {
            errors.push(e);
        }
        if let Some(e) = validate_password(&self.password, LOGIN_MIN_PASSWORD_LEN) {
            errors.push(e);
        }
        errors
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// How the current session was established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInMethod {
    Password { email: String },
    Provider { provider: Provider, user: UserInfo },
}

/// A signed-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    method: SignInMethod,
}

impl Session {
    pub fn method(&self) -> &SignInMethod {
        &self.method
    }
}

/// Result of a sign-out. The session is gone either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignOutReport {
    /// False when the remembered credentials could not be removed.
    pub cache_cleared: bool,
}

#[derive(Debug, Clone)]
pub struct LoginFlow {
    cache: CredentialCache,
}

impl LoginFlow {
    pub fn new(cache: CredentialCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &CredentialCache {
        &self.cache
    }

    /// Initial sign-in form state.
    ///
    /// A remembered record fills email and password and ticks remember-me.
    /// Nothing remembered, or a record that cannot be read, gives an empty
    /// form so the user can always sign in fresh.
    pub async fn prefill(&self) -> LoginForm {
        match self.cache.load().await {
            Ok(Some(record)) => LoginForm {
                email: record.email().to_string(),
                password: record.password().to_string(),
                remember_me: true,
            },
            Ok(None) => LoginForm::default(),
            Err(e) => {
                warn!(error = %e, "unable to load stored credentials");
                LoginForm::default()
            }
        }
    }

    /// Submit the sign-in form.
    ///
    /// Invalid input fails with `IncompleteForm` before the cache is
    /// touched. A storage failure fails with `StorageUnavailable`; the form
    /// itself is left for the caller to keep showing.
    pub async fn submit(&self, form: &LoginForm) -> Result<Session> {
        form.validate().into_result()?;
        self.persist(form.remember_me, &form.email, &form.password)
            .await?;

        let email = form.email.trim().to_string();
        info!(remember_me = form.remember_me, "signed in with password");
        Ok(Session {
            method: SignInMethod::Password { email },
        })
    }

    /// Submit the sign-up form. Does not sign in.
    pub async fn register(&self, form: &RegistrationForm, today: NaiveDate) -> Result<()> {
        form.validate(today).into_result()?;
        self.persist(form.remember_me, &form.email, &form.password)
            .await?;
        info!(remember_me = form.remember_me, "registration complete");
        Ok(())
    }

    /// Sign in through a third-party identity provider.
    pub async fn sign_in_with(
        &self,
        provider: &dyn IdentityProvider,
    ) -> std::result::Result<Session, ProviderFailure> {
        match identity::authenticate(provider).await {
            Ok(user) => {
                info!(provider = %provider.provider(), "signed in with identity provider");
                Ok(Session {
                    method: SignInMethod::Provider {
                        provider: provider.provider(),
                        user,
                    },
                })
            }
            Err(failure) => {
                info!(
                    provider = %provider.provider(),
                    reason = %failure,
                    "provider sign-in did not complete"
                );
                Err(failure)
            }
        }
    }

    /// Sign out and forget remembered credentials.
    ///
    /// Failing to clear the cache does not keep the user signed in; it is
    /// logged and reported in the returned `SignOutReport`.
    pub async fn sign_out(&self) -> SignOutReport {
        let cache_cleared = match self.cache.clear().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "signing out without clearing remembered credentials");
                false
            }
        };
        info!(cache_cleared, "signed out");
        SignOutReport { cache_cleared }
    }

    async fn persist(&self, remember_me: bool, email: &str, password: &str) -> Result<()> {
        if remember_me {
            self.cache.save(email, password).await.map(|_| ())
        } else {
            self.cache.clear().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::validation::FieldError;

    #[test]
    fn login_form_collects_both_field_errors() {
        let form = LoginForm {
            email: "not-an-email".into(),
            password: "12345".into(),
            remember_me: false,
        };
        let errors = form.validate();
        assert!(errors.contains(&FieldError::EmailInvalid));
        assert!(errors.contains(&FieldError::PasswordTooShort { min: 6 }));
    }

    #[test]
    fn login_form_debug_hides_password() {
        let form = LoginForm {
            email: "a@b.com".into(),
            password: "topsecret".into(),
            remember_me: true,
        };
        assert!(!format!("{form:?}").contains("topsecret"));
    }
}
