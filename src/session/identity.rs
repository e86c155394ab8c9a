//! Third-party identity providers (Google, Facebook).
//!
//! The provider flow itself lives outside this crate. All we need is the
//! outcome it reports and the message each outcome turns into. The
//! credential cache is never involved.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Facebook,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Google => f.write_str("Google"),
            Self::Facebook => f.write_str("Facebook"),
        }
    }
}

/// What a provider tells us about the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// The three ways a provider flow can end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Success(UserInfo),
    Cancelled,
    Error(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn provider(&self) -> Provider;

    /// Whether the provider finished initializing and can be prompted.
    fn is_ready(&self) -> bool {
        true
    }

    /// Run the provider's sign-in flow to completion.
    async fn sign_in(&self) -> ProviderOutcome;
}

/// A provider sign-in that did not produce a user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderFailure {
    #[error("{0} authentication is still initializing. Please try again.")]
    NotReady(Provider),

    #[error("Sign-in was cancelled.")]
    Cancelled,

    #[error("{0}")]
    Error(String),
}

/// Run `provider` and reduce its outcome to a user or a displayable failure.
pub async fn authenticate(
    provider: &dyn IdentityProvider,
) -> std::result::Result<UserInfo, ProviderFailure> {
    if !provider.is_ready() {
        return Err(ProviderFailure::NotReady(provider.provider()));
    }

    match provider.sign_in().await {
        ProviderOutcome::Success(user) => Ok(user),
        ProviderOutcome::Cancelled => Err(ProviderFailure::Cancelled),
        ProviderOutcome::Error(msg) if msg.trim().is_empty() => {
            Err(ProviderFailure::Error("Something went wrong.".into()))
        }
        ProviderOutcome::Error(msg) => Err(ProviderFailure::Error(msg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        ready: bool,
        outcome: ProviderOutcome,
    }

    #[async_trait]
    impl IdentityProvider for Fixed {
        fn provider(&self) -> Provider {
            Provider::Google
        }

        fn is_ready(&self) -> bool {
            self.ready
        }

        async fn sign_in(&self) -> ProviderOutcome {
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn not_ready_short_circuits() {
        let p = Fixed {
            ready: false,
            outcome: ProviderOutcome::Success(UserInfo::default()),
        };
        let err = authenticate(&p).await.unwrap_err();
        assert_eq!(err, ProviderFailure::NotReady(Provider::Google));
        assert_eq!(
            err.to_string(),
            "Google authentication is still initializing. Please try again."
        );
    }

    #[tokio::test]
    async fn empty_error_message_gets_a_fallback() {
        let p = Fixed {
            ready: true,
            outcome: ProviderOutcome::Error("  ".into()),
        };
        assert_eq!(
            authenticate(&p).await.unwrap_err().to_string(),
            "Something went wrong."
        );
    }

    #[tokio::test]
    async fn provider_error_message_is_kept() {
        let p = Fixed {
            ready: true,
            outcome: ProviderOutcome::Error("access_denied".into()),
        };
        assert_eq!(
            authenticate(&p).await.unwrap_err(),
            ProviderFailure::Error("access_denied".into())
        );
    }
}
