//! Sign-in lifecycle: form validation, login/registration submit,
//! sign-out, and the identity-provider boundary.

pub mod identity;
pub mod login;
pub mod registration;
pub mod validation;

pub use identity::{IdentityProvider, Provider, ProviderFailure, ProviderOutcome, UserInfo};
pub use login::{LoginFlow, LoginForm, Session, SignInMethod, SignOutReport};
pub use registration::{parse_birth_date, Country, RegistrationForm, COUNTRIES};
pub use validation::{FieldError, FormErrors};
