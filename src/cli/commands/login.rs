//! `credcache login`: sign in with email and password.
//!
//! The form starts pre-filled from remembered credentials. Flags replace
//! pre-filled values; anything still missing is prompted for.

use crate::cli::{output, Cli};
use crate::errors::{CacheError, Result};
use crate::session::LoginForm;

/// Values given on the command line.
#[derive(Debug, Default)]
pub struct LoginArgs<'a> {
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub remember: bool,
    pub forget: bool,
}

/// Execute the `login` command.
pub async fn execute(cli: &Cli, args: LoginArgs<'_>) -> Result<()> {
    let flow = crate::cli::open_flow(cli)?;
    let prefilled = flow.prefill().await;
    let mut form = apply_args(prefilled, &args);

    if form.email.trim().is_empty() {
        form.email = crate::cli::prompt_email()?;
    }
    if form.password.is_empty() {
        form.password = crate::cli::prompt_password()?;
    }

    match flow.submit(&form).await {
        Ok(_session) => {
            output::success("You are now signed in securely.");
            if form.remember_me {
                output::tip("Credentials remembered. `credcache logout` forgets them.");
            }
            Ok(())
        }
        Err(CacheError::IncompleteForm(errors)) => {
            for e in errors.iter() {
                output::error(&e.to_string());
            }
            Err(CacheError::CommandFailed(
                "Please check the form for errors.".into(),
            ))
        }
        Err(e) => Err(e),
    }
}

/// Merge command-line values into the pre-filled form.
///
/// A different email than the remembered one drops the remembered
/// password, which belongs to the other account.
fn apply_args(mut form: LoginForm, args: &LoginArgs<'_>) -> LoginForm {
    if let Some(email) = args.email {
        if email.trim() != form.email.trim() {
            form.password.clear();
        }
        form.email = email.to_string();
    }
    if let Some(password) = args.password {
        form.password = password.to_string();
    }
    if args.remember {
        form.remember_me = true;
    } else if args.forget {
        form.remember_me = false;
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remembered() -> LoginForm {
        LoginForm {
            email: "a@b.com".into(),
            password: "remembered-pw".into(),
            remember_me: true,
        }
    }

    #[test]
    fn no_flags_keeps_prefill() {
        let form = apply_args(remembered(), &LoginArgs::default());
        assert_eq!(form, remembered());
    }

    #[test]
    fn other_email_drops_remembered_password() {
        let args = LoginArgs {
            email: Some("c@d.com"),
            ..LoginArgs::default()
        };
        let form = apply_args(remembered(), &args);
        assert_eq!(form.email, "c@d.com");
        assert!(form.password.is_empty());
        assert!(form.remember_me);
    }

    #[test]
    fn same_email_keeps_remembered_password() {
        let args = LoginArgs {
            email: Some(" a@b.com"),
            ..LoginArgs::default()
        };
        assert_eq!(apply_args(remembered(), &args).password, "remembered-pw");
    }

    #[test]
    fn forget_turns_remember_off() {
        let args = LoginArgs {
            forget: true,
            ..LoginArgs::default()
        };
        assert!(!apply_args(remembered(), &args).remember_me);
    }

    #[test]
    fn remember_turns_it_on_for_empty_form() {
        let args = LoginArgs {
            email: Some("x@y.com"),
            password: Some("secret123"),
            remember: true,
            forget: false,
        };
        let form = apply_args(LoginForm::default(), &args);
        assert!(form.remember_me);
        assert_eq!(form.password, "secret123");
    }
}
