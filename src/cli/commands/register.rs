//! `credcache register`: validate a sign-up and apply remember-me.

use crate::cli::{output, Cli};
use crate::errors::{CacheError, Result};
use crate::session::{parse_birth_date, Country, RegistrationForm};

/// Values given on the command line.
#[derive(Debug, Default)]
pub struct RegisterArgs<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: Option<&'a str>,
    pub birth_date: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub country: &'a str,
    pub remember: bool,
}

/// Execute the `register` command.
pub async fn execute(cli: &Cli, args: RegisterArgs<'_>) -> Result<()> {
    let mut form = build_form(&args)?;
    if form.password.is_empty() {
        form.password = crate::cli::prompt_new_password()?;
    }

    let flow = crate::cli::open_flow(cli)?;
    let today = chrono::Local::now().date_naive();

    match flow.register(&form, today).await {
        Ok(()) => {
            output::success("Registration complete. Your secure account is ready.");
            output::info(&format!("Phone: {}", form.international_phone()));
            output::tip("Use your credentials to sign in: `credcache login`.");
            Ok(())
        }
        Err(CacheError::IncompleteForm(errors)) => {
            for e in errors.iter() {
                output::error(&e.to_string());
            }
            Err(CacheError::CommandFailed("Incomplete form.".into()))
        }
        Err(e) => Err(e),
    }
}

fn build_form(args: &RegisterArgs<'_>) -> Result<RegistrationForm> {
    let country = Country::from_code(args.country).ok_or_else(|| {
        let known: Vec<&str> = crate::session::COUNTRIES.iter().map(|c| c.code).collect();
        CacheError::CommandFailed(format!(
            "unknown country '{}' — supported: {}",
            args.country,
            known.join(", ")
        ))
    })?;

    let birth_date = args.birth_date.map(parse_birth_date).transpose()?;

    Ok(RegistrationForm {
        first_name: args.first_name.to_string(),
        last_name: args.last_name.to_string(),
        email: args.email.to_string(),
        password: args.password.unwrap_or_default().to_string(),
        birth_date,
        phone_number: args.phone.unwrap_or_default().to_string(),
        country: *country,
        remember_me: args.remember,
    })
}
