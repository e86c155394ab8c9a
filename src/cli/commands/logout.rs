//! `credcache logout`: sign out and forget remembered credentials.
//!
//! Never fails because of storage: if the record cannot be removed the
//! user is warned and still signed out.

use crate::cli::{output, Cli};
use crate::errors::Result;

/// Execute the `logout` command.
pub async fn execute(cli: &Cli) -> Result<()> {
    let flow = crate::cli::open_flow(cli)?;
    let report = flow.sign_out().await;

    if !report.cache_cleared {
        output::warning("Could not remove remembered credentials from secure storage.");
    }
    output::success("Signed out.");
    Ok(())
}
