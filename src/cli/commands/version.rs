//! `credcache version`: display version and build features.

use console::style;

use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    println!("credcache {current}");

    let keyring = if cfg!(feature = "keyring-store") {
        style("available").green()
    } else {
        style("not compiled").dim()
    };
    println!("keyring backend: {keyring}");

    Ok(())
}
