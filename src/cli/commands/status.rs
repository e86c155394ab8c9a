//! `credcache status`: show what is remembered under the storage key.

use crate::cli::{output, Cli};
use crate::errors::{CacheError, Result};

/// Execute the `status` command.
pub async fn execute(cli: &Cli) -> Result<()> {
    let cache = crate::cli::open_cache(cli)?;

    match cache.try_load().await {
        Ok(Some(record)) => {
            output::print_record_table(cache.key(), cache.backend_name(), &record);
        }
        Ok(None) => {
            output::info("Nothing remembered.");
            output::tip("Run `credcache login --remember` to remember your credentials.");
        }
        Err(CacheError::MalformedRecord(_)) => {
            output::warning("Remembered credentials are unreadable and will be ignored.");
            output::tip("The next `credcache login` or `credcache logout` replaces them.");
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
