//! Configuration loaded from `.credcache.toml`.

pub mod settings;

pub use settings::{Backend, Settings};
