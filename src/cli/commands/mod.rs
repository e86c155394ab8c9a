//! One module per `credcache` subcommand.

pub mod completions;
pub mod login;
pub mod logout;
pub mod register;
pub mod status;
pub mod version;
