pub mod cli;
pub mod config;
pub mod credentials;
pub mod crypto;
pub mod errors;
pub mod logging;
pub mod session;
pub mod storage;
