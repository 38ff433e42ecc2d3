//! Sleeper fantasy API: wire types, HTTP client and lookup directories.

pub mod directory;
pub mod http;
pub mod types;

pub use directory::{PlayerDirectory, TeamDirectory};
pub use http::SleeperClient;
