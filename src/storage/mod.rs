//! Storage layer for the Sleeper best-ball CLI
//!
//! SQLite persistence for the NFL player directory:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Player upserts and directory loading

pub mod models;
pub mod queries;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::PlayerDatabase;
