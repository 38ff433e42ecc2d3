//! Core utilities shared across the application:
//! - `cache`: two-tier (memory + disk) response cache
//! - `http`: request headers and API root resolution

pub mod cache;
pub mod http;

// Re-export commonly used items for convenience
pub use cache::{default_cache_dir, ApiCache, CacheKey, UnifiedCache};
pub use http::{default_header_map, resolve_base_url, SLEEPER_BASE_URL};
