//! Sleeper Best-Ball Library
//!
//! Best-ball lineups and season standings for Sleeper fantasy football
//! leagues.
//!
//! ## Features
//!
//! - **Lineup Optimizer**: the highest-scoring legal lineup from a team's full
//!   roster, honoring FLEX, SUPER_FLEX and IDP_FLEX slots
//! - **Season Standings**: head-to-head record plus a half-win for finishing in
//!   the top half of the league each week, with best-ball totals alongside
//! - **Response Caching**: league and matchup responses kept in memory and on disk
//! - **Player Directory**: NFL players stored locally in SQLite
//!
//! ## Quick Start
//!
//! ```rust
//! use sleeper_bestball::analysis::lineup::{optimize, PlayerPointEntry};
//! use sleeper_bestball::{Position, SlotTemplate};
//!
//! let template: SlotTemplate = "QB,RB,FLEX".parse().unwrap();
//! let players = vec![
//!     PlayerPointEntry::new("4046", 24.0, Some(Position::QB)),
//!     PlayerPointEntry::new("6794", 18.5, Some(Position::RB)),
//!     PlayerPointEntry::new("4881", 11.0, Some(Position::RB)),
//! ];
//!
//! let lineup = optimize(&players, &template);
//! assert_eq!(lineup.total_points, 53.5);
//! ```
//!
//! ## Environment Configuration
//!
//! Set your Sleeper league ID to avoid passing it in every command:
//! ```bash
//! export SLEEPER_LEAGUE_ID=1048308938824937472
//! ```

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod sleeper;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{
    LeagueId, MatchupId, PlayerId, Position, RosterId, SlotCode, SlotTemplate, Week, WeekRange,
};
pub use error::{Result, SleeperError};

pub const LEAGUE_ID_ENV_VAR: &str = "SLEEPER_LEAGUE_ID";
