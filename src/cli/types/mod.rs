//! Type-safe wrappers and enums for Sleeper league data.

pub mod ids;
pub mod position;
pub mod slot;
pub mod time;

pub use ids::{LeagueId, MatchupId, PlayerId, RosterId};
pub use position::Position;
pub use slot::{SlotCode, SlotTemplate};
pub use time::{Week, WeekRange};
