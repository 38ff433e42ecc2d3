//! Best-ball lineup optimization and season standings.

pub mod lineup;
pub mod source;
pub mod standings;

pub use lineup::{optimize, BestBallLineup, LineupSlot, PlayerPointEntry};
pub use source::{InMemoryMatchups, LeagueConfig, MatchupRecord, MatchupSource};
pub use standings::{
    aggregate, ActualPointsSource, HalfWinRule, SeasonStandings, StandingsAggregator,
    StandingsOptions, TeamSeasonAccumulator, TeamWeekScore,
};
