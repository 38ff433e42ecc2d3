//! Command implementations for the Sleeper best-ball CLI

pub mod best_ball;
pub mod common;
pub mod league_data;
pub mod standings;
pub mod top_half;
pub mod update_players;

use crate::{LeagueId, Result, SleeperError, LEAGUE_ID_ENV_VAR};


/// League ID from the flag, falling back to `SLEEPER_LEAGUE_ID`.
pub fn resolve_league_id(league_id: Option<LeagueId>) -> Result<LeagueId> {
    league_id
        .or_else(|| {
            std::env::var(LEAGUE_ID_ENV_VAR)
                .ok()
                .and_then(|s| s.parse::<LeagueId>().ok())
        })
        .ok_or_else(|| SleeperError::MissingLeagueId {
            env_var: LEAGUE_ID_ENV_VAR.to_string(),
        })
}
