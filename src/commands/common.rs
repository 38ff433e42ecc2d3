//! Common utilities and helper functions shared across commands.
//!
//! Every report needs the same league context: the slot template and
//! regular-season weeks, the roster → team-name directory and the player →
//! position directory. [`CommandContext`] loads them once.

use tracing::{info, warn};

use super::update_players::refresh_player_directory;
use crate::{
    analysis::source::LeagueConfig,
    cli::types::WeekRange,
    core::cache::ApiCache,
    sleeper::{
        directory::{PlayerDirectory, TeamDirectory},
        types::League,
        SleeperClient,
    },
    storage::PlayerDatabase,
    LeagueId, Result, Week,
};

/// Week bounds given on the command line; both ends inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekOverrides {
    pub start_week: Option<Week>,
    pub end_week: Option<Week>,
}

impl WeekOverrides {
    pub fn single(week: Week) -> Self {
        Self {
            start_week: Some(week),
            end_week: Some(week),
        }
    }

    /// Narrow the league's regular season to the requested weeks.
    pub fn apply(&self, config: &LeagueConfig) -> Result<LeagueConfig> {
        let start = self.start_week.unwrap_or(config.week_range.start);
        let end_exclusive = match self.end_week {
            Some(end) => Week::new(end.as_u16().saturating_add(1)),
            None => config.week_range.end_exclusive,
        };
        Ok(LeagueConfig {
            slot_template: config.slot_template.clone(),
            week_range: WeekRange::new(start, end_exclusive)?,
        })
    }
}

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub league_id: LeagueId,
    pub client: SleeperClient,
    pub league: League,
    pub config: LeagueConfig,
    pub players: PlayerDirectory,
    pub teams: TeamDirectory,
}

impl CommandContext {
    /// Context backed by the public API, the on-disk cache and the default
    /// player database.
    pub async fn new(league_id: LeagueId, refresh: bool, weeks: WeekOverrides) -> Result<Self> {
        let client = SleeperClient::new()?
            .with_cache(ApiCache::on_disk())
            .refresh(refresh);

        // tarpaulin::skip - opens the user's database
        let mut db = PlayerDatabase::new()?;
        Self::build(client, &mut db, league_id, weeks).await
    }

    /// Assemble a context from an already configured client and database.
    pub async fn build(
        client: SleeperClient,
        db: &mut PlayerDatabase,
        league_id: LeagueId,
        weeks: WeekOverrides,
    ) -> Result<Self> {
        let current_week = match client.get_nfl_state().await {
            Ok(state) => Some(state.week),
            Err(e) => {
                warn!(error = %e, "could not read NFL state, cached weeks will not be revalidated");
                None
            }
        };
        let client = client.with_current_week(current_week);

        let league = client.get_league(league_id).await?;
        let config = weeks.apply(&league.config()?)?;
        info!(league = %league.name, weeks = %config.week_range, "league loaded");

        let users = client.get_users(league_id).await?;
        let rosters = client.get_rosters(league_id).await?;
        let teams = TeamDirectory::from_league(&users, &rosters);

        let players = load_player_directory(&client, db).await?;

        Ok(Self {
            league_id,
            client,
            league,
            config,
            players,
            teams,
        })
    }
}

/// Player directory from SQLite, downloading it first when the table is empty.
pub async fn load_player_directory(
    client: &SleeperClient,
    db: &mut PlayerDatabase,
) -> Result<PlayerDirectory> {
    if db.player_count()? == 0 {
        info!("player directory is empty, downloading from Sleeper");
        refresh_player_directory(client, db).await?;
    }
    Ok(db.load_directory()?)
}
