//! Wire types for the Sleeper v1 API.
//!
//! These mirror the JSON the provider returns and are deliberately loose
//! (most fields optional or defaulted). Matchups are validated into
//! [`MatchupRecord`] before anything downstream sees them.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    analysis::source::{LeagueConfig, MatchupRecord},
    cli::types::{MatchupId, PlayerId, Position, RosterId, SlotTemplate, WeekRange},
    Result, SleeperError, Week,
};


/// Starter id Sleeper uses for an unfilled starting slot.
pub const EMPTY_STARTER: &str = "0";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct League {
    pub league_id: String,
    pub name: String,
    pub season: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_rosters: Option<u32>,
    pub roster_positions: SlotTemplate,
    pub settings: LeagueSettings,
}

impl League {
    /// Slot template and regular-season weeks for this league.
    pub fn config(&self) -> Result<LeagueConfig> {
        Ok(LeagueConfig {
            slot_template: self.roster_positions.clone(),
            week_range: self.settings.regular_season()?,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeagueSettings {
    #[serde(default = "default_start_week")]
    pub start_week: Week,
    /// First playoff week; the regular season ends just before it.
    #[serde(default = "default_playoff_week_start")]
    pub playoff_week_start: Week,
    #[serde(default)]
    pub num_teams: Option<u32>,
}

impl LeagueSettings {
    pub fn regular_season(&self) -> Result<WeekRange> {
        WeekRange::new(self.start_week, self.playoff_week_start)
    }
}

fn default_start_week() -> Week {
    Week::new(1)
}

fn default_playoff_week_start() -> Week {
    Week::new(15)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub metadata: Option<UserMetadata>,
}

impl User {
    pub fn team_name(&self) -> Option<&str> {
        self.metadata.as_ref()?.team_name.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Roster {
    pub roster_id: RosterId,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<PlayerId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starters: Vec<PlayerId>,
}

/// One roster's entry in `/league/{id}/matchups/{week}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawMatchup {
    pub roster_id: RosterId,
    #[serde(default)]
    pub matchup_id: Option<MatchupId>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starters: Vec<PlayerId>,
    #[serde(default)]
    pub starters_points: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players_points: BTreeMap<PlayerId, f64>,
}

impl RawMatchup {
    /// Reported team score, falling back to the starters' sum.
    pub fn reported_points(&self) -> f64 {
        self.points.unwrap_or_else(|| {
            self.starters_points
                .as_ref()
                .map(|p| p.iter().sum())
                .unwrap_or(0.0)
        })
    }
}

impl TryFrom<RawMatchup> for MatchupRecord {
    type Error = SleeperError;

    fn try_from(raw: RawMatchup) -> Result<Self> {
        let mut seen = HashSet::new();
        for starter in raw.starters.iter().filter(|s| s.as_str() != EMPTY_STARTER) {
            if !seen.insert(starter) {
                return Err(SleeperError::InvalidMatchup {
                    roster_id: raw.roster_id.as_u32(),
                    reason: format!("starter {starter} listed twice"),
                });
            }
        }

        let starters_points = match raw.starters_points {
            Some(points) if points.len() == raw.starters.len() => points,
            _ => raw
                .starters
                .iter()
                .map(|id| {
                    if id.as_str() == EMPTY_STARTER {
                        0.0
                    } else {
                        raw.players_points.get(id).copied().unwrap_or(0.0)
                    }
                })
                .collect(),
        };

        Ok(MatchupRecord {
            roster_id: raw.roster_id,
            matchup_id: raw.matchup_id,
            starters: raw.starters,
            starters_points,
            players_points: raw.players_points,
        })
    }
}

/// Validate a whole week; one malformed record rejects the week.
pub fn into_records(raw: Vec<RawMatchup>) -> Result<Vec<MatchupRecord>> {
    raw.into_iter().map(MatchupRecord::try_from).collect()
}

/// An entry of `/players/nfl`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerInfo {
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
}

impl PlayerInfo {
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|n| !n.is_empty()) {
            return full.to_string();
        }
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => "Unknown".to_string(),
        }
    }

    /// Lineup-eligible position; `DEF`, coaching staff and blanks give `None`.
    pub fn lineup_position(&self) -> Option<Position> {
        self.position.as_deref()?.parse().ok()
    }
}

pub type PlayersResponse = HashMap<PlayerId, PlayerInfo>;

/// `/state/nfl`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NflState {
    pub week: Week,
    pub season: String,
    #[serde(default)]
    pub season_type: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
