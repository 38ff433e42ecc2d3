//! Inputs consumed by the best-ball and standings computations.
//!
//! Everything here is already validated: the Sleeper wire types are converted
//! into [`MatchupRecord`]s once, at the data-access boundary, so the optimizer
//! and the aggregator never deal with loosely shaped responses.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    cli::types::{MatchupId, PlayerId, RosterId, SlotTemplate, WeekRange},
    LeagueId, Result, SleeperError, Week,
};

/// League settings the core needs: which slots to fill and which weeks count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueConfig {
    pub slot_template: SlotTemplate,
    pub week_range: WeekRange,
}

/// One roster's scoring for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    pub roster_id: RosterId,
    /// `None` when the roster has no opponent this week.
    pub matchup_id: Option<MatchupId>,
    pub starters: Vec<PlayerId>,
    /// Aligned with `starters`.
    pub starters_points: Vec<f64>,
    /// Every rostered player's realized points, starters and bench alike.
    pub players_points: BTreeMap<PlayerId, f64>,
}

impl MatchupRecord {
    /// Points the manager actually started, as reported by the provider.
    pub fn actual_points(&self) -> f64 {
        self.starters_points.iter().sum()
    }

    /// Starters paired with their reported points.
    pub fn starter_scores(&self) -> impl Iterator<Item = (&PlayerId, f64)> {
        self.starters
            .iter()
            .zip(self.starters_points.iter().copied())
    }
}

/// Where weekly matchup records come from.
///
/// An empty `Ok` means the week has not been played yet; an `Err` means the
/// week could not be retrieved.
#[async_trait]
pub trait MatchupSource: Send + Sync {
    async fn matchups(&self, league_id: LeagueId, week: Week) -> Result<Vec<MatchupRecord>>;
}

/// A [`MatchupSource`] backed by records already in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMatchups {
    weeks: HashMap<Week, Vec<MatchupRecord>>,
    unavailable: HashSet<Week>,
}

impl InMemoryMatchups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_week(mut self, week: Week, records: Vec<MatchupRecord>) -> Self {
        self.weeks.insert(week, records);
        self
    }

    /// Make `week` fail as if the upstream provider were down.
    pub fn with_unavailable_week(mut self, week: Week) -> Self {
        self.unavailable.insert(week);
        self
    }
}

#[async_trait]
impl MatchupSource for InMemoryMatchups {
    async fn matchups(&self, _league_id: LeagueId, week: Week) -> Result<Vec<MatchupRecord>> {
        if self.unavailable.contains(&week) {
            return Err(SleeperError::Upstream {
                message: format!("week {week} unavailable"),
            });
        }
        Ok(self.weeks.get(&week).cloned().unwrap_or_default())
    }
}
