//! Season standings built from weekly best-ball results.
//!
//! Each regular-season week is folded into one [`TeamSeasonAccumulator`] per
//! roster: head-to-head result, half-win bonus for finishing in the top half
//! of the league's actual scores, points for/against and best-ball totals.
//! The final table ranks teams by `wins + half_wins`, then points for.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    lineup::{optimize, tag_positions, BestBallLineup},
    source::{LeagueConfig, MatchupRecord, MatchupSource},
};
use crate::{
    cli::types::{RosterId, SlotTemplate},
    sleeper::directory::{PlayerDirectory, TeamDirectory},
    LeagueId, SleeperError, Week,
};


/// How many teams earn the half-win bonus in a week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HalfWinRule {
    /// `floor(N / 2)`: with an odd team count the median team gets nothing.
    #[default]
    BottomExclusive,
    /// `ceil(N / 2)`: the median team of an odd league counts as top half.
    MedianInclusive,
}

impl HalfWinRule {
    pub fn qualifying_count(&self, teams: usize) -> usize {
        match self {
            HalfWinRule::BottomExclusive => teams / 2,
            HalfWinRule::MedianInclusive => teams.div_ceil(2),
        }
    }
}

impl fmt::Display for HalfWinRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalfWinRule::BottomExclusive => write!(f, "floor"),
            HalfWinRule::MedianInclusive => write!(f, "ceil"),
        }
    }
}

impl FromStr for HalfWinRule {
    type Err = SleeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "floor" | "exclusive" => Ok(HalfWinRule::BottomExclusive),
            "ceil" | "inclusive" | "median" => Ok(HalfWinRule::MedianInclusive),
            other => Err(SleeperError::InvalidOption {
                option: "half-win rule (expected floor or ceil)".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Which figure counts as a team's actual score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActualPointsSource {
    /// Sum of the provider's `starters_points`.
    #[default]
    StartersPoints,
    /// Sum of `players_points` over starters the player directory places at a
    /// lineup position. Disagrees with the provider when the directory is stale.
    DirectoryFiltered,
}

impl fmt::Display for ActualPointsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActualPointsSource::StartersPoints => write!(f, "starters"),
            ActualPointsSource::DirectoryFiltered => write!(f, "directory"),
        }
    }
}

impl FromStr for ActualPointsSource {
    type Err = SleeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "starters" => Ok(ActualPointsSource::StartersPoints),
            "directory" => Ok(ActualPointsSource::DirectoryFiltered),
            other => Err(SleeperError::InvalidOption {
                option: "actual-points source (expected starters or directory)".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsOptions {
    pub half_win_rule: HalfWinRule,
    pub actual_points: ActualPointsSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchupOutcome {
    Win,
    Loss,
    Tie,
}

impl MatchupOutcome {
    fn between(points: f64, opponent_points: f64) -> Self {
        match points.partial_cmp(&opponent_points) {
            Some(Ordering::Greater) => MatchupOutcome::Win,
            Some(Ordering::Less) => MatchupOutcome::Loss,
            _ => MatchupOutcome::Tie,
        }
    }
}

/// One team's line for one processed week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyScore {
    pub week: Week,
    pub actual_points: f64,
    pub best_ball_points: f64,
    pub offensive_best_ball_points: f64,
    /// `None` on a bye or when the opponent's record is missing.
    pub opponent_points: Option<f64>,
    pub outcome: Option<MatchupOutcome>,
    pub half_win: bool,
}

/// Running season totals for one roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonAccumulator {
    pub roster_id: RosterId,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub half_wins: f64,
    pub points_for: f64,
    pub points_against: f64,
    pub total_best_ball_points: f64,
    pub total_offensive_best_ball_points: f64,
    pub weekly_scores: Vec<WeeklyScore>,
}

impl TeamSeasonAccumulator {
    pub fn new(roster_id: RosterId, team_name: impl Into<String>) -> Self {
        Self {
            roster_id,
            team_name: team_name.into(),
            wins: 0,
            losses: 0,
            ties: 0,
            half_wins: 0.0,
            points_for: 0.0,
            points_against: 0.0,
            total_best_ball_points: 0.0,
            total_offensive_best_ball_points: 0.0,
            weekly_scores: Vec::new(),
        }
    }

    /// Head-to-head wins plus half-win bonuses; the primary ranking key.
    pub fn win_total(&self) -> f64 {
        f64::from(self.wins) + self.half_wins
    }

    /// `W-L-T`
    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ties)
    }

    pub fn week(&self, week: Week) -> Option<&WeeklyScore> {
        self.weekly_scores.iter().find(|w| w.week == week)
    }

    fn apply(&mut self, score: WeeklyScore) {
        match score.outcome {
            Some(MatchupOutcome::Win) => self.wins += 1,
            Some(MatchupOutcome::Loss) => self.losses += 1,
            Some(MatchupOutcome::Tie) => self.ties += 1,
            None => {}
        }
        if score.half_win {
            self.half_wins += 0.5;
        }
        self.points_for += score.actual_points;
        if let Some(against) = score.opponent_points {
            self.points_against += against;
        }
        self.total_best_ball_points += score.best_ball_points;
        self.total_offensive_best_ball_points += score.offensive_best_ball_points;
        self.weekly_scores.push(score);
    }
}

/// Final ranking order: win total, then points for, both descending.
/// Remaining ties fall back to roster id so the order is total.
pub fn standings_order(a: &TeamSeasonAccumulator, b: &TeamSeasonAccumulator) -> Ordering {
    b.win_total()
        .total_cmp(&a.win_total())
        .then_with(|| b.points_for.total_cmp(&a.points_for))
        .then_with(|| a.roster_id.cmp(&b.roster_id))
}

/// Completed season table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonStandings {
    /// Sorted by [`standings_order`].
    pub teams: Vec<TeamSeasonAccumulator>,
    pub weeks_processed: Vec<Week>,
    pub skipped_weeks: Vec<Week>,
}

impl SeasonStandings {
    pub fn ranked(&self) -> &[TeamSeasonAccumulator] {
        &self.teams
    }

    /// Teams by season best-ball points, then points for.
    pub fn by_best_ball(&self) -> Vec<&TeamSeasonAccumulator> {
        let mut teams: Vec<&TeamSeasonAccumulator> = self.teams.iter().collect();
        teams.sort_by(|a, b| {
            b.total_best_ball_points
                .total_cmp(&a.total_best_ball_points)
                .then_with(|| b.points_for.total_cmp(&a.points_for))
                .then_with(|| a.roster_id.cmp(&b.roster_id))
        });
        teams
    }

    /// Teams that earned the half-win bonus in `week`, best score first.
    pub fn top_half(&self, week: Week) -> Vec<(&TeamSeasonAccumulator, &WeeklyScore)> {
        let mut scorers: Vec<_> = self
            .teams
            .iter()
            .filter_map(|team| team.week(week).filter(|w| w.half_win).map(|w| (team, w)))
            .collect();
        scorers.sort_by(|(ta, a), (tb, b)| {
            b.actual_points
                .total_cmp(&a.actual_points)
                .then_with(|| ta.roster_id.cmp(&tb.roster_id))
        });
        scorers
    }

    pub fn team(&self, roster_id: RosterId) -> Option<&TeamSeasonAccumulator> {
        self.teams.iter().find(|t| t.roster_id == roster_id)
    }
}

/// One team's best-ball evaluation for a single week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamWeekScore {
    pub roster_id: RosterId,
    pub team_name: String,
    pub week: Week,
    pub actual_points: f64,
    pub best_ball_points: f64,
    pub offensive_best_ball_points: f64,
    pub lineup: BestBallLineup,
}

/// A team's actual score under the chosen policy.
pub fn actual_points(
    record: &MatchupRecord,
    source: ActualPointsSource,
    players: &PlayerDirectory,
) -> f64 {
    match source {
        ActualPointsSource::StartersPoints => record.actual_points(),
        ActualPointsSource::DirectoryFiltered => record
            .starters
            .iter()
            .filter(|id| players.position(id).is_some())
            .filter_map(|id| record.players_points.get(id))
            .sum(),
    }
}

/// Rosters earning the half-win bonus given each roster's actual score.
/// Equal scores are ordered by roster id.
pub fn half_win_recipients(scores: &[(RosterId, f64)], rule: HalfWinRule) -> HashSet<RosterId> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|(ra, a), (rb, b)| b.total_cmp(a).then_with(|| ra.cmp(rb)));
    sorted
        .into_iter()
        .take(rule.qualifying_count(scores.len()))
        .map(|(roster_id, _)| roster_id)
        .collect()
}

/// Evaluate every record of a week: actual points, best-ball points and lineup.
///
/// Teams are independent, so the optimizer runs in parallel; the output keeps
/// the order of `records`.
pub fn score_week(
    week: Week,
    records: &[MatchupRecord],
    template: &SlotTemplate,
    players: &PlayerDirectory,
    teams: &TeamDirectory,
    actual_source: ActualPointsSource,
) -> Vec<TeamWeekScore> {
    records
        .par_iter()
        .map(|record| {
            let entries = tag_positions(&record.players_points, players);
            let lineup = optimize(&entries, template);
            TeamWeekScore {
                roster_id: record.roster_id,
                team_name: teams.name(record.roster_id),
                week,
                actual_points: actual_points(record, actual_source, players),
                best_ball_points: lineup.total_points,
                offensive_best_ball_points: lineup.offensive_points(),
                lineup,
            }
        })
        .collect()
}

/// Folds weeks of matchup records into season standings.
pub struct StandingsAggregator<'a> {
    config: &'a LeagueConfig,
    players: &'a PlayerDirectory,
    teams: &'a TeamDirectory,
    options: StandingsOptions,
    accumulators: BTreeMap<RosterId, TeamSeasonAccumulator>,
    weeks_processed: Vec<Week>,
    skipped_weeks: Vec<Week>,
}

impl<'a> StandingsAggregator<'a> {
    /// Start a season with one empty accumulator per roster in `teams`.
    pub fn new(
        config: &'a LeagueConfig,
        players: &'a PlayerDirectory,
        teams: &'a TeamDirectory,
        options: StandingsOptions,
    ) -> Self {
        let accumulators = teams
            .roster_ids()
            .map(|id| (id, TeamSeasonAccumulator::new(id, teams.name(id))))
            .collect();
        Self {
            config,
            players,
            teams,
            options,
            accumulators,
            weeks_processed: Vec::new(),
            skipped_weeks: Vec::new(),
        }
    }

    /// Fold one week of records into the season totals.
    pub fn record_week(&mut self, week: Week, records: &[MatchupRecord]) {
        let scores = score_week(
            week,
            records,
            &self.config.slot_template,
            self.players,
            self.teams,
            self.options.actual_points,
        );

        let actuals: Vec<(RosterId, f64)> =
            scores.iter().map(|s| (s.roster_id, s.actual_points)).collect();
        let half_winners = half_win_recipients(&actuals, self.options.half_win_rule);

        for (record, score) in records.iter().zip(&scores) {
            let opponent_points = record.matchup_id.and_then(|matchup_id| {
                records
                    .iter()
                    .zip(&scores)
                    .find(|(other, _)| {
                        other.matchup_id == Some(matchup_id) && other.roster_id != record.roster_id
                    })
                    .map(|(_, other)| other.actual_points)
            });
            if opponent_points.is_none() {
                debug!(week = week.as_u16(), roster = %record.roster_id, "no opponent this week");
            }

            let weekly = WeeklyScore {
                week,
                actual_points: score.actual_points,
                best_ball_points: score.best_ball_points,
                offensive_best_ball_points: score.offensive_best_ball_points,
                opponent_points,
                outcome: opponent_points.map(|against| MatchupOutcome::between(score.actual_points, against)),
                half_win: half_winners.contains(&record.roster_id),
            };

            self.accumulators
                .entry(record.roster_id)
                .or_insert_with(|| TeamSeasonAccumulator::new(record.roster_id, score.team_name.clone()))
                .apply(weekly);
        }

        self.weeks_processed.push(week);
    }

    /// Note a week that could not be retrieved.
    pub fn skip_week(&mut self, week: Week) {
        self.skipped_weeks.push(week);
    }

    /// Walk the configured week range, pulling each week from `source`.
    ///
    /// The loop stops at the first week with no records (not played yet). A
    /// week whose retrieval fails is logged and skipped.
    pub async fn run<S>(mut self, source: &S, league_id: LeagueId) -> SeasonStandings
    where
        S: MatchupSource + ?Sized,
    {
        for week in self.config.week_range.weeks() {
            match source.matchups(league_id, week).await {
                Ok(records) if records.is_empty() => {
                    info!(week = week.as_u16(), "no matchups yet, stopping season loop");
                    break;
                }
                Ok(records) => {
                    debug!(week = week.as_u16(), records = records.len(), "folding week");
                    self.record_week(week, &records);
                }
                Err(e) => {
                    warn!(week = week.as_u16(), error = %e, "skipping week");
                    self.skip_week(week);
                }
            }
        }
        self.finish()
    }

    pub fn finish(self) -> SeasonStandings {
        let mut teams: Vec<TeamSeasonAccumulator> = self.accumulators.into_values().collect();
        teams.sort_by(standings_order);
        SeasonStandings {
            teams,
            weeks_processed: self.weeks_processed,
            skipped_weeks: self.skipped_weeks,
        }
    }
}

/// Compute season standings for a league.
pub async fn aggregate<S>(
    source: &S,
    league_id: LeagueId,
    config: &LeagueConfig,
    players: &PlayerDirectory,
    teams: &TeamDirectory,
    options: StandingsOptions,
) -> SeasonStandings
where
    S: MatchupSource + ?Sized,
{
    StandingsAggregator::new(config, players, teams, options)
        .run(source, league_id)
        .await
}
