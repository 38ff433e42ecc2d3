//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use types::{LeagueId, Week};

use crate::{
    analysis::standings::{ActualPointsSource, HalfWinRule},
    commands::standings::StandingsSort,
};

/// Arguments shared by every league report
#[derive(Debug, Args)]
pub struct LeagueArgs {
    /// League ID (or set `SLEEPER_LEAGUE_ID` env var).
    #[clap(long, short)]
    pub league_id: Option<LeagueId>,

    /// Force refresh from Sleeper, overwriting cached responses.
    #[clap(long)]
    pub refresh: bool,

    /// Output results as JSON instead of text lines.
    #[clap(long)]
    pub json: bool,
}

/// Scoring policy knobs
#[derive(Debug, Args)]
pub struct ScoringArgs {
    /// Actual points source: `starters` (reported starter points) or
    /// `directory` (starters whose position the player directory knows).
    #[clap(long = "actual", default_value_t = ActualPointsSource::default())]
    pub actual_points: ActualPointsSource,
}

#[derive(Debug, Subcommand)]
pub enum GetCmd {
    /// Fetch and optionally refresh cached league data (settings, users, rosters)
    LeagueData {
        /// League ID (or set `SLEEPER_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Force refresh from Sleeper, overwriting the cache.
        #[clap(long)]
        refresh: bool,

        /// Print the cache location and roster list when done.
        #[clap(long)]
        verbose: bool,
    },

    /// Season standings: record, half wins, points and best-ball totals.
    ///
    /// Walks the regular season week by week and stops at the first week
    /// without matchups.
    Standings {
        #[clap(flatten)]
        league: LeagueArgs,

        #[clap(flatten)]
        scoring: ScoringArgs,

        /// First week to include (defaults to the league's start week).
        #[clap(long)]
        start_week: Option<Week>,

        /// Last week to include (defaults to the week before the playoffs).
        #[clap(long)]
        end_week: Option<Week>,

        /// Row order: `record` or `best-ball`.
        #[clap(long, default_value_t = StandingsSort::default())]
        sort: StandingsSort,

        /// Half-win cutoff on odd team counts: `floor` excludes the median team, `ceil` includes it.
        #[clap(long, default_value_t = HalfWinRule::BottomExclusive)]
        half_win: HalfWinRule,
    },

    /// Every team's best-ball score for one week, or one team's optimal lineup.
    BestBall {
        #[clap(flatten)]
        league: LeagueArgs,

        #[clap(flatten)]
        scoring: ScoringArgs,

        /// Week to score.
        #[clap(long, short)]
        week: Week,

        /// Show the optimal lineup for this team (name or part of it).
        #[clap(long, short)]
        team: Option<String>,
    },

    /// Teams scoring in the top half of the league each week.
    TopHalf {
        #[clap(flatten)]
        league: LeagueArgs,

        #[clap(flatten)]
        scoring: ScoringArgs,

        /// Single week (defaults to every regular-season week played).
        #[clap(long, short)]
        week: Option<Week>,

        /// Cutoff on odd team counts: `ceil` includes the median team.
        #[clap(long, default_value_t = HalfWinRule::MedianInclusive)]
        half_win: HalfWinRule,
    },

    /// Download the NFL player directory into the local database.
    UpdatePlayers {
        /// Remove stored players before downloading.
        #[clap(long)]
        clear: bool,

        /// Print the database location when done.
        #[clap(long)]
        verbose: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "sleeper-bestball", about = "Best-ball standings for Sleeper fantasy leagues")]
pub struct Sleeper {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Get data from a Sleeper league
    Get {
        #[clap(subcommand)]
        cmd: GetCmd,
    },
}
