//! Season standings command

use std::fmt::Write as _;
use std::str::FromStr;

use crate::{
    analysis::standings::{
        aggregate, ActualPointsSource, HalfWinRule, SeasonStandings, StandingsOptions,
        TeamSeasonAccumulator,
    },
    LeagueId, Result, SleeperError,
};

use super::{
    common::{CommandContext, WeekOverrides},
    resolve_league_id,
};

/// Row order for the standings table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StandingsSort {
    /// Wins plus half-wins, then points for.
    #[default]
    Record,
    /// Season best-ball points.
    BestBall,
}

impl FromStr for StandingsSort {
    type Err = SleeperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "record" | "standings" => Ok(StandingsSort::Record),
            "best-ball" | "bestball" | "bb" => Ok(StandingsSort::BestBall),
            other => Err(SleeperError::InvalidOption {
                option: "sort (expected record or best-ball)".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for StandingsSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StandingsSort::Record => write!(f, "record"),
            StandingsSort::BestBall => write!(f, "best-ball"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StandingsParams {
    pub league_id: Option<LeagueId>,
    pub weeks: WeekOverrides,
    pub refresh: bool,
    pub sort: StandingsSort,
    pub options: StandingsOptions,
    pub as_json: bool,
}

pub const STANDINGS_HEADER: &str = "Rank|Team|W-L-T|Half Wins|PF|PA|BB Points|Off BB Points";

pub fn standings_row(rank: usize, team: &TeamSeasonAccumulator) -> String {
    format!(
        "{}|{}|{}|{:.1}|{:.2}|{:.2}|{:.2}|{:.2}",
        rank,
        team.team_name,
        team.record(),
        team.half_wins,
        team.points_for,
        team.points_against,
        team.total_best_ball_points,
        team.total_offensive_best_ball_points
    )
}

/// Teams in the requested order.
pub fn sorted_teams(standings: &SeasonStandings, sort: StandingsSort) -> Vec<&TeamSeasonAccumulator> {
    match sort {
        StandingsSort::Record => standings.ranked().iter().collect(),
        StandingsSort::BestBall => standings.by_best_ball(),
    }
}

/// Pipe-delimited standings table, header included.
pub fn format_standings_table(standings: &SeasonStandings, sort: StandingsSort) -> String {
    let mut out = String::from(STANDINGS_HEADER);
    for (i, team) in sorted_teams(standings, sort).into_iter().enumerate() {
        let _ = write!(out, "\n{}", standings_row(i + 1, team));
    }
    out
}

/// Stderr note listing weeks whose matchups could not be retrieved.
pub fn skipped_weeks_warning(standings: &SeasonStandings) -> Option<String> {
    if standings.skipped_weeks.is_empty() {
        return None;
    }
    let skipped: Vec<String> = standings.skipped_weeks.iter().map(|w| w.to_string()).collect();
    Some(format!("⚠ Skipped weeks with unavailable data: {}", skipped.join(", ")))
}

/// Handle the standings command
pub async fn handle_standings(params: StandingsParams) -> Result<()> {
    let league_id = resolve_league_id(params.league_id)?;
    // tarpaulin::skip - HTTP/file I/O call, tested via integration tests
    let ctx = CommandContext::new(league_id, params.refresh, params.weeks).await?;

    let standings = aggregate(
        &ctx.client,
        league_id,
        &ctx.config,
        &ctx.players,
        &ctx.teams,
        params.options,
    )
    .await;

    if let Some(warning) = skipped_weeks_warning(&standings) {
        eprintln!("{warning}");
    }

    if params.as_json {
        let teams = sorted_teams(&standings, params.sort);
        println!("{}", serde_json::to_string_pretty(&teams)?); // tarpaulin::skip
        return Ok(());
    }

    println!("{}", format_standings_table(&standings, params.sort));
    describe_policy(&params.options, standings.weeks_processed.len());

    Ok(())
}

fn describe_policy(options: &StandingsOptions, weeks: usize) {
    let rule = match options.half_win_rule {
        HalfWinRule::BottomExclusive => "top floor(N/2)",
        HalfWinRule::MedianInclusive => "top ceil(N/2)",
    };
    let actual = match options.actual_points {
        ActualPointsSource::StartersPoints => "reported starter points",
        ActualPointsSource::DirectoryFiltered => "starters with a known position",
    };
    eprintln!("{weeks} weeks processed; half wins to the {rule}; PF from {actual}");
}
