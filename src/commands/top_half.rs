//! Weekly top-half scorers

use std::fmt::Write as _;

use crate::{
    analysis::standings::{aggregate, ActualPointsSource, HalfWinRule, SeasonStandings, StandingsOptions},
    LeagueId, Result, Week,
};

use super::{
    common::{CommandContext, WeekOverrides},
    resolve_league_id,
    standings::skipped_weeks_warning,
};

#[derive(Debug, Clone)]
pub struct TopHalfParams {
    pub league_id: Option<LeagueId>,
    /// A single week; every regular-season week when `None`.
    pub week: Option<Week>,
    pub rule: HalfWinRule,
    pub actual_points: ActualPointsSource,
    pub refresh: bool,
    pub as_json: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TopHalfEntry {
    pub week: Week,
    pub team_name: String,
    pub points: f64,
}

/// Top-half scorers for every processed week, in week order.
pub fn top_half_entries(standings: &SeasonStandings) -> Vec<TopHalfEntry> {
    standings
        .weeks_processed
        .iter()
        .flat_map(|&week| {
            standings
                .top_half(week)
                .into_iter()
                .map(move |(team, score)| TopHalfEntry {
                    week,
                    team_name: team.team_name.clone(),
                    points: score.actual_points,
                })
        })
        .collect()
}

pub fn format_top_half(entries: &[TopHalfEntry]) -> String {
    let mut out = String::from("Week|Team|Points");
    for e in entries {
        let _ = write!(out, "\n{}|{}|{:.2}", e.week, e.team_name, e.points);
    }
    out
}

/// Handle the top-half command
pub async fn handle_top_half(params: TopHalfParams) -> Result<()> {
    let league_id = resolve_league_id(params.league_id)?;
    let weeks = params.week.map(WeekOverrides::single).unwrap_or_default();
    // tarpaulin::skip - HTTP/file I/O call, tested via integration tests
    let ctx = CommandContext::new(league_id, params.refresh, weeks).await?;

    let options = StandingsOptions {
        half_win_rule: params.rule,
        actual_points: params.actual_points,
    };
    let standings = aggregate(&ctx.client, league_id, &ctx.config, &ctx.players, &ctx.teams, options).await;
    if let Some(warning) = skipped_weeks_warning(&standings) {
        eprintln!("{warning}");
    }
    let entries = top_half_entries(&standings);

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&entries)?); // tarpaulin::skip
    } else {
        println!("{}", format_top_half(&entries));
    }
    Ok(())
}
