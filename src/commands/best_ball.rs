//! Weekly best-ball report

use std::fmt::Write as _;

use tracing::info;

use crate::{
    analysis::{
        source::MatchupSource,
        standings::{score_week, ActualPointsSource, TeamWeekScore},
    },
    sleeper::directory::PlayerDirectory,
    LeagueId, Result, SleeperError, Week,
};

use super::{
    common::{CommandContext, WeekOverrides},
    resolve_league_id,
};

#[derive(Debug, Clone)]
pub struct BestBallParams {
    pub league_id: Option<LeagueId>,
    pub week: Week,
    /// Team name (or part of it) whose optimal lineup to print.
    pub team: Option<String>,
    pub actual_points: ActualPointsSource,
    pub refresh: bool,
    pub as_json: bool,
}

/// Best-ball points first, then actual points.
pub fn sort_by_best_ball(scores: &mut [TeamWeekScore]) {
    scores.sort_by(|a, b| {
        b.best_ball_points
            .total_cmp(&a.best_ball_points)
            .then_with(|| b.actual_points.total_cmp(&a.actual_points))
            .then_with(|| a.roster_id.cmp(&b.roster_id))
    });
}

pub fn format_week_table(scores: &[TeamWeekScore]) -> String {
    let mut out = String::from("Rank|Team|Actual|BB Points|Off BB Points|Left on Bench");
    for (i, s) in scores.iter().enumerate() {
        let _ = write!(
            out,
            "\n{}|{}|{:.2}|{:.2}|{:.2}|{:.2}",
            i + 1,
            s.team_name,
            s.actual_points,
            s.best_ball_points,
            s.offensive_best_ball_points,
            s.best_ball_points - s.actual_points
        );
    }
    out
}

pub fn format_lineup(score: &TeamWeekScore, players: &PlayerDirectory) -> String {
    let mut out = format!(
        "{} week {}: {:.2} best ball ({:.2} actual)\nSlot|Player|Pos|Points",
        score.team_name, score.week, score.best_ball_points, score.actual_points
    );
    for slot in &score.lineup.slots {
        let _ = write!(
            out,
            "\n{}|{}|{}|{:.2}",
            slot.slot,
            players.name(&slot.player_id),
            slot.position,
            slot.points
        );
    }
    out
}

/// Handle the best-ball command
pub async fn handle_best_ball(params: BestBallParams) -> Result<()> {
    let league_id = resolve_league_id(params.league_id)?;
    // tarpaulin::skip - HTTP/file I/O call, tested via integration tests
    let ctx = CommandContext::new(league_id, params.refresh, WeekOverrides::single(params.week)).await?;

    let records = ctx.client.matchups(league_id, params.week).await?;
    if records.is_empty() {
        println!("No matchups recorded for week {} yet", params.week);
        return Ok(());
    }
    info!(week = params.week.as_u16(), teams = records.len(), "scoring week");

    let mut scores = score_week(
        params.week,
        &records,
        &ctx.config.slot_template,
        &ctx.players,
        &ctx.teams,
        params.actual_points,
    );
    sort_by_best_ball(&mut scores);

    if let Some(query) = params.team.as_deref() {
        let roster_id = ctx.teams.find(query).ok_or_else(|| SleeperError::TeamNotFound {
            name: query.to_string(),
        })?;
        let score = scores
            .iter()
            .find(|s| s.roster_id == roster_id)
            .ok_or_else(|| SleeperError::TeamNotFound {
                name: ctx.teams.name(roster_id),
            })?;

        if params.as_json {
            println!("{}", serde_json::to_string_pretty(score)?); // tarpaulin::skip
        } else {
            println!("{}", format_lineup(score, &ctx.players));
        }
        return Ok(());
    }

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&scores)?); // tarpaulin::skip
    } else {
        println!("{}", format_week_table(&scores));
    }
    Ok(())
}
