//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use sleeper_bestball::{
    analysis::standings::StandingsOptions,
    cli::{Commands, GetCmd, Sleeper},
    commands::{
        best_ball::{handle_best_ball, BestBallParams},
        common::WeekOverrides,
        league_data::handle_league_data,
        standings::{handle_standings, StandingsParams},
        top_half::{handle_top_half, TopHalfParams},
        update_players::handle_update_players,
    },
    Result,
};

/// Diagnostics go to stderr so report output on stdout stays pipeable.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sleeper_bestball=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let app = Sleeper::parse();

    match app.command {
        Commands::Get { cmd } => match cmd {
            GetCmd::LeagueData {
                league_id,
                refresh,
                verbose,
            } => handle_league_data(league_id, refresh, verbose).await?,

            GetCmd::Standings {
                league,
                scoring,
                start_week,
                end_week,
                sort,
                half_win,
            } => {
                handle_standings(StandingsParams {
                    league_id: league.league_id,
                    weeks: WeekOverrides {
                        start_week,
                        end_week,
                    },
                    refresh: league.refresh,
                    sort,
                    options: StandingsOptions {
                        half_win_rule: half_win,
                        actual_points: scoring.actual_points,
                    },
                    as_json: league.json,
                })
                .await?
            }

            GetCmd::BestBall {
                league,
                scoring,
                week,
                team,
            } => {
                handle_best_ball(BestBallParams {
                    league_id: league.league_id,
                    week,
                    team,
                    actual_points: scoring.actual_points,
                    refresh: league.refresh,
                    as_json: league.json,
                })
                .await?
            }

            GetCmd::TopHalf {
                league,
                scoring,
                week,
                half_win,
            } => {
                handle_top_half(TopHalfParams {
                    league_id: league.league_id,
                    week,
                    rule: half_win,
                    actual_points: scoring.actual_points,
                    refresh: league.refresh,
                    as_json: league.json,
                })
                .await?
            }

            GetCmd::UpdatePlayers { clear, verbose } => handle_update_players(clear, verbose).await?,
        },
    }

    Ok(())
}
