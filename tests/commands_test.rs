//! Integration tests for command handlers

use serde_json::json;
use sleeper_bestball::{
    analysis::{
        source::{InMemoryMatchups, LeagueConfig, MatchupRecord},
        standings::{aggregate, HalfWinRule, StandingsOptions},
    },
    commands::{
        common::WeekOverrides,
        resolve_league_id,
        standings::{format_standings_table, StandingsSort, STANDINGS_HEADER},
        top_half::{format_top_half, top_half_entries},
    },
    sleeper::{
        directory::{PlayerDirectory, TeamDirectory},
        types::{League, Roster, User},
    },
    LeagueId, MatchupId, PlayerId, Position, RosterId, SleeperError, Week, LEAGUE_ID_ENV_VAR,
};

fn record(roster: u32, matchup: u32, starters: &[(&str, f64)]) -> MatchupRecord {
    MatchupRecord {
        roster_id: RosterId::new(roster),
        matchup_id: Some(MatchupId::new(matchup)),
        starters: starters.iter().map(|(id, _)| PlayerId::from(*id)).collect(),
        starters_points: starters.iter().map(|(_, p)| *p).collect(),
        players_points: starters
            .iter()
            .map(|(id, p)| (PlayerId::from(*id), *p))
            .collect(),
    }
}

#[test]
fn test_resolve_league_id() {
    // Env-dependent cases share one test so they cannot interleave.
    std::env::remove_var(LEAGUE_ID_ENV_VAR);
    match resolve_league_id(None) {
        Err(SleeperError::MissingLeagueId { env_var }) => assert_eq!(env_var, LEAGUE_ID_ENV_VAR),
        other => panic!("Expected MissingLeagueId error, got {other:?}"),
    }

    std::env::set_var(LEAGUE_ID_ENV_VAR, " 1048308938824937472 ");
    assert_eq!(
        resolve_league_id(None).unwrap(),
        LeagueId::new(1048308938824937472)
    );

    // An explicit id wins over the environment.
    assert_eq!(
        resolve_league_id(Some(LeagueId::new(12345))).unwrap(),
        LeagueId::new(12345)
    );

    std::env::set_var(LEAGUE_ID_ENV_VAR, "not_a_number");
    assert!(resolve_league_id(None).is_err());

    std::env::remove_var(LEAGUE_ID_ENV_VAR);
}

#[test]
fn test_constants() {
    assert_eq!(LEAGUE_ID_ENV_VAR, "SLEEPER_LEAGUE_ID");
}

#[test]
fn test_league_settings_drive_week_overrides() {
    let league: League = serde_json::from_value(json!({
        "league_id": "1048308938824937472",
        "name": "Dynasty Bros",
        "season": "2024",
        "roster_positions": ["QB", "RB", "RB", "WR", "WR", "TE", "FLEX", "SUPER_FLEX", "BN", "BN"],
        "settings": { "start_week": 1, "playoff_week_start": 15 }
    }))
    .unwrap();

    let config: LeagueConfig = league.config().unwrap();
    assert_eq!(config.week_range.len(), 14);

    let window = WeekOverrides {
        start_week: Some(Week::new(4)),
        end_week: Some(Week::new(6)),
    }
    .apply(&config)
    .unwrap();
    assert_eq!(
        window.week_range.weeks().collect::<Vec<_>>(),
        vec![Week::new(4), Week::new(5), Week::new(6)]
    );
    assert_eq!(window.slot_template, config.slot_template);
}

#[test]
fn test_team_directory_from_league_users() {
    let users: Vec<User> = serde_json::from_value(json!([
        { "user_id": "u1", "display_name": "tjones", "metadata": { "team_name": "Gridiron Gang" } },
        { "user_id": "u2", "display_name": "halteclere", "metadata": null }
    ]))
    .unwrap();
    let rosters: Vec<Roster> = serde_json::from_value(json!([
        { "roster_id": 1, "owner_id": "u1", "players": ["4046"], "starters": ["4046"] },
        { "roster_id": 2, "owner_id": "u2", "players": null, "starters": null },
        { "roster_id": 3, "owner_id": null, "players": [], "starters": [] }
    ]))
    .unwrap();

    let teams = TeamDirectory::from_league(&users, &rosters);
    assert_eq!(teams.len(), 3);
    assert_eq!(teams.name(RosterId::new(2)), "halteclere");
    assert_eq!(teams.name(RosterId::new(3)), "Team 3");
    assert_eq!(teams.find("TJONES"), Some(RosterId::new(1)));
    assert_eq!(teams.find("halte"), Some(RosterId::new(2)));
    assert_eq!(teams.find("nobody"), None);
}

#[tokio::test]
async fn test_standings_and_top_half_reports_from_memory() {
    let players: PlayerDirectory = [
        (PlayerId::from("q1"), Position::QB),
        (PlayerId::from("q2"), Position::QB),
        (PlayerId::from("q3"), Position::QB),
    ]
    .into_iter()
    .collect();
    let teams: TeamDirectory = [
        (RosterId::new(1), "tjones".to_string()),
        (RosterId::new(2), "halteclere".to_string()),
        (RosterId::new(3), "third".to_string()),
    ]
    .into_iter()
    .collect();

    // Three teams: roster 3 has a bye, only one half-win per week under floor.
    let source = InMemoryMatchups::new()
        .with_week(
            Week::new(1),
            vec![
                record(1, 1, &[("q1", 20.0)]),
                record(2, 1, &[("q2", 10.0)]),
                record(3, 2, &[("q3", 15.0)]),
            ],
        )
        .with_week(
            Week::new(2),
            vec![
                record(1, 1, &[("q1", 8.0)]),
                record(2, 1, &[("q2", 30.0)]),
                record(3, 2, &[("q3", 12.0)]),
            ],
        );

    let config = LeagueConfig {
        slot_template: "QB,BN".parse().unwrap(),
        week_range: sleeper_bestball::WeekRange::new(Week::new(1), Week::new(15)).unwrap(),
    };

    let standings = aggregate(
        &source,
        LeagueId::new(1),
        &config,
        &players,
        &teams,
        StandingsOptions::default(),
    )
    .await;
    assert_eq!(standings.weeks_processed.len(), 2);

    let table = format_standings_table(&standings, StandingsSort::Record);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], STANDINGS_HEADER);
    // tjones: 1-1 plus the week 1 half win; halteclere: 1-1 plus week 2.
    // Equal win totals fall back to points for.
    assert_eq!(lines[1], "1|halteclere|1-1-0|0.5|40.00|28.00|40.00|40.00");
    assert_eq!(lines[2], "2|tjones|1-1-0|0.5|28.00|40.00|28.00|28.00");
    assert_eq!(lines[3], "3|third|0-0-0|0.0|27.00|0.00|27.00|27.00");

    let ranked = standings.ranked();
    assert_eq!(ranked[0].roster_id, RosterId::new(2));
    assert_eq!(ranked[0].win_total(), 1.5);
    assert_eq!(ranked[1].roster_id, RosterId::new(1));
    assert_eq!(ranked[1].win_total(), 1.5);

    let ceil = aggregate(
        &source,
        LeagueId::new(1),
        &config,
        &players,
        &teams,
        StandingsOptions {
            half_win_rule: HalfWinRule::MedianInclusive,
            ..StandingsOptions::default()
        },
    )
    .await;
    assert_eq!(
        format_top_half(&top_half_entries(&ceil)),
        "Week|Team|Points\n1|tjones|20.00\n1|third|15.00\n2|halteclere|30.00\n2|third|12.00"
    );
}
