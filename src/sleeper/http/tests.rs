//! Unit tests for the Sleeper HTTP client

use super::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[cfg(test)]
mod http_tests {
    use super::*;
    use crate::RosterId;

    const LEAGUE: LeagueId = LeagueId(1048308938824937472);

    fn week_one() -> Value {
        json!([
            {
                "roster_id": 1, "matchup_id": 1, "points": 112.4,
                "starters": ["4046"], "starters_points": [112.4],
                "players_points": { "4046": 112.4, "6794": 3.0 }
            },
            {
                "roster_id": 2, "matchup_id": 1, "points": 98.7,
                "starters": ["4881"], "starters_points": [98.7],
                "players_points": { "4881": 98.7 }
            }
        ])
    }

    fn unfinished_week() -> Value {
        json!([
            { "roster_id": 1, "matchup_id": 1, "points": 40.0, "starters": [], "players_points": {} },
            { "roster_id": 2, "matchup_id": 1, "points": 0.0, "starters": [], "players_points": {} }
        ])
    }

    async fn mount_json(server: &MockServer, route: &str, body: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(times)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_get_league_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/league/1048308938824937472"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "league_id": "1048308938824937472",
                "name": "Dynasty Degenerates",
                "season": "2024",
                "roster_positions": ["QB", "RB", "WR", "FLEX", "BN"],
                "settings": { "start_week": 1, "playoff_week_start": 15 }
            })))
            .mount(&server)
            .await;

        let client = SleeperClient::with_base_url(server.uri()).unwrap();
        let league = client.get_league(LEAGUE).await.unwrap();

        assert_eq!(league.name, "Dynasty Degenerates");
        assert_eq!(league.config().unwrap().slot_template.starting_slot_count(), 4);
    }

    #[tokio::test]
    async fn test_unknown_league_is_no_data() {
        let server = MockServer::start().await;
        mount_json(&server, "/league/5", Value::Null, 1).await;

        let client = SleeperClient::with_base_url(server.uri()).unwrap();
        assert!(matches!(
            client.get_league(LeagueId::new(5)).await,
            Err(SleeperError::NoData)
        ));
    }

    #[tokio::test]
    async fn test_users_and_rosters() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/league/1048308938824937472/users",
            json!([{ "user_id": "u1", "display_name": "tjones", "metadata": {} }]),
            1,
        )
        .await;
        mount_json(
            &server,
            "/league/1048308938824937472/rosters",
            json!([{ "roster_id": 1, "owner_id": "u1", "players": ["4046"], "starters": ["4046"] }]),
            1,
        )
        .await;

        let client = SleeperClient::with_base_url(server.uri()).unwrap();
        let users = client.get_users(LEAGUE).await.unwrap();
        let rosters = client.get_rosters(LEAGUE).await.unwrap();

        assert_eq!(users[0].display_name, "tjones");
        assert_eq!(rosters[0].roster_id, RosterId::new(1));
    }

    #[tokio::test]
    async fn test_matchup_source_yields_records() {
        let server = MockServer::start().await;
        mount_json(&server, "/league/1048308938824937472/matchups/1", week_one(), 1).await;

        let client = SleeperClient::with_base_url(format!("{}/", server.uri())).unwrap();
        let records = client.matchups(LEAGUE, Week::new(1)).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].actual_points(), 112.4);
        assert_eq!(records[1].players_points.len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/league/1048308938824937472/matchups/2"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = SleeperClient::with_base_url(server.uri()).unwrap();
        assert!(matches!(
            client.matchups(LEAGUE, Week::new(2)).await,
            Err(SleeperError::Http(_))
        ));
    }

    #[tokio::test]
    async fn test_cached_matchups_skip_network() {
        let server = MockServer::start().await;
        mount_json(&server, "/league/1048308938824937472/matchups/1", week_one(), 1).await;

        let dir = tempdir().unwrap();
        let client = SleeperClient::with_base_url(server.uri())
            .unwrap()
            .with_cache(ApiCache::at(dir.path()));

        let first = client.get_matchups(LEAGUE, Week::new(1)).await.unwrap();
        let second = client.get_matchups(LEAGUE, Week::new(1)).await.unwrap();
        assert_eq!(first.len(), second.len());

        // A new client over the same directory reads from disk.
        let again = SleeperClient::with_base_url(server.uri())
            .unwrap()
            .with_cache(ApiCache::at(dir.path()));
        assert_eq!(again.get_matchups(LEAGUE, Week::new(1)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_bypasses_cache() {
        let server = MockServer::start().await;
        mount_json(&server, "/league/1048308938824937472/matchups/1", week_one(), 2).await;

        let client = SleeperClient::with_base_url(server.uri())
            .unwrap()
            .with_cache(ApiCache::in_memory())
            .refresh(true);

        client.get_matchups(LEAGUE, Week::new(1)).await.unwrap();
        client.get_matchups(LEAGUE, Week::new(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_week_not_cached() {
        let server = MockServer::start().await;
        mount_json(&server, "/league/1048308938824937472/matchups/9", json!([]), 2).await;

        let client = SleeperClient::with_base_url(server.uri())
            .unwrap()
            .with_cache(ApiCache::in_memory());

        assert!(client.matchups(LEAGUE, Week::new(9)).await.unwrap().is_empty());
        assert!(client.matchups(LEAGUE, Week::new(9)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unfinished_past_week_refetched() {
        let server = MockServer::start().await;
        mount_json(&server, "/league/1048308938824937472/matchups/3", unfinished_week(), 2).await;

        let cache = ApiCache::in_memory();
        let client = SleeperClient::with_base_url(server.uri())
            .unwrap()
            .with_cache(cache)
            .with_current_week(Some(Week::new(5)));

        client.get_matchups(LEAGUE, Week::new(3)).await.unwrap();
        client.get_matchups(LEAGUE, Week::new(3)).await.unwrap();
    }

    #[tokio::test]
    async fn test_current_week_zero_points_reused() {
        let server = MockServer::start().await;
        mount_json(&server, "/league/1048308938824937472/matchups/5", unfinished_week(), 1).await;

        let client = SleeperClient::with_base_url(server.uri())
            .unwrap()
            .with_cache(ApiCache::in_memory())
            .with_current_week(Some(Week::new(5)));

        client.get_matchups(LEAGUE, Week::new(5)).await.unwrap();
        client.get_matchups(LEAGUE, Week::new(5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_players_and_state() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/players/nfl",
            json!({ "4046": { "player_id": "4046", "full_name": "Patrick Mahomes", "position": "QB", "team": "KC" } }),
            1,
        )
        .await;
        mount_json(&server, "/state/nfl", json!({ "week": 7, "season": "2024" }), 1).await;

        let client = SleeperClient::with_base_url(server.uri()).unwrap();
        let players = client.get_players().await.unwrap();
        let state = client.get_nfl_state().await.unwrap();

        assert_eq!(players.len(), 1);
        assert_eq!(state.week, Week::new(7));
    }

    #[test]
    fn test_staleness_rule() {
        assert!(!matchups_look_unfinished(&unfinished_week(), Week::new(3), None));
        assert!(matchups_look_unfinished(&unfinished_week(), Week::new(3), Some(Week::new(4))));
        assert!(!matchups_look_unfinished(&unfinished_week(), Week::new(4), Some(Week::new(4))));
        assert!(!matchups_look_unfinished(&week_one(), Week::new(1), Some(Week::new(4))));
        assert!(matchups_look_unfinished(&json!({"bad": 1}), Week::new(1), Some(Week::new(4))));
    }

    #[test]
    fn test_is_cacheable() {
        assert!(!is_cacheable(&Value::Null));
        assert!(!is_cacheable(&json!([])));
        assert!(is_cacheable(&json!([1])));
        assert!(is_cacheable(&json!({ "name": "x" })));
    }
}
