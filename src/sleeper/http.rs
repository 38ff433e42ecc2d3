//! Async client for the Sleeper v1 API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::types::{into_records, League, NflState, PlayersResponse, RawMatchup, Roster, User};
use crate::{
    analysis::source::{MatchupRecord, MatchupSource},
    core::{
        cache::{
            ApiCache, CacheKey, LeagueCacheKey, LeagueResource, LeagueResourceCacheKey,
            MatchupsCacheKey, UnifiedCache,
        },
        http::{default_header_map, resolve_base_url},
    },
    LeagueId, Result, SleeperError, Week,
};

#[cfg(test)]
mod tests;

pub struct SleeperClient {
    http: Client,
    base_url: String,
    cache: Option<ApiCache>,
    refresh: bool,
    current_week: Option<Week>,
}

impl SleeperClient {
    /// Client against `SLEEPER_BASE_URL` or the public API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(resolve_base_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .default_headers(default_header_map())
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: None,
            refresh: false,
            current_week: None,
        })
    }

    pub fn with_cache(mut self, cache: ApiCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Ignore cached responses (fresh ones are still written back).
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// The NFL week in progress. Cached matchups for earlier weeks that
    /// still show zero-point teams are treated as stale.
    pub fn with_current_week(mut self, week: Option<Week>) -> Self {
        self.current_week = week;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let value = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(value)
    }

    async fn get_cached<K, F>(
        &self,
        cache: Option<&UnifiedCache<K, Value>>,
        key: K,
        path: &str,
        is_fresh: F,
    ) -> Result<Value>
    where
        K: CacheKey,
        F: Fn(&Value) -> bool,
    {
        if !self.refresh {
            if let Some(value) = cache.and_then(|c| c.get(&key)) {
                if is_fresh(&value) {
                    return Ok(value);
                }
                debug!(key = %key.to_file_key(), "cached response is stale, refetching");
            }
        }

        let value = self.get_json(path).await?;
        if let Some(cache) = cache {
            if is_cacheable(&value) {
                cache.put(key, value.clone());
            }
        }
        Ok(value)
    }

    pub async fn get_league(&self, league_id: LeagueId) -> Result<League> {
        let value = self
            .get_cached(
                self.cache.as_ref().map(|c| &c.leagues),
                LeagueCacheKey { league_id },
                &format!("/league/{league_id}"),
                |_| true,
            )
            .await?;
        decode_required(value)
    }

    pub async fn get_users(&self, league_id: LeagueId) -> Result<Vec<User>> {
        self.get_league_resource(league_id, LeagueResource::Users).await
    }

    pub async fn get_rosters(&self, league_id: LeagueId) -> Result<Vec<Roster>> {
        self.get_league_resource(league_id, LeagueResource::Rosters).await
    }

    async fn get_league_resource<T: DeserializeOwned>(
        &self,
        league_id: LeagueId,
        resource: LeagueResource,
    ) -> Result<Vec<T>> {
        let value = self
            .get_cached(
                self.cache.as_ref().map(|c| &c.league_resources),
                LeagueResourceCacheKey { league_id, resource },
                &format!("/league/{league_id}/{resource}"),
                |_| true,
            )
            .await?;
        decode_list(value)
    }

    /// Raw matchup entries for one week. An empty list means the week has
    /// not been played.
    pub async fn get_matchups(&self, league_id: LeagueId, week: Week) -> Result<Vec<RawMatchup>> {
        let current_week = self.current_week;
        let value = self
            .get_cached(
                self.cache.as_ref().map(|c| &c.matchups),
                MatchupsCacheKey { league_id, week },
                &format!("/league/{league_id}/matchups/{}", week.as_u16()),
                |cached| !matchups_look_unfinished(cached, week, current_week),
            )
            .await?;
        decode_list(value)
    }

    /// The full NFL player directory. Large; persist it rather than
    /// fetching it per run.
    pub async fn get_players(&self) -> Result<PlayersResponse> {
        decode_required(self.get_json("/players/nfl").await?)
    }

    pub async fn get_nfl_state(&self) -> Result<NflState> {
        decode_required(self.get_json("/state/nfl").await?)
    }
}

#[async_trait]
impl MatchupSource for SleeperClient {
    async fn matchups(&self, league_id: LeagueId, week: Week) -> Result<Vec<MatchupRecord>> {
        into_records(self.get_matchups(league_id, week).await?)
    }
}

/// Sleeper answers unknown ids with `null`; future weeks come back as `[]`.
fn is_cacheable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

/// A finished week cached mid-game still carries zero-point teams.
fn matchups_look_unfinished(cached: &Value, week: Week, current_week: Option<Week>) -> bool {
    let Some(current) = current_week else {
        return false;
    };
    if week >= current {
        return false;
    }
    let Ok(matchups) = serde_json::from_value::<Vec<RawMatchup>>(cached.clone()) else {
        return true;
    };
    matchups.iter().any(|m| m.reported_points() == 0.0)
}

fn decode_required<T: DeserializeOwned>(value: Value) -> Result<T> {
    if value.is_null() {
        return Err(SleeperError::NoData);
    }
    Ok(serde_json::from_value(value)?)
}

fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(value)?)
}
