//! Unit tests for the two-tier cache

use super::*;
use serde_json::json;
use tempfile::tempdir;

#[cfg(test)]
mod cache_tests {
    use super::*;

    fn matchups_key(week: u16) -> MatchupsCacheKey {
        MatchupsCacheKey {
            league_id: LeagueId::new(42),
            week: Week::new(week),
        }
    }

    #[test]
    fn test_default_cache_dir() {
        let dir = default_cache_dir();
        assert!(dir.ends_with(APP_DIR));
    }

    #[test]
    fn test_write_string_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("subdir").join("output.txt");

        write_string(&file_path, "test content").unwrap();

        assert_eq!(try_read_to_string(&file_path), Some("test content".to_string()));
        assert_eq!(try_read_to_string(&dir.path().join("missing.txt")), None);
    }

    #[test]
    fn test_cache_key_generation() {
        assert_eq!(matchups_key(3).to_file_key(), "matchups_l42_w3");
        assert_eq!(
            LeagueCacheKey { league_id: LeagueId::new(42) }.to_file_key(),
            "league_l42"
        );
        assert_eq!(
            LeagueResourceCacheKey {
                league_id: LeagueId::new(42),
                resource: LeagueResource::Rosters,
            }
            .to_file_key(),
            "rosters_l42"
        );
    }

    #[test]
    fn test_memory_only_cache_and_eviction() {
        let cache: UnifiedCache<MatchupsCacheKey, Value> = UnifiedCache::new(2, None);

        cache.put(matchups_key(1), json!([1]));
        cache.put(matchups_key(2), json!([2]));
        cache.put(matchups_key(3), json!([3]));

        assert_eq!(cache.memory_stats(), (2, 2));
        assert_eq!(cache.get(&matchups_key(1)), None);
        assert_eq!(cache.get(&matchups_key(3)), Some(json!([3])));
        assert_eq!(cache.file_path(&matchups_key(3)), None);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache: UnifiedCache<MatchupsCacheKey, Value> = UnifiedCache::new(0, None);
        cache.put(matchups_key(1), json!(null));
        assert_eq!(cache.memory_stats(), (1, 1));
    }

    #[test]
    fn test_disk_tier_survives_memory_clear() {
        let dir = tempdir().unwrap();
        let cache: UnifiedCache<MatchupsCacheKey, Value> =
            UnifiedCache::new(4, Some(dir.path().to_path_buf()));

        cache.put(matchups_key(5), json!([{ "roster_id": 1 }]));
        let path = cache.file_path(&matchups_key(5)).unwrap();
        assert!(path.exists());
        assert!(path.ends_with("matchups_l42_w5.json"));

        cache.clear_memory();
        assert_eq!(cache.memory_stats().0, 0);
        assert_eq!(cache.get(&matchups_key(5)), Some(json!([{ "roster_id": 1 }])));
        // Promoted back into memory.
        assert_eq!(cache.memory_stats().0, 1);
    }

    #[test]
    fn test_disk_tier_shared_across_instances() {
        let dir = tempdir().unwrap();
        let first = ApiCache::at(dir.path());
        first.leagues.put(
            LeagueCacheKey { league_id: LeagueId::new(7) },
            json!({ "name": "Cached" }),
        );

        let second = ApiCache::at(dir.path());
        assert_eq!(
            second.leagues.get(&LeagueCacheKey { league_id: LeagueId::new(7) }),
            Some(json!({ "name": "Cached" }))
        );
    }

    #[test]
    fn test_invalidate_removes_both_tiers() {
        let dir = tempdir().unwrap();
        let cache: UnifiedCache<MatchupsCacheKey, Value> =
            UnifiedCache::new(4, Some(dir.path().to_path_buf()));

        cache.put(matchups_key(1), json!([]));
        cache.invalidate(&matchups_key(1)).unwrap();

        assert_eq!(cache.get(&matchups_key(1)), None);
        assert!(!cache.file_path(&matchups_key(1)).unwrap().exists());
        // Invalidating a missing entry is fine.
        cache.invalidate(&matchups_key(9)).unwrap();
    }

    #[test]
    fn test_corrupt_disk_entry_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache: UnifiedCache<MatchupsCacheKey, Value> =
            UnifiedCache::new(4, Some(dir.path().to_path_buf()));
        let path = cache.file_path(&matchups_key(2)).unwrap();
        write_string(&path, "{not json").unwrap();

        assert_eq!(cache.get(&matchups_key(2)), None);
    }

    #[test]
    fn test_in_memory_api_cache() {
        let cache = ApiCache::in_memory();
        cache.matchups.put(matchups_key(1), json!([]));
        assert!(cache.matchups.get(&matchups_key(1)).is_some());
        cache.clear_memory();
        assert!(cache.matchups.get(&matchups_key(1)).is_none());
    }
}
