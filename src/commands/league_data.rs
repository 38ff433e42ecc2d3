//! League data command implementation

use crate::{
    cli::types::SlotCode,
    core::cache::{default_cache_dir, ApiCache},
    sleeper::{directory::TeamDirectory, SleeperClient},
    LeagueId, Result,
};

use super::resolve_league_id;

/// Handle the league data command
pub async fn handle_league_data(league_id: Option<LeagueId>, refresh: bool, verbose: bool) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;

    if refresh {
        println!("Fetching fresh league data from Sleeper...");
    } else {
        println!("Loading league data (cached if available)...");
    }

    let client = SleeperClient::new()?
        .with_cache(ApiCache::on_disk())
        .refresh(refresh);

    // tarpaulin::skip - HTTP/file I/O call, tested via integration tests
    let league = client.get_league(league_id).await?;
    let config = league.config()?;
    let users = client.get_users(league_id).await?;
    let rosters = client.get_rosters(league_id).await?;
    let teams = TeamDirectory::from_league(&users, &rosters);

    println!("✓ League data loaded successfully");
    println!("{} ({}), {} teams", league.name, league.season, teams.len());
    println!("Regular season: {}", config.week_range);
    println!("Lineup: {}", starting_lineup(&config.slot_template.0));

    if verbose {
        println!("League data cached under: {}", default_cache_dir().display()); // tarpaulin::skip
        for roster_id in teams.roster_ids() {
            println!("  {roster_id}: {}", teams.name(roster_id)); // tarpaulin::skip
        }
    }

    Ok(())
}

/// Starting slots only, comma separated.
pub fn starting_lineup(slots: &[SlotCode]) -> String {
    slots
        .iter()
        .filter(|s| s.is_starting())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
