//! Player directory refresh

use tracing::info;

use crate::{
    sleeper::SleeperClient,
    storage::{PlayerDatabase, StoredPlayer},
    Result,
};

/// Download `/players/nfl` and store it. Returns the number of players written.
pub async fn refresh_player_directory(
    client: &SleeperClient,
    db: &mut PlayerDatabase,
) -> Result<usize> {
    let players = client.get_players().await?;
    let mut stored: Vec<StoredPlayer> = players
        .iter()
        .map(|(id, info)| StoredPlayer::from_info(id.clone(), info))
        .collect();
    stored.sort_by(|a, b| a.player_id.cmp(&b.player_id));

    let written = db.upsert_players(&stored)?;
    info!(players = written, "player directory stored");
    Ok(written)
}

/// Handle the update-players command
pub async fn handle_update_players(clear: bool, verbose: bool) -> Result<()> {
    let client = SleeperClient::new()?;
    let mut db = PlayerDatabase::new()?;

    if clear {
        let removed = db.clear_players()?;
        println!("Cleared {removed} stored players");
    }

    println!("Downloading NFL players from Sleeper...");
    // tarpaulin::skip - HTTP call, tested via wiremock
    let written = refresh_player_directory(&client, &mut db).await?;
    println!("✓ Stored {written} players");

    if verbose {
        println!("Database: {}", PlayerDatabase::database_path().display()); // tarpaulin::skip
    }

    Ok(())
}
