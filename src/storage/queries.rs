//! Player directory queries

use super::{models::StoredPlayer, schema::PlayerDatabase};
use crate::{cli::types::PlayerId, sleeper::directory::PlayerDirectory, Position};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use std::time::{SystemTime, UNIX_EPOCH};

impl PlayerDatabase {
    /// Insert or update players in a single transaction. Returns rows written.
    pub fn upsert_players(&mut self, players: &[StoredPlayer]) -> Result<usize> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let tx = self.conn.transaction()?;
        let mut written = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO players (player_id, name, position, team, updated_at)
                 VALUES (?, ?, ?, ?, ?)",
            )?;
            for player in players {
                written += stmt.execute(params![
                    player.player_id.as_str(),
                    player.name,
                    player.position,
                    player.team,
                    now
                ])?;
            }
        }
        tx.commit()?;
        Ok(written)
    }

    pub fn get_player(&self, player_id: &PlayerId) -> Result<Option<StoredPlayer>> {
        let player = self
            .conn
            .query_row(
                "SELECT player_id, name, position, team FROM players WHERE player_id = ?",
                params![player_id.as_str()],
                row_to_player,
            )
            .optional()?;
        Ok(player)
    }

    /// Every stored player keyed for lineup eligibility. Positions a lineup
    /// cannot use are kept with no position so names still resolve.
    pub fn load_directory(&self) -> Result<PlayerDirectory> {
        let mut stmt = self
            .conn
            .prepare("SELECT player_id, name, position, team FROM players")?;
        let rows = stmt.query_map([], row_to_player)?;

        let mut directory = PlayerDirectory::new();
        for row in rows {
            let player = row?;
            let position = player
                .position
                .as_deref()
                .and_then(|p| p.parse::<Position>().ok());
            directory.insert(player.player_id, player.name, position);
        }
        Ok(directory)
    }

    pub fn player_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))?;
        Ok(usize::try_from(count)?)
    }

    /// Seconds since the epoch of the most recent refresh, if any.
    pub fn last_updated(&self) -> Result<Option<u64>> {
        let ts: Option<i64> = self
            .conn
            .query_row("SELECT MAX(updated_at) FROM players", [], |row| row.get(0))?;
        Ok(ts.and_then(|t| u64::try_from(t).ok()))
    }

    pub fn clear_players(&mut self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM players", [])?)
    }
}

fn row_to_player(row: &Row) -> rusqlite::Result<StoredPlayer> {
    Ok(StoredPlayer {
        player_id: PlayerId::new(row.get::<_, String>(0)?),
        name: row.get(1)?,
        position: row.get(2)?,
        team: row.get(3)?,
    })
}
