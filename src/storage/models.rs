//! Data models for the storage layer

use crate::{cli::types::PlayerId, sleeper::types::PlayerInfo};
use serde::{Deserialize, Serialize};

/// Player information stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPlayer {
    pub player_id: PlayerId,
    pub name: String,
    /// Sleeper's raw position code (`QB`, `DEF`, `LB`, ...), if any.
    pub position: Option<String>,
    pub team: Option<String>,
}

impl StoredPlayer {
    pub fn from_info(player_id: PlayerId, info: &PlayerInfo) -> Self {
        Self {
            player_id,
            name: info.display_name(),
            position: info.position.clone().filter(|p| !p.is_empty()),
            team: info.team.clone(),
        }
    }
}
