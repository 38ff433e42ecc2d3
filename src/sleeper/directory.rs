//! Lookup tables joined against matchup data: player → position and
//! roster → team display name.

use std::collections::{BTreeMap, HashMap};

use crate::{
    cli::types::{PlayerId, Position, RosterId},
    sleeper::types::{Roster, User},
};

/// A player as known to the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryEntry {
    pub name: String,
    /// `None` for positions a lineup cannot use (team defenses, staff, ...).
    pub position: Option<Position>,
}

/// Player → position directory.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    entries: HashMap<PlayerId, DirectoryEntry>,
}

impl PlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, player_id: PlayerId, name: impl Into<String>, position: Option<Position>) {
        self.entries.insert(
            player_id,
            DirectoryEntry {
                name: name.into(),
                position,
            },
        );
    }

    /// Eligibility position for a player; `None` means UNKNOWN.
    pub fn position(&self, player_id: &PlayerId) -> Option<Position> {
        self.entries.get(player_id).and_then(|e| e.position)
    }

    pub fn name(&self, player_id: &PlayerId) -> String {
        self.entries
            .get(player_id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| format!("Unknown Player ({player_id})"))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PlayerId, Position)> for PlayerDirectory {
    fn from_iter<I: IntoIterator<Item = (PlayerId, Position)>>(iter: I) -> Self {
        let mut directory = Self::new();
        for (id, position) in iter {
            let name = id.to_string();
            directory.insert(id, name, Some(position));
        }
        directory
    }
}

/// Roster → team display name. Also defines the set of rosters in a league.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    names: BTreeMap<RosterId, String>,
}

impl TeamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair every roster with the display name of the user who owns it.
    /// Ownerless rosters fall back to `Team {roster_id}`.
    pub fn from_league(users: &[User], rosters: &[Roster]) -> Self {
        let by_user: HashMap<&str, &User> =
            users.iter().map(|u| (u.user_id.as_str(), u)).collect();

        let names = rosters
            .iter()
            .map(|roster| {
                let name = roster
                    .owner_id
                    .as_deref()
                    .and_then(|owner| by_user.get(owner))
                    .map(|user| user.display_name.clone())
                    .unwrap_or_else(|| fallback_name(roster.roster_id));
                (roster.roster_id, name)
            })
            .collect();
        Self { names }
    }

    pub fn insert(&mut self, roster_id: RosterId, name: impl Into<String>) {
        self.names.insert(roster_id, name.into());
    }

    pub fn name(&self, roster_id: RosterId) -> String {
        self.names
            .get(&roster_id)
            .cloned()
            .unwrap_or_else(|| fallback_name(roster_id))
    }

    pub fn roster_ids(&self) -> impl Iterator<Item = RosterId> + '_ {
        self.names.keys().copied()
    }

    /// Case-insensitive lookup: an exact name wins over a substring match.
    pub fn find(&self, query: &str) -> Option<RosterId> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.names
            .iter()
            .find(|(_, name)| name.to_lowercase() == query)
            .or_else(|| {
                self.names
                    .iter()
                    .find(|(_, name)| name.to_lowercase().contains(&query))
            })
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(RosterId, String)> for TeamDirectory {
    fn from_iter<I: IntoIterator<Item = (RosterId, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

fn fallback_name(roster_id: RosterId) -> String {
    format!("Team {roster_id}")
}
