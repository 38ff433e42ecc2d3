//! Best-ball lineup optimization.
//!
//! Given every rostered player's realized points for a week and the league's
//! slot template, build the highest scoring legal lineup:
//!
//! 1. Group players by exact position, best first.
//! 2. Fill single-position slots in template order.
//! 3. Fill `FLEX`, then `SUPER_FLEX`, then `IDP_FLEX` slots, each one taking
//!    the best player still unassigned among its eligible positions.
//!
//! Missing players never cause an error; the slot is simply left empty.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::{
    cli::types::{PlayerId, Position, SlotCode, SlotTemplate},
    sleeper::directory::PlayerDirectory,
};


/// A player's realized points tagged with the position used for eligibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPointEntry {
    pub player_id: PlayerId,
    pub points: f64,
    /// `None` when the directory cannot resolve the player (UNKNOWN).
    pub position: Option<Position>,
}

impl PlayerPointEntry {
    pub fn new(player_id: impl Into<PlayerId>, points: f64, position: Option<Position>) -> Self {
        Self {
            player_id: player_id.into(),
            points,
            position,
        }
    }
}

/// A filled lineup slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupSlot {
    pub slot: SlotCode,
    pub player_id: PlayerId,
    pub points: f64,
    pub position: Position,
}

/// The optimizer's result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestBallLineup {
    pub total_points: f64,
    pub slots: Vec<LineupSlot>,
}

impl BestBallLineup {
    /// Points from QB, RB, WR, TE, FLEX and SUPER_FLEX slots.
    pub fn offensive_points(&self) -> f64 {
        self.slots
            .iter()
            .filter(|s| s.slot.is_offensive())
            .map(|s| s.points)
            .sum()
    }

    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.slots.iter().any(|s| &s.player_id == player_id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Join a week's points map against the player directory.
pub fn tag_positions<'a, I>(players_points: I, directory: &PlayerDirectory) -> Vec<PlayerPointEntry>
where
    I: IntoIterator<Item = (&'a PlayerId, &'a f64)>,
{
    players_points
        .into_iter()
        .map(|(id, points)| PlayerPointEntry {
            player_id: id.clone(),
            points: *points,
            position: directory.position(id),
        })
        .collect()
}

/// Higher points rank first; equal points fall back to the lower player id.
fn rank(a: &PlayerPointEntry, b: &PlayerPointEntry) -> Ordering {
    b.points
        .total_cmp(&a.points)
        .then_with(|| a.player_id.cmp(&b.player_id))
}

/// Compute the best-ball lineup for one team and one week.
pub fn optimize(players: &[PlayerPointEntry], template: &SlotTemplate) -> BestBallLineup {
    let mut pools: BTreeMap<Position, VecDeque<&PlayerPointEntry>> = BTreeMap::new();
    let mut seen: HashSet<&PlayerId> = HashSet::new();

    for entry in players {
        let Some(position) = entry.position else {
            continue;
        };
        if seen.insert(&entry.player_id) {
            pools.entry(position).or_default().push_back(entry);
        }
    }
    for pool in pools.values_mut() {
        pool.make_contiguous().sort_by(|a, b| rank(a, b));
    }

    let mut slots = Vec::new();

    for slot in template.slots() {
        if let SlotCode::Position(position) = slot {
            if let Some(entry) = pools.get_mut(position).and_then(VecDeque::pop_front) {
                slots.push(fill(slot, *position, entry));
            }
        }
    }

    for wildcard in [SlotCode::Flex, SlotCode::SuperFlex, SlotCode::IdpFlex] {
        for slot in template.slots().iter().filter(|s| **s == wildcard) {
            // Pools are sorted, so the best remaining eligible player is
            // always at the front of one of them.
            let best = wildcard
                .eligible_positions()
                .iter()
                .filter_map(|p| pools.get(p).and_then(|pool| pool.front()).map(|e| (*p, *e)))
                .min_by(|(_, a), (_, b)| rank(a, b));

            if let Some((position, entry)) = best {
                if let Some(pool) = pools.get_mut(&position) {
                    pool.pop_front();
                }
                slots.push(fill(slot, position, entry));
            }
        }
    }

    BestBallLineup {
        total_points: slots.iter().map(|s| s.points).sum(),
        slots,
    }
}

fn fill(slot: &SlotCode, position: Position, entry: &PlayerPointEntry) -> LineupSlot {
    LineupSlot {
        slot: slot.clone(),
        player_id: entry.player_id.clone(),
        points: entry.points,
        position,
    }
}
