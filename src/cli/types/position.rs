//! Fantasy football player positions.

use crate::error::SleeperError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Player positions a best-ball lineup can draw from.
///
/// # Position Types
///
/// - **Offense**: QB, RB, WR, TE, K
/// - **Individual defensive players (IDP)**: DB, LB, DE, DL, DT, CB, S
///
/// Team defenses (`DEF`) and anything else the player directory carries are
/// not representable here; such players resolve to no position and never
/// enter a lineup.
///
/// # Examples
///
/// ```rust
/// use sleeper_bestball::Position;
///
/// let lb: Position = "lb".parse().unwrap();
/// assert!(lb.is_defensive());
/// assert_eq!(Position::TE.to_string(), "TE");
/// assert!("DEF".parse::<Position>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DB,
    LB,
    DE,
    DL,
    DT,
    CB,
    S,
}

impl Position {
    pub const ALL: [Position; 12] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DB,
        Position::LB,
        Position::DE,
        Position::DL,
        Position::DT,
        Position::CB,
        Position::S,
    ];

    /// Individual defensive player positions.
    pub const DEFENSIVE: [Position; 7] = [
        Position::DB,
        Position::LB,
        Position::DE,
        Position::DL,
        Position::DT,
        Position::CB,
        Position::S,
    ];

    pub fn is_defensive(&self) -> bool {
        Self::DEFENSIVE.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DB => "DB",
            Position::LB => "LB",
            Position::DE => "DE",
            Position::DL => "DL",
            Position::DT => "DT",
            Position::CB => "CB",
            Position::S => "S",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = SleeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Position::ALL
            .into_iter()
            .find(|p| p.as_str() == upper)
            .ok_or(SleeperError::InvalidPosition { position: upper })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_string_round_trip() {
        for pos in Position::ALL {
            assert_eq!(pos.to_string().parse::<Position>().unwrap(), pos);
        }
        assert_eq!(" wr ".parse::<Position>().unwrap(), Position::WR);
    }

    #[test]
    fn test_unrepresentable_positions_are_rejected() {
        for code in ["DEF", "FLEX", "BN", "", "UNKNOWN"] {
            match code.parse::<Position>() {
                Err(SleeperError::InvalidPosition { position }) => {
                    assert_eq!(position, code.to_uppercase())
                }
                other => panic!("expected InvalidPosition for {code:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_defensive_split() {
        let defensive: Vec<_> = Position::ALL.iter().filter(|p| p.is_defensive()).collect();
        assert_eq!(defensive.len(), 7);
        assert!(!Position::K.is_defensive());
        assert!(!Position::QB.is_defensive());
        assert!(Position::S.is_defensive());
    }
}
