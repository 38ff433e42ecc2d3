//! Roster slot codes and the league's ordered slot template.

use super::position::Position;
use crate::error::SleeperError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const FLEX_POSITIONS: [Position; 3] = [Position::RB, Position::WR, Position::TE];
const SUPER_FLEX_POSITIONS: [Position; 4] = [Position::QB, Position::RB, Position::WR, Position::TE];

/// One entry of a league's `roster_positions`.
///
/// Codes the optimizer does not know how to fill (`DEF`, `REC_FLEX`, ...) are
/// kept verbatim as [`SlotCode::Other`] so a template survives a round trip,
/// but they never receive a player.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlotCode {
    /// A slot only the exact position can fill.
    Position(Position),
    /// RB / WR / TE
    Flex,
    /// QB / RB / WR / TE
    SuperFlex,
    /// Any individual defensive player.
    IdpFlex,
    /// Bench, injured reserve and taxi squad.
    Bench,
    Other(String),
}

impl SlotCode {
    /// Positions allowed to fill this slot. Empty for bench and unknown slots.
    pub fn eligible_positions(&self) -> &'static [Position] {
        match self {
            SlotCode::Position(p) => exact(*p),
            SlotCode::Flex => &FLEX_POSITIONS,
            SlotCode::SuperFlex => &SUPER_FLEX_POSITIONS,
            SlotCode::IdpFlex => &Position::DEFENSIVE,
            SlotCode::Bench | SlotCode::Other(_) => &[],
        }
    }

    pub fn accepts(&self, position: Position) -> bool {
        self.eligible_positions().contains(&position)
    }

    /// Slots counted toward offensive best-ball points.
    pub fn is_offensive(&self) -> bool {
        matches!(
            self,
            SlotCode::Position(Position::QB | Position::RB | Position::WR | Position::TE)
                | SlotCode::Flex
                | SlotCode::SuperFlex
        )
    }

    pub fn is_starting(&self) -> bool {
        !matches!(self, SlotCode::Bench)
    }
}

fn exact(position: Position) -> &'static [Position] {
    match position {
        Position::QB => &[Position::QB],
        Position::RB => &[Position::RB],
        Position::WR => &[Position::WR],
        Position::TE => &[Position::TE],
        Position::K => &[Position::K],
        Position::DB => &[Position::DB],
        Position::LB => &[Position::LB],
        Position::DE => &[Position::DE],
        Position::DL => &[Position::DL],
        Position::DT => &[Position::DT],
        Position::CB => &[Position::CB],
        Position::S => &[Position::S],
    }
}

impl fmt::Display for SlotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotCode::Position(p) => write!(f, "{p}"),
            SlotCode::Flex => write!(f, "FLEX"),
            SlotCode::SuperFlex => write!(f, "SUPER_FLEX"),
            SlotCode::IdpFlex => write!(f, "IDP_FLEX"),
            SlotCode::Bench => write!(f, "BN"),
            SlotCode::Other(code) => write!(f, "{code}"),
        }
    }
}

impl FromStr for SlotCode {
    type Err = SleeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        if code.is_empty() {
            return Err(SleeperError::InvalidSlot {
                slot: s.to_string(),
            });
        }
        Ok(match code.as_str() {
            "FLEX" => SlotCode::Flex,
            "SUPER_FLEX" => SlotCode::SuperFlex,
            "IDP_FLEX" => SlotCode::IdpFlex,
            "BN" | "BE" | "IR" | "TAXI" => SlotCode::Bench,
            _ => match code.parse::<Position>() {
                Ok(p) => SlotCode::Position(p),
                Err(_) => SlotCode::Other(code),
            },
        })
    }
}

impl Serialize for SlotCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A league's ordered list of roster slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotTemplate(pub Vec<SlotCode>);

impl SlotTemplate {
    pub fn new(slots: Vec<SlotCode>) -> Self {
        Self(slots)
    }

    pub fn slots(&self) -> &[SlotCode] {
        &self.0
    }

    /// Number of slots that can hold a starter.
    pub fn starting_slot_count(&self) -> usize {
        self.0.iter().filter(|s| s.is_starting()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for SlotTemplate {
    type Err = SleeperError;

    /// Parse a comma separated list, e.g. `"QB,RB,RB,WR,WR,TE,FLEX,BN"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(SlotTemplate)
    }
}

impl fmt::Display for SlotTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<String> = self.0.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", codes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_code_parsing() {
        assert_eq!("QB".parse::<SlotCode>().unwrap(), SlotCode::Position(Position::QB));
        assert_eq!("super_flex".parse::<SlotCode>().unwrap(), SlotCode::SuperFlex);
        assert_eq!("IDP_FLEX".parse::<SlotCode>().unwrap(), SlotCode::IdpFlex);
        assert_eq!("BN".parse::<SlotCode>().unwrap(), SlotCode::Bench);
        assert_eq!("TAXI".parse::<SlotCode>().unwrap(), SlotCode::Bench);
        assert_eq!(
            "REC_FLEX".parse::<SlotCode>().unwrap(),
            SlotCode::Other("REC_FLEX".to_string())
        );
        assert_eq!("DEF".parse::<SlotCode>().unwrap(), SlotCode::Other("DEF".to_string()));
        assert!("  ".parse::<SlotCode>().is_err());
    }

    #[test]
    fn test_eligibility_sets() {
        assert_eq!(SlotCode::Position(Position::K).eligible_positions(), &[Position::K]);
        assert_eq!(SlotCode::Position(Position::CB).eligible_positions(), &[Position::CB]);
        assert_eq!(
            SlotCode::Flex.eligible_positions(),
            &[Position::RB, Position::WR, Position::TE]
        );
        assert!(SlotCode::SuperFlex.accepts(Position::QB));
        assert!(!SlotCode::Flex.accepts(Position::QB));
        assert!(!SlotCode::Flex.accepts(Position::K));
        assert_eq!(SlotCode::IdpFlex.eligible_positions().len(), 7);
        assert!(!SlotCode::IdpFlex.accepts(Position::WR));
        assert!(SlotCode::Bench.eligible_positions().is_empty());
        assert!(SlotCode::Other("DEF".into()).eligible_positions().is_empty());
    }

    #[test]
    fn test_offensive_slots() {
        let offensive: Vec<SlotCode> = "QB,RB,WR,TE,FLEX,SUPER_FLEX"
            .parse::<SlotTemplate>()
            .unwrap()
            .0;
        assert!(offensive.iter().all(|s| s.is_offensive()));

        for code in ["K", "LB", "IDP_FLEX", "BN", "DEF"] {
            assert!(!code.parse::<SlotCode>().unwrap().is_offensive(), "{code}");
        }
    }

    #[test]
    fn test_template_parse_and_serde() {
        let template: SlotTemplate = "QB, RB, RB, WR, FLEX, BN, BN".parse().unwrap();
        assert_eq!(template.slots().len(), 7);
        assert_eq!(template.starting_slot_count(), 5);
        assert_eq!(template.to_string(), "QB, RB, RB, WR, FLEX, BN, BN");

        let json = serde_json::to_string(&template).unwrap();
        assert_eq!(json, r#"["QB","RB","RB","WR","FLEX","BN","BN"]"#);

        let back: SlotTemplate =
            serde_json::from_str(r#"["QB","SUPER_FLEX","DEF","IDP_FLEX"]"#).unwrap();
        assert_eq!(back.slots()[1], SlotCode::SuperFlex);
        assert_eq!(back.slots()[2], SlotCode::Other("DEF".to_string()));
    }
}
