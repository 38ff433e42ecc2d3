//! Week numbering for Sleeper regular seasons.

use crate::error::{Result, SleeperError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for Week numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = SleeperError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Half-open range of scoring weeks, `start..end`.
///
/// A league's regular season runs from `settings.start_week` up to (but not
/// including) `settings.playoff_week_start`.
///
/// ```rust
/// use sleeper_bestball::{Week, WeekRange};
///
/// let range = WeekRange::new(Week::new(1), Week::new(15)).unwrap();
/// assert_eq!(range.len(), 14);
/// assert_eq!(range.weeks().last(), Some(Week::new(14)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWeekRange")]
pub struct WeekRange {
    pub start: Week,
    pub end_exclusive: Week,
}

#[derive(Deserialize)]
struct RawWeekRange {
    start: Week,
    end_exclusive: Week,
}

impl TryFrom<RawWeekRange> for WeekRange {
    type Error = SleeperError;

    fn try_from(raw: RawWeekRange) -> Result<Self> {
        Self::new(raw.start, raw.end_exclusive)
    }
}

impl WeekRange {
    pub fn new(start: Week, end_exclusive: Week) -> Result<Self> {
        if end_exclusive < start {
            return Err(SleeperError::InvalidWeekRange {
                start: start.as_u16(),
                end: end_exclusive.as_u16(),
            });
        }
        Ok(Self {
            start,
            end_exclusive,
        })
    }

    pub fn weeks(&self) -> impl Iterator<Item = Week> {
        (self.start.as_u16()..self.end_exclusive.as_u16()).map(Week::new)
    }

    pub fn contains(&self, week: Week) -> bool {
        self.start <= week && week < self.end_exclusive
    }

    pub fn len(&self) -> usize {
        usize::from(self.end_exclusive.as_u16().saturating_sub(self.start.as_u16()))
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end_exclusive
    }
}

impl fmt::Display for WeekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "weeks {}-{}", self.start, self.end_exclusive.as_u16().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_parse_and_order() {
        let w: Week = "7".parse().unwrap();
        assert_eq!(w, Week::new(7));
        assert!(Week::new(3) < Week::new(10));
        assert!("seven".parse::<Week>().is_err());
    }

    #[test]
    fn test_week_range_iteration() {
        let range = WeekRange::new(Week::new(3), Week::new(6)).unwrap();
        let weeks: Vec<u16> = range.weeks().map(|w| w.as_u16()).collect();
        assert_eq!(weeks, vec![3, 4, 5]);
        assert!(range.contains(Week::new(5)));
        assert!(!range.contains(Week::new(6)));
        assert_eq!(range.to_string(), "weeks 3-5");
    }

    #[test]
    fn test_week_range_empty_and_inverted() {
        let empty = WeekRange::new(Week::new(4), Week::new(4)).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.weeks().count(), 0);

        assert!(WeekRange::new(Week::new(10), Week::new(2)).is_err());
    }

    #[test]
    fn test_week_range_deserialize_validates() {
        let range: WeekRange = serde_json::from_str(r#"{"start":1,"end_exclusive":15}"#).unwrap();
        assert_eq!(range.len(), 14);
        assert_eq!(serde_json::to_string(&range).unwrap(), r#"{"start":1,"end_exclusive":15}"#);

        let inverted = serde_json::from_str::<WeekRange>(r#"{"start":10,"end_exclusive":2}"#);
        assert!(inverted.is_err());
    }
}
