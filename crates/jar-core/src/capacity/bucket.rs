//! Commitment buckets and their fixed hour values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Hours booked by a single Rock commitment.
pub const ROCK_HOURS: f64 = 4.0;
/// Hours booked by a single Pebble commitment.
pub const PEBBLE_HOURS: f64 = 2.0;
/// Hours booked by a single Sand commitment.
pub const SAND_HOURS: f64 = 0.5;

/// Size class of a commitment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BucketType {
    /// Large, strategic block of deep work
    Rock,
    /// Medium task
    Pebble,
    /// Small task or errand
    Sand,
}

impl BucketType {
    pub const ALL: [BucketType; 3] = [BucketType::Rock, BucketType::Pebble, BucketType::Sand];

    /// Fixed hour value booked by one commitment of this bucket.
    pub fn hours(self) -> f64 {
        match self {
            BucketType::Rock => ROCK_HOURS,
            BucketType::Pebble => PEBBLE_HOURS,
            BucketType::Sand => SAND_HOURS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BucketType::Rock => "rock",
            BucketType::Pebble => "pebble",
            BucketType::Sand => "sand",
        }
    }
}

impl fmt::Display for BucketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BucketType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rock" => Ok(BucketType::Rock),
            "pebble" => Ok(BucketType::Pebble),
            "sand" => Ok(BucketType::Sand),
            other => Err(ParseError::UnknownBucket(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_lookup_matches_fixed_table() {
        assert_eq!(BucketType::Rock.hours(), 4.0);
        assert_eq!(BucketType::Pebble.hours(), 2.0);
        assert_eq!(BucketType::Sand.hours(), 0.5);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Rock".parse::<BucketType>(), Ok(BucketType::Rock));
        assert_eq!(" PEBBLE ".parse::<BucketType>(), Ok(BucketType::Pebble));
        assert_eq!("sand".parse::<BucketType>(), Ok(BucketType::Sand));
    }

    #[test]
    fn parse_rejects_unknown_bucket() {
        let err = "boulder".parse::<BucketType>().unwrap_err();
        assert_eq!(err, ParseError::UnknownBucket("boulder".to_string()));
        assert_eq!(err.to_string(), "unknown bucket 'boulder'");
    }

    #[test]
    fn serializes_as_lowercase() {
        assert_eq!(serde_json::to_string(&BucketType::Pebble).unwrap(), "\"pebble\"");
        let parsed: BucketType = serde_json::from_str("\"rock\"").unwrap();
        assert_eq!(parsed, BucketType::Rock);
    }
}
