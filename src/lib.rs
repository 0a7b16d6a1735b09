//! Early-game feature rows from Riot match timelines
//!
//! Walks the first minutes of a match timeline, counts per-participant events,
//! folds them into two team aggregates and flattens both into one wide row.

pub mod champions;
pub mod error;
pub mod events;
pub mod export;
pub mod match_row;
pub mod roles;
pub mod snapshot;
pub mod summary;
pub mod timeline;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

pub use error::{FeatureError, JoinSource, Result};
pub use match_row::{Cutoffs, MatchRow, MATCH_ROW_COLUMNS, extract_match_row};

/// Participants per match. Ids run 1..=10.
pub const PARTICIPANT_COUNT: usize = 10;

/// Participants per team.
pub const TEAM_SIZE: usize = 5;

/// Side of the map a team plays on, keyed by the API's team id.
///
/// Team 100 holds participants 1-5 and is labelled "red" in the output row,
/// team 200 holds 6-10 and is labelled "blue".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Red, Side::Blue];

    pub fn team_id(self) -> u16 {
        match self {
            Side::Red => 100,
            Side::Blue => 200,
        }
    }

    pub fn from_team_id(team_id: u16) -> Option<Self> {
        match team_id {
            100 => Some(Side::Red),
            200 => Some(Side::Blue),
            _ => None,
        }
    }

    /// Team block a participant id belongs to. Anything above 5 is blue.
    pub fn of_participant(participant_id: u8) -> Self {
        if participant_id as usize > TEAM_SIZE {
            Side::Blue
        } else {
            Side::Red
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    pub fn participants(self) -> RangeInclusive<u8> {
        match self {
            Side::Red => 1..=5,
            Side::Blue => 6..=10,
        }
    }

    /// Column suffix used when flattening team fields into a match row.
    pub fn suffix(self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::Blue => "blue",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.suffix(), self.team_id())
    }
}

/// True for ids 1..=10.
pub fn is_valid_participant(participant_id: u8) -> bool {
    (1..=PARTICIPANT_COUNT as u8).contains(&participant_id)
}

/// Row index of a participant in fixed-size per-participant tables.
pub(crate) fn participant_index(participant_id: u8) -> Option<usize> {
    if is_valid_participant(participant_id) {
        Some(participant_id as usize - 1)
    } else {
        None
    }
}
