//! Team aggregation and the flattened per-match feature row.

use crate::error::{FeatureError, JoinSource, Result};
use crate::events::{aggregate_events, EventTable, PlayerEventCounters};
use crate::roles::{assign_roles, Role, RoleAssignment, RoleClassifier};
use crate::snapshot::{snapshot_at, ParticipantSnapshot};
use crate::summary::{resolve_participants, MatchSummary, ParticipantGameInfo};
use crate::timeline::Timeline;
use crate::{Side, PARTICIPANT_COUNT, TEAM_SIZE};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Frame indices used by the snapshot and event stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoffs {
    /// Frame whose resource snapshot is read.
    pub snapshot_frame: usize,
    /// Exclusive upper bound of the frames whose events are counted.
    pub event_frame_bound: usize,
}

impl Cutoffs {
    /// Snapshot at frame `n`, events from frames 1 through `n`.
    ///
    /// Saturates at `usize::MAX`, which no timeline reaches, so an absurd `n`
    /// surfaces as `OutOfRange` instead of wrapping.
    pub fn at_frame(n: usize) -> Self {
        Cutoffs {
            snapshot_frame: n,
            event_frame_bound: n.saturating_add(1),
        }
    }

    /// Frames a timeline needs for both stages to stay in range.
    pub fn required_frames(&self) -> usize {
        self.snapshot_frame
            .saturating_add(1)
            .max(self.event_frame_bound)
    }
}

impl Default for Cutoffs {
    fn default() -> Self {
        Cutoffs::at_frame(10)
    }
}

/// Stat columns of one team, in output order.
pub const TEAM_STAT_COLUMNS: [&str; 20] = [
    "totalGold",
    "xp",
    "nKills",
    "nDeaths",
    "nAssists",
    "minionsKilled",
    "jungleMinionsKilled",
    "wardsPlaced",
    "wardsKilled",
    "firstBlood",
    "firstTower",
    "midTowersDestroyed",
    "botTowersDestroyed",
    "topTowersDestroyed",
    "inhibitorsDestroyed",
    "fireDragonsDestroyed",
    "airDragonsDestroyed",
    "waterDragonsDestroyed",
    "earthDragonsDestroyed",
    "riftHeraldDestroyed",
];

/// Columns of a match row, in output order. Downstream consumers rely on
/// both the names and the order.
pub const MATCH_ROW_COLUMNS: [&str; 52] = [
    "gameID",
    "isWinner_blue",
    "totalGold_red",
    "xp_red",
    "nKills_red",
    "nDeaths_red",
    "nAssists_red",
    "minionsKilled_red",
    "jungleMinionsKilled_red",
    "wardsPlaced_red",
    "wardsKilled_red",
    "firstBlood_red",
    "firstTower_red",
    "midTowersDestroyed_red",
    "botTowersDestroyed_red",
    "topTowersDestroyed_red",
    "inhibitorsDestroyed_red",
    "fireDragonsDestroyed_red",
    "airDragonsDestroyed_red",
    "waterDragonsDestroyed_red",
    "earthDragonsDestroyed_red",
    "riftHeraldDestroyed_red",
    "TOP_red",
    "JUNGLE_red",
    "MIDDLE_red",
    "BOTTOM_red",
    "UTILITY_red",
    "totalGold_blue",
    "xp_blue",
    "nKills_blue",
    "nDeaths_blue",
    "nAssists_blue",
    "minionsKilled_blue",
    "jungleMinionsKilled_blue",
    "wardsPlaced_blue",
    "wardsKilled_blue",
    "firstBlood_blue",
    "firstTower_blue",
    "midTowersDestroyed_blue",
    "botTowersDestroyed_blue",
    "topTowersDestroyed_blue",
    "inhibitorsDestroyed_blue",
    "fireDragonsDestroyed_blue",
    "airDragonsDestroyed_blue",
    "waterDragonsDestroyed_blue",
    "earthDragonsDestroyed_blue",
    "riftHeraldDestroyed_blue",
    "TOP_blue",
    "JUNGLE_blue",
    "MIDDLE_blue",
    "BOTTOM_blue",
    "UTILITY_blue",
];

/// Columns holding a count or champion id, i.e. everything after `isWinner_blue`.
pub const NUMERIC_COLUMN_COUNT: usize = MATCH_ROW_COLUMNS.len() - 2;

/// One team's participants folded into a single record.
///
/// Individual stats are summed; team-wide flags and objective counters are
/// replicated on every participant of the team, so they take the maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamAggregate {
    pub team_id: u16,
    pub is_winner: bool,
    pub total_gold: u32,
    pub xp: u32,
    pub n_kills: u32,
    pub n_deaths: u32,
    pub n_assists: u32,
    pub minions_killed: u32,
    pub jungle_minions_killed: u32,
    pub wards_placed: u32,
    pub wards_killed: u32,
    pub first_blood: u32,
    pub first_tower: u32,
    pub mid_towers_destroyed: u32,
    pub bot_towers_destroyed: u32,
    pub top_towers_destroyed: u32,
    pub inhibitors_destroyed: u32,
    pub fire_dragons_destroyed: u32,
    pub air_dragons_destroyed: u32,
    pub water_dragons_destroyed: u32,
    pub earth_dragons_destroyed: u32,
    pub rift_herald_destroyed: u32,
}

impl TeamAggregate {
    fn new(side: Side) -> Self {
        TeamAggregate {
            team_id: side.team_id(),
            ..Default::default()
        }
    }

    fn add(
        &mut self,
        info: &ParticipantGameInfo,
        snapshot: &ParticipantSnapshot,
        events: &PlayerEventCounters,
    ) {
        self.total_gold += snapshot.total_gold;
        self.xp += snapshot.xp;
        self.minions_killed += snapshot.minions_killed;
        self.jungle_minions_killed += snapshot.jungle_minions_killed;
        self.wards_placed += events.wards_placed;
        self.wards_killed += events.wards_killed;
        self.n_kills += events.n_kills;
        self.n_deaths += events.n_deaths;
        self.n_assists += events.n_assists;

        self.is_winner |= info.is_winner;
        self.first_blood = self.first_blood.max(events.first_blood);
        self.first_tower = self.first_tower.max(events.first_tower);
        self.mid_towers_destroyed = self.mid_towers_destroyed.max(events.mid_towers_destroyed);
        self.bot_towers_destroyed = self.bot_towers_destroyed.max(events.bot_towers_destroyed);
        self.top_towers_destroyed = self.top_towers_destroyed.max(events.top_towers_destroyed);
        self.inhibitors_destroyed = self.inhibitors_destroyed.max(events.inhibitors_destroyed);
        self.fire_dragons_destroyed = self
            .fire_dragons_destroyed
            .max(events.fire_dragons_destroyed);
        self.air_dragons_destroyed = self.air_dragons_destroyed.max(events.air_dragons_destroyed);
        self.water_dragons_destroyed = self
            .water_dragons_destroyed
            .max(events.water_dragons_destroyed);
        self.earth_dragons_destroyed = self
            .earth_dragons_destroyed
            .max(events.earth_dragons_destroyed);
        self.rift_herald_destroyed = self.rift_herald_destroyed.max(events.rift_herald_destroyed);
    }

    /// Values in [`TEAM_STAT_COLUMNS`] order.
    pub fn stat_values(&self) -> [u32; 20] {
        [
            self.total_gold,
            self.xp,
            self.n_kills,
            self.n_deaths,
            self.n_assists,
            self.minions_killed,
            self.jungle_minions_killed,
            self.wards_placed,
            self.wards_killed,
            self.first_blood,
            self.first_tower,
            self.mid_towers_destroyed,
            self.bot_towers_destroyed,
            self.top_towers_destroyed,
            self.inhibitors_destroyed,
            self.fire_dragons_destroyed,
            self.air_dragons_destroyed,
            self.water_dragons_destroyed,
            self.earth_dragons_destroyed,
            self.rift_herald_destroyed,
        ]
    }
}

/// A single cell of a match row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Count(u32),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Flag(flag) => write!(f, "{}", flag),
            FieldValue::Count(count) => write!(f, "{}", count),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(text) => serializer.serialize_str(text),
            FieldValue::Flag(flag) => serializer.serialize_bool(*flag),
            FieldValue::Count(count) => serializer.serialize_u32(*count),
        }
    }
}

/// One flattened feature row per match. Team 100 is "red", team 200 "blue".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    pub game_id: String,
    pub is_winner_blue: bool,
    pub red: TeamAggregate,
    pub red_roles: RoleAssignment,
    pub blue: TeamAggregate,
    pub blue_roles: RoleAssignment,
}

impl MatchRow {
    pub fn team(&self, side: Side) -> (&TeamAggregate, &RoleAssignment) {
        match side {
            Side::Red => (&self.red, &self.red_roles),
            Side::Blue => (&self.blue, &self.blue_roles),
        }
    }

    /// Every column after `isWinner_blue`, in [`MATCH_ROW_COLUMNS`] order.
    pub fn numeric_values(&self) -> [u32; NUMERIC_COLUMN_COUNT] {
        let mut values = [0u32; NUMERIC_COLUMN_COUNT];
        let mut cursor = 0;
        for side in Side::BOTH {
            let (team, roles) = self.team(side);
            for value in team.stat_values() {
                values[cursor] = value;
                cursor += 1;
            }
            for champion_id in roles.champions() {
                values[cursor] = champion_id as u32;
                cursor += 1;
            }
        }
        values
    }

    /// All cells in [`MATCH_ROW_COLUMNS`] order.
    pub fn values(&self) -> Vec<FieldValue> {
        let mut values = Vec::with_capacity(MATCH_ROW_COLUMNS.len());
        values.push(FieldValue::Text(self.game_id.clone()));
        values.push(FieldValue::Flag(self.is_winner_blue));
        values.extend(self.numeric_values().into_iter().map(FieldValue::Count));
        values
    }

    /// Cells rendered as strings, for CSV output.
    pub fn to_record(&self) -> Vec<String> {
        self.values().iter().map(|value| value.to_string()).collect()
    }
}

impl Serialize for MatchRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MATCH_ROW_COLUMNS.len()))?;
        for (column, value) in MATCH_ROW_COLUMNS.iter().zip(self.values()) {
            map.serialize_entry(column, &value)?;
        }
        map.end()
    }
}

fn find_joined<'a, T>(
    rows: &'a [T],
    participant_id: u8,
    source_name: JoinSource,
    id_of: impl Fn(&T) -> u8,
) -> Result<&'a T> {
    rows.iter()
        .find(|row| id_of(row) == participant_id)
        .ok_or(FeatureError::JoinMismatch {
            participant_id,
            source_name,
        })
}

/// Joins the per-participant inputs on participant id, folds them into two
/// team aggregates and flattens the result with the resolved roles attached.
pub fn build_match_row(
    snapshots: &[ParticipantSnapshot],
    events: &EventTable,
    infos: &[ParticipantGameInfo],
    red_roles: RoleAssignment,
    blue_roles: RoleAssignment,
    game_id: &str,
) -> Result<MatchRow> {
    for info in infos {
        if !crate::is_valid_participant(info.participant_id) {
            return Err(FeatureError::DataIntegrity(format!(
                "participant id {} outside 1..=10",
                info.participant_id
            )));
        }
    }

    let mut red = TeamAggregate::new(Side::Red);
    let mut blue = TeamAggregate::new(Side::Blue);
    let mut team_sizes = [0usize; 2];

    for participant_id in 1..=PARTICIPANT_COUNT as u8 {
        let info = find_joined(infos, participant_id, JoinSource::GameInfo, |i| i.participant_id)?;
        let snapshot =
            find_joined(snapshots, participant_id, JoinSource::Snapshot, |s| s.participant_id)?;
        let counters = find_joined(events.rows(), participant_id, JoinSource::Events, |e| {
            e.participant_id
        })?;

        let side = Side::from_team_id(info.team_id).ok_or_else(|| {
            FeatureError::DataIntegrity(format!(
                "participant {} has unknown team id {}",
                participant_id, info.team_id
            ))
        })?;

        let team = match side {
            Side::Red => &mut red,
            Side::Blue => &mut blue,
        };
        team.add(info, snapshot, counters);
        team_sizes[side as usize] += 1;
    }

    if team_sizes != [TEAM_SIZE, TEAM_SIZE] {
        return Err(FeatureError::DataIntegrity(format!(
            "expected two teams of {}, got {} red and {} blue",
            TEAM_SIZE, team_sizes[0], team_sizes[1]
        )));
    }

    if red.is_winner == blue.is_winner {
        return Err(FeatureError::DataIntegrity(
            "exactly one team must be the winner".to_string(),
        ));
    }

    check_roles(infos, Side::Red, &red_roles)?;
    check_roles(infos, Side::Blue, &blue_roles)?;

    Ok(MatchRow {
        game_id: game_id.to_string(),
        is_winner_blue: blue.is_winner,
        red,
        red_roles,
        blue,
        blue_roles,
    })
}

/// Every role slot must name a participant of `side` playing the recorded champion.
fn check_roles(infos: &[ParticipantGameInfo], side: Side, roles: &RoleAssignment) -> Result<()> {
    for role in Role::ALL {
        let participant_id = roles.participant(role);
        let info = find_joined(infos, participant_id, JoinSource::GameInfo, |i| i.participant_id)?;

        if info.team_id != side.team_id() {
            return Err(FeatureError::DataIntegrity(format!(
                "{} role {} is held by participant {} of team {}",
                side.suffix(),
                role.label(),
                participant_id,
                info.team_id
            )));
        }
        if info.champion_id != roles.champion(role) {
            return Err(FeatureError::DataIntegrity(format!(
                "{} role {} names champion {} but participant {} plays {}",
                side.suffix(),
                role.label(),
                roles.champion(role),
                participant_id,
                info.champion_id
            )));
        }
    }
    Ok(())
}

fn team_champions(infos: &[ParticipantGameInfo], side: Side) -> Vec<(u8, u16)> {
    let mut team: Vec<(u8, u16)> = infos
        .iter()
        .filter(|info| info.team_id == side.team_id())
        .map(|info| (info.participant_id, info.champion_id))
        .collect();
    team.sort_by_key(|(participant_id, _)| *participant_id);
    team
}

/// Runs the whole pipeline for one match: snapshot, event counts, participant
/// info, role assignment for both teams and the final row.
///
/// `game_id` falls back to the id found in the summary document.
pub fn extract_match_row(
    timeline: &Timeline,
    summary: &MatchSummary,
    classifier: &dyn RoleClassifier,
    cutoffs: Cutoffs,
    game_id: Option<&str>,
) -> Result<MatchRow> {
    let game_id = game_id
        .map(|id| id.to_string())
        .or_else(|| summary.match_id.clone())
        .ok_or_else(|| FeatureError::DataIntegrity("match has no identifier".to_string()))?;

    let snapshots = snapshot_at(timeline, cutoffs.snapshot_frame)?;
    let events = aggregate_events(timeline, cutoffs.event_frame_bound)?;
    let infos = resolve_participants(summary)?;

    let red_roles = assign_roles(classifier, &team_champions(&infos, Side::Red))?;
    let blue_roles = assign_roles(classifier, &team_champions(&infos, Side::Blue))?;

    build_match_row(&snapshots, &events, &infos, red_roles, blue_roles, &game_id)
}

/// Column name for a role slot of a team, e.g. `MIDDLE_blue`.
pub fn role_column(role: Role, side: Side) -> String {
    format!("{}_{}", role.label(), side.suffix())
}
