//! Event aggregation over the early frames of a timeline.
//!
//! Individual events (wards, kills) are credited to one participant. Objective
//! events (dragons, heralds, towers, inhibitors) are credited to every
//! participant of the team block that earned them, so any row of a block
//! carries the team total. First blood and first tower are the exception:
//! each flags at most one row per match.

use crate::error::{FeatureError, Result};
use crate::timeline::{
    is_counted_ward, BuildingType, DragonType, Event, LaneType, MonsterType, Timeline,
};
use crate::{participant_index, Side, PARTICIPANT_COUNT};
use serde::Serialize;

/// Event counts for one participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEventCounters {
    pub participant_id: u8,
    pub wards_placed: u32,
    pub wards_killed: u32,
    pub n_kills: u32,
    pub n_deaths: u32,
    pub n_assists: u32,
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

/// Counters for all ten participants plus the match-wide "first" outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTable {
    rows: [PlayerEventCounters; PARTICIPANT_COUNT],
    first_blood: Option<u8>,
    first_tower: Option<Side>,
}

impl EventTable {
    fn new() -> Self {
        let mut rows = [PlayerEventCounters::default(); PARTICIPANT_COUNT];
        for (idx, row) in rows.iter_mut().enumerate() {
            row.participant_id = idx as u8 + 1;
        }

        EventTable {
            rows,
            first_blood: None,
            first_tower: None,
        }
    }

    /// Rows ordered by participant id, 1 through 10.
    pub fn rows(&self) -> &[PlayerEventCounters; PARTICIPANT_COUNT] {
        &self.rows
    }

    pub fn get(&self, participant_id: u8) -> Option<&PlayerEventCounters> {
        participant_index(participant_id).map(|idx| &self.rows[idx])
    }

    /// Participant credited with the first champion kill, if any happened.
    pub fn first_blood(&self) -> Option<u8> {
        self.first_blood
    }

    /// Team that destroyed the first tower, if any fell.
    pub fn first_tower(&self) -> Option<Side> {
        self.first_tower
    }

    fn row_mut(&mut self, participant_id: u8) -> Result<&mut PlayerEventCounters> {
        match participant_index(participant_id) {
            Some(idx) => Ok(&mut self.rows[idx]),
            None => Err(FeatureError::DataIntegrity(format!(
                "event references participant id {} outside 1..=10",
                participant_id
            ))),
        }
    }

    fn credit_team(&mut self, side: Side, update: impl Fn(&mut PlayerEventCounters)) {
        for participant_id in side.participants() {
            update(&mut self.rows[participant_id as usize - 1]);
        }
    }

    fn apply(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::WardPlaced {
                creator_id,
                ward_type,
            } => {
                if is_counted_ward(ward_type.as_deref()) {
                    self.row_mut(*creator_id)?.wards_placed += 1;
                }
            }
            Event::WardKill {
                killer_id,
                ward_type,
            } => {
                if is_counted_ward(ward_type.as_deref()) {
                    self.row_mut(*killer_id)?.wards_killed += 1;
                }
            }
            Event::ChampionKill {
                killer_id,
                victim_id,
                assisting_participant_ids,
            } => {
                // Killer 0 is an execution by a tower, minion or monster.
                if *killer_id == 0 {
                    return Ok(());
                }

                let is_first = self.first_blood.is_none();
                let killer = self.row_mut(*killer_id)?;
                killer.n_kills += 1;
                if is_first {
                    killer.first_blood += 1;
                    self.first_blood = Some(*killer_id);
                }

                self.row_mut(*victim_id)?.n_deaths += 1;
                for assist in assisting_participant_ids {
                    self.row_mut(*assist)?.n_assists += 1;
                }
            }
            Event::EliteMonsterKill {
                killer_id,
                monster_type,
                monster_sub_type,
            } => {
                let side = Side::of_participant(*killer_id);
                match monster_type {
                    MonsterType::Dragon => match monster_sub_type {
                        Some(DragonType::FireDragon) => {
                            self.credit_team(side, |row| row.fire_dragons_destroyed += 1)
                        }
                        Some(DragonType::WaterDragon) => {
                            self.credit_team(side, |row| row.water_dragons_destroyed += 1)
                        }
                        Some(DragonType::EarthDragon) => {
                            self.credit_team(side, |row| row.earth_dragons_destroyed += 1)
                        }
                        Some(DragonType::AirDragon) => {
                            self.credit_team(side, |row| row.air_dragons_destroyed += 1)
                        }
                        Some(DragonType::Other) | None => {}
                    },
                    MonsterType::Riftherald => {
                        self.credit_team(side, |row| row.rift_herald_destroyed += 1)
                    }
                    MonsterType::Other => {}
                }
            }
            Event::BuildingKill {
                killer_id,
                team_id,
                building_type,
                lane_type,
            } => match building_type {
                BuildingType::TowerBuilding => {
                    // teamId names the team that owned the tower.
                    let owner = Side::from_team_id(*team_id).ok_or_else(|| {
                        FeatureError::DataIntegrity(format!(
                            "tower event with unknown team id {}",
                            team_id
                        ))
                    })?;
                    let destroyer = owner.opponent();

                    if self.first_tower.is_none() {
                        self.first_tower = Some(destroyer);
                        // Flag a single row: the killer when they belong to the
                        // destroying team, the team's first participant otherwise.
                        let holder = if destroyer.participants().contains(killer_id) {
                            *killer_id
                        } else {
                            *destroyer.participants().start()
                        };
                        self.row_mut(holder)?.first_tower += 1;
                    }

                    match lane_type {
                        LaneType::TopLane => {
                            self.credit_team(destroyer, |row| row.top_towers_destroyed += 1)
                        }
                        LaneType::MidLane => {
                            self.credit_team(destroyer, |row| row.mid_towers_destroyed += 1)
                        }
                        LaneType::BotLane => {
                            self.credit_team(destroyer, |row| row.bot_towers_destroyed += 1)
                        }
                        LaneType::Other => {}
                    }
                }
                BuildingType::InhibitorBuilding => {
                    let side = Side::of_participant(*killer_id);
                    self.credit_team(side, |row| row.inhibitors_destroyed += 1);
                }
                BuildingType::Other => {}
            },
            Event::Other => {}
        }

        Ok(())
    }
}

/// Counts events in frames `1..n`. Frame 0 is the pre-game frame and is skipped.
///
/// Frames are walked in order and events within a frame in the order the API
/// emitted them; the first kill and first tower encountered win the "first"
/// flags.
pub fn aggregate_events(timeline: &Timeline, n: usize) -> Result<EventTable> {
    let mut table = EventTable::new();
    if n <= 1 {
        return Ok(table);
    }

    if n > timeline.frame_count() {
        return Err(FeatureError::OutOfRange {
            index: n - 1,
            frames: timeline.frame_count(),
        });
    }

    for frame in &timeline.frames[1..n] {
        for event in &frame.events {
            table.apply(event)?;
        }
    }

    Ok(table)
}
