//! Typed view of the match timeline document.

use crate::error::{FeatureError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct Timeline {
    pub frames: Vec<Frame>,
}

/// One tick of the timeline, roughly one minute of game time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    #[serde(default)]
    pub participant_frames: BTreeMap<u8, ParticipantFrame>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantFrame {
    #[serde(default)]
    pub total_gold: u32,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub minions_killed: u32,
    #[serde(default)]
    pub jungle_minions_killed: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    #[serde(rename_all = "camelCase")]
    WardPlaced {
        creator_id: u8,
        #[serde(default)]
        ward_type: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    WardKill {
        killer_id: u8,
        #[serde(default)]
        ward_type: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ChampionKill {
        killer_id: u8,
        victim_id: u8,
        #[serde(default)]
        assisting_participant_ids: Vec<u8>,
    },
    #[serde(rename_all = "camelCase")]
    EliteMonsterKill {
        killer_id: u8,
        monster_type: MonsterType,
        #[serde(default)]
        monster_sub_type: Option<DragonType>,
    },
    #[serde(rename_all = "camelCase")]
    BuildingKill {
        #[serde(default)]
        killer_id: u8,
        team_id: u16,
        building_type: BuildingType,
        #[serde(default)]
        lane_type: LaneType,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonsterType {
    Dragon,
    Riftherald,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DragonType {
    FireDragon,
    WaterDragon,
    EarthDragon,
    AirDragon,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingType {
    TowerBuilding,
    InhibitorBuilding,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaneType {
    TopLane,
    MidLane,
    BotLane,
    #[default]
    #[serde(other)]
    Other,
}

/// Ward sub-type the API reports for wards it could not classify.
pub const UNDEFINED_WARD: &str = "UNDEFINED";

/// Whether a ward event should be counted. Missing ward types count as undefined.
pub fn is_counted_ward(ward_type: Option<&str>) -> bool {
    matches!(ward_type, Some(kind) if kind != UNDEFINED_WARD)
}

impl Timeline {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(contents)?;
        Self::from_value(value)
    }

    /// Accepts both `{frames: [...]}` and the wrapped `{metadata, info: {frames}}` shape.
    pub fn from_value(mut value: Value) -> Result<Self> {
        if value.get("frames").is_none() {
            if let Some(info) = value.get_mut("info") {
                value = info.take();
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Result<&Frame> {
        self.frames.get(index).ok_or(FeatureError::OutOfRange {
            index,
            frames: self.frames.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_events() {
        let frame: Frame = serde_json::from_value(json!({
            "participantFrames": {
                "1": {"participantId": 1, "totalGold": 500, "xp": 280, "minionsKilled": 3, "jungleMinionsKilled": 0, "level": 1}
            },
            "events": [
                {"type": "WARD_PLACED", "creatorId": 3, "wardType": "YELLOW_TRINKET", "timestamp": 61000},
                {"type": "CHAMPION_KILL", "killerId": 1, "victimId": 6, "assistingParticipantIds": [2, 3]},
                {"type": "ELITE_MONSTER_KILL", "killerId": 7, "monsterType": "DRAGON", "monsterSubType": "AIR_DRAGON"},
                {"type": "ELITE_MONSTER_KILL", "killerId": 2, "monsterType": "RIFTHERALD"},
                {"type": "BUILDING_KILL", "killerId": 4, "teamId": 200, "buildingType": "TOWER_BUILDING", "laneType": "MID_LANE", "towerType": "OUTER_TURRET"},
                {"type": "ITEM_PURCHASED", "participantId": 4, "itemId": 1055},
                {"type": "SKILL_LEVEL_UP", "participantId": 4, "skillSlot": 1}
            ]
        }))
        .unwrap();

        assert_eq!(frame.participant_frames[&1].total_gold, 500);
        assert_eq!(frame.events.len(), 7);
        assert_eq!(
            frame.events[1],
            Event::ChampionKill {
                killer_id: 1,
                victim_id: 6,
                assisting_participant_ids: vec![2, 3],
            }
        );
        assert_eq!(
            frame.events[2],
            Event::EliteMonsterKill {
                killer_id: 7,
                monster_type: MonsterType::Dragon,
                monster_sub_type: Some(DragonType::AirDragon),
            }
        );
        assert_eq!(
            frame.events[4],
            Event::BuildingKill {
                killer_id: 4,
                team_id: 200,
                building_type: BuildingType::TowerBuilding,
                lane_type: LaneType::MidLane,
            }
        );
        assert_eq!(frame.events[5], Event::Other);
        assert_eq!(frame.events[6], Event::Other);
    }

    #[test]
    fn test_unknown_sub_types() {
        let event: Event = serde_json::from_value(json!({
            "type": "ELITE_MONSTER_KILL",
            "killerId": 2,
            "monsterType": "DRAGON",
            "monsterSubType": "ELDER_DRAGON"
        }))
        .unwrap();
        assert_eq!(
            event,
            Event::EliteMonsterKill {
                killer_id: 2,
                monster_type: MonsterType::Dragon,
                monster_sub_type: Some(DragonType::Other),
            }
        );

        let event: Event = serde_json::from_value(json!({
            "type": "ELITE_MONSTER_KILL",
            "killerId": 2,
            "monsterType": "BARON_NASHOR"
        }))
        .unwrap();
        assert!(matches!(
            event,
            Event::EliteMonsterKill {
                monster_type: MonsterType::Other,
                ..
            }
        ));
    }

    #[test]
    fn test_wrapped_timeline() {
        let timeline = Timeline::from_value(json!({
            "metadata": {"matchId": "EUW1_1"},
            "info": {"frames": [{"participantFrames": {}, "events": []}]}
        }))
        .unwrap();
        assert_eq!(timeline.frame_count(), 1);
    }

    #[test]
    fn test_frame_out_of_range() {
        let timeline = Timeline::from_value(json!({"frames": [{}, {}]})).unwrap();
        assert!(timeline.frame(1).is_ok());
        match timeline.frame(2) {
            Err(FeatureError::OutOfRange { index, frames }) => {
                assert_eq!(index, 2);
                assert_eq!(frames, 2);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_counted_ward() {
        assert!(is_counted_ward(Some("CONTROL_WARD")));
        assert!(!is_counted_ward(Some("UNDEFINED")));
        assert!(!is_counted_ward(None));
    }
}
