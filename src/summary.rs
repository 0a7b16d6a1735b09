use crate::error::{FeatureError, Result};
use crate::{participant_index, Side, PARTICIPANT_COUNT};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The match summary document, reduced to what the feature row needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    #[serde(default)]
    pub game_id: Option<i64>,
    #[serde(default)]
    pub queue_id: Option<i64>,
    #[serde(default)]
    pub game_duration: Option<i64>,
    pub teams: Vec<TeamSummary>,
    pub participants: Vec<ParticipantSummary>,
    #[serde(skip)]
    pub match_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub team_id: u16,
    #[serde(default)]
    pub win: Option<WinFlag>,
}

/// Older documents report `"Win"`/`"Fail"`, newer ones a boolean.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WinFlag {
    Flag(bool),
    Label(String),
}

impl WinFlag {
    pub fn is_win(&self) -> bool {
        match self {
            WinFlag::Flag(won) => *won,
            WinFlag::Label(label) => label == "Win",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    pub participant_id: u8,
    pub team_id: u16,
    pub champion_id: u16,
    #[serde(default)]
    pub timeline: Option<ParticipantPosition>,
    #[serde(default)]
    pub lane: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParticipantPosition {
    #[serde(default)]
    pub lane: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Static per-participant facts from the match summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantGameInfo {
    pub participant_id: u8,
    pub team_id: u16,
    pub champion_id: u16,
    pub lane: String,
    pub role: String,
    pub is_winner: bool,
}

impl MatchSummary {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(contents)?;
        Self::from_value(value)
    }

    /// Accepts both the flat document and the `{metadata, info}` wrapped one.
    pub fn from_value(mut value: Value) -> Result<Self> {
        let match_id = value
            .get("metadata")
            .and_then(|metadata| metadata.get("matchId"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        if value.get("participants").is_none() {
            if let Some(info) = value.get_mut("info") {
                value = info.take();
            }
        }

        let mut summary: MatchSummary = serde_json::from_value(value)?;
        summary.match_id = match_id.or_else(|| summary.game_id.map(|id| id.to_string()));
        Ok(summary)
    }

    /// Team id of the team marked as winner.
    pub fn winning_team(&self) -> Result<u16> {
        self.teams
            .iter()
            .find(|team| team.win.as_ref().is_some_and(WinFlag::is_win))
            .map(|team| team.team_id)
            .ok_or_else(|| FeatureError::DataIntegrity("no team is marked as winner".to_string()))
    }
}

impl ParticipantSummary {
    fn lane(&self) -> String {
        self.timeline
            .as_ref()
            .and_then(|position| position.lane.clone())
            .or_else(|| self.lane.clone())
            .unwrap_or_default()
    }

    fn role(&self) -> String {
        self.timeline
            .as_ref()
            .and_then(|position| position.role.clone())
            .or_else(|| self.role.clone())
            .unwrap_or_default()
    }
}

/// Builds one record per participant, in source order.
///
/// Requires exactly ten participants with distinct ids in 1..=10, ids 1-5 on
/// team 100 and 6-10 on team 200, and one team marked as winner.
pub fn resolve_participants(summary: &MatchSummary) -> Result<Vec<ParticipantGameInfo>> {
    let winner = summary.winning_team()?;

    if summary.participants.len() != PARTICIPANT_COUNT {
        return Err(FeatureError::DataIntegrity(format!(
            "expected {} participants, found {}",
            PARTICIPANT_COUNT,
            summary.participants.len()
        )));
    }

    let mut seen = [false; PARTICIPANT_COUNT];
    let mut infos = Vec::with_capacity(PARTICIPANT_COUNT);

    for participant in &summary.participants {
        let participant_id = participant.participant_id;
        let Some(idx) = participant_index(participant_id) else {
            return Err(FeatureError::DataIntegrity(format!(
                "participant id {} outside 1..=10",
                participant_id
            )));
        };
        if seen[idx] {
            return Err(FeatureError::DataIntegrity(format!(
                "participant id {} appears twice",
                participant_id
            )));
        }
        seen[idx] = true;

        let expected = Side::of_participant(participant_id);
        if Side::from_team_id(participant.team_id) != Some(expected) {
            return Err(FeatureError::DataIntegrity(format!(
                "participant {} is on team {}, expected {}",
                participant_id,
                participant.team_id,
                expected.team_id()
            )));
        }

        infos.push(ParticipantGameInfo {
            participant_id,
            team_id: participant.team_id,
            champion_id: participant.champion_id,
            lane: participant.lane(),
            role: participant.role(),
            is_winner: participant.team_id == winner,
        });
    }

    Ok(infos)
}
