use crate::champions::xp_to_level;
use crate::error::{FeatureError, JoinSource, Result};
use crate::timeline::Timeline;
use crate::PARTICIPANT_COUNT;
use serde::Serialize;

/// Resource state of one participant at the snapshot frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSnapshot {
    pub participant_id: u8,
    pub total_gold: u32,
    pub xp: u32,
    pub minions_killed: u32,
    pub jungle_minions_killed: u32,
}

impl ParticipantSnapshot {
    /// Champion level implied by the experience at this frame, clamped to 4..=12.
    pub fn level(&self) -> u8 {
        xp_to_level(self.xp)
    }
}

/// Reads gold, experience and minion counts for participants 1..=10 at frame `n`.
pub fn snapshot_at(timeline: &Timeline, n: usize) -> Result<[ParticipantSnapshot; PARTICIPANT_COUNT]> {
    let frame = timeline.frame(n)?;
    let mut snapshots = [ParticipantSnapshot::default(); PARTICIPANT_COUNT];

    for (idx, snapshot) in snapshots.iter_mut().enumerate() {
        let participant_id = idx as u8 + 1;
        let Some(stats) = frame.participant_frames.get(&participant_id) else {
            return Err(FeatureError::JoinMismatch {
                participant_id,
                source_name: JoinSource::Snapshot,
            });
        };

        *snapshot = ParticipantSnapshot {
            participant_id,
            total_gold: stats.total_gold,
            xp: stats.xp,
            minions_killed: stats.minions_killed,
            jungle_minions_killed: stats.jungle_minions_killed,
        };
    }

    Ok(snapshots)
}
