//! Positional role assignment for a team of five champions.
//!
//! A [`RoleClassifier`] scores how well each champion fits each of the five
//! positions; [`assign_roles`] then picks the one-to-one assignment with the
//! highest total score.

use crate::champions::{champion_archetype, champion_name, Archetype};
use crate::error::{FeatureError, Result};
use crate::TEAM_SIZE;
use pathfinding::kuhn_munkres::kuhn_munkres;
use pathfinding::matrix::Matrix;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Top,
    Jungle,
    Middle,
    Bottom,
    Utility,
}

impl Role {
    /// Canonical order, also the column order of the match row.
    pub const ALL: [Role; TEAM_SIZE] = [
        Role::Top,
        Role::Jungle,
        Role::Middle,
        Role::Bottom,
        Role::Utility,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Role::Top => "TOP",
            Role::Jungle => "JUNGLE",
            Role::Middle => "MIDDLE",
            Role::Bottom => "BOTTOM",
            Role::Utility => "UTILITY",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-role affinity of a champion, indexed in [`Role::ALL`] order.
pub type RoleAffinity = [f64; TEAM_SIZE];

pub trait RoleClassifier {
    /// Affinity of the champion for each role, or `None` for an unknown champion.
    fn affinity(&self, champion_id: u16) -> Option<RoleAffinity>;
}

/// Classifier backed by observed play rates per champion and position.
///
/// The JSON format maps champion ids to role play rates:
/// `{"1": {"TOP": 0.02, "MIDDLE": 0.91, "UTILITY": 0.07}, ...}`.
/// Roles missing from an entry count as zero.
#[derive(Debug, Clone, Default)]
pub struct PlayRateClassifier {
    rates: HashMap<u16, RoleAffinity>,
}

impl PlayRateClassifier {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let raw: HashMap<u16, BTreeMap<Role, f64>> = serde_json::from_str(contents)?;
        let rates = raw
            .into_iter()
            .map(|(champion_id, by_role)| {
                let mut affinity = [0.0; TEAM_SIZE];
                for (role, rate) in by_role {
                    affinity[role.index()] = rate;
                }
                (champion_id, affinity)
            })
            .collect();

        Ok(PlayRateClassifier { rates })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl RoleClassifier for PlayRateClassifier {
    fn affinity(&self, champion_id: u16) -> Option<RoleAffinity> {
        self.rates.get(&champion_id).copied()
    }
}

/// Classifier that needs no external data: it scores positions from the
/// champion's archetype in the static champion table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchetypeClassifier;

impl ArchetypeClassifier {
    pub fn archetype_affinity(archetype: Archetype) -> RoleAffinity {
        //                                    TOP   JUNGLE MIDDLE BOTTOM UTILITY
        match archetype {
            Archetype::Artillery => [0.05, 0.00, 0.55, 0.05, 0.35],
            Archetype::Assassin => [0.10, 0.35, 0.50, 0.00, 0.05],
            Archetype::BattleMage => [0.20, 0.15, 0.50, 0.05, 0.10],
            Archetype::Burst => [0.05, 0.05, 0.55, 0.05, 0.30],
            Archetype::Catcher => [0.05, 0.10, 0.05, 0.00, 0.80],
            Archetype::Diver => [0.35, 0.45, 0.10, 0.00, 0.10],
            Archetype::Enchanter => [0.00, 0.00, 0.10, 0.05, 0.85],
            Archetype::Juggernaut => [0.70, 0.15, 0.05, 0.00, 0.10],
            Archetype::Marksman => [0.05, 0.00, 0.10, 0.85, 0.00],
            Archetype::Skirmisher => [0.45, 0.35, 0.15, 0.05, 0.00],
            Archetype::Specialist => [0.30, 0.20, 0.25, 0.10, 0.15],
            Archetype::Vanguard => [0.30, 0.30, 0.00, 0.00, 0.40],
            Archetype::Warden => [0.30, 0.10, 0.05, 0.00, 0.55],
        }
    }
}

impl RoleClassifier for ArchetypeClassifier {
    fn affinity(&self, champion_id: u16) -> Option<RoleAffinity> {
        champion_archetype(champion_id).map(Self::archetype_affinity)
    }
}

/// Roles resolved for one team: which participant plays which position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleAssignment {
    // (participant id, champion id), indexed in Role::ALL order.
    slots: [(u8, u16); TEAM_SIZE],
}

impl RoleAssignment {
    pub fn champion(&self, role: Role) -> u16 {
        self.slots[role.index()].1
    }

    pub fn participant(&self, role: Role) -> u8 {
        self.slots[role.index()].0
    }

    pub fn role_of(&self, participant_id: u8) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| self.participant(*role) == participant_id)
    }

    /// Champion ids in [`Role::ALL`] order.
    pub fn champions(&self) -> [u16; TEAM_SIZE] {
        self.slots.map(|(_, champion_id)| champion_id)
    }
}

// Affinities are compared as fixed-point integers.
const AFFINITY_SCALE: f64 = 1_000_000.0;

/// Assigns each of the five `(participant id, champion id)` pairs to exactly one role.
pub fn assign_roles(
    classifier: &dyn RoleClassifier,
    team: &[(u8, u16)],
) -> Result<RoleAssignment> {
    if team.len() != TEAM_SIZE {
        return Err(FeatureError::RoleResolution(format!(
            "expected {} champions, got {}",
            TEAM_SIZE,
            team.len()
        )));
    }

    let mut affinities = Vec::with_capacity(TEAM_SIZE);
    for (participant_id, champion_id) in team {
        let affinity = classifier.affinity(*champion_id).ok_or_else(|| {
            FeatureError::RoleResolution(format!(
                "no role data for champion {} ({}) (participant {})",
                champion_id,
                champion_name(*champion_id).unwrap_or("unknown"),
                participant_id
            ))
        })?;
        affinities.push(affinity);
    }

    let weights = Matrix::from_fn(TEAM_SIZE, TEAM_SIZE, |(member, role)| {
        (affinities[member][role] * AFFINITY_SCALE).round() as i64
    });
    let (_, assignment) = kuhn_munkres(&weights);

    let mut slots: [Option<(u8, u16)>; TEAM_SIZE] = [None; TEAM_SIZE];
    for (member, role) in assignment.into_iter().enumerate() {
        if role >= TEAM_SIZE || slots[role].is_some() {
            return Err(FeatureError::RoleResolution(format!(
                "role {} assigned more than once",
                role
            )));
        }
        slots[role] = Some(team[member]);
    }

    let mut resolved = [(0u8, 0u16); TEAM_SIZE];
    for (idx, slot) in slots.into_iter().enumerate() {
        resolved[idx] = slot.ok_or_else(|| {
            FeatureError::RoleResolution(format!("no champion for {}", Role::ALL[idx]))
        })?;
    }

    Ok(RoleAssignment { slots: resolved })
}
