//! Static champion lookups by numeric champion id.
//!
//! [`champion_archetype`] drives the built-in role classifier. [`champion_name`]
//! labels champions in error messages, and [`xp_to_level`] backs
//! `ParticipantSnapshot::level`; both are also public helpers for library callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gameplay class of a champion, used to estimate which position it plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Artillery,
    Assassin,
    BattleMage,
    Burst,
    Catcher,
    Diver,
    Enchanter,
    Juggernaut,
    Marksman,
    Skirmisher,
    Specialist,
    Vanguard,
    Warden,
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub fn champion_name(champion_id: u16) -> Option<&'static str> {
    lookup(CHAMPION_NAMES, champion_id)
}

pub fn champion_archetype(champion_id: u16) -> Option<Archetype> {
    lookup(CHAMPION_ARCHETYPES, champion_id)
}

fn lookup<T: Copy>(table: &[(u16, T)], champion_id: u16) -> Option<T> {
    table
        .binary_search_by_key(&champion_id, |(id, _)| *id)
        .ok()
        .map(|idx| table[idx].1)
}

/// Experience needed to reach levels 5 through 12.
const LEVEL_XP_THRESHOLDS: [u32; 8] = [1720, 2400, 3180, 4060, 5040, 6120, 7300, 8580];

/// Bins cumulative experience into a champion level. Levels below 4 are
/// reported as 4 and levels above 12 as 12, which covers the first ten
/// minutes of a match.
pub fn xp_to_level(xp: u32) -> u8 {
    let reached = LEVEL_XP_THRESHOLDS
        .iter()
        .take_while(|threshold| xp >= **threshold)
        .count();
    4 + reached as u8
}

// Sorted by id.
static CHAMPION_NAMES: &[(u16, &str)] = &[
    (1, "Annie"),
    (2, "Olaf"),
    (3, "Galio"),
    (4, "TwistedFate"),
    (5, "XinZhao"),
    (6, "Urgot"),
    (7, "LeBlanc"),
    (8, "Vladimir"),
    (9, "Fiddlesticks"),
    (10, "Kayle"),
    (11, "Master Yi"),
    (12, "Alistar"),
    (13, "Ryze"),
    (14, "Sion"),
    (15, "Sivir"),
    (16, "Soraka"),
    (17, "Teemo"),
    (18, "Tristana"),
    (19, "Warwick"),
    (20, "Nunu"),
    (21, "MissFortune"),
    (22, "Ashe"),
    (23, "Tryndamere"),
    (24, "Jax"),
    (25, "Morgana"),
    (26, "Zilean"),
    (27, "Singed"),
    (28, "Evelynn"),
    (29, "Twitch"),
    (30, "Karthus"),
    (31, "Cho'Gath"),
    (32, "Amumu"),
    (33, "Rammus"),
    (34, "Anivia"),
    (35, "Shaco"),
    (36, "Dr.Mundo"),
    (37, "Sona"),
    (38, "Kassadin"),
    (39, "Irelia"),
    (40, "Janna"),
    (41, "Gangplank"),
    (42, "Corki"),
    (43, "Karma"),
    (44, "Taric"),
    (45, "Veigar"),
    (48, "Trundle"),
    (50, "Swain"),
    (51, "Caitlyn"),
    (53, "Blitzcrank"),
    (54, "Malphite"),
    (55, "Katarina"),
    (56, "Nocturne"),
    (57, "Maokai"),
    (58, "Renekton"),
    (59, "JarvanIV"),
    (60, "Elise"),
    (61, "Orianna"),
    (62, "Wukong"),
    (63, "Brand"),
    (64, "LeeSin"),
    (67, "Vayne"),
    (68, "Rumble"),
    (69, "Cassiopeia"),
    (72, "Skarner"),
    (74, "Heimerdinger"),
    (75, "Nasus"),
    (76, "Nidalee"),
    (77, "Udyr"),
    (78, "Poppy"),
    (79, "Gragas"),
    (80, "Pantheon"),
    (81, "Ezreal"),
    (82, "Mordekaiser"),
    (83, "Yorick"),
    (84, "Akali"),
    (85, "Kennen"),
    (86, "Garen"),
    (89, "Leona"),
    (90, "Malzahar"),
    (91, "Talon"),
    (92, "Riven"),
    (96, "Kog'Maw"),
    (98, "Shen"),
    (99, "Lux"),
    (101, "Xerath"),
    (102, "Shyvana"),
    (103, "Ahri"),
    (104, "Graves"),
    (105, "Fizz"),
    (106, "Volibear"),
    (107, "Rengar"),
    (110, "Varus"),
    (111, "Nautilus"),
    (112, "Viktor"),
    (113, "Sejuani"),
    (114, "Fiora"),
    (115, "Ziggs"),
    (117, "Lulu"),
    (119, "Draven"),
    (120, "Hecarim"),
    (121, "Kha'Zix"),
    (122, "Darius"),
    (126, "Jayce"),
    (127, "Lissandra"),
    (131, "Diana"),
    (133, "Quinn"),
    (134, "Syndra"),
    (136, "AurelionSol"),
    (141, "Kayn"),
    (142, "Zoe"),
    (143, "Zyra"),
    (145, "Kai'sa"),
    (147, "Seraphine"),
    (150, "Gnar"),
    (154, "Zac"),
    (157, "Yasuo"),
    (161, "Vel'Koz"),
    (163, "Taliyah"),
    (164, "Camille"),
    (201, "Braum"),
    (202, "Jhin"),
    (203, "Kindred"),
    (222, "Jinx"),
    (223, "TahmKench"),
    (234, "Viego"),
    (235, "Senna"),
    (236, "Lucian"),
    (238, "Zed"),
    (240, "Kled"),
    (245, "Ekko"),
    (246, "Qiyana"),
    (254, "Vi"),
    (266, "Aatrox"),
    (267, "Nami"),
    (268, "Azir"),
    (350, "Yuumi"),
    (360, "Samira"),
    (412, "Thresh"),
    (420, "Illaoi"),
    (421, "Rek'Sai"),
    (427, "Ivern"),
    (429, "Kalista"),
    (432, "Bard"),
    (497, "Rakan"),
    (498, "Xayah"),
    (516, "Ornn"),
    (517, "Sylas"),
    (518, "Neeko"),
    (523, "Aphelios"),
    (526, "Rell"),
    (555, "Pyke"),
    (777, "Yone"),
    (875, "Sett"),
    (876, "Lillia"),
];

// Sorted by id.
static CHAMPION_ARCHETYPES: &[(u16, Archetype)] = &[
    (1, Archetype::Burst),
    (2, Archetype::Diver),
    (3, Archetype::Warden),
    (4, Archetype::Burst),
    (5, Archetype::Diver),
    (6, Archetype::Juggernaut),
    (7, Archetype::Burst),
    (8, Archetype::BattleMage),
    (9, Archetype::Specialist),
    (10, Archetype::Specialist),
    (11, Archetype::Skirmisher),
    (12, Archetype::Vanguard),
    (13, Archetype::BattleMage),
    (14, Archetype::Vanguard),
    (15, Archetype::Marksman),
    (16, Archetype::Enchanter),
    (17, Archetype::Specialist),
    (18, Archetype::Marksman),
    (19, Archetype::Diver),
    (20, Archetype::Vanguard),
    (21, Archetype::Marksman),
    (22, Archetype::Marksman),
    (23, Archetype::Skirmisher),
    (24, Archetype::Skirmisher),
    (25, Archetype::Catcher),
    (26, Archetype::Specialist),
    (27, Archetype::Specialist),
    (28, Archetype::Assassin),
    (29, Archetype::Marksman),
    (30, Archetype::BattleMage),
    (31, Archetype::Specialist),
    (32, Archetype::Vanguard),
    (33, Archetype::Vanguard),
    (34, Archetype::BattleMage),
    (35, Archetype::Assassin),
    (36, Archetype::Juggernaut),
    (37, Archetype::Enchanter),
    (38, Archetype::Assassin),
    (39, Archetype::Diver),
    (40, Archetype::Enchanter),
    (41, Archetype::Specialist),
    (42, Archetype::Marksman),
    (43, Archetype::Enchanter),
    (44, Archetype::Warden),
    (45, Archetype::Burst),
    (48, Archetype::Juggernaut),
    (50, Archetype::BattleMage),
    (51, Archetype::Marksman),
    (53, Archetype::Catcher),
    (54, Archetype::Vanguard),
    (55, Archetype::Assassin),
    (56, Archetype::Assassin),
    (57, Archetype::Vanguard),
    (58, Archetype::Diver),
    (59, Archetype::Diver),
    (60, Archetype::Diver),
    (61, Archetype::Burst),
    (62, Archetype::Diver),
    (63, Archetype::Burst),
    (64, Archetype::Diver),
    (67, Archetype::Marksman),
    (68, Archetype::BattleMage),
    (69, Archetype::BattleMage),
    (72, Archetype::Diver),
    (74, Archetype::Specialist),
    (75, Archetype::Juggernaut),
    (76, Archetype::Specialist),
    (77, Archetype::Juggernaut),
    (78, Archetype::Warden),
    (79, Archetype::Vanguard),
    (80, Archetype::Diver),
    (81, Archetype::Marksman),
    (82, Archetype::BattleMage),
    (83, Archetype::Juggernaut),
    (84, Archetype::Assassin),
    (85, Archetype::BattleMage),
    (86, Archetype::Juggernaut),
    (89, Archetype::Vanguard),
    (90, Archetype::BattleMage),
    (91, Archetype::Assassin),
    (92, Archetype::Skirmisher),
    (96, Archetype::Marksman),
    (98, Archetype::Warden),
    (99, Archetype::Burst),
    (101, Archetype::Artillery),
    (102, Archetype::Juggernaut),
    (103, Archetype::Burst),
    (104, Archetype::Specialist),
    (105, Archetype::Assassin),
    (106, Archetype::Juggernaut),
    (107, Archetype::Assassin),
    (110, Archetype::Marksman),
    (111, Archetype::Vanguard),
    (112, Archetype::BattleMage),
    (113, Archetype::Vanguard),
    (114, Archetype::Skirmisher),
    (115, Archetype::Artillery),
    (117, Archetype::Enchanter),
    (119, Archetype::Marksman),
    (120, Archetype::Diver),
    (121, Archetype::Assassin),
    (122, Archetype::Juggernaut),
    (126, Archetype::Artillery),
    (127, Archetype::Burst),
    (131, Archetype::Assassin),
    (133, Archetype::Specialist),
    (134, Archetype::Burst),
    (136, Archetype::BattleMage),
    (141, Archetype::Skirmisher),
    (142, Archetype::Burst),
    (143, Archetype::Catcher),
    (145, Archetype::Marksman),
    (147, Archetype::Enchanter),
    (150, Archetype::Specialist),
    (154, Archetype::Vanguard),
    (157, Archetype::Skirmisher),
    (161, Archetype::Artillery),
    (163, Archetype::BattleMage),
    (164, Archetype::Diver),
    (201, Archetype::Warden),
    (202, Archetype::Marksman),
    (203, Archetype::Marksman),
    (222, Archetype::Marksman),
    (223, Archetype::Warden),
    (234, Archetype::Skirmisher),
    (235, Archetype::Marksman),
    (236, Archetype::Marksman),
    (238, Archetype::Assassin),
    (240, Archetype::Skirmisher),
    (245, Archetype::Assassin),
    (246, Archetype::Assassin),
    (254, Archetype::Diver),
    (266, Archetype::Juggernaut),
    (267, Archetype::Enchanter),
    (268, Archetype::Specialist),
    (350, Archetype::Enchanter),
    (360, Archetype::Marksman),
    (412, Archetype::Catcher),
    (420, Archetype::Juggernaut),
    (421, Archetype::Diver),
    (427, Archetype::Catcher),
    (429, Archetype::Marksman),
    (432, Archetype::Catcher),
    (497, Archetype::Catcher),
    (498, Archetype::Marksman),
    (516, Archetype::Vanguard),
    (517, Archetype::Skirmisher),
    (518, Archetype::Burst),
    (523, Archetype::Marksman),
    (526, Archetype::Vanguard),
    (555, Archetype::Assassin),
    (777, Archetype::Skirmisher),
    (875, Archetype::Juggernaut),
    (876, Archetype::Skirmisher),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_sorted_and_aligned() {
        assert!(CHAMPION_NAMES.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(CHAMPION_ARCHETYPES.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(CHAMPION_NAMES.len(), CHAMPION_ARCHETYPES.len());
        for ((name_id, _), (class_id, _)) in CHAMPION_NAMES.iter().zip(CHAMPION_ARCHETYPES) {
            assert_eq!(name_id, class_id);
        }
    }

    #[test]
    fn test_lookups() {
        assert_eq!(champion_name(1), Some("Annie"));
        assert_eq!(champion_name(876), Some("Lillia"));
        assert_eq!(champion_name(46), None);
        assert_eq!(champion_archetype(1), Some(Archetype::Burst));
        assert_eq!(champion_archetype(51), Some(Archetype::Marksman));
        assert_eq!(champion_archetype(9999), None);
    }

    #[test]
    fn test_xp_to_level() {
        assert_eq!(xp_to_level(0), 4);
        assert_eq!(xp_to_level(1719), 4);
        assert_eq!(xp_to_level(1720), 5);
        assert_eq!(xp_to_level(4059), 7);
        assert_eq!(xp_to_level(4060), 8);
        assert_eq!(xp_to_level(8579), 11);
        assert_eq!(xp_to_level(8580), 12);
        assert_eq!(xp_to_level(20000), 12);
    }
}
