use riot_match_features::export::{self, ExtractOptions};
use riot_match_features::roles::{ArchetypeClassifier, PlayRateClassifier, Role};
use riot_match_features::summary::MatchSummary;
use riot_match_features::timeline::Timeline;
use riot_match_features::{extract_match_row, Cutoffs, FeatureError, MatchRow, MATCH_ROW_COLUMNS};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

// Garen, Lee Sin, Ahri, Caitlyn, Thresh / Darius, Vi, Lux, Ashe, Leona
const RED_CHAMPIONS: [u16; 5] = [86, 64, 103, 51, 412];
const BLUE_CHAMPIONS: [u16; 5] = [122, 254, 99, 22, 89];

fn participant_frames(minute: u32) -> Value {
    let mut frames = serde_json::Map::new();
    for id in 1..=10u32 {
        let jungle = if id == 2 || id == 7 { minute * 4 } else { 0 };
        frames.insert(
            id.to_string(),
            json!({
                "participantId": id,
                "totalGold": 500 + minute * 100 * id,
                "xp": minute * 50 * id,
                "minionsKilled": minute * 2,
                "jungleMinionsKilled": jungle,
                "level": 1
            }),
        );
    }
    Value::Object(frames)
}

fn timeline_doc(frame_count: u32) -> Value {
    let frames: Vec<Value> = (0..frame_count)
        .map(|minute| {
            let events = match minute {
                3 => json!([
                    {"type": "ITEM_PURCHASED", "participantId": 3, "itemId": 1056},
                    {"type": "CHAMPION_KILL", "killerId": 1, "victimId": 6, "assistingParticipantIds": [2]}
                ]),
                5 => json!([
                    {"type": "BUILDING_KILL", "killerId": 1, "teamId": 200, "buildingType": "TOWER_BUILDING", "laneType": "TOP_LANE", "towerType": "OUTER_TURRET"}
                ]),
                // Beyond the default cutoff, must not be counted.
                11 => json!([
                    {"type": "CHAMPION_KILL", "killerId": 7, "victimId": 3, "assistingParticipantIds": []}
                ]),
                _ => json!([]),
            };
            json!({
                "timestamp": minute * 60_000,
                "participantFrames": participant_frames(minute),
                "events": events
            })
        })
        .collect();

    json!({ "frameInterval": 60_000, "frames": frames })
}

fn summary_doc(game_id: i64, queue_id: i64) -> Value {
    let participants: Vec<Value> = (1..=10usize)
        .map(|id| {
            let (team_id, champion_id) = if id <= 5 {
                (100, RED_CHAMPIONS[id - 1])
            } else {
                (200, BLUE_CHAMPIONS[id - 6])
            };
            json!({
                "participantId": id,
                "teamId": team_id,
                "championId": champion_id,
                "timeline": {"lane": "NONE", "role": "NONE"}
            })
        })
        .collect();

    json!({
        "gameId": game_id,
        "queueId": queue_id,
        "teams": [
            {"teamId": 100, "win": "Fail"},
            {"teamId": 200, "win": "Win"}
        ],
        "participants": participants
    })
}

fn column(row: &MatchRow, name: &str) -> Value {
    let json = serde_json::to_value(row).unwrap();
    json.get(name).cloned().unwrap_or_else(|| panic!("missing column {}", name))
}

fn build_row(frame_count: u32) -> Result<MatchRow, FeatureError> {
    let timeline = Timeline::from_value(timeline_doc(frame_count)).unwrap();
    let summary = MatchSummary::from_value(summary_doc(3_100_000_001, 420)).unwrap();
    extract_match_row(
        &timeline,
        &summary,
        &ArchetypeClassifier,
        Cutoffs::default(),
        None,
    )
}

#[test]
fn test_kill_and_tower_scenario() {
    let row = build_row(12).unwrap();

    assert_eq!(row.game_id, "3100000001");
    assert!(row.is_winner_blue);

    assert_eq!(row.red.n_kills, 1);
    assert_eq!(row.red.n_assists, 1);
    assert_eq!(row.red.n_deaths, 0);
    assert_eq!(row.blue.n_deaths, 1);
    assert_eq!(row.blue.n_kills, 0);
    assert_eq!(row.red.first_blood, 1);
    assert_eq!(row.blue.first_blood, 0);
    assert_eq!(row.red.top_towers_destroyed, 1);
    assert_eq!(row.red.first_tower, 1);
    assert_eq!(row.blue.top_towers_destroyed, 0);
    assert_eq!(row.blue.first_tower, 0);

    assert_eq!(column(&row, "nKills_red"), json!(1));
    assert_eq!(column(&row, "firstBlood_red"), json!(1));
    assert_eq!(column(&row, "firstTower_red"), json!(1));
    assert_eq!(column(&row, "topTowersDestroyed_red"), json!(1));
    assert_eq!(column(&row, "isWinner_blue"), json!(true));
}

#[test]
fn test_snapshot_sums_at_minute_ten() {
    let row = build_row(12).unwrap();

    // totalGold = 500 + 1000 * id at minute 10
    assert_eq!(row.red.total_gold, 5 * 500 + 1000 * 15);
    assert_eq!(row.blue.total_gold, 5 * 500 + 1000 * 40);
    assert_eq!(row.red.xp, 500 * 15);
    assert_eq!(row.red.minions_killed, 5 * 20);
    assert_eq!(row.red.jungle_minions_killed, 40);
    assert_eq!(row.blue.jungle_minions_killed, 40);
}

#[test]
fn test_roles_cover_each_position_once() {
    let row = build_row(12).unwrap();

    for (roles, champions) in [
        (&row.red_roles, RED_CHAMPIONS),
        (&row.blue_roles, BLUE_CHAMPIONS),
    ] {
        let mut assigned = roles.champions().to_vec();
        assigned.sort();
        let mut expected = champions.to_vec();
        expected.sort();
        assert_eq!(assigned, expected);
    }

    assert_eq!(row.red_roles.champion(Role::Bottom), 51);
    assert_eq!(row.red_roles.champion(Role::Utility), 412);
    assert_eq!(row.blue_roles.champion(Role::Bottom), 22);
    assert_eq!(column(&row, "BOTTOM_blue"), json!(22));
}

#[test]
fn test_play_rate_classifier_end_to_end() {
    let rates = json!({
        "86": {"TOP": 0.9}, "64": {"JUNGLE": 0.9}, "103": {"MIDDLE": 0.9},
        "51": {"BOTTOM": 0.9}, "412": {"UTILITY": 0.9},
        "122": {"TOP": 0.9}, "254": {"JUNGLE": 0.9}, "99": {"MIDDLE": 0.9},
        "22": {"BOTTOM": 0.9}, "89": {"UTILITY": 0.9}
    });
    let classifier = PlayRateClassifier::from_json_str(&rates.to_string()).unwrap();
    let timeline = Timeline::from_value(timeline_doc(12)).unwrap();
    let summary = MatchSummary::from_value(summary_doc(1, 420)).unwrap();

    let row = extract_match_row(&timeline, &summary, &classifier, Cutoffs::default(), Some("X1")).unwrap();
    assert_eq!(row.game_id, "X1");
    assert_eq!(row.blue_roles.champion(Role::Jungle), 254);
    assert_eq!(row.blue_roles.participant(Role::Jungle), 7);
}

#[test]
fn test_short_timeline_is_out_of_range() {
    assert!(matches!(
        build_row(10),
        Err(FeatureError::OutOfRange { .. })
    ));
}

#[test]
fn test_pipeline_is_deterministic() {
    let first = build_row(12).unwrap();
    let second = build_row(12).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first.to_record(), second.to_record());
}

#[test]
fn test_kill_totals_match_events_in_range() {
    // Cutting at minute 11 brings the frame-11 kill into range.
    let timeline = Timeline::from_value(timeline_doc(12)).unwrap();
    let summary = MatchSummary::from_value(summary_doc(1, 420)).unwrap();
    let row = extract_match_row(
        &timeline,
        &summary,
        &ArchetypeClassifier,
        Cutoffs::at_frame(11),
        None,
    )
    .unwrap();

    assert_eq!(row.red.n_kills + row.blue.n_kills, 2);
    assert_eq!(row.red.first_blood, 1);
    assert_eq!(row.blue.first_blood, 0);
}

fn write_match(dir: &Path, name: &str, summary: &Value, timeline: &Value) {
    fs::write(dir.join(format!("{}.json", name)), summary.to_string()).unwrap();
    fs::write(dir.join(format!("{}_timeline.json", name)), timeline.to_string()).unwrap();
}

#[test]
fn test_extract_directory_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let matches = dir.path().join("matches");
    fs::create_dir_all(&matches).unwrap();

    write_match(&matches, "m1", &summary_doc(1, 420), &timeline_doc(12));
    // Same game saved twice under another name.
    write_match(&matches, "m1_copy", &summary_doc(1, 420), &timeline_doc(12));
    // Too short to reach the cutoff.
    write_match(&matches, "m2", &summary_doc(2, 420), &timeline_doc(8));
    // Normal draft, not ranked.
    write_match(&matches, "m3", &summary_doc(3, 400), &timeline_doc(12));
    // No winner.
    let mut no_winner = summary_doc(4, 420);
    no_winner["teams"][1]["win"] = json!("Fail");
    write_match(&matches, "m4", &no_winner, &timeline_doc(12));
    write_match(&matches, "m5", &summary_doc(5, 420), &timeline_doc(15));

    let options = ExtractOptions {
        queue_id: Some(420),
        ..ExtractOptions::default()
    };
    let report = export::extract_rows(&matches, &ArchetypeClassifier, &options).unwrap();

    let ids: Vec<&str> = report.rows.iter().map(|r| r.game_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "5"]);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.filtered, 2);
    assert_eq!(report.failed, 1);

    let out = dir.path().join("out").join("rows.csv");
    export::write_csv(&report.rows, &out).unwrap();

    let mut reader = csv::Reader::from_path(&out).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(|h| h.to_string()).collect();
    assert_eq!(headers, MATCH_ROW_COLUMNS.to_vec());

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][0], "1");
    assert_eq!(&records[0][1], "true");
    let n_kills_red = MATCH_ROW_COLUMNS.iter().position(|c| *c == "nKills_red").unwrap();
    assert_eq!(&records[0][n_kills_red], "1");
}

#[test]
fn test_extract_directory_to_parquet() {
    let dir = tempfile::tempdir().unwrap();
    write_match(dir.path(), "m1", &summary_doc(1, 420), &timeline_doc(12));

    let report =
        export::extract_rows(dir.path(), &ArchetypeClassifier, &ExtractOptions::default()).unwrap();
    assert_eq!(report.rows.len(), 1);

    let df = export::build_dataframe(&report.rows).unwrap();
    assert_eq!(df.height(), 1);
    assert_eq!(df.width(), MATCH_ROW_COLUMNS.len());

    let out = dir.path().join("rows.parquet");
    export::write_parquet(&report.rows, &out).unwrap();
    assert!(out.exists());
}
