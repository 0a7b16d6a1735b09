//! Batch extraction over a directory of saved matches, plus CSV and Parquet output.
//!
//! A match is stored as two files side by side: `<match id>.json` holding the
//! summary and `<match id>_timeline.json` holding the timeline.

use crate::error::Result as FeatureResult;
use crate::match_row::{extract_match_row, Cutoffs, MatchRow, MATCH_ROW_COLUMNS};
use crate::roles::RoleClassifier;
use crate::summary::MatchSummary;
use crate::timeline::Timeline;
use anyhow::{anyhow, Context, Result};
use csv::Writer;
use log::{debug, info, warn};
use polars::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const TIMELINE_SUFFIX: &str = "_timeline";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFiles {
    pub match_id: String,
    pub summary: PathBuf,
    pub timeline: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub cutoffs: Cutoffs,
    /// Matches with fewer frames are skipped.
    pub min_frames: usize,
    /// Keep only matches from this queue, e.g. 420 for ranked solo.
    pub queue_id: Option<i64>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            cutoffs: Cutoffs::default(),
            min_frames: 11,
            queue_id: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ExtractReport {
    pub rows: Vec<MatchRow>,
    /// Matches that failed to load or to build a row.
    pub failed: usize,
    /// Matches dropped by the queue or length filters.
    pub filtered: usize,
    pub duplicates: usize,
}

/// Pairs summary and timeline files found anywhere under `root`, ordered by match id.
pub fn collect_match_files(root: &Path) -> Vec<MatchFiles> {
    let mut summaries: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut timelines: BTreeMap<String, PathBuf> = BTreeMap::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(path) = stack.pop() {
        let Ok(entries) = fs::read_dir(&path) else {
            continue;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }

            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if !is_json {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(|s| s.to_string())
            else {
                continue;
            };

            match stem.strip_suffix(TIMELINE_SUFFIX) {
                Some(match_id) => {
                    timelines.insert(match_id.to_string(), path);
                }
                None => {
                    summaries.insert(stem, path);
                }
            }
        }
    }

    let mut files = Vec::with_capacity(summaries.len());
    for (match_id, summary) in summaries {
        match timelines.remove(&match_id) {
            Some(timeline) => files.push(MatchFiles {
                match_id,
                summary,
                timeline,
            }),
            None => warn!("No timeline for match {}, skipping", match_id),
        }
    }
    for match_id in timelines.keys() {
        warn!("No summary for match {}, skipping", match_id);
    }

    files
}

fn load_match(files: &MatchFiles) -> FeatureResult<(MatchSummary, Timeline)> {
    let summary = MatchSummary::from_json_str(&fs::read_to_string(&files.summary)?)?;
    let timeline = Timeline::from_json_str(&fs::read_to_string(&files.timeline)?)?;
    Ok((summary, timeline))
}

/// Builds a row for every usable match under `matches_dir`.
///
/// Matches are independent: a failure is logged and the match skipped.
pub fn extract_rows(
    matches_dir: &Path,
    classifier: &dyn RoleClassifier,
    options: &ExtractOptions,
) -> Result<ExtractReport> {
    if !matches_dir.is_dir() {
        return Err(anyhow!("{} is not a directory", matches_dir.display()));
    }

    let files = collect_match_files(matches_dir);
    info!("Found {} matches in {}", files.len(), matches_dir.display());

    let min_frames = options.min_frames.max(options.cutoffs.required_frames());
    let mut report = ExtractReport::default();
    let mut seen: HashSet<String> = HashSet::new();

    for match_files in &files {
        let (summary, timeline) = match load_match(match_files) {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!("Skipping unreadable match {}: {}", match_files.match_id, err);
                report.failed += 1;
                continue;
            }
        };

        let game_id = summary
            .match_id
            .clone()
            .unwrap_or_else(|| match_files.match_id.clone());

        if !seen.insert(game_id.clone()) {
            debug!("Duplicate match {}", game_id);
            report.duplicates += 1;
            continue;
        }

        if let Some(queue_id) = options.queue_id {
            if summary.queue_id != Some(queue_id) {
                debug!("Match {} is from queue {:?}", game_id, summary.queue_id);
                report.filtered += 1;
                continue;
            }
        }

        if timeline.frame_count() < min_frames {
            debug!(
                "Match {} has {} frames, need {}",
                game_id,
                timeline.frame_count(),
                min_frames
            );
            report.filtered += 1;
            continue;
        }

        match extract_match_row(&timeline, &summary, classifier, options.cutoffs, Some(&game_id)) {
            Ok(row) => report.rows.push(row),
            Err(err) => {
                warn!("Skipping match {}: {}", game_id, err);
                report.failed += 1;
            }
        }
    }

    info!(
        "Built {} rows ({} failed, {} filtered, {} duplicates)",
        report.rows.len(),
        report.failed,
        report.filtered,
        report.duplicates
    );

    Ok(report)
}

fn ensure_parent(out_file: &Path) -> Result<()> {
    if let Some(parent) = out_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn write_csv(rows: &[MatchRow], out_file: &Path) -> Result<()> {
    ensure_parent(out_file)?;

    let mut writer = Writer::from_path(out_file)
        .with_context(|| format!("Failed to create {}", out_file.display()))?;
    writer.write_record(MATCH_ROW_COLUMNS)?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_parquet(rows: &[MatchRow], out_file: &Path) -> Result<()> {
    ensure_parent(out_file)?;

    let mut df = build_dataframe(rows)?;
    let mut file = File::create(out_file)
        .with_context(|| format!("Failed to create {}", out_file.display()))?;
    ParquetWriter::new(&mut file).finish(&mut df)?;

    Ok(())
}

pub fn build_dataframe(rows: &[MatchRow]) -> Result<DataFrame, PolarsError> {
    let game_id: Vec<String> = rows.iter().map(|row| row.game_id.clone()).collect();
    let is_winner_blue: Vec<bool> = rows.iter().map(|row| row.is_winner_blue).collect();
    let numeric: Vec<_> = rows.iter().map(MatchRow::numeric_values).collect();

    let mut columns = Vec::with_capacity(MATCH_ROW_COLUMNS.len());
    columns.push(Series::new(MATCH_ROW_COLUMNS[0], game_id));
    columns.push(Series::new(MATCH_ROW_COLUMNS[1], is_winner_blue));

    for (offset, name) in MATCH_ROW_COLUMNS[2..].iter().enumerate() {
        let values: Vec<u32> = numeric.iter().map(|row| row[offset]).collect();
        columns.push(Series::new(name, values));
    }

    DataFrame::new(columns)
}
