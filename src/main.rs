use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use riot_match_features::export::{self, ExtractOptions};
use riot_match_features::roles::{ArchetypeClassifier, PlayRateClassifier, RoleClassifier};
use riot_match_features::summary::MatchSummary;
use riot_match_features::timeline::Timeline;
use riot_match_features::{extract_match_row, Cutoffs};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "riot-match-features",
    about = "Early-game feature rows from Riot match timelines",
    version
)]
struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long = "log-level", global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the feature row of a single match and print it as JSON
    Row {
        /// Timeline document
        #[arg(long)]
        timeline: PathBuf,

        /// Match summary document
        #[arg(long)]
        summary: PathBuf,

        /// Match identifier, defaults to the one in the summary
        #[arg(long = "match-id")]
        match_id: Option<String>,

        /// Frame (minute) at which features are taken
        #[arg(long, default_value_t = 10)]
        minute: usize,

        /// Champion play-rate table; the archetype table is used when absent
        #[arg(long = "champion-roles")]
        champion_roles: Option<PathBuf>,
    },
    /// Build feature rows for every saved match in a directory
    Extract {
        /// Directory holding <id>.json and <id>_timeline.json pairs
        #[arg(long = "matches-dir")]
        matches_dir: PathBuf,

        /// Output file
        #[arg(long)]
        out: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Frame (minute) at which features are taken
        #[arg(long, default_value_t = 10)]
        minute: usize,

        /// Skip matches with fewer timeline frames
        #[arg(long = "min-frames", default_value_t = 11)]
        min_frames: usize,

        /// Keep only matches from this queue (420 = ranked solo)
        #[arg(long = "queue-id")]
        queue_id: Option<i64>,

        /// Champion play-rate table; the archetype table is used when absent
        #[arg(long = "champion-roles")]
        champion_roles: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Parquet,
}

fn load_classifier(path: Option<&Path>) -> Result<Box<dyn RoleClassifier>> {
    match path {
        Some(path) => {
            let classifier = PlayRateClassifier::from_path(path)
                .with_context(|| format!("Failed to load champion roles from {}", path.display()))?;
            info!("Loaded play rates for {} champions", classifier.len());
            Ok(Box::new(classifier))
        }
        None => Ok(Box::new(ArchetypeClassifier)),
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Row {
            timeline,
            summary,
            match_id,
            minute,
            champion_roles,
        } => {
            let classifier = load_classifier(champion_roles.as_deref())?;
            let timeline = Timeline::from_json_str(
                &fs::read_to_string(&timeline)
                    .with_context(|| format!("Failed to read {}", timeline.display()))?,
            )?;
            let summary = MatchSummary::from_json_str(
                &fs::read_to_string(&summary)
                    .with_context(|| format!("Failed to read {}", summary.display()))?,
            )?;

            let row = extract_match_row(
                &timeline,
                &summary,
                classifier.as_ref(),
                Cutoffs::at_frame(minute),
                match_id.as_deref(),
            )?;
            println!("{}", serde_json::to_string_pretty(&row)?);
        }
        Command::Extract {
            matches_dir,
            out,
            format,
            minute,
            min_frames,
            queue_id,
            champion_roles,
        } => {
            let classifier = load_classifier(champion_roles.as_deref())?;
            let options = ExtractOptions {
                cutoffs: Cutoffs::at_frame(minute),
                min_frames,
                queue_id,
            };

            let report = export::extract_rows(&matches_dir, classifier.as_ref(), &options)?;
            match format {
                OutputFormat::Csv => export::write_csv(&report.rows, &out)?,
                OutputFormat::Parquet => export::write_parquet(&report.rows, &out)?,
            }
            info!("Wrote {} rows to {}", report.rows.len(), out.display());
        }
    }

    Ok(())
}

fn main() {
    let args = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(args.command) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
