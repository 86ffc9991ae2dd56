mod display;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use coursegrid_core::{CalendarWindow, Catalog, ScrapeDump, SelectionSet, Snapshot, agenda, layout, normalize};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "coursegrid", version, about = "Normalise registration portal course tables and plan a timetable")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Turn a scrape dump into a snapshot.
    Normalize {
        /// Scrape dump JSON.
        #[arg(long, env = "COURSEGRID_INPUT")]
        input: PathBuf,
        /// Snapshot destination; stdout when omitted.
        #[arg(long, env = "COURSEGRID_OUTPUT")]
        output: Option<PathBuf>,
        /// Write only the semester array.
        #[arg(long)]
        semesters_only: bool,
    },
    /// Print a snapshot's student card, semesters and courses.
    Show {
        #[arg(long, env = "COURSEGRID_SNAPSHOT")]
        snapshot: PathBuf,
    },
    /// Select slots and print the clashes and the weekly grid.
    Timetable {
        #[arg(long, env = "COURSEGRID_SNAPSHOT")]
        snapshot: PathBuf,
        /// `CODE=SLOT`, repeatable. Selecting a course's current slot again removes it.
        #[arg(long = "select", value_parser = parse_selection)]
        select: Vec<(String, String)>,
        /// Start from the slots checked on the portal.
        #[arg(long)]
        preselected: bool,
        #[arg(long, default_value = "08:00", value_parser = parse_clock)]
        window_start: NaiveTime,
        #[arg(long, default_value = "21:30", value_parser = parse_clock)]
        window_end: NaiveTime,
    },
}

fn parse_selection(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((code, slot)) if !code.trim().is_empty() && !slot.trim().is_empty() => {
            Ok((code.trim().to_string(), slot.trim().to_string()))
        }
        _ => Err(format!("expected CODE=SLOT, got {arg:?}")),
    }
}

fn parse_clock(arg: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(arg, "%H:%M").map_err(|e| format!("expected HH:MM, got {arg:?}: {e}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    info!("coursegrid v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Normalize {
            input,
            output,
            semesters_only,
        } => {
            let json = run_normalize(&input, semesters_only)?;
            match output {
                Some(path) => {
                    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "snapshot written");
                }
                None => writeln!(out, "{json}")?,
            }
        }
        Command::Show { snapshot } => {
            let snapshot = load_snapshot(&snapshot)?;
            display::print_snapshot(&mut out, &snapshot)?;
        }
        Command::Timetable {
            snapshot,
            select,
            preselected,
            window_start,
            window_end,
        } => {
            let Some(window) = CalendarWindow::new(window_start, window_end) else {
                bail!("--window-start {window_start} must be before --window-end {window_end}");
            };
            let snapshot = load_snapshot(&snapshot)?;
            let selection = build_selection(&snapshot, preselected, &select);

            display::print_selection(&mut out, &selection)?;
            let chosen = selection.chosen();
            display::print_grid(&mut out, &layout(&chosen, window))?;
            writeln!(out)?;
            display::print_agenda(&mut out, &agenda(&chosen))?;
        }
    }
    Ok(())
}

/// Read a dump and serialise the normalised snapshot.
fn run_normalize(input: &Path, semesters_only: bool) -> anyhow::Result<String> {
    let text = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let dump = ScrapeDump::from_json(&text).with_context(|| format!("parsing {}", input.display()))?;
    let snapshot = normalize(&dump);
    let json = if semesters_only {
        serde_json::to_string_pretty(&snapshot.semesters)?
    } else {
        snapshot.to_json_pretty()?
    };
    Ok(json)
}

fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Snapshot::from_json(&text).with_context(|| format!("parsing snapshot {}", path.display()))
}

/// Apply `--preselected` and then each `--select` in order. Refused
/// selections are logged and skipped.
fn build_selection(snapshot: &Snapshot, preselected: bool, picks: &[(String, String)]) -> SelectionSet {
    let mut selection = if preselected {
        SelectionSet::preselect(&snapshot.semesters, &snapshot.selected_course_ids)
    } else {
        SelectionSet::new()
    };
    let catalog = Catalog::new(&snapshot.semesters);
    for (code, slot) in picks {
        match selection.choose(&catalog, code, slot) {
            Ok(outcome) => info!(code = %code, slot = %slot, ?outcome, "selection"),
            Err(err) => warn!(%err, "selection refused"),
        }
    }
    selection
}
