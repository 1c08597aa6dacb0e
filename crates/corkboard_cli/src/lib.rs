//! Headless corkboard tooling.
//!
//! # Responsibility
//! - Print seeded layouts as JSON for inspection and UI fixtures.
//! - Replay one drag-and-drop gesture against a seeded layout.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use corkboard_core::{
    default_quotes, init_logging, load_config, load_quotes, title_scripts, BoardConfig,
    BoardService, DragPayload, DropOutcome, LayoutMetrics, NoteList, Position, Script,
    StaticEnvironment, Viewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "corkboard")]
#[command(about = "Corkboard layout CLI")]
pub struct Cli {
    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<String>,
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a scattered layout as JSON.
    Layout {
        #[command(flatten)]
        board: BoardArgs,
    },
    /// Drop one note of a scattered layout and print the result as JSON.
    Drag {
        #[command(flatten)]
        board: BoardArgs,
        #[arg(long)]
        note_id: u32,
        /// Pointer x minus note left edge at drag start.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        grab_x: f64,
        /// Pointer y minus note top edge at drag start.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        grab_y: f64,
        #[arg(long, allow_negative_numbers = true)]
        drop_x: f64,
        #[arg(long, allow_negative_numbers = true)]
        drop_y: f64,
    },
    /// Print CLI version.
    Version,
}

#[derive(Debug, Args)]
struct BoardArgs {
    #[arg(long, default_value_t = 1280.0)]
    width: f64,
    #[arg(long, default_value_t = 800.0)]
    height: f64,
    /// Measured header height; the configured fallback is used when omitted.
    #[arg(long)]
    header_height: Option<f64>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Quote file, one quote per line.
    #[arg(long, value_name = "FILE")]
    quotes: Option<PathBuf>,
    /// JSON board config.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct LayoutOutput<'a> {
    header_title: &'a str,
    header_scripts: Vec<Script>,
    metrics: LayoutMetrics,
    notes: NoteList,
}

#[derive(Debug, Serialize)]
struct DragOutput {
    applied: bool,
    outcome: String,
    notes: NoteList,
}

pub fn run<I, T, W>(args: I, out: &mut W) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let cli = Cli::try_parse_from(args)?;

    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(&cli.log_level, log_dir).context("failed to initialize logging")?;
    }

    match cli.command {
        Commands::Layout { board } => run_layout(&board, out),
        Commands::Drag {
            board,
            note_id,
            grab_x,
            grab_y,
            drop_x,
            drop_y,
        } => {
            let payload = DragPayload::new(note_id, Position::new(grab_x, grab_y));
            run_drag(&board, payload, Position::new(drop_x, drop_y), out)
        }
        Commands::Version => {
            writeln!(out, "{}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
    }
}

fn run_layout<W: Write>(args: &BoardArgs, out: &mut W) -> Result<()> {
    let mut board = build_board(args)?;
    let notes = board.mount();
    let payload = LayoutOutput {
        header_title: board.header_title(),
        header_scripts: title_scripts(board.header_title()),
        metrics: board.metrics(),
        notes,
    };
    write_json(out, &payload)
}

fn run_drag<W: Write>(
    args: &BoardArgs,
    payload: DragPayload,
    pointer: Position,
    out: &mut W,
) -> Result<()> {
    let mut board = build_board(args)?;
    board.mount();
    let outcome = board.drop_payload(payload, pointer);
    let report = DragOutput {
        applied: outcome.is_applied(),
        outcome: describe_outcome(&outcome),
        notes: board.notes(),
    };
    write_json(out, &report)
}

fn build_board(args: &BoardArgs) -> Result<BoardService<StaticEnvironment, StdRng>> {
    let config = match args.config.as_deref() {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config `{}`", path.display()))?,
        None => BoardConfig::default(),
    };
    let quotes = match args.quotes.as_deref() {
        Some(path) => load_quotes(path)
            .with_context(|| format!("failed to load quotes `{}`", path.display()))?,
        None => default_quotes(),
    };
    let valid = |value: f64| value.is_finite() && value >= 0.0;
    if !valid(args.width) || !valid(args.height) {
        anyhow::bail!("--width and --height must be finite and >= 0");
    }

    let env = StaticEnvironment::new(Viewport::new(args.width, args.height), args.header_height);
    Ok(BoardService::new(
        config,
        env,
        StdRng::seed_from_u64(args.seed),
        quotes,
    ))
}

fn describe_outcome(outcome: &DropOutcome) -> String {
    match outcome {
        DropOutcome::Moved { note_id, position } => {
            format!("moved note {note_id} to ({}, {})", position.x, position.y)
        }
        DropOutcome::UnknownNote(id) => format!("unknown note {id}"),
        DropOutcome::Rejected(err) => format!("rejected: {err}"),
        DropOutcome::InvalidPointer => "rejected: pointer is not finite".to_string(),
        DropOutcome::Stale { note_id } => format!("stale drag of note {note_id}"),
    }
}

fn write_json<W: Write, S: Serialize>(out: &mut W, value: &S) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json}")?;
    Ok(())
}
