//! Command-line host for the persistence core.
//!
//! # Responsibility
//! - Drive load, canonical save and diff flows end to end without a UI.
//! - Keep output line-oriented `key=value` text for scripting.

use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;
use monogatari_core::document::assembler::build_document;
use monogatari_core::store::{ensure_extension, PROJECT_EXTENSION};
use monogatari_core::{
    init_logging, load_document, FsProjectStore, LoadedDocument, ProjectStore, Session,
    SnapshotSource, WorkbenchSettings,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "monogatari")]
#[command(about = "Inspect, normalize and compare Monogatari project files")]
#[command(version)]
struct Cli {
    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print block and entity counts of a project file
    Inspect { file: PathBuf },
    /// Rewrite a project file with blocks in canonical order
    Normalize {
        input: PathBuf,
        /// Destination; defaults to rewriting the input
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Report whether two files differ in content, ignoring the save time
    Diff { file: PathBuf, other: PathBuf },
    /// Write a starter project
    New { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let mut settings = match &cli.config {
        Some(path) => WorkbenchSettings::load(path)?,
        None => WorkbenchSettings::default(),
    };
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }
    if let Some(dir) = cli.log_dir {
        settings.log_dir = Some(dir);
    }
    settings.validate()?;
    if let Some(dir) = &settings.log_dir {
        init_logging(&settings.log_level, &dir.to_string_lossy())?;
    }

    let store = FsProjectStore::new();
    match cli.command {
        Command::Inspect { file } => {
            let loaded = load_document(&store.read_text(&file)?);
            print_summary(&loaded);
            Ok(ExitCode::SUCCESS)
        }
        Command::Normalize { input, out } => {
            let loaded = load_document(&store.read_text(&input)?);
            if loaded.is_plain_text() {
                return Err(format!("{} holds no project blocks", input.display()).into());
            }
            let view = loaded
                .project
                .first_chapter_view(loaded.project.book.total_words);
            let text = build_document(&loaded.project, &view, true);
            let target = out.unwrap_or(input);
            store.write_text(&target, &text)?;
            info!("event=cli_normalize module=cli status=ok");
            println!("written={}", target.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Diff { file, other } => {
            let left = snapshot_of(&store, &file)?;
            let right = snapshot_of(&store, &other)?;
            if left == right {
                println!("status=identical");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("status=different");
                Ok(ExitCode::from(1))
            }
        }
        Command::New { file } => {
            let target = store.unique_path(&ensure_extension(&file, extension(&settings)));
            let mut session = Session::new();
            session.new_document();
            session.save_to(&store, &target, Utc::now())?;
            println!("written={}", target.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn extension(settings: &WorkbenchSettings) -> &str {
    if settings.project_extension.is_empty() {
        PROJECT_EXTENSION
    } else {
        &settings.project_extension
    }
}

fn snapshot_of<St: ProjectStore>(store: &St, path: &Path) -> Result<String, Box<dyn Error>> {
    let text = store.read_text(path)?;
    if load_document(&text).is_plain_text() {
        return Err(format!("{} holds no project blocks", path.display()).into());
    }
    let mut session = Session::new();
    session.open_text(&text);
    Ok(session.canonical_snapshot())
}

fn print_summary(loaded: &LoadedDocument) {
    let project = &loaded.project;
    println!("blocks={}", loaded.recognized_blocks);
    println!("plain_text={}", loaded.is_plain_text());
    println!("segments={}", project.chapters.segments.len());
    println!("chapters={}", project.chapters.total_chapters());
    println!("storylines={}", project.outline.storylines.len());
    println!("locations={}", project.world.len());
    println!("characters={}", project.characters.len());
    println!("tags={}", project.book.tags().len());
}
