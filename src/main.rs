//! camnotes: a photo journal for the command line.
//!
//! Captures photos into a local media library, keeps an ordered log of
//! captioned records in SQLite, and hands photos to the platform share
//! flow. The journal loads once per invocation and persists the whole
//! collection after every change.

#![warn(clippy::all)]

mod cli;
mod config;
mod journal;
mod library;
mod share;
mod store;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::Config;
use journal::{PhotoJournal, PhotoRecord, Warning};
use library::FsAssetLibrary;
use share::SystemShare;
use store::SqliteRecordStore;

/// Open the record store and bring up a loaded journal.
async fn open_journal(config: &Config) -> anyhow::Result<PhotoJournal> {
    tokio::fs::create_dir_all(&config.data_dir).await?;
    let store = SqliteRecordStore::open(&config.db_path()).await?;

    let mut journal = PhotoJournal::new(
        Arc::new(store),
        Arc::new(FsAssetLibrary::new(config.media_dir())),
        Arc::new(SystemShare),
        config.album_name.clone(),
    );
    journal.load().await?;
    Ok(journal)
}

/// Resolve a user-supplied id or id prefix to a record.
fn resolve_id<'a>(journal: &'a PhotoJournal, id: &str) -> anyhow::Result<&'a PhotoRecord> {
    if let Some(record) = journal.get(id) {
        return Ok(record);
    }

    let matches: Vec<&PhotoRecord> = journal
        .records()
        .iter()
        .filter(|r| r.id.starts_with(id))
        .collect();
    match matches.len() {
        0 => anyhow::bail!("No entry with id '{}'", id),
        1 => Ok(matches[0]),
        n => anyhow::bail!(
            "Id '{}' is ambiguous ({} entries match), use more characters",
            id,
            n
        ),
    }
}

/// Print operation warnings to stderr.
fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}

/// Run the add command.
async fn run_add(config: &Config, args: cli::AddArgs) -> anyhow::Result<()> {
    if !Path::new(&args.photo).exists() {
        anyhow::bail!("Photo file not found: {}", args.photo);
    }

    let mut journal = open_journal(config).await?;
    let outcome = journal.add(&args.photo, &args.caption).await?;
    print_warnings(&outcome.warnings);
    println!("Added {}: {}", outcome.record.id, outcome.record.caption);
    Ok(())
}

/// Run the list command.
async fn run_list(config: &Config) -> anyhow::Result<()> {
    let journal = open_journal(config).await?;
    let records = journal.records();

    if records.is_empty() {
        println!("No photos yet. Capture one with `camnotes add`.");
        return Ok(());
    }

    println!("{} photo(s), newest first:", records.len());
    println!();
    for record in records {
        println!("{}  {}", record.id, record.caption);
        println!(
            "    taken {}   {}",
            record.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            record.uri
        );
    }
    Ok(())
}

/// Run the caption command.
async fn run_caption(config: &Config, args: cli::CaptionArgs) -> anyhow::Result<()> {
    let mut journal = open_journal(config).await?;
    let id = resolve_id(&journal, &args.id)?.id.clone();

    let outcome = journal.update_caption(&id, &args.caption).await?;
    print_warnings(&outcome.warnings);
    match outcome.record {
        Some(record) => println!("Updated {}: {}", record.id, record.caption),
        None => println!("No entry with id '{}'", id),
    }
    Ok(())
}

/// Run the delete command.
async fn run_delete(config: &Config, args: cli::DeleteArgs) -> anyhow::Result<()> {
    let mut journal = open_journal(config).await?;
    let record = resolve_id(&journal, &args.id)?;
    let id = record.id.clone();

    if !args.yes {
        println!("This will delete the photo and its journal entry:");
        println!("  {}  {}", record.id, record.caption);
        println!();
        print!("Are you sure? [y/N] ");
        use std::io::Write;
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let outcome = journal.delete(&id).await?;
    print_warnings(&outcome.warnings);
    match outcome.record {
        Some(record) => println!("Deleted {}.", record.id),
        None => println!("No entry with id '{}'", id),
    }
    Ok(())
}

/// Run the share command.
async fn run_share(config: &Config, args: cli::ShareArgs) -> anyhow::Result<()> {
    let journal = open_journal(config).await?;
    let record = resolve_id(&journal, &args.id)?;

    journal.share(&record.uri).await?;
    println!("Shared {}.", record.id);
    Ok(())
}

/// Run the status command.
async fn run_status(config: &Config) -> anyhow::Result<()> {
    let db_path = config.db_path();
    if !db_path.exists() {
        println!("No journal found at {}", db_path.display());
        println!("Add a photo first to create it.");
        return Ok(());
    }

    let journal = open_journal(config).await?;

    println!("Journal: {}", db_path.display());
    println!("Media:   {}", config.media_dir().display());
    println!();
    println!("State:   {}", journal.state());
    println!("Entries: {}", journal.records().len());

    if let Some(newest) = journal.records().first() {
        println!(
            "Newest:  {} ({})",
            newest.caption,
            newest.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    Ok(())
}

/// Run the verify command.
async fn run_verify(config: &Config) -> anyhow::Result<()> {
    let db_path = config.db_path();
    if !db_path.exists() {
        println!("No journal found at {}", db_path.display());
        println!("Add a photo first to create it.");
        return Ok(());
    }

    let journal = open_journal(config).await?;
    let records = journal.records();

    println!("Verifying {} journal entries...", records.len());
    println!();

    let mut missing = 0;
    let mut verified = 0;

    for record in records {
        if Path::new(&record.uri).exists() {
            verified += 1;
        } else {
            println!("MISSING: {} ({})", record.uri, record.id);
            missing += 1;
        }
    }

    println!();
    println!("Results:");
    println!("  Verified: {}", verified);
    println!("  Missing:  {}", missing);

    if missing > 0 {
        std::process::exit(1);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.log_level {
        cli::LogLevel::Debug => "debug",
        cli::LogLevel::Info => "info",
        cli::LogLevel::Warn => "warn",
        cli::LogLevel::Error => "error",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let config = Config::from_cli(&cli);

    match cli.command {
        Command::Add(args) => run_add(&config, args).await,
        Command::List => run_list(&config).await,
        Command::Caption(args) => run_caption(&config, args).await,
        Command::Delete(args) => run_delete(&config, args).await,
        Command::Share(args) => run_share(&config, args).await,
        Command::Status => run_status(&config).await,
        Command::Verify => run_verify(&config).await,
    }
}
