use clap::{Args, Parser, Subcommand, ValueEnum};

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Parser, Debug)]
#[command(name = "camnotes", about = "Capture, caption, and keep an ordered photo log")]
pub struct Cli {
    /// Directory holding the journal database and media library
    #[arg(
        long,
        global = true,
        default_value = "~/.camnotes",
        env = "CAMNOTES_DATA_DIR"
    )]
    pub data_dir: String,

    /// Album new photos are filed into
    #[arg(long, global = true, default_value = "Camera Notes")]
    pub album: String,

    /// Log level
    #[arg(long, global = true, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a captured photo to the journal
    Add(AddArgs),
    /// List journal entries, newest first
    List,
    /// Replace the caption of an entry
    Caption(CaptionArgs),
    /// Delete an entry and its photo
    Delete(DeleteArgs),
    /// Share an entry's photo
    Share(ShareArgs),
    /// Show journal status
    Status,
    /// Verify that every entry's photo is present
    Verify,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Path of the photo file to add
    pub photo: String,

    /// Caption for the new entry
    #[arg(short, long)]
    pub caption: String,
}

#[derive(Args, Debug)]
pub struct CaptionArgs {
    /// Entry id (a unique prefix is enough)
    pub id: String,

    /// New caption
    pub caption: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Entry id (a unique prefix is enough)
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct ShareArgs {
    /// Entry id (a unique prefix is enough)
    pub id: String,
}
