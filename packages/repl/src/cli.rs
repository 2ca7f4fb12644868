//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Interactive editor for JSON configuration files
#[derive(Parser, Debug)]
#[command(name = "dotjson")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file to load on startup
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Text shown before every command
    #[arg(short = 'p', long, value_name = "TEXT", default_value = ">>>")]
    pub prompt: String,

    /// Command to run before the interactive session (repeatable)
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    pub commands: Vec<String>,

    /// Keep keys in file order instead of sorting them on load
    #[arg(long)]
    pub unsorted: bool,

    /// Log command dispatch to stderr
    #[arg(long)]
    pub debug: bool,

    /// Force vi editing mode
    #[arg(long, conflicts_with = "emacs")]
    pub vi: bool,

    /// Force emacs editing mode
    #[arg(long)]
    pub emacs: bool,
}
