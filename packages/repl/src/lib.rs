//! # dotjson-repl
//!
//! An interactive shell for editing JSON configuration files.
//!
//! Properties are addressed by dotted paths such as `server.tls.enabled`.
//! Values typed at the prompt are parsed as JSON when they can be and kept
//! as strings otherwise.
//!
//! ## Features
//!
//! - View, list, set and delete properties by dotted path
//! - Quick edits of the last printed property
//! - Tab completion for commands, file names and document keys
//! - Syntax highlighting of commands and arguments
//! - Vi mode support (detected from EDITOR, .inputrc, or DOTJSON_EDIT_MODE)
//! - Command history
//!
//! ## Usage
//!
//! ```bash
//! dotjson settings.json
//!
//! # Inside the shell:
//! >>> keys server
//! >>> set server.port 8080
//! >>> print server
//! >>> save
//! ```

pub mod cli;
pub mod commands;
pub mod completer;
pub mod config;
pub mod context;
pub mod core;
pub mod highlighter;
pub mod host;
pub mod io;
pub mod logging;
pub mod registry;
pub mod tokenizer;

pub use config::ShellConfig;
pub use context::ShellContext;
pub use crate::core::ReplCore;
pub use registry::CommandRegistry;
