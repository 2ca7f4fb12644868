//! Command handlers and the built-in command table.
//!
//! Commands:
//! - `load FILE` / `save [FILE]` - Read a document from disk, write it back
//! - `print [PROPERTY]` - Display the document or part of it
//! - `keys [PROPERTY]` - List the keys of an object with their types
//! - `set PROPERTY VALUE` / `del PROPERTY` - Edit the document
//! - `last`, `set-last [PROPERTY] VALUE`, `del-last` - Work on the last printed property
//! - `pwd` / `cd PATH` - Inspect and change the working directory
//! - `help [COMMAND]` / `exit`

use std::env;
use std::io;
use std::path::Path;

use dotjson_document::{DocumentError, DocumentSession, DottedPath};

use crate::context::ShellContext;
use crate::registry::{Arity, CommandRegistry, CommandSpec, CompletionCategory};

/// Result of executing a command line, ready for display.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Command succeeded, optionally with output to display
    Ok { display: Option<String> },
    /// Command failed with an error message
    Error(String),
    /// User requested to exit
    Exit,
}

impl CommandResult {
    pub(crate) fn ok_display(display: impl Into<String>) -> Self {
        CommandResult::Ok {
            display: Some(display.into()),
        }
    }

    pub(crate) fn ok_none() -> Self {
        CommandResult::Ok { display: None }
    }
}

/// What a handler asks the shell to do next.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Display(String),
    Exit,
}

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("No document loaded. Use 'load FILE' to open one.")]
    NoDocument,

    #[error("Last viewed is the top level, cannot delete.")]
    LastViewedTopLevel,

    #[error("Working directory error: {0}")]
    WorkingDirectory(#[source] io::Error),

    #[error("Unrecognized command '{0}'. Please type 'help' to see the help for all commands.")]
    UnknownHelpTopic(String),
}

/// The built-in commands, in the order their names are offered for completion.
pub fn standard_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec {
            name: "print",
            aliases: &["view", "cat"],
            arity: Arity::Range(0, 1),
            usage: "print [PROPERTY]",
            summary: "Displays the loaded JSON document. Give it a property path to view a\n\
                      smaller part of the document.",
            completion: CompletionCategory::PropertyKey,
            handler: cmd_print,
        },
        CommandSpec {
            name: "keys",
            aliases: &["ls"],
            arity: Arity::Range(0, 1),
            usage: "keys [PROPERTY]",
            summary: "Displays all the keys at a property path with the type of each value.\n\
                      Without a path the top level keys of the document are shown.",
            completion: CompletionCategory::PropertyKey,
            handler: cmd_keys,
        },
        CommandSpec {
            name: "set",
            aliases: &["edit"],
            arity: Arity::Exact(2),
            usage: "set PROPERTY VALUE",
            summary: "Sets the property to the supplied value. The object that holds the\n\
                      property must already exist.\n\
                      \n\
                      The value is read as JSON when it parses and kept as a string\n\
                      otherwise. To set an object, quote the value and embed quotes with \\\".",
            completion: CompletionCategory::PropertyKey,
            handler: cmd_set,
        },
        CommandSpec {
            name: "del",
            aliases: &["rm"],
            arity: Arity::Exact(1),
            usage: "del PROPERTY",
            summary: "Removes a property from the document. Use \"save\" to keep the change.",
            completion: CompletionCategory::PropertyKey,
            handler: cmd_del,
        },
        CommandSpec {
            name: "last",
            aliases: &["view-last", "print-last"],
            arity: Arity::Exact(0),
            usage: "last",
            summary: "Displays the last property printed.",
            completion: CompletionCategory::None,
            handler: cmd_last,
        },
        CommandSpec {
            name: "set-last",
            aliases: &["edit-last"],
            arity: Arity::Range(1, 2),
            usage: "set-last [PROPERTY] VALUE",
            summary: "Sets the value of the last property printed. Given a property too, it\n\
                      is set as a property of the last printed item.",
            completion: CompletionCategory::None,
            handler: cmd_set_last,
        },
        CommandSpec {
            name: "del-last",
            aliases: &["rm-last"],
            arity: Arity::Exact(0),
            usage: "del-last",
            summary: "Deletes the last property printed.",
            completion: CompletionCategory::None,
            handler: cmd_del_last,
        },
        CommandSpec {
            name: "load",
            aliases: &["open"],
            arity: Arity::Exact(1),
            usage: "load FILE",
            summary: "Opens a file and loads its contents into memory, where it can be\n\
                      worked with.",
            completion: CompletionCategory::FilePath,
            handler: cmd_load,
        },
        CommandSpec {
            name: "save",
            aliases: &["write"],
            arity: Arity::Range(0, 1),
            usage: "save [FILE]",
            summary: "Writes the document back to disk. Given a file, writes there instead\n\
                      and keeps working with that file.",
            completion: CompletionCategory::FilePath,
            handler: cmd_save,
        },
        CommandSpec {
            name: "pwd",
            aliases: &["cwd"],
            arity: Arity::Exact(0),
            usage: "pwd",
            summary: "Shows the present working directory. Paths to files are relative\n\
                      to it.",
            completion: CompletionCategory::None,
            handler: cmd_pwd,
        },
        CommandSpec {
            name: "cd",
            aliases: &[],
            arity: Arity::Exact(1),
            usage: "cd PATH",
            summary: "Changes the present working directory.",
            completion: CompletionCategory::FilePath,
            handler: cmd_cd,
        },
        CommandSpec {
            name: "help",
            aliases: &[],
            arity: Arity::Range(0, 1),
            usage: "help [COMMAND]",
            summary: "Displays help for a command if one is given, or for all commands\n\
                      otherwise.",
            completion: CompletionCategory::None,
            handler: cmd_help,
        },
        CommandSpec {
            name: "exit",
            aliases: &["quit"],
            arity: Arity::Exact(0),
            usage: "exit",
            summary: "Exits the program.",
            completion: CompletionCategory::None,
            handler: cmd_exit,
        },
    ]
}

fn optional_path(args: &[String]) -> DottedPath {
    args.first()
        .map(|text| DottedPath::parse(text))
        .unwrap_or_default()
}

fn cmd_print(
    ctx: &mut ShellContext,
    _registry: &CommandRegistry,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let path = optional_path(args);
    let session = ctx.require_session_mut()?;
    let text = session.serialize(Some(&path))?;
    session.record_last_viewed(path);
    Ok(Outcome::Display(text))
}

fn cmd_keys(
    ctx: &mut ShellContext,
    _registry: &CommandRegistry,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let path = optional_path(args);
    let mut entries = ctx.require_session()?.keys_of(&path)?;
    if entries.is_empty() {
        return Ok(Outcome::Done);
    }

    entries.sort_by(|a, b| a.key.cmp(&b.key));
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            let tag = entry.tag.map(|tag| tag.as_str()).unwrap_or_default();
            format!("{:.<70}{:.>10}", entry.key, tag)
        })
        .collect();
    Ok(Outcome::Display(lines.join("\n")))
}

fn cmd_set(
    ctx: &mut ShellContext,
    _registry: &CommandRegistry,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let path = DottedPath::parse(&args[0]);
    ctx.require_session_mut()?.set(&path, &args[1])?;
    Ok(Outcome::Done)
}

fn cmd_del(
    ctx: &mut ShellContext,
    _registry: &CommandRegistry,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let path = DottedPath::parse(&args[0]);
    ctx.require_session_mut()?.delete(&path)?;
    Ok(Outcome::Done)
}

fn cmd_last(
    ctx: &mut ShellContext,
    _registry: &CommandRegistry,
    _args: &[String],
) -> Result<Outcome, CommandError> {
    let session = ctx.require_session()?;
    let path = session.last_viewed().cloned().unwrap_or_default();
    let text = session.serialize(Some(&path))?;
    if path.is_root() {
        Ok(Outcome::Display(text))
    } else {
        Ok(Outcome::Display(format!("{}: {}", path, text)))
    }
}

fn cmd_set_last(
    ctx: &mut ShellContext,
    _registry: &CommandRegistry,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let session = ctx.require_session_mut()?;
    let base = session.last_viewed().cloned().unwrap_or_default();
    let (target, value) = match args {
        [property, value] => (base.join(&DottedPath::parse(property)), value),
        _ => (base, &args[0]),
    };
    session.set(&target, value)?;
    Ok(Outcome::Done)
}

fn cmd_del_last(
    ctx: &mut ShellContext,
    _registry: &CommandRegistry,
    _args: &[String],
) -> Result<Outcome, CommandError> {
    let target = ctx
        .session()
        .and_then(DocumentSession::last_viewed)
        .filter(|path| !path.is_root())
        .cloned()
        .ok_or(CommandError::LastViewedTopLevel)?;

    let session = ctx.require_session_mut()?;
    session.delete(&target)?;
    session.clear_last_viewed();
    Ok(Outcome::Done)
}

fn cmd_load(
    ctx: &mut ShellContext,
    _registry: &CommandRegistry,
    args: &[String],
) -> Result<Outcome, CommandError> {
    load_document(ctx, Path::new(&args[0]))
}

/// Replace the current document with the one at `source`.
pub(crate) fn load_document(
    ctx: &mut ShellContext,
    source: &Path,
) -> Result<Outcome, CommandError> {
    let session = ctx.load(source)?;
    Ok(Outcome::Display(format!(
        "Loaded {}",
        session.source().display()
    )))
}

fn cmd_save(
    ctx: &mut ShellContext,
    _registry: &CommandRegistry,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let target = args.first().map(Path::new);
    let written = ctx.require_session_mut()?.save(target)?;
    Ok(Outcome::Display(format!("Saved {}", written.display())))
}

fn cmd_pwd(
    _ctx: &mut ShellContext,
    _registry: &CommandRegistry,
    _args: &[String],
) -> Result<Outcome, CommandError> {
    let cwd = env::current_dir().map_err(CommandError::WorkingDirectory)?;
    Ok(Outcome::Display(cwd.display().to_string()))
}

fn cmd_cd(
    _ctx: &mut ShellContext,
    _registry: &CommandRegistry,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let target = &args[0];
    env::set_current_dir(target).map_err(CommandError::WorkingDirectory)?;
    tracing::debug!(path = %target, "changed working directory");
    Ok(Outcome::Done)
}

fn cmd_help(
    _ctx: &mut ShellContext,
    registry: &CommandRegistry,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let topic = args.first().map(String::as_str);
    registry.help(topic).map(Outcome::Display)
}

fn cmd_exit(
    _ctx: &mut ShellContext,
    _registry: &CommandRegistry,
    _args: &[String],
) -> Result<Outcome, CommandError> {
    Ok(Outcome::Exit)
}
