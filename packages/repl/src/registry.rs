//! The command table and line dispatch.
//!
//! Every command is described once by a [`CommandSpec`]: its name and
//! aliases, how many arguments it takes, its help text, which completion
//! strategy applies to its arguments, and the handler that runs it. The
//! standard table is built on first use and never changes afterwards.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use nu_ansi_term::Style;

use crate::commands::{self, CommandError, CommandResult, Outcome};
use crate::context::ShellContext;
use crate::tokenizer::{tokenize, TokenizeError};

/// A command implementation. Receives the arguments after the command name.
///
/// Handlers run only after the arity check, so they may index `args` freely.
/// The registry is the one that dispatched the line.
pub type Handler =
    fn(&mut ShellContext, &CommandRegistry, &[String]) -> Result<Outcome, CommandError>;

/// Number of arguments a command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Inclusive bounds.
    Range(usize, usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::Range(min, max) => (min..=max).contains(&count),
        }
    }
}

/// Which completion strategy applies to a command's arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionCategory {
    None,
    FilePath,
    PropertyKey,
}

/// Static description of one command.
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub arity: Arity,
    pub usage: &'static str,
    pub summary: &'static str,
    pub completion: CompletionCategory,
    pub handler: Handler,
}

const HELP_INDENT: usize = 16;

impl CommandSpec {
    /// The primary name followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        let aliases: &'static [&'static str] = self.aliases;
        std::iter::once(self.name).chain(aliases.iter().copied())
    }

    /// Help block for this command, one name per line, then the summary and
    /// usage indented beneath.
    pub fn help_text(&self) -> String {
        let names: Vec<&str> = self.names().collect();
        let mut text = String::new();
        for name in &names[..names.len() - 1] {
            text.push_str(&format!("  {}\n", name));
        }
        let last = names[names.len() - 1];

        let mut lines = self.summary.lines();
        let first = lines.next().unwrap_or_default();
        text.push_str(&format!("  {:<width$}{}", last, first, width = HELP_INDENT - 2));
        for line in lines {
            text.push_str(&format!("\n{:width$}{}", "", line, width = HELP_INDENT));
        }
        text.push_str(&format!(
            "\n{:width$}Usage: {}",
            "",
            self.usage,
            width = HELP_INDENT
        ));
        text
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("arity", &self.arity)
            .field("completion", &self.completion)
            .finish_non_exhaustive()
    }
}

/// Failures that stop a line before or while its handler runs.
#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("{0}")]
    Tokenize(#[from] TokenizeError),

    #[error("Unrecognized command")]
    Unrecognized(String),

    #[error("An incorrect number of arguments were supplied.\n{help}")]
    Arity { help: String },

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl From<Result<Outcome, DispatchError>> for CommandResult {
    fn from(result: Result<Outcome, DispatchError>) -> Self {
        match result {
            Ok(Outcome::Done) => CommandResult::ok_none(),
            Ok(Outcome::Display(text)) => CommandResult::ok_display(text),
            Ok(Outcome::Exit) => CommandResult::Exit,
            Err(e) => {
                tracing::debug!(error = %e, "command failed");
                CommandResult::Error(e.to_string())
            }
        }
    }
}

/// Lookup table from every command name and alias to its spec.
#[derive(Debug)]
pub struct CommandRegistry {
    specs: Vec<CommandSpec>,
    index: HashMap<&'static str, usize>,
    names: Vec<&'static str>,
}

lazy_static! {
    static ref STANDARD: CommandRegistry = CommandRegistry::new(commands::standard_commands());
}

impl CommandRegistry {
    /// Build a registry. Later specs never shadow names claimed earlier.
    pub fn new(specs: Vec<CommandSpec>) -> Self {
        let mut index = HashMap::new();
        let mut names = Vec::new();
        for (position, spec) in specs.iter().enumerate() {
            for name in spec.names() {
                if index.contains_key(name) {
                    tracing::warn!(name, "duplicate command name ignored");
                    continue;
                }
                index.insert(name, position);
                names.push(name);
            }
        }
        Self {
            specs,
            index,
            names,
        }
    }

    /// The built-in command table.
    pub fn standard() -> &'static CommandRegistry {
        &STANDARD
    }

    pub fn lookup(&self, name: &str) -> Option<&CommandSpec> {
        self.index.get(name).map(|&position| &self.specs[position])
    }

    pub fn specs(&self) -> &[CommandSpec] {
        &self.specs
    }

    /// Every command name and alias in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    /// Help for one command, or for every command sorted by primary name.
    pub fn help(&self, topic: Option<&str>) -> Result<String, CommandError> {
        if let Some(topic) = topic {
            return self
                .lookup(topic)
                .map(CommandSpec::help_text)
                .ok_or_else(|| CommandError::UnknownHelpTopic(topic.to_string()));
        }

        let mut specs: Vec<&CommandSpec> = self.specs.iter().collect();
        specs.sort_by_key(|spec| spec.name);

        let mut help = format!("{}\n\n", Style::new().bold().paint("Commands"));
        let blocks: Vec<String> = specs.iter().map(|spec| spec.help_text()).collect();
        help.push_str(&blocks.join("\n\n"));
        Ok(help)
    }

    /// Run one input line against `ctx`.
    pub fn dispatch(&self, line: &str, ctx: &mut ShellContext) -> CommandResult {
        self.try_dispatch(line, ctx).into()
    }

    /// Like [`dispatch`](Self::dispatch), but keeps the error structured.
    pub fn try_dispatch(&self, line: &str, ctx: &mut ShellContext) -> Result<Outcome, DispatchError> {
        let tokens = tokenize(line)?;
        let Some((name, args)) = tokens.split_first() else {
            return Ok(Outcome::Done);
        };

        let spec = self
            .lookup(name)
            .ok_or_else(|| DispatchError::Unrecognized(name.clone()))?;

        if !spec.arity.accepts(args.len()) {
            return Err(DispatchError::Arity {
                help: spec.help_text(),
            });
        }

        tracing::debug!(command = spec.name, ?args, "dispatching");
        Ok((spec.handler)(ctx, self, args)?)
    }
}
