//! Context-aware tab completion.
//!
//! [`complete`] is a pure function from the text typed so far to the full
//! lines it could become. The command at the start of the line decides the
//! strategy:
//! - no recognized command yet: command names and aliases
//! - a file command (`load`, `save`, `cd`, ...): filesystem entries
//! - a property command (`print`, `set`, `rm`, ...): keys of the document
//!
//! [`ReplCompleter`] adapts it to reedline.

use std::sync::{Arc, Mutex};

use glob::{glob_with, MatchOptions, Pattern};
use reedline::{Completer, Span, Suggestion};
use serde_json::Value;

use dotjson_document::{path, DocumentSession, DottedPath};

use crate::registry::{CommandRegistry, CompletionCategory};

/// Something that can list the keys of the object at a path.
pub trait KeySource {
    /// Keys in document order. Unknown paths and non-objects have none.
    fn keys_at(&self, path: &DottedPath) -> Vec<String>;
}

impl KeySource for Value {
    fn keys_at(&self, path: &DottedPath) -> Vec<String> {
        path::keys_of(self, path)
            .map(|entries| entries.into_iter().map(|entry| entry.key).collect())
            .unwrap_or_default()
    }
}

impl KeySource for DocumentSession {
    fn keys_at(&self, path: &DottedPath) -> Vec<String> {
        self.tree().keys_at(path)
    }
}

impl<T: KeySource> KeySource for Option<T> {
    fn keys_at(&self, path: &DottedPath) -> Vec<String> {
        self.as_ref()
            .map(|source| source.keys_at(path))
            .unwrap_or_default()
    }
}

/// Every full line that `line` could be completed to, in discovery order.
pub fn complete(line: &str, registry: &CommandRegistry, keys: &dyn KeySource) -> Vec<String> {
    if let Some((command, rest)) = line.split_once(' ') {
        if let Some(spec) = registry.lookup(command) {
            let prefix = format!("{} ", command);
            return match spec.completion {
                CompletionCategory::FilePath => complete_files(&prefix, rest),
                CompletionCategory::PropertyKey => complete_keys(&prefix, rest, keys),
                CompletionCategory::None => Vec::new(),
            };
        }
    }

    registry
        .names()
        .filter(|name| name.starts_with(line))
        .map(String::from)
        .collect()
}

/// The `state`-th completion of `line`, or `None` once they run out.
pub fn complete_nth(
    line: &str,
    state: usize,
    registry: &CommandRegistry,
    keys: &dyn KeySource,
) -> Option<String> {
    complete(line, registry, keys).into_iter().nth(state)
}

fn complete_keys(prefix: &str, rest: &str, keys: &dyn KeySource) -> Vec<String> {
    let (parent, partial, stem) = match rest.rsplit_once('.') {
        Some((parent, partial)) => (parent, partial, format!("{}{}.", prefix, parent)),
        None => ("", rest, prefix.to_string()),
    };

    keys.keys_at(&DottedPath::parse(parent))
        .into_iter()
        .filter(|key| key.starts_with(partial))
        .map(|key| format!("{}{}", stem, key))
        .collect()
}

fn complete_files(prefix: &str, rest: &str) -> Vec<String> {
    let pattern = format!("{}*", Pattern::escape(rest));
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    match glob_with(&pattern, options) {
        Ok(paths) => paths
            .filter_map(Result::ok)
            .map(|path| {
                let mut candidate = format!("{}{}", prefix, path.display());
                if path.is_dir() {
                    candidate.push('/');
                }
                candidate
            })
            .collect(),
        Err(e) => {
            tracing::debug!(%pattern, error = %e, "invalid completion pattern");
            Vec::new()
        }
    }
}

/// Document tree shared between the REPL loop and the line editor.
///
/// The line editor owns its completer, so the loop publishes a copy of the
/// tree here whenever the document changes.
#[derive(Debug, Clone, Default)]
pub struct SharedDocument(Arc<Mutex<Option<Value>>>);

impl SharedDocument {
    pub fn replace(&self, tree: Option<Value>) {
        match self.0.lock() {
            Ok(mut guard) => *guard = tree,
            Err(poisoned) => *poisoned.into_inner() = tree,
        }
    }
}

impl KeySource for SharedDocument {
    fn keys_at(&self, path: &DottedPath) -> Vec<String> {
        match self.0.lock() {
            Ok(guard) => guard.keys_at(path),
            Err(_) => Vec::new(),
        }
    }
}

/// Reedline completer backed by [`complete`].
pub struct ReplCompleter {
    registry: &'static CommandRegistry,
    document: SharedDocument,
}

impl ReplCompleter {
    pub fn new(document: SharedDocument) -> Self {
        Self {
            registry: CommandRegistry::standard(),
            document,
        }
    }
}

impl Completer for ReplCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let typed = line.get(..pos).unwrap_or(line);
        let end = typed.len();

        complete(typed, self.registry, &self.document)
            .into_iter()
            .map(|value| Suggestion {
                description: command_description(self.registry, &value),
                value,
                style: None,
                extra: None,
                span: Span::new(0, end),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}

fn command_description(registry: &CommandRegistry, candidate: &str) -> Option<String> {
    let spec = registry.lookup(candidate)?;
    spec.summary.lines().next().map(String::from)
}
