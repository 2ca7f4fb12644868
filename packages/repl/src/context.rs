//! Shell state shared by all commands.
//!
//! The shell holds at most one [`DocumentSession`]. Loading a file replaces
//! it only when the load succeeds, so a bad path or malformed file never
//! disturbs the document being edited.

use std::path::Path;

use dotjson_document::{DocumentError, DocumentSession};

use crate::commands::CommandError;

/// Owns the live document session and the settings applied to new loads.
#[derive(Debug)]
pub struct ShellContext {
    session: Option<DocumentSession>,
    sort_mode: bool,
    generation: u64,
}

impl ShellContext {
    pub fn new(sort_mode: bool) -> Self {
        Self {
            session: None,
            sort_mode,
            generation: 0,
        }
    }

    /// Start with an already-built session.
    pub fn with_session(session: DocumentSession) -> Self {
        Self {
            sort_mode: session.sort_mode(),
            session: Some(session),
            generation: 1,
        }
    }

    pub fn sort_mode(&self) -> bool {
        self.sort_mode
    }

    /// Load `source`, replacing the current session on success.
    pub fn load(&mut self, source: impl AsRef<Path>) -> Result<&DocumentSession, DocumentError> {
        let session = DocumentSession::load(source, self.sort_mode)?;
        self.generation += 1;
        Ok(&*self.session.insert(session))
    }

    /// Changes whenever the document is replaced or edited.
    pub fn stamp(&self) -> (u64, u64) {
        let revision = self.session.as_ref().map_or(0, DocumentSession::revision);
        (self.generation, revision)
    }

    pub fn session(&self) -> Option<&DocumentSession> {
        self.session.as_ref()
    }

    /// The loaded session, or [`CommandError::NoDocument`].
    pub fn require_session(&self) -> Result<&DocumentSession, CommandError> {
        self.session.as_ref().ok_or(CommandError::NoDocument)
    }

    pub fn require_session_mut(&mut self) -> Result<&mut DocumentSession, CommandError> {
        self.session.as_mut().ok_or(CommandError::NoDocument)
    }
}

impl Default for ShellContext {
    fn default() -> Self {
        Self::new(true)
    }
}
