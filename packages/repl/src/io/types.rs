//! Values exchanged between the REPL core and its host.

use std::path::Path;

/// One line typed by the user, without the trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub line: String,
}

impl InputLine {
    /// Blank lines are ignored by the loop.
    pub fn is_blank(&self) -> bool {
        self.line.trim().is_empty()
    }
}

/// Key presses that end a read without producing a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Ctrl-C
    Interrupt,
    /// Ctrl-D
    Eof,
}

/// How a host should present a piece of output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// Command results, printed as is.
    #[default]
    Normal,
    Error,
    /// Messages from the shell itself rather than a command.
    Info,
    Banner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub style: OutputStyle,
}

impl Output {
    pub fn new(style: OutputStyle, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn normal(text: impl Into<String>) -> Self {
        Self::new(OutputStyle::Normal, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(OutputStyle::Error, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(OutputStyle::Info, text)
    }

    pub fn banner(text: impl Into<String>) -> Self {
        Self::new(OutputStyle::Banner, text)
    }
}

/// What to show before the next line is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptConfig {
    pub prompt: String,
    /// File name of the loaded document, if any.
    pub document: Option<String>,
}

impl PromptConfig {
    /// Prompt naming the file at `source` by its last component.
    pub fn for_document(prompt: &str, source: Option<&Path>) -> Self {
        Self {
            prompt: prompt.to_string(),
            document: source
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned()),
        }
    }
}

/// Why the REPL loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `exit` or `quit`
    UserExit,
    /// Ctrl-C twice in a row
    Interrupted,
    /// Ctrl-D
    Eof,
    /// The document named at startup could not be read or parsed
    LoadFailed,
}

impl ExitReason {
    /// Process exit status for this reason.
    pub fn exit_code(self) -> i32 {
        match self {
            ExitReason::LoadFailed => 1,
            ExitReason::UserExit | ExitReason::Interrupted | ExitReason::Eof => 0,
        }
    }
}
