//! The boundary between the REPL loop and the outside world.
//!
//! [`ReplCore`](crate::core::ReplCore) reads lines and signals and writes
//! output only through [`IoHost`]. The terminal host backs it with reedline;
//! tests back it with a scripted [`TestHost`].

pub mod types;

#[cfg(test)]
pub mod test_host;

pub use types::*;

#[cfg(test)]
pub use test_host::TestHost;

use serde_json::Value;

/// A host failure. The loop stops on any of these.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

pub trait IoHost {
    /// Block until the user produces a line or a signal.
    ///
    /// Afterwards exactly one of `read_input()` and `read_signal()` yields
    /// a value.
    fn wait_for_input(&mut self) -> Result<(), IoError>;

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError>;

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError>;

    fn write_output(&mut self, output: Output) -> Result<(), IoError>;

    /// Set the prompt shown for the next read.
    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError>;

    /// Hand over the current document for key completion.
    ///
    /// Called before a read whenever the document was loaded or edited
    /// since the previous call.
    fn sync_document(&mut self, _tree: Option<&Value>) -> Result<(), IoError> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        Ok(())
    }
}
