//! Platform-independent REPL core.
//!
//! This module contains the main REPL logic, which interacts only through
//! the `IoHost` trait. The same core runs against the terminal and against
//! the scripted host used in tests.

pub mod interrupt;

pub use interrupt::{InterruptAction, InterruptState, INTERRUPT_WARNING};

use std::path::PathBuf;

use dotjson_document::DocumentError;

use crate::commands::{self, CommandError, CommandResult, Outcome};
use crate::config::ShellConfig;
use crate::context::ShellContext;
use crate::io::{ExitReason, IoError, IoHost, Output, PromptConfig, Signal};
use crate::registry::{CommandRegistry, DispatchError};

const GOODBYE: &str = "Goodbye";
const LOAD_FAILED: &str = "Error loading file, exiting.";

/// The platform-independent REPL core.
pub struct ReplCore {
    ctx: ShellContext,
    registry: &'static CommandRegistry,
    prompt: String,
    file: Option<PathBuf>,
    startup_commands: Vec<String>,
    interrupt: InterruptState,
    synced: Option<(u64, u64)>,
}

impl ReplCore {
    pub fn new(ctx: ShellContext, config: &ShellConfig) -> Self {
        Self {
            ctx,
            registry: CommandRegistry::standard(),
            prompt: config.prompt.clone(),
            file: config.file.clone(),
            startup_commands: config.startup_commands.clone(),
            interrupt: InterruptState::default(),
            synced: None,
        }
    }

    /// Load the startup file, run the startup commands, then the interactive
    /// loop.
    ///
    /// Returns the reason for exiting. A document that fails to load before
    /// the loop starts ends the run with [`ExitReason::LoadFailed`]. Host
    /// failures end the loop as errors.
    pub fn run(&mut self, io: &mut impl IoHost) -> Result<ExitReason, IoError> {
        io.write_output(Output::banner(banner()))?;

        if let Some(file) = self.file.take() {
            tracing::debug!(path = %file.display(), "startup file");
            let result =
                commands::load_document(&mut self.ctx, &file).map_err(DispatchError::from);
            if let Some(reason) = self.report_startup(result, io)? {
                return Ok(reason);
            }
        }

        let startup = std::mem::take(&mut self.startup_commands);
        for line in &startup {
            tracing::debug!(%line, "startup command");
            let result = self.registry.try_dispatch(line, &mut self.ctx);
            if let Some(reason) = self.report_startup(result, io)? {
                return Ok(reason);
            }
        }

        loop {
            self.update_prompt(io)?;
            self.sync_document(io)?;

            io.wait_for_input()?;

            if let Some(signal) = io.read_signal()? {
                match signal {
                    Signal::Eof => {
                        io.write_output(Output::info(GOODBYE))?;
                        io.flush()?;
                        return Ok(ExitReason::Eof);
                    }
                    Signal::Interrupt => match self.interrupt.interrupt() {
                        InterruptAction::Warn => {
                            io.write_output(Output::normal(""))?;
                            io.write_output(Output::info(INTERRUPT_WARNING))?;
                            io.flush()?;
                            continue;
                        }
                        InterruptAction::Quit => {
                            io.write_output(Output::info(GOODBYE))?;
                            io.flush()?;
                            return Ok(ExitReason::Interrupted);
                        }
                    },
                }
            }

            let input = match io.read_input()? {
                Some(input) => input,
                None => continue,
            };

            if input.is_blank() {
                continue;
            }

            self.interrupt.reset();
            let result = self.registry.dispatch(&input.line, &mut self.ctx);
            if self.report(result, io)? {
                return Ok(ExitReason::UserExit);
            }
        }
    }

    pub fn context(&self) -> &ShellContext {
        &self.ctx
    }

    pub fn interrupt_state(&self) -> InterruptState {
        self.interrupt
    }

    /// Report a startup step. Unlike at the prompt, a document that cannot
    /// be loaded here is fatal.
    fn report_startup(
        &self,
        result: Result<Outcome, DispatchError>,
        io: &mut impl IoHost,
    ) -> Result<Option<ExitReason>, IoError> {
        if let Err(DispatchError::Command(CommandError::Document(e))) = &result {
            if e.is_load_error() {
                load_failed(e, io)?;
                return Ok(Some(ExitReason::LoadFailed));
            }
        }

        Ok(self.report(result.into(), io)?.then_some(ExitReason::UserExit))
    }

    /// Write one command result. Returns true on exit.
    fn report(&self, result: CommandResult, io: &mut impl IoHost) -> Result<bool, IoError> {
        match result {
            CommandResult::Ok { display: None } => {}
            CommandResult::Ok {
                display: Some(output),
            } => {
                io.write_output(Output::normal(output))?;
            }
            CommandResult::Error(msg) => {
                io.write_output(Output::error(msg))?;
            }
            CommandResult::Exit => {
                io.write_output(Output::info(GOODBYE))?;
                io.flush()?;
                return Ok(true);
            }
        }

        io.flush()?;
        Ok(false)
    }

    fn update_prompt(&self, io: &mut impl IoHost) -> Result<(), IoError> {
        let source = self.ctx.session().map(|session| session.source());
        io.write_prompt(PromptConfig::for_document(&self.prompt, source))
    }

    fn sync_document(&mut self, io: &mut impl IoHost) -> Result<(), IoError> {
        let stamp = self.ctx.stamp();
        if self.synced == Some(stamp) {
            return Ok(());
        }

        io.sync_document(self.ctx.session().map(|session| session.tree()))?;
        self.synced = Some(stamp);
        Ok(())
    }
}

fn load_failed(error: &DocumentError, io: &mut impl IoHost) -> Result<(), IoError> {
    tracing::debug!(%error, "startup load failed");
    io.write_output(Output::error(LOAD_FAILED))?;
    io.write_output(Output::error(error.to_string()))?;
    io.flush()
}

fn banner() -> String {
    format!(
        "JSON configuration utility version {}",
        env!("CARGO_PKG_VERSION")
    )
}
