//! Double-interrupt-to-quit.
//!
//! One Ctrl-C only warns. A second one in a row quits. Running any command
//! in between starts the count over.

/// Where the shell stands with respect to quitting on Ctrl-C.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterruptState {
    #[default]
    Idle,
    ArmedToQuit,
}

/// What the loop should do about an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    Warn,
    Quit,
}

pub const INTERRUPT_WARNING: &str =
    "Press ^C again to close. Running another command resets this.";

impl InterruptState {
    /// Record an interrupt and say how to react to it.
    pub fn interrupt(&mut self) -> InterruptAction {
        match self {
            InterruptState::Idle => {
                *self = InterruptState::ArmedToQuit;
                InterruptAction::Warn
            }
            InterruptState::ArmedToQuit => InterruptAction::Quit,
        }
    }

    /// A command ran.
    pub fn reset(&mut self) {
        *self = InterruptState::Idle;
    }

    pub fn is_armed(&self) -> bool {
        *self == InterruptState::ArmedToQuit
    }
}
