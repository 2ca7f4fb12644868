//! Terminal host implementation using Reedline.
//!
//! This host provides interactive terminal I/O with:
//! - Readline-style line editing (Vi and Emacs modes)
//! - Tab completion of commands, files and document keys
//! - Syntax highlighting
//! - Command history

use std::borrow::Cow;
use std::io::{self, Write};

use nu_ansi_term::{Color, Style};
use reedline::{
    default_emacs_keybindings, default_vi_insert_keybindings, default_vi_normal_keybindings,
    ColumnarMenu, DefaultHinter, EditMode as ReedlineEditMode, Emacs, KeyCode, KeyModifiers,
    Keybindings, MenuBuilder, Prompt, PromptEditMode, PromptHistorySearch,
    PromptHistorySearchStatus, Reedline, ReedlineEvent, ReedlineMenu, Signal as ReedlineSignal,
    Vi,
};
use serde_json::Value;

use crate::completer::{ReplCompleter, SharedDocument};
use crate::config::{EditMode, ShellConfig};
use crate::highlighter::ReplHighlighter;
use crate::io::{InputLine, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

const HISTORY_SIZE: usize = 1000;

/// Terminal host using Reedline for interactive I/O.
pub struct TerminalHost {
    line_editor: Reedline,
    document: SharedDocument,
    pending_input: Option<InputLine>,
    pending_signal: Option<Signal>,
    current_prompt: PromptConfig,
}

impl TerminalHost {
    pub fn new(config: &ShellConfig) -> io::Result<Self> {
        let document = SharedDocument::default();
        let completer = Box::new(ReplCompleter::new(document.clone()));
        let highlighter = Box::new(ReplHighlighter::new());
        let hinter = Box::new(
            DefaultHinter::default().with_style(Style::new().fg(Color::LightGray).dimmed()),
        );

        let completion_menu = Box::new(
            ColumnarMenu::default()
                .with_name("completion_menu")
                .with_text_style(Style::new().fg(Color::Cyan))
                .with_selected_text_style(Style::new().fg(Color::Black).on(Color::Cyan).bold()),
        );

        let edit_mode: Box<dyn ReedlineEditMode> = match config.edit_mode {
            EditMode::Vi => {
                let mut insert_keybindings = default_vi_insert_keybindings();
                add_completion_binding(&mut insert_keybindings);
                Box::new(Vi::new(insert_keybindings, default_vi_normal_keybindings()))
            }
            EditMode::Emacs => {
                let mut keybindings = default_emacs_keybindings();
                add_completion_binding(&mut keybindings);
                Box::new(Emacs::new(keybindings))
            }
        };

        let mut line_editor = Reedline::create()
            .with_completer(completer)
            .with_highlighter(highlighter)
            .with_hinter(hinter)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(edit_mode);

        if let Some(history_path) = &config.history_path {
            if let Some(parent) = history_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    tracing::warn!(path = %parent.display(), error = %e, "cannot create history directory");
                }
            }
            match reedline::FileBackedHistory::with_file(HISTORY_SIZE, history_path.clone()) {
                Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
                Err(e) => {
                    tracing::warn!(path = %history_path.display(), error = %e, "history disabled")
                }
            }
        }

        Ok(Self {
            line_editor,
            document,
            pending_input: None,
            pending_signal: None,
            current_prompt: PromptConfig::default(),
        })
    }
}

fn add_completion_binding(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
}

impl IoHost for TerminalHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        let prompt = TerminalPrompt::from_config(&self.current_prompt);

        match self.line_editor.read_line(&prompt)? {
            ReedlineSignal::Success(line) => {
                self.pending_input = Some(InputLine { line });
            }
            ReedlineSignal::CtrlC => {
                self.pending_signal = Some(Signal::Interrupt);
            }
            ReedlineSignal::CtrlD => {
                self.pending_signal = Some(Signal::Eof);
            }
        }

        Ok(())
    }

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError> {
        Ok(self.pending_input.take())
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.pending_signal.take())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        let styled = match output.style {
            OutputStyle::Normal => output.text,
            OutputStyle::Error => Color::Red.paint(&output.text).to_string(),
            OutputStyle::Info => Color::Cyan.paint(&output.text).to_string(),
            OutputStyle::Banner => Color::Cyan.paint(&output.text).to_string(),
        };
        println!("{}", styled);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.current_prompt = config;
        Ok(())
    }

    fn sync_document(&mut self, tree: Option<&Value>) -> Result<(), IoError> {
        self.document.replace(tree.cloned());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        io::stdout().flush()?;
        Ok(())
    }
}

/// Prompt implementation for the terminal.
struct TerminalPrompt<'a> {
    config: &'a PromptConfig,
}

impl<'a> TerminalPrompt<'a> {
    fn from_config(config: &'a PromptConfig) -> Self {
        Self { config }
    }
}

impl Prompt for TerminalPrompt<'_> {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.config.prompt)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        match &self.config.document {
            Some(name) => Cow::Owned(Color::DarkGray.paint(name).to_string()),
            None => Cow::Borrowed(""),
        }
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<'_, str> {
        match edit_mode {
            PromptEditMode::Default | PromptEditMode::Emacs => Cow::Borrowed(" "),
            PromptEditMode::Vi(vi_mode) => {
                let indicator = match vi_mode {
                    reedline::PromptViMode::Normal => Color::Blue.bold().paint(" [N]"),
                    reedline::PromptViMode::Insert => Color::Green.bold().paint(" [I]"),
                };
                Cow::Owned(format!("{} ", indicator))
            }
            PromptEditMode::Custom(s) => Cow::Owned(format!("({})> ", s)),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(": ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}
