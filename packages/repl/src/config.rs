//! Shell configuration resolved from the command line and the environment.

use std::path::PathBuf;

use crate::cli::Args;

/// Line-editing keymap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Emacs,
    Vi,
}

/// Everything the shell needs to know before it starts reading input.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Document loaded after the banner and before `startup_commands`.
    pub file: Option<PathBuf>,
    pub prompt: String,
    /// Sort object keys on load.
    pub sort_mode: bool,
    /// Lines run before the interactive loop, in order.
    pub startup_commands: Vec<String>,
    pub edit_mode: EditMode,
    /// Where line history is kept. `None` disables history.
    pub history_path: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            file: None,
            prompt: ">>>".to_string(),
            sort_mode: true,
            startup_commands: Vec::new(),
            edit_mode: EditMode::Emacs,
            history_path: None,
        }
    }
}

impl ShellConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            file: args.file.clone(),
            prompt: args.prompt.clone(),
            sort_mode: !args.unsorted,
            startup_commands: args.commands.clone(),
            edit_mode: detect_edit_mode(args, |key| std::env::var(key).ok()),
            history_path: history_path(),
        }
    }
}

/// `dotjson/history.txt` under the platform's local data directory.
pub fn history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("dotjson").join("history.txt"))
}

/// Pick the edit mode: explicit flags, then `DOTJSON_EDIT_MODE`, then the
/// user's editor, then readline's own setting.
fn detect_edit_mode(args: &Args, env: impl Fn(&str) -> Option<String>) -> EditMode {
    if args.vi {
        return EditMode::Vi;
    }
    if args.emacs {
        return EditMode::Emacs;
    }

    if let Some(mode) = env("DOTJSON_EDIT_MODE") {
        let mode = mode.to_lowercase();
        return if mode == "vi" || mode == "vim" {
            EditMode::Vi
        } else {
            EditMode::Emacs
        };
    }

    for key in ["EDITOR", "VISUAL"] {
        if env(key).is_some_and(|editor| is_vi_editor(&editor)) {
            return EditMode::Vi;
        }
    }

    let inputrc_paths = [
        env("INPUTRC").map(PathBuf::from),
        dirs::home_dir().map(|p| p.join(".inputrc")),
        Some(PathBuf::from("/etc/inputrc")),
    ];
    for path in inputrc_paths.into_iter().flatten() {
        if let Ok(content) = std::fs::read_to_string(&path) {
            if inputrc_enables_vi(&content) {
                return EditMode::Vi;
            }
        }
    }

    EditMode::Emacs
}

fn is_vi_editor(editor: &str) -> bool {
    let editor = editor.to_lowercase();
    let program = editor.rsplit('/').next().unwrap_or(&editor);
    program.contains("vim") || program == "vi"
}

/// True if the inputrc contents contain `set editing-mode vi`.
fn inputrc_enables_vi(content: &str) -> bool {
    content.lines().any(|line| {
        let words: Vec<&str> = line.split_whitespace().collect();
        matches!(words.as_slice(), ["set", "editing-mode", "vi", ..])
    })
}
