use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::registry::{CommandRegistry, CompletionCategory};

/// Syntax highlighter for the REPL
pub struct ReplHighlighter {
    registry: &'static CommandRegistry,
}

impl ReplHighlighter {
    pub fn new() -> Self {
        Self {
            registry: CommandRegistry::standard(),
        }
    }
}

impl Default for ReplHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for ReplHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if line.is_empty() {
            return styled;
        }

        // Find the first whitespace to split command from args
        let (command, rest) = match line.find(char::is_whitespace) {
            Some(pos) => (&line[..pos], &line[pos..]),
            None => (line, ""),
        };

        let spec = self.registry.lookup(command);
        let cmd_style = if spec.is_some() {
            Style::new().bold().fg(Color::Cyan)
        } else {
            Style::new().fg(Color::Red)
        };
        styled.push((cmd_style, command.to_string()));

        if rest.is_empty() {
            return styled;
        }

        match spec.map(|spec| spec.completion) {
            Some(CompletionCategory::PropertyKey) => {
                // Property path first, then an optional value
                let value_start = value_start(rest);
                if value_start < rest.len() {
                    styled.push((Style::new().fg(Color::Yellow), rest[..value_start].to_string()));
                    styled.push((Style::new().fg(Color::Green), rest[value_start..].to_string()));
                } else {
                    styled.push((Style::new().fg(Color::Yellow), rest.to_string()));
                }
            }
            Some(CompletionCategory::FilePath) => {
                styled.push((Style::new().fg(Color::Yellow), rest.to_string()));
            }
            _ => {
                styled.push((Style::new(), rest.to_string()));
            }
        }

        styled
    }
}

/// Byte offset of the second word in `rest`, or `rest.len()` if there is none.
fn value_start(rest: &str) -> usize {
    let path_start = rest.len() - rest.trim_start().len();
    let path_end = rest[path_start..]
        .find(char::is_whitespace)
        .map_or(rest.len(), |i| path_start + i);
    let after_path = &rest[path_end..];
    path_end + (after_path.len() - after_path.trim_start().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_creates_same_as_new() {
        let default: ReplHighlighter = Default::default();
        let new = ReplHighlighter::new();
        assert!(std::ptr::eq(default.registry, new.registry));
    }

    #[test]
    fn highlight_empty_returns_empty() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("", 0);
        assert!(styled.buffer.is_empty());
    }

    #[test]
    fn highlight_recognized_command_only() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("help", 0);
        assert_eq!(styled.buffer.len(), 1);
        assert_eq!(styled.buffer[0].1, "help");
        assert_eq!(styled.buffer[0].0.foreground, Some(Color::Cyan));
        assert!(styled.buffer[0].0.is_bold);
    }

    #[test]
    fn highlight_unknown_command() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("unknown", 0);
        assert_eq!(styled.buffer.len(), 1);
        assert_eq!(styled.buffer[0].0.foreground, Some(Color::Red));
    }

    #[test]
    fn highlight_aliases_as_commands() {
        let highlighter = ReplHighlighter::new();
        for alias in ["cat", "view", "rm", "edit", "quit", "rm-last", "cwd"] {
            let styled = highlighter.highlight(alias, 0);
            assert_eq!(styled.buffer[0].0.foreground, Some(Color::Cyan), "{}", alias);
        }
    }

    #[test]
    fn highlight_print_with_path() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("print server.port", 0);
        assert_eq!(styled.buffer.len(), 2);
        assert_eq!(styled.buffer[1].1, " server.port");
        assert_eq!(styled.buffer[1].0.foreground, Some(Color::Yellow));
    }

    #[test]
    fn highlight_set_with_value() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("set server.port 8080", 0);
        assert_eq!(styled.buffer.len(), 3);
        assert_eq!(styled.buffer[0].1, "set");
        assert_eq!(styled.buffer[1].1, " server.port ");
        assert_eq!(styled.buffer[1].0.foreground, Some(Color::Yellow));
        assert_eq!(styled.buffer[2].1, "8080");
        assert_eq!(styled.buffer[2].0.foreground, Some(Color::Green));
    }

    #[test]
    fn highlight_set_with_quoted_object() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("set limits '{\"cpu\": 2}'", 0);
        assert_eq!(styled.buffer.len(), 3);
        assert_eq!(styled.buffer[2].1, "'{\"cpu\": 2}'");
    }

    #[test]
    fn highlight_set_with_trailing_space() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("set a.b ", 0);
        assert_eq!(styled.buffer.len(), 2);
        assert_eq!(styled.buffer[1].1, " a.b ");
    }

    #[test]
    fn highlight_load_with_file() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("load ./config.json", 0);
        assert_eq!(styled.buffer.len(), 2);
        assert_eq!(styled.buffer[1].0.foreground, Some(Color::Yellow));
    }

    #[test]
    fn highlight_help_with_args() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("help set", 0);
        assert_eq!(styled.buffer.len(), 2);
        assert_eq!(styled.buffer[1].1, " set");
        assert_eq!(styled.buffer[1].0.foreground, None);
    }

    #[test]
    fn value_start_offsets() {
        assert_eq!(value_start(" a.b 5"), 5);
        assert_eq!(value_start(" a.b"), 4);
        assert_eq!(value_start("  a   b"), 6);
    }
}
