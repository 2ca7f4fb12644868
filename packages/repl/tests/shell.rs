//! End-to-end editing sessions driven through the public API.

use std::collections::VecDeque;
use std::fs;

use clap::Parser;
use dotjson_repl::cli::Args;
use dotjson_repl::commands::CommandResult;
use dotjson_repl::io::{ExitReason, InputLine, IoError, IoHost, Output, PromptConfig, Signal};
use dotjson_repl::{CommandRegistry, ReplCore, ShellConfig, ShellContext};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Host that replays a fixed script and records what the shell prints.
#[derive(Default)]
struct ScriptHost {
    script: VecDeque<Result<String, Signal>>,
    pending: Option<Result<String, Signal>>,
    outputs: Vec<Output>,
}

impl ScriptHost {
    fn new(script: Vec<Result<&str, Signal>>) -> Self {
        Self {
            script: script
                .into_iter()
                .map(|event| event.map(String::from))
                .collect(),
            ..Self::default()
        }
    }

    fn texts(&self) -> Vec<&str> {
        self.outputs.iter().map(|o| o.text.as_str()).collect()
    }
}

impl IoHost for ScriptHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        self.pending = Some(self.script.pop_front().unwrap_or(Err(Signal::Eof)));
        Ok(())
    }

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError> {
        match self.pending.take() {
            Some(Ok(line)) => Ok(Some(InputLine { line })),
            other => {
                self.pending = other;
                Ok(None)
            }
        }
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        match self.pending.take() {
            Some(Err(signal)) => Ok(Some(signal)),
            other => {
                self.pending = other;
                Ok(None)
            }
        }
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        self.outputs.push(output);
        Ok(())
    }

    fn write_prompt(&mut self, _config: PromptConfig) -> Result<(), IoError> {
        Ok(())
    }
}

fn write_doc(dir: &TempDir, name: &str, tree: &Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string(tree).unwrap()).unwrap();
    path
}

#[test]
fn edit_and_save_round_trip() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(
        &dir,
        "app.json",
        &json!({"server": {"port": 80, "host": "localhost"}, "debug": false}),
    );

    let mut ctx = ShellContext::new(true);
    ctx.load(&file).unwrap();
    let registry = CommandRegistry::standard();

    for line in [
        "set server.port 8080",
        "set server.name 'api server'",
        "rm debug",
        "save",
    ] {
        let result = registry.dispatch(line, &mut ctx);
        assert!(!matches!(result, CommandResult::Error(_)), "{line}: {result:?}");
    }

    let written = fs::read_to_string(&file).unwrap();
    assert!(written.ends_with('\n'));
    assert!(written.contains("\n    \"server\": {"));

    let reloaded: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        reloaded,
        json!({"server": {"host": "localhost", "name": "api server", "port": 8080}})
    );
}

#[test]
fn save_as_switches_source() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "a.json", &json!({"k": 1}));
    let copy = dir.path().join("b.json");

    let mut ctx = ShellContext::new(true);
    ctx.load(&file).unwrap();
    let registry = CommandRegistry::standard();

    registry.dispatch(&format!("save {}", copy.display()), &mut ctx);
    registry.dispatch("set k 2", &mut ctx);
    registry.dispatch("save", &mut ctx);

    let original: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    let saved: Value = serde_json::from_str(&fs::read_to_string(&copy).unwrap()).unwrap();
    assert_eq!(original, json!({"k": 1}));
    assert_eq!(saved, json!({"k": 2}));
}

#[test]
fn last_viewed_workflow() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "doc.json", &json!({"db": {"user": "root", "pool": 5}}));

    let mut ctx = ShellContext::new(true);
    ctx.load(&file).unwrap();
    let registry = CommandRegistry::standard();

    registry.dispatch("print db", &mut ctx);
    registry.dispatch("set-last pool 10", &mut ctx);
    assert_eq!(
        registry.dispatch("last", &mut ctx),
        CommandResult::Ok {
            display: Some("db: {\n    \"pool\": 10,\n    \"user\": \"root\"\n}".to_string())
        }
    );

    registry.dispatch("del-last", &mut ctx);
    assert_eq!(ctx.session().unwrap().tree(), &json!({}));
    assert!(matches!(
        registry.dispatch("del-last", &mut ctx),
        CommandResult::Error(_)
    ));
}

#[test]
fn missing_parent_leaves_document_unchanged() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "doc.json", &json!({"a": {}}));

    let mut ctx = ShellContext::new(true);
    ctx.load(&file).unwrap();

    let result = CommandRegistry::standard().dispatch("set a.b.c 5", &mut ctx);
    assert!(matches!(result, CommandResult::Error(_)));
    assert_eq!(ctx.session().unwrap().tree(), &json!({"a": {}}));
}

#[test]
fn scripted_session_through_core() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "cfg.json", &json!({"name": "x"}));

    let mut ctx = ShellContext::new(true);
    ctx.load(&file).unwrap();
    let mut core = ReplCore::new(ctx, &ShellConfig::default());
    let mut host = ScriptHost::new(vec![
        Ok("print name"),
        Err(Signal::Interrupt),
        Ok("set name y"),
        Err(Signal::Interrupt),
        Ok("print name"),
        Ok("quit"),
    ]);

    assert_eq!(core.run(&mut host).unwrap(), ExitReason::UserExit);

    let texts = host.texts();
    assert!(texts.contains(&"\"x\""));
    assert!(texts.contains(&"\"y\""));
    assert_eq!(texts.last(), Some(&"Goodbye"));
}

#[test]
fn double_interrupt_ends_session() {
    let mut core = ReplCore::new(ShellContext::default(), &ShellConfig::default());
    let mut host = ScriptHost::new(vec![
        Err(Signal::Interrupt),
        Err(Signal::Interrupt),
        Ok("help"),
    ]);

    assert_eq!(core.run(&mut host).unwrap(), ExitReason::Interrupted);
}

#[test]
fn command_line_file_then_commands() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "cfg.json", &json!({"port": 80}));
    let file_arg = file.to_string_lossy().into_owned();

    let args = Args::try_parse_from([
        "dotjson",
        "-c",
        "print port",
        file_arg.as_str(),
        "-c",
        "exit",
    ])
    .unwrap();
    let config = ShellConfig::from_args(&args);
    let mut core = ReplCore::new(ShellContext::new(config.sort_mode), &config);
    let mut host = ScriptHost::new(vec![Ok("help")]);

    assert_eq!(core.run(&mut host).unwrap(), ExitReason::UserExit);
    let texts = host.texts();
    assert!(texts[0].starts_with("JSON configuration utility version "));
    assert_eq!(texts[1], format!("Loaded {}", file.display()));
    assert_eq!(&texts[2..], ["80", "Goodbye"]);
}

#[test]
fn unreadable_command_line_file_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let mut config = ShellConfig::default();
    config.file = Some(dir.path().join("missing.json"));
    let mut core = ReplCore::new(ShellContext::default(), &config);
    let mut host = ScriptHost::new(vec![Ok("print port")]);

    let reason = core.run(&mut host).unwrap();

    assert_eq!(reason, ExitReason::LoadFailed);
    assert_eq!(reason.exit_code(), 1);
    assert_eq!(host.texts()[1], "Error loading file, exiting.");
    assert_eq!(host.script.len(), 1);
}
