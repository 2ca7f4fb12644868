//! Scripted host for driving the REPL loop in tests.
//!
//! Lines and signals are queued in one script and delivered in order, one
//! per `wait_for_input()`, the way a terminal delivers them. Once the script
//! runs out the host reports end of file so a test can never hang.

use std::collections::VecDeque;

use serde_json::Value;

use super::{InputLine, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

#[derive(Debug)]
enum Event {
    Line(String),
    Signal(Signal),
}

/// Test host with in-memory I/O buffers.
#[derive(Debug, Default)]
pub struct TestHost {
    script: VecDeque<Event>,
    pending_input: Option<InputLine>,
    pending_signal: Option<Signal>,
    output_buffer: Vec<Output>,
    last_prompt: Option<PromptConfig>,
    synced: Vec<Option<Value>>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an input line.
    pub fn queue_input(&mut self, line: impl Into<String>) {
        self.script.push_back(Event::Line(line.into()));
    }

    /// Queue multiple input lines.
    pub fn queue_inputs(&mut self, lines: impl IntoIterator<Item = impl Into<String>>) {
        for line in lines {
            self.queue_input(line);
        }
    }

    /// Queue a signal after any lines queued so far.
    pub fn queue_signal(&mut self, signal: Signal) {
        self.script.push_back(Event::Signal(signal));
    }

    pub fn output(&self) -> &[Output] {
        &self.output_buffer
    }

    /// Output text only, one entry per line.
    pub fn output_text(&self) -> String {
        self.output_buffer
            .iter()
            .map(|o| o.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn output_with_style(&self, style: OutputStyle) -> Vec<&str> {
        self.output_buffer
            .iter()
            .filter(|o| o.style == style)
            .map(|o| o.text.as_str())
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.output_with_style(OutputStyle::Error)
    }

    pub fn last_prompt(&self) -> Option<&PromptConfig> {
        self.last_prompt.as_ref()
    }

    /// Every tree handed to `sync_document()`, oldest first.
    pub fn synced(&self) -> &[Option<Value>] {
        &self.synced
    }

    pub fn has_pending_events(&self) -> bool {
        !self.script.is_empty()
    }
}

impl IoHost for TestHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        match self.script.pop_front() {
            Some(Event::Line(line)) => self.pending_input = Some(InputLine { line }),
            Some(Event::Signal(signal)) => self.pending_signal = Some(signal),
            None => self.pending_signal = Some(Signal::Eof),
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
        self.output_buffer.push(output);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.last_prompt = Some(config);
        Ok(())
    }

    fn sync_document(&mut self, tree: Option<&Value>) -> Result<(), IoError> {
        self.synced.push(tree.cloned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_empty_host() {
        let host = TestHost::new();
        assert!(!host.has_pending_events());
        assert!(host.output().is_empty());
        assert!(host.last_prompt().is_none());
    }

    #[test]
    fn events_delivered_in_queue_order() {
        let mut host = TestHost::new();
        host.queue_input("first");
        host.queue_signal(Signal::Interrupt);
        host.queue_input("second");

        host.wait_for_input().unwrap();
        assert!(host.read_signal().unwrap().is_none());
        assert_eq!(host.read_input().unwrap().unwrap().line, "first");

        host.wait_for_input().unwrap();
        assert_eq!(host.read_signal().unwrap(), Some(Signal::Interrupt));
        assert!(host.read_input().unwrap().is_none());

        host.wait_for_input().unwrap();
        assert_eq!(host.read_input().unwrap().unwrap().line, "second");
    }

    #[test]
    fn exhausted_script_reports_eof() {
        let mut host = TestHost::new();
        host.wait_for_input().unwrap();
        assert_eq!(host.read_signal().unwrap(), Some(Signal::Eof));
    }

    #[test]
    fn queue_inputs_adds_multiple() {
        let mut host = TestHost::new();
        host.queue_inputs(["cmd1", "cmd2", "cmd3"]);
        assert_eq!(host.script.len(), 3);
    }

    #[test]
    fn output_with_style_filters() {
        let mut host = TestHost::new();
        host.write_output(Output::normal("normal")).unwrap();
        host.write_output(Output::error("error")).unwrap();
        host.write_output(Output::info("info")).unwrap();

        assert_eq!(host.errors(), vec!["error"]);
        assert_eq!(host.output_with_style(OutputStyle::Info), vec!["info"]);
        assert_eq!(host.output_text(), "normal\nerror\ninfo");
    }

    #[test]
    fn write_prompt_stores_config() {
        let mut host = TestHost::new();
        host.write_prompt(PromptConfig {
            prompt: ">>>".to_string(),
            document: Some("config.json".to_string()),
        })
        .unwrap();

        let prompt = host.last_prompt().unwrap();
        assert_eq!(prompt.prompt, ">>>");
        assert_eq!(prompt.document.as_deref(), Some("config.json"));
    }

    #[test]
    fn sync_document_records_snapshots() {
        let mut host = TestHost::new();
        host.sync_document(None).unwrap();
        host.sync_document(Some(&serde_json::json!({"a": 1}))).unwrap();
        assert_eq!(host.synced().len(), 2);
        assert!(host.synced()[0].is_none());
    }
}
