use crate::error::{PgChiselError, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// One choice in a selection prompt.
#[derive(Debug, Clone)]
pub struct SelectItem {
    pub label: String,
    pub description: String,
}

impl SelectItem {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Sequential single-value prompts. `Ok(None)` always means the user
/// cancelled; callers treat it as an abort of the whole in-progress command.
pub trait Prompter {
    /// Asks for one line of input, pre-filled with `default` when given.
    /// An empty answer counts as cancellation.
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>>;

    /// Asks for a secret without echoing it.
    fn password(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Asks the user to pick one item; returns its index.
    fn select(&mut self, prompt: &str, items: &[SelectItem]) -> Result<Option<usize>>;
}

/// Terminal prompter: readline input with editable defaults, masked
/// password entry, and a numbered list for selections.
pub struct TerminalPrompter {
    editor: DefaultEditor,
}

impl TerminalPrompter {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| PgChiselError::Prompt(e.to_string()))?;
        Ok(Self { editor })
    }

    fn read_line(&mut self, prompt: &str, initial: &str) -> Result<Option<String>> {
        let outcome = self
            .editor
            .readline_with_initial(prompt, (initial, ""));
        match outcome {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(line))
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(PgChiselError::Prompt(e.to_string())),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        self.read_line(&format!("{}: ", prompt), default.unwrap_or(""))
    }

    fn password(&mut self, prompt: &str) -> Result<Option<String>> {
        match rpassword::prompt_password(format!("{}: ", prompt)) {
            Ok(password) => {
                if password.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(password))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(PgChiselError::Prompt(e.to_string())),
        }
    }

    fn select(&mut self, prompt: &str, items: &[SelectItem]) -> Result<Option<usize>> {
        if items.is_empty() {
            return Ok(None);
        }
        println!("{}", prompt);
        for (i, item) in items.iter().enumerate() {
            if item.description == item.label || item.description.is_empty() {
                println!("{:>3}. {}", i + 1, item.label);
            } else {
                println!("{:>3}. {} {}", i + 1, item.label, item.description.dimmed());
            }
        }

        loop {
            let Some(answer) = self.read_line("> ", "")? else {
                return Ok(None);
            };
            if let Ok(n) = answer.parse::<usize>() {
                if n >= 1 && n <= items.len() {
                    return Ok(Some(n - 1));
                }
            }
            if let Some(i) = items.iter().position(|item| item.label == answer) {
                return Ok(Some(i));
            }
            println!(
                "{}",
                format!("enter a number between 1 and {}", items.len()).yellow()
            );
        }
    }
}
