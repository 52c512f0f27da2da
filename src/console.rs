//! Console presentation and prompting.
//!
//! Output is rendered as JSON, a rich table, or plain aligned text. The
//! variant is probed once at startup: `--json` wins, a terminal gets the
//! table renderer, piped output degrades to plain text.

use std::io::{self, IsTerminal, Write};

use colored::Colorize;
use comfy_table::Table;

use crate::error::{Error, Result};
use crate::godaddy::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Table,
    Plain,
}

impl OutputMode {
    pub fn detect(json: bool) -> Self {
        if json {
            Self::Json
        } else if io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Plain
        }
    }
}

/// Handle for user-facing output, passed into every operation.
pub struct Console {
    mode: OutputMode,
}

impl Console {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn domains(&self, domains: &[String]) {
        println!("{}", render_domains(self.mode, domains));
    }

    pub fn records(&self, records: &[Record]) {
        println!("{}", render_records(self.mode, records));
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message);
    }

    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", "ℹ".blue().bold(), message);
    }
}

pub fn render_domains(mode: OutputMode, domains: &[String]) -> String {
    match mode {
        OutputMode::Json => json_text(domains),
        _ if domains.is_empty() => "No domains found.".to_string(),
        OutputMode::Table => {
            let mut table = Table::new();
            table.set_header(vec!["DOMAIN"]);
            for domain in domains {
                table.add_row(vec![domain.clone()]);
            }
            table.to_string()
        }
        OutputMode::Plain => domains.join("\n"),
    }
}

pub fn render_records(mode: OutputMode, records: &[Record]) -> String {
    match mode {
        OutputMode::Json => json_text(records),
        _ if records.is_empty() => "No records found.".to_string(),
        OutputMode::Table => {
            let mut table = Table::new();
            table.set_header(vec!["TYPE", "NAME", "DATA", "TTL"]);
            for r in records {
                table.add_row(vec![
                    r.record_type.clone(),
                    r.name.clone(),
                    r.data.clone(),
                    r.ttl.to_string(),
                ]);
            }
            table.to_string()
        }
        OutputMode::Plain => {
            let mut out = format!(
                "{:<6} {:<24} {:<40} {:>6}",
                "TYPE", "NAME", "DATA", "TTL"
            );
            for r in records {
                out.push('\n');
                out.push_str(&format!(
                    "{:<6} {:<24} {:<40} {:>6}",
                    r.record_type, r.name, r.data, r.ttl
                ));
            }
            out
        }
    }
}

fn json_text<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("\"serialization error: {e}\""))
}

/// Interactive input seam. Operations never read stdin directly.
pub trait Prompter {
    fn line(&self, prompt: &str) -> io::Result<String>;

    /// Secret input. Read like a normal line; the prompt text marks it as
    /// sensitive.
    fn secret(&self, prompt: &str) -> io::Result<String> {
        self.line(prompt)
    }

    fn confirm(&self, message: &str) -> io::Result<bool>;
}

pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn line(&self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }

    fn confirm(&self, message: &str) -> io::Result<bool> {
        let answer = self.line(&format!("{} {} [y/N]: ", "?".yellow().bold(), message))?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

/// Shared confirm-or-skip step for mutating operations. `force` bypasses
/// the prompt entirely; a declined prompt becomes [`Error::Cancelled`].
pub fn confirm_or_skip(prompter: &dyn Prompter, description: &str, force: bool) -> Result<()> {
    if force {
        return Ok(());
    }
    if prompter.confirm(description)? {
        Ok(())
    } else {
        Err(Error::Cancelled)
    }
}
