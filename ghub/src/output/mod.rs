//! Output formatting
//!
//! Commands never print directly. They build a [`CommandResult`] whose stdout
//! is rendered by a [`Printer`] in one of three formats; `main` writes it out
//! and exits with its code.

mod style;
mod table;
mod views;

pub use style::Style;
pub use views::{AuthStatus, ChecksSummary, View};

use anyhow::Result;
use serde_json::Value;

use crate::projection::project_value;

/// How command output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl OutputFormat {
    /// Parse a config value; unknown names fall back to text
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Text,
        }
    }
}

/// What a command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Exit code 1 with an `Error:`-prefixed message
    pub fn failure(message: impl std::fmt::Display) -> Self {
        Self {
            exit_code: 1,
            stdout: String::new(),
            stderr: format!("Error: {}", message),
        }
    }

    /// Attach a status line for stderr
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Renders [`View`]s in the selected format
#[derive(Debug, Clone, Default)]
pub struct Printer {
    format: OutputFormat,
    fields: Option<Vec<String>>,
    style: Style,
}

impl Printer {
    pub fn new(format: OutputFormat, fields: Option<Vec<String>>, style: Style) -> Self {
        Self {
            format,
            fields,
            style,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn render<V: View>(&self, view: &V) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(view.text(&self.style)),
            OutputFormat::Markdown => Ok(view.markdown()),
            OutputFormat::Json => to_json(view.json()?, self.fields.as_deref()),
        }
    }
}

/// Pretty JSON after field projection
pub fn to_json(value: Value, fields: Option<&[String]>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&project_value(value, fields))?)
}
