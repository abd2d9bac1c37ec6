//! Output formatting for CLI commands.

use std::io::Write;

use serde::Serialize;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

pub mod table;

pub use table::{Alignment, Column, Table, TableStyle};

/// Values a command prints, in either output format.
pub trait FormattedOutput: Serialize {
    /// Human-readable rendering. `color` enables ANSI styling.
    fn format_text(&self, color: bool) -> String;

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Print `value` to stdout in the context's format.
pub fn print_output<T: FormattedOutput>(ctx: &CommandContext, value: &T) -> Result<(), CliError> {
    write_output(ctx, value, std::io::stdout().lock())
}

/// Write `value` to `writer` in the context's format.
pub fn write_output<T, W>(ctx: &CommandContext, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput,
    W: Write,
{
    let output = match ctx.format {
        OutputFormat::Text => value.format_text(ctx.color),
        OutputFormat::Json => value
            .format_json()
            .map_err(|e| CliError::Other(anyhow::anyhow!("JSON serialization failed: {e}")))?,
    };

    writeln!(writer, "{}", output.trim_end()).map_err(|source| CliError::Io {
        message: format!("failed to write output: {source}"),
        source,
        path: None,
    })?;
    Ok(())
}

/// A one-line confirmation.
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub success: bool,
    pub message: String,
}

impl StatusOutput {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl FormattedOutput for StatusOutput {
    fn format_text(&self, _color: bool) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}

/// Wrap `text` in an ANSI color when `enabled`.
pub fn paint(text: &str, ansi: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{ansi}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}
