//! Markdown to Backlog conversion command.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Args;
use md2backlog_config::{CliSettings, Config};
use md2backlog_renderer::Converter;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the conversion.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Input Markdown file (default: stdin).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover md2backlog.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable GitHub Flavored Markdown extensions (overrides config).
    #[arg(long)]
    no_gfm: bool,

    /// End non-empty output with a newline (overrides config).
    #[arg(long)]
    trailing_newline: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Execute the conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading, conversion or writing fails.
    pub(crate) fn execute(self, ui: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Using configuration file");
        }

        let markdown = self.read_input()?;
        let mut notation = Converter::new()
            .gfm(config.convert.gfm)
            .convert(&markdown)?;
        if config.output.trailing_newline && !notation.is_empty() {
            notation.push('\n');
        }
        tracing::info!(
            input_bytes = markdown.len(),
            output_bytes = notation.len(),
            "Converted markdown"
        );

        self.write_output(&notation)?;
        if self.verbose
            && let Some(path) = &self.output
        {
            ui.success(&format!("Wrote {}", path.display()));
        }
        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            gfm: self.no_gfm.then_some(false),
            trailing_newline: self.trailing_newline.then_some(true),
        }
    }

    fn read_input(&self) -> Result<String, CliError> {
        let bytes = if let Some(path) = &self.input {
            fs::read(path).map_err(|source| CliError::ReadInput {
                path: path.clone(),
                source,
            })?
        } else {
            let mut buffer = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buffer)
                .map_err(CliError::ReadStdin)?;
            buffer
        };
        Ok(String::from_utf8(bytes)?)
    }

    fn write_output(&self, notation: &str) -> Result<(), CliError> {
        if let Some(path) = &self.output {
            return fs::write(path, notation).map_err(|source| CliError::WriteOutput {
                path: path.clone(),
                source,
            });
        }
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(notation.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(CliError::WriteStdout)
    }
}
