//! CLI error types.

use std::path::PathBuf;

use md2backlog_config::ConfigError;
use md2backlog_renderer::ConvertError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read input file {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read stdin: {0}")]
    ReadStdin(std::io::Error),

    #[error("Input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Failed to convert: {0}")]
    Convert(#[from] ConvertError),

    #[error("Failed to write output file {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write stdout: {0}")]
    WriteStdout(std::io::Error),
}
