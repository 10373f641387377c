use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::executor::ExecError;

/// Errors that end the interpreter with status 1.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Exec(#[from] ExecError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
