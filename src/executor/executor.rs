use std::io::{self, Write};

use nix::errno::Errno;
use thiserror::Error;

use crate::ast::Command;
use super::status::ProcessStatus;

pub type ExecStatus = Result<ExecOutcome, ExecError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("fork failed: {0}")]
    Fork(Errno),
    #[error("cannot open {path} for {mode}: {source}")]
    Redirect {
        path: String,
        mode: &'static str,
        source: Errno,
    },
    #[error("dup2 failed: {0}")]
    Dup(Errno),
    #[error("invalid command: \"{0}\"")]
    InvalidCommand(String),
    #[error("argument contains a NUL byte: {0:?}")]
    NulByte(String),
    #[error("signal setup failed: {0}")]
    Signal(Errno),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ExecError {
    /// Errors that end the interpreter rather than just the current line.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExecError::Fork(_) | ExecError::Signal(_) | ExecError::Io(_))
    }
}

/// Runs commands that are not built-ins and collects finished children.
pub trait Executor {
    fn run(
        &mut self,
        cmd: &Command,
        status: &mut ProcessStatus,
        out: &mut dyn Write,
    ) -> Result<(), ExecError>;

    /// Non-blocking pass over every finished child.
    fn reap(&mut self, status: &mut ProcessStatus, out: &mut dyn Write) -> Result<(), ExecError>;
}
