use std::fmt;
use std::io::{self, Write};

use nix::sys::wait::WaitStatus;

/// How the last waited-for child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Exited(i32),
    Signaled(i32),
    Unknown,
}

impl Default for ProcessStatus {
    fn default() -> Self {
        ProcessStatus::Exited(0)
    }
}

impl ProcessStatus {
    pub fn is_signaled(&self) -> bool {
        matches!(self, ProcessStatus::Signaled(_))
    }

    /// Writes the status line and flushes.
    pub fn report(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self)?;
        out.flush()
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStatus::Exited(code) => write!(f, "exit value: {}", code),
            ProcessStatus::Signaled(sig) => write!(f, "terminated by signal {}", sig),
            ProcessStatus::Unknown => write!(f, "unknown status"),
        }
    }
}

impl From<WaitStatus> for ProcessStatus {
    fn from(ws: WaitStatus) -> Self {
        match ws {
            WaitStatus::Exited(_, code) => ProcessStatus::Exited(code),
            WaitStatus::Signaled(_, sig, _) => ProcessStatus::Signaled(sig as i32),
            _ => ProcessStatus::Unknown,
        }
    }
}
