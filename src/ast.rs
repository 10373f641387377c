use std::ffi::CString;

use crate::executor::ExecError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Blank,
    Comment,
    Simple,
}

/// One parsed input line.
///
/// `args[0]` is always `name` for a `Simple` command; `Blank` and `Comment`
/// carry neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub name: String,
    pub args: Vec<String>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub background: bool,
}

impl Command {
    pub fn blank() -> Self {
        Self::classified(CommandKind::Blank)
    }

    pub fn comment() -> Self {
        Self::classified(CommandKind::Comment)
    }

    fn classified(kind: CommandKind) -> Self {
        Command {
            kind,
            name: String::new(),
            args: Vec::new(),
            input: None,
            output: None,
            background: false,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.kind != CommandKind::Simple
    }

    /// Arguments as C strings for `execvp`; the NULL terminator is appended by
    /// the exec call itself.
    pub fn argv(&self) -> Result<Vec<CString>, ExecError> {
        self.args
            .iter()
            .map(|a| CString::new(a.as_str()).map_err(|_| ExecError::NulByte(a.clone())))
            .collect()
    }
}
