use std::ffi::{CStr, CString};
use std::os::unix::io::RawFd;

use nix::fcntl::{OFlag, open};
use nix::sys::stat::Mode;
use nix::unistd::{dup2, execvp};

use crate::ast::Command;
use super::ExecError;

/// Everything the child needs, converted before fork so the child only has
/// to make system calls.
#[derive(Debug)]
pub struct LaunchPlan {
    argv: Vec<CString>,
    input: Option<CString>,
    output: Option<CString>,
}

impl LaunchPlan {
    pub fn new(cmd: &Command) -> Result<Self, ExecError> {
        let argv = cmd.argv()?;
        if argv.is_empty() {
            return Err(ExecError::InvalidCommand(cmd.name.clone()));
        }
        Ok(LaunchPlan {
            argv,
            input: cmd.input.as_deref().map(c_path).transpose()?,
            output: cmd.output.as_deref().map(c_path).transpose()?,
        })
    }

    pub fn program(&self) -> &CStr {
        &self.argv[0]
    }

    /// Runs in the forked child. Never returns: either the image is replaced
    /// or the child exits with status 1.
    pub fn exec(self) -> ! {
        if let Err(e) = self.redirect() {
            eprintln!("smallsh: {}", e);
            std::process::exit(1);
        }

        let errno = match execvp(self.program(), &self.argv) {
            Ok(never) => match never {},
            Err(e) => e,
        };
        let name = self.program().to_string_lossy();
        eprintln!("smallsh: {} ({})", ExecError::InvalidCommand(name.to_string()), errno);
        std::process::exit(1);
    }

    fn redirect(&self) -> Result<(), ExecError> {
        if let Some(path) = &self.input {
            let fd = open_input(path)?;
            dup2(fd, libc::STDIN_FILENO).map_err(ExecError::Dup)?;
        }
        if let Some(path) = &self.output {
            let fd = open_output(path)?;
            dup2(fd, libc::STDOUT_FILENO).map_err(ExecError::Dup)?;
        }
        Ok(())
    }
}

fn c_path(path: &str) -> Result<CString, ExecError> {
    CString::new(path).map_err(|_| ExecError::NulByte(path.to_string()))
}

/// Read-only, close-on-exec. Only the dup'd standard descriptor survives exec.
pub fn open_input(path: &CStr) -> Result<RawFd, ExecError> {
    let flags = OFlag::O_RDONLY | OFlag::O_CLOEXEC;
    open(path, flags, Mode::empty()).map_err(|source| ExecError::Redirect {
        path: path.to_string_lossy().into_owned(),
        mode: "input",
        source,
    })
}

/// Write-only, created 0644 if missing, truncated otherwise.
pub fn open_output(path: &CStr) -> Result<RawFd, ExecError> {
    let flags = OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC | OFlag::O_CLOEXEC;
    let mode = Mode::S_IRUSR | Mode::S_IWUSR | Mode::S_IRGRP | Mode::S_IROTH;
    open(path, flags, mode).map_err(|source| ExecError::Redirect {
        path: path.to_string_lossy().into_owned(),
        mode: "output",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;
    use nix::unistd::close;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn c(path: &std::path::Path) -> CString {
        CString::new(path.to_str().unwrap()).unwrap()
    }

    #[test]
    fn test_plan_from_background_command() {
        let plan = LaunchPlan::new(&parse_line("sleep 5 &\n").unwrap()).unwrap();
        assert_eq!(plan.program().to_str().unwrap(), "sleep");
        assert_eq!(plan.argv.len(), 2);
        assert_eq!(plan.input.as_deref().map(|p| p.to_str().unwrap()), Some("/dev/null"));
        assert_eq!(plan.output.as_deref().map(|p| p.to_str().unwrap()), Some("/dev/null"));
    }

    #[test]
    fn test_plan_without_redirects() {
        let plan = LaunchPlan::new(&parse_line("ls -la\n").unwrap()).unwrap();
        assert!(plan.input.is_none());
        assert!(plan.output.is_none());
    }

    #[test]
    fn test_open_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_input(&c(&dir.path().join("missing.txt"))).unwrap_err();
        assert!(err.to_string().contains("for input"));
    }

    #[test]
    fn test_open_output_creates_and_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "previous contents").unwrap();

        let fd = open_output(&c(&path)).unwrap();
        close(fd).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        let fresh = dir.path().join("fresh.txt");
        let fd = open_output(&c(&fresh)).unwrap();
        close(fd).unwrap();
        let mode = fs::metadata(&fresh).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & 0o600, 0o600);
        assert_eq!(mode & 0o133, 0);
    }

    #[test]
    fn test_open_input_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, "data").unwrap();
        let fd = open_input(&c(&path)).unwrap();
        assert!(fd >= 0);
        close(fd).unwrap();
    }
}
