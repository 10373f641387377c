use std::io::{self, Write};

use nix::errno::Errno;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::{ForkResult, Pid, fork};
use tracing::{debug, trace, warn};

use crate::ast::Command;
use super::executor::{ExecError, Executor};
use super::launcher::LaunchPlan;
use super::signals;
use super::status::ProcessStatus;

/// Forks external commands and waits on them.
///
/// `status` is shared between foreground waits and background reaps, so a
/// background child finishing before `status` is typed overwrites the
/// foreground result.
#[derive(Debug, Default)]
pub struct JobSupervisor;

impl JobSupervisor {
    pub fn new() -> Self {
        JobSupervisor
    }

    fn wait_foreground(
        &mut self,
        child: Pid,
        status: &mut ProcessStatus,
        out: &mut dyn Write,
    ) -> Result<(), ExecError> {
        loop {
            match waitpid(child, None) {
                Ok(ws) => {
                    trace!(?ws, "foreground child finished");
                    *status = ws.into();
                    if status.is_signaled() {
                        status.report(out)?;
                    }
                    return Ok(());
                }
                Err(Errno::EINTR) => continue,
                Err(e) => {
                    warn!(pid = child.as_raw(), error = %e, "waitpid failed");
                    return Ok(());
                }
            }
        }
    }

    fn launch_background(
        &mut self,
        child: Pid,
        status: &mut ProcessStatus,
        out: &mut dyn Write,
    ) -> Result<(), ExecError> {
        writeln!(out, "background process {} has started", child)?;
        out.flush()?;
        match waitpid(child, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => {}
            Ok(ws) => {
                trace!(?ws, "background child exited immediately");
                *status = ws.into();
            }
            Err(e) => warn!(pid = child.as_raw(), error = %e, "waitpid failed"),
        }
        Ok(())
    }
}

impl Executor for JobSupervisor {
    fn run(
        &mut self,
        cmd: &Command,
        status: &mut ProcessStatus,
        out: &mut dyn Write,
    ) -> Result<(), ExecError> {
        let plan = LaunchPlan::new(cmd)?;

        // A child must not inherit unflushed interpreter output.
        out.flush()?;
        io::stdout().flush()?;

        // SAFETY: the child only makes system calls on data prepared above
        // before it execs or exits.
        match unsafe { fork() } {
            Err(e) => Err(ExecError::Fork(e)),
            Ok(ForkResult::Child) => {
                if let Err(e) = signals::restore_interrupt() {
                    eprintln!("smallsh: {}", e);
                    std::process::exit(1);
                }
                plan.exec()
            }
            Ok(ForkResult::Parent { child }) => {
                debug!(
                    pid = child.as_raw(),
                    name = %cmd.name,
                    background = cmd.background,
                    "forked"
                );
                if cmd.background {
                    self.launch_background(child, status, out)
                } else {
                    self.wait_foreground(child, status, out)
                }
            }
        }
    }

    fn reap(&mut self, status: &mut ProcessStatus, out: &mut dyn Write) -> Result<(), ExecError> {
        loop {
            match waitpid(None::<Pid>, Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::StillAlive) => return Ok(()),
                Ok(ws @ (WaitStatus::Exited(pid, _) | WaitStatus::Signaled(pid, _, _))) => {
                    debug!(pid = pid.as_raw(), ?ws, "reaped background child");
                    *status = ws.into();
                    write!(out, "background process {} is done: ", pid)?;
                    status.report(out)?;
                }
                Ok(ws) => {
                    trace!(?ws, "ignoring wait status");
                    return Ok(());
                }
                // No children at all.
                Err(Errno::ECHILD) => return Ok(()),
                Err(Errno::EINTR) => continue,
                Err(e) => {
                    warn!(error = %e, "waitpid failed while reaping");
                    return Ok(());
                }
            }
        }
    }
}
