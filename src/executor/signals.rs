use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

use super::ExecError;

/// Parent disposition: the interpreter survives the interrupt key.
pub fn ignore_interrupt() -> Result<(), ExecError> {
    set_interrupt(SigHandler::SigIgn)
}

/// Child disposition: applied first thing after fork so foreground commands
/// can be interrupted. An ignored disposition would otherwise survive exec.
pub fn restore_interrupt() -> Result<(), ExecError> {
    set_interrupt(SigHandler::SigDfl)
}

fn set_interrupt(handler: SigHandler) -> Result<(), ExecError> {
    let action = SigAction::new(handler, SaFlags::empty(), SigSet::empty());
    // SAFETY: SIG_IGN and SIG_DFL run no user code.
    unsafe { sigaction(Signal::SIGINT, &action) }
        .map(|_| ())
        .map_err(ExecError::Signal)
}
