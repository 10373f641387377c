use std::io::Write;

use tracing::trace;

use crate::ast::Command;
use super::builtin::{BuiltinContext, BuiltinManager};
use super::{ExecError, ExecOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing left to do for this line.
    Handled,
    /// The `exit` built-in ran.
    Exit,
    /// Must be forked and exec'd.
    External,
}

/// Routes blank/comment lines, built-ins and external programs.
pub struct Dispatcher {
    builtins: BuiltinManager,
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher { builtins: BuiltinManager::new() }
    }

    pub fn dispatch(
        &self,
        cmd: &Command,
        ctx: &BuiltinContext<'_>,
        out: &mut dyn Write,
    ) -> Result<Dispatch, ExecError> {
        if cmd.is_noop() {
            trace!(kind = ?cmd.kind, "nothing to execute");
            return Ok(Dispatch::Handled);
        }

        let Some(builtin) = self.builtins.get(&cmd.name) else {
            return Ok(Dispatch::External);
        };
        trace!(name = %cmd.name, "running builtin");
        match builtin.run(&cmd.args, ctx, out)? {
            ExecOutcome::Continue => Ok(Dispatch::Handled),
            ExecOutcome::Exit => Ok(Dispatch::Exit),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new()
    }
}
