use std::io::Write;

use tracing::debug;

use crate::environment::Environment;
use crate::executor::{ExecOutcome, ExecStatus, ProcessStatus};
use crate::executor::builtin::manager::BuiltinCommand;

/// Interpreter state a built-in may read.
pub struct BuiltinContext<'a> {
    pub env: &'a Environment,
    pub status: ProcessStatus,
}

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    // `args[0]` is the name itself. More than one operand is ignored.
    fn run(&self, args: &[String], ctx: &BuiltinContext<'_>, _out: &mut dyn Write) -> ExecStatus {
        match args {
            [_] => match ctx.env.home() {
                Some(home) => change_dir(home),
                None => eprintln!("cd: HOME not set"),
            },
            [_, target] => change_dir(target),
            _ => debug!(count = args.len().saturating_sub(1), "cd: too many operands, ignoring"),
        }
        Ok(ExecOutcome::Continue)
    }
}

fn change_dir(target: &str) {
    match std::env::set_current_dir(target) {
        Ok(()) => debug!(dir = target, "changed directory"),
        Err(e) => eprintln!("cd: {}: {}", target, e),
    }
}

pub struct StatusCommand;

impl BuiltinCommand for StatusCommand {
    fn name(&self) -> &'static str {
        "status"
    }

    fn run(&self, _args: &[String], ctx: &BuiltinContext<'_>, out: &mut dyn Write) -> ExecStatus {
        ctx.status.report(out)?;
        Ok(ExecOutcome::Continue)
    }
}

pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn run(&self, _args: &[String], _ctx: &BuiltinContext<'_>, _out: &mut dyn Write) -> ExecStatus {
        Ok(ExecOutcome::Exit)
    }
}
