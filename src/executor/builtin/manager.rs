use std::collections::HashMap;
use std::io::Write;

use crate::executor::ExecStatus;
use crate::executor::builtin::commands::{BuiltinContext, CdCommand, ExitCommand, StatusCommand};

pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn run(&self, args: &[String], ctx: &BuiltinContext<'_>, out: &mut dyn Write) -> ExecStatus;
}

pub struct BuiltinManager {
    commands: HashMap<String, Box<dyn BuiltinCommand>>,
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: HashMap::new(),
        };
        mgr.register(Box::new(CdCommand));
        mgr.register(Box::new(StatusCommand));
        mgr.register(Box::new(ExitCommand));
        mgr
    }

    pub fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&dyn BuiltinCommand> {
        self.commands.get(name).map(|cmd| &**cmd)
    }
}

impl Default for BuiltinManager {
    fn default() -> Self {
        BuiltinManager::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_builtins() {
        let mgr = BuiltinManager::new();
        for name in ["cd", "status", "exit"] {
            assert!(mgr.get(name).is_some(), "{name} should be a builtin");
        }
        assert!(mgr.get("ls").is_none());
        assert!(mgr.get("fg").is_none());
        assert_eq!(mgr.get("status").map(|c| c.name()), Some("status"));
    }
}
