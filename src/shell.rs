use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::Config;
use crate::environment::Environment;
use crate::error::ShellError;
use crate::executor::builtin::BuiltinContext;
use crate::executor::{Dispatch, Dispatcher, Executor, JobSupervisor, ProcessStatus};
use crate::expander;
use crate::parser::LineParser;
use crate::prompt::ShellPrompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The read-expand-parse-dispatch loop.
pub struct Shell<E: Executor = JobSupervisor> {
    prompt: ShellPrompt,
    parser: LineParser,
    env: Environment,
    dispatcher: Dispatcher,
    executor: E,
    status: ProcessStatus,
}

impl Shell<JobSupervisor> {
    pub fn new(config: &Config) -> Self {
        Shell::with_executor(config, Environment::new(), JobSupervisor::new())
    }
}

impl<E: Executor> Shell<E> {
    pub fn with_executor(config: &Config, env: Environment, executor: E) -> Self {
        Shell {
            prompt: ShellPrompt::new(config.prompt.clone()),
            parser: LineParser::new(config.null_device.clone()),
            env,
            dispatcher: Dispatcher::new(),
            executor,
            status: ProcessStatus::default(),
        }
    }

    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Prompts and executes lines until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
    ) -> Result<(), ShellError> {
        loop {
            self.prompt.show_prompt(out)?;
            let Some(bytes) = self.prompt.read_line(input)? else {
                writeln!(out)?;
                debug!("end of input");
                return Ok(());
            };
            if self.execute_bytes(bytes, out)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Like [`Shell::execute_line`] for raw input. A line that is not valid
    /// UTF-8 is reported and dropped; finished children are still drained.
    pub fn execute_bytes(
        &mut self,
        bytes: Vec<u8>,
        out: &mut dyn Write,
    ) -> Result<Flow, ShellError> {
        match String::from_utf8(bytes) {
            Ok(line) => self.execute_line(&line, out),
            Err(e) => {
                eprintln!("smallsh: input is not valid UTF-8, line ignored");
                debug!(error = %e.utf8_error(), "dropped input line");
                self.executor.reap(&mut self.status, out)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// One loop iteration: expand, parse, dispatch, then drain finished
    /// children. `exit` returns before draining.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow, ShellError> {
        let expanded = expander::expand(line);
        let flow = match self.parser.parse(&expanded) {
            Ok(cmd) => {
                let ctx = BuiltinContext { env: &self.env, status: self.status };
                match self.dispatcher.dispatch(&cmd, &ctx, out)? {
                    Dispatch::Handled => Flow::Continue,
                    Dispatch::Exit => Flow::Exit,
                    Dispatch::External => {
                        match self.executor.run(&cmd, &mut self.status, out) {
                            Ok(()) => {}
                            Err(e) if e.is_fatal() => return Err(e.into()),
                            Err(e) => eprintln!("smallsh: {}", e),
                        }
                        Flow::Continue
                    }
                }
            }
            Err(e) => {
                eprintln!("smallsh: {}", e);
                Flow::Continue
            }
        };

        if flow == Flow::Continue {
            self.executor.reap(&mut self.status, out)?;
        }
        Ok(flow)
    }
}
