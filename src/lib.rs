pub mod ast;
pub mod config;
pub mod environment;
pub mod error;
pub mod executor;
pub mod expander;
pub mod parser;
pub mod prompt;
pub mod shell;

pub use error::ShellError;
pub use shell::{Flow, Shell};
