pub mod commands;
pub mod manager;

pub use commands::BuiltinContext;
pub use manager::{BuiltinCommand, BuiltinManager};
