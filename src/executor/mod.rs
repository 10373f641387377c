mod executor;
pub mod builtin;
pub mod dispatch;
pub mod launcher;
pub mod signals;
pub mod status;
pub mod supervisor;

pub use executor::{ExecError, ExecOutcome, ExecStatus, Executor};
pub use dispatch::{Dispatch, Dispatcher};
pub use status::ProcessStatus;
pub use supervisor::JobSupervisor;
