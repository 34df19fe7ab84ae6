pub mod report;
pub mod runner;
pub mod schedule;

pub use report::{ActionStatus, InvocationResult, RunReport};
pub use runner::{run_selection, InterruptFlag};
pub use schedule::{run_selections, silent_observer, RunEvent, RunObserver};
