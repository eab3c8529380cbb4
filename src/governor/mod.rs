pub mod machine;
pub mod runner;

pub use machine::{CoreSummary, GovernorMachine, SystemState, TickOutcome};
