//! Hours-of-Service engine
//!
//! `schedule` builds the duty timeline; `validate`, `build_summary` and
//! `assemble_daily_logs` each consume the finished timeline independently.

mod compliance;
mod cycle_state;
mod daily_log;
mod scheduler;
mod summary;

pub use compliance::{validate, CYCLE_EXCEEDED};
pub use cycle_state::CycleState;
pub use daily_log::assemble_daily_logs;
pub use scheduler::{schedule, ScheduleOptions};
pub use summary::build_summary;
