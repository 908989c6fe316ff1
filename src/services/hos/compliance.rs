//! Compliance validator.
//!
//! Re-derives duty-day totals from the event stream instead of trusting the
//! scheduler's counters; only the cycle total is taken from the final state.

use tracing::warn;

use crate::defaults::{
    BREAK_AFTER_DRIVING_MINUTES, BREAK_DURATION_MINUTES, CYCLE_LIMIT_MINUTES,
    DRIVING_LIMIT_MINUTES, DUTY_WINDOW_MINUTES, REST_DURATION_MINUTES,
};
use crate::types::{ComplianceResult, DutyEvent, DutyStatus};

use super::CycleState;

pub const CYCLE_EXCEEDED: &str = "70-hour cycle exceeded";
pub const DRIVING_LIMIT_EXCEEDED: &str = "11-hour driving limit exceeded";
pub const DUTY_WINDOW_EXCEEDED: &str = "14-hour duty window exceeded";
pub const BREAK_MISSED: &str = "30-minute break required after 8 hours of driving";

/// Rule breaches found in one pass over the events
#[derive(Debug, Default)]
struct Findings {
    driving_limit: bool,
    duty_window: bool,
    break_missed: bool,
}

/// Validate a finished timeline. Rules are checked in a fixed order and the
/// first breached rule is reported.
pub fn validate(final_state: &CycleState, events: &[DutyEvent]) -> ComplianceResult {
    if final_state.cycle_used_minutes() > CYCLE_LIMIT_MINUTES {
        warn!("Compliance: {} ({:.1}h)", CYCLE_EXCEEDED, final_state.cycle_used_hours());
        return ComplianceResult::violation(CYCLE_EXCEEDED);
    }

    let findings = scan(events);
    let reason = if findings.driving_limit {
        Some(DRIVING_LIMIT_EXCEEDED)
    } else if findings.duty_window {
        Some(DUTY_WINDOW_EXCEEDED)
    } else if findings.break_missed {
        Some(BREAK_MISSED)
    } else {
        None
    };

    match reason {
        Some(reason) => {
            warn!("Compliance: {}", reason);
            ComplianceResult::violation(reason)
        }
        None => ComplianceResult::valid(),
    }
}

fn scan(events: &[DutyEvent]) -> Findings {
    let mut findings = Findings::default();
    let mut driven = 0u32;
    let mut since_break = 0u32;
    let mut window_start: Option<u32> = None;

    for event in events {
        let minutes = event.duration_minutes();

        if event.status.is_rest() && minutes >= REST_DURATION_MINUTES {
            driven = 0;
            window_start = None;
        }
        if event.status != DutyStatus::Driving && minutes >= BREAK_DURATION_MINUTES {
            since_break = 0;
        }

        if event.status.is_on_duty() {
            let start = *window_start.get_or_insert(event.start);
            if event.end.saturating_sub(start) > DUTY_WINDOW_MINUTES {
                findings.duty_window = true;
            }
        }

        if event.status == DutyStatus::Driving {
            driven += minutes;
            since_break += minutes;
            if driven > DRIVING_LIMIT_MINUTES {
                findings.driving_limit = true;
            }
            if since_break > BREAK_AFTER_DRIVING_MINUTES {
                findings.break_missed = true;
            }
        }
    }

    findings
}
