//! Trip summary derived from a finished timeline

use std::collections::BTreeSet;

use crate::defaults::{minutes_to_hours, round1, CYCLE_LIMIT_MINUTES, MINUTES_PER_DAY};
use crate::types::{DutyEvent, RouteModel, TripSummary};

use super::CycleState;

pub fn build_summary(route: &RouteModel, events: &[DutyEvent], final_state: &CycleState) -> TripSummary {
    let elapsed = events.last().map(|e| e.end).unwrap_or(0);
    let on_duty: u32 = events
        .iter()
        .filter(|e| e.status.is_on_duty())
        .map(|e| e.duration_minutes())
        .sum();
    let cycle_remaining = CYCLE_LIMIT_MINUTES.saturating_sub(final_state.cycle_used_minutes());

    TripSummary {
        total_distance_miles: round2(route.total_distance_miles()),
        total_duration_hours: round1(minutes_to_hours(elapsed)),
        driving_hours: round1(route.total_duration_hours()),
        on_duty_hours: round1(minutes_to_hours(on_duty)),
        cycle_used_hours: round1(final_state.cycle_used_hours()),
        cycle_remaining_hours: round1(minutes_to_hours(cycle_remaining)),
        days_required: days_required(events),
    }
}

/// Distinct calendar days touched, counted by event start.
pub fn days_required(events: &[DutyEvent]) -> u32 {
    let days: BTreeSet<u32> = events.iter().map(|e| e.start / MINUTES_PER_DAY).collect();
    days.len().max(1) as u32
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
