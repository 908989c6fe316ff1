//! Duty-cycle accumulator owned by a single scheduling run.
//!
//! Counters are kept in whole minutes so the cycle accounting is exact;
//! the `*_hours` accessors are the hour-valued view used everywhere else.

use serde::Serialize;

use crate::defaults::{
    minutes_to_hours, BREAK_AFTER_DRIVING_MINUTES, BREAK_DURATION_MINUTES, CYCLE_LIMIT_MINUTES,
    DRIVING_LIMIT_MINUTES, DUTY_WINDOW_MINUTES, REST_DURATION_MINUTES,
};
use crate::types::DutyStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleState {
    cycle_used: u32,
    driven_today: u32,
    on_duty_today: u32,
    since_last_break: u32,
    /// Duty days are numbered from 0 and advance on every qualifying rest.
    duty_day: u32,
    fueled_on_day: Option<u32>,
}

impl CycleState {
    pub fn new(start_cycle_used_minutes: u32) -> Self {
        Self {
            cycle_used: start_cycle_used_minutes,
            driven_today: 0,
            on_duty_today: 0,
            since_last_break: 0,
            duty_day: 0,
            fueled_on_day: None,
        }
    }

    pub fn cycle_used_minutes(&self) -> u32 {
        self.cycle_used
    }

    #[cfg(test)]
    pub fn driven_today_minutes(&self) -> u32 {
        self.driven_today
    }

    #[cfg(test)]
    pub fn on_duty_today_minutes(&self) -> u32 {
        self.on_duty_today
    }

    #[cfg(test)]
    pub fn since_last_break_minutes(&self) -> u32 {
        self.since_last_break
    }

    pub fn cycle_used_hours(&self) -> f64 {
        minutes_to_hours(self.cycle_used)
    }

    pub fn driven_today_hours(&self) -> f64 {
        minutes_to_hours(self.driven_today)
    }

    pub fn on_duty_today_hours(&self) -> f64 {
        minutes_to_hours(self.on_duty_today)
    }

    #[cfg(test)]
    pub fn duty_day(&self) -> u32 {
        self.duty_day
    }

    pub fn fueled_today(&self) -> bool {
        self.fueled_on_day == Some(self.duty_day)
    }

    // Remaining room under each limit

    pub fn driving_room(&self) -> u32 {
        DRIVING_LIMIT_MINUTES.saturating_sub(self.driven_today)
    }

    pub fn window_room(&self) -> u32 {
        DUTY_WINDOW_MINUTES.saturating_sub(self.on_duty_today)
    }

    pub fn break_room(&self) -> u32 {
        BREAK_AFTER_DRIVING_MINUTES.saturating_sub(self.since_last_break)
    }

    pub fn cycle_room(&self) -> u32 {
        CYCLE_LIMIT_MINUTES.saturating_sub(self.cycle_used)
    }

    // Mutations, called only by the scheduler

    pub(crate) fn record_driving(&mut self, minutes: u32) {
        self.driven_today += minutes;
        self.on_duty_today += minutes;
        self.since_last_break += minutes;
        self.cycle_used += minutes;
        debug_assert!(self.driven_today <= self.on_duty_today);
    }

    /// Any non-driving period of at least 30 minutes is a qualifying break.
    pub(crate) fn record_on_duty(&mut self, minutes: u32) {
        self.on_duty_today += minutes;
        self.cycle_used += minutes;
        if minutes >= BREAK_DURATION_MINUTES {
            self.since_last_break = 0;
        }
    }

    pub(crate) fn record_fuel(&mut self, minutes: u32) {
        self.record_on_duty(minutes);
        self.fueled_on_day = Some(self.duty_day);
    }

    pub(crate) fn record_off_duty(&mut self, status: DutyStatus, minutes: u32) {
        debug_assert!(status.is_rest());
        if minutes >= BREAK_DURATION_MINUTES {
            self.since_last_break = 0;
        }
        if minutes >= REST_DURATION_MINUTES {
            self.driven_today = 0;
            self.on_duty_today = 0;
            self.duty_day += 1;
        }
    }
}
