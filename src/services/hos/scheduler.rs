//! Duty scheduler: walks the route and produces an HOS-legal duty timeline.
//!
//! The walk is a single deterministic pass over the two route legs. Driving is
//! consumed in increments bounded by the smallest remaining allowance (leg
//! driving left, 11h driving, 14h window, 8h since break, 70h cycle); whenever
//! an allowance runs out with driving still to do, the matching break or rest
//! is inserted. Limits reached together are settled break first, then rest,
//! then fuel.

use tracing::{debug, warn};

use crate::defaults::{
    hours_to_minutes, minutes_to_hours, BREAK_DURATION_MINUTES, DROPOFF_DURATION_MINUTES,
    FUEL_DURATION_MINUTES, FUEL_THRESHOLD_MILES, PICKUP_DURATION_MINUTES, REST_DURATION_MINUTES,
};
use crate::error::InfeasibleTrip;
use crate::types::{DutyEvent, DutyEventKind, DutyStatus, RouteLeg, RouteModel};

use super::CycleState;

/// Scheduling knobs that stay inside the fixed rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Status used for the 10-hour rest (off duty or sleeper berth)
    pub rest_status: DutyStatus,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            rest_status: DutyStatus::OffDuty,
        }
    }
}

impl ScheduleOptions {
    pub fn sleeper_berth() -> Self {
        Self {
            rest_status: DutyStatus::SleeperBerth,
        }
    }
}

/// Finished timeline and the counters at its end
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    pub events: Vec<DutyEvent>,
    pub state: CycleState,
}

/// Schedule a trip over `route` for a driver who has already used
/// `start_cycle_used_hours` of the 70-hour cycle.
pub fn schedule(
    route: &RouteModel,
    start_cycle_used_hours: f64,
    options: &ScheduleOptions,
) -> Result<ScheduleOutcome, InfeasibleTrip> {
    DutyScheduler::new(route, start_cycle_used_hours, options).run()
}

struct DutyScheduler<'a> {
    route: &'a RouteModel,
    options: &'a ScheduleOptions,
    state: CycleState,
    start_cycle_used: u32,
    events: Vec<DutyEvent>,
    /// Minutes since trip start
    clock: u32,
    miles_driven: f64,
    /// Driving minutes left over the whole trip
    driving_left: u32,
}

impl<'a> DutyScheduler<'a> {
    fn new(route: &'a RouteModel, start_cycle_used_hours: f64, options: &'a ScheduleOptions) -> Self {
        let start_cycle_used = hours_to_minutes(start_cycle_used_hours);
        let driving_left = route
            .legs()
            .iter()
            .map(|leg| hours_to_minutes(leg.duration_hours))
            .fold(0u32, u32::saturating_add);

        Self {
            route,
            options,
            state: CycleState::new(start_cycle_used),
            start_cycle_used,
            events: Vec::new(),
            clock: 0,
            miles_driven: 0.0,
            driving_left,
        }
    }

    fn run(mut self) -> Result<ScheduleOutcome, InfeasibleTrip> {
        if self.state.cycle_room() == 0 {
            return Err(self.infeasible());
        }

        let pickup = self.route.to_pickup.dest_label.clone();
        self.emit(
            DutyStatus::OnDutyNotDriving,
            DutyEventKind::Pickup,
            PICKUP_DURATION_MINUTES,
            format!("Pre-trip inspection & pickup at {}", pickup),
        );

        let route = self.route;
        for leg in route.legs() {
            self.drive_leg(leg)?;
        }

        let dropoff = self.route.to_dropoff.dest_label.clone();
        self.ensure_window(DROPOFF_DURATION_MINUTES);
        self.emit(
            DutyStatus::OnDutyNotDriving,
            DutyEventKind::Dropoff,
            DROPOFF_DURATION_MINUTES,
            format!("Drop-off at {}", dropoff),
        );

        debug!(
            "Scheduled {} events over {} minutes, cycle used {:.1}h",
            self.events.len(),
            self.clock,
            self.state.cycle_used_hours()
        );

        Ok(ScheduleOutcome {
            events: self.events,
            state: self.state,
        })
    }

    fn drive_leg(&mut self, leg: &RouteLeg) -> Result<(), InfeasibleTrip> {
        let mut remaining = hours_to_minutes(leg.duration_hours);
        let speed_mph = leg.average_speed_mph();
        let label = format!("Driving to {}", leg.dest_label);

        while remaining > 0 {
            if self.state.cycle_room() == 0 {
                return Err(self.infeasible());
            }
            self.settle_limits();

            let step = remaining
                .min(self.state.driving_room())
                .min(self.state.window_room())
                .min(self.state.break_room())
                .min(self.state.cycle_room());
            if step == 0 {
                // Only the cycle can still be exhausted after settling.
                return Err(self.infeasible());
            }

            self.emit(DutyStatus::Driving, DutyEventKind::Driving, step, label.clone());
            self.miles_driven += minutes_to_hours(step) * speed_mph;
            remaining -= step;
            self.driving_left -= step;

            if self.driving_left > 0 {
                if self.state.cycle_room() == 0 {
                    return Err(self.infeasible());
                }
                self.settle_limits();
            }
            if self.fuel_due() {
                self.ensure_window(FUEL_DURATION_MINUTES);
                self.emit(
                    DutyStatus::OnDutyNotDriving,
                    DutyEventKind::Fuel,
                    FUEL_DURATION_MINUTES,
                    "Fuel stop".to_string(),
                );
            }
        }

        Ok(())
    }

    /// Insert the break and/or rest required before more driving.
    fn settle_limits(&mut self) {
        if self.state.break_room() == 0 {
            if self.state.window_room() >= BREAK_DURATION_MINUTES {
                self.emit(
                    DutyStatus::OnDutyNotDriving,
                    DutyEventKind::Break,
                    BREAK_DURATION_MINUTES,
                    "30-min break".to_string(),
                );
            } else {
                // No room left in the window: the rest doubles as the break.
                self.take_rest();
            }
        }
        if self.state.driving_room() == 0 || self.state.window_room() == 0 {
            self.take_rest();
        }
    }

    /// Rest first if an on-duty event of `minutes` would overrun the 14h window.
    fn ensure_window(&mut self, minutes: u32) {
        if self.state.window_room() < minutes {
            self.take_rest();
        }
    }

    fn take_rest(&mut self) {
        let label = match self.options.rest_status {
            DutyStatus::SleeperBerth => "Sleeper berth - required 10-hour rest",
            _ => "Required 10-hour rest",
        };
        self.emit(
            self.options.rest_status,
            DutyEventKind::Rest,
            REST_DURATION_MINUTES,
            label.to_string(),
        );
    }

    fn fuel_due(&self) -> bool {
        self.miles_driven > FUEL_THRESHOLD_MILES && !self.state.fueled_today()
    }

    fn emit(&mut self, status: DutyStatus, kind: DutyEventKind, minutes: u32, label: String) {
        let start = self.clock;
        let end = start + minutes;

        match kind {
            DutyEventKind::Driving => self.state.record_driving(minutes),
            DutyEventKind::Fuel => self.state.record_fuel(minutes),
            _ if status.is_rest() => self.state.record_off_duty(status, minutes),
            _ => self.state.record_on_duty(minutes),
        }

        debug!(
            "{:>5}-{:<5} {:<3} {} (driven {:.1}h, on duty {:.1}h, cycle {:.1}h)",
            start,
            end,
            status.as_str(),
            label,
            self.state.driven_today_hours(),
            self.state.on_duty_today_hours(),
            self.state.cycle_used_hours()
        );

        self.events.push(DutyEvent {
            status,
            kind,
            start,
            end,
            label,
        });
        self.clock = end;
    }

    fn infeasible(&self) -> InfeasibleTrip {
        let pickup_pending = if self.events.is_empty() {
            PICKUP_DURATION_MINUTES
        } else {
            0
        };
        let required = (self.state.cycle_used_minutes() - self.start_cycle_used)
            .saturating_add(pickup_pending)
            .saturating_add(self.driving_left)
            .saturating_add(DROPOFF_DURATION_MINUTES);
        let available = self.state.cycle_room() + self.state.cycle_used_minutes()
            - self.start_cycle_used;

        warn!(
            "70-hour cycle reached with {:.1}h of driving remaining",
            minutes_to_hours(self.driving_left)
        );

        InfeasibleTrip {
            reason: "70-hour cycle exceeded".to_string(),
            required_hours: minutes_to_hours(required),
            available_hours: minutes_to_hours(available),
        }
    }
}
