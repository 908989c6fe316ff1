//! Trip request and route types

use serde::{Deserialize, Serialize};

use crate::defaults::{CYCLE_LIMIT_MINUTES, MAX_LEG_DURATION_HOURS};
use crate::error::PlannerError;

/// Caller-supplied trip request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Hours already used in the 70-hour cycle
    #[serde(default)]
    pub current_cycle_used: f64,
}

impl TripRequest {
    /// Reject malformed input before any route lookup or scheduling.
    pub fn validate(&self) -> Result<(), PlannerError> {
        for (field, value) in [
            ("currentLocation", &self.current_location),
            ("pickupLocation", &self.pickup_location),
            ("dropoffLocation", &self.dropoff_location),
        ] {
            if value.trim().is_empty() {
                return Err(PlannerError::InvalidInput(format!("{} must not be empty", field)));
            }
        }

        let limit = (CYCLE_LIMIT_MINUTES / 60) as f64;
        if !self.current_cycle_used.is_finite()
            || self.current_cycle_used < 0.0
            || self.current_cycle_used > limit
        {
            return Err(PlannerError::InvalidInput(format!(
                "currentCycleUsed must be between 0 and {} hours (got {})",
                limit, self.current_cycle_used
            )));
        }

        Ok(())
    }
}

/// One leg of the route as returned by the route provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub origin_label: String,
    pub dest_label: String,
    pub distance_miles: f64,
    pub duration_hours: f64,
    /// Provider path encoding, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<String>,
}

impl RouteLeg {
    pub fn new(
        origin_label: impl Into<String>,
        dest_label: impl Into<String>,
        distance_miles: f64,
        duration_hours: f64,
    ) -> Self {
        Self {
            origin_label: origin_label.into(),
            dest_label: dest_label.into(),
            distance_miles,
            duration_hours,
            polyline: None,
        }
    }

    /// Zero-length leg (origin and destination are the same place)
    pub fn stationary(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(label.clone(), label, 0.0, 0.0)
    }

    fn validate(&self) -> Result<(), PlannerError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if !ok(self.distance_miles) || !ok(self.duration_hours) {
            return Err(PlannerError::InvalidInput(format!(
                "leg {} -> {} has invalid distance/duration ({} mi, {} h)",
                self.origin_label, self.dest_label, self.distance_miles, self.duration_hours
            )));
        }
        if self.duration_hours > MAX_LEG_DURATION_HOURS {
            return Err(PlannerError::InvalidInput(format!(
                "leg {} -> {} duration {} h exceeds {} h",
                self.origin_label, self.dest_label, self.duration_hours, MAX_LEG_DURATION_HOURS
            )));
        }
        Ok(())
    }

    /// Average speed over the leg, 0 for stationary legs.
    pub fn average_speed_mph(&self) -> f64 {
        if self.duration_hours > 0.0 {
            self.distance_miles / self.duration_hours
        } else {
            0.0
        }
    }
}

/// Normalized route: current location -> pickup -> dropoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteModel {
    pub to_pickup: RouteLeg,
    pub to_dropoff: RouteLeg,
}

impl RouteModel {
    pub fn new(to_pickup: RouteLeg, to_dropoff: RouteLeg) -> Result<Self, PlannerError> {
        to_pickup.validate()?;
        to_dropoff.validate()?;
        Ok(Self { to_pickup, to_dropoff })
    }

    pub fn legs(&self) -> [&RouteLeg; 2] {
        [&self.to_pickup, &self.to_dropoff]
    }

    pub fn total_distance_miles(&self) -> f64 {
        self.to_pickup.distance_miles + self.to_dropoff.distance_miles
    }

    pub fn total_duration_hours(&self) -> f64 {
        self.to_pickup.duration_hours + self.to_dropoff.duration_hours
    }
}

/// Offline planning input: a trip plus the route legs to use for it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub trip: TripRequest,
    pub route: RouteModel,
}
