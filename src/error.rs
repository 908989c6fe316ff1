//! Planner error taxonomy

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    /// Malformed or out-of-range input, rejected before scheduling
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Route provider failed or timed out
    #[error("route unavailable: {0}")]
    RouteUnavailable(String),
}

impl PlannerError {
    /// Stable code for response envelopes
    pub const fn code(&self) -> &'static str {
        match self {
            PlannerError::InvalidInput(_) => "INVALID_INPUT",
            PlannerError::RouteUnavailable(_) => "ROUTE_UNAVAILABLE",
        }
    }
}

/// Cycle ceiling reached with driving remaining. Returned by the scheduler
/// and turned into a VIOLATION plan by the trip planner.
#[derive(Debug, Clone, Error)]
#[error("{reason} (requires {required_hours:.1}h, {available_hours:.1}h available)")]
pub struct InfeasibleTrip {
    pub reason: String,
    /// Lower bound on the on-duty hours this trip needs
    pub required_hours: f64,
    /// Cycle hours that were available when the trip started
    pub available_hours: f64,
}
