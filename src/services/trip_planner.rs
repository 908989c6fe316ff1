//! Trip planning: input validation, route lookup, scheduling and verdict.
//!
//! The route lookup is the only suspension point. Both legs are requested
//! together under a single timeout; any provider failure ends the request
//! as `RouteUnavailable` before scheduling starts. Everything after the
//! lookup is synchronous and owned by the call.

use std::time::Duration;

use futures::future::join_all;
use tracing::{info, warn};

use crate::defaults::{hours_to_minutes, minutes_to_hours, round1, CYCLE_LIMIT_MINUTES};
use crate::error::{InfeasibleTrip, PlannerError};
use crate::services::hos::{
    assemble_daily_logs, build_summary, schedule, validate, CycleState, ScheduleOptions,
    CYCLE_EXCEEDED,
};
use crate::services::routing::RouteProvider;
use crate::types::{ComplianceResult, RouteModel, TripPlan, TripRequest, ViolationDetail};

pub struct TripPlanner {
    provider: Box<dyn RouteProvider>,
    route_timeout: Duration,
    options: ScheduleOptions,
}

impl TripPlanner {
    pub fn new(provider: Box<dyn RouteProvider>, route_timeout: Duration) -> Self {
        Self {
            provider,
            route_timeout,
            options: ScheduleOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScheduleOptions) -> Self {
        self.options = options;
        self
    }

    /// Look up current -> pickup and pickup -> dropoff.
    pub async fn fetch_route(&self, request: &TripRequest) -> Result<RouteModel, PlannerError> {
        let provider = self.provider.name();
        let lookup = async {
            futures::try_join!(
                self.provider.get_leg(&request.current_location, &request.pickup_location),
                self.provider.get_leg(&request.pickup_location, &request.dropoff_location),
            )
        };

        let (to_pickup, to_dropoff) = match tokio::time::timeout(self.route_timeout, lookup).await {
            Ok(Ok(legs)) => legs,
            Ok(Err(e)) => {
                warn!("{} route lookup failed: {:#}", provider, e);
                return Err(PlannerError::RouteUnavailable(format!("{}: {:#}", provider, e)));
            }
            Err(_) => {
                warn!("{} route lookup timed out after {:?}", provider, self.route_timeout);
                return Err(PlannerError::RouteUnavailable(format!(
                    "{} timed out after {:?}",
                    provider, self.route_timeout
                )));
            }
        };

        RouteModel::new(to_pickup, to_dropoff)
            .map_err(|e| PlannerError::RouteUnavailable(format!("{} returned an invalid leg: {}", provider, e)))
    }

    /// Plan one trip end to end.
    pub async fn plan_trip(&self, request: &TripRequest) -> Result<TripPlan, PlannerError> {
        request.validate()?;
        let route = self.fetch_route(request).await?;
        plan_with_route(request, &route, &self.options)
    }

    /// Plan independent trips concurrently; results keep the input order.
    pub async fn plan_batch(&self, requests: &[TripRequest]) -> Vec<Result<TripPlan, PlannerError>> {
        info!("Planning batch of {} trips", requests.len());
        join_all(requests.iter().map(|request| self.plan_trip(request))).await
    }
}

/// Plan a trip over an already-known route.
///
/// An infeasible trip is not an error here: it comes back as a plan with a
/// VIOLATION verdict, no events and a filled-in `violation`.
pub fn plan_with_route(
    request: &TripRequest,
    route: &RouteModel,
    options: &ScheduleOptions,
) -> Result<TripPlan, PlannerError> {
    request.validate()?;

    let polylines: Vec<String> = route
        .legs()
        .iter()
        .filter_map(|leg| leg.polyline.clone())
        .collect();

    let outcome = match schedule(route, request.current_cycle_used, options) {
        Ok(outcome) => outcome,
        Err(infeasible) => return Ok(infeasible_plan(request, route, infeasible, polylines)),
    };

    let compliance = validate(&outcome.state, &outcome.events);
    let summary = build_summary(route, &outcome.events, &outcome.state);
    let daily_logs = assemble_daily_logs(&outcome.events);

    let violation = if compliance.reason.as_deref() == Some(CYCLE_EXCEEDED) {
        Some(ViolationDetail::new(summary.on_duty_hours, cycle_available(request)))
    } else {
        None
    };

    info!(
        "Planned {} -> {} -> {}: {} events over {} day(s), {:?}",
        request.current_location,
        request.pickup_location,
        request.dropoff_location,
        outcome.events.len(),
        summary.days_required,
        compliance.status
    );

    Ok(TripPlan {
        compliance,
        summary,
        events: outcome.events,
        daily_logs,
        violation,
        polylines,
    })
}

fn infeasible_plan(
    request: &TripRequest,
    route: &RouteModel,
    infeasible: InfeasibleTrip,
    polylines: Vec<String>,
) -> TripPlan {
    warn!(
        "Trip {} -> {} infeasible: {}",
        request.pickup_location, request.dropoff_location, infeasible
    );

    let start_state = CycleState::new(hours_to_minutes(request.current_cycle_used));
    let detail = ViolationDetail::new(round1(infeasible.required_hours), round1(infeasible.available_hours));

    TripPlan {
        compliance: ComplianceResult::violation(format!("{}: {}", infeasible.reason, detail.message)),
        summary: build_summary(route, &[], &start_state),
        events: Vec::new(),
        daily_logs: Vec::new(),
        violation: Some(detail),
        polylines,
    }
}

fn cycle_available(request: &TripRequest) -> f64 {
    round1((minutes_to_hours(CYCLE_LIMIT_MINUTES) - request.current_cycle_used).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use tokio_test::{assert_err, assert_ok};

    use crate::services::routing::{RouteTableEntry, StaticRouteProvider};
    use crate::types::{ComplianceStatus, DutyEventKind, RouteLeg};

    fn entry(origin: &str, destination: &str, miles: f64, hours: f64) -> RouteTableEntry {
        RouteTableEntry {
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_miles: miles,
            duration_hours: hours,
            polyline: Some(format!("{}|{}", origin, destination)),
        }
    }

    fn planner() -> TripPlanner {
        let provider = StaticRouteProvider::new(vec![
            entry("Green Bay, WI", "Chicago, IL", 208.0, 3.4),
            entry("Chicago, IL", "St. Louis, MO", 297.0, 4.6),
            entry("Chicago, IL", "Los Angeles, CA", 2015.0, 29.5),
            entry("Los Angeles, CA", "Miami, FL", 2733.0, 39.0),
        ]);
        TripPlanner::new(Box::new(provider), Duration::from_secs(5))
    }

    fn request(current: &str, pickup: &str, dropoff: &str, cycle_used: f64) -> TripRequest {
        TripRequest {
            current_location: current.to_string(),
            pickup_location: pickup.to_string(),
            dropoff_location: dropoff.to_string(),
            current_cycle_used: cycle_used,
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl RouteProvider for SlowProvider {
        async fn get_leg(&self, origin: &str, destination: &str) -> Result<RouteLeg> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(RouteLeg::new(origin, destination, 100.0, 2.0))
        }

        fn name(&self) -> &str {
            "Slow"
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl RouteProvider for FailingProvider {
        async fn get_leg(&self, _origin: &str, _destination: &str) -> Result<RouteLeg> {
            anyhow::bail!("Directions status OVER_QUERY_LIMIT")
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    #[tokio::test]
    async fn test_plan_short_trip() {
        let plan = assert_ok!(
            planner()
                .plan_trip(&request("Green Bay, WI", "Chicago, IL", "St. Louis, MO", 10.0))
                .await
        );

        assert!(plan.compliance.is_valid());
        assert_eq!(plan.summary.total_distance_miles, 505.0);
        assert_eq!(plan.summary.driving_hours, 8.0);
        assert_eq!(plan.summary.days_required, 1);
        assert_eq!(plan.daily_logs.len(), 1);
        assert_eq!(plan.polylines.len(), 2);
        assert!(plan.violation.is_none());
        assert_eq!(plan.events.first().unwrap().kind, DutyEventKind::Pickup);
        assert_eq!(plan.events.last().unwrap().kind, DutyEventKind::Dropoff);
    }

    #[tokio::test]
    async fn test_plan_trip_current_at_pickup() {
        let plan = assert_ok!(
            planner()
                .plan_trip(&request("Chicago, IL", "Chicago, IL", "St. Louis, MO", 0.0))
                .await
        );
        assert_eq!(plan.summary.total_distance_miles, 297.0);
        assert_eq!(plan.polylines.len(), 1);
    }

    #[tokio::test]
    async fn test_plan_cross_country_is_cycle_violation() {
        let plan = assert_ok!(
            planner()
                .plan_trip(&request("Chicago, IL", "Los Angeles, CA", "Miami, FL", 25.5))
                .await
        );

        assert_eq!(plan.compliance.status, ComplianceStatus::Violation);
        assert!(plan.compliance.reason.as_deref().unwrap().starts_with("70-hour cycle exceeded"));
        assert!(plan.events.is_empty());
        assert!(plan.daily_logs.is_empty());

        let violation = plan.violation.unwrap();
        assert_eq!(violation.available_hours, 44.5);
        assert!(violation.required_hours > 68.5);
        assert!(violation.shortfall_hours > 0.0);
        assert_eq!(plan.summary.cycle_remaining_hours, 44.5);
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_before_lookup() {
        let planner = TripPlanner::new(Box::new(SlowProvider), Duration::from_secs(30));
        let err = assert_err!(
            planner
                .plan_trip(&request("Chicago, IL", "", "Miami, FL", 0.0))
                .await
        );
        assert!(matches!(err, PlannerError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_provider_timeout_is_route_unavailable() {
        let planner = TripPlanner::new(Box::new(SlowProvider), Duration::from_millis(50));
        let err = assert_err!(
            planner
                .plan_trip(&request("Chicago, IL", "Dallas, TX", "Miami, FL", 0.0))
                .await
        );
        assert!(matches!(err, PlannerError::RouteUnavailable(_)));
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_provider_error_is_route_unavailable() {
        let planner = TripPlanner::new(Box::new(FailingProvider), Duration::from_secs(5));
        let err = assert_err!(
            planner
                .plan_trip(&request("Chicago, IL", "Dallas, TX", "Miami, FL", 0.0))
                .await
        );
        assert_eq!(err.code(), "ROUTE_UNAVAILABLE");
        assert!(err.to_string().contains("OVER_QUERY_LIMIT"));
    }

    #[tokio::test]
    async fn test_plan_batch_keeps_order() {
        let requests = vec![
            request("Green Bay, WI", "Chicago, IL", "St. Louis, MO", 0.0),
            request("Chicago, IL", "Nowhere", "St. Louis, MO", 0.0),
            request("Chicago, IL", "Chicago, IL", "Los Angeles, CA", 0.0),
        ];
        let results = planner().plan_batch(&requests).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().summary.total_distance_miles, 505.0);
        assert!(matches!(results[1], Err(PlannerError::RouteUnavailable(_))));
        let long_haul = results[2].as_ref().unwrap();
        assert!(long_haul.compliance.is_valid());
        assert_eq!(long_haul.summary.days_required, 3);
    }

    #[test]
    fn test_plan_with_route_scenario_e() {
        let route = RouteModel::new(RouteLeg::stationary("Chicago, IL"), RouteLeg::stationary("Chicago, IL")).unwrap();
        let plan = plan_with_route(
            &request("Chicago, IL", "Chicago, IL", "Chicago, IL", 0.0),
            &route,
            &ScheduleOptions::default(),
        )
        .unwrap();

        assert!(plan.compliance.is_valid());
        assert_eq!(plan.events.len(), 2);
        assert_eq!(plan.summary.total_duration_hours, 1.0);
        assert_eq!(plan.summary.days_required, 1);
    }

    #[test]
    fn test_plan_with_route_scenario_c() {
        let route = RouteModel::new(
            RouteLeg::stationary("Chicago, IL"),
            RouteLeg::new("Chicago, IL", "Joliet, IL", 45.0, 1.0),
        )
        .unwrap();
        let plan = plan_with_route(
            &request("Chicago, IL", "Chicago, IL", "Joliet, IL", 69.5),
            &route,
            &ScheduleOptions::default(),
        )
        .unwrap();

        assert_eq!(plan.compliance.status, ComplianceStatus::Violation);
        let violation = plan.violation.unwrap();
        assert_eq!(violation.required_hours, 2.0);
        assert_eq!(violation.available_hours, 0.5);
        assert_eq!(violation.shortfall_hours, 1.5);
    }

    #[test]
    fn test_plan_with_route_pickup_and_drop_off_past_cycle() {
        // No driving, but the two dwell events push the cycle past 70h
        let route = RouteModel::new(RouteLeg::stationary("Chicago, IL"), RouteLeg::stationary("Chicago, IL")).unwrap();
        let plan = plan_with_route(
            &request("Chicago, IL", "Chicago, IL", "Chicago, IL", 69.5),
            &route,
            &ScheduleOptions::default(),
        )
        .unwrap();

        assert_eq!(plan.compliance.reason.as_deref(), Some(CYCLE_EXCEEDED));
        assert_eq!(plan.summary.cycle_remaining_hours, 0.0);
        let violation = plan.violation.unwrap();
        assert_eq!(violation.required_hours, 1.0);
        assert_eq!(violation.available_hours, 0.5);
    }
}
