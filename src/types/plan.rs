//! Planning output types

use serde::{Deserialize, Serialize};

use super::{DutyEvent, DutyStatus};

/// Compliance verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Valid,
    Violation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResult {
    pub status: ComplianceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ComplianceResult {
    pub fn valid() -> Self {
        Self {
            status: ComplianceStatus::Valid,
            reason: None,
        }
    }

    pub fn violation(reason: impl Into<String>) -> Self {
        Self {
            status: ComplianceStatus::Violation,
            reason: Some(reason.into()),
        }
    }

    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        self.status == ComplianceStatus::Valid
    }
}

/// Aggregate trip figures. Hours are rounded to one decimal place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub total_distance_miles: f64,
    /// Elapsed trip time, first event start to last event end
    pub total_duration_hours: f64,
    /// Driving time reported by the route provider
    pub driving_hours: f64,
    /// On-duty time added by this trip
    pub on_duty_hours: f64,
    pub cycle_used_hours: f64,
    pub cycle_remaining_hours: f64,
    pub days_required: u32,
}

/// Shortfall explanation attached to cycle violations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationDetail {
    pub message: String,
    pub required_hours: f64,
    pub available_hours: f64,
    pub shortfall_hours: f64,
}

impl ViolationDetail {
    pub fn new(required_hours: f64, available_hours: f64) -> Self {
        let available_hours = available_hours.max(0.0);
        Self {
            message: format!(
                "Trip requires {:.1} hours but only {:.1} hours remaining in cycle",
                required_hours, available_hours
            ),
            required_hours,
            available_hours,
            shortfall_hours: (required_hours - available_hours).max(0.0),
        }
    }
}

/// One row of a daily log, clipped to the calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub status: DutyStatus,
    /// "HH:MM"
    pub start: String,
    /// "HH:MM", "24:00" when the entry runs to midnight
    pub end: String,
    pub label: String,
}

/// Hours per duty status within one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTotals {
    pub off_duty: f64,
    pub sleeper_berth: f64,
    pub driving: f64,
    pub on_duty_not_driving: f64,
}

impl StatusTotals {
    #[cfg(test)]
    pub fn get(&self, status: DutyStatus) -> f64 {
        match status {
            DutyStatus::OffDuty => self.off_duty,
            DutyStatus::SleeperBerth => self.sleeper_berth,
            DutyStatus::Driving => self.driving,
            DutyStatus::OnDutyNotDriving => self.on_duty_not_driving,
        }
    }

    pub fn slot_mut(&mut self, status: DutyStatus) -> &mut f64 {
        match status {
            DutyStatus::OffDuty => &mut self.off_duty,
            DutyStatus::SleeperBerth => &mut self.sleeper_berth,
            DutyStatus::Driving => &mut self.driving,
            DutyStatus::OnDutyNotDriving => &mut self.on_duty_not_driving,
        }
    }
}

/// Per-calendar-day log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    /// 1-based day number
    pub day: u32,
    pub entries: Vec<LogEntry>,
    pub totals: StatusTotals,
}

/// Complete planning result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub compliance: ComplianceResult,
    pub summary: TripSummary,
    pub events: Vec<DutyEvent>,
    pub daily_logs: Vec<DailyLog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<ViolationDetail>,
    /// Provider path encodings, one per non-empty leg
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub polylines: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_detail_message() {
        let detail = ViolationDetail::new(14.0, 6.5);
        assert_eq!(
            detail.message,
            "Trip requires 14.0 hours but only 6.5 hours remaining in cycle"
        );
        assert_eq!(detail.shortfall_hours, 7.5);
    }

    #[test]
    fn test_violation_detail_clamps_negative_availability() {
        let detail = ViolationDetail::new(1.0, -0.8);
        assert_eq!(detail.available_hours, 0.0);
        assert_eq!(detail.shortfall_hours, 1.0);
    }

    #[test]
    fn test_compliance_result_serialization() {
        let json = serde_json::to_value(ComplianceResult::valid()).unwrap();
        assert_eq!(json["status"], "valid");
        assert!(json.get("reason").is_none());

        let json = serde_json::to_value(ComplianceResult::violation("70-hour cycle exceeded")).unwrap();
        assert_eq!(json["status"], "violation");
        assert_eq!(json["reason"], "70-hour cycle exceeded");
    }
}
