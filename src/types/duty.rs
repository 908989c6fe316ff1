//! Duty status types

use serde::{Deserialize, Serialize};

/// ELD duty status. Serialized with the grid line codes used on paper logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DutyStatus {
    #[serde(rename = "OFF")]
    OffDuty,
    #[serde(rename = "SB")]
    SleeperBerth,
    #[serde(rename = "D")]
    Driving,
    #[serde(rename = "ON")]
    OnDutyNotDriving,
}

impl DutyStatus {
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDutyNotDriving,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "OFF",
            DutyStatus::SleeperBerth => "SB",
            DutyStatus::Driving => "D",
            DutyStatus::OnDutyNotDriving => "ON",
        }
    }

    /// Driving and on-duty-not-driving count toward the cycle and the window.
    pub const fn is_on_duty(self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDutyNotDriving)
    }

    pub const fn is_rest(self) -> bool {
        matches!(self, DutyStatus::OffDuty | DutyStatus::SleeperBerth)
    }
}

/// Why the scheduler emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyEventKind {
    Pickup,
    Driving,
    Break,
    Fuel,
    Rest,
    Dropoff,
}

/// A typed duty-status interval. Offsets are minutes from trip start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyEvent {
    pub status: DutyStatus,
    pub kind: DutyEventKind,
    pub start: u32,
    pub end: u32,
    pub label: String,
}

impl DutyEvent {
    pub fn duration_minutes(&self) -> u32 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_grid_code() {
        let json = serde_json::to_string(&DutyStatus::OnDutyNotDriving).unwrap();
        assert_eq!(json, "\"ON\"");
        let parsed: DutyStatus = serde_json::from_str("\"SB\"").unwrap();
        assert_eq!(parsed, DutyStatus::SleeperBerth);
    }

    #[test]
    fn test_on_duty_classification() {
        assert!(DutyStatus::Driving.is_on_duty());
        assert!(DutyStatus::OnDutyNotDriving.is_on_duty());
        assert!(!DutyStatus::OffDuty.is_on_duty());
        assert!(DutyStatus::SleeperBerth.is_rest());
    }

    #[test]
    fn test_event_duration() {
        let event = DutyEvent {
            status: DutyStatus::Driving,
            kind: DutyEventKind::Driving,
            start: 30,
            end: 120,
            label: "Driving".to_string(),
        };
        assert_eq!(event.duration_minutes(), 90);
    }
}
