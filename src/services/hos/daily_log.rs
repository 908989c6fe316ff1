//! Per-calendar-day log assembly.
//!
//! Pure mapping from the flat event stream to one log per day index
//! (`start / 1440`). Events running past midnight are split into clipped
//! pieces that keep their status and label.

use crate::defaults::{minutes_to_hours, round1, MINUTES_PER_DAY, MINUTES_PER_HOUR};
use crate::types::{DailyLog, DutyEvent, DutyStatus, LogEntry, StatusTotals};

pub fn assemble_daily_logs(events: &[DutyEvent]) -> Vec<DailyLog> {
    let mut logs: Vec<DailyLog> = Vec::new();
    // Raw minutes per day, rounded once at the end
    let mut minutes: Vec<[u32; 4]> = Vec::new();

    for event in events {
        let mut start = event.start;
        while start < event.end {
            let day = start / MINUTES_PER_DAY;
            let day_start = day * MINUTES_PER_DAY;
            let end = event.end.min(day_start + MINUTES_PER_DAY);

            if logs.last().map_or(true, |log| log.day != day + 1) {
                logs.push(DailyLog {
                    day: day + 1,
                    entries: Vec::new(),
                    totals: StatusTotals::default(),
                });
                minutes.push([0; 4]);
            }
            let idx = logs.len() - 1;

            logs[idx].entries.push(LogEntry {
                status: event.status,
                start: format_clock(start - day_start),
                end: format_clock(end - day_start),
                label: event.label.clone(),
            });
            minutes[idx][event.status as usize] += end - start;

            start = end;
        }
    }

    for (log, per_status) in logs.iter_mut().zip(minutes) {
        for status in DutyStatus::ALL {
            *log.totals.slot_mut(status) = round1(minutes_to_hours(per_status[status as usize]));
        }
    }

    logs
}

/// Clock-of-day as zero-padded `HH:MM`; 1440 renders as `24:00`.
pub fn format_clock(minute_of_day: u32) -> String {
    format!(
        "{:02}:{:02}",
        minute_of_day / MINUTES_PER_HOUR,
        minute_of_day % MINUTES_PER_HOUR
    )
}
