//! Duty schedule generation

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::model::{parse_instant, DutyBlock, DutyStatus};

pub const INSPECTION_MINUTES: i64 = 30;
pub const BREAK_MINUTES: i64 = 30;
/// Longest driving leg before a break is inserted
pub const MAX_DRIVING_LEG_HOURS: f64 = 8.0;
pub const DEFAULT_START_HOUR: i64 = 6;

/// Generate a schedule starting at an ISO-8601 instant.
///
/// An unparsable start falls back to 06:00 UTC today.
pub fn generate_schedule(
    start_time: &str,
    total_driving_hours: f64,
    cycle_hours_used: f64,
) -> Vec<DutyBlock> {
    let start = parse_instant(start_time).unwrap_or_else(|| default_start(Utc::now().date_naive()));
    generate_schedule_from(start, total_driving_hours, cycle_hours_used)
}

/// 06:00 UTC on the given day
pub fn default_start(today: NaiveDate) -> DateTime<Utc> {
    today.and_time(NaiveTime::MIN).and_utc() + Duration::hours(DEFAULT_START_HOUR)
}

/// Generate a schedule: pre-trip inspection, driving legs of at most
/// eight hours separated by 30-minute breaks, post-trip inspection.
///
/// Blocks are contiguous. `_cycle_hours_used` is part of the call contract
/// but the generator does not consult it; evaluate the result to learn
/// whether the cycle allows it.
pub fn generate_schedule_from(
    start: DateTime<Utc>,
    total_driving_hours: f64,
    _cycle_hours_used: f64,
) -> Vec<DutyBlock> {
    let mut builder = ScheduleBuilder::new(start);
    builder.push(DutyStatus::OnDuty, INSPECTION_MINUTES, "Pre-trip inspection".to_string());

    let mut remaining = if total_driving_hours.is_finite() {
        total_driving_hours
    } else {
        0.0
    };
    while remaining > 0.0 {
        let drive_time = remaining.min(MAX_DRIVING_LEG_HOURS);
        // Whole minutes only; the fraction is dropped from wall-clock time.
        let drive_minutes = (drive_time * 60.0) as i64;
        builder.push(DutyStatus::Driving, drive_minutes, format!("Driving {}h", drive_time));
        remaining -= drive_time;

        if remaining > 0.0 {
            builder.push(DutyStatus::OffDuty, BREAK_MINUTES, "Required 30-minute break".to_string());
        }
    }

    builder.push(DutyStatus::OnDuty, INSPECTION_MINUTES, "Post-trip inspection".to_string());
    builder.finish()
}

struct ScheduleBuilder {
    blocks: Vec<DutyBlock>,
    cursor: DateTime<Utc>,
}

impl ScheduleBuilder {
    fn new(start: DateTime<Utc>) -> Self {
        Self {
            blocks: Vec::new(),
            cursor: start,
        }
    }

    fn push(&mut self, status: DutyStatus, minutes: i64, remarks: String) {
        let end = self.cursor + Duration::minutes(minutes);
        self.blocks.push(DutyBlock {
            id: format!("block-{}", self.blocks.len() + 1),
            status,
            start_time: self.cursor,
            end_time: end,
            remarks,
        });
        self.cursor = end;
    }

    fn finish(self) -> Vec<DutyBlock> {
        self.blocks
    }
}
