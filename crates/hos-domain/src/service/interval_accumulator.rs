//! Duty-time accumulation over a list of duty periods

use crate::model::{DutyPeriod, DutyStatus};

/// Minimum off-duty or sleeper-berth length that counts as a break
pub const QUALIFYING_BREAK_HOURS: f64 = 0.5;

/// Hours accumulated from a list of duty periods
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DutyTotals {
    pub driving_hours: f64,
    pub on_duty_hours: f64,
    /// On-duty total at the end of the last qualifying break
    pub last_rest_break: f64,
}

impl DutyTotals {
    /// Driving plus on-duty (not driving) time
    pub fn on_duty_used(&self) -> f64 {
        self.driving_hours + self.on_duty_hours
    }

    /// On-duty hours since the last qualifying break
    pub fn since_last_break(&self) -> f64 {
        self.on_duty_used() - self.last_rest_break
    }
}

/// Sum durations per status, in input order.
///
/// Periods without a parseable closed interval are skipped. A qualifying
/// rest records a checkpoint of the on-duty total so far; it does not reset
/// any counter.
pub fn accumulate(periods: &[DutyPeriod]) -> DutyTotals {
    let mut totals = DutyTotals::default();
    let mut on_duty_so_far = 0.0;

    for period in periods {
        let Some(duration) = period.duration_hours() else {
            continue;
        };
        match period.status {
            DutyStatus::Driving => {
                totals.driving_hours += duration;
                on_duty_so_far += duration;
            }
            DutyStatus::OnDuty => {
                totals.on_duty_hours += duration;
                on_duty_so_far += duration;
            }
            DutyStatus::OffDuty | DutyStatus::SleeperBerth => {
                if duration >= QUALIFYING_BREAK_HOURS {
                    totals.last_rest_break = on_duty_so_far;
                }
            }
        }
    }

    totals
}
