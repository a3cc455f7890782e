//! HOS compliance evaluation

use crate::model::{ComplianceLimits, ComplianceStatus, DutyPeriod, Severity, Violation, ViolationType};

use super::interval_accumulator::accumulate;

/// On-duty hours allowed between qualifying breaks
pub const BREAK_AFTER_ON_DUTY_HOURS: f64 = 8.0;

const DRIVE_WARNING_MARGIN: f64 = 1.0;
const ON_DUTY_WARNING_MARGIN: f64 = 2.0;
const CYCLE_WARNING_MARGIN: f64 = 5.0;

/// Evaluate duty periods against the limits.
///
/// Each category yields at most one entry: the exceeded check runs first
/// and the approaching warning is only considered when it fails. Rule
/// breaches are returned as data, never as errors.
pub fn evaluate_compliance(
    periods: &[DutyPeriod],
    cycle_hours_used: f64,
    limits: &ComplianceLimits,
) -> ComplianceStatus {
    let totals = accumulate(periods);
    let on_duty_used = totals.on_duty_used();
    let cycle_hours = cycle_hours_used + on_duty_used;

    let violations: Vec<Violation> = [
        check_limit(
            totals.driving_hours,
            limits.max_driving_hours,
            DRIVE_WARNING_MARGIN,
            (
                ViolationType::DailyDriveLimit,
                format!("Exceeded {} driving hours", hours_label(limits.max_driving_hours)),
            ),
            (ViolationType::ApproachingDriveLimit, "Approaching driving limit"),
        ),
        check_limit(
            on_duty_used,
            limits.max_on_duty_hours,
            ON_DUTY_WARNING_MARGIN,
            (
                ViolationType::DailyOnDutyLimit,
                format!("Exceeded {} on-duty hours", hours_label(limits.max_on_duty_hours)),
            ),
            (ViolationType::ApproachingOnDutyLimit, "Approaching on-duty limit"),
        ),
        check_limit(
            cycle_hours,
            limits.max_cycle_hours,
            CYCLE_WARNING_MARGIN,
            (ViolationType::CycleLimit, "Exceeded cycle hours".to_string()),
            (ViolationType::ApproachingCycleLimit, "Approaching cycle limit"),
        ),
    ]
    .into_iter()
    .flatten()
    .collect();

    let can_continue_driving = !violations.iter().any(Violation::is_violation);

    ComplianceStatus {
        driving_hours_used: totals.driving_hours,
        on_duty_hours_used: totals.on_duty_hours,
        cycle_hours_used: cycle_hours,
        hours_until_break: (BREAK_AFTER_ON_DUTY_HOURS - totals.since_last_break()).max(0.0),
        hours_until_off_duty: (limits.max_on_duty_hours - on_duty_used).max(0.0),
        violations,
        can_continue_driving,
    }
}

/// Shortest exact form of the limit, keeping `.0` on whole numbers
fn hours_label(hours: f64) -> String {
    if hours.is_finite() && hours.fract() == 0.0 {
        format!("{:.1}", hours)
    } else {
        hours.to_string()
    }
}

fn check_limit(
    value: f64,
    limit: f64,
    warning_margin: f64,
    exceeded: (ViolationType, String),
    approaching: (ViolationType, &str),
) -> Option<Violation> {
    if value > limit {
        Some(Violation {
            violation_type: exceeded.0,
            severity: Severity::Violation,
            description: exceeded.1,
        })
    } else if value > limit - warning_margin {
        Some(Violation {
            violation_type: approaching.0,
            severity: Severity::Warning,
            description: approaching.1.to_string(),
        })
    } else {
        None
    }
}
