//! Output formatting module

use serde::Serialize;

use hos_app::app::{DriverLogSummary, TripRoutePlan};
use hos_domain::model::{ComplianceStatus, DutyBlock, HosLog, Severity, TripRecord};
use hos_types::{OutputFormat, Result};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

pub fn output_status(output_format: OutputFormat, status: &ComplianceStatus) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(status);
    }

    println!("\nHOS Status");
    println!("==========");
    println!("Driving used:      {:.2} h", status.driving_hours_used);
    println!("On-duty used:      {:.2} h", status.on_duty_hours_used);
    println!("Cycle used:        {:.2} h", status.cycle_hours_used);
    println!("Until break:       {:.2} h", status.hours_until_break);
    println!("Until off-duty:    {:.2} h", status.hours_until_off_duty);
    println!(
        "Can drive:         {}",
        if status.can_continue_driving { "Yes" } else { "No" }
    );

    if status.violations.is_empty() {
        println!("\nNo violations or warnings.");
    } else {
        println!("\n{:<10} {:<28} Description", "Severity", "Type");
        println!("{}", "-".repeat(70));
        for v in &status.violations {
            let severity = match v.severity {
                Severity::Violation => "VIOLATION",
                Severity::Warning => "warning",
            };
            println!("{:<10} {:<28} {}", severity, v.violation_type.as_str(), v.description);
        }
    }

    Ok(())
}

pub fn output_schedule(output_format: OutputFormat, schedule: &[DutyBlock]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(schedule);
    }

    print_schedule_table(schedule);
    Ok(())
}

fn print_schedule_table(schedule: &[DutyBlock]) {
    println!("\n{:<9} {:<14} {:<17} {:<17} {:>6}  Remarks", "Block", "Status", "Start", "End", "Min");
    println!("{}", "-".repeat(90));
    for block in schedule {
        println!(
            "{:<9} {:<14} {:<17} {:<17} {:>6}  {}",
            block.id,
            block.status.label(),
            block.start_time.format("%Y-%m-%d %H:%M"),
            block.end_time.format("%Y-%m-%d %H:%M"),
            block.duration_minutes(),
            block.remarks
        );
    }
}

pub fn output_route_plan(output_format: OutputFormat, plan: &TripRoutePlan) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(plan);
    }

    let route = &plan.route.route;
    println!("\nRoute Plan");
    println!("==========");
    println!("Distance:          {:.1} mi", route.distance);
    println!("Driving time:      {:.2} h", route.duration);
    println!("Path points:       {}", route.coordinates.len());

    println!("\n{:<4} {:<16} {:<21} {:>5}  Description", "#", "Type", "ETA", "Min");
    println!("{}", "-".repeat(80));
    for wp in &route.waypoints {
        println!(
            "{:<4} {:<16} {:<21} {:>5}  {}{}",
            wp.id,
            wp.waypoint_type.as_str(),
            wp.estimated_arrival,
            wp.duration_minutes,
            wp.description,
            if wp.is_mandatory { " (mandatory)" } else { "" }
        );
    }

    print_schedule_table(&plan.hos_schedule);
    output_status(OutputFormat::Table, &plan.hos_status)
}

pub fn output_log(output_format: OutputFormat, log: &HosLog) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(log);
    }

    println!("\nHOS Log {}", log.id);
    println!("==========================================");
    println!("Driver:            {}", log.driver_id);
    println!("Trip:              {}", log.trip_id.as_deref().unwrap_or("-"));
    println!("Time zone:         {}", log.time_zone);
    println!("Cycle hours used:  {:.2}", log.cycle_hours_used);
    println!("Created:           {}", log.created_at.format("%Y-%m-%d %H:%M:%S"));

    println!("\nDuty periods ({})", log.duty_periods.len());
    for p in &log.duty_periods {
        println!(
            "  {:<14} {} -> {}  {}",
            p.status.label(),
            p.start_time,
            p.end_time.as_deref().unwrap_or("(open)"),
            p.notes.as_deref().unwrap_or("")
        );
    }

    println!("\nViolations ({})", log.violations.len());
    for r in &log.violations {
        println!(
            "  [{}] {:<26} {}{}",
            r.violation.severity,
            r.violation.violation_type.as_str(),
            r.violation.description,
            if r.resolved { " (resolved)" } else { "" }
        );
    }

    Ok(())
}

pub fn output_log_list(output_format: OutputFormat, logs: &[HosLog]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(logs);
    }

    if logs.is_empty() {
        println!("No logs found.");
        return Ok(());
    }

    println!("\n{:<38} {:<16} {:>8} {:>8}  Created", "ID", "Driver", "Periods", "Issues");
    println!("{}", "-".repeat(90));
    for log in logs {
        println!(
            "{:<38} {:<16} {:>8} {:>8}  {}",
            log.id,
            truncate(&log.driver_id, 16),
            log.duty_periods.len(),
            log.violations.len(),
            log.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    println!("\nTotal: {} logs", logs.len());
    Ok(())
}

pub fn output_driver_history(output_format: OutputFormat, rows: &[DriverLogSummary]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(rows);
    }

    println!("\n{:<38} {:>8} {:>10} {:>9}  Created", "Log", "Periods", "Violations", "Warnings");
    println!("{}", "-".repeat(85));
    for row in rows {
        println!(
            "{:<38} {:>8} {:>10} {:>9}  {}",
            row.log_id,
            row.duty_periods,
            row.open_violations,
            row.open_warnings,
            row.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

pub fn output_trip(output_format: OutputFormat, trip: &TripRecord) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(trip);
    }

    let location = |loc: &hos_domain::model::TripLocation| match (&loc.coordinates, &loc.address) {
        (Some(c), Some(a)) => format!("{} ({})", a, c),
        (Some(c), None) => c.to_string(),
        (None, Some(a)) => a.clone(),
        (None, None) => "-".to_string(),
    };

    println!("\nTrip {}", trip.id);
    println!("==========================================");
    println!("Status:            {:?}", trip.status);
    println!("Driver:            {}", trip.driver_id.as_deref().unwrap_or("-"));
    println!("Vehicle:           {}", trip.vehicle_id.as_deref().unwrap_or("-"));
    println!("Cycle hours:       {:.2}", trip.current_cycle_hours);
    println!("Current location:  {}", location(&trip.current_location));
    println!("Pickup:            {}", location(&trip.pickup_location));
    println!("Dropoff:           {}", location(&trip.dropoff_location));

    if !trip.waypoints.is_empty() {
        println!("\nWaypoints ({})", trip.waypoints.len());
        for wp in &trip.waypoints {
            println!(
                "  {:<16} {}  {}",
                wp.waypoint_type.as_str(),
                wp.eta.format("%Y-%m-%d %H:%M"),
                wp.reason.as_deref().unwrap_or(&wp.address)
            );
        }
    }

    Ok(())
}

pub fn output_trip_list(output_format: OutputFormat, trips: &[TripRecord]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(trips);
    }

    if trips.is_empty() {
        println!("No trips found.");
        return Ok(());
    }

    println!("\n{:<38} {:<16} {:>10}  Created", "ID", "Driver", "Waypoints");
    println!("{}", "-".repeat(80));
    for trip in trips {
        println!(
            "{:<38} {:<16} {:>10}  {}",
            trip.id,
            truncate(trip.driver_id.as_deref().unwrap_or("-"), 16),
            trip.waypoints.len(),
            trip.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
