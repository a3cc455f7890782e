//! Command handlers

use std::path::PathBuf;

use chrono::Utc;
use thiserror::Error;

use crate::cli::{BaselineArgs, Cli, Commands, LogCommands, TripCommands};
use crate::output::{
    output_driver_history, output_log, output_log_list, output_route_plan, output_schedule,
    output_status, output_trip, output_trip_list,
};
use hos_app::app::{
    compute_route_plan, resolve_location, validate_driving_hours, ComplianceReportService,
    HosLogService, LocationInput, NewLog, NewTrip, PlanningError, RouteRequest, TripService,
};
use hos_app::config::Config;
use hos_app::repository::{open_geocoder, open_log_repo, open_trip_repo};
use hos_domain::model::{parse_instant, ComplianceLimits, DutyPeriod, DutyStatus, HosBaseline, TripLocation};
use hos_domain::service::{evaluate_compliance, generate_schedule};
use hos_infra::duty_csv::load_duty_periods_from_csv;
use hos_types::{Error, OutputFormat};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Core(#[from] Error),

    #[error(transparent)]
    Planning(#[from] PlanningError),
}

type Result<T> = std::result::Result<T, CommandError>;

impl From<BaselineArgs> for HosBaseline {
    fn from(args: BaselineArgs) -> Self {
        HosBaseline {
            driving_hours_used: args.driving_hours_used,
            can_continue_driving: !args.cannot_continue,
        }
    }
}

pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(ref dir) = cli.store_dir {
        config.store_dir = Some(dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    tracing::debug!(store_dir = ?config.store_dir, format = %output_format, "configuration loaded");

    let limits = || config.effective_limits(cli.limits.as_deref());

    match &cli.command {
        Commands::Check {
            periods,
            cycle_hours,
        } => cmd_check(periods.clone(), *cycle_hours, &limits()?, output_format),

        Commands::Schedule {
            start,
            hours,
            cycle_hours,
        } => cmd_schedule(start, *hours, *cycle_hours, &limits()?, output_format),

        Commands::Route {
            origin,
            pickup,
            dropoff,
            baseline,
            departure,
        } => cmd_route(
            &config,
            &limits()?,
            [origin, pickup, dropoff],
            (*baseline).into(),
            departure.as_deref(),
            output_format,
        ),

        Commands::Log { command } => cmd_log(&config, limits()?, command, output_format),

        Commands::Trip { command } => cmd_trip(&config, limits()?, command, output_format),

        Commands::Report { driver, history } => {
            cmd_report(&config, driver.as_deref(), *history, output_format)
        }

        Commands::Config {
            show,
            set_output,
            set_store_dir,
            set_max_driving,
            set_max_on_duty,
            set_max_cycle,
            set_geocoder_url,
            set_country_codes,
            reset,
        } => cmd_config(
            *show,
            *set_output,
            set_store_dir.clone(),
            *set_max_driving,
            *set_max_on_duty,
            *set_max_cycle,
            set_geocoder_url.clone(),
            set_country_codes.clone(),
            *reset,
        ),
    }
}

fn cmd_check(
    csv_path: PathBuf,
    cycle_hours: f64,
    limits: &ComplianceLimits,
    output_format: OutputFormat,
) -> Result<()> {
    let periods = load_duty_periods_from_csv(&csv_path)?;
    if output_format == OutputFormat::Table {
        println!("Loaded {} duty periods from: {}", periods.len(), csv_path.display());
    }

    let status = evaluate_compliance(&periods, cycle_hours, limits);
    output_status(output_format, &status)?;

    if !status.can_continue_driving {
        eprintln!("\nWarning: HOS violation detected, driver may not continue driving");
    }
    Ok(())
}

fn cmd_schedule(
    start: &str,
    hours: f64,
    cycle_hours: f64,
    limits: &ComplianceLimits,
    output_format: OutputFormat,
) -> Result<()> {
    let hours = validate_driving_hours(hours)?;
    let schedule = generate_schedule(start, hours, cycle_hours);
    output_schedule(output_format, &schedule)?;

    if output_format == OutputFormat::Table {
        let periods: Vec<DutyPeriod> = schedule.iter().map(DutyPeriod::from).collect();
        output_status(output_format, &evaluate_compliance(&periods, cycle_hours, limits))?;
    }
    Ok(())
}

fn cmd_route(
    config: &Config,
    limits: &ComplianceLimits,
    points: [&LocationInput; 3],
    baseline: HosBaseline,
    departure: Option<&str>,
    output_format: OutputFormat,
) -> Result<()> {
    let departure = match departure {
        Some(s) => parse_instant(s)
            .ok_or_else(|| Error::InvalidInput(format!("invalid departure time: {}", s)))?,
        None => Utc::now(),
    };

    let geocoder = open_geocoder(config)?;
    let none = TripLocation::default();
    let origin = resolve_location(&geocoder, "origin", points[0], &none)?;
    let pickup = resolve_location(&geocoder, "pickup", points[1], &none)?;
    let dropoff = resolve_location(&geocoder, "dropoff", points[2], &none)?;

    let (plan, _) = compute_route_plan([origin, pickup, dropoff], &baseline, departure, limits);
    output_route_plan(output_format, &plan)?;
    Ok(())
}

fn cmd_log(
    config: &Config,
    limits: ComplianceLimits,
    command: &LogCommands,
    output_format: OutputFormat,
) -> Result<()> {
    let service = HosLogService::new(open_log_repo(config)?, limits);

    match command {
        LogCommands::Create {
            driver,
            cycle_hours,
            trip,
            time_zone,
            shipping_document,
            commodity,
        } => {
            let log = service.create_log(NewLog {
                driver_id: driver.clone(),
                trip_id: trip.clone(),
                cycle_hours_used: *cycle_hours,
                time_zone: time_zone.clone(),
                shipping_document: shipping_document.clone(),
                commodity: commodity.clone(),
            })?;
            if output_format == OutputFormat::Table {
                println!("Created log: {}", log.id);
            }
            output_log(output_format, &log)?;
        }

        LogCommands::AddPeriod {
            log_id,
            status,
            start,
            end,
            notes,
        } => {
            let period = build_period(*status, start, end.as_deref(), notes.as_deref())?;
            let log = service.record_periods(log_id, vec![period], false)?;
            output_log(output_format, &log)?;
        }

        LogCommands::Import {
            log_id,
            file,
            replace,
        } => {
            let periods = load_duty_periods_from_csv(file)?;
            let count = periods.len();
            let log = service.record_periods(log_id, periods, *replace)?;
            if output_format == OutputFormat::Table {
                println!(
                    "{} {} duty periods from: {}",
                    if *replace { "Replaced with" } else { "Imported" },
                    count,
                    file.display()
                );
            }
            output_log(output_format, &log)?;
        }

        LogCommands::Show { log_id } => output_log(output_format, &service.get_log(log_id)?)?,

        LogCommands::List { driver } => {
            output_log_list(output_format, &service.list_logs(driver.as_deref())?)?
        }

        LogCommands::Check { log_id } => {
            let status = service.check_log(log_id)?;
            output_status(output_format, &status)?;
        }

        LogCommands::Schedule {
            log_id,
            start,
            hours,
        } => {
            let schedule = service.schedule_log(log_id, start.as_deref(), *hours)?;
            output_schedule(output_format, &schedule)?;
        }
    }

    Ok(())
}

fn build_period(
    status: DutyStatus,
    start: &str,
    end: Option<&str>,
    notes: Option<&str>,
) -> Result<DutyPeriod> {
    if parse_instant(start).is_none() {
        return Err(Error::InvalidInput(format!("invalid start time: {}", start)).into());
    }
    if let Some(end) = end {
        if parse_instant(end).is_none() {
            return Err(Error::InvalidInput(format!("invalid end time: {}", end)).into());
        }
    }

    Ok(DutyPeriod {
        status,
        start_time: start.to_string(),
        end_time: end.map(str::to_string),
        notes: notes.map(str::to_string),
    })
}

fn cmd_trip(
    config: &Config,
    limits: ComplianceLimits,
    command: &TripCommands,
    output_format: OutputFormat,
) -> Result<()> {
    let service = TripService::new(open_trip_repo(config)?, open_geocoder(config)?, limits);

    match command {
        TripCommands::Create {
            driver,
            vehicle,
            cycle_hours,
            origin,
            pickup,
            dropoff,
            commodity,
        } => {
            let trip = service.create_trip(NewTrip {
                driver_id: driver.clone(),
                vehicle_id: vehicle.clone(),
                current_cycle_hours: *cycle_hours,
                current_location: origin.clone().unwrap_or_default(),
                pickup: pickup.clone().unwrap_or_default(),
                dropoff: dropoff.clone().unwrap_or_default(),
                commodity: commodity.clone(),
            })?;
            if output_format == OutputFormat::Table {
                println!("Created trip: {}", trip.id);
            }
            output_trip(output_format, &trip)?;
        }

        TripCommands::Plan {
            trip_id,
            origin,
            pickup,
            dropoff,
            baseline,
        } => {
            let request = RouteRequest {
                current_location: origin.clone().unwrap_or_default(),
                pickup: pickup.clone().unwrap_or_default(),
                dropoff: dropoff.clone().unwrap_or_default(),
                hos_status: Some((*baseline).into()),
            };
            let plan = service.plan_route(trip_id, request)?;
            output_route_plan(output_format, &plan)?;
        }

        TripCommands::Show { trip_id } => output_trip(output_format, &service.get_trip(trip_id)?)?,

        TripCommands::List => output_trip_list(output_format, &service.list_trips()?)?,
    }

    Ok(())
}

fn cmd_report(
    config: &Config,
    driver: Option<&str>,
    history: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let service = ComplianceReportService::new(open_log_repo(config)?);

    if history {
        let driver = driver.ok_or_else(|| {
            Error::InvalidInput("--history requires --driver".to_string())
        })?;
        return output_driver_history(output_format, &service.driver_history(driver)?)
            .map_err(Into::into);
    }

    match output_format {
        OutputFormat::Json => {
            let summary = service.fleet_summary(driver)?;
            let json = serde_json::to_string_pretty(&summary).map_err(Error::from)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", service.fleet_report(driver)?);
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_output: Option<OutputFormat>,
    set_store_dir: Option<PathBuf>,
    set_max_driving: Option<f64>,
    set_max_on_duty: Option<f64>,
    set_max_cycle: Option<f64>,
    set_geocoder_url: Option<String>,
    set_country_codes: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(dir) = set_store_dir {
        config.store_dir = Some(dir);
        modified = true;
    }

    for (value, slot, name) in [
        (set_max_driving, &mut config.limits.max_driving_hours, "max driving"),
        (set_max_on_duty, &mut config.limits.max_on_duty_hours, "max on-duty"),
        (set_max_cycle, &mut config.limits.max_cycle_hours, "max cycle"),
    ] {
        if let Some(hours) = value {
            if !hours.is_finite() || hours <= 0.0 {
                return Err(Error::InvalidInput(format!(
                    "{} hours must be positive, got {}",
                    name, hours
                ))
                .into());
            }
            *slot = hours;
            modified = true;
        }
    }

    if let Some(url) = set_geocoder_url {
        config.geocoder.base_url = url;
        modified = true;
    }

    if let Some(codes) = set_country_codes {
        config.geocoder.country_codes = codes;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_period_validates_times() {
        let period = build_period(
            DutyStatus::Driving,
            "2025-09-20T06:00:00",
            Some("2025-09-20T08:00:00"),
            Some("Leg"),
        )
        .unwrap();
        assert_eq!(period.duration_hours(), Some(2.0));

        assert!(build_period(DutyStatus::Driving, "yesterday", None, None).is_err());
        assert!(build_period(DutyStatus::Driving, "2025-09-20T06:00:00", Some("later"), None).is_err());
    }

    #[test]
    fn test_schedule_rejects_out_of_range_hours() {
        let limits = ComplianceLimits::default();
        for hours in [0.0, -2.0, 1e12, f64::NAN] {
            assert!(matches!(
                cmd_schedule("2025-09-20T06:00:00", hours, 0.0, &limits, OutputFormat::Json),
                Err(CommandError::Planning(PlanningError::Validation(_)))
            ));
        }
    }

    #[test]
    fn test_baseline_from_args() {
        let baseline: HosBaseline = BaselineArgs {
            driving_hours_used: 4.0,
            cannot_continue: true,
        }
        .into();
        assert_eq!(baseline.driving_hours_used, 4.0);
        assert!(!baseline.can_continue_driving);
    }
}
