//! Domain services

pub mod compliance_evaluator;
pub mod compliance_report;
pub mod interval_accumulator;
pub mod response_assembler;
pub mod route_simulator;
pub mod schedule_generator;

pub use compliance_evaluator::evaluate_compliance;
pub use compliance_report::{generate_compliance_report, summarize_logs, FleetComplianceSummary};
pub use interval_accumulator::{accumulate, DutyTotals};
pub use response_assembler::assemble_route_response;
pub use route_simulator::{generate_waypoints, haversine_miles, simulate_route};
pub use schedule_generator::{default_start, generate_schedule, generate_schedule_from};
