//! CSV loader for duty periods
//!
//! Expected columns (header optional):
//! status, start_time, end_time, [notes]

use std::fs::File;
use std::path::Path;

use hos_domain::model::{DutyPeriod, DutyStatus};
use hos_types::{Error, Result};

/// Load duty periods from a CSV file.
///
/// Rows with an unknown status or fewer than two columns are skipped. An
/// empty `end_time` leaves the period open.
pub fn load_duty_periods_from_csv(path: &Path) -> Result<Vec<DutyPeriod>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    load_duty_periods(File::open(path)?)
}

pub fn load_duty_periods<R: std::io::Read>(source: R) -> Result<Vec<DutyPeriod>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(source);

    let mut periods = Vec::new();
    let mut skipped = 0usize;
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        if row_idx == 0 && is_header(&record) {
            continue;
        }
        match parse_record(&record) {
            Some(period) => periods.push(period),
            None => {
                if record.iter().any(|field| !field.is_empty()) {
                    skipped += 1;
                    tracing::warn!(row = row_idx + 1, "skipping unreadable duty period row");
                }
            }
        }
    }

    tracing::debug!(loaded = periods.len(), skipped, "duty periods loaded from CSV");
    Ok(periods)
}

fn is_header(record: &csv::StringRecord) -> bool {
    let first = record.get(0).unwrap_or("").to_lowercase();
    let second = record.get(1).unwrap_or("").to_lowercase();
    first == "status" || first == "duty_status" || second.contains("start")
}

fn parse_record(record: &csv::StringRecord) -> Option<DutyPeriod> {
    let status: DutyStatus = record.get(0)?.parse().ok()?;
    let start_time = record.get(1).filter(|s| !s.is_empty())?.to_string();
    let end_time = record
        .get(2)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    let notes = record
        .get(3)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Some(DutyPeriod {
        status,
        start_time,
        end_time,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_with_header() {
        let data = "status,start_time,end_time,notes\n\
                    driving,2025-09-20T06:00:00,2025-09-20T10:00:00,Leg one\n\
                    off_duty,2025-09-20T10:00:00,2025-09-20T10:30:00\n";
        let periods = load_duty_periods(data.as_bytes()).unwrap();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].status, DutyStatus::Driving);
        assert_eq!(periods[0].notes.as_deref(), Some("Leg one"));
        assert_eq!(periods[1].notes, None);
        assert_eq!(periods[1].duration_hours(), Some(0.5));
    }

    #[test]
    fn test_load_without_header_skips_unknown_status() {
        let data = "driving,2025-09-20T06:00:00,2025-09-20T07:00:00\n\
                    yard_move,2025-09-20T07:00:00,2025-09-20T08:00:00\n\
                    sleeper_berth,2025-09-20T08:00:00,\n";
        let periods = load_duty_periods(data.as_bytes()).unwrap();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[1].status, DutyStatus::SleeperBerth);
        assert!(periods[1].end_time.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "on_duty, 2025-09-20T05:30:00 , 2025-09-20T06:00:00").unwrap();
        let periods = load_duty_periods_from_csv(file.path()).unwrap();
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].start_time, "2025-09-20T05:30:00");
    }

    #[test]
    fn test_missing_file() {
        let result = load_duty_periods_from_csv(Path::new("/nonexistent/duty.csv"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
