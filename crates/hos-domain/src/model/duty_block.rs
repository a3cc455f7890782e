//! Generated schedule blocks

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::duty_period::{DutyPeriod, DutyStatus};

/// One block of a generated duty schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyBlock {
    /// Sequence label ("block-1", "block-2", ...)
    pub id: String,
    pub status: DutyStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub remarks: String,
}

impl DutyBlock {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// Blocks replace a log's duty periods wholesale, so they convert 1:1
impl From<&DutyBlock> for DutyPeriod {
    fn from(block: &DutyBlock) -> Self {
        DutyPeriod {
            status: block.status,
            start_time: block.start_time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            end_time: Some(block.end_time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            notes: Some(block.remarks.clone()),
        }
    }
}
