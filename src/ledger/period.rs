use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Inclusive date range a report is cut on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportingPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LedgerError> {
        if end < start {
            return Err(LedgerError::InvalidPeriod(format!(
                "period end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Calendar fiscal year, the OHADA default.
    pub fn fiscal_year(year: i32) -> Result<Self, LedgerError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| LedgerError::InvalidPeriod(format!("year {year} out of range")))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| LedgerError::InvalidPeriod(format!("year {year} out of range")))?;
        Self::new(start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Whether the range covers exactly one calendar year.
    pub fn is_fiscal_year(&self) -> bool {
        self.start.year() == self.end.year()
            && self.start.ordinal() == 1
            && self.end.month() == 12
            && self.end.day() == 31
    }
}

/// Which posted entries a balance snapshot is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotScope {
    /// Every posted entry regardless of date.
    #[default]
    AllTime,
    /// Posted entries dated inside the period, bounds included.
    Period(ReportingPeriod),
}

impl SnapshotScope {
    pub fn includes(&self, date: NaiveDate) -> bool {
        match self {
            SnapshotScope::AllTime => true,
            SnapshotScope::Period(period) => period.contains(date),
        }
    }
}
