// ── Validity window ──
//
// The [start, end] range a pass can be used in. The end date is always
// derived from the start date and duration.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::PassDuration;

/// End date of a pass starting on `start`.
///
/// - week: start + 6 days (seven travel days inclusive)
/// - month: start + 1 calendar month − 1 day; a start on the 29th–31st
///   clamps to the last day of the next month before stepping back
///
/// `None` when there is no start date (or at the edge of the calendar).
pub fn compute_end_date(start: Option<NaiveDate>, duration: PassDuration) -> Option<NaiveDate> {
    let start = start?;
    match duration {
        PassDuration::Week => start.checked_add_days(Days::new(6)),
        PassDuration::Month => start
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt()),
    }
}

/// Inclusive validity range of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ValidityWindow {
    /// Window for a pass of `duration` starting on `start`.
    pub fn starting(start: NaiveDate, duration: PassDuration) -> Option<Self> {
        compute_end_date(Some(start), duration).map(|end| Self { start, end })
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of travel days, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
