use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

/// One entry of the branch log, as recorded by git.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    // Author date with the offset it was recorded in
    pub date: DateTime<FixedOffset>,
    pub message: String,
}

impl Commit {
    /// Calendar day of the commit once converted to `tz`.
    #[must_use]
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.date.with_timezone(tz).date_naive()
    }

    #[must_use]
    pub fn short_hash(&self) -> &str {
        &self.hash[..self.hash.len().min(8)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    NothingToDelete,
    Rewritten { selected: usize },
}
