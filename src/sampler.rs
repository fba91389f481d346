use chrono::{DateTime, Days, Local, Months};
use rand::Rng;

const MAX_WEEK_OFFSET: u64 = 51;
const MAX_DAY_OFFSET: u64 = 6;

/// Picks pseudo-random dates spread over the trailing year.
pub struct DateSampler<R> {
    rng: R,
}

impl<R: Rng> DateSampler<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// One year before `now`, plus one day, plus 0..=51 weeks and 0..=6 days.
    pub fn sample(&mut self, now: DateTime<Local>) -> DateTime<Local> {
        let weeks = self.rng.gen_range(0..=MAX_WEEK_OFFSET);
        let days = self.rng.gen_range(0..=MAX_DAY_OFFSET);
        offset_from_window_start(now, weeks * 7 + days)
    }
}

/// First day of the sampling window.
#[must_use]
pub fn window_start(now: DateTime<Local>) -> DateTime<Local> {
    offset_from_window_start(now, 0)
}

/// Last day of the sampling window.
#[must_use]
pub fn window_end(now: DateTime<Local>) -> DateTime<Local> {
    offset_from_window_start(now, MAX_WEEK_OFFSET * 7 + MAX_DAY_OFFSET)
}

fn offset_from_window_start(now: DateTime<Local>, days: u64) -> DateTime<Local> {
    // Calendar arithmetic only fails inside DST gaps or at the ends of the
    // representable range; fall back to fixed-length days there.
    now.checked_sub_months(Months::new(12))
        .and_then(|d| d.checked_add_days(Days::new(1 + days)))
        .unwrap_or_else(|| {
            let days = i64::try_from(days).unwrap_or_default();
            now - chrono::Duration::days(365) + chrono::Duration::days(1 + days)
        })
}
