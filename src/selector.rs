use std::collections::HashSet;
use std::path::Path;

use chrono::{Local, NaiveDate, TimeZone};

use crate::error::Error;
use crate::git::{GitRunner, read_log};
use crate::types::Commit;

/// Hashes of commits dated on `target` in local time, in log order.
///
/// # Errors
/// Returns an error when the log cannot be read.
pub fn commits_by_date(
    repo: &Path,
    git: &dyn GitRunner,
    target: NaiveDate,
) -> Result<Vec<String>, Error> {
    let log = read_log(repo, git, None)?;
    Ok(hashes(filter_by_date(&log, target, &Local)))
}

/// Hashes of commits dated within `start..=end` in local time and not on an `exclude`
/// day, in log order.
///
/// # Errors
/// Returns an error when the log cannot be read.
pub fn commits_by_range(
    repo: &Path,
    git: &dyn GitRunner,
    start: NaiveDate,
    end: NaiveDate,
    exclude: &[NaiveDate],
) -> Result<Vec<String>, Error> {
    let log = read_log(repo, git, None)?;
    Ok(hashes(filter_by_range(&log, start, end, exclude, &Local)))
}

/// Commits whose date falls on `target` once converted to `tz`.
#[must_use]
pub fn filter_by_date<'a, Tz: TimeZone>(
    log: &'a [Commit],
    target: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Commit> {
    log.iter().filter(|c| c.day_in(tz) == target).collect()
}

#[must_use]
pub fn filter_by_range<'a, Tz: TimeZone>(
    log: &'a [Commit],
    start: NaiveDate,
    end: NaiveDate,
    exclude: &[NaiveDate],
    tz: &Tz,
) -> Vec<&'a Commit> {
    let exclude: HashSet<NaiveDate> = exclude.iter().copied().collect();
    log.iter()
        .filter(|c| {
            let day = c.day_in(tz);
            start <= day && day <= end && !exclude.contains(&day)
        })
        .collect()
}

fn hashes(commits: Vec<&Commit>) -> Vec<String> {
    commits.into_iter().map(|c| c.hash.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, Utc};

    fn commit(hash: &str, date: &str) -> Commit {
        Commit {
            hash: hash.to_string(),
            date: DateTime::parse_from_rfc3339(date).expect("date"),
            message: format!("commit {hash}"),
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().expect("day")
    }

    fn berlin_summer() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).expect("offset")
    }

    fn hash_list(commits: &[&Commit]) -> Vec<String> {
        commits.iter().map(|c| c.hash.clone()).collect()
    }

    #[test]
    fn by_date_keeps_exact_day_in_log_order() {
        let log = vec![
            commit("d16", "2023-06-16T09:00:00+00:00"),
            commit("b15", "2023-06-15T23:59:59+00:00"),
            commit("a15", "2023-06-15T00:00:00+00:00"),
            commit("c14", "2023-06-14T12:00:00+00:00"),
        ];
        let picked = filter_by_date(&log, day("2023-06-15"), &Utc);
        assert_eq!(hash_list(&picked), ["b15", "a15"]);
    }

    #[test]
    fn by_date_converts_to_local_zone() {
        // 23:30 at -05:00 is 06:30 on the 16th in Berlin
        let log = vec![commit("late", "2023-06-15T23:30:00-05:00")];
        let tz = berlin_summer();
        assert_eq!(filter_by_date(&log, day("2023-06-16"), &tz).len(), 1);
        assert!(filter_by_date(&log, day("2023-06-15"), &tz).is_empty());
    }

    #[test]
    fn by_range_converts_to_local_zone() {
        let log = vec![
            commit("edge", "2023-01-31T23:30:00+00:00"),
            commit("early", "2022-12-31T23:30:00+00:00"),
        ];
        let picked = filter_by_range(
            &log,
            day("2023-01-01"),
            day("2023-01-31"),
            &[],
            &berlin_summer(),
        );
        assert_eq!(hash_list(&picked), ["early"]);
    }

    #[test]
    fn by_range_is_inclusive_and_honours_exclusions() {
        let log = vec![
            commit("feb01", "2023-02-01T00:00:00+00:00"),
            commit("jan31", "2023-01-31T23:00:00+00:00"),
            commit("jan15", "2023-01-15T12:00:00+00:00"),
            commit("jan10", "2023-01-10T12:00:00+00:00"),
            commit("jan01", "2023-01-01T00:00:00+00:00"),
            commit("dec31", "2022-12-31T23:59:59+00:00"),
        ];
        let picked = filter_by_range(
            &log,
            day("2023-01-01"),
            day("2023-01-31"),
            &[day("2023-01-15")],
            &Utc,
        );
        assert_eq!(hash_list(&picked), ["jan31", "jan10", "jan01"]);
    }

    #[cfg(unix)]
    #[test]
    fn reads_full_log_through_git() {
        use crate::testutil::FakeGit;

        let git = FakeGit::default().with_stdout(
            "log",
            "bbb\u{1f}2023-06-15T12:00:00+00:00\u{1f}second\n\
             aaa\u{1f}2023-06-10T12:00:00+00:00\u{1f}first\n",
        );
        let picked = commits_by_date(Path::new("/work/repo"), &git, day("2023-06-15"))
            .expect("select");
        assert_eq!(picked, ["bbb"]);
        assert_eq!(git.commands(), ["log --format=%H%x1f%aI%x1f%s"]);
    }

    #[cfg(unix)]
    #[test]
    fn log_failure_propagates() {
        use crate::testutil::FakeGit;

        let git = FakeGit::failing_on("log");
        let err = commits_by_range(
            Path::new("/work/repo"),
            &git,
            day("2023-01-01"),
            day("2023-01-31"),
            &[],
        )
        .expect_err("log fails");
        assert!(matches!(err, Error::CommandFailure { .. }));
    }

    #[test]
    fn by_range_with_reversed_bounds_selects_nothing() {
        let log = vec![commit("jan10", "2023-01-10T12:00:00+00:00")];
        assert!(filter_by_range(&log, day("2023-01-31"), day("2023-01-01"), &[], &Utc).is_empty());
    }
}
