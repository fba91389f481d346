use std::path::Path;

use chrono::DateTime;

use crate::error::Error;
use crate::types::Commit;

use super::{GitRunner, history::run_checked};

const FIELD_SEP: char = '\u{1f}';
const LOG_FORMAT: &str = "--format=%H%x1f%aI%x1f%s";

/// Read the branch log, newest first. `limit` caps the number of entries.
///
/// # Errors
/// Returns an error when git cannot be run, exits non-zero (for example outside a
/// repository or before the first commit), or prints a line that cannot be parsed.
pub fn read_log(
    repo: &Path,
    git: &dyn GitRunner,
    limit: Option<u64>,
) -> Result<Vec<Commit>, Error> {
    let max_count = limit.map(|n| format!("--max-count={n}"));
    let mut args = vec!["log", LOG_FORMAT];
    if let Some(max_count) = &max_count {
        args.push(max_count);
    }
    let output = run_checked(repo, git, &args, &[])?;
    parse_log(&String::from_utf8_lossy(&output.stdout))
}

pub(crate) fn parse_log(text: &str) -> Result<Vec<Commit>, Error> {
    let mut commits = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let mut parts = line.splitn(3, FIELD_SEP);
        let (Some(hash), Some(date)) = (parts.next(), parts.next()) else {
            return Err(Error::LogParse {
                line: line.to_string(),
            });
        };
        let message = parts.next().unwrap_or_default();
        let date = DateTime::parse_from_rfc3339(date).map_err(|source| Error::DateParse {
            value: date.to_string(),
            source,
        })?;
        commits.push(Commit {
            hash: hash.to_string(),
            date,
            message: message.to_string(),
        });
    }
    Ok(commits)
}
