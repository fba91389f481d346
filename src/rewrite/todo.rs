use std::borrow::Cow;
use std::path::Path;

use crate::error::Error;

use super::deletion_set::read_deletion_set;

const KEEP_ACTIONS: [&str; 2] = ["pick", "p"];
const DROP_ACTION: &str = "drop";

/// A line-wise edit of a rebase instruction list.
pub trait TodoTransform {
    fn transform_line<'a>(&self, line: &'a str) -> Cow<'a, str>;

    /// Apply [`Self::transform_line`] to every line. Line order and separators are kept.
    fn transform(&self, todo: &str) -> String {
        todo.split('\n')
            .map(|line| self.transform_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Turns `pick` lines into `drop` lines when their commit is in the set.
///
/// Hashes match by prefix in either direction, so abbreviated hashes on either side
/// still find each other.
#[derive(Debug, Clone)]
pub struct DropMatching {
    hashes: Vec<String>,
}

impl DropMatching {
    pub fn new<I, S>(hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hashes = hashes
            .into_iter()
            .map(Into::into)
            .map(|h: String| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .collect();
        Self { hashes }
    }

    fn is_pending(&self, reference: &str) -> bool {
        !reference.is_empty()
            && self
                .hashes
                .iter()
                .any(|h| h.starts_with(reference) || reference.starts_with(h.as_str()))
    }
}

impl TodoTransform for DropMatching {
    fn transform_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let Some((action, rest)) = line.split_once(' ') else {
            return Cow::Borrowed(line);
        };
        if !KEEP_ACTIONS.contains(&action) {
            return Cow::Borrowed(line);
        }
        let reference = rest.split(' ').next().unwrap_or_default();
        if self.is_pending(reference) {
            Cow::Owned(format!("{DROP_ACTION} {rest}"))
        } else {
            Cow::Borrowed(line)
        }
    }
}

/// Editor entry point: rewrite the instruction list at `todo_path` in place, dropping the
/// commits listed in the deletion set at `set_path`. Returns how many lines changed.
///
/// # Errors
/// Returns an error when either file cannot be read or the list cannot be written back.
pub fn edit_todo_file(set_path: &Path, todo_path: &Path) -> Result<usize, Error> {
    let transform = DropMatching::new(read_deletion_set(set_path)?);
    let todo_err = |source: std::io::Error| Error::TodoIo {
        path: todo_path.to_path_buf(),
        source,
    };
    let original = std::fs::read_to_string(todo_path).map_err(todo_err)?;
    let edited = transform.transform(&original);
    let changed = original
        .split('\n')
        .zip(edited.split('\n'))
        .filter(|(before, after)| before != after)
        .count();
    std::fs::write(todo_path, edited).map_err(todo_err)?;
    tracing::debug!(changed, todo = %todo_path.display(), "instruction list edited");
    Ok(changed)
}
