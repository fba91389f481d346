use std::path::Path;
use std::process::Output;

use crate::error::Error;

use super::GitRunner;

/// Run git and turn a non-zero exit into `Error::CommandFailure`.
pub(crate) fn run_checked(
    repo: &Path,
    git: &dyn GitRunner,
    args: &[&str],
    envs: &[(&str, &str)],
) -> Result<Output, Error> {
    let command = format!("git {}", args.first().copied().unwrap_or_default());
    let output = git
        .run_git_with_env(repo, args, envs)
        .map_err(|source| Error::CommandIo {
            command: command.clone(),
            source,
        })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(Error::CommandFailure {
            command: format!("git {}", args.join(" ")),
            status: output.status,
            stderr,
        });
    }
    Ok(output)
}

pub(crate) fn stage(repo: &Path, git: &dyn GitRunner, path: &Path) -> Result<(), Error> {
    let path = path.to_string_lossy();
    run_checked(repo, git, &["add", "--", &path], &[]).map(drop)
}

/// Commit the index with both author and committer timestamps forced to `date`.
pub(crate) fn commit_dated(
    repo: &Path,
    git: &dyn GitRunner,
    message: &str,
    date: &str,
) -> Result<(), Error> {
    run_checked(
        repo,
        git,
        &["commit", "--quiet", "-m", message, "--date", date],
        &[("GIT_COMMITTER_DATE", date)],
    )
    .map(drop)
}

pub(crate) fn push_head(repo: &Path, git: &dyn GitRunner, remote: &str) -> Result<(), Error> {
    run_checked(repo, git, &["push", remote, "HEAD"], &[]).map(drop)
}

pub(crate) fn force_push_head(
    repo: &Path,
    git: &dyn GitRunner,
    remote: &str,
) -> Result<(), Error> {
    run_checked(repo, git, &["push", remote, "+HEAD"], &[]).map(drop)
}

pub(crate) fn reset_hard(repo: &Path, git: &dyn GitRunner, n: u64) -> Result<(), Error> {
    let target = format!("HEAD~{n}");
    run_checked(repo, git, &["reset", "--hard", &target], &[]).map(drop)
}

/// Replay the whole branch from its root commit, letting `sequence_editor` edit the
/// instruction list. Conflicts resolve toward the commit being replayed and local
/// changes are stashed around the operation.
pub(crate) fn rebase_from_root(
    repo: &Path,
    git: &dyn GitRunner,
    sequence_editor: &str,
) -> Result<(), Error> {
    run_checked(
        repo,
        git,
        &["rebase", "-i", "--root", "-Xtheirs", "--autostash"],
        &[("GIT_SEQUENCE_EDITOR", sequence_editor)],
    )
    .map(drop)
}
