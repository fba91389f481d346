use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{Error, RewriteStage};
use crate::git::{GitRunner, force_push_head, rebase_from_root};
use crate::types::RewriteOutcome;

use super::deletion_set::DeletionSetFile;

const ABORT_HINT: &str =
    "you may need to run \"git rebase --abort\" manually if the rewrite stopped midway";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteState {
    Idle,
    SelectionComputed,
    RewriteStarted,
    RewriteComplete,
    RewriteFailed,
    CleanedUp,
}

/// The program git launches to edit the rebase instruction list.
#[derive(Debug, Clone)]
pub struct EditorCommand {
    program: PathBuf,
}

impl EditorCommand {
    #[must_use]
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }

    /// This very executable, re-entered in editor mode.
    ///
    /// # Errors
    /// Returns an error when the path of the running executable cannot be determined.
    pub fn current_exe() -> Result<Self, Error> {
        std::env::current_exe()
            .map(Self::new)
            .map_err(|source| Error::CommandIo {
                command: "current executable lookup".to_string(),
                source,
            })
    }

    /// Shell command line for `GIT_SEQUENCE_EDITOR`; git appends the todo file path.
    #[must_use]
    pub fn command_line(&self, set_path: &Path) -> String {
        format!(
            "{} --deletion-set {} --editor",
            shell_quote(&self.program.to_string_lossy()),
            shell_quote(&set_path.to_string_lossy())
        )
    }
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Removes arbitrary commits by replaying the whole branch with an edited instruction
/// list, then force-pushes the result.
pub struct HistoryRewriter<'a> {
    settings: &'a Settings,
    git: &'a dyn GitRunner,
    editor: EditorCommand,
    trail: Vec<RewriteState>,
}

impl<'a> HistoryRewriter<'a> {
    pub fn new(settings: &'a Settings, git: &'a dyn GitRunner, editor: EditorCommand) -> Self {
        Self {
            settings,
            git,
            editor,
            trail: Vec::new(),
        }
    }

    /// States visited by the most recent [`Self::delete_by_hashes`] call.
    #[must_use]
    pub fn trail(&self) -> &[RewriteState] {
        &self.trail
    }

    /// Drop every commit whose hash is in `hashes` and force-push the branch.
    ///
    /// The deletion set file is gone by the time this returns, whatever the outcome.
    ///
    /// # Errors
    /// Returns `Error::Rewrite` when the rebase or the push fails, or an I/O error when the
    /// deletion set cannot be written.
    pub fn delete_by_hashes(&mut self, hashes: &[String]) -> Result<RewriteOutcome, Error> {
        self.trail.clear();
        self.enter(RewriteState::Idle);
        if hashes.is_empty() {
            tracing::info!("no commits found to delete");
            return Ok(RewriteOutcome::NothingToDelete);
        }
        tracing::info!("found {} commits to delete", hashes.len());

        let set = DeletionSetFile::create(&self.settings.scratch_dir, hashes)?;
        self.enter(RewriteState::SelectionComputed);

        let result = self.rewrite(&set);
        self.enter(if result.is_ok() {
            RewriteState::RewriteComplete
        } else {
            RewriteState::RewriteFailed
        });

        let cleanup = set.remove();
        self.enter(RewriteState::CleanedUp);

        match (result, cleanup) {
            (Ok(()), Ok(())) => {
                tracing::info!("deleted selected commits and force pushed");
                Ok(RewriteOutcome::Rewritten {
                    selected: hashes.len(),
                })
            }
            (Ok(()), Err(err)) => Err(err),
            (Err(err), cleanup) => {
                if matches!(
                    err,
                    Error::Rewrite {
                        stage: RewriteStage::Rebase,
                        ..
                    }
                ) {
                    tracing::warn!("{ABORT_HINT}");
                }
                if let Err(cleanup_err) = cleanup {
                    tracing::warn!("{cleanup_err}");
                }
                Err(err)
            }
        }
    }

    fn rewrite(&mut self, set: &DeletionSetFile) -> Result<(), Error> {
        let editor = self.editor.command_line(set.path());
        self.enter(RewriteState::RewriteStarted);
        tracing::info!("starting interactive rebase from the root commit");
        rebase_from_root(&self.settings.repo, self.git, &editor)
            .map_err(|e| Error::rewrite(RewriteStage::Rebase, e))?;
        force_push_head(&self.settings.repo, self.git, &self.settings.remote)
            .map_err(|e| Error::rewrite(RewriteStage::Push, e))
    }

    fn enter(&mut self, state: RewriteState) {
        tracing::debug!(?state, "history rewrite");
        self.trail.push(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_quotes_paths() {
        let editor = EditorCommand::new(PathBuf::from("/opt/my tools/backdate"));
        let line = editor.command_line(Path::new("/tmp/it's.json"));
        assert_eq!(
            line,
            r"'/opt/my tools/backdate' --deletion-set '/tmp/it'\''s.json' --editor"
        );
    }
}
