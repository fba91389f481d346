use crate::config::Settings;
use crate::error::{Error, RewriteStage};
use crate::git::{GitRunner, force_push_head, reset_hard};

/// Discard the newest `n` commits (and any uncommitted changes) and force-push.
///
/// # Errors
/// Returns `Error::InvalidInput` for `n == 0`, or `Error::Rewrite` when the reset or the
/// push fails.
pub fn delete_last(settings: &Settings, git: &dyn GitRunner, n: u64) -> Result<(), Error> {
    if n == 0 {
        return Err(Error::InvalidInput {
            message: "number of commits to delete must be at least 1".to_string(),
        });
    }
    tracing::info!("deleting last {n} commits");
    let result = reset_hard(&settings.repo, git, n)
        .map_err(|e| Error::rewrite(RewriteStage::Reset, e))
        .and_then(|()| {
            force_push_head(&settings.repo, git, &settings.remote)
                .map_err(|e| Error::rewrite(RewriteStage::Push, e))
        });
    if result.is_ok() {
        tracing::info!("deleted commits and force pushed to {}", settings.remote);
    }
    result
}
