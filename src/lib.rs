#![forbid(unsafe_code)]
#![deny(warnings, clippy::all, clippy::pedantic)]

mod bulk;
mod config;
mod error;
mod git;
mod sampler;
mod selector;
mod system;
mod types;
mod writer;
pub mod output;
pub mod rewrite;

#[cfg(all(test, unix))]
mod testutil;

pub use bulk::delete_last;
pub use config::{Overrides, Settings, load_settings};
pub use error::{Error, RewriteStage};
pub use git::{DefaultGitRunner, GitRunner, read_log};
pub use sampler::{DateSampler, window_end, window_start};
pub use selector::{commits_by_date, commits_by_range, filter_by_date, filter_by_range};
pub use system::{Clock, DefaultClock, DefaultFsOps, FsOps};
pub use types::{Commit, RewriteOutcome};
pub use writer::CommitWriter;
