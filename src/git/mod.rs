mod history;
mod log;
mod runner;

pub use runner::{DefaultGitRunner, GitRunner};

pub(crate) use history::{
    commit_dated, force_push_head, push_head, rebase_from_root, reset_hard, stage,
};
pub use log::read_log;
