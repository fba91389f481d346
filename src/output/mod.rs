pub mod json;
pub mod tab;

pub use json::to_json;
pub use tab::{TabStyle, format_tab};

use crate::types::Commit;

/// Commits a destructive command would remove, shown instead of acting on `--dry-run`.
#[derive(Debug, Clone)]
pub struct Preview {
    pub title: String,
    pub commits: Vec<Commit>,
}
