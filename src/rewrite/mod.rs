mod deletion_set;
mod executor;
mod todo;

pub use deletion_set::{DeletionSetFile, read_deletion_set};
pub use executor::{EditorCommand, HistoryRewriter, RewriteState};
pub use todo::{DropMatching, TodoTransform, edit_todo_file};
