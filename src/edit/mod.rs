//! Search-and-replace edits committed straight to a repository.

pub mod substitute;
pub mod workflow;

pub use substitute::{Substitution, substitute_all};
pub use workflow::{
    DEFAULT_COMMIT_MESSAGE, EditOutcome, EditRequest, EditStage, replace_in_file,
    replace_in_file_with_host,
};
