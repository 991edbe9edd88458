//! Read-only queries over public repositories.

pub mod listing;
pub mod ownership;

pub use listing::{fetch_public_repos, fetch_public_repos_with_host};
pub use ownership::{Ownership, check_ownership, check_ownership_with_host};
