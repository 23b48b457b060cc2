pub mod issue;

pub use issue::{Issue, IssueFields};
