use crate::core::errors::Result;

/// Port for asking version control which commit is checked out.
///
/// `GitCommitSource` is the production adapter; tests supply fixed ids.
pub trait CommitSource {
    /// Full identifier of the current commit (e.g. a 40-char SHA-1).
    fn head_commit(&self) -> Result<String>;
}
