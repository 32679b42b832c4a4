use chrono::NaiveDate;
use tracing::debug;

use crate::core::errors::{Result, RunparcelError};
use crate::core::models::resolved_tag::{ResolvedTag, TagSource};
use crate::core::traits::commit_source::CommitSource;

/// Number of commit-id characters kept in a generated tag.
pub const SHORT_COMMIT_LEN: usize = 7;

/// Date layout of generated tags (`2024.05.31`).
pub const TAG_DATE_FORMAT: &str = "%Y.%m.%d";

/// Picks the release tag: the user's if given, otherwise
/// `<YYYY.MM.DD>.<short commit>`.
pub struct TagResolver<'a> {
    commits: &'a dyn CommitSource,
}

impl<'a> TagResolver<'a> {
    pub fn new(commits: &'a dyn CommitSource) -> Self {
        Self { commits }
    }

    /// Resolve the tag for `today`.
    ///
    /// A non-empty `user_tag` is returned unchanged and version control
    /// is never consulted.
    ///
    /// # Errors
    ///
    /// - `Vcs` if the current commit cannot be determined.
    /// - `TagFormat` if the commit id is shorter than 7 characters.
    pub fn resolve(&self, user_tag: Option<&str>, today: NaiveDate) -> Result<ResolvedTag> {
        if let Some(tag) = user_tag.filter(|t| !t.is_empty()) {
            return Ok(ResolvedTag {
                value: tag.to_string(),
                source: TagSource::User,
            });
        }

        let commit = self.commits.head_commit()?;
        if commit.chars().count() < SHORT_COMMIT_LEN {
            return Err(RunparcelError::TagFormat { commit });
        }
        let short: String = commit.chars().take(SHORT_COMMIT_LEN).collect();
        let value = format!("{}.{short}", today.format(TAG_DATE_FORMAT));
        debug!(commit = %commit, tag = %value, "generated tag");

        Ok(ResolvedTag {
            value,
            source: TagSource::Generated,
        })
    }
}
