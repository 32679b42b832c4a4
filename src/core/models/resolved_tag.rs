use std::fmt;

/// Where a resolved tag came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSource {
    /// Passed in explicitly and returned unchanged.
    User,
    /// Derived from the current date and the HEAD commit.
    Generated,
}

/// A release tag ready to be stamped on a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTag {
    pub value: String,
    pub source: TagSource,
}

impl fmt::Display for ResolvedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
