//! Git hook type whitelist
//!
//! Only files named after one of these hook types are picked up from a
//! package's hook directories. Everything else is ignored silently.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A git lifecycle event at which git invokes a single hook script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookType {
    /// `applypatch-msg`
    ApplypatchMsg,
    /// `commit-msg`
    CommitMsg,
    /// `post-update`
    PostUpdate,
    /// `pre-applypatch`
    PreApplypatch,
    /// `pre-commit`
    PreCommit,
    /// `pre-push`
    PrePush,
    /// `pre-rebase`
    PreRebase,
    /// `pre-receive`
    PreReceive,
    /// `prepare-commit-msg`
    PrepareCommitMsg,
    /// `update`
    Update,
}

impl HookType {
    /// Every recognized hook type
    pub const ALL: [HookType; 10] = [
        HookType::ApplypatchMsg,
        HookType::CommitMsg,
        HookType::PostUpdate,
        HookType::PreApplypatch,
        HookType::PreCommit,
        HookType::PrePush,
        HookType::PreRebase,
        HookType::PreReceive,
        HookType::PrepareCommitMsg,
        HookType::Update,
    ];

    /// The file name git expects for this hook
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApplypatchMsg => "applypatch-msg",
            Self::CommitMsg => "commit-msg",
            Self::PostUpdate => "post-update",
            Self::PreApplypatch => "pre-applypatch",
            Self::PreCommit => "pre-commit",
            Self::PrePush => "pre-push",
            Self::PreRebase => "pre-rebase",
            Self::PreReceive => "pre-receive",
            Self::PrepareCommitMsg => "prepare-commit-msg",
            Self::Update => "update",
        }
    }

    /// Look up a hook type by file name
    ///
    /// Returns `None` for any name outside the whitelist.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

/// Check whether `name` is one of the recognized git hook types
#[must_use]
pub fn is_valid_hook_type(name: &str) -> bool {
    HookType::from_file_name(name).is_some()
}

impl FromStr for HookType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_file_name(s).ok_or_else(|| Error::UnknownHookType(s.to_string()))
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
