//! Merging of configuration trees
//!
//! [`MergeStrategy`] selects how two trees combine; [`engine`] does the work.

pub mod engine;

pub use engine::{merge, merge_all, merge_trees};

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How values from a later source combine with values from an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum MergeStrategy {
    /// Later top-level keys overwrite earlier ones wholesale.
    Replace,
    /// Mappings merge recursively; sequences and scalars are overwritten.
    MergeMaps,
    /// Like [`MergeStrategy::MergeMaps`], but sequences are concatenated.
    #[default]
    MergeMapsAndSequences,
}

impl MergeStrategy {
    pub const ALL: [MergeStrategy; 3] =
        [MergeStrategy::Replace, MergeStrategy::MergeMaps, MergeStrategy::MergeMapsAndSequences];

    /// Stable token used on the command line and in settings files.
    pub fn as_str(self) -> &'static str {
        match self {
            MergeStrategy::Replace => "replace",
            MergeStrategy::MergeMaps => "merge_dicts",
            MergeStrategy::MergeMapsAndSequences => "merge_dicts_and_lists",
        }
    }

    pub(crate) fn merges_maps(self) -> bool {
        !matches!(self, MergeStrategy::Replace)
    }

    pub(crate) fn concatenates_sequences(self) -> bool {
        matches!(self, MergeStrategy::MergeMapsAndSequences)
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeStrategy {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        MergeStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == token)
            .ok_or_else(|| Error::InvalidStrategy(token.to_string()))
    }
}

impl TryFrom<String> for MergeStrategy {
    type Error = Error;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<MergeStrategy> for &'static str {
    fn from(strategy: MergeStrategy) -> Self {
        strategy.as_str()
    }
}
