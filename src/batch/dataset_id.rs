// src/batch/dataset_id.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BotError;

/// A `<group>/<name>` leaderboard identifier.
///
/// Neither half may be empty, `.` or `..`, so the id always names a file
/// inside the leaderboard root.
///
/// Both halves are kept so the storage path can be built without re-splitting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DatasetId {
    group: String,
    name: String,
}

impl DatasetId {
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relative path of the markdown file holding this leaderboard.
    pub fn markdown_path(&self) -> String {
        format!("{}/{}.md", self.group, self.name)
    }
}

impl TryFrom<String> for DatasetId {
    type Error = BotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for DatasetId {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((group, name)) if is_segment(group) && is_segment(name) => {
                Ok(Self {
                    group: group.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(BotError::InvalidDatasetId(s.to_string())),
        }
    }
}

fn is_segment(part: &str) -> bool {
    !part.is_empty() && part != "." && part != ".." && !part.contains('/')
}

impl From<DatasetId> for String {
    fn from(id: DatasetId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.name)
    }
}
