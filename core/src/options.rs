//! Pipeline configuration.

use crate::errors::{Error, Result};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Built-in passes that can be named in options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassKind {
    PrimitiveArrays,
}

impl PassKind {
    pub const ALL: [PassKind; 1] = [PassKind::PrimitiveArrays];

    pub fn as_str(self) -> &'static str {
        match self {
            PassKind::PrimitiveArrays => "primitive-arrays",
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PassKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PassKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::Options(format!("unknown pass `{s}`")))
    }
}

/// Which passes run, in order, and how the final forest is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineOptions {
    pub passes: Vec<PassKind>,
    /// Reject forests that still contain unresolved types after all passes.
    pub fail_on_unresolved: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            passes: vec![PassKind::PrimitiveArrays],
            fail_on_unresolved: false,
        }
    }
}

impl PipelineOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Options(e.to_string()))
    }
}
