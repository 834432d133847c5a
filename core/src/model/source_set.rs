//! Source sets: the analysed platform configurations of a module.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Identifier of a source set, e.g. `jvmMain`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceSetId(Arc<str>);

impl SourceSetId {
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Target platform a source set is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Common,
    Jvm,
    Js,
    Wasm,
    Native,
}

impl Platform {
    pub fn key(self) -> &'static str {
        match self {
            Platform::Common => "common",
            Platform::Jvm => "jvm",
            Platform::Js => "js",
            Platform::Wasm => "wasm",
            Platform::Native => "native",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "common" | "metadata" => Ok(Platform::Common),
            "jvm" | "androidjvm" => Ok(Platform::Jvm),
            "js" => Ok(Platform::Js),
            "wasm" => Ok(Platform::Wasm),
            "native" => Ok(Platform::Native),
            other => Err(format!("unknown platform `{}`", other)),
        }
    }
}

/// One analysed platform configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSet {
    pub id: SourceSetId,
    pub display_name: Arc<str>,
    pub platform: Platform,
}

impl SourceSet {
    pub fn new(id: &str, platform: Platform) -> Self {
        Self {
            id: SourceSetId::new(id),
            display_name: Arc::from(platform.key()),
            platform,
        }
    }
}

/// A facet value per source set.
pub type SourceSetDependent<T> = BTreeMap<SourceSetId, T>;
