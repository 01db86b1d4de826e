use std::collections::BTreeSet;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub provides: BTreeSet<String>,
    #[serde(default)]
    pub requires: BTreeSet<String>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            provides: BTreeSet::new(),
            requires: BTreeSet::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_provides<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provides.extend(capabilities.into_iter().map(Into::into));
        self
    }

    pub fn with_requires<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.extend(capabilities.into_iter().map(Into::into));
        self
    }

    pub fn display_name(&self) -> String {
        match &self.version {
            Some(version) => format!("{}-{}", self.name, version),
            None => self.name.clone(),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("package name must not be empty"));
        }
        if self.provides.iter().any(|cap| cap.trim().is_empty()) {
            return Err(anyhow!(
                "package '{}' provides an empty capability",
                self.name
            ));
        }
        if self.requires.iter().any(|cap| cap.trim().is_empty()) {
            return Err(anyhow!(
                "package '{}' requires an empty capability",
                self.name
            ));
        }
        Ok(())
    }
}
