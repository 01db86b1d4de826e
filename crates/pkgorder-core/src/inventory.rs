use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::package::Package;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageInventory {
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl PackageInventory {
    pub fn new(packages: Vec<Package>) -> Result<Self> {
        let inventory = Self { packages };
        inventory.validate()?;
        Ok(inventory)
    }

    pub fn from_toml_str(input: &str) -> Result<Self> {
        let inventory: Self = toml::from_str(input).context("failed to parse package inventory")?;
        inventory.validate()?;
        Ok(inventory)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        // Accepts either `{"packages": [...]}` or a bare array of packages.
        let inventory = if input.trim_start().starts_with('[') {
            let packages: Vec<Package> =
                serde_json::from_str(input).context("failed to parse package inventory")?;
            Self { packages }
        } else {
            serde_json::from_str(input).context("failed to parse package inventory")?
        };
        inventory.validate()?;
        Ok(inventory)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed reading inventory: {}", path.display()))?;
        let inventory = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => {
                return Err(anyhow!(
                    "unsupported inventory format (expected .toml or .json): {}",
                    path.display()
                ))
            }
        };
        inventory.with_context(|| format!("failed loading inventory: {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|package| package.name == name)
    }

    fn validate(&self) -> Result<()> {
        for package in &self.packages {
            package.validate()?;
        }
        validate_unique_names(&self.packages)
    }
}

pub fn validate_unique_names(packages: &[Package]) -> Result<()> {
    let mut seen = HashSet::new();
    for package in packages {
        if !seen.insert(package.name.as_str()) {
            return Err(anyhow!("duplicate package name '{}'", package.name));
        }
    }
    Ok(())
}
