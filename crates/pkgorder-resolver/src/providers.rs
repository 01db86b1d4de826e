use std::collections::{BTreeMap, BTreeSet};

use pkgorder_core::Package;

pub(crate) fn provider_index(packages: &[Package]) -> BTreeMap<&str, BTreeSet<&str>> {
    let mut index: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for package in packages {
        for capability in &package.provides {
            index
                .entry(capability.as_str())
                .or_default()
                .insert(package.name.as_str());
        }
    }
    index
}

pub fn unsatisfied_requirements(packages: &[Package]) -> BTreeMap<String, BTreeSet<String>> {
    let index = provider_index(packages);
    let mut unsatisfied: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for package in packages {
        for capability in &package.requires {
            let satisfied = index
                .get(capability.as_str())
                .map(|providers| {
                    providers
                        .iter()
                        .any(|provider| *provider != package.name.as_str())
                })
                .unwrap_or(false);
            if !satisfied {
                unsatisfied
                    .entry(package.name.clone())
                    .or_default()
                    .insert(capability.clone());
            }
        }
    }

    unsatisfied
}
