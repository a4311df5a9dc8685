use std::collections::HashMap;
use std::fmt;

use crate::error::{ReleaseError, Result};

/// Default significance levels, most significant first.
pub const DEFAULT_LEVELS: [&str; 3] = ["major", "minor", "patch"];

/// A version as an ordered tuple of non-negative integers, one per named
/// significance level.
///
/// The number of levels is fixed when the value is constructed and the
/// component count must match it. Unlike a semver triple the level count is
/// arbitrary, so `v1.2` with levels `["major", "minor"]` is a valid version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    names: Vec<String>,
    index: HashMap<String, usize>,
    components: Vec<u32>,
}

impl Version {
    /// Parse a tag string against the default major/minor/patch levels.
    ///
    /// Strips one leading 'v' or 'V', splits on '.', and parses each
    /// component as an integer. Fails if any component is non-numeric or if
    /// the component count is not three.
    pub fn parse(tag: &str) -> Result<Self> {
        Self::parse_with_names(tag, &DEFAULT_LEVELS)
    }

    /// Parse a tag string against an explicit list of level names.
    ///
    /// The component count must match the name count; the count stays fixed
    /// for the lifetime of the value.
    pub fn parse_with_names(tag: &str, names: &[&str]) -> Result<Self> {
        let clean_tag = tag
            .strip_prefix('v')
            .or_else(|| tag.strip_prefix('V'))
            .unwrap_or(tag);

        let mut components = Vec::with_capacity(names.len());
        for part in clean_tag.split('.') {
            let value = part.parse::<u32>().map_err(|_| {
                ReleaseError::format(format!("Invalid component '{}' in tag '{}'", part, tag))
            })?;
            components.push(value);
        }

        if components.len() != names.len() {
            return Err(ReleaseError::format(format!(
                "Tag '{}' has {} components, expected {}",
                tag,
                components.len(),
                names.len()
            )));
        }

        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();

        Ok(Version {
            names,
            index,
            components,
        })
    }

    /// Increment the named level by one and reset every less-significant
    /// level to zero.
    ///
    /// An unrecognized level name fails and leaves the version unchanged.
    pub fn bump(&mut self, level: &str) -> Result<()> {
        let i = *self
            .index
            .get(level)
            .ok_or_else(|| ReleaseError::level(level))?;

        self.components[i] += 1;
        for component in self.components.iter_mut().skip(i + 1) {
            *component = 0;
        }
        Ok(())
    }

    /// Components in significance order, most significant first.
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// Look up one component by level name.
    pub fn component(&self, level: &str) -> Option<u32> {
        self.index.get(level).map(|&i| self.components[i])
    }

    /// Level names in significance order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.components.iter().map(|c| c.to_string()).collect();
        write!(f, "v{}", joined.join("."))
    }
}

/// Check an increment name against the default levels without building a
/// Version. The orchestrator calls this before touching the network.
pub fn validate_level(level: &str) -> Result<()> {
    if DEFAULT_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(ReleaseError::level(level))
    }
}
