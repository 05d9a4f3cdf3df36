//! Priority list used to break ties between duplicate mods
//!
//! The text format is one entry per line. Blank lines and lines starting
//! with `#` are ignored. An entry is either a mod name (`FezCore`) or a
//! name pinned to one version (`FezCore@1.2`).

use hat_errors::{ConfigError, Error};
use hat_types::{name_key, PackageMetadata, Version};
use std::path::Path;
use tokio::fs;

/// One line of the priority list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityEntry {
    pub name: String,
    /// When set, the entry only favours this exact version
    pub version: Option<Version>,
}

impl PriorityEntry {
    /// Parse a single non-comment line
    #[must_use]
    pub fn parse(line: &str) -> Self {
        if let Some((name, version)) = line.rsplit_once('@') {
            if let Ok(version) = Version::parse(version) {
                if !name.trim().is_empty() {
                    return Self {
                        name: name.trim().to_string(),
                        version: Some(version),
                    };
                }
            }
        }
        Self {
            name: line.trim().to_string(),
            version: None,
        }
    }

    fn matches(&self, metadata: &PackageMetadata) -> bool {
        name_key(&self.name) == metadata.key()
            && self.version.is_none_or(|v| v == metadata.version)
    }
}

/// Ordered list of mods favoured during duplicate selection
///
/// The list only decides which copy of a duplicated mod survives; it never
/// affects dependency ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityList {
    entries: Vec<PriorityEntry>,
}

impl PriorityList {
    /// Build a list from entry lines, keeping the first occurrence of each
    #[must_use]
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for line in lines {
            let entry = PriorityEntry::parse(line.as_ref());
            let duplicate = list.entries.iter().any(|existing| {
                name_key(&existing.name) == name_key(&entry.name)
                    && existing.version == entry.version
            });
            if !duplicate {
                list.entries.push(entry);
            }
        }
        list
    }

    /// Parse the text format
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Load a list from disk; a missing file is an empty list
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        match fs::read_to_string(path).await {
            Ok(text) => {
                let list = Self::parse(&text);
                tracing::debug!(path = %path.display(), entries = list.len(), "loaded priority list");
                Ok(list)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no priority list, using empty list");
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::ReadError {
                path: path.display().to_string(),
                error: err.to_string(),
            }
            .into()),
        }
    }

    /// Load a list, writing `default_content` first when the file is missing
    ///
    /// # Errors
    ///
    /// Returns an error if the default file cannot be written or the list
    /// cannot be read.
    pub async fn load_or_create_default(path: &Path, default_content: &str) -> Result<Self, Error> {
        if fs::try_exists(path).await.unwrap_or(false) {
            return Self::load(path).await;
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| Error::io_with_path(&e, parent))?;
            }
        }
        fs::write(path, default_content)
            .await
            .map_err(|e| ConfigError::WriteError {
                path: path.display().to_string(),
                error: e.to_string(),
            })?;
        tracing::info!(path = %path.display(), "created default priority list");

        Ok(Self::parse(default_content))
    }

    /// Position of the first entry that favours this exact candidate
    #[must_use]
    pub fn rank(&self, metadata: &PackageMetadata) -> Option<usize> {
        self.entries.iter().position(|entry| entry.matches(metadata))
    }

    /// Entries in priority order
    #[must_use]
    pub fn entries(&self) -> &[PriorityEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &PriorityList) -> Vec<&str> {
        list.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let list = PriorityList::parse("# header\n\n  Alpha  \n#Beta\nGamma\r\n\n");
        assert_eq!(names(&list), ["Alpha", "Gamma"]);
    }

    fn candidate(name: &str) -> PackageMetadata {
        PackageMetadata::new(name, Version::new(1, 0, 0, 0))
    }

    #[test]
    fn test_rank_is_case_insensitive() {
        let list = PriorityList::new(["Alpha", "Gamma"]);
        assert_eq!(list.rank(&candidate("alpha")), Some(0));
        assert_eq!(list.rank(&candidate("GAMMA")), Some(1));
        assert_eq!(list.rank(&candidate("Beta")), None);
    }

    #[test]
    fn test_duplicates_keep_first_rank() {
        let list = PriorityList::parse("Alpha\nGamma\nalpha\n");
        assert_eq!(names(&list), ["Alpha", "Gamma"]);
        assert_eq!(list.rank(&candidate("ALPHA")), Some(0));
    }

    #[test]
    fn test_pinned_entries() {
        let list = PriorityList::parse("Core@1.0\nCore\nweird@name\n");
        assert_eq!(list.entries()[0].version, Some(Version::new(1, 0, 0, 0)));
        assert_eq!(list.entries()[1].version, None);
        assert_eq!(list.entries()[2].name, "weird@name");

        let old = PackageMetadata::new("core", Version::new(1, 0, 0, 0));
        let new = PackageMetadata::new("Core", Version::new(2, 0, 0, 0));
        assert_eq!(list.rank(&old), Some(0));
        assert_eq!(list.rank(&new), Some(1));
    }
}
