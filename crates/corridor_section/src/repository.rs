//! Section repositories
//!
//! A repository resolves a section id into a [`SectionSpec`]. The backing
//! store is irrelevant to the streamer; lookups are synchronous and small.

use crate::authored::parse_section;
use crate::error::{RepositoryError, Result};
use crate::spec::SectionSpec;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Resolves section ids into section data
pub trait SectionRepository {
    /// Fetch the section stored under `id`
    fn fetch(&self, id: &str) -> Result<SectionSpec>;

    /// Whether `id` can be resolved without loading it
    fn contains(&self, id: &str) -> bool {
        self.fetch(id).is_ok()
    }
}

impl<R: SectionRepository + ?Sized> SectionRepository for &R {
    fn fetch(&self, id: &str) -> Result<SectionSpec> {
        (**self).fetch(id)
    }

    fn contains(&self, id: &str) -> bool {
        (**self).contains(id)
    }
}

impl<R: SectionRepository + ?Sized> SectionRepository for Box<R> {
    fn fetch(&self, id: &str) -> Result<SectionSpec> {
        (**self).fetch(id)
    }

    fn contains(&self, id: &str) -> bool {
        (**self).contains(id)
    }
}

/// In-memory repository keyed by section id
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    sections: HashMap<String, SectionSpec>,
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section (builder pattern)
    pub fn with_section(mut self, section: SectionSpec) -> Self {
        self.insert(section);
        self
    }

    /// Store a section under its own id, replacing any previous entry
    pub fn insert(&mut self, section: SectionSpec) -> Option<SectionSpec> {
        self.sections.insert(section.id.clone(), section)
    }

    /// Remove a section
    pub fn remove(&mut self, id: &str) -> Option<SectionSpec> {
        self.sections.remove(id)
    }

    /// Number of stored sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Stored ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sections.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl SectionRepository for MemoryRepository {
    fn fetch(&self, id: &str) -> Result<SectionSpec> {
        self.sections
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    fn contains(&self, id: &str) -> bool {
        self.sections.contains_key(id)
    }
}

/// Repository backed by a directory of authored JSON files.
///
/// Section `X` lives at `<root>/X.json`; ids may name sub-folders
/// (`anomaly/Section_2` → `<root>/anomaly/Section_2.json`).
#[derive(Debug, Clone)]
pub struct JsonDirRepository {
    root: PathBuf,
}

impl JsonDirRepository {
    /// Create a repository rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map an id to its file, refusing ids that would leave the root
    pub fn path_for(&self, id: &str) -> Option<PathBuf> {
        if id.is_empty() {
            return None;
        }
        let relative = Path::new(id);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(format!("{id}.json")))
    }

    /// List section ids stored in `folder` (relative to the root), sorted
    pub fn enumerate(&self, folder: &str) -> Result<Vec<String>> {
        let dir = if folder.is_empty() {
            self.root.clone()
        } else {
            self.path_for(folder)
                .map(|_| self.root.join(folder))
                .ok_or_else(|| RepositoryError::NotFound(folder.to_string()))?
        };

        let entries = std::fs::read_dir(&dir).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                RepositoryError::NotFound(folder.to_string())
            } else {
                RepositoryError::Io {
                    id: folder.to_string(),
                    source,
                }
            }
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RepositoryError::Io {
                id: folder.to_string(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") || !path.is_file() {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if folder.is_empty() {
                ids.push(stem.to_string());
            } else {
                ids.push(format!("{}/{}", folder.trim_end_matches('/'), stem));
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl SectionRepository for JsonDirRepository {
    fn fetch(&self, id: &str) -> Result<SectionSpec> {
        let path = self
            .path_for(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        let json = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                RepositoryError::NotFound(id.to_string())
            } else {
                RepositoryError::Io {
                    id: id.to_string(),
                    source,
                }
            }
        })?;

        log::debug!("Loaded section '{}' from {}", id, path.display());
        parse_section(id, &json)
    }

    fn contains(&self, id: &str) -> bool {
        self.path_for(id).is_some_and(|p| p.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_repository() {
        let mut repo = MemoryRepository::new()
            .with_section(SectionSpec::new("default"))
            .with_section(SectionSpec::new("anomaly/1"));

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.fetch("default").unwrap().id, "default");
        assert!(repo.contains("anomaly/1"));
        assert_eq!(repo.ids(), vec!["anomaly/1".to_string(), "default".to_string()]);

        repo.remove("default");
        let err = repo.fetch("default").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.section_id(), "default");
    }

    #[test]
    fn test_path_for_rejects_escapes() {
        let repo = JsonDirRepository::new("/data/sections");
        assert_eq!(
            repo.path_for("anomaly/Section_2"),
            Some(PathBuf::from("/data/sections/anomaly/Section_2.json"))
        );
        assert!(repo.path_for("").is_none());
        assert!(repo.path_for("../secrets").is_none());
        assert!(repo.path_for("/etc/passwd").is_none());
    }

    #[test]
    fn test_by_reference() {
        let repo = MemoryRepository::new().with_section(SectionSpec::new("a"));
        let borrowed: &dyn SectionRepository = &repo;
        assert!(borrowed.fetch("a").is_ok());
        let boxed: Box<dyn SectionRepository> = Box::new(repo);
        assert!(boxed.contains("a"));
    }
}
