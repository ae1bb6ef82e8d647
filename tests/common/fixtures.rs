//! Test fixtures and builders

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A directory tree with automatic cleanup
pub struct TestTree {
    pub temp_dir: TempDir,
}

impl TestTree {
    /// Get the root of the tree
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a tree-relative path
    pub fn join(&self, rel: &str) -> PathBuf {
        self.path().join(rel)
    }
}

/// Builder for directory trees containing repository markers
///
/// Repositories are plain directories with an empty `.git` directory inside,
/// so tests do not depend on a git binary.
#[derive(Default)]
pub struct TestTreeBuilder {
    repos: Vec<String>,
    dirs: Vec<String>,
    files: Vec<(String, String)>,
}

impl TestTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a repository root at `rel` (empty string for the tree root)
    pub fn with_repo(mut self, rel: impl Into<String>) -> Self {
        self.repos.push(rel.into());
        self
    }

    /// Add `count` sibling repositories named `repo-1` … `repo-N` under `parent`
    pub fn with_repos(mut self, parent: &str, count: usize) -> Self {
        for i in 1..=count {
            self.repos.push(format!("{parent}/repo-{i}"));
        }
        self
    }

    /// Add a plain directory
    pub fn with_dir(mut self, rel: impl Into<String>) -> Self {
        self.dirs.push(rel.into());
        self
    }

    /// Add a file with the given content
    pub fn with_file(mut self, rel: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((rel.into(), content.into()));
        self
    }

    pub fn build(self) -> Result<TestTree> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        for rel in &self.dirs {
            fs::create_dir_all(root.join(rel))?;
        }
        for rel in &self.repos {
            fs::create_dir_all(root.join(rel).join(".git"))?;
        }
        for (rel, content) in &self.files {
            let path = root.join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
        }

        Ok(TestTree { temp_dir })
    }
}
