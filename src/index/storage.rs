use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::{info, debug, warn};

use crate::course::types::{CourseEntry, CourseScanStats};
use crate::utils::file_utils;

/// Writes the course index file
#[derive(Debug)]
pub struct IndexWriter {
    /// Path to the index file
    index_path: PathBuf,
}

impl IndexWriter {
    /// Create a new writer for the given path
    pub fn new(index_path: impl AsRef<Path>) -> Self {
        Self {
            index_path: index_path.as_ref().to_path_buf(),
        }
    }
    
    /// Writer for `output_file` placed under `root` unless it is absolute
    pub fn for_root(root: impl AsRef<Path>, output_file: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(output_file))
    }
    
    /// Writer for the outcome of a scan of `root`.
    ///
    /// If the root could not be listed the relative output path is taken from
    /// the working directory instead, so a missing or non-directory root is
    /// never created or written into.
    pub fn for_scan(root: impl AsRef<Path>, output_file: impl AsRef<Path>, stats: &CourseScanStats) -> Self {
        if stats.root_error.is_some() {
            warn!("Root {} was not scanned, writing index relative to the working directory", root.as_ref().display());
            Self::new(output_file)
        } else {
            Self::for_root(root, output_file)
        }
    }
    
    /// Render entries as a pretty-printed JSON array with 2-space indentation
    pub fn render(courses: &[CourseEntry]) -> Result<String> {
        serde_json::to_string_pretty(courses).context("Failed to serialize course index")
    }
    
    /// Render and write the index, replacing any previous content.
    ///
    /// Returns the rendered JSON so callers can echo it.
    pub fn save(&self, courses: &[CourseEntry]) -> Result<String> {
        let path = &self.index_path;
        debug!("Saving index to {}", path.display());
        
        let content = Self::render(courses)?;
        file_utils::write_string_to_file(path, &content)?;
        
        info!("Wrote {} with {} courses", path.display(), courses.len());
        Ok(content)
    }
    
    /// Get the path to the index file
    pub fn path(&self) -> &Path {
        &self.index_path
    }
}
