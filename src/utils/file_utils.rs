use std::path::Path;
use std::fs;
use anyhow::{Result, Context, bail};
use log::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Create a directory if it doesn't exist
pub fn ensure_dir_exists(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if !dir.as_os_str().is_empty() && !dir.exists() {
        debug!("Creating directory: {}", dir.display());
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    Ok(())
}

/// Check if a file name ends with `.<extension>`, ignoring ASCII case.
///
/// Works on the raw name rather than `Path::extension`, so a bare `.png`
/// counts as a png file.
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.eq_ignore_ascii_case(extension),
        None => false,
    }
}

/// Check if a file name has one of the specified extensions
pub fn has_any_extension(file_name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| has_extension(file_name, ext))
}

/// List the immediate children of a directory.
///
/// Fails if the directory itself cannot be opened. Children that cannot be
/// inspected (dangling symlinks and the like) are logged and skipped.
pub fn list_directory(dir: impl AsRef<Path>, sort_by_name: bool) -> Result<Vec<DirEntry>> {
    let dir = dir.as_ref();
    trace!("Listing directory: {}", dir.display());

    let metadata = fs::metadata(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;
    if !metadata.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let mut walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);
    if sort_by_name {
        walker = walker.sort_by_file_name();
    }

    let mut entries = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(e) if e.depth() == 0 => {
                return Err(e).with_context(|| format!("Failed to read directory {}", dir.display()));
            }
            Err(e) => warn!("Skipping unreadable entry in {}: {}", dir.display(), e),
        }
    }

    trace!("Listed {} entries in {}", entries.len(), dir.display());
    Ok(entries)
}

/// Read a file to string with better error handling
pub fn read_file_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read file {}", path.display()))
}

/// Write a string to a file with better error handling
pub fn write_string_to_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    
    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    
    fs::write(path, content)
        .with_context(|| format!("Failed to write file {}", path.display()))
}
