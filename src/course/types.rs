use std::path::PathBuf;
use serde::{Serialize, Deserialize};

/// One discovered course, as written to the index file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    /// Display name of the course
    pub name: String,
    
    /// Metadata file path, `<folder>/<file>.json`
    pub file: String,
    
    /// Thumbnail path, `<folder>/<image>`
    pub thumb: String,
}

/// How the thumbnail is picked when a folder holds several images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSelection {
    /// First image in directory-listing order
    FirstMatch,
    
    /// One pass per extension, in the order of `image_extensions`
    Priority,
}

/// How the metadata file is picked when a folder holds several JSON files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataSelection {
    /// First JSON file in directory-listing order
    FirstJson,
    
    /// Skip `package.json` unless it is the only JSON file
    PreferNonPackageJson,
}

/// What to do when a candidate folder cannot be listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingFailurePolicy {
    /// Log, treat the folder as non-qualifying and keep scanning
    Skip,
    
    /// Stop the scan and keep the entries gathered so far
    Abort,
}

/// Order in which child directories are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrder {
    /// Whatever order the filesystem returns
    Filesystem,
    
    /// Sorted by directory name
    Name,
}

/// Configuration options for course scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseScanOptions {
    /// Index file name, relative to the scanned root unless absolute
    pub output_file: PathBuf,
    
    /// Directory names that are never treated as courses
    pub exclude_dirs: Vec<String>,
    
    /// Recognised thumbnail extensions, lower case, without the dot
    pub image_extensions: Vec<String>,
    
    pub image_selection: ImageSelection,
    
    pub metadata_selection: MetadataSelection,
    
    pub listing_failure: ListingFailurePolicy,
    
    pub order: EntryOrder,
}

impl CourseScanOptions {
    /// Behaviour of the first revision: `courses.json`, first-match image,
    /// and a folder listing failure ends the scan.
    pub fn legacy() -> Self {
        Self {
            output_file: PathBuf::from("courses.json"),
            exclude_dirs: to_strings(&["node_modules", ".git", ".github"]),
            image_extensions: to_strings(&["png", "jpg", "jpeg", "webp"]),
            image_selection: ImageSelection::FirstMatch,
            metadata_selection: MetadataSelection::FirstJson,
            listing_failure: ListingFailurePolicy::Abort,
            order: EntryOrder::Filesystem,
        }
    }
    
    /// Behaviour of the later revision: `index.json`, png > jpg > jpeg >
    /// webp > gif, `package.json` de-prioritised, unreadable folders skipped.
    pub fn current() -> Self {
        Self {
            output_file: PathBuf::from("index.json"),
            exclude_dirs: to_strings(&["node_modules", ".git", ".github", "workflows"]),
            image_extensions: to_strings(&["png", "jpg", "jpeg", "webp", "gif"]),
            image_selection: ImageSelection::Priority,
            metadata_selection: MetadataSelection::PreferNonPackageJson,
            listing_failure: ListingFailurePolicy::Skip,
            order: EntryOrder::Filesystem,
        }
    }
    
    /// Whether a directory name is in the exclusion list
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == dir_name)
    }
}

impl Default for CourseScanOptions {
    fn default() -> Self {
        Self::current()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Statistics about the course scanning process
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseScanStats {
    /// Child directories looked at, excluded ones included
    pub directories_seen: usize,
    
    /// Directories skipped because of the exclusion list
    pub excluded_dirs: usize,
    
    /// Directories that lacked a JSON file or an image
    pub non_course_dirs: usize,
    
    /// Directories that could not be listed
    pub unreadable_dirs: usize,
    
    /// Paths of the directories that could not be listed
    pub unreadable_dir_paths: Vec<PathBuf>,
    
    /// Courses whose metadata could not be read or parsed
    pub metadata_warnings: usize,
    
    /// Folder names behind `metadata_warnings`
    pub metadata_warning_dirs: Vec<String>,
    
    /// Error message if the root directory could not be listed
    pub root_error: Option<String>,
    
    /// Set when a listing failure stopped the scan early
    pub aborted: bool,
}

impl CourseScanStats {
    /// True when the scan did not visit everything it should have
    pub fn is_partial(&self) -> bool {
        self.root_error.is_some() || self.aborted
    }
}

/// Result of a course scanning operation
#[derive(Debug, Clone, Default)]
pub struct CourseScanResult {
    /// Discovered courses, in visiting order
    pub courses: Vec<CourseEntry>,
    
    /// Statistics about the scanning process
    pub stats: CourseScanStats,
}
