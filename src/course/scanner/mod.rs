mod classifier;
mod resolver;

use std::path::Path;
use anyhow::Result;
use log::{debug, error, info, warn};

use crate::course::types::{
    CourseScanOptions, CourseScanResult, CourseScanStats, EntryOrder, ListingFailurePolicy,
};
use crate::utils::file_utils;

// Re-export from submodules
pub use classifier::{FolderClassifier, FolderListing};
pub use resolver::{CourseResolver, ResolvedCourse, NAME_FIELDS, folder_name_to_course_name, title_from_metadata};

/// Course scanner responsible for finding course folders under a root
#[derive(Debug)]
pub struct CourseScanner {
    /// Configuration options for scanning
    options: CourseScanOptions,
    
    /// Classifier deciding which folders are courses
    classifier: FolderClassifier,
    
    /// Resolver building an entry for each course folder
    resolver: CourseResolver,
}

impl CourseScanner {
    /// Create a new course scanner with the given options
    pub fn new(options: CourseScanOptions) -> Self {
        let sorted = options.order == EntryOrder::Name;
        Self {
            classifier: FolderClassifier::new(options.image_extensions.clone()).sorted(sorted),
            resolver: CourseResolver::new(
                options.image_extensions.clone(),
                options.image_selection,
                options.metadata_selection,
            ),
            options,
        }
    }
    
    /// Create a new course scanner with default options
    pub fn with_defaults() -> Self {
        Self::new(CourseScanOptions::default())
    }
    
    pub fn options(&self) -> &CourseScanOptions {
        &self.options
    }
    
    /// Scan the immediate children of `root` for course folders.
    ///
    /// Never fails: a root that cannot be listed yields an empty result with
    /// `stats.root_error` set, and per-folder problems end up in the stats.
    pub fn scan_directory(&self, root: impl AsRef<Path>) -> CourseScanResult {
        self.scan_with(root.as_ref(), |dir| self.classifier.list_folder(dir))
    }
    
    /// Scan loop with the per-folder listing step supplied by the caller
    fn scan_with<F>(&self, root: &Path, mut list_folder: F) -> CourseScanResult
    where
        F: FnMut(&Path) -> Result<FolderListing>,
    {
        info!("Scanning directory: {}", root.display());
        
        let mut result = CourseScanResult::default();
        
        let entries = match file_utils::list_directory(root, self.options.order == EntryOrder::Name) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to scan directory {}: {:#}", root.display(), e);
                result.stats.root_error = Some(format!("{:#}", e));
                return result;
            }
        };
        
        for entry in entries {
            // Symlinked folders are aliases of real ones and would duplicate entries
            if entry.path_is_symlink() {
                debug!("Skipping symlink: {}", entry.path().display());
                continue;
            }
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(folder_name) = entry.file_name().to_str() else {
                warn!("Skipping directory with non UTF-8 name: {}", entry.path().display());
                continue;
            };
            
            let stats = &mut result.stats;
            stats.directories_seen += 1;
            
            if self.options.is_excluded(folder_name) {
                debug!("Skipping excluded directory: {}", folder_name);
                stats.excluded_dirs += 1;
                continue;
            }
            
            let listing = match list_folder(entry.path()) {
                Ok(listing) => listing,
                Err(e) => {
                    stats.unreadable_dirs += 1;
                    stats.unreadable_dir_paths.push(entry.path().to_path_buf());
                    match self.options.listing_failure {
                        ListingFailurePolicy::Skip => {
                            warn!("Skipping unreadable directory {}: {:#}", folder_name, e);
                            continue;
                        }
                        ListingFailurePolicy::Abort => {
                            error!("Stopping scan at unreadable directory {}: {:#}", folder_name, e);
                            stats.aborted = true;
                            break;
                        }
                    }
                }
            };
            
            if !listing.is_course() {
                debug!("Not a course folder: {}", folder_name);
                stats.non_course_dirs += 1;
                continue;
            }
            
            if let Some(resolved) = self.resolver.resolve(folder_name, entry.path(), &listing) {
                if resolved.metadata_error.is_some() {
                    stats.metadata_warnings += 1;
                    stats.metadata_warning_dirs.push(folder_name.to_string());
                }
                debug!("Found course {:?} in {}", resolved.entry.name, folder_name);
                result.courses.push(resolved.entry);
            }
        }
        
        info!("Found {} courses in {}", result.courses.len(), root.display());
        log_summary(&result.stats);
        result
    }
}

fn log_summary(stats: &CourseScanStats) {
    debug!(
        "Visited {} directories: {} excluded, {} not courses, {} unreadable",
        stats.directories_seen, stats.excluded_dirs, stats.non_course_dirs, stats.unreadable_dirs
    );
    if stats.metadata_warnings > 0 {
        warn!(
            "{} courses fell back to their folder name: {}",
            stats.metadata_warnings,
            stats.metadata_warning_dirs.join(", ")
        );
    }
}
