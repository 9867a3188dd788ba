use std::path::Path;
use anyhow::Result;
use log::{debug, trace};

use crate::utils::file_utils;

/// File names of one candidate folder, split by kind, in listing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderListing {
    /// Files whose name ends with `.json`
    pub json_files: Vec<String>,
    
    /// Files with a recognised image extension
    pub image_files: Vec<String>,
}

impl FolderListing {
    /// A course folder has at least one JSON file and at least one image
    pub fn is_course(&self) -> bool {
        !self.json_files.is_empty() && !self.image_files.is_empty()
    }
}

/// Decides whether a directory looks like a course bundle
#[derive(Debug, Clone)]
pub struct FolderClassifier {
    /// Valid image extensions
    image_extensions: Vec<String>,
    
    /// Whether listings are sorted by name
    sort_by_name: bool,
}

impl FolderClassifier {
    /// Create a classifier for the given image extensions
    pub fn new(image_extensions: Vec<String>) -> Self {
        Self {
            image_extensions,
            sort_by_name: false,
        }
    }
    
    /// List files in name order instead of filesystem order
    pub fn sorted(mut self, sort_by_name: bool) -> Self {
        self.sort_by_name = sort_by_name;
        self
    }
    
    /// Read a candidate folder and sort its files into JSON and image lists
    pub fn list_folder(&self, dir: impl AsRef<Path>) -> Result<FolderListing> {
        let dir = dir.as_ref();
        let mut listing = FolderListing::default();
        
        for entry in file_utils::list_directory(dir, self.sort_by_name)? {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                debug!("Ignoring non UTF-8 file name in {}", dir.display());
                continue;
            };
            
            if name.ends_with(".json") {
                trace!("Found metadata candidate: {}", name);
                listing.json_files.push(name.to_string());
            }
            if file_utils::has_any_extension(name, &self.image_extensions) {
                trace!("Found image candidate: {}", name);
                listing.image_files.push(name.to_string());
            }
        }
        
        Ok(listing)
    }
    
    /// Check whether a folder qualifies as a course folder
    pub fn is_course_folder(&self, dir: impl AsRef<Path>) -> Result<bool> {
        Ok(self.list_folder(dir)?.is_course())
    }
}
