use std::path::Path;
use anyhow::{Result, Context};
use log::{debug, warn};
use serde_json::Value;

use crate::course::types::{CourseEntry, ImageSelection, MetadataSelection};
use crate::utils::file_utils;

use super::classifier::FolderListing;

/// Metadata keys that may carry the course title, highest priority first
pub const NAME_FIELDS: [&str; 3] = ["name", "title", "courseName"];

const PACKAGE_JSON: &str = "package.json";

/// Turn a hyphenated folder name into a display name.
///
/// `khoa-hoc-seo` becomes `Khoa Hoc Seo`. Only the first character of each
/// segment changes; empty segments are kept, so `a--b` becomes `A  B`.
pub fn folder_name_to_course_name(folder_name: &str) -> String {
    folder_name
        .split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Pick the title out of parsed metadata, if any field holds a non-empty string
pub fn title_from_metadata(metadata: &Value) -> Option<String> {
    NAME_FIELDS.iter().find_map(|field| match metadata.get(*field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    })
}

/// Outcome of resolving one course folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCourse {
    pub entry: CourseEntry,
    
    /// Set when the metadata file could not be read or parsed
    pub metadata_error: Option<String>,
}

/// Picks metadata and thumbnail files for a course folder and names it
#[derive(Debug, Clone)]
pub struct CourseResolver {
    image_extensions: Vec<String>,
    image_selection: ImageSelection,
    metadata_selection: MetadataSelection,
}

impl CourseResolver {
    pub fn new(
        image_extensions: Vec<String>,
        image_selection: ImageSelection,
        metadata_selection: MetadataSelection,
    ) -> Self {
        Self {
            image_extensions,
            image_selection,
            metadata_selection,
        }
    }
    
    /// Choose the metadata file from the folder's JSON files
    pub fn select_metadata<'a>(&self, listing: &'a FolderListing) -> Option<&'a str> {
        let first = listing.json_files.first().map(String::as_str);
        match self.metadata_selection {
            MetadataSelection::FirstJson => first,
            MetadataSelection::PreferNonPackageJson => listing
                .json_files
                .iter()
                .map(String::as_str)
                .find(|name| *name != PACKAGE_JSON)
                .or(first),
        }
    }
    
    /// Choose the thumbnail from the folder's image files
    pub fn select_thumbnail<'a>(&self, listing: &'a FolderListing) -> Option<&'a str> {
        match self.image_selection {
            ImageSelection::FirstMatch => listing.image_files.first().map(String::as_str),
            ImageSelection::Priority => self.image_extensions.iter().find_map(|ext| {
                listing
                    .image_files
                    .iter()
                    .map(String::as_str)
                    .find(|name| file_utils::has_extension(name, ext))
            }),
        }
    }
    
    /// Read the title from a metadata file, `None` if it carries no usable field
    pub fn read_title(&self, metadata_path: impl AsRef<Path>) -> Result<Option<String>> {
        let path = metadata_path.as_ref();
        let content = file_utils::read_file_to_string(path)?;
        let metadata: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
        Ok(title_from_metadata(&metadata))
    }
    
    /// Build the index entry for a qualifying folder.
    ///
    /// Returns `None` if the listing lacks a metadata file or a thumbnail.
    pub fn resolve(
        &self,
        folder_name: &str,
        folder_path: impl AsRef<Path>,
        listing: &FolderListing,
    ) -> Option<ResolvedCourse> {
        let metadata_file = self.select_metadata(listing)?;
        let thumbnail = self.select_thumbnail(listing)?;
        
        let mut metadata_error = None;
        let name = match self.read_title(folder_path.as_ref().join(metadata_file)) {
            Ok(Some(title)) => title,
            Ok(None) => {
                debug!("No title field in {}/{}, using folder name", folder_name, metadata_file);
                folder_name_to_course_name(folder_name)
            }
            Err(e) => {
                warn!("Could not read metadata in {}, using folder name: {:#}", folder_name, e);
                metadata_error = Some(format!("{:#}", e));
                folder_name_to_course_name(folder_name)
            }
        };
        
        Some(ResolvedCourse {
            entry: CourseEntry {
                name,
                file: format!("{}/{}", folder_name, metadata_file),
                thumb: format!("{}/{}", folder_name, thumbnail),
            },
            metadata_error,
        })
    }
}
