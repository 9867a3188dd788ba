pub mod course;
pub mod index;
pub mod config;
pub mod utils;

// Re-export main types and functions for easier access
pub use course::types::{CourseEntry, CourseScanOptions, CourseScanResult, CourseScanStats};
pub use course::scanner::CourseScanner;
pub use index::IndexWriter;
pub use config::{IndexerConfig, Preset};

// Re-export utility functions
pub use utils::file_utils;
