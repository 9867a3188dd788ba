pub mod types;
pub mod scanner;

// Re-export the main API for easier access
pub use types::{CourseEntry, CourseScanOptions, CourseScanResult, CourseScanStats};
pub use scanner::CourseScanner;
