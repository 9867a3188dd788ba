pub mod storage;

pub use storage::IndexWriter;
