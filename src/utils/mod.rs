//! Utility helpers: document file discovery, atomic writes and JSON serializers.
pub mod files;
pub mod serialization;

pub use files::{discover_documents, write_atomic};
pub use serialization::FileSerializer;
pub use serialization::FileUtils;
pub use serialization::JsonSerializer;
pub use serialization::Serializer;
