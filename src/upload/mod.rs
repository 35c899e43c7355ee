//! Asset upload implementation

pub mod chunked;

pub use chunked::{chunk_plan, ChunkSpec, ChunkedUploader};
