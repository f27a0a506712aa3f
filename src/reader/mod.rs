// src/reader/mod.rs
mod selection;
mod source;
mod sync_reader;

pub use source::NexSource;
pub use sync_reader::{NexReader, ReadSeek};
