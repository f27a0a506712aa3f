// src/reader/source.rs
use std::fs::File;
use std::path::{Path, PathBuf};

/// Where a NEX file comes from: a path to open, or a handle already open.
///
/// A handle must be positioned at the first byte of the NEX structure; its
/// current position becomes offset zero for every recorded payload offset.
#[derive(Debug)]
pub enum NexSource {
    Path(PathBuf),
    Handle(File),
}

impl From<PathBuf> for NexSource {
    fn from(path: PathBuf) -> Self {
        NexSource::Path(path)
    }
}

impl From<&Path> for NexSource {
    fn from(path: &Path) -> Self {
        NexSource::Path(path.to_path_buf())
    }
}

impl From<&str> for NexSource {
    fn from(path: &str) -> Self {
        NexSource::Path(PathBuf::from(path))
    }
}

impl From<String> for NexSource {
    fn from(path: String) -> Self {
        NexSource::Path(PathBuf::from(path))
    }
}

impl From<File> for NexSource {
    fn from(file: File) -> Self {
        NexSource::Handle(file)
    }
}
