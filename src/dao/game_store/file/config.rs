use std::path::PathBuf;

/// Environment variable naming the directory holding the game files.
pub const STORE_PATH_ENV: &str = "VOTING_STORE_PATH";

/// Runtime configuration describing where games are written on disk.
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    /// Directory holding the game files.
    pub root: PathBuf,
}

impl FileStoreConfig {
    /// Construct a configuration rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}
