use crate::domain::ports::DownloadSink;
use crate::error::Result;
use std::fs;
use std::path::PathBuf;

/// Saves downloads into a directory, like a browser's download folder.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectoryDownloads {
    fn save(&self, filename: &str, contents: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, contents)?;
        Ok(path)
    }
}
