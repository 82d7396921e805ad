use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{CoverError, CoverResult};

/// Where finished exports go: the host's "save file" action.
pub trait DownloadSink {
    /// Store `bytes` under `filename`.
    fn save(&mut self, filename: &str, bytes: &[u8]) -> CoverResult<()>;
}

/// Saves downloads as files inside one directory.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectorySink {
    /// Save into `dir`, replacing existing files when `overwrite` is set.
    pub fn new(dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            dir: dir.into(),
            overwrite,
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a download named `filename` is written to.
    pub fn path_for(&self, filename: &str) -> CoverResult<PathBuf> {
        let plain = !filename.is_empty()
            && filename != "."
            && filename != ".."
            && !filename.contains(['/', '\\']);
        if !plain {
            return Err(CoverError::export(format!(
                "download name '{filename}' is not a plain file name"
            )));
        }
        Ok(self.dir.join(filename))
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> CoverResult<()> {
        let path = self.path_for(filename)?;
        if !self.overwrite && path.exists() {
            return Err(CoverError::export(format!(
                "'{}' already exists",
                path.display()
            )));
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create download dir '{}'", self.dir.display()))?;
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "download saved");
        Ok(())
    }
}

/// Keeps downloads in memory, in save order.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDownloads {
    /// Saved `(filename, bytes)` pairs.
    pub files: Vec<(String, Vec<u8>)>,
}

impl InMemoryDownloads {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent download saved under `filename`.
    pub fn get(&self, filename: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .rev()
            .find(|(name, _)| name == filename)
            .map(|(_, bytes)| bytes.as_slice())
    }
}

impl DownloadSink for InMemoryDownloads {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> CoverResult<()> {
        self.files.push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
