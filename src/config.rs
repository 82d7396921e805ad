use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    assets::fonts::FontSet,
    export::sink::DirectorySink,
    foundation::error::{CoverError, CoverResult},
};

fn default_overwrite() -> bool {
    true
}

/// Runtime configuration, usually read from a JSON file.
///
/// Relative paths in a file loaded with [`CoverConfig::load`] are resolved against the file's
/// directory.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverConfig {
    /// TTF/OTF used for every text block. Without it, text is not drawn.
    #[serde(default)]
    pub font: Option<PathBuf>,
    /// Directory downloads are saved into.
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_filter: Option<String>,
    /// Whether a download may replace an existing file.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            font: None,
            out_dir: None,
            log_filter: None,
            overwrite: default_overwrite(),
        }
    }
}

impl CoverConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CoverResult<Self> {
        serde_json::from_reader(r).map_err(|e| CoverError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> CoverResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CoverError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        if let Some(base) = path.parent() {
            cfg.resolve_relative_to(base);
        }
        Ok(cfg)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for p in [&mut self.font, &mut self.out_dir].into_iter().flatten() {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }

    /// Load the configured font, if any.
    pub fn font_set(&self) -> CoverResult<Option<FontSet>> {
        self.font.as_deref().map(FontSet::from_path).transpose()
    }

    /// Sink for exported covers. `out_dir` wins over the configured directory, which wins over
    /// the current directory.
    pub fn download_sink(&self, out_dir: Option<&Path>) -> DirectorySink {
        let dir = out_dir
            .or(self.out_dir.as_deref())
            .unwrap_or(Path::new("."));
        DirectorySink::new(dir, self.overwrite)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
