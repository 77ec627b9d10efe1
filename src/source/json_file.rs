//! JSON File Loader
//!
//! [`SourceLoader`] over JSON files in a data directory, using the file's
//! modification time as its freshness marker.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use serde_json::Value;
use thiserror::Error;

use crate::source::SourceLoader;

// == Json File Error ==
#[derive(Error, Debug)]
pub enum JsonFileError {
    /// Source id would escape the data directory
    #[error("invalid source id '{0}'")]
    InvalidId(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

// == Json File Loader ==
/// Loads `<data_dir>/<source_id>` as a [`serde_json::Value`].
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    data_dir: PathBuf,
}

impl JsonFileLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolves a source id to a path inside the data directory.
    ///
    /// Only a single plain file name is accepted.
    pub fn resolve(&self, source_id: &str) -> Result<PathBuf, JsonFileError> {
        let mut components = Path::new(source_id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.data_dir.join(name)),
            _ => Err(JsonFileError::InvalidId(source_id.to_string())),
        }
    }
}

impl SourceLoader for JsonFileLoader {
    type Marker = SystemTime;
    type Data = Value;
    type Error = JsonFileError;

    fn modification_marker(&self, source_id: &str) -> Result<SystemTime, JsonFileError> {
        let path = self.resolve(source_id)?;
        Ok(fs::metadata(path)?.modified()?)
    }

    fn read_and_parse(&self, source_id: &str) -> Result<Value, JsonFileError> {
        let path = self.resolve(source_id)?;
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
