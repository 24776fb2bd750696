//! File-based deck store backend.
//!
//! Records live in `<data_dir>/deck_store.json`, by default `~/.slapjack/deck_store.json`.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::models::Deck;
use crate::traits::StoreBackend;

/// The default data directory name under the home directory.
pub const DATA_DIR: &str = ".slapjack";

/// The store file name.
pub const STORE_FILE: &str = "deck_store.json";

const STORE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    decks: Vec<Deck>,
}

/// Stores deck records as a single JSON document.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct FileStoreBackend {
    path: PathBuf,
}

impl FileStoreBackend {
    /// Backend under `~/.slapjack`.
    pub fn new() -> Result<Self, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::NoDataDirectory)?;
        Ok(Self::in_dir(home.join(DATA_DIR)))
    }

    /// Backend storing its file in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORE_FILE),
        }
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn io_error(&self, operation: &'static str, source: std::io::Error) -> StoreError {
        StoreError::Io {
            operation,
            path: self.path.clone(),
            source,
        }
    }
}

impl StoreBackend for FileStoreBackend {
    fn read(&self) -> Result<Vec<Deck>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error("open", e)),
        };

        let reader = BufReader::new(file);
        let store: StoreFile = serde_json::from_reader(reader).map_err(|e| StoreError::Corrupt {
            message: e.to_string(),
        })?;

        if store.version != STORE_VERSION {
            return Err(StoreError::Corrupt {
                message: format!("unsupported store version {}", store.version),
            });
        }
        Ok(store.decks)
    }

    fn write(&self, decks: &[Deck]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.io_error("create directory for", e))?;
            }
        }

        let tmp = self.temp_path();
        let file = File::create(&tmp).map_err(|e| self.io_error("create", e))?;
        let mut writer = BufWriter::new(file);

        let store = StoreFile {
            version: STORE_VERSION,
            decks: decks.to_vec(),
        };
        serde_json::to_writer_pretty(&mut writer, &store).map_err(StoreError::Encode)?;
        writer.flush().map_err(|e| self.io_error("write", e))?;
        drop(writer);

        fs::rename(&tmp, &self.path).map_err(|e| self.io_error("replace", e))
    }

    fn wipe(&self) -> Result<(), StoreError> {
        for path in [self.path.clone(), self.temp_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(self.io_error("remove", e)),
            }
        }
        Ok(())
    }
}
