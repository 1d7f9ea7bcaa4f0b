//! Location of duetask's files on disk.
//!
//! The config file and the task blob live side by side in one directory.
//! `DUETASK_DATA_DIR` points it somewhere explicit; otherwise it is the
//! platform's per-user application data directory.

use std::env::{self, consts::OS};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "duetask";

/// Overrides the data directory when set to a non-empty path.
pub const DATA_DIR_ENV: &str = "DUETASK_DATA_DIR";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        match env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::with_base(dir),
            _ => Self::with_base(Self::platform_dir().join(APP_NAME)),
        }
    }

    pub fn with_base(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of `file_name` inside the data directory, creating the directory
    /// on first use.
    pub fn get_path(&self, file_name: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.base_path)?;
        Ok(self.base_path.join(file_name))
    }

    fn platform_dir() -> PathBuf {
        let home = || env::var("HOME").unwrap_or_else(|_| ".".into());
        match OS {
            "windows" => PathBuf::from(env::var("LOCALAPPDATA").unwrap_or_else(|_| ".".into())),
            "macos" => Path::new(&home()).join("Library").join("Application Support"),
            _ => Path::new(&home()).join(".local").join("share"),
        }
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
