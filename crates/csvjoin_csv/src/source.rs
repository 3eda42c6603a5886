use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use csvjoin_core::table::Table;
use csvjoin_error::{JoinError, Result};
use tracing::debug;

use crate::reader::CsvReader;

/// An input to a join, either a csv file on disk or an in-memory table.
#[derive(Debug, Clone)]
pub enum TableSource {
    Path(PathBuf),
    Table(Table),
}

impl TableSource {
    /// Produce the table for this source, reading the file if needed.
    pub fn load(self, reader: &CsvReader) -> Result<Table> {
        match self {
            Self::Table(table) => Ok(table),
            Self::Path(path) => load_path(&path, reader),
        }
    }

    /// Directory holding the source file, if this source is a file.
    pub fn parent_dir(&self) -> Option<&Path> {
        match self {
            Self::Path(path) => path.parent(),
            Self::Table(_) => None,
        }
    }
}

fn load_path(path: &Path, reader: &CsvReader) -> Result<Table> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(JoinError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(JoinError::read(path.display().to_string(), e)),
    };
    if !meta.is_file() {
        return Err(JoinError::InvalidInputType(format!(
            "{} (not a regular file)",
            path.display()
        )));
    }

    debug!(path = %path.display(), bytes = meta.len(), "loading csv file");

    let input = path.display().to_string();
    let file = File::open(path).map_err(|e| JoinError::read(input.as_str(), e))?;
    reader.read(&input, io::BufReader::new(file))
}

impl From<Table> for TableSource {
    fn from(value: Table) -> Self {
        TableSource::Table(value)
    }
}

impl From<PathBuf> for TableSource {
    fn from(value: PathBuf) -> Self {
        TableSource::Path(value)
    }
}

impl From<&Path> for TableSource {
    fn from(value: &Path) -> Self {
        TableSource::Path(value.to_path_buf())
    }
}

impl From<&str> for TableSource {
    fn from(value: &str) -> Self {
        TableSource::Path(PathBuf::from(value))
    }
}
