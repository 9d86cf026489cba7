//! Local filesystem source and sink

use crate::{read_rows, write_rows, RowSink, RowSource, Rows, DEFAULT_BUFFER_SIZE};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tagged_csv_core::MappingError;
use tempfile::Builder;
use tracing::debug;

/// A CSV file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    buffer_size: usize,
}

impl LocalFile {
    /// Refer to a file by path; nothing is opened until a read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Set the read/write buffer size in bytes.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file as CSV rows.
    pub fn read_all(&self) -> Result<Rows, MappingError> {
        let file = File::open(&self.path).map_err(|e| {
            MappingError::source_read(io::Error::new(
                e.kind(),
                format!("unable to read file {}: {e}", self.path.display()),
            ))
        })?;

        let rows = read_rows(BufReader::with_capacity(self.buffer_size, file))?;
        debug!("Read {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }

    /// Write a header and rows, replacing the file only once everything is
    /// on disk.
    ///
    /// The data goes to a temporary file in the destination directory which
    /// is then renamed over the destination, so a failed write leaves any
    /// previous file untouched. A replaced file keeps its permissions; a new
    /// file gets `0o666` less the process umask, like a plain create.
    pub fn persist(&self, header: &[String], rows: &[Vec<String>]) -> Result<(), MappingError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        #[cfg_attr(not(unix), allow(unused_mut))]
        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }

        let mut temp = builder.tempfile_in(dir).map_err(|e| {
            MappingError::sink_write(io::Error::new(
                e.kind(),
                format!("unable to write file {}: {e}", self.path.display()),
            ))
        })?;

        if let Ok(existing) = fs::metadata(&self.path) {
            temp.as_file()
                .set_permissions(existing.permissions())
                .map_err(MappingError::sink_write)?;
        }

        write_rows(
            BufWriter::with_capacity(self.buffer_size, temp.as_file_mut()),
            header,
            rows,
        )?;
        temp.as_file().sync_all().map_err(MappingError::sink_write)?;
        temp.persist(&self.path)
            .map_err(|e| MappingError::sink_write(e.error))?;

        debug!(
            "Wrote header and {} rows to {}",
            rows.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl RowSource for LocalFile {
    fn read_rows(&self) -> Result<Rows, MappingError> {
        self.read_all()
    }
}

impl RowSink for LocalFile {
    fn write_rows(&self, header: &[String], rows: &[Vec<String>]) -> Result<(), MappingError> {
        self.persist(header, rows)
    }
}
