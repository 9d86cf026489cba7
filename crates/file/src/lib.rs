//! Row source and sink for tagged-csv.
//!
//! This crate is the I/O side of the mapper. It knows how to frame CSV text
//! (quoting, embedded delimiters, line endings) and how to get bytes on and
//! off disk, and nothing about record types. Reading hands back the whole
//! file as a grid of text cells; writing takes a header plus data rows.
//!
//! Failures surface as [`MappingError::SourceRead`] and
//! [`MappingError::SinkWrite`].
//!
//! # Example
//!
//! ```ignore
//! use tagged_csv_file::{LocalFile, RowSink, RowSource};
//!
//! let file = LocalFile::new("people.csv");
//! let rows = file.read_rows()?;
//! file.write_rows(&rows[0], &rows[1..])?;
//! ```

mod local;

use std::io::{Read, Write};
use tagged_csv_core::MappingError;
use tracing::debug;

pub use local::LocalFile;

/// Default buffer size for reading and writing (1MB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// A fully materialised CSV grid; the first row is the header.
pub type Rows = Vec<Vec<String>>;

/// Something that can produce a whole CSV grid in one call.
pub trait RowSource {
    /// Read every row, header included.
    fn read_rows(&self) -> Result<Rows, MappingError>;
}

/// Something that can persist a header and data rows in one call.
pub trait RowSink {
    /// Write the header followed by every data row.
    fn write_rows(&self, header: &[String], rows: &[Vec<String>]) -> Result<(), MappingError>;
}

/// Read all CSV rows from a reader.
///
/// No row is treated as a header here and rows may differ in length.
pub fn read_rows<R: Read>(reader: R) -> Result<Rows, MappingError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let rows = csv_reader
        .records()
        .map(|result| {
            result
                .map(|record| record.iter().map(str::to_string).collect::<Vec<_>>())
                .map_err(|e| MappingError::source_read(format!("unable to parse file as CSV: {e}")))
        })
        .collect::<Result<Rows, _>>()?;

    debug!("Read {} CSV rows", rows.len());
    Ok(rows)
}

/// Write a header and data rows as CSV, then flush.
pub fn write_rows<W: Write>(
    writer: W,
    header: &[String],
    rows: &[Vec<String>],
) -> Result<(), MappingError> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    csv_writer
        .write_record(header)
        .map_err(MappingError::sink_write)?;
    for row in rows {
        csv_writer.write_record(row).map_err(MappingError::sink_write)?;
    }
    csv_writer.flush().map_err(MappingError::sink_write)?;

    debug!("Wrote header and {} CSV rows", rows.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rows_keeps_header_row() {
        let data = "name,active\nAnn,true\nBob,false\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["name", "active"],
                vec!["Ann", "true"],
                vec!["Bob", "false"],
            ]
        );
    }

    #[test]
    fn test_read_rows_flexible_lengths() {
        let data = "a,b,c\n1\n1,2,3,4\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn test_read_rows_quoted_fields() {
        let data = "name,bio\n\"Smith, Ann\",\"said \"\"hi\"\"\nthen left\"\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[1][0], "Smith, Ann");
        assert_eq!(rows[1][1], "said \"hi\"\nthen left");
    }

    #[test]
    fn test_read_rows_empty_input() {
        let rows = read_rows("".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_read_rows_invalid_utf8() {
        let data: &[u8] = b"name\n\xff\xfe\n";
        let err = read_rows(data).unwrap_err();
        assert!(matches!(err, MappingError::SourceRead(_)));
    }

    #[test]
    fn test_write_rows_escapes() {
        let mut out = Vec::new();
        let header = vec!["name".to_string(), "note".to_string()];
        let rows = vec![vec!["Ann".to_string(), "hello, \"world\"".to_string()]];
        write_rows(&mut out, &header, &rows).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "name,note\nAnn,\"hello, \"\"world\"\"\"\n"
        );
    }

    #[test]
    fn test_write_then_read() {
        let mut out = Vec::new();
        let header = vec!["a".to_string(), "b".to_string()];
        let rows = vec![
            vec!["line\nbreak".to_string(), String::new()],
            vec!["x".to_string(), "y".to_string()],
        ];
        write_rows(&mut out, &header, &rows).unwrap();

        let read = read_rows(out.as_slice()).unwrap();
        assert_eq!(read[0], header);
        assert_eq!(&read[1..], rows.as_slice());
    }
}
