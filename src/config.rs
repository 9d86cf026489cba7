//! Tuning knobs for the consumer operations.

use tagged_csv_file::DEFAULT_BUFFER_SIZE;

/// Configuration for reading and decoding CSV files.
///
/// The CSV dialect itself (comma separator, double-quote quoting, a header
/// row first) is fixed; only execution details are configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Decode data rows on the rayon pool once a file has at least this many
    /// of them. `None` keeps decoding on the calling thread.
    pub parallel_threshold: Option<usize>,

    /// Read/write buffer size in bytes for file operations (default: 1MB)
    pub buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parallel_threshold: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Config {
    /// Decode in parallel from `threshold` data rows upwards.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }

    /// Set the file read/write buffer size in bytes.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Whether `data_rows` rows should be decoded in parallel.
    pub fn decode_in_parallel(&self, data_rows: usize) -> bool {
        self.parallel_threshold
            .is_some_and(|threshold| data_rows >= threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sequential() {
        let config = Config::default();
        assert_eq!(config.parallel_threshold, None);
        assert_eq!(config.buffer_size, 1024 * 1024);
        assert!(!config.decode_in_parallel(usize::MAX));
    }

    #[test]
    fn test_parallel_threshold_is_inclusive() {
        let config = Config::default().with_parallel_threshold(100);
        assert!(!config.decode_in_parallel(99));
        assert!(config.decode_in_parallel(100));
        assert!(config.decode_in_parallel(5000));
    }

    #[test]
    fn test_zero_threshold_always_parallel() {
        let config = Config::default().with_parallel_threshold(0);
        assert!(config.decode_in_parallel(0));
    }
}
