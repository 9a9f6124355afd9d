use std::collections::BTreeMap;
use std::env;
use std::num::NonZeroUsize;
use std::str::FromStr;

use vortex_error::{VortexResult, vortex_bail, vortex_err};

use crate::DUCKDB_STANDARD_VECTOR_SIZE;

pub const PARTITION_ROWS_ENV: &str = "VORTEX_DUCKDB_PARTITION_ROWS";
pub const MAX_THREADS_ENV: &str = "VORTEX_DUCKDB_MAX_THREADS";

/// Rows per scan partition unless configured otherwise.
pub const DEFAULT_PARTITION_ROWS: u64 = DUCKDB_STANDARD_VECTOR_SIZE as u64 * 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VortexScanConfig {
    partition_rows: u64,
    max_threads: Option<NonZeroUsize>,
    properties: BTreeMap<String, String>,
}

impl Default for VortexScanConfig {
    fn default() -> Self {
        Self {
            partition_rows: DEFAULT_PARTITION_ROWS,
            max_threads: None,
            properties: BTreeMap::new(),
        }
    }
}

impl VortexScanConfig {
    /// The default configuration, overridden by `VORTEX_DUCKDB_PARTITION_ROWS` and
    /// `VORTEX_DUCKDB_MAX_THREADS` when set.
    pub fn from_env() -> VortexResult<Self> {
        let mut config = Self::default();
        if let Some(rows) = read_env::<u64>(PARTITION_ROWS_ENV)? {
            config = config.with_partition_rows(rows)?;
        }
        if let Some(threads) = read_env::<usize>(MAX_THREADS_ENV)? {
            config = config.with_max_threads(threads)?;
        }
        Ok(config)
    }

    pub fn with_partition_rows(mut self, partition_rows: u64) -> VortexResult<Self> {
        if partition_rows == 0 {
            vortex_bail!("partition rows must be positive");
        }
        self.partition_rows = partition_rows;
        Ok(self)
    }

    pub fn with_max_threads(mut self, max_threads: usize) -> VortexResult<Self> {
        self.max_threads = Some(
            NonZeroUsize::new(max_threads)
                .ok_or_else(|| vortex_err!("max threads must be positive"))?,
        );
        Ok(self)
    }

    /// Set a storage engine property passed along whenever a file is opened.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn partition_rows(&self) -> u64 {
        self.partition_rows
    }

    pub fn max_threads(&self) -> Option<usize> {
        self.max_threads.map(NonZeroUsize::get)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

fn read_env<T: FromStr>(name: &str) -> VortexResult<Option<T>> {
    let Ok(raw) = env::var(name) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| vortex_err!("{} must be a non-negative integer, got '{}'", name, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = VortexScanConfig::default();
        assert_eq!(config.partition_rows(), 65536);
        assert_eq!(config.partition_rows() % DUCKDB_STANDARD_VECTOR_SIZE as u64, 0);
        assert_eq!(config.max_threads(), None);
        assert!(config.properties().is_empty());
    }

    #[test]
    fn rejects_zero() {
        assert!(VortexScanConfig::default().with_partition_rows(0).is_err());
        assert!(VortexScanConfig::default().with_max_threads(0).is_err());
    }

    #[test]
    fn builders() {
        let config = VortexScanConfig::default()
            .with_partition_rows(10)
            .unwrap()
            .with_max_threads(4)
            .unwrap()
            .with_property("s3.region", "eu-west-1");
        assert_eq!(config.partition_rows(), 10);
        assert_eq!(config.max_threads(), Some(4));
        assert_eq!(config.properties()["s3.region"], "eu-west-1");
    }

    // The only test in the crate touching these variables, so no other test observes them.
    #[test]
    fn from_env() {
        unsafe {
            env::set_var(PARTITION_ROWS_ENV, "4096");
            env::set_var(MAX_THREADS_ENV, " 3 ");
        }
        let config = VortexScanConfig::from_env().unwrap();
        assert_eq!(config.partition_rows(), 4096);
        assert_eq!(config.max_threads(), Some(3));

        unsafe { env::set_var(PARTITION_ROWS_ENV, "lots") };
        let err = VortexScanConfig::from_env().unwrap_err();
        assert!(err.to_string().contains(PARTITION_ROWS_ENV));

        unsafe { env::set_var(PARTITION_ROWS_ENV, "0") };
        assert!(VortexScanConfig::from_env().is_err());

        unsafe {
            env::remove_var(PARTITION_ROWS_ENV);
            env::remove_var(MAX_THREADS_ENV);
        }
        assert_eq!(VortexScanConfig::from_env().unwrap(), VortexScanConfig::default());
    }
}
