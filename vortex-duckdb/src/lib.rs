//! Scan Vortex files from DuckDB.
//!
//! The host's filters are compiled into Vortex expressions ([`expr`]), files are split into
//! partitions and scanned by many threads at once ([`scan`]), and arrays are converted into the
//! host's chunks through a per-thread [`ConversionCache`].

pub mod config;
mod convert;
pub mod duckdb;
pub mod engine;
pub mod expr;
pub mod log;
pub mod scan;
#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use config::VortexScanConfig;
pub use convert::{
    ConversionCache, FromDuckDBType, ToDuckDBScalar, ToDuckDBType, value_into_scalar,
};
pub use scan::{
    ScanPartition, VortexBindData, VortexBindInput, VortexScanGlobalState, VortexScanLocalState,
    VortexTableFunction,
};

/// Rows per chunk of the host engine.
pub const DUCKDB_STANDARD_VECTOR_SIZE: usize = 2048;
