//! The storage engine as the scan consumes it: open a file, describe it, and stream row ranges
//! of it as arrays that convert themselves into host chunks.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::ops::Range;
use std::sync::Arc;

use url::Url;
use vortex_dtype::{DType, FieldNames};
use vortex_error::VortexResult;

use crate::convert::ConversionCache;
use crate::duckdb::DataChunk;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOpenOptions {
    pub uri: Url,
    /// Engine specific settings, e.g. object store configuration.
    pub properties: BTreeMap<String, String>,
}

impl FileOpenOptions {
    pub fn new(uri: Url) -> Self {
        Self {
            uri,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.properties = properties;
        self
    }
}

pub trait VortexFileOpener: Send + Sync {
    fn open(&self, options: &FileOpenOptions) -> VortexResult<LayoutReaderRef>;
}

pub type LayoutReaderRef = Arc<dyn LayoutReader>;

/// An opened file. Readers are shared by every thread scanning the file.
pub trait LayoutReader: Debug + Send + Sync {
    fn dtype(&self) -> &DType;

    fn row_count(&self) -> u64;

    fn scan(&self, options: ScanOptions) -> VortexResult<Box<dyn ArrayStream>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub row_range: Range<u64>,
    /// Top-level fields to read, in output column order.
    pub projection: FieldNames,
    /// A serialized filter expression; rows not matching it are skipped.
    pub filter_expression: Option<Arc<[u8]>>,
}

pub trait ArrayStream: Send {
    fn next_array(&mut self) -> VortexResult<Option<ScanArrayRef>>;
}

pub type ScanArrayRef = Box<dyn ScanArray>;

pub trait ScanArray: Send {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write rows starting at `offset` into `chunk`, as many as fit.
    ///
    /// Returns the offset to resume from on the next call, or `0` once every row of the array
    /// has been written.
    fn to_duckdb(
        &self,
        chunk: &mut dyn DataChunk,
        offset: u32,
        cache: &mut ConversionCache,
    ) -> VortexResult<u32>;
}
