//! A parallel scan over one or more Vortex files.
//!
//! Files are split into row-range partitions at init. Worker threads claim partitions through
//! a shared atomic cursor, stream the arrays of each partition from the file's reader and
//! convert them into host chunks, one chunk per call.

mod partition;
mod reader;

use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use itertools::Itertools;
use log::{debug, trace};
pub use partition::*;
pub use reader::{ensure_file_protocol, table_schema};
use url::Url;
use vortex_dtype::{FieldName, FieldNames};
use vortex_error::{VortexResult, vortex_bail, vortex_err};
use vortex_expr::{ExprRef, serialize};

use crate::config::VortexScanConfig;
use crate::convert::ConversionCache;
use crate::duckdb::{DataChunk, LogicalType, TableFunction, TableFunctionInitInput};
use crate::engine::{ArrayStream, LayoutReaderRef, ScanArrayRef, ScanOptions, VortexFileOpener};
use crate::expr::{create_filter_expression, flatten_exprs};
use crate::scan::reader::{ReaderCache, open_file, verify_schema};

// Conversion caches must have an id unique within the process.
static NEXT_CONVERSION_CACHE_ID: AtomicU64 = AtomicU64::new(0);

pub struct VortexBindInput {
    pub opener: Arc<dyn VortexFileOpener>,
    /// Files to scan, already expanded by the host. Paths or URLs.
    pub files: Vec<String>,
    pub config: VortexScanConfig,
}

/// The result of binding a scan: the files and the table schema, taken from the first file.
#[derive(Clone)]
pub struct VortexBindData {
    files: Arc<[Url]>,
    column_names: Vec<String>,
    column_types: Vec<LogicalType>,
    first_reader: LayoutReaderRef,
    opener: Arc<dyn VortexFileOpener>,
    config: VortexScanConfig,
    complex_filters: Vec<ExprRef>,
}

impl VortexBindData {
    pub fn files(&self) -> &[Url] {
        &self.files
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn column_types(&self) -> &[LogicalType] {
        &self.column_types
    }

    pub fn config(&self) -> &VortexScanConfig {
        &self.config
    }

    /// Push a filter over the table's columns into the scan, on top of any table filters.
    pub fn push_complex_filter(&mut self, expr: ExprRef) {
        debug!("pushing down complex filter {expr}");
        self.complex_filters.push(expr);
    }

    fn open_and_verify(&self, file_idx: usize) -> VortexResult<LayoutReaderRef> {
        let uri = self
            .files
            .get(file_idx)
            .ok_or_else(|| vortex_err!(OutOfBounds: file_idx, 0, self.files.len()))?;
        let reader = open_file(self.opener.as_ref(), uri, self.config.properties())?;
        verify_schema(&self.column_names, &self.column_types, reader.dtype())
            .map_err(|e| e.with_context(format!("Failed to open Vortex file: {uri}")))?;
        Ok(reader)
    }
}

impl PartialEq for VortexBindData {
    fn eq(&self, other: &Self) -> bool {
        self.files == other.files
            && self.column_names == other.column_names
            && self.column_types == other.column_types
    }
}

impl Debug for VortexBindData {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VortexBindData")
            .field("files", &self.files.iter().map(Url::as_str).collect_vec())
            .field("column_names", &self.column_names)
            .field("column_types", &self.column_types)
            .finish_non_exhaustive()
    }
}

/// State shared by every worker of one scan.
pub struct VortexScanGlobalState {
    bind_data: VortexBindData,
    partitions: Box<[ScanPartition]>,
    next_partition: AtomicUsize,
    finished: AtomicBool,
    readers: ReaderCache,
    projection: FieldNames,
    filter: Option<Arc<[u8]>>,
    rejected_filters: Vec<usize>,
    max_threads: usize,
}

impl VortexScanGlobalState {
    /// Claim the next unscanned partition, or `None` once all have been handed out.
    pub fn claim_next_partition(&self) -> Option<ScanPartition> {
        let idx = self.next_partition.fetch_add(1, Ordering::Relaxed);
        match self.partitions.get(idx) {
            Some(partition) => {
                debug!(
                    "claimed partition {}/{}: file {} rows {}..{}",
                    idx + 1,
                    self.partitions.len(),
                    partition.file_idx,
                    partition.start_row,
                    partition.end_row
                );
                Some(*partition)
            }
            None => {
                if !self.finished.swap(true, Ordering::Relaxed) {
                    debug!("all {} partitions claimed", self.partitions.len());
                }
                None
            }
        }
    }

    /// The reader of a file of the scan, opening it on first use.
    pub fn reader(&self, file_idx: usize) -> VortexResult<LayoutReaderRef> {
        self.readers
            .get_or_open(file_idx, || self.bind_data.open_and_verify(file_idx))
    }

    pub fn partitions(&self) -> &[ScanPartition] {
        &self.partitions
    }

    pub fn projection(&self) -> &FieldNames {
        &self.projection
    }

    /// The serialized filter handed to every partition scan.
    pub fn filter(&self) -> Option<&Arc<[u8]>> {
        self.filter.as_ref()
    }

    /// Positions of the table filters the scan does not apply, which the host must evaluate.
    pub fn rejected_filters(&self) -> &[usize] {
        &self.rejected_filters
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }

    fn scan_options(&self, partition: &ScanPartition) -> ScanOptions {
        ScanOptions {
            row_range: partition.row_range(),
            projection: self.projection.clone(),
            filter_expression: self.filter.clone(),
        }
    }
}

/// State of one worker thread.
#[derive(Default)]
pub struct VortexScanLocalState {
    stream: Option<Box<dyn ArrayStream>>,
    array: Option<ScanArrayRef>,
    current_row: u32,
    cache: Option<ConversionCache>,
    finished: bool,
}

impl VortexScanLocalState {
    /// The conversion cache of this worker, once it has converted an array.
    pub fn conversion_cache(&self) -> Option<&ConversionCache> {
        self.cache.as_ref()
    }

    /// Move to the next array, claiming a partition when the current stream is drained.
    /// Leaves `array` empty if the stream ended, so the caller comes back.
    fn pull_array(&mut self, global: &VortexScanGlobalState) -> VortexResult<()> {
        let mut stream = match self.stream.take() {
            Some(stream) => stream,
            None => {
                let Some(partition) = global.claim_next_partition() else {
                    self.finished = true;
                    return Ok(());
                };
                global
                    .reader(partition.file_idx)?
                    .scan(global.scan_options(&partition))?
            }
        };

        if let Some(array) = stream.next_array()? {
            trace!("pulled array of {} rows", array.len());
            self.array = Some(array);
            self.current_row = 0;
            self.stream = Some(stream);
        }
        Ok(())
    }
}

pub struct VortexTableFunction;

impl TableFunction for VortexTableFunction {
    type BindInput = VortexBindInput;
    type BindData = VortexBindData;
    type GlobalState = VortexScanGlobalState;
    type LocalState = VortexScanLocalState;

    fn bind(input: VortexBindInput) -> VortexResult<VortexBindData> {
        let VortexBindInput {
            opener,
            files,
            config,
        } = input;
        let files = files
            .iter()
            .map(|f| ensure_file_protocol(f))
            .collect::<VortexResult<Arc<[Url]>>>()?;
        let Some(first) = files.first() else {
            vortex_bail!("vortex scan requires at least one file");
        };

        let first_reader = open_file(opener.as_ref(), first, config.properties())?;
        let (column_names, column_types) = table_schema(first_reader.dtype())
            .map_err(|e| e.with_context(format!("Failed to open Vortex file: {first}")))?;
        debug!(
            "bound {} file(s) with columns [{}]",
            files.len(),
            column_names
                .iter()
                .zip(&column_types)
                .map(|(n, t)| format!("{n} {t}"))
                .join(", ")
        );

        Ok(VortexBindData {
            files,
            column_names,
            column_types,
            first_reader,
            opener,
            config,
            complex_filters: Vec::new(),
        })
    }

    fn init_global(
        bind_data: &VortexBindData,
        input: &TableFunctionInitInput<'_>,
    ) -> VortexResult<VortexScanGlobalState> {
        let column_ids = input.column_ids;
        let projection_ids = if input.projection_ids.is_empty() {
            column_ids.to_vec()
        } else {
            input
                .projection_ids
                .iter()
                .map(|&p| {
                    column_ids
                        .get(p)
                        .copied()
                        .ok_or_else(|| vortex_err!(OutOfBounds: p, 0, column_ids.len()))
                })
                .collect::<VortexResult<Vec<_>>>()?
        };
        let projection = projection_ids
            .iter()
            .map(|&c| {
                bind_data
                    .column_names
                    .get(c)
                    .map(|name| FieldName::from(name.as_str()))
                    .ok_or_else(|| vortex_err!(OutOfBounds: c, 0, bind_data.column_names.len()))
            })
            .collect::<VortexResult<FieldNames>>()?;

        let (conjuncts, rejected_filters) = input
            .filters
            .map(|filters| create_filter_expression(filters, &bind_data.column_names, column_ids))
            .transpose()?
            .unwrap_or_default()
            .into_parts();
        let filter = flatten_exprs(
            bind_data
                .complex_filters
                .iter()
                .cloned()
                .chain(conjuncts),
        )
        .map(|expr| {
            debug!("scan filter: {expr}");
            serialize(&expr)
        })
        .transpose()?
        .map(Arc::from);

        let readers = ReaderCache::new(bind_data.files.len());
        readers.seed(0, bind_data.first_reader.clone())?;
        let row_counts = (0..readers.len())
            .map(|file_idx| {
                readers
                    .get_or_open(file_idx, || bind_data.open_and_verify(file_idx))
                    .map(|reader| reader.row_count())
            })
            .collect::<VortexResult<Vec<_>>>()?;
        let partitions = plan_partitions(&row_counts, bind_data.config.partition_rows())?;

        let max_threads = bind_data
            .config
            .max_threads()
            .map_or(partitions.len(), |cap| cap.min(partitions.len()))
            .max(1);
        debug!(
            "planned {} partitions over {} rows, up to {} threads",
            partitions.len(),
            row_counts.iter().sum::<u64>(),
            max_threads
        );

        Ok(VortexScanGlobalState {
            bind_data: bind_data.clone(),
            partitions: partitions.into_boxed_slice(),
            next_partition: AtomicUsize::new(0),
            finished: AtomicBool::new(false),
            readers,
            projection,
            filter,
            rejected_filters,
            max_threads,
        })
    }

    fn init_local(_global: &VortexScanGlobalState) -> VortexResult<VortexScanLocalState> {
        Ok(VortexScanLocalState::default())
    }

    fn scan(
        global: &VortexScanGlobalState,
        local: &mut VortexScanLocalState,
        output: &mut dyn DataChunk,
    ) -> VortexResult<()> {
        loop {
            if local.finished {
                output.set_len(0);
                return Ok(());
            }

            let Some(array) = &local.array else {
                local.pull_array(global)?;
                continue;
            };

            let cache = local.cache.get_or_insert_with(|| {
                ConversionCache::new(NEXT_CONVERSION_CACHE_ID.fetch_add(1, Ordering::Relaxed))
            });
            let next_row = array.to_duckdb(output, local.current_row, cache)?;
            if next_row == 0 {
                trace!("array of {} rows converted", array.len());
                local.array = None;
            } else if next_row <= local.current_row {
                vortex_bail!(
                    AssertionFailed: "array conversion did not advance past row {}",
                    local.current_row
                );
            } else {
                local.current_row = next_row;
            }

            // An empty chunk ends the scan for this thread, so only return once rows were
            // written.
            if !output.is_empty() {
                return Ok(());
            }
        }
    }

    fn progress(global: &VortexScanGlobalState) -> f64 {
        let total = global.partitions.len();
        if total == 0 {
            return 100.0;
        }
        let claimed = global.next_partition.load(Ordering::Relaxed).min(total);
        (claimed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    fn max_threads(global: &VortexScanGlobalState) -> usize {
        global.max_threads
    }
}
