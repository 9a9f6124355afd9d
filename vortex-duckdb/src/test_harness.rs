//! An in-memory storage engine and output chunk, enough to drive whole scans in tests.
//!
//! Files are tables of [`Scalar`]s registered with a [`MemoryFileOpener`] under their URL.
//! Scans honour the row range and projection and evaluate the serialized filter row by row,
//! so what a scan returns shows exactly which predicates reached the engine.

use std::any::Any;
use std::collections::HashMap;
use std::io;
use std::ops::Range;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use vortex_dtype::{DType, FieldNames, Nullability};
use vortex_error::{VortexError, VortexResult, vortex_bail, vortex_err};
use vortex_expr::{BinaryExpr, ExprRef, GetItem, Identity, Literal, Operator, deserialize};
use vortex_scalar::Scalar;

use crate::convert::{ConversionCache, ToDuckDBScalar};
use crate::duckdb::{DataChunk, Value};
use crate::engine::{
    ArrayStream, FileOpenOptions, LayoutReader, LayoutReaderRef, ScanArray, ScanArrayRef,
    ScanOptions, VortexFileOpener,
};
use crate::scan::ensure_file_protocol;

/// A file held in memory, stored column by column.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    dtype: DType,
    columns: Arc<[Vec<Scalar>]>,
    row_count: usize,
}

impl MemoryFile {
    /// A file with a struct dtype, one column of values per field.
    pub fn try_new(dtype: DType, columns: Vec<Vec<Scalar>>) -> VortexResult<Self> {
        let Some(struct_) = dtype.as_struct() else {
            vortex_bail!("a table needs a struct dtype, got {}", dtype);
        };
        if struct_.nfields() != columns.len() {
            vortex_bail!(
                "{} fields but {} columns",
                struct_.nfields(),
                columns.len()
            );
        }
        let row_count = columns.first().map_or(0, Vec::len);
        for (column, field) in columns.iter().zip(struct_.fields()) {
            if column.len() != row_count {
                vortex_bail!("columns of unequal length");
            }
            if let Some(value) = column
                .iter()
                .find(|v| !v.dtype().eq_ignore_nullability(field))
            {
                vortex_bail!("value {} does not match column type {}", value, field);
            }
        }
        Ok(Self {
            dtype,
            columns: columns.into(),
            row_count,
        })
    }

    /// A file of any dtype without data, e.g. one that is not a table.
    pub fn empty(dtype: DType) -> Self {
        Self {
            dtype,
            columns: Arc::from([]),
            row_count: 0,
        }
    }

    pub fn dtype(&self) -> &DType {
        &self.dtype
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    fn column_index(&self, name: &str) -> VortexResult<usize> {
        self.dtype
            .as_struct()
            .and_then(|s| s.find(name))
            .ok_or_else(|| vortex_err!("no column {} in {}", name, self.dtype))
    }

    fn matches(&self, filter: &ExprRef, row: usize) -> VortexResult<bool> {
        Ok(self.evaluate(filter, row)?.as_bool()?.unwrap_or(false))
    }

    /// Evaluate an expression against one row, with SQL null semantics.
    fn evaluate(&self, expr: &ExprRef, row: usize) -> VortexResult<Scalar> {
        if let Some(literal) = Literal::maybe_from(expr) {
            return Ok(literal.value().clone());
        }
        if let Some(get_item) = expr.as_any().downcast_ref::<GetItem>() {
            if !get_item.child().as_any().is::<Identity>() {
                vortex_bail!(NotImplemented: "nested field access {}", expr);
            }
            let column = self.column_index(get_item.field())?;
            return self.columns[column]
                .get(row)
                .cloned()
                .ok_or_else(|| vortex_err!(OutOfBounds: row, 0, self.row_count));
        }
        let Some(binary) = expr.as_any().downcast_ref::<BinaryExpr>() else {
            vortex_bail!(NotImplemented: "evaluating {}", expr);
        };

        let lhs = self.evaluate(binary.lhs(), row)?;
        let rhs = self.evaluate(binary.rhs(), row)?;
        let result = match binary.op() {
            Operator::And => match (lhs.as_bool()?, rhs.as_bool()?) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            },
            Operator::Or => match (lhs.as_bool()?, rhs.as_bool()?) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            },
            _ if lhs.is_null() || rhs.is_null() => None,
            op => {
                let ordering = lhs.partial_cmp(&rhs).ok_or_else(|| {
                    vortex_err!("cannot compare {} with {}", lhs.dtype(), rhs.dtype())
                })?;
                Some(match op {
                    Operator::Eq => ordering.is_eq(),
                    Operator::NotEq => ordering.is_ne(),
                    Operator::Gt => ordering.is_gt(),
                    Operator::Gte => ordering.is_ge(),
                    Operator::Lt => ordering.is_lt(),
                    Operator::Lte => ordering.is_le(),
                    Operator::And | Operator::Or => vortex_bail!("{} is not a comparison", op),
                })
            }
        };
        Ok(result.map_or_else(
            || Scalar::null(DType::Bool(Nullability::Nullable)),
            |b| Scalar::bool(b, Nullability::Nullable),
        ))
    }
}

/// Opens [`MemoryFile`]s by URL, counting how often each one is opened.
#[derive(Default)]
pub struct MemoryFileOpener {
    files: HashMap<String, MemoryFile>,
    opens: Mutex<HashMap<String, usize>>,
    open_delay: Option<Duration>,
    batch_rows: Option<usize>,
}

impl MemoryFileOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file under a path or URL, normalized the way a scan normalizes its files.
    pub fn with_file(mut self, path: &str, file: MemoryFile) -> VortexResult<Self> {
        self.files
            .insert(ensure_file_protocol(path)?.to_string(), file);
        Ok(self)
    }

    /// Make every open take at least `delay`, to widen races between threads.
    pub fn with_open_delay(mut self, delay: Duration) -> Self {
        self.open_delay = Some(delay);
        self
    }

    /// Rows per array returned by scans, before filtering. Defaults to 1000.
    pub fn with_batch_rows(mut self, batch_rows: usize) -> Self {
        self.batch_rows = Some(batch_rows.max(1));
        self
    }

    pub fn open_count(&self, path: &str) -> usize {
        ensure_file_protocol(path)
            .ok()
            .and_then(|url| self.opens.lock().get(url.as_str()).copied())
            .unwrap_or(0)
    }

    pub fn total_opens(&self) -> usize {
        self.opens.lock().values().sum()
    }
}

impl VortexFileOpener for MemoryFileOpener {
    fn open(&self, options: &FileOpenOptions) -> VortexResult<LayoutReaderRef> {
        let uri = options.uri.as_str();
        *self.opens.lock().entry(uri.to_string()).or_default() += 1;
        if let Some(delay) = self.open_delay {
            thread::sleep(delay);
        }

        let file = self.files.get(uri).ok_or_else(|| {
            VortexError::from(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file {uri}"),
            ))
        })?;
        Ok(Arc::new(MemoryReader {
            file: file.clone(),
            batch_rows: self.batch_rows.unwrap_or(1000),
        }))
    }
}

#[derive(Debug)]
pub struct MemoryReader {
    file: MemoryFile,
    batch_rows: usize,
}

impl LayoutReader for MemoryReader {
    fn dtype(&self) -> &DType {
        self.file.dtype()
    }

    fn row_count(&self) -> u64 {
        self.file.row_count() as u64
    }

    fn scan(&self, options: ScanOptions) -> VortexResult<Box<dyn ArrayStream>> {
        let start = usize::try_from(options.row_range.start)?;
        let end = usize::try_from(options.row_range.end)?;
        if start > end || end > self.file.row_count() {
            vortex_bail!(OutOfBounds: end, start, self.file.row_count());
        }
        let projection = options
            .projection
            .iter()
            .map(|name| self.file.column_index(name))
            .collect::<VortexResult<Vec<_>>>()?;
        let filter = options
            .filter_expression
            .as_deref()
            .map(deserialize)
            .transpose()?;

        Ok(Box::new(MemoryStream {
            file: self.file.clone(),
            projection,
            filter,
            remaining: start..end,
            batch_rows: self.batch_rows,
        }))
    }
}

struct MemoryStream {
    file: MemoryFile,
    projection: Vec<usize>,
    filter: Option<ExprRef>,
    remaining: Range<usize>,
    batch_rows: usize,
}

impl ArrayStream for MemoryStream {
    fn next_array(&mut self) -> VortexResult<Option<ScanArrayRef>> {
        if self.remaining.is_empty() {
            return Ok(None);
        }
        let batch_end = (self.remaining.start + self.batch_rows).min(self.remaining.end);
        let batch = self.remaining.start..batch_end;
        self.remaining.start = batch_end;

        let mut rows = Vec::with_capacity(batch.len());
        for row in batch {
            let keep = match &self.filter {
                Some(filter) => self.file.matches(filter, row)?,
                None => true,
            };
            if keep {
                rows.push(row);
            }
        }

        // Batches that filter down to nothing are still returned, as a real engine may do.
        let columns = self
            .projection
            .iter()
            .map(|&c| rows.iter().map(|&r| self.file.columns[c][r].clone()).collect())
            .collect();
        Ok(Some(Box::new(MemoryArray {
            columns,
            len: rows.len(),
        })))
    }
}

struct MemoryArray {
    columns: Vec<Vec<Scalar>>,
    len: usize,
}

impl ScanArray for MemoryArray {
    fn len(&self) -> usize {
        self.len
    }

    fn to_duckdb(
        &self,
        chunk: &mut dyn DataChunk,
        offset: u32,
        cache: &mut ConversionCache,
    ) -> VortexResult<u32> {
        let capacity = chunk.capacity();
        let chunk = chunk
            .as_any_mut()
            .downcast_mut::<MemoryChunk>()
            .ok_or_else(|| vortex_err!("memory arrays only convert into memory chunks"))?;
        if chunk.columns.len() != self.columns.len() {
            vortex_bail!(
                "chunk has {} columns, array has {}",
                chunk.columns.len(),
                self.columns.len()
            );
        }

        let start = offset as usize;
        if start > self.len {
            vortex_bail!(OutOfBounds: start, 0, self.len);
        }
        let end = (start + capacity).min(self.len);
        for (idx, (source, target)) in self.columns.iter().zip(&mut chunk.columns).enumerate() {
            // Convert through a per-column buffer held by the thread's cache.
            let buffer = cache.get_or_insert_with(idx, Vec::<Value>::new)?;
            buffer.clear();
            for scalar in &source[start..end] {
                buffer.push(scalar.try_to_duckdb_scalar()?);
            }
            target.clear();
            target.extend(buffer.drain(..));
        }
        chunk.len = end - start;
        chunk.cache_ids.push(cache.instance_id());

        Ok(if end >= self.len {
            0
        } else {
            u32::try_from(end)?
        })
    }
}

/// A host chunk collecting [`Value`]s.
#[derive(Debug, Clone)]
pub struct MemoryChunk {
    columns: Vec<Vec<Value>>,
    capacity: usize,
    len: usize,
    cache_ids: Vec<u64>,
}

impl MemoryChunk {
    pub fn new(column_count: usize, capacity: usize) -> Self {
        Self {
            columns: vec![Vec::with_capacity(capacity); column_count],
            capacity,
            len: 0,
            cache_ids: Vec::new(),
        }
    }

    pub fn column(&self, idx: usize) -> &[Value] {
        &self.columns[idx][..self.len]
    }

    /// The valid rows of the chunk.
    pub fn rows(&self) -> Vec<Vec<Value>> {
        (0..self.len)
            .map(|row| self.columns.iter().map(|c| c[row].clone()).collect())
            .collect()
    }

    /// Ids of the conversion caches used by every conversion into this chunk, oldest first.
    pub fn cache_ids(&self) -> &[u64] {
        &self.cache_ids
    }
}

impl DataChunk for MemoryChunk {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.len
    }

    fn set_len(&mut self, len: usize) {
        self.len = len.min(self.capacity);
    }

    fn reset(&mut self) {
        self.len = 0;
        self.columns.iter_mut().for_each(Vec::clear);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The field names of a projection, for building [`ScanOptions`] by hand.
pub fn field_names(names: &[&str]) -> FieldNames {
    names.iter().map(|n| Arc::from(*n)).collect()
}
