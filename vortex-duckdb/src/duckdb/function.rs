use vortex_error::VortexResult;

use crate::duckdb::{DataChunk, TableFilterSet};

/// What the host tells a table function about the scan it is about to run.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableFunctionInitInput<'a> {
    /// Bound column indices read by the scan.
    pub column_ids: &'a [usize],
    /// Indices into `column_ids` of the columns to emit. Empty means every column of
    /// `column_ids`, in order.
    pub projection_ids: &'a [usize],
    /// Filters keyed by position in `column_ids`.
    pub filters: Option<&'a TableFilterSet>,
}

/// The phases of a parallel table function.
///
/// The host binds once, initializes one global state per execution, then has every worker
/// thread create its own local state and call [`scan`](TableFunction::scan) until it emits an
/// empty chunk.
pub trait TableFunction {
    type BindInput;
    type BindData: Clone + Send + Sync;
    type GlobalState: Send + Sync;
    type LocalState: Send;

    fn bind(input: Self::BindInput) -> VortexResult<Self::BindData>;

    fn init_global(
        bind_data: &Self::BindData,
        input: &TableFunctionInitInput<'_>,
    ) -> VortexResult<Self::GlobalState>;

    fn init_local(global: &Self::GlobalState) -> VortexResult<Self::LocalState>;

    /// Fill `output`. Leaving it empty signals that this thread is done.
    fn scan(
        global: &Self::GlobalState,
        local: &mut Self::LocalState,
        output: &mut dyn DataChunk,
    ) -> VortexResult<()>;

    /// Percentage of the scan handed out to workers so far.
    fn progress(global: &Self::GlobalState) -> f64;

    fn max_threads(global: &Self::GlobalState) -> usize;
}
