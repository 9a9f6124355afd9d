//! The slice of the host engine's table-function interface the scan consumes: logical types,
//! constant values, pushed-down table filters, the output chunk and the phases of a table
//! function.

mod chunk;
mod filter;
mod function;
mod types;
mod value;

pub use chunk::*;
pub use filter::*;
pub use function::*;
pub use types::*;
pub use value::*;
