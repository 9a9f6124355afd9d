mod cache;
mod scalar;
mod types;

pub use cache::ConversionCache;
pub use scalar::{ToDuckDBScalar, value_into_scalar};
pub use types::{FromDuckDBType, ToDuckDBType};
