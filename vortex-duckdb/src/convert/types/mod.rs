mod from;
mod to;

pub use from::FromDuckDBType;
pub use to::ToDuckDBType;
