#[cfg(feature = "proto")]
mod proto;
