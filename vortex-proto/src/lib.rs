//! Protocol buffer definitions for Vortex types.
//!
//! The message definitions live in `proto/*.proto`; the Rust bindings in `src/generated` are
//! checked in so that building this crate does not require `protoc`.
#![allow(clippy::all, clippy::pedantic, missing_docs)]

#[cfg(feature = "dtype")]
#[path = "./generated/vortex.dtype.rs"]
pub mod dtype;

#[cfg(feature = "scalar")]
#[path = "./generated/vortex.scalar.rs"]
pub mod scalar;

#[cfg(feature = "expr")]
#[path = "./generated/vortex.expr.rs"]
pub mod expr;
