#![deny(missing_docs)]

//! A type system for Vortex
//!
//! This crate contains the logical types that flow between a Vortex file and a scan: the
//! [`DType`] descriptor, its physical [`PType`]s and [`Nullability`], and (optionally) their
//! protocol buffer representation.

pub use dtype::*;
pub use nullability::*;
pub use ptype::*;
pub use struct_::*;

mod dtype;
mod nullability;
mod ptype;
mod serde;
mod struct_;

#[cfg(feature = "proto")]
pub mod proto {
    //! Protocol buffer representations for DTypes
    //!
    //! This module contains the code to serialize and deserialize DTypes to and from protocol buffers.

    pub use vortex_proto::dtype;
}
