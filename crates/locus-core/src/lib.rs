//! Core types for the locus addressable-storage framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the pieces every other locus crate agrees on: instance identifiers,
//! the opaque [`Field`] slot-value contract, and the error enums raised
//! at construction and write boundaries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod id;

pub use error::{BufferError, RegionError};
pub use field::Field;
pub use id::{BufferId, SpaceInstanceId};
