//! Test utilities for locus development.
//!
//! Provides two concrete spaces ([`LinearSpace`], [`GridSpace`]), a
//! compliance suite that checks the `Space` and `Buffer` contracts for any
//! implementation, and ready-made regions and buffers for scenario tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod compliance;
pub mod fixtures;
pub mod spaces;

pub use spaces::{GridSpace, LinearSpace};
