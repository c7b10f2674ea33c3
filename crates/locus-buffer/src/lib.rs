//! Position-addressed Field storage for locus.
//!
//! A [`Buffer`] maps every position of one [`Region`](locus_space::Region)
//! to one [`Field`](locus_core::Field) slot, laid out in region order so
//! that lookup is a single offset computation.
//!
//! # Backends
//!
//! ```text
//! Buffer (trait)
//! ├── ArrayBuffer       in-place writes, Vec<F>
//! ├── PersistentBuffer  copy-on-write, Arc<[F]>, every change is a new instance
//! ├── AnyBuffer         either of the above, chosen by BufferConfig
//! └── IndexedBuffer     decorator adding a lazy Field → positions index
//!
//! SyncBuffer            one Mutex around any Buffer, rebinding on new instances
//! ```
//!
//! Writes report a [`SetOutcome`]: `SameInstance` for in-place backends,
//! `NewInstance(b)` for copy-on-write ones. [`Buffer::store`] and
//! [`SyncBuffer::set`] rebind automatically, so callers that go through
//! them never see the difference.
//!
//! # Errors
//!
//! Reads never fail: unset slots and unaddressable positions read as the
//! null Field. Writes outside the region fail with
//! [`BufferError::Overflow`](locus_core::BufferError::Overflow), and a
//! region too large to index fails construction with
//! [`BufferError::CapacityExceeded`](locus_core::BufferError::CapacityExceeded).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod any;
pub mod array;
pub mod buffer;
pub mod config;
pub mod index;
pub mod persistent;
pub mod references;
pub mod sync;
pub mod tools;

pub use any::AnyBuffer;
pub use array::ArrayBuffer;
pub use buffer::{Buffer, SetOutcome};
pub use config::{Backend, BufferConfig};
pub use index::{FieldEquals, FieldIndex, IndexedBuffer};
pub use persistent::PersistentBuffer;
pub use references::ReferenceCount;
pub use sync::SyncBuffer;
