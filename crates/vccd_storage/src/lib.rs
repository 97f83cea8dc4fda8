//! # VCCD Storage
//!
//! Output sink abstraction for the VCCD caption compiler.
//!
//! This crate provides the lowest-level output abstraction for the
//! compiler. Sinks are **opaque byte destinations** - they do not
//! interpret the data written through them.
//!
//! ## Design Principles
//!
//! - Sinks are simple byte destinations (append, fill, patch, flush)
//! - No knowledge of the VCCD archive layout
//! - The compiler owns all format interpretation
//!
//! ## Available Sinks
//!
//! - [`MemorySink`] - For testing and byte-exact assertions
//! - [`FileSink`] - For writing archives using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use vccd_storage::{MemorySink, Sink};
//!
//! let mut sink = MemorySink::new();
//! sink.append(b"hello").unwrap();
//! sink.fill(0, 3).unwrap();
//! assert_eq!(sink.position(), 8);
//! sink.patch(0, b"H").unwrap();
//! assert_eq!(&sink.data()[..5], b"Hello");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod sink;

pub use error::{StorageError, StorageResult};
pub use file::FileSink;
pub use memory::MemorySink;
pub use sink::Sink;
