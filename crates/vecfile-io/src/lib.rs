//! # vecfile-io
//!
//! I/O layer for Vecfile: transparent gzip framing and the path-driven
//! router that binds a file suffix to a container format.
//!
//! All operations are synchronous and blocking; each call owns its stream
//! and buffer, so concurrent calls on different paths are safe. Two calls
//! targeting the same path race at the filesystem level (last writer wins) -
//! cross-process locking is a caller concern.
//!
//! ## Modules
//!
//! - [`compress`] - gzip compression adapter over raw file streams
//! - [`router`] - suffix dispatch and the consumer-facing [`write`]/[`read`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compress;
pub mod router;

pub use compress::Compression;
pub use router::{CodecOptions, ContainerFormat, PathDescriptor, read, read_with, write, write_with};
