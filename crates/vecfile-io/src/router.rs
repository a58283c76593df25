//! Path-driven dispatch between container formats and compression.
//!
//! The router is the only consumer-facing surface: [`write`] and [`read`].
//! Both derive a [`PathDescriptor`] from the path's suffix chain before
//! touching the filesystem, so an unsupported suffix fails without any I/O.
//!
//! Writes go through a sibling temp file and an atomic rename, so a failed
//! write never leaves a destination file that looks well-formed but is
//! actually truncated.

use crate::compress::{self, Compression};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use vecfile_core::codec::{VectorCodec, XmlCodec};
use vecfile_core::error::{Error, Result};
use vecfile_core::types::{DenseVector, VectorData};

/// Supported container formats.
///
/// Only XML exists today; this enum (and [`PathDescriptor::codec`]) is the
/// extension point for mapping further recognized suffixes to codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// The XML vector container format.
    Xml,
}

/// The (format, compression) pair derived from a path's suffix chain.
///
/// Computed once per I/O call, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathDescriptor {
    /// Container format selected by the suffix.
    pub format: ContainerFormat,
    /// Compression framing selected by a trailing `.gz`.
    pub compression: Compression,
}

impl PathDescriptor {
    /// Derives the descriptor from `path`.
    ///
    /// `<name>.xml` maps to uncompressed XML and `<name>.xml.gz` to
    /// gzip-compressed XML. Anything else is an
    /// [`Error::UnsupportedFormat`] - suffixes are never silently coerced.
    pub fn from_path(path: &Path) -> Result<Self> {
        let unsupported = || Error::UnsupportedFormat {
            path: path.to_path_buf(),
        };
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(unsupported)?;

        let compression = Compression::from_path(path);
        let base = match compression {
            Compression::Gzip => name.strip_suffix(".gz").unwrap_or(name),
            Compression::None => name,
        };

        if base.ends_with(".xml") {
            Ok(Self {
                format: ContainerFormat::Xml,
                compression,
            })
        } else {
            Err(unsupported())
        }
    }

    fn codec(&self, options: CodecOptions) -> impl VectorCodec {
        match self.format {
            ContainerFormat::Xml => XmlCodec::new().with_allow_non_finite(options.allow_non_finite),
        }
    }
}

/// Behavior knobs applied to whichever codec the path suffix selects.
///
/// The default is strict: NaN and infinite values are rejected on both
/// write and read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Permit NaN and infinite values.
    pub allow_non_finite: bool,
}

/// Writes `vector` to `path`, inferring format and compression from the
/// suffix.
///
/// The document is first written to a sibling `.tmp` file and renamed onto
/// the target only after the stream is fully flushed and synced; on any
/// error the temp file is removed and the target is left untouched.
///
/// Concurrent writes to the same path race (last writer wins); callers
/// needing exclusion must lock externally.
pub fn write<P: AsRef<Path>, V: VectorData>(path: P, vector: &V) -> Result<()> {
    write_with(path, vector, CodecOptions::default())
}

/// [`write`] with explicit [`CodecOptions`].
pub fn write_with<P: AsRef<Path>, V: VectorData>(
    path: P,
    vector: &V,
    options: CodecOptions,
) -> Result<()> {
    let path = path.as_ref();
    let descriptor = PathDescriptor::from_path(path)?;
    let text = descriptor.codec(options).encode_to_string(vector)?;

    let tmp = temp_sibling(path);
    let result = write_text(&tmp, descriptor.compression, &text)
        .and_then(|()| fs::rename(&tmp, path).map_err(Error::from));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
        return result;
    }

    debug!(path = %path.display(), size = vector.size(), "wrote vector");
    Ok(())
}

/// Reads a vector from `path`, inferring format and compression from the
/// suffix.
///
/// Errors from the adapter and codec propagate unchanged; a failed read
/// never returns a partially populated vector.
pub fn read<P: AsRef<Path>>(path: P) -> Result<DenseVector> {
    read_with(path, CodecOptions::default())
}

/// [`read`] with explicit [`CodecOptions`].
pub fn read_with<P: AsRef<Path>>(path: P, options: CodecOptions) -> Result<DenseVector> {
    let path = path.as_ref();
    let descriptor = PathDescriptor::from_path(path)?;
    let text = compress::read_to_text(path, descriptor.compression)?;
    let vector = descriptor.codec(options).decode_str(&text)?;

    debug!(path = %path.display(), size = vector.size(), "read vector");
    Ok(vector)
}

fn write_text(path: &Path, compression: Compression, text: &str) -> Result<()> {
    let mut sink = compress::open_write(path, compression)?;
    sink.write_all(text.as_bytes())?;
    sink.finish()
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
