//! Transparent gzip framing for vector files.
//!
//! The adapter presents plain `Read`/`Write` streams regardless of whether
//! the file on disk is gzip-framed. Bytes on the decompressed side are
//! identical to the uncompressed case, so compression never affects codec
//! correctness - only on-disk size and I/O cost.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use vecfile_core::error::{Error, FormatError, Result};

/// Whether a file carries gzip framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Plain text file.
    None,
    /// Gzip-framed file (`.gz` suffix).
    Gzip,
}

impl Compression {
    /// Detects compression from a trailing `.gz` suffix.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Self::Gzip,
            _ => Self::None,
        }
    }
}

/// A byte sink that must be explicitly finalized.
///
/// Dropping a gzip encoder silently loses the trailer, so the router calls
/// [`finish`](Sink::finish) on the success path and discards the temp file
/// otherwise.
pub trait Sink: Write {
    /// Flushes buffered data, writes any stream trailer, and syncs the file.
    fn finish(self: Box<Self>) -> Result<()>;
}

impl Sink for BufWriter<File> {
    fn finish(mut self: Box<Self>) -> Result<()> {
        self.flush()?;
        self.get_ref().sync_all()?;
        Ok(())
    }
}

impl Sink for GzEncoder<BufWriter<File>> {
    fn finish(self: Box<Self>) -> Result<()> {
        let mut inner = (*self).finish()?;
        inner.flush()?;
        inner.get_ref().sync_all()?;
        Ok(())
    }
}

/// Opens `path` for writing, wrapping it in a gzip encoder if requested.
///
/// The gzip stream is a single standalone gzip member, readable by any
/// standard tool.
pub fn open_write(path: &Path, compression: Compression) -> Result<Box<dyn Sink>> {
    let file = File::create(path)?;
    let sink = BufWriter::new(file);
    Ok(match compression {
        Compression::None => Box::new(sink),
        Compression::Gzip => Box::new(GzEncoder::new(sink, flate2::Compression::default())),
    })
}

/// Opens `path` for reading, wrapping it in a gzip decoder if requested.
pub fn open_read(path: &Path, compression: Compression) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    let source = BufReader::new(file);
    Ok(match compression {
        Compression::None => Box::new(source),
        Compression::Gzip => Box::new(GzDecoder::new(source)),
    })
}

/// Reads the full decompressed text of `path`.
///
/// A `.gz` file with a corrupt header, body, or CRC is a
/// [`FormatError::CorruptGzip`]; non-UTF-8 content is a
/// [`FormatError::InvalidEncoding`]; everything else is [`Error::Io`].
pub fn read_to_text(path: &Path, compression: Compression) -> Result<String> {
    let mut source = open_read(path, compression)?;
    let mut bytes = Vec::new();
    if let Err(e) = source.read_to_end(&mut bytes) {
        if compression == Compression::Gzip && is_stream_corruption(&e) {
            return Err(FormatError::CorruptGzip(e.to_string()).into());
        }
        return Err(e.into());
    }
    String::from_utf8(bytes).map_err(|_| Error::from(FormatError::InvalidEncoding))
}

// flate2 reports bad gzip data through these io::ErrorKinds; real file I/O
// failures surface as other kinds and stay Error::Io.
fn is_stream_corruption(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof
    )
}
