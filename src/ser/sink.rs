use std::io::{self, Write};

/// Append-only destination for encoded bytes.
///
/// Encoders only ever append; nothing is read back, sought or rewritten. A
/// sink belongs to a single encoding session at a time, which `&mut` access
/// already enforces.
pub trait Sink {
    /// Appends a single byte.
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Appends a contiguous byte range.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl Sink for Vec<u8> {
    #[inline]
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.push(byte);
        Ok(())
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        (**self).write_byte(byte)
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_bytes(bytes)
    }
}

/// Write-through sink forwarding every byte to an [`io::Write`] stream.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
    written: u64,
}

impl<W: Write> IoSink<W> {
    /// Wraps the provided stream.
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Number of bytes accepted by the underlying stream so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flushes the stream and returns it.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> Sink for IoSink<W> {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.write_bytes(&[byte])
    }

    fn write_bytes(&mut self, mut bytes: &[u8]) -> io::Result<()> {
        while !bytes.is_empty() {
            match self.inner.write(bytes) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "stream accepted no bytes",
                    ))
                }
                Ok(n) => {
                    self.written += n as u64;
                    bytes = &bytes[n..];
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

/// In-memory sink refusing to grow past a fixed number of bytes.
///
/// A write that would cross the limit is rejected as a whole, so the buffer
/// never holds a torn multi-byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedSink {
    buf: Vec<u8>,
    limit: usize,
}

impl BoundedSink {
    /// Creates an empty sink accepting at most `limit` bytes.
    pub fn new(limit: usize) -> Self {
        Self {
            buf: Vec::with_capacity(limit.min(256)),
            limit,
        }
    }

    /// Maximum number of bytes the sink accepts.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` when nothing was written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the sink and returns the written bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl Sink for BoundedSink {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.write_bytes(&[byte])
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        let fits = self
            .buf
            .len()
            .checked_add(bytes.len())
            .is_some_and(|end| end <= self.limit);
        if !fits {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("sink limit of {} bytes exceeded", self.limit),
            ));
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}
