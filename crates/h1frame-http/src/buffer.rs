//! Post-padded receive buffer.
//!
//! The parser writes a sentinel byte just past the logical end of its input.
//! Transports that hand it their receive buffer must therefore keep writable
//! slack after the data; [`PaddedBuffer`] does that bookkeeping.

/// Writable slack kept after the logical end of a receive buffer.
///
/// The parser needs a single byte; 32 leaves room for sibling parsers that
/// share the receive buffer convention.
pub const PADDING: usize = 32;

/// An owned byte buffer that always keeps [`PADDING`] writable bytes past its
/// logical length.
///
/// # Example
///
/// ```
/// use h1frame_http::{PADDING, PaddedBuffer};
///
/// let mut buffer = PaddedBuffer::with_capacity(16);
/// buffer.extend(b"GET / HTTP/1.1\r\n");
///
/// let (bytes, len) = buffer.as_padded_mut();
/// assert_eq!(len, 16);
/// assert!(bytes.len() >= len + PADDING);
/// ```
#[derive(Debug, Clone)]
pub struct PaddedBuffer {
    data: Vec<u8>,
    len: usize,
}

impl Default for PaddedBuffer {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl PaddedBuffer {
    /// Create a buffer able to hold `capacity` bytes before growing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity + PADDING],
            len: 0,
        }
    }

    /// Returns the logical length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer holds no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns how many bytes fit before the buffer has to grow.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len() - PADDING
    }

    /// Returns the logical contents.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Appends bytes, growing the buffer if needed.
    pub fn extend(&mut self, bytes: &[u8]) {
        let needed = self.len + bytes.len() + PADDING;
        if needed > self.data.len() {
            self.data.resize(needed, 0);
        }
        self.data[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    /// Returns the unused space between the logical end and the padding,
    /// for reading straight from a socket. Follow with [`advance`].
    ///
    /// [`advance`]: Self::advance
    pub fn spare_mut(&mut self) -> &mut [u8] {
        let end = self.data.len() - PADDING;
        &mut self.data[self.len..end]
    }

    /// Marks `n` bytes written into [`spare_mut`](Self::spare_mut) as data.
    ///
    /// Values larger than the spare capacity are clamped.
    pub fn advance(&mut self, n: usize) {
        self.len = (self.len + n).min(self.capacity());
    }

    /// Returns the whole writable slice together with the logical length.
    ///
    /// The slice is at least `len + PADDING` bytes long.
    pub fn as_padded_mut(&mut self) -> (&mut [u8], usize) {
        (&mut self.data, self.len)
    }

    /// Discards the logical contents, keeping the allocation.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}
