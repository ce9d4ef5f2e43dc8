//! Zero-copy request view.
//!
//! A [`Request`] is rebuilt on the stack for every parsed header block. It
//! owns nothing: the method, the URL and every header name/value are slices
//! into the buffer handed to the parser, so a `Request` can only be observed
//! inside [`StreamHandler::on_request`](crate::StreamHandler::on_request).
//!
//! # Example
//!
//! ```
//! use h1frame_http::{FramingError, PaddedBuffer, Request, StreamParser, handler_fn};
//!
//! let mut buffer = PaddedBuffer::with_capacity(128);
//! buffer.extend(b"GET /a/b?c=1 HTTP/1.1\r\nHost: example.com\r\n\r\n");
//!
//! let mut seen = Vec::new();
//! let mut handler = handler_fn(
//!     |req: &Request<'_>| {
//!         seen.push((req.url().to_vec(), req.get_header(b"host").to_vec()));
//!     },
//!     |_chunk: &[u8], _last: bool| {},
//!     |_err: FramingError| {},
//! );
//! StreamParser::new().consume(&mut buffer, &mut handler);
//! drop(handler);
//!
//! assert_eq!(seen, vec![(b"/a/b?c=1".to_vec(), b"example.com".to_vec())]);
//! ```

/// Number of slots in a request view, counting the start line.
///
/// One slot holds the start line, so a request carries at most
/// `MAX_HEADERS - 1` header lines.
pub const MAX_HEADERS: usize = 50;

/// Length of the protocol-version token trimmed from the request target
/// (`" HTTP/1.1"`).
pub const VERSION_SUFFIX_LEN: usize = 9;

const HEADER_SLOTS: usize = MAX_HEADERS - 1;

/// A single header with a lowercased name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    name: &'a [u8],
    value: &'a [u8],
}

impl<'a> Header<'a> {
    const EMPTY: Self = Self {
        name: &[],
        value: &[],
    };

    pub(crate) fn new(name: &'a [u8], value: &'a [u8]) -> Self {
        Self { name, value }
    }

    /// Returns the header name, lowercased at parse time.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'a [u8] {
        self.name
    }

    /// Returns the raw header value.
    ///
    /// Leading separators are skipped; trailing whitespace is preserved.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &'a [u8] {
        self.value
    }

    /// Returns the header name as a string, if valid UTF-8.
    #[must_use]
    pub fn name_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.name).ok()
    }

    /// Returns the header value as a string, if valid UTF-8.
    #[must_use]
    pub fn value_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.value).ok()
    }

    /// Returns the header as a raw `(&[u8], &[u8])` pair.
    #[inline]
    #[must_use]
    pub fn as_bytes_pair(&self) -> (&'a [u8], &'a [u8]) {
        (self.name, self.value)
    }
}

/// A parsed request: start line plus headers, borrowed from the input buffer.
#[derive(Debug, Clone)]
pub struct Request<'a> {
    method: &'a [u8],
    url: &'a [u8],
    headers: [Header<'a>; HEADER_SLOTS],
    len: usize,
}

impl<'a> Request<'a> {
    pub(crate) fn new() -> Self {
        Self {
            method: &[],
            url: &[],
            headers: [Header::EMPTY; HEADER_SLOTS],
            len: 0,
        }
    }

    pub(crate) fn set_start_line(&mut self, method: &'a [u8], target: &'a [u8]) {
        self.method = method;
        self.url = target;
    }

    /// Appends a header. Returns `false` when every slot is taken.
    pub(crate) fn push_header(&mut self, header: Header<'a>) -> bool {
        match self.headers.get_mut(self.len) {
            Some(slot) => {
                *slot = header;
                self.len += 1;
                true
            }
            None => false,
        }
    }

    /// Drops the trailing protocol-version token from the request target.
    pub(crate) fn trim_version(&mut self) {
        let keep = self.url.len().saturating_sub(VERSION_SUFFIX_LEN);
        self.url = &self.url[..keep];
    }

    /// Returns the request method, lowercased at parse time (`b"get"`).
    #[inline]
    #[must_use]
    pub fn method(&self) -> &'a [u8] {
        self.method
    }

    /// Returns the request target with the protocol version removed.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &'a [u8] {
        self.url
    }

    /// Returns the request target as a string, if valid UTF-8.
    #[must_use]
    pub fn url_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.url).ok()
    }

    /// Returns the request target up to the first `?`.
    #[must_use]
    pub fn path(&self) -> &'a [u8] {
        match memchr::memchr(b'?', self.url) {
            Some(pos) => &self.url[..pos],
            None => self.url,
        }
    }

    /// Returns the raw query string after the first `?`, if any.
    #[must_use]
    pub fn query(&self) -> Option<&'a [u8]> {
        memchr::memchr(b'?', self.url).map(|pos| &self.url[pos + 1..])
    }

    /// Looks up a header by name.
    ///
    /// `name` must be lowercase: names in the request were lowercased at
    /// parse time and are compared byte for byte. Returns an empty slice if
    /// the header is absent.
    #[must_use]
    pub fn get_header(&self, name: &[u8]) -> &'a [u8] {
        self.header(name).unwrap_or(&[])
    }

    /// Looks up a header by lowercase name, distinguishing absent headers
    /// from empty values.
    #[must_use]
    pub fn header(&self, name: &[u8]) -> Option<&'a [u8]> {
        self.headers()
            .find(|header| header.name == name)
            .map(|header| header.value)
    }

    /// Iterates over all headers in arrival order.
    #[must_use]
    pub fn headers(&self) -> Headers<'_, 'a> {
        Headers {
            inner: self.headers[..self.len].iter(),
        }
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the request carried no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Iterator over the headers of a [`Request`].
#[derive(Debug, Clone)]
pub struct Headers<'r, 'a> {
    inner: std::slice::Iter<'r, Header<'a>>,
}

impl<'a> Iterator for Headers<'_, 'a> {
    type Item = Header<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Headers<'_, '_> {}

// ============================================================================
// Tests
// ============================================================================
