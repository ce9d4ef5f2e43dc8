//! Per-connection stream parser.
//!
//! [`StreamParser`] sits in front of the dispatch loop and carries the state
//! that spans transport reads:
//!
//! - body bytes still owed to the last request (its `content-length` minus
//!   what has been delivered), and
//! - a bounded reassembly buffer holding a header block split across reads.
//!
//! The two are never active together: a connection is either mid-body or
//! mid-headers.
//!
//! # Example
//!
//! ```
//! use h1frame_http::{FramingError, PaddedBuffer, Request, StreamParser, handler_fn};
//!
//! let mut urls = Vec::new();
//! let mut handler = handler_fn(
//!     |req: &Request<'_>| urls.push(req.url().to_vec()),
//!     |_chunk: &[u8], _last: bool| {},
//!     |_err: FramingError| {},
//! );
//!
//! let mut parser = StreamParser::new();
//! let mut buffer = PaddedBuffer::with_capacity(64);
//!
//! // The request line arrives in two reads
//! buffer.extend(b"GET /split HT");
//! parser.consume(&mut buffer, &mut handler);
//! buffer.extend(b"TP/1.1\r\n\r\n");
//! parser.consume(&mut buffer, &mut handler);
//! drop(handler);
//!
//! assert_eq!(urls, vec![b"/split".to_vec()]);
//! ```

use crate::buffer::{PADDING, PaddedBuffer};
use crate::config::ParserConfig;
use crate::dispatch::{DispatchMode, fence_and_consume};
use crate::error::FramingError;
use crate::handler::StreamHandler;

/// Incremental HTTP/1.x request framer for one connection.
///
/// Feed every chunk the transport delivers, in order, to
/// [`consume_post_padded`](Self::consume_post_padded) (or
/// [`consume`](Self::consume)). Events fire synchronously on the supplied
/// [`StreamHandler`].
#[derive(Debug, Clone, Default)]
pub struct StreamParser {
    config: ParserConfig,
    reassembly: Vec<u8>,
    pending_body: usize,
    poisoned: bool,
}

impl StreamParser {
    /// Create a parser with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given configuration.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the parser configuration.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the body bytes declared but not yet delivered.
    #[must_use]
    pub fn pending_body_bytes(&self) -> usize {
        self.pending_body
    }

    /// Returns the number of header bytes held for reassembly.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.reassembly.len()
    }

    /// Returns true once a fatal error has been reported.
    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Drop all stream state, keeping the configuration.
    pub fn reset(&mut self) {
        self.reassembly.clear();
        self.pending_body = 0;
        self.poisoned = false;
    }

    /// Feeds the contents of `buffer` and clears it.
    pub fn consume<H: StreamHandler + ?Sized>(&mut self, buffer: &mut PaddedBuffer, handler: &mut H) {
        let (data, length) = buffer.as_padded_mut();
        self.consume_post_padded(data, length, handler);
        buffer.clear();
    }

    /// Feeds one chunk of transport data.
    ///
    /// `data[..length]` is the chunk. `data` must extend at least one byte
    /// past `length`: that byte is overwritten with a scan sentinel. Header
    /// names inside the chunk are lowercased in place.
    ///
    /// After [`StreamHandler::on_error`] has fired, further calls are
    /// ignored until [`reset`](Self::reset).
    pub fn consume_post_padded<H: StreamHandler + ?Sized>(
        &mut self,
        data: &mut [u8],
        length: usize,
        handler: &mut H,
    ) {
        if self.poisoned {
            tracing::warn!(length, "ignoring data on a failed stream");
            return;
        }
        if data.len() <= length {
            self.fail(
                handler,
                FramingError::MissingPadding {
                    length,
                    capacity: data.len(),
                },
            );
            return;
        }

        let cap = self.config.max_reassembly_size();
        let mut start = 0;

        if self.pending_body > 0 {
            start += self.drain_body(&data[..length], handler);
            if self.pending_body > 0 {
                return;
            }
        } else if !self.reassembly.is_empty() {
            let had = self.reassembly.len();
            let copy = cap.saturating_sub(had).min(length);
            self.reassembly.extend_from_slice(&data[..copy]);

            let logical = self.reassembly.len();
            self.reassembly.push(b'\r');
            let result = fence_and_consume(
                &mut self.reassembly,
                logical,
                DispatchMode::Minimal,
                self.config.content_length_mode(),
                &mut self.pending_body,
                handler,
            );
            self.reassembly.truncate(logical);

            match result {
                Err(error) => {
                    self.fail(handler, error);
                    return;
                }
                Ok(0) => {
                    if logical >= cap {
                        self.fail(handler, FramingError::ReassemblyOverflow { cap });
                    }
                    return;
                }
                Ok(consumed) => {
                    debug_assert!(consumed > had, "reassembled block must use new bytes");
                    tracing::debug!(
                        consumed,
                        buffered = had,
                        "header block recovered from reassembly buffer"
                    );
                    self.reassembly.clear();
                    start = consumed - had;

                    if self.pending_body > 0 {
                        start += self.drain_body(&data[start..length], handler);
                        if self.pending_body > 0 {
                            return;
                        }
                    }
                }
            }
        }

        let consumed = match fence_and_consume(
            &mut data[start..],
            length - start,
            DispatchMode::Full,
            self.config.content_length_mode(),
            &mut self.pending_body,
            handler,
        ) {
            Ok(consumed) => consumed,
            Err(error) => {
                self.fail(handler, error);
                return;
            }
        };
        start += consumed;

        let tail = length - start;
        if tail == 0 {
            return;
        }
        if tail < cap {
            if self.reassembly.capacity() == 0 {
                self.reassembly.reserve(cap + PADDING);
            }
            self.reassembly.extend_from_slice(&data[start..length]);
            tracing::debug!(tail, "header block parked for reassembly");
        } else {
            self.fail(handler, FramingError::TailOverflow { len: tail, cap });
        }
    }

    /// Delivers up to `pending_body` bytes of `chunk`. Returns the count.
    fn drain_body<H: StreamHandler + ?Sized>(&mut self, chunk: &[u8], handler: &mut H) -> usize {
        let n = self.pending_body.min(chunk.len());
        if n > 0 {
            self.pending_body -= n;
            tracing::trace!(len = n, remaining = self.pending_body, "body chunk");
            handler.on_body_chunk(&chunk[..n], self.pending_body == 0);
        }
        n
    }

    fn fail<H: StreamHandler + ?Sized>(&mut self, handler: &mut H, error: FramingError) {
        tracing::warn!(%error, "request framing failed");
        self.poisoned = true;
        handler.on_error(error);
    }
}

// ============================================================================
// Tests
// ============================================================================
