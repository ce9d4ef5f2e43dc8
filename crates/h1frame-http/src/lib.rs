//! Zero-copy HTTP/1.x request framing.
//!
//! This crate turns the raw byte stream of one connection into discrete
//! requests: start line, headers and body bytes. It never copies header or
//! URL data and allocates only to hold a header block split across reads.
//!
//! # Features
//!
//! - Zero-copy request view borrowing the receive buffer
//! - Header names lowercased in place during the single scan
//! - Pipelined requests dispatched from one read
//! - Content-Length bodies streamed as they arrive
//! - Bounded reassembly of header blocks split across reads
//!
//! # Input contract
//!
//! Every chunk passed to the parser must have at least one writable byte
//! after its logical end; [`PaddedBuffer`] keeps [`PADDING`] bytes of slack
//! for this.
//!
//! # Example
//!
//! ```
//! use h1frame_http::{FramingError, PaddedBuffer, Request, StreamHandler, StreamParser};
//!
//! #[derive(Default)]
//! struct Connection {
//!     urls: Vec<String>,
//!     body: Vec<u8>,
//!     failed: bool,
//! }
//!
//! impl StreamHandler for Connection {
//!     fn on_request(&mut self, request: &Request<'_>) {
//!         self.urls.push(request.url_str().unwrap_or_default().to_owned());
//!     }
//!
//!     fn on_body_chunk(&mut self, chunk: &[u8], _last: bool) {
//!         self.body.extend_from_slice(chunk);
//!     }
//!
//!     fn on_error(&mut self, _error: FramingError) {
//!         self.failed = true;
//!     }
//! }
//!
//! let mut parser = StreamParser::new();
//! let mut conn = Connection::default();
//! let mut buffer = PaddedBuffer::with_capacity(256);
//!
//! buffer.extend(b"POST /upload HTTP/1.1\r\nContent-Length: 5\r\n\r\nhel");
//! parser.consume(&mut buffer, &mut conn);
//! buffer.extend(b"loGET /next HTTP/1.1\r\n\r\n");
//! parser.consume(&mut buffer, &mut conn);
//!
//! assert_eq!(conn.urls, ["/upload", "/next"]);
//! assert_eq!(conn.body, b"hello");
//! assert!(!conn.failed);
//! ```

#![deny(unsafe_code)]

mod buffer;
mod config;
mod dispatch;
mod error;
mod handler;
mod parser;
mod request;
mod scanner;

pub use buffer::{PADDING, PaddedBuffer};
pub use config::{ContentLengthMode, DEFAULT_MAX_REASSEMBLY_SIZE, ParserConfig};
pub use error::FramingError;
pub use handler::{FnHandler, StreamHandler, handler_fn};
pub use parser::StreamParser;
pub use request::{Header, Headers, MAX_HEADERS, Request, VERSION_SUFFIX_LEN};
