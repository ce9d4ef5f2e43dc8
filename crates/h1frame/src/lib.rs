//! Zero-copy HTTP/1.x request framing for custom servers.
//!
//! h1frame sits between a transport and an application. The transport
//! feeds it raw reads; it calls back once per request with a borrowed view
//! of the start line and headers, then streams the request body.
//!
//! - **Zero-copy** - request views borrow the receive buffer
//! - **Pipelining** - every complete request in a read is dispatched
//! - **Bounded** - header blocks split across reads are capped
//! - **Observable** - failures are logged through `tracing`
//!
//! # Quick Start
//!
//! ```
//! use h1frame::prelude::*;
//!
//! let mut urls = Vec::new();
//! let mut handler = handler_fn(
//!     |req: &Request<'_>| urls.push(req.url().to_vec()),
//!     |_chunk: &[u8], _last: bool| {},
//!     |err: FramingError| eprintln!("closing connection: {err}"),
//! );
//!
//! let mut parser = StreamParser::new();
//! let mut buffer = PaddedBuffer::default();
//! buffer.extend(b"GET /a HTTP/1.1\r\n\r\nGET /b HTTP/1.1\r\n\r\n");
//! parser.consume(&mut buffer, &mut handler);
//! drop(handler);
//!
//! assert_eq!(urls, [b"/a".to_vec(), b"/b".to_vec()]);
//! ```
//!
//! # Crate Structure
//!
//! - [`h1frame_http`] - request view, header scanner and stream parser
//!
//! The `serde` feature enables (de)serialization of [`ParserConfig`].

#![forbid(unsafe_code)]

pub use h1frame_http as http;

pub use h1frame_http::{
    ContentLengthMode, DEFAULT_MAX_REASSEMBLY_SIZE, FnHandler, FramingError, Header, Headers,
    MAX_HEADERS, PADDING, PaddedBuffer, ParserConfig, Request, StreamHandler, StreamParser,
    handler_fn,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        FramingError, PaddedBuffer, ParserConfig, Request, StreamHandler, StreamParser, handler_fn,
    };
}
