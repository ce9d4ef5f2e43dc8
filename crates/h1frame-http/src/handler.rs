//! Event sink for parsed requests.

use crate::error::FramingError;
use crate::request::Request;

/// Receives the events produced by [`StreamParser`](crate::StreamParser).
///
/// All methods run synchronously inside the parser call that produced the
/// event. Per-connection application state lives in the implementor.
pub trait StreamHandler {
    /// Called once per complete start line and header block.
    ///
    /// The request borrows the input buffer and cannot outlive this call.
    fn on_request(&mut self, request: &Request<'_>);

    /// Called with body bytes of the most recent request, in stream order.
    ///
    /// `last` is true on the chunk that completes the declared
    /// `content-length`. A request declaring a length of zero receives a
    /// single empty chunk with `last` set.
    fn on_body_chunk(&mut self, chunk: &[u8], last: bool);

    /// Called at most once per parser call when framing has failed.
    ///
    /// The parser refuses further input afterwards; close the connection.
    fn on_error(&mut self, error: FramingError);
}

impl<H: StreamHandler + ?Sized> StreamHandler for &mut H {
    fn on_request(&mut self, request: &Request<'_>) {
        (**self).on_request(request);
    }

    fn on_body_chunk(&mut self, chunk: &[u8], last: bool) {
        (**self).on_body_chunk(chunk, last);
    }

    fn on_error(&mut self, error: FramingError) {
        (**self).on_error(error);
    }
}

/// A [`StreamHandler`] built from three closures. See [`handler_fn`].
#[derive(Debug, Clone)]
pub struct FnHandler<R, B, E> {
    on_request: R,
    on_body_chunk: B,
    on_error: E,
}

/// Builds a [`StreamHandler`] from closures.
///
/// # Example
///
/// ```
/// use h1frame_http::{FramingError, PaddedBuffer, Request, StreamParser, handler_fn};
///
/// let mut requests = 0;
/// let mut body = Vec::new();
/// let mut handler = handler_fn(
///     |_req: &Request<'_>| requests += 1,
///     |chunk: &[u8], _last: bool| body.extend_from_slice(chunk),
///     |err: FramingError| panic!("{err}"),
/// );
///
/// let mut buffer = PaddedBuffer::with_capacity(64);
/// buffer.extend(b"POST / HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello");
/// StreamParser::new().consume(&mut buffer, &mut handler);
/// drop(handler);
///
/// assert_eq!(requests, 1);
/// assert_eq!(body, b"hello");
/// ```
pub fn handler_fn<R, B, E>(on_request: R, on_body_chunk: B, on_error: E) -> FnHandler<R, B, E>
where
    R: FnMut(&Request<'_>),
    B: FnMut(&[u8], bool),
    E: FnMut(FramingError),
{
    FnHandler {
        on_request,
        on_body_chunk,
        on_error,
    }
}

impl<R, B, E> StreamHandler for FnHandler<R, B, E>
where
    R: FnMut(&Request<'_>),
    B: FnMut(&[u8], bool),
    E: FnMut(FramingError),
{
    fn on_request(&mut self, request: &Request<'_>) {
        (self.on_request)(request);
    }

    fn on_body_chunk(&mut self, chunk: &[u8], last: bool) {
        (self.on_body_chunk)(chunk, last);
    }

    fn on_error(&mut self, error: FramingError) {
        (self.on_error)(error);
    }
}
