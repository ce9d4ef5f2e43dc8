//! Request/body dispatch loop.
//!
//! Drives the scanner over one buffer, firing handler events for every
//! complete request and for the body bytes that follow it.

use crate::config::ContentLengthMode;
use crate::error::FramingError;
use crate::handler::StreamHandler;
use crate::request::Request;
use crate::scanner::{ScanStatus, scan_header_block};

const CONTENT_LENGTH: &[u8] = b"content-length";

/// How much of a buffer one dispatch pass may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DispatchMode {
    /// Every pipelined request in the buffer, with the body bytes present.
    Full,
    /// Exactly one header block. Body bytes are left for the caller, which
    /// holds them in a different buffer.
    Minimal,
}

/// Parses `value` as a body length. `None` means the value is invalid.
pub(crate) fn parse_content_length(value: &[u8], mode: ContentLengthMode) -> Option<usize> {
    match mode {
        ContentLengthMode::Strict => {
            let digits = value.trim_ascii_end();
            if digits.is_empty() {
                return None;
            }
            digits.iter().try_fold(0usize, |acc, &b| {
                if b.is_ascii_digit() {
                    acc.checked_mul(10)?.checked_add(usize::from(b - b'0'))
                } else {
                    None
                }
            })
        }
        ContentLengthMode::Lenient => Some(value.iter().fold(0usize, |acc, &b| {
            acc.wrapping_mul(10)
                .wrapping_add(usize::from(b))
                .wrapping_sub(usize::from(b'0'))
        })),
    }
}

/// Writes the CR sentinel at `data[length]` and dispatches every complete
/// request found in `data[..length]`.
///
/// `pending_body` is set from each request's `content-length` and, in
/// [`DispatchMode::Full`], decremented by the body bytes delivered. Returns
/// the number of bytes consumed; zero means no complete request was found.
///
/// `data` must be longer than `length`.
pub(crate) fn fence_and_consume<H: StreamHandler + ?Sized>(
    data: &mut [u8],
    length: usize,
    mode: DispatchMode,
    content_length_mode: ContentLengthMode,
    pending_body: &mut usize,
    handler: &mut H,
) -> Result<usize, FramingError> {
    data[length] = b'\r';
    let mut offset = 0;

    while offset < length {
        let mut request = Request::new();
        let consumed = match scan_header_block(&mut data[offset..], length - offset, &mut request)
        {
            ScanStatus::Complete { consumed } => consumed,
            ScanStatus::Incomplete => break,
            ScanStatus::TooManyHeaders => {
                return Err(FramingError::TooManyHeaders {
                    max: crate::request::MAX_HEADERS - 1,
                });
            }
        };
        request.trim_version();

        // An empty value counts as no declared body.
        let declared = match request.header(CONTENT_LENGTH) {
            Some(value) if !value.is_empty() => Some(
                parse_content_length(value, content_length_mode)
                    .ok_or(FramingError::InvalidContentLength)?,
            ),
            _ => None,
        };

        tracing::trace!(
            consumed,
            headers = request.len(),
            content_length = ?declared,
            "dispatching request"
        );
        handler.on_request(&request);
        offset += consumed;

        if let Some(declared) = declared {
            *pending_body = declared;
            if declared == 0 {
                handler.on_body_chunk(&[], true);
            } else if mode == DispatchMode::Full {
                let emittable = declared.min(length - offset);
                if emittable > 0 {
                    *pending_body -= emittable;
                    handler.on_body_chunk(&data[offset..offset + emittable], *pending_body == 0);
                    offset += emittable;
                }
            }
        }

        if mode == DispatchMode::Minimal {
            break;
        }
    }

    Ok(offset)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Request(Vec<u8>),
        Body(Vec<u8>, bool),
        Error(FramingError),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl StreamHandler for Recorder {
        fn on_request(&mut self, request: &Request<'_>) {
            self.events.push(Event::Request(request.url().to_vec()));
        }

        fn on_body_chunk(&mut self, chunk: &[u8], last: bool) {
            self.events.push(Event::Body(chunk.to_vec(), last));
        }

        fn on_error(&mut self, error: FramingError) {
            self.events.push(Event::Error(error));
        }
    }

    fn dispatch(
        input: &[u8],
        mode: DispatchMode,
    ) -> (Result<usize, FramingError>, usize, Vec<Event>) {
        let mut buf = input.to_vec();
        buf.push(0);
        let mut pending = 0;
        let mut recorder = Recorder::default();
        let result = fence_and_consume(
            &mut buf,
            input.len(),
            mode,
            ContentLengthMode::Strict,
            &mut pending,
            &mut recorder,
        );
        (result, pending, recorder.events)
    }

    // ========================================================================
    // Content-Length parsing
    // ========================================================================

    #[test]
    fn content_length_strict() {
        let strict = ContentLengthMode::Strict;
        assert_eq!(parse_content_length(b"0", strict), Some(0));
        assert_eq!(parse_content_length(b"42", strict), Some(42));
        assert_eq!(parse_content_length(b"007", strict), Some(7));
        assert_eq!(parse_content_length(b"13 \t", strict), Some(13));
        assert_eq!(parse_content_length(b"", strict), None);
        assert_eq!(parse_content_length(b"-1", strict), None);
        assert_eq!(parse_content_length(b"+1", strict), None);
        assert_eq!(parse_content_length(b"1a", strict), None);
        assert_eq!(parse_content_length(b"1 2", strict), None);
        assert_eq!(
            parse_content_length(b"99999999999999999999999999", strict),
            None
        );
    }

    #[test]
    fn content_length_lenient_matches_digits() {
        let lenient = ContentLengthMode::Lenient;
        assert_eq!(parse_content_length(b"42", lenient), Some(42));
        assert_eq!(parse_content_length(b"0", lenient), Some(0));
        // Non-digits are not rejected, they just produce some number
        assert!(parse_content_length(b"4x", lenient).is_some());
    }

    // ========================================================================
    // Full mode
    // ========================================================================

    #[test]
    fn full_mode_pipelined_requests() {
        let input = b"GET /a HTTP/1.1\r\n\r\nGET /b HTTP/1.1\r\nHost: x\r\n\r\nGET /c HTTP/1.1\r\n\r\n";
        let (result, pending, events) = dispatch(input, DispatchMode::Full);

        assert_eq!(result, Ok(input.len()));
        assert_eq!(pending, 0);
        assert_eq!(
            events,
            vec![
                Event::Request(b"/a".to_vec()),
                Event::Request(b"/b".to_vec()),
                Event::Request(b"/c".to_vec()),
            ]
        );
    }

    #[test]
    fn full_mode_delivers_bodies_between_requests() {
        let input =
            b"POST /a HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcPOST /b HTTP/1.1\r\nContent-Length: 2\r\n\r\nde";
        let (result, pending, events) = dispatch(input, DispatchMode::Full);

        assert_eq!(result, Ok(input.len()));
        assert_eq!(pending, 0);
        assert_eq!(
            events,
            vec![
                Event::Request(b"/a".to_vec()),
                Event::Body(b"abc".to_vec(), true),
                Event::Request(b"/b".to_vec()),
                Event::Body(b"de".to_vec(), true),
            ]
        );
    }

    #[test]
    fn full_mode_partial_body_leaves_debt() {
        let input = b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nhell";
        let (result, pending, events) = dispatch(input, DispatchMode::Full);

        assert_eq!(result, Ok(input.len()));
        assert_eq!(pending, 6);
        assert_eq!(
            events,
            vec![
                Event::Request(b"/".to_vec()),
                Event::Body(b"hell".to_vec(), false),
            ]
        );
    }

    #[test]
    fn full_mode_body_not_yet_arrived() {
        let input = b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\n";
        let (result, pending, events) = dispatch(input, DispatchMode::Full);

        assert_eq!(result, Ok(input.len()));
        assert_eq!(pending, 10);
        assert_eq!(events, vec![Event::Request(b"/".to_vec())]);
    }

    #[test]
    fn full_mode_stops_at_incomplete_tail() {
        let input = b"GET /a HTTP/1.1\r\n\r\nGET /b HTT";
        let (result, _, events) = dispatch(input, DispatchMode::Full);

        assert_eq!(result, Ok(19));
        assert_eq!(events, vec![Event::Request(b"/a".to_vec())]);
    }

    #[test]
    fn zero_content_length_emits_final_empty_chunk() {
        let input = b"POST / HTTP/1.1\r\nContent-Length: 0\r\n\r\n";
        let (result, pending, events) = dispatch(input, DispatchMode::Full);

        assert_eq!(result, Ok(input.len()));
        assert_eq!(pending, 0);
        assert_eq!(
            events,
            vec![Event::Request(b"/".to_vec()), Event::Body(Vec::new(), true)]
        );
    }

    #[test]
    fn empty_content_length_value_means_no_body() {
        let input = b"POST / HTTP/1.1\r\nContent-Length:\r\n\r\n";
        let (result, pending, events) = dispatch(input, DispatchMode::Full);

        assert_eq!(result, Ok(input.len()));
        assert_eq!(pending, 0);
        assert_eq!(events, vec![Event::Request(b"/".to_vec())]);
    }

    #[test]
    fn invalid_content_length_is_fatal_before_request() {
        let input = b"POST / HTTP/1.1\r\nContent-Length: 5x\r\n\r\nhello";
        let (result, _, events) = dispatch(input, DispatchMode::Full);

        assert_eq!(result, Err(FramingError::InvalidContentLength));
        assert!(events.is_empty());
    }

    #[test]
    fn no_progress_returns_zero() {
        let (result, _, events) = dispatch(b"GET / HTTP/1.1\r\nHost", DispatchMode::Full);
        assert_eq!(result, Ok(0));
        assert!(events.is_empty());

        let (result, _, _) = dispatch(b"", DispatchMode::Full);
        assert_eq!(result, Ok(0));
    }

    // ========================================================================
    // Minimal mode
    // ========================================================================

    #[test]
    fn minimal_mode_parses_one_request() {
        let input = b"GET /a HTTP/1.1\r\n\r\nGET /b HTTP/1.1\r\n\r\n";
        let (result, _, events) = dispatch(input, DispatchMode::Minimal);

        assert_eq!(result, Ok(19));
        assert_eq!(events, vec![Event::Request(b"/a".to_vec())]);
    }

    #[test]
    fn minimal_mode_defers_body() {
        let input = b"POST / HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let (result, pending, events) = dispatch(input, DispatchMode::Minimal);

        assert_eq!(result, Ok(input.len() - 5));
        assert_eq!(pending, 5);
        assert_eq!(events, vec![Event::Request(b"/".to_vec())]);
    }
}
