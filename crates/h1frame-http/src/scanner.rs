//! Single-pass header-block scanner.
//!
//! The scanner relies on a sentinel: the byte at `buf[end]` must be `\r`.
//! Every inner loop stops at a byte `<= 32`, so no loop can run past the
//! logical end even though none of them checks it. The CR search itself is
//! bounded by `end`, so the sentinel is never mistaken for a line ending.
//!
//! Header names (and the method) are lowercased in place as they are
//! scanned. Values are never modified.

use crate::request::{Header, Request};

/// Outcome of scanning one header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanStatus {
    /// A full block was parsed; `consumed` counts through the final CRLF.
    Complete { consumed: usize },
    /// The block is truncated or malformed. No progress was made.
    Incomplete,
    /// More header lines arrived than the request view can hold.
    TooManyHeaders,
}

#[inline]
fn is_separator(b: u8) -> bool {
    (b == b':' || b <= b' ') && b != b'\r'
}

/// Scans one request's start line and header lines from the start of `buf`.
///
/// `end` is the logical length; `buf[end]` must hold the `\r` sentinel. On
/// [`ScanStatus::Complete`], `request` holds the start line (untrimmed) and
/// every header.
pub(crate) fn scan_header_block<'a>(
    buf: &'a mut [u8],
    end: usize,
    request: &mut Request<'a>,
) -> ScanStatus {
    debug_assert!(end < buf.len(), "scan requires a sentinel byte");
    debug_assert_eq!(buf[end], b'\r', "sentinel must be CR");

    let mut rest: &'a mut [u8] = buf;
    let mut consumed = 0;
    let mut lines = 0usize;

    loop {
        let limit = end - consumed;

        // Name token, lowercased as we go. Stops at the sentinel at the latest.
        let mut i = 0;
        while rest[i] != b':' && rest[i] > b' ' {
            rest[i] = rest[i].to_ascii_lowercase();
            i += 1;
        }
        let name_end = i;

        if rest[i] == b'\r' {
            if i == 0 {
                // Blank line: ends the block, unless nothing came before it.
                if lines > 0 && limit > 0 && rest[1] == b'\n' {
                    return ScanStatus::Complete {
                        consumed: consumed + 2,
                    };
                }
                return ScanStatus::Incomplete;
            }
            // A name directly followed by CR has an empty value.
        } else {
            // Lines starting with ':' or whitespace carry no name.
            if name_end == 0 {
                return ScanStatus::Incomplete;
            }
            i += 1;
            while is_separator(rest[i]) {
                i += 1;
            }
        }
        let value_start = i;

        let Some(offset) = memchr::memchr(b'\r', &rest[value_start..limit]) else {
            return ScanStatus::Incomplete;
        };
        let cr = value_start + offset;
        // cr < limit, so cr + 1 is at most the sentinel, which is never LF.
        if rest[cr + 1] != b'\n' {
            return ScanStatus::Incomplete;
        }

        let (line, tail) = std::mem::take(&mut rest).split_at_mut(cr + 2);
        let line: &'a [u8] = line;
        let name = &line[..name_end];
        let value = &line[value_start..cr];
        rest = tail;
        consumed += cr + 2;

        if lines == 0 {
            request.set_start_line(name, value);
        } else if !request.push_header(Header::new(name, value)) {
            return ScanStatus::TooManyHeaders;
        }
        lines += 1;
    }
}

// ============================================================================
// Tests
// ============================================================================
