//! Fatal framing errors.
//!
//! Incomplete input is never an error at this layer: a header block that has
//! not fully arrived is parked in the reassembly buffer and retried on the
//! next chunk. Everything in [`FramingError`] means the connection's framing
//! state can no longer be trusted and the connection should be closed.

/// Fatal error reported through [`StreamHandler::on_error`].
///
/// [`StreamHandler::on_error`]: crate::StreamHandler::on_error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingError {
    /// A header block split across reads grew to the reassembly cap without
    /// reaching its terminating blank line.
    ReassemblyOverflow {
        /// The reassembly cap in bytes.
        cap: usize,
    },
    /// The bytes left over after a full parse pass do not fit in the
    /// reassembly buffer.
    TailOverflow {
        /// Number of leftover bytes.
        len: usize,
        /// The reassembly cap in bytes.
        cap: usize,
    },
    /// A request carried more header lines than the request view can hold.
    TooManyHeaders {
        /// Maximum number of headers per request.
        max: usize,
    },
    /// The `content-length` value is not a non-negative decimal integer.
    InvalidContentLength,
    /// The input slice has no writable byte past its logical length for the
    /// scan sentinel.
    MissingPadding {
        /// Logical length of the input.
        length: usize,
        /// Total size of the supplied slice.
        capacity: usize,
    },
}

impl std::fmt::Display for FramingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReassemblyOverflow { cap } => {
                write!(f, "header block exceeds reassembly limit of {cap} bytes")
            }
            Self::TailOverflow { len, cap } => {
                write!(
                    f,
                    "unparsed tail of {len} bytes exceeds reassembly limit of {cap} bytes"
                )
            }
            Self::TooManyHeaders { max } => write!(f, "too many headers: limit is {max}"),
            Self::InvalidContentLength => write!(f, "invalid content-length"),
            Self::MissingPadding { length, capacity } => {
                write!(
                    f,
                    "input of {length} bytes has no padding (slice holds {capacity} bytes)"
                )
            }
        }
    }
}

impl std::error::Error for FramingError {}
