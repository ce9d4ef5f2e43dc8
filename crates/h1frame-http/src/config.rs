//! Parser configuration.
//!
//! # Example
//!
//! ```
//! use h1frame_http::{ContentLengthMode, ParserConfig, StreamParser};
//!
//! let config = ParserConfig::new()
//!     .with_max_reassembly_size(8 * 1024)
//!     .with_content_length_mode(ContentLengthMode::Strict);
//! let parser = StreamParser::with_config(config);
//! assert_eq!(parser.config().max_reassembly_size(), 8 * 1024);
//! ```

/// Default cap for a header block split across reads (4KB).
pub const DEFAULT_MAX_REASSEMBLY_SIZE: usize = 4 * 1024;

/// How `content-length` values are turned into a body size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ContentLengthMode {
    /// Only ASCII digits are accepted and overflow is rejected.
    #[default]
    Strict,
    /// Every byte contributes `byte - b'0'` with wrapping arithmetic and
    /// nothing is rejected.
    ///
    /// Only useful for compatibility with peers that were tested against an
    /// unvalidated parser. Do not use it on untrusted input.
    Lenient,
}

/// Configuration for [`StreamParser`](crate::StreamParser).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Maximum size of a header block held across reads.
    max_reassembly_size: usize,
    /// Content-Length parsing policy.
    content_length_mode: ContentLengthMode,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_reassembly_size: DEFAULT_MAX_REASSEMBLY_SIZE,
            content_length_mode: ContentLengthMode::default(),
        }
    }
}

impl ParserConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reassembly cap.
    ///
    /// A cap of zero disables reassembly entirely: any request that does not
    /// arrive in a single read is a fatal error.
    #[must_use]
    pub fn with_max_reassembly_size(mut self, size: usize) -> Self {
        self.max_reassembly_size = size;
        self
    }

    /// Set the Content-Length parsing policy.
    #[must_use]
    pub fn with_content_length_mode(mut self, mode: ContentLengthMode) -> Self {
        self.content_length_mode = mode;
        self
    }

    /// Returns the reassembly cap.
    #[must_use]
    pub fn max_reassembly_size(&self) -> usize {
        self.max_reassembly_size
    }

    /// Returns the Content-Length parsing policy.
    #[must_use]
    pub fn content_length_mode(&self) -> ContentLengthMode {
        self.content_length_mode
    }
}
