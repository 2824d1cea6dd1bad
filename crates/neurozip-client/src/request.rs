//! Operation selector and request values.

use std::fmt;

/// Which way the text travels through the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Plain text in, encoded payload out.
    #[default]
    Compress,
    /// Encoded payload in, plain text out.
    Decompress,
}

impl Mode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Compress => Self::Decompress,
            Self::Decompress => Self::Compress,
        }
    }

    /// Build the request this mode sends for `input`.
    pub fn request(self, input: impl Into<String>) -> Request {
        match self {
            Self::Compress => Request::Compress { text: input.into() },
            Self::Decompress => Request::Decompress { data: input.into() },
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compress => f.write_str("compress"),
            Self::Decompress => f.write_str("decompress"),
        }
    }
}

/// A single call to the compression service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Compress plain text.
    Compress {
        /// Text to compress.
        text: String,
    },
    /// Decompress an encoded payload.
    Decompress {
        /// Payload previously returned by the service.
        data: String,
    },
}

impl Request {
    /// Mode this request was built for.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Compress { .. } => Mode::Compress,
            Self::Decompress { .. } => Mode::Decompress,
        }
    }

    /// The argument sent to the service.
    pub fn input(&self) -> &str {
        match self {
            Self::Compress { text } => text,
            Self::Decompress { data } => data,
        }
    }
}
