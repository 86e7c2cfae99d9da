//! Error types shared by the encoder and the decoder.

use thiserror::Error;

/// Alias for the result type of the compression operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing or running a codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A construction parameter is out of range. Raised only while building a
    /// `Config`, an `Encoder` or a `Decoder`.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The compressed stream can't be decoded.
    #[error("Malformed stream: {0}")]
    MalformedStream(Malformed),
}

/// Describes why a compressed stream was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// A back-reference points before the first decoded byte.
    #[error("back-reference offset {offset} exceeds the {available} bytes decoded so far")]
    DanglingReference { offset: usize, available: usize },

    /// The input ended in the middle of a token.
    #[error("input ends inside a token ({pending_bits} unconsumed bits)")]
    TruncatedToken { pending_bits: usize },
}

impl From<Malformed> for Error {
    fn from(kind: Malformed) -> Self {
        Error::MalformedStream(kind)
    }
}
