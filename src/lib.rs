//! A sliding window LZSS compressor with bounded memory use.
//!
//! The stream is a sequence of bit-packed tokens: a literal byte, or a
//! back-reference into the last 2^window_bits bytes that copies up to
//! 2^lookahead_bits bytes. The stream has no header, so the decoder must be
//! built with the same `Config` as the encoder.

pub mod bitstream;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod lz;
pub mod window;

pub use config::Config;
pub use decoder::{Decoder, Poll, DEFAULT_INPUT_BUFFER_SIZE};
pub use encoder::Encoder;
pub use error::{Error, Malformed, Result};
pub use lz::Token;

/// Compress 'input' with the parameters in 'cfg'.
pub fn encode(input: &[u8], cfg: &Config) -> Vec<u8> {
    Encoder::with_config(*cfg).encode(input)
}

/// Decompress a stream that was compressed with the parameters in 'cfg'.
pub fn decode(input: &[u8], cfg: &Config) -> Result<Vec<u8>> {
    Decoder::with_config(*cfg, DEFAULT_INPUT_BUFFER_SIZE)?.decode(input)
}
