//! The encoder turns a byte buffer into a packed stream of literal and
//! back-reference tokens.
//!
//! Stream layout (MSB-first, no header):
//! literal:        [0][8 bits of data]
//! back-reference: [1][offset - 1: window bits][length - 1: lookahead bits]
//! The last byte is padded with zero bits.

use crate::bitstream::BitWriter;
use crate::config::Config;
use crate::error::Result;
use crate::lz::matcher::{MatchIndex, Matcher, Token};

/// Write a single token to the bit stream.
fn write_token(token: Token, cfg: &Config, output: &mut BitWriter) {
    match token {
        Token::Literal(val) => {
            output.push_bit(false);
            output.push_bits(val as u32, 8);
        }
        Token::Reference { offset, length } => {
            debug_assert!(offset >= 1 && offset <= cfg.window_size());
            debug_assert!(length >= 1 && length <= cfg.max_match());
            output.push_bit(true);
            output.push_bits((offset - 1) as u32, cfg.window_bits() as usize);
            output.push_bits((length - 1) as u32, cfg.lookahead_bits() as usize);
        }
    }
}

/// Compresses buffers with a fixed window/lookahead configuration.
pub struct Encoder {
    /// The stream parameters.
    cfg: Config,
    /// The match index. Sized by the window and reused across calls.
    index: MatchIndex,
}

impl Encoder {
    /// Creates an encoder with a window of 2^window_bits bytes and matches of
    /// up to 2^lookahead_bits bytes.
    pub fn new(window_bits: u8, lookahead_bits: u8) -> Result<Self> {
        Ok(Self::with_config(Config::new(window_bits, lookahead_bits)?))
    }

    /// Creates an encoder from a validated configuration.
    pub fn with_config(cfg: Config) -> Self {
        Self {
            cfg,
            index: MatchIndex::new(&cfg),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Encode the whole input buffer and return the compressed stream. Every
    /// call starts with an empty window, so each output can be decoded on its
    /// own.
    pub fn encode(&mut self, input: &[u8]) -> Vec<u8> {
        let mut output = BitWriter::with_capacity(input.len() / 2 + 1);
        let cfg = self.cfg;
        let mut literals = 0;
        let mut references = 0;

        for token in Matcher::new(input, &mut self.index, cfg) {
            match token {
                Token::Literal(_) => literals += 1,
                Token::Reference { offset, length } => {
                    log::trace!("Reference: offset {}, length {}", offset, length);
                    references += 1;
                }
            }
            write_token(token, &cfg, &mut output);
        }

        let bits = output.len();
        let packed = output.finish();
        log::debug!(
            "Encoded {} bytes into {} bytes ({} bits, {} literals, {} references).",
            input.len(),
            packed.len(),
            bits,
            literals,
            references
        );
        packed
    }
}
