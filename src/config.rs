//! The parameters shared by a compatible encoder/decoder pair.

use crate::error::{Error, Result};

/// The smallest supported window, in bits.
pub const MIN_WINDOW_BITS: u8 = 4;
/// The largest supported window, in bits.
pub const MAX_WINDOW_BITS: u8 = 15;
/// The smallest supported lookahead, in bits.
pub const MIN_LOOKAHEAD_BITS: u8 = 3;

/// Stores the window and lookahead widths. The decoder must be configured
/// with the same values as the encoder that produced the stream, because the
/// stream does not carry them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    /// The window holds 2^window_bits bytes of history.
    window_bits: u8,
    /// A single match copies at most 2^lookahead_bits bytes.
    lookahead_bits: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_bits: 8,
            lookahead_bits: 4,
        }
    }
}

impl Config {
    /// Creates a new configuration. The window must be in the range 4..=15
    /// bits, and the lookahead must be at least 3 bits and smaller than the
    /// window.
    pub fn new(window_bits: u8, lookahead_bits: u8) -> Result<Self> {
        if !(MIN_WINDOW_BITS..=MAX_WINDOW_BITS).contains(&window_bits) {
            return Err(Error::InvalidParameter(format!(
                "window bits {} not in range {}..={}",
                window_bits, MIN_WINDOW_BITS, MAX_WINDOW_BITS
            )));
        }
        if lookahead_bits < MIN_LOOKAHEAD_BITS {
            return Err(Error::InvalidParameter(format!(
                "lookahead bits {} is smaller than {}",
                lookahead_bits, MIN_LOOKAHEAD_BITS
            )));
        }
        if lookahead_bits >= window_bits {
            return Err(Error::InvalidParameter(format!(
                "lookahead bits {} must be smaller than window bits {}",
                lookahead_bits, window_bits
            )));
        }
        Ok(Self {
            window_bits,
            lookahead_bits,
        })
    }

    /// Same as `new`, for callers that hold the widths as plain integers.
    pub fn from_ints(window_bits: i64, lookahead_bits: i64) -> Result<Self> {
        let window_bits = u8::try_from(window_bits).map_err(|_| {
            Error::InvalidParameter(format!("window bits {}", window_bits))
        })?;
        let lookahead_bits = u8::try_from(lookahead_bits).map_err(|_| {
            Error::InvalidParameter(format!("lookahead bits {}", lookahead_bits))
        })?;
        Self::new(window_bits, lookahead_bits)
    }

    pub fn window_bits(&self) -> u8 {
        self.window_bits
    }

    pub fn lookahead_bits(&self) -> u8 {
        self.lookahead_bits
    }

    /// Returns the number of history bytes a back-reference can reach.
    pub fn window_size(&self) -> usize {
        1 << self.window_bits
    }

    /// Returns the longest match a single back-reference can copy.
    pub fn max_match(&self) -> usize {
        1 << self.lookahead_bits
    }

    /// Returns the size in bits of an encoded back-reference, tag included.
    pub fn reference_bits(&self) -> usize {
        1 + self.window_bits as usize + self.lookahead_bits as usize
    }

    /// Returns the shortest match that is worth encoding. A back-reference is
    /// used only if it takes fewer bits than the literals it replaces (each
    /// literal is 9 bits).
    pub fn min_match(&self) -> usize {
        self.reference_bits() / 9 + 1
    }
}
