//! The decoder reconstructs the original bytes from a packed token stream.
//!
//! Input is copied into a bounded staging buffer with `sink`, and `poll`
//! advances a small state machine over it bit by bit. A token may be split
//! across any number of `sink` calls: the bit reader keeps the bits of a
//! partially read field until the rest arrives. `finish` marks the end of
//! the input and checks that the stream ended on a token boundary.

use crate::bitstream::BitReader;
use crate::config::Config;
use crate::error::{Error, Malformed, Result};
use crate::window::Window;

/// The staging buffer size used when none is specified.
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 256;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    /// Waiting for the tag bit.
    TagBit,
    /// Tag 0 was read, waiting for the 8 literal bits.
    Literal,
    /// Tag 1 was read, waiting for the offset field.
    Offset,
    /// The offset was read, waiting for the length field.
    Length { offset: usize },
    /// Copying a back-reference into the output.
    YieldReference { offset: usize, remaining: usize },
}

/// Reports why `poll` returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Poll {
    /// The staging buffer is drained. Sink more input or call `finish`.
    Empty,
    /// The output limit was reached before the staged input was consumed.
    More,
}

/// Decompresses streams produced by an `Encoder` with the same configuration.
pub struct Decoder {
    /// The stream parameters.
    cfg: Config,
    /// The current state of the token parser.
    state: State,
    /// Pending bits of the field that is being read.
    bits: BitReader,
    /// Raw input that was accepted by `sink` but not parsed yet.
    staging: Vec<u8>,
    /// The maximum size of the staging buffer.
    staging_capacity: usize,
    /// The next byte to parse in 'staging'.
    staged_pos: usize,
    /// The most recent 2^window_bits output bytes.
    window: Window,
}

impl Decoder {
    /// Creates a decoder with the default staging buffer size.
    pub fn new(window_bits: u8, lookahead_bits: u8) -> Result<Self> {
        Self::with_input_buffer(
            DEFAULT_INPUT_BUFFER_SIZE,
            window_bits,
            lookahead_bits,
        )
    }

    /// Creates a decoder that stages at most 'capacity' input bytes at a time.
    pub fn with_input_buffer(
        capacity: usize,
        window_bits: u8,
        lookahead_bits: u8,
    ) -> Result<Self> {
        let cfg = Config::new(window_bits, lookahead_bits)?;
        Self::with_config(cfg, capacity)
    }

    /// Creates a decoder from a validated configuration.
    pub fn with_config(cfg: Config, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidParameter(String::from(
                "input buffer size must be positive",
            )));
        }
        Ok(Self {
            cfg,
            state: State::TagBit,
            bits: BitReader::new(),
            staging: Vec::with_capacity(capacity),
            staging_capacity: capacity,
            staged_pos: 0,
            window: Window::new(cfg.window_size()),
        })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns the capacity of the staging buffer.
    pub fn input_buffer_size(&self) -> usize {
        self.staging_capacity
    }

    /// Prepare the decoder for a new stream.
    fn reset(&mut self) {
        self.state = State::TagBit;
        self.bits.clear();
        self.staging.clear();
        self.staged_pos = 0;
        self.window.clear();
    }

    /// Copy as much of 'input' as fits into the staging buffer. Returns the
    /// number of bytes that were accepted, which is zero when the buffer is
    /// full and needs to be drained with `poll`.
    pub fn sink(&mut self, input: &[u8]) -> usize {
        // Drop the bytes that were already parsed.
        if self.staged_pos > 0 {
            self.staging.drain(..self.staged_pos);
            self.staged_pos = 0;
        }
        let room = self.staging_capacity - self.staging.len();
        let accepted = room.min(input.len());
        self.staging.extend_from_slice(&input[..accepted]);
        accepted
    }

    /// Extract 'count' bits, pulling bytes from the staging buffer as needed.
    /// Returns None if the staged input runs out first.
    fn get_bits(&mut self, count: usize) -> Option<u32> {
        loop {
            if let Some(val) = self.bits.read(count) {
                return Some(val);
            }
            if self.staged_pos == self.staging.len() {
                return None;
            }
            self.bits.feed(self.staging[self.staged_pos]);
            self.staged_pos += 1;
        }
    }

    /// Decode the staged input, appending at most 'limit' bytes to 'out'.
    pub fn poll(&mut self, out: &mut Vec<u8>, limit: usize) -> Result<Poll> {
        match self.poll_impl(out, limit) {
            Ok(status) => Ok(status),
            Err(err) => {
                log::debug!("Decoding failed: {}", err);
                self.reset();
                Err(err)
            }
        }
    }

    fn poll_impl(&mut self, out: &mut Vec<u8>, limit: usize) -> Result<Poll> {
        let mut written = 0;
        loop {
            self.state = match self.state {
                State::TagBit => match self.get_bits(1) {
                    Some(0) => State::Literal,
                    Some(_) => State::Offset,
                    None => return Ok(Poll::Empty),
                },
                State::Literal => {
                    if written == limit {
                        return Ok(Poll::More);
                    }
                    let val = match self.get_bits(8) {
                        Some(val) => val as u8,
                        None => return Ok(Poll::Empty),
                    };
                    self.window.push(val);
                    out.push(val);
                    written += 1;
                    State::TagBit
                }
                State::Offset => {
                    let bit_ct = self.cfg.window_bits() as usize;
                    match self.get_bits(bit_ct) {
                        Some(idx) => State::Length {
                            offset: idx as usize + 1,
                        },
                        None => return Ok(Poll::Empty),
                    }
                }
                State::Length { offset } => {
                    let bit_ct = self.cfg.lookahead_bits() as usize;
                    let length = match self.get_bits(bit_ct) {
                        Some(cnt) => cnt as usize + 1,
                        None => return Ok(Poll::Empty),
                    };
                    log::trace!("Reference: offset {}, length {}", offset, length);
                    let available = self.window.available();
                    if offset > available {
                        return Err(Malformed::DanglingReference {
                            offset,
                            available,
                        }
                        .into());
                    }
                    State::YieldReference {
                        offset,
                        remaining: length,
                    }
                }
                State::YieldReference { offset, remaining } => {
                    let count = remaining.min(limit - written);
                    self.window.copy(offset, count, out);
                    written += count;
                    if count < remaining {
                        self.state = State::YieldReference {
                            offset,
                            remaining: remaining - count,
                        };
                        return Ok(Poll::More);
                    }
                    State::TagBit
                }
            };
        }
    }

    /// Declare the end of the input. Decodes whatever is still staged into
    /// 'out', then checks that the leftover bits are only the zero padding of
    /// the last byte. The decoder is ready for a new stream afterwards.
    pub fn finish(&mut self, out: &mut Vec<u8>) -> Result<()> {
        self.poll(out, usize::MAX)?;

        let pending = self.bits.pending();
        // Count the bits of the unfinished token that were already consumed.
        // Only a zero tag followed by zeros can be padding.
        let (consumed, tag_is_zero) = match self.state {
            State::TagBit => (0, true),
            State::Literal => (1, true),
            State::Offset => (1, false),
            State::Length { .. } => (1 + self.cfg.window_bits() as usize, false),
            State::YieldReference { .. } => (0, false),
        };
        let is_padding =
            tag_is_zero && consumed + pending < 8 && self.bits.pending_is_zero();
        self.reset();

        if !is_padding {
            let err: Error = Malformed::TruncatedToken {
                pending_bits: consumed + pending,
            }
            .into();
            log::debug!("Decoding failed: {}", err);
            return Err(err);
        }
        Ok(())
    }

    /// Decode a complete stream and return the original bytes. The staging
    /// buffer is refilled as many times as needed, so the input can be of any
    /// length. Each call decodes an independent stream.
    pub fn decode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.reset();
        let mut output = Vec::with_capacity(input.len() * 2);
        let mut rest = input;
        while !rest.is_empty() {
            let accepted = self.sink(rest);
            rest = &rest[accepted..];
            self.poll(&mut output, usize::MAX)?;
        }
        self.finish(&mut output)?;
        log::debug!(
            "Decoded {} bytes into {} bytes.",
            input.len(),
            output.len()
        );
        Ok(output)
    }
}
