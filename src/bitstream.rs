//! Bit-level helpers for writing and reading the packed token stream. Fields
//! are stored MSB-first: the first bit of the stream is the top bit of the
//! first byte.

/// Set all of the bits above 'keep' to zero.
pub fn clear_upper_bits(bits: u32, keep: usize) -> u32 {
    if keep == 0 {
        return 0;
    }
    if keep >= 32 {
        return bits;
    }
    bits & ((1 << keep) - 1)
}

/// Accumulates bit fields into a byte vector.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// The completed bytes.
    output: Vec<u8>,
    /// The byte that is being filled. Bits are added from the top.
    current: u8,
    /// Number of bits already placed in 'current' (0..8).
    used: usize,
    /// Total number of bits written.
    len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Push the lowest 'num' bits of 'bits', most significant bit first.
    pub fn push_bits(&mut self, bits: u32, num: usize) {
        debug_assert!(num <= 24, "Pushing too many bits");
        let bits = clear_upper_bits(bits, num);
        let mut remaining = num;

        while remaining > 0 {
            let avail = 8 - self.used;
            let take = remaining.min(avail);
            // Select the next 'take' bits from the top of what's left.
            let chunk = (bits >> (remaining - take)) & ((1 << take) - 1);
            self.current |= (chunk as u8) << (avail - take);
            self.used += take;
            remaining -= take;

            if self.used == 8 {
                self.output.push(self.current);
                self.current = 0;
                self.used = 0;
            }
        }
        self.len += num;
    }

    /// Push a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        self.push_bits(bit as u32, 1);
    }

    /// Returns the number of bits that were pushed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pad the last byte with zero bits and return the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.used > 0 {
            self.output.push(self.current);
        }
        self.output
    }
}

/// A resumable bit accumulator. Bytes are fed one at a time and fields are
/// extracted from the top. Reading a field that is not fully available does
/// not consume anything, so a read can be retried after more bytes arrive.
#[derive(Debug, Default, Clone)]
pub struct BitReader {
    /// Holds the pending bits, packed to the right.
    buffer: u32,
    /// Number of valid bits in 'buffer'.
    count: usize,
}

impl BitReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns True if another byte can be added without overflowing.
    pub fn has_room(&self) -> bool {
        self.count + 8 <= 32
    }

    /// Append a byte to the pending bits.
    pub fn feed(&mut self, byte: u8) {
        debug_assert!(self.has_room(), "Bit buffer overflow");
        self.buffer = (self.buffer << 8) | byte as u32;
        self.count += 8;
    }

    /// Extract 'num' bits, or return None if fewer bits are pending.
    pub fn read(&mut self, num: usize) -> Option<u32> {
        debug_assert!(num <= 24, "Reading too many bits");
        if num == 0 {
            return Some(0);
        }
        if self.count < num {
            return None;
        }
        let res = clear_upper_bits(self.buffer >> (self.count - num), num);
        self.count -= num;
        self.buffer = clear_upper_bits(self.buffer, self.count);
        Some(res)
    }

    /// Returns the number of pending bits.
    pub fn pending(&self) -> usize {
        self.count
    }

    /// Returns True if all of the pending bits are zero.
    pub fn pending_is_zero(&self) -> bool {
        self.buffer == 0
    }

    pub fn clear(&mut self) {
        self.buffer = 0;
        self.count = 0;
    }
}
