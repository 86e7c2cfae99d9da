//! A circular buffer that holds the most recently decoded bytes.

/// The history that back-references copy from.
pub struct Window {
    buffer: Vec<u8>,
    /// Next write position.
    write_pos: usize,
    /// Number of valid bytes, up to the buffer size.
    filled: usize,
}

impl Window {
    /// Creates a window of 'size' bytes. The size must be a power of two.
    pub fn new(size: usize) -> Self {
        debug_assert!(size.is_power_of_two());
        Self {
            buffer: vec![0; size],
            write_pos: 0,
            filled: 0,
        }
    }

    fn mask(&self) -> usize {
        self.buffer.len() - 1
    }

    /// Add a single byte to the window.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.buffer[self.write_pos] = byte;
        self.write_pos = (self.write_pos + 1) & self.mask();
        self.filled = (self.filled + 1).min(self.buffer.len());
    }

    /// Returns the number of bytes a back-reference can reach.
    pub fn available(&self) -> usize {
        self.filled
    }

    /// Copy 'length' bytes starting 'offset' bytes back into the window and
    /// into 'out'. The offset must be in 1..=available(). Each copied byte is
    /// pushed before the next one is read, so the source may overlap the
    /// destination (offset < length repeats the last 'offset' bytes).
    pub fn copy(&mut self, offset: usize, length: usize, out: &mut Vec<u8>) {
        debug_assert!(offset >= 1 && offset <= self.filled);
        let mask = self.mask();
        for _ in 0..length {
            let val = self.buffer[(self.write_pos + self.buffer.len() - offset) & mask];
            self.push(val);
            out.push(val);
        }
    }

    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.filled = 0;
    }
}
