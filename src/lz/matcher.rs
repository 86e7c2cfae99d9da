//! This module implements the window-bounded Lempel–Ziv matcher that drives
//! the encoder.

use crate::config::Config;

/// Used to mark empty cells.
const EMPTY_CELL: usize = usize::MAX;

/// The atomic unit of the compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A single byte that is copied to the output.
    Literal(u8),
    /// Copy 'length' bytes starting 'offset' bytes before the current output
    /// position. The ranges may overlap when offset < length.
    Reference { offset: usize, length: usize },
}

impl Token {
    /// Returns the number of uncompressed bytes that the token stands for.
    pub fn len(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Reference { length, .. } => *length,
        }
    }

    /// Tokens are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the size of the token in the bitstream.
    pub fn encoded_bits(&self, cfg: &Config) -> usize {
        match self {
            Token::Literal(_) => 9,
            Token::Reference { .. } => cfg.reference_bits(),
        }
    }
}

/// Maps every byte value to the most recent position where it appeared, and
/// every position in the window to the previous position with the same byte.
/// The chain is a ring of 2^window_bits cells, so the memory use depends only
/// on the window size.
pub struct MatchIndex {
    /// The most recent position of each byte value.
    head: [usize; 256],
    /// Links each position to the previous occurrence of the same byte.
    /// Indexed by position modulo the window size.
    chain: Vec<usize>,
    /// The size of the window, a power of two.
    window: usize,
}

impl MatchIndex {
    pub fn new(cfg: &Config) -> Self {
        Self {
            head: [EMPTY_CELL; 256],
            chain: vec![EMPTY_CELL; cfg.window_size()],
            window: cfg.window_size(),
        }
    }

    /// Forget all of the saved positions.
    pub fn clear(&mut self) {
        self.head = [EMPTY_CELL; 256];
        self.chain.fill(EMPTY_CELL);
    }

    /// Save the position 'idx' of 'input' in the index.
    fn save(&mut self, input: &[u8], idx: usize) {
        let val = input[idx] as usize;
        self.chain[idx & (self.window - 1)] = self.head[val];
        self.head[val] = idx;
    }

    /// Returns the candidate that comes before 'idx' in its chain. Only valid
    /// while 'idx' is inside the window.
    fn prev(&self, idx: usize) -> usize {
        self.chain[idx & (self.window - 1)]
    }
}

/// Scans the input and yields a sequence of tokens. Matches are searched in
/// the last 2^window_bits bytes and are at most 2^lookahead_bits long.
pub struct Matcher<'a> {
    /// The input to tokenize.
    input: &'a [u8],
    /// Previous positions, owned by the caller so it can be reused.
    index: &'a mut MatchIndex,
    /// The window and lookahead parameters.
    cfg: Config,
    /// The iterator location in the input.
    cursor: usize,
}

impl<'a> Matcher<'a> {
    /// Creates a matcher over 'input'. The index is cleared first.
    pub fn new(input: &'a [u8], index: &'a mut MatchIndex, cfg: Config) -> Self {
        debug_assert_eq!(index.window, cfg.window_size());
        index.clear();
        Self {
            input,
            index,
            cfg,
            cursor: 0,
        }
    }

    /// Return the length of the common prefix of the strings at 'a' and 'b',
    /// up to 'limit'. The index 'a' must come before 'b'.
    fn get_match_length(&self, a: usize, b: usize, limit: usize) -> usize {
        debug_assert!(a < b, "Pointer b must come after pointer a");
        let mut len = 0;
        while len < limit && self.input[a + len] == self.input[b + len] {
            len += 1;
        }
        len
    }

    /// Return the (offset, length) of the longest match for the string at
    /// 'idx'. Candidates are visited from the nearest to the farthest, and a
    /// candidate replaces the best one only if it is strictly longer, so the
    /// smallest offset wins ties. The result is only meaningful when the
    /// length reaches the minimum match.
    ///
    /// The search is exhaustive. Input made of very few distinct bytes keeps
    /// every chain full, so the worst case visits the whole window for every
    /// position: O(n * 2^window_bits).
    fn get_match(&self, idx: usize) -> (usize, usize) {
        let limit = self.cfg.max_match().min(self.input.len() - idx);
        let window = self.cfg.window_size();
        // Candidates that differ before this many bytes can't be used.
        let min_len = self.cfg.min_match().min(limit);
        let mut best = (0, 0);

        let mut loc = self.index.head[self.input[idx] as usize];
        while loc != EMPTY_CELL {
            let offset = idx - loc;
            // Everything after this point was evicted from the window.
            if offset > window {
                break;
            }
            // Skip candidates that can't beat the best match, or that are too
            // short to be used. Both checks look at a single byte.
            let best_len = best.1;
            let probe = best_len.max(min_len - 1);
            if self.input[loc + probe] == self.input[idx + probe] {
                let len = self.get_match_length(loc, idx, limit);
                if len > best_len {
                    best = (offset, len);
                    if len == limit {
                        break;
                    }
                }
            }
            loc = self.index.prev(loc);
        }
        best
    }
}

impl<'a> Iterator for Matcher<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let idx = self.cursor;
        if idx >= self.input.len() {
            return None;
        }

        let (offset, length) = self.get_match(idx);
        let token = if length >= self.cfg.min_match() {
            Token::Reference { offset, length }
        } else {
            Token::Literal(self.input[idx])
        };

        // Insert all of the covered positions into the index.
        for i in idx..idx + token.len() {
            self.index.save(self.input, i);
        }
        self.cursor += token.len();
        Some(token)
    }
}
