//! Lempel–Ziv matching over a bounded sliding window.

pub mod matcher;
pub use matcher::{Matcher, Token};
