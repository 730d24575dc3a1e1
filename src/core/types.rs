// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A Unicode scalar value. Always a full code point, never a UTF-16 unit.
pub type CodePoint = u32;

/// A stored reading such as `ZHONG1` or `LU:4`: syllable plus tone digit.
/// Readings are kept exactly as written in the source tables.
pub type Reading = String;

/// One parsed dictionary line: the key code points and their readings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: Vec<CodePoint>,
    pub readings: Vec<Reading>,
}

/// Result of a successful phrase match anchored at some start index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseMatch {
    /// Number of code points consumed, always >= 2.
    pub length: usize,
    /// One reading per consumed code point.
    pub readings: Vec<Reading>,
}

/// A unit produced by segmenting a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A multi-character phrase override, one pinned reading per character.
    Phrase { text: String, readings: Vec<Reading> },
    /// A single character and all of its candidate readings, most common first.
    Single { ch: char, candidates: Vec<Reading> },
    /// A character with no dictionary entry; pass it through unromanized.
    Unmapped(char),
}

/// Converts text into the code point sequence the trie is keyed on.
pub fn code_points(text: &str) -> Vec<CodePoint> {
    text.chars().map(u32::from).collect()
}
