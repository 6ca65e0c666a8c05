//! Alphabet: dense bijection between characters and indices `0..size`.

use std::collections::HashMap;

use crate::error::{EnigmaError, Result};

/// Ordered set of distinct characters, each bound to its position.
///
/// Whitespace, `(`, `)` and `*` are rejected because the cycle and setting
/// syntax gives them meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Builds an alphabet from the characters of `chars`, in order.
    ///
    /// # Errors
    /// Returns [`EnigmaError::EmptyAlphabet`] for an empty string,
    /// [`EnigmaError::ReservedAlphabetChar`] for whitespace or cycle syntax
    /// characters, and [`EnigmaError::DuplicateAlphabetChar`] on repeats.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let alpha = Alphabet::new("ABCDEFG").unwrap();
    /// assert_eq!(alpha.size(), 7);
    /// assert_eq!(alpha.to_int('C').unwrap(), 2);
    /// ```
    pub fn new(chars: &str) -> Result<Self> {
        let mut list = Vec::with_capacity(chars.len());
        let mut index = HashMap::with_capacity(chars.len());
        for ch in chars.chars() {
            if ch.is_whitespace() || matches!(ch, '(' | ')' | '*') {
                return Err(EnigmaError::ReservedAlphabetChar(ch));
            }
            if index.insert(ch, list.len()).is_some() {
                return Err(EnigmaError::DuplicateAlphabetChar(ch));
            }
            list.push(ch);
        }
        if list.is_empty() {
            return Err(EnigmaError::EmptyAlphabet);
        }
        Ok(Alphabet { chars: list, index })
    }

    /// Returns the number of characters.
    pub fn size(&self) -> usize {
        self.chars.len()
    }

    /// Returns true iff `ch` is in the alphabet.
    pub fn contains(&self, ch: char) -> bool {
        self.index.contains_key(&ch)
    }

    /// Returns the index of `ch`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::CharNotInAlphabet`] if `ch` is not a member.
    pub fn to_int(&self, ch: char) -> Result<usize> {
        self.index
            .get(&ch)
            .copied()
            .ok_or(EnigmaError::CharNotInAlphabet(ch))
    }

    /// Returns the character at `idx`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] if `idx >= size()`.
    pub fn to_char(&self, idx: usize) -> Result<char> {
        self.chars
            .get(idx)
            .copied()
            .ok_or(EnigmaError::IndexOutOfRange {
                index: idx,
                size: self.size(),
            })
    }

    /// Iterates over the characters in index order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}
