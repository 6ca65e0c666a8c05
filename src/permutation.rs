//! Permutation: cycle-notation bijection over an alphabet's index space.
//!
//! The cycle text is parsed and validated once at construction, and the
//! mapping is stored as forward and inverse lookup tables so that
//! [`permute`](Permutation::permute) and [`invert`](Permutation::invert)
//! are single array reads.

use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};

/// Bijection over `0..alphabet.size()` described by disjoint cycles.
///
/// Characters that appear in no cycle are fixed points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    cycles: Vec<Vec<usize>>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Parses `cycles`, a string of the form `"(cccc) (cc) ..."`.
    ///
    /// Whitespace between groups is ignored and adjacent groups such as
    /// `"(AB)(CD)"` are accepted. A single-character group is an explicit
    /// fixed point.
    ///
    /// # Errors
    /// - [`EnigmaError::MalformedCycles`] for unbalanced or nested
    ///   parentheses, empty groups, or characters outside any group.
    /// - [`EnigmaError::CharNotInAlphabet`] for characters not in `alphabet`.
    /// - [`EnigmaError::RepeatedCycleChar`] if a character appears twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
    /// let perm = Permutation::new("(BACD)", &alpha).unwrap();
    /// assert_eq!(perm.permute_char('B').unwrap(), 'A');
    /// assert_eq!(perm.invert_char('B').unwrap(), 'D');
    /// ```
    pub fn new(cycles: &str, alphabet: &Arc<Alphabet>) -> Result<Self> {
        let parsed = parse_cycles(cycles, alphabet)?;
        let size = alphabet.size();
        let mut forward: Vec<usize> = (0..size).collect();
        let mut inverse: Vec<usize> = (0..size).collect();
        for cycle in &parsed {
            for (k, &from) in cycle.iter().enumerate() {
                let to = cycle[(k + 1) % cycle.len()];
                forward[from] = to;
                inverse[to] = from;
            }
        }
        Ok(Permutation {
            alphabet: Arc::clone(alphabet),
            cycles: parsed,
            forward,
            inverse,
        })
    }

    /// Returns the identity permutation over `alphabet`.
    pub fn identity(alphabet: &Arc<Alphabet>) -> Self {
        let size = alphabet.size();
        Permutation {
            alphabet: Arc::clone(alphabet),
            cycles: Vec::new(),
            forward: (0..size).collect(),
            inverse: (0..size).collect(),
        }
    }

    /// Returns the size of the alphabet permuted.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Returns the alphabet this permutation was built over.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns `p` modulo the alphabet size, always in `0..size`.
    pub fn wrap(&self, p: i64) -> usize {
        p.rem_euclid(self.size() as i64) as usize
    }

    /// Applies the permutation to index `p` (taken modulo the size).
    pub fn permute(&self, p: usize) -> usize {
        self.forward[p % self.size()]
    }

    /// Applies the inverse permutation to index `c` (taken modulo the size).
    pub fn invert(&self, c: usize) -> usize {
        self.inverse[c % self.size()]
    }

    /// Applies the permutation to character `p`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::CharNotInAlphabet`] if `p` is not a member.
    pub fn permute_char(&self, p: char) -> Result<char> {
        let idx = self.alphabet.to_int(p)?;
        self.alphabet.to_char(self.forward[idx])
    }

    /// Applies the inverse permutation to character `c`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::CharNotInAlphabet`] if `c` is not a member.
    pub fn invert_char(&self, c: char) -> Result<char> {
        let idx = self.alphabet.to_int(c)?;
        self.alphabet.to_char(self.inverse[idx])
    }

    /// Returns true iff no index maps to itself.
    ///
    /// Both explicit singleton cycles and characters left out of every
    /// cycle count as fixed points.
    pub fn derangement(&self) -> bool {
        self.forward.iter().enumerate().all(|(i, &j)| i != j)
    }

    /// Returns the parsed cycles as index lists.
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, cycle) in self.cycles.iter().enumerate() {
            if n > 0 {
                write!(f, " ")?;
            }
            write!(f, "(")?;
            for &idx in cycle {
                let ch = self.alphabet.to_char(idx).map_err(|_| fmt::Error)?;
                write!(f, "{}", ch)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Splits cycle text into index groups, rejecting anything malformed.
fn parse_cycles(text: &str, alphabet: &Alphabet) -> Result<Vec<Vec<usize>>> {
    let mut seen = vec![false; alphabet.size()];
    let mut cycles = Vec::new();
    let mut current: Option<Vec<usize>> = None;

    for ch in text.chars() {
        match (ch, current.as_mut()) {
            ('(', None) => current = Some(Vec::new()),
            ('(', Some(_)) => {
                return Err(EnigmaError::MalformedCycles(format!(
                    "nested '(' in \"{}\"",
                    text
                )))
            }
            (')', None) => {
                return Err(EnigmaError::MalformedCycles(format!(
                    "unmatched ')' in \"{}\"",
                    text
                )))
            }
            (')', Some(cycle)) => {
                if cycle.is_empty() {
                    return Err(EnigmaError::MalformedCycles(format!(
                        "empty cycle in \"{}\"",
                        text
                    )));
                }
                cycles.push(std::mem::take(cycle));
                current = None;
            }
            (c, None) if c.is_whitespace() => {}
            (c, None) => {
                return Err(EnigmaError::MalformedCycles(format!(
                    "'{}' outside of a cycle in \"{}\"",
                    c, text
                )))
            }
            (c, Some(_)) if c.is_whitespace() => {
                return Err(EnigmaError::MalformedCycles(format!(
                    "whitespace inside a cycle in \"{}\"",
                    text
                )))
            }
            (c, Some(cycle)) => {
                let idx = alphabet.to_int(c)?;
                if seen[idx] {
                    return Err(EnigmaError::RepeatedCycleChar(c));
                }
                seen[idx] = true;
                cycle.push(idx);
            }
        }
    }

    if current.is_some() {
        return Err(EnigmaError::MalformedCycles(format!(
            "unclosed '(' in \"{}\"",
            text
        )));
    }
    Ok(cycles)
}
