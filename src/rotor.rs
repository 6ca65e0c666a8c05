//! Rotor: a wired permutation with a dial position and a ring offset.
//!
//! The three physical kinds (moving rotor, fixed rotor, reflector) are a
//! closed set, modelled by [`RotorKind`] and dispatched by `match`.
//!
//! The stored `setting` is the offset of the wiring relative to contact 0.
//! With a ring offset `r`, a dial showing letter `d` corresponds to a
//! setting of `d - r`; [`Rotor::set_ring`] performs that re-basing.

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;

/// Kind of rotor, with variant-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Rotor with a ratchet; `notches` are alphabet indices on the ring.
    Moving { notches: Vec<usize> },
    /// Rotor that never moves.
    Fixed,
    /// Fixed rotor at the end of the signal path that sends it back.
    Reflector,
}

/// One rotor of a machine catalog.
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    permutation: Permutation,
    kind: RotorKind,
    setting: usize,
    ring: usize,
}

impl Rotor {
    /// Creates a moving rotor whose notches are the characters of `notches`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::CharNotInAlphabet`] if a notch character is
    /// not in the permutation's alphabet.
    pub fn moving(name: &str, permutation: Permutation, notches: &str) -> Result<Self> {
        let notches = notches
            .chars()
            .map(|ch| permutation.alphabet().to_int(ch))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::build(name, permutation, RotorKind::Moving { notches }))
    }

    /// Creates a fixed (non-moving) rotor.
    pub fn fixed(name: &str, permutation: Permutation) -> Self {
        Self::build(name, permutation, RotorKind::Fixed)
    }

    /// Creates a reflector.
    ///
    /// # Errors
    /// Returns [`EnigmaError::ReflectorNotDerangement`] if the wiring maps
    /// any character to itself.
    pub fn reflector(name: &str, permutation: Permutation) -> Result<Self> {
        if !permutation.derangement() {
            return Err(EnigmaError::ReflectorNotDerangement(name.to_string()));
        }
        Ok(Self::build(name, permutation, RotorKind::Reflector))
    }

    fn build(name: &str, permutation: Permutation, kind: RotorKind) -> Self {
        Rotor {
            name: name.to_string(),
            permutation,
            kind,
            setting: 0,
            ring: 0,
        }
    }

    /// Returns my name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns my kind.
    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// Returns my wiring at setting 0.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Returns my alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        self.permutation.alphabet()
    }

    /// Returns the size of my alphabet.
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// Returns true iff I have a ratchet and can move.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Returns true iff I reflect.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Returns my current setting (wiring offset).
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Returns my ring offset.
    pub fn ring(&self) -> usize {
        self.ring
    }

    /// Returns the index of the letter shown in my window.
    pub fn dial(&self) -> usize {
        self.permutation
            .wrap(self.setting as i64 + self.ring as i64)
    }

    /// Sets my setting to `posn`, taken modulo the alphabet size.
    ///
    /// # Errors
    /// Returns [`EnigmaError::ReflectorPosition`] if I am a reflector and
    /// `posn != 0`.
    pub fn set(&mut self, posn: i64) -> Result<()> {
        if self.reflecting() && posn != 0 {
            return Err(EnigmaError::ReflectorPosition(posn));
        }
        self.setting = self.permutation.wrap(posn);
        Ok(())
    }

    /// Sets my setting to the index of character `cposn`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::CharNotInAlphabet`] for a foreign character,
    /// or [`EnigmaError::ReflectorPosition`] as for [`set`](Self::set).
    pub fn set_char(&mut self, cposn: char) -> Result<()> {
        let posn = self.alphabet().to_int(cposn)?;
        self.set(posn as i64)
    }

    /// Records ring offset `ch` and re-bases the current setting by it.
    ///
    /// Must follow [`set`](Self::set): the ring shifts whatever position is
    /// currently dialled, exactly as fitting the ring before turning the
    /// rotor to its start letter.
    ///
    /// # Errors
    /// Returns [`EnigmaError::CharNotInAlphabet`] for a foreign character,
    /// or [`EnigmaError::ReflectorPosition`] if a reflector would leave
    /// position 0.
    pub fn set_ring(&mut self, ch: char) -> Result<()> {
        let ring = self.permutation.wrap(self.alphabet().to_int(ch)? as i64);
        let rebased = self.permutation.wrap(self.setting as i64 - ring as i64);
        self.set(rebased as i64)?;
        self.ring = ring;
        Ok(())
    }

    /// Returns me to setting 0 with no ring offset.
    pub fn reset(&mut self) {
        self.setting = 0;
        self.ring = 0;
    }

    /// Converts contact `p` entering from the right to the contact leaving
    /// on the left.
    pub fn convert_forward(&self, p: usize) -> usize {
        let shift = self.setting as i64;
        let inside = self.permutation.wrap(p as i64 + shift);
        let out = self.permutation.permute(inside);
        self.permutation.wrap(out as i64 - shift)
    }

    /// Converts contact `e` entering from the left to the contact leaving
    /// on the right.
    ///
    /// # Errors
    /// Returns [`EnigmaError::ReflectorBackward`] for a reflector.
    pub fn convert_backward(&self, e: usize) -> Result<usize> {
        if self.reflecting() {
            return Err(EnigmaError::ReflectorBackward);
        }
        let shift = self.setting as i64;
        let inside = self.permutation.wrap(e as i64 + shift);
        let out = self.permutation.invert(inside);
        Ok(self.permutation.wrap(out as i64 - shift))
    }

    /// Returns true iff I am positioned to let the rotor on my left advance.
    ///
    /// Notches are cut on the ring, so the comparison is against the dial
    /// letter (setting plus ring offset).
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&self.dial()),
            RotorKind::Fixed | RotorKind::Reflector => false,
        }
    }

    /// Advances me one position, if I can move.
    pub fn advance(&mut self) {
        if let RotorKind::Moving { .. } = self.kind {
            self.setting = self.permutation.wrap(self.setting as i64 + 1);
        }
    }
}
