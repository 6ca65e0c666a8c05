//! Machine: rotor slots, plugboard, stepping and the signal path.
//!
//! Slot 0 holds the reflector; slot `num_rotors - 1` is the fast rotor on
//! the right. Slots store [`RotorId`]s into the machine's rotor catalog,
//! so rotor state survives re-selection across settings.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, trace};

use crate::alphabet::Alphabet;
use crate::arena::{RotorArena, RotorId};
use crate::config::Setting;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// A complete rotor cipher machine.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use enigma::{Alphabet, Machine, Permutation, Rotor};
///
/// let alpha = Arc::new(Alphabet::new("ABCDEFGHIJKLMNOPQRSTUVWXYZ").unwrap());
/// let perm = |c: &str| Permutation::new(c, &alpha).unwrap();
/// let rotors = vec![
///     Rotor::reflector("B", perm("(AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)")).unwrap(),
///     Rotor::moving("I", perm("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)"), "Q").unwrap(),
///     Rotor::moving("II", perm("(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)"), "E").unwrap(),
/// ];
/// let mut machine = Machine::new(Arc::clone(&alpha), 3, 2, rotors).unwrap();
/// machine.insert_rotors(&["B", "I", "II"]).unwrap();
/// machine.set_rotors("AA").unwrap();
///
/// let cipher = machine.convert_str("ATTACK AT DAWN").unwrap();
/// machine.set_rotors("AA").unwrap();
/// assert_eq!(machine.convert_str(&cipher).unwrap(), "ATTACKATDAWN");
/// ```
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    num_pawls: usize,
    arena: RotorArena,
    slots: Vec<RotorId>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates a machine with `num_rotors` slots and `num_pawls` pawls whose
    /// catalog holds `rotors`. No rotors are inserted and the plugboard is
    /// empty.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidMachineShape`] unless
    ///   `1 < num_rotors` and `num_pawls < num_rotors`.
    /// - [`EnigmaError::AlphabetMismatch`] if a rotor uses another alphabet.
    /// - [`EnigmaError::DuplicateRotor`] if two rotors share a name.
    pub fn new<I>(
        alphabet: Arc<Alphabet>,
        num_rotors: usize,
        num_pawls: usize,
        rotors: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Rotor>,
    {
        if num_rotors < 2 || num_pawls >= num_rotors {
            return Err(EnigmaError::InvalidMachineShape {
                num_rotors,
                num_pawls,
            });
        }
        let rotors = rotors.into_iter();
        let mut arena = RotorArena::with_capacity(rotors.size_hint().0);
        for rotor in rotors {
            if rotor.alphabet() != &*alphabet {
                return Err(EnigmaError::AlphabetMismatch(format!(
                    "rotor '{}'",
                    rotor.name()
                )));
            }
            arena.insert(rotor)?;
        }
        debug!(
            "machine with {} slots, {} pawls, {} catalog rotors",
            num_rotors,
            num_pawls,
            arena.len()
        );
        let plugboard = Permutation::identity(&alphabet);
        Ok(Machine {
            alphabet,
            num_rotors,
            num_pawls,
            arena,
            slots: Vec::new(),
            plugboard,
        })
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls (and thus rotating rotors).
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns the machine alphabet.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the id of the catalog rotor called `name`.
    pub fn rotor_id(&self, name: &str) -> Option<RotorId> {
        self.arena.find(name)
    }

    /// Returns the catalog rotor `id`, or `None` if `id` belongs to another
    /// machine's catalog.
    pub fn rotor(&self, id: RotorId) -> Option<&Rotor> {
        self.arena.get(id)
    }

    /// Returns the rotors currently in the slots, leftmost first.
    pub fn slots(&self) -> &[RotorId] {
        &self.slots
    }

    /// Returns the current plugboard.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Places the catalog rotors named `names` into the slots, in order.
    /// `names[0]` names the reflector.
    ///
    /// Rotors keep whatever setting they last had; nothing is reset.
    ///
    /// # Errors
    /// - [`EnigmaError::WrongRotorCount`] unless exactly `num_rotors` names.
    /// - [`EnigmaError::UnknownRotor`] / [`EnigmaError::DuplicateRotor`].
    /// - [`EnigmaError::NotAReflector`] / [`EnigmaError::ReflectorMisplaced`]
    ///   if a reflector is anywhere but slot 0.
    /// - [`EnigmaError::PawlMismatch`] unless the moving rotors fill exactly
    ///   the rightmost `num_pawls` slots.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::WrongRotorCount {
                expected: self.num_rotors,
                found: names.len(),
            });
        }

        let mut seen = HashSet::with_capacity(names.len());
        let mut slots = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let id = self
                .arena
                .find(name)
                .ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))?;
            if !seen.insert(id) {
                return Err(EnigmaError::DuplicateRotor(name.to_string()));
            }
            slots.push(id);
        }

        let first_moving = self.num_rotors - self.num_pawls;
        for (slot, &id) in slots.iter().enumerate() {
            let rotor = &self.arena[id];
            if slot == 0 {
                if !rotor.reflecting() {
                    return Err(EnigmaError::NotAReflector(rotor.name().to_string()));
                }
                continue;
            }
            if rotor.reflecting() {
                return Err(EnigmaError::ReflectorMisplaced {
                    name: rotor.name().to_string(),
                    slot,
                });
            }
            if rotor.rotates() != (slot >= first_moving) {
                return Err(EnigmaError::PawlMismatch {
                    name: rotor.name().to_string(),
                    slot,
                });
            }
        }

        debug!(
            "inserted rotors {}",
            names
                .iter()
                .map(AsRef::<str>::as_ref)
                .collect::<Vec<_>>()
                .join(" ")
        );
        self.slots = slots;
        Ok(())
    }

    /// Dials the non-reflector rotors to the letters of `setting`, leftmost
    /// first, clearing any ring offset.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorsNotInserted`] before [`insert_rotors`](Self::insert_rotors).
    /// - [`EnigmaError::SettingLength`] unless `setting` has `num_rotors - 1`
    ///   characters.
    /// - [`EnigmaError::CharNotInAlphabet`] for foreign characters.
    pub fn set_rotors(&mut self, setting: &str) -> Result<()> {
        self.require_rotors()?;
        let positions = self.setting_indices(setting)?;
        for (&id, posn) in self.slots[1..].iter().zip(positions) {
            let rotor = &mut self.arena[id];
            rotor.reset();
            rotor.set(posn as i64)?;
        }
        debug!("rotors set to {}", setting);
        Ok(())
    }

    /// Applies ring offsets `rings` to the non-reflector rotors, leftmost
    /// first. Call after [`set_rotors`](Self::set_rotors): each ring
    /// re-bases the position already dialled.
    ///
    /// `set_rotors` clears ring offsets, so rings must be applied again
    /// after every call to it.
    ///
    /// # Errors
    /// As for [`set_rotors`](Self::set_rotors).
    pub fn set_rings(&mut self, rings: &str) -> Result<()> {
        self.require_rotors()?;
        self.setting_indices(rings)?;
        for (&id, ch) in self.slots[1..].iter().zip(rings.chars()) {
            self.arena[id].set_ring(ch)?;
        }
        debug!("rings set to {}", rings);
        Ok(())
    }

    /// Installs `plugboard`.
    ///
    /// # Errors
    /// - [`EnigmaError::AlphabetMismatch`] if built over another alphabet.
    /// - [`EnigmaError::InvalidPlugboard`] if a cycle does not swap exactly
    ///   two characters.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<()> {
        self.check_plugboard(&plugboard)?;
        debug!("plugboard set to {}", plugboard);
        self.plugboard = plugboard;
        Ok(())
    }

    /// Applies a complete setting: rotors, positions, rings, plugboard.
    ///
    /// Everything is validated before any state changes.
    ///
    /// # Errors
    /// Any error of [`insert_rotors`](Self::insert_rotors),
    /// [`set_rotors`](Self::set_rotors), [`set_rings`](Self::set_rings),
    /// [`set_plugboard`](Self::set_plugboard) or [`Permutation::new`].
    pub fn apply_setting(&mut self, setting: &Setting) -> Result<()> {
        let plugboard = Permutation::new(&setting.plugboard, &self.alphabet)?;
        self.check_plugboard(&plugboard)?;
        self.setting_indices(&setting.positions)?;
        if let Some(rings) = &setting.rings {
            self.setting_indices(rings)?;
        }

        self.insert_rotors(setting.rotors.as_slice())?;
        self.set_rotors(&setting.positions)?;
        if let Some(rings) = &setting.rings {
            self.set_rings(rings)?;
        }
        self.set_plugboard(plugboard)
    }

    /// Returns the letters shown in the windows of the non-reflector rotors,
    /// leftmost first. Empty before rotors are inserted.
    pub fn positions(&self) -> String {
        self.slots
            .iter()
            .skip(1)
            .filter_map(|&id| self.alphabet.to_char(self.arena[id].dial()).ok())
            .collect()
    }

    /// Returns catalog rotor `id` to position 0 with no ring offset.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownRotorId`] if `id` belongs to another
    /// machine's catalog.
    pub fn reset_rotor(&mut self, id: RotorId) -> Result<()> {
        self.arena.reset(id)
    }

    /// Returns every catalog rotor to position 0 with no ring offset.
    pub fn reset_all(&mut self) {
        self.arena.reset_all();
    }

    /// Advances the machine, then returns the encoding of index `c`.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorsNotInserted`] before rotors are inserted.
    /// - [`EnigmaError::IndexOutOfRange`] if `c` is not a valid index.
    pub fn convert(&mut self, c: usize) -> Result<usize> {
        self.require_rotors()?;
        if c >= self.alphabet.size() {
            return Err(EnigmaError::IndexOutOfRange {
                index: c,
                size: self.alphabet.size(),
            });
        }
        self.step();
        self.signal(c)
    }

    /// Encodes or decodes `msg`, ignoring whitespace, advancing the machine
    /// once per character.
    ///
    /// The whole message is checked first, so a rejected message leaves the
    /// rotors where they were.
    ///
    /// # Errors
    /// - [`EnigmaError::CharNotInAlphabet`] for any foreign character.
    /// - [`EnigmaError::RotorsNotInserted`] before rotors are inserted.
    pub fn convert_str(&mut self, msg: &str) -> Result<String> {
        let input = msg
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(|ch| self.alphabet.to_int(ch))
            .collect::<Result<Vec<_>>>()?;
        if input.is_empty() {
            return Ok(String::new());
        }
        self.require_rotors()?;

        let mut out = String::with_capacity(input.len());
        for c in input {
            self.step();
            let e = self.signal(c)?;
            out.push(self.alphabet.to_char(e)?);
        }
        Ok(out)
    }

    /// Advances rotors for one key press.
    ///
    /// Notch states are read for every slot before anything moves. The fast
    /// rotor always moves; rotor `i` moves if its right neighbour was at a
    /// notch, or if it was itself at a notch and its left neighbour rotates
    /// (the double step).
    fn step(&mut self) {
        let n = self.num_rotors;
        let notched: Vec<bool> = self
            .slots
            .iter()
            .map(|&id| self.arena[id].at_notch())
            .collect();

        let mut moves = vec![false; n];
        moves[n - 1] = true;
        for i in 1..n - 1 {
            let left_rotates = self.arena[self.slots[i - 1]].rotates();
            moves[i] = notched[i + 1] || (notched[i] && left_rotates);
        }

        for (slot, &id) in self.slots.iter().enumerate() {
            if moves[slot] {
                self.arena[id].advance();
            }
        }
        trace!("stepped to {}", self.positions());
    }

    /// Runs index `c` through plugboard, rotors, reflector, rotors, plugboard.
    fn signal(&self, c: usize) -> Result<usize> {
        let mut p = self.plugboard.permute(c);
        for &id in self.slots.iter().rev() {
            p = self.arena[id].convert_forward(p);
        }
        for &id in &self.slots[1..] {
            p = self.arena[id].convert_backward(p)?;
        }
        Ok(self.plugboard.permute(p))
    }

    fn require_rotors(&self) -> Result<()> {
        if self.slots.is_empty() {
            return Err(EnigmaError::RotorsNotInserted);
        }
        Ok(())
    }

    /// Validates a position or ring string and returns its indices.
    fn setting_indices(&self, text: &str) -> Result<Vec<usize>> {
        let expected = self.num_rotors - 1;
        let found = text.chars().count();
        if found != expected {
            return Err(EnigmaError::SettingLength {
                text: text.to_string(),
                expected,
                found,
            });
        }
        text.chars().map(|ch| self.alphabet.to_int(ch)).collect()
    }

    fn check_plugboard(&self, plugboard: &Permutation) -> Result<()> {
        if plugboard.alphabet() != &self.alphabet {
            return Err(EnigmaError::AlphabetMismatch("plugboard".to_string()));
        }
        for cycle in plugboard.cycles() {
            if cycle.len() != 2 {
                let text = cycle
                    .iter()
                    .filter_map(|&i| self.alphabet.to_char(i).ok())
                    .collect::<String>();
                return Err(EnigmaError::InvalidPlugboard(format!("({})", text)));
            }
        }
        Ok(())
    }
}
