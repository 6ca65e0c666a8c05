//! RotorArena: the catalog of rotors available to a machine.
//!
//! Rotors live in a contiguous `Vec` and machine slots refer to them by
//! [`RotorId`]. Selecting the same rotor in a later setting therefore sees
//! the state it was left in; returning it to position 0 is an explicit
//! [`RotorArena::reset`].
//!
//! Only the arena mints [`RotorId`]s, so an id taken from `find`, `insert`
//! or `iter` of the same arena always indexes a live rotor. Lookups of
//! caller-supplied ids go through the checked `get`/`get_mut`/`reset`.

use std::ops::{Index, IndexMut};

use crate::error::{EnigmaError, Result};
use crate::rotor::Rotor;

/// Handle of a rotor within a machine's catalog.
///
/// Obtained from [`Machine::rotor_id`](crate::Machine::rotor_id) or
/// [`Machine::slots`](crate::Machine::slots); it cannot be built by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotorId(usize);

impl RotorId {
    /// Returns the catalog position this handle refers to.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Catalog of rotors, addressed by [`RotorId`] or by name.
#[derive(Debug, Clone, Default)]
pub(crate) struct RotorArena {
    rotors: Vec<Rotor>,
}

impl RotorArena {
    /// Creates a new empty arena.
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        RotorArena { rotors: Vec::new() }
    }

    /// Creates a new empty arena with room for `capacity` rotors.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        RotorArena {
            rotors: Vec::with_capacity(capacity),
        }
    }

    /// Adds `rotor` to the catalog.
    ///
    /// # Errors
    /// Returns [`EnigmaError::DuplicateRotor`] if a rotor with the same name
    /// is already present.
    pub(crate) fn insert(&mut self, rotor: Rotor) -> Result<RotorId> {
        if self.find(rotor.name()).is_some() {
            return Err(EnigmaError::DuplicateRotor(rotor.name().to_string()));
        }
        let id = RotorId(self.rotors.len());
        self.rotors.push(rotor);
        Ok(id)
    }

    /// Returns the id of the rotor called `name`.
    pub(crate) fn find(&self, name: &str) -> Option<RotorId> {
        self.rotors
            .iter()
            .position(|r| r.name() == name)
            .map(RotorId)
    }

    /// Returns the rotor for `id`, or `None` if `id` is not in this arena.
    pub(crate) fn get(&self, id: RotorId) -> Option<&Rotor> {
        self.rotors.get(id.0)
    }

    /// Returns the rotor for `id` mutably, or `None` if `id` is not in this
    /// arena.
    pub(crate) fn get_mut(&mut self, id: RotorId) -> Option<&mut Rotor> {
        self.rotors.get_mut(id.0)
    }

    /// Returns the rotor `id` to setting 0 with no ring offset.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownRotorId`] if `id` is not in this arena.
    pub(crate) fn reset(&mut self, id: RotorId) -> Result<()> {
        self.get_mut(id)
            .ok_or(EnigmaError::UnknownRotorId(id.0))?
            .reset();
        Ok(())
    }

    /// Returns every rotor to setting 0 with no ring offset.
    pub(crate) fn reset_all(&mut self) {
        self.rotors.iter_mut().for_each(Rotor::reset);
    }

    /// Returns the number of rotors in the catalog.
    pub(crate) fn len(&self) -> usize {
        self.rotors.len()
    }

    /// Returns true iff the catalog is empty.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }

    /// Iterates over all rotors with their ids.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (RotorId, &Rotor)> {
        self.rotors.iter().enumerate().map(|(i, r)| (RotorId(i), r))
    }
}

/// Slot access for ids minted by this arena.
impl Index<RotorId> for RotorArena {
    type Output = Rotor;

    fn index(&self, id: RotorId) -> &Rotor {
        &self.rotors[id.0]
    }
}

impl IndexMut<RotorId> for RotorArena {
    fn index_mut(&mut self, id: RotorId) -> &mut Rotor {
        &mut self.rotors[id.0]
    }
}
