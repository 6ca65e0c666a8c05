//! Error types for the enigma library.
//!
//! Every failure is reported as an [`EnigmaError`]. Variants fall into two
//! classes, exposed through [`EnigmaError::kind`]: configuration errors
//! (bad alphabet, wiring, rotor selection or setting text) and operation
//! errors (a request the machine cannot physically carry out).

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = EnigmaError> = std::result::Result<T, E>;

/// Broad class of an [`EnigmaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or inconsistent configuration or setting.
    Config,
    /// Illegal operation on a correctly configured component.
    Operation,
}

/// Errors produced by the enigma library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// Alphabet string has no characters.
    #[error("alphabet is empty")]
    EmptyAlphabet,

    /// Alphabet string lists a character twice.
    #[error("duplicate character '{0}' in alphabet")]
    DuplicateAlphabetChar(char),

    /// Alphabet contains a character reserved by the configuration syntax.
    #[error("character '{0}' may not be used in an alphabet")]
    ReservedAlphabetChar(char),

    /// Character is not a member of the alphabet.
    #[error("character '{0}' is not in the alphabet")]
    CharNotInAlphabet(char),

    /// Index outside `0..size`.
    #[error("index {index} is out of range for an alphabet of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Cycle text is not a sequence of parenthesized groups.
    #[error("malformed cycle text: {0}")]
    MalformedCycles(String),

    /// A character appears in more than one place of the cycle text.
    #[error("character '{0}' appears more than once in cycle text")]
    RepeatedCycleChar(char),

    /// Two components were built over different alphabets.
    #[error("{0} uses a different alphabet than the machine")]
    AlphabetMismatch(String),

    /// Machine shape violates `1 < num_rotors` and `num_pawls < num_rotors`.
    #[error("invalid machine shape: {num_rotors} rotor slots with {num_pawls} pawls")]
    InvalidMachineShape { num_rotors: usize, num_pawls: usize },

    /// Rotor name not found in the catalog.
    #[error("unknown rotor '{0}'")]
    UnknownRotor(String),

    /// Rotor handle taken from another machine's catalog.
    #[error("rotor handle {0} is not in this machine's catalog")]
    UnknownRotorId(usize),

    /// Rotor name selected twice in one setting, or declared twice in a catalog.
    #[error("duplicate rotor '{0}'")]
    DuplicateRotor(String),

    /// Wrong number of rotor names supplied for the slots.
    #[error("expected {expected} rotors, found {found}")]
    WrongRotorCount { expected: usize, found: usize },

    /// Slot 0 does not hold a reflector.
    #[error("rotor '{0}' in the leftmost slot is not a reflector")]
    NotAReflector(String),

    /// A reflector was placed in a slot other than slot 0.
    #[error("reflector '{name}' placed in slot {slot}")]
    ReflectorMisplaced { name: String, slot: usize },

    /// Moving rotors do not occupy exactly the rightmost pawl slots.
    #[error("rotor '{name}' in slot {slot} does not match the pawl layout")]
    PawlMismatch { name: String, slot: usize },

    /// Position or ring string has the wrong length.
    #[error("setting string '{text}' has length {found}, expected {expected}")]
    SettingLength {
        text: String,
        expected: usize,
        found: usize,
    },

    /// Reflector asked to take a position other than 0.
    #[error("reflector has only one position, cannot set to {0}")]
    ReflectorPosition(i64),

    /// Reflector wiring has a fixed point.
    #[error("reflector '{0}' wiring is not a derangement")]
    ReflectorNotDerangement(String),

    /// Plugboard cycle that does not swap exactly two characters.
    #[error("plugboard cycle '{0}' must pair exactly two characters")]
    InvalidPlugboard(String),

    /// Configuration text could not be read.
    #[error("bad configuration: {0}")]
    BadConfig(String),

    /// Setting line could not be read.
    #[error("bad setting line: {0}")]
    BadSetting(String),

    /// Input began with a message before any setting line.
    #[error("input does not start with a setting line")]
    NoSettingLine,

    /// Backward conversion requested from a reflector.
    #[error("reflector has no backward conversion")]
    ReflectorBackward,

    /// Conversion attempted before rotors were inserted.
    #[error("no rotors have been inserted into the machine")]
    RotorsNotInserted,
}

impl EnigmaError {
    /// Returns the class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnigmaError::ReflectorBackward | EnigmaError::RotorsNotInserted => {
                ErrorKind::Operation
            }
            _ => ErrorKind::Config,
        }
    }
}
