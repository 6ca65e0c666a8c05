//! Rotor cipher machine simulator.
//!
//! Simulates an electromechanical rotor machine of the Enigma family: a
//! plugboard, a row of rotors with ring settings and notches, and a
//! reflector. Each key press first steps the rotors (including the
//! double step of a middle rotor sitting at its notch) and then sends the
//! signal through plugboard, rotors right to left, reflector, rotors left
//! to right and plugboard again. With identical settings, encoding is its
//! own inverse.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (characters <-> indices 0..size)
//!     ↓
//! Permutation  (cycle notation, precomputed forward/inverse tables)
//!     ↓
//! Rotor        (Moving | Fixed | Reflector, setting + ring offset)
//!     ↓ stored in a RotorArena, slots hold RotorIds
//! Machine      (stepping + signal path + plugboard)
//!     ↑
//! MachineConfig / Setting / MessageProcessor (text front end)
//! ```
//!
//! # Examples
//!
//! Encrypt a message, then decrypt it from the same starting setting:
//!
//! ```
//! use enigma::MachineConfig;
//!
//! let config = "ABCDEFGHIJKLMNOPQRSTUVWXYZ 5 3
//!     I MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!     III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
//!     IV MJ (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
//!     Beta NC (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//!     B R (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)";
//! let mut machine = MachineConfig::parse(config).unwrap().build().unwrap();
//!
//! machine.insert_rotors(&["B", "Beta", "III", "IV", "I"]).unwrap();
//! machine.set_rotors("AXLE").unwrap();
//! let plugboard = enigma::Permutation::new("(HQ) (EX) (IP) (TR) (BY)", machine.alphabet()).unwrap();
//! machine.set_plugboard(plugboard).unwrap();
//!
//! let cipher = machine.convert_str("FROM HIS SHOULDER HIAWATHA").unwrap();
//! assert_eq!(cipher, "QVPQSOKOILPUBKJZPISFXDW");
//!
//! machine.set_rotors("AXLE").unwrap();
//! assert_eq!(machine.convert_str(&cipher).unwrap(), "FROMHISSHOULDERHIAWATHA");
//! ```

#![deny(clippy::all)]

pub mod error;

mod alphabet;
mod arena;
mod config;
mod machine;
mod permutation;
mod process;
mod rotor;

pub use alphabet::Alphabet;
pub use arena::RotorId;
pub use config::{MachineConfig, RotorSpec, RotorSpecKind, Setting};
pub use error::{EnigmaError, ErrorKind, Result};
pub use machine::Machine;
pub use permutation::Permutation;
pub use process::{group_by_five, run, MessageProcessor};
pub use rotor::{Rotor, RotorKind};
