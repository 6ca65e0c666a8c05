//! Configuration and setting-line readers.
//!
//! A configuration describes the alphabet, the machine shape and the rotor
//! catalog:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//! 5 3
//! I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//! Beta NC   (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
//! ```
//!
//! Line breaks carry no meaning; the text is read as whitespace-separated
//! tokens. A rotor type is `M` followed by its notch letters, `N` for a
//! fixed rotor or `R` for a reflector. A setting line selects rotors and
//! gives their positions, optional rings and plugboard:
//!
//! ```text
//! * B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
//! ```

use std::sync::Arc;

use log::debug;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// Kind of a rotor as declared in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorSpecKind {
    /// Moving rotor with the given notch characters.
    Moving { notches: String },
    /// Fixed rotor.
    Fixed,
    /// Reflector.
    Reflector,
}

/// One rotor description from a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorSpec {
    pub name: String,
    pub kind: RotorSpecKind,
    pub cycles: String,
}

impl RotorSpec {
    /// Builds the rotor over `alphabet`.
    ///
    /// # Errors
    /// Any error of [`Permutation::new`], [`Rotor::moving`] or
    /// [`Rotor::reflector`].
    pub fn build(&self, alphabet: &Arc<Alphabet>) -> Result<Rotor> {
        let perm = Permutation::new(&self.cycles, alphabet)?;
        match &self.kind {
            RotorSpecKind::Moving { notches } => Rotor::moving(&self.name, perm, notches),
            RotorSpecKind::Fixed => Ok(Rotor::fixed(&self.name, perm)),
            RotorSpecKind::Reflector => Rotor::reflector(&self.name, perm),
        }
    }
}

/// Parsed machine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    pub alphabet: String,
    pub num_rotors: usize,
    pub num_pawls: usize,
    pub rotors: Vec<RotorSpec>,
}

impl MachineConfig {
    /// Reads a configuration from `text`.
    ///
    /// Only the layout is checked here; alphabet and wiring are validated
    /// by [`build`](Self::build).
    ///
    /// # Errors
    /// Returns [`EnigmaError::BadConfig`] if the header is truncated, a
    /// count is not a number, or a rotor description is incomplete.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::MachineConfig;
    ///
    /// let config = MachineConfig::parse("AB 2 1 R R (AB) M MA (A) (B)").unwrap();
    /// assert_eq!(config.rotors.len(), 2);
    /// assert!(config.build().is_ok());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut tokens = text.split_whitespace().peekable();
        let alphabet = tokens
            .next()
            .ok_or_else(|| EnigmaError::BadConfig("configuration is empty".to_string()))?
            .to_string();
        let num_rotors = parse_count(tokens.next(), "rotor count")?;
        let num_pawls = parse_count(tokens.next(), "pawl count")?;

        let mut rotors = Vec::new();
        while let Some(name) = tokens.next() {
            if name.contains(|c| c == '(' || c == ')') {
                return Err(EnigmaError::BadConfig(format!(
                    "expected a rotor name, found '{}'",
                    name
                )));
            }
            let kind = match tokens.next() {
                Some(kind) => parse_kind(name, kind)?,
                None => {
                    return Err(EnigmaError::BadConfig(format!(
                        "rotor '{}' has no type",
                        name
                    )))
                }
            };
            let mut cycles = Vec::new();
            while let Some(cycle) = tokens.next_if(|t| t.starts_with('(')) {
                cycles.push(cycle);
            }
            rotors.push(RotorSpec {
                name: name.to_string(),
                kind,
                cycles: cycles.join(" "),
            });
        }

        Ok(MachineConfig {
            alphabet,
            num_rotors,
            num_pawls,
            rotors,
        })
    }

    /// Builds the machine this configuration describes.
    ///
    /// # Errors
    /// Any error of [`Alphabet::new`], [`RotorSpec::build`] or
    /// [`Machine::new`].
    pub fn build(&self) -> Result<Machine> {
        let alphabet = Arc::new(Alphabet::new(&self.alphabet)?);
        let rotors = self
            .rotors
            .iter()
            .map(|spec| spec.build(&alphabet))
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "configured {} rotors over a {}-character alphabet",
            rotors.len(),
            alphabet.size()
        );
        Machine::new(alphabet, self.num_rotors, self.num_pawls, rotors)
    }
}

fn parse_count(token: Option<&str>, what: &str) -> Result<usize> {
    let token = token.ok_or_else(|| EnigmaError::BadConfig(format!("missing {}", what)))?;
    token
        .parse()
        .map_err(|_| EnigmaError::BadConfig(format!("{} '{}' is not a number", what, token)))
}

fn parse_kind(name: &str, kind: &str) -> Result<RotorSpecKind> {
    let mut chars = kind.chars();
    match chars.next() {
        Some('M') => Ok(RotorSpecKind::Moving {
            notches: chars.collect(),
        }),
        Some('N') => Ok(RotorSpecKind::Fixed),
        Some('R') => Ok(RotorSpecKind::Reflector),
        _ => Err(EnigmaError::BadConfig(format!(
            "rotor '{}' has unknown type '{}'",
            name, kind
        ))),
    }
}

/// One setting line, split into its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    /// Rotor names, reflector first.
    pub rotors: Vec<String>,
    /// Start letters of the non-reflector rotors, leftmost first.
    pub positions: String,
    /// Ring letters, if given.
    pub rings: Option<String>,
    /// Plugboard cycles; empty for no plugboard.
    pub plugboard: String,
}

impl Setting {
    /// Splits a setting line for a machine with `num_rotors` slots.
    ///
    /// Only the layout is checked; names and letters are validated by
    /// [`Machine::apply_setting`].
    ///
    /// # Errors
    /// Returns [`EnigmaError::BadSetting`] if the line does not start with
    /// `*`, has too few rotor names, lacks positions, or has extra fields.
    pub fn parse(line: &str, num_rotors: usize) -> Result<Self> {
        let mut tokens = line.split_whitespace().peekable();
        if tokens.next() != Some("*") {
            return Err(EnigmaError::BadSetting(format!(
                "'{}' does not start with '*'",
                line
            )));
        }

        let mut rotors = Vec::with_capacity(num_rotors);
        for _ in 0..num_rotors {
            match tokens.next_if(|t| !t.starts_with('(')) {
                Some(name) => rotors.push(name.to_string()),
                None => {
                    return Err(EnigmaError::BadSetting(format!(
                        "expected {} rotor names in '{}'",
                        num_rotors, line
                    )))
                }
            }
        }
        let positions = tokens
            .next_if(|t| !t.starts_with('('))
            .ok_or_else(|| EnigmaError::BadSetting(format!("no rotor positions in '{}'", line)))?
            .to_string();
        let rings = tokens
            .next_if(|t| !t.starts_with('('))
            .map(str::to_string);

        let mut plugboard = Vec::new();
        for token in tokens {
            if !token.starts_with('(') {
                return Err(EnigmaError::BadSetting(format!(
                    "unexpected '{}' in '{}'",
                    token, line
                )));
            }
            plugboard.push(token);
        }

        Ok(Setting {
            rotors,
            positions,
            rings,
            plugboard: plugboard.join(" "),
        })
    }
}
