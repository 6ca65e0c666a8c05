//! Message driver: applies setting lines and converts message lines.
//!
//! Input is a sequence of lines. A line starting with `*` is a setting line
//! (see [`Setting`]) and reconfigures the machine; any other non-blank line
//! is a message, converted with the machine's current state and printed in
//! groups of five characters. Empty lines are echoed once the first setting
//! has been seen; lines holding only blanks produce no output. Rotor state carries over from one message line to the
//! next until a new setting line.

use log::debug;

use crate::config::Setting;
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;

/// Line-at-a-time driver over a borrowed [`Machine`].
pub struct MessageProcessor<'a> {
    machine: &'a mut Machine,
    configured: bool,
}

impl<'a> MessageProcessor<'a> {
    /// Creates a driver for `machine`, which has not yet seen a setting.
    pub fn new(machine: &'a mut Machine) -> Self {
        MessageProcessor {
            machine,
            configured: false,
        }
    }

    /// Handles one input line and returns the output line it produces, if
    /// any.
    ///
    /// # Errors
    /// - [`EnigmaError::NoSettingLine`] for a message before any setting.
    /// - Any error of [`Setting::parse`], [`Machine::apply_setting`] or
    ///   [`Machine::convert_str`].
    pub fn line(&mut self, line: &str) -> Result<Option<String>> {
        if line.is_empty() {
            return Ok(self.configured.then(String::new));
        }
        // A line of blanks is an empty message: nothing to print.
        if line.trim().is_empty() {
            return Ok(None);
        }
        if line.trim_start().starts_with('*') {
            let setting = Setting::parse(line, self.machine.num_rotors())?;
            self.machine.apply_setting(&setting)?;
            debug!("applied setting '{}'", line.trim());
            self.configured = true;
            return Ok(None);
        }
        if !self.configured {
            return Err(EnigmaError::NoSettingLine);
        }
        let converted = self.machine.convert_str(line)?;
        Ok(Some(group_by_five(&converted)))
    }

    /// Checks that the input contained at least one setting line.
    ///
    /// # Errors
    /// Returns [`EnigmaError::NoSettingLine`] otherwise.
    pub fn finish(self) -> Result<()> {
        if !self.configured {
            return Err(EnigmaError::NoSettingLine);
        }
        Ok(())
    }
}

/// Runs every line of `input` through `machine` and returns the output,
/// one `\n`-terminated line per produced line.
///
/// # Errors
/// As for [`MessageProcessor::line`] and [`MessageProcessor::finish`].
///
/// # Examples
///
/// ```
/// use enigma::{run, MachineConfig};
///
/// let config = "ABCDEFGHIJKLMNOPQRSTUVWXYZ 3 2
///     I MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
///     II ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
///     B R (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)";
/// let mut machine = MachineConfig::parse(config).unwrap().build().unwrap();
///
/// let cipher = run(&mut machine, "* B I II AA\nHELLO WORLD\n").unwrap();
/// let input = format!("* B I II AA\n{}", cipher);
/// assert_eq!(run(&mut machine, &input).unwrap(), "HELLO WORLD\n");
/// ```
pub fn run(machine: &mut Machine, input: &str) -> Result<String> {
    let mut processor = MessageProcessor::new(machine);
    let mut output = String::new();
    for line in input.lines() {
        if let Some(out) = processor.line(line)? {
            output.push_str(&out);
            output.push('\n');
        }
    }
    processor.finish()?;
    Ok(output)
}

/// Splits `msg` into groups of five characters separated by single spaces.
/// The last group may be shorter.
pub fn group_by_five(msg: &str) -> String {
    let mut out = String::with_capacity(msg.len() + msg.len() / 5);
    for (i, ch) in msg.chars().enumerate() {
        if i > 0 && i % 5 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineConfig;

    const CONF: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ 5 3
        I MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
        II ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
        III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
        IV MJ (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
        Beta NC (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
        B R (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)";

    fn machine() -> Machine {
        MachineConfig::parse(CONF).unwrap().build().unwrap()
    }

    #[test]
    fn test_group_by_five() {
        assert_eq!(group_by_five(""), "");
        assert_eq!(group_by_five("ABC"), "ABC");
        assert_eq!(group_by_five("ABCDE"), "ABCDE");
        assert_eq!(group_by_five("ABCDEF"), "ABCDE F");
        assert_eq!(
            group_by_five("QVPQSOKOILPUBKJZPISFXDW"),
            "QVPQS OKOIL PUBKJ ZPISF XDW"
        );
    }

    #[test]
    fn test_run_known_message() {
        let mut m = machine();
        let out = run(
            &mut m,
            "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)\nFROM HIS SHOULDER HIAWATHA\n",
        )
        .unwrap();
        assert_eq!(out, "QVPQS OKOIL PUBKJ ZPISF XDW\n");
    }

    #[test]
    fn test_blank_lines_echoed_after_setting() {
        let mut m = machine();
        let out = run(&mut m, "\n* B Beta I II III AAAA\nHELLO\n\nWORLD\n").unwrap();
        assert_eq!(out, "ILBDA\n\nAMTAZ\n");
    }

    #[test]
    fn test_whitespace_only_lines_print_nothing() {
        let mut m = machine();
        let out = run(&mut m, "* B Beta I II III AAAA\nHELLO\n  \t \n\nWORLD\n").unwrap();
        assert_eq!(out, "ILBDA\n\nAMTAZ\n");
    }

    #[test]
    fn test_new_setting_resets_positions() {
        let mut m = machine();
        let out = run(
            &mut m,
            "* B Beta I II III AAAA\nHELLO\n* B Beta I II III AAAA\nHELLO\n",
        )
        .unwrap();
        assert_eq!(out, "ILBDA\nILBDA\n");
    }

    #[test]
    fn test_message_before_setting() {
        let mut m = machine();
        assert_eq!(run(&mut m, "HELLO\n"), Err(EnigmaError::NoSettingLine));
        assert_eq!(run(&mut m, ""), Err(EnigmaError::NoSettingLine));
        assert_eq!(run(&mut m, "\n\n"), Err(EnigmaError::NoSettingLine));
    }

    #[test]
    fn test_bad_setting_propagates() {
        let mut m = machine();
        assert_eq!(
            run(&mut m, "* B Beta I I III AAAA\nHELLO\n"),
            Err(EnigmaError::DuplicateRotor("I".to_string()))
        );
        assert!(matches!(
            run(&mut m, "* B Beta I II III AAAA (ABC)\n"),
            Err(EnigmaError::InvalidPlugboard(_))
        ));
    }

    #[test]
    fn test_bad_message_char() {
        let mut m = machine();
        assert_eq!(
            run(&mut m, "* B Beta I II III AAAA\nHELLO, WORLD\n"),
            Err(EnigmaError::CharNotInAlphabet(','))
        );
    }

    #[test]
    fn test_processor_line_by_line() {
        let mut m = machine();
        let mut p = MessageProcessor::new(&mut m);
        assert_eq!(p.line("").unwrap(), None);
        assert_eq!(p.line("* B Beta I II III AAAA").unwrap(), None);
        assert_eq!(p.line("HELLO").unwrap(), Some("ILBDA".to_string()));
        assert_eq!(p.line("").unwrap(), Some(String::new()));
        assert_eq!(p.line("   ").unwrap(), None);
        assert!(p.finish().is_ok());
    }
}
