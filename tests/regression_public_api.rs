//! Regression tests for the public API.
//!
//! Expected ciphertexts are frozen vectors; any change in output means the
//! stepping rule, ring handling or signal path changed.
//!
//! Coverage:
//! - `MachineConfig` / `Setting` parsing and building
//! - `Machine` stepping (single, carry, double step) and conversion
//! - `run` / `group_by_five` end to end
//! - `EnigmaError::kind` taxonomy

use std::sync::Arc;

use enigma::{
    group_by_five, run, Alphabet, EnigmaError, ErrorKind, Machine, MachineConfig, Permutation,
    Rotor, Setting,
};

const DEFAULT_CONF: &str = "\
ABCDEFGHIJKLMNOPQRSTUVWXYZ
 5 3
 I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
 II ME     (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
 III MV    (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
 IV MJ     (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
 V MZ      (AVOLDRWFIESQ) (CZ) (UH) (BNX) (GMPKYJ) (T)
 VI MZM    (AJQDVLEOZWIYTS) (CGMNHFUX) (BPRK)
 VII MZM   (ANOUPFRIMBZTLWKSVEGCJYDHXQ)
 VIII MZM  (AFLSETWUNDHOZVICQ) (BKJ) (GXY) (MPR)
 Beta NC   (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
 Gamma NC  (AFNIRLBSQWVXGUYEHTJ) (KOD) (CM)
 B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
 C R       (AR) (BD) (CO) (EJ) (FN) (GT) (HK) (IV) (LM) (PW) (QZ) (SX) (UY)
";

fn default_machine() -> Machine {
    MachineConfig::parse(DEFAULT_CONF).unwrap().build().unwrap()
}

fn four_slot_machine() -> Machine {
    let mut config = MachineConfig::parse(DEFAULT_CONF).unwrap();
    config.num_rotors = 4;
    config.build().unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// Frozen vectors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn hiawatha_vector() {
    let mut m = default_machine();
    let out = run(
        &mut m,
        "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)\nFROM HIS SHOULDER HIAWATHA\n",
    )
    .unwrap();
    assert_eq!(out, "QVPQS OKOIL PUBKJ ZPISF XDW\n");
}

#[test]
fn hiawatha_decrypts() {
    let mut m = default_machine();
    let out = run(
        &mut m,
        "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)\nQVPQS OKOIL PUBKJ ZPISF XDW\n",
    )
    .unwrap();
    assert_eq!(out, "FROMH ISSHO ULDER HIAWA THA\n");
}

#[test]
fn hello_vector_beta_i_ii_iii() {
    let mut m = default_machine();
    m.insert_rotors(&["B", "Beta", "I", "II", "III"]).unwrap();
    m.set_rotors("AAAA").unwrap();
    assert_eq!(m.convert_str("HELLO").unwrap(), "ILBDA");
}

#[test]
fn ring_setting_vector() {
    let mut m = four_slot_machine();
    m.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    m.set_rotors("AAA").unwrap();
    m.set_rings("BBB").unwrap();
    assert_eq!(m.convert_str("AAAAA").unwrap(), "FIHKB");
}

// ═══════════════════════════════════════════════════════════════════════
// Stepping
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn double_step_trace() {
    let mut m = four_slot_machine();
    m.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    m.set_rotors("ADU").unwrap();
    let mut trace = Vec::new();
    for _ in 0..4 {
        m.convert(0).unwrap();
        trace.push(m.positions());
    }
    assert_eq!(trace, ["ADV", "AEW", "BFX", "BFY"]);
}

#[test]
fn not_at_notch_only_fast_rotor_moves() {
    let mut m = four_slot_machine();
    m.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    m.set_rotors("AAA").unwrap();
    for expected in ["AAB", "AAC", "AAD"] {
        m.convert(0).unwrap();
        assert_eq!(m.positions(), expected);
    }
}

#[test]
fn full_revolution_carries_once() {
    let mut m = four_slot_machine();
    m.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    m.set_rotors("AAA").unwrap();
    for _ in 0..26 {
        m.convert(0).unwrap();
    }
    // III passed its notch V once, carrying II from A to B.
    assert_eq!(m.positions(), "ABA");
}

#[test]
fn ring_does_not_move_notch_off_dial() {
    let mut m = four_slot_machine();
    m.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    m.set_rotors("AAV").unwrap();
    m.set_rings("AAK").unwrap();
    m.convert(0).unwrap();
    assert_eq!(m.positions(), "ABW");
}

#[test]
fn empty_message_zero_advances() {
    let mut m = default_machine();
    m.insert_rotors(&["B", "Beta", "I", "II", "III"]).unwrap();
    m.set_rotors("AAAZ").unwrap();
    assert_eq!(m.convert_str(" \t ").unwrap(), "");
    assert_eq!(m.positions(), "AAAZ");
}

// ═══════════════════════════════════════════════════════════════════════
// Reciprocity
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn reciprocal_with_rings_and_plugboard() {
    let mut m = default_machine();
    let setting = Setting::parse("* C Gamma VI VII VIII QRST DKMP (AZ) (BY) (CX)", 5).unwrap();
    m.apply_setting(&setting).unwrap();
    let plain = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG".repeat(20);
    let cipher = m.convert_str(&plain).unwrap();
    assert_ne!(cipher, plain);
    m.apply_setting(&setting).unwrap();
    assert_eq!(m.convert_str(&cipher).unwrap(), plain);
}

#[test]
fn never_encodes_letter_to_itself() {
    let mut m = default_machine();
    m.insert_rotors(&["B", "Beta", "I", "II", "III"]).unwrap();
    m.set_rotors("AAAA").unwrap();
    let plain = "A".repeat(500);
    let cipher = m.convert_str(&plain).unwrap();
    assert!(!cipher.contains('A'));
}

// ═══════════════════════════════════════════════════════════════════════
// Catalog state
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn reselection_keeps_rotor_state() {
    let mut m = default_machine();
    m.insert_rotors(&["B", "Beta", "I", "II", "III"]).unwrap();
    m.set_rotors("AAAA").unwrap();
    m.convert_str("ABC").unwrap();
    m.insert_rotors(&["B", "Gamma", "IV", "V", "III"]).unwrap();
    let iii = m.rotor_id("III").unwrap();
    assert_eq!(m.rotor(iii).unwrap().setting(), 3);
    m.reset_rotor(iii).unwrap();
    assert_eq!(m.rotor(iii).unwrap().setting(), 0);
}

#[test]
fn handle_from_another_machine_is_rejected() {
    let big = default_machine();
    let stray = big.rotor_id("C").unwrap();
    let mut small = MachineConfig::parse("ABCD 2 1 R R (AB) (CD) I MA (ABCD)")
        .unwrap()
        .build()
        .unwrap();
    assert!(small.rotor(stray).is_none());
    assert_eq!(
        small.reset_rotor(stray),
        Err(EnigmaError::UnknownRotorId(stray.index()))
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn duplicate_rotor_is_config_error() {
    let mut m = default_machine();
    let err = m
        .insert_rotors(&["B", "Beta", "III", "III", "I"])
        .unwrap_err();
    assert_eq!(err, EnigmaError::DuplicateRotor("III".to_string()));
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn reflector_backward_is_operation_error() {
    let alpha = Arc::new(Alphabet::new("ABCD").unwrap());
    let r = Rotor::reflector("R", Permutation::new("(AB) (CD)", &alpha).unwrap()).unwrap();
    let err = r.convert_backward(0).unwrap_err();
    assert_eq!(err, EnigmaError::ReflectorBackward);
    assert_eq!(err.kind(), ErrorKind::Operation);
}

#[test]
fn setting_errors_surface_through_run() {
    let mut m = default_machine();
    assert_eq!(
        run(&mut m, "* B Beta III IV IX AXLE\n"),
        Err(EnigmaError::UnknownRotor("IX".to_string()))
    );
    assert!(matches!(
        run(&mut m, "* B Beta III IV I AXL\n"),
        Err(EnigmaError::SettingLength { .. })
    ));
    assert_eq!(
        run(&mut m, "* Beta B III IV I AXLE\n"),
        Err(EnigmaError::NotAReflector("Beta".to_string()))
    );
    assert!(matches!(
        run(&mut m, "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY) (QA)\n"),
        Err(EnigmaError::RepeatedCycleChar('Q'))
    ));
}

#[test]
fn malformed_configs() {
    assert!(MachineConfig::parse("ABC 2").is_err());
    let bad_cycles = MachineConfig::parse("ABCD 2 1 R R (AB) (CD) I MA (AB").unwrap();
    assert!(matches!(
        bad_cycles.build(),
        Err(EnigmaError::MalformedCycles(_))
    ));
    let shape = MachineConfig::parse("ABCD 2 2 R R (AB) (CD)").unwrap();
    assert!(matches!(
        shape.build(),
        Err(EnigmaError::InvalidMachineShape { .. })
    ));
}

#[test]
fn group_by_five_public() {
    assert_eq!(group_by_five("ABCDEFGHIJK"), "ABCDE FGHIJ K");
}
