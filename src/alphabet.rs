//! Letter/position conversions over the 26-letter machine alphabet.
//!
//! Every wheel, the reflector and the plugboard work on positions `0..26`.
//! These helpers are the only place where characters are turned into
//! positions and back.

/// The machine alphabet, in keyboard order.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of letters (and rotor positions).
pub const LETTERS: u8 = 26;

/// Returns the position (0..25) of an ASCII letter, ignoring case.
///
/// # Returns
/// `None` for anything that is not `a-z` or `A-Z`.
pub fn position_of(letter: char) -> Option<u8> {
    if letter.is_ascii_alphabetic() {
        Some(letter.to_ascii_uppercase() as u8 - b'A')
    } else {
        None
    }
}

/// Returns the uppercase letter at `position`, wrapping modulo 26.
pub fn letter_at(position: u8) -> char {
    (b'A' + position % LETTERS) as char
}

/// Parses a string holding exactly one letter.
///
/// Used for keystroke input, where `"AB"` or `"2"` must be refused.
pub fn single_letter(input: &str) -> Option<u8> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => position_of(c),
        _ => None,
    }
}

/// Converts every character of `input` to a position.
///
/// # Returns
/// `None` if any character is not a letter.
pub fn positions(input: &str) -> Option<Vec<u8>> {
    input.chars().map(position_of).collect()
}

/// Adds two positions modulo 26. Either operand may be out of range.
pub(crate) fn add(a: u8, b: u8) -> u8 {
    (a % LETTERS + b % LETTERS) % LETTERS
}

/// Subtracts `b` from `a` modulo 26. Either operand may be out of range.
pub(crate) fn sub(a: u8, b: u8) -> u8 {
    (a % LETTERS + LETTERS - b % LETTERS) % LETTERS
}
