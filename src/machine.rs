//! Machine: plugboard, three wheels and a reflector in one signal path.
//!
//! Every keystroke first steps the wheels, then sends the letter through
//! plugboard, wheels, reflector, wheels and plugboard again. Because the
//! path is an involution for a fixed wheel position, the same machine setup
//! both enciphers and deciphers.

use std::fmt;

use tracing::{debug, info, warn};

use crate::alphabet;
use crate::config::{MachineConfig, RotorOrder};
use crate::error::{EnigmaError, Result};
use crate::plugboard::Plugboard;
use crate::reflector::Reflector;
use crate::rotor::{Rotor, RotorBank, RotorId};
use crate::state::{signal_path, MachineState};

/// A three-rotor Enigma machine.
///
/// # Examples
///
/// ```
/// use enigma::Machine;
///
/// let mut sender = Machine::new(&["II", "V", "I"], "AYP", ["PO", "ML"]).unwrap();
/// let cipher = sender.encipher("Attack at dawn");
///
/// let mut receiver = Machine::new(&["II", "V", "I"], "AYP", ["PO", "ML"]).unwrap();
/// assert_eq!(receiver.decipher(&cipher), "ATTACK AT DAWN");
/// ```
#[derive(Debug, Clone)]
pub struct Machine {
    order: RotorOrder,
    bank: RotorBank,
    plugboard: Plugboard,
    reflector: Reflector,
}

impl Default for Machine {
    /// Rotors `I II III`, key `AAA`, no plugs.
    fn default() -> Self {
        Self::with_order(RotorOrder::default(), MachineState::default(), Plugboard::default())
    }
}

impl Machine {
    /// Builds a machine from rotor identifiers (left to right), a starting
    /// key and plug pairs.
    ///
    /// Malformed plug pairs are ignored with a warning, as
    /// [`Plugboard::new`] does.
    ///
    /// # Errors
    /// - [`EnigmaError::RotorCount`], [`EnigmaError::UnknownRotor`] or
    ///   [`EnigmaError::DuplicateRotor`] for a bad rotor selection.
    /// - [`EnigmaError::InvalidStartPosition`] unless `key` is three letters.
    pub fn new<S, I, P>(rotor_order: &[S], key: &str, plugs: I) -> Result<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let order = RotorOrder::parse(rotor_order)?;
        let state = MachineState::from_key(key)
            .ok_or_else(|| EnigmaError::InvalidStartPosition(key.to_string()))?;
        Ok(Self::with_order(order, state, Plugboard::new(plugs)))
    }

    /// Builds a machine from a configuration value.
    ///
    /// # Errors
    /// As for [`Machine::new`].
    pub fn from_config(config: &MachineConfig) -> Result<Self> {
        let order = config.rotor_order()?;
        let state = MachineState::from_key(&config.key)
            .ok_or_else(|| EnigmaError::InvalidStartPosition(config.key.clone()))?;
        Ok(Self::with_order(order, state, Plugboard::new(&config.plugs)))
    }

    /// Assembles a machine from already validated parts.
    pub fn with_order(order: RotorOrder, state: MachineState, plugboard: Plugboard) -> Self {
        let machine = Machine {
            order,
            bank: RotorBank::assemble(order.models(), state.offsets()),
            plugboard,
            reflector: Reflector::new(),
        };
        debug!(rotors = %order, key = %state, plugs = plugboard.len(), "machine assembled");
        machine
    }

    /// Returns the window letters, left to right.
    pub fn key(&self) -> String {
        self.state().key()
    }

    /// Returns the current wheel positions.
    pub fn state(&self) -> MachineState {
        MachineState::new(self.bank.offsets())
    }

    /// Moves the wheels to `state`.
    pub fn set_state(&mut self, state: MachineState) {
        self.bank.set_offsets(state.offsets());
    }

    /// Returns the rotor selection.
    pub fn rotor_order(&self) -> RotorOrder {
        self.order
    }

    /// Returns the wheel in slot `id`.
    pub fn rotor(&self, id: RotorId) -> &Rotor {
        self.bank.get(id)
    }

    /// Returns the plugboard.
    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    /// Returns the reflector.
    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    /// Presses one key and returns the lamp that lights, in uppercase.
    ///
    /// Validation happens before the wheels move, so a rejected input leaves
    /// the machine untouched.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidLetter`] unless `letter` is exactly one
    /// letter in `a-zA-Z`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Machine;
    ///
    /// let mut machine = Machine::default();
    /// assert_eq!(machine.encode_decode_letter("a").unwrap(), 'B');
    /// assert_eq!(machine.key(), "AAB");
    /// assert!(machine.encode_decode_letter("AB").is_err());
    /// ```
    pub fn encode_decode_letter(&mut self, letter: &str) -> Result<char> {
        let position = alphabet::single_letter(letter)
            .ok_or_else(|| EnigmaError::InvalidLetter(letter.to_string()))?;
        Ok(alphabet::letter_at(self.press(position)))
    }

    /// Enciphers every ASCII letter of `text`.
    ///
    /// Letters come out uppercase. Any other character is copied through
    /// unchanged and does not move the wheels.
    pub fn encipher(&mut self, text: &str) -> String {
        text.chars()
            .map(|c| match alphabet::position_of(c) {
                Some(p) => alphabet::letter_at(self.press(p)),
                None => c,
            })
            .collect()
    }

    /// Deciphers `text`. Identical to [`encipher`](Self::encipher).
    pub fn decipher(&mut self, text: &str) -> String {
        self.encipher(text)
    }

    /// Sets all three windows from a key such as `"QEV"` (any case).
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidPositionKey`] unless `key` is three
    /// letters; the wheels keep their positions.
    pub fn set_rotor_position(&mut self, key: &str) -> Result<()> {
        if MachineState::from_key(key).is_none() {
            let err = EnigmaError::InvalidPositionKey(key.to_string());
            warn!(key, "{}", err);
            return Err(err);
        }
        for (id, letter) in RotorId::ALL.into_iter().zip(key.chars()) {
            self.bank.get_mut(id).change_setting(letter)?;
        }
        info!("Rotor position successfully updated. Now using {}.", self.key());
        Ok(())
    }

    /// Replaces or extends the plug pairs.
    ///
    /// # Errors
    /// See [`Plugboard::update_swaps`]; on error the plugboard is unchanged.
    pub fn set_plugs<I, S>(&mut self, pairs: I, replace: bool) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.plugboard.update_swaps(pairs, replace)
    }

    /// One keystroke on an alphabet position.
    fn press(&mut self, position: u8) -> u8 {
        self.bank.step(RotorId::RIGHT);
        let output = signal_path(&self.bank, &self.plugboard, &self.reflector, position);
        debug!(
            key = %self.key(),
            input = %alphabet::letter_at(position),
            output = %alphabet::letter_at(output),
            "keystroke"
        );
        output
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Keyboard <-> Plugboard")?;
        for model in self.order.models() {
            write!(f, " <-> Rotor {}", model)?;
        }
        write!(f, " <-> Reflector\nKey: {}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_PLUGS: [&str; 0] = [];

    fn longtext() -> String {
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz".repeat(26)
    }

    #[test]
    fn test_default_key() {
        assert_eq!(Machine::default().key(), "AAA");
    }

    #[test]
    fn test_default_plugboard_is_empty() {
        assert_eq!(*Machine::default().plugboard(), Plugboard::default());
    }

    #[test]
    fn test_default_rotor_order() {
        assert_eq!(Machine::default().rotor_order().names(), vec!["I", "II", "III"]);
    }

    #[test]
    fn test_reflector_is_ukw_b() {
        let machine = Machine::default();
        assert_eq!(*machine.reflector(), Reflector::new());
        assert_eq!(machine.reflector().wiring(), crate::wiring::REFLECTOR_B);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Machine::default().to_string(),
            "Keyboard <-> Plugboard <-> Rotor I <-> Rotor II <-> Rotor III <-> Reflector\nKey: AAA"
        );
    }

    #[test]
    fn test_new_invalid_rotor_order() {
        assert_eq!(
            Machine::new(&["I", "II", "IV"], "AAA", NO_PLUGS).unwrap_err(),
            EnigmaError::UnknownRotor("IV".to_string())
        );
        assert_eq!(
            Machine::new(&["IV"], "AAA", NO_PLUGS).unwrap_err(),
            EnigmaError::RotorCount(1)
        );
        assert_eq!(
            Machine::new(&["I", "I", "II"], "AAA", NO_PLUGS).unwrap_err(),
            EnigmaError::DuplicateRotor(crate::wiring::RotorModel::I)
        );
    }

    #[test]
    fn test_new_invalid_key() {
        let err = Machine::new(&["I", "II", "III"], "AA", NO_PLUGS).unwrap_err();
        assert_eq!(err, EnigmaError::InvalidStartPosition("AA".to_string()));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_new_links_slots_left_to_right() {
        let machine = Machine::new(&["V", "I", "III"], "ABC", NO_PLUGS).unwrap();
        assert_eq!(machine.rotor(RotorId::LEFT).window(), 'A');
        assert_eq!(machine.rotor(RotorId::MIDDLE).window(), 'B');
        assert_eq!(machine.rotor(RotorId::RIGHT).window(), 'C');
        assert_eq!(machine.rotor(RotorId::RIGHT).next(), Some(RotorId::MIDDLE));
        assert_eq!(machine.rotor(RotorId::LEFT).prev(), Some(RotorId::MIDDLE));
    }

    #[test]
    fn test_encipher_longtext() {
        let mut machine = Machine::default();
        let output = machine.encipher(&longtext());
        assert_eq!(output.len(), 1352);
        assert!(output.starts_with("BJELRQZVJWARXSNBXORSTNCFMEYYAQUSQS"));
        assert!(output.ends_with("VRBHAZGBKZGYQR"));
    }

    #[test]
    fn test_decipher_matches_encipher() {
        let mut a = Machine::default();
        let mut b = Machine::default();
        assert_eq!(a.decipher(&longtext()), b.encipher(&longtext()));
    }

    #[test]
    fn test_encode_decode_letter_swaps_lowercase() {
        let mut machine = Machine::new(&["I", "II", "III"], "AAA", ["AZ", "BQ", "RS"]).unwrap();
        assert_eq!(machine.encode_decode_letter("z").unwrap(), 'Q');
    }

    #[test]
    fn test_encode_decode_letter_swaps_uppercase() {
        let mut machine = Machine::new(&["I", "II", "III"], "AAA", ["AZ", "BQ", "RS"]).unwrap();
        assert_eq!(machine.encode_decode_letter("Z").unwrap(), 'Q');
    }

    #[test]
    fn test_encode_decode_letter_invalid() {
        for input in ["AB", "2", ""] {
            let mut machine = Machine::default();
            let err = machine.encode_decode_letter(input).unwrap_err();
            assert_eq!(err.to_string(), "Please provide a letter in a-zA-Z.");
            assert!(err.is_recoverable());
            assert_eq!(machine.key(), "AAA", "rejected input must not step");
        }
    }

    #[test]
    fn test_encode_decode_letter_steps_right_rotor() {
        let mut machine = Machine::default();
        machine.encode_decode_letter("A").unwrap();
        assert_eq!(machine.key(), "AAB");
    }

    #[test]
    fn test_same_letter_twice_differs() {
        let mut machine = Machine::default();
        let first = machine.encode_decode_letter("A").unwrap();
        let second = machine.encode_decode_letter("A").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_encipher_passes_non_letters_through() {
        let mut machine = Machine::new(&["II", "V", "I"], "AYP", ["PO", "ML", "IU", "KJ", "NH", "YT"]).unwrap();
        assert_eq!(machine.encipher("Hello, World!"), "DLXWW, IJZZM!");
        assert_eq!(machine.key(), "BAZ");
    }

    #[test]
    fn test_set_rotor_position_valid() {
        let mut machine = Machine::default();
        machine.set_rotor_position("ZZZ").unwrap();
        assert_eq!(machine.key(), "ZZZ");
        for id in RotorId::ALL {
            assert_eq!(machine.rotor(id).window(), 'Z');
        }
    }

    #[test]
    fn test_set_rotor_position_lowercase() {
        let mut machine = Machine::default();
        machine.set_rotor_position("qev").unwrap();
        assert_eq!(machine.key(), "QEV");
    }

    #[test]
    fn test_set_rotor_position_invalid() {
        let mut machine = Machine::default();
        machine.set_rotor_position("ABC").unwrap();
        for key in ["2", "AB", "ABCD", "A C"] {
            let err = machine.set_rotor_position(key).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Please provide a three letter position key such as AAA."
            );
            assert_eq!(machine.key(), "ABC");
        }
    }

    #[test]
    fn test_set_plugs_replace() {
        let mut machine = Machine::new(&["I", "II", "III"], "AAA", ["AZ", "BQ", "RS"]).unwrap();
        machine.set_plugs(["PQ", "RS"], true).unwrap();
        assert_eq!(machine.plugboard().pairs(), vec![('P', 'Q'), ('R', 'S')]);
    }

    #[test]
    fn test_set_plugs_merge_conflict_is_rejected() {
        let mut machine = Machine::new(&["I", "II", "III"], "AAA", ["AZ", "BQ", "RS"]).unwrap();
        assert!(machine.set_plugs(["PQ"], false).is_err());
        assert_eq!(machine.plugboard().len(), 3);
    }

    #[test]
    fn test_state_round_trip() {
        let mut machine = Machine::default();
        let start = machine.state();
        let cipher = machine.encipher("WETTERBERICHT");
        machine.set_state(start);
        assert_eq!(machine.decipher(&cipher), "WETTERBERICHT");
    }

    #[test]
    fn test_pure_transitions_agree_with_machine() {
        let order = RotorOrder::parse(&["V", "III", "II"]).unwrap();
        let plugboard = Plugboard::new(["AQ", "EW"]);
        let mut machine = Machine::with_order(order, MachineState::from_key("CUD").unwrap(), plugboard);
        let mut state = machine.state();
        for c in "ATTACKATDAWN".chars() {
            let p = alphabet::position_of(c).unwrap();
            state = state.advanced(&order);
            let predicted = alphabet::letter_at(state.encode(&order, &plugboard, p));
            assert_eq!(machine.encode_decode_letter(&c.to_string()).unwrap(), predicted);
            assert_eq!(machine.state(), state);
        }
    }

    #[test]
    fn test_from_config() {
        let config = MachineConfig {
            rotor_order: vec!["V".into(), "III".into(), "II".into()],
            key: "CUD".into(),
            plugs: vec!["AQ".into(), "EW".into()],
        };
        let mut machine = Machine::from_config(&config).unwrap();
        assert_eq!(machine.encipher("ATTACKATDAWN"), "XZYYDBHFTGRB");
        assert_eq!(machine.key(), "DWP");
    }

    #[test]
    fn test_from_config_invalid() {
        let config = MachineConfig {
            rotor_order: vec!["I".into(), "II".into()],
            ..MachineConfig::default()
        };
        assert_eq!(Machine::from_config(&config).unwrap_err(), EnigmaError::RotorCount(2));

        let config = MachineConfig {
            key: "A1C".into(),
            ..MachineConfig::default()
        };
        assert_eq!(
            Machine::from_config(&config).unwrap_err(),
            EnigmaError::InvalidStartPosition("A1C".to_string())
        );
    }
}
