//! Rotor: a wired wheel with a rotating offset.
//!
//! The three wheels of a machine are stored in a [`RotorBank`] and refer to
//! their mechanical neighbours by [`RotorId`]. A rotor never owns another
//! rotor; the links only say where the signal goes next and which wheel is
//! carried on turnover.

use std::fmt;

use tracing::trace;

use crate::alphabet;
use crate::error::{EnigmaError, Result};
use crate::wiring::{RotorModel, RotorWiring};

/// Number of rotor slots in a machine.
pub const ROTOR_SLOTS: usize = 3;

/// Index of a rotor slot within a [`RotorBank`].
///
/// Only the three slot constants exist outside the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotorId(pub(crate) usize);

impl RotorId {
    /// Leftmost, slowest wheel.
    pub const LEFT: RotorId = RotorId(0);
    /// Middle wheel.
    pub const MIDDLE: RotorId = RotorId(1);
    /// Rightmost wheel, stepped on every keystroke.
    pub const RIGHT: RotorId = RotorId(2);

    /// All slots, left to right.
    pub const ALL: [RotorId; ROTOR_SLOTS] = [RotorId::LEFT, RotorId::MIDDLE, RotorId::RIGHT];

    /// Returns the slot index (0 is the left wheel).
    pub fn index(self) -> usize {
        self.0
    }
}

/// Direction of current through the wheels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Keyboard towards the reflector (right to left).
    Forward,
    /// Reflector back towards the lamps (left to right).
    Backward,
}

/// A single wheel sitting in one slot of the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    model: RotorModel,
    offset: u8,
    next: Option<RotorId>,
    prev: Option<RotorId>,
}

impl Rotor {
    /// Creates a rotor of `model` showing `start_letter` in its window.
    ///
    /// The rotor is unlinked; [`RotorBank`] wires neighbours on assembly.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidStartPosition`] if `start_letter` is not
    /// a letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{Rotor, RotorModel};
    ///
    /// let rotor = Rotor::new(RotorModel::I, 'c').unwrap();
    /// assert_eq!(rotor.window(), 'C');
    /// assert_eq!(rotor.offset(), 2);
    /// ```
    pub fn new(model: RotorModel, start_letter: char) -> Result<Self> {
        let offset = alphabet::position_of(start_letter)
            .ok_or_else(|| EnigmaError::InvalidStartPosition(start_letter.to_string()))?;
        Ok(Self::at(model, offset))
    }

    /// Creates an unlinked rotor at a raw offset (taken modulo 26).
    pub(crate) fn at(model: RotorModel, offset: u8) -> Self {
        Rotor {
            model,
            offset: offset % alphabet::LETTERS,
            next: None,
            prev: None,
        }
    }

    /// Returns the rotor model.
    pub fn model(&self) -> RotorModel {
        self.model
    }

    /// Returns the wiring of the rotor model.
    pub fn wiring(&self) -> RotorWiring {
        self.model.wiring()
    }

    /// Returns the current rotational displacement (0..25).
    pub fn offset(&self) -> u8 {
        self.offset
    }

    /// Returns the letter visible in the window.
    pub fn window(&self) -> char {
        alphabet::letter_at(self.offset)
    }

    /// Returns the notch letter of the rotor model.
    pub fn notch(&self) -> char {
        self.model.notch()
    }

    /// Returns the neighbour carried on turnover and fed going forward.
    pub fn next(&self) -> Option<RotorId> {
        self.next
    }

    /// Returns the neighbour fed going backward.
    pub fn prev(&self) -> Option<RotorId> {
        self.prev
    }

    /// Returns `true` if the window shows the notch letter.
    pub fn at_notch(&self) -> bool {
        self.offset == self.model.notch_position()
    }

    /// Turns the wheel by one position without carrying any neighbour.
    pub(crate) fn advance(&mut self) {
        self.offset = alphabet::add(self.offset, 1);
    }

    /// Resets the window to `letter`. Model and links are kept.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidPositionKey`] if `letter` is not a letter;
    /// the rotor is left unchanged.
    pub fn change_setting(&mut self, letter: char) -> Result<()> {
        self.offset = alphabet::position_of(letter)
            .ok_or_else(|| EnigmaError::InvalidPositionKey(letter.to_string()))?;
        Ok(())
    }

    /// Substitutes an alphabet position (taken modulo 26) through this wheel
    /// alone.
    ///
    /// The entry contact is `position + offset`; after the table lookup the
    /// offset is taken off again so the result is relative to the housing.
    pub fn substitute(&self, position: u8, direction: Direction) -> u8 {
        let contact = alphabet::add(position, self.offset);
        let wiring = self.wiring();
        let wired = match direction {
            Direction::Forward => wiring.forward_position(contact),
            Direction::Backward => wiring.backward_position(contact),
        };
        trace!(
            "Rotor {}: input = {}, output = {}",
            self.model,
            alphabet::letter_at(contact),
            alphabet::letter_at(wired)
        );
        alphabet::sub(wired, self.offset)
    }

    /// Substitutes a letter (any case) through this wheel alone.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidLetter`] if `letter` is not a letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{Direction, Rotor, RotorModel};
    ///
    /// let rotor = Rotor::new(RotorModel::I, 'A').unwrap();
    /// assert_eq!(rotor.encode_letter('X', Direction::Forward).unwrap(), 17);
    /// ```
    pub fn encode_letter(&self, letter: char, direction: Direction) -> Result<u8> {
        let position = alphabet::position_of(letter)
            .ok_or_else(|| EnigmaError::InvalidLetter(letter.to_string()))?;
        Ok(self.substitute(position, direction))
    }

    /// Returns the neighbour the signal reaches after this wheel.
    fn downstream(&self, direction: Direction) -> Option<RotorId> {
        match direction {
            Direction::Forward => self.next,
            Direction::Backward => self.prev,
        }
    }
}

impl fmt::Display for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rotor {}\nWiring:\n{}\nWindow: {}",
            self.model,
            self.wiring(),
            self.window()
        )
    }
}

/// Fixed three-slot arena holding the wheels of one machine.
///
/// Slot 0 is the left wheel, slot 2 the right wheel. Each wheel's `next`
/// points one slot to the left and `prev` one slot to the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RotorBank {
    rotors: [Rotor; ROTOR_SLOTS],
}

impl RotorBank {
    /// Builds the bank for `models` (left to right) at `offsets` and links
    /// neighbouring slots.
    pub(crate) fn assemble(models: [RotorModel; ROTOR_SLOTS], offsets: [u8; ROTOR_SLOTS]) -> Self {
        let mut rotors = [
            Rotor::at(models[0], offsets[0]),
            Rotor::at(models[1], offsets[1]),
            Rotor::at(models[2], offsets[2]),
        ];
        for (i, rotor) in rotors.iter_mut().enumerate() {
            rotor.next = i.checked_sub(1).map(RotorId);
            rotor.prev = (i + 1 < ROTOR_SLOTS).then_some(RotorId(i + 1));
        }
        RotorBank { rotors }
    }

    /// Returns the rotor in slot `id`.
    pub(crate) fn get(&self, id: RotorId) -> &Rotor {
        &self.rotors[id.0]
    }

    /// Returns the rotor in slot `id` mutably.
    pub(crate) fn get_mut(&mut self, id: RotorId) -> &mut Rotor {
        &mut self.rotors[id.0]
    }

    /// Returns the offsets of all slots, left to right.
    pub(crate) fn offsets(&self) -> [u8; ROTOR_SLOTS] {
        [
            self.rotors[0].offset,
            self.rotors[1].offset,
            self.rotors[2].offset,
        ]
    }

    /// Overwrites the offsets of all slots, left to right.
    pub(crate) fn set_offsets(&mut self, offsets: [u8; ROTOR_SLOTS]) {
        for (rotor, offset) in self.rotors.iter_mut().zip(offsets) {
            rotor.offset = offset % alphabet::LETTERS;
        }
    }

    /// Steps the wheel in slot `id`, carrying neighbours as needed.
    ///
    /// A wheel carries its `next` neighbour when it was at its own notch
    /// before turning. It also carries a `next` neighbour that is a middle
    /// wheel parked at its notch (the double-step anomaly). Each neighbour
    /// moves at most once.
    pub(crate) fn step(&mut self, id: RotorId) {
        let mut current = Some(id);
        while let Some(id) = current {
            let rotor = &self.rotors[id.0];
            let turnover = rotor.at_notch();
            current = rotor
                .next
                .filter(|&next| turnover || self.parked_middle(next));
            self.rotors[id.0].advance();
        }
    }

    /// Passes `position` through all wheels in `direction`.
    pub(crate) fn encode(&self, position: u8, direction: Direction) -> u8 {
        let mut signal = position;
        let mut current = Some(Self::entry(direction));
        while let Some(id) = current {
            let rotor = &self.rotors[id.0];
            signal = rotor.substitute(signal, direction);
            current = rotor.downstream(direction);
        }
        signal
    }

    /// Returns `true` if `id` has a neighbour of its own and sits at its notch.
    fn parked_middle(&self, id: RotorId) -> bool {
        let rotor = &self.rotors[id.0];
        rotor.next.is_some() && rotor.at_notch()
    }

    /// First wheel the signal meets in `direction`.
    fn entry(direction: Direction) -> RotorId {
        match direction {
            Direction::Forward => RotorId::RIGHT,
            Direction::Backward => RotorId::LEFT,
        }
    }
}
