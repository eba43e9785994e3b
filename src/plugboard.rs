//! Plugboard: symmetric letter swaps on both sides of the rotor chain.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{info, warn};

use crate::alphabet::{self, LETTERS};
use crate::error::{EnigmaError, Result};

/// Maximum number of cables on the board.
pub const MAX_PLUG_PAIRS: usize = 6;

/// Letter mapping built from unordered letter pairs.
///
/// The mapping is always symmetric and every letter sits in at most one
/// pair. Letters without a cable map to themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plugboard {
    mapping: [u8; LETTERS as usize],
}

impl Default for Plugboard {
    fn default() -> Self {
        Plugboard {
            mapping: identity(),
        }
    }
}

impl Plugboard {
    /// Builds a plugboard from pairs such as `["AB", "cd"]`.
    ///
    /// Malformed input is not an error here: the board is left empty and a
    /// warning is logged. Use [`try_new`](Self::try_new) to get the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Plugboard;
    ///
    /// let board = Plugboard::new(["AB", "CD"]);
    /// assert_eq!(board.swap('b'), 'A');
    ///
    /// let ignored = Plugboard::new(["PQRS"]);
    /// assert!(ignored.is_empty());
    /// ```
    pub fn new<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::try_new(pairs).unwrap_or_else(|err| {
            warn!(error = %err, "ignoring plugboard configuration");
            Self::default()
        })
    }

    /// Builds a plugboard, failing on malformed or conflicting pairs.
    pub fn try_new<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mapping = build_mapping(identity(), pairs)?;
        Ok(Plugboard { mapping })
    }

    /// Replaces (`replace == true`) or extends the current swaps.
    ///
    /// The batch is applied all or nothing: on any error the previous
    /// mapping is kept.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidPlugPair`] if a pair is not two distinct letters.
    /// - [`EnigmaError::PlugConflict`] if a letter would sit in two pairs.
    /// - [`EnigmaError::TooManyPlugs`] if the board would exceed
    ///   [`MAX_PLUG_PAIRS`] pairs.
    pub fn update_swaps<I, S>(&mut self, pairs: I, replace: bool) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let base = if replace { identity() } else { self.mapping };
        match build_mapping(base, pairs) {
            Ok(mapping) => {
                self.mapping = mapping;
                info!("Plugboard successfully updated. New swaps are:\n{}", self);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "plugboard update rejected");
                Err(err)
            }
        }
    }

    /// Returns the partner of `letter`, or `letter` itself if unplugged.
    ///
    /// The result is uppercase. Non-letters are returned unchanged.
    pub fn swap(&self, letter: char) -> char {
        match alphabet::position_of(letter) {
            Some(p) => alphabet::letter_at(self.swap_position(p)),
            None => letter,
        }
    }

    /// Returns the partner of an alphabet position, taken modulo 26.
    pub fn swap_position(&self, position: u8) -> u8 {
        self.mapping[(position % LETTERS) as usize]
    }

    /// Returns the configured pairs, each ordered and sorted alphabetically.
    pub fn pairs(&self) -> Vec<(char, char)> {
        (0..LETTERS)
            .filter(|&p| self.mapping[p as usize] > p)
            .map(|p| (alphabet::letter_at(p), alphabet::letter_at(self.mapping[p as usize])))
            .collect()
    }

    /// Returns the swap of every plugged letter, in both directions.
    pub fn swaps(&self) -> BTreeMap<char, char> {
        self.pairs()
            .into_iter()
            .flat_map(|(a, b)| [(a, b), (b, a)])
            .collect()
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        pair_count(&self.mapping)
    }

    /// Returns `true` if no cable is plugged.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Plugboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .pairs()
            .into_iter()
            .map(|(a, b)| format!("{} <-> {}", a, b))
            .collect();
        f.write_str(&lines.join("\n"))
    }
}

fn identity() -> [u8; LETTERS as usize] {
    std::array::from_fn(|p| p as u8)
}

fn pair_count(mapping: &[u8; LETTERS as usize]) -> usize {
    (0..LETTERS).filter(|&p| mapping[p as usize] > p).count()
}

/// Parses one pair such as `"Ab"` into two distinct positions.
fn parse_pair(pair: &str) -> Result<(u8, u8)> {
    match alphabet::positions(pair).as_deref() {
        Some(&[a, b]) if a != b => Ok((a, b)),
        _ => Err(EnigmaError::InvalidPlugPair(pair.to_string())),
    }
}

/// Plugs every pair into a copy of `base`.
fn build_mapping<I, S>(base: [u8; LETTERS as usize], pairs: I) -> Result<[u8; LETTERS as usize]>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parsed = pairs
        .into_iter()
        .map(|pair| parse_pair(pair.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    if parsed.len() > MAX_PLUG_PAIRS {
        return Err(EnigmaError::TooManyPlugs(parsed.len()));
    }

    let mut mapping = base;
    for (a, b) in parsed {
        for p in [a, b] {
            if mapping[p as usize] != p {
                return Err(EnigmaError::PlugConflict(alphabet::letter_at(p)));
            }
        }
        mapping[a as usize] = b;
        mapping[b as usize] = a;
    }

    let total = pair_count(&mapping);
    if total > MAX_PLUG_PAIRS {
        return Err(EnigmaError::TooManyPlugs(total));
    }
    Ok(mapping)
}
