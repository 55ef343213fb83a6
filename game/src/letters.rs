use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LETTER_COUNT: usize = 26;

/// One of the 26 selectable symbols, always stored as ASCII uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(char);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("not a letter A-Z: {0:?}")]
pub struct InvalidLetter(pub char);

/// The fixed board, A through Z.
pub const LETTERS: [Letter; LETTER_COUNT] = {
    let mut out = [Letter('A'); LETTER_COUNT];
    let mut i = 0;
    while i < LETTER_COUNT {
        out[i] = Letter((b'A' + i as u8) as char);
        i += 1;
    }
    out
};

impl Letter {
    pub fn as_char(self) -> char {
        self.0
    }

    /// Position on the board, 0 for `A`.
    pub fn index(self) -> usize {
        (self.0 as u8 - b'A') as usize
    }
}

impl TryFrom<char> for Letter {
    type Error = InvalidLetter;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        if ch.is_ascii_alphabetic() {
            Ok(Letter(ch.to_ascii_uppercase()))
        } else {
            Err(InvalidLetter(ch))
        }
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> char {
        letter.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Letters chosen in the current round. Absence means unselected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: BTreeSet<Letter>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `letter` selected. Returns `false` if it already was.
    pub fn select(&mut self, letter: Letter) -> bool {
        self.selected.insert(letter)
    }

    pub fn is_selected(&self, letter: Letter) -> bool {
        self.selected.contains(&letter)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.selected.len() == LETTER_COUNT
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}
