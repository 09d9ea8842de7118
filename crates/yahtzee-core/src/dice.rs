use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const NUM_DICE: usize = 5;
pub const MAX_ROLLS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    pub value: u8,
    pub locked: bool,
}

impl Die {
    pub fn new() -> Self {
        Self {
            value: 1,
            locked: false,
        }
    }

    pub fn roll(&mut self, rng: &mut impl Rng) {
        if !self.locked {
            self.value = rng.gen_range(1..=6);
        }
    }
}

impl Default for Die {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSet {
    pub dice: [Die; NUM_DICE],
}

impl DiceSet {
    pub fn new() -> Self {
        Self {
            dice: [Die::new(); NUM_DICE],
        }
    }

    /// Build an unlocked set from raw values, rejecting anything outside `1..=6`.
    pub fn from_values(values: [u8; NUM_DICE]) -> Result<Self, GameError> {
        if let Some(&bad) = values.iter().find(|v| !(1..=6).contains(*v)) {
            return Err(GameError::OutOfRange {
                what: "dice value",
                value: bad as usize,
            });
        }
        Ok(Self {
            dice: values.map(|value| Die {
                value,
                locked: false,
            }),
        })
    }

    pub fn roll_unlocked(&mut self, rng: &mut impl Rng) {
        for die in &mut self.dice {
            die.roll(rng);
        }
    }

    /// Flip the lock on one die and return its new state.
    pub fn toggle_lock(&mut self, index: usize) -> Result<bool, GameError> {
        let die = self.dice.get_mut(index).ok_or(GameError::OutOfRange {
            what: "dice index",
            value: index,
        })?;
        die.locked = !die.locked;
        Ok(die.locked)
    }

    pub fn release_all(&mut self) {
        for die in &mut self.dice {
            die.locked = false;
        }
    }

    pub fn values(&self) -> [u8; NUM_DICE] {
        self.dice.map(|d| d.value)
    }

    pub fn locks(&self) -> [bool; NUM_DICE] {
        self.dice.map(|d| d.locked)
    }
}

impl Default for DiceSet {
    fn default() -> Self {
        Self::new()
    }
}
