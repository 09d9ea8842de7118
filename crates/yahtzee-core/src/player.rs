use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::GameError;
use crate::scoring::{
    Category, FULL_HOUSE_VALUE, LARGE_STRAIGHT_VALUE, SMALL_STRAIGHT_VALUE,
    UPPER_BONUS_THRESHOLD, UPPER_BONUS_VALUE, YAHTZEE_VALUE,
};

/// One player's scores for the current game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub scores: HashMap<Category, u16>,
    pub bonus_reached: bool,
    /// Set once a 50-point Yahtzee is banked; makes the next five of a kind
    /// worth 50 in any category.
    pub joker_active: bool,
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_filled(&self, category: Category) -> bool {
        self.scores.contains_key(&category)
    }

    pub fn score(&self, category: Category) -> Option<u16> {
        self.scores.get(&category).copied()
    }

    pub fn record(&mut self, category: Category, value: u16) -> Result<(), GameError> {
        if self.is_filled(category) {
            return Err(GameError::DuplicateCategory(category));
        }
        if value == YAHTZEE_VALUE {
            // A 50 outside the Yahtzee box can only come from the joker, which spends it.
            self.joker_active = category == Category::Yahtzee;
        }
        self.scores.insert(category, value);
        Ok(())
    }

    /// Check that every filled value is one the dice could have produced.
    ///
    /// A 50 outside the Yahtzee box is a spent joker: it needs a banked
    /// 50-point Yahtzee and can appear at most once.
    pub fn validate(&self) -> Result<(), GameError> {
        let yahtzee_banked = self.score(Category::Yahtzee) == Some(YAHTZEE_VALUE);
        let mut jokers_spent = 0;
        for (&category, &value) in &self.scores {
            if category != Category::Yahtzee && value == YAHTZEE_VALUE {
                jokers_spent += 1;
                if yahtzee_banked && jokers_spent == 1 {
                    continue;
                }
            }
            if !is_possible(category, value) {
                return Err(GameError::OutOfRange {
                    what: "score",
                    value: value as usize,
                });
            }
        }
        Ok(())
    }

    /// Recompute the bonus and joker flags from the scores alone.
    pub fn refresh_flags(&mut self) {
        self.calculate_bonus();
        self.joker_active = self.score(Category::Yahtzee) == Some(YAHTZEE_VALUE)
            && !self
                .scores
                .iter()
                .any(|(&c, &v)| c != Category::Yahtzee && v == YAHTZEE_VALUE);
    }

    /// Re-evaluate the upper-section bonus and return whether it is reached.
    pub fn calculate_bonus(&mut self) -> bool {
        self.bonus_reached = self.upper_subtotal() >= UPPER_BONUS_THRESHOLD;
        self.bonus_reached
    }

    pub fn upper_subtotal(&self) -> u16 {
        Category::UPPER
            .iter()
            .filter_map(|c| self.scores.get(c))
            .fold(0u16, |acc, &v| acc.saturating_add(v))
    }

    pub fn bonus(&self) -> u16 {
        if self.bonus_reached {
            UPPER_BONUS_VALUE
        } else {
            0
        }
    }

    pub fn total(&self) -> u16 {
        self.scores
            .values()
            .fold(self.bonus(), |acc, &v| acc.saturating_add(v))
    }

    pub fn filled_count(&self) -> usize {
        self.scores.len()
    }

    pub fn is_complete(&self) -> bool {
        self.scores.len() == Category::ALL.len()
    }

    pub fn available_categories(&self) -> Vec<Category> {
        Category::ALL
            .iter()
            .filter(|c| !self.is_filled(**c))
            .copied()
            .collect()
    }
}

fn is_possible(category: Category, value: u16) -> bool {
    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => category
            .face()
            .is_some_and(|face| value % face as u16 == 0 && value <= 5 * face as u16),
        Category::ThreeOfAKind | Category::FourOfAKind => value == 0 || (5..=30).contains(&value),
        Category::Chance => (5..=30).contains(&value),
        Category::FullHouse => value == 0 || value == FULL_HOUSE_VALUE,
        Category::SmallStraight => value == 0 || value == SMALL_STRAIGHT_VALUE,
        Category::LargeStraight => value == 0 || value == LARGE_STRAIGHT_VALUE,
        Category::Yahtzee => value == 0 || value == YAHTZEE_VALUE,
    }
}
