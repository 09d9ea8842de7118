use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    // Upper section
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    // Lower section
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    pub const UPPER: [Category; 6] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    pub fn from_index(index: usize) -> Result<Category, GameError> {
        Category::ALL
            .get(index)
            .copied()
            .ok_or(GameError::OutOfRange {
                what: "category index",
                value: index,
            })
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_upper(&self) -> bool {
        self.face().is_some()
    }

    /// Die face counted by an upper-section category.
    pub fn face(&self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }
}

pub const UPPER_BONUS_THRESHOLD: u16 = 63;
pub const UPPER_BONUS_VALUE: u16 = 35;
pub const FULL_HOUSE_VALUE: u16 = 25;
pub const SMALL_STRAIGHT_VALUE: u16 = 30;
pub const LARGE_STRAIGHT_VALUE: u16 = 40;
pub const YAHTZEE_VALUE: u16 = 50;

/// Compute the score for a given category and dice values.
///
/// Dice must be in `1..=6`. When `joker_active` is set and all five dice match,
/// every category is worth [`YAHTZEE_VALUE`].
pub fn compute_score(category: Category, dice: &[u8; 5], joker_active: bool) -> u16 {
    if joker_active && is_yahtzee(dice) {
        return YAHTZEE_VALUE;
    }
    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => category.face().map_or(0, |face| count_value(dice, face)),
        Category::ThreeOfAKind => {
            if distinct(dice) <= 3 && has_n_of_a_kind(dice, 3) {
                sum(dice)
            } else {
                0
            }
        }
        Category::FourOfAKind => {
            if distinct(dice) <= 2 && has_n_of_a_kind(dice, 4) {
                sum(dice)
            } else {
                0
            }
        }
        Category::FullHouse => {
            if is_full_house(dice) {
                FULL_HOUSE_VALUE
            } else {
                0
            }
        }
        Category::SmallStraight => {
            if has_small_straight(dice) {
                SMALL_STRAIGHT_VALUE
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if has_large_straight(dice) {
                LARGE_STRAIGHT_VALUE
            } else {
                0
            }
        }
        Category::Yahtzee => {
            if is_yahtzee(dice) {
                YAHTZEE_VALUE
            } else {
                0
            }
        }
        Category::Chance => sum(dice),
    }
}

/// Scores for every category, in [`Category::ALL`] order.
pub fn score_all(dice: &[u8; 5], joker_active: bool) -> [u16; 13] {
    Category::ALL.map(|category| compute_score(category, dice, joker_active))
}

fn count_value(dice: &[u8; 5], val: u8) -> u16 {
    dice.iter().filter(|&&d| d == val).count() as u16 * val as u16
}

fn sum(dice: &[u8; 5]) -> u16 {
    dice.iter().map(|&d| d as u16).sum()
}

fn value_counts(dice: &[u8; 5]) -> [u8; 7] {
    let mut counts = [0u8; 7]; // index 0 unused, 1..=6
    for &d in dice {
        counts[d as usize] += 1;
    }
    counts
}

fn distinct(dice: &[u8; 5]) -> usize {
    value_counts(dice).iter().filter(|&&c| c > 0).count()
}

fn contains(dice: &[u8; 5], val: u8) -> bool {
    dice.contains(&val)
}

fn has_n_of_a_kind(dice: &[u8; 5], n: u8) -> bool {
    value_counts(dice).iter().any(|&c| c >= n)
}

// Dice equal to the first die versus the rest: the rest must be a single
// value and both groups need at least two dice.
fn is_full_house(dice: &[u8; 5]) -> bool {
    let first = dice[0];
    let same = dice.iter().filter(|&&d| d == first).count();
    let rest: Vec<u8> = dice.iter().copied().filter(|&d| d != first).collect();
    let rest_uniform = rest.first().is_some_and(|&r| rest.iter().all(|&d| d == r));
    rest_uniform && same >= 2 && rest.len() >= 2
}

fn has_small_straight(dice: &[u8; 5]) -> bool {
    if distinct(dice) < 4 || !(contains(dice, 3) && contains(dice, 4)) {
        return false;
    }
    if contains(dice, 2) {
        contains(dice, 1) || contains(dice, 5)
    } else {
        contains(dice, 5) && contains(dice, 6)
    }
}

fn has_large_straight(dice: &[u8; 5]) -> bool {
    let total = sum(dice);
    distinct(dice) == 5 && (total == 15 || total == 20)
}

fn is_yahtzee(dice: &[u8; 5]) -> bool {
    distinct(dice) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(category: Category, dice: [u8; 5]) -> u16 {
        compute_score(category, &dice, false)
    }

    // Upper section tests
    #[test]
    fn test_ones() {
        assert_eq!(score(Category::Ones, [1, 1, 3, 4, 5]), 2);
        assert_eq!(score(Category::Ones, [2, 3, 4, 5, 6]), 0);
        assert_eq!(score(Category::Ones, [1, 1, 1, 1, 1]), 5);
    }

    #[test]
    fn test_threes_and_sixes() {
        assert_eq!(score(Category::Threes, [3, 3, 3, 4, 5]), 9);
        assert_eq!(score(Category::Sixes, [6, 6, 1, 2, 3]), 12);
        assert_eq!(score(Category::Fives, [5, 5, 5, 5, 5]), 25);
    }

    // Lower section tests
    #[test]
    fn test_three_of_a_kind() {
        assert_eq!(score(Category::ThreeOfAKind, [3, 3, 3, 4, 5]), 18);
        assert_eq!(score(Category::ThreeOfAKind, [1, 2, 3, 4, 5]), 0);
        assert_eq!(score(Category::ThreeOfAKind, [2, 2, 4, 4, 6]), 0);
        // Four of a kind also counts as three of a kind
        assert_eq!(score(Category::ThreeOfAKind, [3, 3, 3, 3, 5]), 17);
    }

    #[test]
    fn test_four_of_a_kind() {
        assert_eq!(score(Category::FourOfAKind, [3, 3, 3, 3, 5]), 17);
        assert_eq!(score(Category::FourOfAKind, [3, 3, 3, 5, 5]), 0);
        assert_eq!(score(Category::FourOfAKind, [3, 3, 3, 4, 5]), 0);
        assert_eq!(score(Category::FourOfAKind, [6, 6, 6, 6, 6]), 30);
    }

    #[test]
    fn test_full_house() {
        assert_eq!(score(Category::FullHouse, [1, 1, 1, 2, 2]), 25);
        assert_eq!(score(Category::FullHouse, [2, 1, 1, 2, 1]), 25);
        assert_eq!(score(Category::FullHouse, [1, 1, 1, 1, 2]), 0);
        assert_eq!(score(Category::FullHouse, [1, 1, 2, 2, 3]), 0);
        // Five of a kind has no second group
        assert_eq!(score(Category::FullHouse, [3, 3, 3, 3, 3]), 0);
    }

    #[test]
    fn test_small_straight() {
        assert_eq!(score(Category::SmallStraight, [1, 2, 3, 4, 6]), 30);
        assert_eq!(score(Category::SmallStraight, [2, 3, 4, 5, 1]), 30);
        assert_eq!(score(Category::SmallStraight, [3, 4, 5, 6, 1]), 30);
        assert_eq!(score(Category::SmallStraight, [6, 5, 4, 3, 3]), 30);
        assert_eq!(score(Category::SmallStraight, [1, 2, 3, 5, 6]), 0);
        assert_eq!(score(Category::SmallStraight, [2, 3, 4, 6, 6]), 0);
        assert_eq!(score(Category::SmallStraight, [1, 2, 3, 4, 5]), 30);
        assert_eq!(score(Category::SmallStraight, [1, 2, 3, 4, 4]), 30);
    }

    #[test]
    fn test_large_straight() {
        assert_eq!(score(Category::LargeStraight, [1, 2, 3, 4, 5]), 40);
        assert_eq!(score(Category::LargeStraight, [2, 3, 4, 5, 6]), 40);
        assert_eq!(score(Category::LargeStraight, [6, 4, 2, 5, 3]), 40);
        assert_eq!(score(Category::LargeStraight, [1, 2, 3, 4, 4]), 0);
        assert_eq!(score(Category::LargeStraight, [1, 2, 3, 4, 6]), 0);
    }

    #[test]
    fn test_yahtzee_iff_all_equal() {
        for a in 1..=6u8 {
            for b in 1..=6u8 {
                let dice = [a, a, a, a, b];
                let expected = if a == b { 50 } else { 0 };
                assert_eq!(score(Category::Yahtzee, dice), expected);
            }
        }
        assert_eq!(score(Category::Yahtzee, [5, 4, 5, 5, 5]), 0);
    }

    #[test]
    fn test_chance_is_sum() {
        assert_eq!(score(Category::Chance, [1, 2, 3, 4, 5]), 15);
        assert_eq!(compute_score(Category::Chance, &[6, 5, 6, 1, 2], true), 20);
        assert_eq!(score(Category::Chance, [6, 6, 6, 6, 6]), 30);
    }

    #[test]
    fn test_joker_overrides_any_category() {
        let dice = [4, 4, 4, 4, 4];
        for category in Category::ALL {
            assert_eq!(compute_score(category, &dice, true), 50);
        }
        assert_eq!(compute_score(Category::Chance, &dice, false), 20);
        // Without five of a kind the joker changes nothing
        assert_eq!(compute_score(Category::Chance, &[4, 4, 4, 4, 3], true), 19);
    }

    #[test]
    fn test_score_all_order() {
        let scores = score_all(&[2, 3, 4, 5, 6], false);
        assert_eq!(scores[Category::Twos.index()], 2);
        assert_eq!(scores[Category::SmallStraight.index()], 30);
        assert_eq!(scores[Category::LargeStraight.index()], 40);
        assert_eq!(scores[Category::Chance.index()], 20);
    }

    #[test]
    fn test_category_from_index() {
        assert_eq!(Category::from_index(0).unwrap(), Category::Ones);
        assert_eq!(Category::from_index(12).unwrap(), Category::Chance);
        assert!(matches!(
            Category::from_index(13),
            Err(GameError::OutOfRange { value: 13, .. })
        ));
    }

    #[test]
    fn test_category_is_upper() {
        assert!(Category::Ones.is_upper());
        assert!(Category::Sixes.is_upper());
        assert!(!Category::ThreeOfAKind.is_upper());
        assert!(!Category::Yahtzee.is_upper());
    }
}
