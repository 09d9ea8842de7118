use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dice::{DiceSet, MAX_ROLLS, NUM_DICE};
use crate::error::{GameError, Refusal};
use crate::player::ScoreSheet;
use crate::scoring::{self, Category};

pub const TOTAL_ROUNDS: u8 = 13;
pub const MAX_PLAYERS: usize = 2;

// -- Turn phases --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingRoll,
    Rolled { rolls_used: u8 },
    SelectionPending(Selection),
    Finished,
}

/// A category chosen for the current player together with the score it would bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub category: Category,
    pub score: u16,
}

/// Result of a successful [`GameState::commit_score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub player: usize,
    pub category: Category,
    pub score: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(usize),
    Draw,
}

// -- Game State Machine --

#[derive(Debug, Clone)]
pub struct GameState {
    players: Vec<ScoreSheet>,
    current_player: usize,
    round: u8,
    rolls_used: u8,
    dice: DiceSet,
    pending: Option<Selection>,
    fast_dice: bool,
}

impl GameState {
    pub fn new(num_players: usize, fast_dice: bool) -> Result<Self, GameError> {
        check_player_count(num_players)?;
        Ok(Self {
            players: vec![ScoreSheet::new(); num_players],
            current_player: 0,
            round: 0,
            rolls_used: 0,
            dice: DiceSet::new(),
            pending: None,
            fast_dice,
        })
    }

    /// Rebuild a game from a snapshot.
    ///
    /// Round and current player are not stored; they follow from how many
    /// categories each sheet has filled. Players ahead of the current one in
    /// turn order have filled exactly one more category than the rest.
    /// Every stored score must be one the dice could have produced, and the
    /// bonus and joker flags are recomputed from the scores.
    pub fn restore(snapshot: GameSnapshot, fast_dice: bool) -> Result<Self, GameError> {
        let GameSnapshot {
            dice,
            rolls_used,
            mut players,
        } = snapshot;
        check_player_count(players.len())?;
        if rolls_used > MAX_ROLLS {
            return Err(GameError::OutOfRange {
                what: "roll count",
                value: rolls_used as usize,
            });
        }
        let dice = DiceSet::from_values(dice)?;
        for sheet in &players {
            sheet.validate()?;
        }

        let counts: Vec<usize> = players.iter().map(ScoreSheet::filled_count).collect();
        let round = counts.iter().copied().min().unwrap_or(0);
        let current_player = counts.iter().position(|&c| c == round).unwrap_or(0);
        for (index, &count) in counts.iter().enumerate() {
            let expected = if index < current_player { round + 1 } else { round };
            if count != expected {
                return Err(GameError::OutOfRange {
                    what: "filled categories",
                    value: count,
                });
            }
        }
        for sheet in &mut players {
            sheet.refresh_flags();
        }

        tracing::debug!(
            "Restored game: round {} player {} rolls {}",
            round,
            current_player,
            rolls_used
        );
        Ok(Self {
            players,
            current_player,
            round: round as u8,
            rolls_used,
            dice,
            pending: None,
            fast_dice,
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            dice: self.dice.values(),
            rolls_used: self.rolls_used,
            players: self.players.clone(),
        }
    }

    /// Start over with the same number of players.
    pub fn reset(&mut self) {
        for sheet in &mut self.players {
            *sheet = ScoreSheet::new();
        }
        self.current_player = 0;
        self.round = 0;
        self.rolls_used = 0;
        self.dice = DiceSet::new();
        self.pending = None;
    }

    pub fn phase(&self) -> TurnPhase {
        if self.is_finished() {
            TurnPhase::Finished
        } else if let Some(selection) = self.pending {
            TurnPhase::SelectionPending(selection)
        } else if self.rolls_used == 0 {
            TurnPhase::AwaitingRoll
        } else {
            TurnPhase::Rolled {
                rolls_used: self.rolls_used,
            }
        }
    }

    pub fn can_roll(&self) -> bool {
        !self.is_finished() && self.rolls_used < MAX_ROLLS
    }

    /// Reroll every unlocked die.
    ///
    /// Any pending selection is dropped since its score belongs to the
    /// previous dice; the category has to be selected again before
    /// [`GameState::commit_score`] will bank anything.
    pub fn roll(&mut self, rng: &mut impl Rng) -> Result<[u8; NUM_DICE], GameError> {
        if self.is_finished() {
            return Err(Refusal::GameFinished.into());
        }
        if self.rolls_used >= MAX_ROLLS {
            return Err(Refusal::RollsExhausted.into());
        }
        self.dice.roll_unlocked(rng);
        self.rolls_used += 1;
        self.pending = None;
        let values = self.dice.values();
        tracing::debug!(
            "Player {} roll {}: {:?}",
            self.current_player,
            self.rolls_used,
            values
        );
        Ok(values)
    }

    pub fn toggle_lock(&mut self, index: usize) -> Result<bool, GameError> {
        self.toggle_locks(&[index]).map(|locks| locks[index])
    }

    /// Toggle several dice at once. Nothing changes unless every index is
    /// valid; returns the lock state of all dice afterwards.
    pub fn toggle_locks(&mut self, indices: &[usize]) -> Result<[bool; NUM_DICE], GameError> {
        if let Some(&index) = indices.iter().find(|&&i| i >= NUM_DICE) {
            return Err(GameError::OutOfRange {
                what: "dice index",
                value: index,
            });
        }
        if self.is_finished() {
            return Err(Refusal::GameFinished.into());
        }
        if self.rolls_used == 0 {
            return Err(Refusal::NotRolled.into());
        }
        for &index in indices {
            self.dice.toggle_lock(index)?;
        }
        Ok(self.dice.locks())
    }

    /// Choose a category for the current player without banking it yet.
    pub fn select_category(&mut self, category: Category) -> Result<u16, GameError> {
        if self.is_finished() {
            return Err(Refusal::GameFinished.into());
        }
        if self.rolls_used == 0 {
            return Err(Refusal::NotRolled.into());
        }
        let sheet = self.current_sheet();
        if sheet.is_filled(category) {
            return Err(GameError::DuplicateCategory(category));
        }
        let score = scoring::compute_score(category, &self.dice.values(), sheet.joker_active);
        self.pending = Some(Selection { category, score });
        Ok(score)
    }

    pub fn commit_score(&mut self) -> Result<Commit, GameError> {
        let selection = self.pending.ok_or(Refusal::NoSelection)?;
        let player = self.current_player;
        let sheet = &mut self.players[player];
        sheet.record(selection.category, selection.score)?;
        sheet.calculate_bonus();

        self.rolls_used = 0;
        self.dice.release_all();
        self.pending = None;
        self.advance_turn();

        tracing::debug!(
            "Player {} banked {} in {:?}",
            player,
            selection.score,
            selection.category
        );
        if self.is_finished() {
            tracing::debug!("Game finished with totals {:?}", self.totals());
        }
        Ok(Commit {
            player,
            category: selection.category,
            score: selection.score,
        })
    }

    fn advance_turn(&mut self) {
        if self.current_player == self.players.len() - 1 {
            self.current_player = 0;
            self.round += 1;
        } else {
            self.current_player += 1;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.round >= TOTAL_ROUNDS
    }

    /// `None` while the game is running and for solo games.
    pub fn winner(&self) -> Option<Outcome> {
        if !self.is_finished() || self.players.len() < 2 {
            return None;
        }
        let totals = self.totals();
        let best = totals.iter().copied().max()?;
        let mut leaders = totals.iter().enumerate().filter(|&(_, &t)| t == best);
        match (leaders.next(), leaders.next()) {
            (Some((index, _)), None) => Some(Outcome::Winner(index)),
            _ => Some(Outcome::Draw),
        }
    }

    pub fn totals(&self) -> Vec<u16> {
        self.players.iter().map(ScoreSheet::total).collect()
    }

    /// Scores the current player could bank with the current dice, `None`
    /// for filled categories or before the first roll.
    pub fn preview(&self) -> [Option<u16>; 13] {
        let sheet = self.current_sheet();
        let rolled = self.rolls_used > 0 && !self.is_finished();
        let scores = scoring::score_all(&self.dice.values(), sheet.joker_active);
        Category::ALL.map(|category| {
            (rolled && !sheet.is_filled(category)).then(|| scores[category.index()])
        })
    }

    pub fn sheet(&self, index: usize) -> Result<&ScoreSheet, GameError> {
        self.players.get(index).ok_or(GameError::OutOfRange {
            what: "player index",
            value: index,
        })
    }

    pub fn current_sheet(&self) -> &ScoreSheet {
        &self.players[self.current_player]
    }

    pub fn players(&self) -> &[ScoreSheet] {
        &self.players
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn rolls_used(&self) -> u8 {
        self.rolls_used
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    pub fn pending(&self) -> Option<Selection> {
        self.pending
    }

    pub fn fast_dice(&self) -> bool {
        self.fast_dice
    }
}

fn check_player_count(count: usize) -> Result<(), GameError> {
    if (1..=MAX_PLAYERS).contains(&count) {
        Ok(())
    } else {
        Err(GameError::OutOfRange {
            what: "player count",
            value: count,
        })
    }
}

// -- Snapshot (persisted between sessions) --

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub dice: [u8; NUM_DICE],
    pub rolls_used: u8,
    pub players: Vec<ScoreSheet>,
}
