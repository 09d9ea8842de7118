use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::GameState;

/// Final scores of one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: Uuid,
    pub finished_at: DateTime<Utc>,
    pub player1_score: u16,
    pub player2_score: Option<u16>,
}

impl GameRecord {
    /// `None` unless the game has finished.
    pub fn from_game(game: &GameState, finished_at: DateTime<Utc>) -> Option<Self> {
        if !game.is_finished() {
            return None;
        }
        let totals = game.totals();
        Some(Self {
            id: Uuid::new_v4(),
            finished_at,
            player1_score: totals.first().copied().unwrap_or(0),
            player2_score: totals.get(1).copied(),
        })
    }

    pub fn is_solo(&self) -> bool {
        self.player2_score.is_none()
    }

    pub fn best_score(&self) -> u16 {
        self.player1_score.max(self.player2_score.unwrap_or(0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    pub records: Vec<GameRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: GameRecord) {
        self.records.push(record);
    }

    pub fn newest_first(&self) -> Vec<&GameRecord> {
        let mut records: Vec<&GameRecord> = self.records.iter().collect();
        records.sort_by(|a, b| b.finished_at.cmp(&a.finished_at));
        records
    }

    pub fn best_score(&self) -> Option<u16> {
        self.records.iter().map(GameRecord::best_score).max()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameSnapshot;
    use crate::player::ScoreSheet;
    use crate::scoring::Category;
    use chrono::TimeZone;

    /// Finished game where each player's total is their Chance score.
    fn finished_game(chances: &[u16]) -> GameState {
        let players = chances
            .iter()
            .map(|&chance| {
                let mut sheet = ScoreSheet::new();
                for cat in Category::ALL {
                    let value = if cat == Category::Chance { chance } else { 0 };
                    sheet.record(cat, value).unwrap();
                }
                sheet
            })
            .collect();
        let snapshot = GameSnapshot {
            dice: [1, 1, 1, 1, 1],
            rolls_used: 0,
            players,
        };
        GameState::restore(snapshot, false).unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_record_requires_finished_game() {
        let game = GameState::new(1, false).unwrap();
        assert!(GameRecord::from_game(&game, at(0)).is_none());
    }

    #[test]
    fn test_record_from_two_player_game() {
        let game = finished_game(&[26, 29]);
        let record = GameRecord::from_game(&game, at(10)).unwrap();
        assert_eq!(record.player1_score, 26);
        assert_eq!(record.player2_score, Some(29));
        assert!(!record.is_solo());
        assert_eq!(record.best_score(), 29);
    }

    #[test]
    fn test_record_from_solo_game() {
        let game = finished_game(&[17]);
        let record = GameRecord::from_game(&game, at(10)).unwrap();
        assert_eq!(record.player1_score, 17);
        assert!(record.is_solo());
    }

    #[test]
    fn test_history_ordering_and_best() {
        let mut history = History::new();
        assert_eq!(history.best_score(), None);
        history.push(GameRecord::from_game(&finished_game(&[10]), at(100)).unwrap());
        history.push(GameRecord::from_game(&finished_game(&[25, 12]), at(300)).unwrap());
        history.push(GameRecord::from_game(&finished_game(&[18]), at(200)).unwrap());

        let newest: Vec<u16> = history
            .newest_first()
            .iter()
            .map(|r| r.player1_score)
            .collect();
        assert_eq!(newest, vec![25, 18, 10]);
        assert_eq!(history.best_score(), Some(25));

        let json = serde_json::to_string(&history).unwrap();
        let back: History = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);

        history.clear();
        assert!(history.is_empty());
    }
}
