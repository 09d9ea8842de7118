use crate::scoring::Category;

/// Why a state transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Refusal {
    #[error("no rolls left this turn")]
    RollsExhausted,
    #[error("dice have not been rolled this turn")]
    NotRolled,
    #[error("no category selected")]
    NoSelection,
    #[error("game is finished")]
    GameFinished,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid transition: {0}")]
    InvalidTransition(#[from] Refusal),
    #[error("category {0:?} already filled")]
    DuplicateCategory(Category),
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: usize },
}
