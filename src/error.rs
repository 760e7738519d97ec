use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("maze size {size} is too small, need at least 3")]
    InvalidConfiguration { size: usize },

    #[error("placed only {placed} of {requested} entities before running out of free cells")]
    PlacementExhausted { placed: usize, requested: usize },
}
