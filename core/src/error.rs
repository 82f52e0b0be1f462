use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("No words available in the store")]
    NoWordsAvailable,
    #[error("Guess must be a single alphabetic letter, got {0:?}")]
    InvalidLetter(char),
}

pub type Result<T> = core::result::Result<T, GameError>;
