use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Empty input at position {position}")]
    EmptyInput { position: usize },
    #[error("Unterminated character literal at position {position}")]
    UnterminatedCharacter { position: usize },
    #[error("Invalid character literal at position {position}")]
    InvalidCharacter { position: usize },
    #[error("Unterminated string literal at position {position}")]
    UnterminatedString { position: usize },
    #[error("Invalid escape sequence at position {position}")]
    InvalidEscape { position: usize },
    #[error("Line break inside literal at position {position}")]
    NewlineInLiteral { position: usize },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::EmptyInput { position }
            | LexError::UnterminatedCharacter { position }
            | LexError::InvalidCharacter { position }
            | LexError::UnterminatedString { position }
            | LexError::InvalidEscape { position }
            | LexError::NewlineInLiteral { position } => *position,
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
