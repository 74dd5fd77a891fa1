use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected {expected}, got {found} at position {position}")]
    Expected {
        expected: String,
        found: String,
        position: usize,
    },
    #[error("Invalid literal '{literal}' at position {position}")]
    InvalidLiteral { literal: String, position: usize },
    #[error("Field declared after a method at position {position}")]
    FieldAfterMethod { position: usize },
    #[error("Empty {construct} body at position {position}")]
    EmptyBody {
        construct: &'static str,
        position: usize,
    },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::Expected { position, .. }
            | ParseError::InvalidLiteral { position, .. }
            | ParseError::FieldAfterMethod { position }
            | ParseError::EmptyBody { position, .. } => *position,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
