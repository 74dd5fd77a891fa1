use thiserror::Error;

use crate::analyzer::AnalysisError;
use crate::generator::GeneratorError;
use crate::interpreter::InterpreterError;
use crate::lexer::LexError;
use crate::parser::ParseError;

/// Any failure from the text-to-result pipeline, tagged by stage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Interpreter(#[from] InterpreterError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

impl Error {
    /// Source offset for lexing and parsing failures.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Lex(error) => Some(error.position()),
            Error::Parse(error) => Some(error.position()),
            Error::Analysis(_) | Error::Interpreter(_) | Error::Generator(_) => None,
        }
    }
}
