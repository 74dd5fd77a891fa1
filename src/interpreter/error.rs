use thiserror::Error;

use crate::scope::ScopeError;

/// Typed errors produced by the tree-walking interpreter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterpreterError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },
    #[error("Undefined function '{name}' taking {arity} arguments")]
    UndefinedFunction { name: String, arity: usize },
    #[error("'{name}' is already defined in this scope")]
    Redefinition { name: String },
    #[error("Unknown field '{name}' for type {type_name}")]
    UnknownField { name: String, type_name: String },
    #[error("Unknown method '{name}' taking {arity} arguments for type {type_name}")]
    UnknownMethod {
        name: String,
        arity: usize,
        type_name: String,
    },
    #[error("Operator '{operator}' is not supported for {left} and {right}")]
    InvalidOperand {
        operator: String,
        left: String,
        right: String,
    },
    #[error("Expected {expected}, got {found}")]
    UnexpectedType {
        expected: &'static str,
        found: String,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Assignment target must be a variable or field access")]
    InvalidAssignmentTarget,
    #[error("Native function '{name}' failed: {message}")]
    Native { name: String, message: String },
}

impl From<ScopeError> for InterpreterError {
    fn from(error: ScopeError) -> Self {
        match error {
            ScopeError::Redefinition { name } => InterpreterError::Redefinition { name },
        }
    }
}

pub type InterpreterResult<T> = Result<T, InterpreterError>;
