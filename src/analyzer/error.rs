use thiserror::Error;

use crate::ast::BinaryOperator;
use crate::scope::ScopeError;
use crate::types::Type;

/// Typed errors produced by static analysis. Identified by name, never by offset.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("'{name}' needs a declared type or an initial value")]
    MissingType { name: String },
    #[error("Unknown type '{name}'")]
    UnknownType { name: String },
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Type, found: Type },
    #[error("'{name}' is already defined in this scope")]
    Redefinition { name: String },
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },
    #[error("Undefined function '{name}' taking {arity} arguments")]
    UndefinedFunction { name: String, arity: usize },
    #[error("Unknown field '{name}' for type {type_name}")]
    UnknownField { name: String, type_name: String },
    #[error("Unknown method '{name}' taking {arity} arguments for type {type_name}")]
    UnknownMethod {
        name: String,
        arity: usize,
        type_name: String,
    },
    #[error("Expression statement must be a function call")]
    NotACall,
    #[error("Assignment target must be a variable or field access")]
    InvalidAssignmentTarget,
    #[error("Empty {construct} body")]
    EmptyBody { construct: &'static str },
    #[error("Return outside of method")]
    ReturnOutsideMethod,
    #[error("Literal {literal} is out of range")]
    OutOfRange { literal: String },
    #[error("Grouped expression must be a binary expression")]
    InvalidGroup,
    #[error("Operator '{op}' cannot be applied to {left} and {right}")]
    InvalidOperands {
        op: BinaryOperator,
        left: Type,
        right: Type,
    },
    #[error("Missing zero-argument 'main' method")]
    MissingMain,
}

impl From<ScopeError> for AnalysisError {
    fn from(error: ScopeError) -> Self {
        match error {
            ScopeError::Redefinition { name } => AnalysisError::Redefinition { name },
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
