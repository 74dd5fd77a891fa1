use thiserror::Error;

use crate::ast::NodeId;

/// Generation only fails when handed a tree the analyzer did not annotate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Node {node} has no {missing} annotation")]
    Unannotated {
        node: NodeId,
        missing: &'static str,
    },
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
