use rustc_hash::FxHashMap;

use crate::ast::{NodeId, Source};
use crate::types::{Function, Type, Variable};

/// Side table filled by the analyzer. Each node is annotated at most once.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    types: FxHashMap<NodeId, Type>,
    variables: FxHashMap<NodeId, Variable>,
    functions: FxHashMap<NodeId, Function>,
}

impl Annotations {
    pub fn type_of(&self, node: NodeId) -> Option<&Type> {
        self.types.get(&node)
    }

    pub fn variable(&self, node: NodeId) -> Option<&Variable> {
        self.variables.get(&node)
    }

    pub fn function(&self, node: NodeId) -> Option<&Function> {
        self.functions.get(&node)
    }

    pub(super) fn set_type(&mut self, node: NodeId, ty: Type) {
        let previous = self.types.insert(node, ty);
        debug_assert!(previous.is_none(), "node {node} typed twice");
    }

    pub(super) fn set_variable(&mut self, node: NodeId, variable: Variable) {
        self.variables.insert(node, variable);
    }

    pub(super) fn set_function(&mut self, node: NodeId, function: Function) {
        self.functions.insert(node, function);
    }
}

/// A source tree together with the annotations that analysis attached to it.
///
/// Only [`crate::analyzer::Analyzer::analyze`] builds one, so holding it proves the
/// tree passed analysis.
#[derive(Debug, Clone)]
pub struct AnalyzedSource<'s> {
    pub(super) source: &'s Source,
    pub(super) annotations: Annotations,
}

impl<'s> AnalyzedSource<'s> {
    pub fn source(&self) -> &'s Source {
        self.source
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }
}
