//! Lexical scope chain shared by the analyzer and the interpreter.
//!
//! Scopes live in an arena and refer to their parent by index. Blocks are
//! strictly nested, so leaving a block truncates the arena back to the block's
//! own scope, dropping it together with anything opened inside it.

use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("'{name}' is already defined in this scope")]
    Redefinition { name: String },
}

#[derive(Debug)]
struct Frame<V, F> {
    parent: Option<ScopeId>,
    variables: FxHashMap<String, V>,
    functions: FxHashMap<(String, usize), F>,
}

impl<V, F> Frame<V, F> {
    fn new(parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            variables: FxHashMap::default(),
            functions: FxHashMap::default(),
        }
    }
}

#[derive(Debug)]
pub struct Scopes<V, F> {
    frames: Vec<Frame<V, F>>,
}

impl<V, F> Scopes<V, F> {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new(None)],
        }
    }

    /// Starts a chain whose root already holds `functions`, keyed by name and arity.
    pub fn with_functions(functions: impl IntoIterator<Item = (String, usize, F)>) -> Self {
        let mut root = Frame::new(None);
        root.functions.extend(
            functions
                .into_iter()
                .map(|(name, arity, function)| ((name, arity), function)),
        );
        Self { frames: vec![root] }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn enter(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.frames.len());
        self.frames.push(Frame::new(Some(parent)));
        id
    }

    /// Discards `scope` and every scope opened after it. The root is never discarded.
    pub fn exit(&mut self, scope: ScopeId) {
        self.frames.truncate(scope.0.max(1));
    }

    pub fn define_variable(
        &mut self,
        scope: ScopeId,
        name: &str,
        value: V,
    ) -> Result<(), ScopeError> {
        let variables = &mut self.frames[scope.0].variables;
        if variables.contains_key(name) {
            return Err(ScopeError::Redefinition {
                name: name.to_string(),
            });
        }
        variables.insert(name.to_string(), value);
        Ok(())
    }

    pub fn define_function(
        &mut self,
        scope: ScopeId,
        name: &str,
        arity: usize,
        function: F,
    ) -> Result<(), ScopeError> {
        let key = (name.to_string(), arity);
        let functions = &mut self.frames[scope.0].functions;
        if functions.contains_key(&key) {
            return Err(ScopeError::Redefinition {
                name: format!("{name}/{arity}"),
            });
        }
        functions.insert(key, function);
        Ok(())
    }

    pub fn lookup_variable(&self, scope: ScopeId, name: &str) -> Option<&V> {
        let owner = self.find(scope, |frame| frame.variables.contains_key(name))?;
        self.frames[owner.0].variables.get(name)
    }

    pub fn lookup_variable_mut(&mut self, scope: ScopeId, name: &str) -> Option<&mut V> {
        let owner = self.find(scope, |frame| frame.variables.contains_key(name))?;
        self.frames[owner.0].variables.get_mut(name)
    }

    pub fn lookup_function(&self, scope: ScopeId, name: &str, arity: usize) -> Option<&F> {
        let key = (name.to_string(), arity);
        let owner = self.find(scope, |frame| frame.functions.contains_key(&key))?;
        self.frames[owner.0].functions.get(&key)
    }

    fn find(&self, scope: ScopeId, found: impl Fn(&Frame<V, F>) -> bool) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let frame = self.frames.get(id.0)?;
            if found(frame) {
                return Some(id);
            }
            current = frame.parent;
        }
        None
    }
}

impl<V, F> Default for Scopes<V, F> {
    fn default() -> Self {
        Self::new()
    }
}
