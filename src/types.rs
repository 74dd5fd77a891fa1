//! Static types and the catalog that resolves type names.
//!
//! Built-in types are a closed set. Record-like object types are registered by
//! the embedding host and carry their own field and method directories, which
//! the analyzer consults for receiver-qualified accesses and calls.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub enum Type {
    Any,
    Nil,
    Comparable,
    Boolean,
    Integer,
    Decimal,
    Character,
    String,
    IntegerIterable,
    Object(Arc<ObjectType>),
}

impl Type {
    pub fn name(&self) -> &str {
        match self {
            Type::Any => "Any",
            Type::Nil => "Nil",
            Type::Comparable => "Comparable",
            Type::Boolean => "Boolean",
            Type::Integer => "Integer",
            Type::Decimal => "Decimal",
            Type::Character => "Character",
            Type::String => "String",
            Type::IntegerIterable => "IntegerIterable",
            Type::Object(object) => &object.name,
        }
    }

    /// Java spelling used by the generator.
    pub fn target_name(&self) -> &str {
        match self {
            Type::Any => "Object",
            Type::Nil => "Void",
            Type::Comparable => "Comparable",
            Type::Boolean => "boolean",
            Type::Integer => "int",
            Type::Decimal => "double",
            Type::Character => "char",
            Type::String => "String",
            Type::IntegerIterable => "Iterable<Integer>",
            Type::Object(object) => &object.target_name,
        }
    }

    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            Type::Integer | Type::Decimal | Type::Character | Type::String
        )
    }

    /// Whether a value of type `actual` may be stored where `self` is expected.
    pub fn is_assignable_from(&self, actual: &Type) -> bool {
        self == actual
            || matches!(self, Type::Any)
            || (matches!(self, Type::Comparable) && actual.is_comparable())
    }

    pub fn field(&self, name: &str) -> Option<&Variable> {
        match self {
            Type::Object(object) => object.fields.get(name),
            _ => None,
        }
    }

    pub fn method(&self, name: &str, arity: usize) -> Option<&Function> {
        match self {
            Type::Object(object) => object.methods.get(&(name.to_string(), arity)),
            _ => None,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Object(left), Type::Object(right)) => left.name == right.name,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for Type {}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved variable or field binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub target_name: String,
    pub ty: Type,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        let name = name.into();
        Self {
            target_name: name.clone(),
            name,
            ty,
        }
    }
}

/// A resolved function or method signature. Method parameters never include the receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub target_name: String,
    pub parameter_types: Vec<Type>,
    pub return_type: Type,
}

impl Function {
    pub fn new(name: impl Into<String>, parameter_types: Vec<Type>, return_type: Type) -> Self {
        let name = name.into();
        Self {
            target_name: name.clone(),
            name,
            parameter_types,
            return_type,
        }
    }

    pub fn with_target_name(mut self, target_name: impl Into<String>) -> Self {
        self.target_name = target_name.into();
        self
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

/// Host-registered record type with named fields and arity-keyed methods.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub target_name: String,
    pub fields: FxHashMap<String, Variable>,
    pub methods: FxHashMap<(String, usize), Function>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            target_name: name.clone(),
            name,
            fields: FxHashMap::default(),
            methods: FxHashMap::default(),
        }
    }

    pub fn with_target_name(mut self, target_name: impl Into<String>) -> Self {
        self.target_name = target_name.into();
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, ty: Type) -> Self {
        let variable = Variable::new(name, ty);
        self.fields.insert(variable.name.clone(), variable);
        self
    }

    pub fn with_method(
        mut self,
        name: impl Into<String>,
        parameter_types: Vec<Type>,
        return_type: Type,
    ) -> Self {
        let function = Function::new(name, parameter_types, return_type);
        self.methods
            .insert((function.name.clone(), function.arity()), function);
        self
    }
}

/// Name to type lookup used when resolving declared type names.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    types: FxHashMap<String, Type>,
}

impl TypeCatalog {
    pub fn standard() -> Self {
        let builtins = [
            Type::Any,
            Type::Nil,
            Type::Comparable,
            Type::Boolean,
            Type::Integer,
            Type::Decimal,
            Type::Character,
            Type::String,
            Type::IntegerIterable,
        ];
        let types = builtins
            .into_iter()
            .map(|ty| (ty.name().to_string(), ty))
            .collect();
        Self { types }
    }

    /// Registers an object type, replacing any earlier type with the same name.
    pub fn register(&mut self, object: ObjectType) -> Type {
        let ty = Type::Object(Arc::new(object));
        self.types.insert(ty.name().to_string(), ty.clone());
        ty
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
