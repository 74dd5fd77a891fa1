use crate::types::{Function, Type};

/// Functions present in the initial scope of both the analyzer and the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFunction {
    Print,
}

impl BuiltinFunction {
    pub const ALL: [BuiltinFunction; 1] = [BuiltinFunction::Print];

    pub fn name(self) -> &'static str {
        match self {
            Self::Print => "print",
        }
    }

    pub fn target_name(self) -> &'static str {
        match self {
            Self::Print => "System.out.println",
        }
    }

    pub fn arity(self) -> usize {
        self.signature().arity()
    }

    pub fn signature(self) -> Function {
        match self {
            Self::Print => Function::new(self.name(), vec![Type::Any], Type::Nil)
                .with_target_name(self.target_name()),
        }
    }
}
