use anyhow::Result;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::analyzer::AnalyzedSource;
use crate::backend::Backend;
use crate::builtins::BuiltinFunction;

mod error;
mod runtime;
mod value;

pub use error::{InterpreterError, InterpreterResult};
use runtime::{Callable, InterpreterRuntime};
pub use value::{ObjectRef, Value};

/// Host function callable from interpreted code. Methods receive the receiver first.
pub type NativeFunction = Rc<dyn Fn(&[Value]) -> InterpreterResult<Value>>;

/// (type name, method name, arity without the receiver)
type MethodKey = (String, String, usize);

/// Result of running a program: `main`'s return value plus everything printed.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub value: Value,
    pub output: Vec<String>,
}

/// Tree-walking backend that evaluates the source tree directly.
#[derive(Default)]
pub struct Interpreter {
    natives: Vec<(String, usize, NativeFunction)>,
    methods: FxHashMap<MethodKey, NativeFunction>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exposes a host function in the global scope of every execution.
    pub fn define_native(
        &mut self,
        name: &str,
        arity: usize,
        function: impl Fn(&[Value]) -> InterpreterResult<Value> + 'static,
    ) -> &mut Self {
        self.natives
            .push((name.to_string(), arity, Rc::new(function)));
        self
    }

    /// Registers a method for values whose runtime type is `type_name`.
    pub fn define_method(
        &mut self,
        type_name: &str,
        name: &str,
        arity: usize,
        function: impl Fn(&[Value]) -> InterpreterResult<Value> + 'static,
    ) -> &mut Self {
        self.methods.insert(
            (type_name.to_string(), name.to_string(), arity),
            Rc::new(function),
        );
        self
    }

    /// Runs `main` of a tree that passed analysis.
    #[tracing::instrument(
        skip_all,
        fields(fields = analyzed.source().fields.len(), methods = analyzed.source().methods.len())
    )]
    pub fn execute(&self, analyzed: &AnalyzedSource<'_>) -> InterpreterResult<Execution> {
        let mut runtime = InterpreterRuntime::new(&self.methods);
        for builtin in BuiltinFunction::ALL {
            runtime.define_function(builtin.name(), builtin.arity(), Callable::Builtin(builtin))?;
        }
        for (name, arity, function) in &self.natives {
            runtime.define_function(name, *arity, Callable::Native(function.clone()))?;
        }

        let value = runtime.exec_source(analyzed.source())?;
        tracing::debug!(lines = runtime.output.len(), "execution finished");
        Ok(Execution {
            value,
            output: runtime.output,
        })
    }
}

impl Backend for Interpreter {
    fn name(&self) -> &'static str {
        "interpreter"
    }

    fn run(&self, analyzed: &AnalyzedSource<'_>) -> Result<String> {
        let execution = self.execute(analyzed)?;
        Ok(execution.output.join("\n"))
    }
}
