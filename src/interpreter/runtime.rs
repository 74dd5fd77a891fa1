use rustc_hash::FxHashMap;

use crate::ast::{BinaryOperator, Expression, ExpressionKind, Literal, Method, Source, Statement};
use crate::builtins::BuiltinFunction;
use crate::scope::{ScopeId, Scopes};

use super::value::invalid_operand;
use super::{InterpreterError, InterpreterResult, MethodKey, NativeFunction, Value};

/// Control-flow marker for statement execution.
pub(super) enum ExecResult {
    Continue,
    Return(Value),
}

/// Anything callable by name and arity from an unqualified call.
#[derive(Clone)]
pub(super) enum Callable<'s> {
    Builtin(BuiltinFunction),
    Native(NativeFunction),
    Method { method: &'s Method, closure: ScopeId },
}

/// Runtime executor for interpreted statements and expressions.
pub(super) struct InterpreterRuntime<'s, 'i> {
    scopes: Scopes<Value, Callable<'s>>,
    current: ScopeId,
    methods: &'i FxHashMap<MethodKey, NativeFunction>,
    pub(super) output: Vec<String>,
}

impl<'s, 'i> InterpreterRuntime<'s, 'i> {
    pub(super) fn new(methods: &'i FxHashMap<MethodKey, NativeFunction>) -> Self {
        let scopes = Scopes::new();
        let current = scopes.root();
        Self {
            scopes,
            current,
            methods,
            output: Vec::new(),
        }
    }

    pub(super) fn define_function(
        &mut self,
        name: &str,
        arity: usize,
        callable: Callable<'s>,
    ) -> InterpreterResult<()> {
        self.scopes
            .define_function(self.current, name, arity, callable)?;
        Ok(())
    }

    /// Evaluates fields, registers methods and invokes `main`.
    pub(super) fn exec_source(&mut self, source: &'s Source) -> InterpreterResult<Value> {
        for field in &source.fields {
            let value = match &field.value {
                Some(value) => self.eval_expression(value)?,
                None => Value::Nil,
            };
            self.scopes
                .define_variable(self.current, &field.name, value)?;
        }
        for method in &source.methods {
            let callable = Callable::Method {
                method,
                closure: self.current,
            };
            self.define_function(&method.name, method.parameters.len(), callable)?;
        }

        let main = self
            .scopes
            .lookup_function(self.current, "main", 0)
            .cloned()
            .ok_or_else(|| InterpreterError::UndefinedFunction {
                name: "main".to_string(),
                arity: 0,
            })?;
        self.call(main, "main", Vec::new())
    }

    fn exec_block(&mut self, body: &'s [Statement]) -> InterpreterResult<ExecResult> {
        for statement in body {
            if let ExecResult::Return(value) = self.exec_statement(statement)? {
                return Ok(ExecResult::Return(value));
            }
        }
        Ok(ExecResult::Continue)
    }

    fn exec_statement(&mut self, statement: &'s Statement) -> InterpreterResult<ExecResult> {
        match statement {
            Statement::Expression(expression) => {
                self.eval_expression(expression)?;
            }
            Statement::Declaration { name, value, .. } => {
                let value = match value {
                    Some(value) => self.eval_expression(value)?,
                    None => Value::Nil,
                };
                self.scopes.define_variable(self.current, name, value)?;
            }
            Statement::Assignment { receiver, value } => self.exec_assignment(receiver, value)?,
            Statement::If {
                condition,
                then_body,
                else_body,
            } => {
                let body = if self.eval_expression(condition)?.as_boolean()? {
                    then_body
                } else {
                    else_body
                };
                return self.in_child_scope(|runtime| runtime.exec_block(body));
            }
            Statement::For { name, value, body } => {
                let items = match self.eval_expression(value)? {
                    Value::Iterable(items) => items,
                    other => {
                        return Err(InterpreterError::UnexpectedType {
                            expected: "IntegerIterable",
                            found: other.type_of().to_string(),
                        });
                    }
                };
                for item in items.iter() {
                    let result = self.in_child_scope(|runtime| {
                        runtime
                            .scopes
                            .define_variable(runtime.current, name, item.clone())?;
                        runtime.exec_block(body)
                    })?;
                    if let ExecResult::Return(value) = result {
                        return Ok(ExecResult::Return(value));
                    }
                }
            }
            Statement::While { condition, body } => {
                while self.eval_expression(condition)?.as_boolean()? {
                    if let ExecResult::Return(value) =
                        self.in_child_scope(|runtime| runtime.exec_block(body))?
                    {
                        return Ok(ExecResult::Return(value));
                    }
                }
            }
            Statement::Return(value) => {
                return Ok(ExecResult::Return(self.eval_expression(value)?));
            }
        }
        Ok(ExecResult::Continue)
    }

    fn exec_assignment(
        &mut self,
        receiver: &'s Expression,
        value: &'s Expression,
    ) -> InterpreterResult<()> {
        let ExpressionKind::Access { receiver, name } = &receiver.kind else {
            return Err(InterpreterError::InvalidAssignmentTarget);
        };
        match receiver {
            Some(receiver) => {
                let object = self.eval_expression(receiver)?;
                let value = self.eval_expression(value)?;
                let assigned = match &object {
                    Value::Object(object) => object.set_field(name, value),
                    _ => false,
                };
                if !assigned {
                    return Err(InterpreterError::UnknownField {
                        name: name.clone(),
                        type_name: object.type_of().to_string(),
                    });
                }
            }
            None => {
                let value = self.eval_expression(value)?;
                let slot = self
                    .scopes
                    .lookup_variable_mut(self.current, name)
                    .ok_or_else(|| InterpreterError::UndefinedVariable { name: name.clone() })?;
                *slot = value;
            }
        }
        Ok(())
    }

    fn eval_expression(&mut self, expression: &'s Expression) -> InterpreterResult<Value> {
        match &expression.kind {
            ExpressionKind::Literal(literal) => Ok(eval_literal(literal)),
            ExpressionKind::Group(inner) => self.eval_expression(inner),
            ExpressionKind::Binary { op, left, right } => self.eval_binary(*op, left, right),
            ExpressionKind::Access { receiver, name } => match receiver {
                Some(receiver) => {
                    let object = self.eval_expression(receiver)?;
                    let field = match &object {
                        Value::Object(object) => object.field(name),
                        _ => None,
                    };
                    field.ok_or_else(|| InterpreterError::UnknownField {
                        name: name.clone(),
                        type_name: object.type_of().to_string(),
                    })
                }
                None => self
                    .scopes
                    .lookup_variable(self.current, name)
                    .cloned()
                    .ok_or_else(|| InterpreterError::UndefinedVariable { name: name.clone() }),
            },
            ExpressionKind::Call {
                receiver,
                name,
                arguments,
            } => {
                let receiver = receiver
                    .as_deref()
                    .map(|receiver| self.eval_expression(receiver))
                    .transpose()?;
                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.eval_expression(argument)?);
                }
                match receiver {
                    Some(receiver) => self.call_method(receiver, name, values),
                    None => {
                        let callable = self
                            .scopes
                            .lookup_function(self.current, name, values.len())
                            .cloned()
                            .ok_or_else(|| InterpreterError::UndefinedFunction {
                                name: name.clone(),
                                arity: values.len(),
                            })?;
                        self.call(callable, name, values)
                    }
                }
            }
        }
    }

    fn eval_binary(
        &mut self,
        op: BinaryOperator,
        left: &'s Expression,
        right: &'s Expression,
    ) -> InterpreterResult<Value> {
        match op {
            BinaryOperator::And => {
                let value = self.eval_expression(left)?.as_boolean()?
                    && self.eval_expression(right)?.as_boolean()?;
                Ok(Value::Boolean(value))
            }
            BinaryOperator::Or => {
                let value = self.eval_expression(left)?.as_boolean()?
                    || self.eval_expression(right)?.as_boolean()?;
                Ok(Value::Boolean(value))
            }
            _ => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                let value = match op {
                    BinaryOperator::Equal => Value::Boolean(left == right),
                    BinaryOperator::NotEqual => Value::Boolean(left != right),
                    BinaryOperator::Less => Value::Boolean(left.compare(op, &right)?.is_lt()),
                    BinaryOperator::LessEqual => Value::Boolean(left.compare(op, &right)?.is_le()),
                    BinaryOperator::Greater => Value::Boolean(left.compare(op, &right)?.is_gt()),
                    BinaryOperator::GreaterEqual => {
                        Value::Boolean(left.compare(op, &right)?.is_ge())
                    }
                    BinaryOperator::Add
                    | BinaryOperator::Sub
                    | BinaryOperator::Mul
                    | BinaryOperator::Div => left.arithmetic(op, &right)?,
                    BinaryOperator::And | BinaryOperator::Or => {
                        return Err(invalid_operand(op, &left, &right));
                    }
                };
                Ok(value)
            }
        }
    }

    /// Dispatches through the receiver's runtime type. The native sees the receiver first.
    fn call_method(
        &mut self,
        receiver: Value,
        name: &str,
        arguments: Vec<Value>,
    ) -> InterpreterResult<Value> {
        let arity = arguments.len();
        let key = (receiver.type_of().name().to_string(), name.to_string(), arity);
        let Some(method) = self.methods.get(&key) else {
            return Err(InterpreterError::UnknownMethod {
                name: name.to_string(),
                arity,
                type_name: key.0,
            });
        };
        let mut values = Vec::with_capacity(arity + 1);
        values.push(receiver);
        values.extend(arguments);
        method(&values)
    }

    fn call(
        &mut self,
        callable: Callable<'s>,
        name: &str,
        arguments: Vec<Value>,
    ) -> InterpreterResult<Value> {
        match callable {
            Callable::Builtin(BuiltinFunction::Print) => {
                let rendered = arguments
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                self.output.push(rendered);
                Ok(Value::Nil)
            }
            Callable::Native(function) => function(&arguments),
            Callable::Method { method, closure } => {
                tracing::debug!(name, depth = self.scopes.depth(), "invoking method");
                let caller = self.current;
                let scope = self.scopes.enter(closure);
                self.current = scope;
                let result = self.exec_method_body(method, arguments);
                self.scopes.exit(scope);
                self.current = caller;
                match result? {
                    ExecResult::Continue => Ok(Value::Nil),
                    ExecResult::Return(value) => Ok(value),
                }
            }
        }
    }

    fn exec_method_body(
        &mut self,
        method: &'s Method,
        arguments: Vec<Value>,
    ) -> InterpreterResult<ExecResult> {
        for (parameter, value) in method.parameters.iter().zip(arguments) {
            self.scopes
                .define_variable(self.current, &parameter.name, value)?;
        }
        self.exec_block(&method.body)
    }

    fn in_child_scope<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> InterpreterResult<T>,
    ) -> InterpreterResult<T> {
        let parent = self.current;
        let scope = self.scopes.enter(parent);
        self.current = scope;
        let result = body(self);
        self.scopes.exit(scope);
        self.current = parent;
        result
    }
}

fn eval_literal(literal: &Literal) -> Value {
    match literal {
        Literal::Nil => Value::Nil,
        Literal::Boolean(value) => Value::Boolean(*value),
        Literal::Character(value) => Value::Character(*value),
        Literal::String(value) => Value::String(value.clone()),
        Literal::Integer(value) => Value::Integer(value.clone()),
        Literal::Decimal(value) => Value::Decimal(value.clone()),
    }
}
