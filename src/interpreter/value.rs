use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;
use rustc_hash::FxHashMap;

use crate::ast::BinaryOperator;
use crate::decimal;
use crate::types::{ObjectType, Type};

use super::{InterpreterError, InterpreterResult};

/// Runtime value. Equality is value equality; objects compare by identity.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    Character(char),
    String(String),
    Integer(BigInt),
    Decimal(BigDecimal),
    Iterable(Rc<[Value]>),
    Object(ObjectRef),
}

/// Shared handle to a host object instance.
#[derive(Debug, Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

#[derive(Debug)]
struct Object {
    ty: Arc<ObjectType>,
    fields: FxHashMap<String, Value>,
}

impl ObjectRef {
    pub fn object_type(&self) -> Arc<ObjectType> {
        self.0.borrow().ty.clone()
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.0.borrow().fields.get(name).cloned()
    }

    /// Overwrites an existing field. Returns `false` when the object has no such field.
    pub fn set_field(&self, name: &str, value: Value) -> bool {
        match self.0.borrow_mut().fields.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Value {
    /// Builds an object instance. Fields of `ty` missing from `fields` start as Nil.
    pub fn object(ty: Arc<ObjectType>, fields: impl IntoIterator<Item = (String, Value)>) -> Self {
        let mut values = ty
            .fields
            .keys()
            .map(|name| (name.clone(), Value::Nil))
            .collect::<FxHashMap<_, _>>();
        values.extend(fields);
        Value::Object(ObjectRef(Rc::new(RefCell::new(Object { ty, fields: values }))))
    }

    pub fn integers(values: impl IntoIterator<Item = BigInt>) -> Self {
        Value::Iterable(values.into_iter().map(Value::Integer).collect())
    }

    pub fn type_of(&self) -> Type {
        match self {
            Value::Nil => Type::Nil,
            Value::Boolean(_) => Type::Boolean,
            Value::Character(_) => Type::Character,
            Value::String(_) => Type::String,
            Value::Integer(_) => Type::Integer,
            Value::Decimal(_) => Type::Decimal,
            Value::Iterable(_) => Type::IntegerIterable,
            Value::Object(object) => Type::Object(object.object_type()),
        }
    }

    pub(super) fn as_boolean(&self) -> InterpreterResult<bool> {
        match self {
            Value::Boolean(value) => Ok(*value),
            other => Err(InterpreterError::UnexpectedType {
                expected: "Boolean",
                found: other.type_of().to_string(),
            }),
        }
    }

    pub(super) fn arithmetic(&self, op: BinaryOperator, right: &Value) -> InterpreterResult<Value> {
        if op == BinaryOperator::Add
            && (matches!(self, Value::String(_)) || matches!(right, Value::String(_)))
        {
            return Ok(Value::String(format!("{self}{right}")));
        }
        match (self, right) {
            (Value::Integer(l), Value::Integer(r)) => {
                let value = match op {
                    BinaryOperator::Add => l + r,
                    BinaryOperator::Sub => l - r,
                    BinaryOperator::Mul => l * r,
                    BinaryOperator::Div => {
                        if r.is_zero() {
                            return Err(InterpreterError::DivisionByZero);
                        }
                        l / r
                    }
                    _ => return Err(invalid_operand(op, self, right)),
                };
                Ok(Value::Integer(value))
            }
            (Value::Decimal(l), Value::Decimal(r)) => {
                decimal_arithmetic(op, l, r).map(Value::Decimal)
            }
            _ => Err(invalid_operand(op, self, right)),
        }
    }

    pub(super) fn compare(&self, op: BinaryOperator, right: &Value) -> InterpreterResult<Ordering> {
        let ordering = match (self, right) {
            (Value::Integer(left), Value::Integer(right)) => left.cmp(right),
            (Value::Decimal(left), Value::Decimal(right)) => left.cmp(right),
            (Value::Character(left), Value::Character(right)) => left.cmp(right),
            (Value::String(left), Value::String(right)) => left.cmp(right),
            _ => return Err(invalid_operand(op, self, right)),
        };
        Ok(ordering)
    }
}

/// Decimal division rounds half-to-even to the scale of the dividend.
fn decimal_arithmetic(
    op: BinaryOperator,
    left: &BigDecimal,
    right: &BigDecimal,
) -> InterpreterResult<BigDecimal> {
    match op {
        BinaryOperator::Add => Ok(left + right),
        BinaryOperator::Sub => Ok(left - right),
        BinaryOperator::Mul => Ok(left * right),
        BinaryOperator::Div => {
            decimal::divide_half_even(left, right).ok_or(InterpreterError::DivisionByZero)
        }
        _ => Err(InterpreterError::InvalidOperand {
            operator: op.symbol().to_string(),
            left: Type::Decimal.to_string(),
            right: Type::Decimal.to_string(),
        }),
    }
}

pub(super) fn invalid_operand(op: BinaryOperator, left: &Value, right: &Value) -> InterpreterError {
    InterpreterError::InvalidOperand {
        operator: op.symbol().to_string(),
        left: left.type_of().to_string(),
        right: right.type_of().to_string(),
    }
}

/// Textual form used by `print` and string concatenation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("NIL"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Character(value) => write!(f, "{value}"),
            Value::String(value) => f.write_str(value),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Decimal(value) => f.write_str(&decimal::to_plain_string(value)),
            Value::Iterable(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            Value::Object(object) => f.write_str(&object.object_type().name),
        }
    }
}
