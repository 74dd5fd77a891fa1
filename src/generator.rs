use anyhow::Result;

use crate::analyzer::{AnalyzedSource, Annotations};
use crate::ast::{
    BinaryOperator, Expression, ExpressionKind, Field, Literal, Method, NodeId, Statement,
};
use crate::backend::Backend;
use crate::decimal;
use crate::types::{Function, Variable};

pub mod error;

pub use error::{GeneratorError, GeneratorResult};

const INDENT: &str = "    ";

/// Lowers an analyzed source tree to a single Java `Main` class.
#[derive(Debug, Default)]
pub struct Generator;

impl Generator {
    pub fn new() -> Self {
        Self
    }

    #[tracing::instrument(skip_all, fields(methods = analyzed.source().methods.len()))]
    pub fn generate(&self, analyzed: &AnalyzedSource<'_>) -> GeneratorResult<String> {
        let mut emitter = Emitter {
            annotations: analyzed.annotations(),
            output: String::new(),
            indent: 0,
        };
        emitter.emit_source(&analyzed.source().fields, &analyzed.source().methods)?;
        tracing::debug!(bytes = emitter.output.len(), "generated java source");
        Ok(emitter.output)
    }
}

impl Backend for Generator {
    fn name(&self) -> &'static str {
        "generator"
    }

    fn run(&self, analyzed: &AnalyzedSource<'_>) -> Result<String> {
        Ok(self.generate(analyzed)?)
    }
}

struct Emitter<'a> {
    annotations: &'a Annotations,
    output: String,
    indent: usize,
}

impl<'a> Emitter<'a> {
    fn emit_source(&mut self, fields: &[Field], methods: &[Method]) -> GeneratorResult<()> {
        self.push("public class Main {");
        self.newline(0);
        self.indent += 1;
        if !fields.is_empty() {
            for field in fields {
                self.newline(self.indent);
                self.emit_field(field)?;
            }
            self.newline(0);
        }

        self.newline(self.indent);
        self.push("public static void main(String[] args) {");
        self.newline(self.indent + 1);
        self.push("System.exit(new Main().main());");
        self.newline(self.indent);
        self.push("}");

        for method in methods {
            self.newline(0);
            self.newline(self.indent);
            self.emit_method(method)?;
        }
        self.newline(0);

        self.indent -= 1;
        self.newline(self.indent);
        self.push("}");
        Ok(())
    }

    fn emit_field(&mut self, field: &Field) -> GeneratorResult<()> {
        let variable = self.variable(field.id)?;
        self.emit_binding(variable, field.value.as_ref())
    }

    fn emit_binding(
        &mut self,
        variable: &Variable,
        value: Option<&Expression>,
    ) -> GeneratorResult<()> {
        self.push(&format!(
            "{} {}",
            variable.ty.target_name(),
            variable.target_name
        ));
        if let Some(value) = value {
            self.push(" = ");
            self.emit_expression(value)?;
        }
        self.push(";");
        Ok(())
    }

    fn emit_method(&mut self, method: &Method) -> GeneratorResult<()> {
        let function = self.function(method.id)?;
        self.push(&format!(
            "{} {}(",
            function.return_type.target_name(),
            function.target_name
        ));
        for (index, (parameter, ty)) in method
            .parameters
            .iter()
            .zip(&function.parameter_types)
            .enumerate()
        {
            if index > 0 {
                self.push(", ");
            }
            self.push(&format!("{} {}", ty.target_name(), parameter.name));
        }
        self.push(") {");
        self.emit_block(&method.body)?;
        self.push("}");
        Ok(())
    }

    /// Emits statements one per line, one level deeper. Empty blocks emit nothing.
    fn emit_block(&mut self, statements: &[Statement]) -> GeneratorResult<()> {
        if statements.is_empty() {
            return Ok(());
        }
        self.indent += 1;
        for statement in statements {
            self.newline(self.indent);
            self.emit_statement(statement)?;
        }
        self.indent -= 1;
        self.newline(self.indent);
        Ok(())
    }

    fn emit_statement(&mut self, statement: &Statement) -> GeneratorResult<()> {
        match statement {
            Statement::Expression(expression) => {
                self.emit_expression(expression)?;
                self.push(";");
            }
            Statement::Declaration { id, value, .. } => {
                let variable = self.variable(*id)?;
                self.emit_binding(variable, value.as_ref())?;
            }
            Statement::Assignment { receiver, value } => {
                self.emit_expression(receiver)?;
                self.push(" = ");
                self.emit_expression(value)?;
                self.push(";");
            }
            Statement::If {
                condition,
                then_body,
                else_body,
            } => {
                self.push("if (");
                self.emit_expression(condition)?;
                self.push(") {");
                self.emit_block(then_body)?;
                self.push("}");
                if !else_body.is_empty() {
                    self.push(" else {");
                    self.emit_block(else_body)?;
                    self.push("}");
                }
            }
            Statement::For { name, value, body } => {
                self.push(&format!("for (int {name} : "));
                self.emit_expression(value)?;
                self.push(") {");
                self.emit_block(body)?;
                self.push("}");
            }
            Statement::While { condition, body } => {
                self.push("while (");
                self.emit_expression(condition)?;
                self.push(") {");
                self.emit_block(body)?;
                self.push("}");
            }
            Statement::Return(value) => {
                self.push("return ");
                self.emit_expression(value)?;
                self.push(";");
            }
        }
        Ok(())
    }

    fn emit_expression(&mut self, expression: &Expression) -> GeneratorResult<()> {
        match &expression.kind {
            ExpressionKind::Literal(literal) => self.emit_literal(literal),
            ExpressionKind::Group(inner) => {
                self.push("(");
                self.emit_expression(inner)?;
                self.push(")");
            }
            ExpressionKind::Binary { op, left, right } => {
                self.emit_expression(left)?;
                self.push(&format!(" {} ", java_operator(*op)));
                self.emit_expression(right)?;
            }
            ExpressionKind::Access { receiver, .. } => {
                if let Some(receiver) = receiver {
                    self.emit_expression(receiver)?;
                    self.push(".");
                }
                let variable = self.variable(expression.id)?;
                self.push(&variable.target_name);
            }
            ExpressionKind::Call {
                receiver,
                arguments,
                ..
            } => {
                if let Some(receiver) = receiver {
                    self.emit_expression(receiver)?;
                    self.push(".");
                }
                let function = self.function(expression.id)?;
                self.push(&function.target_name);
                self.push("(");
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        self.push(", ");
                    }
                    self.emit_expression(argument)?;
                }
                self.push(")");
            }
        }
        Ok(())
    }

    fn emit_literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Nil => self.push("null"),
            Literal::Boolean(value) => self.push(&value.to_string()),
            Literal::Integer(value) => self.push(&value.to_string()),
            Literal::Decimal(value) => self.push(&decimal::to_plain_string(value)),
            Literal::Character(value) => {
                self.output.push('\'');
                push_escaped(&mut self.output, *value, '\'');
                self.output.push('\'');
            }
            Literal::String(value) => {
                self.output.push('"');
                for c in value.chars() {
                    push_escaped(&mut self.output, c, '"');
                }
                self.output.push('"');
            }
        }
    }

    fn variable(&self, node: NodeId) -> GeneratorResult<&'a Variable> {
        self.annotations
            .variable(node)
            .ok_or(GeneratorError::Unannotated {
                node,
                missing: "variable",
            })
    }

    fn function(&self, node: NodeId) -> GeneratorResult<&'a Function> {
        self.annotations
            .function(node)
            .ok_or(GeneratorError::Unannotated {
                node,
                missing: "function",
            })
    }

    fn push(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn newline(&mut self, indent: usize) {
        self.output.push('\n');
        for _ in 0..indent {
            self.output.push_str(INDENT);
        }
    }
}

fn java_operator(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::And => "&&",
        BinaryOperator::Or => "||",
        other => other.symbol(),
    }
}

fn push_escaped(output: &mut String, c: char, quote: char) {
    match c {
        '\u{8}' => output.push_str("\\b"),
        '\n' => output.push_str("\\n"),
        '\r' => output.push_str("\\r"),
        '\t' => output.push_str("\\t"),
        '\\' => output.push_str("\\\\"),
        c if c == quote => {
            output.push('\\');
            output.push(c);
        }
        c => output.push(c),
    }
}
