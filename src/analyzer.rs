use crate::ast::{
    BinaryOperator, Expression, ExpressionKind, Field, Literal, Method, Source, Statement,
};
use crate::builtins::BuiltinFunction;
use crate::decimal;
use crate::scope::{ScopeId, Scopes};
use crate::types::{Function, Type, TypeCatalog, Variable};

mod annotations;
pub mod error;

pub use annotations::{AnalyzedSource, Annotations};
pub use error::{AnalysisError, AnalysisResult};

/// Single top-down pass that resolves names and types every expression.
///
/// The source tree is never modified; results land in [`Annotations`].
pub struct Analyzer {
    catalog: TypeCatalog,
    scopes: Scopes<Variable, Function>,
    current: ScopeId,
    return_type: Option<Type>,
    annotations: Annotations,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::with_catalog(TypeCatalog::standard())
    }

    pub fn with_catalog(catalog: TypeCatalog) -> Self {
        let scopes = Scopes::with_functions(
            BuiltinFunction::ALL
                .into_iter()
                .map(|builtin| (builtin.name().to_string(), builtin.arity(), builtin.signature())),
        );
        let root = scopes.root();
        Self {
            catalog,
            scopes,
            current: root,
            return_type: None,
            annotations: Annotations::default(),
        }
    }

    /// Exposes a host function to analyzed programs.
    pub fn define_function(
        &mut self,
        name: &str,
        parameter_types: Vec<Type>,
        return_type: Type,
    ) -> AnalysisResult<()> {
        let function = Function::new(name, parameter_types, return_type);
        let root = self.scopes.root();
        self.scopes
            .define_function(root, name, function.arity(), function)?;
        Ok(())
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    #[tracing::instrument(skip_all, fields(fields = source.fields.len(), methods = source.methods.len()))]
    pub fn analyze(mut self, source: &Source) -> AnalysisResult<AnalyzedSource<'_>> {
        for field in &source.fields {
            self.analyze_field(field)?;
        }
        for method in &source.methods {
            self.analyze_method(method)?;
        }

        let main = self
            .scopes
            .lookup_function(self.current, "main", 0)
            .ok_or(AnalysisError::MissingMain)?;
        require_assignable(&Type::Integer, &main.return_type)?;

        Ok(AnalyzedSource {
            source,
            annotations: self.annotations,
        })
    }

    fn analyze_field(&mut self, field: &Field) -> AnalysisResult<()> {
        let variable =
            self.analyze_binding(&field.name, field.type_name.as_deref(), field.value.as_ref())?;
        self.annotations.set_variable(field.id, variable);
        Ok(())
    }

    /// Shared by fields and declarations: resolves the binding type and defines it in the current scope.
    fn analyze_binding(
        &mut self,
        name: &str,
        type_name: Option<&str>,
        value: Option<&Expression>,
    ) -> AnalysisResult<Variable> {
        let declared = type_name.map(|type_name| self.resolve_type(type_name)).transpose()?;
        let ty = match (declared, value) {
            (None, None) => {
                return Err(AnalysisError::MissingType {
                    name: name.to_string(),
                });
            }
            (Some(declared), None) => declared,
            (declared, Some(value)) => {
                let actual = self.analyze_expression(value)?;
                let ty = declared.unwrap_or_else(|| actual.clone());
                require_assignable(&ty, &actual)?;
                ty
            }
        };

        let variable = Variable::new(name, ty);
        self.scopes
            .define_variable(self.current, name, variable.clone())?;
        Ok(variable)
    }

    fn analyze_method(&mut self, method: &Method) -> AnalysisResult<()> {
        let parameter_types = method
            .parameters
            .iter()
            .map(|parameter| self.resolve_type(&parameter.type_name))
            .collect::<AnalysisResult<Vec<_>>>()?;
        let return_type = match &method.return_type_name {
            Some(type_name) => self.resolve_type(type_name)?,
            None => Type::Nil,
        };

        let function = Function::new(&method.name, parameter_types, return_type);
        // Registered before the body so the method can call itself.
        self.scopes.define_function(
            self.current,
            &method.name,
            function.arity(),
            function.clone(),
        )?;
        tracing::debug!(name = %method.name, arity = function.arity(), "registered method");
        self.annotations.set_function(method.id, function.clone());

        let previous = self.return_type.replace(function.return_type.clone());
        let result = self.in_child_scope(|analyzer| {
            for (parameter, ty) in method.parameters.iter().zip(&function.parameter_types) {
                let variable = Variable::new(&parameter.name, ty.clone());
                analyzer
                    .scopes
                    .define_variable(analyzer.current, &parameter.name, variable)?;
            }
            analyzer.analyze_block(&method.body)
        });
        self.return_type = previous;
        result
    }

    fn analyze_block(&mut self, statements: &[Statement]) -> AnalysisResult<()> {
        for statement in statements {
            self.analyze_statement(statement)?;
        }
        Ok(())
    }

    fn analyze_statement(&mut self, statement: &Statement) -> AnalysisResult<()> {
        match statement {
            Statement::Expression(expression) => {
                self.analyze_expression(expression)?;
                if !matches!(expression.kind, ExpressionKind::Call { .. }) {
                    return Err(AnalysisError::NotACall);
                }
            }
            Statement::Declaration {
                id,
                name,
                type_name,
                value,
            } => {
                let variable = self.analyze_binding(name, type_name.as_deref(), value.as_ref())?;
                self.annotations.set_variable(*id, variable);
            }
            Statement::Assignment { receiver, value } => {
                let target = self.analyze_expression(receiver)?;
                let actual = self.analyze_expression(value)?;
                if !matches!(receiver.kind, ExpressionKind::Access { .. }) {
                    return Err(AnalysisError::InvalidAssignmentTarget);
                }
                require_assignable(&target, &actual)?;
            }
            Statement::If {
                condition,
                then_body,
                else_body,
            } => {
                let condition = self.analyze_expression(condition)?;
                require_assignable(&Type::Boolean, &condition)?;
                if then_body.is_empty() {
                    return Err(AnalysisError::EmptyBody { construct: "if" });
                }
                self.in_child_scope(|analyzer| analyzer.analyze_block(then_body))?;
                self.in_child_scope(|analyzer| analyzer.analyze_block(else_body))?;
            }
            Statement::For { name, value, body } => {
                let iterable = self.analyze_expression(value)?;
                require_assignable(&Type::IntegerIterable, &iterable)?;
                if body.is_empty() {
                    return Err(AnalysisError::EmptyBody { construct: "for" });
                }
                self.in_child_scope(|analyzer| {
                    let variable = Variable::new(name, Type::Integer);
                    analyzer
                        .scopes
                        .define_variable(analyzer.current, name, variable)?;
                    analyzer.analyze_block(body)
                })?;
            }
            Statement::While { condition, body } => {
                let condition = self.analyze_expression(condition)?;
                require_assignable(&Type::Boolean, &condition)?;
                self.in_child_scope(|analyzer| analyzer.analyze_block(body))?;
            }
            Statement::Return(value) => {
                let expected = self
                    .return_type
                    .clone()
                    .ok_or(AnalysisError::ReturnOutsideMethod)?;
                let actual = self.analyze_expression(value)?;
                require_assignable(&expected, &actual)?;
            }
        }
        Ok(())
    }

    fn analyze_expression(&mut self, expression: &Expression) -> AnalysisResult<Type> {
        let ty = match &expression.kind {
            ExpressionKind::Literal(literal) => literal_type(literal)?,
            ExpressionKind::Group(inner) => {
                let ty = self.analyze_expression(inner)?;
                if !matches!(inner.kind, ExpressionKind::Binary { .. }) {
                    return Err(AnalysisError::InvalidGroup);
                }
                ty
            }
            ExpressionKind::Binary { op, left, right } => {
                let left = self.analyze_expression(left)?;
                let right = self.analyze_expression(right)?;
                binary_type(*op, left, right)?
            }
            ExpressionKind::Access { receiver, name } => {
                let variable = match receiver {
                    Some(receiver) => {
                        let receiver = self.analyze_expression(receiver)?;
                        receiver.field(name).cloned().ok_or_else(|| {
                            AnalysisError::UnknownField {
                                name: name.clone(),
                                type_name: receiver.name().to_string(),
                            }
                        })?
                    }
                    None => self
                        .scopes
                        .lookup_variable(self.current, name)
                        .cloned()
                        .ok_or_else(|| AnalysisError::UndefinedVariable { name: name.clone() })?,
                };
                let ty = variable.ty.clone();
                self.annotations.set_variable(expression.id, variable);
                ty
            }
            ExpressionKind::Call {
                receiver,
                name,
                arguments,
            } => {
                let arity = arguments.len();
                let function = match receiver {
                    Some(receiver) => {
                        let receiver = self.analyze_expression(receiver)?;
                        receiver.method(name, arity).cloned().ok_or_else(|| {
                            AnalysisError::UnknownMethod {
                                name: name.clone(),
                                arity,
                                type_name: receiver.name().to_string(),
                            }
                        })?
                    }
                    None => self
                        .scopes
                        .lookup_function(self.current, name, arity)
                        .cloned()
                        .ok_or_else(|| AnalysisError::UndefinedFunction {
                            name: name.clone(),
                            arity,
                        })?,
                };
                for (argument, expected) in arguments.iter().zip(&function.parameter_types) {
                    let actual = self.analyze_expression(argument)?;
                    require_assignable(expected, &actual)?;
                }
                let ty = function.return_type.clone();
                self.annotations.set_function(expression.id, function);
                ty
            }
        };
        self.annotations.set_type(expression.id, ty.clone());
        Ok(ty)
    }

    fn resolve_type(&self, name: &str) -> AnalysisResult<Type> {
        self.catalog
            .get(name)
            .cloned()
            .ok_or_else(|| AnalysisError::UnknownType {
                name: name.to_string(),
            })
    }

    fn in_child_scope<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> AnalysisResult<T>,
    ) -> AnalysisResult<T> {
        let parent = self.current;
        let scope = self.scopes.enter(parent);
        self.current = scope;
        let result = body(self);
        self.scopes.exit(scope);
        self.current = parent;
        result
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn literal_type(literal: &Literal) -> AnalysisResult<Type> {
    let ty = match literal {
        Literal::Nil => Type::Nil,
        Literal::Boolean(_) => Type::Boolean,
        Literal::Character(_) => Type::Character,
        Literal::String(_) => Type::String,
        Literal::Integer(value) => {
            if i32::try_from(value).is_err() {
                return Err(AnalysisError::OutOfRange {
                    literal: value.to_string(),
                });
            }
            Type::Integer
        }
        Literal::Decimal(value) => {
            if !decimal::is_finite(value) {
                return Err(AnalysisError::OutOfRange {
                    literal: decimal::to_plain_string(value),
                });
            }
            Type::Decimal
        }
    };
    Ok(ty)
}

fn binary_type(op: BinaryOperator, left: Type, right: Type) -> AnalysisResult<Type> {
    use BinaryOperator::*;

    match op {
        And | Or if left == Type::Boolean && right == Type::Boolean => Ok(Type::Boolean),
        _ if op.is_comparison()
            && Type::Comparable.is_assignable_from(&left)
            && Type::Comparable.is_assignable_from(&right) =>
        {
            Ok(Type::Boolean)
        }
        Add if left == Type::String || right == Type::String => Ok(Type::String),
        Add | Sub | Mul | Div
            if matches!(left, Type::Integer | Type::Decimal) && left == right =>
        {
            Ok(left)
        }
        _ => Err(AnalysisError::InvalidOperands { op, left, right }),
    }
}

/// Fails unless a value of type `actual` may be stored where `target` is expected.
pub fn require_assignable(target: &Type, actual: &Type) -> AnalysisResult<()> {
    if target.is_assignable_from(actual) {
        Ok(())
    } else {
        Err(AnalysisError::TypeMismatch {
            expected: target.clone(),
            found: actual.clone(),
        })
    }
}

pub fn analyze(source: &Source) -> AnalysisResult<AnalyzedSource<'_>> {
    Analyzer::new().analyze(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeId;
    use crate::lexer::tokenize;
    use crate::parser::parse_tokens;
    use crate::types::ObjectType;
    use indoc::indoc;

    fn parse(input: &str) -> Source {
        let tokens = tokenize(input).expect("tokenize should succeed");
        parse_tokens(&tokens).expect("parse should succeed")
    }

    fn analyze_with(analyzer: Analyzer, input: &str) -> AnalysisResult<(Source, Annotations)> {
        let source = parse(input);
        let annotations = analyzer.analyze(&source)?.annotations;
        Ok((source, annotations))
    }

    fn analyze_text(input: &str) -> AnalysisResult<(Source, Annotations)> {
        analyze_with(Analyzer::new(), input)
    }

    fn analyzer_with_range() -> Analyzer {
        let mut analyzer = Analyzer::new();
        analyzer
            .define_function(
                "range",
                vec![Type::Integer, Type::Integer],
                Type::IntegerIterable,
            )
            .expect("define range");
        analyzer
    }

    fn main_body(source: &Source) -> &[Statement] {
        &source.methods[0].body
    }

    #[test]
    fn annotates_field_and_return() {
        let (source, annotations) = analyze_text(indoc! {"
            LET x: Integer = 5;
            DEF main(): Integer DO
                RETURN x;
            END
        "})
        .expect("analysis failed");

        let field = annotations
            .variable(source.fields[0].id)
            .expect("field annotated");
        assert_eq!(field.ty, Type::Integer);

        let Statement::Return(value) = &main_body(&source)[0] else {
            panic!("expected return");
        };
        assert_eq!(annotations.type_of(value.id), Some(&Type::Integer));
        assert_eq!(
            annotations.variable(value.id).map(|v| v.name.as_str()),
            Some("x")
        );

        let main = annotations
            .function(source.methods[0].id)
            .expect("method annotated");
        assert_eq!(main.return_type, Type::Integer);
    }

    #[test]
    fn rejects_mismatched_field_value() {
        let err = analyze_text("LET x: Boolean = 1; DEF main(): Integer DO RETURN 0; END")
            .expect_err("expected failure");
        assert_eq!(
            err,
            AnalysisError::TypeMismatch {
                expected: Type::Boolean,
                found: Type::Integer,
            }
        );
    }

    #[test]
    fn infers_declaration_type_from_value() {
        let (source, annotations) = analyze_text(indoc! {"
            DEF main(): Integer DO
                LET name = \"plc\";
                print(name);
                RETURN 0;
            END
        "})
        .expect("analysis failed");
        let Statement::Declaration { id, .. } = &main_body(&source)[0] else {
            panic!("expected declaration");
        };
        assert_eq!(
            annotations.variable(*id).map(|v| v.ty.clone()),
            Some(Type::String)
        );
    }

    #[test]
    fn declaration_without_type_or_value_fails() {
        let err = analyze_text("DEF main(): Integer DO LET x; RETURN 0; END")
            .expect_err("expected failure");
        assert_eq!(
            err,
            AnalysisError::MissingType {
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn unknown_type_name_fails() {
        let err = analyze_text("LET x: Float = 1.0; DEF main(): Integer DO RETURN 0; END")
            .expect_err("expected failure");
        assert_eq!(
            err,
            AnalysisError::UnknownType {
                name: "Float".to_string()
            }
        );
    }

    #[test]
    fn integer_literals_must_fit_in_32_bits() {
        let err = analyze_text("DEF main(): Integer DO RETURN 2147483648; END")
            .expect_err("expected failure");
        assert_eq!(
            err,
            AnalysisError::OutOfRange {
                literal: "2147483648".to_string()
            }
        );
        analyze_text("DEF main(): Integer DO RETURN -2147483648; END").expect("min fits");
    }

    #[test]
    fn decimal_literals_beyond_fixed_precision_are_accepted() {
        let (source, annotations) = analyze_text(indoc! {"
            LET wide: Decimal = 100000000000000000000000000000.0;
            LET tiny: Decimal = 0.00000000000000000000000000001;
            DEF main(): Integer DO RETURN 0; END
        "})
        .expect("finite literals fit");
        for field in &source.fields {
            let value = field.value.as_ref().expect("initializer");
            assert_eq!(annotations.type_of(value.id), Some(&Type::Decimal));
        }
    }

    #[test]
    fn huge_decimal_literals_are_out_of_range() {
        let digits = "9".repeat(400);
        let input = format!("LET d: Decimal = {digits}.5; DEF main(): Integer DO RETURN 0; END");
        let err = analyze_text(&input).expect_err("expected failure");
        assert!(matches!(err, AnalysisError::OutOfRange { .. }));
    }

    #[test]
    fn requires_main_returning_integer() {
        let err = analyze_text("DEF helper(): Integer DO RETURN 1; END")
            .expect_err("expected failure");
        assert_eq!(err, AnalysisError::MissingMain);

        let err = analyze_text("DEF main(): String DO RETURN \"x\"; END")
            .expect_err("expected failure");
        assert_eq!(
            err,
            AnalysisError::TypeMismatch {
                expected: Type::Integer,
                found: Type::String,
            }
        );
    }

    #[test]
    fn methods_may_call_themselves() {
        analyze_text(indoc! {"
            DEF fact(n: Integer): Integer DO
                IF n <= 1 DO RETURN 1; END
                RETURN n * fact(n - 1);
            END
            DEF main(): Integer DO
                RETURN fact(5);
            END
        "})
        .expect("analysis failed");
    }

    #[test]
    fn same_scope_redefinition_fails() {
        let err = analyze_text(indoc! {"
            DEF main(): Integer DO
                LET x = 1;
                LET x = 2;
                RETURN x;
            END
        "})
        .expect_err("expected failure");
        assert_eq!(
            err,
            AnalysisError::Redefinition {
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn child_scope_may_shadow() {
        analyze_text(indoc! {"
            DEF main(): Integer DO
                LET x = 1;
                IF TRUE DO
                    LET x = \"inner\";
                    print(x);
                END
                RETURN x;
            END
        "})
        .expect("analysis failed");
    }

    #[test]
    fn block_bindings_do_not_escape() {
        let err = analyze_text(indoc! {"
            DEF main(): Integer DO
                WHILE FALSE DO LET y = 1; END
                RETURN y;
            END
        "})
        .expect_err("expected failure");
        assert_eq!(
            err,
            AnalysisError::UndefinedVariable {
                name: "y".to_string()
            }
        );
    }

    #[test]
    fn expression_statement_must_be_call() {
        let err = analyze_text("LET x = 1; DEF main(): Integer DO x; RETURN 0; END")
            .expect_err("expected failure");
        assert_eq!(err, AnalysisError::NotACall);
    }

    #[test]
    fn assignment_target_must_be_access() {
        let err = analyze_text(indoc! {"
            DEF f(): Integer DO RETURN 1; END
            DEF main(): Integer DO f() = 2; RETURN 0; END
        "})
        .expect_err("expected failure");
        assert_eq!(err, AnalysisError::InvalidAssignmentTarget);
    }

    #[test]
    fn group_must_wrap_binary() {
        let err = analyze_text("DEF main(): Integer DO RETURN (1); END")
            .expect_err("expected failure");
        assert_eq!(err, AnalysisError::InvalidGroup);
        analyze_text("DEF main(): Integer DO RETURN (1 + 2); END").expect("binary group");
    }

    #[test]
    fn types_binary_operators() {
        assert_eq!(
            binary_type(BinaryOperator::Add, Type::String, Type::Integer),
            Ok(Type::String)
        );
        assert_eq!(
            binary_type(BinaryOperator::Div, Type::Decimal, Type::Decimal),
            Ok(Type::Decimal)
        );
        assert_eq!(
            binary_type(BinaryOperator::Less, Type::Integer, Type::Character),
            Ok(Type::Boolean)
        );
        assert_eq!(
            binary_type(BinaryOperator::Sub, Type::Integer, Type::Decimal),
            Err(AnalysisError::InvalidOperands {
                op: BinaryOperator::Sub,
                left: Type::Integer,
                right: Type::Decimal,
            })
        );
        assert!(binary_type(BinaryOperator::And, Type::Boolean, Type::Integer).is_err());
        assert!(binary_type(BinaryOperator::Equal, Type::Boolean, Type::Boolean).is_err());
    }

    #[test]
    fn if_condition_must_be_boolean() {
        let err = analyze_text("DEF main(): Integer DO IF 1 DO print(1); END RETURN 0; END")
            .expect_err("expected failure");
        assert_eq!(
            err,
            AnalysisError::TypeMismatch {
                expected: Type::Boolean,
                found: Type::Integer,
            }
        );
    }

    #[test]
    fn for_loop_binds_integer_variable() {
        let (source, annotations) = analyze_with(
            analyzer_with_range(),
            indoc! {"
                DEF main(): Integer DO
                    FOR i IN range(0, 3) DO print(i + 1); END
                    RETURN 0;
                END
            "},
        )
        .expect("analysis failed");
        let Statement::For { value, .. } = &main_body(&source)[0] else {
            panic!("expected for");
        };
        assert_eq!(annotations.type_of(value.id), Some(&Type::IntegerIterable));
    }

    #[test]
    fn for_loop_requires_iterable() {
        let err = analyze_text("DEF main(): Integer DO FOR i IN 5 DO print(i); END RETURN 0; END")
            .expect_err("expected failure");
        assert_eq!(
            err,
            AnalysisError::TypeMismatch {
                expected: Type::IntegerIterable,
                found: Type::Integer,
            }
        );
    }

    #[test]
    fn print_resolves_to_builtin() {
        let (source, annotations) =
            analyze_text("DEF main(): Integer DO print(\"hi\"); RETURN 0; END")
                .expect("analysis failed");
        let Statement::Expression(call) = &main_body(&source)[0] else {
            panic!("expected call");
        };
        let print = annotations.function(call.id).expect("call annotated");
        assert_eq!(print.target_name, "System.out.println");
        assert_eq!(annotations.type_of(call.id), Some(&Type::Nil));
    }

    #[test]
    fn host_functions_cannot_replace_builtins() {
        let mut analyzer = Analyzer::new();
        assert_eq!(
            analyzer.define_function("print", vec![Type::String], Type::Nil),
            Err(AnalysisError::Redefinition {
                name: "print/1".to_string()
            })
        );
        analyzer
            .define_function("print", vec![], Type::Nil)
            .expect("other arities stay free");
    }

    #[test]
    fn undefined_function_reports_arity() {
        let err = analyze_text("DEF main(): Integer DO print(1, 2); RETURN 0; END")
            .expect_err("expected failure");
        assert_eq!(
            err,
            AnalysisError::UndefinedFunction {
                name: "print".to_string(),
                arity: 2,
            }
        );
    }

    fn analyzer_with_point() -> Analyzer {
        let mut catalog = TypeCatalog::standard();
        let point = catalog.register(
            ObjectType::new("Point")
                .with_field("x", Type::Integer)
                .with_method("scale", vec![Type::Integer], Type::Nil),
        );
        let mut analyzer = Analyzer::with_catalog(catalog);
        analyzer
            .define_function("origin", vec![], point)
            .expect("define origin");
        analyzer
    }

    #[test]
    fn receiver_calls_check_arguments_from_first() {
        let analyzer = analyzer_with_point();
        let err = analyze_with(
            analyzer,
            "DEF main(): Integer DO origin().scale(\"two\"); RETURN 0; END",
        )
        .expect_err("expected failure");
        assert_eq!(
            err,
            AnalysisError::TypeMismatch {
                expected: Type::Integer,
                found: Type::String,
            }
        );
    }

    #[test]
    fn resolves_object_fields_and_methods() {
        let (source, annotations) = analyze_with(
            analyzer_with_point(),
            indoc! {"
                DEF main(): Integer DO
                    LET p: Point = origin();
                    p.x = p.x + 1;
                    p.scale(2);
                    RETURN p.x;
                END
            "},
        )
        .expect("analysis failed");
        let Statement::Return(value) = &main_body(&source)[3] else {
            panic!("expected return");
        };
        assert_eq!(annotations.type_of(value.id), Some(&Type::Integer));

        let err = analyze_with(
            analyzer_with_point(),
            "DEF main(): Integer DO RETURN origin().y; END",
        )
        .expect_err("expected failure");
        assert_eq!(
            err,
            AnalysisError::UnknownField {
                name: "y".to_string(),
                type_name: "Point".to_string(),
            }
        );
    }

    #[test]
    fn return_outside_method_fails() {
        let mut analyzer = Analyzer::new();
        let statement = Statement::Return(Expression {
            id: NodeId(0),
            kind: ExpressionKind::Literal(Literal::Nil),
        });
        assert_eq!(
            analyzer.analyze_statement(&statement),
            Err(AnalysisError::ReturnOutsideMethod)
        );
    }
}
