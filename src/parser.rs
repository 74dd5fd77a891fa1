use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::ast::{
    BinaryOperator, Expression, ExpressionKind, Field, Literal, Method, NodeId, Parameter, Source,
    Statement,
};
use crate::token::{Token, TokenKind};

mod cursor;
pub mod error;

use cursor::TokenCursor;
pub use error::{ParseError, ParseResult};

const LOGICAL_OPERATORS: [&str; 2] = ["AND", "OR"];
const EQUALITY_OPERATORS: [&str; 6] = ["<=", ">=", "==", "!=", "<", ">"];
const ADDITIVE_OPERATORS: [&str; 2] = ["+", "-"];
const MULTIPLICATIVE_OPERATORS: [&str; 2] = ["*", "/"];

/// Recursive-descent parser. Each grammar rule is one method; binary levels
/// accumulate left-associative nodes in a loop.
pub struct Parser<'t, 'a> {
    tokens: TokenCursor<'t, 'a>,
    next_id: u32,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens: TokenCursor::new(tokens),
            next_id: 0,
        }
    }

    pub fn parse_source(mut self) -> ParseResult<Source> {
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        while self.tokens.has(0) {
            if self.tokens.peek_literal("LET") {
                if !methods.is_empty() {
                    return Err(ParseError::FieldAfterMethod {
                        position: self.tokens.error_position(),
                    });
                }
                fields.push(self.parse_field()?);
            } else if self.tokens.peek_literal("DEF") {
                methods.push(self.parse_method()?);
            } else {
                return Err(self.error("LET or DEF"));
            }
        }
        Ok(Source { fields, methods })
    }

    fn parse_field(&mut self) -> ParseResult<Field> {
        self.expect_literal("LET")?;
        let (name, type_name, value) = self.parse_binding()?;
        Ok(Field {
            id: self.next_id(),
            name,
            type_name,
            value,
        })
    }

    /// `identifier (':' identifier)? ('=' expression)? ';'`, shared by fields and declarations.
    fn parse_binding(&mut self) -> ParseResult<(String, Option<String>, Option<Expression>)> {
        let name = self.expect_identifier("name")?;
        let type_name = if self.tokens.match_literal(":") {
            Some(self.expect_identifier("type name")?)
        } else {
            None
        };
        let value = if self.tokens.match_literal("=") {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_literal(";")?;
        Ok((name, type_name, value))
    }

    fn parse_method(&mut self) -> ParseResult<Method> {
        self.expect_literal("DEF")?;
        let name = self.expect_identifier("method name")?;
        self.expect_literal("(")?;

        let mut parameters = Vec::new();
        if self.tokens.peek_kind(TokenKind::Identifier) {
            loop {
                let name = self.expect_identifier("parameter name")?;
                self.expect_literal(":")?;
                let type_name = self.expect_identifier("parameter type")?;
                parameters.push(Parameter { name, type_name });
                if !self.tokens.match_literal(",") {
                    break;
                }
            }
        }
        self.expect_literal(")")?;

        let return_type_name = if self.tokens.match_literal(":") {
            Some(self.expect_identifier("return type")?)
        } else {
            None
        };

        self.expect_literal("DO")?;
        let body = self.parse_required_block("method", &["END"])?;
        self.expect_literal("END")?;

        Ok(Method {
            id: self.next_id(),
            name,
            parameters,
            return_type_name,
            body,
        })
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        if self.tokens.peek_literal("LET") {
            return self.parse_declaration();
        }
        if self.tokens.peek_literal("IF") {
            return self.parse_if();
        }
        if self.tokens.peek_literal("FOR") {
            return self.parse_for();
        }
        if self.tokens.peek_literal("WHILE") {
            return self.parse_while();
        }
        if self.tokens.peek_literal("RETURN") {
            return self.parse_return();
        }

        let expression = self.parse_expression()?;
        if self.tokens.match_literal("=") {
            let value = self.parse_expression()?;
            self.expect_literal(";")?;
            return Ok(Statement::Assignment {
                receiver: expression,
                value,
            });
        }
        self.expect_literal(";")?;
        Ok(Statement::Expression(expression))
    }

    fn parse_declaration(&mut self) -> ParseResult<Statement> {
        self.expect_literal("LET")?;
        let (name, type_name, value) = self.parse_binding()?;
        Ok(Statement::Declaration {
            id: self.next_id(),
            name,
            type_name,
            value,
        })
    }

    fn parse_if(&mut self) -> ParseResult<Statement> {
        self.expect_literal("IF")?;
        let condition = self.parse_expression()?;
        self.expect_literal("DO")?;
        let then_body = self.parse_required_block("if", &["ELSE", "END"])?;
        let else_body = if self.tokens.match_literal("ELSE") {
            self.parse_block(&["END"])?
        } else {
            Vec::new()
        };
        self.expect_literal("END")?;
        Ok(Statement::If {
            condition,
            then_body,
            else_body,
        })
    }

    fn parse_for(&mut self) -> ParseResult<Statement> {
        self.expect_literal("FOR")?;
        let name = self.expect_identifier("loop variable")?;
        self.expect_literal("IN")?;
        let value = self.parse_expression()?;
        self.expect_literal("DO")?;
        let body = self.parse_required_block("for", &["END"])?;
        self.expect_literal("END")?;
        Ok(Statement::For { name, value, body })
    }

    fn parse_while(&mut self) -> ParseResult<Statement> {
        self.expect_literal("WHILE")?;
        let condition = self.parse_expression()?;
        self.expect_literal("DO")?;
        let body = self.parse_required_block("while", &["END"])?;
        self.expect_literal("END")?;
        Ok(Statement::While { condition, body })
    }

    fn parse_return(&mut self) -> ParseResult<Statement> {
        self.expect_literal("RETURN")?;
        let value = self.parse_expression()?;
        self.expect_literal(";")?;
        Ok(Statement::Return(value))
    }

    fn parse_block(&mut self, terminators: &[&str]) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while self.tokens.has(0)
            && !terminators
                .iter()
                .any(|terminator| self.tokens.peek_literal(terminator))
        {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_required_block(
        &mut self,
        construct: &'static str,
        terminators: &[&str],
    ) -> ParseResult<Vec<Statement>> {
        let position = self.tokens.error_position();
        let statements = self.parse_block(terminators)?;
        if statements.is_empty() {
            return Err(ParseError::EmptyBody {
                construct,
                position,
            });
        }
        Ok(statements)
    }

    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_logical()
    }

    fn parse_logical(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(&LOGICAL_OPERATORS, Self::parse_equality)
    }

    fn parse_equality(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(&EQUALITY_OPERATORS, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(&ADDITIVE_OPERATORS, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(&MULTIPLICATIVE_OPERATORS, Self::parse_secondary)
    }

    fn parse_binary_level(
        &mut self,
        operators: &[&str],
        operand: fn(&mut Self) -> ParseResult<Expression>,
    ) -> ParseResult<Expression> {
        let mut expr = operand(self)?;
        while let Some(op) = self.match_operator(operators) {
            let right = operand(self)?;
            expr = self.node(ExpressionKind::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn match_operator(&mut self, operators: &[&str]) -> Option<BinaryOperator> {
        let symbol = operators
            .iter()
            .find(|symbol| self.tokens.peek_literal(symbol))?;
        self.tokens.advance();
        BinaryOperator::from_symbol(symbol)
    }

    fn parse_secondary(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_primary()?;
        while self.tokens.match_literal(".") {
            let name = self.expect_identifier("field or method name")?;
            if self.tokens.match_literal("(") {
                let arguments = self.parse_arguments()?;
                return Ok(self.node(ExpressionKind::Call {
                    receiver: Some(Box::new(expr)),
                    name,
                    arguments,
                }));
            }
            expr = self.node(ExpressionKind::Access {
                receiver: Some(Box::new(expr)),
                name,
            });
        }
        Ok(expr)
    }

    /// Parses the argument list after an opening parenthesis, including the closing one.
    fn parse_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        let mut arguments = Vec::new();
        if self.tokens.match_literal(")") {
            return Ok(arguments);
        }
        loop {
            arguments.push(self.parse_expression()?);
            if !self.tokens.match_literal(",") {
                break;
            }
        }
        self.expect_literal(")")?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let Some(token) = self.tokens.get(0).copied() else {
            return Err(self.error("expression"));
        };
        let kind = match token.kind {
            TokenKind::Identifier => {
                self.tokens.advance();
                match token.literal {
                    "NIL" => ExpressionKind::Literal(Literal::Nil),
                    "TRUE" => ExpressionKind::Literal(Literal::Boolean(true)),
                    "FALSE" => ExpressionKind::Literal(Literal::Boolean(false)),
                    name if self.tokens.match_literal("(") => ExpressionKind::Call {
                        receiver: None,
                        name: name.to_string(),
                        arguments: self.parse_arguments()?,
                    },
                    name => ExpressionKind::Access {
                        receiver: None,
                        name: name.to_string(),
                    },
                }
            }
            TokenKind::Integer => {
                self.tokens.advance();
                let digits = token.literal.strip_prefix('+').unwrap_or(token.literal);
                let value = BigInt::from_str(digits).map_err(|_| invalid_literal(&token))?;
                ExpressionKind::Literal(Literal::Integer(value))
            }
            TokenKind::Decimal => {
                self.tokens.advance();
                let text = token.literal.strip_prefix('+').unwrap_or(token.literal);
                let value = BigDecimal::from_str(text).map_err(|_| invalid_literal(&token))?;
                ExpressionKind::Literal(Literal::Decimal(value))
            }
            TokenKind::Character => {
                self.tokens.advance();
                let mut chars = unescape(strip_quotes(token.literal))
                    .ok_or_else(|| invalid_literal(&token))?
                    .into_iter();
                match (chars.next(), chars.next()) {
                    (Some(value), None) => ExpressionKind::Literal(Literal::Character(value)),
                    _ => return Err(invalid_literal(&token)),
                }
            }
            TokenKind::String => {
                self.tokens.advance();
                let value = unescape(strip_quotes(token.literal))
                    .ok_or_else(|| invalid_literal(&token))?;
                ExpressionKind::Literal(Literal::String(value.into_iter().collect()))
            }
            TokenKind::Operator if token.literal == "(" => {
                self.tokens.advance();
                let inner = self.parse_expression()?;
                self.expect_literal(")")?;
                ExpressionKind::Group(Box::new(inner))
            }
            TokenKind::Operator => return Err(self.error("expression")),
        };
        Ok(self.node(kind))
    }

    fn expect_literal(&mut self, literal: &str) -> ParseResult<()> {
        if self.tokens.match_literal(literal) {
            Ok(())
        } else {
            Err(self.error(&format!("'{literal}'")))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> ParseResult<String> {
        match self.tokens.match_kind(TokenKind::Identifier) {
            Some(token) => Ok(token.literal.to_string()),
            None => Err(self.error(what)),
        }
    }

    fn node(&mut self, kind: ExpressionKind) -> Expression {
        Expression {
            id: self.next_id(),
            kind,
        }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn error(&self, expected: &str) -> ParseError {
        let found = match self.tokens.get(0) {
            Some(token) => format!("{} '{}'", token.kind, token.literal),
            None => "end of input".to_string(),
        };
        ParseError::Expected {
            expected: expected.to_string(),
            found,
            position: self.tokens.error_position(),
        }
    }
}

fn invalid_literal(token: &Token<'_>) -> ParseError {
    ParseError::InvalidLiteral {
        literal: token.literal.to_string(),
        position: token.offset,
    }
}

fn strip_quotes(literal: &str) -> &str {
    let mut chars = literal.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Decodes the escape sequences the lexer accepts. `None` on anything else.
fn unescape(body: &str) -> Option<Vec<char>> {
    let mut decoded = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'b' => '\u{8}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '\'' => '\'',
            '"' => '"',
            '\\' => '\\',
            _ => return None,
        };
        decoded.push(escaped);
    }
    Some(decoded)
}

#[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
pub fn parse_tokens(tokens: &[Token<'_>]) -> ParseResult<Source> {
    let source = Parser::new(tokens).parse_source()?;
    tracing::debug!(
        fields = source.fields.len(),
        methods = source.methods.len(),
        "parsed source"
    );
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use indoc::indoc;

    fn parse(input: &str) -> ParseResult<Source> {
        let tokens = tokenize(input).expect("tokenize should succeed");
        parse_tokens(&tokens)
    }

    fn parse_expr(input: &str) -> Expression {
        let tokens = tokenize(input).expect("tokenize should succeed");
        Parser::new(&tokens)
            .parse_expression()
            .expect("parse should succeed")
    }

    fn main_body(source: &Source) -> &[Statement] {
        &source.methods[0].body
    }

    #[test]
    fn parses_simple_program() {
        let source = parse(indoc! {"
            LET x: Integer = 5;
            DEF main(): Integer DO
                RETURN x;
            END
        "})
        .expect("parse failed");

        assert_eq!(source.fields.len(), 1);
        let field = &source.fields[0];
        assert_eq!(field.name, "x");
        assert_eq!(field.type_name.as_deref(), Some("Integer"));
        assert_eq!(field.value.as_ref().map(ToString::to_string).as_deref(), Some("5"));

        assert_eq!(source.methods.len(), 1);
        let method = &source.methods[0];
        assert_eq!(method.name, "main");
        assert!(method.parameters.is_empty());
        assert_eq!(method.return_type_name.as_deref(), Some("Integer"));
        match main_body(&source) {
            [Statement::Return(value)] => assert_eq!(value.to_string(), "x"),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn binary_operators_are_left_associative() {
        assert_eq!(parse_expr("1 - 2 - 3").to_string(), "((1 - 2) - 3)");
        assert_eq!(parse_expr("a AND b OR c").to_string(), "((a AND b) OR c)");
    }

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        assert_eq!(parse_expr("1 + 2 * 3").to_string(), "(1 + (2 * 3))");
        assert_eq!(parse_expr("1 < 2 + 3 AND x").to_string(), "((1 < (2 + 3)) AND x)");
    }

    #[test]
    fn parses_groups_and_receiver_chains() {
        assert_eq!(parse_expr("(1 + 2) * 3").to_string(), "((1 + 2) * 3)");
        assert_eq!(parse_expr("a.b.c").to_string(), "a.b.c");
        assert_eq!(parse_expr("a.b.go(1, x)").to_string(), "a.b.go(1, x)");
        assert_eq!(parse_expr("f()").to_string(), "f()");
    }

    #[test]
    fn receiver_call_terminates_chain() {
        let tokens = tokenize("a.go().b").expect("tokenize should succeed");
        let mut parser = Parser::new(&tokens);
        let expr = parser.parse_expression().expect("parse should succeed");
        assert_eq!(expr.to_string(), "a.go()");
        assert!(parser.tokens.peek_literal("."));
    }

    #[test]
    fn decodes_literals() {
        let expr = parse_expr(r#""a\tb\\""#);
        assert_eq!(
            expr.kind,
            ExpressionKind::Literal(Literal::String("a\tb\\".to_string()))
        );
        let expr = parse_expr(r"'\n'");
        assert_eq!(expr.kind, ExpressionKind::Literal(Literal::Character('\n')));
        let expr = parse_expr("-12");
        assert_eq!(
            expr.kind,
            ExpressionKind::Literal(Literal::Integer(BigInt::from(-12)))
        );
        let expr = parse_expr("+1.50");
        let ExpressionKind::Literal(Literal::Decimal(value)) = &expr.kind else {
            panic!("expected decimal literal, got {expr:?}");
        };
        assert_eq!(value.as_bigint_and_exponent(), (BigInt::from(150), 2));
        assert_eq!(parse_expr("NIL").kind, ExpressionKind::Literal(Literal::Nil));
    }

    #[test]
    fn distinguishes_assignment_from_expression_statement() {
        let source = parse(indoc! {"
            DEF main() DO
                x.y = 1;
                print(x);
                LET z;
            END
        "})
        .expect("parse failed");
        match main_body(&source) {
            [
                Statement::Assignment { receiver, value },
                Statement::Expression(call),
                Statement::Declaration {
                    name,
                    type_name: None,
                    value: None,
                    ..
                },
            ] => {
                assert_eq!(receiver.to_string(), "x.y");
                assert_eq!(value.to_string(), "1");
                assert_eq!(call.to_string(), "print(x)");
                assert_eq!(name, "z");
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn parses_control_flow() {
        let source = parse(indoc! {"
            DEF main(n: Integer, s: String): Integer DO
                IF n > 0 DO print(s); ELSE print(n); END
                IF TRUE DO print(1); END
                FOR i IN range(0, n) DO print(i); END
                WHILE n != 0 DO n = n - 1; END
                RETURN n;
            END
        "})
        .expect("parse failed");
        let method = &source.methods[0];
        assert_eq!(
            method.parameters,
            vec![
                Parameter {
                    name: "n".to_string(),
                    type_name: "Integer".to_string()
                },
                Parameter {
                    name: "s".to_string(),
                    type_name: "String".to_string()
                },
            ]
        );
        match main_body(&source) {
            [
                Statement::If {
                    else_body: first_else,
                    ..
                },
                Statement::If {
                    else_body: second_else,
                    ..
                },
                Statement::For { name, value, .. },
                Statement::While { condition, .. },
                Statement::Return(_),
            ] => {
                assert_eq!(first_else.len(), 1);
                assert!(second_else.is_empty());
                assert_eq!(name, "i");
                assert_eq!(value.to_string(), "range(0, n)");
                assert_eq!(condition.to_string(), "(n != 0)");
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn assigns_unique_node_ids() {
        let source = parse("LET a = 1 + 2; DEF main() DO print(a); END").expect("parse failed");
        let mut ids = Vec::new();
        let field = &source.fields[0];
        ids.push(field.id);
        if let Some(Expression {
            id,
            kind: ExpressionKind::Binary { left, right, .. },
        }) = &field.value
        {
            ids.extend([*id, left.id, right.id]);
        }
        ids.push(source.methods[0].id);
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert_eq!(count, 5);
    }

    #[test]
    fn errors_on_field_after_method() {
        let err = parse("DEF main() DO print(1); END LET x = 1;").expect_err("expected failure");
        assert_eq!(err, ParseError::FieldAfterMethod { position: 28 });
    }

    #[test]
    fn errors_on_empty_bodies() {
        let err = parse("DEF main() DO END").expect_err("expected failure");
        assert!(matches!(
            err,
            ParseError::EmptyBody {
                construct: "method",
                ..
            }
        ));

        let err = parse("DEF main() DO WHILE x DO END END").expect_err("expected failure");
        assert!(matches!(
            err,
            ParseError::EmptyBody {
                construct: "while",
                ..
            }
        ));
    }

    #[test]
    fn missing_semicolon_at_end_reports_end_of_last_token() {
        let err = parse("LET x = 1").expect_err("expected failure");
        assert_eq!(
            err,
            ParseError::Expected {
                expected: "';'".to_string(),
                found: "end of input".to_string(),
                position: 9,
            }
        );
    }

    #[test]
    fn errors_on_dangling_operator() {
        let err = parse("LET x = 1 +").expect_err("expected failure");
        assert_eq!(err.position(), 11);
    }

    #[test]
    fn errors_on_unexpected_top_level_token() {
        let err = parse("print(1);").expect_err("expected failure");
        assert!(err.to_string().contains("Expected LET or DEF"));
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn errors_on_missing_parameter_type() {
        let err = parse("DEF f(a) DO print(a); END").expect_err("expected failure");
        assert_eq!(err.position(), 7);
    }

    #[test]
    fn valid_programs_always_parse() {
        let programs = [
            "LET x: Integer; DEF main(): Integer DO RETURN 0; END",
            "DEF main(): Integer DO LET s = \"a\" + 'b'; print(s); RETURN 1; END",
            "DEF f(a: Decimal): Decimal DO RETURN (a * 2.0) / 1.5; END DEF main(): Integer DO RETURN 0; END",
        ];
        for program in programs {
            parse(program).unwrap_or_else(|err| panic!("{program}: {err}"));
        }
    }
}
