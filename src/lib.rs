//! Toolchain for a small imperative language with typed fields and methods.
//!
//! Text flows through a fixed pipeline: [`lexer::tokenize`] produces tokens,
//! [`parser::parse_tokens`] builds a [`ast::Source`] tree, and
//! [`analyzer::analyze`] resolves names and types into a side table. The
//! analyzed tree is then either executed by [`interpreter::Interpreter`] or
//! lowered to Java by [`generator::Generator`]. Every stage fails fast on the
//! first error.
//!
//! All stages recurse over the tree, and the interpreter recurses once per
//! call. Very deep nesting or deep recursion in interpreted programs can
//! exhaust the host stack; no depth limit is enforced.
//!
//! ```
//! let execution = plc::execute("DEF main(): Integer DO print(\"hi\"); RETURN 7; END")?;
//! assert_eq!(execution.output, vec!["hi"]);
//! # Ok::<(), plc::Error>(())
//! ```

pub mod analyzer;
pub mod ast;
pub mod backend;
pub mod builtins;
pub mod decimal;
pub mod error;
pub mod generator;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod token;
pub mod types;

pub use error::Error;
pub use interpreter::{Execution, Value};

/// Lexes, parses, analyzes and runs `text`, returning `main`'s value and the printed lines.
pub fn execute(text: &str) -> Result<Execution, Error> {
    let tokens = lexer::tokenize(text)?;
    let source = parser::parse_tokens(&tokens)?;
    let analyzed = analyzer::analyze(&source)?;
    Ok(interpreter::Interpreter::new().execute(&analyzed)?)
}

/// Lexes, parses and analyzes `text`, returning the generated Java source.
pub fn generate(text: &str) -> Result<String, Error> {
    let tokens = lexer::tokenize(text)?;
    let source = parser::parse_tokens(&tokens)?;
    let analyzed = analyzer::analyze(&source)?;
    Ok(generator::Generator::new().generate(&analyzed)?)
}
