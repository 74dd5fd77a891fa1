use anyhow::Result;

use crate::analyzer::AnalyzedSource;

/// Common interface implemented by each stage that consumes an analyzed tree.
///
/// `run` produces the backend's textual artifact: printed output for the
/// interpreter, Java source for the generator.
pub trait Backend {
    fn name(&self) -> &'static str;
    fn run(&self, analyzed: &AnalyzedSource<'_>) -> Result<String>;
}

pub fn backends() -> Vec<Box<dyn Backend>> {
    vec![
        Box::new(crate::interpreter::Interpreter::new()),
        Box::new(crate::generator::Generator::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::lexer::tokenize;
    use crate::parser::parse_tokens;
    use indoc::indoc;

    #[test]
    fn every_backend_accepts_the_same_analyzed_tree() {
        let tokens = tokenize(indoc! {r#"
            DEF main(): Integer DO
                print("one");
                print(2);
                RETURN 0;
            END
        "#})
        .expect("tokenize");
        let source = parse_tokens(&tokens).expect("parse");
        let analyzed = analyze(&source).expect("analyze");

        let outputs = backends()
            .iter()
            .map(|backend| {
                backend
                    .run(&analyzed)
                    .map(|output| (backend.name(), output))
            })
            .collect::<Result<Vec<_>>>()
            .expect("every backend runs");

        assert_eq!(outputs[0], ("interpreter", "one\n2".to_string()));
        assert_eq!(outputs[1].0, "generator");
        assert!(outputs[1].1.contains("System.out.println(\"one\");"));
    }
}
