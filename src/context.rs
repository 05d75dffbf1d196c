use log::{debug, warn};

use crate::{
    ast::{Node, Value},
    config::EvaluationConfig,
    error::CurryError,
    interpreter::{evaluate, EvaluationDepth, Environment},
    lexer::tokenize,
    parser::Parser,
};


/// An evaluation context that takes lines of source and evaluates them to values,
/// keeping the environment alive between lines.
///
/// A line that fails is rolled back completely, so the environment afterwards is
/// exactly what it was before that line. This includes running out of evaluation depth,
/// which can interrupt an evaluation halfway through its assignments.
#[derive(Debug, Default)]
pub struct EvaluationContext {
    environment: Environment,
    config: EvaluationConfig,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvaluationConfig) -> Self {
        Self { environment: Environment::new(), config }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Evaluates one line. Blank lines produce `Ok(None)`.
    pub fn evaluate_str(&mut self, input: &str) -> Result<Option<Value>, CurryError> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() { return Ok(None); }

        debug!("evaluating {} tokens: {}", tokens.len(), input.trim());
        let program = Parser::new(tokens).parse_program();
        self.evaluate_node(&program).map(Some)
    }

    pub fn evaluate_node(&mut self, program: &Node) -> Result<Value, CurryError> {
        let snapshot = self.environment.clone();
        let mut depth = EvaluationDepth::new(self.config.max_depth);

        let result = evaluate(program, &mut self.environment, &mut depth);
        if let Err(error) = &result {
            if error.is_recoverable() {
                debug!("evaluation failed: {}", error);
            } else {
                warn!("{}, discarding changes to the environment", error);
            }
            self.environment = snapshot;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(context: &mut EvaluationContext, source: &str) -> String {
        match context.evaluate_str(source) {
            Ok(Some(value)) => value.to_string(),
            Ok(None) => String::new(),
            Err(error) => error.to_string(),
        }
    }

    #[test]
    fn environment_persists_between_lines() {
        let mut context = EvaluationContext::new();
        assert_eq!(evaluate(&mut context, "let x = 5"), "5");
        assert_eq!(evaluate(&mut context, "x * 2"), "10");
        assert_eq!(evaluate(&mut context, "let x = 5"), "Variable 'x' already exists");
        assert_eq!(evaluate(&mut context, "x"), "5");
    }

    #[test]
    fn blank_lines_do_nothing() {
        let mut context = EvaluationContext::new();
        assert_eq!(context.evaluate_str(""), Ok(None));
        assert_eq!(context.evaluate_str("   \t "), Ok(None));
        assert!(context.environment().is_empty());
    }

    #[test]
    fn lexical_and_syntax_errors_leave_the_environment_alone() {
        let mut context = EvaluationContext::new();
        evaluate(&mut context, "let x = 1");
        assert_eq!(evaluate(&mut context, "x = 2 $"), "Unexpected character '$'");
        assert_eq!(evaluate(&mut context, "(x = 3"), "Expected closing parentheses");
        assert_eq!(evaluate(&mut context, "x"), "1");
    }

    #[test]
    fn recursion_limit_rolls_back_the_line() {
        let mut context = EvaluationContext::with_config(EvaluationConfig { max_depth: 50 });
        evaluate(&mut context, "let count = 0");
        evaluate(&mut context, "let spin = func n' if (count = count + 1) then spin(n) else 0");
        let before = context.environment().clone();

        assert_eq!(context.evaluate_str("spin(1)"), Err(CurryError::RecursionLimitExceeded));
        assert_eq!(context.environment(), &before);
        assert_eq!(evaluate(&mut context, "count"), "0");

        // The session carries on afterwards
        assert_eq!(evaluate(&mut context, "count = 7"), "7");
    }

    #[test]
    fn failed_lines_discard_their_assignments() {
        let mut context = EvaluationContext::new();
        evaluate(&mut context, "let x = 1");
        assert_eq!(evaluate(&mut context, "(x = 5) / 0"), "Cannot divide by zero");
        assert_eq!(evaluate(&mut context, "x"), "1");
        assert_eq!(evaluate(&mut context, "(x = 5) / 1"), "5");
        assert_eq!(evaluate(&mut context, "x"), "5");
    }
}
