use core::fmt;
use std::collections::HashMap;

use itertools::Itertools;
use log::trace;

use crate::{ast::{Function, Node, Operator, Value}, error::CurryError};

pub type EvaluationResult = Result<Value, CurryError>;


/// The single store of bindings shared by every evaluation in a session.
///
/// Functions do not capture it. A call temporarily binds its parameter here and
/// puts back whatever was bound before once the body has been evaluated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn insert(&mut self, name: &str, value: Value) -> Option<Value> {
        self.bindings.insert(name.to_owned(), value)
    }

    // Puts a binding back the way it was before `insert` replaced it
    pub(crate) fn restore(&mut self, name: &str, previous: Option<Value>) {
        match previous {
            Some(value) => { self.bindings.insert(name.to_owned(), value); },
            None => { self.bindings.remove(name); }
        }
    }

    fn update(&mut self, name: &str, value: Value) -> EvaluationResult {
        match self.bindings.get_mut(name) {
            Some(binding) => {
                *binding = value.clone();
                Ok(value)
            }
            None => Err(CurryError::UndeclaredAssignment(name.to_owned()))
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self.bindings.iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(name, value)| format!("{} = {}", name, value))
            .join(", ");
        write!(f, "{{{}}}", bindings)
    }
}

/// Counts how deeply evaluation has nested. Every node evaluated adds a level,
/// so runaway recursion and deeply nested bodies are reported instead of
/// exhausting the host stack.
#[derive(Debug, Clone)]
pub struct EvaluationDepth {
    current: usize,
    limit: usize,
}

impl EvaluationDepth {
    pub fn new(limit: usize) -> Self {
        Self { current: 0, limit }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    fn enter(&mut self) -> Result<(), CurryError> {
        if self.current >= self.limit { return Err(CurryError::RecursionLimitExceeded); }
        self.current += 1;
        Ok(())
    }

    fn exit(&mut self) {
        self.current -= 1;
    }
}

fn evaluate_variable(name: &str, environment: &Environment) -> EvaluationResult {
    environment.get(name)
        .cloned()
        .ok_or_else(|| CurryError::UndefinedVariable(name.to_owned()))
}

fn evaluate_call(callee: &Node, argument: &Node, environment: &mut Environment, depth: &mut EvaluationDepth) -> EvaluationResult {
    // The callee is evaluated first and must be a function. The argument is bound to the
    // parameter for the duration of the body, after which the previous binding (or its
    // absence) is put back whether or not the body succeeded.

    let function = match evaluate(callee, environment, depth)? {
        Value::Function(function) => function,
        Value::Number(_) => return Err(CurryError::NotCallable)
    };
    let argument = evaluate(argument, environment, depth)?;

    trace!("calling function of '{}' at depth {}", function.parameter, depth.current());

    let Function { parameter, body } = &function;
    let previous = environment.insert(parameter, argument);
    let result = evaluate(body, environment, depth);
    environment.restore(parameter, previous);

    result
}

fn evaluate_assignment(target: &Node, value: &Node, environment: &mut Environment, depth: &mut EvaluationDepth) -> EvaluationResult {
    // Only an already declared variable can be assigned to. The value is computed
    // before the target is checked.

    let name = match target {
        Node::Variable(name) => name,
        _ => return Err(CurryError::AssignmentToLiteral)
    };

    let value = evaluate(value, environment, depth)?;
    environment.update(name, value)
}

fn evaluate_operation(left: &Node, operator: Operator, right: &Node, environment: &mut Environment, depth: &mut EvaluationDepth) -> EvaluationResult {
    let apply: fn(i64, i64) -> Option<i64> = match operator {
        Operator::Assign => return evaluate_assignment(left, right, environment, depth),
        Operator::Add => i64::checked_add,
        Operator::Subtract => i64::checked_sub,
        Operator::Multiply => i64::checked_mul,
        // Truncates toward zero
        Operator::Divide => i64::checked_div,
        Operator::Equals => |left, right| Some((left == right) as i64),
    };

    let left = evaluate(left, environment, depth)?;
    let right = evaluate(right, environment, depth)?;

    let (left, right) = match (left.as_number(), right.as_number()) {
        (Some(left), Some(right)) => (left, right),
        _ => return Err(CurryError::NotANumber(operator))
    };
    if operator == Operator::Divide && right == 0 { return Err(CurryError::DivisionByZero); }

    apply(left, right).map(Value::Number).ok_or(CurryError::IntegerOverflow)
}

fn evaluate_if(condition: &Node, then_branch: &Node, else_branch: &Node, environment: &mut Environment, depth: &mut EvaluationDepth) -> EvaluationResult {
    // Zero is false. Every other number, and every function, is true

    if evaluate(condition, environment, depth)?.is_truthy() {
        evaluate(then_branch, environment, depth)
    } else {
        evaluate(else_branch, environment, depth)
    }
}

fn evaluate_bind(name: &str, expression: &Node, environment: &mut Environment, depth: &mut EvaluationDepth) -> EvaluationResult {
    // `let` never shadows or redeclares

    if environment.contains(name) { return Err(CurryError::AlreadyExists(name.to_owned())); }

    let value = evaluate(expression, environment, depth)?;
    environment.insert(name, value.clone());
    Ok(value)
}

pub fn evaluate(node: &Node, environment: &mut Environment, depth: &mut EvaluationDepth) -> EvaluationResult {
    depth.enter()?;

    let result = match node {
        Node::Value(number) => Ok(Value::Number(*number)),
        Node::Variable(name) => evaluate_variable(name, environment),
        Node::Func(function) => Ok(Value::Function(function.clone())),
        Node::Call(callee, argument) => evaluate_call(callee, argument, environment, depth),
        Node::Operation(left, operator, right) => evaluate_operation(left, *operator, right, environment, depth),
        Node::If(condition, then_branch, else_branch) => evaluate_if(condition, then_branch, else_branch, environment, depth),
        Node::Bind(name, expression) => evaluate_bind(name, expression, environment, depth),
        Node::Error(error) => Err(error.clone()),
    };

    depth.exit();
    result
}

impl Node {
    /// Evaluates this node against `environment`, allowing evaluation to nest at most `max_depth` levels deep.
    pub fn evaluate(&self, environment: &mut Environment, max_depth: usize) -> EvaluationResult {
        evaluate(self, environment, &mut EvaluationDepth::new(max_depth))
    }
}
