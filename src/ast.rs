use core::fmt;
use std::rc::Rc;

use crate::error::CurryError;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Assign,
    Equals,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Self::Assign),
            "==" => Some(Self::Equals),
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Equals => "==",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A first-class single-argument function. It holds no environment of its own:
/// the body is evaluated against whatever environment is current at call time.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub parameter: String,
    pub body: Rc<Node>,
}

// Expression tree produced by the parser. Nodes are never mutated after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Value(i64),
    Variable(String),
    Func(Function),
    Call(Box<Node>, Box<Node>),
    Operation(Box<Node>, Operator, Box<Node>),
    If(Box<Node>, Box<Node>, Box<Node>),
    Bind(String, Box<Node>),
    Error(CurryError),
}

impl Node {
    pub fn func(parameter: impl Into<String>, body: Node) -> Self {
        Self::Func(Function { parameter: parameter.into(), body: Rc::new(body) })
    }

    pub fn call(callee: Node, argument: Node) -> Self {
        Self::Call(Box::new(callee), Box::new(argument))
    }

    pub fn operation(left: Node, operator: Operator, right: Node) -> Self {
        Self::Operation(Box::new(left), operator, Box::new(right))
    }

    pub fn if_else(condition: Node, then_branch: Node, else_branch: Node) -> Self {
        Self::If(Box::new(condition), Box::new(then_branch), Box::new(else_branch))
    }

    pub fn bind(name: impl Into<String>, expression: Node) -> Self {
        Self::Bind(name.into(), Box::new(expression))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// The result of evaluating a node: either an integer or a function.
/// Booleans are represented by the integers 0 and 1.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(i64),
    Function(Function),
}

impl Value {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Function(_) => None
        }
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Number(0))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Number(value as i64)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{}", number),
            Self::Function(function) => write!(f, "[function of '{}']", function.parameter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_round_trip_their_symbols() {
        for symbol in ["=", "==", "+", "-", "*", "/"] {
            let operator = Operator::from_symbol(symbol).unwrap();
            assert_eq!(operator.symbol(), symbol);
        }
        assert_eq!(Operator::from_symbol("'"), None);
    }

    #[test]
    fn values_render_for_display() {
        assert_eq!(Value::Number(-12).to_string(), "-12");
        let function = Function { parameter: "x".into(), body: Rc::new(Node::Variable("x".into())) };
        assert_eq!(Value::Function(function).to_string(), "[function of 'x']");
    }

    #[test]
    fn only_zero_is_falsy() {
        assert!(!Value::Number(0).is_truthy());
        assert!(Value::Number(-1).is_truthy());
        assert!(Value::Function(Function { parameter: "a".into(), body: Rc::new(Node::Value(0)) }).is_truthy());
        assert_eq!(Value::from(true), Value::Number(1));
    }
}
