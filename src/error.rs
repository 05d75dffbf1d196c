use core::{error::Error, fmt};

use crate::ast::Operator;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurryError {
    // Lexical
    UnexpectedCharacter(char),

    // Syntactic
    Syntax(&'static str),
    UnexpectedToken(String),
    NumberOutOfRange(String),
    NestingTooDeep,

    // Runtime
    UndefinedVariable(String),
    NotCallable,
    DivisionByZero,
    IntegerOverflow,
    NotANumber(Operator),
    UndeclaredAssignment(String),
    AssignmentToLiteral,
    AlreadyExists(String),

    // Raised by the evaluation machinery rather than the program
    RecursionLimitExceeded,
}

impl CurryError {
    /// Everything except running out of evaluation depth is an ordinary program failure
    /// which leaves the environment consistent.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::RecursionLimitExceeded)
    }
}

impl fmt::Display for CurryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(character) => write!(f, "Unexpected character '{}'", character),
            Self::Syntax(message) => write!(f, "{}", message),
            Self::UnexpectedToken(text) => write!(f, "Unexpected token '{}'", text),
            Self::NumberOutOfRange(text) => write!(f, "Number literal '{}' is out of range", text),
            Self::NestingTooDeep => write!(f, "Expression is nested too deeply"),
            Self::UndefinedVariable(name) => write!(f, "Variable named '{}' does not exist", name),
            Self::NotCallable => write!(f, "Cannot call a non-function value"),
            Self::DivisionByZero => write!(f, "Cannot divide by zero"),
            Self::IntegerOverflow => write!(f, "Integer overflow"),
            Self::NotANumber(operator) => write!(f, "Cannot apply operator '{}' to a function value", operator),
            Self::UndeclaredAssignment(name) => write!(f, "Variable '{}' has not been declared", name),
            Self::AssignmentToLiteral => write!(f, "Cannot assign to a literal value"),
            Self::AlreadyExists(name) => write!(f, "Variable '{}' already exists", name),
            Self::RecursionLimitExceeded => write!(f, "Recursion limit exceeded"),
        }
    }
}

impl Error for CurryError {}
