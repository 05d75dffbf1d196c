mod ast;
mod config;
mod context;
mod error;
mod interpreter;
mod lexer;
mod parser;

#[cfg(test)]
mod test_utils;

pub use ast::{Function, Node, Operator, Value};
pub use config::{EvaluationConfig, DEFAULT_MAX_DEPTH};
pub use context::EvaluationContext;
pub use error::CurryError;
pub use interpreter::{evaluate, EvaluationDepth, Environment, EvaluationResult};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parser::{parse, Parser};
