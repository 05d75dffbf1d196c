#![no_main]

use core::fmt;

use itertools::Itertools;
use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};

#[derive(Arbitrary, Debug)]
enum CurryAtom {
    Number(u8),
    Identifier(u8),
    Garbage(String),
}

impl fmt::Display for CurryAtom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // A small pool of names so bindings and calls actually meet
            CurryAtom::Identifier(index) => write!(f, "{}", ["x", "y", "f", "g", "n"][*index as usize % 5]),
            CurryAtom::Number(value) => write!(f, "{}", value),
            CurryAtom::Garbage(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Arbitrary, Debug)]
enum CurryExpression {
    Add(Box<CurryExpression>, Box<CurryExpression>),
    Sub(Box<CurryExpression>, Box<CurryExpression>),
    Mul(Box<CurryExpression>, Box<CurryExpression>),
    Div(Box<CurryExpression>, Box<CurryExpression>),
    Eq(Box<CurryExpression>, Box<CurryExpression>),
    Assign(Box<CurryExpression>, Box<CurryExpression>),
    Call(Box<CurryExpression>, Vec<CurryExpression>),
    Func(CurryAtom, Box<CurryExpression>),
    If(Box<CurryExpression>, Box<CurryExpression>, Box<CurryExpression>),
    Paren(Box<CurryExpression>),

    Atom(CurryAtom),
}

impl fmt::Display for CurryExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurryExpression::Add(a, b) => write!(f, "{} + {}", a, b),
            CurryExpression::Sub(a, b) => write!(f, "{} - {}", a, b),
            CurryExpression::Mul(a, b) => write!(f, "{} * {}", a, b),
            CurryExpression::Div(a, b) => write!(f, "{} / {}", a, b),
            CurryExpression::Eq(a, b) => write!(f, "{} == {}", a, b),
            CurryExpression::Assign(a, b) => write!(f, "{} = {}", a, b),
            CurryExpression::Call(callee, arguments) => {
                let arguments = arguments.iter().map(|argument| format!("({})", argument)).join("");
                write!(f, "{}{}", callee, arguments)
            }
            CurryExpression::Func(parameter, body) => write!(f, "func {}' {}", parameter, body),
            CurryExpression::If(c, t, e) => write!(f, "if {} then {} else {}", c, t, e),
            CurryExpression::Paren(inner) => write!(f, "({})", inner),
            CurryExpression::Atom(atom) => atom.fmt(f),
        }
    }
}

#[derive(Arbitrary, Debug)]
enum CurryLine {
    Let(CurryAtom, CurryExpression),
    Expression(CurryExpression),
}

impl fmt::Display for CurryLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurryLine::Let(name, expression) => write!(f, "let {} = {}", name, expression),
            CurryLine::Expression(expression) => expression.fmt(f),
        }
    }
}

fuzz_target!(|lines: Vec<CurryLine>| {
    let mut context = curry::EvaluationContext::with_config(curry::EvaluationConfig { max_depth: 64 });

    for line in lines {
        let before = context.environment().clone();
        if context.evaluate_str(&line.to_string()).is_err() {
            assert_eq!(context.environment(), &before);
        }
    }
});
