use core::fmt;

use logos::Logos;

use crate::error::CurryError;


const KEYWORDS: [&str; 5] = ["let", "func", "if", "then", "else"];

// Raw lexemes as recognised by logos. Words are classified afterwards so that
// the offending character of a malformed word can be reported. Words are ASCII
// only; any other letter or digit is an unexpected character.
#[derive(Debug, Logos)]
#[logos(skip r"\s+")]
enum Lexeme<'a> {
    #[token("(", |lex| lex.slice())]
    #[token(")", |lex| lex.slice())]
    Paren(&'a str),

    #[token("==", |lex| lex.slice())]
    #[token("+", |lex| lex.slice())]
    #[token("-", |lex| lex.slice())]
    #[token("*", |lex| lex.slice())]
    #[token("/", |lex| lex.slice())]
    #[token("=", |lex| lex.slice())]
    #[token("'", |lex| lex.slice())]
    Operator(&'a str),

    #[regex(r"[A-Za-z0-9_]+", |lex| lex.slice())]
    Word(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Error,
    EndOfInput,
    Paren,
    Operator,
    Number,
    Identifier,
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    pub(crate) fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?}, \"{}\")", self.kind, self.text)
    }
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => (first.is_ascii_alphabetic() || first == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        None => false
    }
}

fn classify_word(word: &str) -> Token {
    if KEYWORDS.contains(&word) {
        Token::new(TokenKind::Keyword, word)
    } else if word.chars().all(|c| c.is_ascii_digit()) {
        Token::new(TokenKind::Number, word)
    } else if is_identifier(word) {
        Token::new(TokenKind::Identifier, word)
    } else {
        let offending = word.chars().next().map(String::from).unwrap_or_default();
        Token::new(TokenKind::Error, offending)
    }
}

/// Turns one line of input into tokens, one at a time.
///
/// The input is trimmed once up front; whitespace between tokens is skipped.
/// Once the input is exhausted every further call yields an `EndOfInput` token.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Lexeme<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { inner: Lexeme::lexer(input.trim()) }
    }

    pub fn next_token(&mut self) -> Token {
        match self.inner.next() {
            None => Token::new(TokenKind::EndOfInput, ""),
            Some(Ok(Lexeme::Paren(text))) => Token::new(TokenKind::Paren, text),
            Some(Ok(Lexeme::Operator(text))) => Token::new(TokenKind::Operator, text),
            Some(Ok(Lexeme::Word(word))) => classify_word(word),
            Some(Err(_)) => {
                let offending = self.inner.slice().chars().next().map(String::from).unwrap_or_default();
                Token::new(TokenKind::Error, offending)
            }
        }
    }

    /// Collects every token up to the end of input, failing on the first `Error` token.
    pub fn collect_tokens(mut self) -> Result<Vec<Token>, CurryError> {
        let mut tokens = vec![];

        loop {
            let token = self.next_token();
            match token.kind {
                TokenKind::EndOfInput => return Ok(tokens),
                TokenKind::Error => {
                    let character = token.text.chars().next().unwrap_or(' ');
                    return Err(CurryError::UnexpectedCharacter(character))
                }
                _ => tokens.push(token),
            }
        }
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, CurryError> {
    Lexer::new(input).collect_tokens()
}
