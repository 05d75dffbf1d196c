use crate::{
    ast::{Node, Operator},
    error::CurryError,
    lexer::{tokenize, Token, TokenKind},
};


// Every rule receives the unconsumed tokens and hands back the tokens left over
// after a successful match. A failing rule returns its error and the caller still
// holds its own slice, so trying an alternative always restarts from the same place.
type ParseResult<'t, O> = Result<(&'t [Token], O), CurryError>;

fn parse_token<'t>(
    token_recognizer: impl Fn(&Token) -> bool,
    message: &'static str,
) -> impl Fn(&'t [Token]) -> ParseResult<'t, &'t Token> {
    move |tokens| match tokens.split_first() {
        Some((first, rest)) if token_recognizer(first) => Ok((rest, first)),
        _ => Err(CurryError::Syntax(message))
    }
}

fn expect<'t>(kind: TokenKind, text: &'static str, message: &'static str) -> impl Fn(&'t [Token]) -> ParseResult<'t, &'t Token> {
    parse_token(move |token| token.is(kind, text), message)
}

fn expect_identifier<'t>(message: &'static str) -> impl Fn(&'t [Token]) -> ParseResult<'t, &'t Token> {
    parse_token(|token| token.kind == TokenKind::Identifier, message)
}

fn parse_surrounds<'t, S, O, E>(
    start_parser: impl Fn(&'t [Token]) -> ParseResult<'t, S>,
    internal_parser: impl Fn(&'t [Token]) -> ParseResult<'t, O>,
    end_parser: impl Fn(&'t [Token]) -> ParseResult<'t, E>,
) -> impl Fn(&'t [Token]) -> ParseResult<'t, O> {
    move |tokens| {
        let (tokens, _) = start_parser(tokens)?;
        let (tokens, internal) = internal_parser(tokens)?;
        let (tokens, _) = end_parser(tokens)?;

        Ok((tokens, internal))
    }
}

fn parser_map<'t, I, O>(
    parser: impl Fn(&'t [Token]) -> ParseResult<'t, I>,
    f: impl Fn(I) -> O
) -> impl Fn(&'t [Token]) -> ParseResult<'t, O> {
    move |tokens| {
        let (tokens, value) = parser(tokens)?;
        Ok((tokens, f(value)))
    }
}

// Each nested factor, folded operator and chained argument list makes the tree one
// level taller. Parsing stops here so that neither the parser nor the evaluator has
// to recurse without bound.
const MAX_NESTING: usize = 256;

fn parse_binary<'t>(
    tokens: &'t [Token],
    depth: usize,
    operand: fn(&'t [Token], usize) -> ParseResult<'t, Node>,
    operators: &[Operator],
) -> ParseResult<'t, Node> {
    // One operand, then any number of (operator, operand) pairs folded to the left

    let (mut tokens, mut result) = operand(tokens, depth)?;
    let mut depth = depth;
    while let Some((first, rest)) = tokens.split_first() {
        let operator = match Operator::from_symbol(&first.text) {
            Some(operator) if first.kind == TokenKind::Operator && operators.contains(&operator) => operator,
            _ => break
        };

        depth += 1;
        let (rest, right) = operand(rest, depth)?;
        result = Node::operation(result, operator, right);
        tokens = rest;
    }

    Ok((tokens, result))
}

fn parse_number<'t>(tokens: &'t [Token]) -> ParseResult<'t, Node> {
    let (tokens, number) = parse_token(|token| token.kind == TokenKind::Number, "Expected number")(tokens)?;
    let value = number.text.parse()
        .map_err(|_| CurryError::NumberOutOfRange(number.text.clone()))?;

    Ok((tokens, Node::Value(value)))
}

fn parse_variable<'t>(tokens: &'t [Token]) -> ParseResult<'t, Node> {
    parser_map(
        expect_identifier("Expected variable"),
        |token| Node::Variable(token.text.clone())
    )(tokens)
}

fn parse_paren<'t>(tokens: &'t [Token], depth: usize) -> ParseResult<'t, Node> {
    let (inner, _) = expect(TokenKind::Paren, "(", "Expected parenthesized expression")(tokens)?;
    let closing = expect(TokenKind::Paren, ")", "Expected closing parentheses");

    match parse_expr(inner, depth) {
        Ok((tokens, expression)) => {
            let (tokens, _) = closing(tokens)?;
            Ok((tokens, expression))
        }
        Err(CurryError::NestingTooDeep) => Err(CurryError::NestingTooDeep),
        // `()` reports why the inside is empty, anything else is an unclosed parenthesis
        Err(error) => {
            closing(inner)?;
            Err(error)
        }
    }
}

fn parse_func<'t>(tokens: &'t [Token], depth: usize) -> ParseResult<'t, Node> {
    let (tokens, _) = expect(TokenKind::Keyword, "func", "Expected keyword 'func'")(tokens)?;
    let (tokens, parameter) = expect_identifier("Expected identifier after 'func' keyword")(tokens)?;
    let (tokens, _) = expect(TokenKind::Operator, "'", "Expected quote after function arguments")(tokens)?;
    let (tokens, body) = parse_expr(tokens, depth)?;

    Ok((tokens, Node::func(parameter.text.clone(), body)))
}

fn parse_if<'t>(tokens: &'t [Token], depth: usize) -> ParseResult<'t, Node> {
    let (tokens, _) = expect(TokenKind::Keyword, "if", "Expected keyword 'if'")(tokens)?;
    let (tokens, condition) = parse_expr(tokens, depth)?;
    let (tokens, _) = expect(TokenKind::Keyword, "then", "Expected keyword 'then' in if statement")(tokens)?;
    let (tokens, then_branch) = parse_expr(tokens, depth)?;
    let (tokens, _) = expect(TokenKind::Keyword, "else", "Expected keyword 'else' in if statement")(tokens)?;
    let (tokens, else_branch) = parse_expr(tokens, depth)?;

    Ok((tokens, Node::if_else(condition, then_branch, else_branch)))
}

fn parse_argument<'t>(tokens: &'t [Token], depth: usize) -> ParseResult<'t, Node> {
    parse_surrounds(
        expect(TokenKind::Paren, "(", "Expected opening parentheses in function call"),
        move |tokens| parse_expr(tokens, depth),
        expect(TokenKind::Paren, ")", "Expected closing parentheses in function call"),
    )(tokens)
}

fn parse_arguments<'t>(tokens: &'t [Token], depth: usize) -> ParseResult<'t, Vec<Node>> {
    let (mut tokens, first) = parse_argument(tokens, depth)?;
    let mut arguments = vec![first];

    while tokens.first().is_some_and(|token| token.is(TokenKind::Paren, "(")) {
        let (rest, argument) = parse_argument(tokens, depth + arguments.len())?;
        arguments.push(argument);
        tokens = rest;
    }

    Ok((tokens, arguments))
}

fn parse_call_or<'t>(
    tokens: &'t [Token],
    depth: usize,
    callee_parser: fn(&'t [Token], usize) -> ParseResult<'t, Node>,
) -> ParseResult<'t, Node> {
    // A call is a variable or parenthesized callee followed by one or more argument
    // lists. When the argument lists do not parse, the callee stands on its own and
    // the tokens after it are left untouched.

    let (after_callee, callee) = callee_parser(tokens, depth)?;
    match parse_arguments(after_callee, depth) {
        Ok((tokens, arguments)) => Ok((tokens, arguments.into_iter().fold(callee, Node::call))),
        Err(CurryError::NestingTooDeep) => Err(CurryError::NestingTooDeep),
        Err(_) => Ok((after_callee, callee))
    }
}

fn parse_factor<'t>(tokens: &'t [Token], depth: usize) -> ParseResult<'t, Node> {
    if depth >= MAX_NESTING { return Err(CurryError::NestingTooDeep); }

    let current = match tokens.first() {
        Some(current) => current,
        None => return Err(CurryError::Syntax("Expected expression"))
    };

    let depth = depth + 1;
    match current.kind {
        TokenKind::Paren if current.text == "(" => parse_call_or(tokens, depth, parse_paren),
        TokenKind::Number => parse_number(tokens),
        TokenKind::Identifier => parse_call_or(tokens, depth, |tokens, _| parse_variable(tokens)),
        TokenKind::Keyword if current.text == "func" => parse_func(tokens, depth),
        TokenKind::Keyword if current.text == "if" => parse_if(tokens, depth),
        _ => Err(CurryError::Syntax("Expected expression"))
    }
}

fn parse_multiplicative<'t>(tokens: &'t [Token], depth: usize) -> ParseResult<'t, Node> {
    parse_binary(tokens, depth, parse_factor, &[Operator::Multiply, Operator::Divide])
}

fn parse_additive<'t>(tokens: &'t [Token], depth: usize) -> ParseResult<'t, Node> {
    parse_binary(tokens, depth, parse_multiplicative, &[Operator::Add, Operator::Subtract])
}

fn parse_equality<'t>(tokens: &'t [Token], depth: usize) -> ParseResult<'t, Node> {
    parse_binary(tokens, depth, parse_additive, &[Operator::Equals])
}

// Assignment is the loosest binary operator; its target is checked during evaluation
fn parse_expr<'t>(tokens: &'t [Token], depth: usize) -> ParseResult<'t, Node> {
    parse_binary(tokens, depth, parse_equality, &[Operator::Assign])
}

fn parse_bind<'t>(tokens: &'t [Token]) -> ParseResult<'t, Node> {
    let (tokens, _) = expect(TokenKind::Keyword, "let", "Expected keyword 'let'")(tokens)?;
    let (tokens, name) = expect_identifier("Expected identifier after keyword 'let'")(tokens)?;
    let (tokens, _) = expect(TokenKind::Operator, "=", "Expected '=' operator in binding statement")(tokens)?;
    let (tokens, expression) = parse_expr(tokens, 0)?;

    Ok((tokens, Node::bind(name.text.clone(), expression)))
}

fn parse_program<'t>(tokens: &'t [Token]) -> ParseResult<'t, Node> {
    let (tokens, program) = match tokens.first() {
        Some(token) if token.is(TokenKind::Keyword, "let") => parse_bind(tokens)?,
        _ => parse_expr(tokens, 0)?
    };

    if let Some(unexpected) = tokens.first() {
        return Err(CurryError::UnexpectedToken(unexpected.text.clone()));
    }

    Ok((tokens, program))
}

/// Parses a token sequence into a single program node.
///
/// The cursor only moves when a parse succeeds, so a failed attempt can be
/// retried or inspected from exactly where it started.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Parses the remaining tokens as one program. Failures come back as a `Node::Error`.
    pub fn parse_program(&mut self) -> Node {
        let remaining = &self.tokens[self.position..];

        match parse_program(remaining) {
            Ok((rest, program)) => {
                self.position += remaining.len() - rest.len();
                program
            }
            Err(error) => Node::Error(error)
        }
    }
}

pub fn parse(input: &str) -> Result<Node, CurryError> {
    let tokens = tokenize(input)?;

    match Parser::new(tokens).parse_program() {
        Node::Error(error) => Err(error),
        program => Ok(program)
    }
}
