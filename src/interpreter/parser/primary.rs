use crate::{
    ast::{Expr, LiteralValue},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_logical_or,
            core::{expect, ParseResult, TokenStream},
        },
    },
};

/// Parses postfix forms: indexing and calls.
///
/// Both postfixes may be chained in any order, so `grid[1][2]` and
/// `table[0](x)` parse naturally.
///
/// Grammar: `postfix := primary ("[" expression "]" | "(" arguments ")")*`
pub fn parse_postfix(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut expr = parse_primary(tokens)?;

    loop {
        match tokens.peek() {
            Some((Token::LBracket, offset)) => {
                let offset = *offset;
                tokens.next();

                let index = parse_logical_or(tokens)?;
                expect(tokens, &Token::RBracket, "']'", offset)?;

                expr = Expr::Index { target: Box::new(expr),
                                     index: Box::new(index),
                                     offset };
            },
            Some((Token::LParen, offset)) => {
                let offset = *offset;
                tokens.next();

                let (arguments, expand_last) = parse_arguments(tokens, offset)?;

                expr = Expr::Call { callee: Box::new(expr),
                                    arguments,
                                    expand_last,
                                    offset };
            },
            _ => break,
        }
    }

    Ok(expr)
}

/// Parses a call argument list, already positioned after the `(`.
///
/// Arguments are comma-separated. The last argument may be prefixed with
/// the expand marker `*`; an expand marker anywhere else is a
/// `MisplacedExpand` error.
fn parse_arguments(tokens: &mut TokenStream<'_>,
                   open_offset: usize)
                   -> ParseResult<(Vec<Expr>, bool)> {
    let mut arguments = Vec::new();

    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok((arguments, false));
    }

    loop {
        if let Some((Token::Star, _)) = tokens.peek() {
            tokens.next();
            arguments.push(parse_logical_or(tokens)?);

            return match tokens.next() {
                Some((Token::RParen, _)) => Ok((arguments, true)),
                Some((Token::Comma, offset)) => {
                    Err(ParseError::MisplacedExpand { offset: *offset })
                },
                Some((token, offset)) => {
                    Err(ParseError::ExpectedToken { expected: "')'",
                                                    found:    token.to_string(),
                                                    offset:   *offset, })
                },
                None => Err(ParseError::UnexpectedEndOfInput { offset: open_offset }),
            };
        }

        arguments.push(parse_logical_or(tokens)?);

        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RParen, _)) => return Ok((arguments, false)),
            Some((token, offset)) => {
                return Err(ParseError::ExpectedToken { expected: "',' or ')'",
                                                       found:    token.to_string(),
                                                       offset:   *offset, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { offset: open_offset }),
        }
    }
}

/// Parses a primary expression: a literal, an identifier, a parenthesized
/// expression or a list literal.
pub fn parse_primary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    match tokens.next() {
        Some((Token::Number(n), offset)) => {
            Ok(Expr::Literal { value:  LiteralValue::Number(*n),
                               offset: *offset, })
        },
        Some((Token::Imaginary(n), offset)) => {
            Ok(Expr::Literal { value:  LiteralValue::Imaginary(*n),
                               offset: *offset, })
        },
        Some((Token::Bool(b), offset)) => {
            Ok(Expr::Literal { value:  LiteralValue::Bool(*b),
                               offset: *offset, })
        },
        Some((Token::Str(s), offset)) => {
            Ok(Expr::Literal { value:  LiteralValue::Str(s.clone()),
                               offset: *offset, })
        },
        Some((Token::Identifier(name), offset)) => {
            Ok(Expr::Identifier { name:   name.clone(),
                                  offset: *offset, })
        },
        Some((Token::LParen, offset)) => {
            let expr = parse_logical_or(tokens)?;
            expect(tokens, &Token::RParen, "')'", *offset)?;
            Ok(expr)
        },
        Some((Token::LBracket, offset)) => parse_list_literal(tokens, *offset),
        Some((token, offset)) => {
            Err(ParseError::UnexpectedToken { token:  token.to_string(),
                                              offset: *offset, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { offset: 0 }),
    }
}

/// Parses a list literal, already positioned after the `[`.
fn parse_list_literal(tokens: &mut TokenStream<'_>, open_offset: usize) -> ParseResult<Expr> {
    let mut elements = Vec::new();

    if let Some((Token::RBracket, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::ListLiteral { elements,
                                      offset: open_offset });
    }

    loop {
        elements.push(parse_logical_or(tokens)?);

        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RBracket, _)) => {
                return Ok(Expr::ListLiteral { elements,
                                              offset: open_offset });
            },
            Some((token, offset)) => {
                return Err(ParseError::ExpectedToken { expected: "',' or ']'",
                                                       found:    token.to_string(),
                                                       offset:   *offset, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { offset: open_offset }),
        }
    }
}
