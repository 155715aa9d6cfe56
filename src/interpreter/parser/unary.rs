use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_comparison,
            core::{ParseResult, TokenStream},
            primary::parse_postfix,
        },
    },
};

/// Parses logical NOT expressions.
///
/// NOT binds tighter than AND but looser than comparisons, so
/// `NOT a = b` negates the whole comparison.
///
/// Grammar: `not := "NOT" not | comparison`
pub fn parse_not(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    if let Some((Token::Not, offset)) = tokens.peek() {
        let offset = *offset;
        tokens.next();

        let operand = parse_not(tokens)?;

        return Ok(Expr::UnaryOp { op:     UnaryOperator::Not,
                                  expr:   Box::new(operand),
                                  offset, });
    }

    parse_comparison(tokens)
}

/// Parses unary minus expressions.
///
/// Unary minus binds tighter than multiplication but looser than the power
/// operator, so `-2 ^ 2` is `-(2 ^ 2)`.
///
/// Grammar: `unary_minus := "-" unary_minus | power`
pub fn parse_unary_minus(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    if let Some((Token::Minus, offset)) = tokens.peek() {
        let offset = *offset;
        tokens.next();

        let operand = parse_unary_minus(tokens)?;

        return Ok(Expr::UnaryOp { op:     UnaryOperator::Negate,
                                  expr:   Box::new(operand),
                                  offset, });
    }

    parse_power(tokens)
}

/// Parses exponentiation expressions.
///
/// `^` is right-associative: `a ^ b ^ c` parses as `a ^ (b ^ c)`. The
/// exponent re-enters at the unary-minus level so `2 ^ -3` works without
/// parentheses.
///
/// Grammar: `power := postfix ("^" unary_minus)?`
pub fn parse_power(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let base = parse_postfix(tokens)?;

    if let Some((Token::Caret, offset)) = tokens.peek() {
        let offset = *offset;
        tokens.next();

        let exponent = parse_unary_minus(tokens)?;

        return Ok(Expr::BinaryOp { op:     BinaryOperator::Pow,
                                   left:   Box::new(base),
                                   right:  Box::new(exponent),
                                   offset, });
    }

    Ok(base)
}
