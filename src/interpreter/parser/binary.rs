use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, TokenStream},
            unary::{parse_not, parse_unary_minus},
        },
    },
};

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for all tokens that are not binary operators.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::Equal => Some(BinaryOperator::Equal),
        Token::NotEqual => Some(BinaryOperator::NotEqual),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        Token::Xor => Some(BinaryOperator::Xor),
        _ => None,
    }
}

/// Parses logical OR expressions.
///
/// This is the lowest-precedence level and therefore the entry point used
/// for every complete (sub)expression.
///
/// Grammar: `or := xor ("OR" xor)*`
pub fn parse_logical_or(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut left = parse_logical_xor(tokens)?;

    loop {
        if let Some((token, offset)) = tokens.peek() {
            if matches!(token_to_binary_operator(token), Some(BinaryOperator::Or)) {
                let offset = *offset;
                tokens.next();

                let right = parse_logical_xor(tokens)?;

                left = Expr::BinaryOp { op: BinaryOperator::Or,
                                        left: Box::new(left),
                                        right: Box::new(right),
                                        offset };
                continue;
            }
        }

        break;
    }

    Ok(left)
}

/// Parses logical XOR expressions.
///
/// Precedence is between OR and AND.
///
/// Grammar: `xor := and ("XOR" and)*`
pub fn parse_logical_xor(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut left = parse_logical_and(tokens)?;

    loop {
        if let Some((token, offset)) = tokens.peek() {
            if matches!(token_to_binary_operator(token), Some(BinaryOperator::Xor)) {
                let offset = *offset;
                tokens.next();

                let right = parse_logical_and(tokens)?;

                left = Expr::BinaryOp { op: BinaryOperator::Xor,
                                        left: Box::new(left),
                                        right: Box::new(right),
                                        offset };
                continue;
            }
        }

        break;
    }

    Ok(left)
}

/// Parses logical AND expressions.
///
/// Grammar: `and := not ("AND" not)*`
pub fn parse_logical_and(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut left = parse_not(tokens)?;

    loop {
        if let Some((token, offset)) = tokens.peek() {
            if matches!(token_to_binary_operator(token), Some(BinaryOperator::And)) {
                let offset = *offset;
                tokens.next();

                let right = parse_not(tokens)?;

                left = Expr::BinaryOp { op: BinaryOperator::And,
                                        left: Box::new(left),
                                        right: Box::new(right),
                                        offset };
                continue;
            }
        }

        break;
    }

    Ok(left)
}

/// Determines whether a binary operator belongs to the comparison class.
#[must_use]
pub const fn is_comparison_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Less
             | BinaryOperator::Greater
             | BinaryOperator::LessEqual
             | BinaryOperator::GreaterEqual
             | BinaryOperator::Equal
             | BinaryOperator::NotEqual)
}

/// Parses comparison expressions: `= < > <= >= <>`.
///
/// Comparisons do not chain: at most one comparison operator is consumed at
/// this level, so `a < b < c` leaves the second `<` for the caller, which
/// rejects it as a structural error.
///
/// Grammar: `comparison := additive (("=" | "<" | ">" | "<=" | ">=" | "<>") additive)?`
pub fn parse_comparison(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let left = parse_additive(tokens)?;

    if let Some((token, offset)) = tokens.peek() {
        if let Some(op) = token_to_binary_operator(token) {
            if is_comparison_op(op) {
                let offset = *offset;
                tokens.next();

                let right = parse_additive(tokens)?;

                return Ok(Expr::BinaryOp { op,
                                           left: Box::new(left),
                                           right: Box::new(right),
                                           offset });
            }
        }
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut left = parse_multiplicative(tokens)?;

    loop {
        if let Some((token, offset)) = tokens.peek() {
            if let Some(op) = token_to_binary_operator(token) {
                if matches!(op, BinaryOperator::Add | BinaryOperator::Sub) {
                    let offset = *offset;
                    tokens.next();

                    let right = parse_multiplicative(tokens)?;

                    left = Expr::BinaryOp { op,
                                            left: Box::new(left),
                                            right: Box::new(right),
                                            offset };
                    continue;
                }
            }
        }

        break;
    }

    Ok(left)
}

/// Parses multiplication and division expressions.
///
/// Grammar: `multiplicative := unary_minus (("*" | "/") unary_minus)*`
pub fn parse_multiplicative(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut left = parse_unary_minus(tokens)?;

    loop {
        if let Some((token, offset)) = tokens.peek() {
            if let Some(op) = token_to_binary_operator(token) {
                if matches!(op, BinaryOperator::Mul | BinaryOperator::Div) {
                    let offset = *offset;
                    tokens.next();

                    let right = parse_unary_minus(tokens)?;

                    left = Expr::BinaryOp { op,
                                            left: Box::new(left),
                                            right: Box::new(right),
                                            offset };
                    continue;
                }
            }
        }

        break;
    }

    Ok(left)
}
