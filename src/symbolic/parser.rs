//! Parse expression text into a [`Polynomial`].
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := ('-' | '+') unary | power
//! power  := atom ('^' integer)?
//! atom   := number | identifier | '(' expr ')'
//! ```
//!
//! Division is only allowed by a non-zero constant, which keeps every parsed
//! expression a polynomial.

use std::iter::Peekable;
use std::str::Chars;

use crate::matrix::error::GameError;
use crate::matrix::value::Cell;
use crate::symbolic::polynomial::Polynomial;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn lex_number(first: char, chars: &mut Peekable<Chars<'_>>) -> String {
    let mut text = String::from(first);
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() || c == '.' {
            text.push(c);
            chars.next();
        } else if c == 'e' || c == 'E' {
            // Only an exponent if digits follow, otherwise it's an identifier.
            let mut ahead = chars.clone();
            ahead.next();
            let sign = ahead.peek().copied();
            if matches!(sign, Some('+') | Some('-')) {
                ahead.next();
            }
            if !ahead.peek().map_or(false, |d| d.is_ascii_digit()) {
                break;
            }
            text.push(c);
            chars.next();
            if let Some(s @ ('+' | '-')) = sign {
                text.push(s);
                chars.next();
            }
        } else {
            break;
        }
    }
    text
}

fn tokenize(input: &str) -> Result<Vec<Token>, GameError> {
    let error = |reason: String| GameError::Parse {
        input: input.to_string(),
        reason,
    };
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {}
            '+' => tokens.push(Token::Plus),
            '-' => tokens.push(Token::Minus),
            '*' => tokens.push(Token::Star),
            '/' => tokens.push(Token::Slash),
            '^' => tokens.push(Token::Caret),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            c if c.is_ascii_digit() || c == '.' => {
                let text = lex_number(c, &mut chars);
                let value = text
                    .parse::<f64>()
                    .map_err(|_| error(format!("bad number '{}'", text)))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::from(c);
                while let Some(&n) = chars.peek() {
                    if n.is_alphanumeric() || n == '_' {
                        name.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            other => return Err(error(format!("unexpected character '{}'", other))),
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, reason: impl Into<String>) -> GameError {
        GameError::Parse {
            input: self.input.to_string(),
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expr(&mut self) -> Result<Polynomial, GameError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value = value + self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value = value - self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<Polynomial, GameError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value = value * self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    match divisor.as_constant() {
                        Some(d) if d != 0.0 => value = value.scale(1.0 / d),
                        Some(_) => return Err(self.error("division by zero")),
                        None => return Err(self.error("division by a non-constant expression")),
                    }
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<Polynomial, GameError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Polynomial, GameError> {
        let base = self.atom()?;
        if self.peek() != Some(&Token::Caret) {
            return Ok(base);
        }
        self.pos += 1;
        match self.next() {
            Some(Token::Number(e)) if e >= 0.0 && e.fract() == 0.0 => Ok(base.pow(e as u32)),
            _ => Err(self.error("exponent must be a non-negative integer")),
        }
    }

    fn atom(&mut self) -> Result<Polynomial, GameError> {
        match self.next() {
            Some(Token::Number(v)) => Ok(Polynomial::constant(v)),
            Some(Token::Ident(name)) => Ok(Polynomial::var(&name)),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(self.error("missing ')'")),
                }
            }
            Some(token) => Err(self.error(format!("unexpected token {:?}", token))),
            None => Err(self.error("unexpected end of input")),
        }
    }
}

/// Parse expression text such as `"1 - p_1 - p_2"` or `"3*p*q + 2"`.
pub fn parse(input: &str) -> Result<Polynomial, GameError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        input,
        tokens,
        pos: 0,
    };
    let value = parser.expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.error("trailing input"));
    }
    Ok(value)
}

/// Convert a payoff or probability cell into a polynomial.
pub fn parse_cell(cell: &Cell) -> Result<Polynomial, GameError> {
    match cell {
        Cell::Numeric(v) => Ok(Polynomial::constant(*v)),
        Cell::Symbolic(expr) => parse(expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(parse("1 + 2 * 3").unwrap().as_constant(), Some(7.0));
        assert_eq!(parse("(1 + 2) * 3").unwrap().as_constant(), Some(9.0));
        assert_eq!(parse("-2^2").unwrap().as_constant(), Some(-4.0));
        assert_eq!(parse("6 / 4").unwrap().as_constant(), Some(1.5));
    }

    #[test]
    fn test_variables_and_collection() {
        let expr = parse("p_1 * q_1 * 3 + p_1 * q_1 * -1 + 1 - p_1").unwrap();
        assert_eq!(expr.to_string(), "2*p_1*q_1 - p_1 + 1");
    }

    #[test]
    fn test_scientific_notation_and_identifiers_starting_with_e() {
        assert_eq!(parse("1e-3").unwrap().as_constant(), Some(0.001));
        assert_eq!(parse("2*e").unwrap().to_string(), "2*e");
        assert_eq!(parse("2e").unwrap_err(), GameError::Parse {
            input: "2e".to_string(),
            reason: "trailing input".to_string(),
        });
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse("1 +"), Err(GameError::Parse { .. })));
        assert!(matches!(parse("(p"), Err(GameError::Parse { .. })));
        assert!(matches!(parse("p / q"), Err(GameError::Parse { .. })));
        assert!(matches!(parse("p / 0"), Err(GameError::Parse { .. })));
        assert!(matches!(parse("p ^ q"), Err(GameError::Parse { .. })));
        assert!(matches!(parse("p $ q"), Err(GameError::Parse { .. })));
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell(&Cell::Numeric(2.5)).unwrap(), Polynomial::constant(2.5));
        assert_eq!(parse_cell(&Cell::from("-(a)")).unwrap(), -Polynomial::var("a"));
    }
}
