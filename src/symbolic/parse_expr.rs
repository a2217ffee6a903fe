//! Parser for the restricted user-facing grammar.
//!
//! Accepted input (case-sensitive): digits, the variable `x`, the operators
//! `+ - * / ^`, parentheses, decimal points, whitespace and the two named
//! functions `log10(...)` and `sqrt(...)`.
//!
//! Parsing happens in three stages, in this order:
//! 1. the power sign `^` is rewritten to `**` once, textually;
//! 2. character validation: the `log10`/`sqrt` substrings are stripped from a
//!    scratch copy and every remaining character is checked against the
//!    allowed set; the first offender fails with `ParseError::InvalidCharacter`
//!    carrying the offending character and the original text;
//! 3. structural parsing: tokenizer plus recursive-descent precedence parser.
//!    Adjacent value tokens with no operator between them (`5x`, `2(x+1)`,
//!    `3sqrt(x)`) are multiplied implicitly at this stage. Structural failures
//!    are `ParseError::Syntax`.
//!
//! No evaluation happens at parse time.

use crate::symbolic::symbolic_engine::Expr;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A character outside the allowed grammar, with the original input kept
    /// for diagnostics.
    InvalidCharacter { ch: char, input: String },
    /// Character-valid text that is not a well-formed expression.
    Syntax(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::InvalidCharacter { ch, input } => {
                write!(f, "Illegal character detected: '{}' in {}", ch, input)
            }
            ParseError::Syntax(msg) => write!(f, "Invalid expression format: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a raw function string into a symbolic expression in the single free
/// variable `x`.
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let rewritten = input.replace('^', "**");
    validate_characters(&rewritten, input)?;
    let tokens = tokenize(&rewritten)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expression()?;
    if parser.pos < parser.tokens.len() {
        return Err(ParseError::Syntax(format!(
            "unexpected trailing token {:?}",
            parser.tokens[parser.pos]
        )));
    }
    Ok(expr)
}

/// Character-level validation, applied before any structural parsing.
///
/// The two function names are stripped first so that their letters do not
/// trip the scan; everything left must be a digit, `x`, an arithmetic sign,
/// a bracket, a decimal point or whitespace.
fn validate_characters(rewritten: &str, original: &str) -> Result<(), ParseError> {
    let stripped = rewritten.replace("log10", "").replace("sqrt", "");
    for ch in stripped.chars() {
        let allowed = ch.is_ascii_digit()
            || ch == 'x'
            || matches!(ch, '+' | '-' | '*' | '/' | '(' | ')' | '.')
            || ch.is_whitespace();
        if !allowed {
            return Err(ParseError::InvalidCharacter {
                ch,
                input: original.to_string(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    X,
    Plus,
    Minus,
    Star,
    Slash,
    /// the `**` power sign produced by the `^` rewrite
    Pow,
    LParen,
    RParen,
    Log10,
    Sqrt,
}

impl Token {
    /// true for tokens that can start a value, used for implicit multiplication
    fn starts_value(&self) -> bool {
        matches!(
            self,
            Token::Num(_) | Token::X | Token::LParen | Token::Log10 | Token::Sqrt
        )
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            let value = literal.parse::<f64>().map_err(|_| {
                ParseError::Syntax(format!("invalid number literal '{}'", literal))
            })?;
            tokens.push(Token::Num(value));
        } else if c.is_ascii_alphabetic() {
            // "log10" carries digits, so it is matched as a unit before the
            // plain alphabetic run
            if chars[i..].starts_with(&['l', 'o', 'g', '1', '0']) {
                tokens.push(Token::Log10);
                i += 5;
            } else if chars[i..].starts_with(&['s', 'q', 'r', 't']) {
                tokens.push(Token::Sqrt);
                i += 4;
            } else if c == 'x' && !matches!(chars.get(i + 1), Some(n) if n.is_ascii_alphanumeric())
            {
                tokens.push(Token::X);
                i += 1;
            } else {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                return Err(ParseError::Syntax(format!("unknown identifier '{}'", name)));
            }
        } else {
            match c {
                '+' => tokens.push(Token::Plus),
                '-' => tokens.push(Token::Minus),
                '*' => {
                    if chars.get(i + 1) == Some(&'*') {
                        tokens.push(Token::Pow);
                        i += 1;
                    } else {
                        tokens.push(Token::Star);
                    }
                }
                '/' => tokens.push(Token::Slash),
                '(' => tokens.push(Token::LParen),
                ')' => tokens.push(Token::RParen),
                _ => {
                    return Err(ParseError::Syntax(format!("unexpected character '{}'", c)));
                }
            }
            i += 1;
        }
    }
    if tokens.is_empty() {
        return Err(ParseError::Syntax("empty expression".to_string()));
    }
    Ok(tokens)
}

//                  precedence ladder, loosest binding first
//
//                expression :=  term  (('+' | '-') term)*
//                term       :=  unary (('*' | '/') unary | <implicit> unary)*
//                unary      :=  '-' unary | power
//                power      :=  atom ('**' unary)?          right-associative
//                atom       :=  number | 'x' | '(' expression ')'
//                             | 'log10' '(' expression ')'
//                             | 'sqrt'  '(' expression ')'
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expect_lparen(&mut self, func: &str) -> Result<(), ParseError> {
        match self.next() {
            Some(Token::LParen) => Ok(()),
            _ => Err(ParseError::Syntax(format!(
                "expected '(' after {}",
                func
            ))),
        }
    }

    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        match self.next() {
            Some(Token::RParen) => Ok(()),
            _ => Err(ParseError::Syntax("expected ')'".to_string())),
        }
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    lhs = lhs + self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    lhs = lhs - self.term()?;
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    lhs = lhs * self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    lhs = lhs / self.unary()?;
                }
                // implicit multiplication: 5x, 2(x+1), 3sqrt(x), (x+1)(x-1)
                Some(t) if t.starts_value() => {
                    lhs = lhs * self.unary()?;
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.peek() == Some(&Token::Minus) {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        if self.peek() == Some(&Token::Plus) {
            self.pos += 1;
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.atom()?;
        if self.peek() == Some(&Token::Pow) {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(base.pow(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        match self.next() {
            Some(Token::Num(value)) => Ok(Expr::Const(value)),
            Some(Token::X) => Ok(Expr::Var("x".to_string())),
            Some(Token::LParen) => {
                let inner = self.expression()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Some(Token::Log10) => {
                self.expect_lparen("log10")?;
                let inner = self.expression()?;
                self.expect_rparen()?;
                Ok(Expr::log10(inner.boxed()))
            }
            Some(Token::Sqrt) => {
                self.expect_lparen("sqrt")?;
                let inner = self.expression()?;
                self.expect_rparen()?;
                Ok(Expr::sqrt(inner.boxed()))
            }
            Some(t) => Err(ParseError::Syntax(format!("unexpected token {:?}", t))),
            None => Err(ParseError::Syntax("unexpected end of expression".to_string())),
        }
    }
}
