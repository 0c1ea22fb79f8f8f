//! Recursive-descent parser over the token stream.
//!
//! One method per grammar rule (see module docs in `expr`). Binary levels loop
//! left-to-right; `^` recurses on the right. Every recursive edge goes through
//! `nested`, which enforces `MAX_NESTING`.

use tracing::debug;

use super::ast::{BinOp, Expression, Func, Node};
use super::error::ParseError;
use super::token::{tokenize, Tok, Token};
use crate::cfg::{MAX_INPUT_CHARS, MAX_NESTING};

const OPERAND: &str = "a number, 'x', a function call or '('";

/// Parse formula text into an `Expression`.
///
/// Either the whole input is consumed into a tree or an error is returned;
/// there is no partial result.
pub fn parse(text: &str) -> Result<Expression, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() > MAX_INPUT_CHARS {
        return Err(ParseError::TooLong {
            len: chars.len(),
            limit: MAX_INPUT_CHARS,
        });
    }
    let toks = tokenize(&chars)?;
    if toks.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut p = Parser {
        toks,
        pos: 0,
        end: chars.len(),
        depth: 0,
    };
    let root = p.expr()?;
    if let Some(t) = p.peek() {
        return Err(unexpected(t, "an operator or end of input"));
    }
    debug!(nodes = root.size(), "parsed expression");
    Ok(Expression::from_root(root))
}

struct Parser {
    toks: Vec<Token>,
    pos: usize,
    /// Character length of the input (offset reported for end-of-input).
    end: usize,
    depth: usize,
}

impl Parser {
    #[inline]
    fn peek(&self) -> Option<&Token> {
        self.toks.get(self.pos)
    }

    #[inline]
    fn peek_tok(&self) -> Option<&Tok> {
        self.peek().map(|t| &t.tok)
    }

    fn advance(&mut self) -> Option<Token> {
        let t = self.toks.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn nested<T>(
        &mut self,
        offset: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooDeep {
                offset,
                limit: MAX_NESTING,
            });
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_tok() {
                Some(Tok::Plus) => BinOp::Add,
                Some(Tok::Minus) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.peek_tok() {
                Some(Tok::Star) => BinOp::Mul,
                Some(Tok::Slash) => BinOp::Div,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.factor()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    // factor := unary ('^' factor)?
    fn factor(&mut self) -> Result<Node, ParseError> {
        let base = self.unary()?;
        match self.peek() {
            Some(Token {
                tok: Tok::Caret,
                offset,
            }) => {
                let offset = *offset;
                self.advance();
                let exp = self.nested(offset, |p| p.factor())?;
                Ok(binary(BinOp::Pow, base, exp))
            }
            _ => Ok(base),
        }
    }

    // unary := '-' unary | primary
    fn unary(&mut self) -> Result<Node, ParseError> {
        match self.peek() {
            Some(Token {
                tok: Tok::Minus,
                offset,
            }) => {
                let offset = *offset;
                self.advance();
                let inner = self.nested(offset, |p| p.unary())?;
                Ok(Node::Neg(Box::new(inner)))
            }
            _ => self.primary(),
        }
    }

    // primary := number | 'x' | ident '(' expr (',' expr)* ')' | '(' expr ')'
    fn primary(&mut self) -> Result<Node, ParseError> {
        let Some(Token { tok, offset }) = self.advance() else {
            return Err(ParseError::UnexpectedEnd {
                expected: OPERAND,
                offset: self.end,
            });
        };
        match tok {
            Tok::Num(v) => Ok(Node::Number(v)),
            Tok::Ident(name) if name == "x" => Ok(Node::Var),
            Tok::Ident(name) => match Func::from_name(&name) {
                Some(func) => self.call(func, offset),
                None => Err(ParseError::UnknownIdentifier { name, offset }),
            },
            Tok::LPar => {
                let inner = self.nested(offset, |p| p.expr())?;
                self.close_paren(offset)?;
                Ok(inner)
            }
            other => Err(ParseError::UnexpectedToken {
                found: other.to_string(),
                expected: OPERAND,
                offset,
            }),
        }
    }

    /// Function call after its name has been consumed.
    fn call(&mut self, func: Func, name_offset: usize) -> Result<Node, ParseError> {
        let open = match self.advance() {
            Some(Token {
                tok: Tok::LPar,
                offset,
            }) => offset,
            Some(t) => {
                return Err(ParseError::UnexpectedToken {
                    found: t.tok.to_string(),
                    expected: "'(' after a function name",
                    offset: t.offset,
                })
            }
            None => {
                return Err(ParseError::UnexpectedEnd {
                    expected: "'(' after a function name",
                    offset: self.end,
                })
            }
        };

        let args = self.nested(open, |p| {
            let mut args = vec![p.expr()?];
            while let Some(Tok::Comma) = p.peek_tok() {
                p.advance();
                args.push(p.expr()?);
            }
            Ok(args)
        })?;
        self.close_paren(open)?;

        let (lo, hi) = func.arity();
        if args.len() < lo || args.len() > hi {
            return Err(ParseError::WrongArity {
                func: func.name(),
                expected: func.arity_text(),
                found: args.len(),
                offset: name_offset,
            });
        }
        Ok(Node::Call { func, args })
    }

    fn close_paren(&mut self, open: usize) -> Result<(), ParseError> {
        match self.peek() {
            Some(Token { tok: Tok::RPar, .. }) => {
                self.advance();
                Ok(())
            }
            Some(t) => Err(unexpected(t, "')'")),
            None => Err(ParseError::UnclosedParen { offset: open }),
        }
    }
}

#[inline]
fn binary(op: BinOp, lhs: Node, rhs: Node) -> Node {
    Node::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

/// Error for a token found where an operator (or closer) was expected. A token
/// that could start an operand means the user wrote two operands side by side.
fn unexpected(t: &Token, expected: &'static str) -> ParseError {
    match t.tok {
        Tok::Num(_) | Tok::Ident(_) | Tok::LPar => {
            ParseError::ImplicitMultiplication { offset: t.offset }
        }
        _ => ParseError::UnexpectedToken {
            found: t.tok.to_string(),
            expected,
            offset: t.offset,
        },
    }
}
