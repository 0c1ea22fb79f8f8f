//! Expression engine: closed grammar, recursive-descent parser, tree evaluator.
//!
//! Purpose
//! - Turn user-typed formula text in one variable `x` into an immutable
//!   `Expression`, then evaluate it at any `x` with IEEE-754 semantics.
//! - Replace "evaluate the text as code": the node set is fixed and
//!   enumerable, nothing outside the grammar below is ever executed.
//!
//! Grammar
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := factor (('*' | '/') factor)*
//! factor  := unary ('^' factor)?            // right-assoc
//! unary   := '-' unary | primary
//! primary := number | 'x' | ident '(' expr (',' expr)* ')' | '(' expr ')'
//! ```
//! Note that `unary` binds tighter than `^`: `-x^2` reads as `(-x)^2`.
//!
//! Conventions
//! - Offsets in errors are character offsets into the original text.
//! - Implicit multiplication is rejected (`2x` is an error, write `2*x`).
//! - Domain problems (`1/0`, `sqrt(-1)`, `log(0)`) are not errors; they
//!   propagate ±Infinity/NaN.
//!
//! Layout: `token.rs` (lexer), `parser.rs` (descent), `ast.rs` (nodes and
//! printing), `eval.rs` (tree walk), `error.rs` (error types).

mod ast;
mod error;
mod eval;
mod parser;
mod token;

pub use ast::{BinOp, Expression, Func, Node};
pub use error::{EvalError, ParseError};
pub use eval::evaluate;
pub use parser::parse;

#[cfg(test)]
mod tests;
