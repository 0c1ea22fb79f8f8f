use std::fmt;

use super::error::ParseError;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Tok {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LPar,
    RPar,
    Comma,
}

/// Token plus the character offset where it starts.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Token {
    pub tok: Tok,
    pub offset: usize,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "number {v}"),
            Tok::Ident(name) => write!(f, "identifier '{name}'"),
            Tok::Plus => f.write_str("'+'"),
            Tok::Minus => f.write_str("'-'"),
            Tok::Star => f.write_str("'*'"),
            Tok::Slash => f.write_str("'/'"),
            Tok::Caret => f.write_str("'^'"),
            Tok::LPar => f.write_str("'('"),
            Tok::RPar => f.write_str("')'"),
            Tok::Comma => f.write_str("','"),
        }
    }
}

/// Split formula text into tokens.
///
/// Supports decimal literals with optional fraction and exponent (`12`,
/// `0.5`, `.5`, `1e-3`), ASCII identifiers, the operators `+ - * / ^`,
/// parentheses and commas. Whitespace is skipped. Anything else is an
/// `UnexpectedChar` error at its offset.
pub(crate) fn tokenize(chars: &[char]) -> Result<Vec<Token>, ParseError> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let single = match c {
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Comma),
            _ => None,
        };
        if let Some(tok) = single {
            out.push(Token { tok, offset: i });
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let name: String = chars[start..i].iter().collect();
            out.push(Token {
                tok: Tok::Ident(name),
                offset: start,
            });
            continue;
        }

        let starts_number = c.is_ascii_digit()
            || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()));
        if starts_number {
            let (value, end) = lex_number(chars, i)?;
            out.push(Token {
                tok: Tok::Num(value),
                offset: i,
            });
            i = end;
            continue;
        }

        return Err(ParseError::UnexpectedChar { ch: c, offset: i });
    }

    Ok(out)
}

/// Lex one numeric literal starting at `start`; returns the value and the
/// offset just past it.
fn lex_number(chars: &[char], start: usize) -> Result<(f64, usize), ParseError> {
    let digits = |mut j: usize| {
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        j
    };

    let mut i = digits(start);
    if chars.get(i) == Some(&'.') {
        i = digits(i + 1);
    }

    // Exponent only when digits actually follow; otherwise `e` is left for
    // the parser (and `2e` becomes an implicit-multiplication error).
    if matches!(chars.get(i), Some('e') | Some('E')) {
        let mut j = i + 1;
        if matches!(chars.get(j), Some('+') | Some('-')) {
            j += 1;
        }
        if chars.get(j).is_some_and(|d| d.is_ascii_digit()) {
            i = digits(j);
        }
    }

    // "1.2.3": swallow the run so the error shows the whole malformed literal.
    if chars.get(i) == Some(&'.') {
        let mut end = i;
        while end < chars.len() && (chars[end].is_ascii_digit() || chars[end] == '.') {
            end += 1;
        }
        let text: String = chars[start..end].iter().collect();
        return Err(ParseError::InvalidNumber {
            text,
            offset: start,
        });
    }

    let text: String = chars[start..i].iter().collect();
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok((v, i)),
        _ => Err(ParseError::InvalidNumber {
            text,
            offset: start,
        }),
    }
}
