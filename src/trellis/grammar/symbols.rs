//! Pattern symbol scanner
//!
//! Splits a rule pattern into operators and bare identifiers. Operators need no surrounding
//! whitespace: `(foo|bar)+` scans the same as `( foo | bar ) +`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static SYMBOL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[()|?*+]|[^\s()|?*+]+").expect("symbol regex is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Open,
    Close,
    Alt,
    Optional,
    Star,
    Plus,
    Ident(String),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Open => write!(f, "("),
            Symbol::Close => write!(f, ")"),
            Symbol::Alt => write!(f, "|"),
            Symbol::Optional => write!(f, "?"),
            Symbol::Star => write!(f, "*"),
            Symbol::Plus => write!(f, "+"),
            Symbol::Ident(name) => write!(f, "{}", name),
        }
    }
}

pub fn scan(pattern: &str) -> Vec<Symbol> {
    SYMBOL_REGEX
        .find_iter(pattern)
        .map(|m| match m.as_str() {
            "(" => Symbol::Open,
            ")" => Symbol::Close,
            "|" => Symbol::Alt,
            "?" => Symbol::Optional,
            "*" => Symbol::Star,
            "+" => Symbol::Plus,
            ident => Symbol::Ident(ident.to_string()),
        })
        .collect()
}
