//! Crate-level error
//!
//! Each stage has its own error type. [Error] wraps them for callers that drive the whole
//! pipeline through [Language](crate::trellis::language::Language) or the loader.

use crate::trellis::building::BuildError;
use crate::trellis::formats::FormatError;
use crate::trellis::grammar::GrammarError;
use crate::trellis::lexing::LexError;
use crate::trellis::loader::LoaderError;
use crate::trellis::parsing::ParseError;
use crate::trellis::rendering::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Loader(#[from] LoaderError),
}

pub type Result<T> = std::result::Result<T, Error>;
