//! Language facade
//!
//!     A [Language] pairs a compiled lexer with a compiled grammar and runs the whole pipeline:
//!
//!         text → tokenizer → parsing engine → AST builder → SyntaxNode
//!
//!     Both lists are compiled once, at construction; parsing only reads them, so one language
//!     can parse any number of inputs.
//!
//!         let language = Language::new(
//!             &Lexicon::new()
//!                 .term("FOO", "foo")
//!                 .term("BAR", "bar")
//!                 .term_with("SPACE", r"\s+", on_match::ignore),
//!             Grammar::new()
//!                 .rule("statement", "(foo|bar)+")
//!                 .rule("foo", "FOO+")
//!                 .rule("bar", "BAR+"),
//!         )?;
//!         let tree = language.parse("foo foo bar")?;

use crate::trellis::ast::SyntaxNode;
use crate::trellis::building::AstBuilder;
use crate::trellis::error::Result;
use crate::trellis::grammar::{Grammar, ParsingGraph};
use crate::trellis::lexing::{Lexer, LexerOptions, Lexicon, Tokens};
use crate::trellis::parsing::{Derivation, Parser, ParserOptions};
use crate::trellis::token::Token;
use std::fmt;

pub struct Language {
    lexer: Lexer,
    grammar: Grammar,
    graph: ParsingGraph,
    parser_options: ParserOptions,
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("grammar", &self.grammar)
            .field("graph_nodes", &self.graph.len())
            .field("parser_options", &self.parser_options)
            .finish_non_exhaustive()
    }
}

impl Language {
    pub fn new(lexicon: &Lexicon, grammar: Grammar) -> Result<Self> {
        let lexer = Lexer::new(lexicon)?;
        let graph = grammar.compile()?;
        Ok(Self {
            lexer,
            grammar,
            graph,
            parser_options: ParserOptions::default(),
        })
    }

    pub fn with_options(mut self, lexer: LexerOptions, parser: ParserOptions) -> Self {
        self.lexer.set_options(lexer);
        self.parser_options = parser;
        self
    }

    pub fn set_lexer_options(&mut self, options: LexerOptions) {
        self.lexer.set_options(options);
    }

    pub fn set_parser_options(&mut self, options: ParserOptions) {
        self.parser_options = options;
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn graph(&self) -> &ParsingGraph {
        &self.graph
    }

    pub fn parser_options(&self) -> &ParserOptions {
        &self.parser_options
    }

    /// Lazy token stream over `text`
    pub fn tokenize<'l, 's>(&'l self, text: &'s str) -> Tokens<'l, 's> {
        self.lexer.tokenize(text)
    }

    /// Every token of `text`, failing on the first lexing error
    pub fn tokens(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self.tokenize(text).into_result()?)
    }

    /// Accepted derivation of `text`.
    ///
    /// A lexing error wins over the parse error it causes: the parser only sees the tokens
    /// produced before the scan stopped.
    pub fn derive(&self, text: &str) -> Result<Derivation> {
        let mut tokens = self.tokenize(text);
        let parsed = Parser::with_options(&self.graph, self.parser_options.clone())
            .parse(&mut tokens);
        if let Some(err) = tokens.take_error() {
            return Err(err.into());
        }
        Ok(parsed?)
    }

    pub fn parse(&self, text: &str) -> Result<SyntaxNode> {
        let derivation = self.derive(text)?;
        Ok(AstBuilder::new(&self.graph).build(&derivation)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trellis::error::Error;
    use crate::trellis::lexing::on_match;

    fn words() -> Language {
        Language::new(
            &Lexicon::new()
                .term("WORD", "[a-z]+")
                .term_with("SPACE", r"\s+", on_match::ignore),
            Grammar::new().rule("words", "WORD+"),
        )
        .unwrap()
    }

    #[test]
    fn test_debug_lists_grammar() {
        let debug = format!("{:?}", words());
        assert!(debug.starts_with("Language {"));
        assert!(debug.contains("WORD+"));
        assert!(debug.contains("max_steps_per_token"));
    }

    #[test]
    fn test_parse_pipeline() {
        let tree = words().parse("ab cd").unwrap();
        assert_eq!(tree.kind, "words");
        assert_eq!(tree.text(), "abcd");
    }

    #[test]
    fn test_lex_error_takes_precedence() {
        let err = words().parse("ab 12").unwrap_err();
        assert!(matches!(err, Error::Lex(_)));
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = words().parse("   ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_invalid_lexicon_and_grammar() {
        let bad_regex = Language::new(&Lexicon::new().term("X", "("), Grammar::new().rule("s", "X"));
        assert!(matches!(bad_regex, Err(Error::Lex(_))));

        let bad_grammar = Language::new(&Lexicon::new().term("X", "x"), Grammar::new().rule("s", "(X"));
        assert!(matches!(bad_grammar, Err(Error::Grammar(_))));
    }
}
