//! Stock on-match side-effects for lexicon rules

use super::lexicon::{LexerContext, TermMatch};

/// Discard the match. Used for whitespace and comments.
pub fn ignore(_ctx: &mut LexerContext, _matched: &TermMatch<'_>) {}

/// Merge the match into the previous buffered token when it carries the same term,
/// otherwise emit it as a new token.
pub fn concat_same_term(ctx: &mut LexerContext, matched: &TermMatch<'_>) {
    match ctx.last_mut() {
        Some(top) if top.term == matched.term => {
            top.content.push_str(matched.text);
            top.span.end = matched.span.end;
        }
        _ => ctx.push(matched.token()),
    }
}

/// Emit the match, rewriting its content to the first capture group when it participated.
pub fn emit_first_capture(ctx: &mut LexerContext, matched: &TermMatch<'_>) {
    let mut token = matched.token();
    if let Some(inner) = matched.capture(1) {
        token.content = inner.to_string();
    }
    ctx.push(token);
}

#[cfg(test)]
mod tests {
    use crate::trellis::lexing::{on_match, Lexer, Lexicon};

    #[test]
    fn test_concat_same_term_merges_runs() {
        let lexicon = Lexicon::new()
            .term_with("CONTENT", "[^{]", on_match::concat_same_term)
            .term("OPEN", r"\{");
        let lexer = Lexer::new(&lexicon).unwrap();
        let tokens = lexer.tokenize("ab{cd").into_result().unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].content, "ab");
        assert_eq!(tokens[0].span, 0..2);
        assert_eq!(tokens[1].term, "OPEN");
        assert_eq!(tokens[2].content, "cd");
        assert_eq!(tokens[2].span, 3..5);
    }

    #[test]
    fn test_ignore_drops_match() {
        let lexicon = Lexicon::new()
            .term("WORD", "[a-z]+")
            .term_with("SPACE", " +", on_match::ignore);
        let lexer = Lexer::new(&lexicon).unwrap();
        let tokens = lexer.tokenize("a  b").into_result().unwrap();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_emit_first_capture_unquotes() {
        let lexicon = Lexicon::new().term_with("STRING", r#""([^"]*)""#, on_match::emit_first_capture);
        let lexer = Lexer::new(&lexicon).unwrap();
        let tokens = lexer.tokenize(r#""hello""#).into_result().unwrap();
        assert_eq!(tokens[0].content, "hello");
        assert_eq!(tokens[0].span, 0..7);
    }
}
