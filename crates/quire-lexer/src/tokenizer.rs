use crate::token::{LexState, Token, TokenKind};

/// A resumable lexer over one range of a document.
///
/// Callers re-lex only the range an edit touched. Before lexing they restore
/// the [`LexState`] that held at the range start; afterwards they compare the
/// state read back with the one stored for the next range to decide whether
/// the following ranges must be re-lexed as well.
pub trait LanguageTokenizer {
    /// Lex the next token, or return an `EndOfInput` token at the range end.
    ///
    /// `EndOfInput` repeats once the range is exhausted.
    fn next_token(&mut self) -> Token;

    /// The state at the current position.
    fn state(&self) -> LexState;

    /// Replace the state, typically before the first token.
    fn set_state(&mut self, state: LexState);

    /// Lex the rest of the range, without the final `EndOfInput`.
    fn tokenize_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.kind == TokenKind::EndOfInput {
                return tokens;
            }
            tokens.push(token);
        }
    }
}
