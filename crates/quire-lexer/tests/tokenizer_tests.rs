//! Integration tests for the language tokenizers.

use quickcheck_macros::quickcheck;
use quire_lexer::{
    CDialect, CLikeTokenizer, Language, LanguageTokenizer, LexState, SmalltalkTokenizer, Token,
    TokenKind, tokenize,
};

/// Helper to lex a whole text and pair each token kind with its text
fn lex(language: Language, text: &str) -> Vec<(TokenKind, &str)> {
    tokenize(language, text)
        .into_iter()
        .map(|token| (token.kind, token.text(text)))
        .collect()
}

/// Helper to drain a tokenizer and pair each token kind with its text
fn drain<'a>(tokenizer: &mut dyn LanguageTokenizer, text: &'a str) -> Vec<(TokenKind, &'a str)> {
    tokenizer
        .tokenize_all()
        .into_iter()
        .map(|token| (token.kind, token.text(text)))
        .collect()
}

// ===== C family =====

#[test]
fn test_java_statement() {
    assert_eq!(
        lex(Language::Java, "public static int x = 42;"),
        [
            (TokenKind::Keyword, "public"),
            (TokenKind::Keyword, "static"),
            (TokenKind::Keyword, "int"),
            (TokenKind::Token, "x"),
            (TokenKind::Token, "="),
            (TokenKind::Token, "42"),
            (TokenKind::Token, ";"),
        ]
    );
}

#[test]
fn test_keywords_must_be_whole_lowercase_words() {
    let tokens = lex(Language::Java, "interface integer Int int_value");
    assert_eq!(
        tokens,
        [
            (TokenKind::Keyword, "interface"),
            (TokenKind::Token, "integer"),
            (TokenKind::Token, "Int"),
            (TokenKind::Token, "int_value"),
        ]
    );
}

#[test]
fn test_keyword_sets_per_dialect() {
    assert_eq!(lex(Language::C, "class")[0].0, TokenKind::Token);
    assert_eq!(lex(Language::Cpp, "class")[0].0, TokenKind::Keyword);
    assert_eq!(lex(Language::Java, "typedef")[0].0, TokenKind::Token);
    assert_eq!(lex(Language::C, "typedef")[0].0, TokenKind::Keyword);
}

#[test]
fn test_line_comments_disabled_for_c() {
    assert_eq!(
        lex(Language::Java, "a // b"),
        [(TokenKind::Token, "a"), (TokenKind::Comment, "// b")]
    );
    assert_eq!(
        lex(Language::C, "a // b"),
        [
            (TokenKind::Token, "a"),
            (TokenKind::Token, "/"),
            (TokenKind::Token, "/"),
            (TokenKind::Token, "b"),
        ]
    );
}

#[test]
fn test_line_comment_stops_at_line_end() {
    assert_eq!(
        lex(Language::Cpp, "// note\nx"),
        [(TokenKind::Comment, "// note"), (TokenKind::Token, "x")]
    );
}

#[test]
fn test_literals() {
    assert_eq!(
        lex(Language::Java, r#"s = "a\"b" + 'x';"#),
        [
            (TokenKind::Token, "s"),
            (TokenKind::Token, "="),
            (TokenKind::Constant, r#""a\"b""#),
            (TokenKind::Token, "+"),
            (TokenKind::Constant, "'x'"),
            (TokenKind::Token, ";"),
        ]
    );
}

#[test]
fn test_literal_ends_at_unescaped_line_end() {
    let text = "\"abc\nd";
    let mut tokenizer = CLikeTokenizer::new(text, 0..text.len(), CDialect::C);
    assert_eq!(
        drain(&mut tokenizer, text),
        [(TokenKind::Constant, "\"abc"), (TokenKind::Token, "d")]
    );
    assert_eq!(tokenizer.state(), LexState::default());
}

#[test]
fn test_block_comment_resumes_in_next_range() {
    let text = "x /* one\ntwo */ y";
    let line_end = 8;

    let mut first = CLikeTokenizer::new(text, 0..line_end, CDialect::Java);
    let tokens = first.tokenize_all();
    assert_eq!(
        tokens,
        [
            Token {
                kind: TokenKind::Token,
                start: 0,
                end: 1
            },
            Token {
                kind: TokenKind::MultiLineComment,
                start: 2,
                end: 8
            },
        ]
    );
    assert!(first.state().in_multi_line_comment);

    let mut second = CLikeTokenizer::new(text, line_end + 1..text.len(), CDialect::Java);
    second.set_state(first.state());
    assert_eq!(
        drain(&mut second, text),
        [(TokenKind::Comment, "two */"), (TokenKind::Token, "y")]
    );
    assert!(!second.state().in_multi_line_comment);
}

#[test]
fn test_escaped_line_end_continues_literal() {
    let text = "\"abc\\\ndef\";";
    let line_end = text.find('\n').unwrap();

    let mut first = CLikeTokenizer::new(text, 0..line_end, CDialect::C);
    assert_eq!(
        drain(&mut first, text),
        [(TokenKind::MultiLineConstant, "\"abc\\")]
    );
    assert!(first.state().in_multi_line_constant);

    let mut second = CLikeTokenizer::new(text, line_end + 1..text.len(), CDialect::C);
    second.set_state(first.state());
    assert_eq!(
        drain(&mut second, text),
        [(TokenKind::Constant, "def\""), (TokenKind::Token, ";")]
    );
    assert!(!second.state().in_multi_line_constant);
}

#[test]
fn test_empty_range_keeps_state() {
    let text = "abc";
    let mut tokenizer = CLikeTokenizer::new(text, 1..1, CDialect::Java);
    let state = LexState {
        in_multi_line_comment: true,
        ..LexState::default()
    };
    tokenizer.set_state(state);
    let token = tokenizer.next_token();
    assert_eq!(token.kind, TokenKind::EndOfInput);
    assert!(token.is_empty());
    assert_eq!(tokenizer.state(), state);
}

#[test]
fn test_end_of_input_repeats() {
    let text = "  x  ";
    let mut tokenizer = CLikeTokenizer::new(text, 0..text.len(), CDialect::Java);
    assert_eq!(tokenizer.next_token().kind, TokenKind::Token);
    for _ in 0..3 {
        let token = tokenizer.next_token();
        assert_eq!(token.kind, TokenKind::EndOfInput);
        assert_eq!(token.start, text.len());
    }
}

#[test]
fn test_offsets_within_a_sub_range() {
    let text = "int a; int b;";
    let mut tokenizer = CLikeTokenizer::new(text, 7..text.len(), CDialect::C);
    let tokens = tokenizer.tokenize_all();
    assert_eq!(tokens[0].start, 7);
    assert_eq!(tokens[0].text(text), "int");
    assert_eq!(tokens[1].text(text), "b");
}

#[test]
fn test_non_ascii_identifier() {
    let text = "é = 1";
    let tokens = tokenize(Language::Java, text);
    assert_eq!(tokens[0].kind, TokenKind::Token);
    assert_eq!((tokens[0].start, tokens[0].end), (0, 2));
}

// ===== Smalltalk =====

#[test]
fn test_smalltalk_statement() {
    assert_eq!(
        lex(
            Language::Smalltalk,
            "x := self foo: 'it''s' , #bar:baz: , $a. ^nil"
        ),
        [
            (TokenKind::Token, "x"),
            (TokenKind::Keyword, ":="),
            (TokenKind::Keyword, "self"),
            (TokenKind::Token, "foo"),
            (TokenKind::Token, ":"),
            (TokenKind::Constant, "'it''s'"),
            (TokenKind::Token, ","),
            (TokenKind::Constant, "#bar:baz:"),
            (TokenKind::Token, ","),
            (TokenKind::Constant, "$a"),
            (TokenKind::Token, "."),
            (TokenKind::Keyword, "^"),
            (TokenKind::Keyword, "nil"),
        ]
    );
}

#[test]
fn test_smalltalk_symbols() {
    assert_eq!(
        lex(Language::Smalltalk, "#'hello world' #+ #(1)"),
        [
            (TokenKind::Constant, "#'hello world'"),
            (TokenKind::Constant, "#+"),
            (TokenKind::Token, "#"),
            (TokenKind::Token, "("),
            (TokenKind::Token, "1"),
            (TokenKind::Token, ")"),
        ]
    );
}

#[test]
fn test_smalltalk_numbers() {
    assert_eq!(
        lex(Language::Smalltalk, "16r1F 3.14 x."),
        [
            (TokenKind::Token, "16r1F"),
            (TokenKind::Token, "3.14"),
            (TokenKind::Token, "x"),
            (TokenKind::Token, "."),
        ]
    );
}

#[test]
fn test_smalltalk_underscore_assignment() {
    assert_eq!(
        lex(Language::Smalltalk, "a _ b"),
        [
            (TokenKind::Token, "a"),
            (TokenKind::Keyword, "_"),
            (TokenKind::Token, "b"),
        ]
    );
}

#[test]
fn test_smalltalk_comment_spans_lines() {
    let text = "\"one\ntwo\" x";
    assert_eq!(
        lex(Language::Smalltalk, text),
        [(TokenKind::Comment, "\"one\ntwo\""), (TokenKind::Token, "x")]
    );

    let mut first = SmalltalkTokenizer::new(text, 0..4);
    assert_eq!(drain(&mut first, text), [(TokenKind::MultiLineComment, "\"one")]);
    let mut second = SmalltalkTokenizer::new(text, 5..text.len());
    second.set_state(first.state());
    assert_eq!(
        drain(&mut second, text),
        [(TokenKind::Comment, "two\""), (TokenKind::Token, "x")]
    );
}

#[test]
fn test_smalltalk_string_resumes_in_next_range() {
    let text = "'first\nsecond' done";
    let mut first = SmalltalkTokenizer::new(text, 0..6);
    assert_eq!(drain(&mut first, text), [(TokenKind::MultiLineConstant, "'first")]);
    assert!(first.state().in_multi_line_constant);

    let mut second = SmalltalkTokenizer::new(text, 7..text.len());
    second.set_state(first.state());
    assert_eq!(
        drain(&mut second, text),
        [(TokenKind::Constant, "second'"), (TokenKind::Token, "done")]
    );
    assert_eq!(second.state(), LexState::default());
}

#[test]
fn test_language_names() {
    assert_eq!("smalltalk".parse::<Language>().ok(), Some(Language::Smalltalk));
    assert_eq!("cpp".parse::<Language>().ok(), Some(Language::Cpp));
    assert!("cobol".parse::<Language>().is_err());
    assert_eq!(Language::Java.to_string(), "java");
}

// ===== Properties =====

fn well_formed(tokens: &[Token], start: usize, end: usize) -> bool {
    let mut position = start;
    tokens.iter().all(|token| {
        let ok = token.start >= position && token.end > token.start && token.end <= end;
        position = token.end;
        ok
    })
}

#[quickcheck]
fn prop_tokens_are_ordered_and_inside_the_range(text: String, a: u8, b: u8) -> bool {
    let (low, high) = (usize::from(a.min(b)), usize::from(a.max(b)));
    let mut low = low.min(text.len());
    let mut high = high.min(text.len());
    while !text.is_char_boundary(low) {
        low -= 1;
    }
    while !text.is_char_boundary(high) {
        high -= 1;
    }

    [Language::Java, Language::C, Language::Cpp, Language::Smalltalk]
        .into_iter()
        .all(|language| {
            let tokens = language.tokenizer(&text, low..high).tokenize_all();
            well_formed(&tokens, low, high)
        })
}
