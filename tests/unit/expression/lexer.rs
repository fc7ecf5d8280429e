use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn lexes_numbers_and_operators() {
    assert_eq!(
        kinds("1.5e2 + .5 >= x"),
        vec![
            TokenKind::Number(150.0),
            TokenKind::Plus,
            TokenKind::Number(0.5),
            TokenKind::Ge,
            TokenKind::Ident("x".to_owned()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn dollar_identifiers_and_assignment() {
    assert_eq!(
        kinds("$bm_rt = value;"),
        vec![
            TokenKind::Ident("$bm_rt".to_owned()),
            TokenKind::Assign,
            TokenKind::Ident("value".to_owned()),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn rejects_unknown_characters_and_bad_exponents() {
    let err = lex("1 @ 2").unwrap_err();
    assert_eq!(err.offset, 2);
    assert!(lex("1e+").is_err());
}

#[test]
fn math_namespace_comments_and_strict_equality() {
    assert_eq!(
        kinds("Math.sin(time) // wobble\n=== 0"),
        vec![
            TokenKind::Ident("sin".to_owned()),
            TokenKind::LParen,
            TokenKind::Ident("time".to_owned()),
            TokenKind::RParen,
            TokenKind::EqEq,
            TokenKind::Number(0.0),
            TokenKind::Eof,
        ]
    );
    assert_eq!(kinds("a !== b")[1], TokenKind::Ne);
}

#[test]
fn spans_cover_each_token() {
    let tokens = lex("  ab <= 12").unwrap();
    let spans: Vec<(usize, usize)> = tokens.iter().map(|t| (t.span.start, t.span.end)).collect();
    assert_eq!(spans, [(2, 4), (5, 7), (8, 10), (10, 10)]);
}
