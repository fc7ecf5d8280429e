use std::iter::Peekable;
use std::str::CharIndices;

use crate::expression::error::ExprError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Number(f64),
    True,
    False,

    LParen,
    RParen,
    Comma,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    Bang,
    Assign,

    EqEq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    AndAnd,
    OrOr,

    Question,
    Colon,
    Semicolon,

    Eof,
}

/// Namespace prefix of the math helpers; `Math.sin` and `sin` name the same function.
const MATH_PREFIX: &str = "Math.";

struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Character after the next one.
    fn peek2(&self) -> Option<char> {
        let mut it = self.chars.clone();
        it.next();
        it.next().map(|(_, c)| c)
    }

    fn pos(&mut self) -> usize {
        self.chars.peek().map_or(self.src.len(), |&(i, _)| i)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.chars.next();
            return true;
        }
        false
    }

    fn eat_while(&mut self, f: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&f) {
            self.chars.next();
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            self.eat_while(char::is_whitespace);
            if self.peek() == Some('/') && self.peek2() == Some('/') {
                self.eat_while(|c| c != '\n');
                continue;
            }
            break;
        }
    }

    fn number(&mut self, start: usize) -> Result<TokenKind, ExprError> {
        self.eat_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') && self.peek2().is_some_and(|c| c.is_ascii_digit()) {
            self.chars.next();
            self.eat_while(|c| c.is_ascii_digit());
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let at = self.pos();
            self.chars.next();
            if !self.eat('+') {
                self.eat('-');
            }
            let digits = self.pos();
            self.eat_while(|c| c.is_ascii_digit());
            if self.pos() == digits {
                return Err(ExprError::new(at, "exponent without digits"));
            }
        }
        let src = self.src;
        let text = &src[start..self.pos()];
        text.parse()
            .map(TokenKind::Number)
            .map_err(|_| ExprError::new(start, format!("bad number '{text}'")))
    }

    fn word(&mut self, start: usize) -> TokenKind {
        let ident = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$';
        let src = self.src;
        self.eat_while(ident);
        if &src[start..self.pos()] == "Math" && self.peek() == Some('.') {
            self.chars.next();
            self.eat_while(ident);
        }
        match &src[start..self.pos()] {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            w => TokenKind::Ident(w.strip_prefix(MATH_PREFIX).unwrap_or(w).to_owned()),
        }
    }

    /// Operator or punctuation starting with `c`, which is already consumed.
    fn symbol(&mut self, c: char, start: usize) -> Result<TokenKind, ExprError> {
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '!' if self.eat('=') => TokenKind::Ne,
            '!' => TokenKind::Bang,
            '=' if self.eat('=') => TokenKind::EqEq,
            '=' => TokenKind::Assign,
            '<' if self.eat('=') => TokenKind::Le,
            '<' => TokenKind::Lt,
            '>' if self.eat('=') => TokenKind::Ge,
            '>' => TokenKind::Gt,
            '&' if self.eat('&') => TokenKind::AndAnd,
            '|' if self.eat('|') => TokenKind::OrOr,
            _ => return Err(ExprError::new(start, format!("unexpected character '{c}'"))),
        };
        // JS strict equality reads the same as `==` here.
        if matches!(kind, TokenKind::EqEq | TokenKind::Ne) {
            self.eat('=');
        }
        Ok(kind)
    }

    fn next_token(&mut self) -> Result<Token, ExprError> {
        self.skip_trivia();
        let start = self.pos();
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: Span { start, end: start },
            });
        };

        let leading_dot = c == '.' && self.peek2().is_some_and(|d| d.is_ascii_digit());
        let kind = if c.is_ascii_digit() || leading_dot {
            if leading_dot {
                self.chars.next();
            }
            self.number(start)?
        } else if c.is_ascii_alphabetic() || c == '_' || c == '$' {
            self.word(start)
        } else {
            self.chars.next();
            self.symbol(c, start)?
        };
        Ok(Token {
            kind,
            span: Span {
                start,
                end: self.pos(),
            },
        })
    }
}

/// Tokenize `input`; the result always ends with [`TokenKind::Eof`].
pub(crate) fn lex(input: &str) -> Result<Vec<Token>, ExprError> {
    let mut lexer = Lexer::new(input);
    let mut out = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let eof = token.kind == TokenKind::Eof;
        out.push(token);
        if eof {
            return Ok(out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/lexer.rs"]
mod tests;
