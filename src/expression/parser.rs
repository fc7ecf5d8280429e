use crate::expression::ast::{BinaryOp, Expr, Lit, UnaryOp};
use crate::expression::error::ExprError;
use crate::expression::lexer::{Token, TokenKind, lex};

/// Identifier After Effects-style expressions assign their result to.
const RESULT_VAR: &str = "$bm_rt";

/// Binding power of the ternary `?:`; every binary operator binds tighter.
const TERNARY_BP: u8 = 1;

pub(crate) fn parse_expr(src: &str) -> Result<Expr, ExprError> {
    let mut p = Parser {
        tokens: lex(src)?,
        pos: 0,
    };

    if matches!(&p.peek().kind, TokenKind::Ident(name) if name == RESULT_VAR)
        && p.tokens.get(1).is_some_and(|t| t.kind == TokenKind::Assign)
    {
        p.pos = 2;
    }

    let expr = p.expr(0)?;
    while p.eat(&TokenKind::Semicolon) {}
    p.expect(&TokenKind::Eof)?;
    Ok(expr)
}

/// Operator and left binding power of an infix token.
fn infix(kind: &TokenKind) -> Option<(BinaryOp, u8)> {
    let op = match kind {
        TokenKind::OrOr => (BinaryOp::Or, 2),
        TokenKind::AndAnd => (BinaryOp::And, 3),
        TokenKind::EqEq => (BinaryOp::Eq, 4),
        TokenKind::Ne => (BinaryOp::Ne, 4),
        TokenKind::Lt => (BinaryOp::Lt, 5),
        TokenKind::Le => (BinaryOp::Le, 5),
        TokenKind::Gt => (BinaryOp::Gt, 5),
        TokenKind::Ge => (BinaryOp::Ge, 5),
        TokenKind::Plus => (BinaryOp::Add, 6),
        TokenKind::Minus => (BinaryOp::Sub, 6),
        TokenKind::Star => (BinaryOp::Mul, 7),
        TokenKind::Slash => (BinaryOp::Div, 7),
        TokenKind::Percent => (BinaryOp::Mod, 7),
        _ => return None,
    };
    Some(op)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Take the current token; the trailing `Eof` is never stepped past.
    fn next(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        if t.kind != TokenKind::Eof {
            self.pos += 1;
        }
        t
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        let hit = &self.peek().kind == kind;
        if hit {
            self.next();
        }
        hit
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ExprError> {
        if self.eat(kind) {
            return Ok(());
        }
        let t = self.peek();
        Err(ExprError::new(
            t.span.start,
            format!("expected {kind:?}, found {:?}", t.kind),
        ))
    }

    /// Expression whose operators all bind tighter than `min_bp`.
    fn expr(&mut self, min_bp: u8) -> Result<Expr, ExprError> {
        let mut lhs = self.prefix()?;
        loop {
            if self.peek().kind == TokenKind::Question {
                if TERNARY_BP < min_bp {
                    break;
                }
                self.next();
                let then = self.expr(0)?;
                self.expect(&TokenKind::Colon)?;
                let otherwise = self.expr(TERNARY_BP)?;
                lhs = Expr::Conditional {
                    cond: Box::new(lhs),
                    then: Box::new(then),
                    otherwise: Box::new(otherwise),
                };
                continue;
            }

            let Some((op, bp)) = infix(&self.peek().kind) else {
                break;
            };
            if bp <= min_bp {
                break;
            }
            self.next();
            let rhs = self.expr(bp)?;
            lhs = Expr::Binary {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn prefix(&mut self) -> Result<Expr, ExprError> {
        let t = self.next();
        let unary = |op, expr| Expr::Unary {
            op,
            expr: Box::new(expr),
        };
        match t.kind {
            TokenKind::Minus => Ok(unary(UnaryOp::Neg, self.prefix()?)),
            TokenKind::Plus => self.prefix(),
            TokenKind::Bang => Ok(unary(UnaryOp::Not, self.prefix()?)),
            TokenKind::Number(v) => Ok(Expr::Lit(Lit::F64(v))),
            TokenKind::True => Ok(Expr::Lit(Lit::Bool(true))),
            TokenKind::False => Ok(Expr::Lit(Lit::Bool(false))),
            TokenKind::Ident(name) if self.eat(&TokenKind::LParen) => Ok(Expr::Call {
                func: name,
                args: self.args()?,
            }),
            TokenKind::Ident(name) => Ok(Expr::Ident(name)),
            TokenKind::LParen => {
                let e = self.expr(0)?;
                self.expect(&TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(ExprError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }

    /// Call arguments after the opening parenthesis.
    fn args(&mut self) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if self.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expr(0)?);
            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RParen)?;
                return Ok(args);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
