//! Property expressions.
//!
//! A deliberately small language: numbers, booleans, arithmetic, comparisons, `?:`, a handful of
//! math builtins and identifiers. Identifiers resolve to `value` (the keyframed value), `frame`,
//! `time` (seconds) or variables assigned at run time through
//! [`crate::Loader::assign`]. The After Effects `$bm_rt = ...;` form is accepted.

pub(crate) mod ast;
pub(crate) mod error;
pub(crate) mod eval;
pub(crate) mod lexer;
pub(crate) mod parser;

use crate::foundation::error::LoaderResult;

/// A compiled property expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    source: String,
    ast: ast::Expr,
}

impl Expression {
    /// Original expression text.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Compiles and evaluates property expressions.
///
/// Handed to the document parser by the scene builder: a builder without an engine gets
/// documents whose expressions were ignored at parse time.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpressionEngine;

impl ExpressionEngine {
    /// Create an engine.
    pub fn new() -> Self {
        Self
    }

    /// Compile expression source text.
    pub fn compile(&self, src: &str) -> LoaderResult<Expression> {
        let ast = parser::parse_expr(src)?;
        Ok(Expression {
            source: src.to_owned(),
            ast,
        })
    }

    /// Evaluate to a number, resolving identifiers through `lookup`.
    pub fn evaluate(
        &self,
        expr: &Expression,
        lookup: &dyn Fn(&str) -> Option<f64>,
    ) -> LoaderResult<f64> {
        let v = eval::eval_expr(&expr.ast, lookup)?;
        Ok(v.as_f64()?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/engine.rs"]
mod tests;
