//! Fragment compiler
//!
//!     Turns the raw text stored on a template node into a [`CompiledExpr`]. Two shapes exist:
//!
//!         - `for <name> in <name>`: the iteration directive. Only the two names are kept;
//!           the renderer resolves the source collection and rebinds the loop variable.
//!         - anything else: a value expression, parsed by precedence climbing over the
//!           logos token stream.
//!
//! Grammar
//!
//!     expr    := unary (binop unary)*
//!     unary   := ('!' | '-') unary | postfix
//!     postfix := primary ('.' ident | '[' expr ']' | '(' args ')')*
//!     primary := literal | ident | '(' expr ')' | '[' args ']'
//!     args    := (expr (',' expr)* ','?)?

use crate::ast::{BinaryOp, Expr, Literal, UnaryOp};
use crate::error::CompileError;
use crate::token::{tokenize, Token};
use std::ops::Range;

/// A compiled fragment
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledExpr {
    /// `for lhs in rhs`
    Iterate { lhs: String, rhs: String },
    /// A value to substitute in place
    Value(Expr),
}

impl CompiledExpr {
    pub fn is_iteration(&self) -> bool {
        matches!(self, CompiledExpr::Iterate { .. })
    }
}

/// Compile an expression fragment.
///
/// Leading and trailing whitespace is ignored. An empty fragment is an error.
pub fn compile(fragment: &str) -> Result<CompiledExpr, CompileError> {
    let source = fragment.trim();
    let tokens = tokenize(source)
        .map_err(|offset| CompileError::new(source, "unexpected character", offset))?;
    if tokens.is_empty() {
        return Err(CompileError::new(source, "empty expression", 0));
    }

    let mut parser = ExprParser {
        source,
        tokens,
        pos: 0,
    };
    let compiled = if matches!(parser.peek(), Some(Token::For)) {
        parser.iteration()?
    } else {
        CompiledExpr::Value(parser.expr(0)?)
    };
    parser.expect_end()?;
    tracing::trace!(
        fragment = source,
        kind = if compiled.is_iteration() { "iterate" } else { "value" },
        "compiled expression"
    );
    Ok(compiled)
}

struct ExprParser<'a> {
    source: &'a str,
    tokens: Vec<(Token, Range<usize>)>,
    pos: usize,
}

impl<'a> ExprParser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| span.start)
            .unwrap_or(self.source.len())
    }

    fn error(&self, message: impl Into<String>) -> CompileError {
        CompileError::new(self.source, message, self.offset())
    }

    fn unexpected(&self, expected: &str) -> CompileError {
        match self.peek() {
            Some(token) => self.error(format!("expected {expected}, found {}", token.describe())),
            None => self.error(format!("expected {expected}, found end of expression")),
        }
    }

    fn expect(&mut self, token: Token, expected: &str) -> Result<(), CompileError> {
        if self.peek() == Some(&token) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_ident(&mut self) -> Result<String, CompileError> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn expect_end(&self) -> Result<(), CompileError> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.unexpected("end of expression")),
        }
    }

    fn iteration(&mut self) -> Result<CompiledExpr, CompileError> {
        self.expect(Token::For, "`for`")?;
        let lhs = self.expect_ident()?;
        self.expect(Token::In, "`in`")?;
        let rhs = self.expect_ident()?;
        Ok(CompiledExpr::Iterate { lhs, rhs })
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        let op = match self.peek()? {
            Token::OrOr => BinaryOp::Or,
            Token::AndAnd => BinaryOp::And,
            Token::EqEq => BinaryOp::Eq,
            Token::NotEq => BinaryOp::NotEq,
            Token::Less => BinaryOp::Less,
            Token::LessEq => BinaryOp::LessEq,
            Token::Greater => BinaryOp::Greater,
            Token::GreaterEq => BinaryOp::GreaterEq,
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            Token::Star => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
            Token::Percent => BinaryOp::Rem,
            _ => return None,
        };
        Some(op)
    }

    /// Precedence climbing: only operators binding tighter than `min` are consumed here.
    fn expr(&mut self, min: u8) -> Result<Expr, CompileError> {
        let mut left = self.unary()?;
        while let Some(op) = self.binary_op() {
            if op.precedence() <= min {
                break;
            }
            self.pos += 1;
            let right = self.expr(op.precedence())?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, CompileError> {
        let op = match self.peek() {
            Some(Token::Bang) => UnaryOp::Not,
            Some(Token::Minus) => UnaryOp::Neg,
            _ => return self.postfix(),
        };
        self.pos += 1;
        let operand = self.unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn postfix(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.primary()?;
        loop {
            match self.peek() {
                Some(Token::Dot) => {
                    self.pos += 1;
                    let name = self.expect_ident()?;
                    expr = Expr::Field {
                        target: Box::new(expr),
                        name,
                    };
                }
                Some(Token::OpenBracket) => {
                    self.pos += 1;
                    let index = self.expr(0)?;
                    self.expect(Token::CloseBracket, "`]`")?;
                    expr = Expr::Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                    };
                }
                Some(Token::OpenParen) => {
                    self.pos += 1;
                    let args = self.args(Token::CloseParen, "`)`")?;
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    fn primary(&mut self) -> Result<Expr, CompileError> {
        let offset = self.offset();
        let token = match self.advance() {
            Some(token) => token,
            None => return Err(self.unexpected("expression")),
        };
        let expr = match token {
            Token::Nil => Expr::Literal(Literal::Nil),
            Token::True => Expr::Literal(Literal::Bool(true)),
            Token::False => Expr::Literal(Literal::Bool(false)),
            Token::Int(i) => Expr::Literal(Literal::Int(i)),
            Token::Float(f) => Expr::Literal(Literal::Float(f)),
            Token::Str(s) => Expr::Literal(Literal::Str(s)),
            Token::Ident(name) => Expr::Var(name),
            Token::OpenParen => {
                let inner = self.expr(0)?;
                self.expect(Token::CloseParen, "`)`")?;
                inner
            }
            Token::OpenBracket => Expr::List(self.args(Token::CloseBracket, "`]`")?),
            other => {
                return Err(CompileError::new(
                    self.source,
                    format!("expected expression, found {}", other.describe()),
                    offset,
                ))
            }
        };
        Ok(expr)
    }

    /// Comma separated expressions up to and including `close`.
    fn args(&mut self, close: Token, expected: &str) -> Result<Vec<Expr>, CompileError> {
        let mut args = Vec::new();
        loop {
            if self.peek() == Some(&close) {
                self.pos += 1;
                return Ok(args);
            }
            args.push(self.expr(0)?);
            match self.peek() {
                Some(Token::Comma) => self.pos += 1,
                Some(t) if *t == close => {}
                _ => return Err(self.unexpected(expected)),
            }
        }
    }
}
