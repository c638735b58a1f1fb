//! Precedence-climbing parser for XGC expressions.

use super::lexer::{Token, tokenize};
use crate::model::{BinOp, CmpOp, Expr, UnaryOp, Value};

/// Words that cannot be used as variable names.
pub const KEYWORDS: [&str; 11] = [
    "and", "or", "not", "for", "in", "if", "elif", "else", "pass", "True", "False",
];

/// Cursor over a token slice shared by the expression and statement parsers.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    pub fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn eat_keyword(&mut self, kw: &str) -> bool {
        if matches!(self.peek(), Some(Token::Ident(s)) if s == kw) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, expected: &Token) -> Result<(), String> {
        match self.next() {
            Some(t) if t == expected => Ok(()),
            Some(t) => Err(format!(
                "expected '{}' but found '{}'",
                expected.describe(),
                t.describe()
            )),
            None => Err(format!("expected '{}'", expected.describe())),
        }
    }

    /// Fail if tokens remain.
    pub fn finish(&self) -> Result<(), String> {
        match self.peek() {
            None => Ok(()),
            Some(t) => Err(format!("unexpected '{}'", t.describe())),
        }
    }

    pub fn expr(&mut self) -> Result<Expr, String> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Expr, String> {
        let mut lhs = self.and_expr()?;
        while self.eat_keyword("or") {
            let rhs = self.and_expr()?;
            lhs = Expr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Expr, String> {
        let mut lhs = self.not_expr()?;
        while self.eat_keyword("and") {
            let rhs = self.not_expr()?;
            lhs = Expr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn not_expr(&mut self) -> Result<Expr, String> {
        if self.eat_keyword("not") {
            let inner = self.not_expr()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expr, String> {
        let lhs = self.arith()?;
        let Some(op) = self.peek().and_then(cmp_op) else {
            return Ok(lhs);
        };
        self.pos += 1;
        let rhs = self.arith()?;
        if self.peek().and_then(cmp_op).is_some() {
            return Err("chained comparisons are not supported".to_string());
        }
        Ok(Expr::Compare(op, Box::new(lhs), Box::new(rhs)))
    }

    fn arith(&mut self) -> Result<Expr, String> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Expr, String> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::DoubleSlash) => BinOp::FloorDiv,
                Some(Token::Percent) => BinOp::Mod,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Expr, String> {
        if self.eat(&Token::Minus) {
            return Ok(Expr::Unary(UnaryOp::Neg, Box::new(self.unary()?)));
        }
        if self.eat(&Token::Plus) {
            return Ok(Expr::Unary(UnaryOp::Pos, Box::new(self.unary()?)));
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, String> {
        let base = self.atom()?;
        if self.eat(&Token::DoubleStar) {
            // Right associative, and `2 ** -1` is allowed.
            let exp = self.unary()?;
            return Ok(Expr::Binary(BinOp::Pow, Box::new(base), Box::new(exp)));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, String> {
        let Some(tok) = self.next() else {
            return Err("unexpected end of expression".to_string());
        };
        match tok {
            Token::Int(i) => Ok(Expr::Literal(Value::Int(*i))),
            Token::Float(f) => Ok(Expr::Literal(Value::Float(*f))),
            Token::Str(s) => Ok(Expr::Literal(Value::Str(s.clone()))),
            Token::LParen => {
                let inner = self.expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) if name == "True" => Ok(Expr::Literal(Value::Bool(true))),
            Token::Ident(name) if name == "False" => Ok(Expr::Literal(Value::Bool(false))),
            Token::Ident(name) if KEYWORDS.contains(&name.as_str()) => {
                Err(format!("unexpected keyword '{name}'"))
            }
            Token::Ident(name) => {
                if self.eat(&Token::LParen) {
                    let args = self.call_args()?;
                    Ok(Expr::Call {
                        name: name.clone(),
                        args,
                    })
                } else {
                    Ok(Expr::Name(name.clone()))
                }
            }
            other => Err(format!("unexpected '{}'", other.describe())),
        }
    }

    fn call_args(&mut self) -> Result<Vec<Expr>, String> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            if self.eat(&Token::RParen) {
                return Ok(args);
            }
            self.expect(&Token::Comma)?;
        }
    }
}

fn cmp_op(tok: &Token) -> Option<CmpOp> {
    match tok {
        Token::EqEq => Some(CmpOp::Eq),
        Token::NotEq => Some(CmpOp::Ne),
        Token::Lt => Some(CmpOp::Lt),
        Token::Le => Some(CmpOp::Le),
        Token::Gt => Some(CmpOp::Gt),
        Token::Ge => Some(CmpOp::Ge),
        _ => None,
    }
}

/// Parse a complete expression from text.
pub fn parse_expr(src: &str) -> Result<Expr, String> {
    let tokens = tokenize(src)?;
    if tokens.is_empty() {
        return Err("missing expression".to_string());
    }
    let mut cursor = Cursor::new(&tokens);
    let expr = cursor.expr()?;
    cursor.finish()?;
    Ok(expr)
}
