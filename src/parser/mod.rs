//! XGC script parser.
//!
//! Turns editor text into a [`Program`]. Sub-modules split the work:
//!
//! - [`strip`] – comment / blank-line removal, indentation, word splitting
//! - [`lexer`] – expression tokens
//! - [`expr`] – expression parsing
//! - [`source`] – reading scripts from the filesystem or memory
//!
//! Every line is classified in a fixed order: script statement (lowercase
//! start or assignment), canned-cycle `X/Y` line, modal line of
//! parameterless commands, and finally a G/M command with parameters.

pub mod expr;
pub mod lexer;
pub mod source;
pub mod strip;

pub use expr::parse_expr;
pub use source::*;
pub use strip::{SourceLine, strip_script};

use crate::error::{CompileError, CompileResult};
use crate::model::*;
use expr::{Cursor, KEYWORDS};
use indexmap::IndexMap;
use lexer::{Token, tokenize};
use strip::{split_words, strip_brackets};

/// Parse a whole script.
pub fn parse_script(script: &str) -> CompileResult<Program> {
    let lines = strip_script(script);
    tracing::debug!(lines = lines.len(), "parsing stripped script");
    let Some(first) = lines.first() else {
        return Ok(Program {
            statements: Vec::new(),
        });
    };
    let mut pos = 0;
    let statements = parse_block(&lines, &mut pos, first.indent)?;
    if let Some(line) = lines.get(pos) {
        return Err(CompileError::preprocess(
            line.number,
            "unindent does not match any outer indentation level",
        ));
    }
    Ok(Program { statements })
}

/// What a single line turned out to be before block structure is applied.
enum LineKind {
    Simple(StatementKind),
    For { var: String, iter: Expr },
    If(Expr),
    Elif(Expr),
    Else,
}

fn parse_block(lines: &[SourceLine], pos: &mut usize, indent: usize) -> CompileResult<Vec<Statement>> {
    let mut out = Vec::new();
    while let Some(line) = lines.get(*pos) {
        if line.indent < indent {
            break;
        }
        if line.indent > indent {
            return Err(CompileError::preprocess(line.number, "unexpected indent"));
        }
        *pos += 1;
        let kind = match classify_line(line)? {
            LineKind::Simple(kind) => kind,
            LineKind::For { var, iter } => {
                let body = parse_body(lines, pos, indent, line.number)?;
                StatementKind::For { var, iter, body }
            }
            LineKind::If(condition) => {
                let body = parse_body(lines, pos, indent, line.number)?;
                let mut branches = vec![Branch {
                    line: line.number,
                    condition,
                    body,
                }];
                let mut else_body = None;
                while let Some(next) = lines.get(*pos) {
                    if next.indent != indent {
                        break;
                    }
                    match classify_line(next)? {
                        LineKind::Elif(condition) => {
                            *pos += 1;
                            let body = parse_body(lines, pos, indent, next.number)?;
                            branches.push(Branch {
                                line: next.number,
                                condition,
                                body,
                            });
                        }
                        LineKind::Else => {
                            *pos += 1;
                            else_body = Some(parse_body(lines, pos, indent, next.number)?);
                            break;
                        }
                        _ => break,
                    }
                }
                StatementKind::If {
                    branches,
                    else_body,
                }
            }
            LineKind::Elif(_) => {
                return Err(CompileError::preprocess(line.number, "'elif' without matching 'if'"));
            }
            LineKind::Else => {
                return Err(CompileError::preprocess(line.number, "'else' without matching 'if'"));
            }
        };
        out.push(Statement {
            line: line.number,
            kind,
        });
    }
    Ok(out)
}

fn parse_body(
    lines: &[SourceLine],
    pos: &mut usize,
    parent_indent: usize,
    header_line: usize,
) -> CompileResult<Vec<Statement>> {
    match lines.get(*pos) {
        Some(next) if next.indent > parent_indent => parse_block(lines, pos, next.indent),
        _ => Err(CompileError::preprocess(header_line, "expected an indented block")),
    }
}

fn classify_line(line: &SourceLine) -> CompileResult<LineKind> {
    let err = |msg: String| CompileError::preprocess(line.number, msg);
    let text = line.text.as_str();
    let starts_lower = text.chars().next().is_some_and(|c| c.is_lowercase());
    if starts_lower || is_assignment(text) {
        return parse_script_line(text).map_err(err);
    }

    let words = split_words(text).ok_or_else(|| err("unbalanced square brackets".to_string()))?;
    if words.iter().all(|w| w.starts_with('X') || w.starts_with('Y')) {
        return parse_canned_line(&words).map_err(err);
    }
    let codes: Option<Vec<Code>> = words
        .iter()
        .map(|w| Code::from_word(w).filter(|c| c.is_parameterless()))
        .collect();
    if let Some(codes) = codes {
        return Ok(LineKind::Simple(StatementKind::Modal(codes)));
    }
    parse_command_line(&words).map_err(err)
}

/// `name (= name)* = expr` or `name op= expr`, with non-keyword names.
fn is_assignment(text: &str) -> bool {
    let Ok(tokens) = tokenize(&strip_brackets(text)) else {
        return false;
    };
    split_assignment(&tokens).is_some()
}

enum Assignment<'a> {
    Plain(Vec<String>, &'a [Token]),
    Augmented(String, BinOp, &'a [Token]),
}

fn split_assignment(tokens: &[Token]) -> Option<Assignment<'_>> {
    let is_name = |t: &Token| matches!(t, Token::Ident(s) if !KEYWORDS.contains(&s.as_str()));
    let name_of = |t: &Token| match t {
        Token::Ident(s) => s.clone(),
        _ => String::new(),
    };
    if tokens.len() >= 3 && is_name(&tokens[0]) {
        let op = match tokens[1] {
            Token::PlusAssign => Some(BinOp::Add),
            Token::MinusAssign => Some(BinOp::Sub),
            Token::StarAssign => Some(BinOp::Mul),
            Token::SlashAssign => Some(BinOp::Div),
            _ => None,
        };
        if let Some(op) = op {
            return Some(Assignment::Augmented(name_of(&tokens[0]), op, &tokens[2..]));
        }
    }
    let mut targets = Vec::new();
    let mut i = 0;
    while i + 1 < tokens.len() && is_name(&tokens[i]) && tokens[i + 1] == Token::Assign {
        targets.push(name_of(&tokens[i]));
        i += 2;
    }
    if targets.is_empty() || i >= tokens.len() {
        return None;
    }
    Some(Assignment::Plain(targets, &tokens[i..]))
}

fn parse_script_line(text: &str) -> Result<LineKind, String> {
    let tokens = tokenize(&strip_brackets(text))?;
    if let Some(assign) = split_assignment(&tokens) {
        return match assign {
            Assignment::Plain(targets, rest) => {
                let value = full_expr(rest)?;
                Ok(LineKind::Simple(StatementKind::Assign { targets, value }))
            }
            Assignment::Augmented(target, op, rest) => {
                let value = full_expr(rest)?;
                Ok(LineKind::Simple(StatementKind::AugAssign { target, op, value }))
            }
        };
    }

    let mut cur = Cursor::new(&tokens);
    if cur.eat_keyword("for") {
        let var = match cur.next() {
            Some(Token::Ident(name)) if !KEYWORDS.contains(&name.as_str()) => name.clone(),
            _ => return Err("expected a loop variable after 'for'".to_string()),
        };
        if !cur.eat_keyword("in") {
            return Err("expected 'in' in for statement".to_string());
        }
        let iter = cur.expr()?;
        cur.expect(&Token::Colon)?;
        cur.finish()?;
        return Ok(LineKind::For { var, iter });
    }
    if cur.eat_keyword("if") {
        return header_condition(&mut cur).map(LineKind::If);
    }
    if cur.eat_keyword("elif") {
        return header_condition(&mut cur).map(LineKind::Elif);
    }
    if cur.eat_keyword("else") {
        cur.expect(&Token::Colon)?;
        cur.finish()?;
        return Ok(LineKind::Else);
    }
    if cur.eat_keyword("pass") {
        cur.finish()?;
        return Ok(LineKind::Simple(StatementKind::Pass));
    }
    let expr = cur.expr()?;
    cur.finish()?;
    Ok(LineKind::Simple(StatementKind::Expr(expr)))
}

fn header_condition(cur: &mut Cursor<'_>) -> Result<Expr, String> {
    let cond = cur.expr()?;
    cur.expect(&Token::Colon)?;
    cur.finish()?;
    Ok(cond)
}

fn full_expr(tokens: &[Token]) -> Result<Expr, String> {
    let mut cur = Cursor::new(tokens);
    let expr = cur.expr()?;
    cur.finish()?;
    Ok(expr)
}

fn parse_canned_line(words: &[String]) -> Result<LineKind, String> {
    let mut x = None;
    let mut y = None;
    for word in words {
        let (letter, value) = split_param(word)?;
        let slot = if letter == 'X' { &mut x } else { &mut y };
        if slot.is_some() {
            return Err(format!("duplicate parameter {letter}"));
        }
        *slot = Some(value);
    }
    Ok(LineKind::Simple(StatementKind::CannedXy { x, y }))
}

fn parse_command_line(words: &[String]) -> Result<LineKind, String> {
    let Some((head, rest)) = words.split_first() else {
        return Err("empty line".to_string());
    };
    let code = match Code::from_word(head) {
        Some(code) => code,
        None if head.starts_with('G') || head.starts_with('M') => {
            return Err(format!("unsupported command {head}"));
        }
        None => return Err(format!("unrecognized statement '{head}'")),
    };
    if code.is_parameterless() {
        return Err(format!("{code} takes no parameters"));
    }
    let mut params = IndexMap::new();
    for word in rest {
        let (letter, value) = split_param(word)?;
        if params.insert(letter, value).is_some() {
            return Err(format!("duplicate parameter {letter} in {code}"));
        }
    }
    Ok(LineKind::Simple(StatementKind::Command(Command { code, params })))
}

/// `X[10 + i]` → (`'X'`, expression `10 + i`).
fn split_param(word: &str) -> Result<(char, Expr), String> {
    let mut chars = word.chars();
    let letter = match chars.next() {
        Some(c) if c.is_ascii_uppercase() => c,
        _ => return Err(format!("invalid parameter '{word}'")),
    };
    let value = strip_brackets(chars.as_str());
    if value.trim().is_empty() {
        return Err(format!("parameter {letter} has no value"));
    }
    let expr = parse_expr(&value).map_err(|e| format!("parameter {letter}: {e}"))?;
    Ok((letter, expr))
}
