//! Tokenizer for XGC expressions and script statements.

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    DoubleStar,
    LParen,
    RParen,
    Comma,
    Colon,
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Token {
    pub fn describe(&self) -> String {
        match self {
            Token::Int(i) => i.to_string(),
            Token::Float(f) => f.to_string(),
            Token::Str(s) => format!("'{s}'"),
            Token::Ident(s) => s.clone(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::DoubleSlash => "//".into(),
            Token::Percent => "%".into(),
            Token::DoubleStar => "**".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Comma => ",".into(),
            Token::Colon => ":".into(),
            Token::Assign => "=".into(),
            Token::PlusAssign => "+=".into(),
            Token::MinusAssign => "-=".into(),
            Token::StarAssign => "*=".into(),
            Token::SlashAssign => "/=".into(),
            Token::EqEq => "==".into(),
            Token::NotEq => "!=".into(),
            Token::Lt => "<".into(),
            Token::Le => "<=".into(),
            Token::Gt => ">".into(),
            Token::Ge => ">=".into(),
        }
    }
}

/// Split `src` into tokens. Errors carry a human-readable message only; the
/// caller attaches the line number.
pub fn tokenize(src: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit())) {
            let (tok, next) = lex_number(&chars, i)?;
            tokens.push(tok);
            i = next;
            continue;
        }
        if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::Ident(chars[start..i].iter().collect()));
            continue;
        }
        if c == '\'' || c == '"' {
            let start = i + 1;
            let mut end = start;
            while end < chars.len() && chars[end] != c {
                end += 1;
            }
            if end >= chars.len() {
                return Err("unterminated string literal".to_string());
            }
            tokens.push(Token::Str(chars[start..end].iter().collect()));
            i = end + 1;
            continue;
        }
        let next = chars.get(i + 1).copied();
        let (tok, width) = match (c, next) {
            ('*', Some('*')) => (Token::DoubleStar, 2),
            ('/', Some('/')) => (Token::DoubleSlash, 2),
            ('=', Some('=')) => (Token::EqEq, 2),
            ('!', Some('=')) => (Token::NotEq, 2),
            ('<', Some('=')) => (Token::Le, 2),
            ('>', Some('=')) => (Token::Ge, 2),
            ('+', Some('=')) => (Token::PlusAssign, 2),
            ('-', Some('=')) => (Token::MinusAssign, 2),
            ('*', Some('=')) => (Token::StarAssign, 2),
            ('/', Some('=')) => (Token::SlashAssign, 2),
            ('+', _) => (Token::Plus, 1),
            ('-', _) => (Token::Minus, 1),
            ('*', _) => (Token::Star, 1),
            ('/', _) => (Token::Slash, 1),
            ('%', _) => (Token::Percent, 1),
            ('(', _) => (Token::LParen, 1),
            (')', _) => (Token::RParen, 1),
            (',', _) => (Token::Comma, 1),
            (':', _) => (Token::Colon, 1),
            ('=', _) => (Token::Assign, 1),
            ('<', _) => (Token::Lt, 1),
            ('>', _) => (Token::Gt, 1),
            _ => return Err(format!("invalid character '{c}'")),
        };
        tokens.push(tok);
        i += width;
    }
    Ok(tokens)
}

fn lex_number(chars: &[char], start: usize) -> Result<(Token, usize), String> {
    let mut i = start;
    let mut is_float = false;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        is_float = true;
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            is_float = true;
            i = j;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
    }
    if i < chars.len() && (chars[i].is_alphabetic() || chars[i] == '_') {
        let tail: String = chars[start..=i].iter().collect();
        return Err(format!("invalid number literal '{tail}'"));
    }
    let text: String = chars[start..i].iter().collect();
    let tok = if is_float {
        Token::Float(
            text.parse()
                .map_err(|_| format!("invalid number literal '{text}'"))?,
        )
    } else {
        Token::Int(
            text.parse()
                .map_err(|_| format!("integer literal '{text}' is too large"))?,
        )
    };
    Ok((tok, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_numbers_and_operators() {
        let toks = tokenize("x = 2**3 // 1.5e1 + .5").unwrap();
        assert_eq!(
            toks,
            vec![
                Token::Ident("x".into()),
                Token::Assign,
                Token::Int(2),
                Token::DoubleStar,
                Token::Int(3),
                Token::DoubleSlash,
                Token::Float(15.0),
                Token::Plus,
                Token::Float(0.5),
            ]
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(tokenize("a $ b").is_err());
        assert!(tokenize("'open").is_err());
        assert!(tokenize("12abc").is_err());
        assert!(tokenize("99999999999999999999").is_err());
    }
}
