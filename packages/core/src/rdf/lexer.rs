//! Tokenizer for the Turtle subset WAM documents are written in.
//!
//! The lexer never fails. Anything it cannot make sense of becomes a
//! [`TokenKind::Invalid`] token and the parser decides what to do with it.

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `@prefix` or `@base`, without the `@`.
    Directive(String),
    /// `<...>`, without the brackets.
    Iri(String),
    /// `label:local`. `local` may be empty (`wam:` in a prefix directive).
    Prefixed { prefix: String, local: String },
    /// The `a` keyword.
    A,
    /// A quoted string, escapes already resolved.
    Literal(String),
    /// A bare numeric literal such as `42` or `-1.5`.
    Number(String),
    Boolean(bool),
    /// `@en`, without the `@`.
    LangTag(String),
    /// `^^`
    Datatype,
    Dot,
    Semicolon,
    Comma,
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer {
        chars: input.chars().collect(),
        pos: 0,
        line: 1,
        out: Vec::new(),
    }
    .run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    out: Vec<Token>,
}

impl Lexer {
    fn run(mut self) -> Vec<Token> {
        while let Some(c) = self.skip_trivia() {
            let line = self.line;
            let kind = match c {
                '.' => self.single(TokenKind::Dot),
                ';' => self.single(TokenKind::Semicolon),
                ',' => self.single(TokenKind::Comma),
                '<' => self.iri(),
                '"' | '\'' => self.string(c),
                '^' => self.datatype_marker(),
                '@' => self.at_word(),
                c if c.is_ascii_digit() || c == '-' || c == '+' => self.number(),
                _ => self.name(),
            };
            self.out.push(Token { kind, line });
        }
        self.out
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Skip whitespace and `#` comments; return the next significant char.
    fn skip_trivia(&mut self) -> Option<char> {
        loop {
            match self.peek()? {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '#' => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                c => return Some(c),
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn iri(&mut self) -> TokenKind {
        self.bump();
        let mut iri = String::new();
        while let Some(c) = self.peek() {
            match c {
                '>' => {
                    self.bump();
                    return TokenKind::Iri(iri);
                }
                '\n' => break,
                _ => {
                    iri.push(c);
                    self.bump();
                }
            }
        }
        TokenKind::Invalid(format!("unterminated IRI <{iri}"))
    }

    fn string(&mut self, quote: char) -> TokenKind {
        self.bump();
        let mut value = String::new();
        while let Some(c) = self.peek() {
            match c {
                c if c == quote => {
                    self.bump();
                    return TokenKind::Literal(value);
                }
                '\n' => break,
                '\\' => {
                    self.bump();
                    match self.escape() {
                        Some(ch) => value.push(ch),
                        None => {
                            self.skip_line();
                            return TokenKind::Invalid("invalid escape sequence".into());
                        }
                    }
                }
                _ => {
                    value.push(c);
                    self.bump();
                }
            }
        }
        TokenKind::Invalid(format!("unterminated string {quote}{value}"))
    }

    fn escape(&mut self) -> Option<char> {
        let c = self.bump()?;
        Some(match c {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            '"' | '\'' | '\\' => c,
            'u' => self.hex_escape(4)?,
            'U' => self.hex_escape(8)?,
            _ => return None,
        })
    }

    fn hex_escape(&mut self, digits: usize) -> Option<char> {
        let mut code = 0u32;
        for _ in 0..digits {
            code = code * 16 + self.bump()?.to_digit(16)?;
        }
        char::from_u32(code)
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn datatype_marker(&mut self) -> TokenKind {
        self.bump();
        if self.peek() == Some('^') {
            self.bump();
            TokenKind::Datatype
        } else {
            TokenKind::Invalid("expected ^^".into())
        }
    }

    fn at_word(&mut self) -> TokenKind {
        self.bump();
        let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '-');
        match word.as_str() {
            "prefix" | "base" => TokenKind::Directive(word),
            "" => TokenKind::Invalid("stray @".into()),
            _ => TokenKind::LangTag(word),
        }
    }

    fn number(&mut self) -> TokenKind {
        let mut text = self.take_while(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
        let trailing_dot = text.ends_with('.');
        if trailing_dot {
            text.pop();
            self.pos -= 1;
        }
        if text.parse::<f64>().is_ok() {
            TokenKind::Number(text)
        } else {
            TokenKind::Invalid(format!("malformed number {text}"))
        }
    }

    fn name(&mut self) -> TokenKind {
        let mut word = self.take_while(|c| {
            !c.is_whitespace() && !matches!(c, ';' | ',' | '<' | '>' | '"' | '\'' | '#' | '^')
        });
        // A name cannot end in `.`; the dot terminates the statement.
        while word.ends_with('.') {
            word.pop();
            self.pos -= 1;
        }
        if word.is_empty() {
            let c = self.bump().unwrap_or_default();
            return TokenKind::Invalid(format!("unexpected character {c:?}"));
        }
        if let Some((prefix, local)) = word.split_once(':') {
            return TokenKind::Prefixed {
                prefix: prefix.to_string(),
                local: local.to_string(),
            };
        }
        match word.as_str() {
            "a" => TokenKind::A,
            "true" => TokenKind::Boolean(true),
            "false" => TokenKind::Boolean(false),
            _ => TokenKind::Invalid(format!("unexpected word {word}")),
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            s.push(c);
            self.bump();
        }
        s
    }
}
