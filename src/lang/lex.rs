use super::token::{Token, TokenKind};

/// Scan an entire source string, ending with its end-of-input token.
pub fn lex(s: &str) -> Vec<Token> {
    Lexer::new(s).collect()
}

fn is_lox_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_lox_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Cursor over a source buffer. `scan_token` produces one token per
/// call and keeps producing the end-of-input token once the source is
/// exhausted.
pub struct Lexer<'a> {
    source: &'a str,
    start: usize,
    current: usize,
    line: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            source,
            start: 0,
            current: 0,
            line: 1,
            finished: false,
        }
    }

    pub fn scan_token(&mut self) -> Token<'a> {
        self.skip_whitespace();
        self.start = self.current;
        let c = match self.advance() {
            Some(c) => c,
            None => return self.make_token(TokenKind::Eof),
        };
        if is_lox_digit(c) {
            return self.number();
        }
        if is_lox_alphabetic(c) {
            return self.identifier();
        }
        use TokenKind::*;
        match c {
            '(' => self.make_token(LeftParen),
            ')' => self.make_token(RightParen),
            '{' => self.make_token(LeftBrace),
            '}' => self.make_token(RightBrace),
            ';' => self.make_token(Semicolon),
            ',' => self.make_token(Comma),
            '.' => self.make_token(Dot),
            '-' => self.make_token(Minus),
            '+' => self.make_token(Plus),
            '/' => self.make_token(Slash),
            '*' => self.make_token(Star),
            '!' => self.two_char_token('=', BangEqual, Bang),
            '=' => self.two_char_token('=', EqualEqual, Equal),
            '<' => self.two_char_token('=', LessEqual, Less),
            '>' => self.two_char_token('=', GreaterEqual, Greater),
            '"' => self.string(),
            _ => self.error_token("UNEXPECTED CHARACTER"),
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn matches(&mut self, expected: char) -> bool {
        match self.peek() {
            Some(c) if c == expected => {
                self.current += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    fn two_char_token(&mut self, second: char, long: TokenKind, short: TokenKind) -> Token<'a> {
        if self.matches(second) {
            self.make_token(long)
        } else {
            self.make_token(short)
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token<'a> {
        Token {
            kind,
            lexeme: &self.source[self.start..self.current],
            line: self.line,
        }
    }

    fn error_token(&self, message: &'static str) -> Token<'a> {
        Token {
            kind: TokenKind::Error,
            lexeme: message,
            line: self.line,
        }
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\r') | Some('\t') => {
                    self.advance();
                }
                Some('\n') => {
                    self.line += 1;
                    self.advance();
                }
                Some('/') => {
                    if self.peek_next() != Some('/') {
                        return;
                    }
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn string(&mut self) -> Token<'a> {
        while let Some(c) = self.peek() {
            if c == '"' {
                self.advance();
                return self.make_token(TokenKind::String);
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }
        self.error_token("UNTERMINATED STRING")
    }

    fn number(&mut self) -> Token<'a> {
        while let Some(c) = self.peek() {
            if !is_lox_digit(c) {
                break;
            }
            self.advance();
        }
        // A trailing `.` with no digit after it is not part of the number.
        if self.peek() == Some('.') {
            if let Some(c) = self.peek_next() {
                if is_lox_digit(c) {
                    self.advance();
                    while let Some(c) = self.peek() {
                        if !is_lox_digit(c) {
                            break;
                        }
                        self.advance();
                    }
                }
            }
        }
        self.make_token(TokenKind::Number)
    }

    fn identifier(&mut self) -> Token<'a> {
        while let Some(c) = self.peek() {
            if !is_lox_alphabetic(c) && !is_lox_digit(c) {
                break;
            }
            self.advance();
        }
        let lexeme = &self.source[self.start..self.current];
        match TokenKind::from_keyword(lexeme) {
            Some(kind) => self.make_token(kind),
            None => self.make_token(TokenKind::Identifier),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.scan_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}
