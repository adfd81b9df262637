use super::{Chunk, Opcode, Val};
use crate::error;
use crate::lang::{Error, Lexer, Token, TokenKind};

/// Compile a single expression into a chunk ending in a return
/// instruction. On failure every diagnostic the pass produced is
/// returned; the first error puts the compiler into panic mode,
/// suppressing further diagnostics until the end of the pass.
pub fn compile(source: &str) -> Result<Chunk, Vec<Error>> {
    Compiler::compile(source)
}

/// Binding strength of an infix position, weakest first. Binary
/// operators parse their right operand one level above their own
/// precedence, so chains of equal strength fold to the left.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
enum Precedence {
    None,
    Assignment,
    Or,
    And,
    Equality,
    Comparison,
    Term,
    Factor,
    Unary,
    Call,
    Primary,
}

impl Precedence {
    fn one_higher(self) -> Precedence {
        use Precedence::*;
        match self {
            None => Assignment,
            Assignment => Or,
            Or => And,
            And => Equality,
            Equality => Comparison,
            Comparison => Term,
            Term => Factor,
            Factor => Unary,
            Unary => Call,
            Call => Primary,
            Primary => Primary,
        }
    }
}

type ParseFn<'a> = fn(&mut Compiler<'a>);

/// How a token kind behaves in expression position: as a prefix, as
/// an infix, or not at all. Absent handlers are absent, not null.
struct ParseRule<'a> {
    prefix: Option<ParseFn<'a>>,
    infix: Option<ParseFn<'a>>,
    precedence: Precedence,
}

impl<'a> ParseRule<'a> {
    fn none() -> ParseRule<'a> {
        ParseRule {
            prefix: None,
            infix: None,
            precedence: Precedence::None,
        }
    }

    fn prefix(rule: ParseFn<'a>) -> ParseRule<'a> {
        ParseRule {
            prefix: Some(rule),
            infix: None,
            precedence: Precedence::None,
        }
    }

    fn infix(rule: ParseFn<'a>, precedence: Precedence) -> ParseRule<'a> {
        ParseRule {
            prefix: None,
            infix: Some(rule),
            precedence,
        }
    }
}

struct Compiler<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
    previous: Token<'a>,
    chunk: Chunk,
    errors: Vec<Error>,
    panic_mode: bool,
}

impl<'a> Compiler<'a> {
    fn compile(source: &'a str) -> Result<Chunk, Vec<Error>> {
        let nothing = Token {
            kind: TokenKind::Eof,
            lexeme: "",
            line: 1,
        };
        let mut this = Compiler {
            lexer: Lexer::new(source),
            current: nothing,
            previous: nothing,
            chunk: Chunk::new(),
            errors: vec![],
            panic_mode: false,
        };
        this.advance();
        this.expression();
        this.consume(TokenKind::Eof, "EXPECT END OF EXPRESSION");
        this.emit(Opcode::Return);
        if this.errors.is_empty() {
            Ok(this.chunk)
        } else {
            Err(this.errors)
        }
    }

    fn rule(kind: TokenKind) -> ParseRule<'a> {
        use TokenKind::*;
        match kind {
            LeftParen => ParseRule::prefix(Self::grouping),
            Minus => ParseRule {
                prefix: Some(Self::unary),
                infix: Some(Self::binary),
                precedence: Precedence::Term,
            },
            Plus => ParseRule::infix(Self::binary, Precedence::Term),
            Slash | Star => ParseRule::infix(Self::binary, Precedence::Factor),
            Bang => ParseRule::prefix(Self::unary),
            BangEqual | EqualEqual => ParseRule::infix(Self::binary, Precedence::Equality),
            Greater | GreaterEqual | Less | LessEqual => {
                ParseRule::infix(Self::binary, Precedence::Comparison)
            }
            Number => ParseRule::prefix(Self::number),
            String => ParseRule::prefix(Self::string),
            False | Nil | True => ParseRule::prefix(Self::literal),
            _ => ParseRule::none(),
        }
    }

    fn advance(&mut self) {
        self.previous = self.current;
        loop {
            self.current = self.lexer.scan_token();
            if self.current.kind != TokenKind::Error {
                break;
            }
            // An error token carries its message as the lexeme.
            let message = self.current.lexeme;
            self.error_at_current(message);
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.current.kind == kind {
            self.advance();
        } else {
            self.error_at_current(message);
        }
    }

    fn expression(&mut self) {
        self.parse_precedence(Precedence::Assignment);
    }

    fn parse_precedence(&mut self, precedence: Precedence) {
        self.advance();
        match Self::rule(self.previous.kind).prefix {
            Some(prefix) => prefix(self),
            None => {
                self.error("EXPECT EXPRESSION");
                return;
            }
        }
        while Self::rule(self.current.kind).precedence >= precedence {
            self.advance();
            if let Some(infix) = Self::rule(self.previous.kind).infix {
                infix(self);
            }
        }
    }

    fn grouping(&mut self) {
        self.expression();
        self.consume(TokenKind::RightParen, "EXPECT ')' AFTER EXPRESSION");
    }

    fn number(&mut self) {
        match self.previous.lexeme.parse::<f64>() {
            Ok(n) => self.emit_constant(Val::Number(n)),
            Err(_) => self.error("INVALID NUMBER"),
        }
    }

    fn string(&mut self) {
        let lexeme = self.previous.lexeme;
        self.emit_constant(Val::string(&lexeme[1..lexeme.len() - 1]));
    }

    fn literal(&mut self) {
        match self.previous.kind {
            TokenKind::False => self.emit(Opcode::False),
            TokenKind::Nil => self.emit(Opcode::Nil),
            TokenKind::True => self.emit(Opcode::True),
            kind => debug_assert!(false, "no literal for {:?}", kind),
        }
    }

    fn unary(&mut self) {
        let kind = self.previous.kind;
        self.parse_precedence(Precedence::Unary);
        match kind {
            TokenKind::Minus => self.emit(Opcode::Neg),
            TokenKind::Bang => self.emit(Opcode::Not),
            kind => debug_assert!(false, "no unary operator for {:?}", kind),
        }
    }

    fn binary(&mut self) {
        let kind = self.previous.kind;
        self.parse_precedence(Self::rule(kind).precedence.one_higher());
        use TokenKind::*;
        match kind {
            BangEqual => self.emit(Opcode::NotEq),
            EqualEqual => self.emit(Opcode::Eq),
            Greater => self.emit(Opcode::Gt),
            GreaterEqual => self.emit(Opcode::GtEq),
            Less => self.emit(Opcode::Lt),
            LessEqual => self.emit(Opcode::LtEq),
            Minus => self.emit(Opcode::Sub),
            Plus => self.emit(Opcode::Add),
            Slash => self.emit(Opcode::Div),
            Star => self.emit(Opcode::Mul),
            kind => debug_assert!(false, "no binary operator for {:?}", kind),
        }
    }

    fn emit(&mut self, opcode: Opcode) {
        self.chunk.write_opcode(opcode, self.previous.line);
    }

    fn emit_constant(&mut self, val: Val) {
        let line = self.previous.line;
        if let Err(error) = self.chunk.write_constant(val, line) {
            self.raise(error);
        }
    }

    fn error(&mut self, message: &str) {
        let token = self.previous;
        self.error_at(token, message);
    }

    fn error_at_current(&mut self, message: &str) {
        let token = self.current;
        self.error_at(token, message);
    }

    fn error_at(&mut self, token: Token<'a>, message: &str) {
        let message = match token.kind {
            TokenKind::Eof => format!("{} AT END", message),
            TokenKind::Error => message.to_string(),
            _ => format!("{} AT '{}'", message, token.lexeme),
        };
        self.raise(error!(SyntaxError, Some(token.line); message));
    }

    fn raise(&mut self, error: Error) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;
        self.errors.push(error);
    }
}
