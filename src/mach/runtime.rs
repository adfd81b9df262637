use super::{compile, Chunk, Opcode, Stack, Val, STACK_MAX};
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// The result of one compile-and-run cycle, for the front end to
/// report. The three cases map to distinct process exit statuses.
#[derive(Debug)]
pub enum Outcome {
    Ok(Val),
    CompileError(Vec<Error>),
    RuntimeError(Error),
}

/// The virtual machine. The operand stack persists across cycles;
/// a runtime error resets it before reporting.
pub struct Runtime {
    stack: Stack<Val>,
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime::new()
    }
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime {
            stack: Stack::new(STACK_MAX, "OPERAND STACK OVERFLOW"),
        }
    }

    pub fn interpret(&mut self, source: &str) -> Outcome {
        let chunk = match compile(source) {
            Ok(chunk) => chunk,
            Err(errors) => return Outcome::CompileError(errors),
        };
        match self.execute(&chunk) {
            Ok(val) => Outcome::Ok(val),
            Err(error) => Outcome::RuntimeError(error),
        }
    }

    /// Run a chunk from its first byte until a return instruction
    /// pops the final value. The chunk itself is never mutated. On
    /// error, the diagnostic carries the source line of the failing
    /// instruction and the operand stack is reset.
    pub fn execute(&mut self, chunk: &Chunk) -> Result<Val> {
        let mut ip = 0;
        loop {
            let at = ip;
            match self.step(chunk, &mut ip) {
                Ok(None) => {}
                Ok(Some(val)) => return Ok(val),
                Err(error) => {
                    self.stack.clear();
                    return Err(error.in_line_number(chunk.line_for_offset(at)));
                }
            }
        }
    }

    fn step(&mut self, chunk: &Chunk, ip: &mut usize) -> Result<Option<Val>> {
        let byte = read_byte(chunk, ip)?;
        let opcode = match Opcode::try_from(byte) {
            Ok(opcode) => opcode,
            Err(byte) => return Err(error!(InternalError; format!("UNKNOWN OPCODE {}", byte))),
        };
        match opcode {
            Opcode::Constant => {
                let index = read_byte(chunk, ip)? as usize;
                self.push_constant(chunk, index)?;
            }
            Opcode::ConstantLong => {
                let index = read_long_index(chunk, ip)?;
                self.push_constant(chunk, index)?;
            }
            Opcode::Nil => self.stack.push(Val::Nil),
            Opcode::True => self.stack.push(Val::Bool(true)),
            Opcode::False => self.stack.push(Val::Bool(false)),
            Opcode::Eq => {
                let (a, b) = self.stack.pop_2()?;
                self.stack.push(Val::Bool(a == b));
            }
            Opcode::NotEq => {
                let (a, b) = self.stack.pop_2()?;
                self.stack.push(Val::Bool(a != b));
            }
            Opcode::Gt => self.comparison(|a, b| a > b)?,
            Opcode::GtEq => self.comparison(|a, b| a >= b)?,
            Opcode::Lt => self.comparison(|a, b| a < b)?,
            Opcode::LtEq => self.comparison(|a, b| a <= b)?,
            Opcode::Add => self.add()?,
            Opcode::Sub => self.arithmetic(|a, b| a - b)?,
            Opcode::Mul => self.arithmetic(|a, b| a * b)?,
            Opcode::Div => self.arithmetic(|a, b| a / b)?,
            Opcode::Not => {
                let a = self.stack.pop()?;
                self.stack.push(Val::Bool(a.is_falsey()));
            }
            Opcode::Neg => {
                let a = self.stack.pop()?;
                match a.as_number() {
                    Some(n) => self.stack.push(Val::Number(-n)),
                    None => return Err(error!(TypeMismatch; "OPERAND MUST BE A NUMBER")),
                }
            }
            Opcode::Return => return Ok(Some(self.stack.pop()?)),
        }
        Ok(None)
    }

    fn push_constant(&mut self, chunk: &Chunk, index: usize) -> Result<()> {
        match chunk.constant(index) {
            Some(val) => {
                self.stack.push(val.clone());
                Ok(())
            }
            None => Err(error!(InternalError; format!("NO CONSTANT AT INDEX {}", index))),
        }
    }

    fn arithmetic(&mut self, op: fn(f64, f64) -> f64) -> Result<()> {
        let (a, b) = self.stack.pop_2()?;
        match (a.as_number(), b.as_number()) {
            (Some(a), Some(b)) => {
                self.stack.push(Val::Number(op(a, b)));
                Ok(())
            }
            _ => Err(error!(TypeMismatch; "OPERANDS MUST BE NUMBERS")),
        }
    }

    fn comparison(&mut self, op: fn(f64, f64) -> bool) -> Result<()> {
        let (a, b) = self.stack.pop_2()?;
        match (a.as_number(), b.as_number()) {
            (Some(a), Some(b)) => {
                self.stack.push(Val::Bool(op(a, b)));
                Ok(())
            }
            _ => Err(error!(TypeMismatch; "OPERANDS MUST BE NUMBERS")),
        }
    }

    /// Addition is the one overloaded instruction: numbers add,
    /// strings concatenate into a new heap string. The operands are
    /// abandoned to the reference count; nothing else coerces.
    fn add(&mut self) -> Result<()> {
        let (a, b) = self.stack.pop_2()?;
        if let (Some(a), Some(b)) = (a.as_number(), b.as_number()) {
            self.stack.push(Val::Number(a + b));
            return Ok(());
        }
        if let (Some(a), Some(b)) = (a.as_str(), b.as_str()) {
            let mut s = String::with_capacity(a.len() + b.len());
            s.push_str(a);
            s.push_str(b);
            self.stack.push(Val::string(&s));
            return Ok(());
        }
        Err(error!(TypeMismatch; "OPERANDS MUST BE TWO NUMBERS OR TWO STRINGS"))
    }
}

fn read_byte(chunk: &Chunk, ip: &mut usize) -> Result<u8> {
    match chunk.code().get(*ip) {
        Some(byte) => {
            *ip += 1;
            Ok(*byte)
        }
        None => Err(error!(InternalError; "READ PAST END OF CHUNK")),
    }
}

fn read_long_index(chunk: &Chunk, ip: &mut usize) -> Result<usize> {
    let a = read_byte(chunk, ip)? as usize;
    let b = read_byte(chunk, ip)? as usize;
    let c = read_byte(chunk, ip)? as usize;
    Ok((a << 16) | (b << 8) | c)
}
