//! # Lox
//!
//! A bytecode compiler and stack machine for Lox expressions.
//!
//! Source text is scanned into tokens, compiled in a single pass into
//! a byte-oriented instruction stream, and executed by a virtual
//! machine with an operand stack and a constant pool. Run the `lox`
//! binary with no arguments for a line-editing prompt, or give it a
//! script file to evaluate.
//! ```text
//! > 1 + 2 * 3
//! 7
//! ```

pub mod lang;
pub mod mach;
pub mod term;
