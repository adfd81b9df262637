//! # Lox
//!
//! Terminal front end for the Lox expression machine.

fn main() {
    lox::term::main()
}
