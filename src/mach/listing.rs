use super::{Chunk, Opcode};
use std::convert::TryFrom;

/// Decode a chunk into a line-oriented listing: one instruction per
/// line with its code offset, source line (`   |` while unchanged),
/// mnemonic, and decoded constant operand. Purely a function of the
/// chunk; listing the same chunk twice yields identical text.
pub fn list(chunk: &Chunk, title: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("== {} ==\n", title));
    let mut offset = 0;
    while offset < chunk.len() {
        offset = list_instruction(chunk, offset, &mut out);
    }
    out
}

fn list_instruction(chunk: &Chunk, offset: usize, out: &mut String) -> usize {
    out.push_str(&format!("{:04} ", offset));
    let line = chunk.line_for_offset(offset);
    if offset > 0 && line == chunk.line_for_offset(offset - 1) {
        out.push_str("   | ");
    } else {
        match line {
            Some(line) => out.push_str(&format!("{:04} ", line)),
            None => out.push_str("???? "),
        }
    }
    let opcode = match Opcode::try_from(chunk.code()[offset]) {
        Ok(opcode) => opcode,
        Err(byte) => {
            out.push_str(&format!("UNKNOWN {}\n", byte));
            return offset + 1;
        }
    };
    match opcode {
        Opcode::Constant => constant_instruction(chunk, opcode, offset, 1, out),
        Opcode::ConstantLong => constant_instruction(chunk, opcode, offset, 3, out),
        _ => {
            out.push_str(&format!("{}\n", opcode));
            offset + 1
        }
    }
}

fn constant_instruction(
    chunk: &Chunk,
    opcode: Opcode,
    offset: usize,
    operand_len: usize,
    out: &mut String,
) -> usize {
    let operand = chunk.code().get(offset + 1..offset + 1 + operand_len);
    let index = match operand {
        Some(bytes) => bytes.iter().fold(0usize, |index, b| (index << 8) + *b as usize),
        None => {
            out.push_str(&format!("{} <truncated>\n", opcode));
            return chunk.len();
        }
    };
    match chunk.constant(index) {
        Some(val) => out.push_str(&format!("{:<9} {:04} '{}'\n", opcode.to_string(), index, val)),
        None => out.push_str(&format!("{:<9} {:04} '???'\n", opcode.to_string(), index)),
    }
    offset + 1 + operand_len
}
