// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Instruction builder, program model, and the parse driver.
//!
//! Construction is all-or-nothing per line: a partially validated
//! instruction is never appended to the program.

use crate::argument::{self, OperandValue};
use crate::error::{Diagnostic, ParseError, ParseErrorKind};
use crate::instructions;
use crate::scanner;

/// A fully validated instruction. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    opcode: String,
    order: u32,
    operands: Vec<OperandValue>,
}

impl Instruction {
    /// Canonical upper-case opcode.
    pub fn opcode(&self) -> &str {
        &self.opcode
    }

    /// 1-based position in the program.
    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn operands(&self) -> &[OperandValue] {
        &self.operands
    }
}

/// Ordered sequence of accepted instructions. Append-only while parsing,
/// read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Builds one instruction from a scanned line.
///
/// Splits the line on whitespace, canonicalizes and looks up the opcode,
/// checks operand arity, and validates each operand in order. The first
/// failure aborts with the opcode attached for diagnostics.
pub fn build_instruction(line: &str, order: u32) -> Result<Instruction, ParseError> {
    let mut parts = line.split_whitespace();
    let mnemonic = parts.next().ok_or_else(|| {
        ParseError::new(ParseErrorKind::Internal, "Empty line reached the builder", None)
    })?;
    let tokens: Vec<&str> = parts.collect();

    let opcode = mnemonic.to_ascii_uppercase();
    let entry = instructions::lookup(&opcode).ok_or_else(|| {
        ParseError::new(ParseErrorKind::Opcode, "Unknown operation code", Some(mnemonic))
    })?;

    if tokens.len() != entry.operands.len() {
        return Err(ParseError::new(
            ParseErrorKind::Syntax,
            &format!(
                "{} expects {} operand(s), found {}",
                entry.mnemonic,
                entry.operands.len(),
                tokens.len()
            ),
            None,
        ));
    }

    let mut operands = Vec::with_capacity(tokens.len());
    for (position, (kind, token)) in entry.operands.iter().zip(&tokens).enumerate() {
        let value = argument::validate(*kind, token).map_err(|err| {
            ParseError::new(
                err.kind(),
                &format!("{} operand {}: {}", entry.mnemonic, position + 1, err.message()),
                None,
            )
        })?;
        operands.push(value);
    }

    Ok(Instruction {
        opcode,
        order,
        operands,
    })
}

/// Result of a successful parse: the program plus the comment tally the
/// reader accumulated.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub program: Program,
    pub comment_count: u32,
}

/// Runs the reader and the builder over the whole source.
pub fn parse_source(source: &str) -> Result<ParseOutcome, Diagnostic> {
    let scanned = scanner::scan(source)?;

    let mut program = Program::new();
    for (index, line) in scanned.lines.iter().enumerate() {
        let order = index as u32 + 1;
        let instruction = build_instruction(&line.text, order)
            .map_err(|err| Diagnostic::new(Some(line.number), err))?;
        program.push(instruction);
    }

    Ok(ParseOutcome {
        program,
        comment_count: scanned.comment_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::{Frame, LiteralType};

    #[test]
    fn builds_instruction_with_validated_operands() {
        let instruction = build_instruction("move GF@x int@42", 3).expect("valid line");
        assert_eq!(instruction.opcode(), "MOVE");
        assert_eq!(instruction.order(), 3);
        assert_eq!(
            instruction.operands(),
            &[
                OperandValue::Variable {
                    frame: Frame::Global,
                    name: "x".to_string()
                },
                OperandValue::Constant {
                    literal_type: LiteralType::Int,
                    raw: "42".to_string()
                },
            ]
        );
    }

    #[test]
    fn unknown_opcode_is_reported_as_opcode_error() {
        let err = build_instruction("FROBNICATE GF@x", 1).expect_err("unknown opcode");
        assert_eq!(err.kind(), ParseErrorKind::Opcode);
        assert!(err.message().contains("FROBNICATE"));
    }

    #[test]
    fn arity_mismatch_is_a_syntax_error() {
        for line in ["MOVE GF@x", "MOVE GF@x int@1 int@2", "RETURN int@1", "ADD GF@x int@1"] {
            let err = build_instruction(line, 1).expect_err(line);
            assert_eq!(err.kind(), ParseErrorKind::Syntax, "{line}");
        }
    }

    #[test]
    fn operand_failure_names_opcode_and_position() {
        let err = build_instruction("MOVE GF@x int@abc", 1).expect_err("bad constant");
        assert_eq!(err.kind(), ParseErrorKind::Syntax);
        assert!(err.message().starts_with("MOVE operand 2:"));
    }

    #[test]
    fn parse_source_assigns_sequential_orders() {
        let source = ".IPPcode22\nDEFVAR GF@x\n\nMOVE GF@x int@42 # init\nWRITE GF@x\n";
        let outcome = parse_source(source).expect("valid program");
        let orders: Vec<u32> = outcome
            .program
            .instructions()
            .iter()
            .map(Instruction::order)
            .collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(outcome.comment_count, 1);
    }

    #[test]
    fn parse_source_reports_physical_line_numbers() {
        let source = ".IPPcode22\n\n# comment\nMOVE GF@x\n";
        let err = parse_source(source).expect_err("arity mismatch");
        assert_eq!(err.kind(), ParseErrorKind::Syntax);
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn label_resolution_is_not_required_at_parse_time() {
        let outcome = parse_source(".IPPcode22\nJUMP missing\n").expect("forward reference ok");
        assert_eq!(outcome.program.len(), 1);
    }
}
