// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Static IPPcode22 opcode table.
//!
//! Sorted by mnemonic; `lookup` binary-searches it. Each entry carries the
//! ordered operand-kind list the argument validator checks against.

use super::{InstructionEntry, OperandKind};

const NO_OPERANDS: &[OperandKind] = &[];
const LABEL: &[OperandKind] = &[OperandKind::Label];
const VAR: &[OperandKind] = &[OperandKind::Variable];
const SYM: &[OperandKind] = &[OperandKind::Symbol];
const VAR_SYM: &[OperandKind] = &[OperandKind::Variable, OperandKind::Symbol];
const VAR_SYM_SYM: &[OperandKind] = &[
    OperandKind::Variable,
    OperandKind::Symbol,
    OperandKind::Symbol,
];
const LABEL_SYM_SYM: &[OperandKind] = &[
    OperandKind::Label,
    OperandKind::Symbol,
    OperandKind::Symbol,
];
const VAR_TYPE: &[OperandKind] = &[OperandKind::Variable, OperandKind::TypeName];

pub static INSTRUCTION_TABLE: &[InstructionEntry] = &[
    InstructionEntry { mnemonic: "ADD", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "AND", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "BREAK", operands: NO_OPERANDS },
    InstructionEntry { mnemonic: "CALL", operands: LABEL },
    InstructionEntry { mnemonic: "CONCAT", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "CREATEFRAME", operands: NO_OPERANDS },
    InstructionEntry { mnemonic: "DEFVAR", operands: VAR },
    InstructionEntry { mnemonic: "DPRINT", operands: SYM },
    InstructionEntry { mnemonic: "EQ", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "EXIT", operands: SYM },
    InstructionEntry { mnemonic: "GETCHAR", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "GT", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "IDIV", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "INT2CHAR", operands: VAR_SYM },
    InstructionEntry { mnemonic: "JUMP", operands: LABEL },
    InstructionEntry { mnemonic: "JUMPIFEQ", operands: LABEL_SYM_SYM },
    InstructionEntry { mnemonic: "JUMPIFNEQ", operands: LABEL_SYM_SYM },
    InstructionEntry { mnemonic: "LABEL", operands: LABEL },
    InstructionEntry { mnemonic: "LT", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "MOVE", operands: VAR_SYM },
    InstructionEntry { mnemonic: "MUL", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "NOT", operands: VAR_SYM },
    InstructionEntry { mnemonic: "OR", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "POPFRAME", operands: NO_OPERANDS },
    InstructionEntry { mnemonic: "POPS", operands: VAR },
    InstructionEntry { mnemonic: "PUSHFRAME", operands: NO_OPERANDS },
    InstructionEntry { mnemonic: "PUSHS", operands: SYM },
    InstructionEntry { mnemonic: "READ", operands: VAR_TYPE },
    InstructionEntry { mnemonic: "RETURN", operands: NO_OPERANDS },
    InstructionEntry { mnemonic: "SETCHAR", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "STRI2INT", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "STRLEN", operands: VAR_SYM },
    InstructionEntry { mnemonic: "SUB", operands: VAR_SYM_SYM },
    InstructionEntry { mnemonic: "TYPE", operands: VAR_SYM },
    InstructionEntry { mnemonic: "WRITE", operands: SYM },
];
