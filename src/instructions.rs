// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Instruction metadata types shared by the opcode table.

/// Expected category of an instruction argument, fixed per opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandKind {
    Variable,
    Symbol,
    Label,
    TypeName,
}

pub struct InstructionEntry {
    pub mnemonic: &'static str,
    pub operands: &'static [OperandKind],
}

pub mod table;

/// Looks up an opcode, case-insensitively, in the static instruction table.
pub fn lookup(mnemonic: &str) -> Option<&'static InstructionEntry> {
    let upper = mnemonic.to_ascii_uppercase();
    table::INSTRUCTION_TABLE
        .binary_search_by(|entry| entry.mnemonic.cmp(upper.as_str()))
        .ok()
        .map(|index| &table::INSTRUCTION_TABLE[index])
}

/// True for the jump-family members that carry a label target.
pub fn is_labeled_jump(opcode: &str) -> bool {
    matches!(opcode, "JUMP" | "JUMPIFEQ" | "JUMPIFNEQ" | "CALL")
}

#[cfg(test)]
mod tests {
    use super::table::INSTRUCTION_TABLE;
    use super::{is_labeled_jump, lookup, OperandKind};

    #[test]
    fn instruction_table_is_sorted_by_mnemonic() {
        let mut prev = "";
        for entry in INSTRUCTION_TABLE {
            assert!(
                entry.mnemonic > prev,
                "instruction table out of order: {} before {}",
                prev,
                entry.mnemonic
            );
            prev = entry.mnemonic;
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let entry = lookup("move").expect("MOVE is in the table");
        assert_eq!(entry.mnemonic, "MOVE");
        assert_eq!(
            entry.operands,
            &[OperandKind::Variable, OperandKind::Symbol]
        );
        assert!(lookup("MoVe").is_some());
        assert!(lookup("NOSUCH").is_none());
    }

    #[test]
    fn frame_instructions_take_no_operands() {
        for opcode in ["CREATEFRAME", "PUSHFRAME", "POPFRAME", "RETURN", "BREAK"] {
            let entry = lookup(opcode).expect("frame/control opcode");
            assert!(entry.operands.is_empty(), "{opcode} should take no operands");
        }
    }

    #[test]
    fn labeled_jump_family_is_closed() {
        for opcode in ["JUMP", "JUMPIFEQ", "JUMPIFNEQ", "CALL"] {
            assert!(is_labeled_jump(opcode));
        }
        assert!(!is_labeled_jump("RETURN"));
        assert!(!is_labeled_jump("LABEL"));
    }

    #[test]
    fn every_labeled_jump_has_a_leading_label_operand() {
        for entry in INSTRUCTION_TABLE {
            if is_labeled_jump(entry.mnemonic) {
                assert_eq!(entry.operands.first(), Some(&OperandKind::Label));
            }
        }
    }
}
