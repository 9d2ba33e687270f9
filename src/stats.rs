// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Static code metrics over a finished program.
//!
//! Label collection and jump classification run only after the whole
//! program is known, so labels declared after their first use still
//! classify the jump as forward rather than bad.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{Diagnostic, ParseError, ParseErrorKind};
use crate::instructions;
use crate::parser::{Instruction, Program};

/// One requestable counter, in command-line flag form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsField {
    Loc,
    Comments,
    Labels,
    Jumps,
    FwJumps,
    BackJumps,
    BadJumps,
}

impl StatsField {
    pub const ALL: [StatsField; 7] = [
        Self::Loc,
        Self::Comments,
        Self::Labels,
        Self::Jumps,
        Self::FwJumps,
        Self::BackJumps,
        Self::BadJumps,
    ];

    /// Long flag name without the leading dashes; also the clap argument id.
    pub fn flag_name(self) -> &'static str {
        match self {
            Self::Loc => "loc",
            Self::Comments => "comments",
            Self::Labels => "labels",
            Self::Jumps => "jumps",
            Self::FwJumps => "fwjumps",
            Self::BackJumps => "backjumps",
            Self::BadJumps => "badjumps",
        }
    }
}

/// One `--stats=<path>` group with the counters requested after it,
/// in command-line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsGroup {
    pub path: PathBuf,
    pub fields: Vec<StatsField>,
}

/// Immutable snapshot of all seven counters, produced once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountersSnapshot {
    pub instructions: u32,
    pub comments: u32,
    pub labels: u32,
    pub jumps: u32,
    pub fwjumps: u32,
    pub backjumps: u32,
    pub badjumps: u32,
}

impl CountersSnapshot {
    pub fn field(&self, field: StatsField) -> u32 {
        match field {
            StatsField::Loc => self.instructions,
            StatsField::Comments => self.comments,
            StatsField::Labels => self.labels,
            StatsField::Jumps => self.jumps,
            StatsField::FwJumps => self.fwjumps,
            StatsField::BackJumps => self.backjumps,
            StatsField::BadJumps => self.badjumps,
        }
    }
}

/// Walks the finished program and produces the counters snapshot.
///
/// A duplicate `LABEL` name is fatal: the whole run aborts and neither XML
/// nor stats files are produced.
pub fn collect(program: &Program, comment_count: u32) -> Result<CountersSnapshot, Diagnostic> {
    let mut label_orders: HashMap<String, u32> = HashMap::new();
    let mut jump_records: Vec<(String, u32)> = Vec::new();
    let mut no_target_jumps = 0u32;

    for instruction in program.instructions() {
        if instruction.opcode() == "LABEL" {
            let name = target_label(instruction)?;
            if label_orders
                .insert(name.to_string(), instruction.order())
                .is_some()
            {
                return Err(Diagnostic::from(ParseError::new(
                    ParseErrorKind::Syntax,
                    "Duplicate label definition",
                    Some(name),
                )));
            }
        } else if instructions::is_labeled_jump(instruction.opcode()) {
            let name = target_label(instruction)?;
            jump_records.push((name.to_string(), instruction.order()));
        } else if instruction.opcode() == "RETURN" {
            no_target_jumps += 1;
        }
    }

    let mut fwjumps = 0u32;
    let mut backjumps = 0u32;
    let mut badjumps = 0u32;
    for (target, order) in &jump_records {
        match label_orders.get(target) {
            Some(label_order) if *label_order <= *order => backjumps += 1,
            Some(_) => fwjumps += 1,
            None => badjumps += 1,
        }
    }

    Ok(CountersSnapshot {
        instructions: program.len() as u32,
        comments: comment_count,
        labels: label_orders.len() as u32,
        jumps: jump_records.len() as u32 + no_target_jumps,
        fwjumps,
        backjumps,
        badjumps,
    })
}

fn target_label(instruction: &Instruction) -> Result<&str, Diagnostic> {
    match instruction.operands().first() {
        Some(crate::argument::OperandValue::Label { name }) => Ok(name),
        _ => Err(Diagnostic::from(ParseError::new(
            ParseErrorKind::Internal,
            "Label-taking instruction without a label operand",
            Some(instruction.opcode()),
        ))),
    }
}

/// Writes every stats group to its file, one counter per line in flag
/// order. The same path given twice is an output error, checked before any
/// file is touched.
pub fn write_stats(groups: &[StatsGroup], counters: &CountersSnapshot) -> Result<(), ParseError> {
    for (index, group) in groups.iter().enumerate() {
        if groups[..index].iter().any(|other| other.path == group.path) {
            return Err(ParseError::new(
                ParseErrorKind::Output,
                "Statistics file given more than once",
                Some(&group.path.display().to_string()),
            ));
        }
    }

    for group in groups {
        let mut text = String::new();
        for field in &group.fields {
            text.push_str(&counters.field(*field).to_string());
            text.push('\n');
        }
        fs::write(&group.path, text).map_err(|err| {
            ParseError::new(
                ParseErrorKind::Output,
                "Cannot write statistics file",
                Some(&format!("{}: {err}", group.path.display())),
            )
        })?;
    }

    Ok(())
}
