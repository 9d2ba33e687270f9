// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types and diagnostics for the parser.
//!
//! Every component returns `Result`; only the CLI entrypoint translates a
//! terminal [`Diagnostic`] into a process exit status.

use std::fmt;

/// Categories of parser errors, each with a stable process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    Parameter,
    Input,
    Output,
    Header,
    Opcode,
    Syntax,
    Internal,
}

impl ParseErrorKind {
    /// Exit status reported when an error of this kind aborts the run.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Parameter => 10,
            Self::Input => 11,
            Self::Output => 12,
            Self::Header => 21,
            Self::Opcode => 22,
            Self::Syntax => 23,
            Self::Internal => 99,
        }
    }

    /// Short diagnostic code rendered in error output.
    pub fn diagnostic_code(self) -> &'static str {
        match self {
            Self::Parameter => "par010",
            Self::Input => "inp011",
            Self::Output => "out012",
            Self::Header => "hdr021",
            Self::Opcode => "opc022",
            Self::Syntax => "syn023",
            Self::Internal => "int099",
        }
    }
}

/// A parser error with a kind and message.
#[derive(Debug, Clone)]
pub struct ParseError {
    kind: ParseErrorKind,
    message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, msg: &str, param: Option<&str>) -> Self {
        Self {
            kind,
            message: format_error(msg, param),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// A terminal diagnostic, optionally tagged with a source line number.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    line: Option<u32>,
    error: ParseError,
}

impl Diagnostic {
    pub fn new(line: Option<u32>, error: ParseError) -> Self {
        Self { line, error }
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn error(&self) -> &ParseError {
        &self.error
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.error.kind()
    }

    pub fn exit_code(&self) -> i32 {
        self.error.kind().exit_code()
    }

    pub fn format(&self) -> String {
        let code = self.error.kind().diagnostic_code();
        match self.line {
            Some(line) => format!("{}: ERROR [{}] - {}", line, code, self.error.message()),
            None => format!("ERROR [{}] - {}", code, self.error.message()),
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Self::new(None, error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

impl std::error::Error for Diagnostic {}

/// Format an error message with an optional parameter.
pub fn format_error(msg: &str, param: Option<&str>) -> String {
    match param {
        Some(p) => format!("{msg}: {p}"),
        None => msg.to_string(),
    }
}
