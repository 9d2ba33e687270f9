// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Operand grammars and the argument validator.
//!
//! One grammar rule per [`OperandKind`]. `validate` is a pure function:
//! it never mutates anything and is deterministic on its input.

use crate::error::{ParseError, ParseErrorKind};
use crate::instructions::OperandKind;

/// Storage class prefix of a variable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Global,
    Local,
    Temporary,
}

impl Frame {
    /// Recognizes the case-sensitive frame prefixes `GF`, `LF`, `TF`.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "GF" => Some(Self::Global),
            "LF" => Some(Self::Local),
            "TF" => Some(Self::Temporary),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "GF",
            Self::Local => "LF",
            Self::Temporary => "TF",
        }
    }
}

/// Type of a literal constant produced by a `Symbol` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralType {
    Int,
    Bool,
    Nil,
    String,
}

impl LiteralType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Nil => "nil",
            Self::String => "string",
        }
    }
}

/// Payload of a `TypeName` slot (the READ instruction's second operand).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Int,
    Bool,
    String,
    Float,
}

impl TypeTag {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "int" => Some(Self::Int),
            "bool" => Some(Self::Bool),
            "string" => Some(Self::String),
            "float" => Some(Self::Float),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Float => "float",
        }
    }
}

/// A validated operand value.
///
/// The variant is always consistent with the [`OperandKind`] that produced
/// it: a `Symbol` slot yields `Variable` or `Constant`, never `Label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandValue {
    Variable { frame: Frame, name: String },
    Constant { literal_type: LiteralType, raw: String },
    Label { name: String },
    TypeName { tag: TypeTag },
}

impl OperandValue {
    /// The `type` attribute value used in the XML projection.
    pub fn xml_type(&self) -> &'static str {
        match self {
            Self::Variable { .. } => "var",
            Self::Constant { literal_type, .. } => literal_type.as_str(),
            Self::Label { .. } => "label",
            Self::TypeName { .. } => "type",
        }
    }

    /// The element text content used in the XML projection.
    ///
    /// Variables serialize with their full `frame@name` form; constants
    /// serialize the raw payload only.
    pub fn xml_text(&self) -> String {
        match self {
            Self::Variable { frame, name } => format!("{}@{}", frame.as_str(), name),
            Self::Constant { raw, .. } => raw.clone(),
            Self::Label { name } => name.clone(),
            Self::TypeName { tag } => tag.as_str().to_string(),
        }
    }
}

/// Validates a raw operand token against the expected operand kind.
pub fn validate(kind: OperandKind, token: &str) -> Result<OperandValue, ParseError> {
    match kind {
        OperandKind::Variable => validate_variable(token),
        OperandKind::Symbol => validate_symbol(token),
        OperandKind::Label => validate_label(token),
        OperandKind::TypeName => TypeTag::from_token(token)
            .map(|tag| OperandValue::TypeName { tag })
            .ok_or_else(|| syntax_error("Invalid type name", token)),
    }
}

fn validate_variable(token: &str) -> Result<OperandValue, ParseError> {
    let (prefix, name) = token
        .split_once('@')
        .ok_or_else(|| syntax_error("Variable is missing a frame prefix", token))?;
    let frame = Frame::from_prefix(prefix)
        .ok_or_else(|| syntax_error("Invalid variable frame", token))?;
    if !is_identifier(name) {
        return Err(syntax_error("Invalid variable name", token));
    }
    Ok(OperandValue::Variable {
        frame,
        name: name.to_string(),
    })
}

fn validate_symbol(token: &str) -> Result<OperandValue, ParseError> {
    // Split on the first '@'; a string payload may itself contain '@'.
    let (prefix, payload) = token
        .split_once('@')
        .ok_or_else(|| syntax_error("Symbol is missing a type prefix", token))?;

    if Frame::from_prefix(prefix).is_some() {
        return validate_variable(token);
    }

    let literal_type = match prefix {
        "int" if is_int_literal(payload) => LiteralType::Int,
        "bool" if payload == "true" || payload == "false" => LiteralType::Bool,
        "nil" if payload == "nil" => LiteralType::Nil,
        "string" if is_string_literal(payload) => LiteralType::String,
        "int" | "bool" | "nil" | "string" => {
            return Err(syntax_error("Malformed constant payload", token));
        }
        _ => return Err(syntax_error("Unknown constant type prefix", token)),
    };

    Ok(OperandValue::Constant {
        literal_type,
        raw: payload.to_string(),
    })
}

fn validate_label(token: &str) -> Result<OperandValue, ParseError> {
    if !is_identifier(token) {
        return Err(syntax_error("Invalid label name", token));
    }
    Ok(OperandValue::Label {
        name: token.to_string(),
    })
}

fn syntax_error(msg: &str, token: &str) -> ParseError {
    ParseError::new(ParseErrorKind::Syntax, msg, Some(token))
}

/// Identifier grammar shared by variable names and labels.
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_ident_start(first) => chars.all(is_ident_char),
        _ => false,
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || is_ident_special(c)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_ident_special(c)
}

fn is_ident_special(c: char) -> bool {
    matches!(c, '_' | '-' | '$' | '&' | '%' | '*' | '!' | '?')
}

/// Signed decimal integer: `[-+]?[0-9]+`.
fn is_int_literal(payload: &str) -> bool {
    let digits = payload
        .strip_prefix(&['+', '-'][..])
        .unwrap_or(payload);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// String payload: any characters except a raw `#` or `\`; backslash is
/// legal only as a 3-digit decimal escape `\DDD`. Empty payload is valid.
fn is_string_literal(payload: &str) -> bool {
    let mut chars = payload.chars();
    while let Some(c) = chars.next() {
        match c {
            '#' => return false,
            '\\' => {
                for _ in 0..3 {
                    match chars.next() {
                        Some(d) if d.is_ascii_digit() => {}
                        _ => return false,
                    }
                }
            }
            _ => {}
        }
    }
    true
}
