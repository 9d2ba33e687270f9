// Line reader and comment stripper for IPPcode22 source.

use crate::error::{Diagnostic, ParseError, ParseErrorKind};

/// Mandatory header token, matched case-insensitively.
pub const HEADER_TOKEN: &str = ".IPPcode22";

/// A significant source line with its physical 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    pub number: u32,
    pub text: String,
}

/// Output of the line reader: instruction lines plus the comment tally.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub lines: Vec<ScannedLine>,
    pub comment_count: u32,
}

/// Reads the whole source, strips comments, collapses whitespace, skips
/// blank lines, and enforces the header token.
///
/// The first significant line must equal [`HEADER_TOKEN`]
/// case-insensitively; any later significant line that matches it again is
/// a duplicate header. Both cases abort with a `Header` error. Every other
/// significant line is returned for the instruction builder.
pub fn scan(source: &str) -> Result<ScanResult, Diagnostic> {
    let mut result = ScanResult::default();
    let mut header_seen = false;

    for (index, raw_line) in source.lines().enumerate() {
        let number = index as u32 + 1;
        let (stripped, had_comment) = strip_comment(raw_line);
        if had_comment {
            result.comment_count += 1;
        }
        let text = collapse_whitespace(stripped);
        if text.is_empty() {
            continue;
        }

        let is_header = text.eq_ignore_ascii_case(HEADER_TOKEN);
        if !header_seen {
            if !is_header {
                return Err(Diagnostic::new(
                    Some(number),
                    ParseError::new(
                        ParseErrorKind::Header,
                        "Missing program header",
                        Some(HEADER_TOKEN),
                    ),
                ));
            }
            header_seen = true;
            continue;
        }
        if is_header {
            return Err(Diagnostic::new(
                Some(number),
                ParseError::new(
                    ParseErrorKind::Header,
                    "Duplicate program header",
                    Some(HEADER_TOKEN),
                ),
            ));
        }

        result.lines.push(ScannedLine { number, text });
    }

    if !header_seen {
        return Err(Diagnostic::from(ParseError::new(
            ParseErrorKind::Header,
            "Missing program header",
            Some(HEADER_TOKEN),
        )));
    }

    Ok(result)
}

/// Truncates the line at the first `#`. The string-literal grammar only
/// admits `#` through a `\035` escape, so a raw `#` always starts a comment.
fn strip_comment(line: &str) -> (&str, bool) {
    match line.split_once('#') {
        Some((code, _)) => (code, true),
        None => (line, false),
    }
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
