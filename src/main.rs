// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for ipparse.

use std::io::{self, Read, Write};

use serde_json::json;

use ipparse::cli::{self, CliAction, CliConfig, OutputFormat};
use ipparse::error::{Diagnostic, ParseError, ParseErrorKind};
use ipparse::{parser, stats, xml};

fn format_diagnostic_line(diag: &Diagnostic, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => diag.format(),
        OutputFormat::Json => json!({
            "code": diag.kind().diagnostic_code(),
            "severity": "error",
            "message": diag.error().message(),
            "line": diag.line(),
        })
        .to_string(),
    }
}

fn emit_diagnostic(diag: &Diagnostic, format: OutputFormat) {
    eprintln!("{}", format_diagnostic_line(diag, format));
}

/// The full success path: read stdin, parse, finalize stats, write stats
/// files, then print the XML document. No output is produced on any
/// failure path.
fn run(config: &CliConfig) -> Result<(), Diagnostic> {
    let mut source = String::new();
    io::stdin().read_to_string(&mut source).map_err(|err| {
        Diagnostic::from(ParseError::new(
            ParseErrorKind::Input,
            "Cannot read standard input",
            Some(&err.to_string()),
        ))
    })?;

    let outcome = parser::parse_source(&source)?;
    let counters = stats::collect(&outcome.program, outcome.comment_count)?;
    let document = xml::project(&outcome.program).render();

    stats::write_stats(&config.stats_groups, &counters).map_err(Diagnostic::from)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(document.as_bytes()).map_err(|err| {
        Diagnostic::from(ParseError::new(
            ParseErrorKind::Output,
            "Cannot write standard output",
            Some(&err.to_string()),
        ))
    })?;

    Ok(())
}

fn main() {
    let action = match cli::parse_cli(std::env::args_os()) {
        Ok(action) => action,
        Err(err) => {
            // Output format is unknown before the CLI parses; use text.
            let diag = Diagnostic::from(err);
            emit_diagnostic(&diag, OutputFormat::Text);
            std::process::exit(diag.exit_code());
        }
    };

    match action {
        CliAction::Help(text) => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
        CliAction::Run(config) => {
            if let Err(diag) = run(&config) {
                emit_diagnostic(&diag, config.format);
                std::process::exit(diag.exit_code());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_diagnostic_line_has_expected_keys() {
        let diag = Diagnostic::new(
            Some(7),
            ParseError::new(ParseErrorKind::Syntax, "bad operand", Some("GF@")),
        );
        let line = format_diagnostic_line(&diag, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&line).expect("valid json");
        assert_eq!(value["code"], "syn023");
        assert_eq!(value["severity"], "error");
        assert_eq!(value["message"], "bad operand: GF@");
        assert_eq!(value["line"], 7);
    }

    #[test]
    fn text_diagnostic_line_matches_plain_format() {
        let diag = Diagnostic::from(ParseError::new(
            ParseErrorKind::Header,
            "Missing program header",
            None,
        ));
        assert_eq!(
            format_diagnostic_line(&diag, OutputFormat::Text),
            "ERROR [hdr021] - Missing program header"
        );
    }
}
