// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and argument validation.
//!
//! Statistics flags are positional: each `--stats=FILE` opens a group and
//! the counter flags that follow belong to it, in order. Group membership
//! is recovered from clap's argument indices after parsing.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};

use crate::error::{ParseError, ParseErrorKind};
use crate::stats::{StatsField, StatsGroup};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const LONG_ABOUT: &str = "\
Filter-type analyzer: reads IPPcode22 source code from standard input,
checks its lexical and syntactic correctness, and writes an XML
representation of the program to standard output.

Statistics groups: each --stats=FILE starts a group; the counter flags
that follow it select which counters are written to FILE, one per line,
in the order given. A counter flag before the first --stats, or the same
FILE in two groups, is an error.";

#[derive(Parser, Debug)]
#[command(
    name = "ipparse",
    version = VERSION,
    about = "IPPcode22 lexical and syntax analyzer producing an XML program representation",
    long_about = LONG_ABOUT,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    #[arg(
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Text,
        long_help = "Select diagnostics output format on stderr. text is default; json emits one machine-readable object per diagnostic."
    )]
    pub format: OutputFormat,
    #[arg(
        long = "stats",
        value_name = "FILE",
        action = ArgAction::Append,
        long_help = "Start a statistics group written to FILE after a successful parse (repeatable). Follow with counter flags to select its content."
    )]
    pub stats: Vec<PathBuf>,
    #[arg(
        long = "loc",
        action = ArgAction::Count,
        long_help = "Add the number of instruction lines to the current statistics group."
    )]
    pub loc: u8,
    #[arg(
        long = "comments",
        action = ArgAction::Count,
        long_help = "Add the number of comment lines to the current statistics group."
    )]
    pub comments: u8,
    #[arg(
        long = "labels",
        action = ArgAction::Count,
        long_help = "Add the number of distinct labels to the current statistics group."
    )]
    pub labels: u8,
    #[arg(
        long = "jumps",
        action = ArgAction::Count,
        long_help = "Add the total number of jump instructions (including RETURN) to the current statistics group."
    )]
    pub jumps: u8,
    #[arg(
        long = "fwjumps",
        action = ArgAction::Count,
        long_help = "Add the number of forward jumps to the current statistics group."
    )]
    pub fwjumps: u8,
    #[arg(
        long = "backjumps",
        action = ArgAction::Count,
        long_help = "Add the number of backward jumps to the current statistics group."
    )]
    pub backjumps: u8,
    #[arg(
        long = "badjumps",
        action = ArgAction::Count,
        long_help = "Add the number of jumps to undefined labels to the current statistics group."
    )]
    pub badjumps: u8,
}

/// Diagnostics rendering selected with `--format`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Validated command-line configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub format: OutputFormat,
    pub stats_groups: Vec<StatsGroup>,
}

/// What the process should do after argument parsing.
#[derive(Debug, Clone)]
pub enum CliAction {
    Help(String),
    Run(CliConfig),
}

/// Parses and validates the command line.
///
/// `--help` must stand alone: combined with any other argument it is a
/// parameter error. Any flag clap does not recognize is a parameter error
/// as well.
pub fn parse_cli<I, T>(args: I) -> Result<CliAction, ParseError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    if args
        .iter()
        .skip(1)
        .any(|arg| arg.as_os_str() == OsStr::new("--help"))
    {
        if args.len() > 2 {
            return Err(ParseError::new(
                ParseErrorKind::Parameter,
                "--help cannot be combined with other parameters",
                None,
            ));
        }
        let mut command = Cli::command();
        return Ok(CliAction::Help(command.render_long_help().to_string()));
    }

    let matches = Cli::command()
        .try_get_matches_from(&args)
        .map_err(|err| ParseError::new(ParseErrorKind::Parameter, &err.to_string(), None))?;
    let cli = Cli::from_arg_matches(&matches)
        .map_err(|err| ParseError::new(ParseErrorKind::Internal, &err.to_string(), None))?;

    let stats_groups = collect_stats_groups(&matches)?;
    Ok(CliAction::Run(CliConfig {
        format: cli.format,
        stats_groups,
    }))
}

enum StatsEvent {
    Group(PathBuf),
    Field(StatsField),
}

fn typed_on_command_line(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Rebuilds the ordered `--stats` groups from argument indices.
///
/// Only arguments the user actually typed take part: clap materializes
/// defaulted values too, and those carry indices of their own.
fn collect_stats_groups(matches: &ArgMatches) -> Result<Vec<StatsGroup>, ParseError> {
    let mut events: Vec<(usize, StatsEvent)> = Vec::new();

    if typed_on_command_line(matches, "stats") {
        if let (Some(indices), Some(values)) = (
            matches.indices_of("stats"),
            matches.get_many::<PathBuf>("stats"),
        ) {
            for (index, value) in indices.zip(values) {
                events.push((index, StatsEvent::Group(value.clone())));
            }
        }
    }
    for field in StatsField::ALL {
        if !typed_on_command_line(matches, field.flag_name()) {
            continue;
        }
        if let Some(indices) = matches.indices_of(field.flag_name()) {
            for index in indices {
                events.push((index, StatsEvent::Field(field)));
            }
        }
    }
    events.sort_by_key(|(index, _)| *index);

    let mut groups: Vec<StatsGroup> = Vec::new();
    for (_, event) in events {
        match event {
            StatsEvent::Group(path) => groups.push(StatsGroup {
                path,
                fields: Vec::new(),
            }),
            StatsEvent::Field(field) => match groups.last_mut() {
                Some(group) => group.fields.push(field),
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::Parameter,
                        "Counter flag used outside a --stats group",
                        Some(&format!("--{}", field.flag_name())),
                    ));
                }
            },
        }
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_config(args: &[&str]) -> CliConfig {
        match parse_cli(args.iter().copied()).expect("valid command line") {
            CliAction::Run(config) => config,
            CliAction::Help(_) => panic!("unexpected help action"),
        }
    }

    fn parameter_error(args: &[&str]) -> ParseError {
        let err = parse_cli(args.iter().copied()).expect_err("invalid command line");
        assert_eq!(err.kind(), ParseErrorKind::Parameter);
        err
    }

    #[test]
    fn no_arguments_runs_with_no_groups() {
        let config = run_config(&["ipparse"]);
        assert!(config.stats_groups.is_empty());
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn help_alone_renders_usage() {
        match parse_cli(["ipparse", "--help"]).expect("help") {
            CliAction::Help(text) => assert!(text.contains("--stats")),
            CliAction::Run(_) => panic!("expected help action"),
        }
    }

    #[test]
    fn help_with_other_flags_is_a_parameter_error() {
        parameter_error(&["ipparse", "--help", "--loc"]);
        parameter_error(&["ipparse", "--stats=s.txt", "--help"]);
    }

    #[test]
    fn defaulted_counter_flags_never_join_a_group() {
        // Count-action flags materialize in ArgMatches with default values
        // and indices of their own; only typed flags may contribute events.
        let config = run_config(&["ipparse", "--format", "json", "--stats=s.txt", "--jumps"]);
        assert_eq!(config.stats_groups.len(), 1);
        assert_eq!(config.stats_groups[0].fields, vec![StatsField::Jumps]);
    }

    #[test]
    fn single_group_preserves_flag_order() {
        let config = run_config(&["ipparse", "--stats=s.txt", "--jumps", "--labels"]);
        assert_eq!(config.stats_groups.len(), 1);
        assert_eq!(config.stats_groups[0].path, PathBuf::from("s.txt"));
        assert_eq!(
            config.stats_groups[0].fields,
            vec![StatsField::Jumps, StatsField::Labels]
        );
    }

    #[test]
    fn multiple_groups_split_at_each_stats_flag() {
        let config = run_config(&[
            "ipparse",
            "--stats=a.txt",
            "--loc",
            "--stats=b.txt",
            "--comments",
            "--loc",
        ]);
        assert_eq!(config.stats_groups.len(), 2);
        assert_eq!(config.stats_groups[0].fields, vec![StatsField::Loc]);
        assert_eq!(
            config.stats_groups[1].fields,
            vec![StatsField::Comments, StatsField::Loc]
        );
    }

    #[test]
    fn group_without_counters_is_allowed() {
        let config = run_config(&["ipparse", "--stats=empty.txt"]);
        assert_eq!(config.stats_groups.len(), 1);
        assert!(config.stats_groups[0].fields.is_empty());
    }

    #[test]
    fn counter_flag_before_any_group_is_rejected() {
        let err = parameter_error(&["ipparse", "--loc", "--stats=s.txt"]);
        assert!(err.message().contains("--loc"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        parameter_error(&["ipparse", "--bogus"]);
    }

    #[test]
    fn format_json_is_recognized() {
        let config = run_config(&["ipparse", "--format", "json"]);
        assert_eq!(config.format, OutputFormat::Json);
    }
}
