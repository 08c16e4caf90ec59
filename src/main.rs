//! `sql-insert-form`: convert the `INSERT` statements of a file or of stdin.

use std::io::{self, IsTerminal, Read};
use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sql_insert_form::host::{self, Document};
use sql_insert_form::{
    ConvertOptions, Converter, Direction, Error, FailurePolicy, FormatOptions, KeywordCase,
    MySqlCodec, TextBuffer,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sql-insert-form")]
#[command(about = "Flip MySQL INSERT statements between the VALUES form and the SET form")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v, -vv, -vvv); `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite `INSERT ... SET` statements as `INSERT ... VALUES`.
    ToValues(ConvertArgs),
    /// Rewrite `INSERT ... VALUES` statements as `INSERT ... SET`.
    ToSet(ConvertArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input file; stdin when omitted.
    file: Option<PathBuf>,

    /// Write the result back to FILE instead of stdout.
    #[arg(short, long, requires = "file")]
    in_place: bool,

    /// Only convert the byte range START..END of the input.
    #[arg(long, value_name = "START..END", value_parser = parse_range)]
    range: Option<Range<usize>>,

    /// Letter case of keywords in converted statements.
    #[arg(long, value_enum, default_value_t = CaseArg::Preserve)]
    keyword_case: CaseArg,

    /// Backtick every table and column name.
    #[arg(long)]
    quote_identifiers: bool,

    /// Leave statements that fail to convert unchanged instead of aborting.
    #[arg(long)]
    keep_going: bool,

    /// Print the converted statement trees as JSON instead of SQL.
    #[arg(long, conflicts_with = "in_place")]
    emit_ast: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CaseArg {
    Upper,
    Lower,
    Preserve,
}

impl From<CaseArg> for KeywordCase {
    fn from(value: CaseArg) -> Self {
        match value {
            CaseArg::Upper => KeywordCase::Upper,
            CaseArg::Lower => KeywordCase::Lower,
            CaseArg::Preserve => KeywordCase::Preserve,
        }
    }
}

fn parse_range(value: &str) -> Result<Range<usize>, String> {
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got `{value}`"))?;
    let start = start
        .trim()
        .parse()
        .map_err(|err| format!("invalid start `{start}`: {err}"))?;
    let end = end
        .trim()
        .parse()
        .map_err(|err| format!("invalid end `{end}`: {err}"))?;
    Ok(start..end)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (direction, args) = match cli.command {
        Command::ToValues(args) => (Direction::ToValues, args),
        Command::ToSet(args) => (Direction::ToSet, args),
    };
    run(direction, &args)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}

fn read_input(file: Option<&Path>) -> Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        bail!(Error::NoTarget);
    }
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok(text)
}

fn run(direction: Direction, args: &ConvertArgs) -> Result<()> {
    let text = read_input(args.file.as_deref())?;
    let mut buffer = TextBuffer::new(text);
    if let Some(range) = &args.range {
        buffer = buffer.with_selection(range.clone());
    }

    let codec = MySqlCodec::with_options(FormatOptions {
        keyword_case: args.keyword_case.into(),
        quote_identifiers: args.quote_identifiers,
    });
    let failure_policy = if args.keep_going {
        FailurePolicy::Skip
    } else {
        FailurePolicy::Abort
    };
    let converter = Converter::new(codec).with_options(ConvertOptions { failure_policy });

    if args.emit_ast {
        let span = host::target_span(&buffer)?;
        let statements = converter.statements(&buffer.text()[span], direction)?;
        let json = serde_json::to_string_pretty(&statements).context("failed to encode AST")?;
        println!("{json}");
        return Ok(());
    }

    let replaced = host::run(Some(&mut buffer), &converter, direction)?;
    tracing::info!(?direction, ?replaced, "conversion done");

    match &args.file {
        Some(path) if args.in_place => std::fs::write(path, buffer.as_str())
            .with_context(|| format!("failed to write {}", path.display()))?,
        _ => print!("{}", buffer.as_str()),
    }
    Ok(())
}
