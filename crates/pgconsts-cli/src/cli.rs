use pgconsts::TableAllowlist;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    PrintTemplate,
    Generate(GenerateArgs),
}

/// Command line settings. `None` means "not given", so config file values
/// and built-in defaults can fill the gap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateArgs {
    pub input: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub package: Option<String>,
    pub tables: Option<TableAllowlist>,
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub check: bool,
    pub verbose: bool,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1).map(|s| s.as_str());
    let mut out = GenerateArgs::default();

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help),
            "--print-template" => return Ok(Command::PrintTemplate),
            "--package" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--package requires a value");
                };
                out.package = Some(non_empty("--package", v)?);
            }
            _ if token.starts_with("--package=") => {
                out.package = Some(non_empty(
                    "--package",
                    token.trim_start_matches("--package="),
                )?);
            }
            "--tables" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--tables requires a value");
                };
                out.tables = Some(TableAllowlist::from_csv(v));
            }
            _ if token.starts_with("--tables=") => {
                out.tables = Some(TableAllowlist::from_csv(
                    token.trim_start_matches("--tables="),
                ));
            }
            "--template" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--template requires a value");
                };
                out.template = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--template=") => {
                out.template = Some(PathBuf::from(token.trim_start_matches("--template=")));
            }
            "--output" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--output requires a value");
                };
                out.output = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--output=") => {
                out.output = Some(PathBuf::from(token.trim_start_matches("--output=")));
            }
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                out.config = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--config=") => {
                out.config = Some(PathBuf::from(token.trim_start_matches("--config=")));
            }
            "--check" => out.check = true,
            "-v" | "--verbose" => out.verbose = true,
            other if other.starts_with('-') && other != "-" => {
                anyhow::bail!("unknown argument: {other}")
            }
            other => {
                if out.input.is_some() {
                    anyhow::bail!(
                        "unexpected positional argument: {other} (expected one SQL file)"
                    );
                }
                out.input = Some(PathBuf::from(other));
            }
        }
    }

    Ok(Command::Generate(out))
}

fn non_empty(flag: &str, v: &str) -> anyhow::Result<String> {
    let v = v.trim();
    if v.is_empty() {
        anyhow::bail!("{flag} must not be empty");
    }
    Ok(v.to_string())
}

pub fn print_help() {
    println!(
        "\
pgconsts - generate Rust table/column name constants from PostgreSQL schemas

USAGE:
  pgconsts [OPTIONS] [SQLFILE]

ARGS:
  <SQLFILE>             SQL file with CREATE TABLE statements (\"-\" reads stdin)

OPTIONS:
  --package <NAME>      Module name for generated code (default: models)
  --tables <CSV>        Comma separated list of tables to generate (default: all tables)
  --template <FILE>     Template file to use for generation (default: built-in)
  --output <FILE>       File to write generated code to (default: stdout)
  --config <FILE>       Read defaults from a TOML config file
  --check               Exit non-zero if --output is out of date; write nothing
  --print-template      Print the built-in template and exit
  -v, --verbose         Verbose logging (RUST_LOG overrides)
  -h, --help            Print help

TEMPLATE FUNCTIONS:
  ExportName            user_id -> UserID, id -> ID
  ExportIdent           ExportName made a valid identifier: self -> Self_, 2fa -> _2fa
  RustStr               Quote as a Rust string literal: a\"b -> \"a\\\"b\"
  ToUpper, ToLower      Case-fold the whole string
  Title                 Capitalize each whitespace separated word
  SnakeCase, UpperCamelCase, ShoutySnakeCase"
    );
}
