#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `COLFIT_DEMO_*` prefix.

use std::env;
use std::path::PathBuf;
use std::process;

use colfit_core::Px;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
colfit demo: column widths for the demo table

USAGE:
    colfit-demo [OPTIONS]

OPTIONS:
    --widths=LIST        Comma-separated container widths (default: 1000,1001,400,150)
                         The first width mounts the table, the rest are resizes.
    --on-resize          Recalculate on every container resize
    --tolerance=N        Overflow tolerance in pixels (default: 0)
    --columns=PATH       Load column definitions from a JSON file
    --compact            Print one JSON object per line
    --help, -h           Show this help message
    --version, -V        Show version

COLUMNS:
    name      grow
    info      grow
    age       fixed 100
    message   20% of the container, at least 100

ENVIRONMENT VARIABLES:
    COLFIT_DEMO_WIDTHS      Override --widths
    COLFIT_DEMO_ON_RESIZE   Set to 1 or true to enable --on-resize
    COLFIT_DEMO_TOLERANCE   Override --tolerance
    COLFIT_LOG              Log filter (default: warn), e.g. colfit_layout=trace";

const DEFAULT_WIDTHS: [Px; 4] = [1000, 1001, 400, 150];

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Container widths to lay out, in order.
    pub widths: Vec<Px>,
    /// Whether container resizes trigger a recalculation.
    pub on_resize: bool,
    /// Allocator overflow tolerance.
    pub tolerance: Px,
    /// Optional JSON file with column definitions.
    pub columns: Option<PathBuf>,
    /// Single-line JSON output.
    pub compact: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            widths: DEFAULT_WIDTHS.to_vec(),
            on_resize: false,
            tolerance: 0,
            columns: None,
            compact: false,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version` or bad input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match parse_from(&args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("colfit-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }
}

/// Parse `args` with `var` as the environment lookup.
///
/// Environment variables take precedence over defaults but are overridden
/// by explicit command-line flags.
pub fn parse_from<F>(args: &[String], var: F) -> Result<Command, String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut opts = Opts::default();

    if let Some(val) = var("COLFIT_DEMO_WIDTHS")
        && let Ok(widths) = parse_widths(&val)
    {
        opts.widths = widths;
    }
    if let Some(val) = var("COLFIT_DEMO_ON_RESIZE") {
        opts.on_resize = matches!(val.trim(), "1" | "true" | "yes");
    }
    if let Some(val) = var("COLFIT_DEMO_TOLERANCE")
        && let Ok(n) = val.trim().parse()
    {
        opts.tolerance = n;
    }

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--on-resize" => opts.on_resize = true,
            "--compact" => opts.compact = true,
            other => {
                if let Some(val) = other.strip_prefix("--widths=") {
                    opts.widths = parse_widths(val)?;
                } else if let Some(val) = other.strip_prefix("--tolerance=") {
                    opts.tolerance = val
                        .parse()
                        .map_err(|_| format!("Invalid --tolerance value: {val}"))?;
                } else if let Some(val) = other.strip_prefix("--columns=") {
                    opts.columns = Some(PathBuf::from(val));
                } else {
                    return Err(format!("Unknown argument: {other}"));
                }
            }
        }
    }

    Ok(Command::Run(opts))
}

fn parse_widths(list: &str) -> Result<Vec<Px>, String> {
    let widths = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(|_| format!("Invalid width: {s}")))
        .collect::<Result<Vec<Px>, String>>()?;
    if widths.is_empty() {
        return Err("--widths needs at least one width".into());
    }
    Ok(widths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn run(list: &[&str]) -> Opts {
        match parse_from(&args(list), no_env).expect("parses") {
            Command::Run(opts) => opts,
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.widths, vec![1000, 1001, 400, 150]);
        assert!(!opts.on_resize);
        assert_eq!(opts.tolerance, 0);
        assert!(!opts.compact);
    }

    #[test]
    fn flags_parse() {
        let opts = run(&["--widths=800, 600", "--on-resize", "--tolerance=4", "--compact"]);
        assert_eq!(opts.widths, vec![800, 600]);
        assert!(opts.on_resize);
        assert_eq!(opts.tolerance, 4);
        assert!(opts.compact);
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse_from(&args(&["-h", "--bogus"]), no_env), Ok(Command::Help));
        assert_eq!(parse_from(&args(&["--version"]), no_env), Ok(Command::Version));
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            parse_from(&args(&["--widths=10,abc"]), no_env),
            Err("Invalid width: abc".to_string())
        );
        assert_eq!(
            parse_from(&args(&["--widths=,"]), no_env),
            Err("--widths needs at least one width".to_string())
        );
        assert_eq!(
            parse_from(&args(&["--frobnicate"]), no_env),
            Err("Unknown argument: --frobnicate".to_string())
        );
    }

    #[test]
    fn env_overrides_defaults_but_not_flags() {
        let env = |key: &str| match key {
            "COLFIT_DEMO_WIDTHS" => Some("300,200".to_string()),
            "COLFIT_DEMO_ON_RESIZE" => Some("true".to_string()),
            "COLFIT_DEMO_TOLERANCE" => Some("7".to_string()),
            _ => None,
        };
        let Ok(Command::Run(opts)) = parse_from(&[], env) else {
            panic!("expected run");
        };
        assert_eq!(opts.widths, vec![300, 200]);
        assert!(opts.on_resize);
        assert_eq!(opts.tolerance, 7);

        let Ok(Command::Run(opts)) = parse_from(&args(&["--widths=90"]), env) else {
            panic!("expected run");
        };
        assert_eq!(opts.widths, vec![90]);
    }

    #[test]
    fn help_text_lists_columns() {
        assert!(HELP_TEXT.contains("message"));
        assert!(HELP_TEXT.contains("COLFIT_DEMO_WIDTHS"));
        assert!(!VERSION.is_empty());
    }
}
