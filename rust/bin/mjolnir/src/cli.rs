//! Command-line surface.
//!
//! Flags mirror the classic single-dash style (`-key`, `-value`); those are
//! rewritten to their `--` forms before clap sees them.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Mjolnir CLI tool.
#[derive(Parser, Debug)]
#[command(
    name = "mjolnir",
    about = "Add, read, update, delete and print JSON records in an embedded database",
    disable_version_flag = true
)]
pub struct Cli {
    /// The path to the database file.
    #[arg(short = 'f', value_name = "PATH", env = "MJOLNIR_DB", allow_hyphen_values = true)]
    pub db: Option<PathBuf>,

    /// The name of the bucket.
    #[arg(
        short = 'b',
        value_name = "NAME",
        env = "MJOLNIR_DB_BUCKET",
        allow_hyphen_values = true
    )]
    pub bucket: Option<String>,

    /// The key to add, delete, read or update.
    #[arg(long = "key", allow_hyphen_values = true)]
    pub key: Option<String>,

    /// The value to add or update (JSON, or a plain string).
    #[arg(long = "value", allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Add a key/value to the bucket.
    #[arg(short = 'a')]
    pub add: bool,

    /// Delete the key from the bucket.
    #[arg(short = 'd')]
    pub delete: bool,

    /// Read the key from the bucket.
    #[arg(short = 'r')]
    pub read: bool,

    /// Update the key/value in the bucket.
    #[arg(short = 'u')]
    pub update: bool,

    /// Print the entire bucket, or every bucket name when no bucket is set.
    #[arg(short = 'p')]
    pub print: bool,

    /// Print the operation instead of applying it to the database.
    #[arg(short = 'n')]
    pub noop: bool,

    /// Print verbose info messages.
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Print debug messages.
    #[arg(short = 'D')]
    pub debug: bool,

    /// Print the version number.
    #[arg(short = 'V')]
    pub version: bool,

    /// Seconds to wait for the database file lock.
    #[arg(long = "timeout", value_name = "SECS", env = "MJOLNIR_DB_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Path to client config file (default: ~/.mjolnir/config.toml).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Single-dash long flags accepted for compatibility.
const LEGACY_LONG: [&str; 2] = ["key", "value"];

/// Flags whose next argument is a value and must be left untouched.
const TAKES_VALUE: [&str; 8] = [
    "-f", "-b", "-key", "-value", "--key", "--value", "--timeout", "--config",
];

/// Rewrite `-key`/`-value` (and their `=` forms) to `--key`/`--value`.
///
/// Tokens that are not valid UTF-8 pass through so clap can report them.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut out = Vec::new();
    let mut value_next = false;
    let mut passthrough = false;

    for arg in args {
        let arg: OsString = arg.into();
        if passthrough || value_next {
            value_next = false;
            out.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        value_next = TAKES_VALUE.contains(&text);
        out.push(rewrite_legacy(text).into());
    }
    out
}

fn rewrite_legacy(arg: &str) -> String {
    let Some(rest) = arg.strip_prefix('-') else {
        return arg.to_string();
    };
    if rest.starts_with('-') {
        return arg.to_string();
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    if LEGACY_LONG.contains(&name) {
        format!("-{}", arg)
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_normalize_legacy_flags() {
        let normalized = normalize_args(args(&[
            "mjolnir", "-a", "-key", "alice", "-value={\"age\":30}",
        ]));
        assert_eq!(
            normalized,
            args(&["mjolnir", "-a", "--key", "alice", "--value={\"age\":30}"])
        );
    }

    #[test]
    fn test_normalize_leaves_values_alone() {
        // A value that happens to look like a legacy flag stays as-is.
        let normalized = normalize_args(args(&["mjolnir", "-a", "-key", "k", "-value", "-key"]));
        assert_eq!(
            normalized,
            args(&["mjolnir", "-a", "--key", "k", "--value", "-key"])
        );

        let normalized = normalize_args(args(&["mjolnir", "-b", "-value", "-p"]));
        assert_eq!(normalized, args(&["mjolnir", "-b", "-value", "-p"]));
    }

    #[test]
    fn test_hyphen_values_parse() {
        let cli = Cli::try_parse_from(normalize_args(args(&[
            "mjolnir", "-b", "-p", "-p", "-a", "-key", "-dash", "-value", "-5",
        ])))
        .unwrap();
        assert_eq!(cli.bucket.as_deref(), Some("-p"));
        assert_eq!(cli.key.as_deref(), Some("-dash"));
        assert_eq!(cli.value.as_deref(), Some("-5"));
        assert!(cli.print && cli.add);

        let cli = Cli::try_parse_from(normalize_args(args(&[
            "mjolnir", "-r", "--key=-k", "-value", "-x",
        ])))
        .unwrap();
        assert_eq!(cli.key.as_deref(), Some("-k"));
        assert_eq!(cli.value.as_deref(), Some("-x"));
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_passes_non_utf8_through() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(vec![0x66, 0x6f, 0xff]);
        let mut argv = args(&["mjolnir", "-r", "-key"]);
        argv.push(raw.clone());
        let normalized = normalize_args(argv);
        assert_eq!(normalized[2], OsString::from("--key"));
        assert_eq!(normalized[3], raw);
        assert!(Cli::try_parse_from(normalized).is_err());
    }

    #[test]
    fn test_normalize_after_double_dash() {
        let normalized = normalize_args(args(&["mjolnir", "--", "-key"]));
        assert_eq!(normalized, args(&["mjolnir", "--", "-key"]));
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from(normalize_args(args(&[
            "mjolnir", "-f", "/tmp/t.db", "-b", "users", "-u", "-key", "alice", "-value", "x",
            "-v",
        ])))
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/t.db")));
        assert_eq!(cli.bucket.as_deref(), Some("users"));
        assert_eq!(cli.key.as_deref(), Some("alice"));
        assert_eq!(cli.value.as_deref(), Some("x"));
        assert!(cli.update && cli.verbose);
        assert!(!cli.add && !cli.debug && !cli.noop);
    }
}
