//! Argument validation.
//!
//! Turns parsed flags plus resolved settings into exactly one `Operation`.
//! Checks run in a fixed order and the first failure wins.

use std::path::PathBuf;

use thiserror::Error;

use crate::cli::Cli;
use crate::config::Settings;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "database path not set\nPlease pass the [ -f /path/to/mjolnir.db ] argument or set the MJOLNIR_DB environment variable"
    )]
    MissingDatabase,

    #[error("no operation chosen\nYou must choose an operation: add (-a), delete (-d), read (-r), update (-u), print (-p)")]
    NoOperation,

    #[error("choose exactly one operation, got {}", .0.join(", "))]
    MultipleOperations(Vec<&'static str>),

    #[error("key not set\nPlease pass the [ -key key_name ] argument")]
    MissingKey,

    #[error(
        "value not set\nYou must pass a value when adding or updating a record: [ -value '{{ \"foo\" : \"bar\" }}' ]"
    )]
    MissingValue,

    #[error(
        "bucket name not set\nPlease pass the [ -b bucket_name ] argument or set the MJOLNIR_DB_BUCKET environment variable"
    )]
    MissingBucket,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListBuckets,
    PrintBucket,
    Add { key: String, value: String },
    Read { key: String },
    Update { key: String, value: String },
    Delete { key: String },
}

impl Operation {
    /// Whether the operation writes to the store.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::Add { .. } | Operation::Update { .. } | Operation::Delete { .. }
        )
    }
}

/// A validated request: where, which bucket, and what to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub db: PathBuf,
    /// Empty only for `Operation::ListBuckets`.
    pub bucket: String,
    pub operation: Operation,
}

impl Invocation {
    /// One-line description of a mutation, used by dry runs.
    pub fn describe(&self) -> String {
        let db = self.db.display();
        let bucket = &self.bucket;
        match &self.operation {
            Operation::Add { key, value } => format!(
                "add key \"{key}\" with value \"{value}\" to bucket \"{bucket}\" of database \"{db}\""
            ),
            Operation::Update { key, value } => format!(
                "update key \"{key}\" to value \"{value}\" in bucket \"{bucket}\" of database \"{db}\""
            ),
            Operation::Delete { key } => format!(
                "delete key \"{key}\" from bucket \"{bucket}\" of database \"{db}\""
            ),
            Operation::Read { key } => format!(
                "read key \"{key}\" from bucket \"{bucket}\" of database \"{db}\""
            ),
            Operation::PrintBucket => format!("print bucket \"{bucket}\" of database \"{db}\""),
            Operation::ListBuckets => format!("list buckets of database \"{db}\""),
        }
    }
}

fn present(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

pub fn plan(cli: &Cli, settings: &Settings) -> Result<Invocation, ValidationError> {
    let db = settings.db.clone().ok_or(ValidationError::MissingDatabase)?;

    let chosen: Vec<&'static str> = [
        (cli.print, "print"),
        (cli.add, "add"),
        (cli.delete, "delete"),
        (cli.read, "read"),
        (cli.update, "update"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect();
    match chosen.len() {
        0 => return Err(ValidationError::NoOperation),
        1 => {}
        _ => return Err(ValidationError::MultipleOperations(chosen)),
    }

    let key = present(&cli.key);
    if !cli.print && key.is_none() {
        return Err(ValidationError::MissingKey);
    }

    let value = present(&cli.value);
    if (cli.add || cli.update) && value.is_none() {
        return Err(ValidationError::MissingValue);
    }

    let bucket = settings.bucket.clone().filter(|b| !b.is_empty());
    let Some(bucket) = bucket else {
        if cli.print {
            return Ok(Invocation {
                db,
                bucket: String::new(),
                operation: Operation::ListBuckets,
            });
        }
        return Err(ValidationError::MissingBucket);
    };

    let key = key.unwrap_or_default().to_string();
    let value = value.unwrap_or_default().to_string();
    let operation = if cli.print {
        Operation::PrintBucket
    } else if cli.add {
        Operation::Add { key, value }
    } else if cli.delete {
        Operation::Delete { key }
    } else if cli.read {
        Operation::Read { key }
    } else {
        Operation::Update { key, value }
    };

    Ok(Invocation {
        db,
        bucket,
        operation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::normalize_args;
    use clap::Parser;
    use std::time::Duration;

    fn run(args: &[&str], db: Option<&str>, bucket: Option<&str>) -> Result<Invocation, ValidationError> {
        let mut argv = vec!["mjolnir".to_string()];
        argv.extend(args.iter().map(|s| s.to_string()));
        let cli = Cli::try_parse_from(normalize_args(argv)).unwrap();
        let settings = Settings {
            db: db.map(PathBuf::from),
            bucket: bucket.map(str::to_string),
            timeout: Duration::from_secs(1),
        };
        plan(&cli, &settings)
    }

    #[test]
    fn test_missing_database_checked_first() {
        assert_eq!(run(&[], None, None), Err(ValidationError::MissingDatabase));
        assert_eq!(
            run(&["-a"], None, Some("users")),
            Err(ValidationError::MissingDatabase)
        );
    }

    #[test]
    fn test_no_operation() {
        assert_eq!(
            run(&["-key", "k"], Some("/tmp/t.db"), Some("users")),
            Err(ValidationError::NoOperation)
        );
    }

    #[test]
    fn test_multiple_operations_rejected() {
        let err = run(&["-a", "-d", "-key", "k", "-value", "v"], Some("/tmp/t.db"), Some("b"))
            .unwrap_err();
        assert_eq!(err, ValidationError::MultipleOperations(vec!["add", "delete"]));
        assert_eq!(err.to_string(), "choose exactly one operation, got add, delete");
    }

    #[test]
    fn test_key_required_unless_print() {
        for flag in ["-a", "-d", "-r", "-u"] {
            assert_eq!(
                run(&[flag, "-value", "v"], Some("/tmp/t.db"), Some("b")),
                Err(ValidationError::MissingKey),
                "flag {flag}"
            );
        }
        assert_eq!(
            run(&["-r", "-key", ""], Some("/tmp/t.db"), Some("b")),
            Err(ValidationError::MissingKey)
        );
    }

    #[test]
    fn test_value_required_for_add_and_update() {
        for flag in ["-a", "-u"] {
            assert_eq!(
                run(&[flag, "-key", "k"], Some("/tmp/t.db"), Some("b")),
                Err(ValidationError::MissingValue)
            );
        }
    }

    #[test]
    fn test_missing_bucket() {
        assert_eq!(
            run(&["-r", "-key", "k"], Some("/tmp/t.db"), None),
            Err(ValidationError::MissingBucket)
        );
        assert_eq!(
            run(&["-r", "-key", "k"], Some("/tmp/t.db"), Some("")),
            Err(ValidationError::MissingBucket)
        );
    }

    #[test]
    fn test_print_without_bucket_lists_buckets() {
        let inv = run(&["-p"], Some("/tmp/t.db"), None).unwrap();
        assert_eq!(inv.operation, Operation::ListBuckets);
        assert!(inv.bucket.is_empty());

        // A key does not matter either.
        let inv = run(&["-p", "-key", "k"], Some("/tmp/t.db"), None).unwrap();
        assert_eq!(inv.operation, Operation::ListBuckets);
    }

    #[test]
    fn test_print_with_bucket_ignores_key() {
        let inv = run(&["-p", "-key", "alice"], Some("/tmp/t.db"), Some("users")).unwrap();
        assert_eq!(inv.operation, Operation::PrintBucket);
        assert_eq!(inv.bucket, "users");
    }

    #[test]
    fn test_dispatch() {
        let inv = run(
            &["-a", "-key", "alice", "-value", "{\"age\":30}"],
            Some("/tmp/t.db"),
            Some("users"),
        )
        .unwrap();
        assert_eq!(inv.db, PathBuf::from("/tmp/t.db"));
        assert_eq!(
            inv.operation,
            Operation::Add {
                key: "alice".to_string(),
                value: "{\"age\":30}".to_string()
            }
        );
        assert!(inv.operation.is_mutation());

        let inv = run(&["-r", "-key", "alice"], Some("/tmp/t.db"), Some("users")).unwrap();
        assert_eq!(inv.operation, Operation::Read { key: "alice".to_string() });
        assert!(!inv.operation.is_mutation());

        let inv = run(&["-d", "-key", "alice"], Some("/tmp/t.db"), Some("users")).unwrap();
        assert_eq!(inv.operation, Operation::Delete { key: "alice".to_string() });

        let inv = run(&["-u", "-key", "alice", "-value", "x"], Some("/tmp/t.db"), Some("users"))
            .unwrap();
        assert_eq!(
            inv.operation,
            Operation::Update {
                key: "alice".to_string(),
                value: "x".to_string()
            }
        );
    }

    #[test]
    fn test_describe() {
        let inv = run(&["-d", "-key", "alice"], Some("/tmp/t.db"), Some("users")).unwrap();
        assert_eq!(
            inv.describe(),
            "delete key \"alice\" from bucket \"users\" of database \"/tmp/t.db\""
        );
    }
}
