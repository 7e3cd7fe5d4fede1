//! Operation execution: open the store once, run one operation, print.

pub mod bucket;
pub mod record;

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use mjolnir_kv::{Mjolnir, RedbStore};
use tracing::debug;

use crate::plan::{Invocation, Operation};

/// Run a validated invocation. With `dry_run`, mutations are only described.
pub fn execute(invocation: &Invocation, timeout: Duration, dry_run: bool) -> Result<()> {
    if dry_run && invocation.operation.is_mutation() {
        println!("{} would {}", "[ NOOP ]:".cyan(), invocation.describe());
        return Ok(());
    }

    debug!("executing: {}", invocation.describe());
    let store = RedbStore::open(&invocation.db, timeout)
        .map_err(|e| anyhow::anyhow!("failed to open database: {}", e))?;
    let mjolnir = Mjolnir::new(store, invocation.bucket.as_str());

    match &invocation.operation {
        Operation::ListBuckets => bucket::list(&mjolnir),
        Operation::PrintBucket => bucket::print(&mjolnir, &invocation.db),
        Operation::Add { key, value } => record::add(&mjolnir, key, value),
        Operation::Read { key } => record::print(&mjolnir, key),
        Operation::Update { key, value } => record::update(&mjolnir, key, value),
        Operation::Delete { key } => record::delete(&mjolnir, key),
    }
}
