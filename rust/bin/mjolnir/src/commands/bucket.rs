//! Whole-bucket and whole-store listings.

use std::path::Path;

use anyhow::Result;
use mjolnir_kv::{BucketStore, Mjolnir};

use crate::render;

/// Print every record of the selected bucket plus a summary line.
pub fn print<S: BucketStore>(mjolnir: &Mjolnir<S>, db: &Path) -> Result<()> {
    let records = mjolnir.records()?;
    print!("{}", render::record_table(&records));
    println!(
        "{}",
        render::records_summary(db, mjolnir.bucket(), records.len())
    );
    Ok(())
}

/// Print the name of every bucket in the store plus a count.
pub fn list<S: BucketStore>(mjolnir: &Mjolnir<S>) -> Result<()> {
    let names = mjolnir.bucket_names()?;
    print!("{}", render::bucket_table(&names));
    println!("{}", render::buckets_summary(names.len()));
    Ok(())
}
