//! Single-record commands.

use anyhow::Result;
use mjolnir_kv::{BucketStore, Mjolnir};

use crate::render;

/// Add a record, then show it as stored.
pub fn add<S: BucketStore>(mjolnir: &Mjolnir<S>, key: &str, value: &str) -> Result<()> {
    mjolnir.create(key, value)?;
    print(mjolnir, key)
}

/// Replace a record, then show the new value.
pub fn update<S: BucketStore>(mjolnir: &Mjolnir<S>, key: &str, value: &str) -> Result<()> {
    mjolnir.update(key, value)?;
    print(mjolnir, key)
}

pub fn delete<S: BucketStore>(mjolnir: &Mjolnir<S>, key: &str) -> Result<()> {
    mjolnir.delete(key)?;
    Ok(())
}

/// Read one record and print it as a one-row table.
pub fn print<S: BucketStore>(mjolnir: &Mjolnir<S>, key: &str) -> Result<()> {
    let value = mjolnir.read(key)?;
    print!("{}", render::value_table(key, &value)?);
    Ok(())
}
