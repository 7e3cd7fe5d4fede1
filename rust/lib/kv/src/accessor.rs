use serde_json::Value;
use tracing::{debug, info};

use crate::error::KVError;
use crate::record::{self, RawValue};
use crate::traits::{BucketStore, Entry};

/// Mjolnir is the record accessor: a store handle plus the bucket every
/// record operation targets.
///
/// Each operation runs as one transaction against the store. Values are
/// accepted as text, classified with [`RawValue::classify`], and decoded
/// back into JSON on read.
pub struct Mjolnir<S: BucketStore> {
    store: S,
    bucket: String,
}

impl<S: BucketStore> Mjolnir<S> {
    pub fn new(store: S, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Write a record, creating the bucket if needed.
    pub fn create(&self, key: &str, value: &str) -> Result<(), KVError> {
        let raw = RawValue::classify(value);
        debug!("create {:?} in bucket {:?} as {:?}", key, self.bucket, raw);
        self.store
            .put(&self.bucket, key.as_bytes(), &raw.encode()?)?;
        info!(
            "creating key \"{}\" with value \"{}\" succeeded",
            key,
            raw.as_str()
        );
        Ok(())
    }

    /// Read a record and decode it as JSON.
    pub fn read(&self, key: &str) -> Result<Value, KVError> {
        let bytes = self
            .store
            .get(&self.bucket, key.as_bytes())?
            .ok_or_else(|| KVError::NotFound {
                key: key.to_string(),
                bucket: self.bucket.clone(),
            })?;
        let value = record::decode(&bytes)?;
        info!("key \"{}\" found", key);
        Ok(value)
    }

    /// Replace a record. The delete and the write share one transaction.
    pub fn update(&self, key: &str, value: &str) -> Result<(), KVError> {
        let raw = RawValue::classify(value);
        self.store
            .replace(&self.bucket, key.as_bytes(), &raw.encode()?)?;
        info!("key \"{}\" updated", key);
        Ok(())
    }

    /// Remove a record. Removing a missing key succeeds.
    pub fn delete(&self, key: &str) -> Result<(), KVError> {
        self.store.delete(&self.bucket, key.as_bytes())?;
        info!("key \"{}\" deleted", key);
        Ok(())
    }

    /// Every record in the bucket in key order, values as stored.
    pub fn records(&self) -> Result<Vec<Entry>, KVError> {
        let entries = self.store.entries(&self.bucket)?;
        debug!("bucket {:?} holds {} records", self.bucket, entries.len());
        Ok(entries)
    }

    /// Names of all buckets in the store.
    pub fn bucket_names(&self) -> Result<Vec<String>, KVError> {
        self.store.buckets()
    }
}
