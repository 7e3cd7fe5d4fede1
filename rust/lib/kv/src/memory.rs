use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::KVError;
use crate::traits::{BucketStore, Entry};

type Bucket = BTreeMap<Vec<u8>, Vec<u8>>;

/// MemoryStore is an in-process BucketStore over nested BTreeMaps.
///
/// It honours the same bucket semantics as `RedbStore` (writes create the
/// bucket, `entries` creates it too, reads of a missing bucket see nothing)
/// and is used where a database file is unnecessary: unit tests and benches.
#[derive(Default)]
pub struct MemoryStore {
    buckets: RwLock<BTreeMap<String, Bucket>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn write<T>(&self, bucket: &str, f: impl FnOnce(&mut Bucket) -> T) -> Result<T, KVError> {
        let mut buckets = self.buckets.write().map_err(KVError::storage)?;
        let table = buckets.entry(bucket.to_string()).or_default();
        Ok(f(table))
    }
}

impl BucketStore for MemoryStore {
    fn get(&self, bucket: &str, key: &[u8]) -> Result<Option<Vec<u8>>, KVError> {
        let buckets = self.buckets.read().map_err(KVError::storage)?;
        Ok(buckets.get(bucket).and_then(|b| b.get(key)).cloned())
    }

    fn put(&self, bucket: &str, key: &[u8], value: &[u8]) -> Result<(), KVError> {
        self.write(bucket, |b| {
            b.insert(key.to_vec(), value.to_vec());
        })
    }

    fn delete(&self, bucket: &str, key: &[u8]) -> Result<(), KVError> {
        self.write(bucket, |b| {
            b.remove(key);
        })
    }

    fn replace(&self, bucket: &str, key: &[u8], value: &[u8]) -> Result<(), KVError> {
        // A single write guard covers both steps.
        self.write(bucket, |b| {
            b.remove(key);
            b.insert(key.to_vec(), value.to_vec());
        })
    }

    fn entries(&self, bucket: &str) -> Result<Vec<Entry>, KVError> {
        self.write(bucket, |b| {
            b.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        })
    }

    fn buckets(&self) -> Result<Vec<String>, KVError> {
        let buckets = self.buckets.read().map_err(KVError::storage)?;
        Ok(buckets.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bucket_reads_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.get("b", b"k").unwrap(), None);
        assert!(store.buckets().unwrap().is_empty());
    }

    #[test]
    fn test_delete_creates_bucket() {
        let store = MemoryStore::new();
        store.delete("b", b"k").unwrap();
        assert_eq!(store.buckets().unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_entries_in_key_order() {
        let store = MemoryStore::new();
        store.put("b", b"z", b"1").unwrap();
        store.put("b", b"a", b"2").unwrap();
        let entries = store.entries("b").unwrap();
        assert_eq!(entries[0].0, b"a".to_vec());
        assert_eq!(entries[1].0, b"z".to_vec());
    }
}
