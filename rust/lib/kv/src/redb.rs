use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use redb::{Database, DatabaseError, ReadableTable, TableDefinition, TableError, TableHandle};
use tracing::debug;

use crate::error::KVError;
use crate::traits::{BucketStore, Entry};

/// How long `RedbStore::open` waits for another process to release the file lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Every bucket is a redb table of raw bytes keyed by raw bytes.
fn bucket_table(name: &str) -> TableDefinition<'_, &'static [u8], &'static [u8]> {
    TableDefinition::new(name)
}

/// RedbStore is a BucketStore backed by redb — a pure-Rust embedded
/// key-value database. Buckets map one-to-one onto redb tables.
///
/// The database file is held under an exclusive lock for the lifetime of
/// the handle; dropping the store releases it.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    ///
    /// If another process holds the file lock, the open is retried until
    /// `timeout` has elapsed and then fails with `KVError::LockTimeout`.
    pub fn open(path: &Path, timeout: Duration) -> Result<Self, KVError> {
        let started = Instant::now();
        loop {
            match Database::create(path) {
                Ok(db) => {
                    debug!("opened database {}", path.display());
                    return Ok(Self { db });
                }
                Err(DatabaseError::DatabaseAlreadyOpen) => {
                    let waited = started.elapsed();
                    if waited >= timeout {
                        return Err(KVError::LockTimeout {
                            path: path.to_path_buf(),
                            waited,
                        });
                    }
                    debug!("database {} is locked, retrying", path.display());
                    thread::sleep(LOCK_POLL_INTERVAL);
                }
                Err(e) => return Err(KVError::storage(e)),
            }
        }
    }
}

impl BucketStore for RedbStore {
    fn get(&self, bucket: &str, key: &[u8]) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(KVError::storage)?;
        let table = match read_txn.open_table(bucket_table(bucket)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(KVError::storage(e)),
        };

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(KVError::storage(e)),
        }
    }

    fn put(&self, bucket: &str, key: &[u8], value: &[u8]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(KVError::storage)?;
        {
            let mut table = write_txn
                .open_table(bucket_table(bucket))
                .map_err(KVError::storage)?;
            table.insert(key, value).map_err(KVError::storage)?;
        }
        write_txn.commit().map_err(KVError::storage)?;
        Ok(())
    }

    fn delete(&self, bucket: &str, key: &[u8]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(KVError::storage)?;
        {
            let mut table = write_txn
                .open_table(bucket_table(bucket))
                .map_err(KVError::storage)?;
            table.remove(key).map_err(KVError::storage)?;
        }
        write_txn.commit().map_err(KVError::storage)?;
        Ok(())
    }

    fn replace(&self, bucket: &str, key: &[u8], value: &[u8]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(KVError::storage)?;
        {
            let mut table = write_txn
                .open_table(bucket_table(bucket))
                .map_err(KVError::storage)?;
            table.remove(key).map_err(KVError::storage)?;
            table.insert(key, value).map_err(KVError::storage)?;
        }
        write_txn.commit().map_err(KVError::storage)?;
        Ok(())
    }

    fn entries(&self, bucket: &str) -> Result<Vec<Entry>, KVError> {
        let write_txn = self.db.begin_write().map_err(KVError::storage)?;
        let mut results = Vec::new();
        {
            let table = write_txn
                .open_table(bucket_table(bucket))
                .map_err(KVError::storage)?;
            for entry in table.iter().map_err(KVError::storage)? {
                let (key, value) = entry.map_err(KVError::storage)?;
                results.push((key.value().to_vec(), value.value().to_vec()));
            }
        }
        write_txn.commit().map_err(KVError::storage)?;
        Ok(results)
    }

    fn buckets(&self) -> Result<Vec<String>, KVError> {
        let read_txn = self.db.begin_read().map_err(KVError::storage)?;
        let mut names: Vec<String> = read_txn
            .list_tables()
            .map_err(KVError::storage)?
            .map(|handle| handle.name().to_string())
            .collect();
        names.sort();
        Ok(names)
    }
}
