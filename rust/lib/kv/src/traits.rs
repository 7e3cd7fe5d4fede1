use crate::error::KVError;

/// One `(key, value)` pair as stored in a bucket.
pub type Entry = (Vec<u8>, Vec<u8>);

/// BucketStore is the seam between the record accessor and the embedded
/// engine. Every method runs in exactly one transaction.
///
/// Buckets are named, independently keyed namespaces. Writes create the
/// bucket if it does not exist yet; reads of a missing bucket see nothing.
pub trait BucketStore {
    /// Get the raw bytes for a key. Returns None if the key or bucket does not exist.
    fn get(&self, bucket: &str, key: &[u8]) -> Result<Option<Vec<u8>>, KVError>;

    /// Insert or overwrite a key.
    fn put(&self, bucket: &str, key: &[u8], value: &[u8]) -> Result<(), KVError>;

    /// Remove a key. Removing a missing key is not an error.
    fn delete(&self, bucket: &str, key: &[u8]) -> Result<(), KVError>;

    /// Remove then insert a key inside a single write transaction.
    fn replace(&self, bucket: &str, key: &[u8], value: &[u8]) -> Result<(), KVError>;

    /// All entries of a bucket in key order. Runs as a write transaction
    /// so the bucket exists afterwards.
    fn entries(&self, bucket: &str) -> Result<Vec<Entry>, KVError>;

    /// Names of every bucket in the store, sorted.
    fn buckets(&self) -> Result<Vec<String>, KVError>;
}
