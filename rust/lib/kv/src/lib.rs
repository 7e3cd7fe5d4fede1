pub mod accessor;
pub mod error;
pub mod memory;
pub mod record;
pub mod redb;
pub mod traits;

pub use accessor::Mjolnir;
pub use error::KVError;
pub use memory::MemoryStore;
pub use record::RawValue;
pub use crate::redb::{DEFAULT_LOCK_TIMEOUT, RedbStore};
pub use traits::{BucketStore, Entry};
