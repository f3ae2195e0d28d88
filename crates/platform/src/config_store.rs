//! Non-volatile configuration store contract.
//!
//! The store is a key-value partition with a format version tag. Opening it
//! may report that the partition is full or was written by an incompatible
//! version; both are repaired by erasing the partition and opening it again.
//!
//! # Atomicity
//!
//! Implementations must make [`ConfigStore::erase`] all-or-nothing from the
//! caller's point of view: after it returns `Ok`, the next `open` sees an
//! empty, current-version store. After it returns `Err`, the caller treats the
//! store as unusable and does not open it again.

use crate::error::{DriverError, StoreOpenError};
use crate::handle::ConfigStoreHandle;

/// Persistent key-value store driver.
pub trait ConfigStore {
    /// Open (and if needed format-check) the store partition.
    fn open(&mut self) -> Result<ConfigStoreHandle, StoreOpenError>;

    /// Erase the entire store partition. Destructive and irreversible.
    fn erase(&mut self) -> Result<(), DriverError>;
}
