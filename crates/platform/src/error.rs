//! Driver error types shared by every peripheral contract.
//!
//! Peripheral driver libraries report failures as a small closed set of
//! conditions. Bring-up code never inspects driver internals; it only needs a
//! stable, printable reason to attach to the step that failed.

/// Failure reported by a peripheral driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Generic driver failure with no more specific cause.
    Fail,
    /// Driver could not allocate memory or a hardware slot.
    NoMemory,
    /// A configuration parameter was rejected.
    InvalidArgument,
    /// Peripheral is in a state that does not permit the call.
    InvalidState,
    /// Addressed device or medium did not respond.
    NotFound,
    /// Operation is not supported by this peripheral.
    NotSupported,
    /// Operation did not complete in time.
    Timeout,
    /// Device answered with an unexpected response.
    InvalidResponse,
    /// Low-level bus or medium I/O error.
    Io,
}

impl DriverError {
    /// Short human-readable reason, suitable for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "driver failure",
            Self::NoMemory => "out of memory",
            Self::InvalidArgument => "invalid argument",
            Self::InvalidState => "invalid state",
            Self::NotFound => "device not found",
            Self::NotSupported => "not supported",
            Self::Timeout => "timed out",
            Self::InvalidResponse => "invalid response",
            Self::Io => "I/O error",
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure returned by [`ConfigStore::open`](crate::ConfigStore::open).
///
/// The first two variants describe a store that exists but cannot be used as
/// it is. Only those two conditions justify erasing the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreOpenError {
    /// The store partition has no free pages left.
    NoFreePages,
    /// The store was written by an incompatible format version.
    VersionMismatch,
    /// Any other open failure. Never triggers an erase.
    Other(DriverError),
}

impl StoreOpenError {
    /// Split into a condition the erase cycle may fix, or the driver error
    /// that no erase will.
    pub const fn classify(self) -> Result<StoreCorruption, DriverError> {
        match self {
            Self::NoFreePages => Ok(StoreCorruption::NoFreePages),
            Self::VersionMismatch => Ok(StoreCorruption::VersionMismatch),
            Self::Other(e) => Err(e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StoreOpenError {}

impl core::fmt::Display for StoreOpenError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoFreePages => f.write_str(StoreCorruption::NoFreePages.as_str()),
            Self::VersionMismatch => f.write_str(StoreCorruption::VersionMismatch.as_str()),
            Self::Other(e) => write!(f, "store open failed: {e}"),
        }
    }
}

/// A store condition that is repaired by erase-and-reinitialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreCorruption {
    /// No free pages in the store partition.
    NoFreePages,
    /// Store format written by a newer version.
    VersionMismatch,
}

impl StoreCorruption {
    /// Short human-readable description.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoFreePages => "store has no free pages",
            Self::VersionMismatch => "store format version mismatch",
        }
    }
}

impl core::fmt::Display for StoreCorruption {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
