//! Config store open with one-shot recovery.
//!
//! A store that reports no free pages or a format version mismatch is erased
//! and reopened exactly once. Any other open failure is returned unchanged;
//! erasing would destroy data without fixing it.

use platform::{ConfigStore, ConfigStoreHandle, StoreCorruption};

use super::error::{BringupError, RecoveryFailure};
use super::trace;

/// A successfully opened store.
#[derive(Debug, PartialEq, Eq)]
pub enum StoreOpened {
    /// Opened on the first attempt; existing contents kept.
    Existing(ConfigStoreHandle),
    /// Opened after erasing; all previous contents were discarded.
    Reinitialized {
        /// Handle to the fresh store.
        handle: ConfigStoreHandle,
        /// Condition that triggered the erase.
        condition: StoreCorruption,
    },
}

impl StoreOpened {
    /// The condition that forced re-initialization, if any.
    pub const fn reinitialized(&self) -> Option<StoreCorruption> {
        match self {
            Self::Existing(_) => None,
            Self::Reinitialized { condition, .. } => Some(*condition),
        }
    }

    /// The open store.
    pub fn into_handle(self) -> ConfigStoreHandle {
        match self {
            Self::Existing(handle) | Self::Reinitialized { handle, .. } => handle,
        }
    }
}

/// Open `store`, erasing and reopening once on a recoverable condition.
pub fn open_with_recovery<S>(store: &mut S) -> Result<StoreOpened, BringupError>
where
    S: ConfigStore + ?Sized,
{
    let condition = match store.open() {
        Ok(handle) => return Ok(StoreOpened::Existing(handle)),
        Err(e) => e.classify().map_err(BringupError::ConfigStore)?,
    };

    trace::store_recovering(condition);

    store
        .erase()
        .map_err(|e| BringupError::RecoverableStoreCorruption {
            condition,
            failure: RecoveryFailure::Erase(e),
        })?;

    let handle = store
        .open()
        .map_err(|e| BringupError::RecoverableStoreCorruption {
            condition,
            failure: RecoveryFailure::Reopen(e),
        })?;

    trace::store_reinitialized(condition);
    Ok(StoreOpened::Reinitialized { handle, condition })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use platform::mocks::{Call, FaultPoint, SimBoard};
    use platform::{DriverError, StoreOpenError};

    use super::*;

    #[test]
    fn healthy_store_is_not_erased() {
        let mut board = SimBoard::new();
        let opened = open_with_recovery(&mut board).unwrap();
        assert_eq!(opened.reinitialized(), None);
        assert_eq!(board.erase_count(), 0);
    }

    #[test]
    fn version_mismatch_erases_once_and_reopens() {
        let mut board =
            SimBoard::new().with_store_open_results([Err(StoreOpenError::VersionMismatch)]);
        let opened = open_with_recovery(&mut board).unwrap();
        assert_eq!(
            opened.reinitialized(),
            Some(StoreCorruption::VersionMismatch)
        );
        assert_eq!(
            board.calls(),
            &[Call::StoreOpen, Call::StoreErase, Call::StoreOpen]
        );
    }

    #[test]
    fn second_recoverable_failure_is_not_retried() {
        let mut board = SimBoard::new().with_store_open_results([
            Err(StoreOpenError::NoFreePages),
            Err(StoreOpenError::NoFreePages),
        ]);
        let err = open_with_recovery(&mut board).unwrap_err();
        assert_eq!(
            err,
            BringupError::RecoverableStoreCorruption {
                condition: StoreCorruption::NoFreePages,
                failure: RecoveryFailure::Reopen(StoreOpenError::NoFreePages),
            }
        );
        assert_eq!(board.erase_count(), 1);
        assert_eq!(board.count(|c| *c == Call::StoreOpen), 2);
    }

    #[test]
    fn erase_failure_skips_reopen() {
        let mut board = SimBoard::new()
            .with_store_open_results([Err(StoreOpenError::NoFreePages)])
            .with_fault(FaultPoint::StoreErase, DriverError::Io);
        let err = open_with_recovery(&mut board).unwrap_err();
        assert_eq!(
            err,
            BringupError::RecoverableStoreCorruption {
                condition: StoreCorruption::NoFreePages,
                failure: RecoveryFailure::Erase(DriverError::Io),
            }
        );
        assert_eq!(board.count(|c| *c == Call::StoreOpen), 1);
    }

    #[test]
    fn other_failures_never_erase() {
        let mut board = SimBoard::new()
            .with_store_open_results([Err(StoreOpenError::Other(DriverError::NotFound))]);
        let err = open_with_recovery(&mut board).unwrap_err();
        assert_eq!(err, BringupError::ConfigStore(DriverError::NotFound));
        assert_eq!(board.erase_count(), 0);
    }
}
