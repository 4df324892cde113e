//! The per-block context handed to every keeper entry point.

use std::time::Duration;

use chrono::{DateTime, Utc};
use stzone_primitives::types::UnixSeconds;

use crate::errors::{KeeperError, KeeperResult};

/// Height and time of the block being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCtx {
    /// The block height.
    pub height: u64,
    /// The block time.
    pub time: DateTime<Utc>,
}

impl BlockCtx {
    /// Creates a context for the block at `height` produced at `time`.
    pub const fn new(height: u64, time: DateTime<Utc>) -> Self {
        Self { height, time }
    }

    /// Creates a context from a unix timestamp in seconds.
    ///
    /// Returns `None` if the timestamp is out of range.
    pub fn from_unix(height: u64, seconds: UnixSeconds) -> Option<Self> {
        let seconds = i64::try_from(seconds).ok()?;
        DateTime::<Utc>::from_timestamp(seconds, 0).map(|time| Self { height, time })
    }

    /// Returns the block time in unix seconds, clamped at zero.
    pub fn unix_seconds(&self) -> UnixSeconds {
        u64::try_from(self.time.timestamp()).unwrap_or_default()
    }

    /// Returns the block time plus `duration` in unix nanoseconds, as used for packet timeouts.
    pub fn timeout_after(&self, duration: Duration) -> KeeperResult<u64> {
        let duration =
            chrono::Duration::from_std(duration).map_err(|_| KeeperError::Overflow("timeout"))?;
        let deadline = self
            .time
            .checked_add_signed(duration)
            .ok_or(KeeperError::Overflow("timeout"))?;

        deadline
            .timestamp_nanos_opt()
            .and_then(|nanos| u64::try_from(nanos).ok())
            .ok_or(KeeperError::Overflow("timeout"))
    }
}
