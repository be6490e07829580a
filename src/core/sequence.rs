//! Display-ID sequencing for new orders
//!
//! Each order gets a human-readable code derived from a persisted counter.
//! Uniqueness rests entirely on [`CounterService::increment`] being a single
//! atomic backend operation; the sequencer itself holds no state.

use crate::core::service::CounterService;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Counter key backing order display IDs
pub const ORDER_COUNTER: &str = "orderId";

const DISPLAY_PREFIX: &str = "B";
const DISPLAY_WIDTH: usize = 8;

/// Human-readable order code, `B` followed by the counter value padded to 8 digits
///
/// Padding never truncates: `123456789` becomes `B123456789`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayId(String);

impl DisplayId {
    pub fn from_sequence(value: u64) -> Self {
        DisplayId(format!(
            "{}{:0width$}",
            DISPLAY_PREFIX,
            value,
            width = DISPLAY_WIDTH
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out display IDs from a named counter
#[derive(Clone)]
pub struct DisplayIdSequencer {
    counter: Arc<dyn CounterService>,
    name: &'static str,
}

impl DisplayIdSequencer {
    pub fn new(counter: Arc<dyn CounterService>) -> Self {
        Self::with_name(counter, ORDER_COUNTER)
    }

    pub fn with_name(counter: Arc<dyn CounterService>, name: &'static str) -> Self {
        Self { counter, name }
    }

    /// Increment the counter and format the post-increment value
    ///
    /// A value consumed here whose order is never stored leaves a gap in the
    /// sequence. Gaps are accepted, duplicates are not.
    pub async fn next_display_id(&self) -> Result<DisplayId> {
        let value = self.counter.increment(self.name).await?;
        tracing::debug!(counter = self.name, value, "counter incremented");
        Ok(DisplayId::from_sequence(value))
    }
}

impl fmt::Debug for DisplayIdSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayIdSequencer")
            .field("name", &self.name)
            .finish()
    }
}
