//! The handshake between a worker that just planned and whoever wants to draw the plan
//!
//! After every successful planning cycle the worker [publishes](PathDataSignal::publish) the
//! visited cells and the path. The signal stays set until a consumer [takes](PathDataSignal::take)
//! the data, so a consumer that shows up late still sees the latest plan, and a consumer that
//! checks twice without a new plan in between gets nothing the second time.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};
use types::GridCoord;

use crate::search::SearchOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// What a planning cycle produced, for highlighting
pub struct PathData {
    /// Cells the search expanded, in order
    pub visited: Vec<GridCoord>,
    /// The planned path
    pub path: Vec<GridCoord>,
}

impl From<SearchOutcome> for PathData {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            visited: outcome.visited,
            path: outcome.path,
        }
    }
}

#[derive(Debug, Default)]
/// A level triggered, single slot signal carrying the latest [PathData]
pub struct PathDataSignal {
    data: Mutex<Option<PathData>>,
    ready: Condvar,
}

impl PathDataSignal {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signal, replacing any data nobody took yet
    pub fn publish(&self, data: PathData) {
        *self.data.lock() = Some(data);
        self.ready.notify_all();
    }

    /// Whether there is data waiting
    pub fn is_set(&self) -> bool {
        self.data.lock().is_some()
    }

    /// A copy of the waiting data, leaving the signal set
    pub fn peek(&self) -> Option<PathData> {
        self.data.lock().clone()
    }

    /// Take the waiting data and clear the signal
    pub fn take(&self) -> Option<PathData> {
        self.data.lock().take()
    }

    /// Block until the signal is set or `timeout` passes, returns whether it is set
    pub fn wait_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut data = self.data.lock();

        while data.is_none() {
            if self.ready.wait_until(&mut data, deadline).timed_out() {
                return data.is_some();
            }
        }

        true
    }
}
