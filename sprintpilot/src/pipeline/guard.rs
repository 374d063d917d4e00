//! Re-trigger protection for outstanding stage runs.

use parking_lot::Mutex;
use std::collections::HashSet;

use crate::core::StageId;
use crate::errors::{Result, SprintPilotError};

/// Tracks which stages have a request outstanding.
#[derive(Debug, Default)]
pub struct InFlight {
    stages: Mutex<HashSet<StageId>>,
}

impl InFlight {
    /// Marks `stage` as running, or fails if it already is.
    pub fn acquire(&self, stage: StageId) -> Result<InFlightGuard<'_>> {
        if !self.stages.lock().insert(stage) {
            return Err(SprintPilotError::StageBusy { stage });
        }
        Ok(InFlightGuard { owner: self, stage })
    }

    /// Returns true if `stage` has a run outstanding.
    #[must_use]
    pub fn is_running(&self, stage: StageId) -> bool {
        self.stages.lock().contains(&stage)
    }
}

/// Releases the stage when dropped, whether the run succeeded or not.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
    stage: StageId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.stages.lock().remove(&self.stage);
    }
}
