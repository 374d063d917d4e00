//! Stage execution against an injected store and transport.

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::guard::InFlight;
use super::status::{BackendHealth, PipelineStatus, Replay};
use crate::core::{SprintPlanView, StageId, StageRun, StoreKey};
use crate::errors::{GateError, Result, SprintPilotError};
use crate::events::{EventSink, NoOpEventSink, PipelineEvent};
use crate::stages::Stage;
use crate::store::StageStore;
use crate::transport::Transport;

/// Runs stages one at a time, enforcing each stage's upstream gate.
///
/// The pipeline never sequences stages on its own; [`Pipeline::run`] runs
/// exactly the stage it is given. [`Pipeline::replay`] exists for drivers
/// that want the whole chain in one go.
pub struct Pipeline {
    store: Arc<dyn StageStore>,
    transport: Arc<dyn Transport>,
    events: Arc<dyn EventSink>,
    in_flight: InFlight,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Creates a pipeline over a store and a transport.
    #[must_use]
    pub fn new(store: Arc<dyn StageStore>, transport: Arc<dyn Transport>) -> Self {
        Self {
            store,
            transport,
            events: Arc::new(NoOpEventSink),
            in_flight: InFlight::default(),
        }
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Returns the stage store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn StageStore> {
        &self.store
    }

    /// Returns true if `stage` has a request outstanding.
    #[must_use]
    pub fn is_running(&self, stage: StageId) -> bool {
        self.in_flight.is_running(stage)
    }

    /// Runs a single stage.
    ///
    /// Fails with a gate error, before any request is issued, when the
    /// stage's upstream output is absent. On success the response is
    /// persisted if the stage has a store key.
    pub async fn run(&self, stage: &dyn Stage) -> Result<StageRun> {
        let id = stage.id();
        let _guard = self.in_flight.acquire(id)?;
        let run_id = Uuid::new_v4();
        let span = info_span!("stage", stage = %id, run_id = %run_id);

        let result = self.execute(stage, run_id).instrument(span.clone()).await;

        let _enter = span.enter();
        let terminal = match &result {
            Ok(run) => {
                info!(
                    duration_ms = run.duration_ms,
                    persisted_as = ?run.persisted_as,
                    "Stage completed"
                );
                PipelineEvent::StageCompleted {
                    stage: id,
                    run_id,
                    duration_ms: run.duration_ms,
                    persisted_as: run.persisted_as,
                }
            }
            Err(SprintPilotError::Gate(gate)) => {
                warn!(missing = %gate.missing, "{}", gate.message);
                PipelineEvent::StageGated {
                    stage: id,
                    run_id,
                    missing: gate.missing,
                }
            }
            Err(err) => {
                warn!(error = %err, "Stage failed");
                PipelineEvent::StageFailed {
                    stage: id,
                    run_id,
                    error: err.to_string(),
                }
            }
        };
        self.events.record(&terminal);
        result
    }

    async fn execute(&self, stage: &dyn Stage, run_id: Uuid) -> Result<StageRun> {
        let descriptor = stage.id().descriptor();
        let started_at = Utc::now();
        let start = Instant::now();
        self.events
            .emit(&PipelineEvent::StageStarted {
                stage: descriptor.id,
                run_id,
            })
            .await;

        let upstream = match descriptor.requires {
            Some(gate) => Some(
                self.store
                    .get(gate.key)?
                    .ok_or_else(|| GateError::new(descriptor.id, gate.key, gate.message))?,
            ),
            None => None,
        };

        let body = stage.build_request(upstream.as_ref())?;
        let response = self.transport.send(descriptor.endpoint, &body).await?;

        if let Some(key) = descriptor.writes {
            self.store.put(key, response.clone())?;
            self.events
                .emit(&PipelineEvent::StoreUpdated {
                    stage: descriptor.id,
                    run_id,
                    key,
                })
                .await;
        }

        Ok(StageRun {
            stage: descriptor.id,
            run_id,
            started_at,
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
            response,
            persisted_as: descriptor.writes,
        })
    }

    /// Runs `stages` in order, stopping at the first error.
    ///
    /// The returned [`Replay`] keeps the runs that completed before the
    /// failure, so a driver can report how far the chain got.
    pub async fn replay(&self, stages: &[Box<dyn Stage>]) -> Replay {
        let mut replay = Replay::default();
        for stage in stages {
            match self.run(stage.as_ref()).await {
                Ok(run) => replay.runs.push(run),
                Err(err) => {
                    replay.failure = Some(err);
                    break;
                }
            }
        }
        replay
    }

    /// Reports which stage outputs are present and what FR04 would see.
    pub fn status(&self) -> Result<PipelineStatus> {
        let present = self.store.keys()?;
        let plan = self
            .store
            .get(StoreKey::Fr03Out)?
            .map(|plan| SprintPlanView::from_value(&plan));
        Ok(PipelineStatus::new(present, plan.as_ref()))
    }

    /// Probes the backend's liveness and predictor readiness endpoints.
    pub async fn probe_backend(&self) -> BackendHealth {
        BackendHealth {
            api: self.transport.get("/health").await.map_err(|e| e.to_string()),
            predictor: self.transport.get("/fr05/status").await.map_err(|e| e.to_string()),
        }
    }
}
