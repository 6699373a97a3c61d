use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tracing::debug;

use crate::capture::{CaptureOrchestrator, RecognitionResult};
use crate::error::Result;
use crate::presentation::{Presentation, SelectionOverlay};
use crate::selection::{InputEvent, SelectionController, Transition};

/// One page's worth of selection tooling: a controller feeding an orchestrator.
///
/// Input is handled synchronously on the caller's thread. Each finalized
/// selection claims its sequence token immediately and then captures in a
/// spawned task, so a new drag can start while older captures are still
/// running. Must be used from within a tokio runtime.
pub struct Session {
    controller: SelectionController,
    orchestrator: Arc<CaptureOrchestrator>,
    tasks: JoinSet<Result<RecognitionResult>>,
}

impl Session {
    pub fn new(controller: SelectionController, orchestrator: Arc<CaptureOrchestrator>) -> Self {
        Self {
            controller,
            orchestrator,
            tasks: JoinSet::new(),
        }
    }

    pub fn dispatch(&mut self, event: InputEvent) -> Transition {
        self.reap_finished();
        let transition = self.controller.handle(event);

        if let Transition::Finalized(selection) = transition {
            let token = self.orchestrator.begin(&selection);
            let orchestrator = self.orchestrator.clone();
            self.tasks
                .spawn(async move { orchestrator.run(token, selection).await });
        }

        transition
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn orchestrator(&self) -> &Arc<CaptureOrchestrator> {
        &self.orchestrator
    }

    pub fn overlay(&self) -> SelectionOverlay {
        SelectionOverlay::from_state(&self.controller.state())
    }

    /// Captures spawned and not yet collected.
    ///
    /// Finished captures are collected on the next [`Session::dispatch`] or
    /// by [`Session::settle`].
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every spawned capture, then report what is presented
    pub async fn settle(&mut self) -> Presentation {
        while let Some(joined) = self.tasks.join_next().await {
            log_outcome(joined);
        }
        self.orchestrator.current()
    }

    fn reap_finished(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            log_outcome(joined);
        }
    }
}

fn log_outcome(joined: std::result::Result<Result<RecognitionResult>, JoinError>) {
    match joined {
        Ok(Ok(result)) => debug!(token = result.token, "Capture presented"),
        Ok(Err(e)) => debug!("Capture ended without a result: {}", e),
        Err(e) => debug!("Capture task aborted: {}", e),
    }
}
