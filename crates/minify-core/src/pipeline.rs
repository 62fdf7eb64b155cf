//! Pipeline orchestration.
//!
//! One pipeline run per inbound request: normalize fields, acquire a
//! scratch unit, write the source, invoke the engine, render the outcome,
//! release the unit. Every early exit still reaches release, and no error
//! leaves [`Pipeline::handle`] as anything but a rendered panel.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::engine::{BuildOutcome, Engine, invoke};
use crate::render::{Panel, render};
use crate::request::BuildRequest;
use crate::scratch::{ScratchStore, ScratchUnit};

/// Generic message for storage-level failures. The underlying error goes to
/// the log, not the user.
const STORAGE_FAULT_MESSAGE: &str = "failed to stage input for minification";

/// The request pipeline, shared across all in-flight requests.
#[derive(Clone)]
pub struct Pipeline {
    engine: Arc<dyn Engine>,
    scratch: ScratchStore,
}

impl Pipeline {
    pub fn new(engine: Arc<dyn Engine>, scratch: ScratchStore) -> Self {
        Self { engine, scratch }
    }

    /// Run the full pipeline for one submission.
    ///
    /// Always returns a renderable panel list; the scratch unit is released
    /// on every path, including storage and engine failures.
    pub async fn handle(&self, fields: &HashMap<String, String>) -> Vec<Panel> {
        let request = BuildRequest::from_fields(fields);

        let unit = match self.scratch.acquire() {
            Ok(unit) => unit,
            Err(err) => {
                warn!("scratch allocation failed: {err}");
                return render(&BuildOutcome::Fault(STORAGE_FAULT_MESSAGE.to_string()));
            }
        };

        let outcome = self.stage_and_invoke(&unit, &request).await;
        let panels = render(&outcome);
        self.scratch.release(unit).await;
        panels
    }

    /// Write the submitted source and run the engine. A storage failure
    /// skips the engine entirely.
    async fn stage_and_invoke(&self, unit: &ScratchUnit, request: &BuildRequest) -> BuildOutcome {
        if let Err(err) = self.scratch.write(unit, &request.source_text).await {
            warn!("scratch write failed: {err}");
            return BuildOutcome::Fault(STORAGE_FAULT_MESSAGE.to_string());
        }
        invoke(self.engine.as_ref(), unit, request).await
    }
}
