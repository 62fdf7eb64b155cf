//! The minification engine boundary.
//!
//! The engine is a capability, not a library call: anything that can build
//! one staged entry file and report structured success or failure can sit
//! behind [`Engine`], including mocks in tests. The adapter ([`invoke`])
//! owns the mapping from an engine report to a [`BuildOutcome`] and
//! converts invocation faults into a summary message, never propagating
//! them raw.

use std::fmt;

use camino::Utf8Path;
use tracing::{debug, warn};

use crate::request::{BuildRequest, SourcemapMode};
use crate::scratch::ScratchUnit;

/// Errors raised by an engine invocation itself, as opposed to a build the
/// engine ran and reported as failed.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The entry file could not be read from scratch storage.
    #[error("failed to read entry file: {0}")]
    Read(#[from] std::io::Error),

    /// The engine hit an internal fault.
    #[error("engine fault: {0}")]
    Internal(String),
}

/// Minification switches. The pipeline enables all of them unconditionally;
/// they are not user-configurable.
#[derive(Debug, Clone, Copy)]
pub struct MinifyFlags {
    pub identifiers: bool,
    pub syntax: bool,
    pub whitespace: bool,
}

impl Default for MinifyFlags {
    fn default() -> Self {
        Self {
            identifiers: true,
            syntax: true,
            whitespace: true,
        }
    }
}

/// Options for one engine build.
///
/// Imports are always treated as external: the engine must not resolve
/// modules beyond the single entry file, on disk or over the network.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub minify: MinifyFlags,
    pub sourcemap: SourcemapMode,
    pub splitting: bool,
}

impl BuildOptions {
    /// Full minification; sourcemap mode and splitting from the request.
    pub fn from_request(request: &BuildRequest) -> Self {
        Self {
            minify: MinifyFlags::default(),
            sourcemap: request.sourcemap,
            splitting: request.splitting,
        }
    }
}

/// What kind of output chunk an artifact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// The chunk produced for the entry file itself.
    EntryPoint,
    /// A chunk split out for a dynamic import.
    Chunk,
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkKind::EntryPoint => f.write_str("entry-point"),
            ChunkKind::Chunk => f.write_str("chunk"),
        }
    }
}

/// One structured log entry from a build the engine reported as failed.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub name: String,
    pub message: String,
}

/// One minified output chunk from a successful build.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub kind: ChunkKind,
    pub path: String,
    pub text: String,
    /// Present when the build asked for an external map. Kept with the
    /// artifact; not rendered as a panel of its own.
    pub sourcemap: Option<String>,
}

/// Structured result of one engine build, mirroring the engine contract:
/// success with output chunks, or failure with log entries.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub success: bool,
    pub logs: Vec<Diagnostic>,
    pub outputs: Vec<Artifact>,
}

impl BuildReport {
    pub fn success(outputs: Vec<Artifact>) -> Self {
        Self {
            success: true,
            logs: Vec::new(),
            outputs,
        }
    }

    pub fn failure(logs: Vec<Diagnostic>) -> Self {
        Self {
            success: false,
            logs,
            outputs: Vec::new(),
        }
    }
}

/// An external minification capability.
#[async_trait::async_trait]
pub trait Engine: Send + Sync {
    /// Build the staged entry file and report structured success or
    /// failure. Invocation-level faults come back as [`EngineError`].
    async fn build(
        &self,
        entry: &Utf8Path,
        options: &BuildOptions,
    ) -> Result<BuildReport, EngineError>;
}

/// Tagged result of one pipeline run. Exactly one variant per request;
/// never both artifacts and diagnostics.
#[derive(Debug, Clone)]
pub enum BuildOutcome {
    /// The engine reported success: one artifact per produced chunk.
    Success(Vec<Artifact>),
    /// The engine ran and reported a failed build. Routine and expected
    /// for malformed input, not a system fault.
    Failure(Vec<Diagnostic>),
    /// The invocation itself faulted. Carries a summary message only.
    Fault(String),
}

/// Invoke the engine on a staged unit and fold the result into an outcome.
pub async fn invoke(
    engine: &dyn Engine,
    unit: &ScratchUnit,
    request: &BuildRequest,
) -> BuildOutcome {
    let options = BuildOptions::from_request(request);
    match engine.build(unit.path(), &options).await {
        Ok(report) if report.success => BuildOutcome::Success(report.outputs),
        Ok(report) => {
            debug!(entries = report.logs.len(), "engine reported build failure");
            BuildOutcome::Failure(report.logs)
        }
        Err(err) => {
            // Unlike reported build failures, faults are system health
            // events.
            warn!("engine invocation failed: {err}");
            BuildOutcome::Fault(err.to_string())
        }
    }
}
