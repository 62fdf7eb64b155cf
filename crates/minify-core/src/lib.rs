//! Minification request pipeline.
//!
//! Takes untrusted submitted source text, stages it as an isolated scratch
//! file, invokes a minification engine with a validated configuration, and
//! folds the heterogeneous result into an ordered list of display panels.
//! The scratch file is deleted on every exit path, including aborted
//! requests.

pub mod engine;
pub mod pipeline;
pub mod render;
pub mod request;
pub mod scratch;

pub use engine::{
    Artifact, BuildOptions, BuildOutcome, BuildReport, ChunkKind, Diagnostic, Engine, EngineError,
    MinifyFlags, invoke,
};
pub use pipeline::Pipeline;
pub use render::{Panel, render};
pub use request::{BuildRequest, SourcemapMode};
pub use scratch::{ScratchStore, ScratchUnit, StorageError};
