//! Outcome rendering.
//!
//! Maps a [`BuildOutcome`] to an ordered list of named, read-only panels.
//! Pure and total: an empty outcome renders zero panels, and nothing here
//! can fail.

use crate::engine::BuildOutcome;

/// Fixed panel id for invocation faults.
const FAULT_PANEL_ID: &str = "error";

/// One read-only display panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub id: String,
    pub label: String,
    pub content: String,
}

impl Panel {
    fn new(id: String, content: String) -> Self {
        Self {
            label: id.clone(),
            id,
            content,
        }
    }
}

/// Render an outcome into panels.
///
/// Ids carry a zero-based index so several artifacts of the same kind (or
/// several diagnostics with the same name) stay distinct.
pub fn render(outcome: &BuildOutcome) -> Vec<Panel> {
    match outcome {
        BuildOutcome::Success(artifacts) => artifacts
            .iter()
            .enumerate()
            .map(|(index, artifact)| {
                Panel::new(format!("{}-{index}", artifact.kind), artifact.text.clone())
            })
            .collect(),
        BuildOutcome::Failure(diagnostics) => diagnostics
            .iter()
            .enumerate()
            .map(|(index, diagnostic)| {
                Panel::new(
                    format!("{}-{index}", diagnostic.name),
                    diagnostic.message.clone(),
                )
            })
            .collect(),
        BuildOutcome::Fault(message) => {
            vec![Panel::new(FAULT_PANEL_ID.to_string(), message.clone())]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Artifact, ChunkKind, Diagnostic};
    use std::collections::HashSet;

    fn artifact(kind: ChunkKind, text: &str) -> Artifact {
        Artifact {
            kind,
            path: "out.js".to_string(),
            text: text.to_string(),
            sourcemap: None,
        }
    }

    #[test]
    fn one_panel_per_artifact_with_distinct_ids() {
        let outcome = BuildOutcome::Success(vec![
            artifact(ChunkKind::EntryPoint, "a"),
            artifact(ChunkKind::Chunk, "b"),
            artifact(ChunkKind::Chunk, "c"),
        ]);

        let panels = render(&outcome);
        assert_eq!(panels.len(), 3);
        let ids: HashSet<_> = panels.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 3, "panel ids must be unique: {ids:?}");
        assert_eq!(panels[0].id, "entry-point-0");
        assert_eq!(panels[1].id, "chunk-1");
        assert_eq!(panels[2].id, "chunk-2");
        assert_eq!(panels[0].content, "a");
    }

    #[test]
    fn one_panel_per_diagnostic() {
        let outcome = BuildOutcome::Failure(vec![
            Diagnostic {
                name: "error".into(),
                message: "unexpected token".into(),
            },
            Diagnostic {
                name: "error".into(),
                message: "unterminated string".into(),
            },
        ]);

        let panels = render(&outcome);
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].id, "error-0");
        assert_eq!(panels[1].id, "error-1");
        assert_eq!(panels[1].content, "unterminated string");
    }

    #[test]
    fn fault_renders_one_fixed_panel() {
        let panels = render(&BuildOutcome::Fault("engine fault: oom".into()));
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].id, "error");
        assert_eq!(panels[0].content, "engine fault: oom");
    }

    #[test]
    fn empty_outcomes_render_zero_panels() {
        assert!(render(&BuildOutcome::Success(Vec::new())).is_empty());
        assert!(render(&BuildOutcome::Failure(Vec::new())).is_empty());
    }

    #[test]
    fn label_mirrors_id() {
        let panels = render(&BuildOutcome::Success(vec![artifact(
            ChunkKind::EntryPoint,
            "x",
        )]));
        assert_eq!(panels[0].label, panels[0].id);
    }
}
