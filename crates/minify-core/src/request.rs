//! Form field normalization.
//!
//! Submitted form data is untrusted and sparse, so every malformed or
//! missing field maps to a documented default instead of an error. The
//! resulting [`BuildRequest`] is total over all possible form shapes;
//! correctness of the source text itself is the engine's concern.

use std::collections::HashMap;

/// How source maps are emitted for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourcemapMode {
    /// Embed the map in the chunk as a `data:` URL comment.
    #[default]
    Inline,
    /// Keep the map as separate text alongside the chunk.
    External,
    /// No source map.
    None,
}

impl SourcemapMode {
    /// Parse a raw form value. Anything unrecognized falls back to inline.
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("inline") => Self::Inline,
            Some("external") => Self::External,
            Some("none") => Self::None,
            _ => Self::Inline,
        }
    }
}

/// A validated build request, created fresh per submission and immutable
/// after normalization.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Submitted source text; empty if the field was missing.
    pub source_text: String,
    pub sourcemap: SourcemapMode,
    /// Code splitting, on only when the checkbox submitted its `on` marker.
    pub splitting: bool,
}

impl BuildRequest {
    /// Normalize raw form fields into a request. Never fails.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        Self {
            source_text: fields.get("input").cloned().unwrap_or_default(),
            sourcemap: SourcemapMode::parse(fields.get("sourcemap").map(String::as_str)),
            splitting: fields.get("splitting").is_some_and(|v| v == "on"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_form_maps_to_defaults() {
        let request = BuildRequest::from_fields(&HashMap::new());
        assert_eq!(request.source_text, "");
        assert_eq!(request.sourcemap, SourcemapMode::Inline);
        assert!(!request.splitting);
    }

    #[test]
    fn recognized_sourcemap_values_parse() {
        for (raw, expected) in [
            ("inline", SourcemapMode::Inline),
            ("external", SourcemapMode::External),
            ("none", SourcemapMode::None),
        ] {
            let request = BuildRequest::from_fields(&fields(&[("sourcemap", raw)]));
            assert_eq!(request.sourcemap, expected, "sourcemap={raw}");
        }
    }

    #[test]
    fn unrecognized_sourcemap_degrades_to_inline() {
        for raw in ["", "INLINE", "both", "external ", "42"] {
            let request = BuildRequest::from_fields(&fields(&[("sourcemap", raw)]));
            assert_eq!(request.sourcemap, SourcemapMode::Inline, "sourcemap={raw:?}");
        }
    }

    #[test]
    fn splitting_requires_exact_marker() {
        assert!(BuildRequest::from_fields(&fields(&[("splitting", "on")])).splitting);
        for raw in ["", "yes", "true", "ON", "on "] {
            let request = BuildRequest::from_fields(&fields(&[("splitting", raw)]));
            assert!(!request.splitting, "splitting={raw:?}");
        }
    }

    #[test]
    fn source_text_passes_through_verbatim() {
        let request = BuildRequest::from_fields(&fields(&[("input", "const x = 1;\n")]));
        assert_eq!(request.source_text, "const x = 1;\n");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let request = BuildRequest::from_fields(&fields(&[("color", "green"), ("input", "x")]));
        assert_eq!(request.source_text, "x");
        assert_eq!(request.sourcemap, SourcemapMode::Inline);
    }
}
