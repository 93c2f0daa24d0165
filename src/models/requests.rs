//! Request DTOs for the render service API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::{Deserialize, Serialize};

/// Longest diagram source accepted, in characters
pub const MAX_SOURCE_LENGTH: usize = 100_000;

/// Longest diagram or output format identifier accepted
pub const MAX_FORMAT_LENGTH: usize = 32;

/// Request body for the render tool (POST /render)
///
/// # Fields
/// - `source_code`: Diagram source text, passed to the renderer verbatim
/// - `diagram_format`: Notation of the source, e.g. `mermaid` or `plantuml`
/// - `output_format`: Image format to produce, e.g. `svg` or `png`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub source_code: String,
    pub diagram_format: String,
    pub output_format: String,
}

impl RenderRequest {
    /// Creates a new request.
    pub fn new(
        source_code: impl Into<String>,
        diagram_format: impl Into<String>,
        output_format: impl Into<String>,
    ) -> Self {
        Self {
            source_code: source_code.into(),
            diagram_format: diagram_format.into(),
            output_format: output_format.into(),
        }
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.source_code.trim().is_empty() {
            return Some("source_code cannot be empty".to_string());
        }
        if self.source_code.chars().count() > MAX_SOURCE_LENGTH {
            return Some(format!(
                "source_code exceeds maximum length of {} characters",
                MAX_SOURCE_LENGTH
            ));
        }
        if let Some(msg) = validate_format("diagram_format", &self.diagram_format) {
            return Some(msg);
        }
        validate_format("output_format", &self.output_format)
    }

    /// Returns a copy with both format identifiers lowercased.
    ///
    /// `Mermaid`/`SVG` and `mermaid`/`svg` must map to the same cache key.
    pub fn normalized(&self) -> Self {
        Self {
            source_code: self.source_code.clone(),
            diagram_format: self.diagram_format.trim().to_ascii_lowercase(),
            output_format: self.output_format.trim().to_ascii_lowercase(),
        }
    }
}

fn validate_format(field: &str, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some(format!("{} cannot be empty", field));
    }
    if value.len() > MAX_FORMAT_LENGTH {
        return Some(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_FORMAT_LENGTH
        ));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Some(format!("{} contains invalid characters", field));
    }
    None
}

/// Request body for POST /cache/prune
///
/// `max_age_ms` defaults to the configured freshness window when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PruneRequest {
    #[serde(default)]
    pub max_age_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_request_deserialize() {
        let json = r#"{"source_code": "A -> B", "diagram_format": "plantuml", "output_format": "svg"}"#;
        let req: RenderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.source_code, "A -> B");
        assert_eq!(req.diagram_format, "plantuml");
        assert_eq!(req.output_format, "svg");
    }

    #[test]
    fn test_validate_valid_request() {
        let req = RenderRequest::new("graph TD; A-->B", "mermaid", "svg");
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_empty_source() {
        let req = RenderRequest::new("  \n", "mermaid", "svg");
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_source_too_long() {
        let req = RenderRequest::new("x".repeat(MAX_SOURCE_LENGTH + 1), "mermaid", "svg");
        assert!(req.validate().unwrap().contains("maximum length"));

        let req = RenderRequest::new("x".repeat(MAX_SOURCE_LENGTH), "mermaid", "svg");
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_formats() {
        assert!(RenderRequest::new("A", "", "svg").validate().is_some());
        assert!(RenderRequest::new("A", "mermaid", "").validate().is_some());
        assert!(RenderRequest::new("A", "../etc", "svg").validate().is_some());
        assert!(RenderRequest::new("A", "c4plantuml", "svg").validate().is_none());
        assert!(RenderRequest::new("A", "blockdiag", "png").validate().is_none());
    }

    #[test]
    fn test_normalized_lowercases_formats_only() {
        let req = RenderRequest::new("Graph TD", " Mermaid ", "SVG").normalized();
        assert_eq!(req.source_code, "Graph TD");
        assert_eq!(req.diagram_format, "mermaid");
        assert_eq!(req.output_format, "svg");
    }

    #[test]
    fn test_prune_request_defaults() {
        let req: PruneRequest = serde_json::from_str("{}").unwrap();
        assert!(req.max_age_ms.is_none());

        let req: PruneRequest = serde_json::from_str(r#"{"max_age_ms": 1000}"#).unwrap();
        assert_eq!(req.max_age_ms, Some(1000));
    }
}
