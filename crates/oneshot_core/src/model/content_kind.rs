//! Content-kind labels assigned by the classifier.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Heuristic category of one atomic document.
///
/// Variant order is classification priority; `Concept` is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Code fences or shell transcripts.
    Reference,
    /// HTTP method plus path.
    Endpoint,
    /// Function-like signature with a body.
    Function,
    /// CLI syntax or flag listings.
    Command,
    /// Prose; default when nothing else matches.
    Concept,
}

impl ContentKind {
    /// All kinds in classification priority order.
    pub const ALL: [ContentKind; 5] = [
        Self::Reference,
        Self::Endpoint,
        Self::Function,
        Self::Command,
        Self::Concept,
    ];

    /// Stable string written to the `type` front-matter field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Endpoint => "endpoint",
            Self::Function => "function",
            Self::Command => "command",
            Self::Concept => "concept",
        }
    }

    /// Derived `llm_use` value: lookup material vs. procedural material.
    pub fn llm_use(self) -> &'static str {
        match self {
            Self::Reference | Self::Endpoint => "reference",
            Self::Function | Self::Command | Self::Concept => "procedural",
        }
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ContentKind;

    #[test]
    fn llm_use_splits_reference_and_procedural() {
        assert_eq!(ContentKind::Reference.llm_use(), "reference");
        assert_eq!(ContentKind::Endpoint.llm_use(), "reference");
        assert_eq!(ContentKind::Function.llm_use(), "procedural");
        assert_eq!(ContentKind::Command.llm_use(), "procedural");
        assert_eq!(ContentKind::Concept.llm_use(), "procedural");
    }

    #[test]
    fn priority_order_ends_with_concept() {
        assert_eq!(ContentKind::ALL.last(), Some(&ContentKind::Concept));
        assert!(ContentKind::Reference < ContentKind::Endpoint);
    }

    #[test]
    fn serde_shape_matches_front_matter_strings() {
        for kind in ContentKind::ALL {
            let json = serde_json::to_string(&kind).expect("serialize kind");
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: ContentKind = serde_json::from_str(&json).expect("deserialize kind");
            assert_eq!(back, kind);
        }
    }
}
