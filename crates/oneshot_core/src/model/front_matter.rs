//! Front-matter record and its fenced key-value rendering.
//!
//! # Responsibility
//! - Hold retrieval metadata for one atomic document.
//! - Render metadata blocks in the exact line format the packaging
//!   validator detects.
//!
//! # Invariants
//! - Blocks open with a `---` line and close with a `---` line followed by a
//!   blank line.
//! - `title` and `type` are always emitted; optional scalars are omitted when
//!   absent; list and nested fields always emit their header line.
//! - Field order is fixed: title, type, product, vendor, language, domain,
//!   llm_use, prerequisites, inputs, outputs, state_effect, tags, source.

use crate::model::content_kind::ContentKind;
use serde::{Deserialize, Serialize};

/// Delimiter line opening and closing a front-matter block.
pub const FRONT_MATTER_DELIMITER: &str = "---";
/// Default value for `inputs`, `outputs` and `state_effect`.
pub const NONE_VALUE: &str = "none";
/// Source document type recorded for every generated unit.
pub const SOURCE_TYPE_PDF: &str = "PDF";

/// One value in a rendered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockValue {
    Scalar(String),
    List(Vec<String>),
    Nested(Vec<(String, String)>),
}

/// Ordered key/value block rendered between `---` delimiters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatterBlock {
    entries: Vec<(String, BlockValue)>,
}

impl FrontMatterBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scalar(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries
            .push((key.to_string(), BlockValue::Scalar(value.into())));
        self
    }

    /// Adds a scalar only when `value` is present.
    pub fn optional(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.scalar(key, value),
            None => self,
        }
    }

    pub fn list(mut self, key: &str, items: &[String]) -> Self {
        self.entries
            .push((key.to_string(), BlockValue::List(items.to_vec())));
        self
    }

    pub fn nested(mut self, key: &str, fields: &[(&str, &str)]) -> Self {
        let fields = fields
            .iter()
            .map(|(sub_key, value)| (sub_key.to_string(), value.to_string()))
            .collect();
        self.entries.push((key.to_string(), BlockValue::Nested(fields)));
        self
    }

    pub fn entries(&self) -> &[(String, BlockValue)] {
        &self.entries
    }

    /// Renders the block including both delimiters and the trailing blank line.
    pub fn render(&self) -> String {
        let mut lines = vec![FRONT_MATTER_DELIMITER.to_string()];
        for (key, value) in &self.entries {
            match value {
                BlockValue::Scalar(value) => lines.push(format!("{key}: {value}")),
                BlockValue::List(items) => {
                    lines.push(format!("{key}:"));
                    lines.extend(items.iter().map(|item| format!("  - {item}")));
                }
                BlockValue::Nested(fields) => {
                    lines.push(format!("{key}:"));
                    lines.extend(
                        fields
                            .iter()
                            .map(|(sub_key, value)| format!("  {sub_key}: {value}")),
                    );
                }
            }
        }
        lines.push(FRONT_MATTER_DELIMITER.to_string());
        let mut rendered = lines.join("\n");
        rendered.push_str("\n\n");
        rendered
    }
}

/// Provenance of one atomic document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub section: String,
}

impl SourceRef {
    pub fn pdf(title: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            kind: SOURCE_TYPE_PDF.to_string(),
            title: title.into(),
            section: section.into(),
        }
    }
}

/// Retrieval metadata for one atomic document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub prerequisites: Vec<String>,
    pub inputs: String,
    pub outputs: String,
    pub state_effect: String,
    pub tags: Vec<String>,
    pub source: SourceRef,
}

impl FrontMatter {
    /// Creates a record with every optional field absent and defaults applied.
    pub fn new(title: impl Into<String>, kind: ContentKind, source: SourceRef) -> Self {
        Self {
            title: title.into(),
            kind,
            product: None,
            vendor: None,
            language: None,
            domain: None,
            prerequisites: Vec::new(),
            inputs: NONE_VALUE.to_string(),
            outputs: NONE_VALUE.to_string(),
            state_effect: NONE_VALUE.to_string(),
            tags: Vec::new(),
            source,
        }
    }

    /// Derived from `kind`; never stored separately.
    pub fn llm_use(&self) -> &'static str {
        self.kind.llm_use()
    }

    /// Builds the ordered block for rendering.
    pub fn to_block(&self) -> FrontMatterBlock {
        FrontMatterBlock::new()
            .scalar("title", self.title.as_str())
            .scalar("type", self.kind.as_str())
            .optional("product", self.product.as_deref())
            .optional("vendor", self.vendor.as_deref())
            .optional("language", self.language.as_deref())
            .optional("domain", self.domain.as_deref())
            .scalar("llm_use", self.llm_use())
            .list("prerequisites", &self.prerequisites)
            .scalar("inputs", self.inputs.as_str())
            .scalar("outputs", self.outputs.as_str())
            .scalar("state_effect", self.state_effect.as_str())
            .list("tags", &self.tags)
            .nested(
                "source",
                &[
                    ("type", self.source.kind.as_str()),
                    ("title", self.source.title.as_str()),
                    ("section", self.source.section.as_str()),
                ],
            )
    }

    pub fn render(&self) -> String {
        self.to_block().render()
    }
}

#[cfg(test)]
mod tests {
    use super::{FrontMatter, FrontMatterBlock, SourceRef};
    use crate::model::content_kind::ContentKind;

    #[test]
    fn renders_minimal_record_with_empty_lists() {
        let fm = FrontMatter::new(
            "Intro",
            ContentKind::Concept,
            SourceRef::pdf("manual.pdf", "chunk-1"),
        );
        let expected = concat!(
            "---\n",
            "title: Intro\n",
            "type: concept\n",
            "llm_use: procedural\n",
            "prerequisites:\n",
            "inputs: none\n",
            "outputs: none\n",
            "state_effect: none\n",
            "tags:\n",
            "source:\n",
            "  type: PDF\n",
            "  title: manual.pdf\n",
            "  section: chunk-1\n",
            "---\n\n",
        );
        assert_eq!(fm.render(), expected);
    }

    #[test]
    fn renders_optional_fields_in_fixed_order() {
        let mut fm = FrontMatter::new(
            "List users",
            ContentKind::Endpoint,
            SourceRef::pdf("api.pdf", "chunk-3"),
        );
        fm.domain = Some("identity".to_string());
        fm.product = Some("api".to_string());
        fm.tags = vec!["users".to_string(), "http".to_string()];

        let rendered = fm.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "title: List users");
        assert_eq!(lines[2], "type: endpoint");
        assert_eq!(lines[3], "product: api");
        assert_eq!(lines[4], "domain: identity");
        assert_eq!(lines[5], "llm_use: reference");
        assert!(rendered.contains("tags:\n  - users\n  - http\nsource:\n"));
        assert!(!rendered.contains("vendor:"));
        assert!(!rendered.contains("language:"));
    }

    #[test]
    fn generic_block_supports_index_shape() {
        let rendered = FrontMatterBlock::new()
            .scalar("title", "demo index")
            .scalar("type", "index")
            .scalar("product", "demo")
            .render();
        assert_eq!(
            rendered,
            "---\ntitle: demo index\ntype: index\nproduct: demo\n---\n\n"
        );
    }

    #[test]
    fn serde_shape_uses_front_matter_keys() {
        let mut fm = FrontMatter::new(
            "List users",
            ContentKind::Endpoint,
            SourceRef::pdf("api.pdf", "chunk-3"),
        );
        fm.product = Some("api".to_string());

        let value = serde_json::to_value(&fm).expect("serialize front matter");
        assert_eq!(value["type"], "endpoint");
        assert_eq!(value["product"], "api");
        assert!(value.get("vendor").is_none());
        assert_eq!(value["source"]["type"], "PDF");
        assert_eq!(value["source"]["section"], "chunk-3");

        let back: FrontMatter = serde_json::from_value(value).expect("deserialize front matter");
        assert_eq!(back, fm);
    }
}
