//! Placeable content elements.
//!
//! An element is anything the layout editor can drop into a region: a field
//! of the content item, a reusable content block, or a plugin-provided block.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const KIND_FIELD: &str = "field";
pub const KIND_BLOCK_CONTENT: &str = "block_content";
pub const KIND_PLUGIN_BLOCK: &str = "plugin_block";

/// All valid element kind wire names.
pub const VALID_KINDS: &[&str] = &[KIND_FIELD, KIND_BLOCK_CONTENT, KIND_PLUGIN_BLOCK];

/// The closed set of element kinds. Each kind has exactly one renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A field of the content item, addressed by machine name.
    Field,
    /// A reusable content block, addressed by UUID.
    BlockContent,
    /// A plugin-provided block, addressed by plugin id.
    PluginBlock,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Field => KIND_FIELD,
            Self::BlockContent => KIND_BLOCK_CONTENT,
            Self::PluginBlock => KIND_PLUGIN_BLOCK,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            KIND_FIELD => Ok(Self::Field),
            KIND_BLOCK_CONTENT => Ok(Self::BlockContent),
            KIND_PLUGIN_BLOCK => Ok(Self::PluginBlock),
            other => Err(CoreError::Validation(format!(
                "Invalid element type '{}'. Valid types: {}",
                other,
                VALID_KINDS.join(", ")
            ))),
        }
    }
}

/// Identifies one unit of placeable content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
}

impl ElementRef {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self::new(name, ElementKind::Field)
    }

    pub fn block_content(uuid: impl Into<String>) -> Self {
        Self::new(uuid, ElementKind::BlockContent)
    }

    pub fn plugin_block(plugin_id: impl Into<String>) -> Self {
        Self::new(plugin_id, ElementKind::PluginBlock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("field".parse::<ElementKind>().unwrap(), ElementKind::Field);
        assert_eq!(
            "block_content".parse::<ElementKind>().unwrap(),
            ElementKind::BlockContent
        );
        assert_eq!(
            "plugin_block".parse::<ElementKind>().unwrap(),
            ElementKind::PluginBlock
        );
    }

    #[test]
    fn unknown_kind_rejected() {
        let err = "view".parse::<ElementKind>().unwrap_err();
        assert!(err.to_string().contains("Invalid element type 'view'"));
    }

    #[test]
    fn serializes_with_type_key() {
        let json = serde_json::to_value(ElementRef::block_content("uuid-1")).unwrap();
        assert_eq!(json["id"], "uuid-1");
        assert_eq!(json["type"], "block_content");
    }
}
