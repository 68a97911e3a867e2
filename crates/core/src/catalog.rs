//! Layout template catalog.
//!
//! Templates are immutable definitions (id, ordered region names, category,
//! preview icon). Which templates a content type may use is an administrative
//! allow-list on [`ContentType`]; an empty allow-list allows every template.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::content::ContentType;
use crate::error::CoreError;
use crate::naming::is_machine_name;

// ---------------------------------------------------------------------------
// Built-in template ids
// ---------------------------------------------------------------------------

pub const TEMPLATE_ONECOL: &str = "onecol";
pub const TEMPLATE_TWOCOL: &str = "twocol";
pub const TEMPLATE_TWOCOL_BRICKS: &str = "twocol_bricks";
pub const TEMPLATE_THREECOL_25_50_25: &str = "threecol_25_50_25";
pub const TEMPLATE_THREECOL_33_34_33: &str = "threecol_33_34_33";

/// A named arrangement of regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutTemplate {
    pub id: String,
    pub label: String,
    pub category: String,
    /// Region names in render order.
    pub region_names: Vec<String>,
    #[serde(default)]
    pub preview_icon: Option<String>,
}

impl LayoutTemplate {
    pub fn has_region(&self, region: &str) -> bool {
        self.region_names.iter().any(|r| r == region)
    }
}

/// Allowed templates of one category, as offered by the layout switcher.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateCategory {
    pub category: String,
    pub templates: Vec<LayoutTemplate>,
}

/// The set of known layout templates, in definition order.
#[derive(Debug, Clone, Default)]
pub struct LayoutCatalog {
    templates: IndexMap<String, LayoutTemplate>,
}

impl LayoutCatalog {
    pub fn new(templates: impl IntoIterator<Item = LayoutTemplate>) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|t| (t.id.clone(), t))
                .collect(),
        }
    }

    /// The stock one-, two- and three-column templates.
    pub fn builtin() -> Self {
        fn template(id: &str, label: &str, category: &str, regions: &[&str]) -> LayoutTemplate {
            LayoutTemplate {
                id: id.to_string(),
                label: label.to_string(),
                category: category.to_string(),
                region_names: regions.iter().map(|r| r.to_string()).collect(),
                preview_icon: Some(format!("/layouts/icons/{id}.svg")),
            }
        }

        Self::new([
            template(TEMPLATE_ONECOL, "One column", "Columns: 1", &["content"]),
            template(
                TEMPLATE_TWOCOL,
                "Two column",
                "Columns: 2",
                &["top", "first", "second", "bottom"],
            ),
            template(
                TEMPLATE_TWOCOL_BRICKS,
                "Two column bricks",
                "Columns: 2",
                &[
                    "top",
                    "first_above",
                    "second_above",
                    "middle",
                    "first_below",
                    "second_below",
                    "bottom",
                ],
            ),
            template(
                TEMPLATE_THREECOL_25_50_25,
                "Three column 25/50/25",
                "Columns: 3",
                &["top", "first", "second", "third", "bottom"],
            ),
            template(
                TEMPLATE_THREECOL_33_34_33,
                "Three column 33/34/33",
                "Columns: 3",
                &["top", "first", "second", "third", "bottom"],
            ),
        ])
    }

    /// Parse a catalog from a JSON array of templates.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let templates: Vec<LayoutTemplate> = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid layout catalog: {e}")))?;
        if templates.is_empty() {
            return Err(CoreError::Validation(
                "Layout catalog must define at least one template".into(),
            ));
        }
        for template in &templates {
            let bad_region = template.region_names.iter().find(|r| !is_machine_name(r));
            if !is_machine_name(&template.id) || bad_region.is_some() {
                return Err(CoreError::Validation(format!(
                    "Layout template '{}' has an invalid machine name",
                    template.id
                )));
            }
        }
        Ok(Self::new(templates))
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Internal(format!(
                "Failed to read layout catalog {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Look up a template by id.
    pub fn get_template(&self, id: &str) -> Result<&LayoutTemplate, CoreError> {
        self.templates.get(id).ok_or_else(|| CoreError::UnknownKey {
            entity: "LayoutTemplate",
            key: id.to_string(),
        })
    }

    /// Templates the content type may use, in catalog order.
    pub fn list_templates<'a>(&'a self, content_type: &'a ContentType) -> Vec<&'a LayoutTemplate> {
        self.templates
            .values()
            .filter(|t| content_type.allows_template(&t.id))
            .collect()
    }

    /// Look up a template only if the content type may use it.
    pub fn allowed_template(
        &self,
        id: &str,
        content_type: &ContentType,
    ) -> Option<&LayoutTemplate> {
        self.templates
            .get(id)
            .filter(|t| content_type.allows_template(&t.id))
    }

    /// Allowed templates grouped by category; categories appear in the order
    /// their first template is defined.
    pub fn template_options(&self, content_type: &ContentType) -> Vec<TemplateCategory> {
        let mut grouped: IndexMap<&str, Vec<LayoutTemplate>> = IndexMap::new();
        for template in self.list_templates(content_type) {
            grouped
                .entry(template.category.as_str())
                .or_default()
                .push(template.clone());
        }
        grouped
            .into_iter()
            .map(|(category, templates)| TemplateCategory {
                category: category.to_string(),
                templates,
            })
            .collect()
    }
}
