//! Add-content inventory: everything an editor may drop into a region.

use indexmap::IndexMap;
use serde::Serialize;

use crate::assignment::RegionAssignment;
use crate::element::ElementRef;
use crate::engine::LayoutEngine;
use crate::error::CoreError;
use crate::plugin::BROKEN_BLOCK_ID;
use crate::render::render_field;
use crate::store::load_record;
use crate::types::DbId;

/// Fields that are never offered for placement.
pub const DISALLOWED_FIELDS: &[&str] = &["promote"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceableElement {
    pub element: ElementRef,
    pub label: String,
    /// Already placed in the active template's assignment.
    pub placed: bool,
}

/// Placeable elements grouped the way the editor's add-content dialog lists
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaceableInventory {
    pub content_item_id: DbId,
    pub template_id: String,
    pub region: Option<String>,
    pub fields: Vec<PlaceableElement>,
    pub content_blocks: Vec<PlaceableElement>,
    /// Plugin blocks keyed by provider, in registration order.
    pub plugin_blocks: IndexMap<String, Vec<PlaceableElement>>,
}

impl PlaceableInventory {
    pub fn len(&self) -> usize {
        self.fields.len()
            + self.content_blocks.len()
            + self.plugin_blocks.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries that are not placed yet.
    pub fn unplaced(&self) -> impl Iterator<Item = &PlaceableElement> {
        self.fields
            .iter()
            .chain(self.content_blocks.iter())
            .chain(self.plugin_blocks.values().flatten())
            .filter(|e| !e.placed)
    }
}

impl LayoutEngine {
    /// List what may be placed into `region` of the item's active template.
    ///
    /// A `region` the active template does not define is an unknown key.
    ///
    /// `providers` limits which plugin-block providers are offered.
    pub async fn placeable_elements(
        &self,
        content_item_id: DbId,
        region: Option<&str>,
        providers: &[String],
    ) -> Result<PlaceableInventory, CoreError> {
        let (item, content_type) = self.load_with_type(content_item_id).await?;
        let record = load_record(self.store.as_ref(), item.id, item.revision_id).await?;
        let template_id = record
            .as_ref()
            .filter(|r| !r.is_empty())
            .map(|r| r.active_template_id.clone())
            .unwrap_or_else(|| content_type.default_template_id.clone());
        if let Some(region) = region {
            if !self.catalog.get_template(&template_id)?.has_region(region) {
                return Err(CoreError::UnknownKey {
                    entity: "LayoutRegion",
                    key: region.to_string(),
                });
            }
        }
        let empty = RegionAssignment::new();
        let assignment = record
            .as_ref()
            .and_then(|r| r.assignment(&template_id))
            .unwrap_or(&empty);

        let fields = content_type
            .display
            .iter()
            .filter(|c| !DISALLOWED_FIELDS.contains(&c.field.as_str()))
            .filter(|c| render_field(&item, &content_type, &c.field).is_some())
            .map(|c| PlaceableElement {
                element: ElementRef::field(c.field.clone()),
                label: c.label.clone(),
                placed: assignment.contains(&c.field),
            })
            .collect();

        let content_blocks = self
            .content
            .list_block_content()
            .await?
            .into_iter()
            .map(|block| {
                let id = block.uuid.to_string();
                PlaceableElement {
                    placed: assignment.contains(&id),
                    element: ElementRef::block_content(id),
                    label: block.label,
                }
            })
            .collect();

        let mut plugin_blocks: IndexMap<String, Vec<PlaceableElement>> = IndexMap::new();
        for definition in self.elements.plugins().definitions() {
            if definition.id == BROKEN_BLOCK_ID || !providers.contains(&definition.provider) {
                continue;
            }
            plugin_blocks
                .entry(definition.provider.clone())
                .or_default()
                .push(PlaceableElement {
                    element: ElementRef::plugin_block(definition.id.clone()),
                    label: definition.admin_label.clone(),
                    placed: assignment.contains(&definition.id),
                });
        }

        Ok(PlaceableInventory {
            content_item_id: item.id,
            template_id,
            region: region.map(str::to_string),
            fields,
            content_blocks,
            plugin_blocks,
        })
    }
}
