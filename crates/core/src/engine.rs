//! The layout engine handle shared by resolution and save.
//!
//! [`LayoutEngine`] bundles the catalog, the content collaborator, the layout
//! store and the element resolver. It is cheap to clone. The resolution and
//! merge/save operations are implemented in [`crate::resolution`] and
//! [`crate::merge`].

use std::sync::Arc;

use crate::catalog::LayoutCatalog;
use crate::content::{content_type_of, ContentItem, ContentRepository, ContentType};
use crate::error::CoreError;
use crate::plugin::PluginBlockRegistry;
use crate::render::ElementResolver;
use crate::store::{load_record, LayoutStore};
use crate::types::DbId;

#[derive(Clone)]
pub struct LayoutEngine {
    pub(crate) catalog: Arc<LayoutCatalog>,
    pub(crate) content: Arc<dyn ContentRepository>,
    pub(crate) store: Arc<dyn LayoutStore>,
    pub(crate) elements: ElementResolver,
}

impl LayoutEngine {
    pub fn new(
        catalog: Arc<LayoutCatalog>,
        content: Arc<dyn ContentRepository>,
        store: Arc<dyn LayoutStore>,
        plugins: Arc<PluginBlockRegistry>,
    ) -> Self {
        let elements = ElementResolver::new(Arc::clone(&content), plugins);
        Self {
            catalog,
            content,
            store,
            elements,
        }
    }

    pub fn catalog(&self) -> &LayoutCatalog {
        &self.catalog
    }

    pub fn content(&self) -> &dyn ContentRepository {
        self.content.as_ref()
    }

    pub fn store(&self) -> &dyn LayoutStore {
        self.store.as_ref()
    }

    pub fn elements(&self) -> &ElementResolver {
        &self.elements
    }

    /// Load an item at its current revision, or fail with `NotFound`.
    pub async fn load_current(&self, content_item_id: DbId) -> Result<ContentItem, CoreError> {
        self.content
            .find_item(content_item_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "ContentItem",
                id: content_item_id,
            })
    }

    /// Load an item together with its content type.
    pub async fn load_with_type(
        &self,
        content_item_id: DbId,
    ) -> Result<(ContentItem, ContentType), CoreError> {
        let item = self.load_current(content_item_id).await?;
        let content_type = content_type_of(self.content.as_ref(), &item).await?;
        Ok((item, content_type))
    }

    /// The template currently governing `item`: the active template of its
    /// layout record, else the content type default.
    pub async fn active_template_id(
        &self,
        item: &ContentItem,
        content_type: &ContentType,
    ) -> Result<String, CoreError> {
        let record = load_record(self.store.as_ref(), item.id, item.revision_id).await?;
        Ok(record
            .filter(|r| !r.is_empty())
            .map(|r| r.active_template_id)
            .unwrap_or_else(|| content_type.default_template_id.clone()))
    }
}
