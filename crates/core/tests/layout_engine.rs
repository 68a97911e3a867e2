//! Engine scenarios against the in-memory backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use indexmap::IndexMap;
use uuid::Uuid;

use pagelayout_core::assignment::{LayoutRecord, LayoutSubmission, RawLayout, RegionAssignment};
use pagelayout_core::catalog::LayoutCatalog;
use pagelayout_core::content::{
    BlockContent, ContentItem, ContentType, DisplayComponent, LabelDisplay,
};
use pagelayout_core::context::{LayoutOverrides, RequestContext, Viewer};
use pagelayout_core::element::{ElementKind, ElementRef};
use pagelayout_core::engine::LayoutEngine;
use pagelayout_core::error::CoreError;
use pagelayout_core::memory::MemoryBackend;
use pagelayout_core::merge::SaveOutcome;
use pagelayout_core::page::render_page;
use pagelayout_core::plugin::PluginBlockRegistry;
use pagelayout_core::resolution::PageBuild;
use pagelayout_core::store::{CommitOutcome, LayoutStore, RevisionCommit};
use pagelayout_core::types::DbId;

const BLOCK_UUID: Uuid = Uuid::from_u128(1);

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn component(field: &str, label: &str, label_display: LabelDisplay) -> DisplayComponent {
    DisplayComponent {
        field: field.into(),
        label: label.into(),
        label_display,
    }
}

fn article(allowed: &[&str]) -> ContentType {
    ContentType {
        name: "article".into(),
        label: "Article".into(),
        default_template_id: "onecol".into(),
        layout_editor_enabled: true,
        allowed_templates: allowed.iter().map(|s| s.to_string()).collect(),
        display: vec![
            component("field_body", "Body", LabelDisplay::Hidden),
            component("field_tags", "Tags", LabelDisplay::Above),
            component("promote", "Promoted", LabelDisplay::Inline),
        ],
    }
}

fn article_fields() -> IndexMap<String, String> {
    IndexMap::from([
        ("field_body".to_string(), "Body text".to_string()),
        ("field_tags".to_string(), "rust".to_string()),
        ("promote".to_string(), "1".to_string()),
    ])
}

struct Fixture {
    backend: Arc<MemoryBackend>,
    engine: LayoutEngine,
    item: ContentItem,
}

async fn fixture_with(content_type: ContentType) -> Fixture {
    let backend = Arc::new(MemoryBackend::new());
    backend.add_content_type(content_type).await;
    backend
        .add_block_content(BlockContent {
            uuid: BLOCK_UUID,
            label: "Promo".into(),
            body: "<p>Buy now</p>".into(),
        })
        .await;
    let item = backend
        .create_item("article", "Hello", article_fields())
        .await
        .unwrap();
    let engine = engine_over(&backend, backend.clone());
    Fixture {
        backend,
        engine,
        item,
    }
}

async fn fixture() -> Fixture {
    fixture_with(article(&[])).await
}

fn engine_over(backend: &Arc<MemoryBackend>, store: Arc<dyn LayoutStore>) -> LayoutEngine {
    LayoutEngine::new(
        Arc::new(LayoutCatalog::builtin()),
        backend.clone(),
        store,
        Arc::new(PluginBlockRegistry::builtin()),
    )
}

fn ctx(item_id: DbId) -> RequestContext {
    RequestContext::for_item(item_id, Viewer::anonymous())
}

fn ctx_with(item_id: DbId, overrides: LayoutOverrides) -> RequestContext {
    ctx(item_id).with_overrides(overrides)
}

fn override_template(template_id: &str) -> LayoutOverrides {
    LayoutOverrides {
        template_id: Some(template_id.to_string()),
        ..Default::default()
    }
}

fn submission(template: &str, regions: &[(&str, &[(&str, &str)])]) -> LayoutSubmission {
    let mut raw = RawLayout::new();
    raw.insert(
        template.to_string(),
        regions
            .iter()
            .map(|(region, elements)| {
                (
                    region.to_string(),
                    elements
                        .iter()
                        .map(|(id, kind)| (id.to_string(), kind.to_string()))
                        .collect(),
                )
            })
            .collect(),
    );
    LayoutSubmission::from_raw(&raw).unwrap()
}

fn example_submission() -> LayoutSubmission {
    let uuid = BLOCK_UUID.to_string();
    submission(
        "twocol",
        &[
            ("first", &[(uuid.as_str(), "block_content")]),
            ("second", &[("field_body", "field")]),
        ],
    )
}

async fn resolve(engine: &LayoutEngine, ctx: &RequestContext) -> PageBuild {
    engine.resolve(ctx).await.unwrap().unwrap()
}

fn element_ids(page: &PageBuild, region: &str) -> Vec<String> {
    page.as_layout()
        .unwrap()
        .region(region)
        .unwrap()
        .elements
        .iter()
        .map(|e| e.element.id.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_record_no_override_renders_default_display() {
    let f = fixture().await;
    let page = resolve(&f.engine, &ctx(f.item.id)).await;

    let PageBuild::Default { build, .. } = &page else {
        panic!("expected default build, got {page:?}");
    };
    let fields: Vec<_> = build.fields.keys().map(String::as_str).collect();
    assert_eq!(fields, vec!["field_body", "field_tags", "promote"]);
    assert!(!render_page(&page).contains("layout__region"));
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let f = fixture().await;
    f.engine
        .save(&ctx(f.item.id), f.item.id, &example_submission())
        .await
        .unwrap();

    let first = resolve(&f.engine, &ctx(f.item.id)).await;
    let second = resolve(&f.engine, &ctx(f.item.id)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn saved_layout_becomes_active_and_fields_render_once() {
    let f = fixture().await;
    let outcome = f
        .engine
        .save(&ctx(f.item.id), f.item.id, &example_submission())
        .await
        .unwrap();
    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            content_item_id: f.item.id,
            revision_id: 2,
            active_template_id: "twocol".into(),
        }
    );

    let record = f.backend.find_exact(f.item.id, 2).await.unwrap().unwrap();
    assert_eq!(record.active_template_id, "twocol");
    assert_eq!(
        record.assignments["twocol"].region_of(&BLOCK_UUID.to_string()),
        Some("first")
    );

    let page = resolve(&f.engine, &ctx(f.item.id)).await;
    let layout = page.as_layout().unwrap();
    assert_eq!(layout.template.id, "twocol");
    assert_eq!(layout.revision_id, 2);
    assert_eq!(element_ids(&page, "first"), vec![BLOCK_UUID.to_string()]);
    assert_eq!(element_ids(&page, "second"), vec!["field_body"]);
    assert!(layout.region("first").unwrap().elements[0]
        .markup
        .contains("Buy now"));

    let html = render_page(&page);
    assert_eq!(html.matches("field--name-field-body").count(), 1);
    assert!(!html.contains("field--name-field-tags"));
    assert!(!html.contains("field--name-promote"));
}

#[tokio::test]
async fn round_trip_preserves_order() {
    let f = fixture().await;
    let sub = submission(
        "threecol_25_50_25",
        &[
            ("second", &[("field_tags", "field"), ("field_body", "field")]),
            ("first", &[("system_powered_by_block", "plugin_block")]),
        ],
    );
    f.engine.save(&ctx(f.item.id), f.item.id, &sub).await.unwrap();

    let page = resolve(&f.engine, &ctx(f.item.id)).await;
    assert_eq!(element_ids(&page, "second"), vec!["field_tags", "field_body"]);
    assert_eq!(element_ids(&page, "first"), vec!["system_powered_by_block"]);
    let weights: Vec<_> = page
        .as_layout()
        .unwrap()
        .region("second")
        .unwrap()
        .elements
        .iter()
        .map(|e| e.weight)
        .collect();
    assert_eq!(weights, vec![0, 1]);
    assert!(element_ids(&page, "top").is_empty());
}

#[tokio::test]
async fn disallowed_override_falls_back_to_default() {
    let f = fixture_with(article(&["onecol", "twocol"])).await;
    let page = resolve(
        &f.engine,
        &ctx_with(f.item.id, override_template("threecol_25_50_25")),
    )
    .await;
    assert_eq!(page.as_layout().unwrap().template.id, "onecol");

    let page = resolve(&f.engine, &ctx_with(f.item.id, override_template("nope"))).await;
    assert_eq!(page.as_layout().unwrap().template.id, "onecol");
}

#[tokio::test]
async fn override_is_normalized_and_display_only() {
    let f = fixture().await;
    let page = resolve(
        &f.engine,
        &ctx_with(f.item.id, override_template("twocol-bricks")),
    )
    .await;
    let layout = page.as_layout().unwrap();
    assert_eq!(layout.template.id, "twocol_bricks");
    // Nothing placed yet: every field is dropped.
    assert!(layout.regions.iter().all(|r| r.elements.is_empty()));
    assert_eq!(f.backend.layout_record_count().await, 0);
}

#[tokio::test]
async fn override_selects_stored_inactive_template() {
    let f = fixture().await;
    let c = ctx(f.item.id);
    f.engine
        .save(&c, f.item.id, &submission("onecol", &[("content", &[("field_tags", "field")])]))
        .await
        .unwrap();
    f.engine
        .save(&c, f.item.id, &example_submission())
        .await
        .unwrap();

    let page = resolve(&f.engine, &ctx_with(f.item.id, override_template("onecol"))).await;
    assert_eq!(element_ids(&page, "content"), vec!["field_tags"]);
}

#[tokio::test]
async fn regions_unknown_to_template_are_skipped() {
    let f = fixture().await;
    let sub = submission(
        "onecol",
        &[
            ("sidebar", &[("field_tags", "field")]),
            ("content", &[("field_body", "field")]),
        ],
    );
    f.engine.save(&ctx(f.item.id), f.item.id, &sub).await.unwrap();

    let page = resolve(&f.engine, &ctx(f.item.id)).await;
    let layout = page.as_layout().unwrap();
    assert_eq!(layout.regions.len(), 1);
    assert_eq!(element_ids(&page, "content"), vec!["field_body"]);
}

#[tokio::test]
async fn edit_mode_annotates_elements_and_adds_links() {
    let f = fixture().await;
    f.engine
        .save(&ctx(f.item.id), f.item.id, &example_submission())
        .await
        .unwrap();
    let overrides = LayoutOverrides {
        edit_mode: true,
        ..Default::default()
    };
    let page = resolve(&f.engine, &ctx_with(f.item.id, overrides)).await;
    let layout = page.as_layout().unwrap();

    assert!(layout.edit_mode);
    let placed = &layout.region("second").unwrap().elements[0];
    assert_eq!(placed.editor, Some(ElementRef::field("field_body")));
    for region in &layout.regions {
        let link = region.add_content.as_ref().unwrap();
        assert_eq!(
            link.href(),
            format!(
                "/api/v1/layout-editor/{}/add-content?region={}",
                f.item.id, region.name
            )
        );
    }

    let plain = resolve(&f.engine, &ctx(f.item.id)).await;
    let plain = plain.as_layout().unwrap();
    assert!(plain.regions.iter().all(|r| r.add_content.is_none()));
    assert!(plain.region("second").unwrap().elements[0].editor.is_none());
}

#[tokio::test]
async fn plugin_access_denial_renders_empty() {
    let f = fixture().await;
    let sub = submission("onecol", &[("content", &[("user_login_block", "plugin_block")])]);
    f.engine.save(&ctx(f.item.id), f.item.id, &sub).await.unwrap();

    let anonymous = resolve(&f.engine, &ctx(f.item.id)).await;
    let markup = &anonymous.as_layout().unwrap().regions[0].elements[0].markup;
    assert!(markup.contains("Log in"));

    let signed_in = RequestContext::for_item(f.item.id, Viewer::user(3, vec![]));
    let page = resolve(&f.engine, &signed_in).await;
    let placed = &page.as_layout().unwrap().regions[0].elements[0];
    assert_eq!(placed.element.kind, ElementKind::PluginBlock);
    assert!(placed.markup.is_empty());
}

#[tokio::test]
async fn missing_block_renders_empty() {
    let f = fixture().await;
    let missing = Uuid::from_u128(99).to_string();
    let sub = submission(
        "onecol",
        &[(
            "content",
            &[(missing.as_str(), "block_content"), ("not-a-uuid", "block_content")],
        )],
    );
    f.engine.save(&ctx(f.item.id), f.item.id, &sub).await.unwrap();

    let page = resolve(&f.engine, &ctx(f.item.id)).await;
    let elements = &page.as_layout().unwrap().regions[0].elements;
    assert_eq!(elements.len(), 2);
    assert!(elements.iter().all(|e| e.markup.is_empty()));
}

#[tokio::test]
async fn missing_item_resolves_to_nothing() {
    let f = fixture().await;
    assert!(f.engine.resolve(&ctx(999)).await.unwrap().is_none());
    assert!(f
        .engine
        .resolve(&RequestContext::default())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn revision_view_uses_that_revisions_record() {
    let f = fixture().await;
    f.engine
        .save(&ctx(f.item.id), f.item.id, &example_submission())
        .await
        .unwrap();

    let first_revision = LayoutOverrides {
        revision_id: Some(1),
        ..Default::default()
    };
    let page = resolve(&f.engine, &ctx_with(f.item.id, first_revision)).await;
    assert_matches!(page, PageBuild::Default { ref item, .. } if item.revision_id == 1);
}

// ---------------------------------------------------------------------------
// Revision fallback and carry-forward
// ---------------------------------------------------------------------------

#[tokio::test]
async fn record_of_previous_revision_is_used_once() {
    let f = fixture().await;
    f.engine
        .save(&ctx(f.item.id), f.item.id, &example_submission())
        .await
        .unwrap();

    // Ordinary edit: revision 3 without a layout record.
    f.backend
        .save_revision(f.item.id, article_fields())
        .await
        .unwrap();
    let page = resolve(&f.engine, &ctx(f.item.id)).await;
    assert_eq!(page.as_layout().unwrap().template.id, "twocol");

    // Revision 4: neither 4 nor 3 has a record.
    f.backend
        .save_revision(f.item.id, article_fields())
        .await
        .unwrap();
    let page = resolve(&f.engine, &ctx(f.item.id)).await;
    assert_matches!(page, PageBuild::Default { .. });
}

#[tokio::test]
async fn carry_forward_attaches_record_to_current_revision() {
    let f = fixture().await;
    f.engine
        .save(&ctx(f.item.id), f.item.id, &example_submission())
        .await
        .unwrap();
    f.backend
        .save_revision(f.item.id, article_fields())
        .await
        .unwrap();

    let carried = f.engine.carry_forward(f.item.id).await.unwrap().unwrap();
    assert_eq!(carried.revision_id, 3);
    assert_eq!(carried.active_template_id, "twocol");
    assert!(f.engine.carry_forward(f.item.id).await.unwrap().is_none());

    f.backend
        .save_revision(f.item.id, article_fields())
        .await
        .unwrap();
    let page = resolve(&f.engine, &ctx(f.item.id)).await;
    assert_eq!(page.as_layout().unwrap().template.id, "twocol");
}

#[tokio::test]
async fn carry_forward_without_layout_is_noop() {
    let f = fixture().await;
    assert!(f.engine.carry_forward(f.item.id).await.unwrap().is_none());
    assert_eq!(f.backend.layout_record_count().await, 0);
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

#[tokio::test]
async fn saving_one_template_leaves_others_untouched() {
    let f = fixture().await;
    let c = ctx(f.item.id);
    f.engine
        .save(
            &c,
            f.item.id,
            &submission(
                "onecol",
                &[("content", &[("field_tags", "field"), ("field_body", "field")])],
            ),
        )
        .await
        .unwrap();
    let before = f.backend.find_exact(f.item.id, 2).await.unwrap().unwrap();

    f.engine
        .save(&c, f.item.id, &example_submission())
        .await
        .unwrap();
    let after = f.backend.find_exact(f.item.id, 3).await.unwrap().unwrap();

    assert_eq!(after.active_template_id, "twocol");
    assert_eq!(
        after.assignments.keys().collect::<Vec<_>>(),
        vec!["twocol", "onecol"]
    );
    assert_eq!(
        serde_json::to_string(&after.assignments["onecol"]).unwrap(),
        serde_json::to_string(&before.assignments["onecol"]).unwrap()
    );
}

#[tokio::test]
async fn resaving_a_template_replaces_it() {
    let f = fixture().await;
    let c = ctx(f.item.id);
    f.engine
        .save(&c, f.item.id, &example_submission())
        .await
        .unwrap();
    f.engine
        .save(
            &c,
            f.item.id,
            &submission("twocol", &[("top", &[("field_tags", "field")])]),
        )
        .await
        .unwrap();

    let record = f.backend.find_exact(f.item.id, 3).await.unwrap().unwrap();
    let twocol = &record.assignments["twocol"];
    assert_eq!(twocol.element_count(), 1);
    assert!(!twocol.contains("field_body"));
}

#[tokio::test]
async fn empty_save_is_a_noop() {
    let f = fixture().await;
    let outcome = f
        .engine
        .save(&ctx(f.item.id), f.item.id, &LayoutSubmission::default())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        SaveOutcome::Unchanged {
            content_item_id: f.item.id
        }
    );
    assert_eq!(f.backend.layout_record_count().await, 0);
    let item = f.engine.load_current(f.item.id).await.unwrap();
    assert_eq!(item.revision_id, 1);
}

#[tokio::test]
async fn save_for_missing_item_is_not_found() {
    let f = fixture().await;
    let result = f.engine.save(&ctx(999), 999, &example_submission()).await;
    assert_matches!(result, Err(CoreError::NotFound { id: 999, .. }));
}

#[tokio::test]
async fn save_records_revision_metadata() {
    let f = fixture().await;
    let c = RequestContext::for_item(f.item.id, Viewer::user(7, vec![]));
    f.engine
        .save(&c, f.item.id, &example_submission())
        .await
        .unwrap();

    let info = f.backend.revision_info(f.item.id, 2).await.unwrap();
    assert_eq!(info.log_message, "Layout updated");
    assert_eq!(info.created_by, Some(7));
    assert!(info.translation_affected);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

/// A store that lets a competing save land between the first save's read
/// and its commit.
struct RacingStore {
    inner: Arc<MemoryBackend>,
    raced: AtomicBool,
}

#[async_trait]
impl LayoutStore for RacingStore {
    async fn find_exact(
        &self,
        content_item_id: DbId,
        revision_id: DbId,
    ) -> Result<Option<LayoutRecord>, CoreError> {
        self.inner.find_exact(content_item_id, revision_id).await
    }

    async fn put(&self, record: &LayoutRecord) -> Result<(), CoreError> {
        self.inner.put(record).await
    }

    async fn commit_revision(&self, commit: &RevisionCommit) -> Result<CommitOutcome, CoreError> {
        if !self.raced.swap(true, Ordering::SeqCst) {
            let mut competing = RegionAssignment::new();
            competing.place("content", ElementRef::field("field_tags"));
            let rival = RevisionCommit {
                active_template_id: "onecol".into(),
                assignments: IndexMap::from([("onecol".to_string(), competing)]),
                ..commit.clone()
            };
            assert_matches!(
                self.inner.commit_revision(&rival).await?,
                CommitOutcome::Committed(_)
            );
        }
        self.inner.commit_revision(commit).await
    }
}

#[tokio::test]
async fn concurrent_saves_for_different_templates_both_survive() {
    let f = fixture().await;
    let store = Arc::new(RacingStore {
        inner: f.backend.clone(),
        raced: AtomicBool::new(false),
    });
    let engine = engine_over(&f.backend, store);

    let outcome = engine
        .save(&ctx(f.item.id), f.item.id, &example_submission())
        .await
        .unwrap();
    assert_matches!(outcome, SaveOutcome::Saved { revision_id: 3, .. });

    let record = f.backend.find_exact(f.item.id, 3).await.unwrap().unwrap();
    assert_eq!(record.active_template_id, "twocol");
    assert_eq!(
        record.assignments.keys().collect::<Vec<_>>(),
        vec!["twocol", "onecol"]
    );
    assert!(record.assignments["onecol"].contains("field_tags"));
}

/// A store whose item always moves on before the commit lands.
struct AlwaysStaleStore {
    inner: Arc<MemoryBackend>,
}

#[async_trait]
impl LayoutStore for AlwaysStaleStore {
    async fn find_exact(
        &self,
        content_item_id: DbId,
        revision_id: DbId,
    ) -> Result<Option<LayoutRecord>, CoreError> {
        self.inner.find_exact(content_item_id, revision_id).await
    }

    async fn put(&self, record: &LayoutRecord) -> Result<(), CoreError> {
        self.inner.put(record).await
    }

    async fn commit_revision(&self, commit: &RevisionCommit) -> Result<CommitOutcome, CoreError> {
        Ok(CommitOutcome::Stale {
            current_revision_id: commit.base_revision_id + 1,
        })
    }
}

#[tokio::test]
async fn save_gives_up_after_repeated_conflicts() {
    let f = fixture().await;
    let engine = engine_over(
        &f.backend,
        Arc::new(AlwaysStaleStore {
            inner: f.backend.clone(),
        }),
    );

    let result = engine
        .save(&ctx(f.item.id), f.item.id, &example_submission())
        .await;
    assert_matches!(result, Err(CoreError::Conflict(_)));
    assert_eq!(f.backend.layout_record_count().await, 0);
}

// ---------------------------------------------------------------------------
// Editor helpers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn render_element_wraps_for_editor() {
    let f = fixture().await;
    let html = f
        .engine
        .render_element(&ctx(f.item.id), f.item.id, &ElementRef::field("field_tags"), true)
        .await
        .unwrap();
    assert!(html.starts_with(
        "<div data-layout-editor-object=\"field_tags\" data-layout-editor-type=\"field\">"
    ));
    assert!(html.contains("Tags"));

    let bare = f
        .engine
        .render_element(
            &ctx(f.item.id),
            f.item.id,
            &ElementRef::plugin_block("missing_plugin"),
            false,
        )
        .await
        .unwrap();
    assert!(bare.is_empty());
}

#[tokio::test]
async fn inventory_lists_placeable_elements() {
    let f = fixture().await;
    f.engine
        .save(&ctx(f.item.id), f.item.id, &example_submission())
        .await
        .unwrap();

    let inventory = f
        .engine
        .placeable_elements(f.item.id, Some("top"), &["system".to_string()])
        .await
        .unwrap();

    assert_eq!(inventory.template_id, "twocol");
    let fields: Vec<_> = inventory
        .fields
        .iter()
        .map(|e| (e.element.id.as_str(), e.placed))
        .collect();
    assert_eq!(fields, vec![("field_body", true), ("field_tags", false)]);

    assert_eq!(inventory.content_blocks.len(), 1);
    assert!(inventory.content_blocks[0].placed);

    assert_eq!(
        inventory.plugin_blocks.keys().collect::<Vec<_>>(),
        vec!["system"]
    );
    assert_eq!(inventory.plugin_blocks["system"].len(), 2);
    assert_eq!(inventory.unplaced().count(), 3);
}

#[tokio::test]
async fn inventory_rejects_region_outside_active_template() {
    let f = fixture().await;
    let providers = ["system".to_string()];

    // "top" only exists once the two-column template is active.
    let err = f
        .engine
        .placeable_elements(f.item.id, Some("top"), &providers)
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::UnknownKey { entity: "LayoutRegion", ref key } if key == "top");

    let inventory = f
        .engine
        .placeable_elements(f.item.id, Some("content"), &providers)
        .await
        .unwrap();
    assert_eq!(inventory.template_id, "onecol");
    assert_eq!(inventory.region.as_deref(), Some("content"));
}

#[tokio::test]
async fn active_template_reported_for_switcher() {
    let f = fixture().await;
    let (item, content_type) = f.engine.load_with_type(f.item.id).await.unwrap();
    assert_eq!(
        f.engine.active_template_id(&item, &content_type).await.unwrap(),
        "onecol"
    );

    f.engine
        .save(&ctx(f.item.id), f.item.id, &example_submission())
        .await
        .unwrap();
    let (item, content_type) = f.engine.load_with_type(f.item.id).await.unwrap();
    assert_eq!(
        f.engine.active_template_id(&item, &content_type).await.unwrap(),
        "twocol"
    );
}
