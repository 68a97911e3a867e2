//! Region-assignment data model.
//!
//! A [`RegionAssignment`] maps region name to an ordered set of elements
//! (`element id -> element kind`). Insertion order is display order; no weight
//! is stored. A [`LayoutRecord`] binds the assignments for any number of
//! templates to one revision of one content item.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::element::{ElementKind, ElementRef};
use crate::error::CoreError;
use crate::naming::machine_name;
use crate::types::{DbId, ENTITY_TYPE_CONTENT};

/// The wire/storage shape of one template's regions:
/// `{ region: { element_id: element_type } }`.
pub type RawRegions = IndexMap<String, IndexMap<String, String>>;

/// The wire shape of a save request's `layout` field:
/// `{ template_raw: { region: { element_id: element_type } } }`.
pub type RawLayout = IndexMap<String, RawRegions>;

// ---------------------------------------------------------------------------
// RegionAssignment
// ---------------------------------------------------------------------------

/// Ordered mapping of region name to the elements placed in it.
///
/// An element id appears at most once across all regions; placing an element
/// that is already placed elsewhere moves it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionAssignment(IndexMap<String, IndexMap<String, ElementKind>>);

impl RegionAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `element` to the end of `region`, removing it from wherever it
    /// was placed before.
    pub fn place(&mut self, region: &str, element: ElementRef) {
        self.remove(&element.id);
        self.0
            .entry(region.to_string())
            .or_default()
            .insert(element.id, element.kind);
    }

    /// Move an element to `index` within `region` (clamped to the region's
    /// length). This is the drag-and-drop reassignment primitive.
    ///
    /// Returns `false` if the element is not placed anywhere.
    pub fn move_to(&mut self, element_id: &str, region: &str, index: usize) -> bool {
        let Some((_, kind)) = self.remove(element_id) else {
            return false;
        };
        let elements = self.0.entry(region.to_string()).or_default();
        let index = index.min(elements.len());
        elements.shift_insert(index, element_id.to_string(), kind);
        true
    }

    /// Remove an element, returning the region it occupied and its kind.
    pub fn remove(&mut self, element_id: &str) -> Option<(String, ElementKind)> {
        for (region, elements) in self.0.iter_mut() {
            if let Some(kind) = elements.shift_remove(element_id) {
                return Some((region.clone(), kind));
            }
        }
        None
    }

    /// Find the region an element is placed in.
    pub fn region_of(&self, element_id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, elements)| elements.contains_key(element_id))
            .map(|(region, _)| region.as_str())
    }

    pub fn contains(&self, element_id: &str) -> bool {
        self.region_of(element_id).is_some()
    }

    /// Region names in stored order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Elements of one region in display order.
    pub fn elements_in<'a>(&'a self, region: &str) -> impl Iterator<Item = ElementRef> + 'a {
        self.0
            .get(region)
            .into_iter()
            .flat_map(|elements| elements.iter())
            .map(|(id, kind)| ElementRef::new(id.clone(), *kind))
    }

    /// Every `(region, element)` pair in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ElementRef)> + '_ {
        self.0.iter().flat_map(|(region, elements)| {
            elements
                .iter()
                .map(move |(id, kind)| (region.as_str(), ElementRef::new(id.clone(), *kind)))
        })
    }

    /// Total number of placed elements.
    pub fn element_count(&self) -> usize {
        self.0.values().map(IndexMap::len).sum()
    }

    /// Parse one template's raw regions, normalizing region names and
    /// validating element kinds.
    pub fn from_raw(raw: &RawRegions) -> Result<Self, CoreError> {
        let mut assignment = Self::new();
        for (region, contents) in raw {
            let region = machine_name(region);
            // Keep empty regions so their position is remembered.
            assignment.0.entry(region.clone()).or_default();
            for (id, kind) in contents {
                let kind = kind.parse::<ElementKind>()?;
                assignment.place(&region, ElementRef::new(id.clone(), kind));
            }
        }
        Ok(assignment)
    }
}

// ---------------------------------------------------------------------------
// LayoutAssignment
// ---------------------------------------------------------------------------

/// One complete layout configuration: a template and its regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutAssignment {
    pub template_id: String,
    pub regions: RegionAssignment,
}

// ---------------------------------------------------------------------------
// LayoutRecord
// ---------------------------------------------------------------------------

/// Persisted layout state for one revision of one content item.
///
/// Records are immutable once written; every save produces a new record for
/// the new revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRecord {
    pub content_item_id: DbId,
    pub revision_id: DbId,
    pub entity_type: String,
    /// The template governing this revision's rendered layout.
    pub active_template_id: String,
    /// Stored assignments keyed by template id. Inactive templates are kept
    /// so switching back restores their configuration.
    pub assignments: IndexMap<String, RegionAssignment>,
}

impl LayoutRecord {
    pub fn new(
        content_item_id: DbId,
        revision_id: DbId,
        active_template_id: impl Into<String>,
        assignments: IndexMap<String, RegionAssignment>,
    ) -> Self {
        Self {
            content_item_id,
            revision_id,
            entity_type: ENTITY_TYPE_CONTENT.to_string(),
            active_template_id: active_template_id.into(),
            assignments,
        }
    }

    /// Build a record from an ordered assignment map whose first key is the
    /// active template. Returns `None` for an empty map.
    pub fn from_ordered(
        content_item_id: DbId,
        revision_id: DbId,
        assignments: IndexMap<String, RegionAssignment>,
    ) -> Option<Self> {
        let active = assignments.keys().next()?.clone();
        Some(Self::new(content_item_id, revision_id, active, assignments))
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn assignment(&self, template_id: &str) -> Option<&RegionAssignment> {
        self.assignments.get(template_id)
    }

    /// The assignment of the active template, if one is stored.
    pub fn active_assignment(&self) -> Option<LayoutAssignment> {
        self.assignments
            .get(&self.active_template_id)
            .map(|regions| LayoutAssignment {
                template_id: self.active_template_id.clone(),
                regions: regions.clone(),
            })
    }

    /// Copy this record onto another revision of the same item.
    pub fn rebind(&self, revision_id: DbId) -> Self {
        Self {
            revision_id,
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// LayoutSubmission
// ---------------------------------------------------------------------------

/// A validated, normalized save request: one or more templates' worth of
/// regions in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutSubmission {
    pub templates: IndexMap<String, RegionAssignment>,
}

impl LayoutSubmission {
    /// Normalize template and region keys (hyphen -> underscore) and parse
    /// element kinds. Raw keys that normalize to the same template are merged.
    pub fn from_raw(raw: &RawLayout) -> Result<Self, CoreError> {
        let mut templates: IndexMap<String, RegionAssignment> = IndexMap::new();
        for (template_raw, regions) in raw {
            let template_id = machine_name(template_raw);
            if template_id.is_empty() {
                return Err(CoreError::Validation(
                    "Template id must not be empty".into(),
                ));
            }
            let parsed = RegionAssignment::from_raw(regions)?;
            let entry = templates.entry(template_id).or_default();
            for region in parsed.regions() {
                entry.0.entry(region.to_string()).or_default();
                for element in parsed.elements_in(region) {
                    entry.place(region, element);
                }
            }
        }
        Ok(Self { templates })
    }

    pub fn single(template_id: impl Into<String>, regions: RegionAssignment) -> Self {
        let mut templates = IndexMap::new();
        templates.insert(template_id.into(), regions);
        Self { templates }
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The template that becomes active when this submission is saved.
    pub fn primary_template(&self) -> Option<&str> {
        self.templates.keys().next().map(String::as_str)
    }
}
