//! Per-document render context.

use std::collections::BTreeMap;

use crate::entity::EntityTransform;
use crate::markup::PropertyOverride;
use crate::model::{Document, Entity, EntityKey};
use crate::options::AnnotationConfig;

/// Everything block rendering needs besides the block itself.
///
/// Created by [`DraftSerializer`](crate::DraftSerializer) once per document and
/// shared by all blocks. Holds borrowed data only.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Entities referenced by entity ranges.
    pub entity_map: &'a BTreeMap<EntityKey, Entity>,
    /// Annotation detection config, `None` when disabled.
    pub annotations: Option<&'a AnnotationConfig>,
    /// Emit `dir="auto"` on block and list item tags.
    pub directional: bool,
    /// Custom entity rendering.
    pub entity_transform: Option<&'a dyn EntityTransform>,
    /// Custom property style values.
    pub property_override: Option<&'a dyn PropertyOverride>,
}

impl<'a> RenderContext<'a> {
    /// Context for a document with every option disabled.
    #[must_use]
    pub fn new(document: &'a Document) -> Self {
        Self {
            entity_map: &document.entity_map,
            annotations: None,
            directional: false,
            entity_transform: None,
            property_override: None,
        }
    }

    /// Look up an entity by key.
    #[must_use]
    pub fn entity(&self, key: &EntityKey) -> Option<&'a Entity> {
        self.entity_map.get(key)
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("entities", &self.entity_map.len())
            .field("annotations", &self.annotations)
            .field("directional", &self.directional)
            .field("entity_transform", &self.entity_transform.is_some())
            .field("property_override", &self.property_override.is_some())
            .finish()
    }
}
